use std::{path::Path, time::Duration};

use cinnamon::config::{EngineConfig, Generator};

#[test]
fn should_default_to_the_stock_demo() {
    let config = EngineConfig::default();
    assert_eq!(config.window.title, "Cinnamon");
    assert_eq!((config.window.width, config.window.height), (800, 400));
    assert_eq!(config.camera.fovy_degrees, 90.0);
    assert_eq!(config.camera.znear, 0.01);
    assert_eq!(config.camera.zfar, 100.0);
    assert_eq!(config.camera.mouse_sensitivity, 0.01);
    assert_eq!(config.camera.start_position, [0.0, 0.0, 2.0]);
    assert!(config.camera.start_captured);
    assert_eq!(config.movement.step, 0.1);
    assert_eq!(config.movement.half_size, 0.2);
    assert_eq!(config.movement.walkback_steps, 10);
    assert_eq!(config.movement.walkback_increment, 0.01);
    assert_eq!(config.world.seed, 1);
    assert_eq!(config.world.generator, Generator::Scatter { one_in: 5 });
    assert_eq!(config.world.atlas, None);
    assert_eq!(config.tick_rate, 60);
}

#[test]
fn should_accept_an_empty_file() {
    assert_eq!(
        EngineConfig::from_toml("").unwrap(),
        EngineConfig::default()
    );
}

#[test]
fn should_override_only_named_fields() {
    let config = EngineConfig::from_toml(
        r#"
        tick_rate = 30

        [camera]
        fovy_degrees = 75.0

        [world]
        seed = 7
        generator = { kind = "heightmap", smoothness = 20 }
        atlas = "assets/atlas.png"
        "#,
    )
    .unwrap();

    assert_eq!(config.tick_rate, 30);
    assert_eq!(config.tick_duration(), Duration::from_secs_f64(1.0 / 30.0));
    assert_eq!(config.camera.fovy_degrees, 75.0);
    assert_eq!(config.camera.znear, 0.01);
    assert_eq!(config.world.seed, 7);
    assert_eq!(
        config.world.generator,
        Generator::Heightmap { smoothness: 20 }
    );
    assert_eq!(
        config.world.atlas.as_deref(),
        Some(Path::new("assets/atlas.png"))
    );
    assert_eq!(config.window, EngineConfig::default().window);
}

#[test]
fn should_reject_invalid_values() {
    assert!(EngineConfig::from_toml("tick_rate = 0").is_err());
    assert!(EngineConfig::from_toml("[camera]\nznear = 10.0\nzfar = 1.0").is_err());
    assert!(EngineConfig::from_toml("tick_rate = \"fast\"").is_err());
    assert!(EngineConfig::from_toml("[world]\ngenerator = { kind = \"caves\" }").is_err());
}

#[test]
fn should_report_missing_files() {
    let err = EngineConfig::load(Path::new("does/not/exist.toml")).unwrap_err();
    assert!(format!("{err:#}").contains("does/not/exist.toml"));
}
