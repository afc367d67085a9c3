#[cfg(feature = "integration-tests")]
use cinnamon::{
    DeviceEvent, WindowEvent,
    config::EngineConfig,
    context::Context,
    flow::{FlowConstructor, GraphicsFlow, Out},
    data_structures::block::BlockType,
    game::{GameState, VoxelFlow},
};
#[cfg(feature = "integration-tests")]
use instant::Duration;

#[cfg(feature = "integration-tests")]
const TICKS: u32 = 5;

/// Runs the demo scene and stops it after a few ticks.
#[cfg(feature = "integration-tests")]
struct Stopwatch {
    inner: VoxelFlow,
    ticks: u32,
}

#[cfg(feature = "integration-tests")]
impl GraphicsFlow<GameState> for Stopwatch {
    fn on_init(&mut self, ctx: &mut Context, state: &mut GameState) -> Out {
        self.inner.on_init(ctx, state)
    }

    fn on_update(&mut self, ctx: &mut Context, state: &mut GameState, dt: Duration) -> Out {
        self.inner.on_update(ctx, state, dt)
    }

    fn on_tick(&mut self, ctx: &Context, state: &mut GameState) -> Out {
        self.inner.on_tick(ctx, state);
        self.ticks += 1;
        if self.ticks == 2 {
            // the remaining frames draw an empty chunk, which is skipped quietly
            for x in 0..16 {
                for y in 0..16 {
                    for z in 0..16 {
                        state.chunk.set_block(x, y, z, BlockType::Air);
                    }
                }
            }
            assert!(state.chunk.is_dirty());
        }
        if self.ticks >= TICKS {
            assert_eq!(state.chunk.grid().solid_count(), 0);
            Out::Exit
        } else {
            Out::Empty
        }
    }

    fn on_device_events(&mut self, ctx: &Context, state: &mut GameState, event: &DeviceEvent) -> Out {
        self.inner.on_device_events(ctx, state, event)
    }

    fn on_window_events(&mut self, ctx: &Context, state: &mut GameState, event: &WindowEvent) -> Out {
        self.inner.on_window_events(ctx, state, event)
    }

    fn on_render(&self, ctx: &Context, render_pass: &mut wgpu::RenderPass<'_>) {
        self.inner.on_render(ctx, render_pass)
    }
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_render_the_demo_scene() {
    let mut config = EngineConfig::default();
    config.camera.start_captured = false;
    let state = GameState::new(&config);
    let constructor: FlowConstructor<GameState> = Box::new(
        |ctx: &Context, state: &mut GameState| -> anyhow::Result<Box<dyn GraphicsFlow<GameState>>> {
            let inner = VoxelFlow::new(ctx, state, None)?;
            Ok(Box::new(Stopwatch { inner, ticks: 0 }))
        },
    );

    if let Err(e) = cinnamon::flow::run(config, state, vec![constructor]) {
        panic!("{:#}", e);
    }
}
