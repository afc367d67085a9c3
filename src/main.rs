use std::path::PathBuf;

use cinnamon::{
    config::EngineConfig,
    context::Context,
    flow::{self, FlowConstructor, GraphicsFlow},
    game::{GameState, VoxelFlow},
};

fn main() -> anyhow::Result<()> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => EngineConfig::load(&path)?,
        None => EngineConfig::default(),
    };

    let state = GameState::new(&config);
    let atlas = config.world.atlas.clone();
    let voxel_flow: FlowConstructor<GameState> = Box::new(
        move |ctx: &Context,
              state: &mut GameState|
              -> anyhow::Result<Box<dyn GraphicsFlow<GameState>>> {
            let flow = VoxelFlow::new(ctx, state, atlas.as_deref())?;
            Ok(Box::new(flow))
        },
    );

    flow::run(config, state, vec![voxel_flow])
}
