//! Side-scrolling platformer: walk and jump across tile maps, pick up
//! valuables, and reach the right edge of each map to load the next one.

pub mod camera;
pub mod config;
pub mod game;
pub mod input;
pub mod level;
pub mod player;

#[cfg(test)]
mod testing;

pub use game::{Platformer, PlatformerError};

#[cfg(feature = "physics")]
mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::Platformer;
    use ledge_engine::RapierWorld;

    ledge_web::export_game!(Platformer<RapierWorld>, "platformer");
}
