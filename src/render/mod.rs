//! Rendering support for the terminal canvas
//!
//! This module is READ-ONLY with respect to game state.

pub mod colors;
pub mod sprites;

pub use sprites::{Sprite, SpriteCache};
