//! Core domain types for moving-image.
//!
//! This module contains the value types the canvas and history work with:
//! - `Colour` - RGB colour values
//! - `Operation` - One reversible geometric transform
//! - `Sprite` - The initial artwork stamped onto the canvas

mod colour;
mod operation;
mod sprite;

pub use colour::Colour;
pub use operation::{OpKind, Operation};
pub use sprite::{PixelToken, Sprite};
