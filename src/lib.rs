//! Pixel-grid platformer core library.
//!
//! Exposes the ECS components, resources, systems and events of the
//! simulation for use in integration tests and as a reusable library.

pub mod components;
pub mod events;
pub mod game;
pub mod grid;
pub mod mathutil;
pub mod resources;
pub mod systems;
