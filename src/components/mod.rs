//! ECS components for entities.
//!
//! This module groups the component types that can be attached to entities
//! in the simulation world.
//!
//! Submodules overview:
//! - [`boxcollider`] – integer pixel-space AABB used by collision resolution
//! - [`character`] – pixel position, velocity, jump state and contact tracking
//! - [`levelgrid`] – grid line-mesh parameters and the generated geometry
//! - [`levelspace`] – pixel-space level bounds and their grid-aligned form
//! - [`mapposition`] – logical and smoothed world-space positions
//! - [`scale`] – 2D visual scale written by tile alignment
//! - [`sprite`] – metadata of a tile's assigned image asset
//! - [`tile`] – grid-aligned tile footprint and role flags

pub mod boxcollider;
pub mod character;
pub mod levelgrid;
pub mod levelspace;
pub mod mapposition;
pub mod scale;
pub mod sprite;
pub mod tile;
