//! Simulation systems.
//!
//! One concern per file; the per-tick ordering is fixed by the schedule in
//! `main`: level space reconfiguration, tile alignment, obstacle registry
//! refresh, character update, grid mesh regeneration, visual smoothing.
//!
//! Submodules overview
//! - [`character`] – velocity, integration, collision resolution, write-back
//! - [`gridmesh`] – regenerate the line-grid geometry from its inputs
//! - [`levelspace`] – re-derive aligned level geometry every tick
//! - [`registry`] – lazy obstacle registry refresh, once per tick
//! - [`tilealign`] – snap tiles onto the grid, write visual scale
//! - [`time`] – advance simulation time and the tick counter
//! - [`visual`] – move rendered positions toward logical positions

pub mod character;
pub mod gridmesh;
pub mod levelspace;
pub mod registry;
pub mod tilealign;
pub mod time;
pub mod visual;
