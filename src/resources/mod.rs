//! ECS resources made available to systems.
//!
//! Long-lived data injected into the simulation world and read or written by
//! systems during execution.
//!
//! Overview
//! - `input` – normalized per-tick input (keys, analog axis, dead zone)
//! - `levelcontext` – active level entity and the lazy obstacle registry
//! - `simconfig` – level, grid, character and loop settings from an INI file
//! - `worldtime` – simulation time, delta and tick counter

pub mod input;
pub mod levelcontext;
pub mod simconfig;
pub mod worldtime;
