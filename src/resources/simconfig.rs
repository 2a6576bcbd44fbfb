//! Simulation configuration resource.
//!
//! Settings are loaded from an INI file; missing values keep their
//! defaults so a partial (or absent) file still yields a runnable
//! configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [level]
//! pixels_per_unit = 8
//! origin_x = 0
//! origin_y = 0
//! pixel_width = 96
//! pixel_height = 96
//!
//! [grid]
//! line_thickness = 0.1
//!
//! [character]
//! run_speed = 100.0
//! jump_peak_height = 48.0
//! jump_peak_distance = 48.0
//! visual_speed = 60.0
//!
//! [sim]
//! tick_rate = 120
//! max_ticks = 600
//! ```

use bevy_ecs::prelude::Resource;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::character::CharacterTuning;

const DEFAULT_PIXELS_PER_UNIT: i64 = 8;
const DEFAULT_PIXEL_WIDTH: i64 = 96;
const DEFAULT_PIXEL_HEIGHT: i64 = 96;
const DEFAULT_LINE_THICKNESS: f32 = 0.1;
const DEFAULT_TICK_RATE: u32 = 120;
const DEFAULT_MAX_TICKS: u64 = 600;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Level, grid, character and loop settings for one simulation run.
#[derive(Resource, Debug, Clone)]
pub struct SimConfig {
    pub pixels_per_unit: i64,
    pub origin_x: i64,
    pub origin_y: i64,
    pub pixel_width: i64,
    pub pixel_height: i64,

    pub line_thickness: f32,

    pub character: CharacterTuning,

    /// Fixed ticks per second driving the headless loop.
    pub tick_rate: u32,
    /// Tick count after which the loop stops.
    pub max_ticks: u64,

    pub config_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self {
            pixels_per_unit: DEFAULT_PIXELS_PER_UNIT,
            origin_x: 0,
            origin_y: 0,
            pixel_width: DEFAULT_PIXEL_WIDTH,
            pixel_height: DEFAULT_PIXEL_HEIGHT,
            line_thickness: DEFAULT_LINE_THICKNESS,
            character: CharacterTuning::default(),
            tick_rate: DEFAULT_TICK_RATE,
            max_ticks: DEFAULT_MAX_TICKS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values. Returns an
    /// error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [level] section
        if let Some(ppu) = config.getint("level", "pixels_per_unit").ok().flatten() {
            self.pixels_per_unit = ppu;
        }
        if let Some(x) = config.getint("level", "origin_x").ok().flatten() {
            self.origin_x = x;
        }
        if let Some(y) = config.getint("level", "origin_y").ok().flatten() {
            self.origin_y = y;
        }
        if let Some(width) = config.getint("level", "pixel_width").ok().flatten() {
            self.pixel_width = width;
        }
        if let Some(height) = config.getint("level", "pixel_height").ok().flatten() {
            self.pixel_height = height;
        }

        // [grid] section
        if let Some(thickness) = config.getfloat("grid", "line_thickness").ok().flatten() {
            self.line_thickness = thickness as f32;
        }

        // [character] section
        if let Some(speed) = config.getfloat("character", "run_speed").ok().flatten() {
            self.character.run_speed = speed as f32;
        }
        if let Some(height) = config.getfloat("character", "jump_peak_height").ok().flatten() {
            self.character.jump_peak_height = height as f32;
        }
        if let Some(distance) = config
            .getfloat("character", "jump_peak_distance")
            .ok()
            .flatten()
        {
            self.character.jump_peak_distance = distance as f32;
        }
        if let Some(speed) = config.getfloat("character", "visual_speed").ok().flatten() {
            self.character.visual_speed = speed as f32;
        }

        // [sim] section
        if let Some(rate) = config.getuint("sim", "tick_rate").ok().flatten() {
            self.tick_rate = rate as u32;
        }
        if let Some(ticks) = config.getuint("sim", "max_ticks").ok().flatten() {
            self.max_ticks = ticks;
        }

        info!(
            "Loaded config: ppu={}, origin=({}, {}), extent={}x{}, tick_rate={}, max_ticks={}",
            self.pixels_per_unit,
            self.origin_x,
            self.origin_y,
            self.pixel_width,
            self.pixel_height,
            self.tick_rate,
            self.max_ticks
        );

        Ok(())
    }
}
