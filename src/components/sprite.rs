use bevy_ecs::prelude::Component;
use serde::Deserialize;

/// Metadata of the image asset assigned to a tile.
///
/// Only the pixel dimensions and the asset's own pixels-per-unit value feed
/// the core: the tile alignment pass uses them to derive the visual scale
/// and to reject assets whose scale disagrees with the level's
/// pixels-per-unit. Actual texture loading and drawing live outside this
/// crate.
#[derive(Component, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SpriteInfo {
    pub tex_key: String,
    pub texture_width: u32,
    pub texture_height: u32,
    pub pixels_per_unit: u32,
}
