//! Shared per-world level context.
//!
//! Replaces the usual pattern of a process-wide singleton: the active level
//! entity and the current obstacle list live in a resource owned by the
//! simulation world and are passed into each system by the scheduler.
//!
//! The obstacle list is rebuilt lazily, keyed on the total tile count: a
//! refresh with an unchanged count is a no-op, so a tile whose obstacle flag
//! is toggled without changing the count is missed until the count changes.
//! That staleness is the documented behavior of the registry and is covered
//! by a test below.

use bevy_ecs::prelude::{Entity, Resource};

use crate::components::tile::TileFlags;

/// Active level entity plus the obstacle registry.
#[derive(Resource, Debug, Default)]
pub struct LevelContext {
    /// The single `LevelSpace` entity, set during scene setup.
    pub level: Option<Entity>,
    /// Tiles currently flagged as obstacles.
    pub obstacles: Vec<Entity>,
    /// Total tile count observed at the last rebuild.
    tile_count: usize,
    rebuilt_once: bool,
}

impl LevelContext {
    /// Rebuild the obstacle list if the total tile count changed.
    ///
    /// Returns true when a rebuild happened.
    pub fn refresh<I>(&mut self, total_tiles: usize, tiles: I) -> bool
    where
        I: IntoIterator<Item = (Entity, TileFlags)>,
    {
        if self.rebuilt_once && total_tiles == self.tile_count {
            return false;
        }

        self.obstacles.clear();
        self.obstacles.extend(
            tiles
                .into_iter()
                .filter(|(_, flags)| flags.contains(TileFlags::OBSTACLE))
                .map(|(entity, _)| entity),
        );
        self.tile_count = total_tiles;
        self.rebuilt_once = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    fn entities(world: &mut World, n: usize) -> Vec<Entity> {
        (0..n).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn test_first_refresh_collects_obstacles() {
        let mut world = World::new();
        let ids = entities(&mut world, 3);
        let tiles = vec![
            (ids[0], TileFlags::OBSTACLE),
            (ids[1], TileFlags::NONE),
            (ids[2], TileFlags::OBSTACLE),
        ];

        let mut ctx = LevelContext::default();
        assert!(ctx.refresh(tiles.len(), tiles.iter().copied()));
        assert_eq!(ctx.obstacles, vec![ids[0], ids[2]]);
    }

    #[test]
    fn test_refresh_is_noop_when_count_unchanged() {
        let mut world = World::new();
        let ids = entities(&mut world, 2);
        let before = vec![(ids[0], TileFlags::OBSTACLE), (ids[1], TileFlags::NONE)];

        let mut ctx = LevelContext::default();
        ctx.refresh(before.len(), before.iter().copied());
        assert_eq!(ctx.obstacles, vec![ids[0]]);

        // Flags swapped between the two tiles, count unchanged: the list
        // stays stale until the count changes.
        let after = vec![(ids[0], TileFlags::NONE), (ids[1], TileFlags::OBSTACLE)];
        assert!(!ctx.refresh(after.len(), after.iter().copied()));
        assert_eq!(ctx.obstacles, vec![ids[0]]);
    }

    #[test]
    fn test_count_change_triggers_rebuild() {
        let mut world = World::new();
        let ids = entities(&mut world, 3);
        let before = vec![(ids[0], TileFlags::OBSTACLE)];

        let mut ctx = LevelContext::default();
        ctx.refresh(before.len(), before.iter().copied());

        let after = vec![
            (ids[0], TileFlags::OBSTACLE),
            (ids[1], TileFlags::OBSTACLE),
            (ids[2], TileFlags::NONE),
        ];
        assert!(ctx.refresh(after.len(), after.iter().copied()));
        assert_eq!(ctx.obstacles, vec![ids[0], ids[1]]);
    }

    #[test]
    fn test_refresh_runs_even_for_an_initially_empty_scene() {
        let mut ctx = LevelContext::default();
        assert!(ctx.refresh(0, std::iter::empty()));
        assert!(ctx.obstacles.is_empty());
        assert!(!ctx.refresh(0, std::iter::empty()));
    }
}
