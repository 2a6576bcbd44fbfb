//! Character velocity, integration and collision resolution.
//!
//! One tick of a character runs strictly in this order: velocity computation
//! (input / jump arc), pixel-position integration, collision resolution
//! against the obstacle registry, then the world-position write-back. The
//! registry itself is refreshed earlier in the tick by
//! [`crate::systems::registry::refresh_obstacle_registry`].

use bevy_ecs::prelude::*;
use glam::Vec2;
use smallvec::SmallVec;

use crate::components::boxcollider::PixelBox;
use crate::components::character::{ContactNormals, PixelCharacter};
use crate::components::levelspace::LevelSpace;
use crate::components::mapposition::MapPosition;
use crate::components::tile::PixelTile;
use crate::events::contact::{ContactEvent, ContactLostEvent};
use crate::resources::input::InputState;
use crate::resources::levelcontext::LevelContext;
use crate::resources::worldtime::WorldTime;

/// Contact changes produced by one character's collision pass.
#[derive(Debug, Default)]
pub(crate) struct ContactChanges {
    /// Obstacles that contributed normal bits they were not contributing
    /// before, with the newly added bits.
    pub gained: SmallVec<[(Entity, ContactNormals); 4]>,
    /// Obstacles that fully separated this tick.
    pub lost: SmallVec<[Entity; 4]>,
}

/// Compute this tick's velocity from input and the jump arc.
///
/// Grounded movement follows live input, with the discrete keys taking
/// priority over the analog axis. A jump press while grounded latches the
/// jump and locks the horizontal velocity; airborne movement keeps that
/// locked value until a GROUND resolution. Leaving the ground without a jump
/// enters the descending half of the arc.
pub(crate) fn compute_velocity(character: &mut PixelCharacter, input: &InputState, dt: f32) {
    let arc = character.jump_arc();

    if character.is_grounded() && !character.is_jumping {
        let direction = if input.keyboard_active() {
            input.keyboard_direction()
        } else {
            input.axis.smoothed().x
        };
        character.velocity.x = direction * character.tuning.run_speed;
        character.velocity.y = 0.0;

        if input.jump.just_pressed {
            character.is_jumping = true;
            character.jump_timer = 0.0;
            character.locked_velocity_x = character.velocity.x;
        }
    } else if !character.is_jumping {
        // Walked off a ledge: fall from the arc's peak.
        character.is_jumping = true;
        character.jump_timer = arc.time_to_peak;
        character.locked_velocity_x = character.velocity.x;
    }

    if character.is_jumping {
        character.velocity.x = character.locked_velocity_x;
        character.velocity.y = arc.velocity_at(character.jump_timer);
        character.jump_timer += dt;
    }
}

/// Advance the integer pixel position by the rounded velocity delta.
///
/// The nearest-integer rounding here is the single source of positional
/// quantization in the simulation.
pub(crate) fn integrate(character: &mut PixelCharacter, dt: f32) {
    character.pixel_pos_x += (character.velocity.x * dt).round() as i32;
    character.pixel_pos_y += (character.velocity.y * dt).round() as i32;
}

/// Detect and resolve collisions against every registered obstacle.
///
/// Overlap requires strict inequality on both axes, so boxes sharing an edge
/// do not collide. A penetrating obstacle is resolved along the axis of the
/// globally smallest penetration depth; equal minima resolve all matching
/// axes simultaneously. A GROUND resolution clears the jump latch. The
/// per-obstacle contact map records the bits each obstacle contributes and
/// drops them only when that obstacle stops touching.
pub(crate) fn resolve_contacts(
    character: &mut PixelCharacter,
    size_px: (i32, i32),
    obstacles: &[(Entity, PixelBox)],
) -> ContactChanges {
    let mut changes = ContactChanges::default();

    for (entity, bounds) in obstacles {
        let body = PixelBox::new(
            character.pixel_pos_x,
            character.pixel_pos_y,
            size_px.0,
            size_px.1,
        );

        if !body.overlaps(bounds) {
            if character.contact_map.remove(entity).is_some() {
                changes.lost.push(*entity);
            }
            continue;
        }

        let depth_right = body.max_x - bounds.min_x;
        let depth_left = bounds.max_x - body.min_x;
        let depth_ceiling = body.max_y - bounds.min_y;
        let depth_ground = bounds.max_y - body.min_y;
        let min_depth = depth_right
            .min(depth_left)
            .min(depth_ceiling)
            .min(depth_ground);

        let mut normals = ContactNormals::NONE;
        if depth_right == min_depth {
            character.pixel_pos_x -= min_depth;
            normals.insert(ContactNormals::RIGHT_WALL);
        }
        if depth_left == min_depth {
            character.pixel_pos_x += min_depth;
            normals.insert(ContactNormals::LEFT_WALL);
        }
        if depth_ceiling == min_depth {
            character.pixel_pos_y -= min_depth;
            normals.insert(ContactNormals::CEILING);
        }
        if depth_ground == min_depth {
            character.pixel_pos_y += min_depth;
            normals.insert(ContactNormals::GROUND);
            character.is_jumping = false;
            character.jump_timer = 0.0;
        }

        let previous = character
            .contact_map
            .get(entity)
            .copied()
            .unwrap_or(ContactNormals::NONE);
        let new_bits = previous.added_by(normals);
        if !new_bits.is_empty() {
            changes.gained.push((*entity, new_bits));
        }
        character.contact_map.insert(*entity, previous.union(normals));
    }

    character.rebuild_contact_normals();
    changes
}

/// Per-tick character update: velocity, integration, collision, write-back.
pub fn update_characters(
    mut commands: Commands,
    context: Res<LevelContext>,
    input: Res<InputState>,
    time: Res<WorldTime>,
    levels: Query<&LevelSpace>,
    tiles: Query<&PixelTile, Without<PixelCharacter>>,
    mut characters: Query<(Entity, &mut PixelCharacter, &PixelTile, &mut MapPosition)>,
) {
    let Ok(level) = levels.single() else {
        return;
    };

    let obstacles: Vec<(Entity, PixelBox)> = context
        .obstacles
        .iter()
        .filter_map(|&entity| {
            tiles
                .get(entity)
                .ok()
                .map(|tile| (entity, PixelBox::from_tile(tile, level)))
        })
        .collect();

    let ppu = level.pixels_per_unit as f32;
    for (entity, mut character, tile, mut position) in characters.iter_mut() {
        compute_velocity(&mut character, &input, time.delta);
        integrate(&mut character, time.delta);

        let changes = resolve_contacts(&mut character, tile.pixel_size(level.pixels_per_unit), &obstacles);

        position.pos = Vec2::new(
            character.pixel_pos_x as f32 / ppu + tile.tile_size_x as f32 * 0.5,
            character.pixel_pos_y as f32 / ppu + tile.tile_size_y as f32 * 0.5,
        );

        for (obstacle, normals) in changes.gained {
            commands.trigger(ContactEvent {
                character: entity,
                obstacle,
                normals,
            });
        }
        for obstacle in changes.lost {
            commands.trigger(ContactLostEvent {
                character: entity,
                obstacle,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::character::CharacterTuning;
    use bevy_ecs::world::World;

    fn character_at(x: i32, y: i32) -> PixelCharacter {
        PixelCharacter::new(x, y, CharacterTuning::default())
    }

    fn obstacle(world: &mut World, min_x: i32, min_y: i32, w: i32, h: i32) -> (Entity, PixelBox) {
        (world.spawn_empty().id(), PixelBox::new(min_x, min_y, w, h))
    }

    // ==================== VELOCITY TESTS ====================

    #[test]
    fn test_grounded_velocity_follows_keyboard() {
        let mut character = character_at(0, 0);
        character.contact_normals.insert(ContactNormals::GROUND);

        let mut input = InputState::default();
        input.move_right.update(true);
        compute_velocity(&mut character, &input, 1.0 / 120.0);
        assert_eq!(character.velocity.x, character.tuning.run_speed);
        assert_eq!(character.velocity.y, 0.0);
    }

    #[test]
    fn test_keyboard_takes_priority_over_axis() {
        let mut character = character_at(0, 0);
        character.contact_normals.insert(ContactNormals::GROUND);

        let mut input = InputState::default();
        input.axis.x = 1.0;
        input.move_left.update(true);
        compute_velocity(&mut character, &input, 1.0 / 120.0);
        assert_eq!(character.velocity.x, -character.tuning.run_speed);
    }

    #[test]
    fn test_axis_drives_movement_without_keyboard() {
        let mut character = character_at(0, 0);
        character.contact_normals.insert(ContactNormals::GROUND);

        let mut input = InputState::default();
        input.axis.x = 1.0;
        compute_velocity(&mut character, &input, 1.0 / 120.0);
        assert!((character.velocity.x - character.tuning.run_speed).abs() < 1e-4);
    }

    #[test]
    fn test_jump_press_latches_and_uses_initial_velocity() {
        let mut character = character_at(0, 0);
        character.contact_normals.insert(ContactNormals::GROUND);
        let arc = character.jump_arc();

        let mut input = InputState::default();
        input.move_right.update(true);
        input.jump.update(true);
        compute_velocity(&mut character, &input, 1.0 / 120.0);

        assert!(character.is_jumping);
        assert_eq!(character.locked_velocity_x, character.tuning.run_speed);
        assert!((character.velocity.y - arc.initial_velocity).abs() < 1e-4);
    }

    #[test]
    fn test_airborne_horizontal_velocity_is_locked() {
        let mut character = character_at(0, 0);
        character.contact_normals.insert(ContactNormals::GROUND);

        let mut input = InputState::default();
        input.move_right.update(true);
        input.jump.update(true);
        compute_velocity(&mut character, &input, 1.0 / 120.0);

        // Reverse the held direction mid-air: ignored.
        input.jump.update(false);
        input.move_right.update(false);
        input.move_left.update(true);
        compute_velocity(&mut character, &input, 1.0 / 120.0);
        assert_eq!(character.velocity.x, character.tuning.run_speed);
    }

    #[test]
    fn test_leaving_ground_without_jump_starts_falling() {
        let mut character = character_at(0, 0);
        let arc = character.jump_arc();
        let input = InputState::default();

        compute_velocity(&mut character, &input, 1.0 / 120.0);
        assert!(character.is_jumping);
        // Falling starts at the arc peak where vertical velocity is zero.
        assert!(character.velocity.y.abs() < 1e-3);
        assert!((character.jump_timer - arc.time_to_peak).abs() < 0.02);
    }

    // ==================== INTEGRATION TESTS ====================

    #[test]
    fn test_integration_rounds_to_nearest_pixel() {
        let mut character = character_at(10, 10);
        character.velocity = Vec2::new(100.0, -100.0);
        integrate(&mut character, 0.025);
        // 2.5 px rounds away from zero.
        assert_eq!(character.pixel_pos_x, 13);
        assert_eq!(character.pixel_pos_y, 7);
    }

    #[test]
    fn test_integration_drops_subpixel_motion() {
        let mut character = character_at(0, 0);
        character.velocity = Vec2::new(10.0, 0.0);
        integrate(&mut character, 0.01);
        assert_eq!(character.pixel_pos_x, 0);
    }

    // ==================== COLLISION TESTS ====================

    #[test]
    fn test_edge_touch_is_not_a_collision() {
        let mut world = World::new();
        // Obstacle directly above a 1x1 character: bounds [0,1]x[1,2].
        let wall = obstacle(&mut world, 0, 1, 1, 1);
        let mut character = character_at(0, 0);

        let changes = resolve_contacts(&mut character, (1, 1), &[wall]);
        assert!(changes.gained.is_empty());
        assert_eq!((character.pixel_pos_x, character.pixel_pos_y), (0, 0));
        assert!(character.contact_normals.is_empty());
    }

    #[test]
    fn test_ground_resolution_is_penetration_minimal() {
        let mut world = World::new();
        // 8x8 character sunk 2 px into an 8-px-tall floor below it.
        let floor = obstacle(&mut world, 0, -8, 32, 8);
        let mut character = character_at(4, -2);
        character.is_jumping = true;

        let changes = resolve_contacts(&mut character, (8, 8), &[floor]);
        assert_eq!((character.pixel_pos_x, character.pixel_pos_y), (4, 0));
        assert!(character.is_grounded());
        assert!(!character.is_jumping);
        assert_eq!(changes.gained.len(), 1);
        assert_eq!(changes.gained[0].1, ContactNormals::GROUND);
        // Edge-touching after resolution.
        assert!(!PixelBox::new(4, 0, 8, 8).overlaps(&floor.1));
    }

    #[test]
    fn test_smallest_axis_wins_when_depths_differ() {
        let mut world = World::new();
        // Character overlaps a wall on its right: 3 px deep in x, 6 px in y.
        let wall = obstacle(&mut world, 5, 0, 8, 8);
        let mut character = character_at(0, 2);

        resolve_contacts(&mut character, (8, 8), &[wall]);
        assert_eq!(character.pixel_pos_x, -3);
        assert_eq!(character.pixel_pos_y, 2);
        assert!(character.contact_normals.contains(ContactNormals::RIGHT_WALL));
        assert!(!character.contact_normals.contains(ContactNormals::GROUND));
    }

    #[test]
    fn test_equal_minima_resolve_both_axes() {
        let mut world = World::new();
        // Perfect corner overlap: 2 px deep on both axes.
        let block = obstacle(&mut world, 6, 6, 8, 8);
        let mut character = character_at(0, 0);

        resolve_contacts(&mut character, (8, 8), &[block]);
        assert_eq!((character.pixel_pos_x, character.pixel_pos_y), (-2, -2));
        assert!(character.contact_normals.contains(ContactNormals::RIGHT_WALL));
        assert!(character.contact_normals.contains(ContactNormals::CEILING));
    }

    #[test]
    fn test_exit_removes_only_that_obstacle_contribution() {
        let mut world = World::new();
        let floor = obstacle(&mut world, 0, -8, 8, 8);
        let wall = obstacle(&mut world, 7, 0, 8, 8);

        // Sunk 1 px into the floor and 1 px into the right wall.
        let mut character = character_at(0, -1);
        resolve_contacts(&mut character, (8, 8), &[floor, wall]);
        assert!(character.contact_normals.contains(ContactNormals::GROUND));
        assert!(character.contact_normals.contains(ContactNormals::RIGHT_WALL));

        // Step left: the wall separates, the floor contact re-forms alone.
        character.pixel_pos_x = -4;
        character.pixel_pos_y = -1;
        let changes = resolve_contacts(&mut character, (8, 8), &[floor, wall]);
        assert!(changes.lost.contains(&wall.0));
        assert!(character.contact_normals.contains(ContactNormals::GROUND));
        assert!(!character.contact_normals.contains(ContactNormals::RIGHT_WALL));
    }

    #[test]
    fn test_repeat_contact_emits_no_duplicate_event() {
        let mut world = World::new();
        let floor = obstacle(&mut world, 0, -8, 8, 8);
        let mut character = character_at(0, -1);

        let first = resolve_contacts(&mut character, (8, 8), &[floor]);
        assert_eq!(first.gained.len(), 1);

        // Sink again next tick while the map still records the contact.
        character.pixel_pos_y = -1;
        let second = resolve_contacts(&mut character, (8, 8), &[floor]);
        assert!(second.gained.is_empty());
    }
}
