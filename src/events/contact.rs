//! Contact events emitted by the character collision pass.
//!
//! A [`ContactEvent`] fires when an obstacle contributes normal bits it was
//! not contributing before; a [`ContactLostEvent`] fires when a previously
//! touching obstacle fully separates. Observers can subscribe to react in a
//! decoupled manner (sound, effects, game rules).

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::components::character::ContactNormals;

/// A character gained contact with an obstacle on the given sides.
#[derive(Event, Debug, Clone, Copy)]
pub struct ContactEvent {
    pub character: Entity,
    pub obstacle: Entity,
    /// Normal bits newly contributed by this obstacle.
    pub normals: ContactNormals,
}

/// A previously touching obstacle stopped touching the character.
#[derive(Event, Debug, Clone, Copy)]
pub struct ContactLostEvent {
    pub character: Entity,
    pub obstacle: Entity,
}

/// Global observer that logs contact changes at debug level.
pub fn observe_contact(trigger: On<ContactEvent>) {
    let event = trigger.event();
    log::debug!(
        "Contact: {:?} touched {:?} on {:?}",
        event.character,
        event.obstacle,
        event.normals
    );
}

/// Global observer that logs contact loss at debug level.
pub fn observe_contact_lost(trigger: On<ContactLostEvent>) {
    let event = trigger.event();
    log::debug!(
        "Contact lost: {:?} separated from {:?}",
        event.character,
        event.obstacle
    );
}
