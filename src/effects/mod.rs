//! Effect system for card abilities.
//!
//! - `CardEffect`: closed set of effects printed on cards
//! - `ActiveEffect`: statuses attached to players (freeze, shield, buffs...)
//! - `GlobalEffect`: level-wide modifiers such as miss tables
//! - `EffectEngine`: applies a card to a match state
//!
//! Each `CardEffect` variant has its own arm in the engine; there is no
//! dispatch on effect names.

mod effect;
mod resolver;

pub use effect::{
    misses_on, ActiveEffect, CardEffect, EffectKind, GlobalEffect, Lifetime, Pulse,
};
pub use resolver::EffectEngine;
pub(crate) use resolver::Modifiers;
