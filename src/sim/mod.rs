//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies beyond the `Surface` seam

pub mod avatar;
pub mod clip;
pub mod combat;
pub mod enemy;
pub mod entity;
pub mod geometry;
pub mod health;
pub mod round;
pub mod spawn;
pub mod tick;

pub use avatar::{Avatar, AvatarKind, AvatarState, WEAPON_OFFSET};
pub use clip::{AnimationClipSet, ClipKey, ClipSetBuilder, Frame, SheetId, SheetLayout, slice};
pub use combat::{AttackOutcome, resolve_attack};
pub use enemy::{Archetype, Enemy, EnemyState, EnemyTick};
pub use entity::{Combatant, Entity};
pub use geometry::{Aabb, Direction};
pub use health::Health;
pub use round::{HudSnapshot, Round, RoundState, RoundSummary};
pub use spawn::{free_cells, spawn_wave};
pub use tick::{TickInput, tick};
