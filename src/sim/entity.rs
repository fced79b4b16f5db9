//! Capabilities shared by every actor on the field

use glam::Vec2;

use super::clip::Frame;
use super::geometry::Aabb;
use super::health::Health;

/// Anything that is placed and drawn: player, weapon overlay, enemy
pub trait Entity {
    /// Authoritative top-left position
    fn position(&self) -> Vec2;

    /// Hitbox derived from the position
    fn hitbox(&self) -> Aabb;

    /// Frame to draw this tick
    fn sprite(&self) -> Option<&Frame>;

    /// Where to draw [`Entity::sprite`]; differs from `position` for offset effects
    fn sprite_origin(&self) -> Vec2 {
        self.position()
    }
}

/// The subset of an entity that combat reads and writes
pub trait Combatant: Entity {
    /// `None` for entities that cannot be hurt (the weapon overlay, dying enemies)
    fn health(&self) -> Option<&Health>;

    fn health_mut(&mut self) -> Option<&mut Health>;

    /// Called once, when a hit empties this combatant's health
    fn on_defeated(&mut self) {}
}
