//! Melee hit resolution
//!
//! One swing hits at most one target: the first live member of the group,
//! in group order, whose hitbox overlaps the attacker's.

use super::entity::Combatant;

/// Result of one resolution attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// Nothing took damage
    Miss,
    /// Target at `index` lost one hit point and survived
    Hit { index: usize },
    /// Target at `index` was emptied and started dying
    Kill { index: usize },
}

impl AttackOutcome {
    #[inline]
    pub fn is_kill(&self) -> bool {
        matches!(self, AttackOutcome::Kill { .. })
    }
}

/// Resolve a single swing from `attacker` against `targets`.
///
/// Attackers without health (the weapon overlay) never deal damage. Targets
/// without health (already dying) are skipped.
pub fn resolve_attack<A, T>(attacker: &A, targets: &mut [T]) -> AttackOutcome
where
    A: Combatant + ?Sized,
    T: Combatant,
{
    if attacker.health().is_none() {
        log::warn!("Attack from an entity without health ignored");
        return AttackOutcome::Miss;
    }

    let reach = attacker.hitbox();
    let Some((index, target)) = targets
        .iter_mut()
        .enumerate()
        .find(|(_, t)| t.health().is_some() && t.hitbox().overlaps(&reach))
    else {
        return AttackOutcome::Miss;
    };

    let Some(health) = target.health_mut() else {
        return AttackOutcome::Miss;
    };
    health.apply_damage(1);
    if health.is_depleted() {
        target.on_defeated();
        AttackOutcome::Kill { index }
    } else {
        AttackOutcome::Hit { index }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::consts::ENEMY_MAX_HP;
    use crate::sim::avatar::Avatar;
    use crate::sim::enemy::{Archetype, Enemy};
    use crate::sim::entity::Entity;
    use glam::Vec2;
    use proptest::prelude::*;

    fn enemy_at(id: u32, pos: Vec2) -> Enemy {
        Enemy::new(id, Archetype::Eyeball, pos, 0, &GameConfig::default()).unwrap()
    }

    fn hp(enemy: &Enemy) -> Option<u32> {
        enemy.health().map(|h| h.current())
    }

    #[test]
    fn test_hits_only_overlapping_target() {
        let cfg = GameConfig::default();
        let player = Avatar::player(&cfg).unwrap();
        let mut enemies = vec![
            enemy_at(1, Vec2::new(0.0, 0.0)),
            enemy_at(2, player.position() + Vec2::new(10.0, 10.0)),
            enemy_at(3, Vec2::new(500.0, 300.0)),
        ];
        let outcome = resolve_attack(&player, &mut enemies);
        assert_eq!(outcome, AttackOutcome::Hit { index: 1 });
        assert_eq!(hp(&enemies[0]), Some(ENEMY_MAX_HP));
        assert_eq!(hp(&enemies[1]), Some(ENEMY_MAX_HP - 1));
        assert_eq!(hp(&enemies[2]), Some(ENEMY_MAX_HP));
    }

    #[test]
    fn test_single_target_per_swing() {
        let cfg = GameConfig::default();
        let player = Avatar::player(&cfg).unwrap();
        let mut enemies = vec![
            enemy_at(1, player.position()),
            enemy_at(2, player.position() + Vec2::new(5.0, 0.0)),
        ];
        assert_eq!(resolve_attack(&player, &mut enemies), AttackOutcome::Hit { index: 0 });
        assert_eq!(hp(&enemies[1]), Some(ENEMY_MAX_HP));
    }

    #[test]
    fn test_third_hit_kills() {
        let cfg = GameConfig::default();
        let player = Avatar::player(&cfg).unwrap();
        let mut enemies = vec![enemy_at(1, player.position())];
        assert!(!resolve_attack(&player, &mut enemies).is_kill());
        assert!(!resolve_attack(&player, &mut enemies).is_kill());
        assert_eq!(resolve_attack(&player, &mut enemies), AttackOutcome::Kill { index: 0 });
        assert!(enemies[0].is_exploding());
        // dying enemies are not targets
        assert_eq!(resolve_attack(&player, &mut enemies), AttackOutcome::Miss);
    }

    #[test]
    fn test_skips_dying_target_for_next_live_one() {
        let cfg = GameConfig::default();
        let player = Avatar::player(&cfg).unwrap();
        let mut enemies = vec![enemy_at(1, player.position()), enemy_at(2, player.position())];
        enemies[0].explode();
        assert_eq!(resolve_attack(&player, &mut enemies), AttackOutcome::Hit { index: 1 });
    }

    #[test]
    fn test_healthless_attacker_is_noop() {
        let cfg = GameConfig::default();
        let weapon = Avatar::weapon(&cfg).unwrap();
        let mut enemies = vec![enemy_at(1, weapon.position())];
        assert_eq!(resolve_attack(&weapon, &mut enemies), AttackOutcome::Miss);
        assert_eq!(hp(&enemies[0]), Some(ENEMY_MAX_HP));
    }

    proptest! {
        #[test]
        fn prop_at_most_one_target_damaged(offsets in proptest::collection::vec((-150.0f32..150.0, -150.0f32..150.0), 1..8)) {
            let cfg = GameConfig::default();
            let player = Avatar::player(&cfg).unwrap();
            let mut enemies: Vec<Enemy> = offsets
                .iter()
                .enumerate()
                .map(|(i, (dx, dy))| enemy_at(i as u32, player.position() + Vec2::new(*dx, *dy)))
                .collect();
            resolve_attack(&player, &mut enemies);
            let damaged = enemies.iter().filter(|e| hp(e) != Some(ENEMY_MAX_HP)).count();
            prop_assert!(damaged <= 1);
        }
    }
}
