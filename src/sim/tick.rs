//! Fixed timestep simulation tick
//!
//! Core game loop that advances a round deterministically. Order within a
//! tick is fixed:
//! 1. buffered attack is resolved
//! 2. the countdown advances (once per second of ticks)
//! 3. movement and the player/weapon animation
//! 4. every enemy, which may bite the player
//! 5. end conditions: player death beats victory when both land together

use super::combat::resolve_attack;
use super::enemy::EnemyTick;
use super::entity::Entity;
use super::geometry::Direction;
use super::round::{Round, RoundState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement direction
    pub direction: Option<Direction>,
    /// Attack pressed this tick
    pub attack: bool,
    /// Leave the round
    pub quit: bool,
    /// Autopilot - steer toward the nearest enemy and swing on contact
    pub autopilot: bool,
}

/// Advance the round by one fixed tick
pub fn tick(round: &mut Round, input: &TickInput) {
    if input.quit {
        round.abandon();
        return;
    }
    if round.abandoned || round.state.is_terminal() {
        return;
    }

    let input = if input.autopilot {
        autopilot(round)
    } else {
        input.clone()
    };

    round.time_ticks += 1;

    if input.attack {
        trigger_attack(round);
    }

    round.second_ticks += 1;
    if round.second_ticks >= round.config.round_ticks_per_second() {
        round.second_ticks = 0;
        round.seconds_remaining = round.seconds_remaining.saturating_sub(1);
        if round.seconds_remaining == 0 {
            round.finish(RoundState::GameOver);
            return;
        }
    }

    if let Some(dir) = input.direction {
        move_player(round, dir);
    }
    round.player.advance();
    round.weapon.advance();

    let mut bites = 0;
    let mut finished = Vec::new();
    for (i, enemy) in round.enemies.iter_mut().enumerate() {
        match enemy.tick(&mut round.player) {
            EnemyTick::StruckPlayer => bites += 1,
            EnemyTick::Finished => finished.push(i),
            EnemyTick::Idle => {}
        }
    }
    if bites > 0 {
        log::debug!("Player bitten {} time(s), {} hp left", bites, round.player_hp());
    }
    for i in finished.into_iter().rev() {
        let enemy = round.enemies.remove(i);
        log::debug!("Enemy {} removed", enemy.id);
    }

    if round.player_depleted() {
        round.finish(RoundState::GameOver);
    } else if round.enemies.is_empty() {
        round.finish(RoundState::Victory);
    }
}

/// Start a swing on both halves of the avatar and resolve it once
fn trigger_attack(round: &mut Round) {
    if !round.player.begin_attack() {
        return;
    }
    let weapon_started = round.weapon.begin_attack();
    if !weapon_started {
        log::warn!("Weapon was still mid-swing when the body started a new one");
    }
    debug_assert!(weapon_started, "weapon swing out of step with the body");

    let outcome = resolve_attack(&round.player, &mut round.enemies);
    if outcome.is_kill() {
        round.kills += 1;
        log::info!("Kill #{}", round.kills);
    }
}

fn can_step(round: &Round, dir: Direction) -> bool {
    round.config.play_field.permits(
        round.player.position(),
        dir,
        round.player.hitbox().size,
        round.config.screen(),
    )
}

fn move_player(round: &mut Round, dir: Direction) {
    if !can_step(round, dir) {
        return;
    }
    let delta = dir.unit() * round.config.player_step;
    for avatar in [&mut round.player, &mut round.weapon] {
        avatar.translate(delta);
        avatar.step_animation(dir);
    }
}

/// Chase the nearest live enemy along its longer axis (the other one when a
/// wall is in the way); swing once touching
fn autopilot(round: &Round) -> TickInput {
    let me = round.player.hitbox();
    let here = round.player_center();
    let Some(target) = round.live_enemies().min_by(|a, b| {
        let da = a.hitbox().center().distance_squared(here);
        let db = b.hitbox().center().distance_squared(here);
        da.total_cmp(&db)
    }) else {
        return TickInput::default();
    };

    if target.hitbox().overlaps(&me) {
        return TickInput {
            attack: !round.player.is_attacking(),
            ..Default::default()
        };
    }

    let delta = target.hitbox().center() - here;
    let across = if delta.x < 0.0 { Direction::Left } else { Direction::Right };
    let down = if delta.y < 0.0 { Direction::Up } else { Direction::Down };
    let (first, second) = if delta.x.abs() >= delta.y.abs() {
        (across, down)
    } else {
        (down, across)
    };
    let direction = if can_step(round, first) { first } else { second };
    TickInput {
        direction: Some(direction),
        ..Default::default()
    }
}
