//! Round state: everything one play session owns
//!
//! A round is rebuilt from scratch on restart. Nothing carries over except
//! the RNG stream, so consecutive waves differ but stay reproducible.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::enemy::{Archetype, Enemy};
use super::entity::{Combatant, Entity};
use super::spawn::spawn_wave;
use crate::config::GameConfig;
use crate::error::SetupError;
use crate::renderer::Surface;

/// Where the round stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    Playing,
    /// Timer ran out or the player died
    GameOver,
    /// Every enemy was destroyed first
    Victory,
}

impl RoundState {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoundState::Playing)
    }

    /// Banner text shown once the round has ended
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            RoundState::Playing => None,
            RoundState::GameOver => Some("GAME OVER"),
            RoundState::Victory => Some("VICTORY"),
        }
    }
}

/// What the HUD shows this frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub timer_text: String,
    pub seconds_remaining: u32,
    pub kills: u32,
    pub player_hp: u32,
    pub player_max_hp: u32,
    pub banner: Option<String>,
}

/// End-of-round record printed by the driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub archetype: Archetype,
    /// Seed of the whole session; `round` says how far into its stream this was
    pub seed: u64,
    /// Rounds played before this one with the same stream
    pub round: u32,
    pub outcome: RoundState,
    pub kills: u32,
    pub seconds_remaining: u32,
    pub ticks: u64,
    pub player_hp: u32,
}

#[derive(Debug)]
pub struct Round {
    pub config: GameConfig,
    pub archetype: Archetype,
    /// Seed the session's RNG stream was created from
    pub seed: u64,
    /// Restarts since the stream was seeded; 0 for the first round
    pub(super) round_index: u32,
    pub(super) state: RoundState,
    pub(super) seconds_remaining: u32,
    /// Ticks into the current second
    pub(super) second_ticks: u32,
    pub(super) kills: u32,
    pub(super) time_ticks: u64,
    /// Live and exploding enemies, in spawn order
    pub(super) enemies: Vec<Enemy>,
    pub(super) player: Avatar,
    pub(super) weapon: Avatar,
    pub(super) abandoned: bool,
    rng: Pcg32,
}

impl Round {
    /// Fresh round with a wave of `archetype` enemies
    pub fn new(config: GameConfig, archetype: Archetype, seed: u64) -> Result<Self, SetupError> {
        Self::with_rng(config, archetype, seed, 0, Pcg32::seed_from_u64(seed))
    }

    fn with_rng(
        config: GameConfig,
        archetype: Archetype,
        seed: u64,
        round_index: u32,
        mut rng: Pcg32,
    ) -> Result<Self, SetupError> {
        let enemies = spawn_wave(
            archetype,
            config.enemy_count,
            config.grid_size(),
            config.player_start_cell(),
            &config,
            &mut rng,
        )?;
        let player = Avatar::player(&config)?;
        let weapon = Avatar::weapon(&config)?;
        log::info!(
            "Round {} started: {} x{}, {}s on the clock (seed {})",
            round_index,
            archetype,
            enemies.len(),
            config.round_seconds,
            seed
        );
        Ok(Self {
            seconds_remaining: config.round_seconds,
            config,
            archetype,
            seed,
            round_index,
            state: RoundState::Playing,
            second_ticks: 0,
            kills: 0,
            time_ticks: 0,
            enemies,
            player,
            weapon,
            abandoned: false,
            rng,
        })
    }

    /// Throw the current round away and start over with a new wave.
    ///
    /// On failure the current round is left untouched.
    pub fn restart(&mut self, archetype: Archetype) -> Result<(), SetupError> {
        let fresh = Self::with_rng(
            self.config.clone(),
            archetype,
            self.seed,
            self.round_index + 1,
            self.rng.clone(),
        )?;
        *self = fresh;
        log::info!("Round restarted");
        Ok(())
    }

    /// Stop the round for good: clock frozen and nothing left to draw.
    ///
    /// Enemies are dropped. The player pair is kept only so the summary can
    /// still report its health.
    pub fn abandon(&mut self) {
        if self.abandoned {
            return;
        }
        self.abandoned = true;
        self.enemies.clear();
        log::info!("Round abandoned after {} ticks", self.time_ticks);
    }

    #[inline]
    pub fn state(&self) -> RoundState {
        self.state
    }

    #[inline]
    pub fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    #[inline]
    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    #[inline]
    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    #[inline]
    pub fn kills(&self) -> u32 {
        self.kills
    }

    #[inline]
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn player(&self) -> &Avatar {
        &self.player
    }

    pub fn weapon(&self) -> &Avatar {
        &self.weapon
    }

    /// Enemies that can still be hit
    pub fn live_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.health().is_some())
    }

    pub fn player_hp(&self) -> u32 {
        self.player.health().map_or(0, |h| h.current())
    }

    pub(super) fn player_depleted(&self) -> bool {
        self.player.health().is_none_or(|h| h.is_depleted())
    }

    /// Move to a terminal state; ignored once the round has ended
    pub(super) fn finish(&mut self, outcome: RoundState) {
        if self.state.is_terminal() || !outcome.is_terminal() {
            return;
        }
        self.state = outcome;
        log::info!(
            "Round over: {:?} with {} kills, {}s left",
            outcome,
            self.kills,
            self.seconds_remaining
        );
    }

    /// Draw order: enemies, then the body, then the weapon over it.
    /// Empty once the round is abandoned.
    pub fn entities(&self) -> impl Iterator<Item = &dyn Entity> {
        let avatars = [&self.player as &dyn Entity, &self.weapon as &dyn Entity];
        self.enemies
            .iter()
            .map(|e| e as &dyn Entity)
            .chain(avatars.into_iter().filter(move |_| !self.abandoned))
    }

    /// Health bars: the player's HUD bar plus one per live enemy
    pub fn render_health(&self, surface: &mut impl Surface) {
        if self.abandoned {
            return;
        }
        if let Some(health) = self.player.health() {
            health.render(surface);
        }
        for health in self.enemies.iter().filter_map(|e| e.health()) {
            health.render(surface);
        }
    }

    pub fn hud(&self) -> HudSnapshot {
        let banner = self.state.banner();
        HudSnapshot {
            timer_text: match banner {
                Some(text) => format!(" {text}"),
                None => format!(" {}", self.seconds_remaining),
            },
            seconds_remaining: self.seconds_remaining,
            kills: self.kills,
            player_hp: self.player_hp(),
            player_max_hp: self.player.health().map_or(0, |h| h.max()),
            banner: banner.map(str::to_string),
        }
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            archetype: self.archetype,
            seed: self.seed,
            round: self.round_index,
            outcome: self.state,
            kills: self.kills,
            seconds_remaining: self.seconds_remaining,
            ticks: self.time_ticks,
            player_hp: self.player_hp(),
        }
    }

    /// Centre of the player's hitbox, for steering
    pub fn player_center(&self) -> Vec2 {
        self.player.hitbox().center()
    }
}
