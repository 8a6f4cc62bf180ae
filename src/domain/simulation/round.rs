use std::collections::HashMap;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info};

use super::config::RoundConfig;
use super::scheduler::{Scheduler, TimerEvent, TimerHandle, TimerQueue};

pub type HoleId = usize;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum HoleState {
    #[default]
    Empty,
    Active,
    Hit,
}

/// How far the mole pokes out. Purely visual.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HeightTier {
    Low,
    Mid,
    High,
}

impl HeightTier {
    pub const ALL: [HeightTier; 3] = [HeightTier::Low, HeightTier::Mid, HeightTier::High];
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Hole {
    pub state: HoleState,
    pub tier: Option<HeightTier>,
}

impl Hole {
    fn reset(&mut self) {
        *self = Hole::default();
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EndReason {
    Manual,
    GameOver,
    Clear,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::Manual => "manual",
            EndReason::GameOver => "gameover",
            EndReason::Clear => "clear",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RoundOutcome {
    pub reason: EndReason,
    pub score: u32,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RoundSnapshot {
    pub score: u32,
    pub lives: u32,
    pub target_score: u32,
    pub is_active: bool,
    pub holes: Vec<Hole>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RoundNotice {
    Changed(RoundSnapshot),
    Ended(RoundOutcome),
}

/// Uniform integer source. `pick(n)` returns a value in `0..n`, `n > 0`.
pub trait RandomSource {
    fn pick(&mut self, upper: usize) -> usize;
}

impl RandomSource for StdRng {
    fn pick(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }
}

/// State machine for one game session: `Idle -> Active -> Terminal`, and back
/// to `Active` only through [`RoundController::start`].
///
/// The controller never waits on anything. Timers are requested from the
/// scheduler and come back through [`RoundController::fire`]; every
/// observable change is queued as a [`RoundNotice`] for the host to drain.
pub struct RoundController<S, R> {
    config: RoundConfig,
    scheduler: S,
    random: R,
    holes: Vec<Hole>,
    expiry_timers: HashMap<HoleId, TimerHandle>,
    spawn_tick: Option<TimerHandle>,
    score: u32,
    lives: u32,
    is_active: bool,
    last_outcome: Option<RoundOutcome>,
    notices: Vec<RoundNotice>,
}

impl<S: Scheduler, R: RandomSource> RoundController<S, R> {
    pub fn new(config: RoundConfig, scheduler: S, random: R) -> Self {
        Self {
            holes: vec![Hole::default(); config.hole_count],
            lives: config.starting_lives,
            config,
            scheduler,
            random,
            expiry_timers: HashMap::new(),
            spawn_tick: None,
            score: 0,
            is_active: false,
            last_outcome: None,
            notices: Vec::new(),
        }
    }

    pub fn start(&mut self) {
        self.cancel_timers();
        self.holes.iter_mut().for_each(Hole::reset);
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.is_active = true;
        self.last_outcome = None;
        self.spawn_tick = Some(
            self.scheduler
                .schedule_repeating(TimerEvent::SpawnTick, self.config.spawn_interval),
        );
        info!(
            lives = self.lives,
            target = self.config.target_score,
            "round started"
        );
        self.notify_changed();
    }

    /// Ends the round. Does nothing when no round is running.
    pub fn stop(&mut self, reason: EndReason) {
        if !self.is_active {
            return;
        }
        self.is_active = false;
        self.cancel_timers();
        self.holes.iter_mut().for_each(Hole::reset);

        let outcome = RoundOutcome {
            reason,
            score: self.score,
        };
        self.last_outcome = Some(outcome);
        info!(reason = reason.as_str(), score = self.score, "round ended");
        self.notify_changed();
        self.notices.push(RoundNotice::Ended(outcome));
    }

    /// Pops a mole out of a random empty hole. A full board is not an error,
    /// the tick is simply skipped.
    pub fn spawn(&mut self) {
        if !self.is_active {
            return;
        }
        let available: Vec<HoleId> = self
            .holes
            .iter()
            .enumerate()
            .filter(|(_, h)| h.state == HoleState::Empty)
            .map(|(id, _)| id)
            .collect();
        if available.is_empty() {
            return;
        }

        let id = available[self.random.pick(available.len())];
        let tier = HeightTier::ALL[self.random.pick(HeightTier::ALL.len())];
        self.holes[id] = Hole {
            state: HoleState::Active,
            tier: Some(tier),
        };

        if let Some(prev) = self.expiry_timers.remove(&id) {
            self.scheduler.cancel(prev);
        }
        let handle = self
            .scheduler
            .schedule(TimerEvent::Expire(id), self.config.expiry);
        self.expiry_timers.insert(id, handle);

        debug!(hole = id, ?tier, "mole up");
        self.notify_changed();
    }

    /// Registers a whack. Returns whether it counted.
    pub fn hit(&mut self, hole: HoleId) -> bool {
        self.check_hole(hole);
        if self.holes[hole].state != HoleState::Active {
            return false;
        }
        self.holes[hole].state = HoleState::Hit;
        if let Some(handle) = self.expiry_timers.remove(&hole) {
            self.scheduler.cancel(handle);
        }
        self.score += 1;
        debug!(hole, score = self.score, "hit");

        if self.score >= self.config.target_score {
            self.stop(EndReason::Clear);
            return true;
        }

        self.scheduler
            .schedule(TimerEvent::ClearHit(hole), self.config.hit_display);
        self.notify_changed();
        true
    }

    /// The mole in `hole` was not hit in time.
    pub fn expire(&mut self, hole: HoleId) {
        self.check_hole(hole);
        if self.holes[hole].state != HoleState::Active {
            return;
        }
        self.expiry_timers.remove(&hole);
        self.lives = self.lives.saturating_sub(1);
        debug!(hole, lives = self.lives, "missed");

        if self.lives == 0 {
            self.stop(EndReason::GameOver);
            return;
        }
        self.holes[hole].reset();
        self.notify_changed();
    }

    /// Runs whether or not a round is active, but only touches a hole that
    /// is still showing a hit, so a new round's mole in the same hole stays.
    fn clear_hit(&mut self, hole: HoleId) {
        self.check_hole(hole);
        if self.holes[hole].state != HoleState::Hit {
            return;
        }
        self.holes[hole].reset();
        self.notify_changed();
    }

    pub fn fire(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::SpawnTick => self.spawn(),
            TimerEvent::Expire(hole) => self.expire(hole),
            TimerEvent::ClearHit(hole) => self.clear_hit(hole),
        }
    }

    pub fn drain_notices(&mut self) -> Vec<RoundNotice> {
        std::mem::take(&mut self.notices)
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            score: self.score,
            lives: self.lives,
            target_score: self.config.target_score,
            is_active: self.is_active,
            holes: self.holes.clone(),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    pub fn hole_state(&self, hole: HoleId) -> HoleState {
        self.check_hole(hole);
        self.holes[hole].state
    }

    pub fn last_outcome(&self) -> Option<RoundOutcome> {
        self.last_outcome
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Swaps the random source, e.g. to reseed for a reproducible session.
    pub fn replace_random(&mut self, random: R) -> R {
        std::mem::replace(&mut self.random, random)
    }

    fn cancel_timers(&mut self) {
        if let Some(tick) = self.spawn_tick.take() {
            self.scheduler.cancel(tick);
        }
        for (_, handle) in self.expiry_timers.drain() {
            self.scheduler.cancel(handle);
        }
    }

    fn check_hole(&self, hole: HoleId) {
        assert!(
            hole < self.holes.len(),
            "hole {hole} out of range 0..{}",
            self.holes.len()
        );
    }

    fn notify_changed(&mut self) {
        let snapshot = self.snapshot();
        self.notices.push(RoundNotice::Changed(snapshot));
    }
}

impl<R: RandomSource> RoundController<TimerQueue, R> {
    /// Moves the virtual clock forward by `elapsed`, firing every timer that
    /// comes due on the way in deadline order.
    pub fn advance(&mut self, elapsed: Duration) {
        let target = self.scheduler.now() + elapsed;
        while let Some(event) = self.scheduler.pop_due(target) {
            self.fire(event);
        }
        self.scheduler.advance_to(target);
    }
}
