//! Authoritative round state and the bevy glue that drives it.

pub mod config;
pub mod round;
pub mod scheduler;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use config::RoundConfig;
pub use round::{
    EndReason, HeightTier, HoleId, HoleState, RoundController, RoundNotice, RoundOutcome,
    RoundSnapshot,
};
pub use scheduler::TimerQueue;

/// Seed used when the "Deterministic" toggle is on.
pub const DETERMINISTIC_SEED: u64 = 0;

#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    Ready,
    Playing,
    Finished,
}

#[derive(Event, Default)]
pub struct StartRound;

#[derive(Event, Default)]
pub struct StopRound;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleHit {
    pub hole: HoleId,
}

#[derive(Event, Debug, Clone)]
pub struct RoundChanged(pub RoundSnapshot);

#[derive(Event, Debug, Clone, Copy)]
pub struct RoundEnded(pub RoundOutcome);

/// The one game session this app hosts.
#[derive(Resource)]
pub struct RoundSession {
    pub round: RoundController<TimerQueue, StdRng>,
}

impl RoundSession {
    pub fn new(config: RoundConfig) -> Self {
        let rng = make_rng(config.seed);
        Self {
            round: RoundController::new(config, TimerQueue::new(), rng),
        }
    }

    pub fn reseed(&mut self, seed: Option<u64>) {
        self.round.replace_random(make_rng(seed));
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[derive(Resource, Default)]
pub struct SessionStats {
    pub rounds_played: u32,
    pub best_score: u32,
    pub last_outcome: Option<RoundOutcome>,
}

#[derive(Resource, Default)]
pub struct SimSettings {
    pub deterministic: bool,
    pub show_help: bool,
    pub show_diagnostics: bool,
}

pub struct SimPlugin {
    pub config: RoundConfig,
}

impl Plugin for SimPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .insert_resource(RoundSession::new(self.config.clone()))
            .init_resource::<SessionStats>()
            .init_resource::<SimSettings>()
            .add_event::<StartRound>()
            .add_event::<StopRound>()
            .add_event::<HoleHit>()
            .add_event::<RoundChanged>()
            .add_event::<RoundEnded>()
            .add_systems(
                Update,
                (
                    sync_rng,
                    handle_commands,
                    advance_round,
                    publish_notices,
                    record_stats,
                )
                    .chain(),
            );
    }
}

fn sync_rng(
    settings: Res<SimSettings>,
    mut session: ResMut<RoundSession>,
    mut applied: Local<bool>,
) {
    if settings.deterministic == *applied {
        return;
    }
    *applied = settings.deterministic;
    let seed = if settings.deterministic {
        Some(DETERMINISTIC_SEED)
    } else {
        session.round.config().seed
    };
    debug!("reseeding session rng: {:?}", seed);
    session.reseed(seed);
}

fn handle_commands(
    mut session: ResMut<RoundSession>,
    settings: Res<SimSettings>,
    mut ev_start: EventReader<StartRound>,
    mut ev_stop: EventReader<StopRound>,
    mut ev_hit: EventReader<HoleHit>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if ev_start.read().last().is_some() {
        // every deterministic round replays the same stream
        if settings.deterministic {
            session.reseed(Some(DETERMINISTIC_SEED));
        }
        session.round.start();
        next_state.set(AppState::Playing);
    }

    let hole_count = session.round.holes().len();
    for ev in ev_hit.read() {
        if ev.hole >= hole_count {
            warn!("dropping hit on unknown hole {}", ev.hole);
            continue;
        }
        if !session.round.hit(ev.hole) {
            debug!(
                "hit on hole {} ignored, it is {:?}",
                ev.hole,
                session.round.hole_state(ev.hole)
            );
        }
    }

    if ev_stop.read().last().is_some() {
        session.round.stop(EndReason::Manual);
    }
}

fn advance_round(mut session: ResMut<RoundSession>, time: Res<Time>) {
    session.round.advance(time.delta());
}

pub fn publish_notices(
    mut session: ResMut<RoundSession>,
    mut ev_changed: EventWriter<RoundChanged>,
    mut ev_ended: EventWriter<RoundEnded>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for notice in session.round.drain_notices() {
        match notice {
            RoundNotice::Changed(snapshot) => {
                ev_changed.send(RoundChanged(snapshot));
            }
            RoundNotice::Ended(outcome) => {
                next_state.set(match outcome.reason {
                    EndReason::Manual => AppState::Ready,
                    EndReason::GameOver | EndReason::Clear => AppState::Finished,
                });
                ev_ended.send(RoundEnded(outcome));
            }
        }
    }
}

fn record_stats(mut ev_ended: EventReader<RoundEnded>, mut stats: ResMut<SessionStats>) {
    for RoundEnded(outcome) in ev_ended.read() {
        stats.rounds_played += 1;
        stats.best_score = stats.best_score.max(outcome.score);
        stats.last_outcome = Some(*outcome);
    }
}

#[cfg(test)]
mod tests {
    use bevy::state::app::StatesPlugin;

    use super::*;

    fn app(config: RoundConfig) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .add_plugins(SimPlugin { config });
        app
    }

    fn state(app: &App) -> AppState {
        app.world().resource::<State<AppState>>().get().clone()
    }

    #[test]
    fn start_event_begins_round() {
        let mut app = app(RoundConfig::default());
        assert_eq!(state(&app), AppState::Ready);

        app.world_mut().send_event(StartRound);
        app.update();
        assert!(app.world().resource::<RoundSession>().round.is_active());

        app.update();
        assert_eq!(state(&app), AppState::Playing);
    }

    #[test]
    fn hit_event_reaches_round() {
        let mut app = app(RoundConfig::default());
        app.world_mut().send_event(StartRound);
        app.update();

        let hole = {
            let mut session = app.world_mut().resource_mut::<RoundSession>();
            session.round.spawn();
            let active = session
                .round
                .holes()
                .iter()
                .position(|h| h.state == HoleState::Active);
            active.unwrap()
        };
        app.world_mut().send_event(HoleHit { hole });
        app.world_mut().send_event(HoleHit { hole: 99 });
        app.update();

        let session = app.world().resource::<RoundSession>();
        assert_eq!(session.round.score(), 1);
        assert_eq!(session.round.hole_state(hole), HoleState::Hit);
    }

    #[test]
    fn manual_stop_returns_to_ready() {
        let mut app = app(RoundConfig::default());
        app.world_mut().send_event(StartRound);
        app.update();
        app.update();
        assert_eq!(state(&app), AppState::Playing);

        app.world_mut().send_event(StopRound);
        app.update();
        app.update();

        assert_eq!(state(&app), AppState::Ready);
        let stats = app.world().resource::<SessionStats>();
        assert_eq!(stats.rounds_played, 1);
        assert_eq!(
            stats.last_outcome.map(|o| o.reason),
            Some(EndReason::Manual)
        );
    }

    #[test]
    fn clear_moves_to_finished() {
        let config = RoundConfig {
            target_score: 1,
            ..RoundConfig::default()
        };
        let mut app = app(config);
        app.world_mut().send_event(StartRound);
        app.update();
        app.world_mut()
            .resource_mut::<RoundSession>()
            .round
            .spawn();
        let hole = app
            .world()
            .resource::<RoundSession>()
            .round
            .holes()
            .iter()
            .position(|h| h.state == HoleState::Active)
            .unwrap();
        app.world_mut().send_event(HoleHit { hole });
        app.update();
        app.update();

        assert_eq!(state(&app), AppState::Finished);
        let stats = app.world().resource::<SessionStats>();
        assert_eq!(stats.best_score, 1);
        assert_eq!(stats.last_outcome.map(|o| o.reason), Some(EndReason::Clear));
    }

    #[test]
    fn deterministic_rounds_replay_the_same_spawns() {
        fn play_round(app: &mut App) -> Vec<HoleId> {
            app.world_mut().send_event(StartRound);
            app.update();
            let mut session = app.world_mut().resource_mut::<RoundSession>();
            for _ in 0..5 {
                session.round.spawn();
            }
            let active: Vec<HoleId> = session
                .round
                .holes()
                .iter()
                .enumerate()
                .filter(|(_, h)| h.state == HoleState::Active)
                .map(|(id, _)| id)
                .collect();
            session.round.stop(EndReason::Manual);
            active
        }

        let mut replay = app(RoundConfig::default());
        replay.world_mut().resource_mut::<SimSettings>().deterministic = true;
        let first = play_round(&mut replay);
        replay.update();
        let second = play_round(&mut replay);

        assert_eq!(first.len(), 5);
        assert_eq!(first, second);

        let mut other = app(RoundConfig::default());
        other.world_mut().resource_mut::<SimSettings>().deterministic = true;
        assert_eq!(play_round(&mut other), first);
    }
}
