use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin};

use crate::domain::controls::Keybinds;
use crate::domain::simulation::{
    publish_notices, AppState, RoundSession, SessionStats, SimSettings, StartRound, StopRound,
};

pub mod board;
mod panels;

pub use board::hole_at;

pub struct UiPlugin;
impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Startup, board::spawn_board)
            .add_systems(Update, board::sync_board.after(publish_notices))
            .add_systems(Update, ready_ui.run_if(in_state(AppState::Ready)))
            .add_systems(Update, hud_ui.run_if(in_state(AppState::Playing)))
            .add_systems(Update, finished_ui.run_if(in_state(AppState::Finished)))
            .add_systems(Update, overlay_ui);
    }
}

fn ready_ui(
    mut contexts: EguiContexts,
    session: Res<RoundSession>,
    stats: Res<SessionStats>,
    mut settings: ResMut<SimSettings>,
    mut ev_start: EventWriter<StartRound>,
) {
    let ctx = contexts.ctx_mut();
    panels::show_start_panel(ctx, session.round.config(), &stats, &mut ev_start);
    panels::show_settings_panel(ctx, &mut settings, session.round.config());
}

fn hud_ui(
    mut contexts: EguiContexts,
    session: Res<RoundSession>,
    mut ev_stop: EventWriter<StopRound>,
) {
    panels::show_hud_panel(contexts.ctx_mut(), &session, &mut ev_stop);
}

fn finished_ui(
    mut contexts: EguiContexts,
    session: Res<RoundSession>,
    stats: Res<SessionStats>,
    mut ev_start: EventWriter<StartRound>,
) {
    let Some(outcome) = session.round.last_outcome() else {
        return;
    };
    let ctx = contexts.ctx_mut();
    panels::show_banner(ctx, outcome.reason);
    panels::show_result_panel(ctx, outcome, &stats, &mut ev_start);
}

fn overlay_ui(
    mut contexts: EguiContexts,
    settings: Res<SimSettings>,
    session: Res<RoundSession>,
    keybinds: Res<Keybinds>,
    diagnostics: Res<DiagnosticsStore>,
) {
    let ctx = contexts.ctx_mut();
    panels::show_help_panel(ctx, &settings, &keybinds);
    panels::show_diagnostics_panel(ctx, &diagnostics, &settings, &session);
}
