use bevy::prelude::*;
use bevy_egui::egui;

use crate::domain::simulation::{EndReason, RoundOutcome, SessionStats, StartRound};

pub fn show_result_panel(
    ctx: &mut egui::Context,
    outcome: RoundOutcome,
    stats: &SessionStats,
    ev_start: &mut EventWriter<StartRound>,
) {
    let title = match outcome.reason {
        EndReason::Clear => "Cleared",
        EndReason::GameOver => "Game Over",
        // a manual stop goes back to the start screen instead
        EndReason::Manual => "Round Ended",
    };
    egui::Window::new(title)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("Final score: {}", outcome.score));
            ui.label(format!("Best this session: {}", stats.best_score));
            if ui.button("Restart").clicked() {
                ev_start.send(StartRound);
            }
        });
}
