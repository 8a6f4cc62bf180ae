use bevy::prelude::*;
use bevy_egui::egui;

use crate::domain::simulation::{RoundConfig, SessionStats, StartRound};

pub fn show_start_panel(
    ctx: &mut egui::Context,
    config: &RoundConfig,
    stats: &SessionStats,
    ev_start: &mut EventWriter<StartRound>,
) {
    egui::Window::new("Whack-a-Mole")
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!(
                "Whack {} moles before you miss {}.",
                config.target_score, config.starting_lives
            ));
            if stats.rounds_played > 0 {
                ui.label(format!(
                    "Rounds: {}  Best: {}",
                    stats.rounds_played, stats.best_score
                ));
            }
            if ui.button("Start").clicked() {
                ev_start.send(StartRound);
            }
        });
}
