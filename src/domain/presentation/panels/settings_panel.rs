use bevy_egui::egui;

use crate::domain::simulation::{RoundConfig, SimSettings};

pub fn show_settings_panel(
    ctx: &mut egui::Context,
    settings: &mut SimSettings,
    config: &RoundConfig,
) {
    egui::Window::new("Settings")
        .anchor(egui::Align2::RIGHT_TOP, egui::Vec2::new(-16.0, 16.0))
        .show(ctx, |ui| {
            ui.checkbox(&mut settings.deterministic, "Deterministic");
            ui.checkbox(&mut settings.show_help, "Help");
            ui.checkbox(&mut settings.show_diagnostics, "Diagnostics");

            ui.separator();

            ui.label(format!("Holes: {}", config.hole_count));
            ui.label(format!("Lives: {}", config.starting_lives));
            ui.label(format!("Target: {}", config.target_score));
            ui.label(format!("Spawn every {} ms", config.spawn_interval.as_millis()));
            ui.label(format!("Moles stay {} ms", config.expiry.as_millis()));
        });
}
