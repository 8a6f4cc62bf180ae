use bevy_egui::egui::{self, Align2, Color32, FontId, RichText};

use crate::domain::simulation::EndReason;

pub fn show_banner(ctx: &mut egui::Context, reason: EndReason) {
    match reason {
        EndReason::Clear => show_success_banner(ctx),
        EndReason::GameOver => show_failure_banner(ctx),
        EndReason::Manual => {}
    }
}

fn show_success_banner(ctx: &mut egui::Context) {
    egui::Area::new("success_banner".into())
        .anchor(Align2::CENTER_TOP, egui::Vec2::new(0.0, 24.0))
        .show(ctx, |ui| {
            let text = RichText::new("Stage Clear!")
                .font(FontId::proportional(48.0))
                .color(Color32::GREEN);
            ui.label(text);
        });
}

fn show_failure_banner(ctx: &mut egui::Context) {
    egui::Area::new("failure_banner".into())
        .anchor(Align2::CENTER_TOP, egui::Vec2::new(0.0, 24.0))
        .show(ctx, |ui| {
            let text = RichText::new("Game Over")
                .font(FontId::proportional(48.0))
                .color(Color32::RED);
            ui.label(text);
        });
}
