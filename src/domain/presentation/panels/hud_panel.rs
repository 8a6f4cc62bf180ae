use bevy::prelude::*;
use bevy_egui::egui::{self, Align2, Color32, FontId, RichText};

use crate::domain::simulation::{RoundSession, StopRound};

pub fn show_hud_panel(
    ctx: &mut egui::Context,
    session: &RoundSession,
    ev_stop: &mut EventWriter<StopRound>,
) {
    let round = &session.round;
    egui::Area::new("hud_panel".into())
        .anchor(Align2::LEFT_TOP, egui::Vec2::new(16.0, 16.0))
        .show(ctx, |ui| {
            ui.label(
                RichText::new(format!(
                    "Score: {} / {}",
                    round.score(),
                    round.config().target_score
                ))
                .font(FontId::proportional(28.0)),
            );
            ui.label(
                RichText::new(hearts(round.lives(), round.config().starting_lives))
                    .font(FontId::proportional(28.0))
                    .color(Color32::from_rgb(230, 70, 80)),
            );
            if ui
                .add_enabled(round.is_active(), egui::Button::new("End"))
                .clicked()
            {
                ev_stop.send(StopRound);
            }
        });
}

fn hearts(lives: u32, max: u32) -> String {
    (0..max.max(lives))
        .map(|i| if i < lives { '♥' } else { '♡' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::hearts;

    #[test]
    fn hearts_show_lost_lives_as_outlines() {
        assert_eq!(hearts(3, 3), "♥♥♥");
        assert_eq!(hearts(1, 3), "♥♡♡");
        assert_eq!(hearts(0, 3), "♡♡♡");
    }
}
