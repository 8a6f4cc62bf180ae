use bevy_egui::egui;

use crate::domain::controls::Keybinds;
use crate::domain::simulation::SimSettings;

pub fn show_help_panel(ctx: &mut egui::Context, settings: &SimSettings, keybinds: &Keybinds) {
    if settings.show_help {
        egui::Window::new("Help").show(ctx, |ui| {
            ui.label("Left Mouse: Whack the mole under the cursor");
            ui.label("1-4 / Q-R / A-F / Z-V: Whack by grid position");
            ui.label(format!("{:?}: Start round", keybinds.start));
            ui.label(format!("{:?}: End round", keybinds.stop));
            ui.label(format!("{:?}: Toggle Help", keybinds.help));
            ui.label(format!("{:?}: Toggle Diagnostics", keybinds.diagnostics));
        });
    }
}
