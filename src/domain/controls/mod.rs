use crate::domain::presentation::hole_at;
use crate::domain::simulation::{
    AppState, HoleHit, RoundSession, SimSettings, StartRound, StopRound,
};
use crate::MainCamera;
use bevy::input::mouse::MouseButtonInput;
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy_egui::EguiContexts;

#[derive(Resource)]
pub struct Keybinds {
    /// Row-major, one key per hole of the 4x4 board.
    pub holes: [KeyCode; 16],
    pub start: KeyCode,
    pub stop: KeyCode,
    pub help: KeyCode,
    pub diagnostics: KeyCode,
}

impl Default for Keybinds {
    fn default() -> Self {
        Self {
            holes: [
                KeyCode::Digit1,
                KeyCode::Digit2,
                KeyCode::Digit3,
                KeyCode::Digit4,
                KeyCode::KeyQ,
                KeyCode::KeyW,
                KeyCode::KeyE,
                KeyCode::KeyR,
                KeyCode::KeyA,
                KeyCode::KeyS,
                KeyCode::KeyD,
                KeyCode::KeyF,
                KeyCode::KeyZ,
                KeyCode::KeyX,
                KeyCode::KeyC,
                KeyCode::KeyV,
            ],
            start: KeyCode::Enter,
            stop: KeyCode::Escape,
            help: KeyCode::KeyH,
            diagnostics: KeyCode::F3,
        }
    }
}

impl Keybinds {
    pub fn hole_for(&self, key: KeyCode) -> Option<usize> {
        self.holes.iter().position(|&k| k == key)
    }
}

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Keybinds>().add_systems(
            Update,
            (
                click_hit,
                key_hit,
                start_trigger.run_if(not(in_state(AppState::Playing))),
                stop_trigger.run_if(in_state(AppState::Playing)),
                help_toggle,
                diagnostics_toggle,
            ),
        );
    }
}

fn click_hit(
    windows: Query<&Window>,
    q_cam: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut mousebtn_evr: EventReader<MouseButtonInput>,
    mut contexts: EguiContexts,
    session: Res<RoundSession>,
    mut ev_hit: EventWriter<HoleHit>,
) {
    let pressed = mousebtn_evr
        .read()
        .any(|ev| ev.state == ButtonState::Pressed && ev.button == MouseButton::Left);
    if !pressed {
        return;
    }
    // clicks on the HUD belong to egui
    if contexts.ctx_mut().wants_pointer_input() {
        return;
    }

    let Ok(win) = windows.get_single() else {
        return;
    };
    let Some(cursor) = win.cursor_position() else {
        return;
    };
    let Ok((cam, cam_transform)) = q_cam.get_single() else {
        return;
    };
    let Some(world) = cam.viewport_to_world_2d(cam_transform, cursor) else {
        return;
    };

    if let Some(hole) = hole_at(world, session.round.holes().len()) {
        ev_hit.send(HoleHit { hole });
    }
}

fn key_hit(
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
    session: Res<RoundSession>,
    mut ev_hit: EventWriter<HoleHit>,
) {
    let hole_count = session.round.holes().len();
    for key in keys.get_just_pressed() {
        if let Some(hole) = keybinds.hole_for(*key).filter(|&h| h < hole_count) {
            ev_hit.send(HoleHit { hole });
        }
    }
}

fn start_trigger(
    mut ev_start: EventWriter<StartRound>,
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
) {
    if keys.just_pressed(keybinds.start) {
        ev_start.send(StartRound);
    }
}

fn stop_trigger(
    mut ev_stop: EventWriter<StopRound>,
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
) {
    if keys.just_pressed(keybinds.stop) {
        ev_stop.send(StopRound);
    }
}

fn help_toggle(
    mut settings: ResMut<SimSettings>,
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
) {
    if keys.just_pressed(keybinds.help) {
        settings.show_help = !settings.show_help;
    }
}

fn diagnostics_toggle(
    mut settings: ResMut<SimSettings>,
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
) {
    if keys.just_pressed(keybinds.diagnostics) {
        settings.show_diagnostics = !settings.show_diagnostics;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keys_cover_the_board_once() {
        let keybinds = Keybinds::default();
        for (hole, key) in keybinds.holes.iter().enumerate() {
            assert_eq!(keybinds.hole_for(*key), Some(hole));
        }
        assert_eq!(keybinds.hole_for(keybinds.start), None);
        assert_eq!(keybinds.hole_for(keybinds.help), None);
    }
}
