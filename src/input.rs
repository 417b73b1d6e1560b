use winit::event::VirtualKeyCode;

use crate::view::{Action, COARSE_STEP, FINE_STEP};

/// Key bindings. Arrows and `hjkl` pan finely, `wasd` coarsely, `i`/`o` zoom.
pub fn action_for_key(key: VirtualKeyCode) -> Option<Action> {
    use VirtualKeyCode::*;

    let action = match key {
        Left | H => Action::PanX(-FINE_STEP),
        Right | L => Action::PanX(FINE_STEP),
        Up | K => Action::PanY(-FINE_STEP),
        Down | J => Action::PanY(FINE_STEP),
        I => Action::ZoomIn,
        O => Action::ZoomOut,
        W => Action::PanY(-COARSE_STEP),
        S => Action::PanY(COARSE_STEP),
        D => Action::PanX(COARSE_STEP),
        A => Action::PanX(-COARSE_STEP),
        _ => return None,
    };
    Some(action)
}
