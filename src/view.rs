use std::fmt;

/// Pan step for the arrow and vi keys.
pub const FINE_STEP: f64 = 0.001;
/// Pan step for the WASD keys.
pub const COARSE_STEP: f64 = 0.01;
pub const ZOOM_FACTOR: f64 = 2.0;

/// Which part of the complex plane is on screen.
///
/// `zoom` is assumed positive. Repeated zooming can still drive it to zero or
/// infinity over a long enough session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub x_mov: f64,
    pub y_mov: f64,
    pub zoom: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            x_mov: -0.1,
            y_mov: 0.0,
            zoom: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    PanX(f64),
    PanY(f64),
    ZoomIn,
    ZoomOut,
}

/// The value a field holds after an [`Action`]; printed as `name: value`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Update {
    pub name: &'static str,
    pub value: f64,
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.6}", self.name, self.value)
    }
}

impl ViewState {
    pub fn apply(&mut self, action: Action) -> Update {
        match action {
            Action::PanX(delta) => {
                self.x_mov += delta;
                Update {
                    name: "x_mov",
                    value: self.x_mov,
                }
            }
            Action::PanY(delta) => {
                self.y_mov += delta;
                Update {
                    name: "y_mov",
                    value: self.y_mov,
                }
            }
            Action::ZoomIn => {
                self.zoom *= ZOOM_FACTOR;
                Update {
                    name: "zoom",
                    value: self.zoom,
                }
            }
            Action::ZoomOut => {
                self.zoom /= ZOOM_FACTOR;
                Update {
                    name: "zoom",
                    value: self.zoom,
                }
            }
        }
    }
}
