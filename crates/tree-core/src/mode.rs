//! Two-valued display mode and its controller.

/// Display state driving every blend in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Scattered,
    Assembled,
}

impl Mode {
    /// Blend target consumed by particle groups: 1 when assembled, 0 when scattered.
    #[inline]
    pub fn target(self) -> f32 {
        match self {
            Mode::Scattered => 0.0,
            Mode::Assembled => 1.0,
        }
    }

    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Mode::Scattered => Mode::Assembled,
            Mode::Assembled => Mode::Scattered,
        }
    }

    /// Label for the control that switches away from this mode.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Mode::Scattered => "Assemble Tree",
            Mode::Assembled => "Scatter Magic",
        }
    }
}

/// Holds the current mode; the only transition is an explicit toggle.
#[derive(Clone, Debug, Default)]
pub struct ModeController {
    mode: Mode,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn toggle(&mut self) -> Mode {
        self.mode = self.mode.toggled();
        log::info!("[mode] now {:?}", self.mode);
        self.mode
    }

    /// Wishes are only offered once the tree is assembled.
    #[inline]
    pub fn allows_wish(&self) -> bool {
        self.mode == Mode::Assembled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_scattered_and_flips() {
        let mut ctl = ModeController::new();
        assert_eq!(ctl.mode(), Mode::Scattered);
        assert!(!ctl.allows_wish());
        assert_eq!(ctl.toggle(), Mode::Assembled);
        assert!(ctl.allows_wish());
        assert_eq!(ctl.toggle(), Mode::Scattered);
    }

    #[test]
    fn targets_match_modes() {
        assert_eq!(Mode::Scattered.target(), 0.0);
        assert_eq!(Mode::Assembled.target(), 1.0);
    }
}
