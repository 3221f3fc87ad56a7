use chrono::{DateTime, Local};

use wallshot::core::sampler::TimedPath;
use wallshot::core::window::AxisWindow;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AppScene {
    Setup,
    Simulation,
}

/// A text entry holding an integer millimeter value.
///
/// `text` is what the user is typing; `value` is the last committed value and
/// what the entry reverts to when the text does not parse or is rejected.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct MillimeterEntry {
    pub(crate) text: String,
    pub(crate) value: i32,
}

impl MillimeterEntry {
    pub(crate) fn new(value: i32) -> Self {
        Self {
            text: value.to_string(),
            value,
        }
    }

    pub(crate) fn parsed(&self) -> Option<i32> {
        self.text.trim().parse().ok()
    }

    pub(crate) fn revert(&mut self) {
        self.text = self.value.to_string();
    }

    pub(crate) fn commit(&mut self, value: i32) {
        self.value = value;
        self.text = value.to_string();
    }
}

/// One solved launch, ready to draw and play back.
pub(crate) struct Flight {
    pub(crate) speed_mps: f64,
    pub(crate) angle_deg: f64,
    pub(crate) drive_voltage: f64,
    pub(crate) path: TimedPath,
    pub(crate) window: AxisWindow,
    pub(crate) solved_at: DateTime<Local>,
}
