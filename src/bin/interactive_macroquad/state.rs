use wallshot::core::geometry::{Point, Triangle};
use wallshot::core::playback::Playback;
use wallshot::core::scenario::{
    DEFAULT_TARGET_LATERAL_MM, DEFAULT_TARGET_OFFSET_MM, Scenario, lateral_cm_from_mm,
    target_height_from_offset_mm,
};

use crate::constants::{FRAME_HEIGHT_PX, FRAME_WIDTH_PX, TRIANGLE_SIDE_PX};
use crate::model::{AppScene, Flight, MillimeterEntry};

pub(crate) struct AppRuntime {
    pub(crate) scene: AppScene,
    pub(crate) scenario: Scenario,
    pub(crate) triangle: Triangle,
    pub(crate) y_entry: MillimeterEntry,
    pub(crate) z_entry: MillimeterEntry,
    pub(crate) angle_deg: f32,
    pub(crate) flight: Option<Flight>,
    pub(crate) playback: Playback,
    pub(crate) status_line: String,
}

impl AppRuntime {
    pub(crate) fn new() -> Self {
        let scenario = Scenario::default();
        Self {
            scene: AppScene::Setup,
            angle_deg: scenario.angle_deg as f32,
            scenario,
            triangle: Triangle::equilateral_centered(FRAME_WIDTH_PX, FRAME_HEIGHT_PX, TRIANGLE_SIDE_PX),
            y_entry: MillimeterEntry::new(DEFAULT_TARGET_OFFSET_MM),
            z_entry: MillimeterEntry::new(DEFAULT_TARGET_LATERAL_MM),
            flight: None,
            playback: Playback::new(),
            status_line: "Ready".to_string(),
        }
    }

    /// Marker center in frame pixels for the committed entries.
    pub(crate) fn marker_center(&self) -> Point {
        self.triangle
            .point_from_base(f64::from(self.z_entry.value), f64::from(self.y_entry.value))
    }

    pub(crate) fn lateral_cm(&self) -> f64 {
        lateral_cm_from_mm(self.z_entry.value)
    }

    /// Scenario with the committed target height and the slider angle.
    pub(crate) fn snapshot(&self) -> Scenario {
        self.scenario
            .with_target_height(target_height_from_offset_mm(self.y_entry.value))
            .with_angle(f64::from(self.angle_deg))
    }
}
