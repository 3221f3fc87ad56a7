use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrajectoryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(
        "no value in [{lower}, {upper}] reaches the target height (closest miss {closest_miss_m:.4} m)"
    )]
    TargetUnreachable {
        lower: f64,
        upper: f64,
        closest_miss_m: f64,
    },
    #[error(
        "target is only reachable with {candidate:.4}, which passes {wall_margin_m:.4} m below the wall"
    )]
    WallNotCleared { candidate: f64, wall_margin_m: f64 },
    #[error("failed to render chart: {0}")]
    Render(String),
}

impl TrajectoryError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// True when the inputs were valid but no admissible launch exists.
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            Self::TargetUnreachable { .. } | Self::WallNotCleared { .. }
        )
    }
}

pub(crate) fn ensure_finite(value: f64, label: &str) -> Result<f64, TrajectoryError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TrajectoryError::invalid(format!(
            "{label} must be a finite number, got {value}"
        )))
    }
}
