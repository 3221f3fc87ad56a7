//! Closed-form flight path sampling.
//!
//! Samples run from `t = 0` to the nominal flight time `2 v0 sin(theta) / g`.
//! With a raised launcher the tail dips below the ground; nothing here clips
//! it, consumers drop samples with [`Sample::is_above_ground`] false.

use std::iter::FusedIterator;

use crate::core::ballistics::{
    LaunchInputs, PhysicsConstants, nominal_flight_time, trajectory_at_time, validate_angle_deg,
};
use crate::core::error::{TrajectoryError, ensure_finite};

pub const DEFAULT_SAMPLES: usize = 1000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub t: f64,
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn is_above_ground(&self) -> bool {
        self.y >= 0.0
    }
}

/// Lazy, evenly spaced samples of one flight. Clone it to start over.
#[derive(Clone, Debug)]
pub struct Samples {
    inputs: LaunchInputs,
    physics: PhysicsConstants,
    t_max: f64,
    count: usize,
    front: usize,
    back: usize,
}

impl Samples {
    fn new(inputs: LaunchInputs, physics: PhysicsConstants, count: usize) -> Self {
        Self {
            inputs,
            physics,
            t_max: nominal_flight_time(inputs, physics),
            count,
            front: 0,
            back: count,
        }
    }

    pub fn t_max(&self) -> f64 {
        self.t_max
    }

    pub fn inputs(&self) -> LaunchInputs {
        self.inputs
    }

    /// Total samples in the flight, independent of how far iteration got.
    pub fn sample_count(&self) -> usize {
        self.count
    }

    pub fn get(&self, index: usize) -> Option<Sample> {
        (index < self.count).then(|| self.sample(index))
    }

    fn sample(&self, index: usize) -> Sample {
        let t = if index + 1 == self.count && self.count > 1 {
            self.t_max
        } else if self.count > 1 {
            self.t_max * (index as f64 / (self.count - 1) as f64)
        } else {
            0.0
        };
        let (x, y) = trajectory_at_time(self.inputs, self.physics, t);
        Sample { t, x, y }
    }
}

impl Iterator for Samples {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.front >= self.back {
            return None;
        }
        let sample = self.sample(self.front);
        self.front += 1;
        Some(sample)
    }

    fn nth(&mut self, n: usize) -> Option<Sample> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Samples {
    fn next_back(&mut self) -> Option<Sample> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.sample(self.back))
    }
}

impl ExactSizeIterator for Samples {}

impl FusedIterator for Samples {}

/// Samples plus the `n + 1` time checkpoints `t_max * i / n` that drive
/// playback.
#[derive(Clone, Debug)]
pub struct TimedPath {
    pub samples: Samples,
    pub checkpoints: Vec<f64>,
}

impl TimedPath {
    pub fn t_max(&self) -> f64 {
        self.samples.t_max()
    }
}

fn launch(
    speed_mps: f64,
    angle_deg: f64,
    gravity_mps2: f64,
    launch_height_m: f64,
) -> Result<(LaunchInputs, PhysicsConstants), TrajectoryError> {
    let physics = PhysicsConstants::new(gravity_mps2, launch_height_m)?;
    ensure_finite(speed_mps, "launch speed")?;
    if speed_mps < 0.0 {
        return Err(TrajectoryError::invalid("launch speed cannot be negative"));
    }
    validate_angle_deg(angle_deg)?;
    Ok((LaunchInputs::new(angle_deg, speed_mps), physics))
}

/// Exactly `samples` points over `[0, t_max]`; the first one is the launch.
pub fn sample_path(
    speed_mps: f64,
    angle_deg: f64,
    gravity_mps2: f64,
    launch_height_m: f64,
    samples: usize,
) -> Result<Samples, TrajectoryError> {
    let (inputs, physics) = launch(speed_mps, angle_deg, gravity_mps2, launch_height_m)?;
    Ok(Samples::new(inputs, physics, samples))
}

pub fn sample_path_timed(
    speed_mps: f64,
    angle_deg: f64,
    gravity_mps2: f64,
    launch_height_m: f64,
    samples: usize,
) -> Result<TimedPath, TrajectoryError> {
    let path = sample_path(speed_mps, angle_deg, gravity_mps2, launch_height_m, samples)?;
    let t_max = path.t_max();
    let checkpoints = (0..=samples)
        .map(|i| {
            if samples == 0 {
                0.0
            } else {
                t_max * i as f64 / samples as f64
            }
        })
        .collect();
    Ok(TimedPath {
        samples: path,
        checkpoints,
    })
}
