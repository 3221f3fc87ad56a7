use crate::core::error::{TrajectoryError, ensure_finite};

pub const EARTH_GRAVITY_MPS2: f64 = 9.81;

/// Uniform gravity and the height the projectile leaves the launcher at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsConstants {
    pub gravity_mps2: f64,
    pub launch_height_m: f64,
}

impl PhysicsConstants {
    pub fn new(gravity_mps2: f64, launch_height_m: f64) -> Result<Self, TrajectoryError> {
        let constants = Self {
            gravity_mps2,
            launch_height_m,
        };
        constants.validate()?;
        Ok(constants)
    }

    pub fn validate(&self) -> Result<(), TrajectoryError> {
        ensure_finite(self.gravity_mps2, "gravity")?;
        ensure_finite(self.launch_height_m, "launch height")?;
        if self.gravity_mps2 <= 0.0 {
            return Err(TrajectoryError::invalid(format!(
                "gravity must be positive, got {}",
                self.gravity_mps2
            )));
        }
        Ok(())
    }
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        Self {
            gravity_mps2: EARTH_GRAVITY_MPS2,
            launch_height_m: 0.0,
        }
    }
}

/// A horizontal distance paired with a height: an exact height for the
/// target, a floor for the wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstraintPoint {
    pub distance_m: f64,
    pub height_m: f64,
}

impl ConstraintPoint {
    pub const fn new(distance_m: f64, height_m: f64) -> Self {
        Self {
            distance_m,
            height_m,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaunchInputs {
    pub angle_deg: f64,
    pub speed_mps: f64,
}

impl LaunchInputs {
    pub const fn new(angle_deg: f64, speed_mps: f64) -> Self {
        Self {
            angle_deg,
            speed_mps,
        }
    }
}

pub(crate) fn validate_angle_deg(angle_deg: f64) -> Result<f64, TrajectoryError> {
    ensure_finite(angle_deg, "launch angle")?;
    if angle_deg <= 0.0 || angle_deg >= 90.0 {
        return Err(TrajectoryError::invalid(format!(
            "launch angle must lie strictly between 0 and 90 degrees, got {angle_deg}"
        )));
    }
    Ok(angle_deg)
}

pub fn velocity_components(inputs: LaunchInputs) -> (f64, f64) {
    let theta = inputs.angle_deg.to_radians();
    let vx = inputs.speed_mps * theta.cos();
    let vy = inputs.speed_mps * theta.sin();
    (vx, vy)
}

pub fn trajectory_at_time(inputs: LaunchInputs, physics: PhysicsConstants, time_s: f64) -> (f64, f64) {
    let (vx, vy) = velocity_components(inputs);
    let x = vx * time_s;
    let y = physics.launch_height_m + (vy * time_s)
        - (0.5 * physics.gravity_mps2 * time_s * time_s);
    (x, y)
}

/// Time at which the projectile has covered `distance_m` horizontally.
///
/// Callers keep the angle inside (0, 90) degrees and the speed positive, so
/// the horizontal velocity never vanishes.
pub fn time_to_distance(inputs: LaunchInputs, distance_m: f64) -> f64 {
    let (vx, _) = velocity_components(inputs);
    distance_m / vx
}

pub fn height_at_distance(inputs: LaunchInputs, physics: PhysicsConstants, distance_m: f64) -> f64 {
    let (_, y) = trajectory_at_time(inputs, physics, time_to_distance(inputs, distance_m));
    y
}

pub fn apex_time(inputs: LaunchInputs, physics: PhysicsConstants) -> f64 {
    let (_, vy) = velocity_components(inputs);
    vy / physics.gravity_mps2
}

/// Flight time back to the launch height, `2 v0 sin(theta) / g`.
///
/// This ignores the launch height, so with `h0 > 0` the real impact comes a
/// little later. Sampling uses it anyway and leaves the below-ground tail to
/// the consumer.
pub fn nominal_flight_time(inputs: LaunchInputs, physics: PhysicsConstants) -> f64 {
    2.0 * apex_time(inputs, physics)
}

/// Time and horizontal distance at which the projectile reaches the ground.
pub fn flight_time_and_range(
    inputs: LaunchInputs,
    physics: PhysicsConstants,
) -> Result<(f64, f64), TrajectoryError> {
    ensure_finite(inputs.angle_deg, "launch angle")?;
    ensure_finite(inputs.speed_mps, "launch speed")?;
    physics.validate()?;
    if inputs.speed_mps < 0.0 {
        return Err(TrajectoryError::invalid("velocity cannot be negative"));
    }

    let g = physics.gravity_mps2;
    let (_, vy) = velocity_components(inputs);
    let disc = vy * vy + 2.0 * g * physics.launch_height_m;
    if disc < 0.0 {
        return Err(TrajectoryError::invalid(format!(
            "no real landing time: vy^2 + 2*g*h is negative ({disc})"
        )));
    }

    let t_land = (vy + disc.sqrt()) / g;
    if t_land < 0.0 {
        return Err(TrajectoryError::invalid(format!(
            "landing time computed as negative ({t_land})"
        )));
    }

    let (range, _) = trajectory_at_time(inputs, physics, t_land);
    Ok((t_land, range))
}
