//! Launch solver for a projectile that has to clear a wall and land on a target.
//!
//! Everything physical lives in [`core`]; the binaries only snapshot user input
//! into a [`core::scenario::Scenario`] and render what comes back.

pub mod core {
    pub mod ballistics;
    pub mod error;
    pub mod geometry;
    pub mod playback;
    pub mod plot;
    pub mod sampler;
    pub mod scenario;
    pub mod solver;
    pub mod window;
}
