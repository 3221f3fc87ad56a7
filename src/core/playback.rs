//! Wall-clock cursor over a [`TimedPath`].

use crate::core::sampler::{Sample, TimedPath};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Playback {
    elapsed_s: f64,
    index: usize,
    running: bool,
    finished: bool,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn elapsed_s(&self) -> f64 {
        self.elapsed_s
    }

    /// Start/stop. Starting a finished flight replays it from the launch.
    pub fn toggle(&mut self) {
        if self.finished {
            self.reset();
            self.running = true;
        } else {
            self.running = !self.running;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Sample to draw this frame, if the ball has left the launcher.
    pub fn current(&self, path: &TimedPath) -> Option<Sample> {
        if self.index == 0 && !self.running && !self.finished {
            return None;
        }
        path.samples.get(self.index)
    }

    /// Adds `dt_s` of flight time and moves past every checkpoint it covers.
    ///
    /// Stops on the last sample or on the last sample above ground,
    /// whichever comes first.
    pub fn advance(&mut self, dt_s: f64, path: &TimedPath) -> Option<Sample> {
        if !self.running {
            return self.current(path);
        }

        let last = path.samples.sample_count().saturating_sub(1);
        self.elapsed_s += dt_s.max(0.0);
        while self.index < last
            && self
                .checkpoints_at(path, self.index)
                .is_some_and(|checkpoint| self.elapsed_s >= checkpoint)
        {
            let next = self.index + 1;
            if path.samples.get(next).is_some_and(|s| !s.is_above_ground()) {
                self.stop_finished();
                return self.current(path);
            }
            self.index = next;
        }
        if self.index >= last {
            self.stop_finished();
        }
        self.current(path)
    }

    fn checkpoints_at(&self, path: &TimedPath, index: usize) -> Option<f64> {
        path.checkpoints.get(index).copied()
    }

    fn stop_finished(&mut self) {
        self.running = false;
        self.finished = true;
    }
}
