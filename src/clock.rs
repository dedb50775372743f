//! Fixed-rate frame pacing.

use std::time::{Duration, Instant};

/// Blocks the game thread until the next tick boundary.
#[derive(Debug)]
pub struct FrameClock {
    frame: Duration,
    frame_start: Instant,
    last_frame: Duration,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / fps.max(1),
            frame_start: Instant::now(),
            last_frame: Duration::ZERO,
        }
    }

    /// Target duration of one tick.
    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    pub fn target_fps(&self) -> f32 {
        1.0 / self.frame.as_secs_f32()
    }

    /// Sleep away whatever is left of the current tick, then start the next.
    /// Returns how long the finished tick took, sleep included.
    pub fn wait(&mut self) -> Duration {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame {
            std::thread::sleep(self.frame - elapsed);
        }
        self.last_frame = self.frame_start.elapsed();
        self.frame_start = Instant::now();
        self.last_frame
    }

    /// Rate implied by the last completed tick; 0 before the first one.
    pub fn measured_fps(&self) -> f32 {
        if self.last_frame.is_zero() {
            0.0
        } else {
            1.0 / self.last_frame.as_secs_f32()
        }
    }
}
