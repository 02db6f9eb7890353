// Frame-rate governor: sleeps out whatever is left of each frame.
// Also measures the real FPS once per second so main can log it.

use std::time::{Duration, Instant};

pub struct FrameClock {
    frame: Option<Duration>, // None = uncapped
    last: Instant,
    window_start: Instant,
    frames: u32,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        let now = Instant::now();
        Self {
            frame: (target_fps > 0).then(|| Duration::from_secs_f64(1.0 / target_fps as f64)),
            last: now,
            window_start: now,
            frames: 0,
        }
    }

    #[cfg(test)]
    pub fn frame_time(&self) -> Option<Duration> {
        self.frame
    }

    /// Block until the target frame interval since the previous tick has passed.
    /// Returns the measured FPS once a full second has been counted.
    pub fn tick(&mut self) -> Option<f32> {
        if let Some(frame) = self.frame {
            let spent = self.last.elapsed();
            if spent < frame {
                std::thread::sleep(frame - spent);
            }
        }
        let now = Instant::now();
        self.last = now;
        self.count_frame(now)
    }

    fn count_frame(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let window = now.duration_since(self.window_start);
        if window < Duration::from_secs(1) {
            return None;
        }
        let fps = self.frames as f32 / window.as_secs_f32();
        self.frames = 0;
        self.window_start = now;
        Some(fps)
    }
}
