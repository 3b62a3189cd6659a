use web_time::{Duration, Instant};

/// How often the smoothed frame rate is written to the log.
const REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// Frame pacing and FPS tracking for the display loop.
///
/// The carousel advances by a fixed step per frame, so the cap here is what
/// bounds animation speed on high-refresh displays.
pub struct FrameTiming {
    /// Minimum frame duration (zero = uncapped)
    min_frame_duration: Duration,
    last_frame: Instant,
    last_report: Instant,
    /// Exponential moving average of instantaneous FPS
    smoothed_fps: f32,
    frames: u64,
}

impl FrameTiming {
    /// Create a frame timer with the given FPS cap (0 = uncapped).
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };
        let now = Instant::now();
        Self {
            min_frame_duration,
            last_frame: now,
            last_report: now,
            smoothed_fps: 60.0,
            frames: 0,
        }
    }

    /// Whether enough time has passed since the last frame to draw another.
    pub fn should_render(&self) -> bool {
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Record a finished frame.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frames += 1;

        if frame_time > 0.0 {
            self.smoothed_fps =
                crate::util::smoothing::approach(self.smoothed_fps, 1.0 / frame_time, 0.05);
        }

        if now.duration_since(self.last_report) >= REPORT_INTERVAL {
            self.last_report = now;
            log::debug!(
                "{} frames, {:.1} fps",
                self.frames,
                self.smoothed_fps
            );
        }
    }

    /// Smoothed frames per second.
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Frames recorded since construction.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
