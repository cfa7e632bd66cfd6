/// Fixed rate timer - fires at a given Hz from accumulated frame deltas
#[derive(Debug, Clone, Copy)]
pub struct FixedHz {
    interval: f32,
    accumulator: f32,
}

impl FixedHz {
    pub fn new(hz: f32) -> Self {
        Self {
            interval: 1.0 / hz,
            accumulator: 0.0,
        }
    }

    /// Update with delta, returns true if should fire
    pub fn tick(&mut self, delta: f32) -> bool {
        self.accumulator += delta;
        if self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            true
        } else {
            false
        }
    }

    /// Drop any leftover time and start a fresh interval
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Frames-per-second estimate refreshed once per second
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    window: FixedHz,
    frames: u32,
    elapsed: f32,
    fps: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            window: FixedHz::new(1.0),
            frames: 0,
            elapsed: 0.0,
            fps: 0.0,
        }
    }

    /// Count one frame; returns the new estimate when it was refreshed
    pub fn record(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;
        if !self.window.tick(delta) || self.elapsed <= 0.0 {
            return None;
        }
        self.fps = self.frames as f32 / self.elapsed;
        self.frames = 0;
        self.elapsed = 0.0;
        self.window.reset();
        Some(self.fps)
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_hz_fires_at_interval() {
        let mut timer = FixedHz::new(10.0);
        assert!(!timer.tick(0.05));
        assert!(timer.tick(0.06));
        assert!(!timer.tick(0.01));
    }

    #[test]
    fn fps_counter_refreshes_once_per_second() {
        let mut counter = FpsCounter::new();
        for _ in 0..59 {
            assert_eq!(counter.record(1.0 / 60.0), None);
        }
        let fps = counter.record(1.0 / 60.0 + 1e-4).unwrap();
        assert!((fps - 60.0).abs() < 0.1);
        assert_eq!(counter.fps(), fps);
    }

    #[test]
    fn fps_counter_stays_finite_after_stall() {
        let mut counter = FpsCounter::new();
        let fps = counter.record(3.0).unwrap();
        assert!((fps - 1.0 / 3.0).abs() < 1e-6);

        assert_eq!(counter.record(0.0), None);
        assert!(counter.fps().is_finite());

        for _ in 0..59 {
            assert_eq!(counter.record(1.0 / 60.0), None);
        }
        let fps = counter.record(1.0 / 60.0 + 1e-4).unwrap();
        // The zero-length frame still counts
        assert!((fps - 61.0).abs() < 0.1);
    }
}
