use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Source of elapsed seconds since some fixed start
pub trait TimeSource {
    fn elapsed(&self) -> f32;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Hand-driven clock; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f32>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, seconds: f32) {
        self.now.set(seconds);
    }

    pub fn advance(&self, seconds: f32) {
        self.now.set(self.now.get() + seconds);
    }
}

impl TimeSource for ManualClock {
    fn elapsed(&self) -> f32 {
        self.now.get()
    }
}

/// Timing of one rendered frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the clock started
    pub time: f32,
    /// Seconds since the previous frame
    pub delta: f32,
}

/// Frame clock over a [`TimeSource`]
///
/// Reported time never goes backwards even if the source does.
#[derive(Debug)]
pub struct AnimationClock<S: TimeSource> {
    source: S,
    last: f32,
    frames: u64,
}

impl<S: TimeSource> AnimationClock<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            last: 0.0,
            frames: 0,
        }
    }

    pub fn tick(&mut self) -> FrameInfo {
        let now = self.source.elapsed().max(self.last);
        let delta = now - self.last;
        self.last = now;
        self.frames += 1;
        FrameInfo {
            number: self.frames,
            time: now,
            delta,
        }
    }

    /// Time reported by the latest tick
    pub fn time(&self) -> f32 {
        self.last
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn system_clock_advances() {
        let clock = SystemClock::new();
        thread::sleep(Duration::from_millis(10));
        assert!(clock.elapsed() >= 0.009);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(1.5);
        assert_eq!(clock.elapsed(), 1.5);
        handle.set(0.25);
        assert_eq!(clock.elapsed(), 0.25);
    }

    #[test]
    fn tick_reports_time_and_delta() {
        let source = ManualClock::new();
        let mut clock = AnimationClock::new(source.clone());

        source.set(0.5);
        let first = clock.tick();
        assert_eq!(first, FrameInfo { number: 1, time: 0.5, delta: 0.5 });

        source.set(0.75);
        let second = clock.tick();
        assert_eq!(second.number, 2);
        assert_eq!(second.time, 0.75);
        assert_eq!(second.delta, 0.25);
    }

    #[test]
    fn time_is_monotonic() {
        let source = ManualClock::new();
        let mut clock = AnimationClock::new(source.clone());
        source.set(2.0);
        clock.tick();
        source.set(1.0);
        let frame = clock.tick();
        assert_eq!(frame.time, 2.0);
        assert_eq!(frame.delta, 0.0);
        assert_eq!(clock.frames(), 2);
    }
}
