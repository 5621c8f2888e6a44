use std::time::Duration;

/// Converts real elapsed time into whole animation frames.
///
/// Time that does not add up to a full frame is carried over to the next
/// call. After a long stall only `max_catch_up` frames are returned and the
/// rest of the backlog is dropped, so a paused terminal does not fast-forward
/// the storm.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame: u64,
    frame_duration: Duration,
    carry: Duration,
    max_catch_up: u32,
}

impl FrameClock {
    /// Create a clock running at `frames_per_second` (at least 1).
    pub fn new(frames_per_second: u32) -> Self {
        Self {
            frame: 0,
            frame_duration: Duration::from_secs(1) / frames_per_second.max(1),
            carry: Duration::ZERO,
            max_catch_up: 10,
        }
    }

    /// Feed in elapsed time. Returns how many frames are now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.carry += elapsed;
        let mut due = 0;
        while self.carry >= self.frame_duration {
            self.carry -= self.frame_duration;
            due += 1;
            if due == self.max_catch_up {
                self.carry = Duration::ZERO;
                break;
            }
        }
        self.frame += u64::from(due);
        due
    }

    /// Count one frame that was stepped directly, outside [`advance`](Self::advance).
    pub fn count_frame(&mut self) -> u64 {
        self.frame += 1;
        self.frame
    }

    /// Total frames produced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Duration of one frame.
    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_initial_state() {
        let clock = FrameClock::new(60);
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.frame_duration(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn clock_carries_partial_frames() {
        let mut clock = FrameClock::new(50); // 20 ms frames
        assert_eq!(clock.advance(Duration::from_millis(15)), 0);
        assert_eq!(clock.advance(Duration::from_millis(15)), 1);
        assert_eq!(clock.advance(Duration::from_millis(10)), 1);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn clock_caps_catch_up() {
        let mut clock = FrameClock::new(50);
        assert_eq!(clock.advance(Duration::from_secs(5)), 10);
        // Backlog was dropped.
        assert_eq!(clock.advance(Duration::from_millis(1)), 0);
    }

    #[test]
    fn clock_zero_rate_is_clamped() {
        let clock = FrameClock::new(0);
        assert_eq!(clock.frame_duration(), Duration::from_secs(1));
    }

    #[test]
    fn clock_counts_direct_steps() {
        let mut clock = FrameClock::new(60);
        clock.count_frame();
        assert_eq!(clock.count_frame(), 2);
    }
}
