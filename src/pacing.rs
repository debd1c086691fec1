//! Monotonic frame pacing.
//!
//! A render loop that sleeps a fixed amount per iteration drifts with the
//! cost of each frame. [`FramePacer`] schedules against absolute deadlines
//! instead: each frame sleeps only the remaining slice of its period, and a
//! loop that falls behind resynchronizes by skipping whole periods rather
//! than trying to catch up frame by frame.

use std::thread;
use std::time::{Duration, Instant};

pub struct FramePacer {
    period: Duration,
    deadline: Instant,
}

impl FramePacer {
    /// Creates a pacer targeting `target_fps` frames per second.
    ///
    /// # Panics
    ///
    /// Panics if `target_fps` is 0.
    pub fn new(target_fps: u32) -> FramePacer {
        assert!(target_fps > 0, "target_fps must be at least 1, got {}", target_fps);
        let period = Duration::from_secs(1) / target_fps;
        FramePacer {
            period,
            deadline: Instant::now() + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Blocks until the next frame deadline.
    ///
    /// Returns the number of whole periods that were skipped because the
    /// loop fell behind; 0 means the frame was on time.
    pub fn wait(&mut self) -> u32 {
        let now = Instant::now();
        let (sleep_for, next_deadline, skipped) = schedule(self.deadline, self.period, now);
        if let Some(sleep_for) = sleep_for {
            thread::sleep(sleep_for);
        }
        self.deadline = next_deadline;
        if skipped > 0 {
            log::debug!("frame loop fell behind, skipped {} period(s)", skipped);
        }
        skipped
    }
}

/// Returns how long to sleep (if at all), the next deadline, and the number
/// of whole periods skipped when `now` has already passed `deadline`.
fn schedule(deadline: Instant, period: Duration, now: Instant) -> (Option<Duration>, Instant, u32) {
    match deadline.checked_duration_since(now) {
        Some(remaining) => (Some(remaining), deadline + period, 0),
        None => {
            let behind = now.duration_since(deadline);
            let skipped = (behind.as_nanos() / period.as_nanos()) as u32;
            (None, deadline + period * (skipped + 1), skipped)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(10);

    #[test]
    fn on_time_frame_sleeps_the_remaining_slice() {
        let base = Instant::now();
        let deadline = base + PERIOD;
        let (sleep_for, next_deadline, skipped) = schedule(deadline, PERIOD, base + Duration::from_millis(3));
        assert_eq!(sleep_for, Some(Duration::from_millis(7)));
        assert_eq!(next_deadline, deadline + PERIOD);
        assert_eq!(skipped, 0);
    }

    #[test]
    fn late_frame_skips_whole_periods_without_sleeping() {
        let base = Instant::now();
        // 2.5 periods late: deadlines at +10ms and +20ms are gone
        let (sleep_for, next_deadline, skipped) = schedule(base, PERIOD, base + Duration::from_millis(25));
        assert_eq!(sleep_for, None);
        assert_eq!(skipped, 2);
        // the new deadline is the first one strictly after `now`
        assert_eq!(next_deadline, base + 3 * PERIOD);
    }

    #[test]
    fn exactly_on_deadline_does_not_skip() {
        let base = Instant::now();
        let (sleep_for, next_deadline, skipped) = schedule(base, PERIOD, base);
        assert_eq!(sleep_for, Some(Duration::from_millis(0)));
        assert_eq!(next_deadline, base + PERIOD);
        assert_eq!(skipped, 0);
    }

    #[test]
    fn pacer_period_matches_target_fps() {
        let pacer = FramePacer::new(50);
        assert_eq!(pacer.period(), Duration::from_millis(20));
    }
}
