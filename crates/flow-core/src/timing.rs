//! Tick gating: the time policy applied to every action before its `tick`.
//!
//! The policy is uniform across action variants. Variants decide when they are
//! done; this module alone decides when they are allowed to tick and with which
//! delta.

use crate::settings::ActionSettings;

/// Host simulation state sampled once per driver tick pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Clock {
    pub host_paused: bool,
    pub time_dilation: f32,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            host_paused: false,
            time_dilation: 1.0,
        }
    }
}

/// Engine-side timing accumulators of one action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Timing {
    /// Dilated time accrued since the first delay ran out.
    pub elapsed: f32,
    /// Remaining first delay. The first tick is held back while positive.
    pub first_delay_left: f32,
    /// Interval accumulator, only used with tick-interval batching.
    pub accumulated: f32,
    /// Declared maximum lifetime, `0` when the action has none.
    pub max_time: f32,
    pub first_tick_pending: bool,
}

impl Timing {
    pub(crate) fn new(settings: &ActionSettings) -> Self {
        Self {
            elapsed: 0.0,
            first_delay_left: settings.first_delay.max(0.0),
            accumulated: 0.0,
            max_time: 0.0,
            first_tick_pending: true,
        }
    }

    /// Rewinds the accumulators. The declared maximum lifetime survives.
    pub(crate) fn rewind(&mut self, settings: &ActionSettings) {
        let max_time = self.max_time;
        *self = Self::new(settings);
        self.max_time = max_time;
    }

    /// Advances the timers by one frame and returns the delta to tick with, or
    /// `None` when the action must not tick this frame.
    pub(crate) fn advance(
        &mut self,
        raw_delta: f32,
        settings: &ActionSettings,
        paused: bool,
        clock: Clock,
    ) -> Option<f32> {
        if paused {
            return None;
        }
        if clock.host_paused && !settings.ignore_pause {
            return None;
        }

        let delta = if settings.ignore_time_dilation {
            raw_delta
        } else {
            raw_delta * clock.time_dilation
        };

        if self.first_delay_left > 0.0 {
            self.first_delay_left -= delta;
            return None;
        }

        self.elapsed += delta;

        if self.max_time > 0.0 && self.elapsed >= self.max_time {
            // Final tick. With batching it carries everything accumulated so far
            // and the accumulator is left as is.
            self.first_tick_pending = false;
            if settings.has_tick_interval() {
                self.accumulated += delta;
                return Some(self.accumulated);
            }
            return Some(delta);
        }

        if self.first_tick_pending {
            self.first_tick_pending = false;
            return Some(delta);
        }

        if settings.has_tick_interval() {
            self.accumulated += delta;
            if self.accumulated >= settings.tick_interval {
                self.accumulated = 0.0;
                return Some(settings.tick_interval);
            }
            return None;
        }

        Some(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(timing: &mut Timing, settings: &ActionSettings, deltas: &[f32]) -> Vec<Option<f32>> {
        deltas
            .iter()
            .map(|&dt| timing.advance(dt, settings, false, Clock::default()))
            .collect()
    }

    #[test]
    fn ticks_every_frame_without_interval() {
        let settings = ActionSettings::default();
        let mut timing = Timing::new(&settings);
        assert_eq!(
            run(&mut timing, &settings, &[0.1, 0.2, 0.3]),
            vec![Some(0.1), Some(0.2), Some(0.3)]
        );
        assert!((timing.elapsed - 0.6).abs() < 1e-6);
    }

    #[test]
    fn first_tick_ignores_interval() {
        let settings = ActionSettings::tick_interval(5.0);
        let mut timing = Timing::new(&settings);
        assert_eq!(run(&mut timing, &settings, &[0.1]), vec![Some(0.1)]);
    }

    #[test]
    fn interval_excess_is_discarded() {
        let settings = ActionSettings::tick_interval(1.0);
        let mut timing = Timing::new(&settings);
        let fired = run(&mut timing, &settings, &[0.4; 7]);

        assert_eq!(
            fired,
            vec![
                Some(0.4), // first tick
                None,
                None,
                Some(1.0), // 1.2 accumulated, 0.2 dropped
                None,
                None,
                Some(1.0), // would be one frame earlier if the 0.2 carried over
            ]
        );
    }

    #[test]
    fn first_delay_is_consumed_silently() {
        let settings = ActionSettings::delay_first(1.0);
        let mut timing = Timing::new(&settings);
        let fired = run(&mut timing, &settings, &[0.5, 0.6, 0.1]);

        assert_eq!(fired, vec![None, None, Some(0.1)]);
        assert!((timing.elapsed - 0.1).abs() < 1e-6);
    }

    #[test]
    fn pause_and_host_pause_stop_time() {
        let settings = ActionSettings::default();
        let mut timing = Timing::new(&settings);
        let host_paused = Clock {
            host_paused: true,
            time_dilation: 1.0,
        };

        assert_eq!(timing.advance(1.0, &settings, true, Clock::default()), None);
        assert_eq!(timing.advance(1.0, &settings, false, host_paused), None);
        assert_eq!(timing.elapsed, 0.0);

        let ignoring = ActionSettings::ignore_pause();
        assert_eq!(timing.advance(1.0, &ignoring, false, host_paused), Some(1.0));
    }

    #[test]
    fn dilation_scales_unless_ignored() {
        let clock = Clock {
            host_paused: false,
            time_dilation: 0.5,
        };
        let settings = ActionSettings::default();
        let mut timing = Timing::new(&settings);
        assert_eq!(timing.advance(1.0, &settings, false, clock), Some(0.5));

        let raw = ActionSettings::ignore_time_dilation();
        let mut timing = Timing::new(&raw);
        assert_eq!(timing.advance(1.0, &raw, false, clock), Some(1.0));
    }

    #[test]
    fn max_time_final_tick_uses_accumulated_time() {
        let settings = ActionSettings::tick_interval(1.0);
        let mut timing = Timing::new(&settings);
        timing.max_time = 2.5;

        let fired = run(&mut timing, &settings, &[0.6, 0.6, 0.6, 0.6, 0.6]);
        // first tick, accumulate 0.6, fire interval at 1.2, accumulate 0.6,
        // then elapsed 3.0 >= 2.5: final tick with 0.6 + 0.6 = 1.2
        assert_eq!(fired[0], Some(0.6));
        assert_eq!(fired[1], None);
        assert_eq!(fired[2], Some(1.0));
        assert_eq!(fired[3], None);
        assert!((fired[4].unwrap() - 1.2).abs() < 1e-6);

        // Past the max time the accumulator keeps growing: it is not re-armed.
        let next = timing.advance(0.6, &settings, false, Clock::default());
        assert!((next.unwrap() - 1.8).abs() < 1e-6);
    }

    #[test]
    fn max_time_without_interval_ticks_raw_delta() {
        let settings = ActionSettings::default();
        let mut timing = Timing::new(&settings);
        timing.max_time = 1.0;
        assert_eq!(run(&mut timing, &settings, &[0.7, 0.7]), vec![Some(0.7), Some(0.7)]);
    }

    #[test]
    fn rewind_keeps_max_time() {
        let settings = ActionSettings::delay_first(0.5);
        let mut timing = Timing::new(&settings);
        timing.max_time = 3.0;
        run(&mut timing, &settings, &[1.0, 1.0]);

        timing.rewind(&settings);
        assert_eq!(timing.elapsed, 0.0);
        assert_eq!(timing.first_delay_left, 0.5);
        assert!(timing.first_tick_pending);
        assert_eq!(timing.max_time, 3.0);
    }
}
