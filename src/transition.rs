// src/transition.rs

//! # VTOL to Fixed-Wing Transition State Machine
//!
//! Tracks the handoff of thrust authority from the lift rotors to the wing.
//! The handoff waits for the airspeed threshold, then ramps the rotors down
//! over a bounded timer, then leaves the wing with full authority.
//!
//! ```text
//!   AirspeedWait --(airspeed >= threshold)--> Timer --(elapsed >= duration)--> Done
//!        ^                                                                      |
//!        +------------------------- reset (explicit) ---------------------------+
//! ```
//!
//! [`Transition::next`] is a pure function of the current value and a
//! [`TransitionInput`]; it issues no commands. The actuator side of the
//! transition lives in [`crate::QuadPlane::update_transition`].

use crate::{Number, TransitionFault};
use core::fmt;

/// Phase of the rotor to wing handoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransitionState {
    /// Rotors hold hover while forward airspeed builds.
    #[default]
    AirspeedWait,
    /// Airspeed reached; rotor throttle ramps down until the timer expires.
    Timer,
    /// Handoff complete; rotors quiesced.
    Done,
}

impl fmt::Display for TransitionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionState::AirspeedWait => write!(f, "AirspeedWait"),
            TransitionState::Timer => write!(f, "Timer"),
            TransitionState::Done => write!(f, "Done"),
        }
    }
}

/// Bounded timer for the rotor ramp-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransitionTimer {
    /// Timestamp of the cycle that met the airspeed threshold.
    pub start_ms: u32,
    /// Ramp duration captured when the timer started.
    pub duration_ms: u32,
}

impl TransitionTimer {
    /// Milliseconds since the timer started, tolerant of clock wrap.
    pub fn elapsed_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.start_ms)
    }

    /// True once the full duration has elapsed.
    pub fn expired(&self, now_ms: u32) -> bool {
        self.elapsed_ms(now_ms) >= self.duration_ms
    }

    /// Fraction of the duration still to run, in `[0, 1]`, at a resolution of
    /// one part in a thousand.
    ///
    /// The ratio is formed in integers so durations wider than `T` can hold
    /// still ramp smoothly.
    pub fn remaining_fraction<T: Number>(&self, now_ms: u32) -> T {
        if self.duration_ms == 0 {
            return T::zero();
        }
        let remaining = self.duration_ms.saturating_sub(self.elapsed_ms(now_ms));
        let permille = u64::from(remaining) * 1000 / u64::from(self.duration_ms);
        T::from_millis(permille as u32) / T::from_millis(1000)
    }
}

/// Readings and parameters consumed by one transition step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionInput<T> {
    /// Timestamp of the current cycle.
    pub now_ms: u32,
    /// Airspeed estimate in m/s, `None` when invalid.
    pub airspeed: Option<T>,
    /// Airspeed at which the timer starts, in m/s. Must be positive and finite.
    pub threshold: T,
    /// Configured ramp duration. Non-positive values never start the timer.
    pub transition_time_ms: i32,
}

/// Transition state plus the bookkeeping that goes with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    state: TransitionState,
    timer: TransitionTimer,
    fault: Option<TransitionFault>,
}

impl Transition {
    /// Creates a transition waiting for airspeed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// Ramp timer, meaningful only while in [`TransitionState::Timer`].
    pub fn timer(&self) -> Option<TransitionTimer> {
        match self.state {
            TransitionState::Timer => Some(self.timer),
            _ => None,
        }
    }

    /// Condition currently holding the transition in place, if any.
    pub fn fault(&self) -> Option<TransitionFault> {
        self.fault
    }

    /// Returns to [`TransitionState::AirspeedWait`] and clears any fault.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Forces completion, used when the rotors must stay off.
    pub fn finish(&mut self) {
        self.state = TransitionState::Done;
        self.fault = None;
    }

    /// Computes the transition after one cycle with the given input.
    pub fn next<T: Number>(&self, input: &TransitionInput<T>) -> Self {
        match self.state {
            TransitionState::AirspeedWait => {
                if input.transition_time_ms <= 0 {
                    return self.held(TransitionFault::InvalidTransitionTime);
                }
                if !(input.threshold.is_valid() && input.threshold > T::zero()) {
                    return self.held(TransitionFault::InvalidAirspeedThreshold);
                }
                let airspeed = match input.airspeed {
                    Some(airspeed) if airspeed.is_valid() => airspeed,
                    _ => return self.held(TransitionFault::AirspeedUnavailable),
                };
                if airspeed >= input.threshold {
                    Self {
                        state: TransitionState::Timer,
                        timer: TransitionTimer {
                            start_ms: input.now_ms,
                            duration_ms: input.transition_time_ms.unsigned_abs(),
                        },
                        fault: None,
                    }
                } else {
                    Self {
                        fault: None,
                        ..*self
                    }
                }
            }
            TransitionState::Timer => {
                if self.timer.expired(input.now_ms) {
                    Self {
                        state: TransitionState::Done,
                        fault: None,
                        ..*self
                    }
                } else {
                    *self
                }
            }
            TransitionState::Done => *self,
        }
    }

    /// Share of lift still owed by the rotors: one while waiting for airspeed,
    /// ramping to zero over the timer, zero once done.
    pub fn blend<T: Number>(&self, now_ms: u32) -> T {
        match self.state {
            TransitionState::AirspeedWait => T::one(),
            TransitionState::Timer => self.timer.remaining_fraction(now_ms),
            TransitionState::Done => T::zero(),
        }
    }

    fn held(&self, fault: TransitionFault) -> Self {
        Self {
            fault: Some(fault),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use fixed::types::I16F16;

    fn input(now_ms: u32, airspeed: Option<f32>) -> TransitionInput<f32> {
        TransitionInput {
            now_ms,
            airspeed,
            threshold: 18.0,
            transition_time_ms: 5000,
        }
    }

    /// Test that the state holds while airspeed stays below the threshold.
    #[test]
    fn test_transition_waits_below_threshold() {
        let mut transition = Transition::new();
        for (i, airspeed) in [0.0, 5.0, 10.0, 17.99].iter().enumerate() {
            transition = transition.next(&input(i as u32 * 1000, Some(*airspeed)));
            assert_eq!(TransitionState::AirspeedWait, transition.state());
            assert_eq!(None, transition.timer());
        }
    }

    /// Test that the timer starts on the cycle that observes the threshold.
    #[test]
    fn test_transition_starts_timer_at_threshold() {
        let transition = Transition::new().next(&input(1234, Some(18.0)));
        assert_eq!(TransitionState::Timer, transition.state());
        assert_eq!(
            Some(TransitionTimer {
                start_ms: 1234,
                duration_ms: 5000
            }),
            transition.timer()
        );
    }

    /// Test the timer boundary: no earlier than the duration, and on the first cycle past it.
    #[test]
    fn test_transition_timer_boundary() {
        let mut transition = Transition::new().next(&input(1000, Some(20.0)));
        transition = transition.next(&input(5999, Some(20.0)));
        assert_eq!(TransitionState::Timer, transition.state());
        transition = transition.next(&input(6000, Some(20.0)));
        assert_eq!(TransitionState::Done, transition.state());
    }

    /// Test that the timer does not depend on airspeed once running.
    #[test]
    fn test_transition_timer_ignores_airspeed() {
        let mut transition = Transition::new().next(&input(0, Some(20.0)));
        transition = transition.next(&input(1000, None));
        assert_eq!(TransitionState::Timer, transition.state());
        assert_eq!(None, transition.fault());
        transition = transition.next(&input(5000, Some(2.0)));
        assert_eq!(TransitionState::Done, transition.state());
    }

    /// Test that completion is terminal until reset.
    #[test]
    fn test_transition_done_is_terminal() {
        let mut transition = Transition::new().next(&input(0, Some(20.0)));
        transition = transition.next(&input(5000, Some(20.0)));
        assert_eq!(TransitionState::Done, transition.state());
        for t in 6..20 {
            transition = transition.next(&input(t * 1000, Some(0.0)));
            assert_eq!(TransitionState::Done, transition.state());
        }
        transition.reset();
        assert_eq!(TransitionState::AirspeedWait, transition.state());
    }

    /// Test that missing or NaN airspeed holds the wait and raises a fault.
    #[test]
    fn test_transition_invalid_airspeed_holds() {
        let mut transition = Transition::new();
        for t in 0..10 {
            transition = transition.next(&input(t * 1000, None));
            assert_eq!(TransitionState::AirspeedWait, transition.state());
            assert_eq!(Some(TransitionFault::AirspeedUnavailable), transition.fault());
        }
        transition = transition.next(&input(11_000, Some(f32::NAN)));
        assert_eq!(TransitionState::AirspeedWait, transition.state());
        assert_eq!(Some(TransitionFault::AirspeedUnavailable), transition.fault());

        // Fault clears once a valid reading returns.
        transition = transition.next(&input(12_000, Some(3.0)));
        assert_eq!(None, transition.fault());
    }

    /// Test that an infinite airspeed reading is treated as unavailable.
    #[test]
    fn test_transition_infinite_airspeed_holds() {
        for airspeed in [f32::INFINITY, f32::NEG_INFINITY] {
            let transition = Transition::new().next(&input(1000, Some(airspeed)));
            assert_eq!(TransitionState::AirspeedWait, transition.state());
            assert_eq!(Some(TransitionFault::AirspeedUnavailable), transition.fault());
        }
    }

    /// Test that a non-positive or non-finite threshold never starts the timer.
    #[test]
    fn test_transition_invalid_threshold_never_starts() {
        for threshold in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let step = TransitionInput {
                threshold,
                ..input(1000, Some(0.0))
            };
            let transition = Transition::new().next(&step);
            assert_eq!(TransitionState::AirspeedWait, transition.state());
            assert_eq!(
                Some(TransitionFault::InvalidAirspeedThreshold),
                transition.fault()
            );
        }
    }

    /// Test that the ramp fraction holds up for durations wider than the scalar.
    #[test]
    fn test_transition_long_ramp_fixed_point() {
        let timer = TransitionTimer {
            start_ms: 0,
            duration_ms: 60_000,
        };
        assert_eq!(I16F16::from_num(1), timer.remaining_fraction::<I16F16>(0));
        let half = timer.remaining_fraction::<I16F16>(30_000).to_num::<f32>();
        assert!((0.5 - half).abs() < 1e-3, "Fraction should be 0.5, got {}", half);
        assert_eq!(I16F16::from_num(0), timer.remaining_fraction::<I16F16>(60_000));
    }

    /// Test that a non-positive transition time never starts the timer.
    #[test]
    fn test_transition_invalid_time_never_starts() {
        let mut transition = Transition::new();
        for time in [0, -1, -5000] {
            let step = TransitionInput {
                transition_time_ms: time,
                ..input(1000, Some(30.0))
            };
            transition = transition.next(&step);
            assert_eq!(TransitionState::AirspeedWait, transition.state());
            assert_eq!(
                Some(TransitionFault::InvalidTransitionTime),
                transition.fault()
            );
        }
    }

    /// Test that the ramp timer survives a wrap of the millisecond clock.
    #[test]
    fn test_transition_timer_wraps() {
        let start = u32::MAX - 1000;
        let mut transition = Transition::new().next(&input(start, Some(20.0)));
        transition = transition.next(&input(start.wrapping_add(3000), Some(20.0)));
        assert_eq!(TransitionState::Timer, transition.state());
        transition = transition.next(&input(start.wrapping_add(5000), Some(20.0)));
        assert_eq!(TransitionState::Done, transition.state());
    }

    /// Test the blend factor across the handoff.
    #[test]
    fn test_transition_blend() {
        let mut transition = Transition::new();
        assert!(value_close(1.0, transition.blend::<f32>(0)));
        transition = transition.next(&input(1000, Some(20.0)));
        assert!(value_close(1.0, transition.blend::<f32>(1000)));
        assert!(value_close(0.5, transition.blend::<f32>(3500)));
        assert!(value_close(0.0, transition.blend::<f32>(7000)));
        transition = transition.next(&input(6000, Some(20.0)));
        assert!(value_close(0.0, transition.blend::<f32>(6000)));
    }

    /// Test that forcing completion clears the fault.
    #[test]
    fn test_transition_finish() {
        let mut transition = Transition::new().next(&input(0, None));
        transition.finish();
        assert_eq!(TransitionState::Done, transition.state());
        assert_eq!(None, transition.fault());
    }
}
