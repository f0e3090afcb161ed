// src/pilot.rs

//! # Pilot Intent
//!
//! Converts one snapshot of decoded pilot sticks into the rates, angles and
//! throttle the flight modes command. Every function here is a pure function
//! of the input snapshot and the configured limits, so the same sticks always
//! produce the same intent.
//!
//! Stick conventions: roll, pitch and yaw are normalized to `[-1, 1]`,
//! throttle to `[0, 1]` with mid stick at `0.5`. Out of range and NaN inputs
//! are clamped or replaced with the neutral value before use.

use crate::{Number, QuadPlaneConfig};

/// Descent rate commanded while the throttle channel is in failsafe, in cm/s.
const FAILSAFE_CLIMB_RATE_CMS: f32 = -50.0;

/// Decoded pilot input for one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PilotInput<T> {
    /// Roll stick, `[-1, 1]`, positive right.
    pub roll: T,
    /// Pitch stick, `[-1, 1]`, positive nose up.
    pub pitch: T,
    /// Rudder stick, `[-1, 1]`, positive clockwise.
    pub yaw: T,
    /// Throttle stick, `[0, 1]`.
    pub throttle: T,
    /// True while the throttle channel has lost signal.
    pub throttle_failsafe: bool,
}

/// Everything the flight modes need from the pilot for one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PilotIntent<T> {
    /// Desired roll angle in centidegrees.
    pub roll_cd: T,
    /// Desired pitch angle in centidegrees.
    pub pitch_cd: T,
    /// Desired yaw rate in centidegrees per second.
    pub yaw_rate_cds: T,
    /// Desired climb rate in cm/s.
    pub climb_rate_cms: T,
    /// Desired collective throttle, `[0, 1]`.
    pub throttle: T,
}

impl<T: Number> Default for PilotInput<T> {
    /// Centered sticks with the throttle at zero.
    fn default() -> Self {
        Self {
            roll: T::zero(),
            pitch: T::zero(),
            yaw: T::zero(),
            throttle: T::zero(),
            throttle_failsafe: false,
        }
    }
}

impl<T: Number> PilotIntent<T> {
    /// Derives the full intent from one input snapshot.
    pub fn from_input(input: &PilotInput<T>, config: &QuadPlaneConfig<T>) -> Self {
        let (roll_cd, pitch_cd) = desired_lean_angles_cd(input, config);
        Self {
            roll_cd,
            pitch_cd,
            yaw_rate_cds: desired_yaw_rate_cds(input, config),
            climb_rate_cms: desired_climb_rate_cms(input, config),
            throttle: desired_throttle(input),
        }
    }
}

impl<T: Number> Default for PilotIntent<T> {
    fn default() -> Self {
        Self {
            roll_cd: T::zero(),
            pitch_cd: T::zero(),
            yaw_rate_cds: T::zero(),
            climb_rate_cms: T::zero(),
            throttle: T::zero(),
        }
    }
}

pub(crate) fn unit_stick<T: Number>(value: T) -> T {
    value.or_if_invalid(T::zero()).clamp(-T::one(), T::one())
}

fn limit<T: Number>(value: T) -> T {
    value.or_if_invalid(T::zero()).magnitude()
}

/// Desired yaw rate in centidegrees per second.
pub fn desired_yaw_rate_cds<T: Number>(input: &PilotInput<T>, config: &QuadPlaneConfig<T>) -> T {
    let rate_max_cds = limit(config.yaw_rate_max_dps) * T::constant(100.0);
    unit_stick(input.yaw) * rate_max_cds
}

/// Desired climb rate in cm/s.
///
/// The throttle stick offset from mid stick, less the dead zone, is scaled to
/// `pilot_velocity_z_max`. The result always lies within
/// `[-pilot_velocity_z_max, pilot_velocity_z_max]`; a non-positive limit
/// yields zero.
pub fn desired_climb_rate_cms<T: Number>(input: &PilotInput<T>, config: &QuadPlaneConfig<T>) -> T {
    let velocity_max = config.pilot_velocity_z_max.or_if_invalid(T::zero());
    if !(velocity_max > T::zero()) {
        return T::zero();
    }

    if input.throttle_failsafe {
        return T::constant(FAILSAFE_CLIMB_RATE_CMS).clamp(-velocity_max, velocity_max);
    }

    let half = T::constant(0.5);
    let throttle = input.throttle.or_if_invalid(half).clamp(T::zero(), T::one());
    let dead_zone = limit(config.throttle_deadzone);
    let span = half - dead_zone;
    if !(span > T::zero()) {
        return T::zero();
    }

    let offset = throttle - half;
    let scaled = if offset > dead_zone {
        (offset - dead_zone) / span
    } else if offset < -dead_zone {
        (offset + dead_zone) / span
    } else {
        T::zero()
    };
    (scaled * velocity_max).clamp(-velocity_max, velocity_max)
}

/// Desired roll and pitch angles in centidegrees.
pub fn desired_lean_angles_cd<T: Number>(
    input: &PilotInput<T>,
    config: &QuadPlaneConfig<T>,
) -> (T, T) {
    let angle_max = limit(config.angle_max_cd);
    (
        unit_stick(input.roll) * angle_max,
        unit_stick(input.pitch) * angle_max,
    )
}

/// Desired collective throttle in `[0, 1]`.
pub fn desired_throttle<T: Number>(input: &PilotInput<T>) -> T {
    input
        .throttle
        .or_if_invalid(T::zero())
        .clamp(T::zero(), T::one())
}

/// Slew limiter keeping commanded climb rates within the pilot acceleration limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimbRateLimiter<T> {
    rate_cms: T,
}

impl<T: Number> Default for ClimbRateLimiter<T> {
    fn default() -> Self {
        Self::new(T::zero())
    }
}

impl<T: Number> ClimbRateLimiter<T> {
    /// Creates a limiter starting from `rate_cms`.
    pub fn new(rate_cms: T) -> Self {
        Self {
            rate_cms: rate_cms.or_if_invalid(T::zero()),
        }
    }

    /// Restarts the limiter from `rate_cms`.
    pub fn reset(&mut self, rate_cms: T) {
        *self = Self::new(rate_cms);
    }

    /// Last commanded climb rate.
    pub fn rate_cms(&self) -> T {
        self.rate_cms
    }

    /// Moves toward `target_cms` by no more than `accel_max * dt` and returns the new rate.
    pub fn apply(&mut self, target_cms: T, accel_max: T, dt: T) -> T {
        let step = limit(accel_max) * limit(dt);
        let target = target_cms.or_if_invalid(self.rate_cms);
        let delta = (target - self.rate_cms).clamp(-step, step);
        self.rate_cms = self.rate_cms + delta;
        self.rate_cms
    }
}
