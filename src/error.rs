// src/error.rs

//! Error and fault types.
//!
//! Configuration errors are reported when a parameter set is validated or
//! reloaded. Transition faults are conditions detected at cycle time; they
//! never abort a cycle and are surfaced to the caller as values.

use core::fmt;

/// Reasons a configuration is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `transition_time_ms` is zero or negative.
    TransitionTimeNotPositive {
        /// Offending value in milliseconds.
        value: i32,
    },
    /// `pilot_velocity_z_max` is zero or negative.
    VelocityLimitNotPositive,
    /// `pilot_accel_z` is zero or negative.
    AccelLimitNotPositive,
    /// `transition_airspeed` is zero, negative or not finite.
    AirspeedThresholdNotPositive,
    /// `angle_max_cd` is zero, negative or not finite.
    AngleLimitNotPositive,
    /// `yaw_rate_max_dps` is zero, negative or not finite.
    YawRateLimitNotPositive,
    /// `loop_rate_hz` is zero.
    LoopRateZero,
    /// `throttle_deadzone` is outside `[0, 0.5)`.
    DeadzoneOutOfRange,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TransitionTimeNotPositive { value } => {
                write!(f, "Transition time must be positive, got {} ms", value)
            }
            ConfigError::VelocityLimitNotPositive => {
                write!(f, "Pilot vertical velocity limit must be positive")
            }
            ConfigError::AccelLimitNotPositive => {
                write!(f, "Pilot vertical acceleration limit must be positive")
            }
            ConfigError::AirspeedThresholdNotPositive => {
                write!(f, "Transition airspeed threshold must be positive")
            }
            ConfigError::AngleLimitNotPositive => write!(f, "Lean angle limit must be positive"),
            ConfigError::YawRateLimitNotPositive => write!(f, "Yaw rate limit must be positive"),
            ConfigError::LoopRateZero => write!(f, "Loop rate must be non-zero"),
            ConfigError::DeadzoneOutOfRange => {
                write!(f, "Throttle dead zone must be within [0, 0.5)")
            }
        }
    }
}

/// Conditions that hold the transition in place instead of advancing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransitionFault {
    /// The estimator has no valid airspeed; the airspeed wait is held.
    AirspeedUnavailable,
    /// The configured transition time is not positive; the timer is never started.
    InvalidTransitionTime,
    /// The configured airspeed threshold is not a positive finite value; the
    /// timer is never started.
    InvalidAirspeedThreshold,
}

impl fmt::Display for TransitionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionFault::AirspeedUnavailable => write!(f, "Airspeed unavailable"),
            TransitionFault::InvalidTransitionTime => write!(f, "Invalid transition time"),
            TransitionFault::InvalidAirspeedThreshold => {
                write!(f, "Invalid transition airspeed threshold")
            }
        }
    }
}
