// src/config.rs

//! Configuration for the transition core and the gains handed to its
//! collaborators.
//!
//! Both structures are owned by the vehicle-wide parameter store and passed in
//! explicitly. The core never reads parameters ambiently: a new
//! [`QuadPlaneConfig`] only takes effect at a cycle boundary, and
//! [`ControlGains`] are fixed for the lifetime of a [`crate::QuadPlane`].

use crate::{ConfigError, Number};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunable limits and thresholds for transitions and VTOL flight modes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuadPlaneConfig<T: Number> {
    /// Duration of the rotor throttle ramp-down once the airspeed threshold is met.
    pub transition_time_ms: i32,
    /// Airspeed at which the rotor ramp-down may begin, in m/s.
    pub transition_airspeed: T,
    /// Maximum climb or descent rate the pilot may request, in cm/s.
    pub pilot_velocity_z_max: T,
    /// Vertical acceleration the pilot may request, in cm/s/s.
    pub pilot_accel_z: T,
    /// Lean angle at full roll or pitch stick deflection, in centidegrees.
    pub angle_max_cd: T,
    /// Yaw rate at full rudder deflection, in degrees per second.
    pub yaw_rate_max_dps: T,
    /// Half width of the throttle dead zone around mid stick, as a fraction of full travel.
    pub throttle_deadzone: T,
    /// Control loop rate in Hz.
    pub loop_rate_hz: u16,
    /// Update rate requested from the motor output stage in Hz.
    pub motor_update_rate_hz: u16,
}

impl<T: Number> QuadPlaneConfig<T> {
    /// Creates a new configuration holding the stock quadplane defaults.
    ///
    /// Example Usage
    /// ```
    /// use vtol_transition::QuadPlaneConfig;
    ///
    /// let mut config = QuadPlaneConfig::<f32>::new();
    ///
    /// // Shorten the rotor ramp-down and raise the threshold airspeed.
    /// config.transition_time_ms = 3000;
    /// config.transition_airspeed = 15.0;
    ///
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new() -> Self {
        Self {
            transition_time_ms: 5000,
            transition_airspeed: T::constant(9.0),
            pilot_velocity_z_max: T::constant(250.0),
            pilot_accel_z: T::constant(250.0),
            angle_max_cd: T::constant(3000.0),
            yaw_rate_max_dps: T::constant(100.0),
            throttle_deadzone: T::constant(0.05),
            loop_rate_hz: 50,
            motor_update_rate_hz: 50,
        }
    }

    /// Checks the configuration for values the controllers cannot act on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transition_time_ms <= 0 {
            return Err(ConfigError::TransitionTimeNotPositive {
                value: self.transition_time_ms,
            });
        }
        if !positive(self.transition_airspeed) {
            return Err(ConfigError::AirspeedThresholdNotPositive);
        }
        if !positive(self.pilot_velocity_z_max) {
            return Err(ConfigError::VelocityLimitNotPositive);
        }
        if !positive(self.pilot_accel_z) {
            return Err(ConfigError::AccelLimitNotPositive);
        }
        if !positive(self.angle_max_cd) {
            return Err(ConfigError::AngleLimitNotPositive);
        }
        if !positive(self.yaw_rate_max_dps) {
            return Err(ConfigError::YawRateLimitNotPositive);
        }
        if self.loop_rate_hz == 0 {
            return Err(ConfigError::LoopRateZero);
        }
        let half = T::constant(0.5);
        if !(self.throttle_deadzone >= T::zero() && self.throttle_deadzone < half) {
            return Err(ConfigError::DeadzoneOutOfRange);
        }
        Ok(())
    }

    /// Control period in seconds, or zero when the loop rate is unset.
    pub fn dt(&self) -> T {
        match T::from_u16(self.loop_rate_hz) {
            Some(rate) if rate > T::zero() => T::one() / rate,
            _ => T::zero(),
        }
    }
}

fn positive<T: Number>(value: T) -> bool {
    value.is_valid() && value > T::zero()
}

impl<T: Number> Default for QuadPlaneConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// PID gains with an integrator limit and derivative filter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PidGains<T> {
    /// Proportional gain.
    pub kp: T,
    /// Integral gain.
    pub ki: T,
    /// Derivative gain.
    pub kd: T,
    /// Upper limit for the integral term.
    pub imax: T,
    /// Input filter cutoff in Hz.
    pub filt_hz: T,
}

/// Proportional-only gain.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PGains<T> {
    /// Proportional gain.
    pub kp: T,
}

/// Two axis PI gains.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PiGains<T> {
    /// Proportional gain.
    pub kp: T,
    /// Integral gain.
    pub ki: T,
    /// Upper limit for the integral term.
    pub imax: T,
    /// Input filter cutoff in Hz.
    pub filt_hz: T,
}

/// Gains for the multirotor attitude controller.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttitudeGains<T> {
    /// Roll rate loop.
    pub rate_roll: PidGains<T>,
    /// Pitch rate loop.
    pub rate_pitch: PidGains<T>,
    /// Yaw rate loop.
    pub rate_yaw: PidGains<T>,
    /// Roll angle stabilize loop.
    pub stabilize_roll: PGains<T>,
    /// Pitch angle stabilize loop.
    pub stabilize_pitch: PGains<T>,
    /// Yaw angle stabilize loop.
    pub stabilize_yaw: PGains<T>,
}

/// Gains for the multirotor position controller.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionGains<T> {
    /// Horizontal position to velocity.
    pub pos_xy: PGains<T>,
    /// Altitude error to climb rate.
    pub alt_hold: PGains<T>,
    /// Climb rate error to vertical acceleration.
    pub vel_z: PGains<T>,
    /// Vertical acceleration to throttle.
    pub accel_z: PidGains<T>,
    /// Horizontal velocity to lean angle.
    pub vel_xy: PiGains<T>,
}

/// Complete gain set for the VTOL collaborators.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlGains<T> {
    /// Attitude controller gains.
    pub attitude: AttitudeGains<T>,
    /// Position controller gains.
    pub position: PositionGains<T>,
}

impl<T: Number> ControlGains<T> {
    /// Creates the stock quadplane gain set.
    /// These should be replaced with values tuned for the airframe.
    pub fn new() -> Self {
        let rate = PidGains {
            kp: T::constant(0.15),
            ki: T::constant(0.1),
            kd: T::constant(0.004),
            imax: T::constant(2000.0),
            filt_hz: T::constant(20.0),
        };
        let stabilize = PGains {
            kp: T::constant(4.5),
        };
        Self {
            attitude: AttitudeGains {
                rate_roll: rate,
                rate_pitch: rate,
                rate_yaw: rate,
                stabilize_roll: stabilize,
                stabilize_pitch: stabilize,
                stabilize_yaw: stabilize,
            },
            position: PositionGains {
                pos_xy: PGains { kp: T::one() },
                alt_hold: PGains { kp: T::one() },
                vel_z: PGains {
                    kp: T::constant(5.0),
                },
                accel_z: PidGains {
                    kp: T::constant(0.5),
                    ki: T::one(),
                    kd: T::zero(),
                    imax: T::constant(800.0),
                    filt_hz: T::constant(20.0),
                },
                vel_xy: PiGains {
                    kp: T::one(),
                    ki: T::constant(0.5),
                    imax: T::constant(1000.0),
                    filt_hz: T::constant(5.0),
                },
            },
        }
    }
}

impl<T: Number> Default for ControlGains<T> {
    fn default() -> Self {
        Self::new()
    }
}
