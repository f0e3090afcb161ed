// src/collaborator.rs

//! Capability interfaces for the components the transition core drives.
//!
//! The core owns one handle of each kind and calls into them once per cycle.
//! Their control laws live elsewhere; these traits only carry the commands the
//! core issues and the readings it consumes. Substituting any of them (for
//! example with a recording double in tests) requires no change to the core.

use crate::{AttitudeGains, Number, PositionGains};

/// Earth frame attitude target: lean angles plus a yaw rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttitudeTarget<T> {
    /// Desired roll angle in centidegrees.
    pub roll_cd: T,
    /// Desired pitch angle in centidegrees.
    pub pitch_cd: T,
    /// Desired yaw rate in centidegrees per second.
    pub yaw_rate_cds: T,
}

/// Snapshot of the estimated vehicle state for one control cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState<T> {
    /// Time of the snapshot in milliseconds since boot. Wraps.
    pub time_ms: u32,
    /// Roll, pitch, yaw in centidegrees.
    pub attitude_cd: (T, T, T),
    /// North, east, down velocity in cm/s.
    pub velocity_cms: (T, T, T),
    /// North, east offset from home in cm.
    pub position_cm: (T, T),
    /// Altitude above home in cm.
    pub altitude_cm: T,
    /// Climb rate in cm/s, positive up.
    pub climb_rate_cms: T,
    /// Airspeed estimate in m/s, `None` when no valid estimate exists.
    pub airspeed: Option<T>,
    /// Ground speed limit imposed by the estimator in cm/s.
    pub ground_speed_limit_cms: T,
    /// Scaler applied to the navigation velocity gains by the estimator.
    pub nav_gain_scaler: T,
}

impl<T: Number> Default for AttitudeTarget<T> {
    fn default() -> Self {
        Self {
            roll_cd: T::zero(),
            pitch_cd: T::zero(),
            yaw_rate_cds: T::zero(),
        }
    }
}

impl<T: Number> Default for VehicleState<T> {
    fn default() -> Self {
        Self {
            time_ms: 0,
            attitude_cd: (T::zero(), T::zero(), T::zero()),
            velocity_cms: (T::zero(), T::zero(), T::zero()),
            position_cm: (T::zero(), T::zero()),
            altitude_cm: T::zero(),
            climb_rate_cms: T::zero(),
            airspeed: None,
            ground_speed_limit_cms: T::zero(),
            nav_gain_scaler: T::one(),
        }
    }
}

/// Multirotor attitude controller.
pub trait AttitudeControl<T: Number> {
    /// Loads the gain set. Called once from [`crate::QuadPlane::setup`].
    fn configure(&mut self, gains: &AttitudeGains<T>);

    /// Resets rate integrators and aligns targets with the current attitude.
    fn relax(&mut self);

    /// Commands an earth frame attitude target, smoothing the lean angles with `smoothing_gain`.
    fn angle_rate_yaw_smooth(&mut self, target: AttitudeTarget<T>, smoothing_gain: T);

    /// Commands an earth frame attitude target without smoothing.
    fn angle_rate_yaw(&mut self, target: AttitudeTarget<T>);

    /// Sets the collective throttle, in `[0, 1]`.
    fn set_throttle_out(&mut self, throttle: T);
}

/// Multirotor position and climb rate controller.
pub trait PositionControl<T: Number> {
    /// Loads the gain set. Called once from [`crate::QuadPlane::setup`].
    fn configure(&mut self, gains: &PositionGains<T>);

    /// Limits the vertical speed; `down_cms` is negative.
    fn set_speed_z(&mut self, down_cms: T, up_cms: T);

    /// Limits the vertical acceleration.
    fn set_accel_z(&mut self, accel_cmss: T);

    /// Resets the vertical controller to hold `altitude_cm` while moving at `climb_rate_cms`.
    fn init_z(&mut self, altitude_cm: T, climb_rate_cms: T);

    /// Advances the altitude target by `climb_rate_cms` over `dt` seconds.
    fn set_alt_target_from_climb_rate(&mut self, climb_rate_cms: T, dt: T);

    /// Runs the vertical controller, producing a throttle for the attitude controller.
    fn update_z_controller(&mut self);
}

/// Horizontal loiter navigator.
pub trait WaypointNav<T: Number> {
    /// Sets the loiter target to the current position.
    fn init_loiter_target(&mut self);

    /// Feeds normalized pilot roll and pitch as a desired horizontal acceleration.
    fn set_pilot_desired_acceleration(&mut self, roll: T, pitch: T);

    /// Runs the loiter controller.
    fn update_loiter(&mut self, ground_speed_limit_cms: T, nav_gain_scaler: T);

    /// Roll angle requested by the navigator in centidegrees.
    fn roll_cd(&self) -> T;

    /// Pitch angle requested by the navigator in centidegrees.
    fn pitch_cd(&self) -> T;
}

/// Inertial state estimator.
pub trait StateEstimator<T: Number> {
    /// Latest state snapshot.
    fn state(&self) -> VehicleState<T>;
}

/// Motor mixer and output stage for the lift rotors.
pub trait MotorOutput<T: Number> {
    /// Arms or disarms the rotors.
    fn set_armed(&mut self, armed: bool);

    /// Sets the output update rate in Hz.
    fn set_update_rate(&mut self, hz: u16);

    /// Sends the mixed output of the attitude controller to the rotors.
    fn output(&mut self);

    /// Holds every rotor at minimum output.
    fn output_min(&mut self);

    /// Throttle most recently sent to the rotors, in `[0, 1]`.
    fn throttle(&self) -> T;
}
