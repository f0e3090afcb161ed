// src/test_utils.rs

//! This module contains utilities for testing: float comparison and recording
//! doubles for every collaborator the quadplane core drives.

use crate::{
    AttitudeControl, AttitudeGains, AttitudeTarget, Collaborators, MotorOutput, Number,
    PositionControl, PositionGains, QuadPlane, QuadPlaneConfig, StateEstimator, VehicleState,
    WaypointNav,
};
use fixed::types::I16F16;

/// A constant defining the tolerance within which floating-point values
/// are considered close enough to be equal.
pub const TEST_TOLERANCE: f32 = 1e-5;

/// Checks if two floating point numbers are close enough to be considered
/// equal.
///
/// # Arguments
/// * `target` - The target value.
/// * `value` - The value to compare against the target.
///
/// # Returns
/// `true` if the absolute difference between `target` and `value` is less than
/// `TEST_TOLERANCE`, otherwise `false`.
pub fn value_close(target: f32, value: f32) -> bool {
    (target - value).abs() < TEST_TOLERANCE
}

/// Attitude controller double recording every call.
#[derive(Debug)]
pub struct RecordingAttitude<T = f32> {
    pub configure_calls: usize,
    pub last_gains: Option<AttitudeGains<T>>,
    pub relax_calls: usize,
    pub smooth_calls: usize,
    pub direct_calls: usize,
    pub last_target: AttitudeTarget<T>,
    pub last_smoothing: T,
    pub throttle_calls: usize,
    pub last_throttle: T,
}

impl<T: Number> Default for RecordingAttitude<T> {
    fn default() -> Self {
        Self {
            configure_calls: 0,
            last_gains: None,
            relax_calls: 0,
            smooth_calls: 0,
            direct_calls: 0,
            last_target: AttitudeTarget::default(),
            last_smoothing: T::zero(),
            throttle_calls: 0,
            last_throttle: T::zero(),
        }
    }
}

impl<T: Number> AttitudeControl<T> for RecordingAttitude<T> {
    fn configure(&mut self, gains: &AttitudeGains<T>) {
        self.configure_calls += 1;
        self.last_gains = Some(*gains);
    }

    fn relax(&mut self) {
        self.relax_calls += 1;
    }

    fn angle_rate_yaw_smooth(&mut self, target: AttitudeTarget<T>, smoothing_gain: T) {
        self.smooth_calls += 1;
        self.last_target = target;
        self.last_smoothing = smoothing_gain;
    }

    fn angle_rate_yaw(&mut self, target: AttitudeTarget<T>) {
        self.direct_calls += 1;
        self.last_target = target;
    }

    fn set_throttle_out(&mut self, throttle: T) {
        self.throttle_calls += 1;
        self.last_throttle = throttle;
    }
}

/// Position controller double recording every call.
#[derive(Debug, Default)]
pub struct RecordingPosition<T = f32> {
    pub configure_calls: usize,
    pub speed_z_calls: usize,
    pub last_speed_z: (T, T),
    pub last_accel_z: T,
    pub init_z_calls: usize,
    pub last_init_z: (T, T),
    pub climb_calls: usize,
    pub last_climb_rate: T,
    pub last_dt: T,
    pub update_z_calls: usize,
}

impl<T: Number> PositionControl<T> for RecordingPosition<T> {
    fn configure(&mut self, _gains: &PositionGains<T>) {
        self.configure_calls += 1;
    }

    fn set_speed_z(&mut self, down_cms: T, up_cms: T) {
        self.speed_z_calls += 1;
        self.last_speed_z = (down_cms, up_cms);
    }

    fn set_accel_z(&mut self, accel_cmss: T) {
        self.last_accel_z = accel_cmss;
    }

    fn init_z(&mut self, altitude_cm: T, climb_rate_cms: T) {
        self.init_z_calls += 1;
        self.last_init_z = (altitude_cm, climb_rate_cms);
    }

    fn set_alt_target_from_climb_rate(&mut self, climb_rate_cms: T, dt: T) {
        self.climb_calls += 1;
        self.last_climb_rate = climb_rate_cms;
        self.last_dt = dt;
    }

    fn update_z_controller(&mut self) {
        self.update_z_calls += 1;
    }
}

/// Navigator double returning fixed lean angles.
#[derive(Debug)]
pub struct RecordingNav<T = f32> {
    pub init_calls: usize,
    pub last_pilot_accel: (T, T),
    pub update_calls: usize,
    pub last_limits: (T, T),
    pub roll_cd: T,
    pub pitch_cd: T,
}

impl<T: Number> Default for RecordingNav<T> {
    fn default() -> Self {
        Self {
            init_calls: 0,
            last_pilot_accel: (T::zero(), T::zero()),
            update_calls: 0,
            last_limits: (T::zero(), T::zero()),
            roll_cd: T::constant(420.0),
            pitch_cd: T::constant(-310.0),
        }
    }
}

impl<T: Number> WaypointNav<T> for RecordingNav<T> {
    fn init_loiter_target(&mut self) {
        self.init_calls += 1;
    }

    fn set_pilot_desired_acceleration(&mut self, roll: T, pitch: T) {
        self.last_pilot_accel = (roll, pitch);
    }

    fn update_loiter(&mut self, ground_speed_limit_cms: T, nav_gain_scaler: T) {
        self.update_calls += 1;
        self.last_limits = (ground_speed_limit_cms, nav_gain_scaler);
    }

    fn roll_cd(&self) -> T {
        self.roll_cd
    }

    fn pitch_cd(&self) -> T {
        self.pitch_cd
    }
}

/// Estimator double returning whatever state the test scripts.
#[derive(Debug)]
pub struct ScriptedEstimator<T = f32> {
    pub state: VehicleState<T>,
}

impl<T: Number> Default for ScriptedEstimator<T> {
    fn default() -> Self {
        Self {
            state: VehicleState::default(),
        }
    }
}

impl<T: Number> StateEstimator<T> for ScriptedEstimator<T> {
    fn state(&self) -> VehicleState<T> {
        self.state
    }
}

/// Motor output double. `throttle` plays the part of the mixer's output.
#[derive(Debug, Default)]
pub struct RecordingMotors<T = f32> {
    pub armed: bool,
    pub set_armed_calls: usize,
    pub update_rate_hz: u16,
    pub output_calls: usize,
    pub output_min_calls: usize,
    pub throttle: T,
}

impl<T: Number> MotorOutput<T> for RecordingMotors<T> {
    fn set_armed(&mut self, armed: bool) {
        self.set_armed_calls += 1;
        self.armed = armed;
    }

    fn set_update_rate(&mut self, hz: u16) {
        self.update_rate_hz = hz;
    }

    fn output(&mut self) {
        self.output_calls += 1;
    }

    fn output_min(&mut self) {
        self.output_min_calls += 1;
    }

    fn throttle(&self) -> T {
        self.throttle
    }
}

/// Quadplane wired to the recording doubles.
pub type TestPlane = QuadPlane<
    f32,
    RecordingAttitude,
    RecordingPosition,
    RecordingNav,
    ScriptedEstimator,
    RecordingMotors,
>;

/// Quadplane on the `I16F16` fixed point type, wired to the recording doubles.
pub type FixedPlane = QuadPlane<
    I16F16,
    RecordingAttitude<I16F16>,
    RecordingPosition<I16F16>,
    RecordingNav<I16F16>,
    ScriptedEstimator<I16F16>,
    RecordingMotors<I16F16>,
>;

/// Builds a disarmed [`TestPlane`] with stock gains.
pub fn test_plane(config: QuadPlaneConfig<f32>) -> TestPlane {
    QuadPlane::new(Collaborators::default(), config, Default::default())
}

/// Builds a disarmed [`FixedPlane`] with stock gains.
pub fn fixed_plane(config: QuadPlaneConfig<I16F16>) -> FixedPlane {
    QuadPlane::new(Collaborators::default(), config, Default::default())
}

/// Total number of commands issued to any collaborator, excluding arm state.
pub fn command_count(plane: &TestPlane) -> usize {
    let attitude = plane.attitude();
    let position = plane.position();
    let nav = plane.nav();
    let motors = plane.motors();
    attitude.configure_calls
        + attitude.relax_calls
        + attitude.smooth_calls
        + attitude.direct_calls
        + attitude.throttle_calls
        + position.configure_calls
        + position.speed_z_calls
        + position.init_z_calls
        + position.climb_calls
        + position.update_z_calls
        + nav.init_calls
        + nav.update_calls
        + motors.output_calls
        + motors.output_min_calls
}
