// src/quadplane.rs

//! # Quadplane Control Core
//!
//! [`QuadPlane`] owns the transition state machine, the arm state and the
//! active flight mode, and drives the VTOL collaborators once per control
//! cycle through [`QuadPlane::update`].
//!
//! ## Cycle
//!
//! 1. Apply a staged configuration, latch the pilot input and the estimator
//!    snapshot.
//! 2. Advance the transition. VTOL modes hold it in `AirspeedWait`, manual
//!    flight holds it `Done`, fixed-wing modes step it.
//! 3. Stop here while disarmed: no actuator command of any kind is issued.
//! 4. Dispatch to the active flight mode, or to the transition outputs in
//!    fixed-wing flight.
//!
//! Nothing in the cycle blocks or allocates.

use crate::logging::{log_debug, log_info, log_warn};
use crate::pilot::{self, ClimbRateLimiter, PilotInput, PilotIntent};
use crate::{
    AttitudeControl, AttitudeTarget, ConfigError, ControlGains, FlightMode, MotorOutput, Number,
    PositionControl, QuadPlaneConfig, StateEstimator, Transition, TransitionFault, TransitionInput,
    TransitionState, VehicleState, WaypointNav,
};

/// Gain applied when smoothing attitude targets toward pilot input.
pub const SMOOTHING_GAIN: f32 = 6.0;

/// The collaborators a [`QuadPlane`] drives, bundled for construction.
#[derive(Debug, Clone, Default)]
pub struct Collaborators<A, P, W, E, M> {
    /// Multirotor attitude controller.
    pub attitude: A,
    /// Multirotor position controller.
    pub position: P,
    /// Loiter navigator.
    pub nav: W,
    /// State estimator.
    pub estimator: E,
    /// Lift rotor output stage.
    pub motors: M,
}

/// Transition and VTOL flight mode controller for a quadplane.
pub struct QuadPlane<T: Number, A, P, W, E, M> {
    pub(crate) attitude: A,
    pub(crate) position: P,
    pub(crate) nav: W,
    pub(crate) estimator: E,
    pub(crate) motors: M,
    pub(crate) config: QuadPlaneConfig<T>,
    staged_config: Option<QuadPlaneConfig<T>>,
    gains: ControlGains<T>,
    transition: Transition,
    mode: FlightMode,
    armed: bool,
    pub(crate) pilot: PilotInput<T>,
    pub(crate) state: VehicleState<T>,
    last_throttle: T,
    pub(crate) climb_limiter: ClimbRateLimiter<T>,
}

impl<T, A, P, W, E, M> QuadPlane<T, A, P, W, E, M>
where
    T: Number,
    A: AttitudeControl<T>,
    P: PositionControl<T>,
    W: WaypointNav<T>,
    E: StateEstimator<T>,
    M: MotorOutput<T>,
{
    /// Creates a disarmed controller in fixed-wing flight, waiting for airspeed.
    ///
    /// The configuration is used as given; loaders are expected to call
    /// [`QuadPlaneConfig::validate`] first. The gains are kept for the life of
    /// the controller and handed to the collaborators by [`Self::setup`].
    pub fn new(
        collaborators: Collaborators<A, P, W, E, M>,
        config: QuadPlaneConfig<T>,
        gains: ControlGains<T>,
    ) -> Self {
        let Collaborators {
            attitude,
            position,
            nav,
            estimator,
            motors,
        } = collaborators;
        let state = estimator.state();
        Self {
            attitude,
            position,
            nav,
            estimator,
            motors,
            config,
            staged_config: None,
            gains,
            transition: Transition::new(),
            mode: FlightMode::FixedWing,
            armed: false,
            pilot: PilotInput::default(),
            state,
            last_throttle: T::zero(),
            climb_limiter: ClimbRateLimiter::new(state.climb_rate_cms),
        }
    }

    /// Pushes the motor update rate and the control gains to the collaborators.
    /// Call once before the first cycle.
    pub fn setup(&mut self) {
        self.motors.set_update_rate(self.config.motor_update_rate_hz);
        self.attitude.configure(&self.gains.attitude);
        self.position.configure(&self.gains.position);
        log_info!(
            "quadplane setup: motor rate {} Hz, loop rate {} Hz",
            self.config.motor_update_rate_hz,
            self.config.loop_rate_hz
        );
    }

    /// Runs one control cycle with the latest pilot input.
    pub fn update(&mut self, pilot: &PilotInput<T>) {
        if let Some(config) = self.staged_config.take() {
            self.config = config;
            log_info!("quadplane config applied");
        }
        self.pilot = *pilot;
        self.update_transition();

        if !self.armed {
            return;
        }

        match self.mode {
            FlightMode::Stabilize => self.control_stabilize(),
            FlightMode::Hover => self.control_hover(),
            FlightMode::Loiter => self.control_loiter(),
            FlightMode::FixedWing | FlightMode::Manual => return,
        }
        self.motors.output();
        self.last_throttle = self.motors.throttle();
    }

    /// Reads the estimator and steps the transition for the active mode.
    ///
    /// VTOL modes hold the transition in `AirspeedWait`, manual flight holds it
    /// `Done`, and fixed-wing flight advances it. When armed outside a VTOL
    /// mode, the transition outputs are commanded: hover assistance while
    /// waiting for airspeed, the throttle ramp while the timer runs, and
    /// minimum rotor output once done.
    pub fn update_transition(&mut self) {
        self.refresh_state();
        match self.mode {
            FlightMode::FixedWing => self.advance_transition(),
            FlightMode::Manual => self.transition.finish(),
            FlightMode::Stabilize | FlightMode::Hover | FlightMode::Loiter => {
                self.transition.reset()
            }
        }

        if !self.armed || self.mode.is_vtol() {
            return;
        }
        self.command_transition();
    }

    /// Holds altitude on the rotors while tracking `target_climb_rate` in cm/s.
    ///
    /// The climb rate is clamped to `pilot_velocity_z_max` and slewed by
    /// `pilot_accel_z`. Attitude follows the pilot sticks with smoothing.
    /// Does nothing while disarmed.
    pub fn hold_hover(&mut self, target_climb_rate: T) {
        if !self.armed {
            return;
        }
        self.set_vertical_limits();
        let target = self.pilot_attitude_target();
        let smoothing_gain = self.smoothing_gain();
        self.attitude.angle_rate_yaw_smooth(target, smoothing_gain);
        let climb_rate = self.limit_climb_rate(target_climb_rate);
        self.position
            .set_alt_target_from_climb_rate(climb_rate, self.config.dt());
        self.position.update_z_controller();
    }

    /// Stabilizes attitude on the rotors at a fixed throttle in `[0, 1]`.
    /// Does nothing while disarmed.
    pub fn hold_stabilize(&mut self, throttle_in: T) {
        if !self.armed {
            return;
        }
        let target = self.pilot_attitude_target();
        let smoothing_gain = self.smoothing_gain();
        self.attitude.angle_rate_yaw_smooth(target, smoothing_gain);
        let throttle = throttle_in
            .or_if_invalid(T::zero())
            .clamp(T::zero(), T::one());
        self.attitude.set_throttle_out(throttle);
    }

    /// Arms or disarms the rotors. Arming re-initializes the active mode.
    pub fn set_armed(&mut self, armed: bool) {
        let rising = armed && !self.armed;
        if armed != self.armed {
            log_info!("quadplane {}", if armed { "armed" } else { "disarmed" });
        }
        self.armed = armed;
        self.motors.set_armed(armed);
        if rising {
            self.refresh_state();
            self.last_throttle = T::zero();
            self.init_mode();
        }
    }

    /// Switches flight mode.
    ///
    /// The new mode is initialized immediately when armed. While disarmed the
    /// initialization is deferred to the next arming edge, so no collaborator
    /// sees a command.
    pub fn set_mode(&mut self, mode: FlightMode) {
        if mode == self.mode {
            return;
        }
        log_info!("quadplane mode {} -> {}", self.mode, mode);
        self.mode = mode;
        if mode.is_vtol() {
            self.transition.reset();
        } else if mode == FlightMode::Manual {
            self.transition.finish();
        }
        if self.armed {
            self.refresh_state();
            self.init_mode();
        }
    }

    /// Restarts the handoff from `AirspeedWait`, clearing any fault.
    pub fn request_transition(&mut self) {
        log_info!("transition requested from {}", self.transition.state());
        self.transition.reset();
    }

    /// Validates `config` and stages it for the start of the next cycle.
    pub fn reload_config(&mut self, config: QuadPlaneConfig<T>) -> Result<(), ConfigError> {
        if let Err(error) = config.validate() {
            log_warn!("quadplane config rejected: {}", error);
            return Err(error);
        }
        self.staged_config = Some(config);
        log_debug!("quadplane config staged");
        Ok(())
    }

    /// Desired yaw rate from the latched pilot input, in centidegrees per second.
    pub fn get_pilot_desired_yaw_rate_cds(&self) -> T {
        pilot::desired_yaw_rate_cds(&self.pilot, &self.config)
    }

    /// Desired climb rate from the latched pilot input, in cm/s.
    pub fn get_pilot_desired_climb_rate_cms(&self) -> T {
        pilot::desired_climb_rate_cms(&self.pilot, &self.config)
    }

    /// Full pilot intent for the latched input.
    pub fn pilot_intent(&self) -> PilotIntent<T> {
        PilotIntent::from_input(&self.pilot, &self.config)
    }

    /// Attitude smoothing gain.
    pub fn smoothing_gain(&self) -> T {
        T::constant(SMOOTHING_GAIN)
    }

    /// Current transition phase.
    pub fn transition_state(&self) -> TransitionState {
        self.transition.state()
    }

    /// Transition state machine including its timer.
    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    /// Condition currently holding the transition, if any.
    pub fn transition_fault(&self) -> Option<TransitionFault> {
        self.transition.fault()
    }

    /// Share of lift owed by the rotors at the latched snapshot time, in `[0, 1]`.
    pub fn transition_blend(&self) -> T {
        self.transition.blend(self.state.time_ms)
    }

    /// Rotor throttle latched for the transition ramp.
    pub fn last_throttle(&self) -> T {
        self.last_throttle
    }

    /// True while armed.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Active flight mode.
    pub fn mode(&self) -> FlightMode {
        self.mode
    }

    /// Active configuration.
    pub fn config(&self) -> &QuadPlaneConfig<T> {
        &self.config
    }

    /// Gains handed to the collaborators.
    pub fn gains(&self) -> &ControlGains<T> {
        &self.gains
    }

    /// Attitude controller handle.
    pub fn attitude(&self) -> &A {
        &self.attitude
    }

    /// Position controller handle.
    pub fn position(&self) -> &P {
        &self.position
    }

    /// Navigator handle.
    pub fn nav(&self) -> &W {
        &self.nav
    }

    /// Estimator handle.
    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    /// Mutable estimator handle.
    pub fn estimator_mut(&mut self) -> &mut E {
        &mut self.estimator
    }

    /// Motor output handle.
    pub fn motors(&self) -> &M {
        &self.motors
    }

    /// Mutable motor output handle.
    pub fn motors_mut(&mut self) -> &mut M {
        &mut self.motors
    }

    fn refresh_state(&mut self) {
        self.state = self.estimator.state();
    }

    fn init_mode(&mut self) {
        match self.mode {
            FlightMode::Stabilize => self.init_stabilize(),
            FlightMode::Hover => self.init_hover(),
            FlightMode::Loiter => self.init_loiter(),
            FlightMode::FixedWing | FlightMode::Manual => {
                self.attitude.relax();
                self.climb_limiter.reset(self.state.climb_rate_cms);
            }
        }
    }

    fn advance_transition(&mut self) {
        let input = TransitionInput {
            now_ms: self.state.time_ms,
            airspeed: self.state.airspeed,
            threshold: self.config.transition_airspeed,
            transition_time_ms: self.config.transition_time_ms,
        };
        let previous = self.transition;
        self.transition = previous.next(&input);

        if self.transition.state() != previous.state() {
            log_info!(
                "transition {} -> {} at {} ms",
                previous.state(),
                self.transition.state(),
                input.now_ms
            );
        }
        if self.transition.fault() != previous.fault() {
            if let Some(fault) = self.transition.fault() {
                log_warn!("transition held: {}", fault);
            }
        }
    }

    fn command_transition(&mut self) {
        match self.transition.state() {
            TransitionState::AirspeedWait => {
                self.hold_hover(T::zero());
                self.motors.output();
                self.last_throttle = self.motors.throttle();
            }
            TransitionState::Timer => {
                let throttle = self.last_throttle * self.transition_blend();
                self.hold_stabilize(throttle);
                self.motors.output();
            }
            TransitionState::Done => self.motors.output_min(),
        }
    }

    pub(crate) fn set_vertical_limits(&mut self) {
        let velocity_max = self
            .config
            .pilot_velocity_z_max
            .or_if_invalid(T::zero())
            .magnitude();
        let accel_max = self
            .config
            .pilot_accel_z
            .or_if_invalid(T::zero())
            .magnitude();
        self.position.set_speed_z(-velocity_max, velocity_max);
        self.position.set_accel_z(accel_max);
    }

    pub(crate) fn limit_climb_rate(&mut self, target_cms: T) -> T {
        let velocity_max = self
            .config
            .pilot_velocity_z_max
            .or_if_invalid(T::zero())
            .magnitude();
        let target = target_cms
            .or_if_invalid(T::zero())
            .clamp(-velocity_max, velocity_max);
        self.climb_limiter
            .apply(target, self.config.pilot_accel_z, self.config.dt())
    }

    pub(crate) fn pilot_attitude_target(&self) -> AttitudeTarget<T> {
        let intent = self.pilot_intent();
        AttitudeTarget {
            roll_cd: intent.roll_cd,
            pitch_cd: intent.pitch_cd,
            yaw_rate_cds: intent.yaw_rate_cds,
        }
    }
}
