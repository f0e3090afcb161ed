// src/mode/stabilize.rs

//! # Stabilize
//!
//! Rotor attitude stabilization. Roll and pitch sticks command lean angles,
//! the rudder commands a yaw rate and the throttle stick drives the rotor
//! collective directly.

use crate::{
    AttitudeControl, MotorOutput, Number, PositionControl, QuadPlane, StateEstimator, WaypointNav,
};

impl<T, A, P, W, E, M> QuadPlane<T, A, P, W, E, M>
where
    T: Number,
    A: AttitudeControl<T>,
    P: PositionControl<T>,
    W: WaypointNav<T>,
    E: StateEstimator<T>,
    M: MotorOutput<T>,
{
    /// Relaxes the attitude controller and zeroes the collective.
    pub fn init_stabilize(&mut self) {
        self.attitude.relax();
        self.attitude.set_throttle_out(T::zero());
        self.climb_limiter.reset(self.state.climb_rate_cms);
    }

    /// Runs one stabilize cycle.
    pub fn control_stabilize(&mut self) {
        let throttle = self.pilot_intent().throttle;
        self.hold_stabilize(throttle);
    }
}
