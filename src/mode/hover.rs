// src/mode/hover.rs

//! # Hover
//!
//! Altitude hold on the rotors. The throttle stick sets a climb rate around a
//! dead zone at mid stick; roll, pitch and yaw behave as in stabilize.

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
    /// Applies the vertical limits and holds the current altitude and climb rate.
    pub fn init_hover(&mut self) {
        self.set_vertical_limits();
        self.position
            .init_z(self.state.altitude_cm, self.state.climb_rate_cms);
        self.attitude.relax();
        self.climb_limiter.reset(self.state.climb_rate_cms);
    }

    /// Runs one hover cycle.
    pub fn control_hover(&mut self) {
        let climb_rate = self.get_pilot_desired_climb_rate_cms();
        self.hold_hover(climb_rate);
    }
}
