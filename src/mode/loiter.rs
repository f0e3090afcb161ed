// src/mode/loiter.rs

//! # Loiter
//!
//! Position and altitude hold on the rotors. Roll and pitch sticks become a
//! desired horizontal acceleration for the navigator, which then supplies the
//! lean angles. The throttle stick sets a climb rate as in hover.

use crate::pilot::unit_stick;
use crate::{
    AttitudeControl, AttitudeTarget, MotorOutput, Number, PositionControl, QuadPlane,
    StateEstimator, WaypointNav,
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
    /// Captures the current position as the loiter target and holds altitude.
    pub fn init_loiter(&mut self) {
        self.nav.init_loiter_target();
        self.init_hover();
    }

    /// Runs one loiter cycle.
    pub fn control_loiter(&mut self) {
        self.set_vertical_limits();

        self.nav.set_pilot_desired_acceleration(
            unit_stick(self.pilot.roll),
            unit_stick(self.pilot.pitch),
        );
        self.nav.update_loiter(
            self.state.ground_speed_limit_cms,
            self.state.nav_gain_scaler,
        );

        let target = AttitudeTarget {
            roll_cd: self.nav.roll_cd(),
            pitch_cd: self.nav.pitch_cd(),
            yaw_rate_cds: self.get_pilot_desired_yaw_rate_cds(),
        };
        self.attitude.angle_rate_yaw(target);

        let climb_rate = self.get_pilot_desired_climb_rate_cms();
        let climb_rate = self.limit_climb_rate(climb_rate);
        self.position
            .set_alt_target_from_climb_rate(climb_rate, self.config.dt());
        self.position.update_z_controller();
    }
}
