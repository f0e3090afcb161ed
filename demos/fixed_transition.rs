// demos/fixed_transition.rs

use fixed::types::I16F16;
use vtol_transition::{
    AttitudeControl, AttitudeGains, AttitudeTarget, Collaborators, ControlGains, MotorOutput,
    PilotInput, PositionControl, PositionGains, QuadPlane, QuadPlaneConfig, StateEstimator,
    VehicleState, WaypointNav,
};

// Minimal collaborators that only remember the last rotor throttle.
#[derive(Default)]
struct Attitude {
    throttle: I16F16,
}

impl AttitudeControl<I16F16> for Attitude {
    fn configure(&mut self, _gains: &AttitudeGains<I16F16>) {}
    fn relax(&mut self) {}
    fn angle_rate_yaw_smooth(&mut self, _target: AttitudeTarget<I16F16>, _gain: I16F16) {}
    fn angle_rate_yaw(&mut self, _target: AttitudeTarget<I16F16>) {}
    fn set_throttle_out(&mut self, throttle: I16F16) {
        self.throttle = throttle;
    }
}

#[derive(Default)]
struct Position;

impl PositionControl<I16F16> for Position {
    fn configure(&mut self, _gains: &PositionGains<I16F16>) {}
    fn set_speed_z(&mut self, _down: I16F16, _up: I16F16) {}
    fn set_accel_z(&mut self, _accel: I16F16) {}
    fn init_z(&mut self, _altitude: I16F16, _climb_rate: I16F16) {}
    fn set_alt_target_from_climb_rate(&mut self, _climb_rate: I16F16, _dt: I16F16) {}
    fn update_z_controller(&mut self) {}
}

#[derive(Default)]
struct Nav;

impl WaypointNav<I16F16> for Nav {
    fn init_loiter_target(&mut self) {}
    fn set_pilot_desired_acceleration(&mut self, _roll: I16F16, _pitch: I16F16) {}
    fn update_loiter(&mut self, _limit: I16F16, _scaler: I16F16) {}
    fn roll_cd(&self) -> I16F16 {
        I16F16::ZERO
    }
    fn pitch_cd(&self) -> I16F16 {
        I16F16::ZERO
    }
}

// Airspeed builds by 3 m/s every second.
#[derive(Default)]
struct Estimator {
    time_ms: u32,
}

impl StateEstimator<I16F16> for Estimator {
    fn state(&self) -> VehicleState<I16F16> {
        VehicleState {
            time_ms: self.time_ms,
            airspeed: Some(I16F16::from_num(3 * self.time_ms / 1000)),
            ..VehicleState::default()
        }
    }
}

#[derive(Default)]
struct Motors;

impl MotorOutput<I16F16> for Motors {
    fn set_armed(&mut self, _armed: bool) {}
    fn set_update_rate(&mut self, _hz: u16) {}
    fn output(&mut self) {}
    fn output_min(&mut self) {}
    fn throttle(&self) -> I16F16 {
        // Hover throttle.
        I16F16::from_num(0.5)
    }
}

fn main() {
    let mut config = QuadPlaneConfig::<I16F16>::new();
    config.transition_airspeed = I16F16::from_num(18.0);
    config.transition_time_ms = 5000;
    if let Err(error) = config.validate() {
        println!("invalid config: {}", error);
        return;
    }

    let mut plane: QuadPlane<I16F16, Attitude, Position, Nav, Estimator, Motors> =
        QuadPlane::new(Collaborators::default(), config, ControlGains::new());
    plane.setup();
    plane.set_armed(true);

    println!("  t (s), airspeed, state, blend, throttle");
    for second in 0..=12 {
        plane.estimator_mut().time_ms = second * 1000;
        plane.update(&PilotInput::default());

        let airspeed = plane.estimator().state().airspeed.unwrap_or(I16F16::ZERO);
        println!(
            "{:7}, {:8.2}, {}, {:8.3}, {:8.3}",
            second,
            airspeed,
            plane.transition_state(),
            plane.transition_blend(),
            plane.attitude().throttle,
        );
    }
}
