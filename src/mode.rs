// src/mode.rs

//! Flight modes of the quadplane.
//!
//! The VTOL modes each live in their own submodule as an `init_*` and
//! `control_*` pair on [`crate::QuadPlane`]. `init_*` runs on mode entry and
//! on every arming edge; `control_*` runs once per armed cycle and hands its
//! commands to the attitude and position controllers. None of them touch the
//! motor output stage; that is left to the update loop.

use core::fmt;

pub mod hover;
pub mod loiter;
pub mod stabilize;

/// Flight mode selected by the pilot or mission logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlightMode {
    /// Wing only flight with the rotors held at minimum.
    Manual,
    /// Assisted wing flight. Rotors assist until the transition completes.
    #[default]
    FixedWing,
    /// Rotor attitude stabilization with direct pilot throttle.
    Stabilize,
    /// Rotor altitude hold with pilot climb rate.
    Hover,
    /// Rotor position and altitude hold.
    Loiter,
}

impl FlightMode {
    /// True for the modes that fly on the lift rotors.
    pub fn is_vtol(&self) -> bool {
        matches!(
            self,
            FlightMode::Stabilize | FlightMode::Hover | FlightMode::Loiter
        )
    }
}

impl fmt::Display for FlightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightMode::Manual => write!(f, "Manual"),
            FlightMode::FixedWing => write!(f, "FixedWing"),
            FlightMode::Stabilize => write!(f, "Stabilize"),
            FlightMode::Hover => write!(f, "Hover"),
            FlightMode::Loiter => write!(f, "Loiter"),
        }
    }
}
