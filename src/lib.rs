// src/lib.rs

//! # Quadplane VTOL Transition Controller
//!
//! This crate provides a `no_std`, no-alloc controller for the vertical
//! takeoff and landing side of a quadplane: an aircraft that hovers on
//! dedicated lift rotors and cruises on a fixed wing.
//!
//! - [`Transition`] hands thrust authority from the rotors to the wing once
//!   the airspeed threshold is met, ramping the rotor throttle down over a
//!   bounded timer.
//! - [`FlightMode`] selects between wing flight and the rotor borne
//!   Stabilize, Hover and Loiter modes.
//! - [`QuadPlane`] runs one control cycle at a time, issuing commands to the
//!   attitude controller, position controller, navigator and motor output
//!   stage through the traits in this crate.
//!
//! Every controller is generic over a [`Number`] type, so it can be driven
//! with `f32`, `f64` or any type implementing the `num-traits` bounds.

#![no_std]
#![deny(missing_docs)]

mod logging;

pub mod collaborator;
pub mod config;
pub mod error;
pub mod mode;
pub mod number;
pub mod pilot;
pub mod quadplane;
pub mod transition;

#[doc(inline)]
pub use collaborator::*;
#[doc(inline)]
pub use config::*;
#[doc(inline)]
pub use error::*;
#[doc(inline)]
pub use mode::FlightMode;
#[doc(inline)]
pub use number::Number;
#[doc(inline)]
pub use pilot::{ClimbRateLimiter, PilotInput, PilotIntent};
#[doc(inline)]
pub use quadplane::*;
#[doc(inline)]
pub use transition::*;

#[cfg(test)]
mod test_utils;
