//! thermostat-rs: headless core of a dashboard thermostat card.
//!
//! The card reconciles a locally displayed setpoint against immutable entity
//! snapshots published by a host, projects backend-agnostic frames and turns
//! slider and mode gestures into fire-and-forget device commands.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{HassContext, ThermostatCard, ThermostatCardConfig};
pub use error::{CardError, CardResult};
