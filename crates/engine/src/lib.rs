//! Activation fan-out pipeline.
//!
//! One trigger event flows through three stages:
//! 1. Extract and validate the activation (`activation`)
//! 2. Resolve recipients to a deduplicated token set (`recipients`)
//! 3. Build the notification and dispatch the multicast (`dispatch`)
//!
//! `handler::handle` orchestrates the stages and reports a terminal
//! [`Outcome`]; nothing is retried and nothing persists between runs.

pub mod activation;
pub mod dispatch;
pub mod handler;
pub mod recipients;

pub use handler::{Outcome, handle};
