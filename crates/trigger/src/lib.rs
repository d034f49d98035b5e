//! HTTP delivery shim for the activation pipeline.
//!
//! The event source POSTs each "document created" event to `/`; the pipeline
//! runs once per request and the response is always 200 — failure modes are
//! logged, never surfaced back to the platform.

pub mod routes;
pub mod state;
