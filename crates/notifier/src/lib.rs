//! Push-delivery collaborator for the activation pipeline.
//!
//! `PushClient` is the multicast seam the pipeline consumes; `FcmClient` is
//! the production adapter over the FCM HTTP v1 API.

pub mod client;
pub mod message;
pub mod response;

pub use client::{FcmClient, PushClient};
pub use message::{MulticastMessage, Notification};
pub use response::{BatchResponse, SendError, SendErrorKind, SendResponse};
