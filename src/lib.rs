//! Normalization of Instagram messaging webhook events into flat records

pub mod config;
pub mod event;
pub mod input;
pub mod kind;
pub mod model;
pub mod util;

pub use event::{Event, Origin};
pub use kind::{EventKind, MediaKind};
pub use model::Messaging;
