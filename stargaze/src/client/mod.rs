//! Client side of the gallery: talks to the gateways and owns the state a
//! front end renders from.

mod controller;
mod gateway;
mod notify;

pub use controller::{ExplanationState, GallerySnapshot, GalleryController, LoadState};
pub use gateway::{GatewayApi, HttpGateway};
pub use notify::{Notifier, TracingNotifier};
