//! A typed client for the GitHub REST API.
//!
//! Requests are built with [Client::new_request] and sent with [Client::send], or through the
//! per-resource services such as [Client::pull_requests]. Webhook deliveries are decoded into
//! [Event] values, optionally through the [warp] filter [webhooks::with_validated_event_and_client].

#[doc(hidden)]
mod apps;
#[doc(hidden)]
mod config;
#[doc(hidden)]
mod error;
#[doc(hidden)]
mod events;
pub mod github_api;
#[doc(hidden)]
mod models;
#[doc(hidden)]
mod organizations;
#[doc(hidden)]
mod pull_requests;
pub mod webhooks;

pub use apps::*;
pub use config::Config;
pub use error::*;
pub use events::*;
pub use github_api::{add_options, Client, Rate, Response, NO_BODY};
pub use models::*;
pub use organizations::*;
pub use pull_requests::*;
