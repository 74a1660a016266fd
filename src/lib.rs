//! # Streaming market data client
//! ## Overview
//! A streaming client for a correlated request/response push protocol: log
//! in once to bootstrap a websocket session, then subscribe individual
//! services (quotes, charts, options, level-one feeds, books, news) and
//! drain pushed data through per-service handlers.
//!
//! ## Modules
//! - [`fields`] — the per-service field catalog (code ↔ symbolic name).
//! - [`codec`] — builds outgoing requests and classifies inbound frames.
//! - [`transport`] — the websocket send/recv/close surface.
//! - [`correlator`] — request-id bookkeeping and response/backlog handling.
//! - [`dispatcher`] — routes data frames to registered handlers.
//! - [`principals`] / [`principals_client`] — the login bootstrap material.
//! - [`session`] — ties the above together into the public API.

pub mod codec;
pub mod config;
pub mod correlator;
pub mod dispatcher;
pub mod errors;
pub mod fields;
pub mod principals;
pub mod principals_client;
pub mod session;
pub mod transport;

pub use config::{SessionConfig, SessionConfigBuilder};
pub use errors::Error;
pub use fields::ServiceId;
pub use session::{QosLevel, Session};
