//! This module provides a namespace to declare the errors that can occur
//! in this crate.

/// The error kinds a [`crate::session::Session`] can surface. See the
/// module docs on [`crate::session`] for which operations can raise which
/// variant.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Principals could not be fetched, or account selection failed.
    #[error("login failed: {0}")]
    Login(String),

    /// A response arrived for the awaited request id, but reported a
    /// non-zero status code.
    #[error("unexpected response code {code}: {msg}")]
    UnexpectedResponseCode { code: i64, msg: String },

    /// A response arrived for an id nobody is waiting on, or a frame
    /// didn't conform to the wire schema.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The transport closed or otherwise failed outside of what the
    /// underlying websocket library itself reports via [`Error::Websocket`].
    #[error("transport error: {0}")]
    Transport(String),

    /// One or more handlers registered with the [`crate::dispatcher::Dispatcher`]
    /// failed while processing a data entry.
    #[error("handler error: {0}")]
    Handler(String),

    #[error("error in the conversion from/to JSON")]
    Json(#[from] serde_json::Error),

    #[error("error fetching user principals")]
    Http(#[from] reqwest::Error),

    #[error("error with the websocket")]
    Websocket(#[from] tokio_tungstenite::tungstenite::Error),
}
