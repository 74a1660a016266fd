//! Construction-time options for a [`crate::session::Session`].

use derive_builder::Builder;

/// When principals contain more than one account, the caller must specify
/// which one to select via `account_id`; construction against a single-
/// account principals document may leave it unset.
#[derive(Debug, Clone, Default, Builder)]
#[builder(default)]
pub struct SessionConfig {
    #[builder(setter(strip_option), default)]
    pub account_id: Option<String>,
}
