//! Error type shared by the browser host.
//!
//! Nothing here is fatal to the page: every variant is logged and degrades a
//! single feature. Conversion from `JsValue` lives in [`crate::dom`].

/// Failure while mounting or driving one page feature.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Markup the feature depends on is not on the page.
    #[error("missing element: {0}")]
    MissingElement(String),
    /// A browser API call threw.
    #[error("browser call failed: {0}")]
    Js(String),
    /// The embedded configuration could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    /// The running browser lacks an API the feature needs.
    #[error("unsupported: {0}")]
    Unsupported(&'static str),
}

impl PageError {
    /// Shorthand for [`PageError::MissingElement`].
    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingElement(what.into())
    }
}
