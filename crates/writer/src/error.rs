/// Errors from the text-generation API layer.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API rejected the credential.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit or quota exhausted.
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Any other non-2xx status.
    #[error("Generation API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response without usable generated text.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
