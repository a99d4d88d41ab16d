//! Orderbook client errors.

/// Errors from orderbook requests.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum OrderbookError {
    /// A transport-level failure (connection, timeout, body decode).
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The service answered with a non-2xx status; `body` carries the
    /// parsed JSON error payload so callers can branch on server-defined
    /// codes.
    #[error("orderbook rejected the request with status {status}: {body}")]
    Api {
        /// The HTTP status code.
        status: u16,
        /// The parsed error body, or `null` when the body was not JSON.
        body: serde_json::Value,
    },
}
