//! Per-call timeout for collaborator lookups

use credence_domain::LookupError;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

/// Run a lookup, turning an elapsed deadline into [`LookupError::Timeout`]
pub(crate) async fn within<T, F>(limit: Duration, lookup: F) -> Result<T, LookupError>
where
    F: Future<Output = Result<T, LookupError>>,
{
    timeout(limit, lookup)
        .await
        .map_err(|_| LookupError::Timeout)?
}

/// The first `max_chars` characters of `text` followed by an ellipsis
pub(crate) fn excerpt(text: &str, max_chars: usize) -> String {
    let cut = text
        .char_indices()
        .nth(max_chars)
        .map_or(text.len(), |(i, _)| i);
    format!("{}...", &text[..cut])
}
