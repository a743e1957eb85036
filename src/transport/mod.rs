//! Transport layer: wire-format details (URL assembly, query encoding, error bodies).

mod path;
mod query;

pub use path::{UrlError, build_url, render_path};
pub use query::QueryParams;

use crate::domain::ServiceErrorBody;

/// Decode the documented error body of a non-2xx response.
///
/// Returns `None` for empty bodies and bodies that do not match the schema.
pub fn decode_service_error(body: &[u8]) -> Option<ServiceErrorBody> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice::<ServiceErrorBody>(body) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::debug!(error = %err, "error response body does not match service error schema");
            None
        }
    }
}
