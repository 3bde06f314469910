//! Rendering and the placeholder policy for read commands.

use dn_client::ApiError;
use dn_core::ResponseEnvelope;
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Envelope to print for a read command.
///
/// A failed read degrades to the empty placeholder envelope after the typed
/// error is logged; it never aborts the command.
pub fn read_envelope<T: Default>(result: Result<T, ApiError>, what: &str) -> ResponseEnvelope<T> {
    match result {
        Ok(value) => ResponseEnvelope::ok(value),
        Err(error) => {
            tracing::warn!(%error, kind = ?error.kind(), "{what} unavailable; showing placeholder");
            ResponseEnvelope::empty()
        }
    }
}

/// Print the outcome of a read command.
pub fn output_read<T: Default + Serialize>(
    result: Result<T, ApiError>,
    what: &str,
    flags: GlobalFlags,
) -> anyhow::Result<()> {
    output(&read_envelope(result, what), flags.format)
}

/// Convert a failed write into the error the user sees.
pub fn write_failure(error: ApiError) -> anyhow::Error {
    tracing::debug!(%error, "write command failed");
    anyhow::anyhow!(error.user_message())
}
