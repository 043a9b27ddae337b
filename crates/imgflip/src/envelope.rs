use mememart_core::RawMeme;
use serde::Deserialize;

use crate::client::FetchError;

/// The wire envelope: `{ success, data: { memes: [...] } }`. The API also
/// sends an `error_message` on failure-flagged responses.
#[derive(Debug, Deserialize)]
pub struct MemeListEnvelope {
    pub success: bool,
    pub data: Option<MemeListData>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MemeListData {
    pub memes: Vec<RawMeme>,
}

/// Decodes a response body into raw records, in wire order. A body that does
/// not parse, a `success: false` flag, and a missing `data` block are all
/// schema-class failures.
pub fn decode_envelope(body: &str) -> Result<Vec<RawMeme>, FetchError> {
    let envelope: MemeListEnvelope =
        serde_json::from_str(body).map_err(|source| FetchError::Schema(source.to_string()))?;

    if !envelope.success {
        let detail =
            envelope.error_message.unwrap_or_else(|| "API reported failure".to_string());
        return Err(FetchError::Schema(detail));
    }

    let data = envelope
        .data
        .ok_or_else(|| FetchError::Schema("success envelope without data block".to_string()))?;

    Ok(data.memes)
}
