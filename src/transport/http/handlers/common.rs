use crate::domain::model::Validate;
use crate::transport::http::error::ApiError;
use serde::de::DeserializeOwned;

/// Decodes a raw request body and runs field validation on it.
///
/// Bodies are taken as bytes rather than through `Json<T>` so that an empty body, a decoding
/// failure and a validation failure each get their own error.
pub fn decode_payload<T>(body: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned + Validate,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::EmptyBody);
    }
    let payload: T =
        serde_json::from_slice(body).map_err(|e| ApiError::MalformedJson(e.to_string()))?;
    payload.validate().map_err(ApiError::Validation)?;
    Ok(payload)
}

pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::InvalidId(raw.to_string()))
}
