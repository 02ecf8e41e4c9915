use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Parse the `:id` path segment. Anything that is not an `i32` is a 400.
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| ApiError::invalid_id())
}

/// Decode the first JSON value of a request body; anything after it is ignored.
/// No `Content-Type` check is made.
pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    match serde_json::Deserializer::from_slice(body).into_iter::<T>().next() {
        Some(decoded) => Ok(decoded?),
        None => Err(ApiError::invalid_json("EOF while parsing a value")),
    }
}
