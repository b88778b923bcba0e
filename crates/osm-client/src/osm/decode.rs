//! Response body decoding
//!
//! Every report answers with plain JSON except startup, which is served as a
//! script assignment (`var data_holder = {...}`). The marker is stripped when
//! present; otherwise the payload is located at the first `{` or `[` so a
//! change in the wrapper fails loudly instead of corrupting the JSON.

use serde::de::DeserializeOwned;

use super::endpoint::Endpoint;
use super::error::ApiError;

const SCRIPT_PREAMBLE: &str = "var data_holder = ";

/// Parses a 2xx body for the given endpoint
pub fn decode_body<T: DeserializeOwned>(endpoint: &Endpoint, body: &str) -> Result<T, ApiError> {
    let payload = if endpoint.has_script_preamble() {
        strip_script_preamble(body)?
    } else {
        body
    };

    serde_json::from_str(payload).map_err(|e| ApiError::decode(e.to_string()))
}

fn strip_script_preamble(body: &str) -> Result<&str, ApiError> {
    let payload = match body.strip_prefix(SCRIPT_PREAMBLE) {
        Some(rest) => rest,
        None => {
            let start = body
                .find(['{', '['])
                .ok_or_else(|| ApiError::decode("No JSON payload found in startup response"))?;
            &body[start..]
        }
    };

    Ok(payload.trim_end().trim_end_matches(';'))
}
