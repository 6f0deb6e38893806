use super::response::ApiError;

pub fn validate_queue_name(name: &str) -> Result<&str, ApiError> {
    if name.is_empty() {
        return Err(ApiError::BadRequest("queue name must not be empty".to_string()));
    }
    Ok(name)
}

/// Returns the first value given for `key`. Later repeats are ignored.
pub fn first_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

pub fn extract_value(value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::BadRequest("query parameter 'v' is required".to_string())),
    }
}

/// Parses the optional `timeout` query parameter.
///
/// An absent or empty parameter means "do not wait". Anything else must be a
/// non-negative integer number of seconds.
pub fn extract_timeout(timeout: Option<&str>) -> Result<Option<u64>, ApiError> {
    match timeout {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse::<u64>().map(Some).map_err(|_| {
            ApiError::BadRequest(format!("timeout should be a non-negative integer, got '{}'", raw))
        }),
    }
}
