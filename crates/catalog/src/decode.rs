use serde::de::DeserializeOwned;

/// Decode a backend payload that is not always well-formed.
///
/// Some endpoints return a JSON value, some return the same value
/// double-encoded as a string, and some return garbage on error paths. All
/// three decode here: a parse failure yields the default value instead of an
/// error, so a broken catalog response can never take the wizard down.
pub fn lenient<T: DeserializeOwned + Default>(raw: &str) -> T {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::String(inner)) => decode_value_or_default(&inner),
        Ok(value) => from_value_or_default(value),
        Err(err) => {
            tracing::warn!(error = %err, "malformed catalog payload, using default");
            T::default()
        }
    }
}

fn decode_value_or_default<T: DeserializeOwned + Default>(raw: &str) -> T {
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "string-wrapped catalog payload did not decode, using default");
            T::default()
        }
    }
}

fn from_value_or_default<T: DeserializeOwned + Default>(value: serde_json::Value) -> T {
    match serde_json::from_value(value) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "unexpected catalog payload shape, using default");
            T::default()
        }
    }
}
