//! # Interchange Codec
//!
//! YAML and JSON conversion for any serde type in the model. Works on
//! strings and `serde_json::Value`s only; reading and writing files is left
//! to the caller.
//!
//! Every failure, including validation errors raised while deserializing a
//! block or element, is reported as [`PalsError::Serialization`] with the
//! underlying message.

use pals_core::PalsError;
use serde::de::DeserializeOwned;
use serde::Serialize;

fn serialization_error(format: &'static str, err: impl std::fmt::Display) -> PalsError {
    let message = err.to_string();
    tracing::debug!(format, error = %message, "interchange conversion failed");
    PalsError::Serialization(message)
}

/// Serialize `value` as a YAML document.
pub fn to_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String, PalsError> {
    serde_yaml::to_string(value).map_err(|e| serialization_error("yaml", e))
}

/// Parse a YAML document.
pub fn from_yaml<T: DeserializeOwned>(input: &str) -> Result<T, PalsError> {
    serde_yaml::from_str(input).map_err(|e| serialization_error("yaml", e))
}

/// Serialize `value` as compact JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, PalsError> {
    serde_json::to_string(value).map_err(|e| serialization_error("json", e))
}

/// Serialize `value` as indented JSON.
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, PalsError> {
    serde_json::to_string_pretty(value).map_err(|e| serialization_error("json", e))
}

/// Parse a JSON document.
pub fn from_json<T: DeserializeOwned>(input: &str) -> Result<T, PalsError> {
    serde_json::from_str(input).map_err(|e| serialization_error("json", e))
}

/// Convert `value` into a `serde_json::Value` tree.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<serde_json::Value, PalsError> {
    serde_json::to_value(value).map_err(|e| serialization_error("json", e))
}

/// Build a model value from a `serde_json::Value` tree.
pub fn from_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, PalsError> {
    serde_json::from_value(value).map_err(|e| serialization_error("json", e))
}
