//! JSON array encoding of the task list: `["Buy milk","Walk dog"]`.

use thiserror::Error;

#[derive(Debug, Error)]
#[error("malformed task list: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

pub fn encode(tasks: &[String]) -> String {
    // A slice of strings always serializes
    serde_json::to_string(tasks).unwrap_or_else(|_| String::from("[]"))
}

pub fn decode(raw: &str) -> Result<Vec<String>, DecodeError> {
    Ok(serde_json::from_str(raw)?)
}
