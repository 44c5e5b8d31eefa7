use crate::domain::model::State;
use crate::utils::error::{Result, StateError};

/// Decodes a state document from raw JSON bytes.
pub fn decode_state(data: &[u8]) -> Result<State> {
    serde_json::from_slice(data).map_err(StateError::decode)
}

pub fn decode_state_str(content: &str) -> Result<State> {
    serde_json::from_str(content).map_err(StateError::decode)
}

/// Encodes a state document as compact JSON, leaving out empty fields.
pub fn encode_state(state: &State) -> Result<String> {
    serde_json::to_string(state).map_err(StateError::SerializationError)
}

pub fn encode_state_pretty(state: &State) -> Result<String> {
    serde_json::to_string_pretty(state).map_err(StateError::SerializationError)
}
