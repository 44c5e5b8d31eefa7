use crate::core::codec::{decode_state, encode_state, encode_state_pretty};
use crate::domain::model::{State, STATE_FORMAT_VERSION};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, StateError};

/// Reads and writes state documents through a [`Storage`] backend.
pub struct StateLoader<S: Storage> {
    storage: S,
    strict: bool,
}

impl<S: Storage> StateLoader<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            strict: false,
        }
    }

    /// In strict mode an unsupported `format_version` is an error instead of a warning.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub async fn load(&self, path: &str) -> Result<State> {
        tracing::debug!("Reading state from {}", path);
        let data = self.storage.read_file(path).await?;
        let state = decode_state(&data)?;
        self.check_format_version(&state)?;

        tracing::info!(
            "Loaded state {} (format {}, terraform {})",
            path,
            display_or_dash(&state.format_version),
            display_or_dash(&state.tool_version)
        );
        Ok(state)
    }

    pub async fn store(&self, path: &str, state: &State, pretty: bool) -> Result<()> {
        let encoded = if pretty {
            encode_state_pretty(state)?
        } else {
            encode_state(state)?
        };
        self.storage.write_file(path, encoded.as_bytes()).await?;
        tracing::info!("Wrote state to {} ({} bytes)", path, encoded.len());
        Ok(())
    }

    fn check_format_version(&self, state: &State) -> Result<()> {
        if state.has_supported_format_version() {
            return Ok(());
        }

        if self.strict {
            return Err(StateError::UnsupportedFormatVersion {
                found: state.format_version.clone(),
                expected: STATE_FORMAT_VERSION.to_string(),
            });
        }

        tracing::warn!(
            "State format version '{}' differs from supported '{}'; fields may be missing or misread",
            state.format_version,
            STATE_FORMAT_VERSION
        );
        Ok(())
    }
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
