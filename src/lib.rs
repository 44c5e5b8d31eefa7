pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};

pub use core::{
    codec::{decode_state, decode_state_str, encode_state, encode_state_pretty},
    loader::StateLoader,
    summary::StateSummary,
};
pub use domain::model::{
    ResourceIndex, ResourceMode, State, StateModule, StateOutput, StateResource, StateValues,
    STATE_FORMAT_VERSION,
};
pub use utils::error::{Result, StateError};
