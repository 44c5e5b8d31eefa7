pub mod codec;
pub mod loader;
pub mod summary;

pub use crate::domain::model::State;
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
