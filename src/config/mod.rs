pub mod error;
pub mod tuning;

pub use error::ConfigError;
pub use tuning::Tuning;
