pub mod error;
pub mod traits;
pub mod types;

pub use error::LiftError;
pub use traits::Recognizer;
pub use types::{ImageOutcome, ProcessReport};
