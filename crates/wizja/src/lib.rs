pub mod dash;
pub mod error;
pub mod format;

pub use error::{WizjaError, WizjaResult};
pub use format::FormatDescriptor;
