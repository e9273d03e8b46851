//! Tool protocol definitions.
//!
//! Tools are the capabilities surfaced to the model alongside a prompt.

mod context;
mod definition;
mod result;
mod traits;

pub use context::*;
pub use definition::*;
pub use result::*;
pub use traits::*;
