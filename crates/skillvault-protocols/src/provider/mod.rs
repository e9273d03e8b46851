//! Model provider protocol definitions.
//!
//! The chat model itself is an external collaborator; this module only fixes
//! the shape of a single model invocation so it can be intercepted.

mod request;
mod response;
mod traits;

pub use request::*;
pub use response::*;
pub use traits::*;
