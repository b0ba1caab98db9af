//! Request handler module
//!
//! Responsible for request routing dispatch, static mounts, the application
//! fallback and the error boundary around them.

pub mod error;
pub mod mounts;
pub mod router;
pub mod spa;
pub mod static_files;

// Re-export main entry point
pub use error::{ErrorResponder, ServeError};
pub use router::{handle_request, respond, RequestContext};
