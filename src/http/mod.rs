//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from file serving.

pub mod cache;
pub mod range;
pub mod response;

// Re-export commonly used types
pub use cache::{headers_for, CacheHeaders};
pub use range::{evaluate_range, ByteRange, RangeOutcome};
pub use response::{
    build_304_response, build_400_response, build_404_response, build_405_response,
    build_416_response, build_500_response, build_options_response,
};
