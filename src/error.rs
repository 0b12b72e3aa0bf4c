//! Error types for the opentac library

use thiserror::Error;

/// Errors surfaced by the builder and allocator APIs.
///
/// Programming-contract violations (cursor on the wrong item kind,
/// out-of-bounds seeks, malformed live intervals) are front-end bugs and
/// abort via `assert!`/`panic!` rather than appearing here.
#[derive(Error, Debug)]
pub enum Error {
    /// A name was bound twice in the same function's name table
    ///
    /// **Triggered by:** `bind_int`/`bind_label` on a key that is already
    /// bound, or `add_param` reusing a parameter name.
    #[error("name `{name}` is already bound in this function")]
    DuplicateBinding {
        /// The offending key
        name: String,
    },

    /// Register table serialization failed
    #[error("register table serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for opentac operations
pub type Result<T> = std::result::Result<T, Error>;
