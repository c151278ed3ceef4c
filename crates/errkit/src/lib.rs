//! # errkit
//!
//! Structured, coded errors with diagnostic payloads.
//!
//! ## Design Philosophy
//!
//! - **ErrorCode**: a closed set of codes (usually a fieldless enum) says what went wrong
//! - **ErrorLevel**: how serious it is, from FATAL to INFO
//! - **Info**: context pairs, suggestions, call frames and a nested cause
//! - **Chain search**: find a code anywhere in a tree of wrapped errors
//! - **Rendering**: a fixed, diffable multi-line layout
//!
//! ## Usage
//!
//! ```rust
//! use errkit::{CodedError, ErrorKind, as_with_code, write_error};
//!
//! fn load() -> Result<(), CodedError<ErrorKind>> {
//!     let mut err = CodedError::new(ErrorKind::BadParameter, "missing name");
//!     err.add_suggestion(["Provide", "a", "name"]);
//!     err.add_context("field", "Name");
//!     err.add_frame("load()");
//!     Err(err)
//! }
//!
//! let err = load().unwrap_err();
//! assert!(as_with_code(&err, ErrorKind::BadParameter).is_some());
//!
//! let mut out = Vec::new();
//! write_error(&mut out, &err).unwrap();
//! ```
//!
//! ## Principles
//!
//! - Domain errors are returned, never panicked, except through [`panic_with`]
//! - "Not found" is `None`, not an error
//! - Sink failures are returned unchanged
//! - A missing error is `Option::None`; [`NilSafe`] helpers do nothing on it

mod cause;
mod chain;
mod coded;
mod info;
mod kind;
mod level;
mod render;
mod value;

pub use cause::{Cause, Diagnostic};
pub use chain::{Causes, JoinedError, as_with_code, as_with_code_opt, causes};
pub use coded::{CodedError, DEFAULT_MESSAGE, NilSafe};
pub use info::{ContextValue, Info};
pub use kind::{ErrorCode, ErrorKind};
pub use level::ErrorLevel;
pub use render::{RenderConfig, Report, panic_with, write_error, write_error_with, write_info};
pub use value::{ContextLookup, try_value, value};

/// Result type alias using the stock error codes
pub type Result<T> = std::result::Result<T, CodedError<ErrorKind>>;
