//! Test support for errkit: panic capture and error-message checks.

pub mod check;
pub mod panic;

pub use check::{check_err, equals_err};
pub use panic::{PanicError, capture_panic};
