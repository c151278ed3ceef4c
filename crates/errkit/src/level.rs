//! Error severity levels

use std::fmt;

/// The level of an error. The lower the level, the more severe the error.
///
/// This is an open newtype rather than a closed enum: values outside the
/// defined constants (including [`ErrorLevel::UNKNOWN`]) are representable
/// and display as `ErrorLevel(<n>)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ErrorLevel(i32);

impl ErrorLevel {
    /// Reserved sentinel for an unknown level.
    pub const UNKNOWN: ErrorLevel = ErrorLevel(-1);

    /// Panic-level errors.
    pub const FATAL: ErrorLevel = ErrorLevel(0);

    /// The standard level. Used for most errors.
    pub const ERROR: ErrorLevel = ErrorLevel(1);

    /// Not critical. Used for warnings and non-fatal errors.
    pub const WARNING: ErrorLevel = ErrorLevel(2);

    /// Used mainly during development.
    pub const DEBUG: ErrorLevel = ErrorLevel(3);

    /// Informational messages.
    pub const INFO: ErrorLevel = ErrorLevel(4);

    /// Build a level from its raw value. Any value is accepted.
    pub const fn from_raw(raw: i32) -> Self {
        ErrorLevel(raw)
    }

    /// The raw integer value
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Canonical name, or `None` for values outside the defined set.
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("FATAL"),
            1 => Some("ERROR"),
            2 => Some("WARNING"),
            3 => Some("DEBUG"),
            4 => Some("INFO"),
            _ => None,
        }
    }

    /// Check if the level is one of the defined constants (excluding UNKNOWN).
    pub const fn is_defined(self) -> bool {
        self.name().is_some()
    }
}

impl Default for ErrorLevel {
    fn default() -> Self {
        ErrorLevel::ERROR
    }
}

impl fmt::Display for ErrorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "ErrorLevel({})", self.0),
        }
    }
}
