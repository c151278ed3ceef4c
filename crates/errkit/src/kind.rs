//! Error codes

use std::fmt;

use strum_macros::{Display, EnumIter, IntoStaticStr};

/// A closed set of values identifying the category of a domain error.
///
/// Implement this for a fieldless enum with an exhaustive `Display`
/// (deriving `strum_macros::Display` is the usual way). The code is what
/// [`as_with_code`](crate::as_with_code) compares against.
pub trait ErrorCode:
    Copy + PartialEq + fmt::Display + fmt::Debug + Send + Sync + 'static
{
}

impl<T> ErrorCode for T where
    T: Copy + PartialEq + fmt::Display + fmt::Debug + Send + Sync + 'static
{
}

/// Stock error codes used by errkit itself and available to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display, EnumIter)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A parameter was invalid
    BadParameter,

    /// A method was called on a missing receiver
    NilReceiver,

    /// A base or divisor was zero
    InvalidBase,

    /// An operation did not complete
    OperationFailed,

    /// A value was not the one expected
    UnexpectedValue,

    /// A context key was missing or held a different type
    NoSuchKey,

    /// A panic was captured and turned into an error
    Panicked,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// The default message used by the sentinel constructors.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorKind::BadParameter => "parameter is invalid",
            ErrorKind::NilReceiver => "receiver must not be nil",
            ErrorKind::InvalidBase => "base must not be zero",
            ErrorKind::OperationFailed => "operation failed",
            ErrorKind::UnexpectedValue => "value is not the one expected",
            ErrorKind::NoSuchKey => "key does not exist",
            ErrorKind::Panicked => "a panic occurred",
        }
    }
}
