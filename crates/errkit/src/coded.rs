//! The coded error type.

use std::error::Error;
use std::fmt;

use crate::{Cause, ContextValue, Diagnostic, ErrorCode, ErrorKind, ErrorLevel, Info};

/// Message used when a coded error has an empty one.
pub const DEFAULT_MESSAGE: &str = "something went wrong";

/// A structured error carrying a level, a code, a message and diagnostic
/// info.
///
/// The display format is load-bearing and always a single line:
///
/// ```text
/// [<level>] <code>: <message>
/// ```
///
/// ```rust
/// use errkit::{CodedError, ErrorKind};
///
/// let mut err = CodedError::new(ErrorKind::BadParameter, "missing name");
/// err.add_suggestion(["Provide", "a", "name"]);
/// err.add_context("field", "Name");
///
/// assert_eq!(err.to_string(), "[ERROR] BadParameter: missing name");
/// assert!(err.has("field"));
/// ```
///
/// A "nil" coded error is `Option::<CodedError<C>>::None`; see [`NilSafe`]
/// for the helpers that quietly do nothing on it.
#[derive(Debug, Clone)]
pub struct CodedError<C: ErrorCode> {
    level: ErrorLevel,
    code: C,
    message: String,
    info: Option<Info>,
}

impl<C: ErrorCode> CodedError<C> {
    /// Create an error at [`ErrorLevel::ERROR`] with empty info.
    pub fn new(code: C, message: impl Into<String>) -> Self {
        Self::new_with_severity(ErrorLevel::ERROR, code, message)
    }

    pub fn new_with_severity(level: ErrorLevel, code: C, message: impl Into<String>) -> Self {
        Self {
            level,
            code,
            message: message.into(),
            info: Some(Info::new()),
        }
    }

    /// Build a coded error whose message is another error's display string.
    pub fn from_error(code: C, err: &(dyn Error + 'static)) -> Self {
        Self::new(code, err.to_string())
    }

    /// Re-wrap a diagnostic error under a new code.
    ///
    /// The raw message is reused (so the `[level] code:` prefix is not
    /// repeated) and the info moves to the new error; `inner` is left
    /// without info.
    pub fn wrap<D: Diagnostic + ?Sized>(code: C, inner: &mut D) -> Self {
        let info = inner.take_info().unwrap_or_default();
        Self {
            level: ErrorLevel::ERROR,
            code,
            message: inner.message().to_string(),
            info: Some(info),
        }
    }

    pub fn level(&self) -> ErrorLevel {
        self.level
    }

    pub fn code(&self) -> C {
        self.code
    }

    /// The raw message, not the formatted display string.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn change_severity(&mut self, level: ErrorLevel) {
        self.level = level;
    }

    /// Alias of [`change_severity`](Self::change_severity).
    pub fn modify_level(&mut self, level: ErrorLevel) {
        self.level = level;
    }

    /// Copy the error. The info is copied too, so mutating the clone's
    /// context, suggestions or frames does not touch the original.
    pub fn clone_error(&self) -> Self {
        Self {
            level: self.level,
            code: self.code,
            message: self.message.clone(),
            info: self.info.as_ref().map(Info::copy),
        }
    }

    pub fn info(&self) -> Option<&Info> {
        self.info.as_ref()
    }

    pub fn info_mut(&mut self) -> Option<&mut Info> {
        self.info.as_mut()
    }

    /// Drop the info. Every info helper becomes a no-op afterwards.
    pub fn clear_info(&mut self) {
        self.info = None;
    }

    /// Returns `false` if the error has no info.
    pub fn add_context<V: ContextValue>(&mut self, key: impl Into<String>, value: V) -> bool {
        match self.info.as_mut() {
            Some(info) => info.add_context(key, value),
            None => false,
        }
    }

    pub fn add_suggestion<I, S>(&mut self, parts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(info) = self.info.as_mut() {
            info.add_suggestion(parts);
        }
    }

    pub fn add_frame(&mut self, frame: impl Into<String>) {
        if let Some(info) = self.info.as_mut() {
            info.add_frame(frame);
        }
    }

    pub fn set_inner(&mut self, inner: impl Into<Cause>) {
        if let Some(info) = self.info.as_mut() {
            info.set_inner(inner);
        }
    }

    pub fn get(&self, key: &str) -> Option<&dyn ContextValue> {
        self.info.as_ref().and_then(|info| info.get(key))
    }

    pub fn has(&self, key: &str) -> bool {
        self.info.as_ref().is_some_and(|info| info.has(key))
    }
}

impl<C: ErrorCode> fmt::Display for CodedError<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = if self.message.is_empty() {
            DEFAULT_MESSAGE
        } else {
            self.message.as_str()
        };

        write!(f, "[{}] {}: {}", self.level, self.code, message)
    }
}

impl<C: ErrorCode> Error for CodedError<C> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.info
            .as_ref()
            .and_then(Info::inner)
            .map(Cause::as_error)
    }
}

impl<C: ErrorCode> Diagnostic for CodedError<C> {
    fn message(&self) -> &str {
        &self.message
    }

    fn info(&self) -> Option<&Info> {
        self.info.as_ref()
    }

    fn take_info(&mut self) -> Option<Info> {
        self.info.take()
    }

    fn as_error(&self) -> &(dyn Error + 'static) {
        self
    }
}

impl CodedError<ErrorKind> {
    /// A fresh `NilReceiver` error with the stock message.
    pub fn nil_receiver() -> Self {
        Self::new(
            ErrorKind::NilReceiver,
            ErrorKind::NilReceiver.default_message(),
        )
    }

    /// A fresh `InvalidBase` error with the stock message.
    pub fn invalid_base() -> Self {
        Self::new(
            ErrorKind::InvalidBase,
            ErrorKind::InvalidBase.default_message(),
        )
    }

    pub fn bad_parameter(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadParameter, message)
    }

    pub fn operation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OperationFailed, message)
    }

    pub fn unexpected_value(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnexpectedValue, message)
    }
}

/// Null-object helpers for an optional coded error.
///
/// Every mutator is a no-op on `None`, and [`is_nil`](NilSafe::is_nil) is
/// true only for `None`, whatever the fields of a `Some` value hold.
pub trait NilSafe {
    fn is_nil(&self) -> bool;

    fn change_severity(&mut self, level: ErrorLevel);

    fn modify_level(&mut self, level: ErrorLevel);

    fn add_context<V: ContextValue>(&mut self, key: impl Into<String>, value: V) -> bool;

    fn add_suggestion<I, S>(&mut self, parts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>;

    fn add_frame(&mut self, frame: impl Into<String>);

    fn set_inner(&mut self, inner: impl Into<Cause>);

    fn clear_info(&mut self);
}

impl<C: ErrorCode> NilSafe for Option<CodedError<C>> {
    fn is_nil(&self) -> bool {
        self.is_none()
    }

    fn change_severity(&mut self, level: ErrorLevel) {
        if let Some(err) = self {
            err.change_severity(level);
        }
    }

    fn modify_level(&mut self, level: ErrorLevel) {
        if let Some(err) = self {
            err.modify_level(level);
        }
    }

    fn add_context<V: ContextValue>(&mut self, key: impl Into<String>, value: V) -> bool {
        match self {
            Some(err) => err.add_context(key, value),
            None => false,
        }
    }

    fn add_suggestion<I, S>(&mut self, parts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(err) = self {
            err.add_suggestion(parts);
        }
    }

    fn add_frame(&mut self, frame: impl Into<String>) {
        if let Some(err) = self {
            err.add_frame(frame);
        }
    }

    fn set_inner(&mut self, inner: impl Into<Cause>) {
        if let Some(err) = self {
            err.set_inner(inner);
        }
    }

    fn clear_info(&mut self) {
        if let Some(err) = self {
            err.clear_info();
        }
    }
}
