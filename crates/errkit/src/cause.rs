//! The nested cause stored in an error's info.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::{CodedError, ErrorCode, ErrorKind, Info, JoinedError};

/// An error that carries a diagnostic payload.
///
/// Implemented by [`CodedError`] for every code type. This is the type-erased
/// view the renderer and [`CodedError::wrap`] use when the concrete code type
/// is not known.
pub trait Diagnostic: Error + Send + Sync + 'static {
    /// The raw message, without the `[level] code:` prefix.
    fn message(&self) -> &str;

    fn info(&self) -> Option<&Info>;

    /// Remove and return the info, leaving the error without one.
    fn take_info(&mut self) -> Option<Info>;

    fn as_error(&self) -> &(dyn Error + 'static);
}

/// A nested cause: either an error with its own diagnostic info, or a plain
/// error. Both are shared, so copying an [`Info`] never deep-clones its cause.
#[derive(Clone)]
pub enum Cause {
    Diagnostic(Arc<dyn Diagnostic>),
    Plain(Arc<dyn Error + Send + Sync>),
}

impl Cause {
    pub fn plain<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Cause::Plain(Arc::new(error))
    }

    pub fn diagnostic<D: Diagnostic>(error: D) -> Self {
        Cause::Diagnostic(Arc::new(error))
    }

    pub fn as_error(&self) -> &(dyn Error + 'static) {
        match self {
            Cause::Diagnostic(err) => err.as_error(),
            Cause::Plain(err) => &**err,
        }
    }

    /// The cause's info, if it is a diagnostic error that still has one.
    pub fn info(&self) -> Option<&Info> {
        match self {
            Cause::Diagnostic(err) => err.info(),
            Cause::Plain(_) => None,
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_error(), f)
    }
}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::Diagnostic(err) => f.debug_tuple("Diagnostic").field(err).finish(),
            Cause::Plain(err) => f.debug_tuple("Plain").field(err).finish(),
        }
    }
}

impl<C: ErrorCode> From<CodedError<C>> for Cause {
    fn from(err: CodedError<C>) -> Self {
        Cause::diagnostic(err)
    }
}

impl From<JoinedError> for Cause {
    fn from(err: JoinedError) -> Self {
        Cause::plain(err)
    }
}

impl From<std::io::Error> for Cause {
    fn from(err: std::io::Error) -> Self {
        Cause::plain(err)
    }
}

impl From<std::fmt::Error> for Cause {
    fn from(err: std::fmt::Error) -> Self {
        Cause::plain(err)
    }
}

/// A boxed `CodedError<ErrorKind>` is recovered as a diagnostic cause. Other
/// code types cannot be named here; box them as `Box<dyn Diagnostic>` to keep
/// their info.
impl From<Box<dyn Error + Send + Sync>> for Cause {
    fn from(err: Box<dyn Error + Send + Sync>) -> Self {
        match err.downcast::<CodedError<ErrorKind>>() {
            Ok(coded) => Cause::Diagnostic(Arc::from(coded as Box<dyn Diagnostic>)),
            Err(err) => Cause::Plain(Arc::from(err)),
        }
    }
}

impl From<Box<dyn Diagnostic>> for Cause {
    fn from(err: Box<dyn Diagnostic>) -> Self {
        Cause::Diagnostic(Arc::from(err))
    }
}

impl From<Arc<dyn Error + Send + Sync>> for Cause {
    fn from(err: Arc<dyn Error + Send + Sync>) -> Self {
        Cause::Plain(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_cause_has_no_info() {
        let cause = Cause::from(std::io::Error::other("disk full"));
        assert!(cause.info().is_none());
        assert_eq!(cause.to_string(), "disk full");
    }

    #[test]
    fn test_diagnostic_cause_exposes_info() {
        let mut err = CodedError::new(ErrorKind::OperationFailed, "write failed");
        err.add_context("path", "/tmp/out");

        let cause = Cause::from(err);
        assert!(cause.info().unwrap().has("path"));
        assert_eq!(cause.to_string(), "[ERROR] OperationFailed: write failed");
        assert!(
            cause
                .as_error()
                .downcast_ref::<CodedError<ErrorKind>>()
                .is_some()
        );
    }

    #[test]
    fn test_boxed_error_becomes_plain() {
        let boxed: Box<dyn Error + Send + Sync> = "bad input".into();
        let cause = Cause::from(boxed);
        assert!(matches!(cause, Cause::Plain(_)));
        assert_eq!(cause.to_string(), "bad input");
    }

    #[test]
    fn test_boxed_coded_error_keeps_info() {
        let mut err = CodedError::unexpected_value("bad header");
        err.add_context("offset", 12);
        let boxed: Box<dyn Error + Send + Sync> = Box::new(err);

        let cause = Cause::from(boxed);
        assert!(matches!(cause, Cause::Diagnostic(_)));
        assert!(cause.info().unwrap().has("offset"));
    }

    #[test]
    fn test_boxed_diagnostic_keeps_info() {
        #[derive(Debug, Clone, Copy, PartialEq, strum_macros::Display)]
        enum Storage {
            Corrupt,
        }

        let mut err = CodedError::new(Storage::Corrupt, "checksum mismatch");
        err.add_frame("verify()");
        let boxed: Box<dyn Diagnostic> = Box::new(err);

        let cause = Cause::from(boxed);
        assert_eq!(cause.info().unwrap().frames(), &["verify()"]);
        assert_eq!(cause.to_string(), "[ERROR] Corrupt: checksum mismatch");
    }
}
