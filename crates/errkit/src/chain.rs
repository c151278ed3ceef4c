//! Searching a tree of wrapped errors for a specific code.

use std::error::Error;
use std::fmt;

use crate::{CodedError, ErrorCode};

/// The unwrap shape of an error, resolved once per visited node.
pub enum Causes<'a> {
    None,
    Single(&'a (dyn Error + 'static)),
    Multi(&'a [Box<dyn Error + Send + Sync>]),
}

/// Resolve how `err` unwraps.
///
/// A [`JoinedError`] is multi-cause; every other error is single-cause
/// through [`Error::source`]. Since `JoinedError::source` is always `None`,
/// no error is ever both.
pub fn causes<'a>(err: &'a (dyn Error + 'static)) -> Causes<'a> {
    if let Some(joined) = err.downcast_ref::<JoinedError>() {
        return Causes::Multi(&joined.errors);
    }

    match err.source() {
        Some(source) => Causes::Single(source),
        None => Causes::None,
    }
}

/// Find, anywhere in the cause tree rooted at `err`, a [`CodedError<C>`]
/// whose code equals `code`.
///
/// The walk is depth-first over an explicit stack, so deep chains do not
/// grow the call stack. Causes of a multi-cause error are visited in order.
/// The walk does not track visited nodes: a cause graph that loops back on
/// itself is never exhausted.
pub fn as_with_code<'a, C: ErrorCode>(
    err: &'a (dyn Error + 'static),
    code: C,
) -> Option<&'a CodedError<C>> {
    let mut stack: Vec<&'a (dyn Error + 'static)> = vec![err];

    while let Some(top) = stack.pop() {
        if let Some(coded) = top.downcast_ref::<CodedError<C>>() {
            if coded.code() == code {
                tracing::trace!("found code {} in error chain", code);
                return Some(coded);
            }
        }

        match causes(top) {
            Causes::None => {}
            Causes::Single(source) => stack.push(source),
            Causes::Multi(errors) => {
                stack.extend(errors.iter().rev().map(|e| &**e as &(dyn Error + 'static)));
            }
        }
    }

    tracing::trace!("code {} not found in error chain", code);
    None
}

/// Like [`as_with_code`], for callers holding an optional error.
/// `None` returns `None` without walking anything.
pub fn as_with_code_opt<'a, C: ErrorCode>(
    err: Option<&'a (dyn Error + 'static)>,
    code: C,
) -> Option<&'a CodedError<C>> {
    err.and_then(|err| as_with_code(err, code))
}

/// An error with several causes.
///
/// Displays each cause on its own line. It has no single
/// [`source`](Error::source); use [`causes`] or [`JoinedError::errors`].
#[derive(Debug, Default)]
pub struct JoinedError {
    errors: Vec<Box<dyn Error + Send + Sync>>,
}

impl JoinedError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<E>(&mut self, err: E)
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        self.errors.push(err.into());
    }

    pub fn with<E>(mut self, err: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        self.push(err);
        self
    }

    pub fn errors(&self) -> &[Box<dyn Error + Send + Sync>] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for JoinedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl Error for JoinedError {}

impl<E> FromIterator<E> for JoinedError
where
    E: Into<Box<dyn Error + Send + Sync>>,
{
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[derive(Debug)]
    struct Wrapped {
        layer: usize,
        source: Box<dyn Error + Send + Sync>,
    }

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "layer {}: {}", self.layer, self.source)
        }
    }

    impl Error for Wrapped {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&*self.source)
        }
    }

    fn wrap_n(err: Box<dyn Error + Send + Sync>, layers: usize) -> Box<dyn Error + Send + Sync> {
        (0..layers).fold(err, |source, layer| -> Box<dyn Error + Send + Sync> {
            Box::new(Wrapped { layer, source })
        })
    }

    #[test]
    fn test_finds_code_through_layers() {
        for layers in [0, 1, 5] {
            let err = wrap_n(Box::new(CodedError::bad_parameter("missing name")), layers);
            let found = as_with_code(&*err, ErrorKind::BadParameter)
                .unwrap_or_else(|| panic!("not found through {layers} layers"));
            assert_eq!(found.message(), "missing name");
        }
    }

    #[test]
    fn test_absent_code() {
        let err = wrap_n(Box::new(CodedError::bad_parameter("missing name")), 3);
        assert!(as_with_code(&*err, ErrorKind::NoSuchKey).is_none());

        let plain = std::io::Error::other("plain");
        assert!(as_with_code(&plain, ErrorKind::BadParameter).is_none());
    }

    #[test]
    fn test_nil_input() {
        assert!(as_with_code_opt(None, ErrorKind::BadParameter).is_none());

        let err = CodedError::bad_parameter("x");
        let present: &(dyn Error + 'static) = &err;
        assert!(as_with_code_opt(Some(present), ErrorKind::BadParameter).is_some());
    }

    #[test]
    fn test_other_code_type_is_skipped() {
        #[derive(Debug, Clone, Copy, PartialEq, strum_macros::Display)]
        enum Other {
            BadParameter,
        }

        let err = CodedError::new(Other::BadParameter, "same name, other type");
        assert!(as_with_code(&err, ErrorKind::BadParameter).is_none());
        assert!(as_with_code(&err, Other::BadParameter).is_some());
    }

    #[test]
    fn test_searches_inner_cause() {
        let mut outer = CodedError::operation_failed("save failed");
        outer.set_inner(CodedError::unexpected_value("bad header"));

        let found = as_with_code(&outer, ErrorKind::UnexpectedValue).unwrap();
        assert_eq!(found.message(), "bad header");
    }

    #[test]
    fn test_multi_cause() {
        let joined = JoinedError::new()
            .with(std::io::Error::other("first"))
            .with(wrap_n(Box::new(CodedError::unexpected_value("deep")), 2))
            .with(CodedError::unexpected_value("shallow"));

        assert_eq!(joined.len(), 3);
        let found = as_with_code(&joined, ErrorKind::UnexpectedValue).unwrap();
        assert_eq!(found.message(), "deep");

        let wrapped = wrap_n(Box::new(joined), 2);
        assert!(as_with_code(&*wrapped, ErrorKind::UnexpectedValue).is_some());
        assert!(as_with_code(&*wrapped, ErrorKind::Panicked).is_none());
    }

    #[test]
    fn test_causes_shape() {
        let joined: JoinedError = vec![std::io::Error::other("a")].into_iter().collect();
        assert!(matches!(causes(&joined), Causes::Multi(errors) if errors.len() == 1));

        let plain = std::io::Error::other("a");
        assert!(matches!(causes(&plain), Causes::None));

        let wrapped = wrap_n(Box::new(plain), 1);
        assert!(matches!(causes(&*wrapped), Causes::Single(_)));
    }

    #[test]
    fn test_joined_display() {
        let joined = JoinedError::new().with("first").with("second");
        assert_eq!(joined.to_string(), "first\nsecond");
    }
}
