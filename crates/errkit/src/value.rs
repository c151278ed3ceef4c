//! Typed lookups into an error's context.

use crate::{CodedError, ContextValue, ErrorCode, ErrorKind, Info};

/// Anything exposing a context lookup by key.
pub trait ContextLookup {
    fn get(&self, key: &str) -> Option<&dyn ContextValue>;
}

impl ContextLookup for Info {
    fn get(&self, key: &str) -> Option<&dyn ContextValue> {
        Info::get(self, key)
    }
}

impl<C: ErrorCode> ContextLookup for CodedError<C> {
    fn get(&self, key: &str) -> Option<&dyn ContextValue> {
        CodedError::get(self, key)
    }
}

impl<T: ContextLookup + ?Sized> ContextLookup for &T {
    fn get(&self, key: &str) -> Option<&dyn ContextValue> {
        (**self).get(key)
    }
}

/// Look up `key` and return it as a `T`.
///
/// `None` when the key is missing or holds a value of another type.
pub fn value<T, E>(err: &E, key: &str) -> Option<T>
where
    T: Clone + 'static,
    E: ContextLookup + ?Sized,
{
    err.get(key)
        .and_then(|found| ContextValue::as_any(found).downcast_ref::<T>())
        .cloned()
}

/// Like [`value`], but explains a miss with a `NoSuchKey` error.
///
/// The error carries the key in its context and, when the key exists with
/// another type, a suggestion naming the stored type.
pub fn try_value<T, E>(err: &E, key: &str) -> Result<T, CodedError<ErrorKind>>
where
    T: Clone + 'static,
    E: ContextLookup + ?Sized,
{
    let Some(found) = err.get(key) else {
        let mut miss = no_such_key(key);
        miss.add_suggestion(["Check that the key was added to the error"]);
        return Err(miss);
    };

    match ContextValue::as_any(found).downcast_ref::<T>() {
        Some(value) => Ok(value.clone()),
        None => {
            let mut miss = no_such_key(key);
            miss.add_suggestion([
                "Found a key with the same name but has a value of type",
                found.type_name(),
            ]);
            Err(miss)
        }
    }
}

fn no_such_key(key: &str) -> CodedError<ErrorKind> {
    let mut err = CodedError::new(ErrorKind::NoSuchKey, format!("key {key:?} does not exist"));
    err.add_context("key", key.to_string());
    err.add_frame("try_value()");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> CodedError<ErrorKind> {
        let mut err = CodedError::bad_parameter("missing name");
        err.add_context("field", "Name");
        err.add_context("attempts", 3u32);
        err
    }

    #[test]
    fn test_value_hits() {
        let err = sample();
        assert_eq!(value::<&str, _>(&err, "field"), Some("Name"));
        assert_eq!(value::<u32, _>(&err, "attempts"), Some(3));
        assert_eq!(value::<u32, _>(err.info().unwrap(), "attempts"), Some(3));
    }

    #[test]
    fn test_value_misses() {
        let err = sample();
        assert_eq!(value::<u32, _>(&err, "missing"), None);
        assert_eq!(value::<i64, _>(&err, "attempts"), None);
        assert_eq!(value::<String, _>(&err, "field"), None);
    }

    #[test]
    fn test_try_value_missing_key() {
        let err = sample();
        let miss = try_value::<u32, _>(&err, "missing").unwrap_err();
        assert_eq!(miss.code(), ErrorKind::NoSuchKey);
        assert_eq!(value::<String, _>(&miss, "key").as_deref(), Some("missing"));
    }

    #[test]
    fn test_try_value_wrong_type() {
        let err = sample();
        let miss = try_value::<String, _>(&err, "attempts").unwrap_err();
        assert_eq!(
            miss.info().unwrap().suggestions(),
            &["Found a key with the same name but has a value of type u32"]
        );
        assert_eq!(try_value::<u32, _>(&err, "attempts").unwrap(), 3);
    }
}
