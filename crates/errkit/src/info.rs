//! Diagnostic metadata attached to a coded error.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::Cause;

/// A value that can be stored in an error's context.
///
/// Anything `'static + Display + Debug + Send + Sync` qualifies. The value is
/// displayed by the renderer and recovered by downcasting in
/// [`value`](crate::value).
pub trait ContextValue: Any + fmt::Display + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn type_name(&self) -> &'static str;
}

impl<T> ContextValue for T
where
    T: Any + fmt::Display + fmt::Debug + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Mutable diagnostic record: context, suggestions, frames, cause, timestamp.
///
/// Context keys are kept sorted so rendering is deterministic. Cloning an
/// `Info` gives independent context, suggestion and frame storage; the
/// nested cause and the context values themselves are shared.
#[derive(Debug, Clone, Default)]
pub struct Info {
    context: BTreeMap<String, Arc<dyn ContextValue>>,
    suggestions: Vec<String>,
    frames: Vec<String>,
    inner: Option<Cause>,
    timestamp: Option<DateTime<Utc>>,
}

impl Info {
    /// Create an empty info stamped with the current time.
    pub fn new() -> Self {
        Self {
            timestamp: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Create an empty info with a fixed timestamp (or none).
    pub fn with_timestamp(timestamp: Option<DateTime<Utc>>) -> Self {
        Self {
            timestamp,
            ..Default::default()
        }
    }

    /// Independent copy. The nested cause is shared, not cloned.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Join `parts` with a single space and append the sentence.
    /// Does nothing if `parts` is empty.
    pub fn add_suggestion<I, S>(&mut self, parts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sentence = String::new();
        let mut any = false;
        for part in parts {
            if any {
                sentence.push(' ');
            }
            sentence.push_str(part.as_ref());
            any = true;
        }

        if any {
            self.suggestions.push(sentence);
        }
    }

    pub fn add_frame(&mut self, frame: impl Into<String>) {
        self.frames.push(frame.into());
    }

    /// Replace the nested cause.
    pub fn set_inner(&mut self, inner: impl Into<Cause>) {
        self.inner = Some(inner.into());
    }

    pub fn take_inner(&mut self) -> Option<Cause> {
        self.inner.take()
    }

    /// Insert or overwrite a context entry. Always returns `true`; the
    /// `false` case belongs to errors that carry no info.
    pub fn add_context<V: ContextValue>(&mut self, key: impl Into<String>, value: V) -> bool {
        self.context.insert(key.into(), Arc::new(value));
        true
    }

    pub fn get(&self, key: &str) -> Option<&dyn ContextValue> {
        self.context.get(key).map(|value| &**value)
    }

    pub fn has(&self, key: &str) -> bool {
        self.context.contains_key(key)
    }

    /// Context entries in key order.
    pub fn context(&self) -> impl Iterator<Item = (&str, &dyn ContextValue)> {
        self.context
            .iter()
            .map(|(key, value)| (key.as_str(), &**value))
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Frames in insertion order (innermost last).
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn inner(&self) -> Option<&Cause> {
        self.inner.as_ref()
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn has_context(&self) -> bool {
        !self.context.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_info_is_empty_and_stamped() {
        let info = Info::new();
        assert!(!info.has_context());
        assert!(info.suggestions().is_empty());
        assert!(info.frames().is_empty());
        assert!(info.inner().is_none());
        assert!(info.timestamp().is_some());
    }

    #[test]
    fn test_add_suggestion_joins_parts() {
        let mut info = Info::new();
        info.add_suggestion(["Provide", "a", "name"]);
        info.add_suggestion(Vec::<String>::new());
        info.add_suggestion(["Retry"]);
        assert_eq!(info.suggestions(), &["Provide a name", "Retry"]);
    }

    #[test]
    fn test_add_frame_keeps_empty_frames() {
        let mut info = Info::new();
        info.add_frame("main()");
        info.add_frame("");
        assert_eq!(info.frames(), &["main()".to_string(), String::new()]);
    }

    #[test]
    fn test_context_overwrite() {
        let mut info = Info::new();
        assert!(info.add_context("field", "Name"));
        assert!(info.add_context("field", 42));
        assert!(info.has("field"));
        assert!(!info.has("other"));

        let value = info.get("field").unwrap();
        assert_eq!(value.to_string(), "42");
        assert_eq!(ContextValue::as_any(value).downcast_ref::<i32>(), Some(&42));
    }

    #[test]
    fn test_copy_is_isolated() {
        let mut original = Info::new();
        original.add_context("a", 1);
        original.add_suggestion(["keep"]);
        original.add_frame("outer");

        let mut copy = original.copy();
        copy.add_context("b", 2);
        copy.add_context("a", 3);
        copy.add_suggestion(["extra"]);
        copy.add_frame("inner");

        assert!(!original.has("b"));
        assert_eq!(original.get("a").unwrap().to_string(), "1");
        assert_eq!(original.suggestions(), &["keep"]);
        assert_eq!(original.frames(), &["outer"]);
        assert_eq!(copy.timestamp(), original.timestamp());
    }

    #[test]
    fn test_set_inner_last_write_wins() {
        let mut info = Info::new();
        info.set_inner(std::io::Error::other("first"));
        info.set_inner(std::io::Error::other("second"));
        assert_eq!(info.inner().unwrap().to_string(), "second");
    }
}
