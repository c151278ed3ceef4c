//! Rendering an error and its diagnostic info to a sink.
//!
//! The layout is fixed so tooling can diff it:
//!
//! ```text
//! [ERROR] BadParameter: missing name
//! Occurred at: 2024-05-01T10:00:00+00:00
//! Suggestions:
//! - Provide a name
//! Context:
//! - field: Name
//! Stack trace:
//! - main() <- load() <- parse()
//! Caused by:
//! [ERROR] OperationFailed: read failed
//! ```
//!
//! Each block is written only when it has content. A write failure stops
//! rendering and is returned as is.

use std::error::Error;
use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};

use crate::{Cause, CodedError, Diagnostic, ErrorCode, ErrorKind, Info, JoinedError};

/// Renderer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Write the `Occurred at:` line for errors that carry a timestamp.
    pub timestamps: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { timestamps: true }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }
}

/// An error the renderer can display, optionally with diagnostic info.
///
/// Type-erased errors expose info when they hold a `CodedError<ErrorKind>`.
/// Errors with other code types keep theirs through `dyn Diagnostic`.
pub trait Report: fmt::Display {
    fn info(&self) -> Option<&Info> {
        None
    }
}

impl<C: ErrorCode> Report for CodedError<C> {
    fn info(&self) -> Option<&Info> {
        CodedError::info(self)
    }
}

impl Report for Cause {
    fn info(&self) -> Option<&Info> {
        Cause::info(self)
    }
}

impl Report for dyn Diagnostic {
    fn info(&self) -> Option<&Info> {
        Diagnostic::info(self)
    }
}

impl Report for Box<dyn Diagnostic> {
    fn info(&self) -> Option<&Info> {
        Diagnostic::info(&**self)
    }
}

impl Report for JoinedError {}

impl Report for io::Error {}

impl Report for dyn Error + 'static {
    fn info(&self) -> Option<&Info> {
        erased_info(self)
    }
}

impl Report for dyn Error + Send + Sync + 'static {
    fn info(&self) -> Option<&Info> {
        erased_info(self)
    }
}

impl Report for Box<dyn Error + Send + Sync> {
    fn info(&self) -> Option<&Info> {
        erased_info(&**self)
    }
}

fn erased_info<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a Info> {
    err.downcast_ref::<CodedError<ErrorKind>>()
        .and_then(CodedError::info)
}

impl<T: Report + ?Sized> Report for &T {
    fn info(&self) -> Option<&Info> {
        (**self).info()
    }
}

/// Write `err` and its info with the default [`RenderConfig`].
pub fn write_error<W, E>(w: &mut W, err: &E) -> io::Result<()>
where
    W: io::Write + ?Sized,
    E: Report + ?Sized,
{
    write_error_with(w, err, &RenderConfig::default())
}

/// Write the display string of `err` verbatim and, if it carries info, a
/// newline followed by the info blocks.
///
/// Output ends with a newline only when info was written; a plain error is
/// written as its bare display string. Under `Caused by:` a plain cause is
/// always followed by a newline.
pub fn write_error_with<W, E>(w: &mut W, err: &E, config: &RenderConfig) -> io::Result<()>
where
    W: io::Write + ?Sized,
    E: Report + ?Sized,
{
    write!(w, "{err}")?;

    if let Some(info) = err.info() {
        writeln!(w)?;
        write_info(w, info, config)?;
    }

    Ok(())
}

/// Write the info blocks only: timestamp, suggestions, context, stack trace
/// and the cause, rendered recursively.
pub fn write_info<W>(w: &mut W, info: &Info, config: &RenderConfig) -> io::Result<()>
where
    W: io::Write + ?Sized,
{
    if config.timestamps {
        if let Some(timestamp) = info.timestamp() {
            writeln!(w, "Occurred at: {}", timestamp.to_rfc3339())?;
        }
    }

    if !info.suggestions().is_empty() {
        writeln!(w, "Suggestions:")?;
        for suggestion in info.suggestions() {
            writeln!(w, "- {suggestion}")?;
        }
    }

    if info.has_context() {
        writeln!(w, "Context:")?;
        for (key, value) in info.context() {
            writeln!(w, "- {key}: {value}")?;
        }
    }

    if !info.frames().is_empty() {
        let trail: Vec<&str> = info.frames().iter().rev().map(String::as_str).collect();
        writeln!(w, "Stack trace:")?;
        writeln!(w, "- {}", trail.join(" <- "))?;
    }

    if let Some(inner) = info.inner() {
        writeln!(w, "Caused by:")?;
        write_error_with(w, inner, config)?;
        if inner.info().is_none() {
            writeln!(w)?;
        }
    }

    Ok(())
}

/// Render the info of `err` (not its message) to `w`, then panic with `err`
/// as the payload. `None` does nothing.
///
/// A failure to render is logged and does not prevent the panic.
pub fn panic_with<W, E>(w: &mut W, err: Option<E>)
where
    W: io::Write + ?Sized,
    E: Report + Send + 'static,
{
    let Some(err) = err else {
        return;
    };

    if let Some(info) = err.info() {
        if let Err(write_err) = write_info(w, info, &RenderConfig::default()) {
            tracing::debug!("failed to render error info before panicking: {}", write_err);
        }
    }

    tracing::debug!("panicking with {}", err);
    std::panic::panic_any(err)
}
