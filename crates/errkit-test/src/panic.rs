use std::any::Any;
use std::fmt;
use std::panic::{self, UnwindSafe};

use errkit::{CodedError, ErrorKind};

/// A captured panic.
///
/// String payloads (the `panic!("...")` kind) keep their text. Any other
/// payload is kept boxed and can be recovered with
/// [`payload_ref`](PanicError::payload_ref).
pub struct PanicError {
    message: Option<String>,
    payload: Box<dyn Any + Send>,
}

impl PanicError {
    pub fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&'static str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned());

        Self { message, payload }
    }

    /// The panic message, if the payload was a string.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn payload_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload
    }

    /// Turn the panic into a regular `Panicked` error.
    pub fn into_coded(self) -> CodedError<ErrorKind> {
        let mut err = CodedError::new(ErrorKind::Panicked, self.to_string());
        if self.message.is_none() {
            err.add_suggestion(["Use payload_ref to inspect a non-string payload"]);
        }
        err
    }
}

impl fmt::Display for PanicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "panic: {message}"),
            None => write!(f, "panic: <non-string payload>"),
        }
    }
}

impl fmt::Debug for PanicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanicError")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl std::error::Error for PanicError {}

/// Run `f` and turn a panic into a value. `None` means `f` returned normally.
pub fn capture_panic<F>(f: F) -> Option<PanicError>
where
    F: FnOnce() + UnwindSafe,
{
    match panic::catch_unwind(f) {
        Ok(()) => None,
        Err(payload) => Some(PanicError::from_payload(payload)),
    }
}
