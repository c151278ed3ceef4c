use std::error::Error;

use anyhow::{Result, anyhow};

/// Check that `got` has the display string `expected`.
///
/// An empty `expected` means no error is wanted.
pub fn check_err(expected: &str, got: Option<&dyn Error>) -> Result<()> {
    match (expected.is_empty(), got) {
        (true, None) => Ok(()),
        (true, Some(got)) => Err(anyhow!("want no error, got {:?}", got.to_string())),
        (false, None) => Err(anyhow!("want {expected:?}, got no error")),
        (false, Some(got)) => {
            let got = got.to_string();
            if got == expected {
                Ok(())
            } else {
                Err(anyhow!("want {expected:?}, got {got:?}"))
            }
        }
    }
}

/// Two errors are equal when both are present and display the same.
pub fn equals_err(a: Option<&dyn Error>, b: Option<&dyn Error>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.to_string() == b.to_string(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_check_err() {
        let err = io::Error::other("something went wrong");
        assert!(check_err("something went wrong", Some(&err)).is_ok());
        assert!(check_err("", None).is_ok());

        let failure = check_err("", Some(&err)).unwrap_err();
        assert_eq!(
            failure.to_string(),
            "want no error, got \"something went wrong\""
        );

        let failure = check_err("other", None).unwrap_err();
        assert_eq!(failure.to_string(), "want \"other\", got no error");

        let failure = check_err("other", Some(&err)).unwrap_err();
        assert_eq!(
            failure.to_string(),
            "want \"other\", got \"something went wrong\""
        );
    }

    #[test]
    fn test_equals_err() {
        let a = io::Error::other("same");
        let b = io::Error::new(io::ErrorKind::NotFound, "same");
        let c = io::Error::other("different");

        assert!(equals_err(Some(&a), Some(&b)));
        assert!(!equals_err(Some(&a), Some(&c)));
        assert!(!equals_err(Some(&a), None));
        assert!(!equals_err(None, None));
    }
}
