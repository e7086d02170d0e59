use std::borrow::Cow;
use std::error::Error;
use std::fmt::{self, Display};

/// The kind of session cache failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheErrorKind {
    /// The storage is not accessible at all (disabled, torn down, etc).
    Unavailable,
    /// The storage refused to hold more data.
    QuotaExceeded,
    /// Any other errors.
    Other,
}

impl Display for CacheErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheErrorKind::Unavailable => write!(f, "Storage unavailable"),
            CacheErrorKind::QuotaExceeded => write!(f, "Quota exceeded"),
            CacheErrorKind::Other => write!(f, "Storage error"),
        }
    }
}

/// Describes a failed session cache access.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheError {
    kind: CacheErrorKind,
    reason: Option<String>,
}

impl CacheError {
    /// Creates a new error with the `Unavailable` kind.
    #[inline]
    pub fn unavailable() -> Self {
        Self {
            kind: CacheErrorKind::Unavailable,
            reason: None,
        }
    }

    /// Creates a new error with the `QuotaExceeded` kind.
    #[inline]
    pub fn quota_exceeded() -> Self {
        Self {
            kind: CacheErrorKind::QuotaExceeded,
            reason: None,
        }
    }

    /// Creates a new error with the `Other` kind.
    #[inline]
    pub fn other() -> Self {
        Self {
            kind: CacheErrorKind::Other,
            reason: None,
        }
    }

    /// Attaches a reason to the error.
    #[inline]
    pub fn with_reason<S: Into<String>>(self, reason: S) -> Self {
        Self {
            kind: self.kind,
            reason: Some(reason.into()),
        }
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> CacheErrorKind {
        self.kind
    }

    /// Returns the reason for the error.
    #[inline]
    pub fn reason(&self) -> Cow<'_, str> {
        match self.reason.as_deref() {
            Some(reason) => Cow::Borrowed(reason),
            None => Cow::Owned(format!("{}", self.kind)),
        }
    }
}

impl Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "{}: {reason}", self.kind),
            None => self.kind.fmt(f),
        }
    }
}

impl Error for CacheError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_falls_back_to_kind() {
        let err = CacheError::quota_exceeded();
        assert_eq!(err.reason(), "Quota exceeded");
        assert_eq!(err.to_string(), "Quota exceeded");

        let err = CacheError::unavailable().with_reason("private mode");
        assert_eq!(err.kind(), CacheErrorKind::Unavailable);
        assert_eq!(err.reason(), "private mode");
        assert_eq!(err.to_string(), "Storage unavailable: private mode");
    }
}
