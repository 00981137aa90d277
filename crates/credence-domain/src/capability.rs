//! Availability wrapper for collaborators that may be missing at runtime

/// A collaborator that is either ready to use or explicitly unavailable
///
/// Optional services (news search, summarization) and the NLP model are all
/// held behind this shape, so callers check availability up front instead of
/// probing for a null handle.
///
/// # Examples
///
/// ```
/// use credence_domain::Capability;
///
/// let present = Capability::available(42);
/// assert!(present.is_available());
/// assert_eq!(present.get(), Some(&42));
///
/// let missing: Capability<i32> = Capability::unavailable("no API key configured");
/// assert!(!missing.is_available());
/// assert_eq!(missing.reason(), Some("no API key configured"));
/// ```
#[derive(Debug, Clone)]
pub enum Capability<T> {
    /// The collaborator loaded and can be called
    Available(T),
    /// The collaborator could not be set up
    Unavailable {
        /// Why it is missing
        reason: String,
    },
}

impl<T> Capability<T> {
    /// Wrap a ready collaborator
    pub fn available(inner: T) -> Self {
        Capability::Available(inner)
    }

    /// Record a missing collaborator
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Capability::Unavailable {
            reason: reason.into(),
        }
    }

    /// Whether the collaborator can be called
    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }

    /// Borrow the collaborator if it is available
    pub fn get(&self) -> Option<&T> {
        match self {
            Capability::Available(inner) => Some(inner),
            Capability::Unavailable { .. } => None,
        }
    }

    /// Reason the collaborator is missing, if it is
    pub fn reason(&self) -> Option<&str> {
        match self {
            Capability::Available(_) => None,
            Capability::Unavailable { reason } => Some(reason),
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for Capability<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(inner) => Capability::Available(inner),
            Err(e) => Capability::unavailable(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        let ok: Capability<u8> = Ok::<u8, String>(1).into();
        assert!(ok.is_available());

        let err: Capability<u8> = Err::<u8, String>("model missing".to_string()).into();
        assert_eq!(err.reason(), Some("model missing"));
        assert!(err.get().is_none());
    }
}
