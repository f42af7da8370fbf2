/// Convenience alias for results produced by this crate.
pub type SceneshotResult<T> = Result<T, SceneshotError>;

/// Error taxonomy for snapshot capture.
///
/// `SizeInvalid`, `FormatUnsupported` and `AllocationFailed` are ordinary
/// negative outcomes a caller is expected to handle; none of them indicates a
/// bug. `DrainTimeout` only occurs when a drain deadline is configured.
#[derive(thiserror::Error, Debug)]
pub enum SceneshotError {
    /// The node resolved to zero width or height; there is nothing to capture.
    #[error("node resolves to zero width or height, nothing to capture")]
    SizeInvalid,

    /// The requested pixel format is outside the set the capture pipeline can
    /// target directly.
    #[error("unsupported snapshot color format: {0}")]
    FormatUnsupported(String),

    /// Allocating or reshaping the destination pixel buffer failed.
    #[error("pixel buffer allocation failed: {0}")]
    AllocationFailed(String),

    /// The draw-task drain loop exceeded its configured deadline.
    #[error("draw task drain exceeded its deadline")]
    DrainTimeout,

    /// Error forwarded from a rendering collaborator.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneshotError {
    /// Build a [`SceneshotError::FormatUnsupported`] from anything printable.
    pub fn format_unsupported(format: impl std::fmt::Display) -> Self {
        Self::FormatUnsupported(format.to_string())
    }

    /// Build a [`SceneshotError::AllocationFailed`] from a message.
    pub fn allocation_failed(msg: impl Into<String>) -> Self {
        Self::AllocationFailed(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            SceneshotError::allocation_failed("x")
                .to_string()
                .contains("allocation failed")
        );
        assert!(
            SceneshotError::format_unsupported("Nv12")
                .to_string()
                .contains("unsupported snapshot color format:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = SceneshotError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
