//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the ringmenu crate.
#[derive(Debug)]
pub enum CarouselError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML/JSON options parsing or serialization failure.
    OptionsParse(String),
    /// The configured item list is empty, so there is no ring to build.
    EmptyRing,
    /// Viewer event-loop failure.
    Viewer(String),
    /// Browser environment failure (missing window, DOM call rejected).
    Web(String),
}

impl fmt::Display for CarouselError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::EmptyRing => {
                write!(f, "carousel needs at least one item")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
            Self::Web(msg) => write!(f, "web error: {msg}"),
        }
    }
}

impl std::error::Error for CarouselError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for CarouselError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for CarouselError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            CarouselError::EmptyRing.to_string(),
            "carousel needs at least one item"
        );
        assert_eq!(
            CarouselError::OptionsParse("bad key".into()).to_string(),
            "options parse error: bad key"
        );
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err: CarouselError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
        assert!(CarouselError::Web("no window".into()).source().is_none());
    }
}
