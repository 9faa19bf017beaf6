//! Image backend trait and shared types.
//!
//! The resolver only ever needs an image's pixel dimensions, so the
//! [`ImageBackend`] trait has a single operation. The production
//! implementation is [`RustBackend`](super::rust_backend::RustBackend);
//! tests substitute the recording [`tests::MockBackend`].

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {message}")]
    Decode { path: String, message: String },
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image dimension readers.
///
/// `Sync` so a single backend can be shared by parallel resolutions.
pub trait ImageBackend: Sync {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock backend serving canned dimensions by filename and recording
    /// every identify call. Unknown files fail to decode.
    #[derive(Default)]
    pub struct MockBackend {
        pub dimensions: HashMap<String, Dimensions>,
        pub identified: Mutex<Vec<String>>,
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Backend knowing the height of each named file (width is fixed).
        pub fn with_heights(heights: &[(&str, u32)]) -> Self {
            Self {
                dimensions: heights
                    .iter()
                    .map(|(name, height)| {
                        (
                            name.to_string(),
                            Dimensions {
                                width: 400,
                                height: *height,
                            },
                        )
                    })
                    .collect(),
                identified: Mutex::new(Vec::new()),
            }
        }

        /// Filenames passed to `identify`, in call order.
        pub fn get_identified(&self) -> Vec<String> {
            self.identified.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            self.identified.lock().unwrap().push(name.clone());

            self.dimensions
                .get(&name)
                .copied()
                .ok_or_else(|| BackendError::Decode {
                    path: path.display().to_string(),
                    message: "No mock dimensions".to_string(),
                })
        }
    }

    #[test]
    fn mock_serves_known_file() {
        let backend = MockBackend::with_heights(&[("hero.jpg", 286)]);

        let dims = backend.identify(Path::new("/images/hero.jpg")).unwrap();
        assert_eq!(dims.height, 286);
        assert_eq!(backend.get_identified(), vec!["hero.jpg"]);
    }

    #[test]
    fn mock_fails_unknown_file() {
        let backend = MockBackend::new();

        let result = backend.identify(Path::new("/images/missing.jpg"));
        assert!(matches!(result, Err(BackendError::Decode { .. })));
        assert_eq!(backend.get_identified(), vec!["missing.jpg"]);
    }
}
