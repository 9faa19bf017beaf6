//! Rendered height of an image rule.
//!
//! In hidpi-only mode every served image is the double-density asset, so the
//! height the page should reserve is half the pixel height. Explicit hidpi
//! files keep their raw height.

use super::backend::{BackendError, ImageBackend};
use std::path::Path;

/// Read the pixel height of `path`, halved (floor) when `hidpi_only` is set
/// and the file is not an explicit hidpi variant.
///
/// The resolver never passes `hidpi_only` together with `is_hidpi_file`: it
/// drops hidpi-tagged files in that mode. The combination still returns the
/// raw height for callers that serve such files themselves.
pub fn resolve_height(
    backend: &(impl ImageBackend + ?Sized),
    path: &Path,
    hidpi_only: bool,
    is_hidpi_file: bool,
) -> Result<u32, BackendError> {
    let dims = backend.identify(path)?;
    Ok(if hidpi_only && !is_hidpi_file {
        dims.height / 2
    } else {
        dims.height
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;

    #[test]
    fn raw_height_in_normal_mode() {
        let backend = MockBackend::with_heights(&[("kitten.jpg", 286)]);
        let h = resolve_height(&backend, Path::new("kitten.jpg"), false, false).unwrap();
        assert_eq!(h, 286);
    }

    #[test]
    fn halved_in_hidpi_only_mode() {
        let backend = MockBackend::with_heights(&[("kitten.jpg", 286)]);
        let h = resolve_height(&backend, Path::new("kitten.jpg"), true, false).unwrap();
        assert_eq!(h, 143);
    }

    #[test]
    fn halving_floors_odd_heights() {
        let backend = MockBackend::with_heights(&[("cat.jpg", 301)]);
        let h = resolve_height(&backend, Path::new("cat.jpg"), true, false).unwrap();
        assert_eq!(h, 150);
    }

    #[test]
    fn explicit_hidpi_file_keeps_raw_height() {
        let backend = MockBackend::with_heights(&[("hero.2x.jpg", 600)]);
        let h = resolve_height(&backend, Path::new("hero.2x.jpg"), true, true).unwrap();
        assert_eq!(h, 600);
    }

    #[test]
    fn unreadable_file_propagates_error() {
        let backend = MockBackend::new();
        let result = resolve_height(&backend, Path::new("broken.jpg"), false, false);
        assert!(result.is_err());
    }
}
