//! Shared test utilities for the portfolio-gal test suite.
//!
//! Builders for on-disk project folders and in-memory galleries, plus small
//! extractors that keep assertions readable.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_project(tmp.path(), "kryza", &["IMG_1719.jpg", "hero.jpg"]);
//!
//! let source = ScanningSource::new(tmp.path(), DescriptorBuilder::default());
//! assert_eq!(filenames(&source.project_images("kryza")), vec!["hero.jpg", "IMG_1719.jpg"]);
//! ```

use std::fs;
use std::path::Path;

use crate::types::ImageDescriptor;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create `<base>/<project_id>/` holding placeholder files with the given names.
///
/// Discovery only looks at names, so the contents are never real images.
pub fn write_project(base: &Path, project_id: &str, files: &[&str]) {
    let dir = base.join(project_id);
    fs::create_dir_all(&dir).unwrap();
    for file in files {
        fs::write(dir.join(file), "fake image").unwrap();
    }
}

/// `count` detail-sized descriptors named `img-0.jpg`, `img-1.jpg`, ...
pub fn gallery(count: usize) -> Vec<ImageDescriptor> {
    (0..count)
        .map(|i| ImageDescriptor {
            path: format!("/images/projects/test/img-{i}.jpg"),
            alt_text: format!("test image {i}"),
            width: 800,
            height: 1200,
            caption: None,
        })
        .collect()
}

// =========================================================================
// Extractors
// =========================================================================

/// Filenames of descriptors in order.
pub fn filenames(images: &[ImageDescriptor]) -> Vec<&str> {
    images.iter().map(ImageDescriptor::filename).collect()
}

/// Owned strings from literals.
pub fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
