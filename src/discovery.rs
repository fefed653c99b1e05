//! Project image discovery.
//!
//! Maps a project id to its images in canonical display order. Two sources
//! implement the same [`ImageSource`] trait and are selected by
//! `discovery.source` in `config.toml`:
//!
//! - [`ScanningSource`] lists `<images_dir>/<project-id>/` on disk.
//! - [`DeclarativeSource`] uses explicit filename lists from the catalog, with
//!   optional per-image alt/caption overrides.
//!
//! ## Directory Structure
//!
//! ```text
//! images/projects/                 # images_dir
//! ├── ethereal-beauty/             # project id = folder name
//! │   ├── detail-1.jpg
//! │   ├── detail-2.jpg
//! │   ├── hero.jpg                 # shown first, hero size hint
//! │   └── notes.txt                # ignored (not an image)
//! └── surrealism/
//!     ├── IMG_7115.JPG             # no hero: first file by name leads
//!     └── IMG_7116.JPG
//! ```
//!
//! ## Ordering
//!
//! Images whose filename contains `hero` (any case) come first; everything else
//! follows in lexicographic filename order. The result depends only on the set
//! of filenames, never on the order the filesystem returns them in.
//!
//! ## Failure handling
//!
//! Discovery never fails from the caller's point of view. A missing or
//! unreadable folder, an empty project id, or a folder without images all
//! produce an empty list and a `warn` log event. The typed [`DiscoveryError`]
//! exists for callers that want the reason ([`ScanningSource::try_scan`]).

use crate::config::{DimensionsConfig, SiteConfig};
use crate::metadata;
use crate::naming;
use crate::types::{ImageDescriptor, ProjectGallery};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Project id is empty")]
    EmptyProjectId,
    #[error("Project images directory not found: {0}")]
    MissingDirectory(PathBuf),
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("No images in {0}")]
    NoImages(PathBuf),
    #[error("Project not declared: {0}")]
    UnknownProject(String),
}

/// Produces the ordered images of a project.
///
/// Implementations must be deterministic and side-effect free apart from
/// reading storage, so they can be shared across threads by [`discover_all`].
pub trait ImageSource: Send + Sync {
    /// Ordered descriptors for `project_id`; empty when nothing can be found.
    fn project_images(&self, project_id: &str) -> Vec<ImageDescriptor>;

    fn gallery(&self, project_id: &str) -> ProjectGallery {
        ProjectGallery {
            project_id: project_id.to_string(),
            ordered_images: self.project_images(project_id),
        }
    }
}

/// Compare two filenames by the canonical gallery order.
///
/// Non-hero names compare byte-wise, so uppercase sorts before lowercase:
/// `IMG_7115.JPG` comes before `detail-1.jpg`. Rename files to a common case
/// when a locale-aware order is expected.
pub fn compare_filenames(a: &str, b: &str) -> Ordering {
    naming::is_hero(b)
        .cmp(&naming::is_hero(a))
        .then_with(|| a.cmp(b))
}

/// Sort filenames into canonical gallery order.
pub fn order_filenames(mut names: Vec<String>) -> Vec<String> {
    names.sort_by(|a, b| compare_filenames(a, b));
    names
}

/// Turns filenames into descriptors: URL, generated text, size hint.
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    url_prefix: String,
    dimensions: DimensionsConfig,
}

impl Default for DescriptorBuilder {
    fn default() -> Self {
        Self::new("/images/projects", DimensionsConfig::default())
    }
}

impl DescriptorBuilder {
    pub fn new(url_prefix: &str, dimensions: DimensionsConfig) -> Self {
        Self {
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
            dimensions,
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(&config.discovery.url_prefix, config.dimensions.clone())
    }

    /// Build the descriptor for the image at `position` in display order.
    ///
    /// The first image and any hero image get the hero size hint.
    pub fn build(
        &self,
        project_id: &str,
        filename: &str,
        position: usize,
        overrides: Option<&DeclaredImage>,
    ) -> ImageDescriptor {
        let size = if position == 0 || naming::is_hero(filename) {
            self.dimensions.hero()
        } else {
            self.dimensions.detail()
        };
        let generated_alt = metadata::generate_alt_text(filename, project_id);
        let generated_caption = metadata::generate_caption(filename, project_id);
        let alt_text = metadata::resolve(&[
            overrides.and_then(DeclaredImage::alt),
            Some(generated_alt.as_str()),
        ])
        .unwrap_or_else(|| generated_alt.clone());
        let caption = metadata::resolve(&[
            overrides.and_then(DeclaredImage::caption),
            Some(generated_caption.as_str()),
        ]);

        ImageDescriptor {
            path: format!("{}/{}/{}", self.url_prefix, project_id, filename),
            alt_text,
            width: size.width,
            height: size.height,
            caption,
        }
    }
}

// ============================================================================
// Scanning source
// ============================================================================

/// Lists project folders under a base directory.
#[derive(Debug, Clone)]
pub struct ScanningSource {
    base: PathBuf,
    builder: DescriptorBuilder,
}

impl ScanningSource {
    pub fn new(base: impl Into<PathBuf>, builder: DescriptorBuilder) -> Self {
        Self {
            base: base.into(),
            builder,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Scan one project folder, reporting why nothing was found.
    pub fn try_scan(&self, project_id: &str) -> Result<Vec<ImageDescriptor>, DiscoveryError> {
        if project_id.trim().is_empty() {
            return Err(DiscoveryError::EmptyProjectId);
        }
        let dir = self.base.join(project_id);
        if !dir.is_dir() {
            return Err(DiscoveryError::MissingDirectory(dir));
        }

        let filenames = list_image_files(&dir)?;
        if filenames.is_empty() {
            return Err(DiscoveryError::NoImages(dir));
        }

        Ok(order_filenames(filenames)
            .iter()
            .enumerate()
            .map(|(pos, name)| self.builder.build(project_id, name, pos, None))
            .collect())
    }
}

impl ImageSource for ScanningSource {
    fn project_images(&self, project_id: &str) -> Vec<ImageDescriptor> {
        match self.try_scan(project_id) {
            Ok(images) => {
                tracing::debug!(project = project_id, count = images.len(), "scanned project");
                images
            }
            Err(err) => {
                tracing::warn!(project = project_id, "{err}");
                Vec::new()
            }
        }
    }
}

/// Image filenames directly inside `dir`, in directory order.
fn list_image_files(dir: &Path) -> Result<Vec<String>, DiscoveryError> {
    let io_err = |source| DiscoveryError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let Ok(name) = entry.file_name().into_string() else {
            tracing::debug!(path = %entry.path().display(), "skipping non-UTF-8 filename");
            continue;
        };
        if name.starts_with('.') || !entry.path().is_file() {
            continue;
        }
        if naming::has_image_extension(&name) {
            names.push(name);
        }
    }
    Ok(names)
}

/// Project ids available under `base`: visible subdirectories, sorted.
///
/// A missing base directory yields an empty list and a warning.
pub fn scan_all_projects(base: &Path) -> Vec<String> {
    if !base.is_dir() {
        tracing::warn!(path = %base.display(), "images directory not found");
        return Vec::new();
    }

    WalkDir::new(base)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::warn!("error listing project directories: {err}");
                None
            }
        })
        .filter(|e| e.file_type().is_dir() || e.path().is_dir())
        .filter_map(|e| e.file_name().to_str().map(String::from))
        .filter(|name| !name.starts_with('.'))
        .collect()
}

// ============================================================================
// Declarative source
// ============================================================================

/// One declared image: a bare filename or a table with text overrides.
///
/// ```toml
/// images = ["hero.jpg", { file = "detail-1.jpg", alt = "Close-up", caption = "Soft shimmer" }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeclaredImage {
    File(String),
    Detailed {
        file: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
}

impl DeclaredImage {
    pub fn file(&self) -> &str {
        match self {
            DeclaredImage::File(file) | DeclaredImage::Detailed { file, .. } => file,
        }
    }

    pub fn alt(&self) -> Option<&str> {
        match self {
            DeclaredImage::File(_) => None,
            DeclaredImage::Detailed { alt, .. } => alt.as_deref(),
        }
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            DeclaredImage::File(_) => None,
            DeclaredImage::Detailed { caption, .. } => caption.as_deref(),
        }
    }
}

/// Fixed mapping from project id to declared images.
#[derive(Debug, Clone, Default)]
pub struct DeclarativeSource {
    projects: BTreeMap<String, Vec<DeclaredImage>>,
    builder: DescriptorBuilder,
}

impl DeclarativeSource {
    pub fn new(projects: BTreeMap<String, Vec<DeclaredImage>>, builder: DescriptorBuilder) -> Self {
        Self { projects, builder }
    }

    pub fn try_list(&self, project_id: &str) -> Result<Vec<ImageDescriptor>, DiscoveryError> {
        if project_id.trim().is_empty() {
            return Err(DiscoveryError::EmptyProjectId);
        }
        let declared = self
            .projects
            .get(project_id)
            .ok_or_else(|| DiscoveryError::UnknownProject(project_id.to_string()))?;

        let mut ordered: Vec<&DeclaredImage> = declared.iter().collect();
        ordered.sort_by(|a, b| compare_filenames(a.file(), b.file()));

        Ok(ordered
            .into_iter()
            .enumerate()
            .map(|(pos, img)| self.builder.build(project_id, img.file(), pos, Some(img)))
            .collect())
    }
}

impl ImageSource for DeclarativeSource {
    fn project_images(&self, project_id: &str) -> Vec<ImageDescriptor> {
        match self.try_list(project_id) {
            Ok(images) => {
                if images.is_empty() {
                    tracing::warn!(project = project_id, "project declares no images");
                }
                images
            }
            Err(err) => {
                tracing::warn!(project = project_id, "{err}");
                Vec::new()
            }
        }
    }
}

/// Discover many projects in parallel, preserving input order.
pub fn discover_all(source: &dyn ImageSource, project_ids: &[String]) -> Vec<ProjectGallery> {
    project_ids
        .par_iter()
        .map(|id| source.gallery(id))
        .collect()
}
