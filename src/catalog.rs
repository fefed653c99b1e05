//! Project catalog: editorial metadata for every portfolio project.
//!
//! The catalog lives in `projects.toml` at the content root. Titles,
//! categories, and the featured flag come from here; images come from the
//! configured [`ImageSource`]. With `discovery.source = "declarative"` the
//! `images` lists below feed a [`DeclarativeSource`]; with `"scan"` they are
//! ignored and the project folders on disk are listed instead.
//!
//! ```toml
//! [[projects]]
//! id = "ethereal-beauty"
//! title = "Ethereal Beauty"
//! description = "A dreamy editorial shoot."
//! category = "Editorial"
//! year = 2024
//! client = "Vogue Magazine"
//! featured = true
//! images = ["hero.jpg", { file = "detail-1.jpg", alt = "Close-up of eye makeup" }]
//! ```

use crate::config::{SiteConfig, SourceKind};
use crate::discovery::{
    self, DeclarativeSource, DeclaredImage, DescriptorBuilder, ImageSource, ScanningSource,
};
use crate::types::{ImageDescriptor, Project};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Category name that matches every project.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Project entry with empty id")]
    EmptyId,
    #[error("Duplicate project id: {0}")]
    DuplicateId(String),
}

/// One `[[projects]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub year: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default)]
    pub featured: bool,
    /// Used only by the declarative source.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<DeclaredImage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CatalogFile {
    projects: Vec<ProjectEntry>,
}

/// Validated list of project entries in file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<ProjectEntry>,
}

impl Catalog {
    pub fn from_entries(entries: Vec<ProjectEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.id.trim().is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::from_entries(file.projects)
    }

    /// Load a catalog file. A missing file is an empty catalog.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no project catalog, using empty catalog");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), projects = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn entries(&self) -> &[ProjectEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ProjectEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }

    /// `"All"` followed by each distinct category in first-appearance order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        std::iter::once(ALL_CATEGORIES.to_string())
            .chain(
                self.entries
                    .iter()
                    .filter(|e| seen.insert(e.category.as_str()))
                    .map(|e| e.category.clone()),
            )
            .collect()
    }

    /// Declared image lists keyed by project id.
    pub fn declared_images(&self) -> BTreeMap<String, Vec<DeclaredImage>> {
        self.entries
            .iter()
            .map(|e| (e.id.clone(), e.images.clone()))
            .collect()
    }

    /// The image source selected by `discovery.source`.
    pub fn image_source(&self, config: &SiteConfig, root: &Path) -> Box<dyn ImageSource> {
        let builder = DescriptorBuilder::from_config(config);
        match config.discovery.source {
            SourceKind::Scan => Box::new(ScanningSource::new(
                config.discovery.images_path(root),
                builder,
            )),
            SourceKind::Declarative => {
                Box::new(DeclarativeSource::new(self.declared_images(), builder))
            }
        }
    }

    /// Every project with its images filled in, in catalog order.
    pub fn projects(&self, source: &dyn ImageSource) -> Vec<Project> {
        let galleries = discovery::discover_all(source, &self.ids());
        self.entries
            .iter()
            .zip(galleries)
            .map(|(entry, gallery)| entry.to_project(gallery.ordered_images))
            .collect()
    }

    /// A single project with its images, or `None` for an unknown id.
    pub fn project(&self, id: &str, source: &dyn ImageSource) -> Option<Project> {
        self.get(id)
            .map(|entry| entry.to_project(source.project_images(id)))
    }
}

impl ProjectEntry {
    fn to_project(&self, images: Vec<ImageDescriptor>) -> Project {
        Project {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            year: self.year,
            client: self.client.clone(),
            featured: self.featured,
            images,
        }
    }
}

/// Projects whose category matches, or all of them for `"All"`.
pub fn filter_by_category<'a>(projects: &'a [Project], category: &str) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|p| category == ALL_CATEGORIES || p.category == category)
        .collect()
}

pub fn featured(projects: &[Project]) -> Vec<&Project> {
    projects.iter().filter(|p| p.featured).collect()
}
