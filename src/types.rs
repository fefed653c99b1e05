//! Shared types passed between discovery, the catalog, and the viewer.
//!
//! Everything here is plain data: serializable, immutable once built, and free
//! of filesystem handles so it can cross thread boundaries during parallel
//! discovery.

use serde::{Deserialize, Serialize};

/// Display hint for an image's intrinsic size.
///
/// Never measured from the file. The values come from configuration and only
/// tell the presentation layer which aspect box to reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Default size for the primary image of a project.
    pub const HERO: Dimensions = Dimensions {
        width: 1200,
        height: 1600,
    };
    /// Default size for every other image.
    pub const DETAIL: Dimensions = Dimensions {
        width: 800,
        height: 1200,
    };
}

/// One image of a project gallery, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Site-relative URL, e.g. `/images/projects/surrealism/hero.jpg`
    pub path: String,
    pub alt_text: String,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl ImageDescriptor {
    /// Final path segment of the URL.
    pub fn filename(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }
}

/// A project id together with its images in canonical display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectGallery {
    pub project_id: String,
    pub ordered_images: Vec<ImageDescriptor>,
}

impl ProjectGallery {
    pub fn is_empty(&self) -> bool {
        self.ordered_images.is_empty()
    }

    /// The first image, used as the project's cover.
    pub fn hero(&self) -> Option<&ImageDescriptor> {
        self.ordered_images.first()
    }
}

/// A portfolio project as shown on the projects page.
///
/// `images` is filled in by whichever discovery source is configured; the
/// remaining fields are editorial metadata from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub year: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    pub featured: bool,
    pub images: Vec<ImageDescriptor>,
}

/// Grid arrangement suggested for a given number of images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GalleryLayout {
    /// One large image
    Single,
    /// Two images side by side
    TwoColumn,
    /// One large image plus two smaller ones
    HeroGrid,
    /// 2x2 grid
    FourGrid,
    Masonry,
    /// Full multi-column gallery
    Gallery,
}

impl GalleryLayout {
    pub fn for_count(count: usize) -> Self {
        match count {
            1 => GalleryLayout::Single,
            2 => GalleryLayout::TwoColumn,
            3 => GalleryLayout::HeroGrid,
            4 => GalleryLayout::FourGrid,
            5 | 6 => GalleryLayout::Masonry,
            _ => GalleryLayout::Gallery,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GalleryLayout::Single => "single",
            GalleryLayout::TwoColumn => "two-column",
            GalleryLayout::HeroGrid => "hero-grid",
            GalleryLayout::FourGrid => "four-grid",
            GalleryLayout::Masonry => "masonry",
            GalleryLayout::Gallery => "gallery",
        }
    }
}
