//! Alt text and caption generation.
//!
//! Each image gets an alt text and a caption from two possible sources:
//!
//! - **Overrides** supplied by the caller through the declarative catalog
//!   (`{ file = "...", alt = "...", caption = "..." }`).
//! - **Generated** text derived from the filename's role keyword and the
//!   project name. See [`crate::naming`] for the keyword table.
//!
//! Each field is resolved independently; the first non-empty value wins:
//!
//! - **Alt text**: override → generated
//! - **Caption**: override → generated
//!
//! Generation is a pure function of `(filename, project_id)`. The same inputs
//! always produce the same strings, so discovery output is reproducible.

use crate::naming::{self, ImageRole};

/// Resolve a metadata field from multiple sources.
///
/// Takes a list of optional values in priority order and returns the first
/// non-None, non-empty value after trimming.
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Alt text for an image, derived from its filename and project.
pub fn generate_alt_text(filename: &str, project_id: &str) -> String {
    let project_name = naming::project_display_name(project_id);
    match naming::image_role(filename) {
        ImageRole::Hero => format!("{project_name} makeup artistry - main showcase"),
        ImageRole::Detail => format!("{project_name} makeup artistry - artistic detail"),
        ImageRole::Before => format!("{project_name} makeup artistry - before transformation"),
        ImageRole::After => format!("{project_name} makeup artistry - final result"),
        ImageRole::Process | ImageRole::Other => format!("{project_name} makeup artistry"),
    }
}

/// Caption for an image, derived from its filename.
///
/// The project id is accepted so the signature matches [`generate_alt_text`];
/// no caption currently mentions the project.
pub fn generate_caption(filename: &str, _project_id: &str) -> String {
    match naming::image_role(filename) {
        ImageRole::Hero => "Featured look",
        ImageRole::Detail => "Artistic detail",
        ImageRole::Before => "Before transformation",
        ImageRole::After => "Final result",
        ImageRole::Process => "Creative process",
        ImageRole::Other => "Artistic expression",
    }
    .to_string()
}
