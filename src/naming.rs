//! Filename conventions shared by both discovery sources.
//!
//! Image files carry their role in their name rather than in a sidecar or a
//! database. Matching is a case-insensitive substring test on the whole
//! filename, so `Hero.JPG`, `my-hero-shot.webp` and `HERO_2.png` are all heroes.
//!
//! | Keyword   | Role                 |
//! |-----------|----------------------|
//! | `hero`    | [`ImageRole::Hero`]  |
//! | `detail`  | [`ImageRole::Detail`]|
//! | `before`  | [`ImageRole::Before`]|
//! | `after`   | [`ImageRole::After`] |
//! | `process` | [`ImageRole::Process`]|
//!
//! Keywords are tried in that order and the first match wins, so
//! `hero-detail.jpg` is a hero.
//!
//! Project ids are slugs; their display form replaces every dash with a space
//! (`zapach-twoich-lez` → `zapach twoich lez`).

use std::path::Path;

/// Extensions (lowercase, no dot) that count as gallery images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "avif"];

/// Role of an image inferred from its filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRole {
    Hero,
    Detail,
    Before,
    After,
    Process,
    Other,
}

const ROLE_KEYWORDS: &[(&str, ImageRole)] = &[
    ("hero", ImageRole::Hero),
    ("detail", ImageRole::Detail),
    ("before", ImageRole::Before),
    ("after", ImageRole::After),
    ("process", ImageRole::Process),
];

/// Classify a filename by the first role keyword it contains.
pub fn image_role(filename: &str) -> ImageRole {
    let lower = filename.to_lowercase();
    ROLE_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|&(_, role)| role)
        .unwrap_or(ImageRole::Other)
}

pub fn is_hero(filename: &str) -> bool {
    image_role(filename) == ImageRole::Hero
}

/// Whether a filename has one of the supported image extensions.
pub fn has_image_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Human-readable project name: dashes become spaces.
pub fn project_display_name(project_id: &str) -> String {
    project_id.replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_matches_any_case() {
        assert!(is_hero("hero.jpg"));
        assert!(is_hero("HERO.JPG"));
        assert!(is_hero("my-Hero-shot.webp"));
        assert!(!is_hero("IMG_7115.JPG"));
    }

    #[test]
    fn first_keyword_wins() {
        assert_eq!(image_role("hero-detail.jpg"), ImageRole::Hero);
        assert_eq!(image_role("detail-before.jpg"), ImageRole::Detail);
        assert_eq!(image_role("before-after.jpg"), ImageRole::Before);
    }

    #[test]
    fn roles_from_keywords() {
        assert_eq!(image_role("detail-1.jpg"), ImageRole::Detail);
        assert_eq!(image_role("Before.png"), ImageRole::Before);
        assert_eq!(image_role("after_02.avif"), ImageRole::After);
        assert_eq!(image_role("process-3.jpeg"), ImageRole::Process);
        assert_eq!(image_role("IMG_0293.JPG"), ImageRole::Other);
    }

    #[test]
    fn image_extensions_case_insensitive() {
        for name in ["a.jpg", "a.JPG", "a.jpeg", "a.Png", "a.webp", "a.AVIF"] {
            assert!(has_image_extension(name), "{name} should be an image");
        }
    }

    #[test]
    fn non_image_extensions_rejected() {
        for name in ["notes.txt", "a.gif", "a.tiff", "jpg", "a.jpg.bak", ".hidden"] {
            assert!(!has_image_extension(name), "{name} should not be an image");
        }
    }

    #[test]
    fn display_name_replaces_every_dash() {
        assert_eq!(project_display_name("zapach-twoich-lez"), "zapach twoich lez");
        assert_eq!(project_display_name("kryza"), "kryza");
    }
}
