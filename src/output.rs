//! CLI output formatting.
//!
//! Output is information-first: every entity leads with a positional index and
//! its title, with paths and generated text as indented context lines.
//!
//! ## Scan
//!
//! ```text
//! ethereal-beauty (3 images, hero-grid)
//! 001 hero.jpg 1200x1600
//!     Path: /images/projects/ethereal-beauty/hero.jpg
//!     Alt: ethereal beauty makeup artistry - main showcase
//!     Caption: Featured look
//! ```
//!
//! ## Catalog
//!
//! ```text
//! Categories: All, Editorial, Creative
//! 001 Ethereal Beauty [Editorial, 2024] featured
//!     Id: ethereal-beauty
//!     Client: Vogue Magazine
//!     Images: 3 (hero-grid)
//! ```
//!
//! ## View
//!
//! ```text
//!      0ms scroll +1250 → applied | 1/3 offset 100.0 approaching-end, pending next
//!    500ms wait 500ms → next 1→2 | 1/3 offset 100.0 transitioning
//! ```
//!
//! Each `format_*` function is pure and returns lines; `print_*` writes them to
//! stdout.

use crate::replay::ReplayStep;
use crate::types::{GalleryLayout, ImageDescriptor, Project, ProjectGallery};
use crate::viewer::{BoundaryWarning, Direction, Outcome, TimerEvent, ViewerSnapshot};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn image_lines(index: usize, image: &ImageDescriptor) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{} {} {}x{}",
            format_index(index),
            image.filename(),
            image.width,
            image.height
        ),
        format!("{}Path: {}", indent(1), image.path),
        format!("{}Alt: {}", indent(1), image.alt_text),
    ];
    if let Some(caption) = &image.caption {
        lines.push(format!("{}Caption: {}", indent(1), caption));
    }
    lines
}

// ============================================================================
// Scan
// ============================================================================

pub fn format_gallery(gallery: &ProjectGallery) -> Vec<String> {
    let count = gallery.ordered_images.len();
    if count == 0 {
        return vec![format!("{} (no images)", gallery.project_id)];
    }
    let mut lines = vec![format!(
        "{} ({} {}, {})",
        gallery.project_id,
        count,
        if count == 1 { "image" } else { "images" },
        GalleryLayout::for_count(count).as_str()
    )];
    for (i, image) in gallery.ordered_images.iter().enumerate() {
        lines.extend(image_lines(i + 1, image));
    }
    lines
}

pub fn print_gallery(gallery: &ProjectGallery) {
    for line in format_gallery(gallery) {
        println!("{}", line);
    }
}

/// One line per project folder with its image count.
pub fn format_project_list(galleries: &[ProjectGallery]) -> Vec<String> {
    if galleries.is_empty() {
        return vec!["No projects found".to_string()];
    }
    galleries
        .iter()
        .enumerate()
        .map(|(i, g)| {
            format!(
                "{} {} ({} images)",
                format_index(i + 1),
                g.project_id,
                g.ordered_images.len()
            )
        })
        .collect()
}

pub fn print_project_list(galleries: &[ProjectGallery]) {
    for line in format_project_list(galleries) {
        println!("{}", line);
    }
}

// ============================================================================
// Catalog
// ============================================================================

pub fn format_catalog(projects: &[Project], categories: &[String]) -> Vec<String> {
    let mut lines = vec![format!("Categories: {}", categories.join(", "))];
    for (i, project) in projects.iter().enumerate() {
        let mut header = format!(
            "{} {} [{}, {}]",
            format_index(i + 1),
            project.title,
            project.category,
            project.year
        );
        if project.featured {
            header.push_str(" featured");
        }
        lines.push(header);
        lines.push(format!("{}Id: {}", indent(1), project.id));
        if let Some(client) = &project.client {
            lines.push(format!("{}Client: {}", indent(1), client));
        }
        let count = project.images.len();
        if count == 0 {
            lines.push(format!("{}Images: none", indent(1)));
        } else {
            lines.push(format!(
                "{}Images: {} ({})",
                indent(1),
                count,
                GalleryLayout::for_count(count).as_str()
            ));
        }
    }
    lines
}

pub fn print_catalog(projects: &[Project], categories: &[String]) {
    for line in format_catalog(projects, categories) {
        println!("{}", line);
    }
}

// ============================================================================
// View
// ============================================================================

fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Next => "next",
        Direction::Previous => "prev",
    }
}

fn outcome_label(outcome: Outcome) -> String {
    match outcome {
        Outcome::Applied => "applied".to_string(),
        Outcome::Ignored(reason) => format!("ignored ({reason:?})").to_lowercase(),
    }
}

/// Images are shown 1-based to match the index column elsewhere.
fn timer_label(event: &TimerEvent) -> String {
    match event {
        TimerEvent::ScheduledNavigation {
            direction, from, to, ..
        } => format!("{} {}→{}", direction_label(*direction), from + 1, to + 1),
        TimerEvent::TransitionFinished { index } => format!("showing {}", index + 1),
    }
}

fn snapshot_label(snapshot: Option<&ViewerSnapshot>) -> String {
    let Some(s) = snapshot else {
        return "closed".to_string();
    };
    let mut label = format!(
        "{}/{} offset {:.1}",
        s.current_index + 1,
        s.image_count,
        s.scroll_offset
    );
    match s.boundary_warning {
        BoundaryWarning::None => {}
        BoundaryWarning::ApproachingStart => label.push_str(" approaching-start"),
        BoundaryWarning::ApproachingEnd => label.push_str(" approaching-end"),
    }
    if s.is_transitioning {
        label.push_str(" transitioning");
    }
    if let Some(direction) = s.pending_navigation {
        label.push_str(&format!(", pending {}", direction_label(direction)));
    }
    label
}

pub fn format_replay(steps: &[ReplayStep]) -> Vec<String> {
    steps
        .iter()
        .map(|step| {
            let result = match (&step.outcome, step.fired.as_slice()) {
                (Some(outcome), _) => outcome_label(*outcome),
                (None, []) => "nothing due".to_string(),
                (None, fired) => fired.iter().map(timer_label).collect::<Vec<_>>().join(", "),
            };
            format!(
                "{:>6}ms {} → {} | {}",
                step.at_ms,
                step.event,
                result,
                snapshot_label(step.snapshot.as_ref())
            )
        })
        .collect()
}

pub fn print_replay(steps: &[ReplayStep]) {
    for line in format_replay(steps) {
        println!("{}", line);
    }
}
