//! # Portfolio Gal
//!
//! Image discovery and a fullscreen gallery viewer for a makeup-artist
//! portfolio. The filesystem (or a declarative catalog) is the data source:
//! each project is a folder of images, the image named `hero` leads, and every
//! image gets generated alt text and a caption from its filename.
//!
//! # Architecture
//!
//! ```text
//! config.toml ─┐
//!              ├─▶ ImageSource ─▶ ProjectGallery ─▶ GalleryViewer
//! projects.toml┘   (scan | declarative)             (open, navigate, scroll, key)
//! ```
//!
//! Discovery is synchronous and never fails at its public boundary: a missing
//! folder is an empty gallery plus a warning. The viewer is a pure state
//! machine driven by caller-supplied instants, so hosts can run it against a
//! real clock or a simulated one ([`replay`]).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`discovery`] | `ImageSource` trait, scanning and declarative sources, canonical ordering |
//! | [`catalog`] | `projects.toml` project metadata, categories, featured projects |
//! | [`viewer`] | Fullscreen viewer state machine with rubber-band scrolling |
//! | [`replay`] | Scripted viewer sessions on a simulated clock |
//! | [`config`] | `config.toml` loading: stock defaults, deep merge, validation |
//! | [`types`] | Shared data: `ImageDescriptor`, `ProjectGallery`, `Project` |
//! | [`naming`] | Filename conventions: extensions, role keywords, hero detection |
//! | [`metadata`] | Alt text and caption generation and override resolution |
//! | [`logging`] | `tracing-subscriber` setup for the CLI |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Names, Not Pixels
//!
//! Discovery never opens an image. Roles, alt text, captions and display
//! dimensions all derive from the filename and configuration, which keeps a
//! scan cheap and fully deterministic.
//!
//! ## Hero First
//!
//! Whatever the listing order, a file whose name contains `hero` comes first
//! and the rest follow in byte-wise lexicographic order. Both sources apply
//! the same ordering, so switching `discovery.source` never reshuffles a
//! gallery.
//!
//! ## Injected Time
//!
//! The viewer owns no timers. Every input carries `now`, and
//! [`viewer::GalleryViewer::advance`] fires whatever has come due. Closing the
//! viewer drops the session, so nothing scheduled can outlive it.

pub mod catalog;
pub mod config;
pub mod discovery;
pub mod logging;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod replay;
pub mod types;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_helpers;
