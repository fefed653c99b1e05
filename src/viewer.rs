//! Fullscreen gallery viewer state machine.
//!
//! The viewer shows one image of a gallery at a time and turns keyboard and
//! wheel input into slide changes. It owns no timers and never reads the
//! clock: every event carries the caller's `now`, and [`GalleryViewer::advance`]
//! fires whatever has come due. Hosts ask [`GalleryViewer::next_deadline`]
//! when to wake up next.
//!
//! ## States
//!
//! ```text
//!            open(images, start)            navigate(dir)
//!  Closed ─────────────────────▶ Displaying(i) ─────────────▶ Transitioning(i, j)
//!    ▲                               ▲                              │
//!    │ close() from any state        └──── transition elapsed ──────┘
//! ```
//!
//! `Closed` carries no session at all, so a closed viewer cannot hold a scroll
//! offset or a pending navigation. Closing drops the session and with it any
//! navigation a scroll had scheduled.
//!
//! ## Rubber-band scrolling
//!
//! Wheel deltas accumulate into a scroll offset in `[0, 100]`. Approaching an
//! end raises a [`BoundaryWarning`] without changing the image. Only reaching
//! the edge itself (`<= edge_start` going back, `>= edge_end` going forward)
//! schedules a navigation, after `edge_delay`. When it fires the warning is
//! cleared. At most one scroll-scheduled navigation is pending at a time, and
//! starting any transition discards it.
//!
//! Every operation reports an [`Outcome`]. Nothing here returns an error:
//! requests that do not apply in the current state are ignored with a reason.

use crate::config::ViewerConfig;
use crate::types::ImageDescriptor;
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// Index reached from `index` in a gallery of `count` images, wrapping around.
    pub fn step(self, index: usize, count: usize) -> usize {
        debug_assert!(count > 0);
        match self {
            Direction::Next => (index + 1) % count,
            Direction::Previous => (index + count - 1) % count,
        }
    }
}

/// Visual hint that the scroll offset is near a navigation threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryWarning {
    #[default]
    None,
    ApproachingStart,
    ApproachingEnd,
}

/// Keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Map a DOM-style key name (`"Escape"`, `"ArrowLeft"`, ...) to a key.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

/// Public view of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ViewerState {
    Closed,
    Displaying { index: usize },
    Transitioning { from: usize, to: usize },
}

/// Why a request had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IgnoreReason {
    /// The viewer is not open.
    Closed,
    /// A slide transition is still running.
    Transitioning,
    /// `open` was given no images.
    EmptyGallery,
    UnhandledKey,
    /// Scroll delta was NaN or infinite.
    InvalidDelta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Applied,
    Ignored(IgnoreReason),
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }
}

/// Something [`GalleryViewer::advance`] fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum TimerEvent {
    /// A scroll-scheduled navigation started a transition.
    ScheduledNavigation { direction: Direction, from: usize, to: usize },
    /// A transition finished; the viewer now displays `index`.
    TransitionFinished { index: usize },
}

/// Read-only state for the presentation layer to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerSnapshot {
    #[serde(flatten)]
    pub state: ViewerState,
    pub current_index: usize,
    pub image_count: usize,
    pub scroll_offset: f64,
    pub boundary_warning: BoundaryWarning,
    pub is_transitioning: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_navigation: Option<Direction>,
    pub current_image: ImageDescriptor,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Displaying { index: usize },
    Transitioning { from: usize, to: usize, until: Instant },
}

#[derive(Debug, Clone, Copy)]
struct ScheduledNavigation {
    direction: Direction,
    due: Instant,
}

/// Everything that exists only while the viewer is open.
#[derive(Debug, Clone)]
struct Session {
    images: Vec<ImageDescriptor>,
    phase: Phase,
    scroll_offset: f64,
    boundary_warning: BoundaryWarning,
    pending: Option<ScheduledNavigation>,
}

impl Session {
    fn new(images: Vec<ImageDescriptor>, index: usize) -> Self {
        Self {
            images,
            phase: Phase::Displaying { index },
            scroll_offset: 0.0,
            boundary_warning: BoundaryWarning::None,
            pending: None,
        }
    }

    fn current_index(&self) -> usize {
        match self.phase {
            Phase::Displaying { index } => index,
            Phase::Transitioning { from, .. } => from,
        }
    }

    /// Start a transition at time `at`. The caller has checked the phase.
    fn begin_transition(&mut self, direction: Direction, at: Instant, config: &ViewerConfig) {
        let from = self.current_index();
        let to = direction.step(from, self.images.len());
        self.phase = Phase::Transitioning {
            from,
            to,
            until: at + config.transition_duration(),
        };
        self.pending = None;
        tracing::debug!(from, to, ?direction, "transition started");
    }

    fn finish_transition(&mut self, index: usize) {
        self.phase = Phase::Displaying { index };
        self.scroll_offset = 0.0;
        self.boundary_warning = BoundaryWarning::None;
    }

    /// Earliest timer in this session.
    fn next_deadline(&self) -> Option<Instant> {
        let transition_end = match self.phase {
            Phase::Transitioning { until, .. } => Some(until),
            Phase::Displaying { .. } => None,
        };
        let pending = self.pending.map(|p| p.due);
        match (transition_end, pending) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

/// The fullscreen viewer. One instance per page; reopen it for each gallery.
#[derive(Debug, Clone)]
pub struct GalleryViewer {
    config: ViewerConfig,
    session: Option<Session>,
}

impl Default for GalleryViewer {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl GalleryViewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn state(&self) -> ViewerState {
        match self.session.as_ref().map(|s| s.phase) {
            None => ViewerState::Closed,
            Some(Phase::Displaying { index }) => ViewerState::Displaying { index },
            Some(Phase::Transitioning { from, to, .. }) => ViewerState::Transitioning { from, to },
        }
    }

    /// Open on `images` at `start_index`, clamped to the last image.
    ///
    /// An empty gallery is refused and the viewer stays as it was. Opening an
    /// already open viewer replaces its session.
    pub fn open(&mut self, images: Vec<ImageDescriptor>, start_index: usize) -> Outcome {
        if images.is_empty() {
            tracing::warn!("refusing to open viewer on an empty gallery");
            return Outcome::Ignored(IgnoreReason::EmptyGallery);
        }
        let index = start_index.min(images.len() - 1);
        if index != start_index {
            tracing::debug!(start_index, index, "start index clamped");
        }
        self.session = Some(Session::new(images, index));
        Outcome::Applied
    }

    /// Close from any state, discarding the session and anything it scheduled.
    pub fn close(&mut self) -> Outcome {
        match self.session.take() {
            Some(_) => Outcome::Applied,
            None => Outcome::Ignored(IgnoreReason::Closed),
        }
    }

    /// Move one image in `direction`, wrapping at either end.
    pub fn navigate(&mut self, direction: Direction, now: Instant) -> Outcome {
        self.advance(now);
        let config = &self.config;
        let Some(session) = self.session.as_mut() else {
            return Outcome::Ignored(IgnoreReason::Closed);
        };
        match session.phase {
            Phase::Transitioning { .. } => Outcome::Ignored(IgnoreReason::Transitioning),
            Phase::Displaying { .. } => {
                session.begin_transition(direction, now, config);
                Outcome::Applied
            }
        }
    }

    /// Feed a raw wheel delta; positive scrolls toward the end.
    pub fn scroll(&mut self, delta: f64, now: Instant) -> Outcome {
        self.advance(now);
        let config = &self.config;
        let Some(session) = self.session.as_mut() else {
            return Outcome::Ignored(IgnoreReason::Closed);
        };
        if let Phase::Transitioning { .. } = session.phase {
            return Outcome::Ignored(IgnoreReason::Transitioning);
        }
        if !delta.is_finite() {
            return Outcome::Ignored(IgnoreReason::InvalidDelta);
        }

        let offset = (session.scroll_offset + delta * config.sensitivity).clamp(0.0, 100.0);
        session.scroll_offset = offset;

        let edge = if delta > 0.0 && offset >= config.band_end {
            session.boundary_warning = BoundaryWarning::ApproachingEnd;
            (offset >= config.edge_end).then_some(Direction::Next)
        } else if delta < 0.0 && offset <= config.band_start {
            session.boundary_warning = BoundaryWarning::ApproachingStart;
            (offset <= config.edge_start).then_some(Direction::Previous)
        } else {
            session.boundary_warning = BoundaryWarning::None;
            None
        };

        if let Some(direction) = edge
            && session.pending.is_none()
        {
            session.pending = Some(ScheduledNavigation {
                direction,
                due: now + config.edge_delay(),
            });
            tracing::debug!(?direction, offset, "edge reached, navigation scheduled");
        }
        Outcome::Applied
    }

    /// Keyboard input. Every key is ignored while a transition runs.
    pub fn key(&mut self, key: Key, now: Instant) -> Outcome {
        self.advance(now);
        match self.state() {
            ViewerState::Closed => return Outcome::Ignored(IgnoreReason::Closed),
            ViewerState::Transitioning { .. } => {
                return Outcome::Ignored(IgnoreReason::Transitioning);
            }
            ViewerState::Displaying { .. } => {}
        }
        match key {
            Key::Escape => self.close(),
            Key::ArrowLeft => self.navigate(Direction::Previous, now),
            Key::ArrowRight => self.navigate(Direction::Next, now),
            Key::Other => Outcome::Ignored(IgnoreReason::UnhandledKey),
        }
    }

    /// Fire every timer due at or before `now`, oldest first.
    pub fn advance(&mut self, now: Instant) -> Vec<TimerEvent> {
        let mut fired = Vec::new();
        let config = &self.config;
        let Some(session) = self.session.as_mut() else {
            return fired;
        };

        while let Some(deadline) = session.next_deadline().filter(|d| *d <= now) {
            let phase = session.phase;
            match phase {
                Phase::Transitioning { to, until, .. } if until == deadline => {
                    session.finish_transition(to);
                    fired.push(TimerEvent::TransitionFinished { index: to });
                }
                _ => {
                    // Only a pending navigation can be due while displaying;
                    // starting a transition clears it.
                    let Some(scheduled) = session.pending.take() else {
                        break;
                    };
                    let from = session.current_index();
                    session.begin_transition(scheduled.direction, scheduled.due, config);
                    session.boundary_warning = BoundaryWarning::None;
                    let to = Direction::step(scheduled.direction, from, session.images.len());
                    fired.push(TimerEvent::ScheduledNavigation {
                        direction: scheduled.direction,
                        from,
                        to,
                    });
                }
            }
        }
        fired
    }

    /// When [`advance`](Self::advance) next has something to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.session.as_ref().and_then(Session::next_deadline)
    }

    /// Current state for rendering, or `None` while closed.
    pub fn snapshot(&self) -> Option<ViewerSnapshot> {
        let session = self.session.as_ref()?;
        let current_index = session.current_index();
        Some(ViewerSnapshot {
            state: self.state(),
            current_index,
            image_count: session.images.len(),
            scroll_offset: session.scroll_offset,
            boundary_warning: session.boundary_warning,
            is_transitioning: matches!(session.phase, Phase::Transitioning { .. }),
            pending_navigation: session.pending.map(|p| p.direction),
            current_image: session.images[current_index].clone(),
        })
    }
}
