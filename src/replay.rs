//! Scripted viewer sessions.
//!
//! The `view` command drives a [`GalleryViewer`] from a short event script so
//! viewer behavior can be inspected without a browser. A script is a list of
//! comma- or whitespace-separated events:
//!
//! | Event          | Meaning                                     |
//! |----------------|---------------------------------------------|
//! | `next`, `prev` | `navigate(Next)`, `navigate(Previous)`      |
//! | `scroll:<n>`   | wheel delta `n` (negative scrolls back)     |
//! | `key:<name>`   | key press, e.g. `key:ArrowLeft`             |
//! | `wait:<ms>`    | let `ms` milliseconds pass, firing timers   |
//! | `close`        | close the viewer                            |
//!
//! Time is simulated: the clock only moves on `wait`, so a replay is
//! deterministic.

use crate::viewer::{Direction, GalleryViewer, Key, Outcome, TimerEvent, ViewerSnapshot};
use serde::Serialize;
use std::str::FromStr;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ScriptError {
    #[error("Unknown viewer event: {0}")]
    UnknownEvent(String),
    #[error("Invalid number in viewer event: {0}")]
    BadNumber(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptEvent {
    Navigate(Direction),
    Scroll(f64),
    Key(String),
    Wait(u64),
    Close,
}

impl FromStr for ScriptEvent {
    type Err = ScriptError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let bad_number = || ScriptError::BadNumber(token.to_string());
        match token.split_once(':') {
            None => match token {
                "next" => Ok(ScriptEvent::Navigate(Direction::Next)),
                "prev" | "previous" => Ok(ScriptEvent::Navigate(Direction::Previous)),
                "close" => Ok(ScriptEvent::Close),
                _ => Err(ScriptError::UnknownEvent(token.to_string())),
            },
            Some(("scroll", n)) => n
                .trim_start_matches('+')
                .parse()
                .map(ScriptEvent::Scroll)
                .map_err(|_| bad_number()),
            Some(("wait", n)) => n.parse().map(ScriptEvent::Wait).map_err(|_| bad_number()),
            Some(("key", name)) if !name.is_empty() => Ok(ScriptEvent::Key(name.to_string())),
            Some(_) => Err(ScriptError::UnknownEvent(token.to_string())),
        }
    }
}

/// Split a script into events.
pub fn parse_script(script: &str) -> Result<Vec<ScriptEvent>, ScriptError> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}

/// What happened at one script step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayStep {
    /// Simulated milliseconds since the viewer opened.
    pub at_ms: u64,
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fired: Vec<TimerEvent>,
    /// `None` once the viewer is closed.
    pub snapshot: Option<ViewerSnapshot>,
}

/// Run `events` against an already opened viewer.
pub fn replay(viewer: &mut GalleryViewer, events: &[ScriptEvent]) -> Vec<ReplayStep> {
    let start = Instant::now();
    let mut elapsed = Duration::ZERO;
    let mut steps = Vec::with_capacity(events.len());

    for event in events {
        let now = start + elapsed;
        let (label, outcome, fired) = match event {
            ScriptEvent::Navigate(direction) => {
                let label = match direction {
                    Direction::Next => "next".to_string(),
                    Direction::Previous => "prev".to_string(),
                };
                (label, Some(viewer.navigate(*direction, now)), Vec::new())
            }
            ScriptEvent::Scroll(delta) => (
                format!("scroll {delta:+}"),
                Some(viewer.scroll(*delta, now)),
                Vec::new(),
            ),
            ScriptEvent::Key(name) => (
                format!("key {name}"),
                Some(viewer.key(Key::from_name(name), now)),
                Vec::new(),
            ),
            ScriptEvent::Wait(ms) => {
                elapsed += Duration::from_millis(*ms);
                (format!("wait {ms}ms"), None, viewer.advance(start + elapsed))
            }
            ScriptEvent::Close => ("close".to_string(), Some(viewer.close()), Vec::new()),
        };
        steps.push(ReplayStep {
            at_ms: elapsed.as_millis() as u64,
            event: label,
            outcome,
            fired,
            snapshot: viewer.snapshot(),
        });
    }
    steps
}
