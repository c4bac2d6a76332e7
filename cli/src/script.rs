//! JSON-lines event scripts replayed against a [`Session`].
//!
//! One event per line, e.g.
//!
//! ```text
//! {"event":"image_loaded","width":1920,"height":1080}
//! {"event":"viewport","width":800,"height":450}
//! {"event":"down","x":80,"y":45}
//! {"event":"move","x":720,"y":400}
//! {"event":"up"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::io::BufRead;

use annotate::doc::Speed;
use annotate::engine::{Action, Session};
use annotate::input::Mode;
use annotate::mapper::Point;
use serde::Deserialize;
use uuid::Uuid;

use crate::CliError;

/// A single scripted host event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    ImageLoaded { width: u32, height: u32 },
    ImageFailed { reason: String },
    ImageUrl { url: String },
    Viewport { width: f64, height: f64 },
    Mode { mode: Mode },
    Speed { speed: Speed },
    Disabled { disabled: bool },
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    Describe { text: String },
    Cancel,
    Remove { id: Uuid },
    RemoveAt { x: f64, y: f64 },
    Clear,
    Dismiss,
}

/// Parse every event from `reader`, reporting the 1-based line of the first bad one.
pub fn parse_script(reader: impl BufRead) -> Result<Vec<ScriptEvent>, CliError> {
    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(event) = parse_line(&line).map_err(|source| CliError::Script { line: idx + 1, source })? {
            events.push(event);
        }
    }
    Ok(events)
}

fn parse_line(line: &str) -> Result<Option<ScriptEvent>, serde_json::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
}

/// Apply one event to `session`, returning the actions it produced.
pub fn apply(session: &mut Session, event: &ScriptEvent) -> Vec<Action> {
    match event {
        ScriptEvent::ImageLoaded { width, height } => session.image_loaded(*width, *height),
        ScriptEvent::ImageFailed { reason } => session.image_failed(reason.clone()),
        ScriptEvent::ImageUrl { url } => {
            session.set_image_url(url.clone());
            vec![Action::RenderNeeded]
        }
        ScriptEvent::Viewport { width, height } => session.set_viewport(*width, *height),
        ScriptEvent::Mode { mode } => {
            session.set_mode(*mode);
            vec![]
        }
        ScriptEvent::Speed { speed } => {
            session.set_speed(*speed);
            vec![]
        }
        ScriptEvent::Disabled { disabled } => {
            session.set_disabled(*disabled);
            vec![]
        }
        ScriptEvent::Down { x, y } => session.on_pointer_down(Point::new(*x, *y)),
        ScriptEvent::Move { x, y } => session.on_pointer_move(Point::new(*x, *y)),
        ScriptEvent::Up => session.on_pointer_up(),
        ScriptEvent::Describe { text } => session.confirm_description(text),
        ScriptEvent::Cancel => session.cancel_description(),
        ScriptEvent::Remove { id } => session.remove(id),
        ScriptEvent::RemoveAt { x, y } => session.remove_at(Point::new(*x, *y)),
        ScriptEvent::Clear => session.clear(),
        ScriptEvent::Dismiss => {
            session.dismiss_notice();
            vec![]
        }
    }
}
