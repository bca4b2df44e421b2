// Text line → shell input conversion. Pointer lines carry raw host events;
// everything else is an i3-style command.

use tessel_core::{InputEvent, Size, Vec2};
use tessel_input::{Command, ParseCommandError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Command(Command),
    Pointer(InputEvent),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error(transparent)]
    Command(#[from] ParseCommandError),

    #[error("malformed {kind} event: {line:?}")]
    Event { kind: &'static str, line: String },
}

/// Parse one line. `pointer down|move|up <x> <y>` and `screen <w> <h>` are
/// host events; anything else goes through the command parser.
pub fn parse_line(line: &str) -> Result<Input, InputError> {
    let mut words = line.split_whitespace();
    match words.next() {
        Some("pointer") => {
            let kind = words.next();
            let position = pair(&mut words).map(|(x, y)| Vec2::new(x, y));
            let event = match (kind, position) {
                (Some("down"), Some(position)) => InputEvent::PointerDown { position },
                (Some("move"), Some(position)) => InputEvent::PointerMove { position },
                (Some("up"), Some(position)) => InputEvent::PointerUp { position },
                _ => return Err(malformed("pointer", line)),
            };
            Ok(Input::Pointer(event))
        }
        Some("screen") => match pair(&mut words) {
            Some((width, height)) if width > 0.0 && height > 0.0 => {
                Ok(Input::Pointer(InputEvent::Resize {
                    size: Size::new(width, height),
                }))
            }
            _ => Err(malformed("screen", line)),
        },
        _ => Ok(Input::Command(line.parse()?)),
    }
}

/// Exactly two finite numbers and nothing after them.
fn pair<'a>(words: &mut impl Iterator<Item = &'a str>) -> Option<(f32, f32)> {
    let a = words.next()?.parse::<f32>().ok()?;
    let b = words.next()?.parse::<f32>().ok()?;
    if words.next().is_some() || !a.is_finite() || !b.is_finite() {
        return None;
    }
    Some((a, b))
}

fn malformed(kind: &'static str, line: &str) -> InputError {
    InputError::Event {
        kind,
        line: line.trim().to_string(),
    }
}
