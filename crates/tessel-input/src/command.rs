use std::str::FromStr;

use tessel_core::{workspace_for_key, Direction, SplitDirection, WindowId, WorkspaceId};
use thiserror::Error;

// ──────────────────────────────────────────────
// Command
// ──────────────────────────────────────────────

/// Everything the keyboard side of the shell can ask for. Parsed from
/// i3-style text such as `focus left` or `move container to workspace 3`.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Focus(Direction),
    FocusWindow(WindowId),
    Move(Direction),
    /// Direction used by the next tile.
    Split(SplitDirection),
    /// Re-orient the split holding the focused window.
    Layout(SplitDirection),
    /// Grow the focused slot; `None` means the configured step.
    Grow(Option<f64>),
    Shrink(Option<f64>),
    /// Shift the focused slot's ratio by an exact signed amount.
    ResizeBy(f64),
    ToggleFloating,
    ToggleFullscreen,
    ToggleMaximize,
    Workspace(WorkspaceId),
    MoveToWorkspace(WorkspaceId),
    Open { id: WindowId, title: Option<String> },
    Close,
    Minimize,
    Restore(WindowId),
    Tile(WindowId),
    Untile(WindowId),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("{command}: missing {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("{command}: invalid argument {value:?}")]
    InvalidArgument {
        command: &'static str,
        value: String,
    },

    #[error("{command}: unexpected trailing input {rest:?}")]
    Trailing { command: String, rest: String },
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(ParseCommandError::Empty);
        };

        let command = match head {
            "focus" => match required(&mut words, "focus", "direction or `window <id>`")? {
                "window" => Command::FocusWindow(required(&mut words, "focus", "window id")?.into()),
                word => Command::Focus(direction("focus", word)?),
            },
            "move" => match required(&mut words, "move", "direction or `container`")? {
                "container" => {
                    expect_word(&mut words, "move", "to")?;
                    expect_word(&mut words, "move", "workspace")?;
                    Command::MoveToWorkspace(workspace_key(
                        "move",
                        required(&mut words, "move", "workspace key")?,
                    )?)
                }
                word => Command::Move(direction("move", word)?),
            },
            "split" => Command::Split(match required(&mut words, "split", "h or v")? {
                "h" | "horizontal" => SplitDirection::Horizontal,
                "v" | "vertical" => SplitDirection::Vertical,
                other => return Err(invalid("split", other)),
            }),
            "layout" => Command::Layout(match required(&mut words, "layout", "splith or splitv")? {
                "splith" => SplitDirection::Horizontal,
                "splitv" => SplitDirection::Vertical,
                other => return Err(invalid("layout", other)),
            }),
            "resize" => match required(&mut words, "resize", "grow, shrink or by")? {
                "grow" => Command::Grow(optional_step(&mut words)?),
                "shrink" => Command::Shrink(optional_step(&mut words)?),
                "by" => Command::ResizeBy(number(
                    "resize",
                    required(&mut words, "resize", "delta")?,
                )?),
                other => return Err(invalid("resize", other)),
            },
            "floating" => {
                expect_word(&mut words, "floating", "toggle")?;
                Command::ToggleFloating
            }
            "fullscreen" => {
                expect_word(&mut words, "fullscreen", "toggle")?;
                Command::ToggleFullscreen
            }
            "maximize" => {
                expect_word(&mut words, "maximize", "toggle")?;
                Command::ToggleMaximize
            }
            "workspace" => Command::Workspace(workspace_key(
                "workspace",
                required(&mut words, "workspace", "workspace key")?,
            )?),
            "open" => {
                let id = required(&mut words, "open", "window id")?.to_string();
                let title = words.by_ref().collect::<Vec<_>>().join(" ");
                Command::Open {
                    id,
                    title: (!title.is_empty()).then_some(title),
                }
            }
            "close" | "kill" => Command::Close,
            "minimize" => Command::Minimize,
            "restore" => Command::Restore(required(&mut words, "restore", "window id")?.into()),
            "tile" => Command::Tile(required(&mut words, "tile", "window id")?.into()),
            "untile" => Command::Untile(required(&mut words, "untile", "window id")?.into()),
            other => return Err(ParseCommandError::Unknown(other.to_string())),
        };

        let rest = words.collect::<Vec<_>>().join(" ");
        if !rest.is_empty() {
            return Err(ParseCommandError::Trailing {
                command: head.to_string(),
                rest,
            });
        }
        Ok(command)
    }
}

// ── Argument helpers ────────────────────────

fn required<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, ParseCommandError> {
    words
        .next()
        .ok_or(ParseCommandError::MissingArgument { command, expected })
}

fn expect_word<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    expected: &'static str,
) -> Result<(), ParseCommandError> {
    match required(words, command, expected)? {
        word if word == expected => Ok(()),
        other => Err(invalid(command, other)),
    }
}

fn optional_step<'a>(
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<Option<f64>, ParseCommandError> {
    words.next().map(|word| number("resize", word)).transpose()
}

fn direction(command: &'static str, word: &str) -> Result<Direction, ParseCommandError> {
    Direction::from_name(word).ok_or_else(|| invalid(command, word))
}

fn number(command: &'static str, word: &str) -> Result<f64, ParseCommandError> {
    match word.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(invalid(command, word)),
    }
}

/// Digit keys `1`..`9` name workspaces 1 to 9; `0` names workspace 10.
fn workspace_key(command: &'static str, word: &str) -> Result<WorkspaceId, ParseCommandError> {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(key), None) => workspace_for_key(key).ok_or_else(|| invalid(command, word)),
        _ => Err(invalid(command, word)),
    }
}

fn invalid(command: &'static str, value: &str) -> ParseCommandError {
    ParseCommandError::InvalidArgument {
        command,
        value: value.to_string(),
    }
}
