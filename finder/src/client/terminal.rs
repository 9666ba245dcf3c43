//! Line-oriented terminal front end
//!
//! Parses typed commands into controller inputs and draws a [`ViewState`] as
//! text. Holds no state of its own.

use std::fmt::Write as _;
use thiserror::Error;

use crate::catalog::ShapeCatalog;
use crate::grid::{Cell, GRID_SIZE};

use super::annotation::{CellStatus, Mark};
use super::controller::{Input, ViewState};

pub const HELP: &str = "\
Commands:
  shape <id|number>   toggle a shape (see `shapes`)
  mode treasure|empty select what a click marks (t / e)
  mark <row> <col>    click a cell, rows and columns numbered 1-5
  reset               clear all marks and shapes
  shapes              list the shapes
  help                show this help
  quit                exit";

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Input(Input),
    ListShapes,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0} (type `help`)")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("No such shape: {0}")]
    UnknownShape(String),

    #[error("Rows and columns run from 1 to {}", GRID_SIZE)]
    OutOfRange,
}

pub fn parse_command(line: &str, catalog: &ShapeCatalog) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match (verb.to_lowercase().as_str(), args.as_slice()) {
        ("shape" | "s", [name]) => {
            Command::Input(Input::ToggleShape(resolve_shape(name, catalog)?))
        }
        ("shape" | "s", _) => return Err(CommandError::Usage("shape <id|number>")),
        ("mode" | "m", [mode]) => {
            let mark = match mode.to_lowercase().as_str() {
                "treasure" | "t" => Mark::Treasure,
                "empty" | "e" => Mark::Empty,
                _ => return Err(CommandError::Usage("mode treasure|empty")),
            };
            Command::Input(Input::SetMode(mark))
        }
        ("mode" | "m", _) => return Err(CommandError::Usage("mode treasure|empty")),
        ("mark" | "c", [row, col]) => {
            // Typed coordinates are 1-based
            let parse = |s: &str| {
                s.parse::<i64>()
                    .map_err(|_| CommandError::Usage("mark <row> <col>"))?
                    .checked_sub(1)
                    .ok_or(CommandError::OutOfRange)
            };
            let cell =
                Cell::new(parse(*row)?, parse(*col)?).map_err(|_| CommandError::OutOfRange)?;
            Command::Input(Input::ClickCell(cell))
        }
        ("mark" | "c", _) => return Err(CommandError::Usage("mark <row> <col>")),
        ("reset", []) => Command::Input(Input::Reset),
        ("shapes", []) => Command::ListShapes,
        ("help" | "?", _) => Command::Help,
        ("quit" | "exit" | "q", _) => Command::Quit,
        _ => return Err(CommandError::UnknownCommand(line.trim().to_string())),
    };
    Ok(Some(command))
}

/// Accept a catalog id, or a 1-based position in the catalog listing
fn resolve_shape(name: &str, catalog: &ShapeCatalog) -> Result<String, CommandError> {
    if catalog.contains(name) {
        return Ok(name.to_string());
    }
    name.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| catalog.get_index(i))
        .map(|shape| shape.id.clone())
        .ok_or_else(|| CommandError::UnknownShape(name.to_string()))
}

pub fn render_shapes(catalog: &ShapeCatalog, selected: &[String]) -> String {
    let mut out = String::new();
    for (i, shape) in catalog.iter().enumerate() {
        let mark = if selected.contains(&shape.id) { 'x' } else { ' ' };
        let _ = writeln!(out, "  [{}] {}. {}  {}", mark, i + 1, shape.id, shape.description);
    }
    out
}

/// Draw the board, mode, selection and status line
pub fn render_view(view: &ViewState) -> String {
    let mut out = String::new();

    out.push_str("     ");
    for col in 1..=GRID_SIZE {
        let _ = write!(out, "  {}   ", col);
    }
    out.push('\n');

    for (r, row) in view.grid.rows().enumerate() {
        let _ = write!(out, "  {}  ", r + 1);
        for visual in row {
            let marker = match visual.annotation {
                CellStatus::Treasure => '$',
                CellStatus::Empty => 'x',
                CellStatus::Unknown => ' ',
            };
            let shade = match visual.intensity {
                None => ' ',
                Some(1..=3) => '.',
                Some(4..=6) => ':',
                Some(_) => '#',
            };
            let _ = write!(out, "[{}{}{:>2}]", marker, shade, visual.label);
        }
        out.push('\n');
    }

    let mode = match view.mode {
        Mark::Treasure => "treasure",
        Mark::Empty => "empty",
    };
    let shapes = if view.selection.is_empty() {
        "-".to_string()
    } else {
        view.selection.join(", ")
    };
    let _ = writeln!(out, "Mode: {}   Shapes: {}", mode, shapes);
    let _ = write!(out, "{}", view.status);
    if view.loading {
        out.push_str("  (calculating...)");
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::status::StatusLine;

    fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        parse_command(line, &ShapeCatalog::builtin())
    }

    #[test]
    fn test_parse_shape_by_id_and_number() {
        assert_eq!(
            parse("shape L").unwrap(),
            Some(Command::Input(Input::ToggleShape("L".to_string())))
        );
        assert_eq!(
            parse("shape 7").unwrap(),
            Some(Command::Input(Input::ToggleShape("凹".to_string())))
        );
        assert_eq!(parse("shape 9"), Err(CommandError::UnknownShape("9".to_string())));
        assert_eq!(parse("shape 0"), Err(CommandError::UnknownShape("0".to_string())));
    }

    #[test]
    fn test_parse_mark_is_one_based() {
        assert_eq!(
            parse("mark 1 5").unwrap(),
            Some(Command::Input(Input::ClickCell(Cell::new(0, 4).unwrap())))
        );
        assert_eq!(parse("mark 6 1"), Err(CommandError::OutOfRange));
        assert_eq!(parse("mark 0 1"), Err(CommandError::OutOfRange));
        assert!(matches!(parse("mark a b"), Err(CommandError::Usage(_))));
        assert_eq!(parse("mark -9223372036854775808 1"), Err(CommandError::OutOfRange));
        assert_eq!(parse("mark 1 -9223372036854775808"), Err(CommandError::OutOfRange));
        assert!(matches!(
            parse("mark 99999999999999999999 1"),
            Err(CommandError::Usage(_))
        ));
    }

    #[test]
    fn test_parse_mode_and_misc() {
        assert_eq!(parse("mode e").unwrap(), Some(Command::Input(Input::SetMode(Mark::Empty))));
        assert_eq!(
            parse("MODE Treasure").unwrap(),
            Some(Command::Input(Input::SetMode(Mark::Treasure)))
        );
        assert_eq!(parse("reset").unwrap(), Some(Command::Input(Input::Reset)));
        assert_eq!(parse("   ").unwrap(), None);
        assert_eq!(parse("quit").unwrap(), Some(Command::Quit));
        assert!(matches!(parse("dance"), Err(CommandError::UnknownCommand(_))));
    }

    #[test]
    fn test_render_view_shows_labels_and_status() {
        let view = ViewState {
            status: StatusLine::EmptySelection,
            ..Default::default()
        };
        let text = render_view(&view);
        assert_eq!(text.matches("[   0]").count(), GRID_SIZE * GRID_SIZE);
        assert!(text.contains("Please select at least one shape"));
        assert!(text.contains("Mode: treasure"));
    }

    #[test]
    fn test_render_shapes_marks_selected() {
        let text = render_shapes(&ShapeCatalog::builtin(), &["T".to_string()]);
        assert!(text.contains("[x] 2. T"));
        assert!(text.contains("[ ] 1. L"));
    }
}
