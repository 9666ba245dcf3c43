use std::fmt;

/// One-line summary shown under the board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusLine {
    #[default]
    Idle,
    /// Last successful count, for the shapes that request was made with
    Summary { shapes: Vec<String>, total: u64 },
    EmptySelection,
    RequestFailed,
    Reset,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLine::Idle => write!(f, "Select shapes and mark cells to begin"),
            StatusLine::Summary { shapes, total } => write!(
                f,
                "Shapes \"{}\" have {} possible placements (all orientations considered)",
                shapes.join(", "),
                total
            ),
            StatusLine::EmptySelection => write!(f, "Please select at least one shape"),
            StatusLine::RequestFailed => write!(f, "Calculation failed, please try again"),
            StatusLine::Reset => write!(f, "User input has been reset"),
        }
    }
}
