use crossterm::style::{Color, StyledContent, Stylize};

use std::fmt;

/// A single entry of the occupancy grid.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GridCell {
    Path = 0,
    #[default]
    Wall = 1,
}

impl GridCell {
    /// Character used for this entry in the text form of a grid.
    pub fn symbol(self) -> char {
        match self {
            GridCell::Path => '.',
            GridCell::Wall => '#',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' | ' ' => Some(GridCell::Path),
            '#' => Some(GridCell::Wall),
            _ => None,
        }
    }
}

impl TryFrom<u8> for GridCell {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(GridCell::Path),
            1 => Ok(GridCell::Wall),
            other => Err(other),
        }
    }
}

/// Category of a grid entry in a solver visualization.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualCell {
    #[default]
    Wall,
    /// An open entry not touched by the search.
    Path,
    /// A cell that has been popped from a frontier and closed.
    Explored,
    /// Part of the solution route, including the wall slots it passes through.
    Solution,
    Start,
    End,
}

impl VisualCell {
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;

    /// Glyph and colour used when drawing this category in a terminal.
    pub fn styled_symbol(self) -> StyledContent<&'static str> {
        match self {
            VisualCell::Wall => "⬜".with(Color::White),
            VisualCell::Path => "  ".with(Color::Reset),
            VisualCell::Explored => "* ".with(Color::Blue),
            VisualCell::Solution => "🟨".with(Color::Yellow),
            VisualCell::Start => "🟩".with(Color::Green),
            VisualCell::End => "🟥".with(Color::Red),
        }
    }
}

impl From<GridCell> for VisualCell {
    fn from(cell: GridCell) -> Self {
        match cell {
            GridCell::Path => VisualCell::Path,
            GridCell::Wall => VisualCell::Wall,
        }
    }
}

impl fmt::Display for VisualCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = self.styled_symbol();

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                VisualCell::CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}
