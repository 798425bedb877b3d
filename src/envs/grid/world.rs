use crate::error::{LayoutError, MdpError, Result};
use itertools::Itertools;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Empty,
    Pit,
    Den,
    Treasure,
    /// Treasure lying in the den.
    TreasureDen,
}

impl CellKind {
    pub fn from_char(c: char) -> Self {
        match c {
            'o' => CellKind::Pit,
            'w' => CellKind::Den,
            'x' => CellKind::Treasure,
            '@' => CellKind::TreasureDen,
            _ => CellKind::Empty,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            CellKind::Empty => ' ',
            CellKind::Pit => 'o',
            CellKind::Den => 'w',
            CellKind::Treasure => 'x',
            CellKind::TreasureDen => '@',
        }
    }

    pub fn is_den(self) -> bool {
        matches!(self, CellKind::Den | CellKind::TreasureDen)
    }

    pub fn has_treasure(self) -> bool {
        matches!(self, CellKind::Treasure | CellKind::TreasureDen)
    }
}

/// Static grid, row-major, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    width: usize,
    height: usize,
    cells: Vec<CellKind>,
    den: Option<(usize, usize)>,
}

impl World {
    pub fn new(rows: Vec<Vec<CellKind>>) -> Result<Self> {
        if rows.iter().all(Vec::is_empty) {
            return Err(LayoutError::Empty.into());
        }
        let width = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().find_position(|r| r.len() != width) {
            return Err(LayoutError::Ragged {
                row,
                expected: width,
                found: r.len(),
            }
            .into());
        }

        let height = rows.len();
        let cells = rows.into_iter().flatten().collect::<Vec<_>>();
        let den = cells
            .iter()
            .position(|c| c.is_den())
            .map(|p| (p % width, p / width));

        Ok(Self {
            width,
            height,
            cells,
            den,
        })
    }

    /// One line per row; see [`CellKind::from_char`].
    pub fn parse(layout: &str) -> Result<Self> {
        let rows = layout
            .lines()
            .map(|l| l.chars().map(CellKind::from_char).collect())
            .collect();

        Self::new(rows)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let layout = std::fs::read_to_string(path)?;
        Self::parse(&layout)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_at(&self, x: usize, y: usize) -> Result<CellKind> {
        self.cell(x, y).ok_or(MdpError::InvalidCoordinates {
            x,
            y,
            width: self.width,
            height: self.height,
        })
    }

    /// Off-grid positions hold nothing.
    fn cell(&self, x: usize, y: usize) -> Option<CellKind> {
        (x < self.width && y < self.height).then(|| self.cells[x + self.width * y])
    }

    pub fn is_pit(&self, x: usize, y: usize) -> bool {
        self.cell(x, y) == Some(CellKind::Pit)
    }

    pub fn is_den(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_some_and(CellKind::is_den)
    }

    pub fn is_den_with_live_monster(&self, x: usize, y: usize, killed_monster: bool) -> bool {
        !killed_monster && self.is_den(x, y)
    }

    pub fn has_treasure(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_some_and(CellKind::has_treasure)
    }

    /// First den in row-major order.
    pub fn den_location(&self) -> Option<(usize, usize)> {
        self.den
    }

    /// Clamped single step.
    pub fn step(&self, x: usize, y: usize, (dx, dy): (isize, isize)) -> (usize, usize) {
        let clamp = |v: usize, d: isize, n: usize| {
            v.checked_add_signed(d).filter(|&v| v < n).unwrap_or(v)
        };

        (clamp(x, dx, self.width), clamp(y, dy, self.height))
    }
}

impl FromStr for World {
    type Err = MdpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self
            .cells
            .chunks(self.width)
            .map(|r| r.iter().map(|c| c.as_char()).collect::<String>());
        write!(f, "{}", rows.format("\n"))
    }
}
