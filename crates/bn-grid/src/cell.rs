//! Cell types.

/// Type of a grid cell.  `Firewall` is terminal for the spread rule; only an
/// explicit clear reverts it to `Safe`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Safe,
    Infected,
    Firewall,
}

impl CellKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CellKind::Safe     => "safe",
            CellKind::Infected => "infected",
            CellKind::Firewall => "firewall",
        }
    }
}

impl std::fmt::Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cell: the type everyone reads this tick, and the type it will have
/// after the next commit.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub current: CellKind,
    pub pending: CellKind,
}

impl Cell {
    pub fn new(kind: CellKind) -> Self {
        Self { current: kind, pending: kind }
    }
}

/// Column/row address of a cell.  `x` is the column.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    pub x: u32,
    pub y: u32,
}

impl CellCoord {
    #[inline]
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}
