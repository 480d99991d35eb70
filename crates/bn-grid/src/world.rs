//! `GridWorld`: row-major cell storage plus canvas mapping.
//!
//! The grid is laid out as square cells of `cell_size` starting at `origin`.
//! [`GridWorld::fit`] picks the largest cell size that fits the canvas and
//! centres the grid, which is how the quarantine scenario places it.

use bn_core::{BnError, BnResult, Bounds, Vec2};

use crate::{Cell, CellCoord, CellKind};

/// 4-neighborhood offsets: right, left, down, up.
const OFFSETS: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Per-type cell totals (current buffer).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCounts {
    pub safe:     usize,
    pub infected: usize,
    pub firewall: usize,
}

#[derive(Clone, Debug)]
pub struct GridWorld {
    cols:      u32,
    rows:      u32,
    cell_size: f32,
    origin:    Vec2,
    cells:     Vec<Cell>,
}

impl GridWorld {
    /// An all-safe grid.
    ///
    /// # Errors
    ///
    /// [`BnError::Config`] for zero dimensions or a non-positive cell size.
    pub fn new(cols: u32, rows: u32, cell_size: f32, origin: Vec2) -> BnResult<Self> {
        if cols == 0 || rows == 0 {
            return Err(BnError::Config(format!("grid dimensions must be non-zero, got {cols}x{rows}")));
        }
        if !(cell_size.is_finite() && cell_size > 0.0) || !origin.is_finite() {
            return Err(BnError::Config(format!("invalid cell size {cell_size} or origin {origin}")));
        }
        Ok(Self {
            cols,
            rows,
            cell_size,
            origin,
            cells: vec![Cell::default(); cols as usize * rows as usize],
        })
    }

    /// Largest square cells that fit `canvas`, grid centred inside it.
    pub fn fit(cols: u32, rows: u32, canvas: Bounds) -> BnResult<Self> {
        let cell_size = (canvas.width() / cols.max(1) as f32).min(canvas.height() / rows.max(1) as f32);
        let origin = Vec2::new(
            canvas.min.x + (canvas.width() - cols as f32 * cell_size) * 0.5,
            canvas.min.y + (canvas.height() - rows as f32 * cell_size) * 0.5,
        );
        Self::new(cols, rows, cell_size, origin)
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn cols(&self) -> u32 { self.cols }
    pub fn rows(&self) -> u32 { self.rows }
    pub fn cell_size(&self) -> f32 { self.cell_size }
    pub fn origin(&self) -> Vec2 { self.origin }
    pub fn len(&self) -> usize { self.cells.len() }
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    /// The centre cell, `(cols / 2, rows / 2)`.
    pub fn centre(&self) -> CellCoord {
        CellCoord::new(self.cols / 2, self.rows / 2)
    }

    // ── Access ────────────────────────────────────────────────────────────

    #[inline]
    fn index(&self, c: CellCoord) -> Option<usize> {
        (c.x < self.cols && c.y < self.rows).then(|| c.y as usize * self.cols as usize + c.x as usize)
    }

    #[inline]
    pub fn get(&self, c: CellCoord) -> Option<&Cell> {
        self.index(c).map(|i| &self.cells[i])
    }

    /// Current type of the cell at `c`.
    #[inline]
    pub fn kind(&self, c: CellCoord) -> Option<CellKind> {
        self.get(c).map(|cell| cell.current)
    }

    /// Signed address → coordinate, `None` when off the grid.
    pub fn in_bounds(&self, x: i64, y: i64) -> Option<CellCoord> {
        let inside = x >= 0 && y >= 0 && x < self.cols as i64 && y < self.rows as i64;
        inside.then(|| CellCoord::new(x as u32, y as u32))
    }

    /// In-bounds 4-neighbors of `c` in right, left, down, up order.
    pub fn neighbors4(&self, c: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        OFFSETS
            .iter()
            .filter_map(move |&(dx, dy)| self.in_bounds(c.x as i64 + dx, c.y as i64 + dy))
    }

    /// `true` if any 4-neighbor of `c` is currently infected.
    pub fn touches_infection(&self, c: CellCoord) -> bool {
        self.neighbors4(c).any(|n| self.kind(n) == Some(CellKind::Infected))
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| CellCoord::new(x, y)))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Schedule `kind` for the next commit.  Returns `false` off-grid.
    pub fn set_pending(&mut self, c: CellCoord, kind: CellKind) -> bool {
        let Some(i) = self.index(c) else { return false };
        self.cells[i].pending = kind;
        true
    }

    /// Overwrite both buffers.  Returns `false` off-grid.
    pub fn set_immediate(&mut self, c: CellCoord, kind: CellKind) -> bool {
        let Some(i) = self.index(c) else { return false };
        self.cells[i] = Cell::new(kind);
        true
    }

    /// Promote every pending type to current.
    pub fn commit(&mut self) {
        for cell in &mut self.cells {
            cell.current = cell.pending;
        }
    }

    // ── Canvas mapping ────────────────────────────────────────────────────

    /// The cell containing canvas point `p`, or `None` outside the grid.
    pub fn cell_at_point(&self, p: Vec2) -> Option<CellCoord> {
        if !p.is_finite() {
            return None;
        }
        let gx = ((p.x - self.origin.x) / self.cell_size).floor();
        let gy = ((p.y - self.origin.y) / self.cell_size).floor();
        self.in_bounds(gx as i64, gy as i64)
    }

    pub fn cell_center(&self, c: CellCoord) -> Vec2 {
        Vec2::new(
            self.origin.x + (c.x as f32 + 0.5) * self.cell_size,
            self.origin.y + (c.y as f32 + 0.5) * self.cell_size,
        )
    }

    /// The firewall cell whose centre is nearest `p`, among those strictly
    /// closer than `threshold`.
    pub fn nearest_firewall_within(&self, p: Vec2, threshold: f32) -> Option<CellCoord> {
        self.coords()
            .filter(|&c| self.kind(c) == Some(CellKind::Firewall))
            .map(|c| (c, self.cell_center(c).distance(p)))
            .filter(|&(_, d)| d < threshold)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(c, _)| c)
    }

    pub fn counts(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for cell in &self.cells {
            match cell.current {
                CellKind::Safe     => counts.safe += 1,
                CellKind::Infected => counts.infected += 1,
                CellKind::Firewall => counts.firewall += 1,
            }
        }
        counts
    }
}
