//! Selection model for the grid
//!
//! A selection is an active cell (the anchor for paste and drag-select) plus
//! zero or more rectangular regions. Regions may overlap; [`SelectionModel::cells`]
//! visits each coordinate once.

use std::collections::HashSet;

use crate::table::CellCoord;

/// Inclusive rectangle of cells, normalized so start <= end on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    start: CellCoord,
    end: CellCoord,
}

impl Region {
    /// Rectangle spanning two corners in any order
    pub fn new(a: CellCoord, b: CellCoord) -> Self {
        Self {
            start: CellCoord::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellCoord::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    pub fn from_bounds(start_row: usize, start_col: usize, end_row: usize, end_col: usize) -> Self {
        Self::new(
            CellCoord::new(start_row, start_col),
            CellCoord::new(end_row, end_col),
        )
    }

    /// Single-cell region
    pub fn cell(coord: CellCoord) -> Self {
        Self {
            start: coord,
            end: coord,
        }
    }

    pub fn start(&self) -> CellCoord {
        self.start
    }

    pub fn end(&self) -> CellCoord {
        self.end
    }

    pub fn row_count(&self) -> usize {
        self.end.row - self.start.row + 1
    }

    pub fn col_count(&self) -> usize {
        self.end.col - self.start.col + 1
    }

    pub fn cell_count(&self) -> usize {
        self.row_count() * self.col_count()
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        (self.start.row..=self.end.row).contains(&coord.row)
            && (self.start.col..=self.end.col).contains(&coord.col)
    }

    /// Row-major iterator over every coordinate
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        (self.start.row..=self.end.row).flat_map(move |row| {
            (self.start.col..=self.end.col).map(move |col| CellCoord::new(row, col))
        })
    }

    /// Smallest region covering both
    pub fn union_bounds(&self, other: &Region) -> Region {
        Region {
            start: CellCoord::new(
                self.start.row.min(other.start.row),
                self.start.col.min(other.start.col),
            ),
            end: CellCoord::new(
                self.end.row.max(other.end.row),
                self.end.col.max(other.end.col),
            ),
        }
    }

    /// Part of this region inside a `rows` x `cols` grid, if any
    pub fn clip(&self, rows: usize, cols: usize) -> Option<Region> {
        if rows == 0 || cols == 0 || self.start.row >= rows || self.start.col >= cols {
            return None;
        }
        Some(Region {
            start: self.start,
            end: CellCoord::new(self.end.row.min(rows - 1), self.end.col.min(cols - 1)),
        })
    }
}

/// Active cell plus the selected regions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    /// Anchor for drag-select and paste
    active: CellCoord,
    regions: Vec<Region>,
}

impl SelectionModel {
    /// Empty selection with the active cell at (0, 0)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the anchor and replace all regions with a single-cell region
    pub fn set_active(&mut self, coord: CellCoord) {
        self.active = coord;
        self.regions.clear();
        self.regions.push(Region::cell(coord));
    }

    /// Drag-select: the current region spans from the anchor to `coord`
    pub fn extend_to(&mut self, coord: CellCoord) {
        let region = Region::new(self.active, coord);
        match self.regions.last_mut() {
            Some(last) => *last = region,
            None => self.regions.push(region),
        }
    }

    /// Ctrl-click style: add a region, leaving the anchor where it is
    pub fn add_region(&mut self, region: Region) {
        self.regions.push(region);
    }

    /// Select every cell of a `rows` x `cols` grid; anchor moves to (0, 0)
    pub fn select_all(&mut self, rows: usize, cols: usize) {
        self.active = CellCoord::default();
        self.regions.clear();
        if rows > 0 && cols > 0 {
            self.regions
                .push(Region::from_bounds(0, 0, rows - 1, cols - 1));
        }
    }

    /// Drop all regions and reset the anchor
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn active(&self) -> CellCoord {
        self.active
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Every selected coordinate once, in first-seen order
    pub fn cells(&self) -> Vec<CellCoord> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for region in &self.regions {
            for coord in region.cells() {
                if seen.insert(coord) {
                    out.push(coord);
                }
            }
        }
        out
    }

    /// Bounding rectangle of all regions
    pub fn bounding_box(&self) -> Option<Region> {
        let mut iter = self.regions.iter();
        let first = *iter.next()?;
        Some(iter.fold(first, |acc, r| acc.union_bounds(r)))
    }
}
