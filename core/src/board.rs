// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and manipulation

/// Represents the board grid with stones and empty cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Size of the board (default 19)
    size: u8,
    /// Cells of the board in row-major order
    cells: Vec<Option<crate::Color>>,
}

impl Board {
    /// Create a new empty board with the specified size
    pub fn new(size: u8) -> Self {
        let cells = (size as usize) * (size as usize);
        Self {
            size,
            cells: vec![None; cells],
        }
    }

    /// Get the stone at the specified coordinate
    pub fn get(&self, coord: crate::Coord) -> Option<crate::Color> {
        if !coord.is_valid(self.size) {
            return None;
        }

        let idx = self.coord_to_index(coord);
        self.cells[idx]
    }

    /// Place a stone at the specified coordinate
    pub fn place(&mut self, coord: crate::Coord, color: crate::Color) -> bool {
        if !coord.is_valid(self.size) {
            return false;
        }

        let idx = self.coord_to_index(coord);
        if self.cells[idx].is_some() {
            return false;
        }

        self.cells[idx] = Some(color);
        true
    }

    /// Remove a stone at the specified coordinate
    pub fn remove(&mut self, coord: crate::Coord) -> bool {
        if !coord.is_valid(self.size) {
            return false;
        }

        let idx = self.coord_to_index(coord);
        if self.cells[idx].is_none() {
            return false;
        }

        self.cells[idx] = None;
        true
    }

    /// Convert a coordinate to a vector index
    fn coord_to_index(&self, coord: crate::Coord) -> usize {
        (coord.row as usize) * (self.size as usize) + (coord.col as usize)
    }

    /// Get the size of the board
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Total number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Empty coordinates in row-major order
    pub fn empty_coords(&self) -> Vec<crate::Coord> {
        let mut empties = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                let coord = crate::Coord::new(row, col);
                if self.get(coord).is_none() {
                    empties.push(coord);
                }
            }
        }
        empties
    }
}
