#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Game of Life simulation engine: a fixed-size grid of dead/alive cells,
//! the canonical birth/survival rule, and an atomic one-generation step.
//!
//! The grid is finite with clamped edges: a neighbor outside the bounds
//! simply does not exist. There is no toroidal wraparound.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("cell ({row}, {col}) out of bounds for grid of size {width}x{height}")]
    OutOfBounds {
        row: u32,
        col: u32,
        width: u32,
        height: u32,
    },
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Loc {
    pub row: u32,
    pub col: u32,
}

impl Loc {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub fn grid_index(&self, width: u32, height: u32) -> Option<usize> {
        if self.row < height && self.col < width {
            Some(self.row as usize * width as usize + self.col as usize)
        } else {
            None
        }
    }
}

/// The canonical Life rule. Pure and total: no failure case.
pub fn next_state(current: CellState, live_neighbors: u32) -> CellState {
    match (current, live_neighbors) {
        (CellState::Alive, 2..=3) => CellState::Alive,
        (CellState::Dead, 3) => CellState::Alive,
        _ => CellState::Dead,
    }
}

#[derive(Clone, Debug)]
pub struct LifeGrid {
    width: u32,
    height: u32,
    cells: Vec<CellState>,
}

impl LifeGrid {
    /// Creates a grid with every cell dead. Dimensions are fixed for the
    /// lifetime of the grid.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0);
        Self {
            width,
            height,
            cells: vec![CellState::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &CellState> + Clone {
        self.cells.iter()
    }

    pub fn num_live_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    fn cell(&self, loc: Loc) -> Option<CellState> {
        loc.grid_index(self.width, self.height)
            .map(|index| self.cells[index])
    }

    pub fn get(&self, loc: Loc) -> Result<CellState, GridError> {
        self.cell(loc).ok_or(GridError::OutOfBounds {
            row: loc.row,
            col: loc.col,
            width: self.width,
            height: self.height,
        })
    }

    pub fn set(&mut self, loc: Loc, state: CellState) -> Result<(), GridError> {
        let index = loc
            .grid_index(self.width, self.height)
            .ok_or(GridError::OutOfBounds {
                row: loc.row,
                col: loc.col,
                width: self.width,
                height: self.height,
            })?;
        self.cells[index] = state;
        Ok(())
    }

    /// Counts live cells among the 8 surrounding positions. Positions outside
    /// the grid are skipped, so edge and corner cells see fewer neighbors.
    pub fn num_live_neighbors(&self, loc: Loc) -> u32 {
        let mut result = 0;
        for row_offset in -1i64..=1 {
            for col_offset in -1i64..=1 {
                if row_offset == 0 && col_offset == 0 {
                    continue;
                }
                let row = loc.row as i64 + row_offset;
                let col = loc.col as i64 + col_offset;
                if row < 0 || col < 0 {
                    continue;
                }
                if let Some(CellState::Alive) = self.cell(Loc::new(row as u32, col as u32)) {
                    result += 1;
                }
            }
        }
        result
    }

    /// Advances the whole grid by one generation.
    ///
    /// Two-phase: the scan reads only the pre-advance generation and collects
    /// the cells that change, then both transition lists are applied. The
    /// lists are disjoint by construction, so the result is the classical
    /// one-step transform applied to the grid as a single unit.
    pub fn advance(&mut self) {
        let width = self.width as usize;
        let mut births = Vec::new();
        let mut deaths = Vec::new();

        for (index, &current) in self.cells.iter().enumerate() {
            let loc = Loc::new((index / width) as u32, (index % width) as u32);
            let next = next_state(current, self.num_live_neighbors(loc));
            match (current, next) {
                (CellState::Dead, CellState::Alive) => births.push(index),
                (CellState::Alive, CellState::Dead) => deaths.push(index),
                _ => (),
            }
        }

        for index in births {
            self.cells[index] = CellState::Alive;
        }
        for index in deaths {
            self.cells[index] = CellState::Dead;
        }
    }
}
