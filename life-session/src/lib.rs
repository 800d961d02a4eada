#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Interactive session layer on top of the `life-grid` engine: the mapping
//! from display-surface coordinates to grid cells, and the paused/running
//! controller that gates edits and generation ticks.

use life_grid::{CellState, LifeGrid, Loc};
use log::debug;
use thiserror::Error;

/// Pause prompt the frontend renders while editing is active.
pub const PAUSE_PROMPT: &str = "Paused, press 'Enter' to start";

/// A cell edge spans 1/100 of the surface width.
const CELLS_PER_SURFACE_WIDTH: u32 = 100;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("surface {width}x{height} too small to hold a single cell")]
    SurfaceTooSmall { width: u32, height: u32 },
}

/// How grid cells map onto the display surface: cell edge length, the margins
/// centering the playable area, and the derived playable-area borders.
///
/// Computed once from the surface size at startup and immutable afterwards;
/// there is no live-resize handling.
#[derive(Clone, Copy, Debug)]
pub struct ViewportGeometry {
    cell_size: u32,
    margin_x: u32,
    margin_y: u32,
    grid_pixel_width: u32,
    grid_pixel_height: u32,
}

impl ViewportGeometry {
    /// Derives the geometry from the surface size: cell edge length is
    /// `width / 100`, the playable extent is the largest whole-cell multiple
    /// that fits each axis, and the remainder is split evenly into margins.
    pub fn from_surface(width: u32, height: u32) -> Result<Self, GeometryError> {
        let cell_size = width / CELLS_PER_SURFACE_WIDTH;
        if cell_size == 0 || height < cell_size {
            return Err(GeometryError::SurfaceTooSmall { width, height });
        }
        let grid_pixel_width = (width / cell_size) * cell_size;
        let grid_pixel_height = (height / cell_size) * cell_size;
        Ok(Self {
            cell_size,
            margin_x: (width - grid_pixel_width) / 2,
            margin_y: (height - grid_pixel_height) / 2,
            grid_pixel_width,
            grid_pixel_height,
        })
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn grid_cols(&self) -> u32 {
        self.grid_pixel_width / self.cell_size
    }

    pub fn grid_rows(&self) -> u32 {
        self.grid_pixel_height / self.cell_size
    }

    pub fn left_border(&self) -> u32 {
        self.margin_x
    }

    pub fn right_border(&self) -> u32 {
        self.margin_x + self.grid_pixel_width
    }

    pub fn top_border(&self) -> u32 {
        self.margin_y
    }

    pub fn bottom_border(&self) -> u32 {
        self.margin_y + self.grid_pixel_height
    }

    /// True iff the pointer lies strictly inside all four borders. A
    /// coordinate exactly on a border counts as outside.
    pub fn is_in_playable_area(&self, x: f64, y: f64) -> bool {
        x > self.left_border() as f64
            && x < self.right_border() as f64
            && y > self.top_border() as f64
            && y < self.bottom_border() as f64
    }

    /// Maps a pointer position to a grid coordinate: margins subtracted,
    /// then divided by the cell edge length, truncating toward zero.
    ///
    /// The result is only meaningful for pointers inside the playable area;
    /// callers check with [`Self::is_in_playable_area`] first.
    pub fn cell_at(&self, x: f64, y: f64) -> Loc {
        let col = ((x - self.margin_x as f64) / self.cell_size as f64) as u32;
        let row = ((y - self.margin_y as f64) / self.cell_size as f64) as u32;
        Loc::new(row, col)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EditKind {
    Activate,
    Deactivate,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum RunState {
    #[default]
    Paused,
    Running,
}

/// Owns the one grid of a session and the paused/running flag that decides
/// which commands apply. Starts paused.
#[derive(Debug)]
pub struct SimulationController {
    grid: LifeGrid,
    geometry: ViewportGeometry,
    state: RunState,
}

impl SimulationController {
    pub fn new(geometry: ViewportGeometry) -> Self {
        Self {
            grid: LifeGrid::new(geometry.grid_cols(), geometry.grid_rows()),
            geometry,
            state: RunState::Paused,
        }
    }

    pub fn grid(&self) -> &LifeGrid {
        &self.grid
    }

    pub fn geometry(&self) -> &ViewportGeometry {
        &self.geometry
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// The prompt to render while paused, `None` while running.
    pub fn prompt(&self) -> Option<&'static str> {
        match self.state {
            RunState::Paused => Some(PAUSE_PROMPT),
            RunState::Running => None,
        }
    }

    /// Flips paused/running unconditionally.
    pub fn toggle(&mut self) {
        self.state = match self.state {
            RunState::Paused => RunState::Running,
            RunState::Running => RunState::Paused,
        };
        debug!("simulation {:?}", self.state);
    }

    /// Applies a pointer edit to the grid. Only legal while paused; edits
    /// while running and out-of-bounds pointers are ignored without error.
    pub fn edit(&mut self, x: f64, y: f64, kind: EditKind) {
        if self.is_running() {
            debug!("ignoring edit at ({x}, {y}) while running");
            return;
        }
        if !self.geometry.is_in_playable_area(x, y) {
            debug!("ignoring edit at ({x}, {y}) outside the playable area");
            return;
        }

        let loc = self.geometry.cell_at(x, y);
        let state = match kind {
            EditKind::Activate => CellState::Alive,
            EditKind::Deactivate => CellState::Dead,
        };
        self.grid
            .set(loc, state)
            .expect("cell mapped from inside the playable area is in bounds");
    }

    /// Advances the grid by one generation. Only legal while running; a tick
    /// while paused leaves the grid untouched.
    pub fn tick(&mut self) {
        if self.is_running() {
            self.grid.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1920x1080 surface: cell size 19, 101x56 cells, margins (0, 8).
    fn geometry() -> ViewportGeometry {
        ViewportGeometry::from_surface(1920, 1080).unwrap()
    }

    fn controller() -> SimulationController {
        SimulationController::new(geometry())
    }

    #[test]
    fn geometry_derives_cell_size_from_surface_width() {
        let geometry = geometry();
        assert_eq!(geometry.cell_size(), 19);
        assert_eq!(geometry.grid_cols(), 101);
        assert_eq!(geometry.grid_rows(), 56);
    }

    #[test]
    fn borders_are_margin_plus_grid_extent() {
        let geometry = geometry();
        assert_eq!(geometry.left_border(), 0);
        assert_eq!(geometry.right_border(), 101 * 19);
        assert_eq!(geometry.top_border(), 8);
        assert_eq!(geometry.bottom_border(), 8 + 56 * 19);
    }

    #[test]
    fn too_small_surface_is_rejected() {
        assert!(matches!(
            ViewportGeometry::from_surface(99, 600),
            Err(GeometryError::SurfaceTooSmall { .. })
        ));
        assert!(matches!(
            ViewportGeometry::from_surface(1920, 10),
            Err(GeometryError::SurfaceTooSmall { .. })
        ));
    }

    #[test]
    fn coordinates_exactly_on_borders_are_outside() {
        let geometry = geometry();
        let inside_x = geometry.left_border() as f64 + 1.0;
        let inside_y = geometry.top_border() as f64 + 1.0;

        assert!(!geometry.is_in_playable_area(geometry.left_border() as f64, inside_y));
        assert!(!geometry.is_in_playable_area(geometry.right_border() as f64, inside_y));
        assert!(!geometry.is_in_playable_area(inside_x, geometry.top_border() as f64));
        assert!(!geometry.is_in_playable_area(inside_x, geometry.bottom_border() as f64));
        assert!(geometry.is_in_playable_area(inside_x, inside_y));
    }

    #[test]
    fn cell_at_subtracts_margins_and_truncates() {
        let geometry = geometry();
        // Just inside the top-left corner of the playable area.
        assert_eq!(geometry.cell_at(2.0, 9.0), Loc::new(0, 0));
        // One full cell right and down from the margins.
        assert_eq!(geometry.cell_at(19.0, 8.0 + 19.0), Loc::new(1, 1));
        // Last pixel before the next cell boundary still maps to cell 0.
        assert_eq!(geometry.cell_at(18.9, 8.0 + 18.9), Loc::new(0, 0));
    }

    #[test]
    fn controller_starts_paused_with_empty_grid() {
        let controller = controller();
        assert!(!controller.is_running());
        assert_eq!(controller.prompt(), Some(PAUSE_PROMPT));
        assert_eq!(controller.grid().num_live_cells(), 0);
    }

    #[test]
    fn toggle_twice_restores_original_state() {
        let mut controller = controller();
        controller.toggle();
        assert!(controller.is_running());
        assert_eq!(controller.prompt(), None);
        controller.toggle();
        assert!(!controller.is_running());
        assert_eq!(controller.prompt(), Some(PAUSE_PROMPT));
    }

    #[test]
    fn activate_edit_sets_the_clicked_cell() {
        let mut controller = controller();
        let x = controller.geometry().left_border() as f64 + 30.0;
        let y = controller.geometry().top_border() as f64 + 30.0;
        controller.edit(x, y, EditKind::Activate);

        let loc = controller.geometry().cell_at(x, y);
        assert_eq!(controller.grid().get(loc).unwrap(), CellState::Alive);
        assert_eq!(controller.grid().num_live_cells(), 1);
    }

    #[test]
    fn deactivate_edit_clears_the_clicked_cell() {
        let mut controller = controller();
        let x = 100.0;
        let y = 100.0;
        controller.edit(x, y, EditKind::Activate);
        controller.edit(x, y, EditKind::Deactivate);
        assert_eq!(controller.grid().num_live_cells(), 0);
    }

    #[test]
    fn edit_while_running_is_a_silent_no_op() {
        let mut controller = controller();
        controller.toggle();
        controller.edit(100.0, 100.0, EditKind::Activate);
        assert_eq!(controller.grid().num_live_cells(), 0);
    }

    #[test]
    fn edit_outside_playable_area_is_a_silent_no_op() {
        let mut controller = controller();
        let left = controller.geometry().left_border() as f64;
        let right = controller.geometry().right_border() as f64;
        controller.edit(left, 100.0, EditKind::Activate);
        controller.edit(right, 100.0, EditKind::Activate);
        assert_eq!(controller.grid().num_live_cells(), 0);
    }

    #[test]
    fn tick_while_paused_leaves_grid_unchanged() {
        let mut controller = controller();
        // A lone cell would die on any advance.
        controller.edit(100.0, 100.0, EditKind::Activate);
        controller.tick();
        assert_eq!(controller.grid().num_live_cells(), 1);
    }

    #[test]
    fn tick_while_running_advances_one_generation() {
        let mut controller = controller();
        controller.edit(100.0, 100.0, EditKind::Activate);
        controller.toggle();
        controller.tick();
        assert_eq!(controller.grid().num_live_cells(), 0);
    }
}
