use log::debug;

use crate::component::{
    adopt, commit_layout, Component, ComponentBase, ComponentContainer, ComponentId,
    IntoBoxedComponent, SizeRequest,
};
use crate::direction::Orientation;
use crate::error::{ConfigurationError, Error};
use crate::{Rect, Vec2, XY};

mod solver;

use self::solver::{is_fixed, Allocation, Cells, Solver};
pub use self::solver::{MAX_ITERATIONS, WANTS_MORE_BONUS, ZERO_WEIGHT_HEURISTIC};

/// Arranges its children in rows and columns.
///
/// Every row is as tall as its tallest fixed cell, and every column as wide
/// as its widest fixed cell. Whatever space remains is shared between rows
/// (or columns) according to their weights.
///
/// A row or column without an explicit weight gets `0` when all its cells
/// are fixed along that axis, and `1` otherwise. Empty cells count as fixed
/// cells of size `(0, 0)`.
///
/// # Examples
///
/// ```rust
/// use trellis::components::{FixedSize, Grid, Spacer};
///
/// let mut grid = Grid::new();
/// grid.add(FixedSize::new(120.0, 20.0).unwrap(), 0, 0).unwrap();
/// grid.add(Spacer::new(), 0, 1).unwrap();
/// grid.add(Spacer::new(), 1, 1).unwrap();
/// grid.set_column_padding(8.0).unwrap();
///
/// assert_eq!((grid.n_rows(), grid.n_cols()), (2, 2));
/// ```
pub struct Grid {
    base: ComponentBase,
    rows: Cells,

    // `x` holds the column weights, `y` the row weights. May be longer
    // than the matrix.
    weights: XY<Vec<Option<f64>>>,

    // `x` is the space between columns, `y` the space between rows.
    padding: Vec2,

    // Allocation computed by the last `requested_space`.
    cache: Option<Allocation>,

    // Column widths and row heights of the last committed layout.
    tracks: Option<XY<Vec<f64>>>,
}

new_default!(Grid);

impl Grid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Grid {
            base: ComponentBase::new(),
            rows: Vec::new(),
            weights: XY::new(Vec::new(), Vec::new()),
            padding: Vec2::new(0.0, 0.0),
            cache: None,
            tracks: None,
        }
    }

    /// Creates a grid from a row-major matrix.
    ///
    /// Rows may have different lengths: shorter rows are padded with empty
    /// cells.
    pub fn from_rows(rows: Vec<Vec<Option<Box<dyn Component>>>>) -> Result<Self, Error> {
        let mut grid = Grid::new();
        let n_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        grid.pad_to(rows.len(), n_cols);

        for (row, cells) in rows.into_iter().enumerate() {
            for (col, cell) in cells.into_iter().enumerate() {
                if let Some(child) = cell {
                    grid.add(child, row, col)?;
                }
            }
        }

        Ok(grid)
    }

    /// Puts `child` in the given cell, growing the grid as needed.
    ///
    /// Fails if the cell is already occupied, or if `child` was destroyed.
    pub fn add<C: IntoBoxedComponent>(
        &mut self,
        child: C,
        row: usize,
        col: usize,
    ) -> Result<(), Error> {
        if self.component_at(row, col).is_some() {
            return Err(ConfigurationError::CellOccupied { row, col }.into());
        }

        let mut child = child.into_boxed_component();
        adopt(self.base.anchor(), &mut *child)?;

        self.pad_to(self.n_rows().max(row + 1), self.n_cols().max(col + 1));
        self.rows[row][col] = Some(child);
        self.invalidate();
        Ok(())
    }

    /// Returns the component in the given cell, if any.
    pub fn component_at(&self, row: usize, col: usize) -> Option<&dyn Component> {
        self.rows.get(row)?.get(col)?.as_deref()
    }

    /// Returns the component in the given cell, mutably.
    pub fn component_at_mut(&mut self, row: usize, col: usize) -> Option<&mut dyn Component> {
        match self.rows.get_mut(row)?.get_mut(col)? {
            Some(child) => Some(&mut **child),
            None => None,
        }
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Space between adjacent rows.
    pub fn row_padding(&self) -> f64 {
        self.padding.y
    }

    /// Sets the space between adjacent rows.
    ///
    /// On error, the previous padding is kept.
    pub fn set_row_padding(&mut self, padding: f64) -> Result<(), Error> {
        self.padding.y = ConfigurationError::check_non_negative("row padding", padding)?;
        self.invalidate();
        Ok(())
    }

    /// Space between adjacent columns.
    pub fn column_padding(&self) -> f64 {
        self.padding.x
    }

    /// Sets the space between adjacent columns.
    ///
    /// On error, the previous padding is kept.
    pub fn set_column_padding(&mut self, padding: f64) -> Result<(), Error> {
        self.padding.x = ConfigurationError::check_non_negative("column padding", padding)?;
        self.invalidate();
        Ok(())
    }

    /// Explicit weight of the given row, if any.
    pub fn row_weight(&self, row: usize) -> Option<f64> {
        self.weight(Orientation::Vertical, row)
    }

    /// Sets the weight of the given row.
    ///
    /// The row does not need to exist yet.
    pub fn set_row_weight(&mut self, row: usize, weight: f64) -> Result<(), Error> {
        self.set_weight(Orientation::Vertical, row, weight)
    }

    /// Goes back to an inferred weight for the given row.
    pub fn clear_row_weight(&mut self, row: usize) {
        self.store_weight(Orientation::Vertical, row, None);
    }

    /// Explicit weight of the given column, if any.
    pub fn column_weight(&self, col: usize) -> Option<f64> {
        self.weight(Orientation::Horizontal, col)
    }

    /// Sets the weight of the given column.
    ///
    /// The column does not need to exist yet.
    pub fn set_column_weight(&mut self, col: usize, weight: f64) -> Result<(), Error> {
        self.set_weight(Orientation::Horizontal, col, weight)
    }

    /// Goes back to an inferred weight for the given column.
    pub fn clear_column_weight(&mut self, col: usize) {
        self.store_weight(Orientation::Horizontal, col, None);
    }

    /// Column widths (`x`) and row heights (`y`) of the last layout.
    pub fn track_sizes(&self) -> Option<&XY<Vec<f64>>> {
        self.tracks.as_ref()
    }

    /// Rectangle given to a cell by the last layout, relative to the grid.
    ///
    /// Also defined for empty cells.
    pub fn cell_rect(&self, row: usize, col: usize) -> Option<Rect> {
        let tracks = self.tracks.as_ref()?;
        let height = *tracks.y.get(row)?;
        let width = *tracks.x.get(col)?;
        let x: f64 = tracks.x[..col].iter().sum::<f64>() + self.padding.x * col as f64;
        let y: f64 = tracks.y[..row].iter().sum::<f64>() + self.padding.y * row as f64;
        Some(Rect::from_size((x, y), (width, height)))
    }

    /// Whether the last `requested_space` left some cell wanting more, per
    /// axis.
    pub fn wants_more(&self) -> Option<XY<bool>> {
        self.cache.as_ref().map(|allocation| allocation.wants_more)
    }

    fn weight(&self, o: Orientation, i: usize) -> Option<f64> {
        self.weights.get(o).get(i).copied().flatten()
    }

    fn set_weight(&mut self, o: Orientation, i: usize, weight: f64) -> Result<(), Error> {
        let name = match o {
            Orientation::Horizontal => "column weight",
            Orientation::Vertical => "row weight",
        };
        let weight = ConfigurationError::check_non_negative(name, weight)?;
        self.store_weight(o, i, Some(weight));
        Ok(())
    }

    fn store_weight(&mut self, o: Orientation, i: usize, weight: Option<f64>) {
        let weights = self.weights.get_mut(o);
        if weights.len() <= i {
            weights.resize(i + 1, None);
        }
        weights[i] = weight;
        self.invalidate();
    }

    // Keeps the matrix rectangular.
    fn pad_to(&mut self, n_rows: usize, n_cols: usize) {
        for row in &mut self.rows {
            row.resize_with(n_cols, || None);
        }
        while self.rows.len() < n_rows {
            self.rows.push((0..n_cols).map(|_| None).collect());
        }
    }

    fn invalidate(&mut self) {
        self.cache = None;
        self.base.invalidate();
    }

    fn solve(&mut self, available: Vec2, is_final: bool) -> Allocation {
        Solver::new(&mut self.rows, &self.weights, self.padding).solve(available, is_final)
    }

    fn is_fixed(&self, o: Orientation) -> bool {
        self.rows.iter().flatten().all(|cell| is_fixed(cell, o))
    }
}

impl Component for Grid {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn requested_space(&mut self, available: Vec2) -> SizeRequest {
        let allocation = self.solve(available, false);
        let request = SizeRequest::from(allocation.min_size());
        debug!(
            "Grid {} requests {:?} out of {:?} after {} passes",
            self.base.id(),
            request,
            available,
            allocation.passes
        );
        self.cache = Some(allocation);
        request
    }

    fn fixed_width(&self) -> bool {
        self.is_fixed(Orientation::Horizontal)
    }

    fn fixed_height(&self) -> bool {
        self.is_fixed(Orientation::Vertical)
    }

    fn compute_layout(&mut self, offer: Option<Rect>) -> Result<(), Error> {
        let geometry = commit_layout(self, offer)?;

        let allocation = match self.cache.take() {
            Some(allocation) if allocation.min_size().fits_in(geometry.size) => allocation,
            _ => {
                debug!("Grid {} squeezed into {:?}", self.base.id(), geometry.size);
                self.solve(geometry.size, true)
            }
        };

        let tracks = allocation.tracks();
        let mut y = 0.0;
        for (row, cells) in self.rows.iter_mut().enumerate() {
            let mut x = 0.0;
            for (col, cell) in cells.iter_mut().enumerate() {
                if let Some(child) = cell {
                    let offer = Rect::from_size((x, y), (tracks.x[col], tracks.y[row]));
                    self.base.layout_child(&mut **child, offer)?;
                }
                x += tracks.x[col] + self.padding.x;
            }
            y += tracks.y[row] + self.padding.y;
        }

        self.cache = Some(allocation);
        self.tracks = Some(tracks);
        Ok(())
    }

    fn for_each_child(&self, f: &mut dyn FnMut(&dyn Component)) {
        for child in self.rows.iter().flatten().flatten() {
            f(&**child);
        }
    }

    fn for_each_child_mut(&mut self, f: &mut dyn FnMut(&mut dyn Component)) {
        for child in self.rows.iter_mut().flatten().flatten() {
            f(&mut **child);
        }
    }
}

impl ComponentContainer for Grid {
    fn take_child(&mut self, id: ComponentId) -> Option<Box<dyn Component>> {
        let cell = self
            .rows
            .iter_mut()
            .flatten()
            .find(|cell| cell.as_ref().map_or(false, |child| child.id() == id))?;
        let child = cell.take();
        self.cache = None;
        child
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::Align;
    use crate::components::{FixedSize, Spacer};
    use crate::surface::puppet::PuppetSurface;
    use rand::{Rng, SeedableRng};
    use std::cell::RefCell;
    use std::rc::Rc;

    const EPSILON: f64 = 1e-9;

    fn fixed(w: f64, h: f64) -> FixedSize {
        FixedSize::new(w, h).unwrap()
    }

    fn puppet(w: f64, h: f64) -> Rc<RefCell<PuppetSurface>> {
        Rc::new(RefCell::new(PuppetSurface::new((w, h))))
    }

    fn widths(grid: &Grid) -> Vec<f64> {
        grid.track_sizes().unwrap().x.clone()
    }

    /// Fixed on both axes. Keeps every offer it is asked about.
    struct Recorder {
        base: ComponentBase,
        request: fn(Vec2) -> SizeRequest,
        offers: Rc<RefCell<Vec<Vec2>>>,
    }

    impl Recorder {
        fn new(request: fn(Vec2) -> SizeRequest) -> (Self, Rc<RefCell<Vec<Vec2>>>) {
            let offers = Rc::new(RefCell::new(Vec::new()));
            let recorder = Recorder {
                base: ComponentBase::new(),
                request,
                offers: Rc::clone(&offers),
            };
            (recorder, offers)
        }

        /// Always asks for one more pixel than it is offered.
        fn greedy() -> (Self, Rc<RefCell<Vec<Vec2>>>) {
            Recorder::new(|available| SizeRequest::new(available.x + 1.0, 0.0))
        }
    }

    impl Component for Recorder {
        fn base(&self) -> &ComponentBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ComponentBase {
            &mut self.base
        }

        fn requested_space(&mut self, available: Vec2) -> SizeRequest {
            self.offers.borrow_mut().push(available);
            (self.request)(available)
        }

        fn fixed_width(&self) -> bool {
            true
        }

        fn fixed_height(&self) -> bool {
            true
        }
    }

    #[test]
    fn single_empty_cell() {
        let mut grid = Grid::from_rows(vec![vec![None]]).unwrap();
        assert_eq!((grid.n_rows(), grid.n_cols()), (1, 1));
        assert_eq!(
            grid.requested_space(Vec2::new(100.0, 100.0)),
            SizeRequest::zero()
        );

        grid.anchor_to(puppet(100.0, 100.0), None).unwrap();
        grid.compute_layout(None).unwrap();
        assert_eq!(grid.cell_rect(0, 0), Some(Rect::from_zero((0.0, 0.0))));
    }

    #[test]
    fn weights_split_free_space() {
        let mut grid = Grid::new();
        grid.add(Spacer::new(), 0, 0).unwrap();
        grid.add(Spacer::new(), 0, 1).unwrap();
        grid.set_column_weight(0, 2.0).unwrap();
        grid.set_column_weight(1, 1.0).unwrap();

        grid.anchor_to(puppet(300.0, 50.0), None).unwrap();
        grid.compute_layout(None).unwrap();

        assert_eq!(widths(&grid), vec![200.0, 100.0]);
        assert_eq!(grid.component_at(0, 0).and_then(|c| c.width()), Some(200.0));
        assert_eq!(grid.component_at(0, 1).and_then(|c| c.origin()), Some(Vec2::new(200.0, 0.0)));
    }

    #[test]
    fn fixed_column_does_not_starve_the_others() {
        let mut grid = Grid::new();
        grid.add(fixed(490.0, 0.0), 0, 0).unwrap();
        grid.add(Spacer::new(), 0, 1).unwrap();
        grid.add(Spacer::new(), 0, 2).unwrap();

        assert_eq!(
            grid.requested_space(Vec2::new(500.0, 100.0)),
            SizeRequest::new(490.0, 0.0)
        );

        grid.anchor_to(puppet(500.0, 100.0), None).unwrap();
        grid.compute_layout(None).unwrap();
        let widths = widths(&grid);
        assert!((widths[0] - 490.0).abs() < EPSILON);
        assert!((widths[1] - 5.0).abs() < EPSILON);
        assert!((widths[2] - 5.0).abs() < EPSILON);
    }

    #[test]
    fn cells_wanting_more_get_a_bonus() {
        let (label, offers) = Recorder::new(|_| SizeRequest::new(490.0, 0.0));
        let mut grid = Grid::new();
        grid.add(label, 0, 0).unwrap();
        grid.add(Spacer::new(), 0, 1).unwrap();
        grid.add(Spacer::new(), 0, 2).unwrap();

        grid.requested_space(Vec2::new(500.0, 100.0));
        let offers = offers.borrow();
        assert_eq!(offers.len(), 2);

        // Weights (0, 1, 1): the fixed column is first offered as if its
        // weight was 0.5.
        let first = 500.0 * ZERO_WEIGHT_HEURISTIC / (ZERO_WEIGHT_HEURISTIC + 2.0);
        assert_eq!(offers[0], Vec2::new(first, 100.0));
        assert_eq!(first, 100.0);

        // It asked for more, so it gets a bonus share of the 10 free pixels.
        let second = 490.0 + 10.0 * WANTS_MORE_BONUS / (WANTS_MORE_BONUS + 2.0);
        assert!((offers[1].x - second).abs() < EPSILON);
        assert!((offers[1].x - 490.476_190_476).abs() < 1e-6);
    }

    #[test]
    fn stops_when_no_space_is_left() {
        let (label, offers) = Recorder::new(|_| SizeRequest::new(500.0, 100.0));
        let mut grid = Grid::new();
        grid.add(label, 0, 0).unwrap();
        grid.add(Spacer::new(), 0, 1).unwrap();

        assert_eq!(
            grid.requested_space(Vec2::new(500.0, 100.0)),
            SizeRequest::new(500.0, 100.0)
        );
        assert_eq!(offers.borrow().len(), 1);
        assert_eq!(grid.cache.as_ref().map(|a| a.passes), Some(1));
    }

    #[test]
    fn solver_gives_up_after_five_passes() {
        let (greedy, offers) = Recorder::greedy();
        let mut grid = Grid::new();
        grid.add(greedy, 0, 0).unwrap();
        grid.add(Spacer::new(), 0, 1).unwrap();

        grid.requested_space(Vec2::new(100.0, 100.0));
        assert_eq!(offers.borrow().len(), MAX_ITERATIONS);
        assert_eq!(grid.wants_more(), Some(XY::new(true, false)));
    }

    #[test]
    fn final_split_drops_the_bonus() {
        let (greedy, offers) = Recorder::greedy();
        let mut grid = Grid::new();
        grid.add(greedy, 0, 0).unwrap();
        grid.add(Spacer::new(), 0, 1).unwrap();

        grid.requested_space(Vec2::new(100.0, 100.0));
        let last = offers.borrow()[MAX_ITERATIONS - 1];
        let needed = last.x + 1.0;

        grid.anchor_to(puppet(100.0, 100.0), None).unwrap();
        grid.compute_layout(None).unwrap();
        assert_eq!(grid.wants_more(), Some(XY::new(true, false)));

        // The greedy column still wants more, but its weight is back to 0:
        // it keeps its guarantee and the spacer gets every free pixel.
        let widths = widths(&grid);
        assert!((widths[0] - needed).abs() < EPSILON);
        assert!((widths[1] - (100.0 - needed)).abs() < EPSILON);
        assert_eq!(grid.component_at(0, 0).and_then(|c| c.width()), Some(widths[0]));
    }

    #[test]
    fn squeezed_cells_share_the_space() {
        let mut grid = Grid::new();
        grid.add(fixed(50.0, 50.0), 0, 0).unwrap();
        grid.add(fixed(50.0, 50.0), 0, 1).unwrap();
        assert!(grid.fixed_width());
        assert_eq!(
            grid.requested_space(Vec2::new(50.0, 50.0)),
            SizeRequest::new(100.0, 50.0)
        );

        grid.anchor_to(puppet(50.0, 50.0), None).unwrap();
        grid.compute_layout(None).unwrap();
        assert_eq!(widths(&grid), vec![25.0, 25.0]);
        assert_eq!(grid.component_at(0, 1).and_then(|c| c.width()), Some(25.0));
        assert_eq!(grid.width(), Some(50.0));
    }

    #[test]
    fn request_ignores_the_offer() {
        let mut grid = Grid::new();
        grid.add(fixed(50.0, 50.0), 0, 0).unwrap();
        grid.add(fixed(50.0, 50.0), 0, 1).unwrap();
        grid.add(fixed(50.0, 50.0), 1, 0).unwrap();
        grid.add(Spacer::new(), 1, 1).unwrap();

        for offer in [10.0, 100.0, 1000.0] {
            assert_eq!(
                grid.requested_space(Vec2::new(offer, offer)),
                SizeRequest::new(100.0, 100.0)
            );
        }
        assert!(!grid.fixed_width());
    }

    #[test]
    fn padding_between_tracks() {
        let mut grid = Grid::new();
        grid.set_column_padding(10.0).unwrap();
        grid.set_row_padding(4.0).unwrap();
        grid.add(fixed(20.0, 10.0), 0, 0).unwrap();
        grid.add(Spacer::new(), 0, 1).unwrap();
        grid.add(Spacer::new(), 1, 1).unwrap();

        assert_eq!(
            grid.requested_space(Vec2::new(100.0, 100.0)),
            SizeRequest::new(20.0, 10.0)
        );

        grid.anchor_to(puppet(100.0, 100.0), None).unwrap();
        grid.compute_layout(None).unwrap();
        assert_eq!(grid.cell_rect(0, 0), Some(Rect::from_zero((20.0, 53.0))));
        assert_eq!(grid.cell_rect(0, 1), Some(Rect::from_size((30.0, 0.0), (70.0, 53.0))));
        assert_eq!(grid.cell_rect(1, 1), Some(Rect::from_size((30.0, 57.0), (70.0, 43.0))));
    }

    #[test]
    fn fixed_cells_are_aligned_in_their_slot() {
        let mut label = fixed(10.0, 10.0);
        label.set_align(Align::center());
        let mut grid = Grid::new();
        grid.add(label, 0, 0).unwrap();
        grid.add(Spacer::new(), 1, 1).unwrap();
        grid.set_column_weight(0, 1.0).unwrap();

        grid.anchor_to(puppet(100.0, 60.0), None).unwrap();
        grid.compute_layout(None).unwrap();
        let slot = grid.cell_rect(0, 0).unwrap();
        let label = grid.component_at(0, 0).and_then(|c| c.geometry()).unwrap();
        assert_eq!(slot.size, Vec2::new(55.0, 10.0));
        assert_eq!(label.origin, Vec2::new(22.5, 0.0));
    }

    #[test]
    fn rejects_bad_configuration() {
        let mut grid = Grid::new();
        grid.set_column_padding(3.0).unwrap();
        let err = grid.set_column_padding(-1.0).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(grid.column_padding(), 3.0);

        assert!(grid.set_row_weight(0, f64::NAN).is_err());
        assert_eq!(grid.row_weight(0), None);

        grid.add(Spacer::new(), 0, 0).unwrap();
        assert_eq!(
            grid.add(Spacer::new(), 0, 0),
            Err(Error::Configuration(ConfigurationError::CellOccupied { row: 0, col: 0 }))
        );
    }

    #[test]
    fn weights_outlive_the_matrix() {
        let mut grid = Grid::new();
        grid.set_column_weight(3, 2.0).unwrap();
        assert_eq!(grid.column_weight(3), Some(2.0));
        assert_eq!(grid.n_cols(), 0);

        grid.add(Spacer::new(), 0, 3).unwrap();
        assert_eq!(grid.n_cols(), 4);
        assert_eq!(grid.column_weight(3), Some(2.0));

        grid.clear_column_weight(3);
        assert_eq!(grid.column_weight(3), None);
    }

    #[test]
    fn matrix_stays_rectangular() {
        let mut grid = Grid::new();
        grid.add(Spacer::new(), 2, 0).unwrap();
        grid.add(Spacer::new(), 0, 3).unwrap();
        assert_eq!((grid.n_rows(), grid.n_cols()), (3, 4));
        assert!(grid.rows.iter().all(|row| row.len() == 4));
        assert!(grid.component_at(1, 1).is_none());
        assert!(grid.component_at(7, 7).is_none());
    }

    #[test]
    fn container_operations() {
        let surface = puppet(100.0, 100.0);
        let mut grid = Grid::new();
        grid.anchor_to(surface.clone(), None).unwrap();

        let a = Spacer::new();
        let b = Spacer::new();
        let (a_id, b_id) = (a.id(), b.id());
        grid.add(b, 1, 0).unwrap();
        grid.add(a, 0, 1).unwrap();
        assert_eq!(grid.components(), vec![a_id, b_id]);
        assert!(grid.component_at(1, 0).map_or(false, |c| c.is_anchored()));

        grid.compute_layout(None).unwrap();
        assert!(surface.borrow().placement(a_id).is_some());

        let removed = grid.remove(a_id).unwrap();
        assert!(!removed.is_anchored());
        assert!(!grid.has(a_id));
        assert!(surface.borrow().placement(a_id).is_none());
        assert!(grid.component_at(0, 1).is_none());
        assert_eq!((grid.n_rows(), grid.n_cols()), (2, 2));

        let detached = grid.detach_all();
        assert_eq!(detached.len(), 1);
        assert!(grid.is_empty());
    }

    #[test]
    fn children_follow_the_grid_anchor() {
        let mut inner = Grid::new();
        inner.add(Spacer::new(), 0, 0).unwrap();
        let mut outer = Grid::new();
        outer.add(inner, 0, 0).unwrap();
        assert!(!outer.component_at(0, 0).map_or(true, |c| c.is_anchored()));

        let surface = puppet(40.0, 40.0);
        outer.anchor_to(surface.clone(), None).unwrap();
        let inner = outer.component_at(0, 0).and_then(|c| c.downcast_ref::<Grid>()).unwrap();
        assert!(inner.component_at(0, 0).map_or(false, |c| c.is_anchored()));

        outer.compute_layout(None).unwrap();
        // Outer grid, inner grid and spacer.
        assert_eq!(surface.borrow().len(), 3);
    }

    #[test]
    fn requests_are_idempotent() {
        let mut grid = Grid::new();
        grid.add(fixed(30.0, 12.0), 0, 0).unwrap();
        grid.add(Spacer::new(), 0, 1).unwrap();
        grid.add(fixed(70.0, 5.0), 1, 1).unwrap();

        let offer = Vec2::new(80.0, 40.0);
        let first = grid.requested_space(offer);
        assert_eq!(grid.requested_space(offer), first);
        assert_eq!(grid.geometry(), None);
    }

    #[test]
    fn random_layouts_are_consistent() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x7e11);

        for _ in 0..200 {
            let n_rows = rng.gen_range(1..5);
            let n_cols = rng.gen_range(1..5);
            let mut grid = Grid::new();
            grid.set_column_padding(rng.gen_range(0.0..5.0)).unwrap();
            grid.set_row_padding(rng.gen_range(0.0..5.0)).unwrap();

            // One growing cell keeps a positive weight on both axes.
            grid.add(Spacer::new(), 0, 0).unwrap();
            for row in 0..n_rows {
                for col in 0..n_cols {
                    if (row, col) == (0, 0) || rng.gen_bool(0.2) {
                        continue;
                    }
                    let cell = fixed(rng.gen_range(0.0..150.0), rng.gen_range(0.0..150.0))
                        .fixed_axes(XY::new(rng.gen_bool(0.7), rng.gen_bool(0.7)));
                    grid.add(cell, row, col).unwrap();
                }
            }

            let size = Vec2::new(rng.gen_range(50.0..400.0), rng.gen_range(50.0..400.0));
            grid.anchor_to(puppet(size.x, size.y), None).unwrap();
            grid.compute_layout(None).unwrap();
            assert_eq!(grid.geometry(), Some(Rect::from_zero(size)));

            // Additivity: tracks and padding fill the grid exactly.
            let tracks = grid.track_sizes().unwrap().clone();
            let total = Vec2::new(
                tracks.x.iter().sum::<f64>() + grid.column_padding() * (grid.n_cols() - 1) as f64,
                tracks.y.iter().sum::<f64>() + grid.row_padding() * (grid.n_rows() - 1) as f64,
            );
            assert!(total.approx_eq(size, 1e-6), "{:?} != {:?}", total, size);

            // Clamping: nobody takes more than its slot.
            for row in 0..grid.n_rows() {
                for col in 0..grid.n_cols() {
                    let slot = grid.cell_rect(row, col).unwrap();
                    if let Some(child) = grid.component_at(row, col) {
                        let geometry = child.geometry().unwrap();
                        assert!(geometry.size.fits_in(slot.size.non_negative()));
                        assert!(geometry.width() >= 0.0 && geometry.height() >= 0.0);
                    }
                }
            }
        }
    }
}
