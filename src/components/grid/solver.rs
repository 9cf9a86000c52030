//! Row and column allocation for [`Grid`](super::Grid).
//!
//! Each axis gets two kinds of space:
//!
//! * the *guaranteed* space of a row or column is the largest request among
//!   its cells;
//! * the *proportional* space is whatever is left once every guarantee is
//!   met, split according to the weights.
//!
//! A cell's request depends on what it is offered, and what it is offered
//! depends on the requests of the others. The solver iterates towards a
//! fixed point, and gives up after [`MAX_ITERATIONS`] passes: the last
//! allocation is then used as is.

use log::debug;

use crate::component::{Component, SizeRequest};
use crate::direction::Orientation;
use crate::{Vec2, XY};

/// Cells of a grid, row-major. Always rectangular.
pub(super) type Cells = Vec<Vec<Option<Box<dyn Component>>>>;

/// Maximum number of passes of the solver.
pub const MAX_ITERATIONS: usize = 5;

/// Weight added to a row or column whose cells asked for more than offered.
pub const WANTS_MORE_BONUS: f64 = 0.1;

/// Weight used instead of `0` to build the very first offer.
///
/// A fixed column still needs to be offered something on the first pass, so
/// it gets a chance to say how much it needs.
pub const ZERO_WEIGHT_HEURISTIC: f64 = 0.5;

/// Space given to each row and column.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Allocation {
    /// Guaranteed space; `x` holds the column widths, `y` the row heights.
    pub guaranteed: XY<Vec<f64>>,
    /// Share of the free space.
    pub proportional: XY<Vec<f64>>,
    /// Whether some cell asked for more than it was offered, per axis.
    pub wants_more: XY<bool>,
    /// Number of passes it took.
    pub passes: usize,
}

impl Allocation {
    /// Sum of the guarantees: what the grid needs.
    pub fn min_size(&self) -> Vec2 {
        self.guaranteed.as_ref().map(|g| g.iter().sum())
    }

    /// Final size of each column (`x`) and row (`y`).
    pub fn tracks(&self) -> XY<Vec<f64>> {
        self.guaranteed
            .as_ref()
            .zip(self.proportional.as_ref())
            .map(|(g, p)| add(g, p))
    }
}

/// Guarantees claimed by the cells for one offer.
struct Claims {
    guaranteed: XY<Vec<f64>>,
    wants: XY<Vec<bool>>,
}

/// Runs the allocation passes over a cell matrix.
pub(super) struct Solver<'a> {
    cells: &'a mut Cells,
    counts: XY<usize>,
    weights: XY<Vec<f64>>,
    padding: Vec2,
}

impl<'a> Solver<'a> {
    /// Prepares a solver; `explicit` weights override the inferred ones.
    pub fn new(cells: &'a mut Cells, explicit: &XY<Vec<Option<f64>>>, padding: Vec2) -> Self {
        let counts = XY::new(cells.first().map_or(0, Vec::len), cells.len());
        let weights = infer_weights(cells, counts, explicit);
        Solver {
            cells,
            counts,
            weights,
            padding,
        }
    }

    /// Allocates `available` between rows and columns.
    ///
    /// With `is_final`, no cell is guaranteed more than it is offered: the
    /// result then always fits, at the price of squeezing some cells.
    pub fn solve(&mut self, available: Vec2, is_final: bool) -> Allocation {
        let counts = self.counts;
        let available = available
            .zip3(self.padding, counts)
            .map(|(available, padding, n)| available - padding * n.saturating_sub(1) as f64);

        let heuristic = self.weights.as_ref().map(|weights| {
            weights
                .iter()
                .map(|&w| if w == 0.0 { ZERO_WEIGHT_HEURISTIC } else { w })
                .collect::<Vec<_>>()
        });

        let mut guaranteed = counts.map(|n| vec![0.0; n]);
        let mut proportional = heuristic
            .as_ref()
            .zip(available)
            .map(|(weights, free)| split(weights, free));
        let mut last_free: XY<Option<f64>> = XY::new(None, None);
        let mut wants_more = XY::new(false, false);
        let mut passes = 0;

        loop {
            passes += 1;
            let offered = guaranteed
                .as_ref()
                .zip(proportional.as_ref())
                .map(|(g, p)| add(g, p));
            let claims = self.claim(&offered, is_final);
            wants_more = claims.wants.as_ref().map(|wants| wants.contains(&true));

            let free = available.zip_map(claims.guaranteed.as_ref(), |a, g| a - sum(g));
            proportional = Orientation::pair().map(|o| {
                let weights = self.weights.get(o);
                if *wants_more.get(o) {
                    let biased: Vec<f64> = weights
                        .iter()
                        .zip(claims.wants.get(o))
                        .map(|(&w, &wants)| if wants { w + WANTS_MORE_BONUS } else { w })
                        .collect();
                    split(&biased, *free.get(o))
                } else {
                    split(weights, *free.get(o))
                }
            });

            debug!(
                "Pass {}: offered {:?}, guaranteed {:?}, free {:?}",
                passes, offered, claims.guaranteed, free
            );
            guaranteed = claims.guaranteed;

            // An axis stalls once it has no free space left, or when a pass
            // did not change it.
            let can_improve =
                free.zip_map(last_free, |free, last| free > 0.0 && Some(free) != last);
            last_free = free.map(Some);

            if !can_improve.any() {
                break;
            }
            if passes >= MAX_ITERATIONS {
                debug!("Giving up after {} passes", passes);
                break;
            }
        }

        // The bonus was only there to steer the passes.
        let free = available.zip_map(guaranteed.as_ref(), |a, g| a - sum(g));
        let proportional = self
            .weights
            .as_ref()
            .zip(free)
            .map(|(weights, free)| split(weights, free));

        Allocation {
            guaranteed,
            proportional,
            wants_more,
            passes,
        }
    }

    /// Asks every cell what it needs for the given row and column offers.
    fn claim(&mut self, offered: &XY<Vec<f64>>, is_final: bool) -> Claims {
        let mut claims = Claims {
            guaranteed: self.counts.map(|n| vec![0.0; n]),
            wants: self.counts.map(|n| vec![false; n]),
        };

        for (row, cells) in self.cells.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                let index = XY::new(col, row);
                let offer = Vec2::new(offered.x[col], offered.y[row]);
                let request = match cell {
                    Some(child) => child.requested_space(offer),
                    None => SizeRequest::zero(),
                };
                let wants = request.wants_more(offer);
                let request = request.as_vec();

                for o in Orientation::pair() {
                    let i = *index.get(o);
                    let claimed = if is_final {
                        (*request.get(o)).min(*offer.get(o))
                    } else {
                        *request.get(o)
                    };
                    let slot = &mut claims.guaranteed.get_mut(o)[i];
                    *slot = (*slot).max(claimed);
                    if *wants.get(o) {
                        claims.wants.get_mut(o)[i] = true;
                    }
                }
            }
        }

        claims
    }
}

/// Returns `true` if `cell` takes no more than it asks for along `o`.
///
/// Empty cells are fixed, with a zero size.
pub(super) fn is_fixed(cell: &Option<Box<dyn Component>>, o: Orientation) -> bool {
    cell.as_ref().map_or(true, |child| match o {
        Orientation::Horizontal => child.fixed_width(),
        Orientation::Vertical => child.fixed_height(),
    })
}

/// Explicit weights where given; otherwise `0` for a row or column made
/// only of fixed cells, `1` for the others.
fn infer_weights(
    cells: &Cells,
    counts: XY<usize>,
    explicit: &XY<Vec<Option<f64>>>,
) -> XY<Vec<f64>> {
    Orientation::pair().map(|o| {
        (0..*counts.get(o))
            .map(|i| {
                explicit.get(o).get(i).copied().flatten().unwrap_or_else(|| {
                    let fixed = match o {
                        Orientation::Horizontal => cells.iter().all(|row| is_fixed(&row[i], o)),
                        Orientation::Vertical => cells[i].iter().all(|cell| is_fixed(cell, o)),
                    };
                    if fixed {
                        0.0
                    } else {
                        1.0
                    }
                })
            })
            .collect()
    })
}

/// Splits `free` proportionally to `weights`.
///
/// Nothing is allocated when all weights are `0`.
fn split(weights: &[f64], free: f64) -> Vec<f64> {
    let total = sum(weights);
    if total == 0.0 {
        return vec![0.0; weights.len()];
    }
    weights.iter().map(|w| free * w / total).collect()
}

fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

fn add(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(a, b)| a + b).collect()
}
