//! Spatial density diagnostics over recorded trajectories
//!
//! Builds a normalized occupancy grid and per-axis histograms from history
//! samples. Bounds always come from every particle's full trajectory (grown
//! by a 5% margin per side) while the counted samples come from the first
//! particle, so the leading particle's wandering is read against the whole
//! system's extent.

use super::states::World;

/// Normalized 2D occupancy grid, row-major with `ny` rows of `nx` cells
#[derive(Debug, Clone)]
pub struct DensityGrid {
    pub cells: Vec<f64>, // row-major [row * nx + col], rows indexed by y
    pub nx: usize, // columns (x direction)
    pub ny: usize, // rows (y direction)
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Axis selector for [`axis_histogram`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Normalized 1D histogram over one axis
#[derive(Debug, Clone)]
pub struct AxisHistogram {
    pub bins: Vec<f64>, // normalized counts, left to right
    pub min: f64, // left edge of the first bin
    pub max: f64, // right edge of the last bin
}

/// Extent of every recorded position across all particles, grown by a 5%
/// margin per side; `None` for an empty world
fn margined_bounds(sys: &World) -> Option<(f64, f64, f64, f64)> {
    if sys.is_empty() {
        return None;
    }
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for p in &sys.particles {
        for pos in p.history.positions() {
            x_min = x_min.min(pos.x);
            x_max = x_max.max(pos.x);
            y_min = y_min.min(pos.y);
            y_max = y_max.max(pos.y);
        }
    }
    let margin_x = 0.05 * (x_max - x_min);
    let margin_y = 0.05 * (y_max - y_min);
    Some((
        x_min - margin_x,
        x_max + margin_x,
        y_min - margin_y,
        y_max + margin_y,
    ))
}

/// Cell index along one axis: scale by (cells - 1) and truncate, clamping
/// rounding spill at the top edge (the cast already floors negatives to 0)
fn grid_index(v: f64, min: f64, max: f64, cells: usize) -> usize {
    let i = ((v - min) / (max - min) * (cells - 1) as f64) as usize;
    i.min(cells - 1)
}

/// Occupancy of the first particle's trajectory on an `nx` x `ny` grid
/// spanning the margined extent of all trajectories
///
/// The extent is half-open on the right, so samples on the outer max edge
/// are dropped. Cells are normalized to sum to 1 when any sample lands
/// inside; `None` for an empty world or a zero-sized grid axis.
pub fn density_grid(sys: &World, nx: usize, ny: usize) -> Option<DensityGrid> {
    if nx == 0 || ny == 0 {
        return None;
    }
    let (x_min, x_max, y_min, y_max) = margined_bounds(sys)?;
    let first = sys.particles.first()?;

    let mut cells = vec![0.0; nx * ny];
    let mut total = 0.0;
    for pos in first.history.positions() {
        if pos.x >= x_min && pos.x < x_max && pos.y >= y_min && pos.y < y_max {
            let col = grid_index(pos.x, x_min, x_max, nx);
            let row = grid_index(pos.y, y_min, y_max, ny);
            cells[row * nx + col] += 1.0;
            total += 1.0;
        }
    }
    if total > 0.0 {
        for c in cells.iter_mut() {
            *c /= total;
        }
    }

    Some(DensityGrid {
        cells,
        nx,
        ny,
        x_min,
        x_max,
        y_min,
        y_max,
    })
}

/// Histogram of the first particle's samples along one axis, over the
/// margined extent of all trajectories
///
/// Interior bins are half-open; the last bin also takes its right edge, so a
/// sample exactly at `max` still counts. Normalized to sum to 1 when any
/// sample lands inside; `None` for an empty world or zero `bins`.
pub fn axis_histogram(sys: &World, axis: Axis, bins: usize) -> Option<AxisHistogram> {
    if bins == 0 {
        return None;
    }
    let (x_min, x_max, y_min, y_max) = margined_bounds(sys)?;
    let (min, max) = match axis {
        Axis::X => (x_min, x_max),
        Axis::Y => (y_min, y_max),
    };
    let first = sys.particles.first()?;

    let width = max - min;
    let mut counts = vec![0.0; bins];
    let mut total = 0.0;
    for pos in first.history.positions() {
        let v = match axis {
            Axis::X => pos.x,
            Axis::Y => pos.y,
        };
        if width > 0.0 && v >= min && v <= max {
            let b = ((v - min) / width * bins as f64) as usize;
            counts[b.min(bins - 1)] += 1.0;
            total += 1.0;
        }
    }
    if total > 0.0 {
        for c in counts.iter_mut() {
            *c /= total;
        }
    }

    Some(AxisHistogram {
        bins: counts,
        min,
        max,
    })
}
