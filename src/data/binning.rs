//! Hexagonal binning and histogram counting
//!
//! The hexbin follows the usual two-lattice scheme: one lattice of centres on
//! integer grid points, a second one offset by half a cell in both directions.
//! Each sample goes to whichever of its two candidate centres is nearer in the
//! hexagon metric.

use crate::error::{PlotError, Result};

/// Viewport of a binning operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Extent {
    /// Square extent centred on the origin
    pub fn symmetric(limit: f64) -> Self {
        Self {
            x_min: -limit,
            x_max: limit,
            y_min: -limit,
            y_max: limit,
        }
    }
}

/// A hexagon of the grid and the number of samples it holds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexCell {
    pub x: f64,
    pub y: f64,
    pub count: usize,
}

/// Result of hexagonal binning
#[derive(Debug, Clone)]
pub struct HexGrid {
    /// Non-empty cells only
    pub cells: Vec<HexCell>,
    /// Horizontal cell pitch in data units
    pub cell_width: f64,
    /// Vertical cell pitch in data units
    pub cell_height: f64,
    pub nx: usize,
    pub ny: usize,
}

impl HexGrid {
    /// Vertices of the hexagon centred at `(cx, cy)`, counter-clockwise
    pub fn hexagon(&self, cx: f64, cy: f64) -> [[f64; 2]; 6] {
        let sx = self.cell_width;
        let sy = self.cell_height / 3.0;
        [
            [cx + 0.5 * sx, cy - 0.5 * sy],
            [cx + 0.5 * sx, cy + 0.5 * sy],
            [cx, cy + sy],
            [cx - 0.5 * sx, cy + 0.5 * sy],
            [cx - 0.5 * sx, cy - 0.5 * sy],
            [cx, cy - sy],
        ]
    }

    pub fn total_count(&self) -> usize {
        self.cells.iter().map(|c| c.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.cells.iter().map(|c| c.count).max().unwrap_or(0)
    }
}

/// Bin `(x, y)` pairs into hexagons; `gridsize` hexagons span the x range
pub fn hexbin(x: &[f64], y: &[f64], gridsize: usize, extent: Extent) -> Result<HexGrid> {
    profiling::scope!("hexbin");

    if gridsize == 0 {
        return Err(PlotError::Validation("gridsize must be positive".to_string()));
    }
    let nx = gridsize;
    let ny = ((gridsize as f64) / 3f64.sqrt()) as usize;
    let ny = ny.max(1);

    let pad_x = 1e-9 * (extent.x_max - extent.x_min);
    let pad_y = 1e-9 * (extent.y_max - extent.y_min);
    let x_min = extent.x_min - pad_x;
    let x_max = extent.x_max + pad_x;
    let y_min = extent.y_min - pad_y;
    let y_max = extent.y_max + pad_y;

    let sx = (x_max - x_min) / nx as f64;
    let sy = (y_max - y_min) / ny as f64;
    if !(sx > 0.0 && sy > 0.0) {
        return Err(PlotError::Validation("hexbin extent must have positive size".to_string()));
    }

    let (nx1, ny1) = (nx + 1, ny + 1);
    let (nx2, ny2) = (nx, ny);
    let mut lattice1 = vec![0usize; nx1 * ny1];
    let mut lattice2 = vec![0usize; nx2 * ny2];

    for (&xv, &yv) in x.iter().zip(y) {
        if !xv.is_finite() || !yv.is_finite() {
            continue;
        }
        let px = (xv - x_min) / sx;
        let py = (yv - y_min) / sy;

        let ix1 = px.round();
        let iy1 = py.round();
        let ix2 = px.floor();
        let iy2 = py.floor();

        let d1 = (px - ix1).powi(2) + 3.0 * (py - iy1).powi(2);
        let d2 = (px - ix2 - 0.5).powi(2) + 3.0 * (py - iy2 - 0.5).powi(2);

        if d1 < d2 {
            if let Some(i) = lattice_index(ix1, iy1, nx1, ny1) {
                lattice1[i] += 1;
            }
        } else if let Some(i) = lattice_index(ix2, iy2, nx2, ny2) {
            lattice2[i] += 1;
        }
    }

    let mut cells = Vec::new();
    for i in 0..nx1 {
        for j in 0..ny1 {
            let count = lattice1[i * ny1 + j];
            if count > 0 {
                cells.push(HexCell {
                    x: x_min + i as f64 * sx,
                    y: y_min + j as f64 * sy,
                    count,
                });
            }
        }
    }
    for i in 0..nx2 {
        for j in 0..ny2 {
            let count = lattice2[i * ny2 + j];
            if count > 0 {
                cells.push(HexCell {
                    x: x_min + (i as f64 + 0.5) * sx,
                    y: y_min + (j as f64 + 0.5) * sy,
                    count,
                });
            }
        }
    }

    tracing::debug!(nx, ny, cells = cells.len(), "hexbin complete");

    Ok(HexGrid {
        cells,
        cell_width: sx,
        cell_height: sy,
        nx,
        ny,
    })
}

fn lattice_index(ix: f64, iy: f64, nx: usize, ny: usize) -> Option<usize> {
    if ix < 0.0 || iy < 0.0 {
        return None;
    }
    let (ix, iy) = (ix as usize, iy as usize);
    (ix < nx && iy < ny).then(|| ix * ny + iy)
}

/// Fixed-edge histogram
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self, i: usize) -> f64 {
        self.edges[i + 1] - self.edges[i]
    }

    pub fn bin_center(&self, i: usize) -> f64 {
        0.5 * (self.edges[i] + self.edges[i + 1])
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// `bins + 1` evenly spaced edges over `[-limit, limit]`
pub fn symmetric_edges(limit: f64, bins: usize) -> Result<Vec<f64>> {
    if bins == 0 {
        return Err(PlotError::Validation("bin count must be positive".to_string()));
    }
    if !(limit > 0.0 && limit.is_finite()) {
        return Err(PlotError::Validation(format!(
            "plot limits must be positive and finite, got {}",
            limit
        )));
    }
    let bin_width = 2.0 * limit / bins as f64;
    let mut edges: Vec<f64> = (0..bins).map(|i| -limit + i as f64 * bin_width).collect();
    edges.push(limit);
    Ok(edges)
}

/// Count samples per bin; bins are half-open except the last, which also
/// holds the upper edge. Samples outside the edges are ignored.
pub fn histogram(values: &[f64], edges: &[f64]) -> Histogram {
    profiling::scope!("histogram");

    let bins = edges.len().saturating_sub(1);
    let mut counts = vec![0usize; bins];
    if bins == 0 {
        return Histogram {
            edges: edges.to_vec(),
            counts,
        };
    }

    let lo = edges[0];
    let hi = edges[bins];
    for &v in values {
        if !(v >= lo && v <= hi) {
            continue;
        }
        let idx = if v == hi {
            bins - 1
        } else {
            // First edge strictly greater than v, minus one
            edges.partition_point(|&e| e <= v) - 1
        };
        counts[idx.min(bins - 1)] += 1;
    }

    Histogram {
        edges: edges.to_vec(),
        counts,
    }
}
