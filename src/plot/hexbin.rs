use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::colormap::ColorMap;
use super::court::{draw_court, COURT_X, COURT_Y};
use super::{check_lengths, render, DrawResult, Figure};
use crate::nba::error::Result;

const COLORBAR_WIDTH: u32 = 60;

#[derive(Debug, Clone)]
pub struct HexbinOptions {
    /// Hexagons across x and y.
    pub gridsize: (usize, usize),
    pub size: (u32, u32),
    pub colormap: ColorMap,
    pub colorbar: bool,
}

impl Default for HexbinOptions {
    fn default() -> Self {
        HexbinOptions {
            gridsize: (30, 20),
            size: (860, 750),
            colormap: ColorMap::default(),
            colorbar: true,
        }
    }
}

/// A non-empty hexagon.
#[derive(Debug, Clone, PartialEq)]
pub struct HexCell {
    pub center: (f64, f64),
    pub count: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Lattice {
    // corners of the grid
    Outer(usize, usize),
    // centers of the grid cells
    Inner(usize, usize),
}

/// Bins points into a hexagonal grid spanning `extent`. Two offset lattices
/// cover the plane; each point goes to the nearer lattice node, measured with
/// y stretched by sqrt(3). Points outside the grid are dropped. Cells come
/// back ordered, outer lattice first.
pub fn hex_bins(
    x: &[f64],
    y: &[f64],
    gridsize: (usize, usize),
    extent: (Range<f64>, Range<f64>),
) -> Vec<HexCell> {
    let (nx, ny) = (gridsize.0.max(1), gridsize.1.max(1));
    let (xmin, xmax, ymin, ymax) = padded(&extent);
    let sx = (xmax - xmin) / nx as f64;
    let sy = (ymax - ymin) / ny as f64;

    let mut counts: HashMap<Lattice, usize> = HashMap::new();
    for (&px, &py) in x.iter().zip(y) {
        if !px.is_finite() || !py.is_finite() {
            continue;
        }
        let ix = (px - xmin) / sx;
        let iy = (py - ymin) / sy;
        let (ix1, iy1) = (ix.round(), iy.round());
        let (ix2, iy2) = (ix.floor(), iy.floor());
        let d1 = (ix - ix1).powi(2) + 3.0 * (iy - iy1).powi(2);
        let d2 = (ix - ix2 - 0.5).powi(2) + 3.0 * (iy - iy2 - 0.5).powi(2);

        let node = if d1 < d2 {
            in_grid(ix1, iy1, nx + 1, ny + 1).map(|(i, j)| Lattice::Outer(i, j))
        } else {
            in_grid(ix2, iy2, nx, ny).map(|(i, j)| Lattice::Inner(i, j))
        };
        if let Some(node) = node {
            *counts.entry(node).or_insert(0) += 1;
        }
    }

    let mut nodes: Vec<(Lattice, usize)> = counts.into_iter().collect();
    nodes.sort();
    nodes
        .into_iter()
        .map(|(node, count)| {
            let center = match node {
                Lattice::Outer(i, j) => (xmin + i as f64 * sx, ymin + j as f64 * sy),
                Lattice::Inner(i, j) => (xmin + (i as f64 + 0.5) * sx, ymin + (j as f64 + 0.5) * sy),
            };
            HexCell { center, count }
        })
        .collect()
}

// Widen the x extent a hair so points sitting on the edge still land inside.
fn padded(extent: &(Range<f64>, Range<f64>)) -> (f64, f64, f64, f64) {
    let (xr, yr) = extent;
    let padding = 1e-9 * (xr.end - xr.start);
    (xr.start - padding, xr.end + padding, yr.start, yr.end)
}

fn in_grid(i: f64, j: f64, ni: usize, nj: usize) -> Option<(usize, usize)> {
    if i >= 0.0 && j >= 0.0 && (i as usize) < ni && (j as usize) < nj {
        Some((i as usize, j as usize))
    } else {
        None
    }
}

/// Vertices of the hexagon drawn around `center` for a grid with cell size
/// (`sx`, `sy`).
pub fn hexagon(center: (f64, f64), sx: f64, sy: f64) -> Vec<(f64, f64)> {
    let (cx, cy) = center;
    let h = sy / 3.0;
    vec![
        (cx + 0.5 * sx, cy - 0.5 * h),
        (cx + 0.5 * sx, cy + 0.5 * h),
        (cx, cy + h),
        (cx - 0.5 * sx, cy + 0.5 * h),
        (cx - 0.5 * sx, cy - 0.5 * h),
        (cx, cy - h),
    ]
}

struct HexbinFigure<'a> {
    cells: Vec<HexCell>,
    cell_size: (f64, f64),
    options: &'a HexbinOptions,
}

impl Figure for HexbinFigure<'_> {
    fn size(&self) -> (u32, u32) {
        self.options.size
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        let cmap = &self.options.colormap;
        root.fill(&cmap.low())?;
        let (width, _) = self.options.size;
        let (court_area, bar_area) = if self.options.colorbar && width > COLORBAR_WIDTH * 2 {
            let (l, r) = root.split_horizontally((width - COLORBAR_WIDTH) as i32);
            (l, Some(r))
        } else {
            (root.clone(), None)
        };

        let mut chart = ChartBuilder::on(&court_area)
            .margin(10)
            .build_cartesian_2d(COURT_X, COURT_Y)?;

        let max_count = self.cells.iter().map(|c| c.count).max().unwrap_or(1) as f64;
        let (sx, sy) = self.cell_size;
        chart.draw_series(self.cells.iter().map(|cell| {
            let color = cmap.color_at(cell.count as f64 / max_count);
            Polygon::new(hexagon(cell.center, sx, sy), color.filled())
        }))?;
        draw_court(&mut chart, WHITE, 2, false)?;

        if let Some(bar) = bar_area {
            draw_colorbar(&bar, cmap)?;
        }
        Ok(())
    }
}

fn draw_colorbar<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, cmap: &ColorMap) -> DrawResult<DB> {
    let (w, h) = area.dim_in_pixel();
    let (left, right) = (15, w.saturating_sub(15) as i32);
    let (top, bottom) = (20, h.saturating_sub(20) as i32);
    let levels = cmap.levels() as i32;
    let span = (bottom - top).max(levels);
    for level in 0..levels {
        let y1 = bottom - span * level / levels;
        let y0 = bottom - span * (level + 1) / levels;
        let color = cmap.color_at((level as f64 + 0.5) / levels as f64);
        area.draw(&Rectangle::new([(left, y0), (right, y1)], color.filled()))?;
    }
    Ok(())
}

/// Shot density over the half court. Color is the hexagon's count relative to
/// the busiest hexagon.
pub fn hexbin_chart(x: &[f64], y: &[f64], path: &Path, options: &HexbinOptions) -> Result<()> {
    check_lengths("x/y", x.len(), y.len())?;
    let (nx, ny) = (options.gridsize.0.max(1), options.gridsize.1.max(1));
    let cell_size = (
        (COURT_X.end - COURT_X.start) / nx as f64,
        (COURT_Y.end - COURT_Y.start) / ny as f64,
    );
    let figure = HexbinFigure {
        cells: hex_bins(x, y, (nx, ny), (COURT_X, COURT_Y)),
        cell_size,
        options,
    };
    render(&figure, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_extent() -> (Range<f64>, Range<f64>) {
        (0.0..10.0, 0.0..10.0)
    }

    #[test]
    fn counts_sum_to_points_inside_extent() {
        let x = vec![0.0, 1.2, 5.5, 9.9, 3.3, 7.7, 2.0];
        let y = vec![0.0, 8.1, 5.5, 9.9, 1.0, 4.4, 6.0];
        let cells = hex_bins(&x, &y, (5, 5), unit_extent());
        let total: usize = cells.iter().map(|c| c.count).sum();
        assert_eq!(total, x.len());
    }

    #[test]
    fn points_outside_extent_are_dropped() {
        let x = vec![5.0, -50.0, 500.0];
        let y = vec![5.0, 5.0, 5.0];
        let cells = hex_bins(&x, &y, (5, 5), unit_extent());
        let total: usize = cells.iter().map(|c| c.count).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn point_on_a_node_lands_in_that_node() {
        // grid spacing 2.0: (4, 6) is outer node (2, 3), (5, 5) inner node (2, 2)
        let cells = hex_bins(&[4.0, 5.0, 5.0], &[6.0, 5.0, 5.0], (5, 5), unit_extent());
        assert_eq!(cells.len(), 2);
        assert!((cells[0].center.0 - 4.0).abs() < 1e-6 && (cells[0].center.1 - 6.0).abs() < 1e-6);
        assert_eq!(cells[0].count, 1);
        assert!((cells[1].center.0 - 5.0).abs() < 1e-6 && (cells[1].center.1 - 5.0).abs() < 1e-6);
        assert_eq!(cells[1].count, 2);
    }

    #[test]
    fn hexagon_has_six_vertices_around_center() {
        let hex = hexagon((0.0, 0.0), 2.0, 3.0);
        assert_eq!(hex.len(), 6);
        let cx: f64 = hex.iter().map(|p| p.0).sum::<f64>() / 6.0;
        let cy: f64 = hex.iter().map(|p| p.1).sum::<f64>() / 6.0;
        assert!(cx.abs() < 1e-12 && cy.abs() < 1e-12);
        assert_eq!(hex[2], (0.0, 1.0));
    }

    #[test]
    fn mismatched_columns_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = hexbin_chart(&[1.0], &[], &dir.path().join("x.svg"), &HexbinOptions::default()).unwrap_err();
        assert!(matches!(err, crate::nba::Error::Render(_)));
    }
}
