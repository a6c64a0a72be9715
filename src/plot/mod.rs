//! Shot charts on top of plotters.
//!
//! Every chart picks its backend from the output path: `.svg` goes through
//! the SVG backend, anything else is rasterized and encoded by extension
//! (png, jpg, bmp).
//!
//! Court coordinates follow the provider: x in [-250, 250], y in
//! [-47.5, 422.5], tenths of a foot, hoop at the origin.

mod colormap;
mod court;
mod distance;
mod hexbin;
mod scatter;

use std::path::Path;

use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use polars::prelude::DataFrame;

use crate::nba::error::{Error, Result};
use crate::nba::frames::{column_bool, column_f64};
use crate::nba::shots::{LOC_X, LOC_Y, SHOT_DISTANCE, SHOT_MADE_FLAG};

pub use colormap::ColorMap;
pub use court::{arc_points, court_lines, COURT_X, COURT_Y};
pub use distance::{fg_pct_by_distance, fg_pct_chart, DistanceBucket, DistanceOptions};
pub use hexbin::{hex_bins, hexagon, hexbin_chart, HexCell, HexbinOptions};
pub use scatter::{scatter_chart, ScatterStyle};

/// The columns the charts need, pulled out of a shot table.
#[derive(Debug, Clone, Default)]
pub struct ShotColumns {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub distance: Vec<f64>,
    pub made: Vec<bool>,
}

impl ShotColumns {
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        Ok(ShotColumns {
            x: column_f64(df, LOC_X)?,
            y: column_f64(df, LOC_Y)?,
            distance: column_f64(df, SHOT_DISTANCE)?,
            made: column_bool(df, SHOT_MADE_FLAG)?,
        })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// (made, missed) coordinate columns.
    pub fn by_outcome(&self) -> ((Vec<f64>, Vec<f64>), (Vec<f64>, Vec<f64>)) {
        let mut made = (Vec::new(), Vec::new());
        let mut missed = (Vec::new(), Vec::new());
        for ((&x, &y), &m) in self.x.iter().zip(&self.y).zip(&self.made) {
            let side = if m { &mut made } else { &mut missed };
            side.0.push(x);
            side.1.push(y);
        }
        (made, missed)
    }
}

pub(crate) type DrawResult<DB> = std::result::Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Something that can paint itself onto any plotters backend.
pub(crate) trait Figure {
    fn size(&self) -> (u32, u32);
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB>;
}

pub(crate) fn render<F: Figure>(figure: &F, path: &Path) -> Result<()> {
    let is_svg = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);
    if is_svg {
        let root = SVGBackend::new(path, figure.size()).into_drawing_area();
        figure.draw(&root).map_err(render_err)?;
        root.present().map_err(render_err)?;
    } else {
        let root = BitMapBackend::new(path, figure.size()).into_drawing_area();
        figure.draw(&root).map_err(render_err)?;
        root.present().map_err(render_err)?;
    }
    info!("chart written to {}", path.display());
    Ok(())
}

fn render_err<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> Error {
    Error::Render(e.to_string())
}

pub(crate) fn check_lengths(what: &str, a: usize, b: usize) -> Result<()> {
    if a != b {
        return Err(Error::Render(format!("{} columns differ in length: {} vs {}", what, a, b)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_outcome_splits_coordinates() {
        let cols = ShotColumns {
            x: vec![1.0, 2.0, 3.0],
            y: vec![10.0, 20.0, 30.0],
            distance: vec![1.0, 2.0, 3.0],
            made: vec![true, false, true],
        };
        let (made, missed) = cols.by_outcome();
        assert_eq!(made, (vec![1.0, 3.0], vec![10.0, 30.0]));
        assert_eq!(missed, (vec![2.0], vec![20.0]));
    }

    #[test]
    fn length_mismatch_is_a_render_error() {
        assert!(matches!(check_lengths("x/y", 2, 3), Err(Error::Render(_))));
        assert!(check_lengths("x/y", 3, 3).is_ok());
    }
}
