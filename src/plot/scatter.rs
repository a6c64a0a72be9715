use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::court::{draw_court, COURT_X, COURT_Y};
use super::{check_lengths, render, DrawResult, Figure};
use crate::nba::error::Result;

#[derive(Debug, Clone)]
pub struct ScatterStyle {
    pub made_color: RGBColor,
    pub missed_color: RGBColor,
    /// Marker radius in pixels.
    pub marker_size: u32,
    pub background: RGBColor,
    pub court_color: RGBColor,
    pub size: (u32, u32),
}

impl Default for ScatterStyle {
    fn default() -> Self {
        ScatterStyle {
            made_color: RGBColor(0, 128, 0),
            missed_color: RGBColor(255, 0, 0),
            marker_size: 5,
            background: RGBColor(237, 237, 237),
            court_color: BLACK,
            size: (800, 750),
        }
    }
}

struct ScatterFigure<'a> {
    made: (&'a [f64], &'a [f64]),
    missed: Option<(&'a [f64], &'a [f64])>,
    style: &'a ScatterStyle,
}

impl Figure for ScatterFigure<'_> {
    fn size(&self) -> (u32, u32) {
        self.style.size
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        let style = self.style;
        root.fill(&style.background)?;
        let mut chart = ChartBuilder::on(root)
            .margin(10)
            .build_cartesian_2d(COURT_X, COURT_Y)?;

        let size = style.marker_size as i32;
        let (made_x, made_y) = self.made;
        chart.draw_series(
            made_x
                .iter()
                .zip(made_y)
                .map(|(&x, &y)| Circle::new((x, y), size, style.made_color.filled())),
        )?;
        if let Some((missed_x, missed_y)) = self.missed {
            chart.draw_series(
                missed_x
                    .iter()
                    .zip(missed_y)
                    .map(|(&x, &y)| Cross::new((x, y), size, style.missed_color.stroke_width(2))),
            )?;
        }
        draw_court(&mut chart, style.court_color, 2, false)?;
        Ok(())
    }
}

/// Made attempts as filled circles, misses (when given) as crosses, on top of
/// the half court.
pub fn scatter_chart(
    made: (&[f64], &[f64]),
    missed: Option<(&[f64], &[f64])>,
    path: &Path,
    style: &ScatterStyle,
) -> Result<()> {
    check_lengths("made x/y", made.0.len(), made.1.len())?;
    if let Some((x, y)) = missed {
        check_lengths("missed x/y", x.len(), y.len())?;
    }
    render(&ScatterFigure { made, missed, style }, path)
}
