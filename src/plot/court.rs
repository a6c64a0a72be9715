use std::ops::Range;

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

use super::DrawResult;

pub const COURT_X: Range<f64> = -250.0..250.0;
pub const COURT_Y: Range<f64> = -47.5..422.5;

const ARC_SEGMENTS: usize = 64;

/// Points along a circular arc, counter-clockwise from `theta1` to `theta2`
/// degrees. `theta2 <= theta1` wraps around, so (180, 0) is the lower half.
pub fn arc_points(center: (f64, f64), radius: f64, theta1: f64, theta2: f64, segments: usize) -> Vec<(f64, f64)> {
    let mut end = theta2;
    while end <= theta1 {
        end += 360.0;
    }
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let t = (theta1 + (end - theta1) * i as f64 / segments as f64).to_radians();
            (center.0 + radius * t.cos(), center.1 + radius * t.sin())
        })
        .collect()
}

fn rect(x: f64, y: f64, w: f64, h: f64) -> Vec<(f64, f64)> {
    vec![(x, y), (x + w, y), (x + w, y + h), (x, y + h), (x, y)]
}

// Every other pair of segments, for the dashed free throw arc
fn dashed(points: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    points
        .windows(3)
        .step_by(4)
        .map(|w| w.to_vec())
        .collect()
}

/// Half court outline as polylines in court coordinates.
pub fn court_lines(outer_lines: bool) -> Vec<Vec<(f64, f64)>> {
    let mut lines = vec![
        // hoop, 18" across
        arc_points((0.0, 0.0), 7.5, 0.0, 360.0, ARC_SEGMENTS),
        // backboard
        rect(-30.0, -7.5, 60.0, -1.0),
        // paint, outer 16ft and inner 12ft wide, 19ft deep
        rect(-80.0, -47.5, 160.0, 190.0),
        rect(-60.0, -47.5, 120.0, 190.0),
        arc_points((0.0, 142.5), 60.0, 0.0, 180.0, ARC_SEGMENTS),
        // restricted area, 4ft from the hoop
        arc_points((0.0, 0.0), 40.0, 0.0, 180.0, ARC_SEGMENTS),
        // corner threes run 14ft before the arc starts
        vec![(-220.0, -47.5), (-220.0, 92.5)],
        vec![(220.0, -47.5), (220.0, 92.5)],
        // three point arc, 23'9" from the hoop
        arc_points((0.0, 0.0), 237.5, 22.0, 158.0, ARC_SEGMENTS),
        arc_points((0.0, 422.5), 60.0, 180.0, 0.0, ARC_SEGMENTS),
        arc_points((0.0, 422.5), 20.0, 180.0, 0.0, ARC_SEGMENTS),
    ];
    lines.extend(dashed(&arc_points((0.0, 142.5), 60.0, 180.0, 0.0, ARC_SEGMENTS)));
    if outer_lines {
        lines.push(rect(-250.0, -47.5, 500.0, 470.0));
    }
    lines
}

pub(crate) fn draw_court<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    color: RGBColor,
    line_width: u32,
    outer_lines: bool,
) -> DrawResult<DB> {
    let style = color.stroke_width(line_width);
    chart.draw_series(
        court_lines(outer_lines)
            .into_iter()
            .map(|line| PathElement::new(line, style)),
    )?;
    Ok(())
}
