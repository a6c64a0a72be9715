use std::collections::BTreeMap;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::{check_lengths, render, DrawResult, Figure};
use crate::nba::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct DistanceOptions {
    /// Bucket width in feet.
    pub bucket_width: f64,
    /// Buckets with fewer attempts are left off the curve.
    pub min_attempts: usize,
    pub title: Option<String>,
    pub size: (u32, u32),
}

impl Default for DistanceOptions {
    fn default() -> Self {
        DistanceOptions {
            bucket_width: 1.0,
            min_attempts: 1,
            title: None,
            size: (900, 600),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceBucket {
    /// Lower edge of the bucket, in feet.
    pub distance: f64,
    pub attempts: usize,
    pub made: usize,
}

impl DistanceBucket {
    pub fn fg_pct(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.made as f64 / self.attempts as f64
        }
    }
}

fn checked_width(bucket_width: f64) -> Result<f64> {
    if bucket_width.is_finite() && bucket_width > 0.0 {
        Ok(bucket_width)
    } else {
        Err(Error::Render(format!("bucket width must be positive, got {}", bucket_width)))
    }
}

/// Groups attempts into `bucket_width`-feet buckets, nearest first. The width
/// must be positive.
pub fn fg_pct_by_distance(distance: &[f64], made: &[bool], bucket_width: f64) -> Result<Vec<DistanceBucket>> {
    check_lengths("distance/made", distance.len(), made.len())?;
    let width = checked_width(bucket_width)?;
    let mut buckets: BTreeMap<i64, (usize, usize)> = BTreeMap::new();
    for (&d, &m) in distance.iter().zip(made) {
        if !d.is_finite() {
            continue;
        }
        let entry = buckets.entry((d / width).floor() as i64).or_insert((0, 0));
        entry.0 += 1;
        if m {
            entry.1 += 1;
        }
    }
    Ok(buckets
        .into_iter()
        .map(|(idx, (attempts, made))| DistanceBucket {
            distance: idx as f64 * width,
            attempts,
            made,
        })
        .collect())
}

struct DistanceFigure<'a> {
    buckets: Vec<DistanceBucket>,
    width: f64,
    options: &'a DistanceOptions,
}

impl DistanceFigure<'_> {
    /// Right edge of the x axis: the end of the farthest bucket.
    fn max_distance(&self) -> f64 {
        self.buckets
            .iter()
            .map(|b| b.distance + self.width)
            .fold(self.width, f64::max)
    }

    /// (bucket midpoint, FG% 0-100) for buckets with enough attempts.
    fn points(&self) -> Vec<(f64, f64)> {
        let half = self.width / 2.0;
        self.buckets
            .iter()
            .filter(|b| b.attempts >= self.options.min_attempts)
            .map(|b| (b.distance + half, b.fg_pct() * 100.0))
            .collect()
    }
}

impl Figure for DistanceFigure<'_> {
    fn size(&self) -> (u32, u32) {
        self.options.size
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        root.fill(&WHITE)?;
        let max_distance = self.max_distance();

        let mut builder = ChartBuilder::on(root);
        builder.margin(15).x_label_area_size(40).y_label_area_size(50);
        if let Some(title) = &self.options.title {
            builder.caption(title, ("sans-serif", 24));
        }
        let mut chart = builder.build_cartesian_2d(0f64..max_distance, 0f64..100f64)?;
        chart
            .configure_mesh()
            .x_desc("Shot distance (ft)")
            .y_desc("FG%")
            .draw()?;

        let points = self.points();
        chart.draw_series(LineSeries::new(points.iter().copied(), &BLUE))?;
        chart.draw_series(points.iter().map(|&p| Circle::new(p, 3, BLUE.filled())))?;
        Ok(())
    }
}

/// Field goal percentage against shot distance.
pub fn fg_pct_chart(distance: &[f64], made: &[bool], path: &Path, options: &DistanceOptions) -> Result<()> {
    let width = checked_width(options.bucket_width)?;
    let buckets = fg_pct_by_distance(distance, made, width)?;
    render(&DistanceFigure { buckets, width, options }, path)
}
