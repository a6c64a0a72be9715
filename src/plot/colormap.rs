use plotters::style::{RGBColor, BLACK};

/// Navy -> light blue -> pale yellow -> orange -> dark red.
const COLOR_STOPS: [(f64, f64, f64); 6] = [
    (0.14509804, 0.27843137, 0.46666667),
    (0.25490196, 0.48235294, 0.69411765),
    (0.70588235, 0.84705882, 0.90588235),
    (1.0, 0.99607843, 0.77647059),
    (0.94509804, 0.69019608, 0.43137255),
    (0.7372549, 0.18823529, 0.15686275),
];

/// Evenly spaced color stops interpolated linearly, then quantized to a fixed
/// number of levels.
#[derive(Debug, Clone)]
pub struct ColorMap {
    stops: Vec<(f64, f64, f64)>,
    levels: usize,
}

impl Default for ColorMap {
    fn default() -> Self {
        ColorMap::new(COLOR_STOPS.to_vec(), 60)
    }
}

impl ColorMap {
    pub fn new(stops: Vec<(f64, f64, f64)>, levels: usize) -> Self {
        ColorMap {
            stops,
            levels: levels.max(2),
        }
    }

    /// Color for `t` in [0, 1]; values outside are clamped.
    pub fn color_at(&self, t: f64) -> RGBColor {
        match self.stops.len() {
            0 => return BLACK,
            1 => return to_rgb(self.stops[0]),
            _ => {}
        }
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let level = ((t * self.levels as f64) as usize).min(self.levels - 1);
        let q = level as f64 / (self.levels - 1) as f64;

        let segments = (self.stops.len() - 1) as f64;
        let pos = q * segments;
        let lo = (pos.floor() as usize).min(self.stops.len() - 2);
        let frac = pos - lo as f64;
        let (a, b) = (self.stops[lo], self.stops[lo + 1]);
        to_rgb((
            a.0 + (b.0 - a.0) * frac,
            a.1 + (b.1 - a.1) * frac,
            a.2 + (b.2 - a.2) * frac,
        ))
    }

    /// Background color of the hexbin chart, the low end of the map.
    pub fn low(&self) -> RGBColor {
        self.color_at(0.0)
    }

    pub fn levels(&self) -> usize {
        self.levels
    }
}

fn to_rgb(c: (f64, f64, f64)) -> RGBColor {
    let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    RGBColor(channel(c.0), channel(c.1), channel(c.2))
}
