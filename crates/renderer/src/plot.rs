//! Per-region time-series figures.
//!
//! Each figure stacks three panels over a shared day-of-year axis:
//!
//! ```text
//!   +--------------------------------+
//!   | SST: yearly traces + predicted |  black
//!   |                                |
//!   | BOT: yearly traces + predicted |  red
//!   |                                |
//!   | ICE: median area + predicted   |  blue
//!   +--------------------------------+
//!        day of year
//! ```
//!
//! Historical traces and the climatology area are drawn translucent, the
//! projected series solid.

use std::fs;
use std::path::{Path, PathBuf};

use climatology::{ClimatologyPoint, RegionPartition, SeriesPoint};
use ice_common::{RegionId, Variable};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};
use tracing::{debug, info};

use crate::error::{RenderError, Result};
use crate::glyphs::{draw_text, Anchor};
use crate::style::hex_to_rgb;

pub const FIGURE_WIDTH: u32 = 700;
pub const FIGURE_HEIGHT: u32 = 300;

const MARGIN_LEFT: f32 = 48.0;
const MARGIN_RIGHT: f32 = 14.0;
const MARGIN_TOP: f32 = 10.0;
const MARGIN_BOTTOM: f32 = 28.0;
const TICK_LENGTH: f32 = 4.0;
const LABEL_HEIGHT: f32 = 8.0;
const LINE_WIDTH: f32 = 1.5;

const HISTORY_ALPHA: f32 = 0.25;
const Y_PADDING: f64 = 0.05;

pub const SST_COLOR: &str = "#000000";
pub const BOT_COLOR: &str = "#ff0000";
pub const ICE_COLOR: &str = "#0000ff";

/// Closed numeric interval of an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub const DEFAULT_DAYS: AxisRange = AxisRange { min: 1.0, max: 366.0 };
    pub const DEFAULT_VALUES: AxisRange = AxisRange { min: 0.0, max: 1.0 };

    /// Span of `values`, or `default` when there are none. A zero-width
    /// span is widened by one unit on each side.
    pub fn spanning(values: impl IntoIterator<Item = f64>, default: AxisRange) -> Self {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if min > max {
            default
        } else if min == max {
            AxisRange {
                min: min - 1.0,
                max: max + 1.0,
            }
        } else {
            AxisRange { min, max }
        }
    }

    /// Extend both ends by `fraction` of the span.
    pub fn padded(self, fraction: f64) -> Self {
        let pad = (self.max - self.min) * fraction;
        AxisRange {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `v` within the range, 0 at `min` and 1 at `max`.
    pub fn fraction(&self, v: f64) -> f64 {
        (v - self.min) / self.span()
    }
}

/// Round tick positions (steps of 1, 2 or 5 times a power of ten) inside `range`.
pub fn nice_ticks(range: AxisRange, target: usize) -> Vec<f64> {
    let span = range.span();
    if !(span > 0.0) || target == 0 {
        return Vec::new();
    }

    let step = tick_step(span / target as f64);
    let first = (range.min / step).ceil() as i64;
    let last = (range.max / step + 1e-9).floor() as i64;

    (first..=last)
        .map(|i| {
            let v = i as f64 * step;
            if v.abs() < step * 1e-9 {
                0.0
            } else {
                v
            }
        })
        .collect()
}

fn tick_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

/// Label for a tick value, with as many decimals as the tick step needs.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    format!("{:.*}", decimals, value)
}

/// File name of a region figure.
pub fn plot_file_name(region: &RegionId) -> String {
    format!("{}.image.png", region)
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    days: AxisRange,
    values: AxisRange,
}

impl Frame {
    fn x(&self, day: f64) -> f32 {
        self.left + (self.days.fraction(day) as f32) * (self.right - self.left)
    }

    fn y(&self, value: f64) -> f32 {
        self.bottom - (self.values.fraction(value) as f32) * (self.bottom - self.top)
    }
}

fn color(hex: &str, alpha: f32) -> Color {
    let (r, g, b) = hex_to_rgb(hex).unwrap_or((0, 0, 0));
    Color::from_rgba8(r, g, b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn paint_for(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

fn stroke_line(pixmap: &mut Pixmap, points: &[(f32, f32)], paint: &Paint, width: f32) {
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return;
    };
    if rest.is_empty() {
        return;
    }

    let mut pb = PathBuilder::new();
    pb.move_to(x0, y0);
    for &(x, y) in rest {
        pb.line_to(x, y);
    }
    if let Some(path) = pb.finish() {
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, paint, &stroke, Transform::identity(), None);
    }
}

fn draw_series(pixmap: &mut Pixmap, frame: &Frame, series: &[SeriesPoint], paint: &Paint) {
    let points: Vec<(f32, f32)> = series
        .iter()
        .map(|p| (frame.x(p.yearday as f64), frame.y(p.value)))
        .collect();
    stroke_line(pixmap, &points, paint, LINE_WIDTH);
}

/// Fill between zero and the median curve, one polygon per run of
/// consecutive present medians.
fn fill_climatology(pixmap: &mut Pixmap, frame: &Frame, climatology: &[ClimatologyPoint], paint: &Paint) {
    let base = frame.y(0.0);
    for run in climatology.split(|p| p.median.is_none()) {
        if run.len() < 2 {
            continue;
        }

        let mut pb = PathBuilder::new();
        pb.move_to(frame.x(run[0].yearday as f64), base);
        for p in run {
            if let Some(m) = p.median {
                pb.line_to(frame.x(p.yearday as f64), frame.y(m));
            }
        }
        pb.line_to(frame.x(run[run.len() - 1].yearday as f64), base);
        pb.close();

        if let Some(path) = pb.finish() {
            pixmap.fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
        }
    }
}

fn draw_spines(pixmap: &mut Pixmap, frame: &Frame, top: bool, bottom: bool) {
    let paint = paint_for(Color::BLACK);
    let (l, r, t, b) = (frame.left, frame.right, frame.top, frame.bottom);
    stroke_line(pixmap, &[(l, t), (l, b)], &paint, 1.0);
    stroke_line(pixmap, &[(r, t), (r, b)], &paint, 1.0);
    if top {
        stroke_line(pixmap, &[(l, t), (r, t)], &paint, 1.0);
    }
    if bottom {
        stroke_line(pixmap, &[(l, b), (r, b)], &paint, 1.0);
    }
}

fn draw_value_ticks(pixmap: &mut Pixmap, frame: &Frame) {
    let paint = paint_for(Color::BLACK);
    let ticks = nice_ticks(frame.values, 3);
    let step = match ticks.as_slice() {
        [a, b, ..] => b - a,
        _ => frame.values.span(),
    };

    for v in ticks {
        let y = frame.y(v);
        stroke_line(
            pixmap,
            &[(frame.left - TICK_LENGTH, y), (frame.left, y)],
            &paint,
            1.0,
        );
        draw_text(
            pixmap,
            &format_tick(v, step),
            frame.left - TICK_LENGTH - 3.0,
            y,
            LABEL_HEIGHT,
            Anchor::Right,
            &paint,
        );
    }
}

fn draw_day_ticks(pixmap: &mut Pixmap, frame: &Frame) {
    let paint = paint_for(Color::BLACK);
    let ticks = nice_ticks(frame.days, 6);
    let step = match ticks.as_slice() {
        [a, b, ..] => b - a,
        _ => 1.0,
    };

    for day in ticks {
        let x = frame.x(day);
        stroke_line(
            pixmap,
            &[(x, frame.bottom), (x, frame.bottom + TICK_LENGTH)],
            &paint,
            1.0,
        );
        draw_text(
            pixmap,
            &format_tick(day, step),
            x,
            frame.bottom + TICK_LENGTH + 3.0 + LABEL_HEIGHT / 2.0,
            LABEL_HEIGHT,
            Anchor::Center,
            &paint,
        );
    }
}

/// Shared day-of-year range of a region's historical and projected records.
pub fn day_range(historical: &RegionPartition, projected: &RegionPartition) -> AxisRange {
    let days = historical
        .records
        .iter()
        .chain(&projected.records)
        .map(|r| r.yearday as f64);
    AxisRange::spanning(days, AxisRange::DEFAULT_DAYS)
}

fn trace_panel(
    pixmap: &mut Pixmap,
    frame: &Frame,
    historical: &RegionPartition,
    predicted: &[SeriesPoint],
    variable: Variable,
    hex: &str,
) {
    let faded = paint_for(color(hex, HISTORY_ALPHA));
    for (year, series) in historical.year_series(variable) {
        debug!(variable = %variable, year = year, points = series.len(), "Drawing year trace");
        draw_series(pixmap, frame, &series, &faded);
    }
    draw_series(pixmap, frame, predicted, &paint_for(color(hex, 1.0)));
}

/// Render the three-panel figure of one region.
pub fn render_region_figure(historical: &RegionPartition, projected: &RegionPartition) -> Result<Pixmap> {
    let mut pixmap = Pixmap::new(FIGURE_WIDTH, FIGURE_HEIGHT).ok_or(RenderError::Canvas {
        width: FIGURE_WIDTH,
        height: FIGURE_HEIGHT,
    })?;
    pixmap.fill(Color::WHITE);

    let days = day_range(historical, projected);
    let left = MARGIN_LEFT;
    let right = FIGURE_WIDTH as f32 - MARGIN_RIGHT;
    let plot_top = MARGIN_TOP;
    let panel_height = (FIGURE_HEIGHT as f32 - MARGIN_BOTTOM - MARGIN_TOP) / 3.0;

    let frame = |index: usize, values: AxisRange| Frame {
        left,
        right,
        top: plot_top + panel_height * index as f32,
        bottom: plot_top + panel_height * (index + 1) as f32,
        days,
        values: values.padded(Y_PADDING),
    };

    // Temperature panels
    for (index, variable, hex) in [
        (0, Variable::SeaSurface, SST_COLOR),
        (1, Variable::Bottom, BOT_COLOR),
    ] {
        let predicted = projected.series(variable);
        let values = historical
            .series(variable)
            .iter()
            .chain(&predicted)
            .map(|p| p.value)
            .collect::<Vec<_>>();
        let panel = frame(index, AxisRange::spanning(values, AxisRange::DEFAULT_VALUES));

        trace_panel(&mut pixmap, &panel, historical, &predicted, variable, hex);
        draw_spines(&mut pixmap, &panel, index == 0, false);
        draw_value_ticks(&mut pixmap, &panel);
    }

    // Ice panel
    let climatology = historical.climatology(Variable::Ice);
    let predicted_ice = projected.series(Variable::Ice);
    let medians: Vec<f64> = climatology.iter().filter_map(|p| p.median).collect();
    let baseline = if medians.is_empty() { None } else { Some(0.0) };
    let values = medians
        .iter()
        .copied()
        .chain(baseline)
        .chain(predicted_ice.iter().map(|p| p.value));
    let panel = frame(2, AxisRange::spanning(values, AxisRange::DEFAULT_VALUES));

    fill_climatology(
        &mut pixmap,
        &panel,
        &climatology,
        &paint_for(color(ICE_COLOR, HISTORY_ALPHA)),
    );
    draw_series(&mut pixmap, &panel, &predicted_ice, &paint_for(color(ICE_COLOR, 1.0)));
    draw_spines(&mut pixmap, &panel, false, true);
    draw_value_ticks(&mut pixmap, &panel);
    draw_day_ticks(&mut pixmap, &panel);

    Ok(pixmap)
}

/// Render a region figure and write `<image_dir>/<region>.image.png`.
pub fn save_region_figure(
    historical: &RegionPartition,
    projected: &RegionPartition,
    image_dir: &Path,
) -> Result<PathBuf> {
    let pixmap = render_region_figure(historical, projected)?;

    fs::create_dir_all(image_dir).map_err(|e| RenderError::io(image_dir, e))?;
    let path = image_dir.join(plot_file_name(&historical.region));
    let png = pixmap
        .encode_png()
        .map_err(|e| RenderError::Png(e.to_string()))?;
    fs::write(&path, png).map_err(|e| RenderError::io(&path, e))?;

    info!(
        region = %historical.region,
        path = %path.display(),
        years = historical.by_year().len(),
        "Wrote region figure"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spanning_default_and_flat() {
        let empty: Vec<f64> = Vec::new();
        assert_eq!(
            AxisRange::spanning(empty, AxisRange::DEFAULT_VALUES),
            AxisRange::DEFAULT_VALUES
        );
        assert_eq!(
            AxisRange::spanning(vec![2.0, 2.0], AxisRange::DEFAULT_VALUES),
            AxisRange { min: 1.0, max: 3.0 }
        );
        assert_eq!(
            AxisRange::spanning(vec![f64::NAN, 4.0, -1.0], AxisRange::DEFAULT_VALUES),
            AxisRange { min: -1.0, max: 4.0 }
        );
    }

    #[test]
    fn test_padded() {
        let r = AxisRange { min: 0.0, max: 10.0 }.padded(0.05);
        assert_eq!(r, AxisRange { min: -0.5, max: 10.5 });
    }

    #[test]
    fn test_nice_ticks_days() {
        let ticks = nice_ticks(AxisRange::DEFAULT_DAYS, 6);
        assert_eq!(ticks, vec![50.0, 100.0, 150.0, 200.0, 250.0, 300.0, 350.0]);
    }

    #[test]
    fn test_nice_ticks_fractions() {
        let ticks = nice_ticks(AxisRange { min: -0.05, max: 1.05 }, 3);
        assert_eq!(ticks.len(), 3);
        for (tick, expected) in ticks.iter().zip([0.0, 0.5, 1.0]) {
            assert!((tick - expected).abs() < 1e-12, "{} != {}", tick, expected);
        }
        assert!(nice_ticks(AxisRange { min: 1.0, max: 1.0 }, 3).is_empty());
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(100.0, 50.0), "100");
        assert_eq!(format_tick(0.5, 0.5), "0.5");
        assert_eq!(format_tick(-1.5, 0.5), "-1.5");
        assert_eq!(format_tick(0.15, 0.05), "0.15");
    }

    #[test]
    fn test_plot_file_name() {
        let region = RegionId::parse("625831").unwrap();
        assert_eq!(plot_file_name(&region), "625831.image.png");
    }
}
