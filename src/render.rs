//! SVG rendering of the sampled field, its streamlines and the charges.

use std::path::Path;

use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::fields::{
    charge_range, trace_streamlines, EvaluationGrid, FieldSamples, PointCharge, StreamlineOptions,
};
use crate::math::Scalar;

const MARGIN: i32 = 15;
const X_LABEL_AREA: i32 = 40;
const Y_LABEL_AREA: i32 = 50;
const COLORBAR_STEPS: usize = 128;
/// Annotations go to the left of charges below this x coordinate.
const LABEL_FLIP_X: Scalar = 1.5;

/// Errors raised while drawing a figure.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Raised by the plotting backend (file creation, layout, drawing).
    #[error("plotting backend error: {0}")]
    Backend(String),
    /// Raised when the field was not sampled on the supplied grid.
    #[error("field shape {field:?} does not match grid shape {grid:?}")]
    ShapeMismatch {
        /// Shape of the field samples.
        field: (usize, usize),
        /// Shape of the grid.
        grid: (usize, usize),
    },
}

/// Layout and styling of the rendered figure.
#[derive(Debug, Clone)]
pub struct FigureOptions {
    /// Figure width in pixels, colour bar included.
    pub width: u32,
    /// Figure height in pixels.
    pub height: u32,
    /// Width reserved for the colour bar.
    pub colorbar_width: u32,
    /// Caption drawn above the plot.
    pub title: String,
    /// Stroke colour of field lines.
    pub streamline_color: RGBColor,
    /// Marker radius in pixels.
    pub marker_size: i32,
    /// Field-line tracing parameters.
    pub streamlines: StreamlineOptions,
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self {
            width: 820,
            height: 700,
            colorbar_width: 120,
            title: "Electric Field and Particle Positions".to_owned(),
            streamline_color: BLUE,
            marker_size: 10,
            streamlines: StreamlineOptions::default(),
        }
    }
}

/// Maps `v` onto a blue-white-red scale normalised over `[lo, hi]`.
#[must_use]
pub fn diverging_color(v: Scalar, lo: Scalar, hi: Scalar) -> RGBColor {
    let range = hi - lo;
    let t = if range.abs() < Scalar::EPSILON { 0.5 } else { ((v - lo) / range).clamp(0.0, 1.0) };
    if t < 0.5 {
        let s = (t * 2.0 * 255.0) as u8;
        RGBColor(s, s, 255)
    } else {
        let s = ((1.0 - (t - 0.5) * 2.0) * 255.0) as u8;
        RGBColor(255, s, s)
    }
}

/// Annotation text for the `index`-th (zero-based) charge.
#[must_use]
pub fn charge_label(index: usize, charge: Scalar) -> String {
    format!("q{} = {:?}", index + 1, charge)
}

/// Splits leftover pixels so one data unit spans the same length on both axes.
///
/// Returns `(top, bottom, left, right)` padding for a `(width, height)` area.
#[must_use]
pub fn equal_aspect_padding(area: (i32, i32), x_span: Scalar, y_span: Scalar) -> (i32, i32, i32, i32) {
    let inner_w = (area.0 - Y_LABEL_AREA - 2 * MARGIN).max(1);
    let inner_h = (area.1 - X_LABEL_AREA - 2 * MARGIN).max(1);
    if !(x_span > 0.0 && y_span > 0.0) {
        return (0, 0, 0, 0);
    }
    let scale = (Scalar::from(inner_w) / x_span).min(Scalar::from(inner_h) / y_span);
    let pad_x = inner_w - (scale * x_span).round() as i32;
    let pad_y = inner_h - (scale * y_span).round() as i32;
    (pad_y / 2, pad_y - pad_y / 2, pad_x / 2, pad_x - pad_x / 2)
}

fn colorbar_limits(charges: &[PointCharge]) -> (Scalar, Scalar) {
    match charge_range(charges) {
        Some((lo, hi)) if hi > lo => (lo, hi),
        Some((q, _)) => (q - 1.0, q + 1.0),
        None => (-1.0, 1.0),
    }
}

struct Scene<'a> {
    grid: &'a EvaluationGrid,
    field: &'a FieldSamples,
    charges: &'a [PointCharge],
    options: &'a FigureOptions,
}

fn draw_field<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    scene: &Scene<'_>,
) -> Result<usize, DrawingAreaErrorKind<DB::ErrorType>> {
    let spec = scene.grid.spec();
    let (x0, x1) = spec.x_bounds;
    let (y0, y1) = spec.y_bounds;
    let (w, h) = area.dim_in_pixel();
    let (top, bottom, left, right) = equal_aspect_padding((w as i32, h as i32), x1 - x0, y1 - y0);
    let area = area.margin(top, bottom, left, right);

    let mut chart = ChartBuilder::on(&area)
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(x0..x1, y0..y1)?;
    chart
        .configure_mesh()
        .x_desc("x")
        .y_desc("y")
        .light_line_style(&BLACK.mix(0.05))
        .draw()?;

    let lines = trace_streamlines(scene.field, scene.grid, scene.charges, &scene.options.streamlines);
    let stroke = scene.options.streamline_color.stroke_width(1);
    chart.draw_series(
        lines
            .iter()
            .map(|l| PathElement::new(l.points.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>(), stroke)),
    )?;

    let (lo, hi) = colorbar_limits(scene.charges);
    let size = scene.options.marker_size;
    chart
        .draw_series(
            scene
                .charges
                .iter()
                .map(|c| Circle::new((c.x(), c.y()), size, diverging_color(c.charge, lo, hi).filled())),
        )?
        .label("Charges")
        .legend(|(x, y)| Circle::new((x, y), 5, BLACK.stroke_width(2)));
    chart.draw_series(
        scene
            .charges
            .iter()
            .map(|c| Circle::new((c.x(), c.y()), size, BLACK.stroke_width(2))),
    )?;

    let font = ("sans-serif", 14).into_font();
    chart.draw_series(scene.charges.iter().enumerate().map(|(i, c)| {
        let hpos = if c.x() < LABEL_FLIP_X { HPos::Right } else { HPos::Left };
        let style = TextStyle::from(font.clone()).pos(Pos::new(hpos, VPos::Center));
        Text::new(charge_label(i, c.charge), (c.x(), c.y()), style)
    }))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(lines.len())
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    charges: &[PointCharge],
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (lo, hi) = colorbar_limits(charges);
    let mut bar = ChartBuilder::on(area)
        .margin(MARGIN)
        .margin_right(45)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(0.0..1.0, lo..hi)?;
    bar.configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .disable_x_axis()
        .y_desc("Charge (q)")
        .draw()?;
    let step = (hi - lo) / COLORBAR_STEPS as Scalar;
    bar.draw_series((0..COLORBAR_STEPS).map(|i| {
        let v0 = lo + step * i as Scalar;
        let v1 = v0 + step;
        Rectangle::new([(0.0, v0), (1.0, v1)], diverging_color(0.5 * (v0 + v1), lo, hi).filled())
    }))?;
    Ok(())
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    scene: &Scene<'_>,
) -> Result<usize, DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    let body = root.titled(&scene.options.title, ("sans-serif", 22))?;
    let (w, _) = body.dim_in_pixel();
    let split = w.saturating_sub(scene.options.colorbar_width) as i32;
    let (plot_area, bar_area) = body.split_horizontally(split);
    let drawn = draw_field(&plot_area, scene)?;
    draw_colorbar(&bar_area, scene.charges)?;
    root.present()?;
    Ok(drawn)
}

/// Renders `field` sampled on `grid` together with `charges` into an SVG file.
///
/// Returns the number of streamlines drawn.
pub fn render_figure(
    path: impl AsRef<Path>,
    grid: &EvaluationGrid,
    field: &FieldSamples,
    charges: &[PointCharge],
    options: &FigureOptions,
) -> Result<usize, RenderError> {
    if field.shape() != grid.shape() {
        return Err(RenderError::ShapeMismatch { field: field.shape(), grid: grid.shape() });
    }
    let path = path.as_ref();
    let root = SVGBackend::new(path, (options.width, options.height)).into_drawing_area();
    let scene = Scene { grid, field, charges, options };
    let drawn = draw_figure(&root, &scene).map_err(|e| RenderError::Backend(e.to_string()))?;
    info!("wrote {} with {drawn} streamlines and {} charges", path.display(), charges.len());
    Ok(drawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{electric_field_on_grid, fixed_charges, FieldConfig, GridSpec};

    #[test]
    fn diverging_color_spans_blue_white_red() {
        assert_eq!(diverging_color(-1.0, -1.0, 2.0), RGBColor(0, 0, 255));
        assert_eq!(diverging_color(0.5, -1.0, 2.0), RGBColor(255, 255, 255));
        assert_eq!(diverging_color(2.0, -1.0, 2.0), RGBColor(255, 0, 0));
        assert_eq!(diverging_color(7.0, 7.0, 7.0), RGBColor(255, 255, 255));
    }

    #[test]
    fn labels_are_one_based() {
        assert_eq!(charge_label(0, 1.0), "q1 = 1.0");
        assert_eq!(charge_label(2, -0.5), "q3 = -0.5");
    }

    #[test]
    fn equal_aspect_padding_squares_the_plot() {
        let (top, bottom, left, right) = equal_aspect_padding((700, 600), 8.0, 8.0);
        let inner_w = 700 - Y_LABEL_AREA - 2 * MARGIN - left - right;
        let inner_h = 600 - X_LABEL_AREA - 2 * MARGIN - top - bottom;
        assert_eq!(inner_w, inner_h);
        assert_eq!(top + bottom, 0);
    }

    #[test]
    fn colorbar_limits_widen_degenerate_ranges() {
        assert_eq!(colorbar_limits(&[]), (-1.0, 1.0));
        assert_eq!(colorbar_limits(&[PointCharge::new(2.0, 0.0, 0.0)]), (1.0, 3.0));
        assert_eq!(colorbar_limits(&fixed_charges()), (-1.0, 1.0));
    }

    #[test]
    fn renders_svg_file() {
        let grid = EvaluationGrid::from_spec(&GridSpec::new(0.1, (-4.0, 4.0), (-4.0, 4.0))).unwrap();
        let mut charges = fixed_charges();
        charges.push(PointCharge::new(2.0, 0.5, 0.5));
        let field = electric_field_on_grid(&charges, &grid, &FieldConfig::default());
        let path = std::env::temp_dir().join(format!("charge-field-render-{}.svg", std::process::id()));
        let drawn = render_figure(&path, &grid, &field, &charges, &FigureOptions::default()).unwrap();
        assert!(drawn > 0);
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("q3 = 2.0"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn rejects_mismatched_field() {
        let grid = EvaluationGrid::from_spec(&GridSpec::new(1.0, (0.0, 2.0), (0.0, 2.0))).unwrap();
        let other = EvaluationGrid::from_spec(&GridSpec::new(1.0, (0.0, 1.0), (0.0, 1.0))).unwrap();
        let field = electric_field_on_grid(&[], &other, &FieldConfig::default());
        let err = render_figure("unused.svg", &grid, &field, &[], &FigureOptions::default()).unwrap_err();
        assert!(matches!(err, RenderError::ShapeMismatch { .. }));
    }
}
