use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;

use crate::core::ballistics::{TrajectoryResult, TrajectorySample};
use crate::core::window::{CanvasArea, PlotWindow};

pub const DEFAULT_CANVAS_SIZE: (u32, u32) = (1200, 600);
const CANVAS_MARGIN_PX: f64 = 50.0;
const LAUNCH_MARKER_PX: i32 = 10;
const SAMPLE_MARKER_PX: i32 = 3;
const IMPACT_MARKER_PX: i32 = 5;
const ANNOTATION_FONT_PX: i32 = 16;
const ANNOTATION_WIDTH_PX: i32 = 220;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unsupported plot format '{0}'. Use .png, .bmp or .svg.")]
    UnsupportedFormat(String),

    #[error("Could not draw plot: {0}")]
    Backend(String),
}

fn backend_error<E: StdError + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Backend(err.to_string())
}

/// World-space content of a trajectory plot, shared by the file renderer
/// and the on-screen viewer.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotLayout {
    pub window: PlotWindow,
    pub path: Vec<(f64, f64)>,
    pub launch: (f64, f64),
    pub impact: (f64, f64),
    pub annotation: Vec<String>,
}

impl PlotLayout {
    pub fn from_result(result: &TrajectoryResult) -> Self {
        let point = |s: TrajectorySample| (s.x, s.y);
        Self {
            window: PlotWindow::fit(result.total_distance_m(), result.max_height_m()),
            path: result.samples().iter().copied().map(point).collect(),
            launch: point(result.launch()),
            impact: point(result.impact()),
            annotation: impact_annotation(result),
        }
    }
}

pub fn impact_annotation(result: &TrajectoryResult) -> Vec<String> {
    vec![
        "Impact!".to_string(),
        format!("Time = {:.2} s", result.flight_time_s()),
        format!("Max height = {:.2} m", result.max_height_m()),
        format!("Total distance = {:.2} m", result.impact().x),
    ]
}

pub fn default_plot_path<Tz: TimeZone>(now: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: fmt::Display,
{
    PathBuf::from(format!("trajectory_{}.png", now.format("%Y%m%d_%H%M%S")))
}

/// Draws one trajectory into an image file. The canvas is created per
/// `render` call and flushed before it returns.
pub struct TrajectoryRenderer {
    path: PathBuf,
    size: (u32, u32),
    labels: bool,
}

impl TrajectoryRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            size: DEFAULT_CANVAS_SIZE,
            labels: true,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width.max(1), height.max(1));
        self
    }

    pub fn with_labels(mut self, labels: bool) -> Self {
        self.labels = labels;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn render(&self, result: &TrajectoryResult) -> Result<(), RenderError> {
        let layout = PlotLayout::from_result(result);
        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "svg" => self.draw(
                SVGBackend::new(&self.path, self.size).into_drawing_area(),
                &layout,
            ),
            "png" | "bmp" => self.draw(
                BitMapBackend::new(&self.path, self.size).into_drawing_area(),
                &layout,
            ),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: DrawingArea<DB, Shift>,
        layout: &PlotLayout,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE).map_err(backend_error)?;

        let (width, height) = (self.size.0 as f64, self.size.1 as f64);
        let area = CanvasArea::inset(width, height, CANVAS_MARGIN_PX);
        let to_px = |(x, y): (f64, f64)| {
            let (cx, cy) = layout.window.to_canvas(x, y, &area);
            (cx.round() as i32, cy.round() as i32)
        };

        let (_, ground_y) = to_px((0.0, 0.0));
        root.draw(&PathElement::new(
            vec![(0, ground_y), (self.size.0 as i32, ground_y)],
            BLACK.stroke_width(4),
        ))
        .map_err(backend_error)?;

        let points: Vec<(i32, i32)> = layout.path.iter().copied().map(to_px).collect();
        root.draw(&PathElement::new(points.clone(), BLUE.stroke_width(2)))
            .map_err(backend_error)?;

        root.draw(&Circle::new(
            to_px(layout.launch),
            LAUNCH_MARKER_PX,
            RED.filled(),
        ))
        .map_err(backend_error)?;
        for point in &points {
            root.draw(&Circle::new(*point, SAMPLE_MARKER_PX, RED.filled()))
                .map_err(backend_error)?;
        }

        let impact = to_px(layout.impact);
        root.draw(&Circle::new(impact, IMPACT_MARKER_PX, RED.filled()))
            .map_err(backend_error)?;

        if self.labels {
            let style = ("sans-serif", ANNOTATION_FONT_PX)
                .into_font()
                .color(&BLACK);
            let text_x = (impact.0 + 10).min(self.size.0 as i32 - ANNOTATION_WIDTH_PX);
            let line_count = layout.annotation.len() as i32;
            let text_top = impact.1 - 10 - (line_count * (ANNOTATION_FONT_PX + 4));
            for (idx, line) in layout.annotation.iter().enumerate() {
                let y = text_top + (idx as i32 * (ANNOTATION_FONT_PX + 4));
                root.draw(&Text::new(line.clone(), (text_x, y), style.clone()))
                    .map_err(backend_error)?;
            }
        }

        root.present().map_err(backend_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ballistics::{ProjectileParameters, compute};
    use chrono::Utc;
    use std::fs;

    fn sample_result() -> TrajectoryResult {
        let params = ProjectileParameters::new(20.0, 45.0, 2.0, 9.8).expect("valid parameters");
        compute(params).expect("trajectory should compute")
    }

    #[test]
    fn layout_follows_samples() {
        let result = sample_result();
        let layout = PlotLayout::from_result(&result);

        assert_eq!(layout.path.len(), result.samples().len());
        assert_eq!(layout.launch, (0.0, 2.0));
        assert_eq!(layout.impact, *layout.path.last().expect("non-empty path"));
        assert!(layout.window.x_span > result.total_distance_m());
        assert!(layout.window.y_span > result.max_height_m());
    }

    #[test]
    fn annotation_reports_impact_metrics() {
        let result = sample_result();
        let lines = impact_annotation(&result);
        assert_eq!(lines[0], "Impact!");
        assert_eq!(lines[1], format!("Time = {:.2} s", result.flight_time_s()));
        assert!(lines[3].starts_with("Total distance = "));
    }

    #[test]
    fn default_path_is_timestamped_png() {
        let now = Utc
            .with_ymd_and_hms(2026, 3, 9, 14, 5, 7)
            .single()
            .expect("valid timestamp");
        assert_eq!(
            default_plot_path(&now),
            PathBuf::from("trajectory_20260309_140507.png")
        );
    }

    #[test]
    fn renders_svg_without_labels() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("flight.svg");
        TrajectoryRenderer::new(&path)
            .with_size(600, 300)
            .with_labels(false)
            .render(&sample_result())
            .expect("svg render");

        let svg = fs::read_to_string(&path).expect("svg written");
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn renders_png_without_labels() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("flight.png");
        TrajectoryRenderer::new(&path)
            .with_labels(false)
            .render(&sample_result())
            .expect("png render");

        let size = fs::metadata(&path).expect("png written").len();
        assert!(size > 0);
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = TrajectoryRenderer::new("flight.gif")
            .render(&sample_result())
            .expect_err("gif is not supported");
        assert!(matches!(err, RenderError::UnsupportedFormat(ext) if ext == "gif"));
    }
}
