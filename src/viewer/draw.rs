use macroquad::prelude::*;

use crate::core::window::{CanvasArea, PlotWindow};
use crate::render::PlotLayout;

const X_GRID_LINES: usize = 10;
const Y_GRID_LINES: usize = 6;
const LABEL_COLOR: Color = Color::new(0.41, 0.44, 0.49, 1.0);

fn format_axis_value(value: f64, axis_max: f64) -> String {
    if axis_max >= 1000.0 {
        format!("{value:.0}")
    } else if axis_max >= 100.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

pub(crate) fn to_screen(point: (f64, f64), window: &PlotWindow, area: &CanvasArea) -> Vec2 {
    let (x, y) = window.to_canvas(point.0, point.1, area);
    vec2(x as f32, y as f32)
}

pub(crate) fn draw_grid(area: &CanvasArea, color: Color) {
    let (left, right, top, bottom) = (
        area.left as f32,
        area.right as f32,
        area.top as f32,
        area.bottom as f32,
    );
    for i in 0..=X_GRID_LINES {
        let t = i as f32 / X_GRID_LINES as f32;
        let x = left + t * (right - left);
        draw_line(x, top, x, bottom, 1.0, color);
    }
    for i in 0..=Y_GRID_LINES {
        let t = i as f32 / Y_GRID_LINES as f32;
        let y = bottom - t * (bottom - top);
        draw_line(left, y, right, y, 1.0, color);
    }
}

pub(crate) fn draw_axis_tick_labels(area: &CanvasArea, window: &PlotWindow) {
    let tick_font_size: u16 = 16;

    for i in 0..=X_GRID_LINES {
        let t = i as f64 / X_GRID_LINES as f64;
        let x = area.left + t * area.width();
        let label = format_axis_value(t * window.x_span, window.x_span);
        let size = measure_text(&label, None, tick_font_size, 1.0);
        draw_text(
            &label,
            x as f32 - (size.width * 0.5),
            area.bottom as f32 + 22.0,
            tick_font_size as f32,
            LABEL_COLOR,
        );
    }

    for i in 0..=Y_GRID_LINES {
        let t = i as f64 / Y_GRID_LINES as f64;
        let y = area.bottom - t * area.height();
        let label = format_axis_value(t * window.y_span, window.y_span);
        let size = measure_text(&label, None, tick_font_size, 1.0);
        draw_text(
            &label,
            (area.left as f32 - 8.0) - size.width,
            y as f32 + (size.height * 0.35),
            tick_font_size as f32,
            LABEL_COLOR,
        );
    }

    draw_text(
        "Distance (m)",
        area.right as f32 - 120.0,
        area.bottom as f32 + 48.0,
        18.0,
        LABEL_COLOR,
    );
    draw_text(
        "Height (m)",
        area.left as f32 + 10.0,
        area.top as f32 - 8.0,
        18.0,
        LABEL_COLOR,
    );
}

pub(crate) fn draw_ground(area: &CanvasArea, window: &PlotWindow) {
    let ground = to_screen((0.0, 0.0), window, area);
    draw_line(0.0, ground.y, screen_width(), ground.y, 4.0, BLACK);
}

pub(crate) fn draw_path(points: &[(f64, f64)], window: &PlotWindow, area: &CanvasArea) {
    let screen: Vec<Vec2> = points
        .iter()
        .map(|point| to_screen(*point, window, area))
        .collect();
    for pair in screen.windows(2) {
        draw_line(pair[0].x, pair[0].y, pair[1].x, pair[1].y, 2.0, BLUE);
    }
    for point in &screen {
        draw_circle(point.x, point.y, 2.5, RED);
    }
}

pub(crate) fn draw_launch_marker(layout: &PlotLayout, area: &CanvasArea) {
    let launch = to_screen(layout.launch, &layout.window, area);
    draw_circle(launch.x, launch.y, 10.0, RED);
    draw_circle_lines(launch.x, launch.y, 10.0, 2.0, MAROON);
}

pub(crate) fn draw_impact(layout: &PlotLayout, area: &CanvasArea) {
    let impact = to_screen(layout.impact, &layout.window, area);
    draw_circle(impact.x, impact.y, 5.0, RED);

    let font_size = 20.0;
    let line_height = font_size + 4.0;
    let text_x = (impact.x + 10.0).min(screen_width() - 240.0);
    let text_top = impact.y - 10.0 - (layout.annotation.len() as f32 * line_height);
    for (idx, line) in layout.annotation.iter().enumerate() {
        draw_text(
            line,
            text_x,
            text_top + (idx as f32 * line_height),
            font_size,
            BLACK,
        );
    }
}

pub(crate) fn draw_header(title: &str, controls: &str, left: f32) {
    draw_text(title, left, 36.0, 26.0, Color::from_rgba(30, 30, 35, 255));
    draw_text(controls, left, 62.0, 18.0, DARKGRAY);
}
