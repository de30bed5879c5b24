//! On-screen trajectory window. Replays the sampled path one sample per
//! `SAMPLE_STEP_S` of wall time, then shows the impact annotation.

use macroquad::prelude::*;

use crate::core::ballistics::{SAMPLE_STEP_S, TrajectoryResult};
use crate::core::window::CanvasArea;
use crate::render::PlotLayout;

mod draw;

const WINDOW_WIDTH: i32 = 1280;
const WINDOW_HEIGHT: i32 = 720;
const MSAA_SAMPLES: i32 = 4;

const LEFT_MARGIN: f32 = 90.0;
const RIGHT_MARGIN: f32 = 40.0;
const TOP_MARGIN: f32 = 100.0;
const BOTTOM_MARGIN: f32 = 80.0;

pub fn window_conf() -> Conf {
    Conf {
        window_title: "Projectile Trajectory".to_string(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

/// Opens the window and blocks until it is closed.
pub fn show(result: &TrajectoryResult) {
    let title = format!(
        "v = {:.1} m/s | angle = {:.1} deg | height = {:.1} m | g = {:.2} m/s^2",
        result.parameters().speed_mps(),
        result.parameters().angle_deg(),
        result.parameters().height_m(),
        result.parameters().gravity_mps2()
    );
    let layout = PlotLayout::from_result(result);
    macroquad::Window::from_config(window_conf(), run(layout, title));
}

pub(crate) fn visible_samples(elapsed_s: f64, total: usize) -> usize {
    let reached = (elapsed_s.max(0.0) / SAMPLE_STEP_S) as usize;
    (reached + 1).min(total)
}

async fn run(layout: PlotLayout, title: String) {
    let mut elapsed_s = 0.0f64;
    let mut paused = false;

    loop {
        if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
            break;
        }
        if is_key_pressed(KeyCode::Space) {
            paused = !paused;
        }
        if is_key_pressed(KeyCode::R) {
            elapsed_s = 0.0;
        }
        if !paused {
            elapsed_s += get_frame_time() as f64;
        }

        let area = CanvasArea {
            left: LEFT_MARGIN as f64,
            right: (screen_width() - RIGHT_MARGIN) as f64,
            top: TOP_MARGIN as f64,
            bottom: (screen_height() - BOTTOM_MARGIN) as f64,
        };
        let visible = visible_samples(elapsed_s, layout.path.len());

        clear_background(WHITE);
        draw::draw_grid(&area, Color::from_rgba(227, 231, 236, 255));
        draw::draw_axis_tick_labels(&area, &layout.window);
        draw::draw_ground(&area, &layout.window);
        draw::draw_launch_marker(&layout, &area);
        draw::draw_path(&layout.path[..visible], &layout.window, &area);
        if visible == layout.path.len() {
            draw::draw_impact(&layout, &area);
        }
        draw::draw_header(&title, "Space pause | R replay | Esc close", LEFT_MARGIN);

        next_frame().await;
    }
}
