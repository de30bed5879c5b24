pub const DISTANCE_TO_HEIGHT_RATIO: f64 = 2.0; // x:y data window ratio

const X_PADDING_RATIO: f64 = 0.06;
const Y_PADDING_RATIO: f64 = 0.10;

/// Pixel rectangle a plot is drawn into. `top < bottom` in canvas space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasArea {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl CanvasArea {
    pub fn inset(width: f64, height: f64, margin: f64) -> Self {
        Self {
            left: margin,
            right: (width - margin).max(margin + 1.0),
            top: margin,
            bottom: (height - margin).max(margin + 1.0),
        }
    }

    pub fn width(&self) -> f64 {
        (self.right - self.left).max(1.0)
    }

    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(1.0)
    }
}

/// World-space extent shown on a plot: `[0, x_span]` by `[0, y_span]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotWindow {
    pub x_span: f64,
    pub y_span: f64,
}

impl PlotWindow {
    /// Pads the raw extent and widens one axis so x:y stays at
    /// `DISTANCE_TO_HEIGHT_RATIO`.
    pub fn fit(raw_max_x: f64, raw_max_y: f64) -> Self {
        let raw_x_span = raw_max_x.max(1.0);
        let raw_y_span = raw_max_y.max(1.0);
        let x_pad = raw_x_span * X_PADDING_RATIO;
        let y_pad = raw_y_span * Y_PADDING_RATIO;

        let mut x_span = (raw_max_x + x_pad).max(1.0);
        let mut y_span = (raw_max_y + y_pad).max(1.0);

        if x_span / y_span < DISTANCE_TO_HEIGHT_RATIO {
            x_span = y_span * DISTANCE_TO_HEIGHT_RATIO;
        } else {
            y_span = x_span / DISTANCE_TO_HEIGHT_RATIO;
        }

        Self { x_span, y_span }
    }

    pub fn to_canvas(&self, x: f64, y: f64, area: &CanvasArea) -> (f64, f64) {
        let cx = area.left + (x / self.x_span) * area.width();
        let cy = area.bottom - (y / self.y_span) * area.height();
        (cx, cy)
    }
}
