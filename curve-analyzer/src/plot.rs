use crate::grid::{CurveGrid, GridSpec};
use crate::params::CurveParams;

const CURVE: char = '*';
const AXIS_X: char = '-';
const AXIS_Y: char = '|';
const ORIGIN: char = '+';

/// Size and window of a terminal plot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotSpec {
    /// Characters per line
    pub width: usize,
    /// Lines of plot area
    pub height: usize,
    /// Half-width of the square window around the origin
    pub range: f64,
}

impl Default for PlotSpec {
    fn default() -> Self {
        Self {
            width: 61,
            height: 25,
            range: 5.0,
        }
    }
}

pub fn title(params: CurveParams) -> String {
    format!("y² = x³ + ({:.1})x + ({:.1})", params.a, params.b)
}

fn spans_zero(lo: f64, hi: f64) -> bool {
    lo <= 0.0 && 0.0 < hi
}

/// Draw the zero contour of F as text
///
/// Each character is one grid cell; cells the curve passes through get `*`,
/// the axes are drawn underneath. First line is the title.
pub fn render(params: CurveParams, spec: &PlotSpec) -> String {
    let width = spec.width.max(1);
    let height = spec.height.max(1);
    let grid = CurveGrid::evaluate(
        params,
        &GridSpec {
            x_min: -spec.range,
            x_max: spec.range,
            y_min: -spec.range,
            y_max: spec.range,
            columns: width + 1,
            rows: height + 1,
        },
    );

    let mut out = title(params);
    out.push('\n');

    // Top line is the highest y
    for line in 0..height {
        let row = height - 1 - line;
        let on_x_axis = spans_zero(grid.ys[row], grid.ys[row + 1]);
        for column in 0..width {
            let on_y_axis = spans_zero(grid.xs[column], grid.xs[column + 1]);
            let ch = if grid.cell_crosses_zero(row, column) {
                CURVE
            } else {
                match (on_x_axis, on_y_axis) {
                    (true, true) => ORIGIN,
                    (true, false) => AXIS_X,
                    (false, true) => AXIS_Y,
                    (false, false) => ' ',
                }
            };
            out.push(ch);
        }
        // Keep lines free of trailing padding
        let trimmed_len = out.trim_end_matches(' ').len();
        out.truncate(trimmed_len);
        out.push('\n');
    }
    out
}
