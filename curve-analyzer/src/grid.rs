//! Implicit curve evaluation for contour plotting
//!
//! The curve is the zero level set of F(x, y) = y² - x³ - ax - b. Renderers
//! sample F over a grid and draw the contour at level 0.

use crate::params::CurveParams;

/// F(x, y) = y² - x³ - a·x - b
pub fn implicit_curve(params: CurveParams, x: f64, y: f64) -> f64 {
    y * y - x.powi(3) - params.a * x - params.b
}

/// Rectangular sampling window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub columns: usize,
    pub rows: usize,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::square(5.0, 400)
    }
}

impl GridSpec {
    /// [-range, range]² sampled with `samples` points per axis
    pub fn square(range: f64, samples: usize) -> Self {
        Self {
            x_min: -range,
            x_max: range,
            y_min: -range,
            y_max: range,
            columns: samples,
            rows: samples,
        }
    }

    /// Evenly spaced sample positions, endpoints included
    fn linspace(min: f64, max: f64, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![min],
            _ => {
                let step = (max - min) / (count - 1) as f64;
                (0..count).map(|i| min + step * i as f64).collect()
            }
        }
    }

    pub fn xs(&self) -> Vec<f64> {
        Self::linspace(self.x_min, self.x_max, self.columns)
    }

    pub fn ys(&self) -> Vec<f64> {
        Self::linspace(self.y_min, self.y_max, self.rows)
    }
}

/// F sampled over a grid, stored row-major with row 0 at `y_min`
#[derive(Debug, Clone)]
pub struct CurveGrid {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    values: Vec<f64>,
}

impl CurveGrid {
    pub fn evaluate(params: CurveParams, spec: &GridSpec) -> Self {
        let xs = spec.xs();
        let ys = spec.ys();
        let mut values = Vec::with_capacity(xs.len() * ys.len());
        for &y in &ys {
            for &x in &xs {
                values.push(implicit_curve(params, x, y));
            }
        }
        Self { xs, ys, values }
    }

    pub fn value(&self, row: usize, column: usize) -> Option<f64> {
        if row >= self.ys.len() || column >= self.xs.len() {
            return None;
        }
        self.values.get(row * self.xs.len() + column).copied()
    }

    pub fn rows(&self) -> usize {
        self.ys.len()
    }

    pub fn columns(&self) -> usize {
        self.xs.len()
    }

    /// Whether the cell whose lower-left corner is (row, column) is crossed
    /// by the zero contour
    ///
    /// A cell is crossed when its four corners do not all share one sign, or
    /// when a corner is exactly zero.
    pub fn cell_crosses_zero(&self, row: usize, column: usize) -> bool {
        let corners = [
            self.value(row, column),
            self.value(row, column + 1),
            self.value(row + 1, column),
            self.value(row + 1, column + 1),
        ];
        let mut positive = false;
        let mut negative = false;
        for corner in corners.into_iter().flatten() {
            if corner == 0.0 {
                return true;
            }
            if corner > 0.0 {
                positive = true;
            } else if corner < 0.0 {
                negative = true;
            }
        }
        positive && negative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_on_curve_evaluate_to_zero() {
        // y² = x³ - x + 1 passes through (0, ±1) and (1, ±1)
        let params = CurveParams::new(-1.0, 1.0);
        assert_eq!(implicit_curve(params, 0.0, 1.0), 0.0);
        assert_eq!(implicit_curve(params, 0.0, -1.0), 0.0);
        assert_eq!(implicit_curve(params, 1.0, 1.0), 0.0);
        assert!(implicit_curve(params, 0.0, 0.0) < 0.0);
    }

    #[test]
    fn test_node_passes_through_singular_point() {
        // y² = x³ - 3x + 2 = (x - 1)²(x + 2) has its node at (1, 0)
        let params = CurveParams::new(-3.0, 2.0);
        assert_eq!(implicit_curve(params, 1.0, 0.0), 0.0);
        assert_eq!(implicit_curve(params, -2.0, 0.0), 0.0);
    }

    #[test]
    fn test_grid_shape_and_endpoints() {
        let spec = GridSpec::square(5.0, 11);
        let grid = CurveGrid::evaluate(CurveParams::new(0.0, 0.0), &spec);

        assert_eq!(grid.rows(), 11);
        assert_eq!(grid.columns(), 11);
        assert_eq!(grid.xs[0], -5.0);
        assert!((grid.xs[10] - 5.0).abs() < 1e-12);
        // Column 5 is x = 0, row 5 is y = 0: the cusp itself
        assert_eq!(grid.value(5, 5), Some(0.0));
        assert_eq!(grid.value(11, 0), None);
    }

    #[test]
    fn test_default_grid_matches_plot_window() {
        let spec = GridSpec::default();
        assert_eq!(spec.columns, 400);
        assert_eq!(spec.rows, 400);
        assert_eq!(spec.x_min, -5.0);
        assert_eq!(spec.y_max, 5.0);
    }

    #[test]
    fn test_zero_crossing_detection() {
        let spec = GridSpec::square(5.0, 11);
        let grid = CurveGrid::evaluate(CurveParams::new(-1.0, 4.0), &spec);

        let crossed = (0..grid.rows() - 1)
            .flat_map(|r| (0..grid.columns() - 1).map(move |c| (r, c)))
            .filter(|&(r, c)| grid.cell_crosses_zero(r, c))
            .count();
        assert!(crossed > 0);

        // Far right of the window x³ dominates: F < 0 everywhere near y = 0
        assert!(!grid.cell_crosses_zero(5, 9));
    }
}
