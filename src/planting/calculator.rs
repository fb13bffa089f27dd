use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rectangle,
    Square,
    Circle,
}

impl Shape {
    /// Number of dimensions the shape is measured with.
    pub fn dimension_count(self) -> usize {
        match self {
            Shape::Rectangle => 2,
            Shape::Square | Shape::Circle => 1,
        }
    }
}

impl FromStr for Shape {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rectangle" | "retângulo" | "retangulo" => Ok(Shape::Rectangle),
            "square" | "quadrado" => Ok(Shape::Square),
            "circle" | "círculo" | "circulo" => Ok(Shape::Circle),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Rectangle => "Rectangle",
            Shape::Square => "Square",
            Shape::Circle => "Circle",
        };
        f.write_str(name)
    }
}

/// Planting area in m².
///
/// `dim1` is the width, side or radius; `dim2` is only read for rectangles.
/// Negative dimensions are not rejected and flow through the arithmetic.
pub fn area(shape: Shape, dim1: f64, dim2: f64) -> f64 {
    match shape {
        Shape::Rectangle => dim1 * dim2,
        Shape::Square => dim1.powi(2),
        Shape::Circle => PI * dim1.powi(2),
    }
}

/// Same as [`area`] but takes the shape by name; unknown names give `0.0`.
pub fn area_by_name(shape: &str, dim1: f64, dim2: f64) -> f64 {
    match shape.parse::<Shape>() {
        Ok(shape) => area(shape, dim1, dim2),
        Err(()) => 0.0,
    }
}

/// Total input needed for a field: `area * per_area_rate * row_count`.
///
/// Returns `0.0` unless both `area` and `per_area_rate` are positive.
///
/// The rate is already per m², so multiplying by `row_count` counts the area once
/// per row. Whether that is agronomically right for multi-row fields is unresolved;
/// the dashboard always passes a single row.
pub fn total_input(area: f64, per_area_rate: f64, row_count: u32) -> f64 {
    if area <= 0.0 || per_area_rate <= 0.0 {
        return 0.0;
    }
    area * per_area_rate * f64::from(row_count)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlantingPlan {
    pub shape: Shape,
    pub dimensions: Vec<f64>,
    pub area: f64,
    pub input_per_area: f64,
    pub row_count: u32,
    pub total_input: f64,
}

impl PlantingPlan {
    pub fn new(shape: Shape, dim1: f64, dim2: f64, input_per_area: f64, row_count: u32) -> Self {
        let dimensions = if shape.dimension_count() == 2 {
            vec![dim1, dim2]
        } else {
            vec![dim1]
        };
        let area = area(shape, dim1, dim2);
        Self {
            shape,
            dimensions,
            area,
            input_per_area,
            row_count,
            total_input: total_input(area, input_per_area, row_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn rectangle_area_is_width_times_length() {
        assert_eq!(area(Shape::Rectangle, 100.0, 50.0), 5000.0);
    }

    #[test]
    fn square_area_ignores_second_dimension() {
        assert_eq!(area(Shape::Square, 12.0, 99.0), 144.0);
    }

    #[test]
    fn circle_area_uses_radius() {
        assert!((area(Shape::Circle, 3.0, 0.0) - PI * 9.0).abs() < EPS);
    }

    #[test]
    fn negative_dimensions_propagate() {
        assert_eq!(area(Shape::Rectangle, -2.0, 3.0), -6.0);
    }

    #[test]
    fn unknown_shape_name_gives_zero() {
        assert_eq!(area_by_name("triangle", 3.0, 4.0), 0.0);
        assert_eq!(area_by_name("", 3.0, 4.0), 0.0);
    }

    #[test]
    fn shape_names_parse_in_both_languages() {
        assert_eq!(area_by_name(" Retângulo ", 2.0, 3.0), 6.0);
        assert_eq!(area_by_name("QUADRADO", 2.0, 0.0), 4.0);
        assert!((area_by_name("círculo", 1.0, 0.0) - PI).abs() < EPS);
        assert_eq!("circle".parse::<Shape>(), Ok(Shape::Circle));
        assert_eq!("rect".parse::<Shape>(), Err(()));
    }

    #[test]
    fn total_input_is_zero_for_non_positive_inputs() {
        assert_eq!(total_input(0.0, 0.5, 3), 0.0);
        assert_eq!(total_input(-10.0, 0.5, 3), 0.0);
        assert_eq!(total_input(100.0, 0.0, 3), 0.0);
        assert_eq!(total_input(100.0, -1.0, 3), 0.0);
    }

    #[test]
    fn total_input_multiplies_by_rows() {
        assert!((total_input(100.0, 0.5, 1) - 50.0).abs() < EPS);
        assert!((total_input(100.0, 0.5, 4) - 200.0).abs() < EPS);
    }

    #[test]
    fn plan_derives_area_and_total() {
        let plan = PlantingPlan::new(Shape::Rectangle, 100.0, 50.0, 0.8, 1);
        assert_eq!(plan.dimensions, vec![100.0, 50.0]);
        assert_eq!(plan.area, 5000.0);
        assert!((plan.total_input - 4000.0).abs() < EPS);

        let plan = PlantingPlan::new(Shape::Square, 10.0, 50.0, 0.5, 1);
        assert_eq!(plan.dimensions, vec![10.0]);
    }
}
