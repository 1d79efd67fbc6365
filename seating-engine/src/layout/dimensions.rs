//! Minimum table size for a given shape and seat count

use serde::Serialize;
use shared::models::TableType;
use std::f64::consts::PI;

use super::distribution::distribute;
use super::{SEAT_DIAMETER, SEAT_SPACING, TABLE_PADDING};

const SINGLE_SEAT_SIZE: f64 = 100.0;
const CIRCULAR_MIN_DIAMETER: f64 = 150.0;
const ONE_SIDED_MIN_WIDTH: f64 = 200.0;
const ONE_SIDED_HEIGHT: f64 = 100.0;
const RECT_MIN_WIDTH: f64 = 100.0;
const RECT_MIN_HEIGHT: f64 = 60.0;

/// Table width and height in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableDimensions {
    pub width: f64,
    pub height: f64,
}

impl TableDimensions {
    fn square(size: f64) -> Self {
        Self {
            width: size,
            height: size,
        }
    }
}

/// Length of a row of `count` seats, spacing included
pub(crate) fn row_span(count: i32) -> f64 {
    if count <= 0 {
        return 0.0;
    }
    f64::from(count) * SEAT_DIAMETER + f64::from(count - 1) * SEAT_SPACING
}

/// Smallest table that fits `num_seats` seats without overlap
pub fn dimensions(table_type: TableType, num_seats: i32) -> TableDimensions {
    match table_type {
        TableType::CircularSingleSeat => TableDimensions::square(SINGLE_SEAT_SIZE),
        TableType::Circular => {
            let needed = f64::from(num_seats.max(0)) * (SEAT_DIAMETER + SEAT_SPACING) / PI;
            TableDimensions::square(needed.max(CIRCULAR_MIN_DIAMETER))
        }
        TableType::RectangularOneSided => TableDimensions {
            width: (row_span(num_seats) + TABLE_PADDING).max(ONE_SIDED_MIN_WIDTH),
            height: ONE_SIDED_HEIGHT,
        },
        TableType::Rectangular | TableType::Square => {
            let sides = distribute(num_seats, table_type.is_square());
            let width = (row_span(sides.horizontal()) + TABLE_PADDING).max(RECT_MIN_WIDTH);
            let height = (row_span(sides.vertical()) + TABLE_PADDING).max(RECT_MIN_HEIGHT);
            if table_type.is_square() {
                TableDimensions::square(width.max(height))
            } else {
                TableDimensions { width, height }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_seat_is_fixed() {
        for n in [-1, 0, 1, 12] {
            assert_eq!(
                dimensions(TableType::CircularSingleSeat, n),
                TableDimensions::square(100.0)
            );
        }
    }

    #[test]
    fn test_circular_minimum_and_growth() {
        assert_eq!(dimensions(TableType::Circular, 0).width, 150.0);
        assert_eq!(dimensions(TableType::Circular, 8).width, 150.0);

        let big = dimensions(TableType::Circular, 20);
        assert!((big.width - 900.0 / PI).abs() < 1e-9);
        assert_eq!(big.width, big.height);
    }

    #[test]
    fn test_one_sided() {
        assert_eq!(
            dimensions(TableType::RectangularOneSided, 0),
            TableDimensions {
                width: 200.0,
                height: 100.0
            }
        );
        // 6 seats: 6*30 + 5*15 + 60 = 315
        assert_eq!(dimensions(TableType::RectangularOneSided, 6).width, 315.0);
    }

    #[test]
    fn test_rectangular_floor() {
        assert_eq!(
            dimensions(TableType::Rectangular, 0),
            TableDimensions {
                width: 100.0,
                height: 60.0
            }
        );
    }

    #[test]
    fn test_rectangular_eight() {
        // 3 across (30*3 + 15*2 + 60 = 180), 1 down (30 + 60 = 90)
        assert_eq!(
            dimensions(TableType::Rectangular, 8),
            TableDimensions {
                width: 180.0,
                height: 90.0
            }
        );
    }

    #[test]
    fn test_square_is_square() {
        for n in 0..=30 {
            let d = dimensions(TableType::Square, n);
            assert_eq!(d.width, d.height, "n={n}");
        }
        assert_eq!(dimensions(TableType::Square, 10).width, 180.0);
        assert_eq!(dimensions(TableType::Square, 0).width, 100.0);
    }

    #[test]
    fn test_negative_counts_degrade_to_minimum() {
        assert_eq!(dimensions(TableType::Circular, -5).width, 150.0);
        assert_eq!(dimensions(TableType::RectangularOneSided, -5).width, 200.0);
        assert_eq!(dimensions(TableType::Rectangular, -5).width, 100.0);
    }
}
