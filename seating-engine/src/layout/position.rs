//! Seat offsets relative to the table's top-left corner
//!
//! Offsets are the top-left corner of the seat's bounding box. Seats sit
//! just outside the table edge: a seat's center is `EDGE_OFFSET` beyond
//! the edge it belongs to. The single-seat table is the one exception,
//! its seat is centered inside the table bounds.

use serde::Serialize;
use shared::models::TableType;
use std::f64::consts::PI;

use super::dimensions::row_span;
use super::distribution::{Side, distribute};
use super::{EDGE_OFFSET, SEAT_DIAMETER, SEAT_RADIUS, SEAT_SPACING};

/// Top-left pixel offset of a seat's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeatOffset {
    pub left: f64,
    pub top: f64,
}

impl SeatOffset {
    /// Center of the seat's bounding box
    pub fn center(&self) -> (f64, f64) {
        (self.left + SEAT_RADIUS, self.top + SEAT_RADIUS)
    }

    fn from_center(x: f64, y: f64) -> Self {
        Self {
            left: x - SEAT_RADIUS,
            top: y - SEAT_RADIUS,
        }
    }
}

/// Offset of the first seat in a centered row of `count` seats along `length`
fn row_start(length: f64, count: i32) -> f64 {
    (length - row_span(count)) / 2.0
}

fn step(slot: i32) -> f64 {
    f64::from(slot) * (SEAT_DIAMETER + SEAT_SPACING)
}

/// Position of seat `index` out of `total_seats` on a table of the given size
///
/// Returns `None` when `index` is outside `[0, total_seats)`.
pub fn position(
    index: i32,
    total_seats: i32,
    table_type: TableType,
    table_width: f64,
    table_height: f64,
) -> Option<SeatOffset> {
    let total_seats = table_type.clamp_seat_count(total_seats);
    if index < 0 || index >= total_seats {
        return None;
    }

    let offset = match table_type {
        TableType::CircularSingleSeat => {
            SeatOffset::from_center(table_width / 2.0, table_height / 2.0)
        }
        TableType::Circular => {
            let radius = table_width.min(table_height) / 2.0 + EDGE_OFFSET;
            let angle = f64::from(index) / f64::from(total_seats) * 2.0 * PI;
            SeatOffset::from_center(
                table_width / 2.0 + radius * angle.cos(),
                table_height / 2.0 + radius * angle.sin(),
            )
        }
        TableType::RectangularOneSided => SeatOffset {
            left: row_start(table_width, total_seats) + step(index),
            top: -EDGE_OFFSET - SEAT_RADIUS,
        },
        TableType::Rectangular | TableType::Square => {
            let sides = distribute(total_seats, table_type.is_square());
            let slot = sides.slot_of(index)?;
            match slot.side {
                Side::Top => SeatOffset {
                    left: row_start(table_width, slot.count) + step(slot.slot),
                    top: -EDGE_OFFSET - SEAT_RADIUS,
                },
                Side::Bottom => SeatOffset {
                    left: row_start(table_width, slot.count) + step(slot.slot),
                    top: table_height + EDGE_OFFSET - SEAT_RADIUS,
                },
                Side::Right => SeatOffset {
                    left: table_width + EDGE_OFFSET - SEAT_RADIUS,
                    top: row_start(table_height, slot.count) + step(slot.slot),
                },
                Side::Left => SeatOffset {
                    left: -EDGE_OFFSET - SEAT_RADIUS,
                    top: row_start(table_height, slot.count) + step(slot.slot),
                },
            }
        }
    };

    Some(offset)
}

/// Offsets for every seat of a table, in seat order
pub fn seat_positions(
    table_type: TableType,
    num_seats: i32,
    table_width: f64,
    table_height: f64,
) -> Vec<SeatOffset> {
    let total = table_type.clamp_seat_count(num_seats);
    (0..total)
        .filter_map(|i| position(i, total, table_type, table_width, table_height))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::dimensions::dimensions;

    const ALL_TYPES: [TableType; 5] = [
        TableType::Rectangular,
        TableType::Square,
        TableType::Circular,
        TableType::RectangularOneSided,
        TableType::CircularSingleSeat,
    ];

    fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
        ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
    }

    #[test]
    fn test_no_overlap_with_computed_dimensions() {
        for table_type in ALL_TYPES {
            for n in 0..=48 {
                let dims = dimensions(table_type, n);
                let seats = seat_positions(table_type, n, dims.width, dims.height);
                for (i, a) in seats.iter().enumerate() {
                    for b in &seats[i + 1..] {
                        let d = distance(a.center(), b.center());
                        assert!(
                            d >= SEAT_DIAMETER - 1e-6,
                            "{table_type} n={n}: seats {d:.2}px apart"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_defined_for_every_index() {
        for table_type in ALL_TYPES {
            for n in 0..=24 {
                let dims = dimensions(table_type, n);
                let expected = table_type.clamp_seat_count(n);
                for i in 0..expected {
                    assert!(position(i, n, table_type, dims.width, dims.height).is_some());
                }
                assert!(position(expected, n, table_type, dims.width, dims.height).is_none());
                assert!(position(-1, n, table_type, dims.width, dims.height).is_none());
            }
        }
    }

    #[test]
    fn test_single_seat_is_centered_inside() {
        let seat = position(0, 1, TableType::CircularSingleSeat, 100.0, 100.0).unwrap();
        assert_eq!(seat, SeatOffset { left: 35.0, top: 35.0 });
        assert_eq!(seat.center(), (50.0, 50.0));
    }

    #[test]
    fn test_circular_first_seat_on_the_right() {
        // angle 0 points along +x, radius = 75 + 15
        let seat = position(0, 4, TableType::Circular, 150.0, 150.0).unwrap();
        let (cx, cy) = seat.center();
        assert!((cx - 165.0).abs() < 1e-9);
        assert!((cy - 75.0).abs() < 1e-9);

        let opposite = position(2, 4, TableType::Circular, 150.0, 150.0).unwrap();
        let (ox, oy) = opposite.center();
        assert!((ox + 15.0).abs() < 1e-9);
        assert!((oy - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_one_sided_seats_on_top_edge() {
        let dims = dimensions(TableType::RectangularOneSided, 3);
        let seats = seat_positions(TableType::RectangularOneSided, 3, dims.width, dims.height);
        assert_eq!(seats.len(), 3);
        for seat in &seats {
            assert_eq!(seat.top, -30.0);
        }
        // group of 120px centered on a 200px table
        assert_eq!(seats[0].left, 40.0);
        assert_eq!(seats[1].left, 85.0);
        assert_eq!(seats[2].left, 130.0);
    }

    #[test]
    fn test_rectangular_eight_sides() {
        let seats = seat_positions(TableType::Rectangular, 8, 180.0, 90.0);
        // top: 0..3
        for seat in &seats[0..3] {
            assert_eq!(seat.top, -30.0);
        }
        // right: 3
        assert_eq!(seats[3], SeatOffset { left: 180.0, top: 30.0 });
        // bottom: 4..7
        for seat in &seats[4..7] {
            assert_eq!(seat.top, 90.0);
        }
        // left: 7
        assert_eq!(seats[7], SeatOffset { left: -30.0, top: 30.0 });
    }

    #[test]
    fn test_seats_outside_table_except_single() {
        for table_type in ALL_TYPES {
            if table_type.is_single_seat() {
                continue;
            }
            let dims = dimensions(table_type, 9);
            for seat in seat_positions(table_type, 9, dims.width, dims.height) {
                let (x, y) = seat.center();
                let inside = if table_type == TableType::Circular {
                    let center = (dims.width / 2.0, dims.height / 2.0);
                    distance((x, y), center) < dims.width / 2.0
                } else {
                    x > 0.0 && x < dims.width && y > 0.0 && y < dims.height
                };
                assert!(!inside, "{table_type}: seat center ({x}, {y}) inside table");
            }
        }
    }
}
