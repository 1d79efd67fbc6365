//! Seating-chart geometry
//!
//! Pure functions, no state:
//! - [`distribute`]: seats per side for rectangular and square tables
//! - [`dimensions`]: minimum table size for a shape and seat count
//! - [`position`]: where a seat sits relative to its table
//!
//! All measurements are canvas pixels.

mod dimensions;
mod distribution;
mod position;

pub use dimensions::{TableDimensions, dimensions};
pub use distribution::{Side, SideDistribution, SideSlot, distribute};
pub use position::{SeatOffset, position, seat_positions};

use shared::models::{Position, Seat, TableNode, TableType};

/// Seat diameter
pub const SEAT_DIAMETER: f64 = 30.0;
pub const SEAT_RADIUS: f64 = SEAT_DIAMETER / 2.0;
/// Gap between neighbouring seats
pub const SEAT_SPACING: f64 = 15.0;
/// Padding added to each table side beyond its row of seats
pub const TABLE_PADDING: f64 = 60.0;
/// Distance from the table edge to a seat's center
pub const EDGE_OFFSET: f64 = 15.0;

/// Build a new table with empty seats and dimensions sized for them
pub fn new_table_node(
    event_id: impl Into<String>,
    label: impl Into<String>,
    table_type: TableType,
    at: Position,
    requested_seats: i32,
) -> TableNode {
    let num_seats = table_type.clamp_seat_count(requested_seats);
    let dims = dimensions(table_type, num_seats);
    let mut node = TableNode {
        id: shared::util::new_id(),
        event_id: event_id.into(),
        label: label.into(),
        table_type,
        position: at,
        width: dims.width,
        height: dims.height,
        num_seats,
        seats: Vec::with_capacity(num_seats as usize),
    };
    node.seats = (0..num_seats as usize)
        .map(|i| Seat::empty(node.seat_id_for(i)))
        .collect();
    node
}

/// Seat ids of a table paired with their offsets
pub fn seat_layout(node: &TableNode) -> Vec<(String, SeatOffset)> {
    let offsets = seat_positions(
        node.table_type,
        node.seats.len() as i32,
        node.width,
        node.height,
    );
    node.seats
        .iter()
        .zip(offsets)
        .map(|(seat, offset)| (seat.id.clone(), offset))
        .collect()
}
