//! Table Node Model

use serde::{Deserialize, Serialize};

/// Table geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableType {
    Rectangular,
    Square,
    Circular,
    /// Long table with seats along the top edge only
    RectangularOneSided,
    /// Single chair, always exactly one seat
    CircularSingleSeat,
}

impl TableType {
    pub fn is_square(&self) -> bool {
        matches!(self, Self::Square)
    }

    pub fn is_single_seat(&self) -> bool {
        matches!(self, Self::CircularSingleSeat)
    }

    /// Seat count this table type actually holds for a requested count
    ///
    /// Single-seat tables are pinned to 1; every other type clamps
    /// negative requests to 0.
    pub fn clamp_seat_count(&self, requested: i32) -> i32 {
        if self.is_single_seat() {
            1
        } else {
            requested.max(0)
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rectangular => "rectangular",
            Self::Square => "square",
            Self::Circular => "circular",
            Self::RectangularOneSided => "rectangular-one-sided",
            Self::CircularSingleSeat => "circular-single-seat",
        }
    }
}

impl std::fmt::Display for TableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canvas position of a table's top-left corner
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single occupiable position attached to a table
///
/// `occupied_by` and `occupied_by_name` are either both set or both empty;
/// use [`Seat::occupy`] and [`Seat::vacate`] rather than writing the fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub id: String,
    pub occupied_by: Option<String>,
    pub occupied_by_name: Option<String>,
}

impl Seat {
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            occupied_by: None,
            occupied_by_name: None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied_by.is_some()
    }

    pub fn is_occupied_by(&self, guest_id: &str) -> bool {
        self.occupied_by.as_deref() == Some(guest_id)
    }

    pub fn occupy(&mut self, guest_id: impl Into<String>, guest_name: impl Into<String>) {
        self.occupied_by = Some(guest_id.into());
        self.occupied_by_name = Some(guest_name.into());
    }

    /// Clear the seat, returning the previous occupant's id
    pub fn vacate(&mut self) -> Option<String> {
        self.occupied_by_name = None;
        self.occupied_by.take()
    }
}

/// Table node entity (a table on the seating chart)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableNode {
    pub id: String,
    pub event_id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub table_type: TableType,
    pub position: Position,
    pub width: f64,
    pub height: f64,
    pub num_seats: i32,
    pub seats: Vec<Seat>,
}

impl TableNode {
    pub fn seat(&self, seat_id: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == seat_id)
    }

    pub fn seat_mut(&mut self, seat_id: &str) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.id == seat_id)
    }

    /// Seat currently held by `guest_id` on this table
    pub fn seat_of(&self, guest_id: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.is_occupied_by(guest_id))
    }

    pub fn occupied_seats(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter().filter(|s| s.is_occupied())
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied_seats().count()
    }

    /// Seat id for the seat at `index` on this table
    pub fn seat_id_for(&self, index: usize) -> String {
        format!("{}-seat-{}", self.id, index + 1)
    }
}

/// Create table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableNodeCreate {
    pub label: String,
    #[serde(rename = "type")]
    pub table_type: TableType,
    pub position: Position,
    pub num_seats: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> TableNode {
        TableNode {
            id: "t1".to_string(),
            event_id: "e1".to_string(),
            label: "Table 1".to_string(),
            table_type: TableType::Circular,
            position: Position::new(10.0, 20.0),
            width: 150.0,
            height: 150.0,
            num_seats: 2,
            seats: vec![Seat::empty("s1"), Seat::empty("s2")],
        }
    }

    #[test]
    fn test_seat_occupy_and_vacate_keep_fields_paired() {
        let mut seat = Seat::empty("s1");
        assert!(!seat.is_occupied());

        seat.occupy("g1", "Alice");
        assert!(seat.is_occupied_by("g1"));
        assert_eq!(seat.occupied_by_name.as_deref(), Some("Alice"));

        assert_eq!(seat.vacate().as_deref(), Some("g1"));
        assert!(seat.occupied_by.is_none());
        assert!(seat.occupied_by_name.is_none());
    }

    #[test]
    fn test_clamp_seat_count() {
        assert_eq!(TableType::CircularSingleSeat.clamp_seat_count(8), 1);
        assert_eq!(TableType::CircularSingleSeat.clamp_seat_count(0), 1);
        assert_eq!(TableType::Rectangular.clamp_seat_count(-3), 0);
        assert_eq!(TableType::Circular.clamp_seat_count(12), 12);
    }

    #[test]
    fn test_seat_lookup() {
        let mut table = node();
        table.seat_mut("s2").unwrap().occupy("g7", "Bob");

        assert_eq!(table.seat_of("g7").unwrap().id, "s2");
        assert!(table.seat_of("g1").is_none());
        assert!(table.seat("missing").is_none());
        assert_eq!(table.occupied_count(), 1);
        assert_eq!(table.seat_id_for(0), "t1-seat-1");
    }

    #[test]
    fn test_table_type_wire_names() {
        let json = serde_json::to_string(&TableType::RectangularOneSided).unwrap();
        assert_eq!(json, "\"rectangular-one-sided\"");

        let parsed: TableType = serde_json::from_str("\"circular-single-seat\"").unwrap();
        assert_eq!(parsed, TableType::CircularSingleSeat);
    }

    #[test]
    fn test_table_node_deserialize() {
        let json = r#"{
            "id": "t9",
            "event_id": "e1",
            "label": "Head table",
            "type": "square",
            "position": {"x": 1.5, "y": 2.0},
            "width": 150.0,
            "height": 150.0,
            "num_seats": 1,
            "seats": [{"id": "t9-seat-1", "occupied_by": null, "occupied_by_name": null}]
        }"#;
        let table: TableNode = serde_json::from_str(json).unwrap();
        assert_eq!(table.table_type, TableType::Square);
        assert_eq!(table.seats.len(), 1);
        assert!(!table.seats[0].is_occupied());
    }
}
