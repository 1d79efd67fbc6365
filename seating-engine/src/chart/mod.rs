//! SeatingChart - occupancy state machine
//!
//! Owns the working set of one event (table nodes and guests) and enforces:
//! - a seat holds at most one guest
//! - a guest holds at most one seat across the whole event
//! - `guest.is_assigned` is true exactly when some seat references the guest
//!
//! Every accepted operation records the touched entities with the
//! [`ChangeTracker`]; every rejected operation leaves the chart untouched.
//!
//! # Seat States
//!
//! ```text
//!   Empty ──assign──▶ Occupied(guest)
//!     ▲                    │
//!     └─────unassign───────┘   (also: transfer, delete_table, edit_table
//!                               shrinking, remove_guest)
//! ```

mod error;

pub use error::*;

use shared::models::{Guest, Position, Seat, TableNode};
use shared::sync::ChangeAction;
use std::collections::HashSet;

use crate::layout::{SeatOffset, dimensions, seat_layout};
use crate::tracking::ChangeTracker;

/// Result of assign / unassign
#[derive(Debug, Clone, PartialEq)]
pub struct SeatChange {
    pub table: TableNode,
    /// `None` when the occupant is not in the working set
    pub guest: Option<Guest>,
}

/// Result of moving a guest between seats
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub source: TableNode,
    pub destination: TableNode,
    pub guest: Option<Guest>,
}

/// A table removed from the chart, with the guests it released
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedTable {
    pub table: TableNode,
    pub released: Vec<Guest>,
}

/// A table after a label / seat-count edit
#[derive(Debug, Clone, PartialEq)]
pub struct TableEdit {
    pub table: TableNode,
    /// Guests who sat on seats that no longer exist
    pub released: Vec<Guest>,
}

/// A guest removed from the chart
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedGuest {
    pub guest: Guest,
    /// The table whose seat the guest vacated
    pub vacated: Option<TableNode>,
}

/// Working set and occupancy rules for one event
#[derive(Debug)]
pub struct SeatingChart {
    event_id: String,
    tables: Vec<TableNode>,
    guests: Vec<Guest>,
    tracker: ChangeTracker,
}

impl SeatingChart {
    /// Build the chart from persisted data
    ///
    /// Loaded data that breaks an occupancy invariant is repaired and the
    /// repaired entities are queued for saving.
    pub fn new(
        event_id: impl Into<String>,
        tables: Vec<TableNode>,
        guests: Vec<Guest>,
        tracker: ChangeTracker,
    ) -> Self {
        let mut chart = Self {
            event_id: event_id.into(),
            tables,
            guests,
            tracker,
        };
        chart.reconcile();
        chart
    }

    // ========== Queries ==========

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    pub fn tables(&self) -> &[TableNode] {
        &self.tables
    }

    pub fn table(&self, table_id: &str) -> Option<&TableNode> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    pub fn guest(&self, guest_id: &str) -> Option<&Guest> {
        self.guests.iter().find(|g| g.id == guest_id)
    }

    pub fn unassigned_guests(&self) -> impl Iterator<Item = &Guest> {
        self.guests.iter().filter(|g| !g.is_assigned)
    }

    /// Table and seat currently held by `guest_id`
    pub fn seat_of(&self, guest_id: &str) -> Option<(&TableNode, &Seat)> {
        self.tables
            .iter()
            .find_map(|t| t.seat_of(guest_id).map(|s| (t, s)))
    }

    /// Seat offsets for drawing `table_id`
    pub fn seat_layout(&self, table_id: &str) -> ChartResult<Vec<(String, SeatOffset)>> {
        let table = self
            .table(table_id)
            .ok_or_else(|| ChartError::TableNotFound(table_id.to_string()))?;
        Ok(seat_layout(table))
    }

    // ========== Operations ==========

    /// Seat `guest_id` on an empty seat
    pub fn assign(
        &mut self,
        table_id: &str,
        seat_id: &str,
        guest_id: &str,
        guest_name: &str,
    ) -> ChartResult<SeatChange> {
        let t = self.table_index(table_id)?;
        let seat = Self::find_seat(&self.tables[t], seat_id)?;
        if let Some(occupant) = &seat.occupied_by {
            return Err(ChartError::SeatOccupied {
                table_id: table_id.to_string(),
                seat_id: seat_id.to_string(),
                occupied_by: occupant.clone(),
                occupant_name: seat.occupied_by_name.clone().unwrap_or_default(),
            });
        }
        let g = self
            .guest_index(guest_id)
            .ok_or_else(|| ChartError::GuestNotFound(guest_id.to_string()))?;
        if let Some((held_table, held_seat)) = self.seat_of(guest_id) {
            return Err(ChartError::GuestAlreadySeated {
                guest_id: guest_id.to_string(),
                table_id: held_table.id.clone(),
                seat_id: held_seat.id.clone(),
            });
        }

        if let Some(seat) = self.tables[t].seat_mut(seat_id) {
            seat.occupy(guest_id, guest_name);
        }
        self.guests[g].is_assigned = true;

        let table = self.tables[t].clone();
        let guest = self.guests[g].clone();
        self.tracker.track_node(ChangeAction::Updated, &table);
        self.tracker.track_guest(ChangeAction::Updated, &guest);

        tracing::debug!(table_id, seat_id, guest_id, "Guest assigned");
        Ok(SeatChange {
            table,
            guest: Some(guest),
        })
    }

    /// Free a seat held by `guest_id`
    pub fn unassign(
        &mut self,
        table_id: &str,
        seat_id: &str,
        guest_id: &str,
    ) -> ChartResult<SeatChange> {
        let t = self.table_index(table_id)?;
        let seat = Self::find_seat(&self.tables[t], seat_id)?;
        if !seat.is_occupied_by(guest_id) {
            return Err(ChartError::OccupantMismatch {
                table_id: table_id.to_string(),
                seat_id: seat_id.to_string(),
                guest_id: guest_id.to_string(),
            });
        }

        if let Some(seat) = self.tables[t].seat_mut(seat_id) {
            seat.vacate();
        }
        let table = self.tables[t].clone();
        self.tracker.track_node(ChangeAction::Updated, &table);
        let guest = self.release_guest(guest_id);

        tracing::debug!(table_id, seat_id, guest_id, "Guest unassigned");
        Ok(SeatChange { table, guest })
    }

    /// Move a seated guest to another seat, possibly on another table
    ///
    /// The destination is checked before the source is vacated, so a
    /// rejected transfer leaves the guest where they were.
    pub fn transfer(
        &mut self,
        from_table: &str,
        from_seat: &str,
        to_table: &str,
        to_seat: &str,
        guest_id: &str,
    ) -> ChartResult<Transfer> {
        let src = self.table_index(from_table)?;
        let source_seat = Self::find_seat(&self.tables[src], from_seat)?;
        if !source_seat.is_occupied_by(guest_id) {
            return Err(ChartError::OccupantMismatch {
                table_id: from_table.to_string(),
                seat_id: from_seat.to_string(),
                guest_id: guest_id.to_string(),
            });
        }
        let display_name = source_seat
            .occupied_by_name
            .clone()
            .or_else(|| self.guest(guest_id).map(|g| g.name.clone()))
            .unwrap_or_default();

        let dst = self.table_index(to_table)?;
        let target_seat = Self::find_seat(&self.tables[dst], to_seat)?;
        if let Some(occupant) = &target_seat.occupied_by {
            return Err(ChartError::SeatOccupied {
                table_id: to_table.to_string(),
                seat_id: to_seat.to_string(),
                occupied_by: occupant.clone(),
                occupant_name: target_seat.occupied_by_name.clone().unwrap_or_default(),
            });
        }

        if let Some(seat) = self.tables[src].seat_mut(from_seat) {
            seat.vacate();
        }
        if let Some(seat) = self.tables[dst].seat_mut(to_seat) {
            seat.occupy(guest_id, display_name);
        }

        let source = self.tables[src].clone();
        let destination = self.tables[dst].clone();
        self.tracker.track_node(ChangeAction::Updated, &source);
        if src != dst {
            self.tracker.track_node(ChangeAction::Updated, &destination);
        }

        tracing::debug!(
            from_table,
            from_seat,
            to_table,
            to_seat,
            guest_id,
            "Guest transferred"
        );
        Ok(Transfer {
            source,
            destination,
            guest: self.guest(guest_id).cloned(),
        })
    }

    /// Remove a table, releasing every guest seated at it
    pub fn delete_table(&mut self, table_id: &str) -> ChartResult<DeletedTable> {
        let t = self.table_index(table_id)?;

        let occupants: Vec<String> = self.tables[t]
            .seats
            .iter_mut()
            .filter_map(Seat::vacate)
            .collect();
        let released: Vec<Guest> = occupants
            .iter()
            .filter_map(|guest_id| self.release_guest(guest_id))
            .collect();

        let table = self.tables.remove(t);
        self.tracker.track_node(ChangeAction::Deleted, &table);

        tracing::debug!(table_id, released = released.len(), "Table deleted");
        Ok(DeletedTable { table, released })
    }

    /// Relabel a table and change its seat count
    ///
    /// Shrinking drops the trailing seats and releases their guests; growing
    /// appends empty seats. Single-seat tables always keep exactly one seat.
    /// Dimensions are recomputed for the new count.
    pub fn edit_table(
        &mut self,
        table_id: &str,
        label: &str,
        seat_count: i32,
    ) -> ChartResult<TableEdit> {
        let t = self.table_index(table_id)?;
        let table = &mut self.tables[t];
        let new_count = table.table_type.clamp_seat_count(seat_count);
        let target = new_count as usize;

        let mut dropped_occupants = Vec::new();
        if target < table.seats.len() {
            dropped_occupants = table
                .seats
                .split_off(target)
                .into_iter()
                .filter_map(|mut seat| seat.vacate())
                .collect();
        }
        while table.seats.len() < target {
            let mut seat_id = table.seat_id_for(table.seats.len());
            if table.seat(&seat_id).is_some() {
                seat_id = format!("{}-seat-{}", table.id, shared::util::new_id());
            }
            table.seats.push(Seat::empty(seat_id));
        }

        let dims = dimensions(table.table_type, new_count);
        table.label = label.to_string();
        table.num_seats = new_count;
        table.width = dims.width;
        table.height = dims.height;

        let table = table.clone();
        self.tracker.track_node(ChangeAction::Updated, &table);
        let released: Vec<Guest> = dropped_occupants
            .iter()
            .filter_map(|guest_id| self.release_guest(guest_id))
            .collect();

        tracing::debug!(
            table_id,
            seats = new_count,
            released = released.len(),
            "Table edited"
        );
        Ok(TableEdit { table, released })
    }

    /// Move a table on the canvas
    pub fn move_table(&mut self, table_id: &str, position: Position) -> ChartResult<TableNode> {
        let t = self.table_index(table_id)?;
        self.tables[t].position = position;
        let table = self.tables[t].clone();
        self.tracker.track_node(ChangeAction::Updated, &table);
        Ok(table)
    }

    /// Add a table that is already persisted
    pub fn insert_table(&mut self, table: TableNode) {
        match self.tables.iter_mut().find(|t| t.id == table.id) {
            Some(existing) => *existing = table,
            None => self.tables.push(table),
        }
    }

    /// Drop a guest from the working set, vacating their seat first
    pub fn remove_guest(&mut self, guest_id: &str) -> ChartResult<RemovedGuest> {
        let g = self
            .guest_index(guest_id)
            .ok_or_else(|| ChartError::GuestNotFound(guest_id.to_string()))?;

        let mut vacated = None;
        if let Some(table) = self
            .tables
            .iter_mut()
            .find(|t| t.seat_of(guest_id).is_some())
        {
            for seat in table.seats.iter_mut().filter(|s| s.is_occupied_by(guest_id)) {
                seat.vacate();
            }
            self.tracker.track_node(ChangeAction::Updated, table);
            vacated = Some(table.clone());
        }

        let mut guest = self.guests.remove(g);
        guest.is_assigned = false;
        self.tracker.track_guest(ChangeAction::Deleted, &guest);

        tracing::debug!(guest_id, "Guest removed");
        Ok(RemovedGuest { guest, vacated })
    }

    // ========== Internals ==========

    fn table_index(&self, table_id: &str) -> ChartResult<usize> {
        self.tables
            .iter()
            .position(|t| t.id == table_id)
            .ok_or_else(|| ChartError::TableNotFound(table_id.to_string()))
    }

    fn guest_index(&self, guest_id: &str) -> Option<usize> {
        self.guests.iter().position(|g| g.id == guest_id)
    }

    fn find_seat<'a>(table: &'a TableNode, seat_id: &str) -> ChartResult<&'a Seat> {
        table.seat(seat_id).ok_or_else(|| ChartError::SeatNotFound {
            table_id: table.id.clone(),
            seat_id: seat_id.to_string(),
        })
    }

    /// Mark a guest unassigned once no seat references them
    fn release_guest(&mut self, guest_id: &str) -> Option<Guest> {
        if self.seat_of(guest_id).is_some() {
            return self.guest(guest_id).cloned();
        }
        let g = self.guest_index(guest_id)?;
        self.guests[g].is_assigned = false;
        let guest = self.guests[g].clone();
        self.tracker.track_guest(ChangeAction::Updated, &guest);
        Some(guest)
    }

    /// Repair loaded data so the occupancy invariants hold
    fn reconcile(&mut self) {
        let mut seated: HashSet<String> = HashSet::new();
        let mut dirty_tables = Vec::new();

        for table in &mut self.tables {
            let mut repaired = false;

            if table.table_type.is_single_seat() && table.seats.len() != 1 {
                tracing::warn!(
                    table_id = %table.id,
                    seats = table.seats.len(),
                    "Single-seat table has wrong seat count, keeping one seat"
                );
                let keep = table.seats.iter().position(|s| s.is_occupied()).unwrap_or(0);
                let seat = if table.seats.is_empty() {
                    Seat::empty(table.seat_id_for(0))
                } else {
                    table.seats.swap_remove(keep)
                };
                table.seats = vec![seat];
                table.num_seats = 1;
                repaired = true;
            }

            if table.num_seats as usize != table.seats.len() {
                tracing::warn!(
                    table_id = %table.id,
                    num_seats = table.num_seats,
                    seats = table.seats.len(),
                    "Seat count out of sync, using seat list"
                );
                table.num_seats = table.seats.len() as i32;
                repaired = true;
            }

            for seat in &mut table.seats {
                match seat.occupied_by.clone() {
                    Some(guest_id) if !seated.insert(guest_id.clone()) => {
                        tracing::warn!(
                            table_id = %table.id,
                            seat_id = %seat.id,
                            guest_id = %guest_id,
                            "Guest seated twice, vacating duplicate seat"
                        );
                        seat.vacate();
                        repaired = true;
                    }
                    Some(guest_id) if seat.occupied_by_name.is_none() => {
                        let name = self
                            .guests
                            .iter()
                            .find(|g| g.id == guest_id)
                            .map(|g| g.name.clone())
                            .unwrap_or_default();
                        seat.occupied_by_name = Some(name);
                        repaired = true;
                    }
                    None if seat.occupied_by_name.is_some() => {
                        seat.occupied_by_name = None;
                        repaired = true;
                    }
                    _ => {}
                }
            }

            if repaired {
                dirty_tables.push(table.clone());
            }
        }

        let mut dirty_guests = Vec::new();
        for guest in &mut self.guests {
            let is_seated = seated.contains(&guest.id);
            if guest.is_assigned != is_seated {
                tracing::warn!(
                    guest_id = %guest.id,
                    is_assigned = guest.is_assigned,
                    "Guest assignment flag out of sync"
                );
                guest.is_assigned = is_seated;
                dirty_guests.push(guest.clone());
            }
        }

        for table in &dirty_tables {
            self.tracker.track_node(ChangeAction::Updated, table);
        }
        for guest in &dirty_guests {
            self.tracker.track_guest(ChangeAction::Updated, guest);
        }
        if !dirty_tables.is_empty() || !dirty_guests.is_empty() {
            tracing::info!(
                tables = dirty_tables.len(),
                guests = dirty_guests.len(),
                "Repaired loaded seating data"
            );
        }
    }
}
