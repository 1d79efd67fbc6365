use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Rejected seating operations
///
/// A rejection never changes the chart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Seat {seat_id} not found on table {table_id}")]
    SeatNotFound { table_id: String, seat_id: String },

    #[error("Guest not found: {0}")]
    GuestNotFound(String),

    #[error("Seat {seat_id} is already taken by {occupant_name}")]
    SeatOccupied {
        table_id: String,
        seat_id: String,
        occupied_by: String,
        occupant_name: String,
    },

    #[error("Guest {guest_id} already has seat {seat_id}")]
    GuestAlreadySeated {
        guest_id: String,
        table_id: String,
        seat_id: String,
    },

    #[error("Seat {seat_id} is not held by guest {guest_id}")]
    OccupantMismatch {
        table_id: String,
        seat_id: String,
        guest_id: String,
    },
}

pub type ChartResult<T> = Result<T, ChartError>;

impl From<ChartError> for AppError {
    fn from(err: ChartError) -> Self {
        let message = err.to_string();
        match err {
            ChartError::TableNotFound(id) => {
                AppError::with_message(ErrorCode::TableNotFound, message)
                    .with_detail("table_id", id)
            }
            ChartError::SeatNotFound { table_id, seat_id } => {
                AppError::with_message(ErrorCode::SeatNotFound, message)
                    .with_detail("table_id", table_id)
                    .with_detail("seat_id", seat_id)
            }
            ChartError::GuestNotFound(id) => {
                AppError::with_message(ErrorCode::GuestNotFound, message)
                    .with_detail("guest_id", id)
            }
            ChartError::SeatOccupied {
                table_id,
                seat_id,
                occupied_by,
                ..
            } => AppError::with_message(ErrorCode::SeatOccupied, message)
                .with_detail("table_id", table_id)
                .with_detail("seat_id", seat_id)
                .with_detail("occupied_by", occupied_by),
            ChartError::GuestAlreadySeated {
                guest_id,
                table_id,
                seat_id,
            } => AppError::with_message(ErrorCode::GuestAlreadySeated, message)
                .with_detail("guest_id", guest_id)
                .with_detail("table_id", table_id)
                .with_detail("seat_id", seat_id),
            ChartError::OccupantMismatch {
                table_id,
                seat_id,
                guest_id,
            } => AppError::with_message(ErrorCode::SeatOccupantMismatch, message)
                .with_detail("table_id", table_id)
                .with_detail("seat_id", seat_id)
                .with_detail("guest_id", guest_id),
        }
    }
}
