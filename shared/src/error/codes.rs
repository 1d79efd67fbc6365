//! Unified error codes for the seating workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 7xxx: Seating errors
//! - 8xxx: Guest errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with the web frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Session has expired
    SessionExpired = 1005,
    /// Permission denied
    PermissionDenied = 1101,

    // ==================== 7xxx: Seating ====================
    /// Table not found
    TableNotFound = 7001,
    /// Seat not found on table
    SeatNotFound = 7002,
    /// Seat is already occupied
    SeatOccupied = 7003,
    /// Seat is held by a different guest
    SeatOccupantMismatch = 7004,

    // ==================== 8xxx: Guest ====================
    /// Guest not found
    GuestNotFound = 8001,
    /// Guest already holds a seat
    GuestAlreadySeated = 8002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Persistence collaborator rejected or failed a write
    PersistenceFailed = 9002,
    /// Network error talking to the backend
    NetworkError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",

            // Auth
            Self::NotAuthenticated => "Authentication required",
            Self::SessionExpired => "Session has expired",
            Self::PermissionDenied => "Permission denied",

            // Seating
            Self::TableNotFound => "Table not found",
            Self::SeatNotFound => "Seat not found",
            Self::SeatOccupied => "Seat is already occupied",
            Self::SeatOccupantMismatch => "Seat is held by a different guest",

            // Guest
            Self::GuestNotFound => "Guest not found",
            Self::GuestAlreadySeated => "Guest already has a seat",

            // System
            Self::InternalError => "Internal server error",
            Self::PersistenceFailed => "Failed to save changes",
            Self::NetworkError => "Network error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1005 => Ok(ErrorCode::SessionExpired),
            1101 => Ok(ErrorCode::PermissionDenied),

            // Seating
            7001 => Ok(ErrorCode::TableNotFound),
            7002 => Ok(ErrorCode::SeatNotFound),
            7003 => Ok(ErrorCode::SeatOccupied),
            7004 => Ok(ErrorCode::SeatOccupantMismatch),

            // Guest
            8001 => Ok(ErrorCode::GuestNotFound),
            8002 => Ok(ErrorCode::GuestAlreadySeated),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::PersistenceFailed),
            9003 => Ok(ErrorCode::NetworkError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::SeatOccupied.code(), 7003);
        assert_eq!(ErrorCode::GuestAlreadySeated.code(), 8002);
        assert_eq!(ErrorCode::PersistenceFailed.code(), 9002);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::SeatOccupied.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(7001), Ok(ErrorCode::TableNotFound));
        assert_eq!(ErrorCode::try_from(8001), Ok(ErrorCode::GuestNotFound));
        assert_eq!(ErrorCode::try_from(9003), Ok(ErrorCode::NetworkError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(7999), Err(InvalidErrorCode(7999)));
        assert_eq!(format!("{}", InvalidErrorCode(999)), "invalid error code: 999");
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::SeatOccupantMismatch).unwrap();
        assert_eq!(json, "7004");

        let code: ErrorCode = serde_json::from_str("8002").unwrap();
        assert_eq!(code, ErrorCode::GuestAlreadySeated);

        assert!(serde_json::from_str::<ErrorCode>("4242").is_err());
    }
}
