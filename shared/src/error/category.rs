//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 7xxx: Seating errors
/// - 8xxx: Guest errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Seating errors (7xxx)
    Seating,
    /// Guest errors (8xxx)
    Guest,
    /// System errors (9xxx, and any unassigned range)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            7000..8000 => Self::Seating,
            8000..9000 => Self::Guest,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Seating => "seating",
            Self::Guest => "guest",
            Self::System => "system",
        }
    }

    /// Rejections the user can fix by choosing differently
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Seating | Self::Guest)
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(7003), ErrorCategory::Seating);
        assert_eq!(ErrorCategory::from_code(8002), ErrorCategory::Guest);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(4000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::SeatOccupied.category(), ErrorCategory::Seating);
        assert_eq!(ErrorCode::GuestNotFound.category(), ErrorCategory::Guest);
        assert_eq!(ErrorCode::PersistenceFailed.category(), ErrorCategory::System);
        assert!(ErrorCode::SeatOccupied.category().is_user_facing());
        assert!(!ErrorCode::NetworkError.category().is_user_facing());
    }
}
