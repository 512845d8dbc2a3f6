//! Common error infrastructure for otherside-core.
//!
//! Domain-specific errors (`MapError`, `InventoryError`, `TurnError`, ...) are
//! defined in their respective modules alongside the operations they guard.
//! This module holds what they share: the severity classification, the
//! [`GameError`] trait, and the bounded-input [`RangeError`].
//!
//! None of these errors abort a match. Every one of them is surfaced to the
//! caller as a value so the shell can report it and ask again.

use core::ops::RangeInclusive;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same request may succeed later or with other input
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistency
/// - **Fatal**: resource exhaustion; the in-progress step was unwound
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: inventory full, already moved this turn
    Recoverable,

    /// Examples: position out of range, enemy not allowed in a world
    Validation,

    /// Examples: player reference pointing at a removed zone
    Internal,

    /// Examples: allocation failure while building the map
    Fatal,
}

/// Common trait for all otherside-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// A numeric input fell outside the interval the caller allowed.
///
/// The shell re-prompts on this error; it never ends a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("value {value} is out of range ({min}-{max})")]
pub struct RangeError {
    pub value: i64,
    pub min: i64,
    pub max: i64,
}

impl RangeError {
    /// Checks `value` against the inclusive `range`.
    pub fn check(value: i64, range: RangeInclusive<i64>) -> Result<i64, Self> {
        if range.contains(&value) {
            Ok(value)
        } else {
            Err(Self {
                value,
                min: *range.start(),
                max: *range.end(),
            })
        }
    }
}

impl GameError for RangeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "OUT_OF_RANGE"
    }
}
