//! Common error infrastructure for skirmish-core.
//!
//! Domain errors (`BattlegroundError`, `EncounterError`, `DiceParseError`) live
//! beside the code that raises them. They share the classification defined
//! here so callers can tell bad input from a broken setup.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not retry without changes.
    ///
    /// Examples: malformed dice notation, empty roster
    Validation,

    /// The encounter cannot be set up or continued.
    ///
    /// Examples: dangling node reference, unknown starting node
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the input itself was at fault and can be corrected.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation)
    }
}

/// Common trait for all skirmish-core errors.
///
/// Implementors derive `thiserror::Error` for `Display`/`Error` and classify
/// themselves here.
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_correctable() {
        assert!(ErrorSeverity::Validation.is_validation());
        assert!(!ErrorSeverity::Fatal.is_validation());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
        assert_eq!(ErrorSeverity::Fatal.as_str(), "fatal");
    }
}
