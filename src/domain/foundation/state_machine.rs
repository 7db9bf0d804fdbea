//! State machine trait for status enums.
//!
//! Provides a consistent interface for validating and performing state
//! transitions. The navigation menu is the main implementor.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// let next = MenuState::Anonymous.transition_to(MenuState::Authenticated)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum SheetStatus {
        Designing,
        Collecting,
        Closed,
    }

    impl StateMachine for SheetStatus {
        fn can_transition_to(&self, target: &Self) -> bool {
            use SheetStatus::*;
            matches!((self, target), (Designing, Collecting) | (Collecting, Closed))
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use SheetStatus::*;
            match self {
                Designing => vec![Collecting],
                Collecting => vec![Closed],
                Closed => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        let result = SheetStatus::Designing.transition_to(SheetStatus::Collecting);
        assert_eq!(result, Ok(SheetStatus::Collecting));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let result = SheetStatus::Designing.transition_to(SheetStatus::Closed);
        assert!(result.is_err());
    }

    #[test]
    fn is_terminal_only_for_states_without_exits() {
        assert!(SheetStatus::Closed.is_terminal());
        assert!(!SheetStatus::Designing.is_terminal());
    }
}
