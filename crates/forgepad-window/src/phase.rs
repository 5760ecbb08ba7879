//! Window state machine
//!
//! ```text
//! Uninitialized
//!   ↓ host ready
//! Splash
//!   ↓ splash delay elapsed (once)
//! Transitioning
//!   ↓ resized + routed
//! Main
//!   ↓ closed
//! Closed
//! ```
//! Any live phase may jump to `Closed`. A closed window is gone for good; a
//! new one starts again at `Splash`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowPhase {
    Uninitialized,
    Splash,
    Transitioning,
    Main,
    Closed,
}

impl WindowPhase {
    pub fn can_transition_to(&self, target: WindowPhase) -> bool {
        match (self, target) {
            (WindowPhase::Uninitialized, WindowPhase::Splash) => true,
            (WindowPhase::Closed, WindowPhase::Splash) => true,
            (WindowPhase::Splash, WindowPhase::Transitioning) => true,
            (WindowPhase::Transitioning, WindowPhase::Main) => true,
            (WindowPhase::Splash | WindowPhase::Transitioning | WindowPhase::Main, WindowPhase::Closed) => {
                true
            }
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowPhase::Uninitialized => "uninitialized",
            WindowPhase::Splash => "splash",
            WindowPhase::Transitioning => "transitioning",
            WindowPhase::Main => "main",
            WindowPhase::Closed => "closed",
        }
    }
}

impl std::fmt::Display for WindowPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(WindowPhase::Uninitialized.can_transition_to(WindowPhase::Splash));
        assert!(WindowPhase::Splash.can_transition_to(WindowPhase::Transitioning));
        assert!(WindowPhase::Transitioning.can_transition_to(WindowPhase::Main));
        assert!(WindowPhase::Main.can_transition_to(WindowPhase::Closed));
        // Closed before the transition fired
        assert!(WindowPhase::Splash.can_transition_to(WindowPhase::Closed));
        // Reactivation opens a fresh splash
        assert!(WindowPhase::Closed.can_transition_to(WindowPhase::Splash));
    }

    #[test]
    fn test_invalid_transitions() {
        // The transition is one-way
        assert!(!WindowPhase::Main.can_transition_to(WindowPhase::Splash));
        assert!(!WindowPhase::Main.can_transition_to(WindowPhase::Transitioning));
        assert!(!WindowPhase::Splash.can_transition_to(WindowPhase::Main));
        assert!(!WindowPhase::Closed.can_transition_to(WindowPhase::Main));
        assert!(!WindowPhase::Uninitialized.can_transition_to(WindowPhase::Closed));
    }
}
