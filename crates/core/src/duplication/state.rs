//! Lifecycle of a duplication run.

use serde::Serialize;

/// `Idle -> Running -> {Committed, RolledBack}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Running,
    Committed,
    RolledBack,
}

impl RunState {
    pub fn can_transition_to(self, next: RunState) -> bool {
        matches!(
            (self, next),
            (RunState::Idle, RunState::Running)
                | (RunState::Running, RunState::Committed)
                | (RunState::Running, RunState::RolledBack)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Committed => "committed",
            RunState::RolledBack => "rolled_back",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transitions_allowed() {
        assert!(RunState::Idle.can_transition_to(RunState::Running));
        assert!(RunState::Running.can_transition_to(RunState::Committed));
        assert!(RunState::Running.can_transition_to(RunState::RolledBack));
    }

    #[test]
    fn terminal_states_are_final() {
        for next in [
            RunState::Idle,
            RunState::Running,
            RunState::Committed,
            RunState::RolledBack,
        ] {
            assert!(!RunState::Committed.can_transition_to(next));
            assert!(!RunState::RolledBack.can_transition_to(next));
        }
    }

    #[test]
    fn idle_cannot_skip_running() {
        assert!(!RunState::Idle.can_transition_to(RunState::Committed));
        assert!(!RunState::Idle.can_transition_to(RunState::RolledBack));
    }
}
