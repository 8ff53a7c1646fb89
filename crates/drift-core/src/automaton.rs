//! Tower-gating automaton.
//!
//! A small table of named states and `(state, symbol) -> state` transitions.
//! A tower tagged with a state may only damage an enemy whose next pending
//! symbol has a transition out of that state. This is configuration data,
//! not a general automaton runner: nothing here consumes whole words.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::enums::Symbol;

/// A named state and the bonus awarded for kills made by towers in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomatonState {
    pub name: String,
    #[serde(default)]
    pub reward: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from: String,
    pub symbol: Symbol,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Automaton {
    pub states: Vec<AutomatonState>,
    pub transitions: Vec<Transition>,
}

impl Automaton {
    /// `q0 --a--> q1`, `q1 --b--> q0`.
    pub fn two_state() -> Self {
        Self {
            states: vec![
                AutomatonState {
                    name: "q0".into(),
                    reward: 5,
                },
                AutomatonState {
                    name: "q1".into(),
                    reward: 10,
                },
            ],
            transitions: vec![
                Transition {
                    from: "q0".into(),
                    symbol: Symbol::A,
                    to: "q1".into(),
                },
                Transition {
                    from: "q1".into(),
                    symbol: Symbol::B,
                    to: "q0".into(),
                },
            ],
        }
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.states.iter().any(|s| s.name == name)
    }

    /// Declaration order of `name` in `states`.
    pub fn state_index(&self, name: &str) -> Option<usize> {
        self.states.iter().position(|s| s.name == name)
    }

    /// Destination of the transition out of `state` on `symbol`, if any.
    pub fn next_state(&self, state: &str, symbol: Symbol) -> Option<&str> {
        self.transitions
            .iter()
            .find(|t| t.from == state && t.symbol == symbol)
            .map(|t| t.to.as_str())
    }

    /// Attack predicate for gated towers.
    pub fn permits(&self, state: &str, symbol: Symbol) -> bool {
        self.next_state(state, symbol).is_some()
    }

    /// Kill bonus of `state`; unknown states award nothing.
    pub fn reward(&self, state: &str) -> u32 {
        self.states
            .iter()
            .find(|s| s.name == state)
            .map_or(0, |s| s.reward)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.states.is_empty() {
            return Err(ConfigError::Invalid("automaton has no states".into()));
        }
        for (i, state) in self.states.iter().enumerate() {
            if self.states[..i].iter().any(|s| s.name == state.name) {
                return Err(ConfigError::Invalid(format!(
                    "automaton state '{}' declared twice",
                    state.name
                )));
            }
        }
        for t in &self.transitions {
            for name in [&t.from, &t.to] {
                if !self.has_state(name) {
                    return Err(ConfigError::Invalid(format!(
                        "transition references unknown state '{name}'"
                    )));
                }
            }
        }
        for (i, t) in self.transitions.iter().enumerate() {
            let duplicate = self.transitions[..i]
                .iter()
                .any(|o| o.from == t.from && o.symbol == t.symbol);
            if duplicate {
                return Err(ConfigError::Invalid(format!(
                    "state '{}' has two transitions on {:?}",
                    t.from, t.symbol
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_state_permits_only_declared_symbols() {
        let dfa = Automaton::two_state();
        assert!(dfa.permits("q0", Symbol::A));
        assert!(!dfa.permits("q0", Symbol::B));
        assert!(dfa.permits("q1", Symbol::B));
        assert!(!dfa.permits("q1", Symbol::A));
        assert_eq!(dfa.next_state("q0", Symbol::A), Some("q1"));
    }

    #[test]
    fn unknown_state_never_permits() {
        let dfa = Automaton::two_state();
        assert!(!dfa.permits("q7", Symbol::A));
        assert_eq!(dfa.reward("q7"), 0);
        assert_eq!(dfa.reward("q1"), 10);
    }

    #[test]
    fn validate_rejects_dangling_transition() {
        let mut dfa = Automaton::two_state();
        dfa.transitions.push(Transition {
            from: "q1".into(),
            symbol: Symbol::A,
            to: "q9".into(),
        });
        assert!(matches!(dfa.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn validate_rejects_nondeterminism() {
        let mut dfa = Automaton::two_state();
        dfa.transitions.push(Transition {
            from: "q0".into(),
            symbol: Symbol::A,
            to: "q0".into(),
        });
        assert!(dfa.validate().is_err());
        assert!(Automaton::two_state().validate().is_ok());
    }
}
