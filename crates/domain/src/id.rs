//! Typed identifier for a single command execution.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one run of a command against the pump.
///
/// Every log line and observer record emitted during a run carries it, so
/// interleaved output from consecutive commands can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandId(uuid::Uuid);

impl Default for CommandId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl CommandId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_unique_ids_when_called_twice() {
        assert_ne!(CommandId::new(), CommandId::new());
    }

    #[test]
    fn should_display_as_hyphenated_uuid() {
        let id = CommandId::new();
        let text = id.to_string();
        assert_eq!(text.len(), 36);
        assert_eq!(text.matches('-').count(), 4);
    }
}
