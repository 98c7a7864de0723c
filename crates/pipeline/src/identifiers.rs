//! Newtype domain identifiers.
//!
//! Every domain concept that has an identity is represented as a distinct newtype
//! wrapping a primitive, so a model name can never be passed where a run
//! identifier or a stage is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is blank.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.trim().is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single pipeline run (one call to `generate`).
///
/// Generated fresh for every run; recorded on the run's span and result so all
/// activity from a single run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PipelineRunId(Uuid);

impl PipelineRunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a [`PipelineRunId`] from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for PipelineRunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers: String-backed (configuration names)
// ---------------------------------------------------------------------------

string_id! {
    /// Identifies a generative model as named by the model service
    /// (e.g. `"gemini-2.5-flash"`).
    ModelId
}

impl ModelId {
    /// Wraps one of the built-in, known non-empty model names.
    pub(crate) fn builtin(name: &'static str) -> Self {
        Self(name.to_string())
    }
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// One of the three pipeline stages.
///
/// Stages double as message-log addresses: a stage reads the latest message
/// addressed to it and addresses its own output to [`StageId::next`].
/// Ordering follows execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    /// Gathers information about the topic.
    Researcher,
    /// Drafts an article from the research notes.
    Writer,
    /// Polishes the draft into the final text.
    Editor,
}

impl StageId {
    /// All stages in execution order.
    pub const ALL: [StageId; 3] = [StageId::Researcher, StageId::Writer, StageId::Editor];

    /// Returns the machine-readable stage name.
    pub fn as_str(self) -> &'static str {
        match self {
            StageId::Researcher => "researcher",
            StageId::Writer => "writer",
            StageId::Editor => "editor",
        }
    }

    /// Returns the operator-facing agent name.
    pub fn agent_name(self) -> &'static str {
        match self {
            StageId::Researcher => "Research Agent",
            StageId::Writer => "Writer Agent",
            StageId::Editor => "Editor Agent",
        }
    }

    /// Returns the agent's role description.
    pub fn role(self) -> &'static str {
        match self {
            StageId::Researcher => "Information gathering expert",
            StageId::Writer => "Creative and technical writing expert",
            StageId::Editor => "Style and grammar compliance expert",
        }
    }

    /// Returns the activity noun used in failure descriptions
    /// (`"Error during <activity>: ..."`).
    pub fn activity(self) -> &'static str {
        match self {
            StageId::Researcher => "research",
            StageId::Writer => "drafting",
            StageId::Editor => "editing",
        }
    }

    /// Returns the stage that consumes this stage's output, if any.
    pub fn next(self) -> Option<StageId> {
        match self {
            StageId::Researcher => Some(StageId::Writer),
            StageId::Writer => Some(StageId::Editor),
            StageId::Editor => None,
        }
    }
}

impl std::fmt::Display for StageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_id_rejects_blank_names() {
        assert!(ModelId::new("").is_none());
        assert!(ModelId::new("   ").is_none());
        assert_eq!(ModelId::new("gemini-2.5-pro").unwrap().as_str(), "gemini-2.5-pro");
    }

    #[test]
    fn stages_chain_researcher_to_editor() {
        assert_eq!(StageId::Researcher.next(), Some(StageId::Writer));
        assert_eq!(StageId::Writer.next(), Some(StageId::Editor));
        assert_eq!(StageId::Editor.next(), None);
    }

    #[test]
    fn stage_order_matches_chain() {
        let chained: Vec<StageId> =
            std::iter::successors(Some(StageId::Researcher), |s| s.next()).collect();
        assert_eq!(chained, StageId::ALL.to_vec());
    }

    #[test]
    fn run_ids_are_unique() {
        assert_ne!(PipelineRunId::new_random(), PipelineRunId::new_random());
    }
}
