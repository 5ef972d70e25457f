/// Dialogue node and response types.

use serde::{Deserialize, Serialize};

use super::effect::Effect;

/// Node ids are strings, unique within one character's graph.
pub type NodeId = String;

/// A request dispatched to the scene collaborator when an `Invoke` response
/// is chosen. The session knows nothing about what the host does with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    LoadScene(String),
    Custom(String),
}

/// What selecting a response does. A single tagged variant rather than two
/// optional fields, so session dispatch is an exhaustive match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResponseKind {
    /// Apply the effect (if any), then follow `next` within the same
    /// character's graph. An absent or unresolvable `next` ends the session.
    Navigate {
        next: Option<NodeId>,
        effect: Option<Effect>,
    },
    /// Fire the action at the scene collaborator and end the session.
    /// No navigation, no state mutation.
    Invoke { action: Action },
}

/// A selectable option presented at a node. Presented to the player indexed
/// from 1; selected by zero-based index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub text: String,
    pub kind: ResponseKind,
}

/// One unit of conversation: display text plus its follow-ups.
///
/// Placeholder interpolation in `text` is the caller's job; the node stores
/// it verbatim. A node with zero responses is implicitly terminal and is
/// presented with a generic continue affordance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueNode {
    pub id: NodeId,
    pub speaker: String,
    pub text: String,
    pub responses: Vec<Response>,
    /// Applied once, when the node is entered.
    pub effect: Option<Effect>,
}

impl DialogueNode {
    pub fn is_terminal(&self) -> bool {
        self.responses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_when_no_responses() {
        let node = DialogueNode {
            id: "goodnight".to_string(),
            speaker: "Mara".to_string(),
            text: "Stay until I fall asleep?".to_string(),
            responses: Vec::new(),
            effect: None,
        };
        assert!(node.is_terminal());
    }

    #[test]
    fn not_terminal_with_responses() {
        let node = DialogueNode {
            id: "entry".to_string(),
            speaker: "Mara".to_string(),
            text: "You're still here.".to_string(),
            responses: vec![Response {
                text: "Always.".to_string(),
                kind: ResponseKind::Navigate {
                    next: None,
                    effect: None,
                },
            }],
            effect: None,
        };
        assert!(!node.is_terminal());
    }
}
