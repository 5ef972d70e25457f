/// Dialogue script runtime — graphs, RON loading, normalization, and linting.

use rustc_hash::{FxHashMap, FxHashSet};
use std::path::Path;
use thiserror::Error;

use super::effect::Effect;
use super::node::{Action, DialogueNode, NodeId, Response, ResponseKind};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("node '{node}' declares both 'responses' and 'choices'")]
    BothResponseKeys { node: String },
    #[error("response {index} of node '{node}' mixes 'action' with 'next'/'effect'")]
    AmbiguousResponse { node: String, index: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// One character's dialogue tree, keyed by node id.
#[derive(Debug, Clone)]
pub struct DialogueGraph {
    pub character: String,
    nodes: FxHashMap<NodeId, DialogueNode>,
}

impl DialogueGraph {
    pub fn new(character: &str) -> Self {
        Self {
            character: character.to_string(),
            nodes: FxHashMap::default(),
        }
    }

    /// Insert a node, replacing any previous node with the same id.
    pub fn insert(&mut self, node: DialogueNode) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub fn get(&self, id: &str) -> Option<&DialogueNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &DialogueNode> {
        self.nodes.values()
    }

    /// Parse one character's node map from a RON string.
    pub fn parse_ron(character: &str, input: &str) -> Result<DialogueGraph, ScriptError> {
        let raw: FxHashMap<String, RonNode> = ron_options().from_str(input)?;
        build_graph(character, raw)
    }

    /// Load one character's node map from a RON file.
    pub fn load_from_ron(character: &str, path: &Path) -> Result<DialogueGraph, ScriptError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(character, &contents)
    }
}

/// All loaded dialogue, keyed by character name. The unit the session
/// resolves `next` ids against.
#[derive(Debug, Clone, Default)]
pub struct ScriptSet {
    graphs: FxHashMap<String, DialogueGraph>,
}

impl ScriptSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, graph: DialogueGraph) {
        self.graphs.insert(graph.character.clone(), graph);
    }

    pub fn graph(&self, character: &str) -> Option<&DialogueGraph> {
        self.graphs.get(character)
    }

    pub fn characters(&self) -> impl Iterator<Item = &str> {
        self.graphs.keys().map(|k| k.as_str())
    }

    /// Parse a whole-script file: a map from character name to node map.
    pub fn parse_ron(input: &str) -> Result<ScriptSet, ScriptError> {
        let raw: FxHashMap<String, FxHashMap<String, RonNode>> = ron_options().from_str(input)?;
        let mut set = ScriptSet::default();
        for (character, nodes) in raw {
            set.insert(build_graph(&character, nodes)?);
        }
        Ok(set)
    }

    pub fn load_from_ron(path: &Path) -> Result<ScriptSet, ScriptError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Merge another set into this one. Same-character graphs merge at the
    /// node level, nodes from `other` overriding nodes with the same id.
    pub fn merge(&mut self, other: ScriptSet) {
        for (character, graph) in other.graphs {
            match self.graphs.get_mut(&character) {
                Some(existing) => {
                    for node in graph.nodes.into_values() {
                        existing.insert(node);
                    }
                }
                None => {
                    self.graphs.insert(character, graph);
                }
            }
        }
    }

    /// Authoring sanity warnings. An unresolved `next` is deliberately not a
    /// load error (at runtime it just ends the session), but authors almost
    /// always want to know.
    pub fn lint(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for graph in self.graphs.values() {
            for node in graph.nodes() {
                if node.text.trim().is_empty() {
                    warnings.push(format!(
                        "{}: node '{}' has empty text",
                        graph.character, node.id
                    ));
                }
                for (i, response) in node.responses.iter().enumerate() {
                    if response.text.trim().is_empty() {
                        warnings.push(format!(
                            "{}: node '{}' response {} has empty text",
                            graph.character, node.id, i
                        ));
                    }
                    if let ResponseKind::Navigate {
                        next: Some(ref next),
                        ..
                    } = response.kind
                    {
                        if !graph.contains(next) {
                            warnings.push(format!(
                                "{}: node '{}' response {} points at missing node '{}'",
                                graph.character, node.id, i, next
                            ));
                        }
                    }
                }
            }
        }
        warnings
    }
}

/// The authoring format writes optional fields flat (`next: "id"`), which
/// RON only accepts with the `implicit_some` extension enabled.
fn ron_options() -> ron::Options {
    ron::Options::default()
        .with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

// RON deserialization helpers — the authoring format accepts the legacy
// 'choices' key and flat optional response fields, both normalized here so
// the runtime never branches on them.

#[derive(Debug, serde::Deserialize)]
#[serde(rename = "Node")]
struct RonNode {
    speaker: String,
    text: String,
    #[serde(default)]
    responses: Option<Vec<RonResponse>>,
    #[serde(default)]
    choices: Option<Vec<RonResponse>>,
    #[serde(default)]
    effect: Option<Effect>,
}

#[derive(Debug, serde::Deserialize)]
struct RonResponse {
    text: String,
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    effect: Option<Effect>,
    #[serde(default)]
    action: Option<Action>,
}

fn build_graph(
    character: &str,
    raw: FxHashMap<String, RonNode>,
) -> Result<DialogueGraph, ScriptError> {
    let mut graph = DialogueGraph::new(character);
    for (id, ron_node) in raw {
        let descriptors = match (ron_node.responses, ron_node.choices) {
            (Some(_), Some(_)) => {
                return Err(ScriptError::BothResponseKeys { node: id });
            }
            (Some(list), None) | (None, Some(list)) => list,
            (None, None) => Vec::new(),
        };

        let mut responses = Vec::with_capacity(descriptors.len());
        for (index, descriptor) in descriptors.into_iter().enumerate() {
            let kind = match descriptor.action {
                Some(action) => {
                    if descriptor.next.is_some() || descriptor.effect.is_some() {
                        return Err(ScriptError::AmbiguousResponse { node: id, index });
                    }
                    ResponseKind::Invoke { action }
                }
                None => ResponseKind::Navigate {
                    next: descriptor.next,
                    effect: descriptor.effect,
                },
            };
            responses.push(Response {
                text: descriptor.text,
                kind,
            });
        }

        graph.insert(DialogueNode {
            id,
            speaker: ron_node.speaker,
            text: ron_node.text,
            responses,
            effect: ron_node.effect,
        });
    }
    Ok(graph)
}

/// Node ids reachable from `entry` by following `next` pointers.
/// Used by the script linter to flag orphaned nodes.
pub fn reachable_from(graph: &DialogueGraph, entry: &str) -> FxHashSet<NodeId> {
    let mut seen = FxHashSet::default();
    let mut stack = vec![entry.to_string()];
    while let Some(id) = stack.pop() {
        if !seen.insert(id.clone()) {
            continue;
        }
        if let Some(node) = graph.get(&id) {
            for response in &node.responses {
                if let ResponseKind::Navigate {
                    next: Some(ref next),
                    ..
                } = response.kind
                {
                    if !seen.contains(next) {
                        stack.push(next.clone());
                    }
                }
            }
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARA_RON: &str = r#"{
        "entry": Node(
            speaker: "Mara",
            text: "You're still here.",
            responses: [
                (text: "Always.", next: "always", effect: Relationship(character: "mara", delta: 3)),
                (text: "Drink something first.", next: "water", effect: UseItem(item: "water")),
                (text: "I should go.", ),
            ],
        ),
        "always": Node(
            speaker: "Mara",
            text: "Liar. But a kind one.",
        ),
        "water": Node(
            speaker: "Mara",
            text: "It tastes like metal again.",
            effect: Condition(meter: stability, delta: 2),
        ),
    }"#;

    #[test]
    fn parse_graph_with_responses() {
        let graph = DialogueGraph::parse_ron("mara", MARA_RON).unwrap();
        assert_eq!(graph.len(), 3);
        let entry = graph.get("entry").unwrap();
        assert_eq!(entry.speaker, "Mara");
        assert_eq!(entry.responses.len(), 3);
        assert!(matches!(
            entry.responses[0].kind,
            ResponseKind::Navigate {
                next: Some(ref n),
                effect: Some(_)
            } if n == "always"
        ));
        // Bare response: no next, no effect — ends the session.
        assert!(matches!(
            entry.responses[2].kind,
            ResponseKind::Navigate {
                next: None,
                effect: None
            }
        ));
        assert!(graph.get("always").unwrap().is_terminal());
    }

    #[test]
    fn choices_key_is_accepted() {
        let ron = r#"{
            "entry": Node(
                speaker: "Voss",
                text: "Any change overnight?",
                choices: [
                    (text: "She slept through.", next: "good"),
                ],
            ),
            "good": Node(speaker: "Voss", text: "Small mercies."),
        }"#;
        let graph = DialogueGraph::parse_ron("voss", ron).unwrap();
        assert_eq!(graph.get("entry").unwrap().responses.len(), 1);
    }

    #[test]
    fn both_response_keys_rejected() {
        let ron = r#"{
            "entry": Node(
                speaker: "Voss",
                text: "Hm.",
                responses: [(text: "A")],
                choices: [(text: "B")],
            ),
        }"#;
        let err = DialogueGraph::parse_ron("voss", ron).unwrap_err();
        assert!(matches!(err, ScriptError::BothResponseKeys { ref node } if node == "entry"));
    }

    #[test]
    fn action_mixed_with_next_rejected() {
        let ron = r#"{
            "entry": Node(
                speaker: "Voss",
                text: "Go home.",
                responses: [
                    (text: "Fine.", next: "x", action: LoadScene("hallway")),
                ],
            ),
        }"#;
        let err = DialogueGraph::parse_ron("voss", ron).unwrap_err();
        assert!(
            matches!(err, ScriptError::AmbiguousResponse { ref node, index } if node == "entry" && index == 0)
        );
    }

    #[test]
    fn action_response_parses_as_invoke() {
        let ron = r#"{
            "leave": Node(
                speaker: "Voss",
                text: "The hallway light is still on.",
                responses: [
                    (text: "Step outside.", action: LoadScene("hallway")),
                ],
            ),
        }"#;
        let graph = DialogueGraph::parse_ron("voss", ron).unwrap();
        assert!(matches!(
            graph.get("leave").unwrap().responses[0].kind,
            ResponseKind::Invoke {
                action: Action::LoadScene(ref s)
            } if s == "hallway"
        ));
    }

    #[test]
    fn whole_script_parses_per_character() {
        let ron = r#"{
            "mara": {
                "entry": Node(speaker: "Mara", text: "Hi."),
            },
            "voss": {
                "entry": Node(speaker: "Voss", text: "Evening."),
            },
        }"#;
        let set = ScriptSet::parse_ron(ron).unwrap();
        assert!(set.graph("mara").is_some());
        assert!(set.graph("voss").is_some());
        assert!(set.graph("nobody").is_none());
    }

    #[test]
    fn lint_flags_unresolved_next() {
        let ron = r#"{
            "entry": Node(
                speaker: "Mara",
                text: "Where did you go?",
                responses: [(text: "Nowhere.", next: "missing_node")],
            ),
        }"#;
        let mut set = ScriptSet::default();
        set.insert(DialogueGraph::parse_ron("mara", ron).unwrap());
        let warnings = set.lint();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("missing_node"));
    }

    #[test]
    fn lint_clean_script_is_quiet() {
        let mut set = ScriptSet::default();
        set.insert(DialogueGraph::parse_ron("mara", MARA_RON).unwrap());
        assert!(set.lint().is_empty());
    }

    #[test]
    fn merge_overrides_nodes_by_id() {
        let base = r#"{
            "entry": Node(speaker: "Mara", text: "Old line."),
            "keep": Node(speaker: "Mara", text: "Kept."),
        }"#;
        let patch = r#"{
            "entry": Node(speaker: "Mara", text: "New line."),
        }"#;
        let mut set = ScriptSet::default();
        set.insert(DialogueGraph::parse_ron("mara", base).unwrap());
        let mut other = ScriptSet::default();
        other.insert(DialogueGraph::parse_ron("mara", patch).unwrap());
        set.merge(other);

        let graph = set.graph("mara").unwrap();
        assert_eq!(graph.get("entry").unwrap().text, "New line.");
        assert!(graph.contains("keep"));
    }

    #[test]
    fn reachability_walk() {
        let graph = DialogueGraph::parse_ron("mara", MARA_RON).unwrap();
        let reachable = reachable_from(&graph, "entry");
        assert!(reachable.contains("entry"));
        assert!(reachable.contains("always"));
        assert!(reachable.contains("water"));
    }
}
