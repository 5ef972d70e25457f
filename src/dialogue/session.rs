/// The dialogue session state machine — reveal ticking, choice dispatch,
/// and session lifecycle.
///
/// Scheduling is cooperative and single-threaded: the core owns no timers.
/// The host calls [`DialogueRunner::tick`] once per reveal interval with the
/// [`RevealToken`] it was handed when the current node was shown; a token
/// minted for an earlier node is stale and mutates nothing, which is what
/// keeps a late tick from corrupting a newer reveal.

use crate::state::game_state::GameState;

use super::node::{Action, DialogueNode, ResponseKind};
use super::presenter::SessionIo;
use super::script::ScriptSet;

/// Cue fired when an interaction opens a dialogue.
pub const CUE_INTERACTION_CONFIRMED: &str = "interaction_confirmed";
/// Cue fired when the player picks a response.
pub const CUE_CHOICE_SELECTED: &str = "choice_selected";

/// Where the session currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session. Fresh runner, or after an explicit `end_dialogue`.
    Idle,
    /// Node text is being revealed tick by tick.
    Revealing,
    /// Full text shown; waiting for a choice or a continue signal.
    AwaitingInput,
    /// A session ran and finished. Distinguished from `Idle` so hosts can
    /// tell "dialogue just closed" from "nothing happened".
    Ended,
}

/// Ties a scheduled reveal tick to the node it was minted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealToken(u64);

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Token was minted for an earlier node or the session moved on.
    /// Nothing was mutated; do not reschedule.
    Stale,
    /// Cursor advanced; schedule another tick.
    Revealing,
    /// Reveal finished this tick; input is now awaited.
    Complete,
}

#[derive(Debug)]
struct ActiveSession {
    character: String,
    node: DialogueNode,
    /// Characters revealed so far.
    cursor: usize,
}

/// Owns the loaded scripts and at most one active session.
pub struct DialogueRunner {
    scripts: ScriptSet,
    state: SessionState,
    active: Option<ActiveSession>,
    /// Bumped whenever the displayed node changes or the session closes;
    /// outstanding tokens from before the bump are stale.
    generation: u64,
}

impl DialogueRunner {
    pub fn new(scripts: ScriptSet) -> Self {
        Self {
            scripts,
            state: SessionState::Idle,
            active: None,
            generation: 0,
        }
    }

    pub fn scripts(&self) -> &ScriptSet {
        &self.scripts
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self.state,
            SessionState::Revealing | SessionState::AwaitingInput
        )
    }

    pub fn current_node(&self) -> Option<&DialogueNode> {
        self.active.as_ref().map(|a| &a.node)
    }

    pub fn current_node_id(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.node.id.as_str())
    }

    /// The visible prefix of the current node's text.
    pub fn displayed_text(&self) -> Option<String> {
        self.active
            .as_ref()
            .map(|a| a.node.text.chars().take(a.cursor).collect())
    }

    /// Open a session on `entry` in `character`'s graph. Suspends exclusive
    /// input capture and begins the reveal. An unknown character or node
    /// opens nothing and returns `None`. An already-active session is ended
    /// first.
    pub fn start_dialogue(
        &mut self,
        character: &str,
        entry: &str,
        state: &mut GameState,
        io: &mut SessionIo<'_>,
    ) -> Option<RevealToken> {
        let node = self.scripts.graph(character)?.get(entry)?.clone();
        if self.is_active() {
            self.end_dialogue(io);
        }
        io.input.suspend();
        io.audio.play_cue(CUE_INTERACTION_CONFIRMED);
        Some(self.show_node(character.to_string(), node, state, io))
    }

    /// Re-enter on another node of the current character's graph without a
    /// fresh `start_dialogue`. Requires an active session.
    pub fn show_dialogue(
        &mut self,
        node_id: &str,
        state: &mut GameState,
        io: &mut SessionIo<'_>,
    ) -> Option<RevealToken> {
        if !self.is_active() {
            return None;
        }
        let character = self.active.as_ref()?.character.clone();
        let node = self.scripts.graph(&character)?.get(node_id)?.clone();
        Some(self.show_node(character, node, state, io))
    }

    /// Advance the reveal by one character. Stale tokens and non-revealing
    /// states are no-ops.
    pub fn tick(&mut self, token: RevealToken, io: &mut SessionIo<'_>) -> TickOutcome {
        if token.0 != self.generation || self.state != SessionState::Revealing {
            return TickOutcome::Stale;
        }
        let (speaker, visible, done) = {
            let Some(active) = self.active.as_mut() else {
                return TickOutcome::Stale;
            };
            let total = active.node.text.chars().count();
            if active.cursor < total {
                active.cursor += 1;
            }
            let visible: String = active.node.text.chars().take(active.cursor).collect();
            (active.node.speaker.clone(), visible, active.cursor >= total)
        };
        io.presenter.reveal_text(&speaker, &visible);
        if done {
            self.finish_reveal(io);
            TickOutcome::Complete
        } else {
            TickOutcome::Revealing
        }
    }

    /// Complete the reveal immediately and await input. No-op outside
    /// `Revealing`.
    pub fn skip_reveal(&mut self, io: &mut SessionIo<'_>) {
        if self.state != SessionState::Revealing {
            return;
        }
        // Invalidate any tick still scheduled for the partial reveal.
        self.generation += 1;
        let (speaker, text) = {
            let Some(active) = self.active.as_mut() else {
                return;
            };
            active.cursor = active.node.text.chars().count();
            (active.node.speaker.clone(), active.node.text.clone())
        };
        io.presenter.reveal_text(&speaker, &text);
        self.finish_reveal(io);
    }

    /// Resolve a zero-based choice. Valid only in `AwaitingInput` with a
    /// response list; wrong state or an out-of-range index is a silent
    /// no-op. Returns the token for the next node's reveal when the chosen
    /// response navigates onward.
    pub fn select_choice(
        &mut self,
        index: usize,
        state: &mut GameState,
        io: &mut SessionIo<'_>,
    ) -> Option<RevealToken> {
        if self.state != SessionState::AwaitingInput {
            return None;
        }
        let (character, response) = {
            let active = self.active.as_ref()?;
            let response = active.node.responses.get(index)?.clone();
            (active.character.clone(), response)
        };
        match response.kind {
            ResponseKind::Navigate { next, effect } => {
                // Effect first, feedback cue second.
                if let Some(ref effect) = effect {
                    effect.apply(state);
                }
                io.audio.play_cue(CUE_CHOICE_SELECTED);
                let resolved = next.and_then(|id| {
                    self.scripts
                        .graph(&character)
                        .and_then(|g| g.get(&id))
                        .cloned()
                });
                match resolved {
                    Some(node) => Some(self.show_node(character, node, state, io)),
                    // Absent or unresolvable next: the conversation is over.
                    None => {
                        self.finish_session(io);
                        None
                    }
                }
            }
            ResponseKind::Invoke { action } => {
                io.audio.play_cue(CUE_CHOICE_SELECTED);
                match action {
                    Action::LoadScene(scene_id) => io.scenes.load_scene(&scene_id),
                    Action::Custom(name) => io.scenes.perform(&name),
                }
                self.finish_session(io);
                None
            }
        }
    }

    /// The generic "continue" signal. While a choice list is active this
    /// does nothing; mid-reveal it skips; on a choice-less node it closes
    /// the session.
    pub fn handle_continue(&mut self, io: &mut SessionIo<'_>) {
        match self.state {
            SessionState::Revealing => self.skip_reveal(io),
            SessionState::AwaitingInput => {
                let terminal = self
                    .active
                    .as_ref()
                    .map(|a| a.node.is_terminal())
                    .unwrap_or(false);
                if terminal {
                    self.finish_session(io);
                }
            }
            SessionState::Idle | SessionState::Ended => {}
        }
    }

    /// Forced termination. Idempotent, callable from any state; invalidates
    /// all outstanding tokens and returns the runner to `Idle`.
    pub fn end_dialogue(&mut self, io: &mut SessionIo<'_>) {
        if self.active.is_some() {
            self.generation += 1;
            self.active = None;
            io.presenter.hide();
            io.input.resume();
        }
        self.state = SessionState::Idle;
    }

    fn show_node(
        &mut self,
        character: String,
        node: DialogueNode,
        state: &mut GameState,
        io: &mut SessionIo<'_>,
    ) -> RevealToken {
        self.generation += 1;
        if let Some(ref effect) = node.effect {
            effect.apply(state);
        }
        // Clear the display before the first tick lands.
        io.presenter.reveal_text(&node.speaker, "");
        self.active = Some(ActiveSession {
            character,
            node,
            cursor: 0,
        });
        self.state = SessionState::Revealing;
        RevealToken(self.generation)
    }

    fn finish_reveal(&mut self, io: &mut SessionIo<'_>) {
        self.state = SessionState::AwaitingInput;
        let Some(active) = self.active.as_ref() else {
            return;
        };
        if active.node.is_terminal() {
            io.presenter.show_continue_prompt();
        } else {
            let texts: Vec<&str> = active
                .node
                .responses
                .iter()
                .map(|r| r.text.as_str())
                .collect();
            io.presenter.show_choices(&texts);
        }
    }

    fn finish_session(&mut self, io: &mut SessionIo<'_>) {
        self.generation += 1;
        self.active = None;
        self.state = SessionState::Ended;
        io.presenter.hide();
        io.input.resume();
    }
}
