//! WASM bindings for vigil-engine — powers the browser build of the game.
//!
//! Collaborator calls (reveal, choices, cues, scene loads) are buffered into
//! a JSON event queue the JS host drains each frame via [`VigilGame::view`].

use wasm_bindgen::prelude::*;

use vigil_engine::dialogue::presenter::{
    AudioSink, InputCapture, Presenter, SceneDirector, SessionIo,
};
use vigil_engine::dialogue::script::ScriptSet;
use vigil_engine::dialogue::session::{DialogueRunner, RevealToken, SessionState, TickOutcome};
use vigil_engine::state::condition::Meter;
use vigil_engine::state::game_state::GameState;
use vigil_engine::state::save::SaveRecord;

// ---------------------------------------------------------------------------
// Embedded script content — compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const GAME_SCRIPTS: &str = include_str!("../../scripts/vigil.ron");
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum BridgeEvent {
    Reveal { speaker: String, text: String },
    Choices { items: Vec<String> },
    ContinuePrompt,
    Hide,
    Cue { name: String },
    LoadScene { scene: String },
    Action { name: String },
    InputSuspended,
    InputResumed,
}

#[derive(serde::Serialize)]
struct ViewSnapshot {
    session: &'static str,
    displayed_text: Option<String>,
    current_node: Option<String>,
    day: u32,
    time_of_day: String,
    stability: i32,
    lucidity: i32,
    shape_integrity: i32,
    events: Vec<BridgeEvent>,
}

/// Buffers every collaborator call for the JS host.
#[derive(Default)]
struct Bridge {
    events: Vec<BridgeEvent>,
}

impl Presenter for Bridge {
    fn reveal_text(&mut self, speaker: &str, visible: &str) {
        self.events.push(BridgeEvent::Reveal {
            speaker: speaker.to_string(),
            text: visible.to_string(),
        });
    }
    fn show_choices(&mut self, choices: &[&str]) {
        self.events.push(BridgeEvent::Choices {
            items: choices.iter().map(|s| s.to_string()).collect(),
        });
    }
    fn show_continue_prompt(&mut self) {
        self.events.push(BridgeEvent::ContinuePrompt);
    }
    fn hide(&mut self) {
        self.events.push(BridgeEvent::Hide);
    }
}

impl AudioSink for Bridge {
    fn play_cue(&mut self, cue: &str) {
        self.events.push(BridgeEvent::Cue {
            name: cue.to_string(),
        });
    }
}

impl SceneDirector for Bridge {
    fn load_scene(&mut self, scene_id: &str) {
        self.events.push(BridgeEvent::LoadScene {
            scene: scene_id.to_string(),
        });
    }
    fn perform(&mut self, action: &str) {
        self.events.push(BridgeEvent::Action {
            name: action.to_string(),
        });
    }
}

impl InputCapture for Bridge {
    fn suspend(&mut self) {
        self.events.push(BridgeEvent::InputSuspended);
    }
    fn resume(&mut self) {
        self.events.push(BridgeEvent::InputResumed);
    }
}

/// One buffer per collaborator role so all four can be borrowed at once.
/// `drain` concatenates in role order, not strict call order.
struct BridgeSet {
    presenter: Bridge,
    audio: Bridge,
    scenes: Bridge,
    input: Bridge,
}

impl BridgeSet {
    fn new() -> Self {
        Self {
            presenter: Bridge::default(),
            audio: Bridge::default(),
            scenes: Bridge::default(),
            input: Bridge::default(),
        }
    }

    fn io(&mut self) -> SessionIo<'_> {
        SessionIo {
            presenter: &mut self.presenter,
            audio: &mut self.audio,
            scenes: &mut self.scenes,
            input: &mut self.input,
        }
    }

    fn drain(&mut self) -> Vec<BridgeEvent> {
        let mut events = Vec::new();
        events.append(&mut self.presenter.events);
        events.append(&mut self.audio.events);
        events.append(&mut self.scenes.events);
        events.append(&mut self.input.events);
        events
    }
}

fn session_label(state: SessionState) -> &'static str {
    match state {
        SessionState::Idle => "idle",
        SessionState::Revealing => "revealing",
        SessionState::AwaitingInput => "awaiting_input",
        SessionState::Ended => "ended",
    }
}

// ---------------------------------------------------------------------------
// VigilGame — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct VigilGame {
    runner: DialogueRunner,
    state: GameState,
    bridges: BridgeSet,
    token: Option<RevealToken>,
}

#[wasm_bindgen]
impl VigilGame {
    /// Create a game over the embedded script content and a fresh state.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<VigilGame, JsError> {
        let scripts = ScriptSet::parse_ron(data::GAME_SCRIPTS)
            .map_err(|e| JsError::new(&format!("Script parse error: {e}")))?;
        Ok(VigilGame {
            runner: DialogueRunner::new(scripts),
            state: GameState::new(),
            bridges: BridgeSet::new(),
            token: None,
        })
    }

    /// Open a dialogue session. Returns `true` if a session started.
    pub fn start(&mut self, character: &str, entry: &str) -> bool {
        let mut io = self.bridges.io();
        self.token = self
            .runner
            .start_dialogue(character, entry, &mut self.state, &mut io);
        self.token.is_some()
    }

    /// Advance the reveal by one character. Returns `true` while more ticks
    /// should be scheduled.
    pub fn tick(&mut self) -> bool {
        let Some(token) = self.token else {
            return false;
        };
        let mut io = self.bridges.io();
        matches!(self.runner.tick(token, &mut io), TickOutcome::Revealing)
    }

    pub fn skip(&mut self) {
        let mut io = self.bridges.io();
        self.runner.skip_reveal(&mut io);
    }

    /// Zero-based choice selection.
    pub fn choose(&mut self, index: usize) -> bool {
        let mut io = self.bridges.io();
        self.token = self.runner.select_choice(index, &mut self.state, &mut io);
        self.token.is_some()
    }

    /// The generic continue signal.
    pub fn advance(&mut self) {
        let mut io = self.bridges.io();
        self.runner.handle_continue(&mut io);
    }

    pub fn end(&mut self) {
        let mut io = self.bridges.io();
        self.runner.end_dialogue(&mut io);
        self.token = None;
    }

    /// Step the time-of-day cycle; returns the new time label.
    pub fn advance_time(&mut self) -> String {
        self.state.advance_time().label().to_string()
    }

    /// Serialize the full game state to a JSON save record.
    pub fn save(&self) -> Result<String, JsError> {
        self.state
            .to_record()
            .to_json()
            .map_err(|e| JsError::new(&format!("Save error: {e}")))
    }

    /// Restore from a JSON save record.
    pub fn load(&mut self, json: &str) -> Result<(), JsError> {
        let record = SaveRecord::from_json(json)
            .map_err(|e| JsError::new(&format!("Load error: {e}")))?;
        self.state.load_from(&record);
        Ok(())
    }

    /// JSON snapshot of session and meters, draining buffered events.
    pub fn view(&mut self) -> Result<String, JsError> {
        let snapshot = ViewSnapshot {
            session: session_label(self.runner.state()),
            displayed_text: self.runner.displayed_text(),
            current_node: self.runner.current_node_id().map(|s| s.to_string()),
            day: self.state.day,
            time_of_day: self.state.time_of_day.label().to_string(),
            stability: self.state.condition(Meter::Stability),
            lucidity: self.state.condition(Meter::Lucidity),
            shape_integrity: self.state.condition(Meter::ShapeIntegrity),
            events: self.bridges.drain(),
        };
        serde_json::to_string(&snapshot)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// JSON array of characters with authored dialogue.
    pub fn characters(&self) -> String {
        let names: Vec<&str> = self.runner.scripts().characters().collect();
        serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
    }
}
