/// Bedside example — a scripted morning at Mara's bedside.
///
/// Walks one full day of the vigil: the doctor's visit, sitting with Mara,
/// recovering a memory, and advancing the clock. Choices are pre-selected so
/// the run is deterministic.
///
/// Run with: cargo run --example bedside

use vigil_engine::dialogue::presenter::{
    AudioSink, InputCapture, Presenter, SceneDirector, SessionIo,
};
use vigil_engine::dialogue::script::ScriptSet;
use vigil_engine::dialogue::session::{DialogueRunner, TickOutcome};
use vigil_engine::state::condition::Meter;
use vigil_engine::state::game_state::GameState;

#[derive(Default)]
struct Stage {
    speaker: String,
    visible: String,
}

impl Presenter for Stage {
    fn reveal_text(&mut self, speaker: &str, visible: &str) {
        self.speaker = speaker.to_string();
        self.visible = visible.to_string();
    }
    fn show_choices(&mut self, choices: &[&str]) {
        println!("{}: {}", self.speaker, self.visible);
        for (i, choice) in choices.iter().enumerate() {
            println!("    {}) {}", i + 1, choice);
        }
    }
    fn show_continue_prompt(&mut self) {
        println!("{}: {}", self.speaker, self.visible);
    }
    fn hide(&mut self) {
        println!("    ...");
    }
}

#[derive(Default)]
struct StageAudio;
impl AudioSink for StageAudio {
    fn play_cue(&mut self, _cue: &str) {}
}

#[derive(Default)]
struct StageScenes;
impl SceneDirector for StageScenes {
    fn load_scene(&mut self, scene_id: &str) {
        println!("    [you move to the {scene_id}]");
    }
    fn perform(&mut self, action: &str) {
        println!("    [{action}]");
    }
}

#[derive(Default)]
struct StageInput;
impl InputCapture for StageInput {
    fn suspend(&mut self) {}
    fn resume(&mut self) {}
}

fn main() {
    let scripts = ScriptSet::load_from_ron(std::path::Path::new("scripts/vigil.ron"))
        .expect("Failed to load vigil scripts");

    let mut state = GameState::new();
    let mut runner = DialogueRunner::new(scripts);

    let mut presenter = Stage::default();
    let mut audio = StageAudio;
    let mut scenes = StageScenes;
    let mut input = StageInput;

    println!("========================================");
    println!("   THE VIGIL");
    println!("   One Day at the Bedside");
    println!("========================================");
    println!();
    print_meters(&state);
    println!();

    // --- Morning: Dr. Voss's visit ---
    // She slept through; take the extra water; no memory talk today.
    println!("--- Dawn: The Doctor's Visit ---");
    play(&mut runner, &mut state, "voss", "entry", &[0, 0],
        &mut presenter, &mut audio, &mut scenes, &mut input);
    state.advance_time();
    println!();

    // --- Midday: sitting with Mara ---
    // Stay, listen to the recital story, recover the memory.
    println!("--- Day: Sitting With Mara ---");
    play(&mut runner, &mut state, "mara", "entry", &[0, 0],
        &mut presenter, &mut audio, &mut scenes, &mut input);
    println!();
    print_meters(&state);
    println!(
        "    memories held: {}",
        state
            .memories
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    state.advance_time();
    println!();

    // --- Evening: rest carries her to night ---
    // Her AdvanceTime response moves dusk to night.
    println!("--- Dusk: Rest ---");
    play(&mut runner, &mut state, "mara", "rest", &[0],
        &mut presenter, &mut audio, &mut scenes, &mut input);
    println!();

    // The night passes; the new day exacts its toll on her meters.
    state.advance_time();
    println!("--- Dawn Again ---");
    print_meters(&state);
    println!("    day {} ({})", state.day, state.time_of_day.label());
    println!();
    println!("========================================");
    println!("   FIN");
    println!("========================================");
}

/// Run one session from `entry`, selecting `picks` in order whenever a choice
/// list is presented.
#[allow(clippy::too_many_arguments)]
fn play(
    runner: &mut DialogueRunner,
    state: &mut GameState,
    character: &str,
    entry: &str,
    picks: &[usize],
    presenter: &mut Stage,
    audio: &mut StageAudio,
    scenes: &mut StageScenes,
    input: &mut StageInput,
) {
    let mut io = SessionIo {
        presenter,
        audio,
        scenes,
        input,
    };

    let mut token = runner
        .start_dialogue(character, entry, state, &mut io)
        .expect("entry node should exist");
    let mut picks = picks.iter();

    loop {
        while runner.tick(token, &mut io) == TickOutcome::Revealing {}

        let Some(node) = runner.current_node() else {
            break;
        };
        if node.is_terminal() {
            runner.handle_continue(&mut io);
            break;
        }
        let Some(&pick) = picks.next() else {
            runner.end_dialogue(&mut io);
            break;
        };
        match runner.select_choice(pick, state, &mut io) {
            Some(next) => token = next,
            None => break,
        }
    }
}

fn print_meters(state: &GameState) {
    println!(
        "    [stability {} | lucidity {} | shape integrity {}]",
        state.condition(Meter::Stability),
        state.condition(Meter::Lucidity),
        state.condition(Meter::ShapeIntegrity)
    );
}
