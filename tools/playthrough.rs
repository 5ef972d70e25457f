/// Playthrough — interactive console traversal of a dialogue script.
///
/// Usage: playthrough --script <path> [--save <path>]
///
/// Commands:
///   talk <character> <node>  — open a dialogue session
///   <n>                      — pick choice n (as displayed, 1-based)
///   (empty line)             — continue / dismiss a terminal node
///   state                    — print meters, day, inventory
///   save <path>              — write the save record as JSON
///   load <path>              — restore from a JSON save record
///   quit                     — exit

use std::io::{self, BufRead, Write};
use std::path::Path;

use vigil_engine::dialogue::presenter::{
    NullAudio, NullInput, Presenter, SceneDirector, SessionIo,
};
use vigil_engine::dialogue::script::ScriptSet;
use vigil_engine::dialogue::session::{DialogueRunner, TickOutcome};
use vigil_engine::state::condition::Meter;
use vigil_engine::state::game_state::GameState;
use vigil_engine::state::save::SaveRecord;

/// Prints the full line once a reveal settles; per-tick prefixes are dropped
/// since a console has no use for the animation.
#[derive(Default)]
struct Console {
    speaker: String,
    last_visible: String,
}

impl Presenter for Console {
    fn reveal_text(&mut self, speaker: &str, visible: &str) {
        self.speaker = speaker.to_string();
        self.last_visible = visible.to_string();
    }
    fn show_choices(&mut self, choices: &[&str]) {
        println!("\n{}: {}", self.speaker, self.last_visible);
        for (i, choice) in choices.iter().enumerate() {
            println!("  {}. {}", i + 1, choice);
        }
    }
    fn show_continue_prompt(&mut self) {
        println!("\n{}: {}", self.speaker, self.last_visible);
        println!("  (press enter)");
    }
    fn hide(&mut self) {
        println!("  [dialogue closed]");
    }
}

#[derive(Default)]
struct ConsoleScenes;

impl SceneDirector for ConsoleScenes {
    fn load_scene(&mut self, scene_id: &str) {
        println!("  [scene -> {scene_id}]");
    }
    fn perform(&mut self, action: &str) {
        println!("  [action -> {action}]");
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut script_path = None;
    let mut save_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--script" if i + 1 < args.len() => {
                i += 1;
                script_path = Some(args[i].clone());
            }
            "--save" if i + 1 < args.len() => {
                i += 1;
                save_path = Some(args[i].clone());
            }
            _ => {
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let Some(script_path) = script_path else {
        print_usage();
        std::process::exit(1);
    };

    let scripts = match ScriptSet::load_from_ron(Path::new(&script_path)) {
        Ok(set) => set,
        Err(e) => {
            eprintln!("ERROR: failed to load '{}': {}", script_path, e);
            std::process::exit(1);
        }
    };

    let mut state = GameState::new();
    if let Some(ref path) = save_path {
        match SaveRecord::read_file(Path::new(path)) {
            Ok(record) => state.load_from(&record),
            Err(e) => eprintln!("WARNING: could not load save '{}': {}", path, e),
        }
    }

    let characters: Vec<String> = scripts.characters().map(|s| s.to_string()).collect();
    let mut runner = DialogueRunner::new(scripts);
    let mut presenter = Console::default();
    let mut audio = NullAudio;
    let mut scenes = ConsoleScenes;
    let mut input = NullInput;

    println!("Characters: {}", characters.join(", "));
    println!("Type 'talk <character> <node>' to begin. 'quit' to exit.\n");

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();

        let mut io_bundle = SessionIo {
            presenter: &mut presenter,
            audio: &mut audio,
            scenes: &mut scenes,
            input: &mut input,
        };

        match line.split_whitespace().collect::<Vec<_>>().as_slice() {
            ["quit"] => break,
            ["state"] => print_state(&state),
            ["save", path] => match state.to_record().write_file(Path::new(path)) {
                Ok(()) => println!("saved to {path}"),
                Err(e) => eprintln!("ERROR: {e}"),
            },
            ["load", path] => match SaveRecord::read_file(Path::new(path)) {
                Ok(record) => {
                    state.load_from(&record);
                    println!("loaded {path}");
                }
                Err(e) => eprintln!("ERROR: {e}"),
            },
            ["talk", character, node] => {
                match runner.start_dialogue(character, node, &mut state, &mut io_bundle) {
                    // Console play is instant: run the reveal to completion.
                    Some(token) => {
                        while runner.tick(token, &mut io_bundle) == TickOutcome::Revealing {}
                    }
                    None => println!("no dialogue at {character}:{node}"),
                }
            }
            [n] if n.parse::<usize>().is_ok() => {
                let display_index: usize = n.parse().unwrap_or(0);
                if let Some(token) = runner.select_choice(
                    display_index.saturating_sub(1),
                    &mut state,
                    &mut io_bundle,
                ) {
                    while runner.tick(token, &mut io_bundle) == TickOutcome::Revealing {}
                }
            }
            [] => runner.handle_continue(&mut io_bundle),
            _ => println!("unrecognized command"),
        }
    }
}

fn print_state(state: &GameState) {
    println!(
        "day {} ({}), scene '{}', act {} chapter {}",
        state.day,
        state.time_of_day.label(),
        state.scene,
        state.act,
        state.chapter
    );
    println!(
        "stability {}  lucidity {}  shape integrity {}",
        state.condition(Meter::Stability),
        state.condition(Meter::Lucidity),
        state.condition(Meter::ShapeIntegrity)
    );
    let items: Vec<String> = state
        .inventory
        .iter()
        .map(|(name, slot)| format!("{name}={slot:?}"))
        .collect();
    println!("inventory: {}", items.join(", "));
    let memories: Vec<&str> = state.memories.iter().map(|a| a.name.as_str()).collect();
    println!("memories: {}", memories.join(", "));
}

fn print_usage() {
    println!("Usage: playthrough --script <path> [--save <path>]");
}
