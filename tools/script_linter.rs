/// Script Linter — validates dialogue script files.
///
/// Usage: script_linter <script_path> [--entry <character:node>]...
///
/// Reports unresolved `next` targets and empty text as warnings, and — when
/// entry points are given — nodes unreachable from them.

use std::path::Path;
use std::process;

use vigil_engine::dialogue::script::{reachable_from, ScriptSet};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: script_linter <script_path> [--entry <character:node>]...");
        process::exit(0);
    }

    let script_path = &args[1];
    let mut entries: Vec<(String, String)> = Vec::new();

    let mut i = 2;
    while i < args.len() {
        if args[i] == "--entry" && i + 1 < args.len() {
            i += 1;
            match args[i].split_once(':') {
                Some((character, node)) => {
                    entries.push((character.to_string(), node.to_string()));
                }
                None => {
                    eprintln!("ERROR: --entry expects <character:node>, got '{}'", args[i]);
                    process::exit(1);
                }
            }
        }
        i += 1;
    }

    let mut scripts = ScriptSet::default();
    let path = Path::new(script_path);

    if path.is_file() {
        match ScriptSet::load_from_ron(path) {
            Ok(set) => scripts.merge(set),
            Err(e) => {
                eprintln!("ERROR: Failed to load script file: {}", e);
                process::exit(1);
            }
        }
    } else if path.is_dir() {
        load_scripts_recursive(path, &mut scripts);
    } else {
        eprintln!("ERROR: Path '{}' does not exist", script_path);
        process::exit(1);
    }

    let node_count: usize = scripts
        .characters()
        .filter_map(|c| scripts.graph(c))
        .map(|g| g.len())
        .sum();
    println!(
        "Loaded {} characters, {} nodes",
        scripts.characters().count(),
        node_count
    );

    let mut warnings = scripts.lint();
    warnings.extend(unreachable_warnings(&scripts, &entries));

    println!("\n=== Script Lint Report ===\n");

    if warnings.is_empty() {
        println!("All checks passed!");
    }
    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    println!("\nSummary: {} warnings", warnings.len());

    if warnings.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn load_scripts_recursive(dir: &Path, scripts: &mut ScriptSet) {
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                load_scripts_recursive(&path, scripts);
            } else if path.extension().and_then(|s| s.to_str()) == Some("ron") {
                match ScriptSet::load_from_ron(&path) {
                    Ok(set) => {
                        println!("  Loaded: {}", path.display());
                        scripts.merge(set);
                    }
                    Err(e) => {
                        eprintln!("  ERROR loading {}: {}", path.display(), e);
                    }
                }
            }
        }
    }
}

fn unreachable_warnings(scripts: &ScriptSet, entries: &[(String, String)]) -> Vec<String> {
    let mut warnings = Vec::new();
    for (character, entry_node) in entries {
        let Some(graph) = scripts.graph(character) else {
            warnings.push(format!("entry '{character}:{entry_node}': unknown character"));
            continue;
        };
        if !graph.contains(entry_node) {
            warnings.push(format!("entry '{character}:{entry_node}': unknown node"));
            continue;
        }
        let reachable = reachable_from(graph, entry_node);
        for node in graph.nodes() {
            if !reachable.contains(&node.id) {
                warnings.push(format!(
                    "{}: node '{}' is unreachable from entry '{}'",
                    character, node.id, entry_node
                ));
            }
        }
    }
    warnings
}
