/// Preview — render episode logs from the command line.
///
/// Usage: preview [--agent <name>] [--literal] [--episode <n>] [--seed <n>] <file>...
///
/// Each file is parsed (whole-document JSON or JSON Lines), every episode
/// found is rendered, and the lines are printed in order with a blank
/// line between episodes.

use episode_diary::core::ingest::Journal;
use episode_diary::core::lexicon::Lexicons;
use episode_diary::core::story::{Narrator, PhrasePicker, RandomPicker, RenderMode};
use std::path::Path;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let mut agent = "ペリー".to_string();
    let mut mode = RenderMode::Stylized;
    let mut only_episode: Option<usize> = None;
    let mut seed: Option<u64> = None;
    let mut files: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--agent" if i + 1 < args.len() => {
                i += 1;
                agent = args[i].clone();
            }
            "--literal" => {
                mode = RenderMode::Literal;
            }
            "--episode" if i + 1 < args.len() => {
                i += 1;
                match args[i].parse::<usize>() {
                    Ok(n) => only_episode = Some(n),
                    Err(_) => {
                        eprintln!("Invalid episode index: {}", args[i]);
                        std::process::exit(1);
                    }
                }
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                match args[i].parse::<u64>() {
                    Ok(n) => seed = Some(n),
                    Err(_) => {
                        eprintln!("Invalid seed: {}", args[i]);
                        std::process::exit(1);
                    }
                }
            }
            arg if arg.starts_with("--") => {
                eprintln!("Unknown argument: {}", arg);
                print_usage();
                std::process::exit(1);
            }
            _ => {
                files.push(args[i].clone());
            }
        }
        i += 1;
    }

    if files.is_empty() {
        eprintln!("No input files given.");
        print_usage();
        std::process::exit(1);
    }

    let mut journal = Journal::new();
    for file in &files {
        let added = journal.add_file(Path::new(file));
        eprintln!("{}: {} episode(s)", file, added);
    }

    if journal.is_empty() {
        eprintln!(
            "No valid episodes found in {} file(s).",
            journal.files_processed()
        );
        std::process::exit(1);
    }

    let picker: Box<dyn PhrasePicker> = match seed {
        Some(s) => Box::new(RandomPicker::seeded(s)),
        None => Box::new(RandomPicker::from_entropy()),
    };
    let mut narrator = Narrator::with_picker(agent, Lexicons::default(), picker);

    let episodes = journal.episodes().to_vec();
    for (index, episode) in episodes.iter().enumerate() {
        if let Some(only) = only_episode {
            if index != only {
                continue;
            }
        }
        println!("=== Episode {} ({}) ===", index, episode.id);
        for line in narrator.render(episode, mode) {
            println!("{}", line);
        }
        println!();
    }
}

fn print_usage() {
    println!("Preview — render episode logs from the command line.");
    println!();
    println!("Usage: preview [options] <file>...");
    println!();
    println!("  --agent <name>   Protagonist label used in the narration (default: ペリー)");
    println!("  --literal        Print the literal English transcript instead of the diary");
    println!("  --episode <n>    Render only the n-th extracted episode (0-based)");
    println!("  --seed <n>       Fix the phrasing RNG seed for reproducible output");
}
