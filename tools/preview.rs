/// Preview: render a trial set from local materials files.
///
/// Usage: preview <experiment> --materials <exp_id>,<filler_id> [--materials-dir <dir>] [--seed <n>] [--text]
///        preview --list
use clap::Parser;
use std::path::PathBuf;
use std::process;

use stimulus_engine::core::pipeline::{StimulusEngine, TrialRequest};
use stimulus_engine::core::store::MaterialsStore;
use stimulus_engine::schema::condition::ConditionId;
use stimulus_engine::schema::trial::TrialSet;

#[derive(Parser)]
#[command(about = "Render a trial set from local materials files")]
struct Args {
    /// Experiment name, e.g. 02_acceptability_swarm.
    experiment: Option<String>,

    /// Experimental and filler materials identifiers, comma-separated.
    #[arg(long)]
    materials: Option<String>,

    /// Directory holding `<id>.json` materials files.
    #[arg(long, default_value = "materials")]
    materials_dir: PathBuf,

    /// RNG seed; omit for a fresh random render.
    #[arg(long)]
    seed: Option<u64>,

    /// RON name corpus replacing the built-in names.
    #[arg(long)]
    names: Option<String>,

    /// Print a readable listing instead of JSON.
    #[arg(long)]
    text: bool,

    /// List registered experiments and exit.
    #[arg(long)]
    list: bool,
}

fn main() {
    let args = Args::parse();

    let mut builder = StimulusEngine::builder();
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    if let Some(ref path) = args.names {
        builder = builder.names_file(path);
    }
    let mut engine = match builder.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    if args.list {
        for name in engine.registry().names() {
            println!("{}", name);
        }
        return;
    }

    let Some(experiment) = args.experiment else {
        eprintln!("ERROR: no experiment given (use --list to see them)");
        process::exit(2);
    };
    let request = TrialRequest {
        materials: args.materials,
    };
    let store = MaterialsStore::new(args.materials_dir);

    let set = match engine.get_trials_from_store(&experiment, &store, &request) {
        Ok(set) => set,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    if args.text {
        print_listing(&set);
        return;
    }
    match serde_json::to_string_pretty(&set) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("ERROR: failed to serialize trial set: {}", e);
            process::exit(1);
        }
    }
}

fn print_listing(set: &TrialSet) {
    println!(
        "=== {} [{}]: {} trials ===",
        set.experiment,
        set.materials_id,
        set.trials.len()
    );

    for (i, trial) in set.trials.iter().enumerate() {
        let condition = match trial.condition_id {
            ConditionId::Experimental(ref c) => c.to_string(),
            ConditionId::Filler(ref labels) => labels
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join("/"),
        };
        println!("\n[{:>2}] item {} {}", i, trial.item_id, condition);
        for sentence in trial.sentence_texts() {
            println!("     {}", sentence);
        }
        if let Some(ref prompt) = trial.presentation.prompt {
            println!("   ? {}", prompt);
        }
        if let Some([ref min, ref max]) = trial.presentation.slider_labels {
            println!("   | {} .. {}", min, max);
        }
    }
}
