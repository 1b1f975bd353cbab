/// Materials Linter: reports which items an experiment would drop and
/// whether the remaining pool covers its trials.
///
/// Usage: materials_linter <experiment> <materials.json> [--fillers <fillers.json>]
///
/// With `--fillers`, also renders one seeded trial set from both files so
/// malformed fields and short filler pools show up before deployment.
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;

use stimulus_engine::core::experiment::Experiment;
use stimulus_engine::core::pipeline::StimulusEngine;
use stimulus_engine::core::registry::ExperimentRegistry;
use stimulus_engine::core::sampling::{drop_reasons, DropReason};
use stimulus_engine::schema::materials::{Item, MaterialsBundle, MaterialsSet};

#[derive(Parser)]
#[command(about = "Check a materials file against an experiment's requirements")]
struct Args {
    /// Experiment name, e.g. 04_comprehension_swarm-full.
    experiment: String,

    /// Experimental materials JSON file.
    materials: PathBuf,

    /// Filler materials JSON file for a trial render dry run.
    #[arg(long)]
    fillers: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let registry = ExperimentRegistry::standard();
    let Some(experiment) = registry.create(&args.experiment) else {
        eprintln!("ERROR: unknown experiment '{}'", args.experiment);
        eprintln!("Known experiments: {}", registry.names().join(", "));
        process::exit(1);
    };

    let materials = load_set(&args.materials);
    let required = experiment.experimental.required_fields();
    let flags = experiment.experimental.flag_fields();
    let (usable, dropped) = lint_items(&materials.items, required, flags);

    println!("\n=== Materials Lint Report: {} ===\n", materials.name);
    println!("Required fields: {}", required.join(", "));
    if !flags.is_empty() {
        println!("Required flags: {}", flags.join(", "));
    }

    for (id, reasons) in &dropped {
        let reasons: Vec<String> = reasons.iter().map(|r| r.to_string()).collect();
        println!("WARNING: item {} dropped: {}", id, reasons.join("; "));
    }

    let mut errors = 0;
    println!(
        "\n{} of {} items usable; {} needs {}",
        usable,
        materials.items.len(),
        experiment.name,
        experiment.experimental_trials
    );
    if usable < experiment.experimental_trials {
        println!(
            "ERROR: pool is {} items short",
            experiment.experimental_trials - usable
        );
        errors += 1;
    }

    if let Some(ref path) = args.fillers {
        errors += dry_run(&experiment, materials, load_set(path));
    }

    if errors > 0 {
        process::exit(1);
    }
    println!("\nAll checks passed!");
}

fn load_set(path: &Path) -> MaterialsSet {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ERROR: Failed to read {}: {}", path.display(), e);
            process::exit(1);
        }
    };
    match MaterialsSet::from_json(&contents) {
        Ok(set) => set,
        Err(e) => {
            eprintln!("ERROR: Failed to parse {}: {}", path.display(), e);
            process::exit(1);
        }
    }
}

/// Count usable items and collect the drop reasons of the rest.
fn lint_items(
    items: &[Item],
    required: &[&str],
    flags: &[&str],
) -> (usize, Vec<(String, Vec<DropReason>)>) {
    let mut usable = 0;
    let mut dropped = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let reasons = drop_reasons(item, required, flags);
        if reasons.is_empty() {
            usable += 1;
        } else {
            let id = item
                .id()
                .map(|v| v.to_string())
                .unwrap_or_else(|| format!("#{}", index));
            dropped.push((id, reasons));
        }
    }
    (usable, dropped)
}

/// Render one seeded trial set; returns the number of errors found.
fn dry_run(experiment: &Experiment, experimental: MaterialsSet, fillers: MaterialsSet) -> usize {
    let materials_id = format!("{},{}", experimental.name, fillers.name);
    let bundle = MaterialsBundle {
        experimental,
        fillers,
    };
    let result = StimulusEngine::builder()
        .seed(0)
        .build()
        .and_then(|mut engine| engine.render(experiment, &bundle, &materials_id));

    match result {
        Ok(set) => {
            let fillers = set.trials.iter().filter(|t| t.is_filler()).count();
            println!(
                "Dry run rendered {} trials ({} fillers)",
                set.trials.len(),
                fillers
            );
            0
        }
        Err(e) => {
            println!("ERROR: dry run failed: {}", e);
            1
        }
    }
}
