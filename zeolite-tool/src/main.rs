mod config;
mod error;
mod input;
mod sample;
mod schedule_csv;
mod summary;

use std::path::{Path, PathBuf};

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing::debug;
use zeolite_core::{ScheduleError, check_capacity, plan, plan_many, requested_slots};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "zeo")]
#[command(about = "Contiguous slot-grid scheduler for conference sessions", long_about = None)]
struct Cli {
    /// Path to the TOML configuration (default: ./zeolite.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Show diagnostic output (attempt counts, clamped lengths, ...)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Place working groups, then fill BOFs into the remaining slots
    Plan {
        /// CSV of working groups (name and requested block count)
        #[arg(short = 'w', long)]
        groups: Option<PathBuf>,

        /// CSV of BOF requests
        #[arg(short = 'b', long)]
        bofs: Option<PathBuf>,

        /// Schedule CSV to write, or to update in place when only --bofs
        /// is given
        #[arg(short = 's', long)]
        schedule: Option<PathBuf>,

        /// Override the configured number of rooms
        #[arg(short, long)]
        rooms: Option<usize>,

        /// Override the configured number of placement tries
        #[arg(long)]
        max_tries: Option<usize>,

        /// Number of alternative schedules to generate
        #[arg(short, long, default_value_t = 1)]
        permutations: usize,
    },
    /// Report slot utilization for existing schedule files
    Summary {
        /// Schedule CSVs to report on
        files: Vec<PathBuf>,
    },
    /// Generate synthetic input CSVs matching the configured columns
    Gen {
        /// Output path for the working-group CSV
        #[arg(long, default_value = "test_groups.csv")]
        groups_out: PathBuf,

        /// Output path for the BOF CSV
        #[arg(long, default_value = "test_bofs.csv")]
        bofs_out: PathBuf,

        /// Number of working groups to generate
        #[arg(long, default_value_t = 5)]
        groups: usize,

        /// Number of BOFs to generate
        #[arg(long, default_value_t = 4)]
        bofs: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Plan {
            groups,
            bofs,
            schedule,
            rooms,
            max_tries,
            permutations,
        } => run_plan(
            &config,
            PlanArgs {
                groups,
                bofs,
                schedule,
                rooms,
                max_tries,
                permutations,
            },
        ),
        Command::Summary { files } => run_summary(&files),
        Command::Gen {
            groups_out,
            bofs_out,
            groups,
            bofs,
        } => run_gen(&config, &groups_out, &bofs_out, groups, bofs),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

struct PlanArgs {
    groups: Option<PathBuf>,
    bofs: Option<PathBuf>,
    schedule: Option<PathBuf>,
    rooms: Option<usize>,
    max_tries: Option<usize>,
    permutations: usize,
}

fn run_plan(config: &Config, args: PlanArgs) -> anyhow::Result<()> {
    if args.permutations < 1 {
        bail!("permutations must be at least 1");
    }
    if args.groups.is_none() && args.bofs.is_none() {
        bail!("nothing to schedule: pass --groups and/or --bofs");
    }

    let plan_config = config.plan_config(args.rooms, args.max_tries);

    let groups = match &args.groups {
        Some(path) => input::read_sessions(path, &config.groups)?,
        None => Vec::new(),
    };
    let bofs = match &args.bofs {
        Some(path) => input::read_sessions(path, &config.bofs)?,
        None => Vec::new(),
    };
    debug!(groups = groups.len(), bofs = bofs.len(), "inputs loaded");

    // Update mode: fill BOFs into an existing schedule, in place.
    if args.groups.is_none() {
        let Some(schedule_path) = args.schedule.as_deref() else {
            bail!("--bofs alone needs --schedule pointing at an existing schedule to update");
        };
        if args.permutations > 1 {
            bail!("--permutations applies when scheduling groups");
        }

        let base =
            schedule_csv::read_schedule(schedule_path, plan_config.blocks, plan_config.rooms)?;
        let run = plan(&plan_config, &[], &bofs, Some(&base))?;
        schedule_csv::write_schedule(&run.grid, schedule_path)?;
        println!(
            "{} BOFs added, {}/{} slots filled{}",
            bofs.len(),
            run.grid.occupied_count(),
            run.grid.capacity(),
            advisory(&run.empty_blocks)
        );
        println!("Updated schedule written back to {}", schedule_path.display());
        return Ok(());
    }

    let group_slots = requested_slots(&groups);
    let bof_slots = requested_slots(&bofs);
    let capacity = plan_config.blocks * plan_config.rooms;

    // Capacity is deterministic, so every permutation would fail the same
    // way; report once with the class breakdown and write nothing.
    if let Err(err) = check_capacity(group_slots + bof_slots, capacity) {
        eprintln!("Over-subscription detected:");
        eprintln!(
            "  requested: {} slots ({group_slots} group + {bof_slots} BOF)",
            group_slots + bof_slots
        );
        eprintln!(
            "  capacity:  {capacity} slots ({} blocks x {} rooms)",
            plan_config.blocks, plan_config.rooms
        );
        if let ScheduleError::OverSubscribed { overflow, .. } = &err {
            eprintln!("  overflow:  {overflow} slots");
        }
        eprintln!("Reduce bofs.max_length or groups.max_length in the configuration.");
        return Err(err.into());
    }

    let base_path = args
        .schedule
        .clone()
        .unwrap_or_else(|| PathBuf::from("schedule.csv"));
    if args.permutations > 1 {
        println!(
            "Scheduling {} groups ({group_slots} slots), {} BOFs ({bof_slots} slots)",
            groups.len(),
            bofs.len()
        );
    }

    let runs = plan_many(&plan_config, &groups, &bofs, None, args.permutations);
    let mut failures = 0;
    for (index, result) in runs.iter().enumerate() {
        let out_path = if args.permutations > 1 {
            numbered_path(&base_path, index + 1)
        } else {
            base_path.clone()
        };
        match result {
            Ok(run) => {
                schedule_csv::write_schedule(&run.grid, &out_path)?;
                if args.permutations > 1 {
                    println!(
                        "  {}: {}/{capacity} slots filled{}",
                        out_path.display(),
                        run.grid.occupied_count(),
                        advisory(&run.empty_blocks)
                    );
                } else {
                    println!(
                        "{} groups ({group_slots} slots), {} BOFs, {}/{capacity} slots filled, evaluated {}{}",
                        groups.len(),
                        bofs.len(),
                        run.grid.occupied_count(),
                        tries_phrase(run.tries),
                        advisory(&run.empty_blocks)
                    );
                    println!("Schedule written to {}", out_path.display());
                }
            }
            Err(err) => {
                failures += 1;
                eprintln!("  {}: {err}", out_path.display());
            }
        }
    }
    if failures > 0 {
        bail!(
            "{failures} of {} schedules could not be built",
            args.permutations
        );
    }
    Ok(())
}

fn run_summary(files: &[PathBuf]) -> anyhow::Result<()> {
    if files.is_empty() {
        bail!("pass at least one schedule CSV");
    }
    for (index, path) in files.iter().enumerate() {
        if index > 0 {
            println!("\n{}\n", "=".repeat(60));
        }
        match summary::summarize(path) {
            Ok(report) => println!("{report}"),
            Err(err) => eprintln!("{err}"),
        }
    }
    Ok(())
}

fn run_gen(
    config: &Config,
    groups_out: &Path,
    bofs_out: &Path,
    groups: usize,
    bofs: usize,
) -> anyhow::Result<()> {
    let written = sample::write_sample_groups(groups_out, &config.groups, groups)?;
    println!("Generated {written} working groups in {}", groups_out.display());
    let written = sample::write_sample_bofs(bofs_out, &config.bofs, bofs)?;
    println!("Generated {written} BOFs in {}", bofs_out.display());
    Ok(())
}

/// `schedule.csv` with index 2 becomes `schedule2.csv`.
fn numbered_path(base: &Path, index: usize) -> PathBuf {
    match base.file_stem().and_then(|stem| stem.to_str()) {
        Some(stem) => {
            let ext = base.extension().and_then(|ext| ext.to_str()).unwrap_or("csv");
            base.with_file_name(format!("{stem}{index}.{ext}"))
        }
        None => base.with_file_name(format!("schedule{index}.csv")),
    }
}

/// 1-based list of fully empty blocks, e.g. ` (blocks 2,4 unused)`.
fn advisory(empty_blocks: &[usize]) -> String {
    if empty_blocks.is_empty() {
        return String::new();
    }
    let list: Vec<String> = empty_blocks.iter().map(|block| (block + 1).to_string()).collect();
    let word = if empty_blocks.len() == 1 { "block" } else { "blocks" };
    format!(" ({word} {} unused)", list.join(","))
}

fn tries_phrase(tries: usize) -> String {
    if tries == 1 {
        "1 schedule".to_string()
    } else {
        format!("{tries} schedules")
    }
}
