use std::path::{Path, PathBuf};

use attendance_totals::batch::{BatchManifest, RegisterBatch};
use attendance_totals::logging;
use attendance_totals::pipeline::{self, DEFAULT_OUTPUT, RunOutcome};
use attendance_totals::Result;
use clap::{Parser, Subcommand};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    logging::init_tracing(cli.log_level.as_deref())?;
    match cli.command {
        Command::Total(args) => execute_total(args),
        Command::Check(args) => execute_check(args),
    }
}

fn execute_total(args: TotalArgs) -> Result<()> {
    let batch = args.registers.into_batch()?;
    match pipeline::total_attendance(&batch, &args.output)? {
        RunOutcome::Written {
            path,
            people,
            groups,
        } => {
            println!(
                "wrote totals for {people} people across {groups} groups to {}",
                path.display()
            );
        }
        RunOutcome::NothingToWrite => println!("no attendance data, nothing written"),
    }
    Ok(())
}

fn execute_check(args: CheckArgs) -> Result<()> {
    let batch = args.registers.into_batch()?;
    pipeline::check_batch(&batch)?;
    println!("{} registers are well formed", batch.len());
    Ok(())
}

fn manifest_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Total attendance across several group registers."
)]
struct Cli {
    /// Log filter, e.g. `info` or `attendance_totals=debug`. Defaults to RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the totals workbook from a batch of registers.
    Total(TotalArgs),
    /// Check that every register is well formed without writing anything.
    Check(CheckArgs),
}

#[derive(clap::Args)]
struct RegisterArgs {
    /// Register to include, as GROUP=PATH. Repeat for each group.
    #[arg(long = "register", short = 'r', value_name = "GROUP=PATH")]
    registers: Vec<String>,

    /// JSON manifest listing registers; its entries come before --register ones.
    #[arg(long)]
    manifest: Option<PathBuf>,
}

impl RegisterArgs {
    fn into_batch(self) -> Result<RegisterBatch> {
        let mut batch = RegisterBatch::new();
        if let Some(path) = &self.manifest {
            let manifest = BatchManifest::load(path)?;
            batch.extend_from_manifest(manifest, manifest_dir(path))?;
        }
        for spec in &self.registers {
            batch.add_spec(spec)?;
        }
        Ok(batch)
    }
}

#[derive(clap::Args)]
struct TotalArgs {
    #[command(flatten)]
    registers: RegisterArgs,

    /// Output workbook path.
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

#[derive(clap::Args)]
struct CheckArgs {
    #[command(flatten)]
    registers: RegisterArgs,
}
