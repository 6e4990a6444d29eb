use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use cf_export::{save_restart, BodyState, EnsightExporter, RestartManifest};
use cf_grid::NCONS;
use cf_ibm::{classify, Sphere};
use cf_solver::SolverError;

#[derive(Parser)]
#[command(name = "cf-cli")]
#[command(about = "cartflow - compressible flow solver with immersed boundaries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a case to completion, exporting snapshots and a restart state
    Solve {
        /// Path to the case YAML file
        case_path: PathBuf,
        /// Output directory (defaults to <case dir>/<case name>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Classify the domain and export the initial state without solving
    Preprocess {
        /// Path to the case YAML file
        case_path: PathBuf,
        /// Output directory (defaults to <case dir>/<case name>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Re-export the field stored in a restart directory
    Postprocess {
        /// Path to the case YAML file
        case_path: PathBuf,
        /// Restart directory (defaults to <output>/restart)
        #[arg(short, long)]
        restart: Option<PathBuf>,
        /// Output directory (defaults to <case dir>/<case name>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

type CliResult<T> = Result<T, CliError>;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("Case error: {0}")]
    Case(#[from] cf_case::CaseError),

    #[error("Solver error: {0}")]
    Solver(#[from] cf_solver::SolverError),

    #[error("Export error: {0}")]
    Export(#[from] cf_export::ExportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Solve { case_path, output }) => cmd_solve(&case_path, output),
        Some(Commands::Preprocess { case_path, output }) => cmd_preprocess(&case_path, output),
        Some(Commands::Postprocess {
            case_path,
            restart,
            output,
        }) => cmd_postprocess(&case_path, restart, output),
        None => interactive(),
    }
}

fn output_dir(case_path: &Path, output: Option<PathBuf>, name: &str) -> PathBuf {
    output.unwrap_or_else(|| {
        case_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(name)
    })
}

fn cmd_solve(case_path: &Path, output: Option<PathBuf>) -> CliResult<()> {
    let case = cf_case::load_yaml(case_path)?;
    let setup = cf_case::resolve(&case)?;
    let out_dir = output_dir(case_path, output, &setup.name);

    let mut exporter = EnsightExporter::new(&out_dir, &setup.output.prefix)?;
    let state = cf_solver::run(&setup, |space, state, index| {
        exporter
            .write_snapshot(
                space,
                &setup.partition,
                &setup.model,
                state.field.now(),
                &state.bodies,
                index,
                state.time,
            )
            .map_err(|e| SolverError::Export {
                what: e.to_string(),
            })
    })?;

    let manifest = RestartManifest {
        name: setup.name.clone(),
        step: state.step,
        time: state.time,
        bodies: state.bodies.iter().map(BodyState::from).collect(),
    };
    save_restart(&out_dir.join("restart"), &manifest, state.field.now())?;

    println!(
        "completed {} steps to t = {:.6}; output in {}",
        state.step,
        state.time,
        out_dir.display()
    );
    Ok(())
}

fn cmd_preprocess(case_path: &Path, output: Option<PathBuf>) -> CliResult<()> {
    let case = cf_case::load_yaml(case_path)?;
    let setup = cf_case::resolve(&case)?;
    let out_dir = output_dir(case_path, output, &setup.name);

    let mut space = setup.space.clone();
    classify(&mut space, &setup.partition, &setup.bodies);
    let field = setup.initial_field();

    let mut exporter = EnsightExporter::new(&out_dir, &setup.output.prefix)?;
    exporter.write_snapshot(
        &space,
        &setup.partition,
        &setup.model,
        field.now(),
        &setup.bodies,
        0,
        0.0,
    )?;

    println!("preprocessed {}; geometry in {}", setup.name, out_dir.display());
    Ok(())
}

fn cmd_postprocess(
    case_path: &Path,
    restart: Option<PathBuf>,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let case = cf_case::load_yaml(case_path)?;
    let setup = cf_case::resolve(&case)?;
    let out_dir = output_dir(case_path, output, &setup.name);
    let restart_dir = restart.unwrap_or_else(|| out_dir.join("restart"));

    let (manifest, buf) = cf_export::load_restart(&restart_dir, NCONS * setup.space.n_max)?;
    let bodies: Vec<Sphere> = manifest.bodies.iter().map(Into::into).collect();

    let mut space = setup.space.clone();
    classify(&mut space, &setup.partition, &bodies);

    let mut exporter = EnsightExporter::new(&out_dir, &setup.output.prefix)?;
    exporter.write_snapshot(
        &space,
        &setup.partition,
        &setup.model,
        &buf,
        &bodies,
        0,
        manifest.time,
    )?;

    println!(
        "re-exported step {} (t = {:.6}) to {}",
        manifest.step,
        manifest.time,
        out_dir.display()
    );
    Ok(())
}

fn interactive() -> CliResult<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        println!("cartflow interactive mode");
        println!("  1) solve  2) preprocess  3) postprocess  q) quit");
        print!("> ");
        io::stdout().flush()?;
        let Some(choice) = lines.next().transpose()? else {
            return Ok(());
        };
        let choice = choice.trim().to_string();
        if choice == "q" {
            return Ok(());
        }
        if !["1", "2", "3"].contains(&choice.as_str()) {
            println!("unrecognized choice '{choice}'");
            continue;
        }

        print!("case file: ");
        io::stdout().flush()?;
        let Some(path) = lines.next().transpose()? else {
            return Ok(());
        };
        let path = PathBuf::from(path.trim());

        let result = match choice.as_str() {
            "1" => cmd_solve(&path, None),
            "2" => cmd_preprocess(&path, None),
            _ => cmd_postprocess(&path, None, None),
        };
        if let Err(e) = result {
            eprintln!("error: {e}");
        }
    }
}
