use std::{
    io::Write,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{CommandFactory, Parser};
use pes::{Config, PesError, report::Summary};

/// harmonic stretching and bending frequencies of a triatomic molecule from a
/// directory of Gaussian single-point energies
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// directory of Gaussian output files, relative to the location of this
    /// program
    #[arg(value_parser)]
    dir: String,

    /// TOML file of plotting options
    #[arg(short, long)]
    config: Option<String>,

    /// Skip drawing the plots. Defaults to false.
    #[arg(short, long, default_value_t = false)]
    no_plot: bool,
}

/// Resolve `dir` against the directory holding the executable, ignoring any
/// leading separators, and fall back on `dir` as given
fn resolve(dir: &str) -> Option<PathBuf> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf));
    if let Some(exe_dir) = exe_dir {
        let path = exe_dir.join(dir.trim_start_matches(['/', '\\']));
        if path.is_dir() {
            return Some(path);
        }
    }
    let path = PathBuf::from(dir);
    path.is_dir().then_some(path)
}

fn usage(w: &mut impl Write) -> std::io::Result<()> {
    Args::command().write_help(w)?;
    writeln!(
        w,
        "
NB: the directory of Gaussian output files must exist, either next to the pes
executable or as a path from the current directory"
    )
}

fn run(args: Args, dir: PathBuf) -> Result<Summary, PesError> {
    let mut config = match &args.config {
        Some(f) => Config::load(f)?,
        None => Config::default(),
    };
    if args.no_plot {
        config.plot = false;
    }
    log::debug!("{config}");

    pes::run(&dir, &config)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let Some(dir) = resolve(&args.dir) else {
        if let Err(e) = usage(&mut std::io::stdout()) {
            eprintln!("error: failed to print usage: {e}");
        }
        return ExitCode::FAILURE;
    };
    match run(args, dir) {
        Ok(summary) => match summary.write(&mut std::io::stdout()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: failed to write summary: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
