use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use slides::core::config::{self, CliOverrides};
use slides::tui::PresentError;
use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "slides", about = "Present a markdown file as slides in the terminal")]
struct Args {
    /// Document to present; slides are separated by `---`
    path: PathBuf,

    /// Theme JSON file (defaults to ./theme.json when present)
    #[arg(short, long)]
    theme: Option<PathBuf>,

    /// Name shown in the status bar
    #[arg(short, long)]
    author: Option<String>,
}

/// File logger at `~/.slides/slides.log`; logging stays off if it can't be created.
fn init_logging() {
    let Some(dir) = config::config_dir() else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(dir.join("slides.log")) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }
}

fn present(args: Args) -> Result<(), PresentError> {
    let file_config = config::load_config()?;
    let cli = CliOverrides {
        author: args.author,
        theme: args.theme,
    };
    let resolved = config::resolve(&file_config, args.path, &cli);
    slides::tui::run(resolved)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    log::info!("Slides starting up with {}", args.path.display());

    match present(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("slides: {e}");
            ExitCode::FAILURE
        }
    }
}
