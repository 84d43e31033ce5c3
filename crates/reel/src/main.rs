mod render;

use clap::{Parser, Subcommand};
use reel_engine::backend::Backend;
use reel_engine::cli::{self, Console};
use reel_engine::codegen::{Framework, GenerateOptions, Language};
use reel_engine::config::ConfigLoader;
use reel_engine::dry_run::DryRunBackend;
use reel_engine::executor::CommandExecutor;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reel", version, about = "Record browser actions and generate test code")]
struct Args {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Script to execute (non-interactive mode)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Config file to use instead of ./reel.yaml or ~/.reel/config.yaml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for generated tests and screenshots
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Mode {
    /// Render a saved JSON action log to stdout
    Render {
        #[arg(long)]
        log: PathBuf,
        /// playwright, puppeteer or selenium
        #[arg(long)]
        framework: Option<Framework>,
        /// typescript, javascript or python
        #[arg(long)]
        language: Option<Language>,
        /// Test name
        #[arg(long, default_value = "")]
        name: String,
    },
}

const BANNER: &[&str] = &[
    "Dry-run browser ready. Enter commands (e.g., 'record start login', 'goto example.com').",
    "Use 'generate [framework] [language] [file]' to write a test from the recording.",
    "Type 'exit' or 'quit' to close.",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stderr keeps stdout clean for generated code
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = ConfigLoader::load(args.config.as_deref()).await?.config;
    if let Some(dir) = args.output_dir {
        config.output.directory = dir;
    }

    if let Some(Mode::Render {
        log,
        framework,
        language,
        name,
    }) = args.mode
    {
        let options = GenerateOptions::new(
            framework.unwrap_or(config.codegen.framework),
            language.unwrap_or(config.codegen.language),
        )
        .with_interpolation(config.codegen.interpolation());
        let actions = render::load_log(&log).await?;
        let code = render::render(&actions, &name, &options)?;
        for kind in code.skipped() {
            eprintln!("Skipped {} (no {} equivalent)", kind, options.framework);
        }
        print!("{}", code.source);
        return Ok(());
    }

    let mut backend = DryRunBackend::new(&config.dry_run);
    if let Err(e) = backend.launch().await {
        eprintln!("Failed to launch backend: {}", e);
        return Err(e.into());
    }

    let mut executor = CommandExecutor::new(&config);
    if let Some(name) = &config.recording.auto_start {
        executor.start_recording(name)?;
    }
    info!("Writing artifacts to {}", config.output.directory.display());

    let report = match args.file {
        Some(file_path) => {
            match cli::run_file(&mut backend, &mut executor, Console::STDIO, &file_path).await {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("Error executing {}: {}", file_path.display(), e);
                    return Err(e.into());
                }
            }
        }
        None => cli::run_repl(&mut backend, &mut executor, Console::STDIO, BANNER).await?,
    };
    eprintln!("{}", report.summary(&executor));

    backend.close().await?;
    Ok(())
}
