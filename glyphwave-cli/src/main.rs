mod analyze;
mod error;
mod image_list;
mod normalize;
mod sniff;

use clap::{Parser, Subcommand};
use error::MediaError;
use glyphwave_core::VisualizerConfig;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const DEFAULT_IMAGES_DIR: &str = "static/images";

#[derive(Parser)]
#[command(name = "glyphwave-media", version, about = "Prepare images and inspect tracks for the glyphwave page")]
struct Cli {
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the JSON image list the page fetches
    List {
        /// Image directory [default: $GLYPHWAVE_IMAGES_DIR or static/images]
        #[arg(long)]
        dir: Option<PathBuf>,
        #[arg(long, default_value = "static/images.json")]
        out: PathBuf,
        /// Path prefix written before each file name
        #[arg(long, default_value = DEFAULT_IMAGES_DIR)]
        prefix: String,
        /// Leave out files with identical content
        #[arg(long)]
        dedupe: bool,
    },
    /// Report the real type of every file in a directory
    Sniff {
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Rename GIFs and convert other media to GIF with ffmpeg
    Normalize {
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Apply the plan (otherwise only print it)
        #[arg(long)]
        yes: bool,
        /// Delete HTML pages and dead-link notices
        #[arg(long)]
        delete_junk: bool,
        #[arg(long, default_value = "ffmpeg")]
        ffmpeg: String,
    },
    /// Print per-frame band energy and scale for a WAV file
    Analyze {
        wav: PathBuf,
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
        /// JSON visualizer config overriding the defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn images_dir(arg: Option<PathBuf>) -> PathBuf {
    arg.or_else(|| std::env::var_os("GLYPHWAVE_IMAGES_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGES_DIR))
}

fn load_config(path: Option<&Path>) -> Result<VisualizerConfig, MediaError> {
    match path {
        Some(p) => {
            let text = std::fs::read_to_string(p).map_err(|e| MediaError::io(p, e))?;
            Ok(VisualizerConfig::from_json(&text)?)
        }
        None => Ok(VisualizerConfig::default()),
    }
}

fn run(cli: Cli) -> Result<(), MediaError> {
    match cli.command {
        Commands::List { dir, out, prefix, dedupe } => {
            let dir = images_dir(dir);
            let list = image_list::collect_images(&dir, &prefix, dedupe)?;
            image_list::write_list(&out, &list)?;
            println!("Generated {} with {} images", out.display(), list.len());
        }
        Commands::Sniff { dir } => {
            let dir = images_dir(dir);
            let mut rows: Vec<(String, &'static str)> = Vec::new();
            for entry in std::fs::read_dir(&dir).map_err(|e| MediaError::io(&dir, e))? {
                let path = entry.map_err(|e| MediaError::io(&dir, e))?.path();
                if !path.is_file() {
                    continue;
                }
                let label = match sniff::sniff_file(&path) {
                    Ok(kind) => kind.label(),
                    Err(e) => {
                        log::warn!("Cannot read {}: {}", path.display(), e);
                        "unreadable"
                    }
                };
                let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
                rows.push((name, label));
            }
            rows.sort();
            let width = rows.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
            for (name, label) in &rows {
                println!("{:<width$}  {}", name, label, width = width);
            }
        }
        Commands::Normalize { dir, yes, delete_junk, ffmpeg } => {
            let dir = images_dir(dir);
            let actions = normalize::plan(&dir)?;
            if !yes {
                for action in &actions {
                    println!("{}", describe(action));
                }
                println!("\nDry run: {} files. Re-run with --yes to apply.", actions.len());
                return Ok(());
            }
            let summary = normalize::execute(&actions, &normalize::NormalizeOptions { delete_junk, ffmpeg });
            println!("{}", "=".repeat(50));
            println!("SUMMARY:");
            println!("  Converted: {}", summary.converted);
            println!("  Renamed:   {}", summary.renamed);
            println!("  Skipped:   {}", summary.skipped);
            println!("  Failed:    {}", summary.failed);
            if delete_junk {
                println!("  Deleted:   {}", summary.deleted);
            }
            println!("{}", "=".repeat(50));
        }
        Commands::Analyze { wav, fps, config } => {
            let config = load_config(config.as_deref())?;
            let reports = analyze::analyze_wav(&wav, fps, &config)?;
            println!("{:>8}  {:>6}  {:>6}  {:>7}  {:>7}", "time", "bass", "treble", "scaleX", "scaleY");
            for r in &reports {
                println!(
                    "{:>8.3}  {:>6.3}  {:>6.3}  {:>7.3}  {:>7.3}",
                    r.time_secs, r.bands.bass, r.bands.treble, r.scale.x, r.scale.y
                );
            }
        }
    }
    Ok(())
}

fn describe(action: &normalize::Action) -> String {
    use normalize::Action;
    let name = |p: &Path| p.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    match action {
        Action::InPlace { path } => format!("keep     {}", name(path)),
        Action::Rename { from, to } => format!("rename   {} -> {}", name(from), name(to)),
        Action::Convert { from, to, kind } => format!("convert  {} ({}) -> {}", name(from), kind.label(), name(to)),
        Action::Junk { path, kind } => format!("junk     {} ({})", name(path), kind.label()),
        Action::Skip { path, kind } => format!(
            "skip     {} ({})",
            name(path),
            kind.map(|k| k.label()).unwrap_or("unreadable")
        ),
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    let _ = simple_logger::SimpleLogger::new().with_level(level).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
