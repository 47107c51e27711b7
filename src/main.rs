use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flagmaker::models::{AppConfig, ConfigSource, CONFIG_ENV};
use flagmaker::services::{expand_sources, ActiveFlagFile, FlagPipeline, FlagStore};

#[derive(Parser)]
#[command(name = "flagmaker")]
#[command(about = "FlagMaker - turn any image into a palette-addressed flag")]
struct Cli {
    /// Config file (overrides FLAGMAKER_CONFIG and ./flagmaker.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a flag for each source image and make the last one active
    Generate {
        /// Source images or directories (default: configured source image)
        sources: Vec<PathBuf>,

        /// Palette image
        #[arg(short, long)]
        palette: Option<PathBuf>,

        /// Brightness offset, -1 to 1
        #[arg(long, allow_hyphen_values = true)]
        brightness: Option<f32>,

        /// Contrast factor, 1 to 10
        #[arg(long)]
        contrast: Option<f32>,

        /// Sharpen strength, 0 to 2
        #[arg(long)]
        sharpen: Option<f32>,

        /// Median filter size, odd, 1 to 9
        #[arg(long)]
        noise: Option<usize>,

        /// Save only, do not update the active flag
        #[arg(long)]
        no_apply: bool,

        /// Print each generated flag to stdout
        #[arg(long)]
        stdout: bool,
    },
    /// List saved flags
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Make a saved flag the active one
    Apply {
        /// Saved flag name (source base name) or path to a flag file
        name: String,
    },
    /// Render a saved flag back through the palette to a PNG file
    Preview {
        /// Saved flag name or path to a flag file
        flag: String,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Integer upscale factor
        #[arg(short, long, default_value_t = 4)]
        scale: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flagmaker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let (config, source) = AppConfig::load(cli.config.as_deref())?;
    tracing::debug!(%source, "Configuration resolved");

    match cli.command {
        Some(Commands::Generate {
            sources,
            palette,
            brightness,
            contrast,
            sharpen,
            noise,
            no_apply,
            stdout,
        }) => {
            let mut config = config;
            if let Some(palette) = palette {
                config.palette_image = palette;
            }
            if let Some(brightness) = brightness {
                config.adjustments.brightness = brightness;
            }
            if let Some(contrast) = contrast {
                config.adjustments.contrast = contrast;
            }
            if let Some(sharpen) = sharpen {
                config.adjustments.sharpen = sharpen;
            }
            if let Some(noise) = noise {
                config.adjustments.noise = noise;
            }
            run_generate_command(config.normalized(), sources, !no_apply, stdout).await
        }
        Some(Commands::List { json }) => run_list_command(&config, json).await,
        Some(Commands::Apply { name }) => {
            let pipeline = open_pipeline(config)?;
            let flag = pipeline.apply_saved(&name).await?;
            println!("Applied {name} ({} tokens)", flag.token_count());
            Ok(())
        }
        Some(Commands::Preview {
            flag,
            output,
            scale,
        }) => {
            let pipeline = open_pipeline(config)?;
            let png_bytes = pipeline.preview(&flag, scale).await?;
            tokio::fs::write(&output, &png_bytes).await?;
            println!("Rendered {} ({} bytes)", output.display(), png_bytes.len());
            Ok(())
        }
        None => run_status_command(&config, &source).await,
    }
}

fn open_pipeline(config: AppConfig) -> anyhow::Result<FlagPipeline> {
    let sink = Arc::new(ActiveFlagFile::new(&config.active_flag_file));
    Ok(FlagPipeline::new(Arc::new(config), sink)?)
}

async fn run_generate_command(
    config: AppConfig,
    sources: Vec<PathBuf>,
    apply: bool,
    stdout: bool,
) -> anyhow::Result<()> {
    let sources = if sources.is_empty() {
        vec![config.source_image.clone()]
    } else {
        expand_sources(&sources)?
    };
    if sources.is_empty() {
        anyhow::bail!("No source images found");
    }

    let pipeline = open_pipeline(config)?.with_apply(apply);

    if let [single] = sources.as_slice() {
        let report = pipeline.generate(single).await?;
        if stdout {
            println!("{}", report.flag);
        } else {
            print_report_line(&report.source, &report.saved_to, report.applied);
        }
        return Ok(());
    }

    let results = pipeline.generate_many(&sources).await?;
    let mut failed = 0;
    for (source, result) in sources.iter().zip(&results) {
        match result {
            Ok(report) if stdout => println!("{}", report.flag),
            Ok(report) => print_report_line(&report.source, &report.saved_to, report.applied),
            Err(e) => {
                failed += 1;
                eprintln!("  ! {}: {e}", source.display());
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} flags failed", results.len());
    }
    Ok(())
}

fn print_report_line(source: &Path, saved_to: &Path, applied: bool) {
    let marker = if applied { " (active)" } else { "" };
    println!(
        "  + {} -> {}{marker}",
        source.display(),
        saved_to.display()
    );
}

async fn run_list_command(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let store = FlagStore::new(&config.saved_flags_dir)?.excluding(&config.active_flag_file);
    let flags = store.list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&flags)?);
        return Ok(());
    }

    if flags.is_empty() {
        println!("No saved flags in {}", store.dir().display());
        return Ok(());
    }
    for flag in &flags {
        println!(
            "  {:<24} {}",
            flag.name,
            flag.modified.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}

/// Display configuration and saved-flag status
async fn run_status_command(config: &AppConfig, source: &ConfigSource) -> anyhow::Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("FlagMaker v{VERSION}");
    println!("Turn any image into a palette-addressed flag\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV} = {}",
        std::env::var(CONFIG_ENV).as_deref().unwrap_or("(not set)")
    );

    println!("\nConfiguration ({source}):");
    println!("  Source:      {}", config.source_image.display());
    println!("  Palette:     {}", config.palette_image.display());
    println!("  Saved flags: {}", config.saved_flags_dir.display());
    println!("  Active flag: {}", config.active_flag_file.display());
    println!("  Target:      {}", config.target);

    let adj = &config.adjustments;
    println!("\nAdjustments:");
    println!("  brightness = {}", adj.brightness);
    println!("  contrast   = {}", adj.contrast);
    println!("  sharpen    = {}", adj.sharpen);
    println!("  noise      = {}", adj.noise);

    let saved = if config.saved_flags_dir.is_dir() {
        FlagStore::new(&config.saved_flags_dir)?
            .excluding(&config.active_flag_file)
            .list()
            .await?
            .len()
    } else {
        0
    };
    let active = if config.active_flag_file.exists() {
        "set"
    } else {
        "(none)"
    };
    println!("\nFlags:");
    println!("  Saved:  {saved}");
    println!("  Active: {active}");

    println!("\nCommands:");
    println!("  flagmaker generate   Generate flags from source images");
    println!("  flagmaker list       List saved flags");
    println!("  flagmaker apply      Make a saved flag active");
    println!("  flagmaker preview    Render a flag to PNG");
    println!("\nRun 'flagmaker --help' for more details.");
    Ok(())
}
