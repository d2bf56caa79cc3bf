use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;
use tokenpress::css::media::merge_adjacent_media;
use tokenpress::CodegenOptions;
use tokenpress_schema::StyleSchema;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the schema JSON document
    #[arg(value_name = "SCHEMA")]
    schema: PathBuf,

    /// Output directory for the CSS bundles and class map
    #[arg(long, value_name = "DIR", default_value = "dist")]
    out_dir: PathBuf,

    /// Also emit activator-gated forced-state selectors
    #[arg(long)]
    force_states: bool,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogFormat {
    Pretty,
    Json,
}

fn main() {
    let cli = Cli::parse();

    // Initialize Logging
    let filter = EnvFilter::builder()
        .with_default_directive(cli.log_level.to_string().parse().unwrap())
        .from_env_lossy();

    let subscriber_builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match cli.log_format {
        LogFormat::Json => subscriber_builder.json().init(),
        LogFormat::Pretty => subscriber_builder.pretty().init(),
    }

    if let Err(e) = run(cli) {
        error!("Build failed: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    info!("Schema: {:?}", cli.schema);
    info!("Output: {:?}", cli.out_dir);

    let raw = fs::read_to_string(&cli.schema)
        .with_context(|| format!("reading schema {:?}", cli.schema))?;
    let schema: StyleSchema = serde_json::from_str(&raw)
        .with_context(|| format!("parsing schema {:?}", cli.schema))?;

    let options = CodegenOptions {
        force_states: cli.force_states,
    };
    let compiled = tokenpress::compile(&schema, options).context("compiling schema")?;

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating output directory {:?}", cli.out_dir))?;

    write_css(&cli.out_dir.join("core.css"), &compiled.css.core)?;
    write_css(&cli.out_dir.join("effects.css"), &compiled.css.effects)?;
    for (palette, css) in &compiled.css.palettes {
        // Palette names may contain path-hostile characters; keep only a
        // conservative set in file names.
        let safe: String = palette
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
            .collect();
        write_css(&cli.out_dir.join(format!("palette.{safe}.css")), css)?;
    }

    let map_path = cli.out_dir.join("classmap.json");
    let map_json =
        serde_json::to_string_pretty(&compiled.class_map).context("serializing class map")?;
    fs::write(&map_path, map_json).with_context(|| format!("writing {map_path:?}"))?;

    info!(
        palettes = compiled.css.palettes.len(),
        classes = compiled.shorten.len(),
        "Build complete"
    );
    Ok(())
}

fn write_css(path: &PathBuf, css: &str) -> anyhow::Result<()> {
    let merged = merge_adjacent_media(css);
    fs::write(path, merged + "\n").with_context(|| format!("writing {path:?}"))
}
