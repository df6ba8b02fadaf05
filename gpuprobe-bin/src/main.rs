//! Command-line interface for gpuprobe

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use gpuprobe::{GpuInfo, GpuModel, GpuVendor, ProbeError};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "gpuprobe")]
#[command(version = gpuprobe::VERSION)]
#[command(about = "GPU identification and compute limits for OpenGL ES contexts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output verbosity
    #[arg(short, long, global = true, value_enum, default_value_t = Verbosity::Normal)]
    verbosity: Verbosity,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a GL_RENDERER string
    Classify {
        /// Renderer string, e.g. "Adreno (TM) 630"
        renderer: String,
    },

    /// Probe a recorded GL context snapshot
    Probe {
        /// JSON snapshot of the context's answers
        #[arg(short, long, env = "GPUPROBE_CAPTURE")]
        capture: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Verbosity {
    Minimal,
    Normal,
    Detailed,
    Debug,
}

impl Verbosity {
    fn level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Minimal => log::LevelFilter::Error,
            Verbosity::Normal => log::LevelFilter::Warn,
            Verbosity::Detailed => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Trace,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides the verbosity flag
    env_logger::Builder::new()
        .filter_level(cli.verbosity.level_filter())
        .parse_default_env()
        .init();

    match &cli.command {
        Commands::Classify { renderer } => {
            let (vendor, model) = gpuprobe::classify(renderer);
            match cli.format {
                OutputFormat::Text => print_classification_text(vendor, model),
                OutputFormat::Json => {
                    let json = serde_json::json!({ "vendor": vendor, "model": model });
                    println!("{}", serde_json::to_string_pretty(&json)?);
                }
            }
        }

        Commands::Probe { capture } => match gpuprobe::probe_recorded(capture) {
            Ok(info) => match cli.format {
                OutputFormat::Text => print_gpu_info_text(&info, cli.verbosity),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
            },
            Err(ProbeError::Api { errors }) => {
                eprintln!("Error: probe failed");
                for error in &errors {
                    eprintln!("  {} (0x{:04x})", error, error.raw());
                }
                process::exit(2);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to load capture {}", capture.display()));
            }
        },

        Commands::Version => {
            println!("gpuprobe v{}", gpuprobe::version());
            println!("GPU identification for OpenGL ES compute");
        }
    }

    Ok(())
}

fn print_classification_text(vendor: GpuVendor, model: GpuModel) {
    println!("Vendor: {}", vendor);
    println!("Model: {}", model);
}

fn print_gpu_info_text(info: &GpuInfo, verbosity: Verbosity) {
    if verbosity == Verbosity::Minimal {
        println!("{} {}", info.vendor, info.model);
        return;
    }

    println!("GPU Information:");
    println!("================");
    println!("Vendor: {}", info.vendor);
    println!("Model: {}", info.model);

    if !info.renderer_name.is_empty() {
        println!("Renderer: {}", info.renderer_name);
    }

    if !info.vendor_name.is_empty() {
        println!("Driver Vendor: {}", info.vendor_name);
    }

    if !info.version.is_empty() {
        println!("Version: {}", info.version);
    }

    println!("OpenGL ES: {}.{}", info.major_version, info.minor_version);
    println!("Max SSBO Bindings: {}", info.max_ssbo_bindings);
    println!("Max Image Bindings: {}", info.max_image_bindings);
    println!(
        "Max Work Group Size: {} x {} x {}",
        info.max_work_group_size[0], info.max_work_group_size[1], info.max_work_group_size[2]
    );
    println!("Max Work Group Invocations: {}", info.max_work_group_invocations);
    println!("Max Texture Size: {}", info.max_texture_size);
    println!("Max Image Units: {}", info.max_image_units);
    println!("Max Array Texture Layers: {}", info.max_array_texture_layers);
    println!("Extensions: {}", info.extensions.len());

    if verbosity == Verbosity::Detailed || verbosity == Verbosity::Debug {
        for extension in &info.extensions {
            println!("  {}", extension);
        }
    }
}
