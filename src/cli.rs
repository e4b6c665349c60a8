//! Command-line interface implementation

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::convert::convert;
use crate::document::document_info;
use crate::output::{generate_output_path, write_png};

/// Exit codes
const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// Asepng - Convert Aseprite sprite files to PNG
#[derive(Parser)]
#[command(name = "asepng")]
#[command(about = "Asepng - Convert Aseprite sprite files (.aseprite, .ase) to PNG")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert one frame of an Aseprite file to a PNG image
    Convert {
        /// Input .aseprite/.ase file
        input: PathBuf,

        /// Output file or directory.
        /// If omitted: input path with a .png extension
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Frame index to convert (default: first frame)
        #[arg(long, default_value = "0")]
        frame: usize,

        /// Scale output by integer factor (1-16, default: 1)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=16))]
        scale: u8,

        /// Strict mode: treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Show document structure (canvas, frames, layers)
    Info {
        /// Input .aseprite/.ase file
        input: PathBuf,

        /// Emit machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            frame,
            scale,
            strict,
        } => run_convert(&input, output.as_deref(), frame, scale, strict),
        Commands::Info { input, json } => run_info(&input, json),
    }
}

/// Execute the convert command
fn run_convert(
    input: &Path,
    output: Option<&Path>,
    frame: usize,
    scale: u8,
    strict: bool,
) -> ExitCode {
    let data = match fs::read(input) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: Cannot read input file '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let conversion = match convert(&data, frame, scale) {
        Ok(conversion) => conversion,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // In strict mode, warnings are fatal and nothing is written
    if strict && !conversion.warnings.is_empty() {
        for warning in &conversion.warnings {
            eprintln!("Error: {}", warning.message);
        }
        return ExitCode::from(EXIT_ERROR);
    }
    for warning in &conversion.warnings {
        eprintln!("Warning: {}", warning.message);
    }

    let output_path = generate_output_path(input, output);
    if let Err(e) = write_png(&output_path, &conversion.png) {
        eprintln!(
            "Error: Cannot write output file '{}': {}",
            output_path.display(),
            e
        );
        return ExitCode::from(EXIT_ERROR);
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the info command
fn run_info(input: &Path, json: bool) -> ExitCode {
    let data = match fs::read(input) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: Cannot read input file '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let info = match document_info(&data) {
        Ok(info) => info,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if json {
        match serde_json::to_string_pretty(&info) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    println!(
        "{}: {}x{}, {}-bit, {} frame(s)",
        input.display(),
        info.width,
        info.height,
        info.color_depth,
        info.frame_count
    );
    println!();
    println!("Frames:");
    for frame in &info.frames {
        println!(
            "  {}: {} ms ({} chunk(s))",
            frame.index, frame.duration_ms, frame.chunks
        );
    }
    println!();
    println!("Layers:");
    for (index, layer) in info.layers.iter().enumerate() {
        let visibility = if layer.visible { "visible" } else { "hidden" };
        println!(
            "  {}: {} ({}, opacity {})",
            index, layer.name, visibility, layer.opacity
        );
    }

    ExitCode::from(EXIT_SUCCESS)
}
