//! mol2squonk - convert a MOL or SD file into a Squonk dataset

use anyhow::{Context, Result};
use clap::Parser;
use squonk_common::logging::{init_logging, LogConfig, LogLevel};
use squonk_convert::config::Config;
use squonk_convert::{convert, convert_mol_as_sdf, dialect, output, ConversionStatus};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "mol2squonk")]
#[command(author, version, about = "Convert MOL/SDF files to Squonk datasets")]
struct Cli {
    /// Input file (.mol, .sdf, optionally .gz compressed)
    in_file: PathBuf,

    /// Output base; writes <out_base>.data and <out_base>.metadata
    out_base: PathBuf,

    /// Input format (mol or sdf); inferred from the extension if omitted
    #[arg(short, long)]
    format: Option<String>,

    /// Treat a single MOL file as a one-record SD file
    #[arg(long, conflicts_with = "format")]
    as_sdf: bool,

    /// Reduce records to BasicObjects using their SMI field
    #[arg(long)]
    basic: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Directory for relative output bases
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("mol2squonk")
        .build()
        .with_env_overrides()?;
    let _log_guard = init_logging(&log_config)?;

    let mut config = Config::from_env().context("Invalid output configuration")?;
    if let Some(dir) = cli.output_dir.clone() {
        config.set_output_dir(dir);
    }
    if cli.pretty {
        config.set_pretty(true);
    }

    let converted = if cli.as_sdf {
        convert_mol_as_sdf(&cli.in_file)
    } else {
        convert(&cli.in_file, cli.format.as_deref())
    };

    let converted = if cli.basic {
        converted.and_then(dialect::reduce_to_basic)
    } else {
        converted
    };

    let result = match converted {
        Ok(result) => result,
        Err(e) => {
            error!(input = %cli.in_file.display(), error = %e, "Error converting");
            let code = ConversionStatus::Failed(e.status_code()).code();
            return Ok(exit_code(code));
        },
    };

    let files = output::write_dataset(&result, &cli.out_base, &config)
        .with_context(|| format!("Failed to write dataset {}", cli.out_base.display()))?;

    info!(
        records = result.records.len(),
        data = %files.data.display(),
        media_type = result.data_media_type(),
        "Conversion complete"
    );
    Ok(exit_code(result.status().code()))
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
