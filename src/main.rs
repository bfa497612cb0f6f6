use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use gazeparquet::{
    config::{Compression, Config, ScanOrder, SchemaMode, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_PATH},
    convert,
    schema::{ColumnOverride, TypePolicy},
};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Convert a tree of per-session eye-tracking CSVs into one Parquet archive.
#[derive(Debug, Parser)]
#[command(name = "gazeparquet", version, about)]
struct Cli {
    /// Directory searched recursively for `.csv` recordings.
    #[arg(long, env = "GAZEPARQUET_INPUT_DIR", default_value = DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,

    /// Destination archive; replaced if it exists.
    #[arg(short, long, env = "GAZEPARQUET_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// How to treat files whose columns differ from the first file's.
    #[arg(long, value_enum, default_value_t = SchemaMode::Strict)]
    schema_mode: SchemaMode,

    /// Visiting order of input files.
    #[arg(long, value_enum, default_value_t = ScanOrder::Sorted)]
    order: ScanOrder,

    #[arg(long, value_enum, default_value_t = Compression::Snappy)]
    compression: Compression,

    /// Override the storage type of a column, e.g. `--column-type lab=int32`.
    #[arg(long = "column-type", value_name = "NAME=TYPE")]
    column_types: Vec<ColumnOverride>,

    /// Keep the task code (e.g. VRG) as a `task_code` column.
    #[arg(long)]
    include_task_code: bool,

    /// Print the run summary as JSON on stdout.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn into_config(self) -> (Config, bool) {
        let policy = self
            .column_types
            .into_iter()
            .fold(TypePolicy::default(), |policy, o| {
                policy.with_override(o.column, o.ty)
            });
        let config = Config {
            input_dir: self.input_dir,
            output_path: self.output,
            policy,
            schema_mode: self.schema_mode,
            scan_order: self.order,
            compression: self.compression,
            include_task_code: self.include_task_code,
        };
        (config, self.json)
    }
}

fn run(config: &Config, json: bool) -> Result<()> {
    let summary = convert(config).with_context(|| {
        format!(
            "converting {} to {}",
            config.input_dir.display(),
            config.output_path.display()
        )
    })?;
    info!(
        files = summary.files,
        rows = summary.rows,
        columns = summary.columns,
        "wrote {}",
        summary.output_path.display()
    );
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

fn main() -> ExitCode {
    // ─── init logging ────────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    let (config, json) = Cli::parse().into_config();
    info!(?config, "startup");

    match run(&config, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
