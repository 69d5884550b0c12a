//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `employee_reports` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Staging file output and user-facing summaries
//!
//! All core functionality is implemented in the library crate.

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use tokio::io::AsyncWriteExt;

use employee_reports::config::{DB_PATH, DB_PATH_ENV};
use employee_reports::export::{prepare_export, resolve_destination, StagedFile};
use employee_reports::initialization::init_logger_with;
use employee_reports::storage::{
    init_db_pool_with_path, run_migrations, seed_sample_data, DbPool, EmployeeStore,
};
use employee_reports::{Config, ExportFormat, ExportSummary, LogFormat, LogLevel, SortField, SortOrder};

#[derive(Debug, Parser)]
#[command(name = "employee_reports", version, about = "Export employee reports as CSV or PDF")]
struct Cli {
    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Export employees as CSV or PDF
    Export(ExportCommand),
    /// Create or upgrade the database schema
    Migrate(DatabaseArgs),
    /// Migrate and insert sample departments and employees
    Seed(DatabaseArgs),
}

#[derive(Debug, Args)]
struct DatabaseArgs {
    /// SQLite database path
    #[arg(long, env = DB_PATH_ENV, default_value = DB_PATH)]
    db_path: PathBuf,
}

#[derive(Debug, Args)]
struct ExportCommand {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    format: ExportFormat,

    /// Only export this department
    #[arg(long)]
    department_id: Option<i64>,

    /// Add Created At / Updated At columns (CSV)
    #[arg(long)]
    include_timestamps: bool,

    /// Sort column
    #[arg(long, value_enum, default_value_t = SortField::Name)]
    sort_by: SortField,

    /// Sort direction
    #[arg(long, value_enum, default_value_t = SortOrder::Asc)]
    order: SortOrder,

    /// Output file or directory (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl ExportCommand {
    fn into_config(self, cli_level: LogLevel, cli_format: LogFormat) -> Config {
        Config {
            db_path: self.database.db_path,
            log_level: cli_level,
            log_format: cli_format,
            output: self.output,
            format: self.format,
            department_id: self.department_id,
            include_timestamps: self.include_timestamps,
            sort_by: self.sort_by,
            order: self.order,
        }
    }
}

async fn open_database(db_path: &Path) -> Result<DbPool> {
    let pool = init_db_pool_with_path(db_path)
        .await
        .context("Failed to initialize database pool")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(pool)
}

async fn run_export(config: Config) -> Result<(ExportSummary, Option<PathBuf>)> {
    let pool = open_database(&config.db_path).await?;
    let store = EmployeeStore::new(Arc::clone(&pool));
    let prepared = prepare_export(&store, config.export_request())
        .await
        .context("Failed to query employees")?;

    match &config.output {
        Some(output) => {
            let destination = resolve_destination(output, &prepared.header().filename);
            let staged = StagedFile::create(&destination).with_context(|| {
                format!("Failed to create staging file for {}", destination.display())
            })?;
            let mut writer = staged.writer().context("Failed to open staging file")?;

            match prepared.write_to(&mut writer).await {
                Ok(summary) => {
                    writer
                        .sync_all()
                        .await
                        .context("Failed to sync export file")?;
                    drop(writer);
                    let path = staged
                        .commit()
                        .with_context(|| format!("Failed to write {}", destination.display()))?;
                    Ok((summary, Some(path)))
                }
                Err(e) => {
                    drop(writer);
                    staged.discard();
                    Err(e).context("Export failed")
                }
            }
        }
        None => {
            let mut stdout = tokio::io::stdout();
            let summary = prepared
                .write_to(&mut stdout)
                .await
                .context("Export failed")?;
            stdout.flush().await.context("Failed to flush stdout")?;
            Ok((summary, None))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Export(cmd) => {
            let config = cmd.into_config(cli.log_level, cli.log_format);
            let (summary, path) = run_export(config).await?;
            if let Some(path) = path {
                // stdout carries the body when no --output is given, so only report file exports there
                println!(
                    "Exported {} employee{} to {}",
                    summary.records,
                    if summary.records == 1 { "" } else { "s" },
                    path.display()
                );
            }
        }
        Command::Migrate(args) => {
            let pool = init_db_pool_with_path(&args.db_path)
                .await
                .context("Failed to initialize database pool")?;
            let version = run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            println!(
                "Database {} is at schema version {}",
                args.db_path.display(),
                version
            );
        }
        Command::Seed(args) => {
            let pool = open_database(&args.db_path).await?;
            let report = seed_sample_data(&pool)
                .await
                .context("Failed to seed sample data")?;
            info!("Seed complete for {}", args.db_path.display());
            println!(
                "Inserted {} departments and {} employees",
                report.departments, report.employees
            );
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logger_with(cli.log_level.into(), cli.log_format)
        .context("Failed to initialize logger")?;

    if let Err(e) = run(cli).await {
        eprintln!("employee_reports error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
