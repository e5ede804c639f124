//! FILENAME: app/src/main.rs
//! PURPOSE: Command-line shell around the questionnaire import engine.
//! CONTEXT: File paths come from the command line, settings live in the
//! per-user config directory, and the import log is printed to stdout.
//! All decision logic lives in the `importer` crate.

use anyhow::{bail, Context, Result};
use clap::Parser;
use directories_next::ProjectDirs;
use importer::{run_import, ImportConfig, LogEntry, XlsxStore};
use log::debug;
use std::path::PathBuf;
use std::process::ExitCode;

const APPLICATION: &str = "supplier-import";
const CONFIG_FILE: &str = "config.json";

#[derive(Parser, Debug)]
#[command(name = "supplier-import", about = "Импорт анкет поставщиков в реестр")]
struct Cli {
    /// Questionnaire workbooks to import.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Registry workbook; overrides the configured path.
    #[arg(long, value_name = "PATH")]
    registry: Option<PathBuf>,

    /// Fallback groups as a semicolon-separated list ("Напитки; Бакалея");
    /// overrides the configured list.
    #[arg(long, value_name = "LIST")]
    fallback: Option<String>,

    /// Persist the effective registry path and fallback list.
    #[arg(long)]
    save_config: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", LogEntry::fatal(format!("Ошибка импорта: {:#}", e)));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = config_path()?;
    let mut config = ImportConfig::load(&config_path);
    debug!("settings loaded from {}", config_path.display());

    if let Some(registry) = &cli.registry {
        config.registry_path = registry.display().to_string();
    }
    if let Some(raw) = &cli.fallback {
        config.fallback_groups = ImportConfig::parse_group_list(raw);
    }

    if cli.save_config {
        config.save(&config_path).with_context(|| {
            format!("не удалось сохранить настройки в {}", config_path.display())
        })?;
        println!("Настройки сохранены: {}", config_path.display());
        if cli.files.is_empty() {
            return Ok(ExitCode::SUCCESS);
        }
    }

    if config.registry_path.is_empty() {
        bail!("укажите путь к реестру (--registry или настройки)");
    }
    let registry_path = PathBuf::from(&config.registry_path);
    if !registry_path.exists() {
        bail!("файл реестра не найден: {}", registry_path.display());
    }
    if cli.files.is_empty() {
        bail!("не выбраны файлы анкет");
    }

    let report = run_import(&XlsxStore, &cli.files, &registry_path, &config.fallback_groups)?;
    for entry in &report.entries {
        println!("{}", entry);
    }

    Ok(ExitCode::SUCCESS)
}

fn config_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", APPLICATION)
        .context("не удалось определить каталог настроек")?;
    Ok(dirs.config_dir().join(CONFIG_FILE))
}
