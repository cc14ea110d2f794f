//! File-based logging: each run writes to ~/.chitra/logs/{run_id}/log and
//! mirrors to stderr.

use anyhow::{Context, Result};
use chrono::Local;
use dirs::home_dir;
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub struct ChitraLogger {
    level: LevelFilter,
    file: Arc<Mutex<File>>,
}

impl ChitraLogger {
    /// Create a logger writing to ~/.chitra/logs/{timestamp}_{uuid}/log.
    fn new(level: LevelFilter) -> Result<(Self, PathBuf)> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let uuid_string = Uuid::new_v4().to_string();
        let short = uuid_string.split('-').next().unwrap_or("run");
        let run_id = format!("{timestamp}_{short}");

        let home = home_dir().context("could not determine home directory")?;
        let log_dir = home.join(".chitra").join("logs").join(run_id);
        create_dir_all(&log_dir)
            .with_context(|| format!("creating log directory {}", log_dir.display()))?;

        let log_path = log_dir.join("log");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("opening log file {}", log_path.display()))?;

        Ok((
            Self {
                level,
                file: Arc::new(Mutex::new(file)),
            },
            log_path,
        ))
    }

    /// Install as the global logger.
    pub fn init(level: LevelFilter) -> Result<()> {
        let (logger, log_path) = Self::new(level)?;
        log::set_boxed_logger(Box::new(logger))
            .map(|()| log::set_max_level(level))
            .map_err(|e| anyhow::anyhow!("failed to set logger: {e}"))?;
        log::debug!("log file: {}", log_path.display());
        Ok(())
    }
}

impl Log for ChitraLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let message = format!(
            "{timestamp} {} [{}] {}",
            record.level(),
            record.target(),
            record.args()
        );

        if let Ok(mut file) = self.file.lock() {
            // A failed log write must never take the application down.
            let _ = writeln!(file, "{message}");
            let _ = file.flush();
        }
        eprintln!("{message}");
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}
