// Copyright (C) Brian G. Milnes 2025

//! Run logs for staticfix tools
//!
//! Each run can write a log file organized by tool and date:
//! logs/<tool-name>/<date>/run-<timestamp>.log

pub mod logging {
    use anyhow::Result;
    use chrono::{DateTime, Local};
    use std::fs;
    use std::io::Write;
    use std::path::{Path, PathBuf};

    use crate::runner::runner::RunResult;

    /// Logger for one staticfix tool run
    pub struct ToolLogger {
        log_file: Option<fs::File>,
        log_path: Option<PathBuf>,
        start_time: DateTime<Local>,
        files_seen: usize,
        files_changed: usize,
    }

    impl ToolLogger {
        /// Console only
        pub fn new_disabled() -> Self {
            ToolLogger {
                log_file: None,
                log_path: None,
                start_time: Local::now(),
                files_seen: 0,
                files_changed: 0,
            }
        }

        /// Console plus logs/<tool>/<YYYY-MM-DD>/run-<HH-MM-SS>.log
        ///
        /// A log file that cannot be created is reported once and the run goes on.
        pub fn new(tool_name: &str) -> Self {
            Self::in_dir(Path::new("logs"), tool_name)
        }

        pub fn in_dir(root: &Path, tool_name: &str) -> Self {
            let mut logger = Self::new_disabled();
            match Self::create_log_file(root, tool_name, &logger.start_time) {
                Ok((file, path)) => {
                    logger.log_file = Some(file);
                    logger.log_path = Some(path);
                }
                Err(e) => eprintln!("Warning: Could not create log file: {e}"),
            }
            logger
        }

        fn create_log_file(root: &Path, tool_name: &str, start_time: &DateTime<Local>) -> Result<(fs::File, PathBuf)> {
            let log_dir = root
                .join(tool_name)
                .join(start_time.format("%Y-%m-%d").to_string());
            fs::create_dir_all(&log_dir)?;

            let log_path = log_dir.join(format!("run-{}.log", start_time.format("%H-%M-%S")));
            let log_file = fs::File::create(&log_path)?;
            Ok((log_file, log_path))
        }

        /// Print and write to the log file
        pub fn log(&mut self, message: &str) {
            println!("{message}");
            self.log_silent(message);
        }

        /// Log file only
        pub fn log_silent(&mut self, message: &str) {
            if let Some(ref mut file) = self.log_file {
                let _ = writeln!(file, "{message}");
            }
        }

        /// Record one file's outcome: changes, rejected recipes, cycle limit
        pub fn log_result(&mut self, display_path: &str, result: &RunResult) {
            self.files_seen += 1;
            if let Some(reason) = &result.skipped {
                self.log(&format!("{display_path}: skipped, {reason}"));
                return;
            }
            if result.is_changed() {
                self.files_changed += 1;
                self.log(&format!("{display_path}: {}", result.changed_by.join(", ")));
            }
            for recipe in &result.rejected {
                self.log(&format!("{display_path}: discarded edits of {recipe} that broke the syntax"));
            }
            if result.cycle_limit_reached {
                self.log(&format!(
                    "{display_path}: still changing after {} cycles",
                    result.cycles
                ));
            }
        }

        pub fn files_seen(&self) -> usize {
            self.files_seen
        }

        pub fn files_changed(&self) -> usize {
            self.files_changed
        }

        pub fn log_path(&self) -> Option<&Path> {
            self.log_path.as_deref()
        }

        /// Close the log with the summary and timing
        pub fn finalize(&mut self, summary: &str) {
            let end_time = Local::now();
            let duration = end_time.signed_duration_since(self.start_time);

            self.log_silent("");
            self.log_silent("=== Run Summary ===");
            self.log_silent(summary);
            self.log_silent(&format!("Started: {}", self.start_time.format("%Y-%m-%d %H:%M:%S")));
            self.log_silent(&format!("Ended: {}", end_time.format("%Y-%m-%d %H:%M:%S")));
            self.log_silent(&format!("Duration: {}ms", duration.num_milliseconds()));

            if let Some(path) = self.log_path.clone() {
                println!("Log saved to: {}", path.display());
            }
        }
    }

    impl Drop for ToolLogger {
        fn drop(&mut self) {
            if let Some(ref mut file) = self.log_file {
                let _ = file.flush();
            }
        }
    }
}
