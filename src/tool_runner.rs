// Copyright (C) Brian G. Milnes 2025

//! The frame every staticfix tool runs inside.
//!
//! Prints the "Entering directory" header for compile-mode, hands the tool an
//! optional run log, then prints the tool's summary and the elapsed time. The
//! tool's report also decides the process status: a review with findings or a
//! fix with per-file errors is not clean.

pub mod tool_runner {
    use anyhow::Result;
    use std::path::PathBuf;
    use std::time::Instant;

    use crate::logging::logging::ToolLogger;

    pub struct ToolConfig {
        /// Directory name under logs/
        pub tool_name: String,
        /// Shown as "Entering directory"
        pub base_dir: PathBuf,
        pub enable_logging: bool,
        /// Where logs/ lives; the current directory when unset
        pub log_root: Option<PathBuf>,
    }

    impl ToolConfig {
        pub fn new(tool_name: &str, base_dir: PathBuf) -> Self {
            ToolConfig {
                tool_name: tool_name.to_string(),
                base_dir,
                enable_logging: false,
                log_root: None,
            }
        }

        pub fn with_logging(mut self, enable: bool) -> Self {
            self.enable_logging = enable;
            self
        }

        pub fn with_log_root(mut self, root: PathBuf) -> Self {
            self.log_root = Some(root);
            self
        }

        fn logger(&self) -> ToolLogger {
            match (&self.log_root, self.enable_logging) {
                (_, false) => ToolLogger::new_disabled(),
                (Some(root), true) => ToolLogger::in_dir(root, &self.tool_name),
                (None, true) => ToolLogger::new(&self.tool_name),
            }
        }
    }

    /// What a tool body hands back to the frame
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ToolReport {
        pub summary: String,
        pub clean: bool,
    }

    impl ToolReport {
        pub fn clean(summary: impl Into<String>) -> Self {
            ToolReport { summary: summary.into(), clean: true }
        }

        pub fn unclean(summary: impl Into<String>) -> Self {
            ToolReport { summary: summary.into(), clean: false }
        }

        /// Exit status for the binary's `main`
        pub fn exit_code(&self) -> i32 {
            if self.clean { 0 } else { 1 }
        }
    }

    /// Run a tool body inside the standard frame
    ///
    /// ```no_run
    /// use staticfix::tool_runner::tool_runner::{run_tool, ToolConfig, ToolReport};
    /// let config = ToolConfig::new("staticfix-fix", std::env::current_dir()?);
    /// let report = run_tool(config, |logger| {
    ///     logger.log("Fixing...");
    ///     Ok(ToolReport::clean("Summary: 3 files checked, 1 changed"))
    /// })?;
    /// std::process::exit(report.exit_code());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn run_tool<F>(config: ToolConfig, tool_fn: F) -> Result<ToolReport>
    where
        F: FnOnce(&mut ToolLogger) -> Result<ToolReport>,
    {
        let start = Instant::now();

        println!("Entering directory '{}'", config.base_dir.display());
        println!();

        let mut logger = config.logger();
        let report = tool_fn(&mut logger)?;
        let elapsed = format!("Completed in {}ms", start.elapsed().as_millis());

        println!();
        println!("{}", report.summary);
        println!("{elapsed}");

        if config.enable_logging {
            logger.log_silent(&elapsed);
            logger.finalize(&report.summary);
        }
        Ok(report)
    }
}
