//! Build command invocation.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use std::time::Instant;

/// Notice written to the success stream after a clean build.
pub const SUCCESS_NOTICE: &str = "Successfully built Svelte components";

/// Configuration for the build command.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory the command runs in
    pub working_dir: PathBuf,

    /// Program to execute
    pub program: String,

    /// Arguments passed to the program
    pub args: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("ui"),
            program: "npm".to_string(),
            args: vec!["run".to_string(), "build".to_string()],
        }
    }
}

/// Result of a build attempt that managed to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The command exited successfully
    Succeeded,

    /// The command exited with a failure status
    Failed {
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
        /// Captured standard error
        stderr: String,
    },
}

impl BuildOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Errors that prevent a build from being attempted or reported.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to run '{program}' in {dir}: {source}")]
    SpawnError {
        program: String,
        dir: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write build report: {0}")]
    ReportError(#[from] std::io::Error),
}

/// Runs the frontend build once and reports the outcome.
pub struct BuildTrigger {
    config: BuildConfig,
}

impl BuildTrigger {
    /// Create a new build trigger.
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// The configuration this trigger runs with.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Run the build and block until it exits.
    ///
    /// A non-zero exit is reported on `err` and returned as
    /// [`BuildOutcome::Failed`], not as an error. Only a command that cannot
    /// be started, or a report that cannot be written, yields `Err`.
    pub fn run(&self, out: &mut dyn Write, err: &mut dyn Write) -> Result<BuildOutcome, BuildError> {
        let start = Instant::now();

        tracing::info!(
            "Running {} {} in {}",
            self.config.program,
            self.config.args.join(" "),
            self.config.working_dir.display()
        );

        let output = Command::new(&self.config.program)
            .args(&self.config.args)
            .current_dir(&self.config.working_dir)
            .output()
            .map_err(|source| BuildError::SpawnError {
                program: self.config.program.clone(),
                dir: self.config.working_dir.display().to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            tracing::debug!("Build output:\n{}", stdout.trim_end());
        }

        let outcome = outcome_of(output.status, &output.stderr);

        match &outcome {
            BuildOutcome::Succeeded => {
                writeln!(out, "{}", SUCCESS_NOTICE)?;
            }
            BuildOutcome::Failed { code, stderr } => {
                tracing::debug!("Build exited with status {:?}", code);
                writeln!(err, "Build failed: {}", stderr)?;
            }
        }

        tracing::debug!("Build finished in {}ms", start.elapsed().as_millis());

        Ok(outcome)
    }
}

fn outcome_of(status: ExitStatus, stderr: &[u8]) -> BuildOutcome {
    if status.success() {
        BuildOutcome::Succeeded
    } else {
        BuildOutcome::Failed {
            code: status.code(),
            stderr: String::from_utf8_lossy(stderr).into_owned(),
        }
    }
}
