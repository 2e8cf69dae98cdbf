//! Frontend build command.

use std::io;

use anyhow::Result;
use vitelink_build::{BuildOutcome, BuildTrigger};

use crate::config::ConfigFile;

/// Run the build command.
///
/// A failed build is reported on stderr but does not fail the command.
pub fn run(config: &ConfigFile) -> Result<()> {
    let trigger = BuildTrigger::new(config.build_config()?);

    let outcome = trigger.run(&mut io::stdout(), &mut io::stderr())?;

    if let BuildOutcome::Failed { code, .. } = outcome {
        tracing::warn!(
            "Build in {} exited with status {}",
            trigger.config().working_dir.display(),
            code.map_or_else(|| "signal".to_string(), |c| c.to_string())
        );
    }

    Ok(())
}
