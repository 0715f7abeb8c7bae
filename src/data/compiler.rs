//! Binary font compilation through the `fontc` command line tool

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

pub const DEFAULT_FONTC: &str = "fontc";

pub struct FontCompiler {
    binary: PathBuf,
}

impl Default for FontCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_FONTC)
    }
}

impl FontCompiler {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Compile `ufo_path` into `output_path`
    pub fn compile(&self, ufo_path: &Path, output_path: &Path) -> Result<PathBuf> {
        let mut cmd = self.command(ufo_path, output_path);
        debug!("Running {:?}", cmd);

        let output = cmd
            .output()
            .with_context(|| format!("Failed to run {}", self.binary.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("fontc compilation failed: {}", stderr.trim()));
        }

        info!("Compiled {}", output_path.display());
        Ok(output_path.to_path_buf())
    }

    fn command(&self, ufo_path: &Path, output_path: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("--output-file").arg(output_path).arg(ufo_path);
        cmd
    }
}
