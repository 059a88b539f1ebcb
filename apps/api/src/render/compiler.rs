//! PDF compilation through an external TeX engine.
//!
//! Each compile gets its own temporary directory. The engine runs with `kill_on_drop`, so
//! a timed-out compile takes its child process down with it.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::render::RenderError;

const SOURCE_FILE: &str = "resume.tex";
const OUTPUT_FILE: &str = "resume.pdf";

/// Stderr is truncated to this many bytes in error messages.
const STDERR_LIMIT: usize = 2000;

#[async_trait]
pub trait PdfCompiler: Send + Sync {
    async fn compile(&self, latex_source: &str) -> Result<Bytes, RenderError>;
}

/// Compiles with `tectonic` or any `*latex` binary on the PATH.
#[derive(Debug, Clone)]
pub struct LatexCompiler {
    program: String,
    timeout: Duration,
}

impl LatexCompiler {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        LatexCompiler {
            program: program.into(),
            timeout,
        }
    }

    fn is_tectonic(&self) -> bool {
        Path::new(&self.program)
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| s == "tectonic")
    }

    /// Engine arguments for compiling `SOURCE_FILE` into `out_dir`.
    fn args(&self, out_dir: &Path) -> Vec<String> {
        let out_dir = out_dir.display().to_string();
        if self.is_tectonic() {
            vec![
                "--chatter".to_string(),
                "minimal".to_string(),
                "--outdir".to_string(),
                out_dir,
                SOURCE_FILE.to_string(),
            ]
        } else {
            vec![
                "-interaction=nonstopmode".to_string(),
                "-halt-on-error".to_string(),
                format!("-output-directory={out_dir}"),
                SOURCE_FILE.to_string(),
            ]
        }
    }
}

#[async_trait]
impl PdfCompiler for LatexCompiler {
    async fn compile(&self, latex_source: &str) -> Result<Bytes, RenderError> {
        let workdir = tempfile::tempdir()?;
        let source_path: PathBuf = workdir.path().join(SOURCE_FILE);
        tokio::fs::write(&source_path, latex_source).await?;

        let mut cmd = Command::new(&self.program);
        cmd.args(self.args(workdir.path()))
            .current_dir(workdir.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(program = %self.program, "Compiling resume PDF");
        let child = cmd.spawn().map_err(|source| RenderError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                warn!(program = %self.program, "TeX engine timed out");
                RenderError::Timeout(self.timeout)
            })??;

        if !output.status.success() {
            // *latex engines report errors on stdout, tectonic on stderr
            let mut log = String::from_utf8_lossy(&output.stderr).into_owned();
            if log.trim().is_empty() {
                log = String::from_utf8_lossy(&output.stdout).into_owned();
            }
            return Err(RenderError::Failed {
                status: output.status.to_string(),
                stderr: truncate(log, STDERR_LIMIT),
            });
        }

        let pdf_path = workdir.path().join(OUTPUT_FILE);
        match tokio::fs::read(&pdf_path).await {
            Ok(pdf) => Ok(Bytes::from(pdf)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(RenderError::MissingOutput),
            Err(e) => Err(RenderError::Io(e)),
        }
    }
}

fn truncate(mut text: String, limit: usize) -> String {
    if text.len() > limit {
        let mut cut = limit;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
    }
    text
}
