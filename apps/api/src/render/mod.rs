// Turns a composed DocumentTree into output formats: plain text, LaTeX source, and PDF.
// PDF compilation is delegated to an external TeX engine behind the PdfCompiler trait.

pub mod compiler;
pub mod latex;
pub mod text;

use std::time::Duration;

use thiserror::Error;

pub use compiler::{LatexCompiler, PdfCompiler};
pub use latex::render_latex;
pub use text::render_text;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to run TeX engine '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("render workspace I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("TeX engine timed out after {0:?}")]
    Timeout(Duration),

    #[error("TeX engine exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("TeX engine produced no PDF")]
    MissingOutput,
}
