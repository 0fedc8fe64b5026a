use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("invalid organism code: {0}")]
    InvalidOrganism(String),

    #[error("KEGG request failed: {0}")]
    KeggHttp(String),

    #[error("KEGG returned status {status}: {message}")]
    KeggStatus { status: u16, message: String },

    #[error("pathway entry does not match path:{organism}<5 digits>: {entry}")]
    PathwayIdMismatch { organism: String, entry: String },

    #[error("compound identifier does not match cpd:C<5 digits>: {0}")]
    CompoundIdMismatch(String),

    #[error("reaction identifier does not match rn:R<5 digits>: {0}")]
    ReactionIdMismatch(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
