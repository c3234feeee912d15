use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use super::sexpr::{SExpr, Spanned};

pub type MResult<T> = miette::Result<T>;
pub type Result<T> = std::result::Result<T, CfgError>;

#[derive(Error, Debug, Diagnostic, Clone)]
#[error("Error in configuration file")]
#[diagnostic()]
pub struct CfgError {
    #[label("Error here")]
    pub err_span: Option<SourceSpan>,
    #[help]
    pub help_msg: String,
    pub file_name: Option<String>,
    pub file_content: Option<String>,
}

impl CfgError {
    pub fn from_expr(expr: &SExpr, err_msg: impl AsRef<str>) -> Self {
        let span = expr.span();
        Self {
            err_span: Some(span_start_len(span.start(), span.end() - span.start())),
            help_msg: help(err_msg),
            file_name: Some(span.file_name()),
            file_content: Some(span.file_content()),
        }
    }

    pub fn from_spanned<T>(spanned: &Spanned<T>, err_msg: impl AsRef<str>) -> Self {
        let span = &spanned.span;
        Self {
            err_span: Some(span_start_len(span.start(), span.end() - span.start())),
            help_msg: help(err_msg),
            file_name: Some(span.file_name()),
            file_content: Some(span.file_content()),
        }
    }
}

pub(super) fn help(err_msg: impl AsRef<str>) -> String {
    format!(
        r"{}

Top-level items are defcfg, defprevent and defallow.
Use `input-analyzer --check` to validate a configuration without running a simulation.",
        err_msg.as_ref(),
    )
}

pub(super) fn span_start_len(start: usize, len: usize) -> SourceSpan {
    SourceSpan::new(start.into(), len.into())
}

pub fn error_with_source(e: CfgError) -> miette::Error {
    let filename = e.file_name.clone();
    let source = e.file_content.clone();
    let e2: miette::Error = e.into();
    if let (Some(f), Some(s)) = (filename, source) {
        e2.with_source_code(NamedSource::new(f, s))
    } else {
        e2
    }
}

impl From<anyhow::Error> for CfgError {
    fn from(value: anyhow::Error) -> Self {
        Self {
            err_span: None,
            help_msg: help(value.to_string()),
            file_name: None,
            file_content: None,
        }
    }
}
