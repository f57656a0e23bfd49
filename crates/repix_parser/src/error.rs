use repix_core::{Severity, SeverityLevel};
use swc_core::common::Span;

#[derive(Debug)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

#[derive(Debug)]
pub enum ParseErrorKind {
    /// Error while parsing markup
    InvalidHtml(Box<swc_html_parser::error::ErrorKind>),
    /// More than one root-level `<script>` block
    DuplicateScript,
}

impl Severity for ParseError {
    fn get_severity(&self) -> SeverityLevel {
        match self.kind {
            ParseErrorKind::InvalidHtml(_) => SeverityLevel::RecoverableError,
            ParseErrorKind::DuplicateScript => SeverityLevel::RecoverableError,
        }
    }
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
