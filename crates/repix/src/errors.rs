//! Error definitions for the glue code of `repix`

use repix_core::{Severity, SeverityLevel};
use repix_parser::ParseError;
use repix_transform::error::TransformError;
use swc_core::common::Spanned;

#[derive(Debug)]
pub enum PreprocessError {
    /// An error occurred during the parsing of a template.
    ///
    /// This can be due to:
    /// - bad markup;
    /// - duplicate root `<script>` blocks;
    /// - etc.
    Parse(ParseError),

    /// An error during the rewrite of a template.
    Transform(TransformError),
}

impl std::fmt::Display for PreprocessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl From<ParseError> for PreprocessError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<TransformError> for PreprocessError {
    fn from(value: TransformError) -> Self {
        Self::Transform(value)
    }
}

impl Severity for PreprocessError {
    fn get_severity(&self) -> SeverityLevel {
        match self {
            PreprocessError::Parse(e) => e.get_severity(),
            PreprocessError::Transform(e) => e.get_severity(),
        }
    }
}

impl Spanned for PreprocessError {
    fn span(&self) -> swc_core::common::Span {
        match self {
            PreprocessError::Parse(e) => e.span,
            PreprocessError::Transform(e) => e.span(),
        }
    }
}
