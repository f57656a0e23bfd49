use repix_convert::ConvertError;
use repix_core::{Severity, SeverityLevel};
use swc_core::common::{Span, Spanned, DUMMY_SP};

#[derive(Debug)]
pub enum TransformError {
    Edit(EditError),
    Rewrite(RewriteError),
}

/// A malformed edit operation. Spans recorded by the rewrite engine come
/// straight from the parser, so hitting this means a bug, not bad input.
#[derive(Debug)]
pub enum EditError {
    OutOfBounds { offset: usize, len: usize },
    Overlap { offset: usize },
}

#[derive(Debug)]
pub struct RewriteError {
    pub span: Span,
    pub kind: RewriteErrorKind,
}

#[derive(Debug)]
pub enum RewriteErrorKind {
    /// The reference could not be percent-decoded into valid UTF-8
    UrlDecode,
    /// The reference does not resolve to an existing asset
    ResolveFailed,
    /// The codec failed. The rewrite still points at the artifact path,
    /// so the next pass can heal the output once conversion succeeds
    ConversionFailed(ConvertError),
}

impl From<EditError> for TransformError {
    fn from(value: EditError) -> Self {
        TransformError::Edit(value)
    }
}

impl From<RewriteError> for TransformError {
    fn from(value: RewriteError) -> Self {
        TransformError::Rewrite(value)
    }
}

impl Severity for TransformError {
    fn get_severity(&self) -> SeverityLevel {
        match self {
            TransformError::Edit(_) => SeverityLevel::UnrecoverableError,
            TransformError::Rewrite(e) => match e.kind {
                RewriteErrorKind::UrlDecode => SeverityLevel::RecoverableError,
                RewriteErrorKind::ResolveFailed => SeverityLevel::Warning,
                RewriteErrorKind::ConversionFailed(_) => SeverityLevel::RecoverableError,
            },
        }
    }
}

impl Spanned for TransformError {
    fn span(&self) -> Span {
        match self {
            TransformError::Edit(_) => DUMMY_SP,
            TransformError::Rewrite(e) => e.span,
        }
    }
}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
