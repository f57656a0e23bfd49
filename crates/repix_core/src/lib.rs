mod bindings;
mod error;
mod format;
mod node;
mod options;
mod template;

pub use bindings::*;
pub use error::*;
pub use format::*;
pub use node::*;
pub use options::*;
pub use template::*;

use swc_core::common::Span;

pub type RepixAtom = swc_core::ecma::atoms::Atom;

#[macro_export]
macro_rules! repix_atom {
    ($str: literal) => {
        $crate::RepixAtom::from($str)
    };
}

/// Converts a parser span into a 0-based byte range of the original input.
/// The lexer is fed with `BytePos(1)` as its start, so positions are 1-based.
pub fn span_range(span: Span) -> std::ops::Range<usize> {
    (span.lo.0 as usize - 1)..(span.hi.0 as usize - 1)
}

pub fn span_text(input: &str, span: Span) -> &str {
    &input[span_range(span)]
}
