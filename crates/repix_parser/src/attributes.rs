use repix_core::{span_text, Attribute};
use swc_core::common::{BytePos, Span};

use crate::TemplateParser;

impl TemplateParser<'_, '_> {
    /// Maps a raw parser attribute to an [`Attribute`] of the descriptor.
    ///
    /// The markup parser only reports the span of the whole attribute,
    /// so the span of the value (quote delimiters included) is recovered
    /// by slicing the original text at the `=` sign.
    pub(crate) fn process_attribute(&self, raw: swc_html_ast::Attribute) -> Attribute {
        let value_span = raw
            .value
            .as_ref()
            .and_then(|_| compute_value_span(self.input, raw.span));

        Attribute {
            name: raw.name,
            value: raw.value,
            span: raw.span,
            value_span,
        }
    }
}

fn compute_value_span(input: &str, attr_span: Span) -> Option<Span> {
    let raw = span_text(input, attr_span);
    let eq_idx = raw.find('=')?;

    // The parser has already validated the attribute, so everything
    // between `=` (plus optional whitespace) and the end of the span
    // is the value together with its delimiters
    let after_eq = &raw[eq_idx + 1..];
    let ws_len = after_eq.len() - after_eq.trim_start().len();
    let value_lo = attr_span.lo.0 + (eq_idx + 1 + ws_len) as u32;

    if BytePos(value_lo) >= attr_span.hi {
        return None;
    }

    Some(Span::new(BytePos(value_lo), attr_span.hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(input: &str, expected: &str) {
        let attr_span = Span::new(
            BytePos(1),
            BytePos(input.len() as u32 + 1),
        );
        let value_span = compute_value_span(input, attr_span).expect("Should have a value span");
        assert_eq!(span_text(input, value_span), expected);
    }

    #[test]
    fn it_spans_quoted_values() {
        check("src=\"./img/logo.png\"", "\"./img/logo.png\"");
        check("src='./img/logo.png'", "'./img/logo.png'");
    }

    #[test]
    fn it_spans_unquoted_values() {
        check("src=./img/logo.png", "./img/logo.png");
    }

    #[test]
    fn it_skips_whitespace_around_eq() {
        check("src = \"a.png\"", "\"a.png\"");
    }

    #[test]
    fn it_handles_valueless_attributes() {
        let input = "disabled";
        let attr_span = Span::new(
            BytePos(1),
            BytePos(input.len() as u32 + 1),
        );
        assert!(compute_value_span(input, attr_span).is_none());
    }
}
