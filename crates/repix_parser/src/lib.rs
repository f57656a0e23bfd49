mod attributes;
mod error;
mod template;

pub use error::{ParseError, ParseErrorKind};

/// Borrows the template source and an error accumulator.
/// Recoverable problems are pushed into `errors`; only a malformed
/// document makes [`TemplateParser::parse_template`] return `Err`.
pub struct TemplateParser<'i, 'e> {
    pub input: &'i str,
    pub errors: &'e mut Vec<ParseError>,
}

impl<'i, 'e> TemplateParser<'i, 'e> {
    pub fn new(input: &'i str, errors: &'e mut Vec<ParseError>) -> Self {
        TemplateParser { input, errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repix_core::{span_text, Node};

    #[test]
    fn it_parses_roots_and_attribute_spans() {
        let input = "<div class=\"hero\"><img src=\"./img/logo.png\" alt=\"logo\"></div>";
        let mut errors = Vec::new();
        let mut parser = TemplateParser::new(input, &mut errors);

        let descriptor = parser.parse_template().expect("Should parse");
        assert!(descriptor.script.is_none());

        let Some(Node::Element(div)) = descriptor.roots.first() else {
            panic!("Root is not an element")
        };
        assert!(div.starting_tag.tag_name.eq("div"));

        let Some(Node::Element(img)) = div.children.first() else {
            panic!("First child of div is not img")
        };
        let src = img
            .starting_tag
            .attributes
            .iter()
            .find(|attr| attr.name.eq("src"))
            .expect("img should have src");

        let value_span = src.value_span.expect("src should have a value span");
        assert_eq!(span_text(input, value_span), "\"./img/logo.png\"");
        assert_eq!(src.value.as_deref(), Some("./img/logo.png"));
    }

    #[test]
    fn it_captures_the_script_region() {
        let input = "<img src=\"./a.png\">\n<script>\nconst n = 1;\n</script>";
        let mut errors = Vec::new();
        let mut parser = TemplateParser::new(input, &mut errors);

        let descriptor = parser.parse_template().expect("Should parse");
        let script = descriptor.script.expect("Should have a script region");

        let content_start = script.content_start.0 as usize - 1;
        assert!(input[..content_start].ends_with("<script>"));
    }

    #[test]
    fn it_captures_an_empty_script_region() {
        let input = "<script></script><img src=\"./a.png\">";
        let mut errors = Vec::new();
        let mut parser = TemplateParser::new(input, &mut errors);

        let descriptor = parser.parse_template().expect("Should parse");
        let script = descriptor.script.expect("Should have a script region");

        let content_start = script.content_start.0 as usize - 1;
        assert!(input[..content_start].ends_with("<script>"));
    }

    #[test]
    fn it_reports_duplicate_scripts() {
        let input = "<script>a</script><script>b</script>";
        let mut errors = Vec::new();
        let mut parser = TemplateParser::new(input, &mut errors);

        let descriptor = parser.parse_template().expect("Should parse");
        assert!(descriptor.script.is_some());
        assert!(errors
            .iter()
            .any(|e| matches!(e.kind, ParseErrorKind::DuplicateScript)));
    }
}
