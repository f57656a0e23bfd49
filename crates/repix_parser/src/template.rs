use repix_core::{repix_atom, ElementNode, Node, ScriptRegion, StartingTag, TemplateDescriptor};
use swc_core::common::{input::StringInput, BytePos, Span, DUMMY_SP};
use swc_html_ast::{Child, DocumentFragment, DocumentMode, Element, Namespace};
use swc_html_parser::{
    lexer::Lexer,
    parser::{Parser, ParserConfig},
};

use crate::{
    error::{ParseError, ParseErrorKind},
    TemplateParser,
};

type SwcHtmlParserError = swc_html_parser::error::Error;

impl TemplateParser<'_, '_> {
    /// Parses `self.input` as a template fragment, producing a `TemplateDescriptor`.
    /// When `Err(ParseError)` is returned, that means unrecoverable error was discovered.
    pub fn parse_template(&mut self) -> Result<TemplateDescriptor, ParseError> {
        let parsed_html = self.parse_html_document_fragment().map_err(|e| {
            let kind = e.into_inner().1;

            ParseError {
                kind: ParseErrorKind::InvalidHtml(Box::new(kind)),
                span: Span {
                    lo: BytePos(1),
                    hi: BytePos(self.input.len() as u32),
                },
            }
        })?;

        let mut descriptor = TemplateDescriptor::default();

        macro_rules! report_error {
            ($kind: ident, $span: expr) => {
                self.errors.push(ParseError {
                    kind: ParseErrorKind::$kind,
                    span: $span,
                });
            };
        }

        for root_node in parsed_html.children.into_iter() {
            match root_node {
                Child::Element(root_element) if root_element.tag_name.eq("script") => {
                    // Check duplicate
                    if descriptor.script.is_some() {
                        report_error!(DuplicateScript, root_element.span);
                        continue;
                    }

                    descriptor.script = Some(self.process_script_element(root_element));
                }
                Child::Element(root_element) => {
                    descriptor.roots.push(self.process_element(root_element));
                }
                Child::Text(text) => {
                    descriptor.roots.push(Node::Text(text.data, text.span));
                }
                Child::Comment(comment) => {
                    descriptor
                        .roots
                        .push(Node::Comment(comment.data, comment.span));
                }
                Child::DocumentType(_) => continue,
            }
        }

        Ok(descriptor)
    }

    fn process_element(&mut self, element: Element) -> Node {
        // `<template>` technically has a `content`
        let children: Vec<Child> = element
            .content
            .map(|c| c.children)
            .unwrap_or(element.children);

        let attributes = element
            .attributes
            .into_iter()
            .map(|attr| self.process_attribute(attr))
            .collect();

        let starting_tag = StartingTag {
            tag_name: element.tag_name,
            attributes,
            is_self_closing: element.is_self_closing,
        };

        Node::Element(ElementNode {
            starting_tag,
            children: self.process_element_children(children),
            span: element.span,
        })
    }

    fn process_element_children(&mut self, children: Vec<Child>) -> Vec<Node> {
        let mut out = Vec::with_capacity(children.len());

        for child in children {
            match child {
                Child::DocumentType(_) => continue,
                Child::Element(element) => out.push(self.process_element(element)),
                Child::Text(text) => out.push(Node::Text(text.data, text.span)),
                Child::Comment(comment) => out.push(Node::Comment(comment.data, comment.span)),
            }
        }

        out
    }

    /// Captures the location of an embedded `<script>` block.
    ///
    /// `<script>` has at most a single `Text` child, whose span start is
    /// where new declarations are inserted. An empty block has no children,
    /// so the position is recovered from the end of the opening tag.
    fn process_script_element(&mut self, element: Element) -> ScriptRegion {
        let content_start = if let Some(Child::Text(script_content)) = element.children.first() {
            script_content.span.lo
        } else {
            let raw = repix_core::span_text(self.input, element.span);
            match raw.find('>') {
                Some(gt_idx) => BytePos(element.span.lo.0 + gt_idx as u32 + 1),
                None => element.span.lo,
            }
        };

        ScriptRegion {
            span: element.span,
            content_start,
        }
    }

    /// Adapted from `swc_html_parser`
    #[inline]
    pub fn parse_html_document_fragment(&mut self) -> Result<DocumentFragment, SwcHtmlParserError> {
        let lexer = Lexer::new(StringInput::new(
            self.input,
            BytePos(1),
            BytePos(self.input.len() as u32),
        ));

        let parser_config = ParserConfig {
            scripting_enabled: false,
            iframe_srcdoc: false,
            ..Default::default()
        };
        let mut parser = Parser::new(lexer, parser_config);

        let ctx_element = Element {
            span: DUMMY_SP,
            tag_name: repix_atom!("div"),
            namespace: Namespace::HTML,
            attributes: vec![],
            children: vec![],
            content: None,
            is_self_closing: false,
        };

        let result = parser.parse_document_fragment(ctx_element, DocumentMode::NoQuirks, None);

        let html_parse_errors = parser.take_errors();

        self.errors.reserve(html_parse_errors.len());
        for html_parse_error in html_parse_errors {
            let e = html_parse_error.into_inner();
            self.errors.push(ParseError {
                kind: ParseErrorKind::InvalidHtml(Box::new(e.1)),
                span: e.0,
            })
        }

        result
    }
}
