use swc_core::common::Span;

use crate::RepixAtom;

/// A Node is a part of the parsed template tree.
///
/// ### `Element`
/// A basic markup tag node. It has a starting `<tag>` with attributes,
///   zero or more children and a closing `</tag>` unless the node is self-closed `<tag />`.
///   The parser does not add any meaning to the discovered tag name,
///   as this logic is application-specific.
///
/// ### `Text`
/// The basic markup text leaf node, containing only static text.
///
/// ### `Comment`
/// The vanilla markup comment, `<!-- like this -->`.
#[derive(Debug, Clone)]
pub enum Node {
    Element(ElementNode),
    Text(RepixAtom, Span),
    Comment(RepixAtom, Span),
}

/// A classic markup node with a starting tag, children and a span
/// covering the whole element in the original input.
#[derive(Debug, Clone)]
pub struct ElementNode {
    pub starting_tag: StartingTag,
    pub children: Vec<Node>,
    pub span: Span,
}

/// Starting tag represents [`ElementNode`]'s tag name and attributes
#[derive(Debug, Clone)]
pub struct StartingTag {
    pub tag_name: RepixAtom,
    pub attributes: Vec<Attribute>,
    pub is_self_closing: bool,
}

/// A plain markup attribute.
///
/// `span` covers the attribute from its name to the end of its value.
/// `value_span` covers only the value, *including* the surrounding quote
/// delimiters when present. It is computed from the original text because
/// the markup parser only reports the whole-attribute span.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: RepixAtom,
    pub value: Option<RepixAtom>,
    pub span: Span,
    pub value_span: Option<Span>,
}
