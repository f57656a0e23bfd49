use swc_core::common::{BytePos, Span};

use crate::Node;

/// The parser's read-only output: the template roots plus the location
/// of an embedded `<script>` block when one exists.
#[derive(Debug, Default)]
pub struct TemplateDescriptor {
    pub roots: Vec<Node>,
    pub script: Option<ScriptRegion>,
}

/// Location of an embedded `<script>` block.
///
/// `content_start` is the position right after the opening `<script ...>`,
/// i.e. where new declarations can be inserted without touching the
/// existing script content.
#[derive(Debug, Clone, Copy)]
pub struct ScriptRegion {
    pub span: Span,
    pub content_start: BytePos,
}
