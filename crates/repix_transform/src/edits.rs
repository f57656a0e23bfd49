use sourcemap::{SourceMap, SourceMapBuilder};

use crate::error::EditError;

/// A single splice against the original text.
/// Offsets are 0-based byte positions into the original input.
#[derive(Debug, Clone)]
pub enum EditOp {
    Insert { offset: usize, text: String },
    Replace { start: usize, end: usize, text: String },
}

impl EditOp {
    fn start(&self) -> usize {
        match self {
            EditOp::Insert { offset, .. } => *offset,
            EditOp::Replace { start, .. } => *start,
        }
    }
}

/// An append-only list of edits recorded during a pass.
///
/// The original text is never touched while edits are recorded.
/// [`EditSet::finalize`] applies everything in one pass and derives the
/// source map from the same walk, so the two can not go out of sync.
#[derive(Debug, Default)]
pub struct EditSet {
    ops: Vec<EditOp>,
}

impl EditSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn insert(&mut self, offset: usize, text: impl Into<String>) {
        self.ops.push(EditOp::Insert {
            offset,
            text: text.into(),
        });
    }

    pub fn replace(&mut self, start: usize, end: usize, text: impl Into<String>) {
        self.ops.push(EditOp::Replace {
            start,
            end,
            text: text.into(),
        });
    }

    /// Applies all recorded operations to `source` and derives the map.
    ///
    /// Verbatim segments map to their exact original positions, inserted
    /// and replacement text maps to the original position it was spliced
    /// at. Replace ranges must be in bounds and non-overlapping.
    pub fn finalize(mut self, source: &str, filename: &str) -> Result<(String, SourceMap), EditError> {
        // Stable by start offset, so recording order breaks ties
        self.ops.sort_by_key(|op| op.start());

        let mut builder = SourceMapBuilder::new(Some(filename));
        let src_id = builder.add_source(filename);
        builder.set_source_contents(src_id, Some(source));

        let mut out = String::with_capacity(source.len());
        let mut tracker = PositionTracker::default();
        let mut cursor = 0usize;

        for op in self.ops.iter() {
            let (start, end, text) = match op {
                EditOp::Insert { offset, text } => (*offset, *offset, text.as_str()),
                EditOp::Replace { start, end, text } => (*start, *end, text.as_str()),
            };

            if end > source.len()
                || start > end
                || !source.is_char_boundary(start)
                || !source.is_char_boundary(end)
            {
                return Err(EditError::OutOfBounds {
                    offset: start,
                    len: source.len(),
                });
            }
            if start < cursor {
                return Err(EditError::Overlap { offset: start });
            }

            tracker.copy_verbatim(&source[cursor..start], &mut out, &mut builder, src_id);

            // The spliced text maps to the original position it replaces
            builder.add_raw(
                tracker.dst_line,
                tracker.dst_col,
                tracker.src_line,
                tracker.src_col,
                Some(src_id),
                None,
                false,
            );
            out.push_str(text);
            tracker.advance_dst(text);
            tracker.skip_src(&source[start..end]);

            cursor = end;
        }

        tracker.copy_verbatim(&source[cursor..], &mut out, &mut builder, src_id);

        Ok((out, builder.into_sourcemap()))
    }
}

/// Tracks line/column positions on both sides while the output is built.
#[derive(Debug, Default)]
struct PositionTracker {
    src_line: u32,
    src_col: u32,
    dst_line: u32,
    dst_col: u32,
}

impl PositionTracker {
    /// Copies an untouched segment, emitting a mapping at the segment
    /// start and at every following line start.
    fn copy_verbatim(
        &mut self,
        segment: &str,
        out: &mut String,
        builder: &mut SourceMapBuilder,
        src_id: u32,
    ) {
        if segment.is_empty() {
            return;
        }

        builder.add_raw(
            self.dst_line,
            self.dst_col,
            self.src_line,
            self.src_col,
            Some(src_id),
            None,
            false,
        );
        out.push_str(segment);

        for ch in segment.chars() {
            if ch == '\n' {
                self.src_line += 1;
                self.src_col = 0;
                self.dst_line += 1;
                self.dst_col = 0;
                builder.add_raw(
                    self.dst_line,
                    self.dst_col,
                    self.src_line,
                    self.src_col,
                    Some(src_id),
                    None,
                    false,
                );
            } else {
                self.src_col += 1;
                self.dst_col += 1;
            }
        }
    }

    fn advance_dst(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.dst_line += 1;
                self.dst_col = 0;
            } else {
                self.dst_col += 1;
            }
        }
    }

    fn skip_src(&mut self, replaced: &str) {
        for ch in replaced.chars() {
            if ch == '\n' {
                self.src_line += 1;
                self.src_col = 0;
            } else {
                self.src_col += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_applies_edits_in_offset_order() {
        let source = "aaa bbb ccc";
        let mut edits = EditSet::new();

        // Recorded out of order on purpose
        edits.replace(8, 11, "C");
        edits.replace(0, 3, "A");

        let (code, _map) = edits.finalize(source, "test.html").expect("Should finalize");
        assert_eq!(code, "A bbb C");
    }

    #[test]
    fn it_inserts_at_the_end() {
        let source = "aaa";
        let mut edits = EditSet::new();
        edits.insert(3, "\nbbb");

        let (code, _map) = edits.finalize(source, "test.html").expect("Should finalize");
        assert_eq!(code, "aaa\nbbb");
    }

    #[test]
    fn it_rejects_overlapping_replaces() {
        let source = "aaa bbb";
        let mut edits = EditSet::new();
        edits.replace(0, 5, "x");
        edits.replace(4, 7, "y");

        let result = edits.finalize(source, "test.html");
        assert!(matches!(result, Err(EditError::Overlap { offset: 4 })));
    }

    #[test]
    fn it_rejects_out_of_bounds_spans() {
        let source = "aaa";
        let mut edits = EditSet::new();
        edits.replace(0, 10, "x");

        let result = edits.finalize(source, "test.html");
        assert!(matches!(result, Err(EditError::OutOfBounds { .. })));
    }

    #[test]
    fn verbatim_segments_map_to_original_positions() {
        let source = "line one\nline two\nline three";
        let mut edits = EditSet::new();
        edits.replace(14, 17, "2");

        let (code, map) = edits.finalize(source, "test.html").expect("Should finalize");
        assert_eq!(code, "line one\nline 2\nline three");

        // "line three" starts at line 2, col 0 in both texts
        let token = map.lookup_token(2, 0).expect("Should have a token");
        assert_eq!(token.get_src(), (2, 0));

        // The replacement maps back to where "two" was
        let token = map.lookup_token(1, 5).expect("Should have a token");
        assert_eq!(token.get_src(), (1, 5));
    }
}
