use std::fmt::Write;
use std::path::PathBuf;

use async_trait::async_trait;
use fxhash::FxHashMap;
use repix_convert::{Conversion, ConversionGate, PathResolver};
use repix_core::{span_range, ImageBinding, ScriptRegion};
use smallvec::SmallVec;
use tracing::debug;

use crate::{
    edits::EditSet,
    error::{RewriteError, RewriteErrorKind, TransformError},
    locate::{strip_prefix, ImageMatch, ImageVisitor},
};

/// Turns located image references into edits: one value replacement per
/// reference plus a single block of import declarations.
///
/// Bindings are `_asset_{n}`, numbered in document order. References
/// resolving to the same asset share one binding.
pub struct RewriteVisitor<'a> {
    source: &'a str,
    importer: PathBuf,
    resolver: &'a dyn PathResolver,
    gate: &'a ConversionGate,
    edits: EditSet,
    bindings: SmallVec<[ImageBinding; 4]>,
    by_path: FxHashMap<PathBuf, usize>,
    errors: Vec<TransformError>,
}

impl<'a> RewriteVisitor<'a> {
    pub fn new(
        source: &'a str,
        filename: &str,
        resolver: &'a dyn PathResolver,
        gate: &'a ConversionGate,
    ) -> Self {
        RewriteVisitor {
            source,
            importer: PathBuf::from(filename),
            resolver,
            gate,
            edits: EditSet::new(),
            bindings: SmallVec::new(),
            by_path: FxHashMap::default(),
            errors: Vec::new(),
        }
    }

    /// Emits the import declarations and hands back the recorded edits.
    ///
    /// With an existing `<script>` block the declarations are inserted at
    /// its content start. Otherwise a new block is appended after the
    /// last root.
    pub fn finish(
        mut self,
        script: Option<&ScriptRegion>,
    ) -> (EditSet, Vec<TransformError>) {
        if !self.bindings.is_empty() {
            let mut declarations = String::new();
            for binding in self.bindings.iter() {
                let _ = write!(
                    declarations,
                    "\nimport {} from \"{}\";",
                    binding.name, binding.asset_path
                );
            }

            match script {
                Some(region) => {
                    let offset = region.content_start.0 as usize - 1;
                    self.edits.insert(offset, declarations);
                }
                None => {
                    let block = format!("\n<script>{declarations}\n</script>\n");
                    self.edits.insert(self.source.len(), block);
                }
            }
        }

        (self.edits, self.errors)
    }
}

#[async_trait]
impl ImageVisitor for RewriteVisitor<'_> {
    async fn visit_image(&mut self, image: ImageMatch<'_>) {
        let Some(value) = image.attribute.value.as_ref() else {
            return;
        };
        let Some(value_span) = image.attribute.value_span else {
            return;
        };

        let mut path = strip_prefix(value);
        let mut hash = None;
        if let Some(hash_pos) = path.find('#') {
            hash = Some(&path[hash_pos..]);
            path = &path[..hash_pos];
        }
        if path.is_empty() {
            return;
        }

        // The reference may be percent-encoded, the filesystem is not
        let decoded_path = percent_encoding::percent_decode_str(path);
        let Ok(decoded) = decoded_path.decode_utf8() else {
            self.errors.push(
                RewriteError {
                    kind: RewriteErrorKind::UrlDecode,
                    span: image.attribute.span,
                }
                .into(),
            );
            return;
        };

        let Some(resolved) = self.resolver.resolve(&decoded, &self.importer).await else {
            debug!("Skipping unresolvable reference {}", decoded);
            self.errors.push(
                RewriteError {
                    kind: RewriteErrorKind::ResolveFailed,
                    span: image.attribute.span,
                }
                .into(),
            );
            return;
        };

        let binding_index = match self.by_path.get(&resolved) {
            Some(&existing) => existing,
            None => {
                match self.gate.convert(&resolved).await {
                    Conversion::Converted(_) => {}
                    Conversion::Degraded(_, e) => {
                        // Soft failure: the binding still points at the
                        // artifact path and the caller decides what to do
                        self.errors.push(
                            RewriteError {
                                kind: RewriteErrorKind::ConversionFailed(e),
                                span: image.attribute.span,
                            }
                            .into(),
                        );
                    }
                    Conversion::PassThrough => return,
                }

                let import_path = swap_reference_extension(
                    &decoded,
                    self.gate.target_format().extension(),
                );
                let index = self.bindings.len();
                self.bindings.push(ImageBinding::new(index, import_path));
                self.by_path.insert(resolved, index);
                index
            }
        };

        let name = &self.bindings[binding_index].name;
        let replacement = match hash {
            Some(hash) => format!("{{{name} + \"{hash}\"}}"),
            None => format!("{{{name}}}"),
        };

        let range = span_range(value_span);
        self.edits.replace(range.start, range.end, replacement);
    }
}

/// Swaps the extension of a textual reference, leaving directories alone.
fn swap_reference_extension(reference: &str, extension: &str) -> String {
    let file_start = reference.rfind('/').map(|idx| idx + 1).unwrap_or(0);
    match reference[file_start..].rfind('.') {
        Some(dot_idx) => format!("{}.{}", &reference[..file_start + dot_idx], extension),
        None => reference.to_string(),
    }
}
