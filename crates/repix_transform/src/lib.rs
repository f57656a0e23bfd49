use repix_convert::{ConversionGate, PathResolver};
use repix_core::{PreprocessorOptions, TemplateDescriptor};
use sourcemap::SourceMap;

#[macro_use]
extern crate lazy_static;

pub mod edits;
pub mod error;
pub mod locate;
pub mod rewrite;

use error::TransformError;
use locate::walk_images;
use rewrite::RewriteVisitor;

/// Runs one rewrite pass over a parsed template.
///
/// Returns `None` when nothing matched and the original text stands.
/// Recoverable per-element problems are accumulated into `errors`;
/// only a malformed edit set fails the pass.
pub async fn transform_template(
    source: &str,
    filename: &str,
    descriptor: &TemplateDescriptor,
    options: &PreprocessorOptions,
    resolver: &dyn PathResolver,
    gate: &ConversionGate,
    errors: &mut Vec<TransformError>,
) -> Result<Option<(String, SourceMap)>, TransformError> {
    let mut visitor = RewriteVisitor::new(source, filename, resolver, gate);

    walk_images(
        &descriptor.roots,
        &options.tags,
        options.include_absolute,
        &mut visitor,
    )
    .await;

    let (edits, rewrite_errors) = visitor.finish(descriptor.script.as_ref());
    errors.extend(rewrite_errors);

    if edits.is_empty() {
        return Ok(None);
    }

    let (code, map) = edits.finalize(source, filename)?;
    Ok(Some((code, map)))
}
