//! The main public crate of the `repix` project.
//!
//! `repix` locates image references in UI component templates, converts
//! the referenced images out of band and rewrites every reference into a
//! module-level import of the converted artifact:
//!
//! ```no_run
//! use repix::{Preprocessor, PreprocessorOptions, TransformResult};
//!
//! # async fn run() {
//! let mut options = PreprocessorOptions::default();
//! options.output_root = "./public".into();
//!
//! let preprocessor = Preprocessor::with_default_collaborators(options);
//!
//! let input = r#"<img src="./img/logo.png">"#;
//! match preprocessor.transform(input, "page.html").await {
//!     Ok(TransformResult::Transformed { code, .. }) => println!("{code}"),
//!     Ok(TransformResult::Unchanged { .. }) => {}
//!     Err(e) => eprintln!("{e}"),
//! }
//! # }
//! ```

mod errors;

pub use errors::PreprocessError;
pub use repix_convert::{FsResolver, ImageCodec, PathResolver, RasterCodec};
pub use repix_core::*;

use repix_convert::ConversionGate;
use repix_parser::TemplateParser;
use repix_transform::transform_template;
use sourcemap::SourceMap;

/// Outcome of one preprocessing pass.
#[derive(Debug)]
pub enum TransformResult {
    /// No eligible reference was found, the original text stands.
    Unchanged { errors: Vec<PreprocessError> },
    /// At least one reference was rewritten.
    Transformed {
        code: String,
        map: SourceMap,
        errors: Vec<PreprocessError>,
    },
}

impl TransformResult {
    pub fn errors(&self) -> &[PreprocessError] {
        match self {
            TransformResult::Unchanged { errors } => errors,
            TransformResult::Transformed { errors, .. } => errors,
        }
    }
}

/// The transform orchestrator.
///
/// Options and collaborators are captured once at construction, every
/// pass runs against `&self`. No process-global state is touched, so one
/// instance can serve concurrent passes.
pub struct Preprocessor {
    options: PreprocessorOptions,
    /// `<tag` markers for the raw-text fast path
    markers: Vec<String>,
    /// A `*` tag configuration defeats the fast path
    scan_all: bool,
    resolver: Box<dyn PathResolver>,
    gate: ConversionGate,
}

impl Preprocessor {
    pub fn new(
        options: PreprocessorOptions,
        resolver: Box<dyn PathResolver>,
        codec: Box<dyn ImageCodec>,
    ) -> Self {
        let scan_all = options.tags.contains_key(&repix_atom!("*"));
        let markers = options
            .tags
            .keys()
            .filter(|tag| **tag != "*")
            .map(|tag| format!("<{tag}"))
            .collect();

        let gate = ConversionGate::new(
            options.output_root.clone(),
            options.target_format,
            codec,
        );

        Preprocessor {
            options,
            markers,
            scan_all,
            resolver,
            gate,
        }
    }

    /// Builds a preprocessor with the default filesystem resolver and
    /// the default raster codec, both rooted at `output_root`.
    pub fn with_default_collaborators(options: PreprocessorOptions) -> Self {
        let resolver = Box::new(FsResolver::new(options.output_root.clone()));
        Self::new(options, resolver, Box::new(RasterCodec))
    }

    /// Runs one pass over `source`.
    ///
    /// When no configured tag occurs in the raw text the template is not
    /// even parsed. A malformed template is the only fatal error;
    /// everything else is accumulated into the result.
    pub async fn transform(
        &self,
        source: &str,
        filename: &str,
    ) -> Result<TransformResult, PreprocessError> {
        if !self.scan_all && !self.markers.iter().any(|m| source.contains(m.as_str())) {
            return Ok(TransformResult::Unchanged { errors: vec![] });
        }

        let mut parse_errors = Vec::new();
        let descriptor = TemplateParser::new(source, &mut parse_errors)
            .parse_template()
            .map_err(PreprocessError::Parse)?;

        let mut errors: Vec<PreprocessError> =
            parse_errors.into_iter().map(Into::into).collect();

        let mut transform_errors = Vec::new();
        let transformed = transform_template(
            source,
            filename,
            &descriptor,
            &self.options,
            self.resolver.as_ref(),
            &self.gate,
            &mut transform_errors,
        )
        .await
        .map_err(PreprocessError::Transform)?;

        errors.extend(transform_errors.into_iter().map(Into::into));

        match transformed {
            Some((code, map)) => Ok(TransformResult::Transformed { code, map, errors }),
            None => Ok(TransformResult::Unchanged { errors }),
        }
    }
}
