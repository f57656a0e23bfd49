use std::path::PathBuf;

use fxhash::FxHashMap;

use crate::{RepixAtom, TargetFormat};

/// Image tag configuration.
/// Example: { "img": ["src"], "source": ["src"] }
///
/// A `*` key applies its attributes to every tag.
pub type ImageTagConfig = FxHashMap<RepixAtom, Vec<RepixAtom>>;

#[derive(Debug, Clone)]
pub struct PreprocessorOptions {
    /// Root directory under which converted artifacts are emitted
    pub output_root: PathBuf,
    /// Format the referenced images are converted to
    pub target_format: TargetFormat,
    /// Whether to process absolute URLs
    pub include_absolute: bool,
    /// Tag-specific configuration
    pub tags: ImageTagConfig,
}

impl Default for PreprocessorOptions {
    fn default() -> Self {
        let mut tags = FxHashMap::default();
        tags.insert(RepixAtom::from("img"), vec![RepixAtom::from("src")]);
        tags.insert(RepixAtom::from("source"), vec![RepixAtom::from("src")]);
        tags.insert(
            RepixAtom::from("image"),
            vec![RepixAtom::from("xlink:href"), RepixAtom::from("href")],
        );

        PreprocessorOptions {
            output_root: PathBuf::new(),
            target_format: TargetFormat::default(),
            include_absolute: false,
            tags,
        }
    }
}
