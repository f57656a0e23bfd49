use std::path::{Path, PathBuf};

use async_trait::async_trait;
use repix_core::TargetFormat;

use crate::error::ConvertError;

/// Resolves a raw template reference into a filesystem path.
#[async_trait]
pub trait PathResolver: Send + Sync {
    /// `None` means the reference does not resolve to an existing asset
    /// and the element is skipped.
    async fn resolve(&self, reference: &str, importer: &Path) -> Option<PathBuf>;
}

/// Decodes a source image and encodes it into the target format.
#[async_trait]
pub trait ImageCodec: Send + Sync {
    async fn convert(
        &self,
        source: &Path,
        destination: &Path,
        format: TargetFormat,
    ) -> Result<(), ConvertError>;
}
