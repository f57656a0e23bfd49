use std::path::{Path, PathBuf};

use repix_core::{is_convertible_extension, TargetFormat};
use tracing::{debug, error, warn};

use crate::{error::ConvertError, traits::ImageCodec};

/// Outcome of one gate invocation.
#[derive(Debug)]
pub enum Conversion {
    /// The artifact exists at the path, either freshly converted
    /// or left over from a previous pass
    Converted(PathBuf),
    /// The codec failed. The path is still the canonical artifact
    /// location, so the next pass can retry
    Degraded(PathBuf, ConvertError),
    /// The source needs no conversion
    PassThrough,
}

/// Decides whether a resolved asset needs conversion and runs the codec
/// at most once per missing artifact.
pub struct ConversionGate {
    output_root: PathBuf,
    target_format: TargetFormat,
    codec: Box<dyn ImageCodec>,
}

impl ConversionGate {
    pub fn new(
        output_root: impl Into<PathBuf>,
        target_format: TargetFormat,
        codec: Box<dyn ImageCodec>,
    ) -> Self {
        ConversionGate {
            output_root: output_root.into(),
            target_format,
            codec,
        }
    }

    #[inline]
    pub fn target_format(&self) -> TargetFormat {
        self.target_format
    }

    /// Converts `original` into the target format.
    ///
    /// The artifact path is the original path with its extension swapped,
    /// joined under the output root when relative. When the artifact is
    /// already present the codec is not invoked again.
    ///
    /// The existence check and the conversion are not atomic: two
    /// concurrent passes may both run the codec for the same asset.
    /// Both write the same bytes to the same path, so the race is benign.
    pub async fn convert(&self, original: &Path) -> Conversion {
        let Some(extension) = original.extension().and_then(|e| e.to_str()) else {
            return Conversion::PassThrough;
        };

        let extension = extension.to_ascii_lowercase();
        if !is_convertible_extension(&extension) || extension == self.target_format.extension() {
            return Conversion::PassThrough;
        }

        let derived = original.with_extension(self.target_format.extension());
        let artifact = if derived.is_absolute() {
            derived
        } else {
            self.output_root.join(derived)
        };

        match tokio::fs::try_exists(&artifact).await {
            Ok(true) => {
                debug!("Artifact already present: {}", artifact.display());
                return Conversion::Converted(artifact);
            }
            Ok(false) => {}
            Err(e) => {
                warn!("Could not probe {}: {}", artifact.display(), e);
            }
        }

        if let Some(parent) = artifact.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                error!("Could not create {}: {}", parent.display(), e);
                let source = ConvertError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                };
                return Conversion::Degraded(artifact, source);
            }
        }

        match self
            .codec
            .convert(original, &artifact, self.target_format)
            .await
        {
            Ok(()) => Conversion::Converted(artifact),
            Err(e) => {
                error!(
                    "Conversion of {} failed: {}",
                    original.display(),
                    e
                );
                Conversion::Degraded(artifact, e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingCodec {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ImageCodec for CountingCodec {
        async fn convert(
            &self,
            _source: &Path,
            destination: &Path,
            _format: TargetFormat,
        ) -> Result<(), ConvertError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::fs::write(destination, b"webp").map_err(|e| ConvertError::Io {
                path: destination.to_path_buf(),
                source: e,
            })
        }
    }

    struct FailingCodec;

    #[async_trait]
    impl ImageCodec for FailingCodec {
        async fn convert(
            &self,
            source: &Path,
            _destination: &Path,
            _format: TargetFormat,
        ) -> Result<(), ConvertError> {
            Err(ConvertError::Io {
                path: source.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::Other),
            })
        }
    }

    fn counting_gate(root: &Path) -> (ConversionGate, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let gate = ConversionGate::new(
            root,
            TargetFormat::Webp,
            Box::new(CountingCodec {
                calls: Arc::clone(&calls),
            }),
        );
        (gate, calls)
    }

    #[tokio::test]
    async fn it_converts_once_per_artifact() {
        let dir = tempfile::tempdir().expect("Should create a temp dir");
        let original = dir.path().join("logo.png");
        std::fs::write(&original, b"png").expect("Should write");

        let (gate, calls) = counting_gate(dir.path());

        let first = gate.convert(&original).await;
        let Conversion::Converted(artifact) = first else {
            panic!("First pass should convert")
        };
        assert_eq!(artifact, dir.path().join("logo.webp"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // The artifact now exists, so the codec must not run again
        let second = gate.convert(&original).await;
        assert!(matches!(second, Conversion::Converted(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn it_passes_through_non_convertible_sources() {
        let dir = tempfile::tempdir().expect("Should create a temp dir");
        let (gate, calls) = counting_gate(dir.path());

        let svg = gate.convert(Path::new("/assets/icon.svg")).await;
        assert!(matches!(svg, Conversion::PassThrough));

        let already_webp = gate.convert(Path::new("/assets/photo.webp")).await;
        assert!(matches!(already_webp, Conversion::PassThrough));

        let no_extension = gate.convert(Path::new("/assets/LICENSE")).await;
        assert!(matches!(no_extension, Conversion::PassThrough));

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn it_degrades_on_codec_failure() {
        let dir = tempfile::tempdir().expect("Should create a temp dir");
        let gate = ConversionGate::new(dir.path(), TargetFormat::Webp, Box::new(FailingCodec));

        let original = dir.path().join("logo.png");
        let result = gate.convert(&original).await;

        let Conversion::Degraded(artifact, _) = result else {
            panic!("Failing codec should degrade")
        };
        assert_eq!(artifact, dir.path().join("logo.webp"));
    }
}
