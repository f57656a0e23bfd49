use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::traits::PathResolver;

/// Default filesystem resolver.
///
/// Relative references are resolved against the directory of the
/// importing template, absolute ones against the configured root.
pub struct FsResolver {
    root: PathBuf,
}

impl FsResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsResolver { root: root.into() }
    }
}

#[async_trait]
impl PathResolver for FsResolver {
    async fn resolve(&self, reference: &str, importer: &Path) -> Option<PathBuf> {
        let candidate = if let Some(root_relative) = reference.strip_prefix('/') {
            self.root.join(root_relative)
        } else {
            match importer.parent() {
                Some(parent) => parent.join(reference),
                None => PathBuf::from(reference),
            }
        };

        match tokio::fs::try_exists(&candidate).await {
            Ok(true) => Some(candidate),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn it_resolves_relative_to_the_importer() {
        let dir = tempfile::tempdir().expect("Should create a temp dir");
        std::fs::create_dir(dir.path().join("img")).expect("Should create img dir");
        std::fs::write(dir.path().join("img/logo.png"), b"png").expect("Should write");

        let resolver = FsResolver::new(dir.path());
        let importer = dir.path().join("page.html");

        let resolved = resolver.resolve("./img/logo.png", &importer).await;
        assert_eq!(resolved, Some(dir.path().join("img/logo.png")));

        let missing = resolver.resolve("./img/missing.png", &importer).await;
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn it_resolves_absolute_references_against_the_root() {
        let dir = tempfile::tempdir().expect("Should create a temp dir");
        std::fs::write(dir.path().join("banner.png"), b"png").expect("Should write");

        let resolver = FsResolver::new(dir.path());
        let importer = dir.path().join("nested/page.html");

        let resolved = resolver.resolve("/banner.png", &importer).await;
        assert_eq!(resolved, Some(dir.path().join("banner.png")));
    }
}
