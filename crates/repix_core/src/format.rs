use strum_macros::{AsRefStr, EnumString, IntoStaticStr};

/// The image format converted artifacts are encoded in.
/// The serialized name doubles as the file extension.
#[derive(AsRefStr, EnumString, IntoStaticStr, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetFormat {
    #[default]
    #[strum(serialize = "webp")]
    Webp,
    #[strum(serialize = "jpeg")]
    Jpeg,
    #[strum(serialize = "png")]
    Png,
}

impl TargetFormat {
    #[inline]
    pub fn extension(self) -> &'static str {
        self.into()
    }
}

/// Source extensions the conversion gate considers convertible.
/// Everything else passes through untouched.
static CONVERTIBLE_EXTENSIONS: phf::Set<&'static str> = phf::phf_set! {
    "png",
    "jpg",
    "jpeg",
    "gif",
    "bmp",
    "tif",
    "tiff",
    "webp",
};

/// Checks whether the extension belongs to a convertible raster format.
/// Expects a lowercase extension without the leading dot.
pub fn is_convertible_extension(extension: &str) -> bool {
    CONVERTIBLE_EXTENSIONS.contains(extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn format_extension_round_trip() {
        assert_eq!(TargetFormat::Webp.extension(), "webp");
        assert_eq!(TargetFormat::from_str("jpeg").ok(), Some(TargetFormat::Jpeg));
        assert!(TargetFormat::from_str("exe").is_err());
    }

    #[test]
    fn convertible_extensions() {
        assert!(is_convertible_extension("png"));
        assert!(is_convertible_extension("jpeg"));
        assert!(!is_convertible_extension("svg"));
        assert!(!is_convertible_extension(""));
    }
}
