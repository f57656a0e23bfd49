use crate::RepixAtom;

/// A module-level binding generated for one converted asset.
///
/// Names are `_asset_{n}`, numbered in document order within one pass.
/// Two references to the same resolved asset share one binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBinding {
    pub name: RepixAtom,
    /// The import path the binding resolves to, percent-decoded
    pub asset_path: String,
}

impl ImageBinding {
    pub fn new(index: usize, asset_path: String) -> Self {
        ImageBinding {
            name: RepixAtom::from(format!("_asset_{index}")),
            asset_path,
        }
    }
}
