mod codec;
mod error;
mod gate;
mod resolver;
mod traits;

pub use codec::RasterCodec;
pub use error::ConvertError;
pub use gate::{Conversion, ConversionGate};
pub use resolver::FsResolver;
pub use traits::{ImageCodec, PathResolver};
