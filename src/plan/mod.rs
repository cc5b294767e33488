pub mod conversion;
pub mod definition;
pub mod toolset;

pub use conversion::*;
pub use definition::*;
pub use toolset::*;
