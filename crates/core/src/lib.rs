pub mod error;
pub mod types;

pub use error::{GroupingError, GroupingResult};
pub use types::{Asset, AssetInput, AssetPatch, CloudAccount, Tag};
