pub mod asset;

pub use asset::{AssetInfo, AssetInfoUnchecked, Cw20ExecuteMsg};
