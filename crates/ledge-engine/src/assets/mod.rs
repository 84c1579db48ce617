pub mod error;
pub mod manifest;
pub mod registry;
pub mod store;

pub use error::AssetError;
