pub mod ads;
pub mod bundle;
pub mod loader;
pub mod packages;

pub use crate::domain::model::{Ad, AdsResponse, ListPayload, Package, PackagesResponse};
pub use crate::domain::ports::{Component, ConfigProvider, Fetcher, Storage};
pub use crate::utils::error::Result;
