pub mod adapters;
pub mod config;
pub mod core;
pub mod dom;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{HttpFetcher, LocalStorage};
pub use config::PortalConfig;
pub use crate::core::{
    ads::{AdsCarousel, AdsLoader},
    bundle::PortalBundler,
    loader::{LoadOutcome, LoadState, Loader, Settlement},
    packages::{PackagesLoader, PackagesTable},
};
pub use dom::Page;
pub use utils::error::{PortalError, Result};
