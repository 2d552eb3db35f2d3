pub mod node;
pub mod page;

pub use node::{Element, Node};
pub use page::{Page, ADS_CONTAINER_ID, PACKAGES_TABLE_ID};
