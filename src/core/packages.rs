use crate::core::loader::Loader;
use crate::core::{Component, ConfigProvider, Result};
use crate::dom::{Element, Page, PACKAGES_TABLE_ID};
use crate::domain::model::{Package, PackagesResponse};
use crate::utils::error::PortalError;

pub const NO_PACKAGES_TEXT: &str = "No packages available";
pub const PACKAGES_FAILED_TEXT: &str = "Failed to load packages";

/// Pricing table: one row per package in the `tbody` of the table.
#[derive(Debug, Clone)]
pub struct PackagesTable {
    table_id: String,
}

impl Default for PackagesTable {
    fn default() -> Self {
        Self {
            table_id: PACKAGES_TABLE_ID.to_string(),
        }
    }
}

impl PackagesTable {
    pub fn with_table_id(table_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
        }
    }

    fn message_row(text: &str) -> Element {
        Element::new("tr").child(Element::new("td").attr("colspan", "2").text(text))
    }
}

impl Component for PackagesTable {
    type Payload = PackagesResponse;

    fn name(&self) -> &'static str {
        "packages"
    }

    fn locate<'p>(&self, page: &'p mut Page) -> Result<&'p mut Element> {
        page.element_by_id_mut(&self.table_id)
            .and_then(|table| table.find_descendant_mut("tbody"))
            .ok_or_else(|| PortalError::MissingTarget {
                target: format!("#{} tbody", self.table_id),
            })
    }

    fn render_item(&self, package: &Package) -> Element {
        Element::new("tr")
            .child(Element::new("td").text(package.name.as_str()))
            .child(Element::new("td").text(package.price_label()))
    }

    fn empty_placeholder(&self) -> Element {
        Self::message_row(NO_PACKAGES_TEXT)
    }

    fn failure_placeholder(&self) -> Element {
        Self::message_row(PACKAGES_FAILED_TEXT)
    }
}

pub type PackagesLoader<P> = Loader<PackagesTable, P>;

impl<P: ConfigProvider> Loader<PackagesTable, P> {
    /// Loader for the default `#packages-table` body.
    pub fn from_config(config: P) -> Result<Self> {
        Loader::new(PackagesTable::default(), config)
    }
}
