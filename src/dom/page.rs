use super::node::Element;

pub const ADS_CONTAINER_ID: &str = "ads-slides";
pub const PACKAGES_TABLE_ID: &str = "packages-table";

/// In-memory document the loaders render into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    body: Element,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            body: Element::new("body"),
        }
    }

    /// The captive-portal layout: an ad carousel above a pricing table.
    pub fn portal() -> Self {
        Self::portal_with(ADS_CONTAINER_ID, PACKAGES_TABLE_ID)
    }

    pub fn portal_with(ads_container_id: &str, packages_table_id: &str) -> Self {
        Self::new()
            .with(
                Element::new("div")
                    .class("ads")
                    .child(Element::new("div").id(ads_container_id).class("slides")),
            )
            .with(
                Element::new("table")
                    .id(packages_table_id)
                    .child(
                        Element::new("thead").child(
                            Element::new("tr")
                                .child(Element::new("th").text("Package"))
                                .child(Element::new("th").text("Price")),
                        ),
                    )
                    .child(Element::new("tbody")),
            )
    }

    pub fn with(mut self, element: Element) -> Self {
        self.append(element);
        self
    }

    pub fn append(&mut self, element: Element) {
        self.body.push_child(element);
    }

    pub fn body(&self) -> &Element {
        &self.body
    }

    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        self.body.find_by_id(id)
    }

    pub fn element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.body.find_by_id_mut(id)
    }

    pub fn to_html(&self) -> String {
        format!("<!DOCTYPE html><html>{}</html>", self.body.to_html())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portal_layout_has_both_targets() {
        let mut page = Page::portal();
        assert!(page.element_by_id(ADS_CONTAINER_ID).is_some());

        let table = page.element_by_id_mut(PACKAGES_TABLE_ID).unwrap();
        assert!(table.find_descendant_mut("tbody").is_some());
    }

    #[test]
    fn test_to_html_wraps_body() {
        let page = Page::new().with(Element::new("div").id("x"));
        assert_eq!(
            page.to_html(),
            r#"<!DOCTYPE html><html><body><div id="x"></div></body></html>"#
        );
    }
}
