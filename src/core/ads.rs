use crate::core::loader::Loader;
use crate::core::{Component, ConfigProvider, Result};
use crate::dom::{Element, Page, ADS_CONTAINER_ID};
use crate::domain::model::{Ad, AdsResponse};
use crate::utils::error::PortalError;

const SLIDE_CLASS: &str = "slide";
const MEDIA_STYLE: &str = "width:100%; border-radius:12px;";

pub const NO_ADS_TEXT: &str = "No ads available";
pub const ADS_UNAVAILABLE_TEXT: &str = "Ads unavailable";

/// Ad carousel: one `div.slide` per ad inside the container element.
#[derive(Debug, Clone)]
pub struct AdsCarousel {
    container_id: String,
}

impl Default for AdsCarousel {
    fn default() -> Self {
        Self {
            container_id: ADS_CONTAINER_ID.to_string(),
        }
    }
}

impl AdsCarousel {
    pub fn with_container_id(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
        }
    }

    fn slide() -> Element {
        Element::new("div").class(SLIDE_CLASS)
    }
}

impl Component for AdsCarousel {
    type Payload = AdsResponse;

    fn name(&self) -> &'static str {
        "ads"
    }

    fn locate<'p>(&self, page: &'p mut Page) -> Result<&'p mut Element> {
        page.element_by_id_mut(&self.container_id)
            .ok_or_else(|| PortalError::MissingTarget {
                target: format!("#{}", self.container_id),
            })
    }

    fn render_item(&self, ad: &Ad) -> Element {
        let media = if ad.is_video() {
            Element::new("video")
                .attr("src", ad.url.as_str())
                .attr("autoplay", "")
                .attr("muted", "")
                .attr("loop", "")
                .attr("playsinline", "")
                .attr("style", MEDIA_STYLE)
        } else {
            Element::new("img")
                .attr("src", ad.url.as_str())
                .attr("alt", "Advertisement")
                .attr("style", MEDIA_STYLE)
        };

        Self::slide().child(media)
    }

    fn empty_placeholder(&self) -> Element {
        Self::slide().text(NO_ADS_TEXT)
    }

    fn failure_placeholder(&self) -> Element {
        Self::slide().text(ADS_UNAVAILABLE_TEXT)
    }
}

pub type AdsLoader<P> = Loader<AdsCarousel, P>;

impl<P: ConfigProvider> Loader<AdsCarousel, P> {
    /// Loader for the default `#ads-slides` container.
    pub fn from_config(config: P) -> Result<Self> {
        Loader::new(AdsCarousel::default(), config)
    }
}
