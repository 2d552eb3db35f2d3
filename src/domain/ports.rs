use crate::dom::{Element, Page};
use crate::domain::model::ListPayload;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn location_id(&self) -> &str;
}

/// Issues a GET and hands back the raw body of a 2xx response.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// One page widget fed by the portal API: where it renders, how a single
/// item looks and what it shows when there is nothing to show.
pub trait Component: Send + Sync {
    type Payload: DeserializeOwned + ListPayload + Send;

    fn name(&self) -> &'static str;

    fn locate<'p>(&self, page: &'p mut Page) -> Result<&'p mut Element>;

    fn render_item(&self, item: &<Self::Payload as ListPayload>::Item) -> Element;

    fn empty_placeholder(&self) -> Element;

    fn failure_placeholder(&self) -> Element;
}
