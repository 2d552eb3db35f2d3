use crate::adapters::HttpFetcher;
use crate::core::{Component, ConfigProvider, Fetcher, ListPayload, Result};
use crate::dom::{Node, Page};
use crate::utils::error::PortalError;
use crate::utils::validation::validate_non_empty_string;

/// How a finished load left its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Populated,
    Empty,
    Failed,
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Settled(Settlement),
}

#[derive(Debug)]
pub enum LoadOutcome {
    /// One rendered element per item.
    Populated { count: usize },
    /// The API answered with no items; the empty placeholder is shown.
    Empty,
    /// Request, status or body failed; the failure placeholder is shown.
    Failed(PortalError),
    /// Configuration or render target missing; nothing was requested and
    /// the page is untouched.
    Aborted(PortalError),
}

impl LoadOutcome {
    pub fn settlement(&self) -> Settlement {
        match self {
            LoadOutcome::Populated { .. } => Settlement::Populated,
            LoadOutcome::Empty => Settlement::Empty,
            LoadOutcome::Failed(_) => Settlement::Failed,
            LoadOutcome::Aborted(_) => Settlement::Aborted,
        }
    }

    pub fn error(&self) -> Option<&PortalError> {
        match self {
            LoadOutcome::Failed(e) | LoadOutcome::Aborted(e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadOutcome::Populated { count } => write!(f, "rendered {} item(s)", count),
            LoadOutcome::Empty => write!(f, "no items, placeholder shown"),
            LoadOutcome::Failed(e) => write!(f, "failed, fallback shown: {}", e),
            LoadOutcome::Aborted(e) => write!(f, "not loaded: {}", e),
        }
    }
}

/// Fetch-render-fallback driver shared by every portal component.
pub struct Loader<C: Component, P: ConfigProvider, F: Fetcher = HttpFetcher> {
    component: C,
    config: P,
    fetcher: F,
    state: LoadState,
}

impl<C: Component, P: ConfigProvider> Loader<C, P, HttpFetcher> {
    pub fn new(component: C, config: P) -> Result<Self> {
        Ok(Self::with_fetcher(component, config, HttpFetcher::new()?))
    }
}

impl<C: Component, P: ConfigProvider, F: Fetcher> Loader<C, P, F> {
    pub fn with_fetcher(component: C, config: P, fetcher: F) -> Self {
        Self {
            component,
            config,
            fetcher,
            state: LoadState::Idle,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// `{api_base}{location_id}/`, or a configuration error when either
    /// value is blank.
    pub fn endpoint(&self) -> Result<String> {
        validate_non_empty_string("api_base", self.config.api_base())?;
        validate_non_empty_string("location_id", self.config.location_id())?;
        Ok(format!(
            "{}{}/",
            self.config.api_base(),
            self.config.location_id()
        ))
    }

    /// Runs one full load against `page`. Never fails: every outcome,
    /// including aborts, comes back as a `LoadOutcome`.
    pub async fn load(&mut self, page: &mut Page) -> LoadOutcome {
        self.state = LoadState::Idle;
        let name = self.component.name();

        let url = match self.endpoint() {
            Ok(url) => url,
            Err(e) => return self.abort(e),
        };

        let container = match self.component.locate(page) {
            Ok(container) => container,
            Err(e) => return self.abort(e),
        };

        self.state = LoadState::Loading;
        tracing::info!("Loading {} from {}", name, url);

        let (children, outcome): (Vec<Node>, LoadOutcome) = match self.fetch_items(&url).await {
            Ok(items) if items.is_empty() => {
                tracing::warn!("{}: API returned no items", name);
                (
                    vec![self.component.empty_placeholder().into()],
                    LoadOutcome::Empty,
                )
            }
            Ok(items) => {
                let children: Vec<Node> = items
                    .iter()
                    .map(|item| self.component.render_item(item).into())
                    .collect();
                tracing::info!("{}: rendered {} item(s)", name, children.len());
                let count = children.len();
                (children, LoadOutcome::Populated { count })
            }
            Err(e) => {
                tracing::error!("Failed to load {}: {}", name, e);
                (
                    vec![self.component.failure_placeholder().into()],
                    LoadOutcome::Failed(e),
                )
            }
        };

        container.replace_children(children);
        self.state = LoadState::Settled(outcome.settlement());
        outcome
    }

    async fn fetch_items(
        &self,
        url: &str,
    ) -> Result<Vec<<C::Payload as ListPayload>::Item>> {
        let body = self.fetcher.get(url).await?;
        let payload: C::Payload = serde_json::from_slice(&body)?;
        Ok(payload.into_items())
    }

    fn abort(&mut self, error: PortalError) -> LoadOutcome {
        tracing::error!("{} not loaded: {}", self.component.name(), error);
        self.state = LoadState::Settled(Settlement::Aborted);
        LoadOutcome::Aborted(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PortalConfig;
    use crate::core::ads::AdsCarousel;
    use crate::dom::ADS_CONTAINER_ID;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone)]
    struct StubFetcher {
        body: std::result::Result<&'static str, u16>,
        calls: Arc<AtomicUsize>,
    }

    impl StubFetcher {
        fn ok(body: &'static str) -> Self {
            Self {
                body: Ok(body),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn status(status: u16) -> Self {
            Self {
                body: Err(status),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl Fetcher for StubFetcher {
        async fn get(&self, url: &str) -> Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.body {
                Ok(body) => Ok(body.as_bytes().to_vec()),
                Err(status) => Err(PortalError::Status {
                    status,
                    url: url.to_string(),
                }),
            }
        }
    }

    fn config() -> PortalConfig {
        PortalConfig::new("http://portal.test/api/portal/", "loc-1")
    }

    fn slide_count(page: &Page) -> usize {
        page.element_by_id(ADS_CONTAINER_ID)
            .unwrap()
            .child_elements()
            .count()
    }

    #[test]
    fn test_endpoint_concatenates_base_and_location() {
        let loader =
            Loader::with_fetcher(AdsCarousel::default(), config(), StubFetcher::ok("{}"));
        assert_eq!(
            loader.endpoint().unwrap(),
            "http://portal.test/api/portal/loc-1/"
        );
    }

    #[tokio::test]
    async fn test_state_progression_to_populated() {
        let fetcher = StubFetcher::ok(r#"{"ads": [{"url": "a.png"}, {"url": "b.png"}]}"#);
        let mut loader = Loader::with_fetcher(AdsCarousel::default(), config(), fetcher);
        assert_eq!(loader.state(), LoadState::Idle);

        let mut page = Page::portal();
        let outcome = loader.load(&mut page).await;

        assert!(matches!(outcome, LoadOutcome::Populated { count: 2 }));
        assert_eq!(
            loader.state(),
            LoadState::Settled(Settlement::Populated)
        );
        assert_eq!(slide_count(&page), 2);
    }

    #[tokio::test]
    async fn test_blank_config_aborts_without_fetching() {
        let fetcher = StubFetcher::ok("{}");
        let calls = fetcher.calls.clone();
        let mut loader = Loader::with_fetcher(
            AdsCarousel::default(),
            PortalConfig::new("", "loc-1"),
            fetcher,
        );

        let mut page = Page::portal();
        let before = page.clone();
        let outcome = loader.load(&mut page).await;

        assert_eq!(outcome.settlement(), Settlement::Aborted);
        assert!(outcome.error().unwrap().is_pre_request());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(page, before);
    }

    #[tokio::test]
    async fn test_missing_container_aborts_without_fetching() {
        let fetcher = StubFetcher::ok("{}");
        let calls = fetcher.calls.clone();
        let mut loader = Loader::with_fetcher(AdsCarousel::default(), config(), fetcher);

        let mut page = Page::new();
        let outcome = loader.load(&mut page).await;

        assert!(matches!(
            outcome,
            LoadOutcome::Aborted(PortalError::MissingTarget { .. })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_replaces_previous_content() {
        let mut page = Page::portal();

        let mut first = Loader::with_fetcher(
            AdsCarousel::default(),
            config(),
            StubFetcher::ok(r#"{"ads": [{"url": "a.png"}, {"url": "b.png"}]}"#),
        );
        first.load(&mut page).await;
        assert_eq!(slide_count(&page), 2);

        let mut second =
            Loader::with_fetcher(AdsCarousel::default(), config(), StubFetcher::status(503));
        let outcome = second.load(&mut page).await;

        assert_eq!(outcome.settlement(), Settlement::Failed);
        assert_eq!(slide_count(&page), 1);
        assert_eq!(
            page.element_by_id(ADS_CONTAINER_ID).unwrap().text_content(),
            "Ads unavailable"
        );
    }

    #[tokio::test]
    async fn test_undecodable_body_fails() {
        let mut loader = Loader::with_fetcher(
            AdsCarousel::default(),
            config(),
            StubFetcher::ok("<html>502 Bad Gateway</html>"),
        );

        let mut page = Page::portal();
        let outcome = loader.load(&mut page).await;

        assert!(matches!(outcome, LoadOutcome::Failed(PortalError::Decode(_))));
    }
}
