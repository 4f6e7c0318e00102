use super::Engine;

use async_trait::async_trait;

use crate::{
    api::PlacesAPI,
    entities::PlaceResult,
    error::{missing_keyword_error, Error},
    external::kakao_local,
};

#[async_trait]
impl PlacesAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn search_places(&self, query: String) -> Result<Vec<PlaceResult>, Error> {
        let query = query.trim();
        if query.is_empty() {
            return Err(missing_keyword_error());
        }

        kakao_local::search_keyword(&self.client, &self.config, query).await
    }
}

#[test]
fn blank_query_never_reaches_upstream() {
    use crate::config::Config;
    use tokio_test::block_on;

    // Unroutable base: any upstream call would fail with a transport error.
    let config = Config::new("key").with_api_base("http://127.0.0.1:9");
    let engine = Engine::new(config).unwrap();

    let result = block_on(engine.search_places("  ".into()));
    assert_eq!(result, Err(missing_keyword_error()));
}
