use std::time::Duration;

use async_trait::async_trait;

use crate::{
    entities::{Coordinates, DirectionsResponse, PlaceResult},
    error::{search_error, upstream_error, Error},
};

use super::{DirectionsService, PlaceSearch};

/// Talks to the journey-flow proxy, which holds the REST key.
#[derive(Clone, Debug)]
pub struct ProxyClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PlaceSearch for ProxyClient {
    #[tracing::instrument(skip(self))]
    async fn keyword_search(&self, query: &str) -> Result<Vec<PlaceResult>, Error> {
        let res = self
            .http
            .get(format!("{}/places", self.base_url))
            .query(&[("query", query)])
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::warn!(status = res.status().as_u16(), "place search failed");
            return Err(search_error());
        }

        Ok(res.json().await?)
    }
}

#[async_trait]
impl DirectionsService for ProxyClient {
    #[tracing::instrument(skip(self))]
    async fn find_directions(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Vec<Coordinates>, Error> {
        let res = self
            .http
            .get(format!("{}/directions", self.base_url))
            .query(&[("origin", origin.to_lng_lat())])
            .query(&[("destination", destination.to_lng_lat())])
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::warn!(status = res.status().as_u16(), "directions request failed");
            return Err(upstream_error());
        }

        let body = res.text().await?;
        let data: DirectionsResponse = serde_json::from_str(&body)?;

        data.path()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use axum::{
        extract::Query,
        http::StatusCode,
        response::IntoResponse,
        routing::get,
        Json, Router,
    };
    use serde_json::json;

    use super::*;
    use crate::controller::fakes::controller;
    use crate::controller::RouteOutcome;
    use crate::entities::{Role, RouteKind};
    use crate::sdk::HeadlessMap;
    use crate::testing::spawn_server;

    fn client(addr: std::net::SocketAddr) -> ProxyClient {
        ProxyClient::new(format!("http://{}/", addr), Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn directions_are_requested_lng_first() {
        let app = Router::new().route(
            "/directions",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params["origin"], "126.8,35.1");
                assert_eq!(params["destination"], "126.9,35.2");

                Json(json!({
                    "routes": [{
                        "result_code": 0,
                        "sections": [{ "roads": [
                            { "vertexes": [126.8, 35.1, 126.85, 35.15] },
                            { "vertexes": [126.9, 35.2] }
                        ]}]
                    }]
                }))
            }),
        );
        let addr = spawn_server(app).await;

        let path = client(addr)
            .find_directions(Coordinates::new(35.1, 126.8), Coordinates::new(35.2, 126.9))
            .await
            .unwrap();

        assert_eq!(
            path,
            vec![
                Coordinates::new(35.1, 126.8),
                Coordinates::new(35.15, 126.85),
                Coordinates::new(35.2, 126.9),
            ]
        );
    }

    #[tokio::test]
    async fn server_error_is_a_directions_failure() {
        let app = Router::new().route(
            "/directions",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR.into_response() }),
        );
        let addr = spawn_server(app).await;

        let result = client(addr)
            .find_directions(Coordinates::new(35.1, 126.8), Coordinates::new(35.2, 126.9))
            .await;

        assert_eq!(result, Err(upstream_error()));
    }

    #[tokio::test]
    async fn malformed_json_is_a_directions_failure() {
        let app = Router::new().route("/directions", get(|| async { "{\"routes\": [" }));
        let addr = spawn_server(app).await;

        let result = client(addr)
            .find_directions(Coordinates::new(35.1, 126.8), Coordinates::new(35.2, 126.9))
            .await;

        assert_eq!(result.unwrap_err().code, 6);
    }

    #[tokio::test]
    async fn unreachable_proxy_is_a_transport_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = client(addr)
            .find_directions(Coordinates::new(35.1, 126.8), Coordinates::new(35.2, 126.9))
            .await;

        assert_eq!(result.unwrap_err().code, 3);
    }

    #[tokio::test]
    async fn slow_directions_time_out_into_the_straight_line() {
        let app = Router::new().route(
            "/directions",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;

                Json(json!({
                    "routes": [{ "result_code": 0, "sections": [{ "roads": [
                        { "vertexes": [126.8, 35.1, 126.9, 35.2] }
                    ]}]}]
                }))
            }),
        );
        let addr = spawn_server(app).await;
        let client =
            ProxyClient::new(format!("http://{}", addr), Duration::from_millis(200)).unwrap();

        let map = HeadlessMap::new();
        let mut controller = controller(&map, Arc::new(client));
        let start = Coordinates::new(35.10, 126.80);
        let end = Coordinates::new(35.20, 126.90);
        controller.set_point(start, Role::Start).unwrap();
        controller.set_point(end, Role::End).unwrap();

        let started = Instant::now();
        let outcome = controller.request_route().await;

        assert_eq!(outcome, Ok(RouteOutcome::Fallback));
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(controller.overlay().unwrap().kind, RouteKind::Fallback);

        let snapshot = map.snapshot();
        let polyline = snapshot.single_polyline().unwrap();
        assert_eq!(polyline.path, vec![start, end]);
        assert_eq!(polyline.style, RouteKind::Fallback.style());
    }

    #[tokio::test]
    async fn keyword_search_returns_places() {
        let app = Router::new().route(
            "/places",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                if params["query"] != "카페" {
                    return Json(json!([]));
                }

                Json(json!([
                    { "place_name": "카페 A", "address_name": "광주 서구", "x": "126.85", "y": "35.15" }
                ]))
            }),
        );
        let addr = spawn_server(app).await;
        let client = client(addr);

        let places = client.keyword_search("카페").await.unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].place_name, "카페 A");

        let places = client.keyword_search("서점").await.unwrap();
        assert!(places.is_empty());
    }

    #[tokio::test]
    async fn search_failure_maps_to_search_error() {
        let app = Router::new().route(
            "/places",
            get(|| async { StatusCode::BAD_GATEWAY.into_response() }),
        );
        let addr = spawn_server(app).await;

        let result = client(addr).keyword_search("카페").await;
        assert_eq!(result, Err(search_error()));
    }
}
