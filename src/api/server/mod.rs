mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::Extension, routing::get, Router};

use crate::api::server::handlers::{directions, places};
use crate::api::{interface::DynAPI, API};
use crate::error::{unexpected_error, Error};

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/directions", get(directions::find))
        .route("/places", get(places::search))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;
    let app = router(api);

    let server = axum::Server::try_bind(&addr).map_err(|err| {
        tracing::error!(%err, %addr, "failed to bind");
        unexpected_error()
    })?;

    tracing::info!("listening on {}", addr);

    server
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!(%err, "server stopped");
            unexpected_error()
        })
}

async fn health() -> &'static str {
    "ok"
}
