use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use super::{Controller, RouteOutcome, SearchStatus};

use crate::{
    entities::{Coordinates, PlaceResult, Role},
    error::Error,
};

/// Shared handle to a controller for hosts that dispatch events concurrently.
/// The lock is never held while waiting on the network, so a second route
/// request can be issued while the first is outstanding.
#[derive(Clone)]
pub struct Session {
    controller: Arc<Mutex<Controller>>,
}

impl Session {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, Controller> {
        self.controller.lock().await
    }

    pub async fn initialize(&self) {
        self.lock().await.initialize();
    }

    #[tracing::instrument(name = "Session::search", skip(self))]
    pub async fn search(&self, keyword: &str) -> Result<SearchStatus, Error> {
        let (ticket, search) = {
            let mut controller = self.lock().await;
            (controller.begin_search(keyword)?, controller.search.clone())
        };

        let response = search.keyword_search(&ticket.query).await;

        self.lock().await.finish_search(ticket, response)
    }

    pub async fn select_result(&self, place: &PlaceResult, role: Role) -> Result<(), Error> {
        self.lock().await.select_result(place, role)
    }

    pub async fn set_point(&self, coordinates: Coordinates, role: Role) -> Result<(), Error> {
        self.lock().await.set_point(coordinates, role)
    }

    #[tracing::instrument(name = "Session::use_current_location", skip(self))]
    pub async fn use_current_location(&self) -> Result<Coordinates, Error> {
        let geolocation = self.lock().await.geolocation()?;
        let position = geolocation.current_position().await;

        self.lock().await.apply_current_location(position)
    }

    #[tracing::instrument(name = "Session::request_route", skip(self))]
    pub async fn request_route(&self) -> Result<RouteOutcome, Error> {
        let (ticket, directions) = {
            let mut controller = self.lock().await;
            (controller.begin_route()?, controller.directions.clone())
        };

        let response = directions
            .find_directions(ticket.origin, ticket.destination)
            .await;

        self.lock().await.finish_route(ticket, response)
    }

    pub async fn draw_straight_route(&self) -> Result<(), Error> {
        self.lock().await.draw_straight_route()
    }

    pub async fn reset(&self) {
        self.lock().await.reset();
    }
}
