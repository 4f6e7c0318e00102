use super::Controller;

use crate::{
    entities::{Bounds, Coordinates, RouteKind, RouteOverlay},
    error::{missing_endpoints_error, Error},
};

/// Issued for every route request. Only the ticket carrying the latest
/// token may change the overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteTicket {
    pub token: u64,
    pub origin: Coordinates,
    pub destination: Coordinates,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Road path from the directions service is drawn.
    Service { vertices: usize },
    /// Directions failed and the straight line is drawn instead.
    Fallback,
    /// A newer request, a moved endpoint or a reset made this response stale.
    Superseded,
}

impl Controller {
    pub fn begin_route(&mut self) -> Result<RouteTicket, Error> {
        self.map()?;
        let (origin, destination) = self
            .points
            .endpoints()
            .ok_or_else(|| missing_endpoints_error())?;

        self.supersede_route_requests();

        Ok(RouteTicket {
            token: self.route_token,
            origin,
            destination,
        })
    }

    #[tracing::instrument(skip(self, response), fields(token = ticket.token))]
    pub fn finish_route(
        &mut self,
        ticket: RouteTicket,
        response: Result<Vec<Coordinates>, Error>,
    ) -> Result<RouteOutcome, Error> {
        if ticket.token != self.route_token {
            tracing::debug!(latest = self.route_token, "discarding superseded route response");
            return Ok(RouteOutcome::Superseded);
        }

        match response {
            Ok(path) if !path.is_empty() => {
                let vertices = path.len();
                self.draw(path, RouteKind::Service)?;
                tracing::info!(vertices, "route drawn");

                Ok(RouteOutcome::Service { vertices })
            }
            Ok(_) => {
                tracing::warn!("directions returned an empty path, drawing straight route");
                self.draw(vec![ticket.origin, ticket.destination], RouteKind::Fallback)?;

                Ok(RouteOutcome::Fallback)
            }
            Err(err) => {
                tracing::warn!(%err, "directions failed, drawing straight route");
                self.draw(vec![ticket.origin, ticket.destination], RouteKind::Fallback)?;

                Ok(RouteOutcome::Fallback)
            }
        }
    }

    /// Requests a driving route between the two endpoints, falling back to
    /// a straight line when the directions service cannot be used.
    pub async fn request_route(&mut self) -> Result<RouteOutcome, Error> {
        let ticket = self.begin_route()?;
        let response = self
            .directions
            .find_directions(ticket.origin, ticket.destination)
            .await;

        self.finish_route(ticket, response)
    }

    #[tracing::instrument(skip(self))]
    pub fn draw_straight_route(&mut self) -> Result<(), Error> {
        let ticket = self.begin_route()?;
        self.draw(vec![ticket.origin, ticket.destination], RouteKind::Fallback)
    }

    fn draw(&mut self, path: Vec<Coordinates>, kind: RouteKind) -> Result<(), Error> {
        let map = self.map()?;
        let bounds = Bounds::from_points(&path).ok_or_else(|| missing_endpoints_error())?;

        self.clear_overlay();
        let polyline = self.sdk.create_polyline(map, &path, &kind.style());
        self.overlay = Some(RouteOverlay {
            polyline,
            kind,
            path,
        });
        self.sdk.set_bounds(map, bounds);

        Ok(())
    }
}
