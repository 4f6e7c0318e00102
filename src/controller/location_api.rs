use super::Controller;

use crate::{
    entities::{Coordinates, Role},
    error::{location_error, location_unsupported_error, Error},
    sdk::DynGeolocation,
};

impl Controller {
    pub(super) fn geolocation(&self) -> Result<DynGeolocation, Error> {
        self.geolocation
            .clone()
            .ok_or_else(|| location_unsupported_error())
    }

    /// Uses the device position as the start point. Failures leave both
    /// points untouched.
    pub fn apply_current_location(
        &mut self,
        position: Result<Coordinates, Error>,
    ) -> Result<Coordinates, Error> {
        let coordinates = position.map_err(|err| {
            tracing::warn!(%err, "current location unavailable");
            location_error()
        })?;

        self.set_point(coordinates, Role::Start)?;
        self.pan_to(coordinates)?;

        Ok(coordinates)
    }

    #[tracing::instrument(skip(self))]
    pub async fn use_current_location(&mut self) -> Result<Coordinates, Error> {
        let geolocation = self.geolocation()?;
        let position = geolocation.current_position().await;

        self.apply_current_location(position)
    }
}
