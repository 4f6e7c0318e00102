mod directions_api;
mod places_api;

use crate::{api::API, config::Config, error::Error};

/// Proxy backend. Holds the REST key so clients never see it.
#[derive(Debug)]
pub struct Engine {
    config: Config,
    client: reqwest::Client,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(config: Config) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;

        Ok(Self { config, client })
    }
}

impl API for Engine {}
