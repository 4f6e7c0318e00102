use super::Controller;

use crate::{
    entities::PlaceResult,
    error::{missing_keyword_error, search_error, Error},
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchState {
    pub keyword: String,
    pub results: Vec<PlaceResult>,
    pub in_flight: bool,
    generation: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    Found(usize),
    /// The search ran but matched nothing. Informational, not an error.
    ZeroResult,
    /// A newer search or a reset replaced this one before it completed.
    Superseded,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchTicket {
    generation: u64,
    pub query: String,
}

impl Controller {
    /// Validates the keyword and marks a search as in flight.
    pub fn begin_search(&mut self, keyword: &str) -> Result<SearchTicket, Error> {
        let query = keyword.trim();
        if query.is_empty() {
            return Err(missing_keyword_error());
        }
        self.map()?;

        let generation = self.search_state.generation + 1;
        self.search_state = SearchState {
            keyword: keyword.to_string(),
            results: vec![],
            in_flight: true,
            generation,
        };

        Ok(SearchTicket {
            generation,
            query: query.to_string(),
        })
    }

    #[tracing::instrument(skip_all, fields(query = %ticket.query))]
    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        response: Result<Vec<PlaceResult>, Error>,
    ) -> Result<SearchStatus, Error> {
        if ticket.generation != self.search_state.generation {
            tracing::debug!("discarding superseded search response");
            return Ok(SearchStatus::Superseded);
        }

        self.search_state.in_flight = false;

        match response {
            Ok(results) if results.is_empty() => {
                tracing::info!("search returned no results");
                Ok(SearchStatus::ZeroResult)
            }
            Ok(results) => {
                let count = results.len();
                self.search_state.results = results;
                tracing::info!(count, "search completed");
                Ok(SearchStatus::Found(count))
            }
            Err(err) => {
                tracing::warn!(%err, "search failed");
                Err(search_error())
            }
        }
    }

    pub async fn search(&mut self, keyword: &str) -> Result<SearchStatus, Error> {
        let ticket = self.begin_search(keyword)?;
        let response = self.search.keyword_search(&ticket.query).await;

        self.finish_search(ticket, response)
    }

    pub(super) fn supersede_searches(&mut self) {
        self.search_state = SearchState {
            generation: self.search_state.generation + 1,
            ..SearchState::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::super::fakes::*;
    use super::*;
    use crate::error::{map_not_initialized_error, upstream_error};
    use crate::sdk::HeadlessMap;

    #[tokio::test]
    async fn empty_keyword_is_rejected_without_searching() {
        let map = HeadlessMap::new();
        let search = FakeSearch::new(vec![]);
        let mut controller = controller_with(
            &map,
            search.clone(),
            FakeDirections::new(Err(upstream_error())),
            None,
        );

        assert_eq!(controller.search("   ").await, Err(missing_keyword_error()));
        assert!(search.queries.lock().unwrap().is_empty());
        assert!(!controller.search_state().in_flight);
    }

    #[tokio::test]
    async fn search_needs_an_initialized_map() {
        let map = HeadlessMap::detached();
        let search = FakeSearch::new(vec![]);
        let mut controller = controller_with(
            &map,
            search.clone(),
            FakeDirections::new(Err(upstream_error())),
            None,
        );

        assert_eq!(
            controller.search("카페").await,
            Err(map_not_initialized_error())
        );
        assert!(search.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn results_replace_previous_ones() {
        let map = HeadlessMap::new();
        let search = FakeSearch::new(vec![
            Ok(vec![place("카페 A", 35.15, 126.85), place("카페 B", 35.16, 126.86)]),
            Ok(vec![place("서점", 35.17, 126.87)]),
        ]);
        let mut controller = controller_with(
            &map,
            search.clone(),
            FakeDirections::new(Err(upstream_error())),
            None,
        );

        assert_eq!(controller.search(" 카페 ").await, Ok(SearchStatus::Found(2)));
        assert_eq!(controller.search_state().keyword, " 카페 ");
        assert_eq!(controller.search("서점").await, Ok(SearchStatus::Found(1)));

        let state = controller.search_state();
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].place_name, "서점");
        assert!(!state.in_flight);
        assert_eq!(*search.queries.lock().unwrap(), vec!["카페", "서점"]);
    }

    #[tokio::test]
    async fn zero_result_is_informational() {
        let map = HeadlessMap::new();
        let search = FakeSearch::new(vec![Ok(vec![place("카페 A", 35.15, 126.85)]), Ok(vec![])]);
        let mut controller = controller_with(
            &map,
            search,
            FakeDirections::new(Err(upstream_error())),
            None,
        );

        controller.search("카페 A").await.unwrap();
        assert_eq!(controller.search("카페").await, Ok(SearchStatus::ZeroResult));

        assert!(controller.search_state().results.is_empty());
        assert!(!controller.search_state().in_flight);
    }

    #[tokio::test]
    async fn service_error_clears_in_flight() {
        let map = HeadlessMap::new();
        let search = FakeSearch::new(vec![Err(upstream_error())]);
        let mut controller = controller_with(
            &map,
            search,
            FakeDirections::new(Err(upstream_error())),
            None,
        );

        assert_eq!(controller.search("카페").await, Err(search_error()));
        assert!(!controller.search_state().in_flight);
        assert!(controller.search_state().results.is_empty());
    }

    #[test]
    fn in_flight_until_finished() {
        let map = HeadlessMap::new();
        let mut controller = controller(&map, FakeDirections::new(Err(upstream_error())));

        let ticket = controller.begin_search("카페").unwrap();
        assert!(controller.search_state().in_flight);

        let status = controller.finish_search(ticket, Ok(vec![]));
        assert_eq!(status, Ok(SearchStatus::ZeroResult));
        assert!(!controller.search_state().in_flight);
    }

    #[test]
    fn stale_search_response_is_discarded() {
        let map = HeadlessMap::new();
        let mut controller = controller(&map, FakeDirections::new(Err(upstream_error())));

        let first = controller.begin_search("카페").unwrap();
        let second = controller.begin_search("서점").unwrap();

        let status = controller.finish_search(first, Ok(vec![place("카페 A", 35.15, 126.85)]));
        assert_eq!(status, Ok(SearchStatus::Superseded));
        assert!(controller.search_state().in_flight);

        let status = controller.finish_search(second, Ok(vec![place("서점", 35.17, 126.87)]));
        assert_eq!(status, Ok(SearchStatus::Found(1)));
        assert_eq!(controller.search_state().results[0].place_name, "서점");
    }

    #[test]
    fn reset_discards_an_outstanding_search() {
        let map = HeadlessMap::new();
        let mut controller = controller(&map, FakeDirections::new(Err(upstream_error())));

        let ticket = controller.begin_search("카페").unwrap();
        controller.reset();

        let status = controller.finish_search(ticket, Ok(vec![place("카페 A", 35.15, 126.85)]));
        assert_eq!(status, Ok(SearchStatus::Superseded));
        assert!(controller.search_state().results.is_empty());
        assert_eq!(controller.search_state().keyword, "");
    }
}
