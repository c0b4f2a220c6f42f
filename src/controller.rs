//! Owns the display state and turns user actions into provider requests.

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

use crate::client::WeatherSource;
use crate::error::LocationError;
use crate::location::Geolocator;
use crate::models::{LocationSelector, PlaceCandidate};
use crate::state::{DisplayState, Event};

/// What a weather query did to the display state
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Empty input, nothing was requested
    Skipped,
    Updated,
    /// The query failed and the dashboard was cleared
    Failed { notice: String },
    /// A newer query was dispatched before this one completed
    Superseded,
}

pub struct WeatherController<S, G> {
    source: S,
    geolocator: G,
    state: Mutex<DisplayState>,
    query_generation: AtomicU64,
    suggestion_generation: AtomicU64,
}

impl<S, G> WeatherController<S, G>
where
    S: WeatherSource,
    G: Geolocator,
{
    pub fn new(source: S, geolocator: G) -> Self {
        Self {
            source,
            geolocator,
            state: Mutex::new(DisplayState::default()),
            query_generation: AtomicU64::new(0),
            suggestion_generation: AtomicU64::new(0),
        }
    }

    pub async fn snapshot(&self) -> DisplayState {
        self.state.lock().await.clone()
    }

    /// Searches by city name. An empty name leaves everything untouched.
    pub async fn search(&self, city: &str) -> QueryOutcome {
        if city.is_empty() {
            return QueryOutcome::Skipped;
        }
        self.state
            .lock()
            .await
            .apply(Event::InputChanged(city.to_string()));

        self.dispatch(LocationSelector::City(city.to_string())).await
    }

    /// Searches by coordinates; on success the input shows the resolved place.
    pub async fn search_coordinates(&self, latitude: f64, longitude: f64) -> QueryOutcome {
        self.dispatch(LocationSelector::Coordinates {
            latitude,
            longitude,
        })
        .await
    }

    /// Records new input text and refreshes the suggestion list for it.
    pub async fn type_input(&self, text: &str) {
        let generation = self.suggestion_generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock().await;
            state.apply(Event::InputChanged(text.to_string()));
            if text.trim().is_empty() {
                state.apply(Event::SuggestionsCleared);
                return;
            }
        }

        let suggestions = self.source.suggest(text).await;

        let mut state = self.state.lock().await;
        if self.suggestion_generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Discarding stale suggestions for '{}'", text);
            return;
        }
        state.apply(Event::SuggestionsUpdated(suggestions));
    }

    /// Queries the weather at the `index`-th visible suggestion.
    /// Returns `None` when no such suggestion is on display.
    pub async fn select_suggestion(&self, index: usize) -> Option<QueryOutcome> {
        let candidate: PlaceCandidate = self
            .state
            .lock()
            .await
            .visible_suggestions()
            .get(index)
            .cloned()?;

        tracing::info!("Selected suggestion {}", candidate.name);
        Some(
            self.search_coordinates(candidate.latitude, candidate.longitude)
                .await,
        )
    }

    /// Queries the weather at the device's position. A location failure is
    /// logged and leaves the display state as it was.
    pub async fn use_current_location(&self) -> Result<QueryOutcome, LocationError> {
        match self.geolocator.current_position().await {
            Ok(position) => Ok(self
                .search_coordinates(position.latitude, position.longitude)
                .await),
            Err(e) => {
                tracing::warn!("Location access failed: {}", e);
                Err(e)
            }
        }
    }

    async fn dispatch(&self, selector: LocationSelector) -> QueryOutcome {
        let generation = self.query_generation.fetch_add(1, Ordering::SeqCst) + 1;
        // A lookup still in flight must not reopen the list this query closes.
        self.suggestion_generation.fetch_add(1, Ordering::SeqCst);
        let result = self.source.query(&selector).await;

        let mut state = self.state.lock().await;
        if self.query_generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Discarding stale weather result for {}", selector);
            return QueryOutcome::Superseded;
        }

        match result {
            Ok(report) => {
                let resolved_name = match selector {
                    LocationSelector::Coordinates { .. } => Some(report.current.city_name.clone()),
                    LocationSelector::City(_) => None,
                };
                tracing::info!(
                    "Weather updated for {}, {} ({} forecast days)",
                    report.current.city_name,
                    report.current.country_code,
                    report.forecast.len()
                );
                state.apply(Event::QuerySucceeded {
                    report,
                    resolved_name,
                });
                QueryOutcome::Updated
            }
            Err(e) => {
                tracing::error!("Weather query for {} failed: {}", selector, e);
                let notice = e.user_message(&selector).to_string();
                state.apply(Event::QueryFailed {
                    notice: notice.clone(),
                });
                QueryOutcome::Failed { notice }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WeatherError;
    use crate::location::{DeviceLocation, Position};
    use crate::models::{CurrentConditions, ForecastEntry, WeatherReport};
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct StubSource {
        queries: AtomicUsize,
        suggestions: AtomicUsize,
        fail_cities: Vec<String>,
        /// When set, queries and lookups for "slow" wait for this before answering
        gate: Option<Arc<Notify>>,
    }

    fn report(city: &str) -> WeatherReport {
        WeatherReport {
            current: CurrentConditions {
                city_name: city.to_string(),
                country_code: "XX".to_string(),
                utc_offset_secs: 0,
                temperature: 20.0,
                feels_like: 20.0,
                temp_min: 18.0,
                temp_max: 22.0,
                humidity: 50,
                pressure: 1013,
                wind_speed: 1.0,
                condition: "Clear".to_string(),
                description: "clear sky".to_string(),
                icon: "01d".to_string(),
                sunrise: 0,
                sunset: 0,
            },
            forecast: vec![ForecastEntry::new("2024-01-01 12:00:00", 20.0, "Clear")],
        }
    }

    impl WeatherSource for StubSource {
        async fn query(&self, selector: &LocationSelector) -> Result<WeatherReport, WeatherError> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            match selector {
                LocationSelector::City(name) => {
                    if name == "slow" {
                        if let Some(gate) = &self.gate {
                            gate.notified().await;
                        }
                    }
                    if self.fail_cities.contains(name) {
                        Err(WeatherError::Rejected {
                            endpoint: "forecast",
                            code: "404".to_string(),
                            message: "city not found".to_string(),
                        })
                    } else {
                        Ok(report(name))
                    }
                }
                LocationSelector::Coordinates { .. } => Ok(report("Resolved Town")),
            }
        }

        async fn suggest(&self, query: &str) -> Vec<PlaceCandidate> {
            self.suggestions.fetch_add(1, Ordering::SeqCst);
            if query == "slow" {
                if let Some(gate) = &self.gate {
                    gate.notified().await;
                }
            }
            vec![PlaceCandidate {
                name: format!("{} City", query),
                state: None,
                country: "XX".to_string(),
                latitude: 1.0,
                longitude: 2.0,
            }]
        }
    }

    fn controller(source: StubSource) -> WeatherController<StubSource, DeviceLocation> {
        WeatherController::new(source, DeviceLocation::default())
    }

    #[tokio::test]
    async fn test_empty_search_is_noop() {
        let ctl = controller(StubSource::default());
        assert_eq!(ctl.search("").await, QueryOutcome::Skipped);
        assert_eq!(ctl.source.queries.load(Ordering::SeqCst), 0);
        assert_eq!(ctl.snapshot().await, DisplayState::default());
    }

    #[tokio::test]
    async fn test_search_success_then_failure_clears() {
        let ctl = controller(StubSource {
            fail_cities: vec!["Atlantis".to_string()],
            ..Default::default()
        });

        assert_eq!(ctl.search("Lisbon").await, QueryOutcome::Updated);
        assert!(ctl.snapshot().await.report.is_some());

        let outcome = ctl.search("Atlantis").await;
        assert_eq!(
            outcome,
            QueryOutcome::Failed {
                notice: "City not found.".to_string()
            }
        );
        let state = ctl.snapshot().await;
        assert!(state.report.is_none());
        assert_eq!(state.notice.as_deref(), Some("City not found."));
    }

    #[tokio::test]
    async fn test_blank_input_clears_suggestions_without_request() {
        let ctl = controller(StubSource::default());
        ctl.type_input("Ber").await;
        assert_eq!(ctl.snapshot().await.visible_suggestions().len(), 1);

        ctl.type_input("   ").await;
        let state = ctl.snapshot().await;
        assert!(state.visible_suggestions().is_empty());
        assert_eq!(ctl.source.suggestions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_select_suggestion_fills_input() {
        let ctl = controller(StubSource::default());
        ctl.type_input("Res").await;

        assert_eq!(ctl.select_suggestion(0).await, Some(QueryOutcome::Updated));
        let state = ctl.snapshot().await;
        assert_eq!(state.input, "Resolved Town");
        assert!(state.visible_suggestions().is_empty());
    }

    #[tokio::test]
    async fn test_select_missing_suggestion() {
        let ctl = controller(StubSource::default());
        assert_eq!(ctl.select_suggestion(3).await, None);
        assert_eq!(ctl.source.queries.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_location_denied_leaves_state() {
        let ctl = controller(StubSource::default());
        ctl.search("Lisbon").await;
        let before = ctl.snapshot().await;

        assert!(matches!(
            ctl.use_current_location().await,
            Err(LocationError::Unavailable)
        ));
        assert_eq!(ctl.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_current_location_queries_coordinates() {
        let ctl = WeatherController::new(
            StubSource::default(),
            DeviceLocation::new(Some(Position {
                latitude: 10.0,
                longitude: 20.0,
            })),
        );
        assert_eq!(
            ctl.use_current_location().await.unwrap(),
            QueryOutcome::Updated
        );
        assert_eq!(ctl.snapshot().await.input, "Resolved Town");
    }

    #[tokio::test]
    async fn test_stale_query_is_discarded() {
        let gate = Arc::new(Notify::new());
        let ctl = Arc::new(controller(StubSource {
            gate: Some(gate.clone()),
            ..Default::default()
        }));

        let slow = tokio::spawn({
            let ctl = ctl.clone();
            async move { ctl.search("slow").await }
        });
        while ctl.source.queries.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        assert_eq!(ctl.search("Madrid").await, QueryOutcome::Updated);
        gate.notify_one();

        assert_eq!(slow.await.unwrap(), QueryOutcome::Superseded);
        let state = ctl.snapshot().await;
        assert_eq!(state.report.unwrap().current.city_name, "Madrid");
    }

    #[tokio::test]
    async fn test_search_discards_pending_suggestions() {
        let gate = Arc::new(Notify::new());
        let ctl = Arc::new(controller(StubSource {
            gate: Some(gate.clone()),
            ..Default::default()
        }));

        let typing = tokio::spawn({
            let ctl = ctl.clone();
            async move { ctl.type_input("slow").await }
        });
        while ctl.source.suggestions.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        assert_eq!(ctl.search("Madrid").await, QueryOutcome::Updated);
        gate.notify_one();
        typing.await.unwrap();

        let state = ctl.snapshot().await;
        assert!(state.suggestions.is_empty());
        assert!(state.visible_suggestions().is_empty());
        assert_eq!(state.report.unwrap().current.city_name, "Madrid");
    }
}
