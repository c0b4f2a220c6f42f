use anyhow::Result;
use chrono::Utc;
use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use std::sync::Arc;

use crate::client::OpenWeatherClient;
use crate::config::Config;
use crate::controller::{QueryOutcome, WeatherController};
use crate::formatters::{format_dashboard, format_suggestions};
use crate::location::DeviceLocation;
use crate::models::{
    CoordinatesRequest, SearchWeatherRequest, SelectSuggestionRequest, SuggestPlacesRequest,
};

type Controller = WeatherController<OpenWeatherClient, DeviceLocation>;

/// Weather widget exposed as MCP tools
#[derive(Clone)]
pub struct WeatherWidget {
    controller: Arc<Controller>,
    tool_router: ToolRouter<Self>,
}

impl WeatherWidget {
    /// Creates a widget backed by OpenWeatherMap
    pub fn new(config: &Config) -> Result<Self> {
        let client = OpenWeatherClient::new(config)?;
        let location = DeviceLocation::from_config(config);

        Ok(Self {
            controller: Arc::new(WeatherController::new(client, location)),
            tool_router: Self::tool_router(),
        })
    }

    /// Renders the dashboard after a query, prefixed by what happened
    async fn render(&self, outcome: QueryOutcome) -> CallToolResult {
        let state = self.controller.snapshot().await;
        let dashboard = format_dashboard(&state, Utc::now());

        let text = match outcome {
            QueryOutcome::Skipped => "Nothing to search for: the city name is empty.".to_string(),
            QueryOutcome::Superseded => {
                format!("A newer search replaced this one.\n\n{}", dashboard)
            }
            QueryOutcome::Updated | QueryOutcome::Failed { .. } => dashboard,
        };

        match outcome {
            QueryOutcome::Failed { .. } => CallToolResult::error(vec![Content::text(text)]),
            _ => CallToolResult::success(vec![Content::text(text)]),
        }
    }
}

#[tool_handler]
impl ServerHandler for WeatherWidget {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mcp-weather-widget".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "A weather lookup widget powered by OpenWeatherMap. Search by city name or \
                coordinates, get place suggestions while typing, and view current conditions \
                with a midday-sampled daily forecast."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl WeatherWidget {
    /// Searches current weather and forecast by city name
    #[tool(description = "Get current weather and the daily forecast for a city by name (e.g., 'London' or 'Paris,FR'). An empty name does nothing.")]
    async fn search_weather(
        &self,
        Parameters(request): Parameters<SearchWeatherRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Searching weather for city: {}", request.city);

        let outcome = self.controller.search(&request.city).await;
        Ok(self.render(outcome).await)
    }

    /// Searches current weather and forecast by coordinates
    #[tool(description = "Get current weather and the daily forecast for a latitude/longitude pair (e.g., latitude: 52.52, longitude: 13.41 for Berlin).")]
    async fn weather_at_coordinates(
        &self,
        Parameters(request): Parameters<CoordinatesRequest>,
    ) -> Result<CallToolResult, McpError> {
        if !(-90.0..=90.0).contains(&request.latitude)
            || !(-180.0..=180.0).contains(&request.longitude)
        {
            return Err(McpError::invalid_params(
                "Latitude must be within ±90 and longitude within ±180.",
                None,
            ));
        }
        tracing::info!(
            "Searching weather for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        let outcome = self
            .controller
            .search_coordinates(request.latitude, request.longitude)
            .await;
        Ok(self.render(outcome).await)
    }

    /// Updates the search text and lists matching places
    #[tool(description = "Type into the city search box: returns up to 5 matching places. Pick one with select_suggestion. A blank query clears the list.")]
    async fn suggest_places(
        &self,
        Parameters(request): Parameters<SuggestPlacesRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.controller.type_input(&request.query).await;

        let state = self.controller.snapshot().await;
        let suggestions = state.visible_suggestions();
        let text = if suggestions.is_empty() {
            "No suggestions.".to_string()
        } else {
            format_suggestions(suggestions)
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Loads weather for one of the listed suggestions
    #[tool(description = "Get weather for a place from the last suggest_places list, by its zero-based index.")]
    async fn select_suggestion(
        &self,
        Parameters(request): Parameters<SelectSuggestionRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self.controller.select_suggestion(request.index).await {
            Some(outcome) => Ok(self.render(outcome).await),
            None => Err(McpError::invalid_params(
                format!("No suggestion at index {}. Call suggest_places first.", request.index),
                None,
            )),
        }
    }

    /// Loads weather for the device's own position
    #[tool(description = "Get weather for this device's current location.")]
    async fn use_current_location(&self) -> Result<CallToolResult, McpError> {
        match self.controller.use_current_location().await {
            Ok(outcome) => Ok(self.render(outcome).await),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Current location unavailable: {}",
                e
            ))])),
        }
    }

    /// Shows what the widget currently displays
    #[tool(description = "Show the current weather dashboard, notices and open suggestions.")]
    async fn show_dashboard(&self) -> Result<CallToolResult, McpError> {
        let state = self.controller.snapshot().await;
        Ok(CallToolResult::success(vec![Content::text(format_dashboard(
            &state,
            Utc::now(),
        ))]))
    }
}
