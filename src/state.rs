//! Display state of the widget and the transitions that change it.

use crate::models::{PlaceCandidate, WeatherReport};
use crate::theme::{theme_for, Gradient};

/// Everything the dashboard shows.
///
/// Current conditions and forecast live in one `WeatherReport` so they are
/// only ever replaced or cleared together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayState {
    pub input: String,
    pub report: Option<WeatherReport>,
    pub suggestions: Vec<PlaceCandidate>,
    pub show_suggestions: bool,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    InputChanged(String),
    QuerySucceeded {
        report: WeatherReport,
        /// Place name to write back into the input (coordinate lookups)
        resolved_name: Option<String>,
    },
    QueryFailed {
        notice: String,
    },
    SuggestionsUpdated(Vec<PlaceCandidate>),
    SuggestionsCleared,
}

impl DisplayState {
    pub fn apply(&mut self, event: Event) {
        match event {
            Event::InputChanged(text) => self.input = text,
            Event::QuerySucceeded {
                report,
                resolved_name,
            } => {
                self.report = Some(report);
                self.notice = None;
                self.suggestions.clear();
                self.show_suggestions = false;
                if let Some(name) = resolved_name {
                    self.input = name;
                }
            }
            Event::QueryFailed { notice } => {
                self.report = None;
                self.notice = Some(notice);
            }
            Event::SuggestionsUpdated(suggestions) => {
                self.suggestions = suggestions;
                self.show_suggestions = true;
            }
            Event::SuggestionsCleared => {
                self.suggestions.clear();
                self.show_suggestions = false;
            }
        }
    }

    /// Suggestions currently offered to the user
    pub fn visible_suggestions(&self) -> &[PlaceCandidate] {
        if self.show_suggestions {
            self.suggestions.as_slice()
        } else {
            &[]
        }
    }

    /// Background for the displayed conditions, none when nothing is shown
    pub fn background(&self) -> Option<Gradient> {
        self.report
            .as_ref()
            .map(|report| theme_for(&report.current.condition))
    }
}
