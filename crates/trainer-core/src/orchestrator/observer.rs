//! Hooks the presentation layer implements.

/// Receives everything the orchestrator wants shown to the user.
///
/// The orchestrator never renders anything itself; it only calls these.
pub trait Observer {
    fn on_title_changed(&mut self, text: &str);

    /// Features of the newly connected game as `(key, label)` pairs in display order.
    fn on_features_available(&mut self, features: &[(String, String)]);

    fn on_features_cleared(&mut self);

    fn on_log(&mut self, message: &str);
}

/// One recorded observer call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserverEvent {
    TitleChanged(String),
    FeaturesAvailable(Vec<(String, String)>),
    FeaturesCleared,
    Log(String),
}

/// Observer that stores every call, for tests and headless use.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Vec<ObserverEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ObserverEvent] {
        &self.events
    }

    pub fn logs(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ObserverEvent::Log(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_title(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            ObserverEvent::TitleChanged(title) => Some(title.as_str()),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Observer for RecordingObserver {
    fn on_title_changed(&mut self, text: &str) {
        self.events.push(ObserverEvent::TitleChanged(text.to_string()));
    }

    fn on_features_available(&mut self, features: &[(String, String)]) {
        self.events
            .push(ObserverEvent::FeaturesAvailable(features.to_vec()));
    }

    fn on_features_cleared(&mut self) {
        self.events.push(ObserverEvent::FeaturesCleared);
    }

    fn on_log(&mut self, message: &str) {
        self.events.push(ObserverEvent::Log(message.to_string()));
    }
}
