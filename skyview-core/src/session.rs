//! The single UI state record and its submit gate.
//!
//! At most one lookup is in flight: while the state is [`UiState::Loading`]
//! every further submit is ignored.

use tracing::{debug, info};

use crate::{
    QueryError, QueryInput, WeatherSnapshot,
    background::{DEFAULT_KEY, known_keys, select_background_key},
    provider::WeatherSource,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Success(Box<WeatherSnapshot>),
    Error(String),
}

#[derive(Debug, Default)]
pub struct Session {
    input: String,
    state: UiState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, UiState::Loading)
    }

    /// The submit control is live only when idle-ish and the input is not blank.
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.input.trim().is_empty()
    }

    /// Move to `Loading` and hand out the query, or do nothing.
    pub fn begin_submit(&mut self) -> Option<QueryInput> {
        if !self.can_submit() {
            debug!(loading = self.is_loading(), "submit ignored");
            return None;
        }

        let query = QueryInput::new(&self.input).ok()?;
        self.state = UiState::Loading;
        Some(query)
    }

    /// Settle an in-flight lookup. Outside `Loading` this is a no-op.
    pub fn resolve(&mut self, outcome: Result<WeatherSnapshot, QueryError>) {
        if !self.is_loading() {
            debug!("resolve without a pending request ignored");
            return;
        }

        self.state = match outcome {
            Ok(snapshot) => UiState::Success(Box::new(snapshot)),
            Err(err) => {
                info!(error = %err, "weather lookup failed");
                UiState::Error(err.user_message())
            }
        };
    }

    /// Submit and wait for the answer. Returns whether a request was issued.
    pub async fn submit(&mut self, source: &dyn WeatherSource) -> bool {
        let Some(query) = self.begin_submit() else {
            return false;
        };

        let outcome = source.current(&query).await;
        self.resolve(outcome);
        true
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match &self.state {
            UiState::Success(snapshot) => Some(snapshot.as_ref()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            UiState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn background_key(&self) -> &'static str {
        match self.snapshot() {
            Some(snapshot) => select_background_key(snapshot.condition_text(), &known_keys()),
            None => DEFAULT_KEY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug)]
    struct CountingSource {
        calls: AtomicUsize,
        seen: Mutex<Vec<String>>,
        outcome: Result<WeatherSnapshot, QueryError>,
    }

    impl CountingSource {
        fn new(outcome: Result<WeatherSnapshot, QueryError>) -> Self {
            Self { calls: AtomicUsize::new(0), seen: Mutex::new(Vec::new()), outcome }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WeatherSource for CountingSource {
        async fn current(&self, query: &QueryInput) -> Result<WeatherSnapshot, QueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(query.as_str().to_string());
            self.outcome.clone()
        }
    }

    fn cloudy_snapshot() -> WeatherSnapshot {
        serde_json::from_value(json!({
            "location": { "name": "Oslo", "country": "Norway" },
            "current": { "temp_c": 3.0, "humidity": 70, "condition": { "text": "Partly cloudy" } }
        }))
        .expect("snapshot should parse")
    }

    #[test]
    fn starts_idle_and_cannot_submit_blank_input() {
        let mut session = Session::new();
        assert_eq!(session.state(), &UiState::Idle);
        assert!(!session.can_submit());

        session.set_input("   ");
        assert!(!session.can_submit());
        assert_eq!(session.begin_submit(), None);
        assert_eq!(session.state(), &UiState::Idle);
    }

    #[tokio::test]
    async fn blank_input_never_reaches_the_source() {
        let source = CountingSource::new(Ok(cloudy_snapshot()));
        let mut session = Session::new();
        session.set_input("\t ");

        assert!(!session.submit(&source).await);
        assert_eq!(source.calls(), 0);
        assert_eq!(session.state(), &UiState::Idle);
    }

    #[test]
    fn second_submit_while_loading_is_ignored() {
        let mut session = Session::new();
        session.set_input("Oslo");

        let first = session.begin_submit();
        assert_eq!(first.as_ref().map(QueryInput::as_str), Some("Oslo"));
        assert!(session.is_loading());
        assert!(!session.can_submit());

        assert_eq!(session.begin_submit(), None);
        assert!(session.is_loading());
    }

    #[tokio::test]
    async fn successful_submit_stores_snapshot_and_background() {
        let source = CountingSource::new(Ok(cloudy_snapshot()));
        let mut session = Session::new();
        session.set_input("  Oslo ");

        assert!(session.submit(&source).await);
        assert_eq!(source.calls(), 1);
        assert_eq!(source.seen.lock().unwrap().as_slice(), ["Oslo".to_string()]);
        assert_eq!(session.snapshot().and_then(WeatherSnapshot::location_name), Some("Oslo"));
        assert_eq!(session.background_key(), "Partly cloudy");
        assert!(session.can_submit());
    }

    #[tokio::test]
    async fn failed_submit_exposes_message_and_allows_retry() {
        let source = CountingSource::new(Err(QueryError::Upstream {
            status: 400,
            message: "No matching location found.".into(),
        }));
        let mut session = Session::new();
        session.set_input("Atlantis");

        assert!(session.submit(&source).await);
        assert_eq!(session.error(), Some("No matching location found."));
        assert_eq!(session.snapshot(), None);
        assert_eq!(session.background_key(), DEFAULT_KEY);

        assert!(session.can_submit());
        assert!(session.submit(&source).await);
        assert_eq!(source.calls(), 2);
    }

    #[test]
    fn error_replaces_previous_success() {
        let mut session = Session::new();
        session.set_input("Oslo");

        session.begin_submit();
        session.resolve(Ok(cloudy_snapshot()));
        assert!(session.snapshot().is_some());

        session.begin_submit();
        session.resolve(Err(QueryError::Transport("connection reset".into())));
        assert_eq!(session.snapshot(), None);
        assert_eq!(session.error(), Some("connection reset"));
    }

    #[test]
    fn resolve_outside_loading_is_ignored() {
        let mut session = Session::new();
        session.resolve(Ok(cloudy_snapshot()));
        assert_eq!(session.state(), &UiState::Idle);
    }
}
