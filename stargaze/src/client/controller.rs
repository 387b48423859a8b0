use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;

use super::gateway::GatewayApi;
use super::notify::{Notifier, TracingNotifier};
use crate::models::{DateRange, ExplanationRecord, ImageQuery, ImageRecord};
use crate::view::Intent;

pub const FETCH_FAILED_BANNER: &str = "Failed to fetch NASA images";
pub const EXPLAIN_FAILED_ALERT: &str = "Failed to generate AI explanation. Please try again.";

/// Explanation state of one card, keyed by the record's date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExplanationState {
    #[default]
    Absent,
    Pending,
    Ready(ExplanationRecord),
    Failed,
}

impl ExplanationState {
    /// Whether an explain intent for this card should reach the gateway.
    pub fn accepts_request(&self) -> bool {
        matches!(self, Self::Absent | Self::Failed)
    }
}

/// Gallery-level loading state. `Failed` is the persistent banner; it stays
/// until the next fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed { message: String },
}

/// Everything a render needs, copied out of the controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GallerySnapshot {
    pub images: Vec<ImageRecord>,
    pub explanations: HashMap<NaiveDate, ExplanationState>,
    pub load: LoadState,
}

impl GallerySnapshot {
    pub fn explanation(&self, date: NaiveDate) -> &ExplanationState {
        const ABSENT: &ExplanationState = &ExplanationState::Absent;
        self.explanations.get(&date).unwrap_or(ABSENT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FetchRequest {
    query: ImageQuery,
    newest_first: bool,
}

#[derive(Default)]
struct GalleryState {
    images: Vec<ImageRecord>,
    explanations: HashMap<NaiveDate, ExplanationState>,
    load: LoadState,
    last_request: Option<FetchRequest>,
}

/// Owns the displayed records and per-card explanation state.
///
/// Only the controller mutates its maps. The lock is never held across a
/// gateway call, so explanations for different dates run concurrently; the
/// per-date check-and-set before each call is the only guard.
#[derive(Clone)]
pub struct GalleryController {
    gateway: Arc<dyn GatewayApi>,
    notifier: Arc<dyn Notifier>,
    state: Arc<Mutex<GalleryState>>,
}

impl GalleryController {
    pub fn new(gateway: Arc<dyn GatewayApi>) -> Self {
        Self::with_notifier(gateway, Arc::new(TracingNotifier))
    }

    pub fn with_notifier(gateway: Arc<dyn GatewayApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            notifier,
            state: Arc::new(Mutex::new(GalleryState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, GalleryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> GallerySnapshot {
        let state = self.lock();
        GallerySnapshot {
            images: state.images.clone(),
            explanations: state.explanations.clone(),
            load: state.load.clone(),
        }
    }

    pub fn images(&self) -> Vec<ImageRecord> {
        self.lock().images.clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.lock().load.clone()
    }

    pub fn explanation_state(&self, date: NaiveDate) -> ExplanationState {
        self.lock()
            .explanations
            .get(&date)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn fetch_today(&self) -> LoadState {
        self.fetch(FetchRequest {
            query: ImageQuery::Today,
            newest_first: false,
        })
        .await
    }

    pub async fn fetch_date(&self, date: NaiveDate) -> LoadState {
        self.fetch(FetchRequest {
            query: ImageQuery::Date(date),
            newest_first: false,
        })
        .await
    }

    /// The last seven days ending on the local calendar date.
    pub async fn fetch_recent(&self) -> LoadState {
        self.fetch_recent_ending(chrono::Local::now().date_naive())
            .await
    }

    /// Seven days ending on `today` inclusive, displayed newest first.
    pub async fn fetch_recent_ending(&self, today: NaiveDate) -> LoadState {
        self.fetch(FetchRequest {
            query: ImageQuery::Range(DateRange::recent(today)),
            newest_first: true,
        })
        .await
    }

    /// Repeat the last fetch, falling back to the recent range when nothing
    /// has been fetched yet.
    pub async fn retry(&self) -> LoadState {
        let last = self.lock().last_request;
        match last {
            Some(request) => self.fetch(request).await,
            None => self.fetch_recent().await,
        }
    }

    /// Replaces the displayed records as a unit. Explanations are kept across
    /// fetches; a failure leaves the previous records in place.
    async fn fetch(&self, request: FetchRequest) -> LoadState {
        {
            let mut state = self.lock();
            state.load = LoadState::Loading;
            state.last_request = Some(request);
        }

        let result = self.gateway.fetch_images(request.query).await;

        let mut state = self.lock();
        match result {
            Ok(mut images) => {
                if request.newest_first {
                    images.reverse();
                }
                tracing::debug!(query = ?request.query, images = images.len(), "Gallery loaded");
                state.images = images;
                state.load = LoadState::Loaded;
            }
            Err(e) => {
                tracing::error!(query = ?request.query, error = %e, "Gallery fetch failed");
                state.load = LoadState::Failed {
                    message: FETCH_FAILED_BANNER.to_string(),
                };
            }
        }
        state.load.clone()
    }

    /// Apply a user action from the presentation layer. An explain intent
    /// for a date that is not displayed is ignored.
    pub async fn dispatch(&self, intent: Intent) {
        match intent {
            Intent::Today => {
                self.fetch_today().await;
            }
            Intent::Recent => {
                self.fetch_recent().await;
            }
            Intent::Retry => {
                self.retry().await;
            }
            Intent::Explain(date) => {
                let image = self.lock().images.iter().find(|i| i.date == date).cloned();
                match image {
                    Some(image) => {
                        self.explain(&image).await;
                    }
                    None => tracing::debug!(%date, "Explain intent for unknown card"),
                }
            }
        }
    }

    /// Request an explanation for `image`. A no-op returning the current
    /// state while that date is `Pending` or `Ready`.
    pub async fn explain(&self, image: &ImageRecord) -> ExplanationState {
        let key = image.key();
        {
            let mut state = self.lock();
            let entry = state.explanations.entry(key).or_default();
            if !entry.accepts_request() {
                tracing::debug!(date = %key, "Explanation already requested");
                return entry.clone();
            }
            *entry = ExplanationState::Pending;
        }

        let result = self.gateway.explain(image).await;

        let next = match result {
            Ok(record) => ExplanationState::Ready(record),
            Err(e) => {
                tracing::error!(date = %key, error = %e, "Explanation failed");
                ExplanationState::Failed
            }
        };

        self.lock().explanations.insert(key, next.clone());

        if next == ExplanationState::Failed {
            self.notifier.alert(EXPLAIN_FAILED_ALERT);
        }
        next
    }
}
