//! # AI matching: latest search wins
//!
//! The matching page can fire several searches for different prompts before
//! the first one answers. [`SearchSlot`] hands out a [`Ticket`] per search;
//! only the holder of the newest ticket may write its response into the state.
//! Older responses finish inert and never touch `loading`, so the flag always
//! belongs to the search the user is looking at.
//!
//! Leaving the page calls [`AiSearch::cancel`], which retires every
//! outstanding ticket and resets `loading`.
//!
//! [`classify`] turns the state into what the page should render.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::backend::AiBackend;
use crate::models::{AiSearchRequest, AiSearchResult, Recommendation};
use crate::state::StateHandle;

#[derive(Clone, Debug, Default)]
pub struct SearchSlot {
    generation: Arc<AtomicU64>,
}

/// Proof of having started a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

impl SearchSlot {
    /// Start a new search, superseding every earlier ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Supersede every outstanding ticket without starting a search.
    pub fn retire(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AiSearchState {
    pub prompt: String,
    pub loading: bool,
    pub result: Option<AiSearchResult>,
    /// Index of the recommendation shown in the large card.
    pub current_index: usize,
    pub show_full_reasoning: bool,
}

impl AiSearchState {
    /// State for a page that is about to start its first search.
    pub fn pending() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn current(&self) -> Option<&Recommendation> {
        self.result
            .as_ref()
            .and_then(|r| r.recommendations.get(self.current_index))
    }
}

/// How a finished search was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Committed,
    Failed,
    /// A newer search or a cancel superseded this one.
    Stale,
}

/// Why the results are not an exact match.
#[derive(Clone, Debug, PartialEq)]
pub enum RelaxBanner {
    /// Nothing matched, the server fell back to general picks.
    Fallback,
    /// Some conditions were dropped; the label names which.
    Relaxed(String),
    Exact,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SearchView {
    Loading,
    NoResults,
    Results {
        low_confidence: bool,
        banner: Option<RelaxBanner>,
    },
}

/// Decide what the matching page shows.
pub fn classify(state: &AiSearchState, low_confidence_threshold: f64) -> SearchView {
    if state.loading {
        return SearchView::Loading;
    }
    let Some(result) = state.result.as_ref().filter(|r| !r.is_empty()) else {
        return SearchView::NoResults;
    };
    let low_confidence = result
        .confidence()
        .is_some_and(|c| c < low_confidence_threshold);
    SearchView::Results {
        low_confidence,
        banner: relax_banner(result),
    }
}

fn relax_banner(result: &AiSearchResult) -> Option<RelaxBanner> {
    let trace = result.search_trace.as_ref()?;
    if result.fallback == Some(true) || trace.fallback {
        Some(RelaxBanner::Fallback)
    } else if trace.final_level > 0 && !trace.final_label.is_empty() {
        Some(RelaxBanner::Relaxed(trace.final_label.clone()))
    } else {
        Some(RelaxBanner::Exact)
    }
}

/// AI search actions bound to one page's state.
#[derive(Clone, Debug)]
pub struct AiSearch<H, B> {
    state: H,
    backend: B,
    slot: SearchSlot,
    top_n: u32,
    guest_user_id: i64,
}

impl<H, B> AiSearch<H, B> {
    pub fn new(state: H, backend: B) -> Self {
        Self {
            state,
            backend,
            slot: SearchSlot::default(),
            top_n: 5,
            guest_user_id: 1,
        }
    }

    pub fn with_top_n(mut self, top_n: u32) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_guest_user_id(mut self, guest_user_id: i64) -> Self {
        self.guest_user_id = guest_user_id;
        self
    }
}

impl<H, B> AiSearch<H, B>
where
    H: StateHandle<AiSearchState>,
    B: AiBackend,
{
    /// Run a search for `prompt` on behalf of `user_id` (the guest id when signed out).
    pub async fn search(&self, prompt: &str, user_id: Option<i64>) -> SearchOutcome {
        let ticket = self.slot.begin();
        self.state.update(|s| {
            s.prompt = prompt.to_string();
            s.loading = true;
        });

        let request = AiSearchRequest {
            user_prompt: prompt.to_string(),
            user_id: user_id.unwrap_or(self.guest_user_id),
            top_n: self.top_n,
        };
        tracing::debug!(user_id = request.user_id, "AI search: {}", prompt);
        let response = self.backend.search(&request).await;

        if !self.slot.is_current(ticket) {
            tracing::debug!("Discarding superseded AI search for {:?}", prompt);
            return SearchOutcome::Stale;
        }

        match response {
            Ok(result) => {
                tracing::info!(
                    recommendations = result.recommendations.len(),
                    "AI search finished"
                );
                self.state.update(|s| {
                    s.result = Some(result);
                    s.current_index = 0;
                    s.show_full_reasoning = false;
                    s.loading = false;
                });
                SearchOutcome::Committed
            }
            Err(e) => {
                tracing::error!("AI search failed: {}", e);
                self.state.update(|s| {
                    s.result = None;
                    s.loading = false;
                });
                SearchOutcome::Failed
            }
        }
    }

    /// Abandon outstanding searches, e.g. when the page goes away.
    pub fn cancel(&self) {
        self.slot.retire();
        self.state.update(|s| s.loading = false);
    }

    /// Show recommendation `index` in the large card. Out of range is ignored.
    pub fn select(&self, index: usize) {
        self.state.update(|s| {
            let len = s.result.as_ref().map_or(0, |r| r.recommendations.len());
            if index < len {
                s.current_index = index;
                s.show_full_reasoning = false;
            }
        });
    }

    pub fn toggle_reasoning(&self) {
        self.state.update(|s| s.show_full_reasoning = !s.show_full_reasoning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;
    use crate::models::{ParsedQuery, SearchTrace};
    use crate::state::SharedState;
    use crate::testing::{FakeBackend, Recording};

    fn result_with(titles: &[&str]) -> AiSearchResult {
        AiSearchResult {
            recommendations: titles
                .iter()
                .enumerate()
                .map(|(i, t)| Recommendation {
                    meeting_id: i as i64 + 1,
                    title: t.to_string(),
                    ..Recommendation::default()
                })
                .collect(),
            ..AiSearchResult::default()
        }
    }

    #[test]
    fn test_slot_only_newest_ticket_is_current() {
        let slot = SearchSlot::default();
        let first = slot.begin();
        let second = slot.begin();
        assert!(!slot.is_current(first));
        assert!(slot.is_current(second));
        slot.retire();
        assert!(!slot.is_current(second));
    }

    #[tokio::test]
    async fn test_search_commits_and_uses_guest_id() {
        let backend = FakeBackend::default().with_ai(Ok(result_with(&["북한산", "관악산"])));
        let state = Recording::new(AiSearchState::default());
        let search = AiSearch::new(state.clone(), backend.clone()).with_guest_user_id(1);

        assert_eq!(search.search("주말 등산", None).await, SearchOutcome::Committed);
        let snapshot = state.snapshot();
        assert_eq!(snapshot.current().map(|r| r.title.as_str()), Some("북한산"));
        assert!(!snapshot.loading);
        assert_eq!(state.loading_history(|s| s.loading), vec![true, false]);

        let request = &backend.ai_requests()[0];
        assert_eq!(request.user_id, 1);
        assert_eq!(request.top_n, 5);
        assert_eq!(request.user_prompt, "주말 등산");
    }

    #[tokio::test]
    async fn test_failure_clears_result() {
        let backend = FakeBackend::default()
            .with_ai(Ok(result_with(&["a"])))
            .with_ai(Err(BackendError::Transport("offline".to_string())));
        let search = AiSearch::new(SharedState::new(AiSearchState::default()), backend);
        search.search("첫 검색", Some(4)).await;
        assert_eq!(search.search("두 번째", Some(4)).await, SearchOutcome::Failed);

        let snapshot = search.state.snapshot();
        assert!(snapshot.result.is_none());
        assert!(!snapshot.loading);
        assert_eq!(classify(&snapshot, 0.6), SearchView::NoResults);
    }

    #[tokio::test]
    async fn test_latest_search_wins() {
        let backend = FakeBackend::default();
        let release_first = backend.gated_ai(Ok(result_with(&["오래된 결과"])));
        let release_second = backend.gated_ai(Ok(result_with(&["새 결과"])));
        let state = Recording::new(AiSearchState::default());
        let search = AiSearch::new(state.clone(), backend);

        let first = search.search("러닝", None);
        let second = search.search("카페", None);
        let drive = async {
            tokio::task::yield_now().await;
            release_second.send(()).unwrap();
            tokio::task::yield_now().await;
            release_first.send(()).unwrap();
        };
        let (first, second, ()) = tokio::join!(first, second, drive);

        assert_eq!(second, SearchOutcome::Committed);
        assert_eq!(first, SearchOutcome::Stale);
        let snapshot = state.snapshot();
        assert_eq!(snapshot.prompt, "카페");
        assert_eq!(snapshot.current().unwrap().title, "새 결과");
        assert!(!snapshot.loading);
        // The stale completion wrote nothing after the committed one.
        assert_eq!(state.history().last(), Some(&snapshot));
        assert_eq!(state.history().iter().filter(|s| s.result.is_some()).count(), 1);
    }

    #[tokio::test]
    async fn test_cancel_resets_loading_and_drops_late_response() {
        let backend = FakeBackend::default();
        let release = backend.gated_ai(Ok(result_with(&["늦은 결과"])));
        let state = SharedState::new(AiSearchState::pending());
        let search = AiSearch::new(state.clone(), backend);

        let pending = search.search("요가", None);
        let drive = async {
            tokio::task::yield_now().await;
            search.cancel();
            release.send(()).unwrap();
        };
        let (outcome, ()) = tokio::join!(pending, drive);

        assert_eq!(outcome, SearchOutcome::Stale);
        let snapshot = state.snapshot();
        assert!(!snapshot.loading);
        assert!(snapshot.result.is_none());
    }

    #[tokio::test]
    async fn test_select_and_toggle() {
        let backend = FakeBackend::default().with_ai(Ok(result_with(&["a", "b", "c"])));
        let search = AiSearch::new(SharedState::new(AiSearchState::default()), backend);
        search.search("q", None).await;

        search.toggle_reasoning();
        assert!(search.state.snapshot().show_full_reasoning);
        search.select(2);
        let snapshot = search.state.snapshot();
        assert_eq!(snapshot.current_index, 2);
        assert!(!snapshot.show_full_reasoning);

        search.select(9);
        assert_eq!(search.state.snapshot().current_index, 2);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(&AiSearchState::pending(), 0.6), SearchView::Loading);
        assert_eq!(classify(&AiSearchState::default(), 0.6), SearchView::NoResults);

        let empty = AiSearchState {
            result: Some(result_with(&[])),
            ..AiSearchState::default()
        };
        assert_eq!(classify(&empty, 0.6), SearchView::NoResults);

        let mut result = result_with(&["a"]);
        result.parsed_query = Some(ParsedQuery {
            confidence: Some(0.4),
            ..ParsedQuery::default()
        });
        let state = AiSearchState {
            result: Some(result.clone()),
            ..AiSearchState::default()
        };
        assert_eq!(
            classify(&state, 0.6),
            SearchView::Results {
                low_confidence: true,
                banner: None
            }
        );

        // Missing confidence is not low confidence
        result.parsed_query = None;
        result.search_trace = Some(SearchTrace {
            final_level: 2,
            final_label: "지역 조건 완화".to_string(),
            ..SearchTrace::default()
        });
        let state = AiSearchState {
            result: Some(result.clone()),
            ..AiSearchState::default()
        };
        assert_eq!(
            classify(&state, 0.6),
            SearchView::Results {
                low_confidence: false,
                banner: Some(RelaxBanner::Relaxed("지역 조건 완화".to_string()))
            }
        );

        result.fallback = Some(true);
        assert_eq!(relax_banner(&result), Some(RelaxBanner::Fallback));

        result.fallback = None;
        result.search_trace = Some(SearchTrace::default());
        assert_eq!(relax_banner(&result), Some(RelaxBanner::Exact));
    }
}
