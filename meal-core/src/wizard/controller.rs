//! The step-wizard state machine.
//!
//! ```text
//!  Welcome(0) ──advance──▶ Budget(1) ──advance──▶ Location(2) ──advance──▶ Confirm(3)
//!                            ▲   │                   ▲   │                    │
//!                            └back┘                  └back┘              advance
//!                                                                             ▼
//!  Welcome(0) ◀──restart── Result(4): Loading ──fetch done──▶ Ready | Failed
//! ```
//!
//! `back` moves one step down from Location, Confirm or Result and does
//! nothing on Welcome and Budget. Advancing from Confirm spawns the fetch on
//! the current Tokio runtime; the result comes back through a channel the
//! controller owns and is applied by [`WizardController::next_completion`]
//! or [`WizardController::poll_completion`].

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::state::{ResultPhase, WizardDefaults, WizardState};
use crate::error::WizardError;
use crate::models::{GeoPoint, Recommendation, WizardStep};
use crate::source::{RecommendationRequest, RecommendationSource, SourceError};
use crate::validation::{ValidationPolicy, validate_budget_step, validate_location_step};

/// Delay of the simulated recommendation fetch.
pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, PartialEq)]
pub struct WizardSettings {
    pub fetch_delay: Duration,
    pub validation: ValidationPolicy,
    pub defaults: WizardDefaults,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            fetch_delay: DEFAULT_FETCH_DELAY,
            validation: ValidationPolicy::default(),
            defaults: WizardDefaults::default(),
        }
    }
}

/// What a controller operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: WizardStep, to: WizardStep },
    /// Entered `Result.Loading`; the fetch is outstanding.
    Submitted { generation: u64 },
    /// The fetch for `generation` was applied.
    Completed { generation: u64 },
    Restarted,
    /// The result screen now shows the menu for `day`.
    DaySelected { day: u32 },
    /// The operation is not available on the current step.
    Ignored,
}

/// Outcome of one spawned fetch, tagged with the submission it belongs to.
#[derive(Debug)]
pub struct FetchCompletion {
    generation: u64,
    outcome: Result<Recommendation, SourceError>,
}

struct PendingFetch {
    generation: u64,
    task: JoinHandle<()>,
}

/// Owns one wizard session.
///
/// All mutation goes through the transition methods and field setters; the
/// state itself is only handed out by shared reference.
pub struct WizardController {
    state: WizardState,
    settings: WizardSettings,
    source: Arc<dyn RecommendationSource>,
    generation: u64,
    pending: Option<PendingFetch>,
    completion_tx: mpsc::UnboundedSender<FetchCompletion>,
    completion_rx: mpsc::UnboundedReceiver<FetchCompletion>,
}

impl WizardController {
    pub fn new(source: Arc<dyn RecommendationSource>, settings: WizardSettings) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            state: WizardState::new(&settings.defaults),
            settings,
            source,
            generation: 0,
            pending: None,
            completion_tx,
            completion_rx,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> WizardStep {
        self.state.step
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting
    }

    pub fn result_phase(&self) -> Option<ResultPhase> {
        self.state.result_phase()
    }

    pub fn settings(&self) -> &WizardSettings {
        &self.settings
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    // ── transitions ──────────────────────────────────────────────────────

    /// Moves one step forward.
    ///
    /// From Confirm this enters `Result.Loading` at once and schedules the
    /// fetch; on Result it does nothing.
    ///
    /// # Errors
    /// * [`WizardError::InvalidInput`] when the strict policy rejects the
    ///   fields of the step being left. The state is unchanged.
    /// * [`WizardError::FetchFailed`] when advancing from Confirm outside a
    ///   Tokio runtime. The state is unchanged.
    pub fn advance(&mut self) -> Result<Transition, WizardError> {
        let from = self.state.step;
        match from {
            WizardStep::Welcome | WizardStep::Budget | WizardStep::Location => {
                self.check_leaving(from)?;
                let Some(to) = from.next() else {
                    return Ok(Transition::Ignored);
                };
                self.state.step = to;
                debug!(%from, %to, "wizard advanced");
                Ok(Transition::Moved { from, to })
            }
            WizardStep::Confirm => self.submit(),
            WizardStep::Result => {
                debug!("advance ignored on result step");
                Ok(Transition::Ignored)
            }
        }
    }

    /// Moves one step back. Does nothing on Welcome and Budget.
    ///
    /// Leaving the result step while the fetch is outstanding cancels it.
    pub fn back(&mut self) -> Transition {
        let from = self.state.step;
        if from.index() <= WizardStep::Budget.index() {
            debug!(%from, "back ignored");
            return Transition::Ignored;
        }
        let Some(to) = from.previous() else {
            return Transition::Ignored;
        };
        if from == WizardStep::Result {
            self.cancel_pending();
            self.state.is_submitting = false;
        }
        self.state.step = to;
        debug!(%from, %to, "wizard went back");
        Transition::Moved { from, to }
    }

    /// Starts over from Welcome with every field reset. Only available on
    /// the result step; an outstanding fetch is cancelled first.
    pub fn restart(&mut self) -> Transition {
        if self.state.step != WizardStep::Result {
            debug!(step = %self.state.step, "restart ignored");
            return Transition::Ignored;
        }
        self.cancel_pending();
        self.state = WizardState::new(&self.settings.defaults);
        info!("wizard restarted");
        Transition::Restarted
    }

    // ── field setters ────────────────────────────────────────────────────

    pub fn set_budget(&mut self, budget: impl Into<String>) {
        self.state.budget = budget.into();
    }

    pub fn set_price_estimate(&mut self, price_estimate: impl Into<String>) {
        self.state.price_estimate = price_estimate.into();
    }

    pub fn set_province(&mut self, province: impl Into<String>) {
        self.state.province = Some(province.into());
    }

    pub fn set_district(&mut self, district: impl Into<String>) {
        self.state.district = Some(district.into());
    }

    pub fn set_sub_district(&mut self, sub_district: impl Into<String>) {
        self.state.sub_district = Some(sub_district.into());
    }

    pub fn set_map_center(&mut self, center: GeoPoint) {
        self.state.map_center = center;
    }

    /// Radius in meters, as typed.
    pub fn set_radius(&mut self, radius: impl Into<String>) {
        self.state.radius = radius.into();
    }

    /// A click on the map recenters it on the clicked point.
    pub fn click_map(&mut self, lat: f64, lng: f64) {
        debug!(lat, lng, "map clicked");
        self.set_map_center(GeoPoint::new(lat, lng));
    }

    /// Switches the daily menu shown on the result screen. Ignored unless
    /// the result is ready.
    ///
    /// # Errors
    /// [`WizardError::InvalidInput`] when the recommendation has no menu for
    /// `day`. The selection is unchanged.
    pub fn select_day(&mut self, day: u32) -> Result<Transition, WizardError> {
        if self.state.result_phase() != Some(ResultPhase::Ready) {
            debug!(day, "day selection ignored");
            return Ok(Transition::Ignored);
        }
        if !self.state.menu_days().contains(&day) {
            return Err(WizardError::InvalidInput {
                field: "day",
                reason: format!("no menu for day {day}"),
            });
        }
        self.state.selected_day = Some(day);
        debug!(day, "daily menu selected");
        Ok(Transition::DaySelected { day })
    }

    // ── fetch completion ─────────────────────────────────────────────────

    /// Applies a fetch outcome.
    ///
    /// # Errors
    /// * [`WizardError::NavigationRace`] when the completion belongs to a
    ///   cancelled submission. The state is unchanged.
    /// * [`WizardError::FetchFailed`] when the source reported an error. The
    ///   wizard stays on the result step in [`ResultPhase::Failed`].
    pub fn apply_completion(
        &mut self,
        completion: FetchCompletion,
    ) -> Result<Transition, WizardError> {
        let FetchCompletion {
            generation,
            outcome,
        } = completion;

        if generation != self.generation || !self.state.is_submitting {
            warn!(
                generation,
                current = self.generation,
                "discarding result of cancelled submission"
            );
            return Err(WizardError::NavigationRace { generation });
        }
        self.pending = None;

        match outcome {
            Ok(recommendation) => {
                info!(
                    generation,
                    ingredients = recommendation.ingredients.len(),
                    recipes = recommendation.recipes.len(),
                    "recommendation ready"
                );
                self.state.complete_submission(recommendation);
                Ok(Transition::Completed { generation })
            }
            Err(source_error) => {
                error!(generation, error = %source_error, "recommendation fetch failed");
                self.state.fail_submission(source_error.to_string());
                Err(WizardError::FetchFailed(source_error))
            }
        }
    }

    /// Applies a finished fetch without waiting. Stale completions are
    /// dropped. Returns `None` when nothing current has arrived.
    pub fn poll_completion(&mut self) -> Option<Result<Transition, WizardError>> {
        while let Ok(completion) = self.completion_rx.try_recv() {
            match self.apply_completion(completion) {
                Err(WizardError::NavigationRace { .. }) => continue,
                other => return Some(other),
            }
        }
        None
    }

    /// Waits for the outstanding fetch and applies it.
    ///
    /// Returns `Ok(Transition::Ignored)` at once when nothing is
    /// outstanding. Cancel safe: dropping the future leaves the fetch
    /// running and its result is picked up by the next call.
    pub async fn next_completion(&mut self) -> Result<Transition, WizardError> {
        loop {
            if let Some(result) = self.poll_completion() {
                return result;
            }
            let Some(pending) = self.pending.as_mut() else {
                return Ok(Transition::Ignored);
            };
            let generation = pending.generation;
            let joined = (&mut pending.task).await;
            self.pending = None;

            if let Err(join_error) = joined {
                let source_error =
                    SourceError::Unavailable(format!("fetch task ended abnormally: {join_error}"));
                error!(generation, error = %source_error, "recommendation fetch aborted");
                self.state.fail_submission(source_error.to_string());
                return Err(WizardError::FetchFailed(source_error));
            }
            // The task sends before it finishes, so the outcome is queued.
        }
    }

    // ── internals ────────────────────────────────────────────────────────

    fn check_leaving(&self, step: WizardStep) -> Result<(), WizardError> {
        if self.settings.validation == ValidationPolicy::Permissive {
            return Ok(());
        }
        match step {
            WizardStep::Budget => validate_budget_step(&self.state),
            WizardStep::Location => validate_location_step(&self.state),
            _ => Ok(()),
        }
    }

    fn submit(&mut self) -> Result<Transition, WizardError> {
        let runtime = Handle::try_current()
            .map_err(|e| SourceError::Unavailable(format!("no async runtime: {e}")))?;

        self.cancel_pending();
        self.generation += 1;
        let generation = self.generation;

        self.state.begin_submission();
        let request = RecommendationRequest::from(&self.state);
        let source = Arc::clone(&self.source);
        let delay = self.settings.fetch_delay;
        let completion_tx = self.completion_tx.clone();

        info!(generation, source = source.name(), ?delay, "submitting recommendation request");
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let outcome = source.recommend(&request).await;
            // The receiver lives as long as the controller; a failed send
            // means the session is gone.
            let _ = completion_tx.send(FetchCompletion {
                generation,
                outcome,
            });
        });
        self.pending = Some(PendingFetch { generation, task });

        Ok(Transition::Submitted { generation })
    }

    /// Aborts the outstanding fetch, if any, and retires its generation so a
    /// result already queued is discarded.
    fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.task.abort();
                self.generation += 1;
                warn!(generation = pending.generation, "cancelled outstanding recommendation fetch");
                true
            }
            None => false,
        }
    }
}

impl Drop for WizardController {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::source::MockRecommendationSource;

    // ── test sources ─────────────────────────────────────────────────────

    /// Counts how often it is asked, then answers like the mock.
    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RecommendationSource for CountingSource {
        fn name(&self) -> &'static str {
            "counting"
        }
        async fn recommend(
            &self,
            _request: &RecommendationRequest,
        ) -> Result<Recommendation, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(MockRecommendationSource::payload())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl RecommendationSource for FailingSource {
        fn name(&self) -> &'static str {
            "failing"
        }
        async fn recommend(
            &self,
            _request: &RecommendationRequest,
        ) -> Result<Recommendation, SourceError> {
            Err(SourceError::Unavailable("backend down".to_string()))
        }
    }

    fn controller() -> WizardController {
        WizardController::new(Arc::new(MockRecommendationSource), WizardSettings::default())
    }

    fn strict_controller() -> WizardController {
        WizardController::new(
            Arc::new(MockRecommendationSource),
            WizardSettings {
                validation: ValidationPolicy::Strict,
                ..WizardSettings::default()
            },
        )
    }

    /// Drives a permissive controller to the given step with no side effects.
    fn at_step(controller: &mut WizardController, step: WizardStep) {
        while controller.step() != step {
            controller.advance().unwrap();
        }
    }

    // ── advance ──────────────────────────────────────────────────────────

    #[test]
    fn advance_from_early_steps_increments_and_keeps_fields() {
        let mut wizard = controller();
        wizard.set_budget("50000");
        wizard.set_province("DKI Jakarta");

        for expected in [WizardStep::Budget, WizardStep::Location, WizardStep::Confirm] {
            let before = wizard.state().clone();

            let transition = wizard.advance().unwrap();

            assert_eq!(
                transition,
                Transition::Moved {
                    from: before.step,
                    to: expected
                }
            );
            let after = WizardState {
                step: before.step,
                ..wizard.state().clone()
            };
            assert_eq!(after, before);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn advance_from_confirm_enters_loading_before_delay() {
        let mut wizard = controller();
        at_step(&mut wizard, WizardStep::Confirm);

        let transition = wizard.advance().unwrap();

        assert_eq!(transition, Transition::Submitted { generation: 1 });
        assert_eq!(wizard.step(), WizardStep::Result);
        assert!(wizard.is_submitting());
        assert_eq!(wizard.result_phase(), Some(ResultPhase::Loading));
        assert!(wizard.state().ingredients.is_empty());
        assert!(wizard.state().recipes.is_empty());

        tokio::task::yield_now().await;
        tokio::time::advance(DEFAULT_FETCH_DELAY - Duration::from_millis(1)).await;
        assert!(wizard.poll_completion().is_none());
        assert!(wizard.is_submitting());
    }

    #[tokio::test(start_paused = true)]
    async fn completion_replaces_both_lists_at_once() {
        let mut wizard = controller();
        at_step(&mut wizard, WizardStep::Confirm);
        wizard.advance().unwrap();

        let transition = wizard.next_completion().await.unwrap();

        assert_eq!(transition, Transition::Completed { generation: 1 });
        assert!(!wizard.is_submitting());
        assert_eq!(wizard.result_phase(), Some(ResultPhase::Ready));
        assert_eq!(
            wizard.state().recommendation(),
            MockRecommendationSource::payload()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn completion_arrives_after_configured_delay() {
        let mut wizard = WizardController::new(
            Arc::new(MockRecommendationSource),
            WizardSettings {
                fetch_delay: Duration::from_millis(250),
                ..WizardSettings::default()
            },
        );
        at_step(&mut wizard, WizardStep::Confirm);
        let started = tokio::time::Instant::now();
        wizard.advance().unwrap();

        wizard.next_completion().await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn advance_on_result_is_ignored() {
        let mut wizard = controller();
        at_step(&mut wizard, WizardStep::Confirm);
        wizard.advance().unwrap();
        wizard.next_completion().await.unwrap();

        assert_eq!(wizard.advance().unwrap(), Transition::Ignored);
        assert_eq!(wizard.step(), WizardStep::Result);
    }

    #[test]
    fn submit_without_runtime_leaves_state_untouched() {
        let mut wizard = controller();
        at_step(&mut wizard, WizardStep::Confirm);

        let err = wizard.advance().unwrap_err();

        assert!(matches!(
            err,
            WizardError::FetchFailed(SourceError::Unavailable(_))
        ));
        assert_eq!(wizard.step(), WizardStep::Confirm);
        assert!(!wizard.is_submitting());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_fetch_lands_in_failed_phase() {
        let mut wizard =
            WizardController::new(Arc::new(FailingSource), WizardSettings::default());
        at_step(&mut wizard, WizardStep::Confirm);
        wizard.advance().unwrap();

        let err = wizard.next_completion().await.unwrap_err();

        assert_eq!(
            err,
            WizardError::FetchFailed(SourceError::Unavailable("backend down".to_string()))
        );
        assert_eq!(wizard.result_phase(), Some(ResultPhase::Failed));
        assert!(!wizard.is_submitting());
        assert!(wizard.state().ingredients.is_empty());
        assert_eq!(
            wizard.state().last_error.as_deref(),
            Some("Source unavailable: backend down")
        );
    }

    #[tokio::test]
    async fn next_completion_without_pending_fetch_is_ignored() {
        let mut wizard = controller();

        assert_eq!(wizard.next_completion().await.unwrap(), Transition::Ignored);
    }

    // ── back ─────────────────────────────────────────────────────────────

    #[test]
    fn back_is_a_no_op_on_welcome_and_budget() {
        let mut wizard = controller();
        assert_eq!(wizard.back(), Transition::Ignored);
        assert_eq!(wizard.step(), WizardStep::Welcome);

        wizard.advance().unwrap();
        assert_eq!(wizard.back(), Transition::Ignored);
        assert_eq!(wizard.step(), WizardStep::Budget);
    }

    #[test]
    fn back_decrements_from_location_and_confirm() {
        let mut wizard = controller();
        at_step(&mut wizard, WizardStep::Confirm);

        assert_eq!(
            wizard.back(),
            Transition::Moved {
                from: WizardStep::Confirm,
                to: WizardStep::Location
            }
        );
        assert_eq!(
            wizard.back(),
            Transition::Moved {
                from: WizardStep::Location,
                to: WizardStep::Budget
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn back_from_loading_cancels_the_fetch() {
        let source = Arc::new(CountingSource::default());
        let mut wizard = WizardController::new(source.clone(), WizardSettings::default());
        at_step(&mut wizard, WizardStep::Confirm);
        wizard.advance().unwrap();

        assert_eq!(
            wizard.back(),
            Transition::Moved {
                from: WizardStep::Result,
                to: WizardStep::Confirm
            }
        );
        assert!(!wizard.is_submitting());

        tokio::time::sleep(DEFAULT_FETCH_DELAY * 2).await;
        assert!(wizard.poll_completion().is_none());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert!(wizard.state().ingredients.is_empty());
    }

    // ── daily menu ───────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn select_day_switches_menu_when_ready() {
        let mut wizard = controller();
        at_step(&mut wizard, WizardStep::Confirm);
        wizard.advance().unwrap();
        wizard.next_completion().await.unwrap();
        assert_eq!(wizard.state().selected_day, Some(1));

        assert_eq!(wizard.select_day(2), Ok(Transition::DaySelected { day: 2 }));

        assert_eq!(wizard.state().selected_menu().map(|menu| menu.day), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn select_day_rejects_day_without_menu() {
        let mut wizard = controller();
        at_step(&mut wizard, WizardStep::Confirm);
        wizard.advance().unwrap();
        wizard.next_completion().await.unwrap();

        let err = wizard.select_day(7).unwrap_err();

        assert_eq!(
            err,
            WizardError::InvalidInput {
                field: "day",
                reason: "no menu for day 7".to_string(),
            }
        );
        assert_eq!(wizard.state().selected_day, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn select_day_is_ignored_while_loading() {
        let mut wizard = controller();
        at_step(&mut wizard, WizardStep::Confirm);
        wizard.advance().unwrap();

        assert_eq!(wizard.select_day(1), Ok(Transition::Ignored));
        assert_eq!(wizard.state().selected_day, None);
    }

    // ── restart ──────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn restart_from_ready_resets_every_field() {
        let mut wizard = controller();
        wizard.advance().unwrap();
        wizard.set_budget("50000");
        wizard.set_price_estimate("25000");
        wizard.advance().unwrap();
        wizard.set_province("DKI Jakarta");
        wizard.set_district("Jakarta Selatan");
        wizard.set_sub_district("Kebayoran Baru");
        wizard.click_map(-6.21, 106.85);
        wizard.set_radius("1500");
        wizard.advance().unwrap();
        wizard.advance().unwrap();
        wizard.next_completion().await.unwrap();

        assert_eq!(wizard.restart(), Transition::Restarted);

        assert_eq!(
            wizard.state(),
            &WizardState::new(&WizardDefaults::default())
        );
    }

    #[test]
    fn restart_outside_result_is_ignored() {
        let mut wizard = controller();
        wizard.advance().unwrap();
        wizard.set_budget("50000");

        assert_eq!(wizard.restart(), Transition::Ignored);
        assert_eq!(wizard.state().budget, "50000");
    }

    #[tokio::test(start_paused = true)]
    async fn restart_while_loading_discards_the_pending_result() {
        let mut wizard = controller();
        at_step(&mut wizard, WizardStep::Confirm);
        wizard.advance().unwrap();

        wizard.restart();
        tokio::time::sleep(DEFAULT_FETCH_DELAY * 2).await;

        assert!(wizard.poll_completion().is_none());
        assert_eq!(wizard.step(), WizardStep::Welcome);
        assert!(wizard.state().ingredients.is_empty());
        assert!(wizard.state().recipes.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn queued_result_of_cancelled_submission_is_a_navigation_race() {
        let mut wizard = controller();
        at_step(&mut wizard, WizardStep::Confirm);
        wizard.advance().unwrap();
        let stale = FetchCompletion {
            generation: 1,
            outcome: Ok(MockRecommendationSource::payload()),
        };

        wizard.restart();
        let err = wizard.apply_completion(stale).unwrap_err();

        assert_eq!(err, WizardError::NavigationRace { generation: 1 });
        assert!(wizard.state().ingredients.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn resubmitting_after_back_uses_a_new_generation() {
        let mut wizard = controller();
        at_step(&mut wizard, WizardStep::Confirm);
        wizard.advance().unwrap();
        wizard.back();

        let transition = wizard.advance().unwrap();
        let Transition::Submitted { generation } = transition else {
            panic!("expected Submitted, got {transition:?}");
        };
        assert!(generation > 1);

        assert_eq!(
            wizard.next_completion().await.unwrap(),
            Transition::Completed { generation }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_controller_aborts_the_fetch() {
        let source = Arc::new(CountingSource::default());
        let mut wizard = WizardController::new(source.clone(), WizardSettings::default());
        at_step(&mut wizard, WizardStep::Confirm);
        wizard.advance().unwrap();

        drop(wizard);
        tokio::time::sleep(DEFAULT_FETCH_DELAY * 2).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    // ── setters ──────────────────────────────────────────────────────────

    #[test]
    fn map_click_sets_center_exactly_and_keeps_radius() {
        let mut wizard = controller();
        wizard.set_radius("1500");

        wizard.click_map(-6.21, 106.85);

        assert_eq!(wizard.state().map_center, GeoPoint::new(-6.21, 106.85));
        assert_eq!(wizard.state().radius, "1500");
    }

    #[test]
    fn setters_accept_any_text_under_permissive_policy() {
        let mut wizard = controller();
        wizard.advance().unwrap();
        wizard.set_budget("-5");
        wizard.set_price_estimate("banyak");
        wizard.advance().unwrap();
        wizard.set_radius("jauh");

        assert!(wizard.advance().is_ok());
        assert_eq!(wizard.state().budget, "-5");
        assert_eq!(wizard.state().radius, "jauh");
    }

    // ── strict validation ────────────────────────────────────────────────

    #[test]
    fn strict_policy_blocks_leaving_budget_with_bad_amount() {
        let mut wizard = strict_controller();
        wizard.advance().unwrap();
        wizard.set_budget("-5");
        wizard.set_price_estimate("10000");

        let err = wizard.advance().unwrap_err();

        assert!(matches!(
            err,
            WizardError::InvalidInput {
                field: "budget",
                ..
            }
        ));
        assert_eq!(wizard.step(), WizardStep::Budget);
    }

    #[test]
    fn strict_policy_blocks_leaving_location_with_bad_radius() {
        let mut wizard = strict_controller();
        wizard.advance().unwrap();
        wizard.set_budget("50000");
        wizard.set_price_estimate("20000");
        wizard.advance().unwrap();
        wizard.set_radius("0");

        let err = wizard.advance().unwrap_err();

        assert!(matches!(
            err,
            WizardError::InvalidInput {
                field: "radius",
                ..
            }
        ));
        assert_eq!(wizard.step(), WizardStep::Location);

        wizard.set_radius("1500");
        assert_eq!(
            wizard.advance().unwrap(),
            Transition::Moved {
                from: WizardStep::Location,
                to: WizardStep::Confirm
            }
        );
    }

    #[test]
    fn strict_policy_does_not_block_welcome() {
        let mut wizard = strict_controller();

        assert!(wizard.advance().is_ok());
    }
}
