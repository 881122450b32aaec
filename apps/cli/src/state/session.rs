//! # Calculator Session
//!
//! Mutable form state for one user: the farm input being edited and the
//! preferred display currency.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   new(schedule, PLN) ──► update_field("totalArea", "25.5") ──┐          │
//! │                               ▲                              │          │
//! │                               │                              ▼          │
//! │                         reset()                   results()             │
//! │                                                   validation_errors()   │
//! │                                                              │          │
//! │   toggle_currency(): PLN ──► EUR ──► UAH ──► PLN             │          │
//! │                                                              ▼          │
//! │                                          report (text / JSON / CSV)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Results are recomputed on every call; the engine is cheap and pure, so
//! there is no cached copy to go stale.
//!
//! ## Form-Layer Controls
//! The one-shot commands only need `new`, `with_input`, `apply_assignments`
//! and the two readers. `set_currency`, `toggle_currency` and `reset` are the
//! currency switch and clear button of an interactive front end; they are
//! part of the session API for that caller and are covered by the tests
//! below.

use std::sync::Arc;

use agri_core::{calculate, validate, CalculationResult, Currency, FarmInput, RateSchedule};
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Editable calculator state bound to one rate schedule.
#[derive(Debug, Clone)]
pub struct CalculatorSession {
    schedule: Arc<RateSchedule>,
    input: FarmInput,
    currency: Currency,
}

impl CalculatorSession {
    /// Creates a session with an all-zero farm.
    pub fn new(schedule: Arc<RateSchedule>, currency: Currency) -> Self {
        CalculatorSession {
            schedule,
            input: FarmInput::default(),
            currency,
        }
    }

    /// Replaces the farm input wholesale (e.g. loaded from a file).
    pub fn with_input(mut self, input: FarmInput) -> Self {
        self.input = input;
        self
    }

    pub fn input(&self) -> &FarmInput {
        &self.input
    }

    pub fn schedule(&self) -> &RateSchedule {
        &self.schedule
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    /// Advances the display currency PLN → EUR → UAH → PLN.
    pub fn toggle_currency(&mut self) -> Currency {
        self.currency = self.currency.next();
        debug!(currency = %self.currency, "Display currency toggled");
        self.currency
    }

    /// Sets one farm field by its form key.
    pub fn update_field(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.input.set_field(key, value)?;
        debug!(field = key, value, "Farm field updated");
        Ok(())
    }

    /// Applies `field=value` edits in order, stopping at the first bad one.
    pub fn apply_assignments<S: AsRef<str>>(&mut self, assignments: &[S]) -> AppResult<()> {
        for assignment in assignments {
            let assignment = assignment.as_ref();
            let (key, value) = assignment
                .split_once('=')
                .ok_or_else(|| AppError::InvalidAssignment(assignment.to_string()))?;
            self.update_field(key.trim(), value.trim())?;
        }
        Ok(())
    }

    /// Clears every field back to zero / false. Currency is kept.
    pub fn reset(&mut self) {
        self.input = FarmInput::default();
        debug!("Calculator reset");
    }

    /// Full calculation with the grand total in the display currency.
    pub fn results(&self) -> CalculationResult {
        calculate(&self.input, &self.schedule, Some(self.currency))
    }

    /// Advisory warnings for the current input.
    pub fn validation_errors(&self) -> Vec<String> {
        validate(&self.input, &self.schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> CalculatorSession {
        CalculatorSession::new(Arc::new(RateSchedule::program_2025()), Currency::Pln)
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = session();
        assert_eq!(session.input(), &FarmInput::default());
        assert_eq!(session.currency(), Currency::Pln);
        assert_eq!(session.results().grand_total, 0.0);
        assert!(session.validation_errors().is_empty());
    }

    #[test]
    fn test_update_field() {
        let mut session = session();
        session.update_field("totalArea", "10").unwrap();
        session.update_field("isSmallFarm", "true").unwrap();

        assert_eq!(session.input().total_area, 10.0);
        assert!(session.input().is_small_farm);

        assert!(matches!(
            session.update_field("barleyArea", "1"),
            Err(AppError::Input(_))
        ));
    }

    #[test]
    fn test_apply_assignments() {
        let mut session = session();
        session
            .apply_assignments(&["totalArea=3", "isSmallFarm = yes", "cattleCount=25"])
            .unwrap();

        let result = session.results();
        assert_eq!(result.direct_payments.small_farms_payment, 675.0);
        assert_eq!(result.animal_payments.cattle, 20.0 * 75.73);
    }

    #[test]
    fn test_apply_assignments_rejects_missing_equals() {
        let mut session = session();
        assert!(matches!(
            session.apply_assignments(&["totalArea"]),
            Err(AppError::InvalidAssignment(_))
        ));
    }

    #[test]
    fn test_reset_keeps_currency() {
        let mut session = session();
        session.set_currency(Currency::Uah);
        session.update_field("totalArea", "40").unwrap();
        session.reset();

        assert_eq!(session.input(), &FarmInput::default());
        assert_eq!(session.currency(), Currency::Uah);
    }

    #[test]
    fn test_toggle_currency_cycle() {
        let mut session = session();
        assert_eq!(session.toggle_currency(), Currency::Eur);
        assert_eq!(session.toggle_currency(), Currency::Uah);
        assert_eq!(session.toggle_currency(), Currency::Pln);
    }

    #[test]
    fn test_results_use_display_currency() {
        let mut session = session();
        session.update_field("totalArea", "10").unwrap();

        let pln = session.results();
        assert_eq!(pln.currency, Currency::Pln);
        assert_eq!(pln.grand_total_converted, pln.grand_total * 4.45);

        session.set_currency(Currency::Eur);
        let eur = session.results();
        assert_eq!(eur.grand_total_converted, eur.grand_total);
    }

    #[test]
    fn test_form_controls_drive_results() {
        let mut session = session();
        session.apply_assignments(&["totalArea=10"]).unwrap();

        let eur = session.toggle_currency();
        let result = session.results();
        assert_eq!(result.currency, eur);
        assert_eq!(result.grand_total_converted, result.grand_total);

        session.reset();
        let cleared = session.results();
        assert_eq!(cleared.grand_total, 0.0);
        assert_eq!(cleared.currency, Currency::Eur);
    }

    #[test]
    fn test_validation_errors() {
        let mut session = session();
        session.update_field("totalArea", "-1").unwrap();
        assert_eq!(
            session.validation_errors(),
            vec!["Total area cannot be negative".to_string()]
        );
    }

    #[test]
    fn test_sessions_share_one_schedule() {
        let schedule = Arc::new(RateSchedule::program_2025());
        let a = CalculatorSession::new(Arc::clone(&schedule), Currency::Pln);
        let b = CalculatorSession::new(Arc::clone(&schedule), Currency::Eur);

        assert!(std::ptr::eq(a.schedule(), b.schedule()));
        assert_eq!(Arc::strong_count(&schedule), 3);
    }
}
