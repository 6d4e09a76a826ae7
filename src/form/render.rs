//! Text rendering of form prompts and verdicts

use super::fields::{FieldKind, FormField};
use crate::error::PredictorError;
use crate::prediction::result::{Outcome, PredictionResult};
use crate::prediction::state::PredictionState;

/// Prompt line for one control, e.g. `Traffic Conditions [0 High, 1 Low, 2 Moderate]`
pub fn render_prompt(field: &FormField) -> String {
    match &field.kind {
        FieldKind::Select(options) | FieldKind::Radio(options) => {
            let choices: Vec<String> = options
                .iter()
                .enumerate()
                .map(|(code, label)| format!("{} {}", code, label))
                .collect();
            format!("{} [{}]", field.label, choices.join(", "))
        }
        FieldKind::Number { min, integer, unit } => {
            let kind = if *integer { "whole number" } else { "number" };
            format!("{} ({}, {}, min {})", field.label, unit, kind, min)
        }
    }
}

/// Headline and advisory for a verdict
///
/// ```
/// # use shipping_delay::prediction::result::Outcome;
/// # use shipping_delay::form::render::render_outcome_text;
/// assert_eq!(
///     render_outcome_text(Outcome::NoDelay),
///     "No delay predicted\nShipping is expected to be on time."
/// );
/// ```
pub fn render_outcome_text(outcome: Outcome) -> String {
    format!("{}\n{}", outcome.headline(), outcome.advisory())
}

/// Rendered verdict for a completed prediction
pub fn render_outcome(result: &PredictionResult) -> String {
    render_outcome_text(result.outcome)
}

/// Message shown when a request fails
pub fn render_error(error: &PredictorError) -> String {
    match error {
        PredictorError::InvalidInput { .. } => format!("Please check the form. {}", error),
        _ => error.to_string(),
    }
}

/// Rendered text for any request state
pub fn render_state(state: &PredictionState) -> String {
    match state {
        PredictionState::AwaitingInput => "Fill in the shipment details and submit.".to_string(),
        PredictionState::PredictionReady(result) => render_outcome(result),
        PredictionState::PredictionFailed(error) => render_error(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::fields::form_fields;

    #[test]
    fn test_prompts() {
        let fields = form_fields();
        assert_eq!(
            render_prompt(&fields[11]),
            "Traffic Conditions [0 High, 1 Low, 2 Moderate]"
        );
        assert_eq!(
            render_prompt(&fields[4]),
            "Items in Shipment (items, whole number, min 1)"
        );
        assert_eq!(
            render_prompt(&fields[1]),
            "Product Weight (kg, number, min 0.1)"
        );
    }

    #[test]
    fn test_render_delay() {
        assert_eq!(
            render_outcome_text(Outcome::Delay),
            "Delay predicted\nConsider notifying customers and adjusting delivery schedules."
        );
    }

    #[test]
    fn test_render_errors() {
        let err = PredictorError::invalid("distance", "missing value");
        assert_eq!(
            render_error(&err),
            "Please check the form. Invalid input for 'distance': missing value"
        );
        let state = PredictionState::PredictionFailed(PredictorError::InferenceError(
            "boom".to_string(),
        ));
        assert_eq!(render_state(&state), "Prediction error: boom");
        assert!(render_state(&PredictionState::AwaitingInput).contains("submit"));
    }
}
