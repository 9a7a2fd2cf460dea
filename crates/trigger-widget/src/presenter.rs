//! Result presenter
//!
//! Turns the per-notification outcomes of a submission into notifications,
//! one per outcome in server order, or a single warning when nothing ran.

use crate::traits::{Notification, NotificationKind, Notifier};
use trigger_client::{SubmitError, TriggerOutcome};

const NETWORK_TAB_HINT: &str = "You may check network tab in web browser for exact URL and response.";
const SERVER_LOG_HINT: &str = "Check the Bitbucket Server log for more details.";

/// Build the notifications for a set of outcomes
pub fn outcome_notifications(outcomes: &[TriggerOutcome]) -> Vec<Notification> {
    if outcomes.is_empty() {
        return vec![Notification::new(NotificationKind::Warning, "No triggers were invoked")
            .paragraph("No triggers were invoked when the button was pressed.")];
    }

    outcomes.iter().map(outcome_notification).collect()
}

fn outcome_notification(outcome: &TriggerOutcome) -> Notification {
    if outcome.is_success() {
        Notification::new(NotificationKind::Success, &outcome.notification_name)
            .paragraph(NETWORK_TAB_HINT)
    } else {
        Notification::new(NotificationKind::Error, &outcome.notification_name)
            .paragraph(&format!("{} {}", outcome.status, outcome.uri))
            .paragraph(NETWORK_TAB_HINT)
    }
}

/// Show one notification per outcome
pub fn present(outcomes: &[TriggerOutcome], notifier: &dyn Notifier) {
    for notification in outcome_notifications(outcomes) {
        log::debug!("Presenting {} notification {:?}", notification.kind, notification.title);
        notifier.notify(notification);
    }
}

/// The notification shown when a submission failed as a whole
pub fn submit_error_notification(error: &SubmitError) -> Notification {
    Notification::new(NotificationKind::Error, "Unknown error")
        .paragraph(&error.status().to_string())
        .paragraph(SERVER_LOG_HINT)
}
