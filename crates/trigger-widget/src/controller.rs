//! Button action controller
//!
//! One controller per rendered trigger button. A click runs through:
//!
//! 1. mark the event handled
//! 2. start the redirect, if the button has one
//! 3. open the dialog when the button needs confirmation or input
//! 4. submit, then present the outcomes
//!
//! The redirect does not replace the submission; a button with both a
//! redirect and a dialog navigates away and still submits the dialog.

use crate::dialog::{open_dialog, should_confirm, DialogOutcome};
use crate::event::ClickEvent;
use crate::presenter::{present, submit_error_notification};
use crate::state::{reduce_button_state, ButtonEvent, ButtonUiState};
use crate::traits::Host;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use trigger_client::{
    PagePath, SubmissionPayload, SubmitError, SubmitResponse, TriggerApi, TriggerButton, Uuid,
};

/// How a click ended
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// The server accepted the submission
    Submitted(SubmitResponse),
    /// The dialog was closed; nothing was sent
    Cancelled,
    /// The submission failed; the user was notified
    Failed(SubmitError),
    /// The button was disabled and swallowed the click
    Ignored,
}

pub struct TriggerController {
    button: TriggerButton,
    page: PagePath,
    api: Arc<dyn TriggerApi>,
    host: Host,
    min_busy: Duration,
    state: Mutex<ButtonUiState>,
}

impl TriggerController {
    pub fn new(
        button: TriggerButton,
        page: PagePath,
        api: Arc<dyn TriggerApi>,
        host: Host,
        min_busy: Duration,
    ) -> Self {
        Self {
            button,
            page,
            api,
            host,
            min_busy,
            state: Mutex::new(ButtonUiState::Idle),
        }
    }

    pub fn button(&self) -> &TriggerButton {
        &self.button
    }

    pub fn uuid(&self) -> Uuid {
        self.button.uuid
    }

    pub fn state(&self) -> ButtonUiState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `event` and mirror the new state on the page
    fn dispatch(&self, event: ButtonEvent) {
        let (previous, next) = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let previous = *state;
            *state = reduce_button_state(previous, &event);
            (previous, *state)
        };

        if previous != next {
            log::debug!(
                "Trigger {} {:?}: {} -> {}",
                self.button.uuid,
                event,
                previous,
                next
            );
            self.host.surface.set_button_state(self.button.uuid, next);
        }
    }

    /// Handle a click on the trigger button
    pub async fn on_click(&self, event: &mut ClickEvent) -> ClickOutcome {
        event.prevent_default();
        event.stop_propagation();

        if self.state().is_disabled() {
            log::debug!("Ignoring click on disabled trigger {}", self.button.uuid);
            return ClickOutcome::Ignored;
        }

        if let Some(url) = &self.button.redirect_url {
            log::info!("Trigger {} redirects to {}", self.button.uuid, url);
            self.dispatch(ButtonEvent::RedirectStarted);
            self.host.navigator.navigate(url);
        }

        let form = if should_confirm(&self.button) {
            match open_dialog(&self.button, self.host.dialogs.as_ref()).await {
                DialogOutcome::Submitted(payload) => Some(payload),
                DialogOutcome::Cancelled => {
                    self.dispatch(ButtonEvent::DialogCancelled);
                    return ClickOutcome::Cancelled;
                }
            }
        } else {
            None
        };

        self.submit(form.as_ref()).await
    }

    async fn submit(&self, form: Option<&SubmissionPayload>) -> ClickOutcome {
        self.dispatch(ButtonEvent::SubmissionStarted);
        log::debug!(
            "Submitting trigger {} on {} ({} form values)",
            self.button.uuid,
            self.page,
            form.map_or(0, SubmissionPayload::len)
        );

        match self.api.submit(&self.page, &self.button.uuid, form).await {
            Ok(response) => {
                // The wait indicator stays up `min_busy` past the response
                tokio::time::sleep(self.min_busy).await;
                self.dispatch(ButtonEvent::SubmissionFinished);

                if response.confirmation_enabled() {
                    present(&response.outcomes, self.host.notifier.as_ref());
                } else {
                    log::debug!("Confirmation off for trigger {}", self.button.uuid);
                }
                ClickOutcome::Submitted(response)
            }
            Err(error) => {
                log::error!("Trigger {} failed: {}", self.button.uuid, error);
                self.dispatch(ButtonEvent::SubmissionFinished);
                self.host
                    .notifier
                    .notify(submit_error_notification(&error));
                ClickOutcome::Failed(error)
            }
        }
    }
}
