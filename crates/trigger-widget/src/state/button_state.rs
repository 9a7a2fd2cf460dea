//! Button UI State
//!
//! Each trigger button is idle, waiting for a submission, or disabled
//! because the browser is being redirected. The controller never sets the
//! state directly; it dispatches [`ButtonEvent`]s through
//! [`reduce_button_state`].

use crate::fragment::{Element, Node};

/// Visual state of one trigger button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ButtonUiState {
    /// Clickable
    #[default]
    Idle,
    /// A submission is in flight
    Waiting,
    /// The browser is navigating to the redirect target
    DisabledRedirecting,
}

impl ButtonUiState {
    /// Whether the element carries `disabled` / `aria-disabled`
    pub fn is_disabled(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Wait indicator prepended to the button while it is disabled
    pub fn indicator(&self) -> Option<Node> {
        self.is_disabled().then(|| {
            Element::new("span")
                .class("aui-icon")
                .class("aui-icon-wait")
                .class("aui-icon-small")
                .text("Wait")
                .into()
        })
    }
}

/// Things that happen to a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// The click navigates the browser away
    RedirectStarted,
    /// The network submission was issued
    SubmissionStarted,
    /// The response (or error) of the submission was processed
    SubmissionFinished,
    /// The user closed the dialog without submitting
    DialogCancelled,
}

/// Reduce button state based on events.
pub fn reduce_button_state(state: ButtonUiState, event: &ButtonEvent) -> ButtonUiState {
    use ButtonEvent::*;
    use ButtonUiState::*;

    match (state, *event) {
        (_, RedirectStarted) => DisabledRedirecting,

        (Idle | DisabledRedirecting, SubmissionStarted) => Waiting,
        (Waiting, SubmissionStarted) => {
            log::warn!("Submission started while another one is in flight");
            Waiting
        }

        (Waiting, SubmissionFinished) => Idle,
        (state, SubmissionFinished) => {
            log::warn!("Submission finished while button was {}", state);
            state
        }

        // A redirecting page stays disabled; cancelling changes nothing else
        (state, DialogCancelled) => state,
    }
}
