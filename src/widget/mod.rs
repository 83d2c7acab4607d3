// src/widget/mod.rs
pub mod dom;
pub mod terminal;
pub mod view;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use crate::client::Generate;
use crate::error::ClientError;
use view::{Bubble, ChatView};

pub const EMPTY_INPUT_NOTICE: &str = "Please enter a message.";
pub const DEFAULT_SERVER_ERROR: &str = "Unable to generate response.";
pub const CONNECT_ERROR_NOTICE: &str = "Error: Unable to connect to the server.";

/// Which branch a submit took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    EmptyInput,
    /// A previous submit is still waiting on the server; nothing was done.
    Busy,
    Replied,
    /// The server rejected the prompt; holds the notification shown.
    ServerError(String),
    TransportFailure,
}

/// Holds the in-flight flag for one submit. On drop, however the submit
/// ends, the flag is cleared and the view's submit action re-enabled.
struct InFlight<'a, V: ChatView> {
    flag: &'a AtomicBool,
    view: &'a V,
}

impl<'a, V: ChatView> InFlight<'a, V> {
    fn acquire(flag: &'a AtomicBool, view: &'a V) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag, view })
    }
}

impl<V: ChatView> Drop for InFlight<'_, V> {
    fn drop(&mut self) {
        self.view.set_submit_enabled(true);
        self.flag.store(false, Ordering::Release);
    }
}

/// Runs one chat turn: prompt in, user bubble, request, reply bubble or
/// notification, then reset.
pub struct ChatSubmitHandler<V, C> {
    view: Arc<V>,
    client: C,
    in_flight: AtomicBool,
}

impl<V: ChatView, C: Generate> ChatSubmitHandler<V, C> {
    pub fn new(view: Arc<V>, client: C) -> Self {
        Self {
            view,
            client,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn view(&self) -> &Arc<V> {
        &self.view
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_guard) = InFlight::acquire(&self.in_flight, self.view.as_ref()) else {
            debug!("submit ignored, request in flight");
            return SubmitOutcome::Busy;
        };

        let prompt = self.view.prompt_value();
        if prompt.is_empty() {
            self.view.notify(EMPTY_INPUT_NOTICE);
            return SubmitOutcome::EmptyInput;
        }

        self.view.set_submit_enabled(false);
        self.view.append_bubble(&Bubble::user(prompt.as_str()));

        let outcome = match self.client.generate(&prompt).await {
            Ok(text) => {
                self.view.append_bubble(&Bubble::assistant(text));
                SubmitOutcome::Replied
            }
            Err(ClientError::Server { status, message }) => {
                let notice = format!(
                    "Error: {}",
                    message
                        .as_deref()
                        .filter(|m| !m.is_empty())
                        .unwrap_or(DEFAULT_SERVER_ERROR)
                );
                warn!(status, "generation endpoint returned an error");
                self.view.notify(&notice);
                SubmitOutcome::ServerError(notice)
            }
            Err(e) => {
                warn!(error = %e, "generation request failed");
                self.view.notify(CONNECT_ERROR_NOTICE);
                SubmitOutcome::TransportFailure
            }
        };

        self.view.clear_prompt();
        self.view.scroll_to_bottom();
        outcome
    }
}
