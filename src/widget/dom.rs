// src/widget/dom.rs
//! In-memory stand-in for the page hosting the widget.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::view::{Bubble, ChatView};

const LINE_HEIGHT: u32 = 20;
const BUBBLE_PADDING: u32 = 16;
const WRAP_COLUMNS: usize = 60;
pub const DEFAULT_CLIENT_HEIGHT: u32 = 400;

#[derive(Debug)]
struct DocumentState {
    prompt: String,
    children: Vec<Bubble>,
    notifications: Vec<String>,
    scroll_top: u32,
    client_height: u32,
    submit_enabled: bool,
}

/// Prompt field, chat container and notification log, shared behind `&self`.
#[derive(Debug)]
pub struct Document {
    state: Mutex<DocumentState>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_CLIENT_HEIGHT)
    }
}

fn bubble_height(bubble: &Bubble) -> u32 {
    let lines: usize = bubble
        .content
        .lines()
        .map(|l| l.chars().count().div_ceil(WRAP_COLUMNS).max(1))
        .sum();
    lines.max(1) as u32 * LINE_HEIGHT + BUBBLE_PADDING
}

impl DocumentState {
    fn scroll_height(&self) -> u32 {
        let content: u32 = self.children.iter().map(bubble_height).sum();
        content.max(self.client_height)
    }

    fn max_scroll_top(&self) -> u32 {
        self.scroll_height() - self.client_height
    }
}

impl Document {
    pub fn new(client_height: u32) -> Self {
        Self {
            state: Mutex::new(DocumentState {
                prompt: String::new(),
                children: Vec::new(),
                notifications: Vec::new(),
                scroll_top: 0,
                client_height,
                submit_enabled: true,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DocumentState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Types into the prompt field.
    pub fn set_prompt(&self, value: impl Into<String>) {
        self.lock().prompt = value.into();
    }

    pub fn bubbles(&self) -> Vec<Bubble> {
        self.lock().children.clone()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.lock().notifications.clone()
    }

    pub fn scroll_top(&self) -> u32 {
        self.lock().scroll_top
    }

    pub fn scroll_height(&self) -> u32 {
        self.lock().scroll_height()
    }

    pub fn max_scroll_top(&self) -> u32 {
        self.lock().max_scroll_top()
    }

    pub fn submit_enabled(&self) -> bool {
        self.lock().submit_enabled
    }

    /// Markup of the chat container.
    pub fn container_html(&self) -> String {
        let state = self.lock();
        let inner: String = state.children.iter().map(Bubble::to_html).collect();
        format!(r#"<div id="chat-container">{inner}</div>"#)
    }
}

impl ChatView for Document {
    fn prompt_value(&self) -> String {
        self.lock().prompt.clone()
    }

    fn clear_prompt(&self) {
        self.lock().prompt.clear();
    }

    fn append_bubble(&self, bubble: &Bubble) {
        self.lock().children.push(bubble.clone());
    }

    fn notify(&self, message: &str) {
        self.lock().notifications.push(message.to_string());
    }

    fn scroll_to_bottom(&self) {
        // Assigning scrollHeight clamps to the maximum offset.
        let mut state = self.lock();
        state.scroll_top = state.max_scroll_top();
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.lock().submit_enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_height_grows_with_content() {
        let doc = Document::new(40);
        assert_eq!(doc.max_scroll_top(), 0);
        for _ in 0..5 {
            doc.append_bubble(&Bubble::user("hello"));
        }
        assert!(doc.scroll_height() > 40);
        doc.scroll_to_bottom();
        assert_eq!(doc.scroll_top(), doc.scroll_height() - 40);
    }
}
