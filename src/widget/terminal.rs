// src/widget/terminal.rs
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use super::view::{Bubble, ChatView, Role};

/// `ChatView` over a terminal: the prompt field is the last line read from
/// stdin, bubbles go to stdout and notifications to stderr.
#[derive(Debug)]
pub struct TerminalView {
    line: Mutex<String>,
    submit_enabled: AtomicBool,
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            line: Mutex::new(String::new()),
            submit_enabled: AtomicBool::new(true),
        }
    }

    /// Loads a freshly read line into the prompt field, minus its newline.
    pub fn set_line(&self, line: &str) {
        let mut guard = self.line.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = line.trim_end_matches(['\r', '\n']).to_string();
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled.load(Ordering::SeqCst)
    }
}

impl ChatView for TerminalView {
    fn prompt_value(&self) -> String {
        self.line
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn clear_prompt(&self) {
        self.line
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn append_bubble(&self, bubble: &Bubble) {
        let label = match bubble.role {
            Role::User => "you",
            Role::Assistant => "bot",
        };
        println!("{label}> {}", bubble.content);
    }

    fn notify(&self, message: &str) {
        eprintln!("[!] {message}");
    }

    // The terminal follows its own output.
    fn scroll_to_bottom(&self) {}

    fn set_submit_enabled(&self, enabled: bool) {
        self.submit_enabled.store(enabled, Ordering::SeqCst);
    }
}
