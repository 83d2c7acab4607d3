// src/widget/view.rs
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn avatar_color(self) -> &'static str {
        match self {
            Role::User => "#1877f2",
            Role::Assistant => "#e8e8e8",
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Role::User => "message user-message",
            Role::Assistant => "message ai-message",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One rendered chat message: an avatar plus its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    pub role: Role,
    pub content: String,
}

impl Bubble {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Markup for the bubble. Content is always escaped, so it shows up as
    /// literal text.
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="{}"><div class="message-avatar" style="background-color: {};"></div><div class="message-content">{}</div></div>"#,
            self.role.class_name(),
            self.role.avatar_color(),
            escape_html(&self.content)
        )
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The widget's surroundings: a prompt field, a chat container, a submit
/// action and a way to show blocking notifications.
///
/// Methods take `&self`; implementations own their interior mutability and
/// must not block.
pub trait ChatView: Send + Sync {
    fn prompt_value(&self) -> String;

    fn clear_prompt(&self);

    /// Appends to the end of the visible message list.
    fn append_bubble(&self, bubble: &Bubble);

    fn notify(&self, message: &str);

    /// Sets the container's scroll offset to its maximum.
    fn scroll_to_bottom(&self);

    fn set_submit_enabled(&self, enabled: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_is_escaped() {
        let html = Bubble::user("<img src=x onerror=alert(1)>").to_html();
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn avatar_color_follows_role() {
        assert!(Bubble::assistant("x").to_html().contains("#e8e8e8"));
        assert!(Bubble::user("x").to_html().contains("user-message"));
    }
}
