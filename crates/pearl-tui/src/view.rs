//! Terminal-side state of the chat window: what has been drawn, the input line,
//! and the pending indicator. This is the display surface the controller writes into.

use pearl_core::{DisplayContent, DisplaySurface, Role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: DisplayContent,
}

#[derive(Debug, Default)]
pub struct ChatView {
    pub messages: Vec<ChatMessage>,
    pub pending: bool,

    // Input line; cursor is a char index, not a byte index
    pub input: String,
    pub cursor: usize,

    pub scroll: u16,
    pub max_scroll: u16, // Updated by the renderer each frame
    pub follow_tail: bool,

    pub animation_frame: u8, // 0-2 for ellipsis animation
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

impl ChatView {
    pub fn new() -> Self {
        Self {
            follow_tail: true,
            ..Self::default()
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.input, self.cursor);
        self.input.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_pos = char_to_byte_index(&self.input, self.cursor);
            self.input.remove(byte_pos);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.input.chars().count() {
            let byte_pos = char_to_byte_index(&self.input, self.cursor);
            self.input.remove(byte_pos);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.input.chars().count());
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.input.chars().count();
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.min(self.max_scroll).saturating_sub(lines);
        self.follow_tail = false;
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll);
        self.follow_tail = self.scroll >= self.max_scroll;
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.pending {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }
}

impl DisplaySurface for ChatView {
    fn append_message(&mut self, role: Role, content: &DisplayContent) {
        self.messages.push(ChatMessage {
            role,
            content: content.clone(),
        });
        self.follow_tail = true;
    }

    fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
        self.animation_frame = 0;
        if pending {
            // Keep "Thinking..." in view
            self.follow_tail = true;
        }
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_editing_is_utf8_safe() {
        let mut view = ChatView::new();
        for c in "héllo".chars() {
            view.insert_char(c);
        }
        view.cursor_left();
        view.cursor_left();
        view.backspace();
        assert_eq!(view.input, "hélo");
        assert_eq!(view.cursor, 2);

        view.cursor_home();
        view.delete();
        assert_eq!(view.input, "élo");

        view.cursor_end();
        view.insert_char('!');
        assert_eq!(view.input, "élo!");
    }

    #[test]
    fn test_clear_input_resets_cursor() {
        let mut view = ChatView::new();
        view.insert_char('a');
        view.clear_input();
        assert_eq!(view.input, "");
        assert_eq!(view.cursor, 0);
    }

    #[test]
    fn test_scrolling_up_stops_following() {
        let mut view = ChatView::new();
        view.max_scroll = 10;
        view.scroll = 10;

        view.scroll_up(3);
        assert_eq!(view.scroll, 7);
        assert!(!view.follow_tail);

        view.scroll_down(5);
        assert_eq!(view.scroll, 10);
        assert!(view.follow_tail);
    }

    #[test]
    fn test_animation_only_runs_while_pending() {
        let mut view = ChatView::new();
        view.tick_animation();
        assert_eq!(view.animation_frame, 0);

        view.set_pending(true);
        view.tick_animation();
        view.tick_animation();
        view.tick_animation();
        assert_eq!(view.animation_frame, 0);
        view.tick_animation();
        assert_eq!(view.animation_frame, 1);
    }
}
