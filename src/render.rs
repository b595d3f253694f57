//! Output rendering for the chat thread.
//!
//! This module provides the renderer trait the chat controller reports view
//! changes through, and a plain-text implementation for terminals.

use std::io::{self, Write};

use crate::chat::{HistoryOverlay, Message, Sender, ServerState, SourcesPanel, Toast, ToastKind};
use crate::chat::{THINKING_TEXT, WELCOME_TEXT, WELCOME_TITLE};

/// ANSI escape code for dim text (used for the thinking placeholder).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for bold text (used for sender labels).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for the user label).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for yellow text (used for the offline indicator).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for green text (used for success toasts).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (used for error toasts).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code for magenta text (used for source headings).
const ANSI_MAGENTA: &str = "\x1b[35m";

/// ANSI sequence returning to column zero and erasing the line.
const ANSI_ERASE_LINE: &str = "\r\x1b[2K";

/// Trait for rendering the chat view.
///
/// The controller calls these as the view model changes.  Each call describes
/// one change; renderers that redraw the whole screen may ignore the argument
/// and read the model instead.
pub trait Renderer: Send {
    /// The status indicator changed.
    fn print_status(&mut self, status: &ServerState);

    /// The thread was reset to the welcome placeholder.
    fn print_welcome(&mut self);

    /// A message was appended to the thread.
    fn print_message(&mut self, message: &Message);

    /// A thinking placeholder was appended.
    fn print_thinking(&mut self);

    /// The thinking placeholder was removed.
    fn clear_thinking(&mut self);

    /// A citation panel was toggled.  `number` is its 1-based position.
    fn print_sources(&mut self, number: usize, panel: &SourcesPanel);

    /// A notification was raised.
    fn print_toast(&mut self, toast: &Toast);

    /// Draw the notifications still live, right before the input prompt.
    fn show_toasts(&mut self, _toasts: &[&Toast]) {}

    /// Remove what [`show_toasts`](Self::show_toasts) drew, once the prompt
    /// below it has been answered.
    fn hide_toasts(&mut self) {}

    /// The history overlay opened.
    fn print_overlay(&mut self, overlay: &HistoryOverlay);

    /// The history overlay was dismissed.
    fn close_overlay(&mut self) {}

    /// Print an error message that is not a notification.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);
}

/// Plain text renderer with optional ANSI styling.
///
/// This renderer outputs text to stdout (or any writer) with optional
/// ANSI escape codes for labels, toasts and the thinking placeholder.
///
/// With color enabled, the thinking placeholder and freshly raised toasts sit
/// on a transient line that the next output overwrites, and live toasts are
/// redrawn as a block above each prompt and deleted once it is answered, so an
/// expired toast disappears.  Without color every line is permanent.
pub struct PlainTextRenderer {
    out: Box<dyn Write + Send>,
    use_color: bool,
    transient: bool,
    toast_lines: usize,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self::with_writer(io::stdout(), use_color)
    }

    /// Creates a PlainTextRenderer writing to `out`.
    pub fn with_writer(out: impl Write + Send + 'static, use_color: bool) -> Self {
        Self {
            out: Box::new(out),
            use_color,
            transient: false,
            toast_lines: 0,
        }
    }

    /// Flushes output to ensure immediate display.
    fn flush(&mut self) {
        let _ = self.out.flush();
    }

    fn styled(&self, style: &str, text: &str) -> String {
        if self.use_color {
            format!("{style}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }

    fn line(&mut self, text: &str) {
        self.erase_transient();
        let _ = writeln!(self.out, "{text}");
        self.flush();
    }

    /// Write `text` without a newline; the next output replaces it.
    fn transient_line(&mut self, text: &str) {
        self.erase_transient();
        let _ = write!(self.out, "{text}");
        self.transient = true;
        self.flush();
    }

    /// The transient line is rewritten in place with color and left behind without.
    fn erase_transient(&mut self) {
        if self.transient {
            if self.use_color {
                let _ = write!(self.out, "{ANSI_ERASE_LINE}");
            } else {
                let _ = writeln!(self.out);
            }
            self.transient = false;
        }
    }

    fn toast_text(&self, toast: &Toast) -> String {
        match toast.kind {
            ToastKind::Success => self.styled(ANSI_GREEN, &format!("✔ {}", toast.message)),
            ToastKind::Error => self.styled(ANSI_RED, &format!("✖ {}", toast.message)),
        }
    }

    fn panel_lines(&self, number: usize, panel: &SourcesPanel) -> Vec<String> {
        let mut lines = vec![format!(
            "  {} {} #{number}",
            panel.indicator(),
            panel.caption()
        )];
        if panel.is_expanded() {
            for (heading, excerpt) in panel.items() {
                lines.push(format!("    {}", self.styled(ANSI_MAGENTA, &heading)));
                lines.push(format!("      {excerpt}"));
            }
        }
        lines
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_status(&mut self, status: &ServerState) {
        let text = match status {
            ServerState::Ready {
                model_name,
                vectorstore_initialized,
            } => {
                let mut text = status.text().to_string();
                if let Some(model) = model_name {
                    text.push_str(&format!(" (model: {model}"));
                    match vectorstore_initialized {
                        Some(true) => text.push_str(", documents indexed)"),
                        Some(false) => text.push_str(", no documents indexed)"),
                        None => text.push(')'),
                    }
                }
                self.styled(ANSI_GREEN, &text)
            }
            ServerState::Offline => self.styled(ANSI_YELLOW, status.text()),
            ServerState::Connecting => status.text().to_string(),
        };
        self.line(&format!("Status: {text}"));
    }

    fn print_welcome(&mut self) {
        let title = self.styled(ANSI_BOLD, WELCOME_TITLE);
        self.line(&title);
        self.line(WELCOME_TEXT);
        self.line("");
    }

    fn print_message(&mut self, message: &Message) {
        let label = match message.sender {
            Sender::User => self.styled(ANSI_CYAN, message.sender.label()),
            Sender::Assistant => self.styled(ANSI_BOLD, message.sender.label()),
        };
        self.line(&format!("{label}: {}", message.text));
        if let Some(panel) = &message.sources {
            let caption = format!("  {} {}", panel.indicator(), panel.caption());
            self.line(&caption);
        }
    }

    fn print_thinking(&mut self) {
        let text = self.styled(ANSI_DIM, THINKING_TEXT);
        self.transient_line(&text);
    }

    fn clear_thinking(&mut self) {
        self.erase_transient();
        self.flush();
    }

    fn print_sources(&mut self, number: usize, panel: &SourcesPanel) {
        for line in self.panel_lines(number, panel) {
            self.line(&line);
        }
    }

    fn print_toast(&mut self, toast: &Toast) {
        let text = self.toast_text(toast);
        if self.use_color {
            self.transient_line(&text);
        } else {
            self.line(&text);
        }
    }

    fn show_toasts(&mut self, toasts: &[&Toast]) {
        if !self.use_color {
            return;
        }
        self.erase_transient();
        for toast in toasts {
            let text = self.toast_text(toast);
            let _ = writeln!(self.out, "{text}");
        }
        self.toast_lines = toasts.len();
        self.flush();
    }

    fn hide_toasts(&mut self) {
        let lines = std::mem::take(&mut self.toast_lines);
        if lines == 0 {
            return;
        }
        // Up past the answered prompt to the top of the block, delete the
        // block, then step below the prompt line that moved up.
        let _ = write!(self.out, "\x1b[{}A\r\x1b[{lines}M\x1b[1B\r", lines + 1);
        self.flush();
    }

    fn print_overlay(&mut self, overlay: &HistoryOverlay) {
        let title = self.styled(ANSI_BOLD, "Conversation History");
        self.line(&format!("┌─ {title}"));
        for line in overlay.lines() {
            self.line(&format!("│ {line}"));
        }
        self.line("└─ (/close or any input to dismiss)");
    }

    fn print_error(&mut self, error: &str) {
        self.erase_transient();
        self.flush();
        eprintln!("Error: {error}");
    }

    fn print_info(&mut self, info: &str) {
        self.line(info);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tokio::time::Instant;

    use super::*;
    use crate::chat::{Notifications, TOAST_DURATION};
    use crate::types::Source;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn take(&self) -> String {
            String::from_utf8(std::mem::take(&mut *self.0.lock().unwrap())).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn renderer(use_color: bool) -> (PlainTextRenderer, SharedBuffer) {
        let buffer = SharedBuffer::default();
        (PlainTextRenderer::with_writer(buffer.clone(), use_color), buffer)
    }

    #[test]
    fn thinking_is_erased_in_place_with_color() {
        let (mut renderer, buffer) = renderer(true);
        renderer.print_thinking();
        assert_eq!(buffer.take(), format!("{ANSI_DIM}Thinking...{ANSI_RESET}"));
        renderer.clear_thinking();
        assert_eq!(buffer.take(), ANSI_ERASE_LINE);
        renderer.clear_thinking();
        assert_eq!(buffer.take(), "");
    }

    #[test]
    fn thinking_is_left_behind_without_color() {
        let (mut renderer, buffer) = renderer(false);
        renderer.print_thinking();
        renderer.print_info("answer");
        assert_eq!(buffer.take(), "Thinking...\nanswer\n");
    }

    #[test]
    fn toast_is_transient_with_color() {
        let (mut renderer, buffer) = renderer(true);
        let mut notifications = Notifications::new();
        renderer.print_toast(notifications.push(ToastKind::Success, "Ingesting documents..."));
        renderer.print_info("done");
        let out = buffer.take();
        assert!(out.contains("Ingesting documents..."));
        assert!(out.ends_with(&format!("{ANSI_ERASE_LINE}done\n")));
    }

    #[test]
    fn toast_is_permanent_without_color() {
        let (mut renderer, buffer) = renderer(false);
        let mut notifications = Notifications::new();
        renderer.print_toast(notifications.push(ToastKind::Error, "boom"));
        let live: Vec<_> = notifications.visible(Instant::now()).collect();
        renderer.show_toasts(&live);
        renderer.hide_toasts();
        assert_eq!(buffer.take(), "✖ boom\n");
    }

    #[tokio::test(start_paused = true)]
    async fn expired_toast_is_not_redrawn() {
        let (mut renderer, buffer) = renderer(true);
        let mut notifications = Notifications::new();
        notifications.push(ToastKind::Success, "History cleared successfully!");

        let live: Vec<_> = notifications.visible(Instant::now()).collect();
        renderer.show_toasts(&live);
        assert!(buffer.take().contains("History cleared successfully!"));
        renderer.hide_toasts();
        assert_eq!(buffer.take(), "\x1b[2A\r\x1b[1M\x1b[1B\r");

        tokio::time::advance(TOAST_DURATION).await;
        let live: Vec<_> = notifications.visible(Instant::now()).collect();
        renderer.show_toasts(&live);
        assert!(!buffer.take().contains("History cleared successfully!"));
        renderer.hide_toasts();
        assert_eq!(buffer.take(), "");
    }

    #[test]
    fn renderer_default_has_color() {
        let renderer = PlainTextRenderer::new();
        assert!(renderer.use_color);
    }

    #[test]
    fn renderer_without_color() {
        let renderer = PlainTextRenderer::with_color(false);
        assert!(!renderer.use_color);
        assert_eq!(renderer.styled(ANSI_RED, "plain"), "plain");
    }

    #[test]
    fn collapsed_panel_shows_caption_only() {
        let renderer = PlainTextRenderer::with_color(false);
        let panel = SourcesPanel::new(vec![Source::new("a"), Source::new("b")]);
        assert_eq!(renderer.panel_lines(1, &panel), vec!["  [+] Sources (2) #1"]);
    }

    #[test]
    fn expanded_panel_lists_sources() {
        let renderer = PlainTextRenderer::with_color(false);
        let mut panel = SourcesPanel::new(vec![Source::new("alpha").with_origin("a.txt")]);
        panel.toggle();
        assert_eq!(
            renderer.panel_lines(3, &panel),
            vec!["  [-] Sources (1) #3", "    1. a.txt", "      alpha..."]
        );
    }
}
