//! Terminal rendering of orchestrator events.

use std::io::{self, Write};

use chrono::Local;
use owo_colors::OwoColorize;
use trainer_core::Observer;

/// Prints titles, feature menus and timestamped log lines.
pub struct ConsoleObserver<W: Write> {
    out: W,
}

impl ConsoleObserver<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: &str) {
        // A closed stdout is not worth aborting the trainer for
        let _ = writeln!(self.out, "{}", line);
        let _ = self.out.flush();
    }
}

impl<W: Write> Observer for ConsoleObserver<W> {
    fn on_title_changed(&mut self, text: &str) {
        let line = format!("━━ {} ━━", text);
        self.emit(&line.bold().to_string());
    }

    fn on_features_available(&mut self, features: &[(String, String)]) {
        for (index, (key, label)) in features.iter().enumerate() {
            let line = format!(
                "  {} {} {}",
                format!("[{}]", index + 1).green(),
                label,
                format!("({})", key).dimmed()
            );
            self.emit(&line);
        }
    }

    fn on_features_cleared(&mut self) {
        self.emit(&"  (no features available)".dimmed().to_string());
    }

    fn on_log(&mut self, message: &str) {
        let timestamp = Local::now().format("[%H:%M:%S]").to_string();
        let line = format!("{} {}", timestamp.dimmed(), message);
        self.emit(&line);
    }
}
