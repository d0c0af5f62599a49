use std::io::{self, BufRead, Write};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    tty::IsTty,
};

use crate::ast::CMD_LEN;
use crate::history::History;
use crate::terminal::RawModeGuard;

/// Result of one `read_line` call.
pub enum Line {
    /// A committed line, without its trailing newline.
    Text(String),
    /// EOF was reached (empty prompt, tty EOF sentinel, or pipe closed).
    EndOfInput,
}

/// C2: reads one logical input line, character by character in raw mode on
/// a tty, maintaining the recall cursor over `history`.
///
/// Grounded on the teacher's `editor::LineEditor` for the event-loop
/// mechanics (crossterm `event::read`, the tty/non-tty split, the
/// `RawModeGuard` scope) and on the source's `getcmd` for the exact key
/// table and prompt format. The teacher's cursor-movement and Emacs-style
/// Ctrl-A/E/K/U/W bindings are not carried here: spec.md's key table is
/// exhaustive for this component and does not include them, so this editor
/// only ever appends to or erases from the end of the buffer.
pub struct LineEditor {
    buffer: String,
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl LineEditor {
    pub fn new() -> Self {
        LineEditor {
            buffer: String::new(),
        }
    }

    /// Read one line, showing `prompt` when stdin is a tty.
    pub fn read_line(&mut self, prompt: &str, history: &mut History) -> io::Result<Line> {
        if !io::stdin().is_tty() {
            return self.read_line_fallback();
        }

        self.buffer.clear();
        let _guard = RawModeGuard::new()?;

        print!("{prompt}");
        io::stdout().flush()?;

        loop {
            let ev = match event::read() {
                Ok(ev) => ev,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            let Event::Key(key) = ev else {
                continue;
            };
            if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
                continue;
            }

            if let Some(line) = self.handle_key(key, history)? {
                return Ok(line);
            }
        }
    }

    /// Non-tty path: the whole line arrives in one blocking read, matching
    /// spec.md's "prompt suppressed, single blocking read" rule for
    /// batch/pipe stdin.
    fn read_line_fallback(&mut self) -> io::Result<Line> {
        let stdin = io::stdin();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => Ok(Line::EndOfInput),
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Ok(Line::Text(line))
            }
            Err(e) => Err(e),
        }
    }

    fn handle_key(
        &mut self,
        key: crossterm::event::KeyEvent,
        history: &mut History,
    ) -> io::Result<Option<Line>> {
        match (key.code, key.modifiers) {
            // \n — commit.
            (KeyCode::Enter, _) => {
                print!("\r\n");
                io::stdout().flush()?;
                return Ok(Some(Line::Text(std::mem::take(&mut self.buffer))));
            }

            // \t — ignore.
            (KeyCode::Tab, _) => {}

            // EOF sentinel: no raw byte 0x04 reaches a key event, so Ctrl-D
            // stands in for it, as the teacher's editor already does.
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                print!("\r\n");
                io::stdout().flush()?;
                return Ok(Some(Line::EndOfInput));
            }

            // 0x7F DEL — erase last char in buffer and on screen; no-op at
            // column 0.
            (KeyCode::Backspace, _) => {
                if self.buffer.pop().is_some() {
                    print!("\u{8} \u{8}");
                    io::stdout().flush()?;
                }
            }

            // ESC [ A — recall previous history entry.
            (KeyCode::Up, _) => {
                if let Some(text) = history.previous() {
                    self.replace_displayed_line(text)?;
                }
            }

            // ESC [ B — recall next history entry.
            (KeyCode::Down, _) => {
                if let Some(text) = history.next() {
                    self.replace_displayed_line(text)?;
                }
            }

            // ESC [ C / D — ignore.
            (KeyCode::Left, _) | (KeyCode::Right, _) => {}

            // Any other byte — echo and append, honouring the line-buffer
            // capacity.
            (KeyCode::Char(c), _) => {
                if self.buffer.len() + 1 < CMD_LEN {
                    self.buffer.push(c);
                    print!("{c}");
                    io::stdout().flush()?;
                }
            }

            _ => {}
        }

        Ok(None)
    }

    /// Erase the currently displayed line (`"\b \b"` once per column) and
    /// write `text` into both buffer and screen, per spec.md's recall rule.
    fn replace_displayed_line(&mut self, text: &str) -> io::Result<()> {
        for _ in self.buffer.chars() {
            print!("\u{8} \u{8}");
        }
        self.buffer = text.to_string();
        print!("{}", self.buffer);
        io::stdout().flush()?;
        Ok(())
    }
}

/// Build the prompt string: `238P:<display>$ `, where `<display>` is `cwd`
/// with a `$HOME` prefix collapsed to `~` (exact prefix match only).
pub fn format_prompt(cwd: &str, home: Option<&str>) -> String {
    let display = match home {
        Some(home) if !home.is_empty() && cwd.starts_with(home) => {
            format!("~{}", &cwd[home.len()..])
        }
        _ => cwd.to_string(),
    };
    format!("238P:{display}$ ")
}
