use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::renderer;
use crate::view::RenderPayload;

type SnakeTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Raw mode, the alternate screen and mouse capture, held for one process.
///
/// Dropping the session hands the terminal back to the shell.
pub struct TerminalSession {
    terminal: SnakeTerminal,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        let setup = || -> io::Result<SnakeTerminal> {
            enable_raw_mode()?;
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;
            Terminal::new(CrosstermBackend::new(stdout))
        };

        match setup() {
            Ok(terminal) => {
                log::debug!("terminal session started");
                Ok(Self { terminal })
            }
            Err(error) => {
                let _ = restore_terminal();
                Err(error)
            }
        }
    }

    /// Draws one frame and returns the area the board occupied in it.
    pub fn draw(&mut self, payload: &RenderPayload) -> io::Result<Rect> {
        let mut board = Rect::default();
        self.terminal
            .draw(|frame| board = renderer::render(frame, payload))?;
        Ok(board)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(error) = restore_terminal() {
            log::warn!("terminal restore failed: {error}");
        }
    }
}

/// Leaves every mode `TerminalSession::enter` switched on. Safe to call twice.
pub fn restore_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, DisableMouseCapture, LeaveAlternateScreen)
}
