// Presentation layer: renders the session's current prompt and feeds keys back into it.
mod app_logic;
mod app_state;
mod event_handler;
mod ui_renderer;

pub use app_state::SessionOutcome;

// The main function to run the TUI
pub use self::run_tui::run_session;

mod run_tui {
    use super::app_logic::TuiApp;
    use super::app_state::SessionOutcome;
    use super::event_handler::handle_events;
    use super::ui_renderer::ui_frame;
    use crate::gateway::Gateway;
    use crate::session::{Phase, Session};
    use anyhow::{Context, Result};
    use crossterm::{
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    };
    use ratatui::prelude::{CrosstermBackend, Terminal};
    use std::io::{self, Stdout};

    /// Runs the interactive session until the user quits.
    pub fn run_session(session: Session, gateway: Gateway) -> Result<SessionOutcome> {
        let mut terminal = init_terminal().context("cannot set up the terminal")?;
        let mut app = TuiApp::new(session, gateway);

        // Restore the terminal even if drawing or input failed.
        let loop_result = run_loop(&mut terminal, &mut app);
        restore_terminal(terminal)?;

        let outcome = app.outcome();
        if matches!(app.session.phase(), Phase::Waiting) {
            tracing::warn!("quit while an operation was in flight");
        }
        app.ops.finish();
        loop_result?;

        Ok(outcome)
    }

    fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut TuiApp) -> Result<()> {
        while !app.quit {
            terminal.draw(|frame| ui_frame(frame, app))?;
            handle_events(app)?;
        }
        Ok(())
    }

    fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor().map_err(Into::into)
    }
}
