// Terminal file browser hosting the toolbar controller.
mod app_logic;
mod app_state;
mod collaborators;
mod event_handler;
mod ui_renderer;

pub use app_logic::{BrowserApp, ToolbarSummary};
pub use app_state::BrowserConfig;

pub use self::run_browser::run_browser;

// Main loop plus terminal setup/teardown
mod run_browser {
    use super::app_logic::BrowserApp;
    use super::event_handler::handle_events;
    use super::ui_renderer::ui_frame;
    use anyhow::Result;
    use crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{
            EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size,
        },
    };
    use ratatui::prelude::{CrosstermBackend, Terminal};
    use std::io::{self, Stdout};

    pub fn run_browser(mut app: BrowserApp) -> Result<()> {
        let mut terminal = init_terminal()?;
        let (columns, _) = size()?;
        app.resize(columns);

        let result = run_loop(&mut terminal, &mut app);
        restore_terminal(terminal)?;
        result
    }

    fn run_loop(
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        app: &mut BrowserApp,
    ) -> Result<()> {
        while !app.quit {
            terminal.draw(|frame| ui_frame(frame, app))?;
            handle_events(app)?;
        }
        Ok(())
    }

    fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor().map_err(Into::into)
    }
}
