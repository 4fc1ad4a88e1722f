use super::app_logic::BrowserApp;
use crate::toolbar::ToolbarEvent;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

/// Toolbar notifications raised by the browser's collaborators. Drained by
/// the app after each input so handlers never run re-entrantly.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: RefCell<VecDeque<ToolbarEvent>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: ToolbarEvent) {
        self.pending.borrow_mut().push_back(event);
    }

    pub fn pop(&self) -> Option<ToolbarEvent> {
        self.pending.borrow_mut().pop_front()
    }
}

pub(super) fn handle_events(app: &mut BrowserApp) -> Result<()> {
    if event::poll(Duration::from_millis(50))? {
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                app.handle_key(key_event);
            }
            Event::Resize(width, _) => app.resize(width),
            _ => {}
        }
    }
    app.pump_events();
    Ok(())
}
