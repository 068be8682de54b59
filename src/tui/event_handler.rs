use super::app_logic::{Dispatch, TuiApp};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use std::time::Duration;

/// Waits briefly for a key, then drains finished operations. Operation results
/// are only ever applied here, on the UI thread, in arrival order.
pub(super) fn handle_events<D: Dispatch>(app: &mut TuiApp<D>) -> Result<()> {
    if event::poll(Duration::from_millis(50))? {
        if let Event::Key(key_event) = event::read()? {
            if key_event.kind == KeyEventKind::Press {
                app.handle_key(key_event);
            }
        }
    }
    app.pump_operations();
    Ok(())
}
