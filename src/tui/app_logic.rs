use super::app_state::{ChoiceItem, SessionOutcome, choice_items};
use crate::gateway::{Gateway, OpEvent, Request};
use crate::session::{Choice, Phase, Session};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Anything that can carry out the session's requests.
pub(super) trait Dispatch {
    fn dispatch(&self, request: Request);
    fn try_next(&self) -> Option<OpEvent>;
}

impl Dispatch for Gateway {
    fn dispatch(&self, request: Request) {
        Gateway::dispatch(self, request);
    }

    fn try_next(&self) -> Option<OpEvent> {
        Gateway::try_next(self)
    }
}

pub(super) struct TuiApp<D = Gateway> {
    pub(super) session: Session,
    pub(super) ops: D,
    pub(super) current_selection_idx: usize,
    pub(super) quit: bool,
}

impl<D: Dispatch> TuiApp<D> {
    pub(super) fn new(mut session: Session, ops: D) -> Self {
        if let Some(request) = session.start() {
            ops.dispatch(request);
        }
        TuiApp {
            session,
            ops,
            current_selection_idx: 0,
            quit: false,
        }
    }

    pub(super) fn items(&self) -> Vec<ChoiceItem> {
        self.session
            .prompt()
            .map(|p| choice_items(&p))
            .unwrap_or_default()
    }

    pub(super) fn outcome(&self) -> SessionOutcome {
        match self.session.phase() {
            Phase::Done => SessionOutcome::Completed,
            Phase::Failed(err) => SessionOutcome::Failed(err.to_string()),
            Phase::Deciding | Phase::Waiting => SessionOutcome::Aborted,
        }
    }

    /// Feeds every finished operation back into the session.
    pub(super) fn pump_operations(&mut self) {
        while let Some(event) = self.ops.try_next() {
            self.session.handle(event);
            self.current_selection_idx = 0;
        }
    }

    pub(super) fn submit(&mut self, choice: Choice) {
        let before = self.session.pending_jobs();
        if let Some(request) = self.session.apply(choice) {
            self.ops.dispatch(request);
        } else if self.session.pending_jobs() != before {
            // A skip moved on to the next entry.
            self.current_selection_idx = 0;
        }
    }

    pub(super) fn move_selection(&mut self, delta: i32) {
        let len = self.items().len();
        if len == 0 {
            return;
        }
        self.current_selection_idx =
            (self.current_selection_idx as i32 + delta).rem_euclid(len as i32) as usize;
    }

    pub(super) fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            if key_event.code == KeyCode::Char('c') {
                self.quit = true;
            }
            return;
        }

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Enter => {
                if let Some(item) = self.items().get(self.current_selection_idx) {
                    self.submit(item.choice);
                }
            }
            KeyCode::Char(c) => {
                if let Some(choice) = Choice::from_letter(c.to_ascii_lowercase()) {
                    self.submit(choice);
                }
            }
            _ => {}
        }
    }
}
