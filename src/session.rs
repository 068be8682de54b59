//! Decision engine: turns the top pending job into a prompt and turns the
//! user's answer into stack mutations plus the next filesystem request.

use crate::error::OpError;
use crate::gateway::{Listing, OpEvent, Request};
use crate::job_stack::{JobKind, JobStack};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    No,
    Yes,
    Completely,
    Ask,
}

impl Choice {
    pub fn from_letter(letter: char) -> Option<Choice> {
        match letter {
            'n' => Some(Choice::No),
            'y' => Some(Choice::Yes),
            'c' => Some(Choice::Completely),
            'a' => Some(Choice::Ask),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Choice::No => "(N)o",
            Choice::Yes => "(Y)es",
            Choice::Completely => "(C)ompletely",
            Choice::Ask => "(A)sk",
        }
    }
}

const FILE_CHOICES: &[Choice] = &[Choice::No, Choice::Yes];
const FOLDER_CHOICES: &[Choice] = &[Choice::No, Choice::Completely, Choice::Ask];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub choices: &'static [Choice],
}

/// What the outstanding operation will do to the stack once it reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    /// Listing of the source root itself; nothing to pop.
    RootListing,
    /// Listing of the directory on top; it is replaced by its children.
    Expand,
    /// Copy of the job on top; it is popped.
    Copy,
}

#[derive(Debug)]
pub enum Phase<'a> {
    Deciding,
    Waiting,
    Done,
    Failed(&'a OpError),
}

pub struct Session {
    source: PathBuf,
    stack: JobStack,
    pending: Option<Pending>,
    error: Option<OpError>,
    done: bool,
}

impl Session {
    pub fn new(source: PathBuf) -> Self {
        Session {
            source,
            stack: JobStack::new(),
            pending: None,
            error: None,
            done: false,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The initial listing of the source root. Returns `None` if the session
    /// already started.
    pub fn start(&mut self) -> Option<Request> {
        if self.pending.is_some() || self.done || self.error.is_some() || !self.stack.is_empty() {
            return None;
        }
        self.pending = Some(Pending::RootListing);
        Some(Request::List(PathBuf::new()))
    }

    pub fn phase(&self) -> Phase<'_> {
        if let Some(err) = &self.error {
            Phase::Failed(err)
        } else if self.done {
            Phase::Done
        } else if self.pending.is_some() {
            Phase::Waiting
        } else {
            Phase::Deciding
        }
    }

    pub fn pending_jobs(&self) -> usize {
        self.stack.len()
    }

    /// Prompt for the top job. While an operation is in flight this is still
    /// the prompt that was shown when it was issued.
    pub fn prompt(&self) -> Option<Prompt> {
        if self.done || self.error.is_some() {
            return None;
        }
        let job = self.stack.peek()?;
        let rel = job.relative_path();
        let prompt = match job.kind {
            JobKind::Directory => Prompt {
                title: format!("Do you want to copy folder {}?", rel.display()),
                choices: FOLDER_CHOICES,
            },
            JobKind::File => Prompt {
                title: format!("Do you want to copy file {}?", rel.display()),
                choices: FILE_CHOICES,
            },
        };
        Some(prompt)
    }

    /// Applies an answer to the top job. Returns the request to dispatch, if
    /// the answer needs one. Answers that do not fit the top job, or arrive
    /// while an operation is in flight, are ignored.
    pub fn apply(&mut self, choice: Choice) -> Option<Request> {
        if self.pending.is_some() || self.done || self.error.is_some() {
            tracing::debug!(?choice, "ignoring choice, session busy or finished");
            return None;
        }
        let job = self.stack.peek()?;
        let rel = job.relative_path();
        tracing::debug!(?choice, path = %rel.display(), "applying choice");

        match (choice, job.kind) {
            (Choice::No, _) => {
                self.stack.pop();
                self.settle();
                None
            }
            (Choice::Yes, JobKind::File) | (Choice::Completely, JobKind::Directory) => {
                self.pending = Some(Pending::Copy);
                Some(Request::Copy(rel))
            }
            (Choice::Ask, JobKind::Directory) => {
                self.pending = Some(Pending::Expand);
                Some(Request::List(rel))
            }
            _ => {
                tracing::debug!(?choice, "choice does not apply to this entry");
                None
            }
        }
    }

    /// Feeds back the result of the outstanding operation.
    pub fn handle(&mut self, event: OpEvent) {
        let Some(pending) = self.pending.take() else {
            tracing::warn!(?event, "operation result with nothing in flight");
            return;
        };

        match (pending, event) {
            (_, OpEvent::Failed(err)) => {
                tracing::error!(error = %err, "operation failed");
                self.error = Some(err);
            }
            (Pending::RootListing, OpEvent::Listed(listing)) => {
                self.push_listing(listing);
                self.settle();
            }
            (Pending::Expand, OpEvent::Listed(listing)) => {
                self.stack.pop();
                self.push_listing(listing);
                self.settle();
            }
            (Pending::Copy, OpEvent::Copied(rel)) => {
                tracing::info!(path = %rel.display(), "copied");
                self.stack.pop();
                self.settle();
            }
            (pending, event) => {
                tracing::warn!(?pending, ?event, "result does not match the operation in flight");
                self.pending = Some(pending);
            }
        }
    }

    fn push_listing(&mut self, listing: Listing) {
        tracing::debug!(
            parent = %listing.parent.display(),
            entries = listing.entries.len(),
            "pushing listed entries"
        );
        self.stack.push_listing(
            &listing.parent,
            listing.entries.into_iter().map(|e| (e.name, e.kind)),
        );
    }

    fn settle(&mut self) {
        if self.stack.is_empty() {
            tracing::info!("nothing left to decide");
            self.done = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_scanner::ScannedEntry;
    use std::io;

    fn file(name: &str) -> ScannedEntry {
        ScannedEntry {
            name: name.into(),
            kind: JobKind::File,
        }
    }

    fn dir(name: &str) -> ScannedEntry {
        ScannedEntry {
            name: name.into(),
            kind: JobKind::Directory,
        }
    }

    fn listed(parent: &str, entries: Vec<ScannedEntry>) -> OpEvent {
        OpEvent::Listed(Listing {
            parent: PathBuf::from(parent),
            entries,
        })
    }

    fn started(root: Vec<ScannedEntry>) -> Session {
        let mut session = Session::new(PathBuf::from("/src"));
        assert_eq!(session.start(), Some(Request::List(PathBuf::new())));
        assert!(matches!(session.phase(), Phase::Waiting));
        session.handle(listed("", root));
        session
    }

    fn title(session: &Session) -> String {
        session.prompt().map(|p| p.title).unwrap_or_default()
    }

    #[test]
    fn single_file_copied_then_done() {
        let mut session = started(vec![file("a.txt")]);

        let prompt = session.prompt().unwrap();
        assert_eq!(prompt.title, "Do you want to copy file a.txt?");
        assert_eq!(prompt.choices, [Choice::No, Choice::Yes]);

        let request = session.apply(Choice::Yes);
        assert_eq!(request, Some(Request::Copy(PathBuf::from("a.txt"))));
        assert!(matches!(session.phase(), Phase::Waiting));
        assert_eq!(session.pending_jobs(), 1);

        session.handle(OpEvent::Copied(PathBuf::from("a.txt")));
        assert!(matches!(session.phase(), Phase::Done));
        assert!(session.prompt().is_none());
    }

    #[test]
    fn ask_replaces_folder_with_its_children() {
        let mut session = started(vec![dir("d")]);

        let prompt = session.prompt().unwrap();
        assert_eq!(prompt.title, "Do you want to copy folder d?");
        assert_eq!(prompt.choices, [Choice::No, Choice::Completely, Choice::Ask]);

        assert_eq!(
            session.apply(Choice::Ask),
            Some(Request::List(PathBuf::from("d")))
        );
        session.handle(listed("d", vec![file("x.txt"), file("y.txt")]));

        assert_eq!(session.pending_jobs(), 2);
        assert_eq!(title(&session), "Do you want to copy file d/y.txt?");
        let top = session.stack.peek().unwrap();
        assert_eq!(top.parent, PathBuf::from("d"));

        session.apply(Choice::No);
        assert_eq!(title(&session), "Do you want to copy file d/x.txt?");
    }

    #[test]
    fn later_listed_sibling_is_asked_first() {
        let mut session = started(vec![file("a"), file("b")]);
        assert_eq!(title(&session), "Do you want to copy file b?");
        session.apply(Choice::No);
        assert_eq!(title(&session), "Do you want to copy file a?");
    }

    #[test]
    fn declining_everything_never_copies() {
        let mut session = started(vec![dir("d"), file("a"), dir("e")]);
        let mut requests = Vec::new();

        while matches!(session.phase(), Phase::Deciding) {
            if let Some(request) = session.apply(Choice::No) {
                requests.push(request);
            }
        }

        assert!(requests.is_empty());
        assert!(matches!(session.phase(), Phase::Done));
        assert_eq!(session.pending_jobs(), 0);
    }

    #[test]
    fn completely_copies_whole_folder() {
        let mut session = started(vec![file("a"), dir("d")]);
        assert_eq!(
            session.apply(Choice::Completely),
            Some(Request::Copy(PathBuf::from("d")))
        );
        session.handle(OpEvent::Copied(PathBuf::from("d")));
        assert_eq!(title(&session), "Do you want to copy file a?");
    }

    #[test]
    fn choices_for_the_wrong_kind_are_ignored() {
        let mut session = started(vec![file("a"), dir("d")]);

        assert_eq!(session.apply(Choice::Yes), None);
        assert!(matches!(session.phase(), Phase::Deciding));

        session.apply(Choice::No);
        assert_eq!(session.apply(Choice::Completely), None);
        assert_eq!(session.apply(Choice::Ask), None);
        assert_eq!(title(&session), "Do you want to copy file a?");
    }

    #[test]
    fn only_one_operation_in_flight() {
        let mut session = started(vec![file("a"), file("b")]);

        assert!(session.apply(Choice::Yes).is_some());
        let shown = session.prompt();

        assert_eq!(session.apply(Choice::Yes), None);
        assert_eq!(session.apply(Choice::No), None);
        assert_eq!(session.prompt(), shown);
        assert_eq!(session.pending_jobs(), 2);

        session.handle(OpEvent::Copied(PathBuf::from("b")));
        assert_eq!(title(&session), "Do you want to copy file a?");
    }

    #[test]
    fn prompt_is_stable_without_mutation() {
        let session = started(vec![dir("d")]);
        assert_eq!(session.prompt(), session.prompt());
    }

    #[test]
    fn failed_listing_stops_the_session() {
        let mut session = started(vec![file("a"), dir("locked")]);
        session.apply(Choice::Ask);

        session.handle(OpEvent::Failed(OpError::Enumeration {
            path: PathBuf::from("/src/locked"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        }));

        match session.phase() {
            Phase::Failed(err) => assert!(err.to_string().contains("permission denied")),
            other => panic!("unexpected phase: {other:?}"),
        }
        assert!(session.prompt().is_none());
        assert_eq!(session.apply(Choice::No), None);
        assert_eq!(session.pending_jobs(), 2);
    }

    #[test]
    fn failed_copy_stops_the_session() {
        let mut session = started(vec![file("a")]);
        session.apply(Choice::Yes);
        session.handle(OpEvent::Failed(OpError::Copy {
            from: PathBuf::from("/src/a"),
            to: PathBuf::from("/dst/a"),
            source: io::Error::other("disk full"),
        }));
        assert!(matches!(session.phase(), Phase::Failed(_)));
        assert_eq!(session.apply(Choice::Yes), None);
    }

    #[test]
    fn empty_root_is_done_immediately() {
        let session = started(Vec::new());
        assert!(matches!(session.phase(), Phase::Done));
    }

    #[test]
    fn unreadable_root_fails() {
        let mut session = Session::new(PathBuf::from("/nope"));
        session.start();
        session.handle(OpEvent::Failed(OpError::Enumeration {
            path: PathBuf::from("/nope"),
            source: io::Error::from(io::ErrorKind::NotFound),
        }));
        assert!(matches!(session.phase(), Phase::Failed(_)));
        assert_eq!(session.start(), None);
    }

    #[test]
    fn empty_folder_expansion_moves_on() {
        let mut session = started(vec![file("a"), dir("empty")]);
        session.apply(Choice::Ask);
        session.handle(listed("empty", Vec::new()));
        assert_eq!(title(&session), "Do you want to copy file a?");
    }

    #[test]
    fn stray_results_are_ignored() {
        let mut session = started(vec![file("a")]);
        session.handle(OpEvent::Copied(PathBuf::from("a")));
        assert_eq!(session.pending_jobs(), 1);
        assert!(matches!(session.phase(), Phase::Deciding));
    }

    #[test]
    fn letters_map_to_choices() {
        assert_eq!(Choice::from_letter('y'), Some(Choice::Yes));
        assert_eq!(Choice::from_letter('n'), Some(Choice::No));
        assert_eq!(Choice::from_letter('c'), Some(Choice::Completely));
        assert_eq!(Choice::from_letter('a'), Some(Choice::Ask));
        assert_eq!(Choice::from_letter('x'), None);
    }

    #[cfg(unix)]
    #[test]
    fn copy_request_keeps_raw_name_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"caf\xe9.txt");
        let mut session = started(vec![ScannedEntry {
            name: name.to_os_string(),
            kind: JobKind::File,
        }]);

        assert!(title(&session).starts_with("Do you want to copy file caf"));
        assert_eq!(
            session.apply(Choice::Yes),
            Some(Request::Copy(PathBuf::from(name)))
        );
    }
}
