use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    File,
    Directory,
}

/// One undecided entry of the source tree.
#[derive(Debug)]
pub struct Job {
    /// Kept as the OS returned it; only the prompt renders it lossily.
    pub entry_name: OsString,
    pub kind: JobKind,
    /// Containing directory relative to the source root, empty for root-level entries.
    pub parent: PathBuf,
    previous: Option<Box<Job>>,
}

impl Job {
    pub fn new(parent: impl Into<PathBuf>, entry_name: impl Into<OsString>, kind: JobKind) -> Self {
        Job {
            entry_name: entry_name.into(),
            kind,
            parent: parent.into(),
            previous: None,
        }
    }

    pub fn relative_path(&self) -> PathBuf {
        self.parent.join(&self.entry_name)
    }
}

/// LIFO of pending jobs, kept as an owned chain so the walk can be suspended
/// between operations.
#[derive(Debug, Default)]
pub struct JobStack {
    top: Option<Box<Job>>,
    len: usize,
}

impl JobStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mut job: Job) {
        job.previous = self.top.take();
        self.top = Some(Box::new(job));
        self.len += 1;
    }

    /// Detaches the top job. The rest of the chain stays on the stack.
    pub fn pop(&mut self) -> Option<Job> {
        let mut job = self.top.take()?;
        self.top = job.previous.take();
        self.len -= 1;
        Some(*job)
    }

    pub fn peek(&self) -> Option<&Job> {
        self.top.as_deref()
    }

    /// Pushes one job per listed entry, in listing order.
    pub fn push_listing<I>(&mut self, parent: &Path, entries: I)
    where
        I: IntoIterator<Item = (OsString, JobKind)>,
    {
        for (name, kind) in entries {
            self.push(Job::new(parent, name, kind));
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }
}

impl Drop for JobStack {
    // Unlink iteratively; a deep tree can hold more jobs than the call stack
    // can drop recursively.
    fn drop(&mut self) {
        let mut next = self.top.take();
        while let Some(mut job) = next {
            next = job.previous.take();
        }
    }
}
