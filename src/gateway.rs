//! Runs filesystem operations off the decision thread.
//!
//! Every dispatched [`Request`] runs on its own worker thread and sends exactly
//! one [`OpEvent`] back over the gateway's channel. The decision thread picks
//! the events up with [`Gateway::try_next`] between input polls.

use crate::error::OpError;
use crate::file_copier::copy_path;
use crate::file_scanner::{ScannedEntry, scan_dir};
use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// An operation the decision engine wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// List the folder at this path relative to the source root.
    List(PathBuf),
    /// Copy this relative path from the source root to the destination root.
    Copy(PathBuf),
}

#[derive(Debug)]
pub struct Listing {
    pub parent: PathBuf,
    pub entries: Vec<ScannedEntry>,
}

#[derive(Debug)]
pub enum OpEvent {
    Listed(Listing),
    Copied(PathBuf),
    Failed(OpError),
}

pub struct Gateway {
    source_root: PathBuf,
    dest_root: PathBuf,
    tx: Sender<OpEvent>,
    rx: Receiver<OpEvent>,
    // Worker of the most recent request. The session never has two in flight.
    worker: RefCell<Option<JoinHandle<()>>>,
}

impl Gateway {
    pub fn new(source_root: PathBuf, dest_root: PathBuf) -> Self {
        let (tx, rx) = mpsc::channel();
        Gateway {
            source_root,
            dest_root,
            tx,
            rx,
            worker: RefCell::new(None),
        }
    }

    pub fn dispatch(&self, request: Request) {
        tracing::debug!(?request, "dispatching operation");
        let source_root = self.source_root.clone();
        let dest_root = self.dest_root.clone();
        let tx = self.tx.clone();

        let handle = thread::spawn(move || {
            let event = match request {
                Request::List(parent) => match scan_dir(&source_root, &parent) {
                    Ok(entries) => OpEvent::Listed(Listing { parent, entries }),
                    Err(e) => OpEvent::Failed(e),
                },
                Request::Copy(rel) => {
                    match copy_path(&source_root.join(&rel), &dest_root.join(&rel)) {
                        Ok(()) => OpEvent::Copied(rel),
                        Err(e) => OpEvent::Failed(e),
                    }
                }
            };
            // The receiver only goes away when the UI has already quit.
            let _ = tx.send(event);
        });
        self.worker.replace(Some(handle));
    }

    /// Blocks until the last dispatched operation has run to completion, so
    /// quitting never leaves a copy half done.
    pub fn finish(self) {
        let Some(handle) = self.worker.into_inner() else {
            return;
        };
        if !handle.is_finished() {
            tracing::info!("waiting for the running operation before exit");
            eprintln!("Waiting for the running operation to finish...");
        }
        if handle.join().is_err() {
            tracing::error!("operation worker panicked");
        }
    }

    /// Next finished operation, if any. Never blocks.
    pub fn try_next(&self) -> Option<OpEvent> {
        self.rx.try_recv().ok()
    }

    #[cfg(test)]
    pub fn wait_next(&self, timeout: std::time::Duration) -> Option<OpEvent> {
        self.rx.recv_timeout(timeout).ok()
    }
}
