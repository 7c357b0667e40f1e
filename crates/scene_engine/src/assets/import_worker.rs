//! Background import jobs
//!
//! Parsing and model construction can take long enough to hitch the frame
//! loop, so imports run on a worker thread and hand the finished model back
//! over a channel. The frame loop polls with [`ImportJob::try_take`] and
//! never blocks.

use crate::assets::import_data::SceneDocument;
use crate::assets::{model_builder, scene_loader, ImportError};
use crate::scene::Model;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// A scene import running on a worker thread
pub struct ImportJob {
    receiver: Receiver<Result<Model, ImportError>>,
    cancel: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ImportJob {
    /// Spawn a worker that loads and builds the scene file at `path`
    pub fn spawn_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::spawn(move || scene_loader::load_document(&path))
    }

    /// Spawn a worker around an arbitrary document producer
    ///
    /// Cancellation is checked between producing the document and building
    /// the model; a producer that has already finished still yields a
    /// [`ImportError::Cancelled`] result if the job was cancelled first.
    pub fn spawn<F>(load: F) -> Self
    where
        F: FnOnce() -> Result<SceneDocument, ImportError> + Send + 'static,
    {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let (sender, receiver) = mpsc::channel();
        let handle = thread::spawn(move || {
            let result = (|| {
                let document = load()?;
                if flag.load(Ordering::Acquire) {
                    return Err(ImportError::Cancelled);
                }
                model_builder::build_model(document)
            })();
            // The receiving side may have been dropped; nothing to do then.
            let _ = sender.send(result);
        });
        Self {
            receiver,
            cancel,
            handle: Some(handle),
        }
    }

    /// Ask the worker to abandon the import
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    /// Non-blocking poll; yields the result at most once
    pub fn try_take(&mut self) -> Option<Result<Model, ImportError>> {
        let handle = self.handle.take()?;
        match self.receiver.try_recv() {
            Ok(result) => {
                let _ = handle.join();
                Some(result)
            }
            Err(TryRecvError::Empty) => {
                self.handle = Some(handle);
                None
            }
            Err(TryRecvError::Disconnected) => {
                let _ = handle.join();
                Some(Err(ImportError::WorkerLost))
            }
        }
    }

    /// Block until the worker finishes and return its result
    pub fn wait(mut self) -> Result<Model, ImportError> {
        let result = self
            .receiver
            .recv()
            .map_err(|_| ImportError::WorkerLost)?;
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::import_data::DocumentNode;
    use std::time::Duration;

    fn empty_scene() -> SceneDocument {
        SceneDocument {
            root: Some(DocumentNode::new("root")),
            ..SceneDocument::default()
        }
    }

    #[test]
    fn delivers_a_built_model() {
        let job = ImportJob::spawn(|| Ok(empty_scene()));
        let model = job.wait().unwrap();
        assert_eq!(model.nodes.len(), 1);
    }

    #[test]
    fn try_take_yields_once() {
        let mut job = ImportJob::spawn(|| Ok(empty_scene()));
        let mut result = None;
        for _ in 0..500 {
            result = job.try_take();
            if result.is_some() {
                break;
            }
            thread::sleep(Duration::from_millis(1));
        }
        assert!(matches!(result, Some(Ok(_))));
        assert!(job.try_take().is_none());
    }

    #[test]
    fn cancel_before_build_is_observed() {
        let (gate_tx, gate_rx) = mpsc::channel::<()>();
        let job = ImportJob::spawn(move || {
            // Hold the worker inside the loader until the test has cancelled.
            let _ = gate_rx.recv();
            Ok(empty_scene())
        });
        job.cancel();
        gate_tx.send(()).unwrap();
        assert!(matches!(job.wait(), Err(ImportError::Cancelled)));
    }

    #[test]
    fn loader_errors_pass_through() {
        let job = ImportJob::spawn(|| Err(ImportError::Parse("bad token".to_string())));
        assert!(matches!(job.wait(), Err(ImportError::Parse(_))));
    }
}
