//! Presentation executors.
//!
//! Only the presentation executor may touch visual state. The state
//! machine never calls a target directly: it posts a task here and waits
//! for the target to signal completion.

use std::sync::{Arc, OnceLock};
use std::thread::{self, JoinHandle, ThreadId};
use tokio::sync::mpsc;
use tracing::warn;

/// Unit of presentation work.
pub type PresentationTask = Box<dyn FnOnce() + Send + 'static>;

/// Executor that runs presentation work in submission order.
///
/// Implementations must run tasks one at a time and in the order they
/// were posted. A task that cannot be run must be dropped, never run on
/// another context.
pub trait PresentationExecutor: Send + Sync + 'static {
    fn post(&self, task: PresentationTask);
}

impl<E: PresentationExecutor + ?Sized> PresentationExecutor for Arc<E> {
    fn post(&self, task: PresentationTask) {
        (**self).post(task)
    }
}

/// Create a presentation loop and a handle posting to it.
///
/// The loop runs on whichever thread calls [`PresentationLoop::run`] or
/// [`PresentationLoop::run_pending`]; that thread becomes the
/// presentation thread.
pub fn presentation_loop() -> (PresentationHandle, PresentationLoop) {
    let (tasks, receiver) = mpsc::unbounded_channel();
    let thread = Arc::new(OnceLock::new());
    (
        PresentationHandle {
            tasks,
            thread: Arc::clone(&thread),
        },
        PresentationLoop { receiver, thread },
    )
}

/// Cloneable handle posting tasks to a [`PresentationLoop`].
#[derive(Clone)]
pub struct PresentationHandle {
    tasks: mpsc::UnboundedSender<PresentationTask>,
    thread: Arc<OnceLock<ThreadId>>,
}

impl PresentationHandle {
    /// Whether the caller runs on the thread driving the loop.
    pub fn is_presentation_thread(&self) -> bool {
        self.thread.get() == Some(&thread::current().id())
    }

    /// Whether the loop has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tasks.is_closed()
    }
}

impl PresentationExecutor for PresentationHandle {
    fn post(&self, task: PresentationTask) {
        if self.tasks.send(task).is_err() {
            warn!("presentation loop has stopped, dropping task");
        }
    }
}

/// Receiving side of a presentation loop.
pub struct PresentationLoop {
    receiver: mpsc::UnboundedReceiver<PresentationTask>,
    thread: Arc<OnceLock<ThreadId>>,
}

impl PresentationLoop {
    /// Run tasks until every handle has been dropped.
    ///
    /// Blocks the current thread; must not be called from within an
    /// async context.
    pub fn run(mut self) {
        self.claim_thread();
        while let Some(task) = self.receiver.blocking_recv() {
            task();
        }
    }

    /// Run every task that is already queued and return how many ran.
    pub fn run_pending(&mut self) -> usize {
        self.claim_thread();
        let mut ran = 0;
        while let Ok(task) = self.receiver.try_recv() {
            task();
            ran += 1;
        }
        ran
    }

    fn claim_thread(&self) {
        let _ = self.thread.set(thread::current().id());
    }
}

/// Dedicated OS thread driving a presentation loop.
///
/// The thread exits once every handle, including the one held here, has
/// been dropped.
pub struct PresentationThread {
    handle: PresentationHandle,
    join: JoinHandle<()>,
}

impl PresentationThread {
    pub fn spawn(name: impl Into<String>) -> std::io::Result<Self> {
        let (handle, presentation) = presentation_loop();
        let join = thread::Builder::new()
            .name(name.into())
            .spawn(move || presentation.run())?;
        Ok(Self { handle, join })
    }

    pub fn handle(&self) -> PresentationHandle {
        self.handle.clone()
    }

    pub fn thread_name(&self) -> Option<&str> {
        self.join.thread().name()
    }
}

impl PresentationExecutor for PresentationThread {
    fn post(&self, task: PresentationTask) {
        self.handle.post(task)
    }
}
