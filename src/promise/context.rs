use std::sync::Arc;
use std::thread::{self, ThreadId};

use may::sync::mpsc;

/// Unit of work delivered to an execution context.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Capability describing the designated delivery context.
///
/// Injected into every [`Promise`](super::Promise) rather than looked up
/// through a global, so the channel logic stays context-agnostic and
/// testable with a fake.
pub trait ExecutionContext: Send + Sync {
    /// True when the calling thread is the context's designated thread.
    fn is_current(&self) -> bool;
    /// Queue a task for later execution on the designated thread.
    /// Must not block the caller.
    fn post(&self, task: Task);
}

/// Run `task` on `ctx`: inline when already on the designated thread,
/// otherwise posted to the context's queue.
pub fn run_on(ctx: &dyn ExecutionContext, task: Task) {
    if ctx.is_current() {
        task();
    } else {
        ctx.post(task);
    }
}

/// Standard [`ExecutionContext`] bound to the thread that created it.
///
/// Settlements arriving from other threads land on a channel; the owning
/// thread drives them through the paired [`TaskPump`].
pub struct MainLoop {
    owner: ThreadId,
    tx: mpsc::Sender<Task>,
}

impl MainLoop {
    /// Bind a main loop to the current thread. Call this on the thread
    /// that will drain the pump.
    #[must_use]
    pub fn bind() -> (Arc<Self>, TaskPump) {
        let (tx, rx) = mpsc::channel();
        let ctx = Arc::new(MainLoop {
            owner: thread::current().id(),
            tx,
        });
        (ctx, TaskPump { rx })
    }
}

impl ExecutionContext for MainLoop {
    fn is_current(&self) -> bool {
        thread::current().id() == self.owner
    }

    fn post(&self, task: Task) {
        // Receiver dropped means the loop is gone; late deliveries are
        // allowed to vanish, matching the channel's no-op tolerance.
        let _ = self.tx.send(task);
    }
}

/// Receiving half of a [`MainLoop`]; owned by the designated thread.
pub struct TaskPump {
    rx: mpsc::Receiver<Task>,
}

impl TaskPump {
    /// Execute every queued task, returning how many ran.
    pub fn drain(&self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            ran += 1;
        }
        ran
    }

    /// Block for the next task and execute it. Returns false once every
    /// sender is gone.
    pub fn run_one(&self) -> bool {
        match self.rx.recv() {
            Ok(task) => {
                task();
                true
            }
            Err(_) => false,
        }
    }
}
