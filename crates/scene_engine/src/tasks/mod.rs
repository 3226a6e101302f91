//! Background task queue
//!
//! Generic expensive work (asset decoding, file scanning) runs on worker
//! threads; results come back over a channel and are drained on the main
//! thread once per frame. Workers never touch `Entity`, `Transform`, or
//! `RenderPool` state — those are single-writer structures owned by the
//! render thread.

use std::any::Any;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

/// Output of a background task, downcast by the consumer
pub type TaskOutput = Box<dyn Any + Send>;

/// A unit of background work
pub type Task = Box<dyn FnOnce() -> TaskOutput + Send>;

/// Worker pool with message-passing handoff to the main thread
pub struct TaskQueue {
    submit: Option<Sender<Task>>,
    results: Receiver<TaskOutput>,
    workers: Vec<JoinHandle<()>>,
}

impl TaskQueue {
    /// Spawn a pool sized to the machine's available parallelism
    pub fn new() -> Self {
        let parallelism = std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(2);
        Self::with_workers(parallelism.max(1))
    }

    /// Spawn a pool with an explicit worker count
    pub fn with_workers(count: usize) -> Self {
        let (submit, task_rx) = channel::<Task>();
        let (result_tx, results) = channel::<TaskOutput>();
        let task_rx = Arc::new(Mutex::new(task_rx));

        let mut workers = Vec::with_capacity(count.max(1));
        for index in 0..count.max(1) {
            let task_rx = Arc::clone(&task_rx);
            let result_tx = result_tx.clone();
            let spawned = std::thread::Builder::new()
                .name(format!("task-worker-{index}"))
                .spawn(move || loop {
                    let task = match task_rx.lock() {
                        Ok(guard) => guard.recv(),
                        // a sibling worker panicked mid-receive
                        Err(_) => break,
                    };
                    match task {
                        Ok(task) => {
                            let output = task();
                            if result_tx.send(output).is_err() {
                                break;
                            }
                        }
                        // queue dropped, pool is shutting down
                        Err(_) => break,
                    }
                });
            match spawned {
                Ok(handle) => workers.push(handle),
                Err(e) => log::error!("failed to spawn task worker {index}: {e}"),
            }
        }

        Self {
            submit: Some(submit),
            results,
            workers,
        }
    }

    /// Submit a task for background execution
    pub fn submit(&self, task: Task) {
        if let Some(submit) = &self.submit {
            if submit.send(task).is_err() {
                log::error!("task queue workers are gone; task dropped");
            }
        }
    }

    /// Drain all results completed so far (non-blocking)
    ///
    /// Call from the main thread; this is the only place task outputs
    /// cross back over.
    pub fn drain_completed(&self) -> Vec<TaskOutput> {
        let mut outputs = Vec::new();
        while let Ok(output) = self.results.try_recv() {
            outputs.push(output);
        }
        outputs
    }

    /// Number of worker threads
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TaskQueue {
    fn drop(&mut self) {
        // closing the channel wakes every worker out of recv
        self.submit.take();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}
