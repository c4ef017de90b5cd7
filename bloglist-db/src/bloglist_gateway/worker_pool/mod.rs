use crate::bloglist_engine::storage_core::BlogListStorage;
use crate::protocol::{BlogListError, Response};
use flume::{Receiver, Sender};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio::sync::oneshot;
use tracing::{error, trace};

type Job = Box<dyn FnOnce(&BlogListStorage) + Send + 'static>;

/// A Thread Pool of workers to execute Database operations
///
/// LMDB transactions are blocking, so they run here instead of on the async runtime.
pub struct WorkerPool {
    tx: Option<Sender<Job>>,
    workers: Vec<Worker>,
}

impl WorkerPool {
    pub fn new(num_workers: usize, storage: Arc<BlogListStorage>) -> WorkerPool {
        let (tx, rx) = flume::bounded::<Job>(1000);

        let workers = (0..num_workers.max(1))
            .map(|id| Worker::start(id, rx.clone(), Arc::clone(&storage)))
            .collect();

        WorkerPool {
            tx: Some(tx),
            workers,
        }
    }

    pub fn num_workers(&self) -> usize {
        self.workers.len()
    }

    /// Runs `f` against the storage on a worker thread and waits for its result
    pub async fn process<F>(&self, f: F) -> Result<Response, BlogListError>
    where
        F: FnOnce(&BlogListStorage) -> Result<Response, BlogListError> + Send + 'static,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        let job: Job = Box::new(move |storage| {
            // the receiver is gone if the client disconnected
            let _ = ret_tx.send(f(storage));
        });

        let tx = self.tx.as_ref().ok_or(BlogListError::WorkerPoolClosed)?;
        tx.send_async(job)
            .await
            .map_err(|_| BlogListError::WorkerPoolClosed)?;

        // dropped without a reply only if the job panicked
        ret_rx.await.map_err(|_| BlogListError::WorkerPoolClosed)?
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // closing the channel ends every worker loop
        drop(self.tx.take());
        for worker in self.workers.drain(..) {
            if worker.handle.join().is_err() {
                error!(id = worker.id, "Worker thread panicked");
            }
        }
    }
}

struct Worker {
    id: usize,
    handle: JoinHandle<()>,
}

impl Worker {
    fn start(id: usize, rx: Receiver<Job>, storage: Arc<BlogListStorage>) -> Worker {
        let handle = std::thread::spawn(move || {
            trace!(id, "thread started");

            while let Ok(job) = rx.recv() {
                if catch_unwind(AssertUnwindSafe(|| job(storage.as_ref()))).is_err() {
                    error!(id, "Job panicked");
                }
            }

            trace!(id, "thread shutting down");
        });
        Worker { id, handle }
    }
}
