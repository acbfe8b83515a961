use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use tracing::info_span;

use super::{Communicator, Message};
use crate::utils::error::{Error, Result};

/// One rank of an in-process world, connected to every rank by a channel of
/// its own in each direction.
pub struct LocalComm {
    rank: usize,
    outboxes: Vec<Sender<Message>>,
    inboxes: Vec<Receiver<Message>>,
}

impl Communicator for LocalComm {
    fn rank(&self) -> usize {
        self.rank
    }
    fn size(&self) -> usize {
        self.outboxes.len()
    }
    fn send(&self, dest: usize, message: Message) -> Result<()> {
        debug_assert!(dest < self.size());
        self.outboxes[dest].send(message)
            .map_err(|_| Error::Disconnected(dest))
    }
    fn recv(&self, src: usize) -> Result<Message> {
        debug_assert!(src < self.size());
        self.inboxes[src].recv()
            .map_err(|_| Error::Disconnected(src))
    }
}

/// Connects `size` ranks pairwise. A rank that drops its `LocalComm` is seen as
/// disconnected by every peer that later talks to it.
pub fn world(size: usize) -> Vec<LocalComm> {
    let mut inboxes: Vec<Vec<Receiver<Message>>> = (0..size)
        .map(|_| Vec::with_capacity(size))
        .collect();
    let outboxes: Vec<Vec<Sender<Message>>> = (0..size)
        .map(|_| (0..size)
            .map(|dest| {
                let (sender, receiver) = mpsc::channel();
                inboxes[dest].push(receiver);
                sender
            })
            .collect())
        .collect();
    outboxes.into_iter()
        .zip(inboxes)
        .enumerate()
        .map(|(rank, (outboxes, inboxes))| LocalComm { rank, outboxes, inboxes })
        .collect()
}

/// Runs `worker` once per rank, each on its own thread, and returns the
/// outputs in rank order. When ranks fail, the error reported is the first one
/// that is not merely a disconnection caused by another rank failing.
pub fn launch<T, F>(size: usize, worker: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(LocalComm) -> Result<T> + Sync,
{
    let results = thread::scope(|scope| -> Result<Vec<Result<T>>> {
        let mut handles = Vec::with_capacity(size);
        for comm in world(size) {
            let rank = comm.rank();
            let worker = &worker;
            let handle = thread::Builder::new()
                .name(format!("rank-{}", rank))
                .spawn_scoped(scope, move || {
                    let _span = info_span!("rank", rank).entered();
                    worker(comm)
                })
                .map_err(Error::Spawn)?;
            handles.push(handle);
        }
        Ok(handles.into_iter()
            .enumerate()
            .map(|(rank, handle)| handle.join()
                .unwrap_or_else(|_| Err(Error::WorkerPanicked(rank))))
            .collect())
    })?;

    let mut outputs = Vec::with_capacity(size);
    let mut errors = vec![];
    for result in results {
        match result {
            Ok(output) => outputs.push(output),
            Err(err) => errors.push(err),
        }
    }
    if errors.is_empty() {
        return Ok(outputs);
    }
    let cause = errors.iter()
        .position(|err| !matches!(err, Error::Disconnected(_)))
        .unwrap_or(0);
    Err(errors.swap_remove(cause))
}
