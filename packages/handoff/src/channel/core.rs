// minimal synchronized core of the channel. the exposed API is a convenience wrapper around this.

use super::error::*;
use std::{
    collections::VecDeque,
    sync::{
        atomic::{
            Ordering::{Acquire, Release},
            AtomicBool,
        },
        Arc,
        Condvar,
        Mutex,
    },
    time::Instant,
};


// deadline for blocking inside a channel operation.
#[derive(Debug, Copy, Clone)]
pub(crate) enum Timeout {
    // never time out.
    Never,
    // time out at the given deadline.
    At(Instant),
    // time out if the operation cannot be resolved without blocking.
    NonBlocking,
}

// handle to a channel.
pub(crate) struct Channel<T>(Arc<Shared<T>>);

// channel shared state.
struct Shared<T> {
    // mutex around lockable state.
    lockable: Mutex<Lockable<T>>,

    // buffer capacity, fixed at construction. zero means rendezvous.
    capacity: usize,

    // begins as false. flips to true at most once, when the channel is closed. never reverts.
    //
    // - readable without the lock, so is_closed and the close store itself are lock-free.
    // - send and recv make decisions against it only while holding the lock.
    closed: AtomicBool,

    // senders block here while their wait condition is unmet.
    send_cond: Condvar,
    // receivers block here while the buffer is empty.
    recv_cond: Condvar,
}

// channel lockable state.
struct Lockable<T> {
    // storage for buffered elements, FIFO. for a rendezvous channel this holds at most one
    // element, transiently, mid-hand-off.
    elems: VecDeque<T>,
    // number of receivers currently inside recv. the rendezvous send condition reads it.
    recv_waiting: usize,
}

impl<T> Channel<T> {
    // construct an open, empty channel.
    pub(crate) fn new(capacity: usize) -> Self {
        trace!(capacity, "channel created");
        Channel(Arc::new(Shared {
            lockable: Mutex::new(Lockable {
                elems: VecDeque::with_capacity(capacity),
                recv_waiting: 0,
            }),
            capacity,
            closed: AtomicBool::new(false),
            send_cond: Condvar::new(),
            recv_cond: Condvar::new(),
        }))
    }

    // clone another handle to the channel.
    pub(crate) fn clone(&self) -> Self {
        Channel(Arc::clone(&self.0))
    }

    // atomic-read the closed flag.
    pub(crate) fn is_closed(&self) -> bool {
        self.0.closed.load(Acquire)
    }

    pub(crate) fn capacity(&self) -> usize {
        self.0.capacity
    }

    // number of currently buffered elements.
    pub(crate) fn len(&self) -> usize {
        self.0.lockable.lock().unwrap().elems.len()
    }

    // block until the send condition is met or the timeout is reached, then enqueue the message.
    //
    // the send condition is: room in the buffer (capacity > 0), or a receiver waiting on an
    // empty buffer (capacity == 0). the closed flag wins every (re-)evaluation: a send that
    // raced with a close fails and hands the message back, even if the condition also became
    // true at the same wake-up.
    pub(crate) fn send(&self, msg: T, timeout: Timeout) -> Result<(), (T, TrySendErrorCause)> {
        let shared = &self.0;
        let mut lock = shared.lockable.lock().unwrap();

        // mirror of recv's wake-at-entry
        shared.recv_cond.notify_all();

        loop {
            if shared.closed.load(Acquire) {
                return Err((msg, ClosedError.into()));
            }
            let ready = if shared.capacity == 0 {
                lock.recv_waiting > 0 && lock.elems.is_empty()
            } else {
                lock.elems.len() < shared.capacity
            };
            if ready {
                break;
            }
            match timeout {
                Timeout::Never => lock = shared.send_cond.wait(lock).unwrap(),
                Timeout::At(deadline) => {
                    let Some(duration) = deadline.checked_duration_since(Instant::now()) else {
                        return Err((msg, WouldBlockError.into()));
                    };
                    lock = shared.send_cond.wait_timeout(lock, duration).unwrap().0;
                }
                Timeout::NonBlocking => return Err((msg, WouldBlockError.into())),
            }
        }

        lock.elems.push_back(msg);
        drop(lock);
        shared.recv_cond.notify_all();
        Ok(())
    }

    // block until an element is available or the timeout is reached, then dequeue it.
    //
    // closing wins over draining: once the channel is closed, recv fails even if elements are
    // still buffered, and those elements stay unreachable.
    pub(crate) fn recv(&self, timeout: Timeout) -> Result<T, TryRecvError> {
        let shared = &self.0;
        let mut lock = shared.lockable.lock().unwrap();

        lock.recv_waiting += 1;
        // a rendezvous sender's condition may just have become true
        shared.send_cond.notify_all();

        let result = loop {
            if shared.closed.load(Acquire) {
                break Err(ClosedError.into());
            }
            if let Some(msg) = lock.elems.pop_front() {
                break Ok(msg);
            }
            match timeout {
                Timeout::Never => lock = shared.recv_cond.wait(lock).unwrap(),
                Timeout::At(deadline) => {
                    let Some(duration) = deadline.checked_duration_since(Instant::now()) else {
                        break Err(WouldBlockError.into());
                    };
                    lock = shared.recv_cond.wait_timeout(lock, duration).unwrap().0;
                }
                Timeout::NonBlocking => break Err(WouldBlockError.into()),
            }
        };

        lock.recv_waiting -= 1;
        drop(lock);
        shared.send_cond.notify_all();
        result
    }

    // close the channel. idempotent, and never blocks on a condition.
    pub(crate) fn close(&self) {
        let shared = &self.0;
        shared.closed.store(true, Release);
        // serialize with waiters' condition checks: a waiter between its check and its sleep
        // still holds the lock, so it cannot sleep through the store.
        drop(shared.lockable.lock().unwrap());
        shared.send_cond.notify_all();
        shared.recv_cond.notify_all();
        trace!("channel closed");
    }
}
