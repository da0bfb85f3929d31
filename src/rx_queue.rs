//! Receive queue between a UART interrupt and the cooperative loop.
//!
//! The interrupt side pushes received bytes, the loop drains them through
//! [`SerialInput`]. Access is guarded by `critical-section`, the only place
//! in the crate where state is shared across execution contexts.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// Source of received serial bytes, drained once per loop iteration
pub trait SerialInput {
    /// Next pending byte, or `None` when nothing is buffered
    fn read_byte(&mut self) -> Option<u8>;
}

/// Bounded byte queue filled from interrupt context.
pub struct RxQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<u8, SIZE>>>,
    overruns: Mutex<RefCell<usize>>,
}

impl<const SIZE: usize> RxQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
            overruns: Mutex::new(RefCell::new(0)),
        }
    }

    /// Reader handle for the loop side
    pub const fn reader(&self) -> RxReader<'_, SIZE> {
        RxReader { queue: self }
    }

    /// Push received bytes, returning how many were accepted.
    ///
    /// Bytes that do not fit are dropped and counted as overruns.
    pub fn push_bytes(&self, bytes: &[u8]) -> usize {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            let mut accepted = 0;
            for &byte in bytes {
                if queue.push_back(byte).is_err() {
                    break;
                }
                accepted += 1;
            }
            *self.overruns.borrow(cs).borrow_mut() += bytes.len() - accepted;
            accepted
        })
    }

    pub fn pop(&self) -> Option<u8> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    /// Bytes dropped because the queue was full
    pub fn overruns(&self) -> usize {
        critical_section::with(|cs| *self.overruns.borrow(cs).borrow())
    }
}

impl<const SIZE: usize> Default for RxQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Loop-side handle for an [`RxQueue`].
#[derive(Clone, Copy)]
pub struct RxReader<'a, const SIZE: usize> {
    queue: &'a RxQueue<SIZE>,
}

impl<const SIZE: usize> SerialInput for RxReader<'_, SIZE> {
    fn read_byte(&mut self) -> Option<u8> {
        self.queue.pop()
    }
}
