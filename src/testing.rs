//! In-memory streams and cancellation sources for tests.

use std::collections::VecDeque;
use std::future::Future;

use embassy_futures::yield_now;
use embedded_io_async::{ErrorKind, ErrorType, Read};

use crate::cancel::Cancellation;

/// What a [`ScriptedStream`] does once its chunks run out.
#[derive(Debug, Clone, Copy)]
pub enum End {
    /// Block forever.
    Pending,
    /// Return `Ok(0)`.
    Zero,
    /// Return the error.
    Error(ErrorKind),
}

/// A stream that hands out pre-programmed chunks, one chunk per read at most.
#[derive(Debug)]
pub struct ScriptedStream {
    chunks: VecDeque<Vec<u8>>,
    end: End,
    reads: usize,
}

impl ScriptedStream {
    pub fn new(chunks: impl IntoIterator<Item = Vec<u8>>, end: End) -> Self {
        Self {
            chunks: chunks.into_iter().filter(|c| !c.is_empty()).collect(),
            end,
            reads: 0,
        }
    }

    /// Number of `read` calls made so far.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl ErrorType for ScriptedStream {
    type Error = ErrorKind;
}

impl Read for ScriptedStream {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.reads += 1;
        let Some(chunk) = self.chunks.front_mut() else {
            return match self.end {
                End::Pending => std::future::pending().await,
                End::Zero => Ok(0),
                End::Error(kind) => Err(kind),
            };
        };
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        chunk.drain(..n);
        if chunk.is_empty() {
            self.chunks.pop_front();
        }
        Ok(n)
    }
}

/// Fires after the reader has been polled the given number of times.
#[derive(Debug, Clone, Copy)]
pub struct CancelAfter(pub usize);

impl Cancellation for CancelAfter {
    fn cancelled(&self) -> impl Future<Output = ()> {
        let polls = self.0;
        async move {
            for _ in 0..polls {
                yield_now().await;
            }
        }
    }
}

/// Already fired.
#[derive(Debug, Clone, Copy)]
pub struct AlreadyCancelled;

impl Cancellation for AlreadyCancelled {
    fn cancelled(&self) -> impl Future<Output = ()> {
        std::future::ready(())
    }
}
