use core::future::Future;

/// A source of cancellation for blocking reads.
///
/// `cancelled` resolves once the owner has asked the reader to stop. It may be
/// called any number of times; every read races a fresh future against the
/// stream.
pub trait Cancellation {
    fn cancelled(&self) -> impl Future<Output = ()>;
}

/// Never cancels. For callers that stop a reader by dropping its future.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverCancel;

impl Cancellation for NeverCancel {
    fn cancelled(&self) -> impl Future<Output = ()> {
        core::future::pending()
    }
}

impl<C: Cancellation> Cancellation for &C {
    fn cancelled(&self) -> impl Future<Output = ()> {
        (**self).cancelled()
    }
}

#[cfg(feature = "std")]
impl Cancellation for tokio_util::sync::CancellationToken {
    fn cancelled(&self) -> impl Future<Output = ()> {
        tokio_util::sync::CancellationToken::cancelled(self)
    }
}
