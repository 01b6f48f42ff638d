//! Waiting for the pool to drain.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::channel::ChannelPool;

/// Future returned by [`AudioManager::until_silent`].
///
/// Resolves once no channel in the pool is busy. The first poll always
/// yields back to the scheduler before anything is checked, so a playback
/// started in the same task step is observed before the wait can complete.
/// Every later poll re-checks the pool and re-arms its own waker, which
/// makes the check run once per executor pass, like a per-frame poll.
///
/// Dropping the future cancels the wait and has no effect on playback.
///
/// [`AudioManager::until_silent`]: crate::manager::AudioManager::until_silent
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Silence {
    pool: ChannelPool,
    yielded: bool,
}

impl Silence {
    pub(crate) fn new(pool: ChannelPool) -> Self {
        Self {
            pool,
            yielded: false,
        }
    }
}

impl Future for Silence {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();

        // One unconditional yield before the first check
        if !this.yielded {
            this.yielded = true;
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }

        if this.pool.any_busy() {
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }

        Poll::Ready(())
    }
}
