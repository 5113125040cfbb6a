//! Caller-imposed deadlines and cancellation.
//!
//! The engine has no timeout of its own. Wrapping an engine future in
//! [`within`] or [`until`] drops it when the deadline or signal fires, which
//! aborts any fan-out tasks it still owns.

use std::{future::Future, time::Duration};

use tokio::sync::watch;

use crate::{Error, Result};

/// Run `work`, failing with [`Error::Cancelled`] once `deadline` elapses.
pub async fn within<T, F>(deadline: Duration, work: F) -> Result<T>
where
  F: Future<Output = Result<T>>,
{
  tokio::time::timeout(deadline, work)
    .await
    .map_err(|_| Error::Cancelled)?
}

/// Run `work` until `cancel` reads `true`, then fail with
/// [`Error::Cancelled`]. A dropped sender never cancels.
pub async fn until<T, F>(mut cancel: watch::Receiver<bool>, work: F) -> Result<T>
where
  F: Future<Output = Result<T>>,
{
  tokio::select! {
    biased;
    () = cancelled(&mut cancel) => Err(Error::Cancelled),
    result = work => result,
  }
}

async fn cancelled(cancel: &mut watch::Receiver<bool>) {
  let closed = cancel.wait_for(|c| *c).await.is_err();
  if closed {
    std::future::pending::<()>().await;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn deadline_elapsing_is_cancelled() {
    let slow = async {
      tokio::time::sleep(Duration::from_secs(5)).await;
      Ok::<_, Error>(())
    };
    let err = within(Duration::from_millis(10), slow).await.unwrap_err();
    assert!(matches!(err, Error::Cancelled));
  }

  #[tokio::test]
  async fn result_passes_through_before_deadline() {
    let value = within(Duration::from_secs(5), async { Ok::<_, Error>(7) }).await.unwrap();
    assert_eq!(value, 7);
  }

  #[tokio::test]
  async fn signal_already_raised_cancels_immediately() {
    let (_tx, rx) = watch::channel(true);
    let err = until(rx, async { Ok::<_, Error>(()) }).await.unwrap_err();
    assert!(matches!(err, Error::Cancelled));
  }

  #[tokio::test]
  async fn dropped_sender_does_not_cancel() {
    let (tx, rx) = watch::channel(false);
    drop(tx);
    let value = until(rx, async {
      tokio::time::sleep(Duration::from_millis(10)).await;
      Ok::<_, Error>("done")
    })
    .await
    .unwrap();
    assert_eq!(value, "done");
  }
}
