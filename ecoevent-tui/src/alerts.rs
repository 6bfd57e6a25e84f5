//! One-shot "bin nearly full" notifications that dismiss themselves after a delay.

use std::collections::HashSet;
use std::time::Duration;

use ecoevent_core::model::BinId;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Message posted by an expired timer: bin and alert sequence number.
type Expiry = (BinId, u64);

pub(crate) struct NearFullAlert {
    pub bin: BinId,
    pub location: String,
    seq: u64,
    timer: JoinHandle<()>,
}

impl Drop for NearFullAlert {
    fn drop(&mut self) {
        self.timer.abort();
    }
}

pub(crate) struct AlertCenter {
    timeout: Duration,
    sender: UnboundedSender<Expiry>,
    receiver: UnboundedReceiver<Expiry>,
    active: Vec<NearFullAlert>,
    /// Bins that already notified and have not dropped below the threshold since.
    armed_off: HashSet<BinId>,
    next_seq: u64,
}

impl AlertCenter {
    pub(crate) fn new(timeout: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            timeout,
            sender,
            receiver,
            active: Vec::new(),
            armed_off: HashSet::new(),
            next_seq: 0,
        }
    }

    /// Feed the latest near-full flag of a bin. Must run inside a tokio runtime.
    pub(crate) fn observe(&mut self, bin: &BinId, location: &str, near_full: bool) {
        if !near_full {
            self.armed_off.remove(bin);
            return;
        }
        if !self.armed_off.insert(bin.clone()) {
            return;
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        let sender = self.sender.clone();
        let expired = bin.clone();
        let timeout = self.timeout;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            if sender.send((expired, seq)).is_err() {
                debug!("dashboard closed before alert expired");
            }
        });

        info!(bin = %bin, location, "bin nearly full");
        self.active.push(NearFullAlert {
            bin: bin.clone(),
            location: location.to_owned(),
            seq,
            timer,
        });
    }

    /// Remove alerts whose timers have fired.
    pub(crate) fn drain_expired(&mut self) {
        loop {
            match self.receiver.try_recv() {
                Ok((bin, seq)) => {
                    self.active
                        .retain(|alert| !(alert.bin == bin && alert.seq == seq));
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
    }

    pub(crate) fn active(&self) -> &[NearFullAlert] {
        &self.active
    }

    /// Drop every visible alert and cancel its timer.
    pub(crate) fn dismiss_all(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin(id: &str) -> BinId {
        BinId(id.to_owned())
    }

    #[tokio::test(start_paused = true)]
    async fn alert_expires_after_timeout() {
        let mut center = AlertCenter::new(Duration::from_secs(5));
        center.observe(&bin("bin-4"), "Main Stage", true);
        assert_eq!(center.active().len(), 1);

        tokio::time::sleep(Duration::from_secs(4)).await;
        center.drain_expired();
        assert_eq!(center.active().len(), 1);

        tokio::time::sleep(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        center.drain_expired();
        assert!(center.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn alert_fires_once_while_bin_stays_full() {
        let mut center = AlertCenter::new(Duration::from_secs(5));
        center.observe(&bin("bin-4"), "Main Stage", true);
        center.observe(&bin("bin-4"), "Main Stage", true);
        assert_eq!(center.active().len(), 1);

        tokio::time::sleep(Duration::from_secs(6)).await;
        tokio::task::yield_now().await;
        center.drain_expired();
        center.observe(&bin("bin-4"), "Main Stage", true);
        assert!(center.active().is_empty());

        center.observe(&bin("bin-4"), "Main Stage", false);
        center.observe(&bin("bin-4"), "Main Stage", true);
        assert_eq!(center.active().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dismissing_cancels_timers() {
        let mut center = AlertCenter::new(Duration::from_secs(5));
        center.observe(&bin("bin-1"), "Main Entrance", true);
        center.observe(&bin("bin-2"), "Food Court", true);
        assert_eq!(center.active().len(), 2);

        center.dismiss_all();
        tokio::time::sleep(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;
        assert!(matches!(center.receiver.try_recv(), Err(TryRecvError::Empty)));
    }
}
