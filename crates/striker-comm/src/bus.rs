//! Team broadcast bus.
//!
//! Uses [`tokio::sync::broadcast`] so every subscriber sees every packet and
//! a slow subscriber never blocks the sender.  Both ends are non-blocking:
//! [`TeamBus::publish`] returns immediately and [`TeamSubscriber::drain`]
//! only takes what is already buffered, so neither ever stalls a control
//! cycle.

use striker_types::{StrikerError, TeamBroadcast};
use tokio::sync::broadcast;
use tracing::warn;

/// Default channel capacity (packets buffered before old ones are dropped
/// for slow subscribers).
const DEFAULT_CAPACITY: usize = 64;

/// Shared team bus.  Clone it cheaply; all clones share one channel.
#[derive(Clone, Debug)]
pub struct TeamBus {
    sender: broadcast::Sender<TeamBroadcast>,
}

impl TeamBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish `msg` to every subscriber.
    ///
    /// Returns the number of subscribers handed the packet.  `Ok(0)` when
    /// nobody is listening; an empty field is not an error.
    pub fn publish(&self, msg: TeamBroadcast) -> Result<usize, StrikerError> {
        if self.sender.receiver_count() == 0 {
            return Ok(0);
        }
        self.sender
            .send(msg)
            .map_err(|e| StrikerError::Comm(format!("team bus send error: {e}")))
    }

    /// Subscribe as `own_player`; packets sent by that player number are
    /// filtered out on receipt.
    pub fn subscribe(&self, own_player: u8) -> TeamSubscriber {
        TeamSubscriber {
            own_player,
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for TeamBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Receiving end of the [`TeamBus`] for one robot.
pub struct TeamSubscriber {
    own_player: u8,
    receiver: broadcast::Receiver<TeamBroadcast>,
}

impl TeamSubscriber {
    /// Take every teammate packet already waiting, oldest first.
    ///
    /// Never blocks.  If the subscriber fell behind, the dropped packets
    /// are logged and skipped.
    pub fn drain(&mut self) -> Vec<TeamBroadcast> {
        let mut out = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(msg) if msg.player_number == self.own_player => continue,
                Ok(msg) => out.push(msg),
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    warn!(player = self.own_player, lagged_by = n, "team subscriber lagged");
                    continue;
                }
                Err(broadcast::error::TryRecvError::Empty)
                | Err(broadcast::error::TryRecvError::Closed) => break,
            }
        }
        out
    }

    pub fn own_player(&self) -> u8 {
        self.own_player
    }
}
