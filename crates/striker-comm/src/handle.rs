//! The communication handle passed into the cycle orchestrator.

use striker_types::{OutboundPacket, RobotIdentity, StrikerError, TeamBroadcast};
use tracing::debug;

use crate::bus::{TeamBus, TeamSubscriber};

/// Sink for this robot's per-cycle packet.
///
/// Implementations must return without blocking.
pub trait TeamComm {
    /// Hand over this cycle's packet for broadcast.
    fn set_data(&mut self, packet: OutboundPacket) -> Result<(), StrikerError>;
}

/// [`TeamComm`] backed by a [`TeamBus`].
#[derive(Debug, Clone)]
pub struct CommHandle {
    identity: RobotIdentity,
    bus: TeamBus,
    last_sent: Option<OutboundPacket>,
    sent: u64,
}

impl CommHandle {
    pub fn new(identity: RobotIdentity, bus: TeamBus) -> Self {
        Self {
            identity,
            bus,
            last_sent: None,
            sent: 0,
        }
    }

    pub fn identity(&self) -> &RobotIdentity {
        &self.identity
    }

    /// A subscriber for this robot that skips its own packets.
    pub fn subscribe(&self) -> TeamSubscriber {
        self.bus.subscribe(self.identity.player_number())
    }

    pub fn last_sent(&self) -> Option<&OutboundPacket> {
        self.last_sent.as_ref()
    }

    /// Packets handed over so far.
    pub fn sent(&self) -> u64 {
        self.sent
    }
}

impl TeamComm for CommHandle {
    fn set_data(&mut self, packet: OutboundPacket) -> Result<(), StrikerError> {
        let receivers = self.bus.publish(TeamBroadcast::new(&self.identity, packet))?;
        self.last_sent = Some(packet);
        self.sent += 1;
        debug!(
            player = self.identity.player_number(),
            receivers, "team packet published"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use striker_types::{BallEstimate, RobotPose, TeamColor};

    fn packet(x: f32) -> OutboundPacket {
        let pose = RobotPose {
            x,
            ..RobotPose::default()
        };
        OutboundPacket::new(&pose, &BallEstimate::default(), 1)
    }

    #[test]
    fn set_data_publishes_enveloped_packet() {
        let bus = TeamBus::default();
        let me = RobotIdentity::new(TeamColor::Yellow, 2, 9).unwrap();
        let mut comm = CommHandle::new(me, bus.clone());
        let mut teammate = bus.subscribe(3);

        comm.set_data(packet(42.0)).unwrap();

        let got = teammate.drain();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].team_number, 9);
        assert_eq!(got[0].player_number, 2);
        assert_eq!(got[0].packet, packet(42.0));
        assert_eq!(comm.sent(), 1);
        assert_eq!(comm.last_sent(), Some(&packet(42.0)));
    }

    #[test]
    fn own_subscriber_ignores_own_packets() {
        let me = RobotIdentity::new(TeamColor::Blue, 1, 1).unwrap();
        let mut comm = CommHandle::new(me, TeamBus::default());
        let mut own = comm.subscribe();
        comm.set_data(packet(1.0)).unwrap();
        assert!(own.drain().is_empty());
    }
}
