//! Outbound message scheduling

use std::collections::VecDeque;

use bytes::Bytes;

/// Numeric packet-type identifier in the older protocol revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PacketId(u32);

impl PacketId {
    /// Create a packet id from its raw value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw numeric id.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// A fully serialized message bound for one connection's client.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    packet_id: PacketId,
    payload: Bytes,
}

impl OutboundMessage {
    /// Create an outbound message from its packet id and payload.
    #[must_use]
    pub const fn new(packet_id: PacketId, payload: Bytes) -> Self {
        Self { packet_id, payload }
    }

    /// Packet id the payload belongs to.
    #[must_use]
    pub const fn packet_id(&self) -> PacketId {
        self.packet_id
    }

    /// Serialized payload.
    #[must_use]
    pub const fn payload(&self) -> &Bytes {
        &self.payload
    }
}

/// Sink for messages scheduled onto a connection's outbound channel.
///
/// Implementations must preserve per-connection FIFO order: a message
/// scheduled while handling an inbound event goes out immediately after the
/// message that carried the event, before anything scheduled later.
pub trait OutboundSink {
    /// Schedule a message for delivery to the client.
    fn schedule_send(&mut self, message: OutboundMessage);
}

/// FIFO outbound queue for a single connection.
#[derive(Debug, Default)]
pub struct SendQueue {
    queue: VecDeque<OutboundMessage>,
}

impl SendQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Dequeue the next message in send order.
    pub fn pop(&mut self) -> Option<OutboundMessage> {
        self.queue.pop_front()
    }

    /// Number of queued messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl OutboundSink for SendQueue {
    fn schedule_send(&mut self, message: OutboundMessage) {
        self.queue.push_back(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = SendQueue::new();
        queue.schedule_send(OutboundMessage::new(PacketId::new(1), Bytes::from_static(b"a")));
        queue.schedule_send(OutboundMessage::new(PacketId::new(2), Bytes::from_static(b"b")));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop().unwrap().packet_id(), PacketId::new(1));
        assert_eq!(queue.pop().unwrap().packet_id(), PacketId::new(2));
        assert!(queue.pop().is_none());
    }
}
