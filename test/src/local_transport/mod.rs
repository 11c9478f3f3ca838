//! In-memory transport for E2E testing
//! Routes payloads between server and client without network I/O

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use recoil_shared::{Transport, TransportError};

type PayloadQueue = Arc<Mutex<VecDeque<Box<[u8]>>>>;

/// Pair of connected server-side and client-side transports
pub struct LocalTransportPair {
    pub server: LocalTransport,
    pub client: LocalTransport,
}

impl LocalTransportPair {
    pub fn new() -> Self {
        // Create shared payload queues
        let server_to_client = PayloadQueue::default();
        let client_to_server = PayloadQueue::default();
        let server_closed = Arc::new(AtomicBool::new(false));
        let client_closed = Arc::new(AtomicBool::new(false));

        let server = LocalTransport {
            outbound: server_to_client.clone(),
            inbound: client_to_server.clone(),
            closed: server_closed.clone(),
            peer_closed: client_closed.clone(),
        };
        let client = LocalTransport {
            outbound: client_to_server,
            inbound: server_to_client,
            closed: client_closed,
            peer_closed: server_closed,
        };

        Self { server, client }
    }

    /// Both ends, boxed for `Server::connect_client` and `Client::new`.
    pub fn split(self) -> (Box<dyn Transport>, Box<dyn Transport>) {
        (Box::new(self.server), Box::new(self.client))
    }
}

impl Default for LocalTransportPair {
    fn default() -> Self {
        Self::new()
    }
}

/// One end of a [`LocalTransportPair`]. Cloning it gives a second handle on
/// the same end, which lets tests watch a transport they have handed away.
#[derive(Clone)]
pub struct LocalTransport {
    outbound: PayloadQueue,
    inbound: PayloadQueue,
    closed: Arc<AtomicBool>,
    peer_closed: Arc<AtomicBool>,
}

impl LocalTransport {
    /// Payloads sent by this end that the peer has not received yet.
    pub fn in_flight(&self) -> usize {
        self.outbound.lock().map_or(0, |queue| queue.len())
    }

    pub fn peer_closed(&self) -> bool {
        self.peer_closed.load(Ordering::SeqCst)
    }
}

fn poisoned<T>(_: T) -> TransportError {
    TransportError::Io {
        reason: "local queue poisoned".to_string(),
    }
}

impl Transport for LocalTransport {
    fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        if self.is_closed() || self.peer_closed() {
            return Err(TransportError::Closed);
        }

        let mut queue = self.outbound.lock().map_err(poisoned)?;
        queue.push_back(payload.into());
        Ok(())
    }

    fn receive(&mut self) -> Result<Option<Box<[u8]>>, TransportError> {
        if self.is_closed() {
            return Err(TransportError::Closed);
        }

        let mut queue = self.inbound.lock().map_err(poisoned)?;
        match queue.pop_front() {
            Some(payload) => Ok(Some(payload)),
            // everything the peer sent before closing has been delivered
            None if self.peer_closed() => Err(TransportError::Closed),
            None => Ok(None),
        }
    }

    fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_in_order() {
        let LocalTransportPair {
            mut server,
            mut client,
        } = LocalTransportPair::new();

        client.send(&[1]).unwrap();
        client.send(&[2, 3]).unwrap();
        assert_eq!(client.in_flight(), 2);
        assert_eq!(server.receive().unwrap().as_deref(), Some(&[1u8][..]));
        assert_eq!(server.receive().unwrap().as_deref(), Some(&[2u8, 3][..]));
        assert_eq!(server.receive().unwrap(), None);
    }

    #[test]
    fn close_drains_then_fails() {
        let LocalTransportPair {
            mut server,
            mut client,
        } = LocalTransportPair::new();

        server.send(&[7]).unwrap();
        server.close();

        assert_eq!(server.send(&[8]), Err(TransportError::Closed));
        assert_eq!(client.receive().unwrap().as_deref(), Some(&[7u8][..]));
        assert_eq!(client.receive(), Err(TransportError::Closed));
        assert_eq!(client.send(&[9]), Err(TransportError::Closed));
    }
}
