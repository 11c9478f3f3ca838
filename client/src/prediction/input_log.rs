use std::collections::BTreeMap;

use log::warn;

use recoil_shared::{messages::sort_canonical, ClientMessage, Frame};

/// Per-frame input bookkeeping for one session: what the client knows, what
/// each frame was predicted with, and what the server says it simulated.
pub(crate) struct InputLog {
    // own input plus whatever remote input has been relayed
    known: BTreeMap<Frame, Vec<ClientMessage>>,
    predicted: BTreeMap<Frame, Vec<ClientMessage>>,
    authoritative: BTreeMap<Frame, Vec<ClientMessage>>,
    next_confirmed: Frame,
}

impl InputLog {
    pub fn new() -> Self {
        Self {
            known: BTreeMap::new(),
            predicted: BTreeMap::new(),
            authoritative: BTreeMap::new(),
            next_confirmed: 0,
        }
    }

    /// First frame the server has not confirmed yet.
    pub fn next_confirmed(&self) -> Frame {
        self.next_confirmed
    }

    pub fn record(&mut self, message: ClientMessage) {
        self.known.entry(message.frame).or_default().push(message);
    }

    /// Every input known for `frame`, in canonical order.
    pub fn best_known(&self, frame: Frame) -> Vec<ClientMessage> {
        let mut batch = self.known.get(&frame).cloned().unwrap_or_default();
        sort_canonical(&mut batch);
        batch
    }

    pub fn record_prediction(&mut self, frame: Frame, batch: Vec<ClientMessage>) {
        self.predicted.insert(frame, batch);
    }

    /// Stores the batch the server simulated for `frame`. Updates must
    /// arrive in frame order; anything else is logged and ignored.
    pub fn confirm(&mut self, frame: Frame, inputs: Vec<ClientMessage>) -> bool {
        if frame != self.next_confirmed {
            warn!(
                "frame update for frame {} arrived, expected frame {}, discarding",
                frame, self.next_confirmed
            );
            return false;
        }

        self.authoritative.insert(frame, inputs);
        self.next_confirmed += 1;
        true
    }

    pub fn authoritative(&self, frame: Frame) -> Vec<ClientMessage> {
        self.authoritative.get(&frame).cloned().unwrap_or_default()
    }

    /// First frame in `start..end` whose predicted batch differs from the
    /// confirmed one.
    pub fn first_divergence(&self, start: Frame, end: Frame) -> Option<Frame> {
        (start..end).find(|frame| self.predicted.get(frame) != self.authoritative.get(frame))
    }

    /// Forgets every frame before `frame`.
    pub fn discard_before(&mut self, frame: Frame) {
        self.known = self.known.split_off(&frame);
        self.predicted = self.predicted.split_off(&frame);
        self.authoritative = self.authoritative.split_off(&frame);
    }

    /// Number of frames with any bookkeeping left.
    #[cfg(test)]
    pub fn retained_frames(&self) -> usize {
        self.known
            .keys()
            .chain(self.predicted.keys())
            .chain(self.authoritative.keys())
            .collect::<std::collections::BTreeSet<_>>()
            .len()
    }
}
