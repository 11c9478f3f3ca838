use std::collections::VecDeque;

use recoil_shared::ClientMessage;

/// Inputs waiting to be simulated. Slot `n` holds the inputs for the frame
/// `n` frames after the next one the server will simulate.
pub(crate) struct FrameBuffer {
    frames: VecDeque<Vec<ClientMessage>>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            frames: VecDeque::new(),
        }
    }

    /// Files `message` at `offset`, growing the buffer as needed.
    pub fn file(&mut self, offset: usize, message: ClientMessage) {
        if self.frames.len() <= offset {
            self.frames.resize_with(offset + 1, Vec::new);
        }
        self.frames[offset].push(message);
    }

    /// Removes the inputs for the next frame. Empty if nobody sent any.
    pub fn pop_next(&mut self) -> Vec<ClientMessage> {
        self.frames.pop_front().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}
