use std::collections::BTreeMap;
use std::ops::Range;

use recoil_client::InputSource;
use recoil_shared::{constants::CLIENT_INPUT_DELAY, Frame, PlayerInput};

/// Plays back input keyed by the frame it should be simulated on, which is
/// `input_delay` frames after the frame it is polled on.
#[derive(Clone, Debug)]
pub struct ScriptedInput {
    input_delay: u32,
    script: BTreeMap<Frame, PlayerInput>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self {
            input_delay: CLIENT_INPUT_DELAY,
            script: BTreeMap::new(),
        }
    }

    /// Applies `input` on every frame in `frames`.
    pub fn hold(mut self, frames: Range<Frame>, input: PlayerInput) -> Self {
        for frame in frames {
            self.script.insert(frame, input.clone());
        }
        self
    }

    pub fn boxed(self) -> Box<dyn InputSource> {
        Box::new(self)
    }
}

impl Default for ScriptedInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, frame: Frame) -> Option<PlayerInput> {
        self.script.get(&(frame + self.input_delay)).cloned()
    }
}
