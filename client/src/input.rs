use recoil_shared::{Frame, PlayerInput};

/// Supplies the local player's input, once per predicted frame.
pub trait InputSource {
    /// `frame` is the local frame being stepped. Returning `None` (or an idle
    /// input) sends nothing for that frame.
    fn poll(&mut self, frame: Frame) -> Option<PlayerInput>;
}

impl<F: FnMut(Frame) -> Option<PlayerInput>> InputSource for F {
    fn poll(&mut self, frame: Frame) -> Option<PlayerInput> {
        self(frame)
    }
}

/// Never presses anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn poll(&mut self, _frame: Frame) -> Option<PlayerInput> {
        None
    }
}
