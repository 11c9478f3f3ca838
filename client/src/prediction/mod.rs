mod input_log;
mod session;

pub(crate) use input_log::InputLog;
pub(crate) use session::Session;
