pub mod harness;
pub mod levels;
pub mod local_transport;

pub use harness::{Harness, ScriptedInput};
pub use local_transport::{LocalTransport, LocalTransportPair};
