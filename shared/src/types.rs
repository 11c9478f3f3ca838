use std::fmt;

use serde::{Deserialize, Serialize};

pub type Frame = u32;
pub type PlayerNumber = u8;

/// Opaque entity handle, assigned in strictly increasing order by the
/// [`StateDb`](crate::StateDb).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}
