use serde::{Deserialize, Serialize};
use std::fmt;

/// 32-byte caller identity, compatible with public-key bytes.
///
/// The service boundary derives this from the authenticated channel;
/// it is the only authorization mechanism. The ledger treats it as an
/// opaque, comparable, hashable key and never inspects the bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CallerId(pub [u8; 32]);

impl CallerId {
    pub fn bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex: String = self.0.iter().take(4).map(|b| format!("{b:02x}")).collect();
        write!(f, "Caller({hex}..)")
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
