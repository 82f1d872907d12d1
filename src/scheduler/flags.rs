/*!
 * Registration Flags
 * Behavioral flags handed to the host at registration. The host enforces
 * them; the policy only declares them.
 */

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct OpsFlags: u64 {
        /// Keep the host's built-in idle-CPU selection
        const KEEP_BUILTIN_IDLE = 1 << 0;
        /// Call admission even for the last runnable task on a CPU
        const ENQ_LAST = 1 << 1;
    }
}

impl Default for OpsFlags {
    fn default() -> Self {
        Self::ENQ_LAST | Self::KEEP_BUILTIN_IDLE
    }
}
