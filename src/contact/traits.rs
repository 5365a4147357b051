// Call-initiation seam - the one place a real telephony integration plugs in

use anyhow::Result;
use uuid::Uuid;

/// Handle to a placed call, returned by the initiator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallHandle {
    pub call_id: String,
}

/// Places outbound calls. The core workflow only ever talks to this trait;
/// the shipped implementation fabricates a handle without touching audio.
pub trait CallInitiator {
    fn call(&self, phone: &str) -> Result<CallHandle>;
}

/// Default initiator: pretends the call was placed and returns a fresh id.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedCallInitiator;

impl CallInitiator for SimulatedCallInitiator {
    fn call(&self, phone: &str) -> Result<CallHandle> {
        let call_id = Uuid::new_v4().to_string();
        tracing::debug!(phone = %phone, call_id = %call_id, "simulated call placed");
        Ok(CallHandle { call_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_initiator_returns_unique_handles() {
        let initiator = SimulatedCallInitiator;
        let a = initiator.call("(312) 555-0100").unwrap();
        let b = initiator.call("(312) 555-0100").unwrap();
        assert_ne!(a.call_id, b.call_id);
    }
}
