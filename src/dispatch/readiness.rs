use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Handle to one outstanding readiness obligation.
pub struct TokenHandle(u64);

impl TokenHandle {
    /// Construct a [`TokenHandle`] from a raw value, for custom ledgers.
    pub fn from_u64(raw: u64) -> Self {
        Self(raw)
    }

    /// Access raw handle value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Counter of outstanding obligations an external render gate waits on.
pub trait ReadinessLedger {
    /// Register an obligation and return its handle.
    fn register_token(&mut self, description: &str) -> TokenHandle;
    /// Release an obligation. Unknown or already released handles are ignored.
    fn release_token(&mut self, handle: TokenHandle);
}

#[derive(Debug, Default)]
/// In-memory [`ReadinessLedger`] with bookkeeping for inspection.
pub struct TokenLedger {
    next: u64,
    outstanding: BTreeMap<TokenHandle, String>,
    registered_total: u64,
    released_total: u64,
}

impl TokenLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tokens not yet released.
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }

    /// True when nothing is outstanding; the render gate may proceed.
    pub fn is_ready(&self) -> bool {
        self.outstanding.is_empty()
    }

    /// Descriptions of outstanding tokens, oldest first.
    pub fn descriptions(&self) -> Vec<&str> {
        self.outstanding.values().map(String::as_str).collect()
    }

    /// Tokens ever registered.
    pub fn registered_total(&self) -> u64 {
        self.registered_total
    }

    /// Tokens ever released (ignored releases are not counted).
    pub fn released_total(&self) -> u64 {
        self.released_total
    }
}

impl ReadinessLedger for TokenLedger {
    fn register_token(&mut self, description: &str) -> TokenHandle {
        let handle = TokenHandle(self.next);
        self.next += 1;
        self.registered_total += 1;
        self.outstanding.insert(handle, description.to_string());
        tracing::debug!(token = handle.0, description, "registered readiness token");
        handle
    }

    fn release_token(&mut self, handle: TokenHandle) {
        if self.outstanding.remove(&handle).is_some() {
            self.released_total += 1;
            tracing::debug!(token = handle.0, "released readiness token");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/readiness.rs"]
mod tests;
