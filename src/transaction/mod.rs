use serde::{Deserialize, Serialize};

/// An opaque transaction record. The ledger never inspects the payload:
/// any JSON value is accepted and carried into a block as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transaction(pub serde_json::Value);

impl Transaction {
    pub fn new(payload: serde_json::Value) -> Self {
        Self(payload)
    }
}

impl From<&str> for Transaction {
    fn from(s: &str) -> Self {
        Self(serde_json::Value::String(s.to_owned()))
    }
}
