//! Tool capability flags attached to driver calls.

use serde::{Deserialize, Serialize};

/// A provider-side capability enabled for a request, e.g. `{"type": "web_search"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    #[serde(rename = "type")]
    pub tool_type: String,
}

impl Tool {
    pub fn new(tool_type: impl Into<String>) -> Self {
        Self {
            tool_type: tool_type.into(),
        }
    }

    /// Web search, used by the research templates.
    pub fn web_search() -> Self {
        Self::new("web_search")
    }
}
