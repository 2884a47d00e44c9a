//! Typed views over the agent documents.
//!
//! These mirror the shapes the schemas require and are built on demand from
//! a loaded [`Package`](crate::Package). Unknown fields are ignored so that
//! schema-conformant extensions still deserialize.

use serde::{Deserialize, Serialize};

/// An agent role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Contents of a roles document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolesDocument {
    pub roles: Vec<Role>,
}

/// The capabilities granted to one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet {
    pub agent: String,
    pub capabilities: Vec<String>,
}

/// Contents of a capabilities document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitiesDocument {
    pub capabilities: Vec<CapabilitySet>,
}

/// Binds a task to the agent that performs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityBinding {
    pub task_id: String,
    pub agent: String,
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmn_decision_ref: Option<String>,
}

/// Contents of a bindings document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingsDocument {
    pub bindings: Vec<CapabilityBinding>,
}

impl BindingsDocument {
    /// Bindings assigned to `agent`, in document order.
    pub fn for_agent<'a>(&'a self, agent: &'a str) -> impl Iterator<Item = &'a CapabilityBinding> + 'a {
        self.bindings.iter().filter(move |b| b.agent == agent)
    }
}
