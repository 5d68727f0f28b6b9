// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Authorization side-effect types
//!
//! Analysis does not decide authorization; it records what the authorization
//! subsystem will need afterwards. Two kinds of record accumulate on scopes
//! while bodies are analyzed:
//!
//! - [`PrivilegeRequest`]: a need to authorize access to a catalog object,
//!   adjudicated in a separate phase
//! - [`AccessEvent`]: an audit record of a catalog object access, independent
//!   of the authorization outcome
//!
//! The request list produced for a statement is equivalent to fully inlining
//! every view reference at its use site: objects accessed only inside a view
//! body appear exactly as if the body were written in place.

use serde::{Deserialize, Serialize};
use sqlfront_catalog::TableType;

/// Privilege levels that analysis can request on catalog objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Privilege {
    All,
    Insert,
    Select,
    Any,
}

/// A recorded need to authorize access to a catalog object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegeRequest {
    /// Schema-qualified object name
    pub object: String,
    /// Privilege being requested
    pub privilege: Privilege,
}

impl PrivilegeRequest {
    /// A SELECT request on `object`
    pub fn select_on(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            privilege: Privilege::Select,
        }
    }
}

/// Audit record of a catalog object access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessEvent {
    /// Schema-qualified object name
    pub object: String,
    /// Kind of object accessed
    pub object_type: TableType,
    /// Privilege the access implied
    pub privilege: Privilege,
}

/// Opaque authorization configuration.
///
/// Carried by the analyzer and forwarded when scopes are constructed; never
/// interpreted during analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationConfig {
    pub enabled: bool,
    pub server_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_request() {
        let req = PrivilegeRequest::select_on("shop.users");
        assert_eq!(req.object, "shop.users");
        assert_eq!(req.privilege, Privilege::Select);
    }
}
