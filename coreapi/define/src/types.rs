//! HTTP methods and operation descriptors.
//!
//! - [`RestMethod`] - HTTP method enumeration
//! - [`Operation`] - One callable API operation: method, path template,
//!   request record and response envelope record

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// HTTP methods used by the Core Services API.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use coreapi_define::RestMethod;
///
/// assert_eq!(RestMethod::from_str("PUT").unwrap(), RestMethod::Put);
/// assert_eq!(RestMethod::Delete.to_string(), "DELETE");
/// assert!(RestMethod::Post.has_body());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET - Retrieve a resource
    Get,
    /// HTTP POST - Create a resource or trigger an action
    Post,
    /// HTTP PUT - Update a resource
    Put,
    /// HTTP PATCH - Partially update a resource
    Patch,
    /// HTTP DELETE - Remove a resource
    Delete,
    /// HTTP HEAD - Get headers only (no body)
    Head,
}

impl RestMethod {
    /// Returns `true` if this method typically carries a request body.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Returns `true` if repeating the call has the same effect as calling once.
    pub fn is_idempotent(&self) -> bool {
        !matches!(self, Self::Post | Self::Patch)
    }
}

/// A single API operation.
///
/// The request record's fields say where each input travels; the response
/// record's fields say which headers and which body shape come back.
///
/// ## Examples
///
/// ```
/// use coreapi_define::{Operation, RestMethod};
///
/// let op = Operation::new(
///     "GetInstance",
///     RestMethod::Get,
///     "/instances/{instanceId}",
///     "GetInstanceRequest",
///     "GetInstanceResponse",
/// );
/// assert_eq!(op.path_params(), vec!["instanceId"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Unique operation id (e.g. `ListInstances`).
    pub id: String,
    /// HTTP method.
    pub method: RestMethod,
    /// Path template relative to the service endpoint, with `{name}` placeholders.
    pub path: String,
    /// Human-readable description.
    pub description: String,
    /// Request record name.
    pub request: String,
    /// Response envelope record name.
    pub response: String,
}

impl Operation {
    /// Creates an operation with an empty description.
    pub fn new(
        id: impl Into<String>,
        method: RestMethod,
        path: impl Into<String>,
        request: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            method,
            path: path.into(),
            description: String::new(),
            request: request.into(),
            response: response.into(),
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Placeholder names in the path template, in order of appearance.
    ///
    /// An unclosed `{` ends the scan.
    pub fn path_params(&self) -> Vec<&str> {
        let mut params = Vec::new();
        let mut rest = self.path.as_str();
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else {
                break;
            };
            if end > 0 {
                params.push(&after[..end]);
            }
            rest = &after[end + 1..];
        }
        params
    }

    /// Returns `true` if the template has balanced, non-empty placeholders.
    pub fn has_well_formed_path(&self) -> bool {
        let mut open = false;
        let mut len = 0usize;
        for c in self.path.chars() {
            match c {
                '{' if open => return false,
                '{' => {
                    open = true;
                    len = 0;
                }
                '}' if !open || len == 0 => return false,
                '}' => open = false,
                _ if open => len += 1,
                _ => {}
            }
        }
        !open && self.path.starts_with('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn op(path: &str) -> Operation {
        Operation::new("Op", RestMethod::Get, path, "Req", "Resp")
    }

    #[test]
    fn test_method_iteration() {
        assert_eq!(RestMethod::iter().count(), 6);
    }

    #[test]
    fn test_method_serde_uppercase() {
        let json = serde_json::to_string(&RestMethod::Patch).unwrap();
        assert_eq!(json, "\"PATCH\"");
    }

    #[test]
    fn test_idempotence() {
        assert!(RestMethod::Put.is_idempotent());
        assert!(!RestMethod::Post.is_idempotent());
    }

    #[test]
    fn test_path_params_multiple() {
        let op = op("/instancePools/{instancePoolId}/instances/{instanceId}");
        assert_eq!(op.path_params(), vec!["instancePoolId", "instanceId"]);
    }

    #[test]
    fn test_path_params_none() {
        assert!(op("/instances").path_params().is_empty());
    }

    #[test]
    fn test_well_formed_path() {
        assert!(op("/instances/{instanceId}").has_well_formed_path());
        assert!(!op("/instances/{instanceId").has_well_formed_path());
        assert!(!op("/instances/{}").has_well_formed_path());
        assert!(!op("/a/{b{c}}").has_well_formed_path());
        assert!(!op("instances").has_well_formed_path());
    }
}
