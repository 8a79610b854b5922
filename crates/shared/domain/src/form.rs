//! Form field descriptors handed to the web front-end.

use serde::{Deserialize, Serialize};

/// A field whose value is a semicolon-delimited list of hosts, addresses or subnets.
///
/// The front-end picks its editor from `type`; nothing here renders or validates the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRestrictionField {
    /// Parameter name used between the REST API and the front-end.
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

impl HostRestrictionField {
    /// The field type tag.
    pub const FIELD_TYPE: &'static str = "HOST_RESTRICTION";

    /// Separator between entries of the edited value.
    pub const SEPARATOR: char = ';';

    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), field_type: Self::FIELD_TYPE.to_owned() }
    }
}
