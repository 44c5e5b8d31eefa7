use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::fmt;

/// The version of the JSON state format supported by this crate.
pub const STATE_FORMAT_VERSION: &str = "0.1";

// Producers may write `null` where a field is empty; read it as the empty value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn mode_or_none<'de, D>(deserializer: D) -> Result<Option<ResourceMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let mode = Option::<String>::deserialize(deserializer)?;
    Ok(mode.filter(|m| !m.is_empty()).map(ResourceMode::from))
}

/// Top-level representation of a Terraform state document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Should always match [`STATE_FORMAT_VERSION`]; anything else may not decode as expected.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub format_version: String,

    /// Version of the tool that produced the state.
    #[serde(
        rename = "terraform_version",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub tool_version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<StateValues>,
}

impl State {
    pub fn new(tool_version: impl Into<String>) -> Self {
        Self {
            format_version: STATE_FORMAT_VERSION.to_string(),
            tool_version: tool_version.into(),
            values: None,
        }
    }

    pub fn has_supported_format_version(&self) -> bool {
        self.format_version == STATE_FORMAT_VERSION
    }
}

/// Resolved values for either the prior state or the planned new state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateValues {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub outputs: BTreeMap<String, StateOutput>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_module: Option<StateModule>,
}

impl StateValues {
    /// Every resource in the module tree, parents before children.
    pub fn resources(&self) -> impl Iterator<Item = &StateResource> {
        self.root_module
            .iter()
            .flat_map(StateModule::walk)
            .flat_map(|module| module.resources.iter())
    }
}

/// A module in the state tree: the root module or one of its descendants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateModule {
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<StateResource>,

    /// Absolute module address, empty for the root module.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub address: String,

    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub child_modules: Vec<StateModule>,
}

impl StateModule {
    pub fn is_root(&self) -> bool {
        self.address.is_empty()
    }

    /// Depth-first, pre-order walk over this module and all of its descendants.
    pub fn walk(&self) -> ModuleWalk<'_> {
        ModuleWalk { stack: vec![self] }
    }
}

pub struct ModuleWalk<'a> {
    stack: Vec<&'a StateModule>,
}

impl<'a> Iterator for ModuleWalk<'a> {
    type Item = &'a StateModule;

    fn next(&mut self) -> Option<Self::Item> {
        let module = self.stack.pop()?;
        self.stack.extend(module.child_modules.iter().rev());
        Some(module)
    }
}

/// Whether a resource is managed or a read-only data source. Modes this crate
/// does not know about are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceMode {
    Managed,
    Data,
    Other(String),
}

impl ResourceMode {
    pub fn as_str(&self) -> &str {
        match self {
            ResourceMode::Managed => "managed",
            ResourceMode::Data => "data",
            ResourceMode::Other(mode) => mode,
        }
    }
}

impl From<String> for ResourceMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "managed" => ResourceMode::Managed,
            "data" => ResourceMode::Data,
            _ => ResourceMode::Other(value),
        }
    }
}

impl From<ResourceMode> for String {
    fn from(value: ResourceMode) -> Self {
        match value {
            ResourceMode::Other(mode) => mode,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ResourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instance key of a resource declared with `count` (number) or `for_each` (string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceIndex {
    Number(Number),
    Str(String),
}

impl fmt::Display for ResourceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceIndex::Number(n) => write!(f, "{n}"),
            ResourceIndex::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ResourceIndex {
    fn from(value: i64) -> Self {
        ResourceIndex::Number(value.into())
    }
}

impl From<&str> for ResourceIndex {
    fn from(value: &str) -> Self {
        ResourceIndex::Str(value.to_string())
    }
}

impl From<String> for ResourceIndex {
    fn from(value: String) -> Self {
        ResourceIndex::Str(value)
    }
}

/// A single managed resource or data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateResource {
    /// Absolute resource address, unique across the document.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub address: String,

    #[serde(
        default,
        deserialize_with = "mode_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub mode: Option<ResourceMode>,

    /// Resource type, e.g. `aws_instance` for `aws_instance.foo`.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub r#type: String,

    /// Resource name, e.g. `foo` for `aws_instance.foo`.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<ResourceIndex>,

    /// Provider owning the type, needed when the type name does not start with the
    /// provider's own name (e.g. `googlebeta` offering `google_compute_instance`).
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub provider_name: String,

    // Emitted even when zero.
    #[serde(default, deserialize_with = "null_as_default")]
    pub schema_version: u64,

    /// Attribute values shaped by the resource type schema. Unknown values are
    /// null or missing, and the two cannot be told apart.
    #[serde(
        rename = "values",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub attribute_values: BTreeMap<String, Value>,
}

/// An output value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateOutput {
    // Emitted even when false.
    #[serde(default, deserialize_with = "null_as_default")]
    pub sensitive: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn module(address: &str, children: Vec<StateModule>) -> StateModule {
        StateModule {
            address: address.to_string(),
            child_modules: children,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_state_uses_supported_version() {
        let state = State::new("1.5.0");
        assert_eq!(state.format_version, "0.1");
        assert!(state.has_supported_format_version());

        let old = State {
            format_version: "0.0".to_string(),
            ..Default::default()
        };
        assert!(!old.has_supported_format_version());
    }

    #[test]
    fn test_walk_is_preorder() {
        let root = module(
            "",
            vec![
                module("module.a", vec![module("module.a.module.b", vec![])]),
                module("module.c", vec![]),
            ],
        );

        let addresses: Vec<&str> = root.walk().map(|m| m.address.as_str()).collect();
        assert_eq!(
            addresses,
            vec!["", "module.a", "module.a.module.b", "module.c"]
        );
        assert!(root.is_root());
        assert!(!root.child_modules[0].is_root());
    }

    #[test]
    fn test_resources_spans_tree() {
        let mut child = module("module.net", vec![]);
        child.resources.push(StateResource {
            address: "module.net.aws_vpc.main".to_string(),
            ..Default::default()
        });
        let mut root = module("", vec![child]);
        root.resources.push(StateResource {
            address: "aws_instance.foo".to_string(),
            ..Default::default()
        });
        let values = StateValues {
            root_module: Some(root),
            ..Default::default()
        };

        let addresses: Vec<&str> = values.resources().map(|r| r.address.as_str()).collect();
        assert_eq!(addresses, vec!["aws_instance.foo", "module.net.aws_vpc.main"]);
        assert_eq!(StateValues::default().resources().count(), 0);
    }

    #[test]
    fn test_mode_wire_names() {
        assert_eq!(serde_json::to_value(ResourceMode::Managed).unwrap(), json!("managed"));
        assert_eq!(serde_json::to_value(ResourceMode::Data).unwrap(), json!("data"));
        assert_eq!(ResourceMode::Data.to_string(), "data");
    }

    #[test]
    fn test_unknown_mode_is_carried_through() {
        let resource: StateResource =
            serde_json::from_value(json!({ "mode": "ephemeral" })).unwrap();
        assert_eq!(
            resource.mode,
            Some(ResourceMode::Other("ephemeral".to_string()))
        );
        assert_eq!(
            serde_json::to_value(&resource).unwrap(),
            json!({ "mode": "ephemeral", "schema_version": 0 })
        );
    }

    #[test]
    fn test_empty_or_null_mode_is_absent() {
        for mode in [json!(""), Value::Null] {
            let resource: StateResource = serde_json::from_value(json!({ "mode": mode })).unwrap();
            assert_eq!(resource.mode, None);
        }
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let resource: StateResource = serde_json::from_value(json!({
            "address": null,
            "type": null,
            "name": null,
            "provider_name": null,
            "schema_version": null,
            "values": null
        }))
        .unwrap();
        assert_eq!(resource, StateResource::default());

        let output: StateOutput = serde_json::from_value(json!({ "sensitive": null })).unwrap();
        assert!(!output.sensitive);

        let module: StateModule = serde_json::from_value(json!({
            "resources": null,
            "address": null,
            "child_modules": null
        }))
        .unwrap();
        assert_eq!(module, StateModule::default());
    }

    #[test]
    fn test_index_display() {
        assert_eq!(ResourceIndex::from(2i64).to_string(), "2");
        assert_eq!(ResourceIndex::from("foo").to_string(), "foo");
        assert_eq!(
            ResourceIndex::Number(u64::MAX.into()).to_string(),
            "18446744073709551615"
        );
    }

    #[test]
    fn test_empty_resource_keeps_schema_version() {
        let value = serde_json::to_value(StateResource::default()).unwrap();
        assert_eq!(value, json!({ "schema_version": 0 }));
    }

    #[test]
    fn test_null_output_value_is_omitted() {
        let output: StateOutput = serde_json::from_value(json!({ "value": null })).unwrap();
        assert_eq!(output.value, None);
        assert_eq!(serde_json::to_value(&output).unwrap(), json!({ "sensitive": false }));
    }
}
