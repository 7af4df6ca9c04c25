use crate::error::ConfigurationError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A candidate value offered for a property, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyValue {
    pub value: String,
    #[serde(alias = "displayValue")]
    pub label: String,
}

impl PropertyValue {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }

    /// Candidate for an already known value: the label is the value itself.
    pub fn pinned(value: &JsonValue) -> Self {
        let text = value_as_text(value);
        Self { value: text.clone(), label: text }
    }
}

/// Render a property value the way it appears in a candidate list.
pub fn value_as_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Metadata and candidate values for one configurable property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationProperty {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    /// Free-form type tag understood by the runtime that consumes the value.
    #[serde(default, rename = "javaType", skip_serializing_if = "Option::is_none")]
    pub java_type_hint: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub component_property: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Empty means free text, no suggestions yet.
    #[serde(default, rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<PropertyValue>,
}

impl ConfigurationProperty {
    pub fn builder() -> ConfigurationPropertyBuilder {
        ConfigurationPropertyBuilder::default()
    }

    /// Copy of this entry with its candidate list replaced.
    pub fn with_candidates(&self, candidates: Vec<PropertyValue>) -> Self {
        Self { candidates, ..self.clone() }
    }
}

#[derive(Debug, Default)]
pub struct ConfigurationPropertyBuilder {
    inner: ConfigurationProperty,
}

impl ConfigurationPropertyBuilder {
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.inner.kind = Some(kind.into());
        self
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.inner.display_name = Some(name.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.inner.group = Some(group.into());
        self
    }

    pub fn property_type(mut self, property_type: impl Into<String>) -> Self {
        self.inner.property_type = Some(property_type.into());
        self
    }

    pub fn java_type_hint(mut self, hint: impl Into<String>) -> Self {
        self.inner.java_type_hint = Some(hint.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.inner.required = required;
        self
    }

    pub fn component_property(mut self, component_property: bool) -> Self {
        self.inner.component_property = component_property;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.inner.description = Some(description.into());
        self
    }

    pub fn candidate(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.inner.candidates.push(PropertyValue::new(value, label));
        self
    }

    pub fn build(self) -> ConfigurationProperty {
        self.inner
    }
}

/// Schema descriptor for an action's input or output payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataShape {
    pub kind: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification: Option<String>,
}

impl DataShape {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into(), shape_type: None, specification: None }
    }

    pub fn with_type(mut self, shape_type: impl Into<String>) -> Self {
        self.shape_type = Some(shape_type.into());
        self
    }

    pub fn with_specification(mut self, specification: impl Into<String>) -> Self {
        self.specification = Some(specification.into());
        self
    }

    fn check(&self, action_id: &str, which: &str) -> Result<(), ConfigurationError> {
        if self.kind.trim().is_empty() {
            return Err(ConfigurationError::malformed(action_id, format!("{} data shape has no kind", which)));
        }
        if self.specification.is_some() && self.shape_type.is_none() {
            return Err(ConfigurationError::malformed(
                action_id,
                format!("{} data shape carries a specification without a type", which),
            ));
        }
        Ok(())
    }
}

/// One stage of the configuration wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDefinitionStep {
    title: String,
    #[serde(default)]
    description: String,
    properties: IndexMap<String, ConfigurationProperty>,
}

impl ActionDefinitionStep {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn properties(&self) -> &IndexMap<String, ConfigurationProperty> {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&ConfigurationProperty> {
        self.properties.get(name)
    }
}

/// Builder for a single step, used through [`ActionDefinitionBuilder::step`].
#[derive(Debug)]
pub struct StepBuilder {
    title: String,
    description: String,
    properties: Vec<(String, ConfigurationProperty)>,
}

impl StepBuilder {
    fn new(title: String, description: String) -> Self {
        Self { title, description, properties: Vec::new() }
    }

    pub fn property(mut self, name: impl Into<String>, property: ConfigurationProperty) -> Self {
        self.properties.push((name.into(), property));
        self
    }

    fn build(self, action_id: &str) -> Result<ActionDefinitionStep, ConfigurationError> {
        let mut properties = IndexMap::with_capacity(self.properties.len());
        for (name, property) in self.properties {
            if name.trim().is_empty() {
                return Err(ConfigurationError::malformed(
                    action_id,
                    format!("step '{}' has a property with an empty name", self.title),
                ));
            }
            if properties.contains_key(&name) {
                return Err(ConfigurationError::malformed(
                    action_id,
                    format!("step '{}' declares property '{}' more than once", self.title, name),
                ));
            }
            properties.insert(name, property);
        }
        Ok(ActionDefinitionStep { title: self.title, description: self.description, properties })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActionDefinitionRepr {
    action_id: String,
    #[serde(default)]
    input_data_shape: Option<DataShape>,
    #[serde(default)]
    output_data_shape: Option<DataShape>,
    #[serde(default)]
    steps: Vec<ActionDefinitionStep>,
}

/// Ordered configuration steps of an action plus its data shapes.
///
/// Values are only obtainable through [`ActionDefinitionBuilder::build`] or
/// deserialization, both of which validate the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ActionDefinitionRepr")]
pub struct ActionDefinition {
    action_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    input_data_shape: Option<DataShape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_data_shape: Option<DataShape>,
    steps: Vec<ActionDefinitionStep>,
}

impl TryFrom<ActionDefinitionRepr> for ActionDefinition {
    type Error = ConfigurationError;

    fn try_from(repr: ActionDefinitionRepr) -> Result<Self, Self::Error> {
        let definition = ActionDefinition {
            action_id: repr.action_id,
            input_data_shape: repr.input_data_shape,
            output_data_shape: repr.output_data_shape,
            steps: repr.steps,
        };
        definition.validate()?;
        Ok(definition)
    }
}

impl ActionDefinition {
    pub fn builder(action_id: impl Into<String>) -> ActionDefinitionBuilder {
        ActionDefinitionBuilder::new(action_id)
    }

    pub fn action_id(&self) -> &str {
        &self.action_id
    }

    pub fn steps(&self) -> &[ActionDefinitionStep] {
        &self.steps
    }

    pub fn input_data_shape(&self) -> Option<&DataShape> {
        self.input_data_shape.as_ref()
    }

    pub fn output_data_shape(&self) -> Option<&DataShape> {
        self.output_data_shape.as_ref()
    }

    /// Property names across all steps in display order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().flat_map(|s| s.properties.keys().map(String::as_str))
    }

    /// First catalog entry registered under `name`.
    pub fn property(&self, name: &str) -> Option<&ConfigurationProperty> {
        self.steps.iter().find_map(|s| s.property(name))
    }

    /// Names of required properties that `is_resolved` does not accept.
    pub fn unresolved_required<F>(&self, mut is_resolved: F) -> Vec<&str>
    where
        F: FnMut(&str) -> bool,
    {
        self.steps
            .iter()
            .flat_map(|s| s.properties.iter())
            .filter(|(name, p)| p.required && !is_resolved(name))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// New definition with every catalog entry replaced by `f`. Step layout,
    /// property names and data shapes are carried over unchanged.
    pub fn map_properties<F>(&self, mut f: F) -> ActionDefinition
    where
        F: FnMut(&str, &ConfigurationProperty) -> ConfigurationProperty,
    {
        let steps = self
            .steps
            .iter()
            .map(|step| ActionDefinitionStep {
                title: step.title.clone(),
                description: step.description.clone(),
                properties: step
                    .properties
                    .iter()
                    .map(|(name, property)| (name.clone(), f(name, property)))
                    .collect(),
            })
            .collect();

        ActionDefinition {
            action_id: self.action_id.clone(),
            input_data_shape: self.input_data_shape.clone(),
            output_data_shape: self.output_data_shape.clone(),
            steps,
        }
    }

    /// Replace the input data shape, keeping every other part.
    pub fn with_input_data_shape(self, shape: DataShape) -> Result<ActionDefinition, ConfigurationError> {
        shape.check(&self.action_id, "input")?;
        Ok(ActionDefinition { input_data_shape: Some(shape), ..self })
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.action_id.trim().is_empty() {
            return Err(ConfigurationError::malformed("<unnamed>", "action id is empty"));
        }
        if let Some(shape) = &self.input_data_shape {
            shape.check(&self.action_id, "input")?;
        }
        if let Some(shape) = &self.output_data_shape {
            shape.check(&self.action_id, "output")?;
        }
        for step in &self.steps {
            if step.title.trim().is_empty() {
                return Err(ConfigurationError::malformed(&self.action_id, "step with an empty title"));
            }
            if step.properties.keys().any(|name| name.trim().is_empty()) {
                return Err(ConfigurationError::malformed(
                    &self.action_id,
                    format!("step '{}' has a property with an empty name", step.title),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct ActionDefinitionBuilder {
    action_id: String,
    input_data_shape: Option<DataShape>,
    output_data_shape: Option<DataShape>,
    steps: Vec<StepBuilder>,
}

impl ActionDefinitionBuilder {
    fn new(action_id: impl Into<String>) -> Self {
        Self { action_id: action_id.into(), input_data_shape: None, output_data_shape: None, steps: Vec::new() }
    }

    pub fn input_data_shape(mut self, shape: DataShape) -> Self {
        self.input_data_shape = Some(shape);
        self
    }

    pub fn output_data_shape(mut self, shape: DataShape) -> Self {
        self.output_data_shape = Some(shape);
        self
    }

    pub fn step<F>(mut self, title: impl Into<String>, description: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(StepBuilder) -> StepBuilder,
    {
        self.steps.push(f(StepBuilder::new(title.into(), description.into())));
        self
    }

    pub fn build(self) -> Result<ActionDefinition, ConfigurationError> {
        let action_id = self.action_id;
        let steps = self
            .steps
            .into_iter()
            .map(|s| s.build(&action_id))
            .collect::<Result<Vec<_>, _>>()?;

        let definition = ActionDefinition {
            action_id,
            input_data_shape: self.input_data_shape,
            output_data_shape: self.output_data_shape,
            steps,
        };
        definition.validate()?;
        Ok(definition)
    }
}

/// Action offered by a connector, wrapping its definition template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorAction {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub definition: ActionDefinition,
}

impl ConnectorAction {
    pub fn id(&self) -> &str {
        self.definition.action_id()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub actions: Vec<ConnectorAction>,
}

impl Connector {
    pub fn find_action(&self, action_id: &str) -> Option<&ConnectorAction> {
        self.actions.iter().find(|a| a.id() == action_id)
    }
}

/// Configured instance of a connector; its properties are the base config
/// for every enrichment against the connector's actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub connector_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub configured_properties: IndexMap<String, JsonValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object_name() -> ConfigurationProperty {
        ConfigurationProperty::builder()
            .kind("parameter")
            .display_name("Salesforce object type")
            .group("common")
            .required(true)
            .property_type("string")
            .java_type_hint("java.lang.String")
            .description("Salesforce object type to create")
            .build()
    }

    #[test]
    fn builder_keeps_step_and_property_order() {
        let definition = ActionDefinition::builder("create-or-update")
            .step("Select object", "Pick the object type", |s| {
                s.property("sObjectName", object_name()).property("batch", ConfigurationProperty::default())
            })
            .step("Select identifier", "", |s| s.property("sObjectIdName", ConfigurationProperty::default()))
            .build()
            .unwrap();

        let names: Vec<&str> = definition.property_names().collect();
        assert_eq!(names, vec!["sObjectName", "batch", "sObjectIdName"]);
        assert_eq!(definition.steps()[1].title(), "Select identifier");
    }

    #[test]
    fn duplicate_property_in_step_is_malformed() {
        let err = ActionDefinition::builder("a")
            .step("One", "", |s| s.property("x", object_name()).property("x", object_name()))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::MalformedTemplate { ref reason, .. } if reason.contains("'x'")));
    }

    #[test]
    fn specification_without_type_is_rejected() {
        let err = ActionDefinition::builder("a")
            .input_data_shape(DataShape::new("json-schema").with_specification("{}"))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("without a type"));
    }

    #[test]
    fn deserialization_validates() {
        let bad = json!({"actionId": "", "steps": []});
        assert!(serde_json::from_value::<ActionDefinition>(bad).is_err());

        let good = json!({
            "actionId": "a",
            "inputDataShape": {"kind": "json-schema"},
            "steps": [{"title": "One", "properties": {"x": {"displayName": "X", "required": true}}}]
        });
        let definition: ActionDefinition = serde_json::from_value(good).unwrap();
        assert!(definition.property("x").unwrap().required);
    }

    #[test]
    fn serialized_form_uses_wire_names() {
        let property = object_name().with_candidates(vec![PropertyValue::new("Account", "Accounts")]);
        let value = serde_json::to_value(&property).unwrap();
        assert_eq!(value["displayName"], "Salesforce object type");
        assert_eq!(value["javaType"], "java.lang.String");
        assert_eq!(value["componentProperty"], false);
        assert_eq!(value["enum"], json!([{"value": "Account", "label": "Accounts"}]));
    }

    #[test]
    fn property_value_accepts_display_value() {
        let v: PropertyValue = serde_json::from_value(json!({"value": "Id", "displayValue": "Contact ID"})).unwrap();
        assert_eq!(v, PropertyValue::new("Id", "Contact ID"));
    }

    #[test]
    fn pinned_value_renders_scalars() {
        assert_eq!(PropertyValue::pinned(&json!("Contact")), PropertyValue::new("Contact", "Contact"));
        assert_eq!(PropertyValue::pinned(&json!(42)), PropertyValue::new("42", "42"));
    }

    #[test]
    fn unresolved_required_lists_missing() {
        let definition = ActionDefinition::builder("a")
            .step("One", "", |s| s.property("x", object_name()).property("y", ConfigurationProperty::default()))
            .build()
            .unwrap();
        assert_eq!(definition.unresolved_required(|_| false), vec!["x"]);
        assert!(definition.unresolved_required(|n| n == "x").is_empty());
    }
}
