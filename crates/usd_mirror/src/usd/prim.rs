//! Prims, attributes and relationships

use std::collections::BTreeMap;

use super::path::is_valid_property_name;
use super::{PrimKey, SdfPath, UsdError, Value};

/// Whether an attribute may vary over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variability {
    /// Ordinary attribute
    #[default]
    Varying,
    /// `uniform` attribute
    Uniform,
}

/// Typed attribute with an optional default value and connections
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    type_name: String,
    variability: Variability,
    value: Option<Value>,
    connections: Vec<SdfPath>,
    interpolation: Option<String>,
}

impl Attribute {
    /// Attribute holding `value`, typed after it
    pub fn new(value: Value) -> Self {
        Self {
            type_name: value.type_name().to_string(),
            variability: Variability::Varying,
            value: Some(value),
            connections: Vec::new(),
            interpolation: None,
        }
    }

    /// Attribute declared with a type but no value (shader outputs)
    pub fn declared(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            variability: Variability::Varying,
            value: None,
            connections: Vec::new(),
            interpolation: None,
        }
    }

    /// Make the attribute `uniform`
    pub fn uniform(mut self) -> Self {
        self.variability = Variability::Uniform;
        self
    }

    /// Attach primvar interpolation metadata
    pub fn with_interpolation(mut self, interpolation: impl Into<String>) -> Self {
        self.interpolation = Some(interpolation.into());
        self
    }

    /// Connect the attribute to a property path
    pub fn connected_to(mut self, source: SdfPath) -> Self {
        self.connections.push(source);
        self
    }

    /// Type name, e.g. `color3f[]`
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Variability
    pub fn variability(&self) -> Variability {
        self.variability
    }

    /// Default value
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Connection sources
    pub fn connections(&self) -> &[SdfPath] {
        &self.connections
    }

    /// Primvar interpolation
    pub fn interpolation(&self) -> Option<&str> {
        self.interpolation.as_deref()
    }

    /// Replace the value; the type must match the declared type
    pub fn set(&mut self, value: Value) -> Result<(), UsdError> {
        if value.type_name() != self.type_name {
            return Err(UsdError::TypeMismatch {
                expected: self.type_name.clone(),
                actual: value.type_name().to_string(),
            });
        }
        self.value = Some(value);
        Ok(())
    }
}

/// Scene description node
#[derive(Debug, Clone, PartialEq)]
pub struct Prim {
    path: SdfPath,
    type_name: String,
    api_schemas: Vec<String>,
    attributes: BTreeMap<String, Attribute>,
    relationships: BTreeMap<String, Vec<SdfPath>>,
    pub(crate) children: Vec<PrimKey>,
}

impl Prim {
    pub(crate) fn new(path: SdfPath, type_name: impl Into<String>) -> Self {
        Self {
            path,
            type_name: type_name.into(),
            api_schemas: Vec::new(),
            attributes: BTreeMap::new(),
            relationships: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Absolute path
    pub fn path(&self) -> &SdfPath {
        &self.path
    }

    /// Prim name
    pub fn name(&self) -> &str {
        self.path.name()
    }

    /// Schema type name, e.g. `Sphere`
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub(crate) fn set_type_name(&mut self, type_name: &str) {
        self.type_name = type_name.to_string();
    }

    /// Applied API schemas
    pub fn api_schemas(&self) -> &[String] {
        &self.api_schemas
    }

    /// Apply an API schema such as `MaterialBindingAPI`
    pub fn apply_api(&mut self, schema: &str) {
        if !self.has_api(schema) {
            self.api_schemas.push(schema.to_string());
        }
    }

    /// Whether `schema` is applied
    pub fn has_api(&self, schema: &str) -> bool {
        self.api_schemas.iter().any(|s| s == schema)
    }

    /// Create or replace attribute `name`
    pub fn create_attribute(&mut self, name: &str, attribute: Attribute) -> Result<&mut Attribute, UsdError> {
        check_property_name(name)?;
        self.attributes.insert(name.to_string(), attribute);
        self.attributes
            .get_mut(name)
            .ok_or_else(|| UsdError::InvalidPropertyName(name.to_string()))
    }

    /// Set the value of attribute `name`, creating it typed after `value` if needed
    pub fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), UsdError> {
        match self.attributes.get_mut(name) {
            Some(attribute) => attribute.set(value).map_err(|err| match err {
                UsdError::TypeMismatch { expected, actual } => UsdError::AttributeTypeMismatch {
                    attribute: self.path.append_property(name).map_or_else(|_| name.to_string(), |p| p.to_string()),
                    expected,
                    actual,
                },
                other => other,
            }),
            None => self.create_attribute(name, Attribute::new(value)).map(|_| ()),
        }
    }

    /// Attribute `name`
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Default value of attribute `name`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name).and_then(Attribute::value)
    }

    /// Attributes in name order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.attributes.iter().map(|(name, attribute)| (name.as_str(), attribute))
    }

    /// Author relationship `name` with `targets`
    pub fn set_relationship(&mut self, name: &str, targets: Vec<SdfPath>) -> Result<(), UsdError> {
        check_property_name(name)?;
        self.relationships.insert(name.to_string(), targets);
        Ok(())
    }

    /// Targets of relationship `name`
    pub fn relationship(&self, name: &str) -> Option<&[SdfPath]> {
        self.relationships.get(name).map(Vec::as_slice)
    }

    /// Relationships in name order
    pub fn relationships(&self) -> impl Iterator<Item = (&str, &[SdfPath])> {
        self.relationships.iter().map(|(name, targets)| (name.as_str(), targets.as_slice()))
    }

    /// Child prims in definition order
    pub fn children(&self) -> &[PrimKey] {
        &self.children
    }
}

fn check_property_name(name: &str) -> Result<(), UsdError> {
    if is_valid_property_name(name) {
        Ok(())
    } else {
        Err(UsdError::InvalidPropertyName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prim() -> Prim {
        Prim::new(SdfPath::new("/World").unwrap(), "Xform")
    }

    #[test]
    fn test_set_attribute_creates_then_updates() {
        let mut prim = prim();
        prim.set_attribute("radius", Value::Double(1.0)).unwrap();
        prim.set_attribute("radius", Value::Double(2.0)).unwrap();

        assert_eq!(prim.get("radius"), Some(&Value::Double(2.0)));
        assert_eq!(prim.attributes().count(), 1);
    }

    #[test]
    fn test_set_attribute_rejects_type_change() {
        let mut prim = prim();
        prim.set_attribute("radius", Value::Double(1.0)).unwrap();

        let err = prim.set_attribute("radius", Value::Float(1.0)).unwrap_err();
        assert!(matches!(err, UsdError::AttributeTypeMismatch { .. }));
        assert_eq!(prim.get("radius"), Some(&Value::Double(1.0)));
    }

    #[test]
    fn test_uniform_attribute_keeps_variability_on_update() {
        let mut prim = prim();
        prim.create_attribute("purpose", Attribute::new(Value::token("default")).uniform())
            .unwrap();
        prim.set_attribute("purpose", Value::token("render")).unwrap();

        let attribute = prim.attribute("purpose").unwrap();
        assert_eq!(attribute.variability(), Variability::Uniform);
        assert_eq!(attribute.value().and_then(Value::as_str), Some("render"));
    }

    #[test]
    fn test_invalid_property_name() {
        let mut prim = prim();
        assert!(matches!(
            prim.set_attribute("bad name", Value::Int(1)),
            Err(UsdError::InvalidPropertyName(_))
        ));
    }

    #[test]
    fn test_api_schema_applied_once() {
        let mut prim = prim();
        prim.apply_api("MaterialBindingAPI");
        prim.apply_api("MaterialBindingAPI");
        assert_eq!(prim.api_schemas(), ["MaterialBindingAPI".to_string()]);
    }
}
