//! Scene description paths

use std::fmt;

use super::UsdError;

/// Absolute path to a prim (`/World/Geoms/sphere_2`) or to one of its
/// properties (`/World/Looks/texture_0/surface.outputs:surface`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SdfPath(String);

impl SdfPath {
    /// The absolute root path `/`
    pub fn absolute_root() -> Self {
        Self("/".to_string())
    }

    /// Parse and validate an absolute path
    pub fn new(path: &str) -> Result<Self, UsdError> {
        let invalid = || UsdError::InvalidPath(path.to_string());

        if path == "/" {
            return Ok(Self::absolute_root());
        }
        let body = path.strip_prefix('/').ok_or_else(invalid)?;

        let (prim_part, property) = match body.split_once('.') {
            Some((prim_part, property)) => (prim_part, Some(property)),
            None => (body, None),
        };

        if !prim_part.split('/').all(is_valid_identifier) {
            return Err(invalid());
        }
        if let Some(property) = property {
            if !is_valid_property_name(property) {
                return Err(invalid());
            }
        }

        Ok(Self(path.to_string()))
    }

    /// Path of child prim `name`
    pub fn append_child(&self, name: &str) -> Result<Self, UsdError> {
        if self.is_property_path() || !is_valid_identifier(name) {
            return Err(UsdError::InvalidPath(format!("{}/{}", self.0, name)));
        }
        if self.is_root() {
            Ok(Self(format!("/{name}")))
        } else {
            Ok(Self(format!("{}/{}", self.0, name)))
        }
    }

    /// Path of property `name` on this prim
    pub fn append_property(&self, name: &str) -> Result<Self, UsdError> {
        if self.is_root() || self.is_property_path() || !is_valid_property_name(name) {
            return Err(UsdError::InvalidPath(format!("{}.{}", self.0, name)));
        }
        Ok(Self(format!("{}.{}", self.0, name)))
    }

    /// Whether this is the absolute root
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Whether this path names a property
    pub fn is_property_path(&self) -> bool {
        self.0.contains('.')
    }

    /// Prim part of the path
    pub fn prim_path(&self) -> Self {
        match self.0.split_once('.') {
            Some((prim, _)) => Self(prim.to_string()),
            None => self.clone(),
        }
    }

    /// Parent prim path; the root has none
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        if self.is_property_path() {
            return Some(self.prim_path());
        }
        match self.0.rfind('/') {
            Some(0) => Some(Self::absolute_root()),
            Some(index) => Some(Self(self.0[..index].to_string())),
            None => None,
        }
    }

    /// Last element: the prim name, or the property name for property paths
    pub fn name(&self) -> &str {
        if let Some((_, property)) = self.0.split_once('.') {
            return property;
        }
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// Borrow the path text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SdfPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether `name` is a valid prim name
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Whether `name` is a valid, possibly namespaced, property name
pub fn is_valid_property_name(name: &str) -> bool {
    name.split(':').all(is_valid_identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prim_and_property_paths() {
        let prim = SdfPath::new("/World/Geoms/sphere_2").unwrap();
        assert_eq!(prim.name(), "sphere_2");
        assert_eq!(prim.parent().unwrap().as_str(), "/World/Geoms");
        assert!(!prim.is_property_path());

        let property = SdfPath::new("/World/Looks/texture_0/surface.outputs:surface").unwrap();
        assert!(property.is_property_path());
        assert_eq!(property.name(), "outputs:surface");
        assert_eq!(property.prim_path().as_str(), "/World/Looks/texture_0/surface");
    }

    #[test]
    fn test_rejects_malformed_paths() {
        assert!(SdfPath::new("World").is_err());
        assert!(SdfPath::new("/World//Geoms").is_err());
        assert!(SdfPath::new("/2cool").is_err());
        assert!(SdfPath::new("/World.outputs:").is_err());
    }

    #[test]
    fn test_append() {
        let root = SdfPath::absolute_root();
        let world = root.append_child("World").unwrap();
        assert_eq!(world.as_str(), "/World");
        assert_eq!(world.parent().unwrap(), root);

        let attr = world.append_property("xformOp:transform").unwrap();
        assert_eq!(attr.as_str(), "/World.xformOp:transform");
        assert!(attr.append_child("Child").is_err());
        assert!(world.append_child("bad name").is_err());
    }
}
