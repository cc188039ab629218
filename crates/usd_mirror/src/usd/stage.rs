//! Stage: the in-memory scene description layer
//!
//! Prims live in a slotmap arena and are addressed by [`PrimKey`]; a path
//! index resolves [`SdfPath`]s. The stage is backed by one `.usda` file that
//! [`Stage::save`] overwrites with the current contents.

use slotmap::SlotMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{writer, Prim, PrimKey, SdfPath, UpAxis, UsdError};

/// Scene description stage with a single root layer
#[derive(Debug, Clone)]
pub struct Stage {
    root_layer: Option<PathBuf>,
    up_axis: UpAxis,
    default_prim: Option<String>,
    prims: SlotMap<PrimKey, Prim>,
    roots: Vec<PrimKey>,
    index: HashMap<SdfPath, PrimKey>,
}

impl Stage {
    /// Create a new stage backed by `path`
    ///
    /// The empty layer is written immediately, so an unwritable location
    /// fails here rather than at the first save.
    pub fn create_new(path: impl Into<PathBuf>) -> Result<Self, UsdError> {
        let stage = Self {
            root_layer: Some(path.into()),
            ..Self::create_in_memory()
        };
        stage.save()?;

        log::debug!("Created stage {:?}", stage.root_layer);
        Ok(stage)
    }

    /// Create a stage that only lives in memory
    pub fn create_in_memory() -> Self {
        Self {
            root_layer: None,
            up_axis: UpAxis::default(),
            default_prim: None,
            prims: SlotMap::with_key(),
            roots: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Backing file of the root layer
    pub fn root_layer_path(&self) -> Option<&Path> {
        self.root_layer.as_deref()
    }

    /// Up axis stage metadata
    pub fn up_axis(&self) -> UpAxis {
        self.up_axis
    }

    /// Set the up axis stage metadata
    pub fn set_up_axis(&mut self, up_axis: UpAxis) {
        self.up_axis = up_axis;
    }

    /// Default prim stage metadata
    pub fn default_prim(&self) -> Option<&str> {
        self.default_prim.as_deref()
    }

    /// Set the default prim; it must be a root prim name
    pub fn set_default_prim(&mut self, name: &str) -> Result<(), UsdError> {
        let path = SdfPath::absolute_root().append_child(name)?;
        if !self.index.contains_key(&path) {
            return Err(UsdError::UnknownPrim(path.to_string()));
        }
        self.default_prim = Some(name.to_string());
        Ok(())
    }

    /// Define a prim of `type_name` at `path`
    ///
    /// The parent must already exist. Defining an existing path updates its
    /// type and returns the existing prim.
    pub fn define_prim(&mut self, path: &SdfPath, type_name: &str) -> Result<PrimKey, UsdError> {
        if path.is_root() || path.is_property_path() {
            return Err(UsdError::NotAPrimPath(path.to_string()));
        }

        if let Some(&key) = self.index.get(path) {
            if let Some(prim) = self.prims.get_mut(key) {
                prim.set_type_name(type_name);
            }
            return Ok(key);
        }

        let parent_path = path
            .parent()
            .ok_or_else(|| UsdError::NotAPrimPath(path.to_string()))?;
        let parent = if parent_path.is_root() {
            None
        } else {
            Some(
                *self
                    .index
                    .get(&parent_path)
                    .ok_or_else(|| UsdError::MissingParent(path.to_string()))?,
            )
        };

        let key = self.prims.insert(Prim::new(path.clone(), type_name));
        self.index.insert(path.clone(), key);
        match parent.and_then(|parent| self.prims.get_mut(parent)) {
            Some(parent) => parent.children.push(key),
            None => self.roots.push(key),
        }

        log::trace!("Defined {} prim {}", type_name, path);
        Ok(key)
    }

    /// Prim by key
    pub fn prim(&self, key: PrimKey) -> Option<&Prim> {
        self.prims.get(key)
    }

    /// Mutable prim by key
    pub fn prim_mut(&mut self, key: PrimKey) -> Option<&mut Prim> {
        self.prims.get_mut(key)
    }

    /// Mutable prim by key, failing with [`UsdError::UnknownPrim`]
    pub fn expect_prim_mut(&mut self, key: PrimKey) -> Result<&mut Prim, UsdError> {
        self.prims
            .get_mut(key)
            .ok_or_else(|| UsdError::UnknownPrim(format!("{key:?}")))
    }

    /// Key of the prim at `path`
    pub fn prim_at_path(&self, path: &SdfPath) -> Option<PrimKey> {
        self.index.get(path).copied()
    }

    /// Number of prims on the stage
    pub fn prim_count(&self) -> usize {
        self.prims.len()
    }

    /// Number of prims of schema type `type_name`
    pub fn count_prims_of_type(&self, type_name: &str) -> usize {
        self.prims.values().filter(|prim| prim.type_name() == type_name).count()
    }

    /// Root prims in definition order
    pub fn root_prims(&self) -> &[PrimKey] {
        &self.roots
    }

    /// Depth-first, pre-order walk over every prim
    pub fn traverse(&self) -> PrimIter<'_> {
        PrimIter {
            stage: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Render the root layer as `.usda` text
    pub fn export_to_string(&self) -> String {
        writer::write_layer(self)
    }

    /// Overwrite the backing file with the current contents
    pub fn save(&self) -> Result<(), UsdError> {
        let path = self.root_layer.as_ref().ok_or(UsdError::NoBackingFile)?;
        std::fs::write(path, self.export_to_string()).map_err(|source| UsdError::Io {
            path: path.display().to_string(),
            source,
        })?;

        log::debug!("Saved stage to {:?} ({} prims)", path, self.prim_count());
        Ok(())
    }
}

/// Iterator returned by [`Stage::traverse`]
pub struct PrimIter<'a> {
    stage: &'a Stage,
    stack: Vec<PrimKey>,
}

impl<'a> Iterator for PrimIter<'a> {
    type Item = (PrimKey, &'a Prim);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.stack.pop()?;
        let prim = self.stage.prims.get(key)?;
        self.stack.extend(prim.children.iter().rev().copied());
        Some((key, prim))
    }
}
