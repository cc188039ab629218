//! Shared texture materials
//!
//! Each extracted texture becomes one preview-surface material. Geometry
//! nodes that carry the texture bind to it instead of owning a copy.

use crate::assets::TextureAsset;
use crate::usd::{Attribute, Prim, PrimKey, SdfPath, Stage, UsdError, Value};

/// Relationship that binds a material to a geometry prim
pub const MATERIAL_BINDING: &str = "material:binding";
/// API schema required on bound prims
pub const MATERIAL_BINDING_API: &str = "MaterialBindingAPI";

/// One material per texture slot, in slot order
#[derive(Debug, Clone, Default)]
pub struct MaterialLibrary {
    materials: Vec<(PrimKey, SdfPath)>,
}

impl MaterialLibrary {
    /// Define `<looks>/texture_<i>` for every texture
    pub(crate) fn define(stage: &mut Stage, looks: &SdfPath, textures: &[TextureAsset]) -> Result<Self, UsdError> {
        let mut materials = Vec::with_capacity(textures.len());
        for texture in textures {
            let path = looks.append_child(&format!("texture_{}", texture.texid))?;
            let key = define_material(stage, &path, texture)?;
            log::debug!("Defined material {} for {:?}", path, texture.path);
            materials.push((key, path));
        }
        Ok(Self { materials })
    }

    /// Number of materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the library is empty
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Path of the material for texture `texid`
    pub fn material_path(&self, texid: usize) -> Option<&SdfPath> {
        self.materials.get(texid).map(|(_, path)| path)
    }

    /// Material prim for texture `texid`
    pub fn material_prim(&self, texid: usize) -> Option<PrimKey> {
        self.materials.get(texid).map(|(key, _)| *key)
    }

    /// Bind the material of texture `texid` to `prim`
    ///
    /// Returns `false` when the texture has no material.
    pub fn bind(&self, prim: &mut Prim, texid: usize) -> Result<bool, UsdError> {
        let Some(path) = self.material_path(texid) else {
            return Ok(false);
        };
        prim.apply_api(MATERIAL_BINDING_API);
        prim.set_relationship(MATERIAL_BINDING, vec![path.clone()])?;
        Ok(true)
    }
}

fn define_shader(stage: &mut Stage, path: &SdfPath, id: &str) -> Result<PrimKey, UsdError> {
    let key = stage.define_prim(path, "Shader")?;
    stage
        .expect_prim_mut(key)?
        .create_attribute("info:id", Attribute::new(Value::token(id)).uniform())?;
    Ok(key)
}

fn define_material(stage: &mut Stage, path: &SdfPath, texture: &TextureAsset) -> Result<PrimKey, UsdError> {
    let material = stage.define_prim(path, "Material")?;

    let surface_path = path.append_child("PreviewSurface")?;
    let reader_path = path.append_child("TexCoordReader")?;
    let texture_path = path.append_child("Texture")?;

    let surface = define_shader(stage, &surface_path, "UsdPreviewSurface")?;
    let reader = define_shader(stage, &reader_path, "UsdPrimvarReader_float2")?;
    let sampler = define_shader(stage, &texture_path, "UsdUVTexture")?;

    let prim = stage.expect_prim_mut(reader)?;
    prim.set_attribute("inputs:varname", Value::token("st"))?;
    prim.create_attribute("outputs:result", Attribute::declared("float2"))?;

    let prim = stage.expect_prim_mut(sampler)?;
    prim.set_attribute("inputs:file", Value::Asset(texture.path.display().to_string()))?;
    prim.create_attribute(
        "inputs:st",
        Attribute::declared("float2").connected_to(reader_path.append_property("outputs:result")?),
    )?;
    prim.set_attribute("inputs:wrapS", Value::token("repeat"))?;
    prim.set_attribute("inputs:wrapT", Value::token("repeat"))?;
    prim.create_attribute("outputs:rgb", Attribute::declared("float3"))?;

    let prim = stage.expect_prim_mut(surface)?;
    prim.create_attribute(
        "inputs:diffuseColor",
        Attribute::declared("color3f").connected_to(texture_path.append_property("outputs:rgb")?),
    )?;
    prim.set_attribute("inputs:roughness", Value::Float(1.0))?;
    prim.set_attribute("inputs:metallic", Value::Float(0.0))?;
    prim.create_attribute("outputs:surface", Attribute::declared("token"))?;

    stage.expect_prim_mut(material)?.create_attribute(
        "outputs:surface",
        Attribute::declared("token").connected_to(surface_path.append_property("outputs:surface")?),
    )?;

    Ok(material)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn library(stage: &mut Stage) -> MaterialLibrary {
        let looks = SdfPath::new("/Looks").unwrap();
        stage.define_prim(&looks, "Scope").unwrap();
        let textures = vec![
            TextureAsset { texid: 0, path: PathBuf::from("/tmp/0.png"), width: 4, height: 4 },
            TextureAsset { texid: 1, path: PathBuf::from("/tmp/1.png"), width: 2, height: 2 },
        ];
        MaterialLibrary::define(stage, &looks, &textures).unwrap()
    }

    #[test]
    fn test_one_material_per_texture() {
        let mut stage = Stage::create_in_memory();
        let library = library(&mut stage);

        assert_eq!(library.len(), 2);
        assert_eq!(stage.count_prims_of_type("Material"), 2);
        assert_eq!(stage.count_prims_of_type("Shader"), 6);
        assert_eq!(library.material_path(1).unwrap().as_str(), "/Looks/texture_1");

        let sampler = stage
            .prim_at_path(&SdfPath::new("/Looks/texture_1/Texture").unwrap())
            .and_then(|key| stage.prim(key))
            .unwrap();
        assert_eq!(sampler.get("inputs:file"), Some(&Value::Asset("/tmp/1.png".into())));
        assert_eq!(
            sampler.attribute("inputs:st").unwrap().connections()[0].as_str(),
            "/Looks/texture_1/TexCoordReader.outputs:result"
        );
    }

    #[test]
    fn test_bind_sets_relationship() {
        let mut stage = Stage::create_in_memory();
        let library = library(&mut stage);
        let key = stage.define_prim(&SdfPath::new("/ball").unwrap(), "Sphere").unwrap();
        let prim = stage.prim_mut(key).unwrap();

        assert!(library.bind(prim, 0).unwrap());
        assert!(prim.has_api(MATERIAL_BINDING_API));
        assert_eq!(prim.relationship(MATERIAL_BINDING).unwrap()[0].as_str(), "/Looks/texture_0");

        assert!(!library.bind(prim, 7).unwrap());
    }

    #[test]
    fn test_material_surface_is_connected() {
        let mut stage = Stage::create_in_memory();
        library(&mut stage);
        let text = stage.export_to_string();

        assert!(text.contains(
            "token outputs:surface.connect = </Looks/texture_0/PreviewSurface.outputs:surface>"
        ));
        assert!(text.contains("asset inputs:file = @/tmp/0.png@"));
        assert!(text.contains("uniform token info:id = \"UsdUVTexture\""));
    }
}
