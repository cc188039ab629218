//! Geometry schema helpers
//!
//! Conventions shared by every imageable prim the mirror authors: a single
//! `xformOp:transform` op, constant display color and opacity primvars, and
//! visibility.

use super::{Attribute, Prim, UsdError, Value};
use crate::foundation::math::Mat4d;

/// Name of the single transform op
pub const TRANSFORM_OP: &str = "xformOp:transform";
/// Transform op order attribute
pub const XFORM_OP_ORDER: &str = "xformOpOrder";
/// Display color primvar
pub const DISPLAY_COLOR: &str = "primvars:displayColor";
/// Display opacity primvar
pub const DISPLAY_OPACITY: &str = "primvars:displayOpacity";
/// Visibility attribute
pub const VISIBILITY: &str = "visibility";

/// Visibility tokens
pub mod visibility {
    /// Visible unless an ancestor is hidden
    pub const INHERITED: &str = "inherited";
    /// Hidden
    pub const INVISIBLE: &str = "invisible";
}

/// Author the local transform as a row-vector matrix
///
/// The op order is authored on first use and left alone afterwards.
pub fn set_transform(prim: &mut Prim, matrix: Mat4d) -> Result<(), UsdError> {
    prim.set_attribute(TRANSFORM_OP, Value::Matrix4d(matrix))?;
    if prim.attribute(XFORM_OP_ORDER).is_none() {
        prim.create_attribute(
            XFORM_OP_ORDER,
            Attribute::new(Value::TokenArray(vec![TRANSFORM_OP.to_string()])).uniform(),
        )?;
    }
    Ok(())
}

/// Authored local transform
pub fn transform(prim: &Prim) -> Option<Mat4d> {
    prim.get(TRANSFORM_OP).and_then(Value::as_matrix).copied()
}

/// Author a constant display color
pub fn set_display_color(prim: &mut Prim, color: [f32; 3]) -> Result<(), UsdError> {
    set_constant_primvar(prim, DISPLAY_COLOR, Value::Color3fArray(vec![color]))
}

/// Author a constant display opacity
pub fn set_display_opacity(prim: &mut Prim, opacity: f32) -> Result<(), UsdError> {
    set_constant_primvar(prim, DISPLAY_OPACITY, Value::FloatArray(vec![opacity]))
}

/// Author visibility
pub fn set_visible(prim: &mut Prim, visible: bool) -> Result<(), UsdError> {
    let token = if visible {
        visibility::INHERITED
    } else {
        visibility::INVISIBLE
    };
    prim.set_attribute(VISIBILITY, Value::token(token))
}

/// Whether the prim is authored visible
pub fn is_visible(prim: &Prim) -> bool {
    prim.get(VISIBILITY).and_then(Value::as_str) != Some(visibility::INVISIBLE)
}

fn set_constant_primvar(prim: &mut Prim, name: &str, value: Value) -> Result<(), UsdError> {
    if prim.attribute(name).is_some() {
        prim.set_attribute(name, value)
    } else {
        prim.create_attribute(name, Attribute::new(value).with_interpolation("constant"))
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usd::{SdfPath, Stage};

    fn prim(stage: &mut Stage) -> &mut Prim {
        let key = stage.define_prim(&SdfPath::new("/Ball").unwrap(), "Sphere").unwrap();
        stage.prim_mut(key).unwrap()
    }

    #[test]
    fn test_transform_authors_op_order_once() {
        let mut stage = Stage::create_in_memory();
        let prim = prim(&mut stage);

        let mut moved = Mat4d::identity();
        moved[(3, 0)] = 2.0;
        set_transform(prim, Mat4d::identity()).unwrap();
        set_transform(prim, moved).unwrap();

        assert_eq!(transform(prim), Some(moved));
        assert_eq!(
            prim.get(XFORM_OP_ORDER),
            Some(&Value::TokenArray(vec![TRANSFORM_OP.to_string()]))
        );
    }

    #[test]
    fn test_primvars_keep_constant_interpolation() {
        let mut stage = Stage::create_in_memory();
        let prim = prim(&mut stage);

        set_display_color(prim, [1.0, 0.0, 0.0]).unwrap();
        set_display_color(prim, [0.0, 1.0, 0.0]).unwrap();
        set_display_opacity(prim, 0.5).unwrap();

        let color = prim.attribute(DISPLAY_COLOR).unwrap();
        assert_eq!(color.interpolation(), Some("constant"));
        assert_eq!(color.value(), Some(&Value::Color3fArray(vec![[0.0, 1.0, 0.0]])));
        assert_eq!(prim.get(DISPLAY_OPACITY), Some(&Value::FloatArray(vec![0.5])));
    }

    #[test]
    fn test_visibility_tokens() {
        let mut stage = Stage::create_in_memory();
        let prim = prim(&mut stage);
        assert!(is_visible(prim));

        set_visible(prim, false).unwrap();
        assert!(!is_visible(prim));
        set_visible(prim, true).unwrap();
        assert_eq!(prim.get(VISIBILITY), Some(&Value::token(visibility::INHERITED)));
    }
}
