//! Typed attribute values and their `.usda` literal form

use std::fmt::{self, Write};

use crate::foundation::math::Mat4d;

/// Attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `bool`
    Bool(bool),
    /// `int`
    Int(i32),
    /// `float`
    Float(f32),
    /// `double`
    Double(f64),
    /// `float2`
    Float2([f32; 2]),
    /// `float3`
    Float3([f32; 3]),
    /// `color3f`
    Color3f([f32; 3]),
    /// `token`
    Token(String),
    /// `asset`
    Asset(String),
    /// `int[]`
    IntArray(Vec<i32>),
    /// `float[]`
    FloatArray(Vec<f32>),
    /// `token[]`
    TokenArray(Vec<String>),
    /// `point3f[]`
    Point3fArray(Vec<[f32; 3]>),
    /// `color3f[]`
    Color3fArray(Vec<[f32; 3]>),
    /// `texCoord2f[]`
    TexCoord2fArray(Vec<[f32; 2]>),
    /// `matrix4d`, row-vector convention
    Matrix4d(Mat4d),
}

impl Value {
    /// Scene description type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Float2(_) => "float2",
            Value::Float3(_) => "float3",
            Value::Color3f(_) => "color3f",
            Value::Token(_) => "token",
            Value::Asset(_) => "asset",
            Value::IntArray(_) => "int[]",
            Value::FloatArray(_) => "float[]",
            Value::TokenArray(_) => "token[]",
            Value::Point3fArray(_) => "point3f[]",
            Value::Color3fArray(_) => "color3f[]",
            Value::TexCoord2fArray(_) => "texCoord2f[]",
            Value::Matrix4d(_) => "matrix4d",
        }
    }

    /// Token value
    pub fn token(value: impl Into<String>) -> Self {
        Value::Token(value.into())
    }

    /// Get as `float`
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as `double`
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as `bool`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get a `token` or `asset` as text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Token(v) | Value::Asset(v) => Some(v),
            _ => None,
        }
    }

    /// Get as `matrix4d`
    pub fn as_matrix(&self) -> Option<&Mat4d> {
        match self {
            Value::Matrix4d(m) => Some(m),
            _ => None,
        }
    }

    /// Get any three-component value (`float3`, `color3f`)
    pub fn as_vec3(&self) -> Option<[f32; 3]> {
        match self {
            Value::Float3(v) | Value::Color3f(v) => Some(*v),
            _ => None,
        }
    }

    /// Get any array of three-component values (`point3f[]`, `color3f[]`)
    pub fn as_vec3_array(&self) -> Option<&[[f32; 3]]> {
        match self {
            Value::Point3fArray(v) | Value::Color3fArray(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => f.write_str(if *v { "1" } else { "0" }),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write_f32(f, *v),
            Value::Double(v) => write_f64(f, *v),
            Value::Float2(v) => write_tuple(f, v),
            Value::Float3(v) | Value::Color3f(v) => write_tuple(f, v),
            Value::Token(v) => write_quoted(f, v),
            Value::Asset(v) => write!(f, "@{v}@"),
            Value::IntArray(v) => write_list(f, v, |f, i| write!(f, "{i}")),
            Value::FloatArray(v) => write_list(f, v, |f, x| write_f32(f, *x)),
            Value::TokenArray(v) => write_list(f, v, |f, t| write_quoted(f, t)),
            Value::Point3fArray(v) | Value::Color3fArray(v) => write_list(f, v, |f, p| write_tuple(f, p)),
            Value::TexCoord2fArray(v) => write_list(f, v, |f, p| write_tuple(f, p)),
            Value::Matrix4d(m) => {
                f.write_str("( ")?;
                for row in 0..4 {
                    if row > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_char('(')?;
                    for col in 0..4 {
                        if col > 0 {
                            f.write_str(", ")?;
                        }
                        write_f64(f, m[(row, col)])?;
                    }
                    f.write_char(')')?;
                }
                f.write_str(" )")
            }
        }
    }
}

fn write_f32(f: &mut fmt::Formatter<'_>, v: f32) -> fmt::Result {
    if v.is_nan() {
        f.write_str("nan")
    } else {
        write!(f, "{v}")
    }
}

fn write_f64(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        f.write_str("nan")
    } else {
        write!(f, "{v}")
    }
}

fn write_tuple<const N: usize>(f: &mut fmt::Formatter<'_>, v: &[f32; N]) -> fmt::Result {
    f.write_char('(')?;
    for (i, x) in v.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_f32(f, *x)?;
    }
    f.write_char(')')
}

fn write_list<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    mut write_item: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    f.write_char('[')?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_item(f, item)?;
    }
    f.write_char(']')
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in text.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            _ => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_literals() {
        assert_eq!(Value::Bool(true).to_string(), "1");
        assert_eq!(Value::Double(0.5).to_string(), "0.5");
        assert_eq!(Value::Float(1.0).to_string(), "1");
        assert_eq!(Value::token("Z").to_string(), "\"Z\"");
        assert_eq!(Value::Asset("/tmp/0.png".into()).to_string(), "@/tmp/0.png@");
    }

    #[test]
    fn test_array_literals() {
        assert_eq!(Value::IntArray(vec![3, 3]).to_string(), "[3, 3]");
        assert_eq!(
            Value::Point3fArray(vec![[0.0, 0.5, 1.0], [2.0, 0.0, 0.0]]).to_string(),
            "[(0, 0.5, 1), (2, 0, 0)]"
        );
        assert_eq!(
            Value::TokenArray(vec!["xformOp:transform".into()]).to_string(),
            "[\"xformOp:transform\"]"
        );
        assert_eq!(Value::FloatArray(vec![]).to_string(), "[]");
    }

    #[test]
    fn test_matrix_literal() {
        let mut m = Mat4d::identity();
        m[(3, 2)] = 2.5;
        assert_eq!(
            Value::Matrix4d(m).to_string(),
            "( (1, 0, 0, 0), (0, 1, 0, 0), (0, 0, 1, 0), (0, 0, 2.5, 1) )"
        );
    }

    #[test]
    fn test_token_escaping() {
        assert_eq!(Value::token("a\"b").to_string(), "\"a\\\"b\"");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Color3fArray(vec![]).type_name(), "color3f[]");
        assert_eq!(Value::Matrix4d(Mat4d::identity()).type_name(), "matrix4d");
    }
}
