//! `.usda` text serialization

use std::fmt::Write;

use super::{Attribute, Prim, Stage, Variability};

const INDENT: &str = "    ";

/// Render the whole layer: header metadata, then root prims in order
pub(crate) fn write_layer(stage: &Stage) -> String {
    let mut out = String::new();
    out.push_str("#usda 1.0\n(\n");
    if let Some(default_prim) = stage.default_prim() {
        let _ = writeln!(out, "{INDENT}defaultPrim = \"{default_prim}\"");
    }
    let _ = writeln!(out, "{INDENT}upAxis = \"{}\"", stage.up_axis().token());
    out.push_str(")\n");

    for &key in stage.root_prims() {
        if let Some(prim) = stage.prim(key) {
            out.push('\n');
            write_prim(&mut out, stage, prim, 0);
        }
    }
    out
}

fn write_prim(out: &mut String, stage: &Stage, prim: &Prim, depth: usize) {
    let pad = INDENT.repeat(depth);

    out.push_str(&pad);
    out.push_str("def ");
    if !prim.type_name().is_empty() {
        out.push_str(prim.type_name());
        out.push(' ');
    }
    let _ = write!(out, "\"{}\"", prim.name());

    if prim.api_schemas().is_empty() {
        out.push('\n');
    } else {
        let schemas: Vec<String> = prim.api_schemas().iter().map(|s| format!("\"{s}\"")).collect();
        let _ = writeln!(out, " (\n{pad}{INDENT}prepend apiSchemas = [{}]\n{pad})", schemas.join(", "));
    }
    let _ = writeln!(out, "{pad}{{");

    let inner = INDENT.repeat(depth + 1);
    for (name, targets) in prim.relationships() {
        let targets: Vec<String> = targets.iter().map(|t| format!("<{t}>")).collect();
        match targets.as_slice() {
            [single] => {
                let _ = writeln!(out, "{inner}rel {name} = {single}");
            }
            _ => {
                let _ = writeln!(out, "{inner}rel {name} = [{}]", targets.join(", "));
            }
        }
    }
    for (name, attribute) in prim.attributes() {
        write_attribute(out, &inner, name, attribute);
    }

    for (i, &child) in prim.children().iter().enumerate() {
        if let Some(child) = stage.prim(child) {
            if i > 0 || prim.attributes().next().is_some() || prim.relationships().next().is_some() {
                out.push('\n');
            }
            write_prim(out, stage, child, depth + 1);
        }
    }

    let _ = writeln!(out, "{pad}}}");
}

fn write_attribute(out: &mut String, pad: &str, name: &str, attribute: &Attribute) {
    let uniform = match attribute.variability() {
        Variability::Uniform => "uniform ",
        Variability::Varying => "",
    };
    let declaration = format!("{pad}{uniform}{} {name}", attribute.type_name());

    match attribute.value() {
        Some(value) => {
            let _ = write!(out, "{declaration} = {value}");
            match attribute.interpolation() {
                Some(interpolation) => {
                    let _ = writeln!(out, " (\n{pad}{INDENT}interpolation = \"{interpolation}\"\n{pad})");
                }
                None => out.push('\n'),
            }
        }
        None if attribute.connections().is_empty() => {
            out.push_str(&declaration);
            out.push('\n');
        }
        None => {}
    }

    match attribute.connections() {
        [] => {}
        [single] => {
            let _ = writeln!(out, "{declaration}.connect = <{single}>");
        }
        sources => {
            let sources: Vec<String> = sources.iter().map(|s| format!("<{s}>")).collect();
            let _ = writeln!(out, "{declaration}.connect = [{}]", sources.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::usd::{Attribute, SdfPath, Stage, UpAxis, Value};

    fn path(text: &str) -> SdfPath {
        SdfPath::new(text).unwrap()
    }

    #[test]
    fn test_empty_layer_header() {
        let mut stage = Stage::create_in_memory();
        stage.set_up_axis(UpAxis::Z);

        assert_eq!(stage.export_to_string(), "#usda 1.0\n(\n    upAxis = \"Z\"\n)\n");
    }

    #[test]
    fn test_nested_prims_and_metadata() {
        let mut stage = Stage::create_in_memory();
        stage.define_prim(&path("/World"), "Xform").unwrap();
        stage.set_default_prim("World").unwrap();
        let key = stage.define_prim(&path("/World/ball"), "Sphere").unwrap();
        let prim = stage.prim_mut(key).unwrap();
        prim.set_attribute("radius", Value::Double(0.25)).unwrap();
        prim.apply_api("MaterialBindingAPI");
        prim.set_relationship("material:binding", vec![path("/World/Looks/texture_0")])
            .unwrap();
        prim.create_attribute(
            "primvars:displayColor",
            Attribute::new(Value::Color3fArray(vec![[1.0, 0.0, 0.0]])).with_interpolation("constant"),
        )
        .unwrap();
        prim.create_attribute(
            "xformOpOrder",
            Attribute::new(Value::TokenArray(vec!["xformOp:transform".into()])).uniform(),
        )
        .unwrap();

        let text = stage.export_to_string();
        assert!(text.contains("    defaultPrim = \"World\"\n"));
        assert!(text.contains("def Xform \"World\"\n{\n"));
        assert!(text.contains("    def Sphere \"ball\" (\n        prepend apiSchemas = [\"MaterialBindingAPI\"]\n    )\n"));
        assert!(text.contains("        double radius = 0.25\n"));
        assert!(text.contains("        rel material:binding = </World/Looks/texture_0>\n"));
        assert!(text.contains(
            "        color3f[] primvars:displayColor = [(1, 0, 0)] (\n            interpolation = \"constant\"\n        )\n"
        ));
        assert!(text.contains("        uniform token[] xformOpOrder = [\"xformOp:transform\"]\n"));
    }

    #[test]
    fn test_connections_and_declared_outputs() {
        let mut stage = Stage::create_in_memory();
        let key = stage.define_prim(&path("/Mat"), "Material").unwrap();
        let prim = stage.prim_mut(key).unwrap();
        prim.create_attribute(
            "outputs:surface",
            Attribute::declared("token").connected_to(path("/Mat/Surface.outputs:surface")),
        )
        .unwrap();
        prim.create_attribute("outputs:rgb", Attribute::declared("float3")).unwrap();

        let text = stage.export_to_string();
        assert!(text.contains("    token outputs:surface.connect = </Mat/Surface.outputs:surface>\n"));
        assert!(text.contains("    float3 outputs:rgb\n"));
        assert!(!text.contains("token outputs:surface\n"));
    }
}
