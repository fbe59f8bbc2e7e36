//! Minimal in-memory USD stage with a `.usda` text serializer.
//!
//! Covers exactly what camera export needs: layer metadata (comment and
//! frames per second), typed and typeless prims, scalar/vector attributes with
//! default values and integer time samples, and the common xform ops.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Xform ops in the order the common xform API authors them.
const XFORM_OP_ORDER: [&str; 2] = [XFORM_OP_TRANSLATE, XFORM_OP_ROTATE_XYZ];

pub const XFORM_OP_TRANSLATE: &str = "xformOp:translate";
pub const XFORM_OP_ROTATE_XYZ: &str = "xformOp:rotateXYZ";
pub const XFORM_OP_ORDER_ATTR: &str = "xformOpOrder";

/// An attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Float(f32),
    Float3([f32; 3]),
    Double3([f64; 3]),
    TokenArray(Vec<String>),
}

impl Value {
    /// USD type name used in the attribute declaration.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Float(_) => "float",
            Value::Float3(_) => "float3",
            Value::Double3(_) => "double3",
            Value::TokenArray(_) => "token[]",
        }
    }

    fn to_usda(&self) -> String {
        match self {
            Value::Float(v) => fmt_f32(*v),
            Value::Float3([x, y, z]) => format!("({}, {}, {})", fmt_f32(*x), fmt_f32(*y), fmt_f32(*z)),
            Value::Double3([x, y, z]) => format!("({}, {}, {})", fmt_f64(*x), fmt_f64(*y), fmt_f64(*z)),
            Value::TokenArray(tokens) => {
                let quoted: Vec<String> = tokens.iter().map(|t| quote(t)).collect();
                format!("[{}]", quoted.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variability {
    Varying,
    Uniform,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub type_name: &'static str,
    pub variability: Variability,
    pub default: Option<Value>,
    /// Samples keyed by time code, kept sorted.
    pub time_samples: Vec<(i64, Value)>,
}

impl Attribute {
    fn new(type_name: &'static str, variability: Variability) -> Self {
        Self {
            type_name,
            variability,
            default: None,
            time_samples: Vec::new(),
        }
    }

    /// Author a sample; a later write at the same time code replaces the earlier one.
    pub fn set_at(&mut self, time: i64, value: Value) {
        match self.time_samples.binary_search_by_key(&time, |(t, _)| *t) {
            Ok(idx) => self.time_samples[idx].1 = value,
            Err(idx) => self.time_samples.insert(idx, (time, value)),
        }
    }

    pub fn value_at(&self, time: i64) -> Option<&Value> {
        self.time_samples
            .binary_search_by_key(&time, |(t, _)| *t)
            .ok()
            .map(|idx| &self.time_samples[idx].1)
    }

    pub fn time_codes(&self) -> Vec<i64> {
        self.time_samples.iter().map(|(t, _)| *t).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prim {
    pub name: String,
    /// Schema type, `None` for a typeless `def`.
    pub type_name: Option<String>,
    /// Attributes in authoring order.
    pub attributes: Vec<(String, Attribute)>,
    pub children: Vec<Prim>,
}

impl Prim {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|(n, _)| n == name).map(|(_, a)| a)
    }

    /// Set the non-animated value of an attribute, declaring it with the value's type.
    pub fn set_default(&mut self, name: &str, variability: Variability, value: Value) {
        let type_name = value.type_name();
        self.create_attribute(name, type_name, variability).default = Some(value);
    }

    /// Author a time sample on a varying attribute, declaring it with the value's type.
    pub fn set_sample(&mut self, name: &str, time: i64, value: Value) {
        let type_name = value.type_name();
        self.create_attribute(name, type_name, Variability::Varying)
            .set_at(time, value);
    }

    /// Fetch an attribute, creating it with the given type if it doesn't exist yet.
    fn create_attribute(
        &mut self,
        name: &str,
        type_name: &'static str,
        variability: Variability,
    ) -> &mut Attribute {
        let idx = match self.attributes.iter().position(|(n, _)| n == name) {
            Some(idx) => idx,
            None => {
                self.attributes
                    .push((name.to_string(), Attribute::new(type_name, variability)));
                self.attributes.len() - 1
            }
        };
        &mut self.attributes[idx].1
    }

    fn child_mut(&mut self, name: &str) -> &mut Prim {
        let idx = match self.children.iter().position(|c| c.name == name) {
            Some(idx) => idx,
            None => {
                self.children.push(Prim::new(name));
                self.children.len() - 1
            }
        };
        &mut self.children[idx]
    }

    fn write_usda(&self, out: &mut String, depth: usize) {
        let indent = "    ".repeat(depth);
        match &self.type_name {
            Some(t) => {
                let _ = writeln!(out, "{indent}def {t} {}", quote(&self.name));
            }
            None => {
                let _ = writeln!(out, "{indent}def {}", quote(&self.name));
            }
        }
        let _ = writeln!(out, "{indent}{{");

        let inner = "    ".repeat(depth + 1);
        for (name, attr) in &self.attributes {
            let prefix = match attr.variability {
                Variability::Uniform => "uniform ",
                Variability::Varying => "",
            };
            if let Some(value) = &attr.default {
                let _ = writeln!(
                    out,
                    "{inner}{prefix}{} {name} = {}",
                    attr.type_name,
                    value.to_usda()
                );
            }
            if !attr.time_samples.is_empty() {
                let _ = writeln!(out, "{inner}{prefix}{} {name}.timeSamples = {{", attr.type_name);
                for (time, value) in &attr.time_samples {
                    let _ = writeln!(out, "{inner}    {time}: {},", value.to_usda());
                }
                let _ = writeln!(out, "{inner}}}");
            }
            if attr.default.is_none() && attr.time_samples.is_empty() {
                let _ = writeln!(out, "{inner}{prefix}{} {name}", attr.type_name);
            }
        }

        for (i, child) in self.children.iter().enumerate() {
            if i > 0 || !self.attributes.is_empty() {
                out.push('\n');
            }
            child.write_usda(out, depth + 1);
        }

        let _ = writeln!(out, "{indent}}}");
    }
}

/// An in-memory stage holding a single root layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stage {
    pub comment: Option<String>,
    pub frames_per_second: Option<f64>,
    pub root_prims: Vec<Prim>,
}

impl Stage {
    pub fn create_in_memory() -> Self {
        Self::default()
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = Some(comment.into());
    }

    pub fn set_frames_per_second(&mut self, fps: f64) {
        self.frames_per_second = Some(fps);
    }

    /// Define a prim at an absolute path such as `/capture/camera`, creating
    /// typeless ancestors as needed. Returns `None` for a malformed path.
    pub fn define_prim(&mut self, path: &str, type_name: Option<&str>) -> Option<&mut Prim> {
        let mut names = path.strip_prefix('/')?.split('/');
        let first = names.next().filter(|n| !n.is_empty())?;

        let idx = match self.root_prims.iter().position(|p| p.name == first) {
            Some(idx) => idx,
            None => {
                self.root_prims.push(Prim::new(first));
                self.root_prims.len() - 1
            }
        };
        let mut prim = &mut self.root_prims[idx];
        for name in names {
            if name.is_empty() {
                return None;
            }
            prim = prim.child_mut(name);
        }
        if let Some(t) = type_name {
            prim.type_name = Some(t.to_string());
        }
        Some(prim)
    }

    /// Define a `Camera` prim at `path`.
    pub fn define_camera(&mut self, path: &str) -> Option<Camera<'_>> {
        self.define_prim(path, Some("Camera")).map(|prim| Camera { prim })
    }

    pub fn get_prim(&self, path: &str) -> Option<&Prim> {
        let mut names = path.strip_prefix('/')?.split('/');
        let first = names.next()?;
        let mut prim = self.root_prims.iter().find(|p| p.name == first)?;
        for name in names {
            prim = prim.children.iter().find(|c| c.name == name)?;
        }
        Some(prim)
    }

    /// Serialise the stage as `.usda` text.
    pub fn to_usda(&self) -> String {
        let mut out = String::from("#usda 1.0\n");
        if self.comment.is_some() || self.frames_per_second.is_some() {
            out.push_str("(\n");
            if let Some(comment) = &self.comment {
                let _ = writeln!(out, "    {}", quote(comment));
            }
            if let Some(fps) = self.frames_per_second {
                let _ = writeln!(out, "    framesPerSecond = {}", fmt_f64(fps));
            }
            out.push_str(")\n");
        }
        for prim in &self.root_prims {
            out.push('\n');
            prim.write_usda(&mut out, 0);
        }
        out
    }

    /// Write the stage to `path`.
    pub fn export(&self, path: &Path) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(self.to_usda().as_bytes())?;
        writer.flush()
    }
}

/// `Camera` schema view over a prim.
pub struct Camera<'a> {
    prim: &'a mut Prim,
}

impl Camera<'_> {
    pub fn prim(&self) -> &Prim {
        &*self.prim
    }

    pub fn set_horizontal_aperture(&mut self, value: f32) {
        self.set_float("horizontalAperture", value);
    }

    pub fn set_vertical_aperture(&mut self, value: f32) {
        self.set_float("verticalAperture", value);
    }

    pub fn set_focal_length(&mut self, value: f32) {
        self.set_float("focalLength", value);
    }

    /// Author a translation sample (common xform API, double precision).
    pub fn set_translate(&mut self, time: i64, value: [f64; 3]) {
        self.prim
            .set_sample(XFORM_OP_TRANSLATE, time, Value::Double3(value));
        self.update_xform_op_order();
    }

    /// Author an XYZ-order rotation sample in degrees.
    pub fn set_rotate_xyz(&mut self, time: i64, value: [f32; 3]) {
        self.prim
            .set_sample(XFORM_OP_ROTATE_XYZ, time, Value::Float3(value));
        self.update_xform_op_order();
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.prim
            .set_default(name, Variability::Varying, Value::Float(value));
    }

    fn update_xform_op_order(&mut self) {
        let ops: Vec<String> = XFORM_OP_ORDER
            .iter()
            .filter(|op| self.prim.attribute(op).is_some())
            .map(|op| op.to_string())
            .collect();
        // Keep the op order last, after the ops it lists
        self.prim.attributes.retain(|(n, _)| n != XFORM_OP_ORDER_ATTR);
        self.prim
            .set_default(XFORM_OP_ORDER_ATTR, Variability::Uniform, Value::TokenArray(ops));
    }
}

fn fmt_f32(v: f32) -> String {
    fmt_f64_like(v.is_nan(), v.is_infinite(), v.is_sign_negative(), || v.to_string())
}

fn fmt_f64(v: f64) -> String {
    fmt_f64_like(v.is_nan(), v.is_infinite(), v.is_sign_negative(), || v.to_string())
}

fn fmt_f64_like(nan: bool, inf: bool, neg: bool, finite: impl FnOnce() -> String) -> String {
    if nan {
        "nan".to_string()
    } else if inf && neg {
        "-inf".to_string()
    } else if inf {
        "inf".to_string()
    } else {
        finite()
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
