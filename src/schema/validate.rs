use crate::scene::model::{GlobalDef, KeepOutDef, LayerDef, PhaseDef, SceneDef};
use std::collections::HashSet;
use std::fmt;

const VERSION_STR: &str = "1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SchemaPathElem {
    Field(&'static str),
    Index(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaError {
    pub(crate) path: Vec<SchemaPathElem>,
    pub(crate) message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaErrors {
    pub(crate) errors: Vec<SchemaError>,
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

/// Structural validation: ids, cross-references, version. Numeric attribute
/// leniency is handled by deserialization + normalization, not here.
pub(crate) fn validate_scene(def: &SceneDef) -> Result<(), SchemaErrors> {
    let mut errors = Vec::new();

    if def.version != VERSION_STR {
        errors.push(SchemaError::at(
            &[SchemaPathElem::Field("version")],
            format!("version must be \"{VERSION_STR}\""),
        ));
    }

    if def.panels.is_empty() {
        errors.push(SchemaError::at(
            &[SchemaPathElem::Field("panels")],
            "at least one panel is required",
        ));
    }
    let mut panels = HashSet::<&str>::new();
    for (i, id) in def.panels.iter().enumerate() {
        let path = [SchemaPathElem::Field("panels"), SchemaPathElem::Index(i)];
        if id.is_empty() {
            errors.push(SchemaError::at(&path, "panel id must be non-empty"));
        } else if !panels.insert(id.as_str()) {
            errors.push(SchemaError::at(&path, format!("duplicate panel id \"{id}\"")));
        }
    }

    if def.phases.is_empty() {
        errors.push(SchemaError::at(
            &[SchemaPathElem::Field("phases")],
            "at least one phase is required",
        ));
    }
    let mut phases = HashSet::<&str>::new();
    for (i, phase) in def.phases.iter().enumerate() {
        validate_phase(phase, i, &panels, &mut phases, &mut errors);
    }

    let mut layers = HashSet::<&str>::new();
    for (i, layer) in def.layers.iter().enumerate() {
        validate_layer(layer, i, &panels, &phases, &mut layers, &mut errors);
    }

    let mut globals = HashSet::<&str>::new();
    for (i, global) in def.globals.iter().enumerate() {
        validate_global(global, i, &panels, &phases, &mut globals, &mut errors);
    }

    for (i, keep_out) in def.keep_outs.iter().enumerate() {
        let (KeepOutDef::Circle { panel, .. } | KeepOutDef::Rect { panel, .. }) = keep_out;
        if !panels.contains(panel.as_str()) {
            errors.push(SchemaError::at(
                &[
                    SchemaPathElem::Field("keep_outs"),
                    SchemaPathElem::Index(i),
                    SchemaPathElem::Field("panel"),
                ],
                format!("unknown panel \"{panel}\""),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaErrors { errors })
    }
}

fn validate_phase<'a>(
    phase: &'a PhaseDef,
    i: usize,
    panels: &HashSet<&str>,
    phases: &mut HashSet<&'a str>,
    errors: &mut Vec<SchemaError>,
) {
    let base = [SchemaPathElem::Field("phases"), SchemaPathElem::Index(i)];

    if phase.name.is_empty() {
        errors.push(SchemaError::at(&base, "phase name must be non-empty"));
    } else if !phases.insert(phase.name.as_str()) {
        errors.push(SchemaError::at(
            &base,
            format!("duplicate phase name \"{}\"", phase.name),
        ));
    }

    for (field, panel) in [
        ("start_panel", &phase.start_panel),
        ("end_panel", &phase.end_panel),
    ] {
        if !panels.contains(panel.as_str()) {
            let mut path = base.to_vec();
            path.push(SchemaPathElem::Field(field));
            errors.push(SchemaError::at(&path, format!("unknown panel \"{panel}\"")));
        }
    }

    if !phase.end_fraction.is_finite() || phase.end_fraction < 0.0 {
        let mut path = base.to_vec();
        path.push(SchemaPathElem::Field("end_fraction"));
        errors.push(SchemaError::at(&path, "end_fraction must be finite and >= 0"));
    }
}

fn validate_layer<'a>(
    layer: &'a LayerDef,
    i: usize,
    panels: &HashSet<&str>,
    phases: &HashSet<&str>,
    layers: &mut HashSet<&'a str>,
    errors: &mut Vec<SchemaError>,
) {
    let base = [SchemaPathElem::Field("layers"), SchemaPathElem::Index(i)];

    if layer.id.is_empty() {
        errors.push(SchemaError::at(&base, "layer id must be non-empty"));
    } else if !layers.insert(layer.id.as_str()) {
        errors.push(SchemaError::at(
            &base,
            format!("duplicate layer id \"{}\"", layer.id),
        ));
    }

    if !panels.contains(layer.panel.as_str()) {
        let mut path = base.to_vec();
        path.push(SchemaPathElem::Field("panel"));
        errors.push(SchemaError::at(
            &path,
            format!("unknown panel \"{}\"", layer.panel),
        ));
    }

    if let Some(phase) = &layer.phase
        && !phases.contains(phase.as_str())
    {
        let mut path = base.to_vec();
        path.push(SchemaPathElem::Field("phase"));
        errors.push(SchemaError::at(&path, format!("unknown phase \"{phase}\"")));
    }
}

fn validate_global<'a>(
    global: &'a GlobalDef,
    i: usize,
    panels: &HashSet<&str>,
    phases: &HashSet<&str>,
    globals: &mut HashSet<&'a str>,
    errors: &mut Vec<SchemaError>,
) {
    let base = [SchemaPathElem::Field("globals"), SchemaPathElem::Index(i)];

    if global.id.is_empty() {
        errors.push(SchemaError::at(&base, "global id must be non-empty"));
    } else if !globals.insert(global.id.as_str()) {
        errors.push(SchemaError::at(
            &base,
            format!("duplicate global id \"{}\"", global.id),
        ));
    }

    if let Some(phase) = &global.phase
        && !phases.contains(phase.as_str())
    {
        let mut path = base.to_vec();
        path.push(SchemaPathElem::Field("phase"));
        errors.push(SchemaError::at(&path, format!("unknown phase \"{phase}\"")));
    }

    if let Some(pin) = &global.pin
        && !panels.contains(pin.panel.as_str())
    {
        let mut path = base.to_vec();
        path.push(SchemaPathElem::Field("pin"));
        path.push(SchemaPathElem::Field("panel"));
        errors.push(SchemaError::at(
            &path,
            format!("unknown panel \"{}\"", pin.panel),
        ));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/validate.rs"]
mod tests;
