use crate::foundation::error::{StratusError, StratusResult};
use crate::scene::model::SceneDef;
use crate::schema::validate::validate_scene;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Scene boundary object.
///
/// This is the JSON-facing, human-edited representation of one page's
/// choreography: panels, phases, layers, globals, keep-outs, and tunables.
/// It is validated and normalized into a compact runtime form when
/// constructing a [`crate::session::choreographer::Choreographer`].
#[derive(Debug, Clone)]
pub struct Scene {
    def: SceneDef,
}

impl Scene {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> StratusResult<Self> {
        let def: SceneDef = serde_json::from_reader(r)
            .map_err(|e| StratusError::serde(format!("parse scene JSON: {e}")))?;
        Ok(Self { def })
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> StratusResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StratusError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        let r = BufReader::new(f);
        Self::from_reader(r)
    }

    /// Validate the scene's structure (ids, references, version).
    ///
    /// Numeric attribute problems are not errors: they are defaulted during
    /// normalization.
    pub fn validate(&self) -> StratusResult<()> {
        validate_scene(&self.def)
            .map_err(|e| StratusError::validation(format!("scene validation failed: {e}")))
    }

    /// Declared panel ids, in declaration order.
    pub fn panel_ids(&self) -> impl Iterator<Item = &str> {
        self.def.panels.iter().map(String::as_str)
    }

    pub(crate) fn from_def(def: SceneDef) -> Self {
        Self { def }
    }

    pub(crate) fn def(&self) -> &SceneDef {
        &self.def
    }
}
