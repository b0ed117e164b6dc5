use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use crate::{
    composition::{
        declaration::{CompositionDecl, Declaration},
        record::{LazyView, NamedView, ViewLoader, ViewRef, ViewSource},
    },
    foundation::{
        core::props_from_value,
        error::{WavyteError, WavyteResult},
    },
};

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// JSON description of a declaration tree.
///
/// ```json
/// {
///   "root": [
///     { "folder": { "name": "scenes", "children": [
///       { "composition": { "id": "intro", "width": 1920, "height": 1080,
///                          "fps": 30, "durationInFrames": 90, "view": "Intro" } }
///     ] } },
///     { "still": { "id": "thumb", "width": 1280, "height": 720, "view": "Thumb" } }
///   ]
/// }
/// ```
pub struct Manifest {
    /// Top-level entries.
    pub root: Vec<ManifestEntry>,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// One manifest node.
pub enum ManifestEntry {
    /// Folder with nested entries.
    Folder(FolderEntry),
    /// Timed composition.
    Composition(CompositionEntry),
    /// Single-frame composition.
    Still(StillEntry),
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// Folder entry.
pub struct FolderEntry {
    /// Folder name.
    pub name: String,
    /// Nested entries.
    #[serde(default)]
    pub children: Vec<ManifestEntry>,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
/// Composition entry.
pub struct CompositionEntry {
    /// Composition id; an absent id surfaces as a missing-id registration error.
    #[serde(default)]
    pub id: String,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Frame rate.
    pub fps: f64,
    /// Duration in frames.
    pub duration_in_frames: f64,
    /// View name resolved through a [`ViewCatalog`].
    pub view: String,
    /// Load the view lazily.
    #[serde(default)]
    pub lazy: bool,
    /// Default props (JSON object).
    #[serde(default)]
    pub default_props: serde_json::Value,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
/// Still entry.
pub struct StillEntry {
    /// Composition id.
    #[serde(default)]
    pub id: String,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// View name resolved through a [`ViewCatalog`].
    pub view: String,
    /// Load the view lazily.
    #[serde(default)]
    pub lazy: bool,
    /// Default props (JSON object).
    #[serde(default)]
    pub default_props: serde_json::Value,
}

impl Manifest {
    /// Parse a manifest from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> WavyteResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| WavyteError::serde(format!("parse manifest JSON: {e}")))
    }

    /// Parse a manifest from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> WavyteResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            WavyteError::Other(anyhow::anyhow!("open manifest '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Build the declaration tree, resolving view names through `catalog`.
    pub fn to_declarations(&self, catalog: &mut ViewCatalog) -> WavyteResult<Vec<Declaration>> {
        self.root.iter().map(|e| e.to_declaration(catalog)).collect()
    }
}

impl ManifestEntry {
    fn to_declaration(&self, catalog: &mut ViewCatalog) -> WavyteResult<Declaration> {
        Ok(match self {
            Self::Folder(f) => Declaration::folder(
                f.name.clone(),
                f.children
                    .iter()
                    .map(|c| c.to_declaration(catalog))
                    .collect::<WavyteResult<_>>()?,
            ),
            Self::Composition(c) => CompositionDecl::composition(
                c.id.clone(),
                catalog.source(&c.view, c.lazy),
                c.width,
                c.height,
                c.fps,
                c.duration_in_frames,
            )
            .default_props(props_from_value(c.default_props.clone())?)
            .into(),
            Self::Still(s) => CompositionDecl::still(
                s.id.clone(),
                catalog.source(&s.view, s.lazy),
                s.width,
                s.height,
            )
            .default_props(props_from_value(s.default_props.clone())?)
            .into(),
        })
    }
}

#[derive(Debug, Default)]
/// Name-keyed view sources with stable identity across lookups.
pub struct ViewCatalog {
    eager: BTreeMap<String, ViewRef>,
    lazy: BTreeMap<String, (LazyView, ViewLoader)>,
}

impl ViewCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// View source for `name`; repeated lookups return the same identity.
    pub fn source(&mut self, name: &str, lazy: bool) -> ViewSource {
        if lazy {
            let (view, _) = self
                .lazy
                .entry(name.to_string())
                .or_insert_with(|| LazyView::new(name));
            ViewSource::Lazy(view.clone())
        } else {
            let view = self
                .eager
                .entry(name.to_string())
                .or_insert_with(|| NamedView::shared(name));
            ViewSource::Eager(view.clone())
        }
    }

    /// Number of lazy views in the catalog.
    pub fn lazy_count(&self) -> usize {
        self.lazy.len()
    }

    /// Complete every lazy view with a [`NamedView`] of the same name.
    pub fn resolve_all(&self) {
        for (name, (_, loader)) in &self.lazy {
            loader.resolve(NamedView::shared(name.as_str()));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/manifest.rs"]
mod tests;
