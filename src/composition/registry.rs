use crate::{
    composition::{
        folder::{FolderNamespace, FolderNode},
        record::CompositionRecord,
    },
    foundation::error::{WavyteError, WavyteResult},
    validation::rules::{
        validate_composition_id, validate_dimension, validate_duration_in_frames, validate_fps,
    },
};

const CONTEXT: &str = "of the composition declaration";

#[derive(Debug, Default)]
/// Single source of truth for which compositions and folders exist right now.
///
/// A registry is an owned value passed to whoever declares compositions; there is no
/// process-wide instance.
pub struct CompositionRegistry {
    compositions: Vec<CompositionRecord>,
    folders: FolderNamespace,
}

impl CompositionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and insert `record`.
    ///
    /// Checks run in a fixed order (missing id, id, width, height, duration, fps) before the
    /// duplicate check; the first failure is returned and the registry is left unchanged.
    #[tracing::instrument(skip(self, record), fields(id = %record.id))]
    pub fn register(&mut self, record: CompositionRecord) -> WavyteResult<()> {
        validate_record(&record)?;
        if self.get(&record.id).is_some() {
            return Err(WavyteError::duplicate_id(format!(
                "multiple compositions with id \"{}\" are registered; ids must be unique",
                record.id
            )));
        }
        tracing::debug!(
            folder = record.folder_path.as_deref().unwrap_or(""),
            nonce = record.nonce,
            "registered composition"
        );
        self.compositions.push(record);
        Ok(())
    }

    /// Remove the composition with `id`, if any. Never fails.
    pub fn unregister(&mut self, id: &str) {
        let before = self.compositions.len();
        self.compositions.retain(|c| c.id != id);
        if self.compositions.len() != before {
            tracing::debug!(id, "unregistered composition");
        }
    }

    /// All registered compositions, in registration order.
    pub fn list(&self) -> &[CompositionRecord] {
        &self.compositions
    }

    /// Look up a composition by id.
    pub fn get(&self, id: &str) -> Option<&CompositionRecord> {
        self.compositions.iter().find(|c| c.id == id)
    }

    /// Number of registered compositions.
    pub fn len(&self) -> usize {
        self.compositions.len()
    }

    /// Whether no composition is registered.
    pub fn is_empty(&self) -> bool {
        self.compositions.is_empty()
    }

    /// Activate a folder scope; see [`FolderNamespace::enter_folder`].
    pub fn enter_folder(&mut self, name: &str, parent_path: Option<&str>) -> WavyteResult<String> {
        self.folders.enter_folder(name, parent_path)
    }

    /// Release a folder scope; see [`FolderNamespace::exit_folder`].
    pub fn exit_folder(&mut self, name: &str, parent_path: Option<&str>) {
        self.folders.exit_folder(name, parent_path);
    }

    /// Active folders.
    pub fn folders(&self) -> &[FolderNode] {
        self.folders.folders()
    }
}

fn validate_record(record: &CompositionRecord) -> WavyteResult<()> {
    if record.id.is_empty() {
        return Err(WavyteError::missing_id("no id for composition passed"));
    }
    validate_composition_id(&record.id)?;
    validate_dimension(record.width, "width", CONTEXT)?;
    validate_dimension(record.height, "height", CONTEXT)?;
    validate_duration_in_frames(record.duration_in_frames, CONTEXT)?;
    validate_fps(record.fps, CONTEXT)?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/composition/registry.rs"]
mod tests;
