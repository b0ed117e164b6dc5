//! Composition registry and environment-aware render dispatch for Wavyte hosts.
//!
//! A host declares a tree of named compositions (fixed size, frame rate and duration), optionally
//! grouped into folders. At process start this crate decides which single composition produces
//! output and how its readiness is signalled:
//!
//! 1. **Declare**: build a [`Declaration`] tree (or load a [`Manifest`]).
//! 2. **Reconcile**: [`CompositionHost::render`] registers every composition in the
//!    [`CompositionRegistry`], replacing records whose inputs changed.
//! 3. **Dispatch**: the selected composition is mounted in `interactive` or `headless-render`
//!    mode; in headless mode a readiness token is held while its view is still loading.
//!
//! The crate does no frame capture, encoding or pixel work; it is bookkeeping and dispatch only.
//! All state is single-threaded and owned by the caller.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod composition;
mod dispatch;
mod foundation;
mod host;
mod validation;

pub use composition::declaration::{CompositionDecl, Declaration};
pub use composition::folder::{FolderNamespace, FolderNode, FolderScope};
pub use composition::record::{
    CompositionRecord, CompositionSummary, LazyView, NamedView, View, ViewLoader, ViewPoll,
    ViewRef, ViewSource,
};
pub use composition::registry::CompositionRegistry;
pub use dispatch::mode::{Environment, HostEnvironment, OperatingMode};
pub use dispatch::readiness::{ReadinessLedger, TokenHandle, TokenLedger};
pub use dispatch::slot::{
    Discipline, DispatchOutput, DispatchSlot, DispatchState, MountedView, mount_discipline,
};
pub use foundation::core::{Props, Size, merge_props, props_from_str, props_from_value};
pub use foundation::error::{ErrorKind, WavyteError, WavyteResult};
pub use host::config::{ENV_COMPOSITION, ENV_INPUT_PROPS, ENV_MODE, HostConfig};
pub use host::manifest::{
    CompositionEntry, FolderEntry, Manifest, ManifestEntry, StillEntry, ViewCatalog,
};
pub use host::reconcile::{CompositionHost, DispatchEntry, DispatchReport};
pub use validation::rules::{
    validate_composition_id, validate_dimension, validate_duration_in_frames, validate_folder_name,
    validate_fps,
};
