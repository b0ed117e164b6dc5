use std::{cell::RefCell, fmt, rc::Rc};

use crate::foundation::core::{Props, Size};

/// Opaque view code that a host mounts when its composition is selected.
pub trait View: fmt::Debug {
    /// Human-readable view name used in logs and summaries.
    fn name(&self) -> &str;
}

/// Shared handle to a view. Identity is pointer identity.
pub type ViewRef = Rc<dyn View>;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Minimal [`View`] identified by name only.
pub struct NamedView {
    name: String,
}

impl NamedView {
    /// Build a shared named view.
    pub fn shared(name: impl Into<String>) -> ViewRef {
        Rc::new(Self { name: name.into() })
    }
}

impl View for NamedView {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Clone, Debug)]
enum LoadState {
    Pending,
    Ready(ViewRef),
    Failed(String),
}

#[derive(Clone, Debug)]
/// Result of polling a view source.
pub enum ViewPoll {
    /// View code is still being fetched.
    Pending,
    /// View code is available.
    Ready(ViewRef),
    /// View code failed to load.
    Failed(String),
}

#[derive(Clone)]
/// View whose code is resolved later through the paired [`ViewLoader`].
pub struct LazyView {
    label: Rc<str>,
    state: Rc<RefCell<LoadState>>,
}

impl LazyView {
    /// Create a pending lazy view and the loader that completes it.
    pub fn new(label: impl Into<String>) -> (Self, ViewLoader) {
        let state = Rc::new(RefCell::new(LoadState::Pending));
        let view = Self {
            label: Rc::from(label.into()),
            state: Rc::clone(&state),
        };
        (view, ViewLoader { state })
    }

    /// Label given at construction.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current load state.
    pub fn poll(&self) -> ViewPoll {
        match &*self.state.borrow() {
            LoadState::Pending => ViewPoll::Pending,
            LoadState::Ready(v) => ViewPoll::Ready(Rc::clone(v)),
            LoadState::Failed(msg) => ViewPoll::Failed(msg.clone()),
        }
    }

    fn same_cell(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for LazyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyView")
            .field("label", &self.label)
            .field("state_ptr", &Rc::as_ptr(&self.state))
            .finish()
    }
}

#[derive(Debug)]
/// Completion handle for a [`LazyView`].
pub struct ViewLoader {
    state: Rc<RefCell<LoadState>>,
}

impl ViewLoader {
    /// Mark the lazy view as loaded.
    pub fn resolve(&self, view: ViewRef) {
        *self.state.borrow_mut() = LoadState::Ready(view);
    }

    /// Mark the lazy view as failed.
    pub fn fail(&self, msg: impl Into<String>) {
        *self.state.borrow_mut() = LoadState::Failed(msg.into());
    }
}

#[derive(Clone, Debug)]
/// Where a composition's view comes from.
pub enum ViewSource {
    /// View available immediately.
    Eager(ViewRef),
    /// View resolved asynchronously.
    Lazy(LazyView),
}

impl ViewSource {
    /// Poll the source; eager sources are always ready.
    pub fn poll(&self) -> ViewPoll {
        match self {
            Self::Eager(v) => ViewPoll::Ready(Rc::clone(v)),
            Self::Lazy(l) => l.poll(),
        }
    }

    /// Whether both sources refer to the same underlying view or lazy cell.
    pub fn same_identity(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Eager(a), Self::Eager(b)) => Rc::ptr_eq(a, b),
            (Self::Lazy(a), Self::Lazy(b)) => a.same_cell(b),
            _ => false,
        }
    }

    /// Display name: the view name, or the lazy label.
    pub fn name(&self) -> &str {
        match self {
            Self::Eager(v) => v.name(),
            Self::Lazy(l) => l.label(),
        }
    }
}

impl From<ViewRef> for ViewSource {
    fn from(view: ViewRef) -> Self {
        Self::Eager(view)
    }
}

impl From<LazyView> for ViewSource {
    fn from(view: LazyView) -> Self {
        Self::Lazy(view)
    }
}

#[derive(Clone, Debug)]
/// Full metadata of one registered composition.
pub struct CompositionRecord {
    /// Globally unique, URL-safe id.
    pub id: String,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Frame rate.
    pub fps: f64,
    /// Duration in frames; a positive integer once registered.
    pub duration_in_frames: f64,
    /// Path of the enclosing folder at registration time.
    pub folder_path: Option<String>,
    /// View source mounted when this composition is selected.
    pub component: ViewSource,
    /// Props passed to the view unless overridden by input props.
    pub default_props: Props,
    /// Changes whenever `component` identity changes.
    pub nonce: u64,
}

impl CompositionRecord {
    /// Canvas size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Duration as an integral frame count.
    pub fn duration_frames(&self) -> u64 {
        self.duration_in_frames as u64
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_in_frames / self.fps
    }

    /// Whether `other` carries the same observed inputs (component compared by identity).
    pub fn same_inputs(&self, other: &Self) -> bool {
        self.id == other.id
            && self.width == other.width
            && self.height == other.height
            && self.fps == other.fps
            && self.duration_in_frames == other.duration_in_frames
            && self.folder_path == other.folder_path
            && self.default_props == other.default_props
            && self.nonce == other.nonce
            && self.component.same_identity(&other.component)
    }

    /// Serializable snapshot of this record.
    pub fn summary(&self) -> CompositionSummary {
        CompositionSummary {
            id: self.id.clone(),
            width: self.width,
            height: self.height,
            fps: self.fps,
            duration_in_frames: self.duration_frames(),
            folder_path: self.folder_path.clone(),
            view: self.component.name().to_string(),
            lazy: matches!(self.component, ViewSource::Lazy(_)),
            default_props: self.default_props.clone(),
            nonce: self.nonce,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// JSON-facing snapshot of a [`CompositionRecord`].
pub struct CompositionSummary {
    /// Composition id.
    pub id: String,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Frame rate.
    pub fps: f64,
    /// Duration in frames.
    pub duration_in_frames: u64,
    /// Enclosing folder path.
    pub folder_path: Option<String>,
    /// View or lazy label name.
    pub view: String,
    /// Whether the view is lazily loaded.
    pub lazy: bool,
    /// Default props.
    pub default_props: Props,
    /// Component identity nonce.
    pub nonce: u64,
}

#[cfg(test)]
#[path = "../../tests/unit/composition/record.rs"]
mod tests;
