use crate::{
    composition::{
        folder::FolderScope,
        record::{CompositionRecord, ViewSource},
    },
    foundation::core::Props,
};

#[derive(Clone, Debug)]
/// Props of one composition declaration, before folder context and nonce are applied.
pub struct CompositionDecl {
    /// Composition id.
    pub id: String,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Frame rate.
    pub fps: f64,
    /// Duration in frames.
    pub duration_in_frames: f64,
    /// View mounted when selected.
    pub component: ViewSource,
    /// Default props for the view.
    pub default_props: Props,
}

impl CompositionDecl {
    /// Declare a timed composition.
    pub fn composition(
        id: impl Into<String>,
        component: impl Into<ViewSource>,
        width: f64,
        height: f64,
        fps: f64,
        duration_in_frames: f64,
    ) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            fps,
            duration_in_frames,
            component: component.into(),
            default_props: Props::new(),
        }
    }

    /// Declare a still: a single-frame composition at 1 fps.
    pub fn still(
        id: impl Into<String>,
        component: impl Into<ViewSource>,
        width: f64,
        height: f64,
    ) -> Self {
        Self::composition(id, component, width, height, 1.0, 1.0)
    }

    /// Set default props.
    pub fn default_props(mut self, props: Props) -> Self {
        self.default_props = props;
        self
    }

    /// Record this declaration would register inside `scope`.
    pub(crate) fn to_record(&self, scope: &FolderScope, nonce: u64) -> CompositionRecord {
        CompositionRecord {
            id: self.id.clone(),
            width: self.width,
            height: self.height,
            fps: self.fps,
            duration_in_frames: self.duration_in_frames,
            folder_path: scope.path(),
            component: self.component.clone(),
            default_props: self.default_props.clone(),
            nonce,
        }
    }
}

#[derive(Clone, Debug)]
/// Node of a declaration tree rendered by [`crate::CompositionHost`].
pub enum Declaration {
    /// Folder scope around child declarations.
    Folder {
        /// Folder name.
        name: String,
        /// Declarations inside this folder.
        children: Vec<Declaration>,
    },
    /// A composition or still.
    Composition(CompositionDecl),
}

impl Declaration {
    /// Folder node.
    pub fn folder(name: impl Into<String>, children: Vec<Declaration>) -> Self {
        Self::Folder {
            name: name.into(),
            children,
        }
    }
}

impl From<CompositionDecl> for Declaration {
    fn from(decl: CompositionDecl) -> Self {
        Self::Composition(decl)
    }
}
