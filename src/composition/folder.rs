use crate::{foundation::error::WavyteResult, validation::rules::validate_folder_name};

const SEPARATOR: &str = "/";

fn join_path(parent_path: Option<&str>, name: &str) -> String {
    match parent_path {
        Some(parent) => format!("{parent}{SEPARATOR}{name}"),
        None => name.to_string(),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Folder context visible to a declaration: the nearest enclosing folder and its parent path.
///
/// Scopes are immutable values passed down the declaration tree; entering a child folder
/// returns a new scope and leaves `self` untouched.
pub struct FolderScope {
    folder_name: Option<String>,
    parent_path: Option<String>,
}

impl FolderScope {
    /// The scope outside of any folder.
    pub fn root() -> Self {
        Self::default()
    }

    /// Enter folder `name` nested inside this scope.
    pub fn child(&self, name: &str) -> WavyteResult<Self> {
        validate_folder_name(name)?;
        Ok(Self {
            folder_name: Some(name.to_string()),
            parent_path: self.path(),
        })
    }

    /// Name of the nearest enclosing folder.
    pub fn folder_name(&self) -> Option<&str> {
        self.folder_name.as_deref()
    }

    /// Joined path of the nearest folder's ancestors.
    pub fn parent_path(&self) -> Option<&str> {
        self.parent_path.as_deref()
    }

    /// Full path of the nearest folder (`parent/.../name`), or `None` at the root.
    pub fn path(&self) -> Option<String> {
        self.folder_name
            .as_deref()
            .map(|name| join_path(self.parent_path.as_deref(), name))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// An active folder, identified by `(name, parent_path)`.
pub struct FolderNode {
    /// Folder name, unique among its siblings.
    pub name: String,
    /// Joined path of all ancestor folder names.
    pub parent_path: Option<String>,
    #[serde(skip)]
    scopes: usize,
}

impl FolderNode {
    /// Full `/`-joined path of this folder.
    pub fn path(&self) -> String {
        join_path(self.parent_path.as_deref(), &self.name)
    }
}

#[derive(Clone, Debug, Default)]
/// Tree of folders that currently have at least one active scope.
pub struct FolderNamespace {
    nodes: Vec<FolderNode>,
}

impl FolderNamespace {
    /// Create an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an active scope for folder `name` under `parent_path` and return its full path.
    ///
    /// Entering a `(name, parent_path)` pair that is already active shares the existing node.
    pub fn enter_folder(&mut self, name: &str, parent_path: Option<&str>) -> WavyteResult<String> {
        validate_folder_name(name)?;
        match self.position(name, parent_path) {
            Some(i) => self.nodes[i].scopes += 1,
            None => self.nodes.push(FolderNode {
                name: name.to_string(),
                parent_path: parent_path.map(str::to_string),
                scopes: 1,
            }),
        }
        let path = join_path(parent_path, name);
        tracing::debug!(folder = %path, "entered folder");
        Ok(path)
    }

    /// Release one scope of folder `name` under `parent_path`. Unknown folders are ignored.
    pub fn exit_folder(&mut self, name: &str, parent_path: Option<&str>) {
        let Some(i) = self.position(name, parent_path) else {
            return;
        };
        self.nodes[i].scopes -= 1;
        if self.nodes[i].scopes == 0 {
            let node = self.nodes.remove(i);
            tracing::debug!(folder = %node.path(), "exited folder");
        }
    }

    /// Active folders in the order they were first entered.
    pub fn folders(&self) -> &[FolderNode] {
        &self.nodes
    }

    /// Whether a folder with this full path is active.
    pub fn contains_path(&self, path: &str) -> bool {
        self.nodes.iter().any(|n| n.path() == path)
    }

    fn position(&self, name: &str, parent_path: Option<&str>) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| n.name == name && n.parent_path.as_deref() == parent_path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/folder.rs"]
mod tests;
