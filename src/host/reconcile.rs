use std::collections::BTreeMap;

use crate::{
    composition::{
        declaration::{CompositionDecl, Declaration},
        folder::FolderScope,
        record::{CompositionRecord, ViewSource},
        registry::CompositionRegistry,
    },
    dispatch::{
        mode::{Environment, HostEnvironment, OperatingMode},
        readiness::{ReadinessLedger, TokenLedger},
        slot::{DispatchOutput, DispatchSlot, DispatchState, MountedView},
    },
    foundation::{core::Props, error::WavyteResult},
    host::config::HostConfig,
};

/// Position of a declaration in the tree (child indices from the root).
type NodeKey = Vec<usize>;

#[derive(Clone, Debug, PartialEq, Eq)]
struct FolderSpec {
    name: String,
    parent_path: Option<String>,
}

#[derive(Debug)]
struct Instance {
    nonce: u64,
    component: ViewSource,
    registered: Option<CompositionRecord>,
    slot: DispatchSlot,
}

/// Drives registration and dispatch for a declaration tree.
///
/// Each [`render`](Self::render) reconciles the tree against what is registered: stale records
/// are unregistered and stale folder scopes exited before any replacement is registered, so the
/// registry never holds two records for one id. Dispatch is then re-evaluated for every
/// registered composition against the environment's current mode and selection.
pub struct CompositionHost<E = HostEnvironment, L = TokenLedger> {
    registry: CompositionRegistry,
    env: E,
    ledger: L,
    instances: BTreeMap<NodeKey, Instance>,
    folders: BTreeMap<NodeKey, FolderSpec>,
}

impl CompositionHost {
    /// Host with an in-memory ledger and the environment described by `config`.
    pub fn from_config(config: &HostConfig) -> Self {
        Self::new(config.environment(), TokenLedger::new())
    }
}

impl<E: Environment, L: ReadinessLedger> CompositionHost<E, L> {
    /// Create a host over `env` and `ledger` with an empty registry.
    pub fn new(env: E, ledger: L) -> Self {
        Self {
            registry: CompositionRegistry::new(),
            env,
            ledger,
            instances: BTreeMap::new(),
            folders: BTreeMap::new(),
        }
    }

    /// Reconcile the registry with `tree`, then re-evaluate dispatch.
    ///
    /// Invalid folder names fail before anything is mutated. A failing composition registration
    /// only affects that declaration: every other declaration is still registered, the first
    /// error is returned, and the failed one is retried on the next render.
    #[tracing::instrument(skip_all, fields(declarations = tree.len()))]
    pub fn render(&mut self, tree: &[Declaration]) -> WavyteResult<()> {
        let mut desired_folders = BTreeMap::new();
        let mut desired_decls = BTreeMap::new();
        collect(
            tree,
            &FolderScope::root(),
            &mut Vec::new(),
            &mut desired_folders,
            &mut desired_decls,
        )?;

        let desired = self.desired_records(&desired_decls);

        // Cleanup: everything stale goes before anything new is registered.
        let gone: Vec<NodeKey> = self
            .instances
            .keys()
            .filter(|k| !desired.contains_key(*k))
            .cloned()
            .collect();
        for key in gone {
            if let Some(mut inst) = self.instances.remove(&key) {
                inst.slot.teardown(&mut self.ledger);
                if let Some(rec) = inst.registered {
                    self.registry.unregister(&rec.id);
                }
            }
        }
        for (key, inst) in &mut self.instances {
            let Some(next) = desired.get(key) else {
                continue;
            };
            let Some(current) = &inst.registered else {
                continue;
            };
            if current.same_inputs(next) {
                continue;
            }
            if current.id != next.id {
                inst.slot.teardown(&mut self.ledger);
            }
            self.registry.unregister(&current.id);
            inst.registered = None;
        }
        let stale_folders: Vec<NodeKey> = self
            .folders
            .iter()
            .filter(|(k, spec)| desired_folders.get(*k) != Some(*spec))
            .map(|(k, _)| k.clone())
            .collect();
        for key in stale_folders {
            if let Some(spec) = self.folders.remove(&key) {
                self.registry
                    .exit_folder(&spec.name, spec.parent_path.as_deref());
            }
        }

        // Dispatch is re-evaluated even when a registration fails, so no slot keeps a token
        // for a record that was just unregistered.
        let committed = self.commit(desired_folders, desired);
        self.evaluate();
        committed
    }

    /// Re-evaluate dispatch only (selection, mode or lazy view changes).
    #[tracing::instrument(skip_all)]
    pub fn tick(&mut self) {
        self.evaluate();
    }

    /// Tear down every declaration: release tokens, unregister records, exit folders.
    pub fn unmount(&mut self) {
        for (_, mut inst) in std::mem::take(&mut self.instances) {
            inst.slot.teardown(&mut self.ledger);
            if let Some(rec) = inst.registered {
                self.registry.unregister(&rec.id);
            }
        }
        for (_, spec) in std::mem::take(&mut self.folders) {
            self.registry
                .exit_folder(&spec.name, spec.parent_path.as_deref());
        }
    }

    /// The registry this host maintains.
    pub fn registry(&self) -> &CompositionRegistry {
        &self.registry
    }

    /// The environment read on every dispatch evaluation.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// The readiness ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Dispatch state of the registered composition `id`.
    pub fn state(&self, id: &str) -> Option<DispatchState> {
        self.instance(id).map(|inst| inst.slot.state())
    }

    /// Dispatch output of the registered composition `id`.
    pub fn output(&self, id: &str) -> Option<&DispatchOutput> {
        self.instance(id).map(|inst| inst.slot.output())
    }

    /// The composition whose view is currently mounted, if any.
    pub fn mounted(&self) -> Option<(&CompositionRecord, &MountedView)> {
        self.instances.values().find_map(|inst| {
            let rec = inst.registered.as_ref()?;
            match inst.slot.output() {
                DispatchOutput::View(view) => Some((rec, view)),
                _ => None,
            }
        })
    }

    /// Serializable snapshot of every registered composition's dispatch state.
    pub fn report(&self) -> DispatchReport {
        let entries = self
            .instances
            .values()
            .filter_map(|inst| {
                let rec = inst.registered.as_ref()?;
                let (output, view, props) = match inst.slot.output() {
                    DispatchOutput::Nothing => ("nothing", None, None),
                    DispatchOutput::Placeholder => ("placeholder", None, None),
                    DispatchOutput::View(m) => {
                        ("view", Some(m.view.name().to_string()), Some(m.props.clone()))
                    }
                };
                Some(DispatchEntry {
                    id: rec.id.clone(),
                    state: inst.slot.state(),
                    output,
                    view,
                    props,
                    error: inst.slot.last_error().map(str::to_string),
                })
            })
            .collect();
        DispatchReport {
            mode: self.env.mode(),
            selected: self.env.selected_composition(),
            entries,
        }
    }

    fn instance(&self, id: &str) -> Option<&Instance> {
        self.instances
            .values()
            .find(|inst| inst.registered.as_ref().is_some_and(|r| r.id == id))
    }

    fn desired_records(
        &self,
        decls: &BTreeMap<NodeKey, (&CompositionDecl, FolderScope)>,
    ) -> BTreeMap<NodeKey, CompositionRecord> {
        decls
            .iter()
            .map(|(key, (decl, scope))| {
                let nonce = match self.instances.get(key) {
                    Some(inst) if inst.component.same_identity(&decl.component) => inst.nonce,
                    Some(inst) => inst.nonce + 1,
                    None => 0,
                };
                (key.clone(), decl.to_record(scope, nonce))
            })
            .collect()
    }

    /// Enter new folder scopes, then register new or replaced records.
    ///
    /// Keeps going past failures and returns the first one.
    fn commit(
        &mut self,
        desired_folders: BTreeMap<NodeKey, FolderSpec>,
        desired: BTreeMap<NodeKey, CompositionRecord>,
    ) -> WavyteResult<()> {
        let mut first_err = None;
        for (key, spec) in desired_folders {
            if self.folders.contains_key(&key) {
                continue;
            }
            match self
                .registry
                .enter_folder(&spec.name, spec.parent_path.as_deref())
            {
                Ok(_) => {
                    self.folders.insert(key, spec);
                }
                Err(e) => {
                    first_err.get_or_insert(e);
                }
            }
        }
        for (key, record) in desired {
            let inst = self.instances.entry(key).or_insert_with(|| Instance {
                nonce: record.nonce,
                component: record.component.clone(),
                registered: None,
                slot: DispatchSlot::new(),
            });
            inst.nonce = record.nonce;
            inst.component = record.component.clone();
            if inst.registered.is_some() {
                continue;
            }
            match self.registry.register(record.clone()) {
                Ok(()) => inst.registered = Some(record),
                Err(e) => {
                    first_err.get_or_insert(e);
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn evaluate(&mut self) {
        let mode = self.env.mode();
        let selected = self.env.selected_composition();
        let input_props = self.env.input_props();
        for inst in self.instances.values_mut() {
            match &inst.registered {
                Some(rec) => {
                    inst.slot
                        .sync(rec, selected.as_deref(), mode, &input_props, &mut self.ledger);
                }
                None => inst.slot.teardown(&mut self.ledger),
            }
        }
    }
}

fn collect<'a>(
    decls: &'a [Declaration],
    scope: &FolderScope,
    key: &mut NodeKey,
    folders: &mut BTreeMap<NodeKey, FolderSpec>,
    compositions: &mut BTreeMap<NodeKey, (&'a CompositionDecl, FolderScope)>,
) -> WavyteResult<()> {
    for (i, decl) in decls.iter().enumerate() {
        key.push(i);
        match decl {
            Declaration::Folder { name, children } => {
                let child = scope.child(name)?;
                folders.insert(
                    key.clone(),
                    FolderSpec {
                        name: name.clone(),
                        parent_path: child.parent_path().map(str::to_string),
                    },
                );
                collect(children, &child, key, folders, compositions)?;
            }
            Declaration::Composition(decl) => {
                compositions.insert(key.clone(), (decl, scope.clone()));
            }
        }
        key.pop();
    }
    Ok(())
}

#[derive(Clone, Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Dispatch state of one registered composition.
pub struct DispatchEntry {
    /// Composition id.
    pub id: String,
    /// Slot state.
    pub state: DispatchState,
    /// `nothing`, `placeholder` or `view`.
    pub output: &'static str,
    /// Mounted view name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    /// Props the mounted view received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<Props>,
    /// View load error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Snapshot of dispatch across all registered compositions.
pub struct DispatchReport {
    /// Mode at the time of the snapshot.
    pub mode: OperatingMode,
    /// Selected composition at the time of the snapshot.
    pub selected: Option<String>,
    /// One entry per registered composition.
    pub entries: Vec<DispatchEntry>,
}

impl DispatchReport {
    /// Id of the composition whose view is mounted.
    pub fn mounted_id(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.state == DispatchState::Ready)
            .map(|e| e.id.as_str())
    }
}
