//! Per-composition render dispatch.
//!
//! A [`DispatchSlot`] belongs to one composition declaration. Every evaluation re-reads the
//! selected composition and operating mode, decides whether the view should be mounted, and
//! applies the readiness discipline of the current mode while the view is still loading:
//!
//! - `interactive`: show the loading placeholder, register no token.
//! - `headless-render`: hold exactly one readiness token until the view is mounted or the
//!   attempt is abandoned.

use crate::{
    composition::record::{CompositionRecord, ViewPoll, ViewRef, ViewSource},
    dispatch::{
        mode::OperatingMode,
        readiness::{ReadinessLedger, TokenHandle},
    },
    foundation::core::{Props, merge_props},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
/// Lifecycle of one dispatch slot.
pub enum DispatchState {
    /// Not mounted.
    #[default]
    Idle,
    /// Selected; view code still loading.
    Mounting,
    /// View mounted with merged props.
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
/// How completion is signalled while a selected view is loading.
pub enum Discipline {
    /// Show the loading indicator; a human is watching.
    Placeholder,
    /// Hold a readiness token so the render gate waits. Tokens are only held while the view is
    /// pending; an eager view mounts on the first evaluation without one.
    ReadinessToken,
}

/// Decide whether composition `id` should be mounted, and under which discipline.
///
/// Returns `None` unless `id` is the selected composition and the mode produces output.
pub fn mount_discipline(
    id: &str,
    selected: Option<&str>,
    mode: OperatingMode,
) -> Option<Discipline> {
    if selected != Some(id) {
        return None;
    }
    match mode {
        OperatingMode::Interactive => Some(Discipline::Placeholder),
        OperatingMode::HeadlessRender => Some(Discipline::ReadinessToken),
        OperatingMode::Other => None,
    }
}

#[derive(Clone, Debug)]
/// A view mounted with its final props.
pub struct MountedView {
    /// The resolved view.
    pub view: ViewRef,
    /// Default props overridden by input props.
    pub props: Props,
}

#[derive(Clone, Debug, Default)]
/// What a slot currently produces.
pub enum DispatchOutput {
    /// Nothing is mounted (also the headless fallback while loading).
    #[default]
    Nothing,
    /// Loading indicator while view code resolves in interactive mode.
    Placeholder,
    /// The mounted view.
    View(MountedView),
}

#[derive(Debug, Default)]
/// Dispatch state machine for one composition declaration.
pub struct DispatchSlot {
    state: DispatchState,
    source: Option<ViewSource>,
    token: Option<TokenHandle>,
    output: DispatchOutput,
    last_error: Option<String>,
}

impl DispatchSlot {
    /// Create an idle slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-evaluate dispatch for `record` and return the resulting state.
    pub fn sync<L: ReadinessLedger + ?Sized>(
        &mut self,
        record: &CompositionRecord,
        selected: Option<&str>,
        mode: OperatingMode,
        input_props: &Props,
        ledger: &mut L,
    ) -> DispatchState {
        let Some(discipline) = mount_discipline(&record.id, selected, mode) else {
            self.teardown(ledger);
            return self.state;
        };

        // A different component means a fresh mount attempt.
        if let Some(source) = &self.source
            && !source.same_identity(&record.component)
        {
            self.teardown(ledger);
        }
        self.source = Some(record.component.clone());

        match record.component.poll() {
            ViewPoll::Ready(view) => {
                self.release(ledger);
                if self.state != DispatchState::Ready {
                    tracing::debug!(id = %record.id, view = view.name(), %mode, "mounted view");
                }
                self.state = DispatchState::Ready;
                self.last_error = None;
                self.output = DispatchOutput::View(MountedView {
                    view,
                    props: merge_props(&record.default_props, input_props),
                });
            }
            ViewPoll::Pending => {
                self.state = DispatchState::Mounting;
                match discipline {
                    Discipline::Placeholder => {
                        self.release(ledger);
                        self.output = DispatchOutput::Placeholder;
                    }
                    Discipline::ReadinessToken => {
                        if self.token.is_none() {
                            let description = format!(
                                "waiting for the view of composition \"{}\" to resolve",
                                record.id
                            );
                            self.token = Some(ledger.register_token(&description));
                        }
                        self.output = DispatchOutput::Nothing;
                    }
                }
            }
            ViewPoll::Failed(msg) => {
                if self.last_error.as_deref() != Some(msg.as_str()) {
                    tracing::warn!(id = %record.id, error = %msg, "view failed to load");
                }
                self.release(ledger);
                self.state = DispatchState::Idle;
                self.output = DispatchOutput::Nothing;
                self.last_error = Some(msg);
            }
        }
        self.state
    }

    /// Abandon any mount attempt, releasing its token if one is held.
    pub fn teardown<L: ReadinessLedger + ?Sized>(&mut self, ledger: &mut L) {
        self.release(ledger);
        self.state = DispatchState::Idle;
        self.source = None;
        self.output = DispatchOutput::Nothing;
        self.last_error = None;
    }

    /// Current state.
    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Current output.
    pub fn output(&self) -> &DispatchOutput {
        &self.output
    }

    /// Token held while loading in headless mode.
    pub fn token(&self) -> Option<TokenHandle> {
        self.token
    }

    /// Load error from the last evaluation, if the view failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn release<L: ReadinessLedger + ?Sized>(&mut self, ledger: &mut L) {
        if let Some(token) = self.token.take() {
            ledger.release_token(token);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/slot.rs"]
mod tests;
