use std::{
    cell::{Cell, RefCell},
    fmt,
    str::FromStr,
};

use crate::foundation::{
    core::Props,
    error::{WavyteError, WavyteResult},
};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
/// How the host process is producing output.
pub enum OperatingMode {
    /// Human-facing preview.
    Interactive,
    /// Unattended batch render.
    HeadlessRender,
    /// Metadata-only modes (e.g. listing compositions); nothing is mounted.
    #[default]
    Other,
}

impl OperatingMode {
    /// Lenient mapping used for environment variables: unknown values mean [`Self::Other`].
    pub fn from_env_value(value: &str) -> Self {
        value.parse().unwrap_or(Self::Other)
    }

    /// Stable kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Interactive => "interactive",
            Self::HeadlessRender => "headless-render",
            Self::Other => "other",
        }
    }
}

impl FromStr for OperatingMode {
    type Err = WavyteError;

    fn from_str(s: &str) -> WavyteResult<Self> {
        match s.trim() {
            "interactive" | "preview" => Ok(Self::Interactive),
            "headless-render" | "rendering" => Ok(Self::HeadlessRender),
            "other" => Ok(Self::Other),
            other => Err(WavyteError::serde(format!(
                "unknown operating mode \"{other}\" \
                 (expected interactive, headless-render or other)"
            ))),
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Queries dispatch re-reads on every evaluation.
pub trait Environment {
    /// Current operating mode.
    fn mode(&self) -> OperatingMode;
    /// Id of the composition that is the current preview/render target.
    fn selected_composition(&self) -> Option<String>;
    /// Externally supplied props that override each composition's defaults.
    fn input_props(&self) -> Props;
}

#[derive(Debug, Default)]
/// In-process [`Environment`] whose values can change between dispatch evaluations.
pub struct HostEnvironment {
    mode: Cell<OperatingMode>,
    selected: RefCell<Option<String>>,
    input_props: RefCell<Props>,
}

impl HostEnvironment {
    /// Build an environment with fixed initial values.
    pub fn new(mode: OperatingMode, selected: Option<String>, input_props: Props) -> Self {
        Self {
            mode: Cell::new(mode),
            selected: RefCell::new(selected),
            input_props: RefCell::new(input_props),
        }
    }

    /// Switch operating mode.
    pub fn set_mode(&self, mode: OperatingMode) {
        self.mode.set(mode);
    }

    /// Change (or clear) the selected composition.
    pub fn select(&self, id: Option<&str>) {
        *self.selected.borrow_mut() = id.map(str::to_string);
    }

    /// Replace the input props.
    pub fn set_input_props(&self, props: Props) {
        *self.input_props.borrow_mut() = props;
    }
}

impl Environment for HostEnvironment {
    fn mode(&self) -> OperatingMode {
        self.mode.get()
    }

    fn selected_composition(&self) -> Option<String> {
        self.selected.borrow().clone()
    }

    fn input_props(&self) -> Props {
        self.input_props.borrow().clone()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/mode.rs"]
mod tests;
