use crate::{
    dispatch::mode::{HostEnvironment, OperatingMode},
    foundation::{
        core::{Props, props_from_str},
        error::{WavyteError, WavyteResult},
    },
};

/// Variable holding the operating mode (`interactive`/`preview`, `headless-render`/`rendering`).
pub const ENV_MODE: &str = "WAVYTE_ENVIRONMENT";
/// Variable holding the selected composition id.
pub const ENV_COMPOSITION: &str = "WAVYTE_COMPOSITION";
/// Variable holding input props as a JSON object.
pub const ENV_INPUT_PROPS: &str = "WAVYTE_INPUT_PROPS";

#[derive(Clone, Debug, Default, PartialEq)]
/// Process-start configuration of a host.
pub struct HostConfig {
    /// Operating mode.
    pub mode: OperatingMode,
    /// Selected composition id, if any.
    pub selected_composition: Option<String>,
    /// Input props overriding composition defaults.
    pub input_props: Props,
}

impl HostConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> WavyteResult<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> WavyteResult<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mode = get(ENV_MODE)
            .map(|v| OperatingMode::from_env_value(&v))
            .unwrap_or_default();
        let input_props = match get(ENV_INPUT_PROPS) {
            Some(raw) => props_from_str(&raw)
                .map_err(|e| WavyteError::serde(format!("{ENV_INPUT_PROPS}: {e}")))?,
            None => Props::new(),
        };

        Ok(Self {
            mode,
            selected_composition: get(ENV_COMPOSITION),
            input_props,
        })
    }

    /// Build the dispatch environment for this configuration.
    pub fn environment(&self) -> HostEnvironment {
        HostEnvironment::new(
            self.mode,
            self.selected_composition.clone(),
            self.input_props.clone(),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/config.rs"]
mod tests;
