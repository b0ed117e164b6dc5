//! Validation predicates shared by composition and folder declarations.
//!
//! Each predicate accepts a value plus a context label used in the error message, and
//! fails with the matching [`WavyteError`] variant.

use crate::foundation::error::{WavyteError, WavyteResult};

/// Characters accepted in composition ids and folder names: ASCII letters, digits, `-`,
/// and CJK unified ideographs.
fn is_url_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

fn is_url_safe(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_url_safe_char)
}

/// Validate that a composition id is non-empty and URL safe.
pub fn validate_composition_id(id: &str) -> WavyteResult<()> {
    if !is_url_safe(id) {
        return Err(WavyteError::invalid_id(format!(
            "composition id can only contain a-z, A-Z, 0-9, CJK characters and -, got \"{id}\""
        )));
    }
    Ok(())
}

/// Validate one axis of a composition's size.
pub fn validate_dimension(value: f64, axis: &str, context: &str) -> WavyteResult<()> {
    if !value.is_finite() {
        return Err(WavyteError::invalid_dimension(format!(
            "the \"{axis}\" prop {context} must be finite, but is {value}"
        )));
    }
    if value <= 0.0 {
        return Err(WavyteError::invalid_dimension(format!(
            "the \"{axis}\" prop {context} must be positive, but is {value}"
        )));
    }
    Ok(())
}

/// Validate a frame rate.
pub fn validate_fps(fps: f64, context: &str) -> WavyteResult<()> {
    if !fps.is_finite() {
        return Err(WavyteError::invalid_fps(format!(
            "\"fps\" {context} must be finite, but is {fps}"
        )));
    }
    if fps <= 0.0 {
        return Err(WavyteError::invalid_fps(format!(
            "\"fps\" {context} must be positive, but got {fps}"
        )));
    }
    Ok(())
}

/// Validate a duration given as a frame count.
pub fn validate_duration_in_frames(frames: f64, context: &str) -> WavyteResult<()> {
    if !frames.is_finite() {
        return Err(WavyteError::invalid_duration(format!(
            "the \"durationInFrames\" prop {context} must be finite, but got {frames}"
        )));
    }
    if frames <= 0.0 {
        return Err(WavyteError::invalid_duration(format!(
            "the \"durationInFrames\" prop {context} must be positive, but got {frames}"
        )));
    }
    if frames.fract() != 0.0 {
        return Err(WavyteError::invalid_duration(format!(
            "the \"durationInFrames\" prop {context} must be an integer, but got {frames}"
        )));
    }
    Ok(())
}

/// Validate a folder name. The same charset as ids, so `/` can never appear.
pub fn validate_folder_name(name: &str) -> WavyteResult<()> {
    if name.is_empty() {
        return Err(WavyteError::invalid_folder_name(
            "folder name must not be empty",
        ));
    }
    if !is_url_safe(name) {
        return Err(WavyteError::invalid_folder_name(format!(
            "folder name can only contain a-z, A-Z, 0-9, CJK characters and -, got \"{name}\""
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/validation/rules.rs"]
mod tests;
