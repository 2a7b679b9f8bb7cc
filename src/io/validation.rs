//! Caffe net validation
//!
//! Structural lint over a decoded net. Advisory only: the normalization
//! pass never consults it and tolerates everything flagged here.

use std::collections::HashSet;

use crate::error::{CaffeResult, NormalizeError};
use crate::proto::NetParameter;

/// Validation result with detailed issues
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the net is valid
    pub is_valid: bool,
    /// List of errors (critical issues)
    pub errors: Vec<String>,
    /// List of warnings (non-critical issues)
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error
    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
        self.is_valid = false;
    }

    /// Add a warning
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// Validate a net
///
/// Checks performed:
/// - the net declares at least one layer
/// - layer names are present and unique
/// - no two layers produce the same top (in-place reuse excepted)
/// - every bottom references a produced top, a declared net input, or an
///   in-place alias
pub fn validate_net(net: &NetParameter) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if net.layer.is_empty() {
        result.add_error("Net declares no layers");
        return result;
    }

    let mut seen_layer_names: HashSet<&str> = HashSet::new();
    let mut known_blobs: HashSet<&str> = HashSet::new();
    let mut seen_tops: HashSet<&str> = HashSet::new();

    // Deprecated net-level inputs count as known blobs
    for input in &net.input {
        known_blobs.insert(input.as_str());
    }

    for (idx, layer) in net.layer.iter().enumerate() {
        let name = layer.name();
        if name.is_empty() {
            result.add_warning(format!("Layer {} has no name", idx));
        } else if !seen_layer_names.insert(name) {
            result.add_warning(format!("Duplicate layer name '{}'", name));
        }

        for bottom in &layer.bottom {
            if !known_blobs.contains(bottom.as_str()) {
                result.add_warning(format!(
                    "Layer '{}' references undeclared blob '{}'",
                    name, bottom
                ));
            }
        }

        for top in &layer.top {
            // An in-place layer re-produces one of its own bottoms
            let in_place = layer.bottom.iter().any(|b| b == top);
            if !seen_tops.insert(top.as_str()) && !in_place {
                result.add_warning(format!(
                    "Top '{}' is produced by more than one layer ('{}')",
                    top, name
                ));
            }
            known_blobs.insert(top.as_str());
        }
    }

    result
}

/// Validate a net, converting errors to a `NormalizeError`
pub fn check_net(net: &NetParameter) -> CaffeResult<()> {
    let result = validate_net(net);
    if result.is_valid {
        Ok(())
    } else {
        Err(NormalizeError::ValidationFailed(result.errors.join("; ")))
    }
}
