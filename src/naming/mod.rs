//! Name-convention predicates
//!
//! Pure string predicates used by the normalization pass to decide whether a
//! candidate name segment is a layer-type suffix or an output-index suffix,
//! and whether a name is exempt from renaming. All functions operate on
//! borrowed string views and carry no state.

/// Parse `text` as a base-10 container index.
///
/// Returns the value only for a valid non-negative integer; any parse
/// failure yields `None`.
pub fn parse_index(text: &str) -> Option<usize> {
    text.parse::<usize>().ok()
}

/// Check whether `name` is a reserved connection-point name.
///
/// `"label"` and `"data"` denote fixed external input/output conventions and
/// are never renamed.
pub fn is_special_case(name: &str) -> bool {
    name == "label" || name == "data"
}

/// Check whether `suffix` is a known shorthand for `layer_type`.
///
/// True when the suffix case-insensitively equals the layer type, or for the
/// historical `bn` alias of `BatchNorm`. Further aliases can be added here
/// without changing the contract.
pub fn is_type_suffix(layer_type: &str, suffix: &str) -> bool {
    if suffix.eq_ignore_ascii_case(layer_type) {
        return true;
    }
    if layer_type.eq_ignore_ascii_case("batchnorm") && suffix == "bn" {
        return true;
    }
    false
}

/// Split a layer name at its last `/` into `(stem, type tail)`.
///
/// Layer names following the hierarchical-path convention append the layer
/// type after a slash (`conv1/Convolution`). A name without a slash is all
/// stem.
pub fn split_name_tail(name: &str) -> (&str, &str) {
    match name.rsplit_once('/') {
        Some((base, tail)) => (base, tail),
        None => (name, ""),
    }
}

/// Split a top name at its last `_` into `(stem, index tail)`, keeping the
/// tail only when it parses to exactly `position`.
///
/// Multi-output layers historically append the output index to the top name
/// (`slice_1`). A tail that is not this top's own index is part of the stem.
pub fn split_index_tail(top: &str, position: usize) -> (&str, &str) {
    if let Some((base, tail)) = top.rsplit_once('_') {
        if parse_index(tail) == Some(position) {
            return (base, tail);
        }
    }
    (top, "")
}

/// Case-insensitive comparison of a top stem against a layer's names.
///
/// A top already matches its layer when the stem equals either the full
/// layer name or the stripped stem.
pub fn stem_matches(layer_name: &str, name_base: &str, top_base: &str) -> bool {
    layer_name.eq_ignore_ascii_case(top_base) || name_base.eq_ignore_ascii_case(top_base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("0"), Some(0));
        assert_eq!(parse_index("42"), Some(42));
        assert_eq!(parse_index("-1"), None);
        assert_eq!(parse_index(""), None);
        assert_eq!(parse_index("1a"), None);
        assert_eq!(parse_index("conv"), None);
    }

    #[test]
    fn test_is_special_case() {
        assert!(is_special_case("label"));
        assert!(is_special_case("data"));
        assert!(!is_special_case("Data"));
        assert!(!is_special_case("conv1"));
    }

    #[test]
    fn test_is_type_suffix_case_insensitive() {
        assert!(is_type_suffix("Convolution", "Convolution"));
        assert!(is_type_suffix("Convolution", "convolution"));
        assert!(is_type_suffix("BatchNorm", "batchnorm"));
        assert!(!is_type_suffix("Convolution", "Conv"));
    }

    #[test]
    fn test_is_type_suffix_bn_alias() {
        assert!(is_type_suffix("BatchNorm", "bn"));
        assert!(is_type_suffix("batchnorm", "bn"));
        // The alias is exact; only the layer type is compared loosely
        assert!(!is_type_suffix("BatchNorm", "BN"));
        assert!(!is_type_suffix("Scale", "bn"));
    }

    #[test]
    fn test_split_name_tail() {
        assert_eq!(split_name_tail("conv1/Convolution"), ("conv1", "Convolution"));
        assert_eq!(split_name_tail("a/b/c"), ("a/b", "c"));
        assert_eq!(split_name_tail("conv1"), ("conv1", ""));
        assert_eq!(split_name_tail(""), ("", ""));
    }

    #[test]
    fn test_split_index_tail() {
        // Tail is kept only when it equals the top's own position
        assert_eq!(split_index_tail("conv1_0", 0), ("conv1", "0"));
        assert_eq!(split_index_tail("slice_2", 2), ("slice", "2"));
        assert_eq!(split_index_tail("conv1_0", 1), ("conv1_0", ""));
        assert_eq!(split_index_tail("conv1_x", 0), ("conv1_x", ""));
        assert_eq!(split_index_tail("conv1", 0), ("conv1", ""));
    }

    #[test]
    fn test_stem_matches() {
        assert!(stem_matches("conv1/Convolution", "conv1", "conv1"));
        assert!(stem_matches("Conv1", "Conv1", "conv1"));
        assert!(stem_matches("fc1", "fc1", "FC1"));
        assert!(!stem_matches("fc1", "fc1", "ip_output"));
    }
}
