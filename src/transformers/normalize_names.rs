//! Top-name normalization pass
//!
//! Rewrites every top (output connection-point) name that does not match the
//! name of the layer producing it, then propagates the renames to every
//! bottom reference in the net.
//!
//! Two naming conventions are recognized before a rename is decided, so
//! layers that already encode their type or output index are left alone:
//!
//! - hierarchical-path layer names (`conv1/Convolution`): the part after the
//!   last `/` is ignored when it is a known type suffix
//! - index-suffixed top names (`slice_1`): the part after the last `_` is
//!   ignored when it equals the top's own position
//!
//! Tops named `label` or `data` and in-place layers (`top[0] == bottom[0]`,
//! e.g. an activation overwriting its input blob) are exempt.

use std::collections::HashMap;

use crate::error::CaffeResult;
use crate::naming::{is_special_case, is_type_suffix, split_index_tail, split_name_tail, stem_matches};
use crate::proto::{LayerParameter, NetParameter};
use crate::transformers::common::{NetTransformer, TransformResult};

/// One (old name, new name) substitution produced by layer analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    /// Stem the top carried before the rewrite
    pub old: String,
    /// Canonical replacement
    pub new: String,
}

/// Inspect one layer and rewrite its mismatched top names in place.
///
/// Returns the (old, new) substitutions in top order. The layer's own record
/// is self-consistent when this returns, the rest of the net is not touched.
pub fn analyze_layer(layer: &mut LayerParameter) -> Vec<Rename> {
    let layer_name = layer.name().to_string();
    let layer_type = layer.r#type().to_string();

    // A `stem/Type` layer name compares by its stem; any other shape
    // compares whole.
    let (split_base, name_tail) = split_name_tail(&layer_name);
    let name_base = if !name_tail.is_empty() && is_type_suffix(&layer_type, name_tail) {
        split_base
    } else {
        layer_name.as_str()
    };

    let mut renames = Vec::new();

    for i in 0..layer.top.len() {
        let top = &layer.top[i];

        if is_special_case(top) {
            continue;
        }

        // In-place layers share the name with their input on purpose; a
        // layer with no bottoms cannot be in-place.
        if i == 0 && layer.bottom.first().is_some_and(|b| b == top) {
            continue;
        }

        // Compare the top without its own index appended
        let (top_base, top_tail) = split_index_tail(top, i);
        if stem_matches(&layer_name, name_base, top_base) {
            continue;
        }

        let old = top_base.to_string();
        let new = format!("{name_base}{top_tail}");

        // A degenerate layer name can produce an empty or unchanged
        // replacement; leave the top alone instead of recording it.
        if new.is_empty() || new == old {
            continue;
        }

        layer.top[i] = new.clone();
        renames.push(Rename { old, new });
    }

    renames
}

/// Normalize every top name in the net and rewrite the bottom references
/// that pointed at the old names.
///
/// The net is mutated in place. Layers are analyzed in declaration order to
/// build the rename table (later layers win on key collisions), then a
/// second full sweep rewrites matching bottoms. The sweep does not assume
/// declaration order equals topological order. Names the pass does not touch
/// stay byte-identical.
pub fn normalize_net(net: &mut NetParameter) -> TransformResult {
    let mut result = TransformResult::new();
    let mut rename_table: HashMap<String, String> = HashMap::new();

    for (idx, layer) in net.layer.iter_mut().enumerate() {
        let layer_name = layer.name().to_string();
        for rename in analyze_layer(layer) {
            result.record_top(idx, &layer_name, &rename.old, &rename.new);
            rename_table.insert(rename.old, rename.new);
        }
    }

    if rename_table.is_empty() {
        return result;
    }

    // If a top was renamed, rename all references to it in bottoms
    for (idx, layer) in net.layer.iter_mut().enumerate() {
        let layer_name = layer.name().to_string();
        for j in 0..layer.bottom.len() {
            if let Some(new) = rename_table.get(&layer.bottom[j]) {
                let new = new.clone();
                let old = std::mem::replace(&mut layer.bottom[j], new.clone());
                result.record_bottom(idx, &layer_name, &old, &new);
            }
        }
    }

    result
}

/// Normalizes top names to match their producing layer
///
/// Transformer wrapper around [`normalize_net`].
#[derive(Debug, Default)]
pub struct NormalizeTopNames;

impl NormalizeTopNames {
    /// Create a new NormalizeTopNames transformer
    pub fn new() -> Self {
        Self
    }
}

impl NetTransformer for NormalizeTopNames {
    fn name(&self) -> &'static str {
        "NormalizeTopNames"
    }

    fn transform(&self, net: &mut NetParameter) -> CaffeResult<TransformResult> {
        Ok(normalize_net(net))
    }

    fn is_applicable(&self, net: &NetParameter) -> bool {
        net.has_layers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::extensions::{make_layer, make_net};

    #[test]
    fn test_type_suffixed_name_with_indexed_top_matches() {
        // conv1/Convolution producing conv1_0 already follows both
        // conventions; nothing to rename.
        let mut net = make_net(
            "t",
            vec![make_layer(
                "Convolution",
                &["data"],
                &["conv1_0"],
                "conv1/Convolution",
            )],
        );

        let result = normalize_net(&mut net);
        assert!(!result.modified());
        assert_eq!(net.layer[0].top, vec!["conv1_0"]);
    }

    #[test]
    fn test_in_place_layer_never_renamed() {
        // top[0] == bottom[0] marks an in-place layer, name mismatch or not
        let mut net = make_net(
            "t",
            vec![make_layer("BatchNorm", &["conv1"], &["conv1"], "bn1")],
        );

        let result = normalize_net(&mut net);
        assert!(!result.modified());
        assert_eq!(net.layer[0].top, vec!["conv1"]);
    }

    #[test]
    fn test_mismatched_top_renamed_and_propagated() {
        let mut net = make_net(
            "t",
            vec![
                make_layer("InnerProduct", &["pool1"], &["ip_output"], "fc1"),
                make_layer("Softmax", &["ip_output"], &["prob"], "prob"),
            ],
        );

        let result = normalize_net(&mut net);
        assert!(result.modified());
        assert_eq!(result.tops_renamed, 1);
        assert_eq!(result.bottoms_rewritten, 1);
        assert_eq!(net.layer[0].top, vec!["fc1"]);
        assert_eq!(net.layer[1].bottom, vec!["fc1"]);
    }

    #[test]
    fn test_clean_net_reports_unmodified() {
        let mut net = make_net(
            "t",
            vec![
                make_layer("Input", &[], &["data"], "data"),
                make_layer("Convolution", &["data"], &["conv1"], "conv1"),
                make_layer("ReLU", &["conv1"], &["conv1"], "relu1"),
                make_layer("Softmax", &["conv1"], &["prob"], "prob"),
            ],
        );
        let before = net.clone();

        let result = normalize_net(&mut net);
        assert!(!result.modified());
        assert!(result.events.is_empty());
        assert_eq!(net, before);
    }

    #[test]
    fn test_special_case_tops_exempt() {
        let mut net = make_net(
            "t",
            vec![make_layer("Input", &[], &["data", "label"], "input")],
        );

        let result = normalize_net(&mut net);
        assert!(!result.modified());
        assert_eq!(net.layer[0].top, vec!["data", "label"]);
    }

    #[test]
    fn test_empty_bottom_layer_is_analyzed() {
        // No bottom entries: the in-place check must be skipped, not fault
        let mut net = make_net("t", vec![make_layer("Input", &[], &["x"], "input1")]);

        let result = normalize_net(&mut net);
        assert!(result.modified());
        assert_eq!(net.layer[0].top, vec!["input1"]);
    }

    #[test]
    fn test_rename_keeps_index_tail() {
        // Index-suffixed tops keep their original tail appended to the new stem
        let mut net = make_net(
            "t",
            vec![make_layer("Slice", &["conv1"], &["out_0", "out_1"], "slice1")],
        );

        let result = normalize_net(&mut net);
        assert_eq!(result.tops_renamed, 2);
        assert_eq!(net.layer[0].top, vec!["slice10", "slice11"]);
        assert_eq!(result.events[0].old, "out");
        assert_eq!(result.events[0].new, "slice10");
        assert_eq!(result.events[1].old, "out");
        assert_eq!(result.events[1].new, "slice11");
    }

    #[test]
    fn test_case_insensitive_match_preserves_bytes() {
        // Comparison is case-insensitive, output keeps the original bytes
        let mut net = make_net(
            "t",
            vec![make_layer("Convolution", &["data"], &["CONV1"], "conv1")],
        );

        let result = normalize_net(&mut net);
        assert!(!result.modified());
        assert_eq!(net.layer[0].top, vec!["CONV1"]);
    }

    #[test]
    fn test_rename_table_last_writer_wins() {
        // Two layers claim the same old top name; the later rename is the
        // one bottoms resolve to.
        let mut net = make_net(
            "t",
            vec![
                make_layer("Convolution", &["data"], &["shared"], "a"),
                make_layer("Convolution", &["data"], &["shared"], "b"),
                make_layer("ReLU", &["shared"], &["c"], "c"),
            ],
        );

        let result = normalize_net(&mut net);
        assert_eq!(result.tops_renamed, 2);
        assert_eq!(net.layer[0].top, vec!["a"]);
        assert_eq!(net.layer[1].top, vec!["b"]);
        assert_eq!(net.layer[2].bottom, vec!["b"]);
    }

    #[test]
    fn test_bottom_rewrite_ignores_declaration_order() {
        // A bottom declared before its producer is still rewritten
        let mut net = make_net(
            "t",
            vec![
                make_layer("ReLU", &["ip_output"], &["relu_out"], "relu1"),
                make_layer("InnerProduct", &["pool1"], &["ip_output"], "fc1"),
            ],
        );

        let result = normalize_net(&mut net);
        assert!(result.modified());
        assert_eq!(net.layer[0].bottom, vec!["fc1"]);
    }

    #[test]
    fn test_idempotent() {
        let mut net = make_net(
            "t",
            vec![
                make_layer("InnerProduct", &["pool1"], &["ip_output"], "fc1"),
                make_layer("Softmax", &["ip_output"], &["prob"], "prob"),
            ],
        );

        let first = normalize_net(&mut net);
        assert!(first.modified());
        let after_first = net.clone();

        let second = normalize_net(&mut net);
        assert!(!second.modified());
        assert_eq!(net, after_first);
    }

    #[test]
    fn test_bn_alias_in_layer_name() {
        // conv2/bn with type BatchNorm strips the historical alias tail
        let mut net = make_net(
            "t",
            vec![make_layer("BatchNorm", &["conv2"], &["conv2"], "conv2/bn")],
        );
        // in-place anyway, but also stem-matching; either way untouched
        let result = normalize_net(&mut net);
        assert!(!result.modified());

        // Non-in-place variant relies on the stripped stem
        let mut net = make_net(
            "t",
            vec![make_layer("BatchNorm", &["conv1"], &["conv2"], "conv2/bn")],
        );
        let result = normalize_net(&mut net);
        assert!(!result.modified());
    }

    #[test]
    fn test_transformer_wrapper() {
        let mut net = make_net(
            "t",
            vec![make_layer("InnerProduct", &["pool1"], &["ip_output"], "fc1")],
        );

        let pass = NormalizeTopNames::new();
        assert!(pass.is_applicable(&net));
        let result = pass.transform(&mut net).unwrap();
        assert!(result.modified());

        assert!(!pass.is_applicable(&NetParameter::default()));
    }
}
