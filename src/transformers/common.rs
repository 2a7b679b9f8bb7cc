//! Common utilities for transformers
//!
//! Shared trait and result types used by net transformers.

use std::fmt;

use crate::error::CaffeResult;
use crate::proto::NetParameter;

/// Which side of a layer a rename touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameKind {
    /// An output connection-point name was rewritten on its producing layer
    Top,
    /// An input reference was rewritten to follow a renamed top
    Bottom,
}

/// One rename performed during a pass
///
/// Events are recorded in the order the mutations happen and are owned by
/// the caller; the pass keeps no state of its own between invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEvent {
    /// Declaration index of the layer the rename happened on
    pub layer_index: usize,
    /// Name of that layer
    pub layer_name: String,
    /// Top or bottom side
    pub kind: RenameKind,
    /// Name before the rewrite
    pub old: String,
    /// Name after the rewrite
    pub new: String,
}

impl fmt::Display for RenameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RenameKind::Top => write!(
                f,
                "{} renamed top {} to match layer name {}",
                self.layer_index, self.old, self.new
            ),
            RenameKind::Bottom => write!(
                f,
                "{} renamed bottom {} to {}",
                self.layer_index, self.old, self.new
            ),
        }
    }
}

/// Transformation result for statistics
#[derive(Debug, Default, Clone)]
pub struct TransformResult {
    /// Number of top names rewritten
    pub tops_renamed: usize,
    /// Number of bottom references rewritten
    pub bottoms_rewritten: usize,
    /// Ordered record of every rename performed
    pub events: Vec<RenameEvent>,
}

impl TransformResult {
    /// Create empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the pass mutated the net at all
    pub fn modified(&self) -> bool {
        self.tops_renamed > 0 || self.bottoms_rewritten > 0
    }

    /// Record a top rename
    pub fn record_top(&mut self, layer_index: usize, layer_name: &str, old: &str, new: &str) {
        self.tops_renamed += 1;
        self.events.push(RenameEvent {
            layer_index,
            layer_name: layer_name.to_string(),
            kind: RenameKind::Top,
            old: old.to_string(),
            new: new.to_string(),
        });
    }

    /// Record a bottom rewrite
    pub fn record_bottom(&mut self, layer_index: usize, layer_name: &str, old: &str, new: &str) {
        self.bottoms_rewritten += 1;
        self.events.push(RenameEvent {
            layer_index,
            layer_name: layer_name.to_string(),
            kind: RenameKind::Bottom,
            old: old.to_string(),
            new: new.to_string(),
        });
    }

    /// Merge with another result
    pub fn merge(&mut self, other: TransformResult) {
        self.tops_renamed += other.tops_renamed;
        self.bottoms_rewritten += other.bottoms_rewritten;
        self.events.extend(other.events);
    }
}

/// Trait for individual net transformers
pub trait NetTransformer {
    /// Name of the transformer
    fn name(&self) -> &'static str;

    /// Apply the transformation, mutating the net in place
    fn transform(&self, net: &mut NetParameter) -> CaffeResult<TransformResult>;

    /// Check if this transformer is applicable to the net
    fn is_applicable(&self, _net: &NetParameter) -> bool {
        true
    }
}

/// Run multiple transformers in sequence
pub fn run_transformers(
    net: &mut NetParameter,
    transformers: &[&dyn NetTransformer],
) -> CaffeResult<TransformResult> {
    let mut total = TransformResult::new();

    for transformer in transformers {
        if transformer.is_applicable(net) {
            let result = transformer.transform(net)?;
            total.merge(result);
        }
    }

    Ok(total)
}
