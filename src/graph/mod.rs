//! Connectivity index over a Caffe net
//!
//! [`NetIndex`] derives producer/consumer relationships from the top and
//! bottom lists of a decoded net. The normalization pass itself runs as two
//! plain sweeps and does not need it; the index backs the net summary and
//! the structural lint.

use std::collections::HashMap;

use crate::proto::NetParameter;

/// Producer/consumer lookup tables for one net
///
/// Built once from a borrowed net; indices refer to declaration order.
#[derive(Debug, Default)]
pub struct NetIndex {
    /// Maps top name → declaration index of its first producer
    producer: HashMap<String, usize>,
    /// Maps name → number of bottom references to it
    consumer_count: HashMap<String, usize>,
}

impl NetIndex {
    /// Build the index for a net
    pub fn new(net: &NetParameter) -> Self {
        let mut producer: HashMap<String, usize> = HashMap::new();
        let mut consumer_count: HashMap<String, usize> = HashMap::new();

        for (idx, layer) in net.layer.iter().enumerate() {
            for top in &layer.top {
                // first producer wins; duplicates are surfaced by validation
                producer.entry(top.clone()).or_insert(idx);
            }
            for bottom in &layer.bottom {
                *consumer_count.entry(bottom.clone()).or_insert(0) += 1;
            }
        }

        Self {
            producer,
            consumer_count,
        }
    }

    /// Declaration index of the layer producing `name`, if any
    pub fn producer_of(&self, name: &str) -> Option<usize> {
        self.producer.get(name).copied()
    }

    /// Whether any layer produces `name` as a top
    pub fn is_produced(&self, name: &str) -> bool {
        self.producer.contains_key(name)
    }

    /// Number of bottom references to `name`
    pub fn consumer_count(&self, name: &str) -> usize {
        self.consumer_count.get(name).copied().unwrap_or(0)
    }

    /// Names consumed by some layer but produced by none.
    ///
    /// These are the net's external inputs, including the deprecated
    /// `input:` declarations which appear here naturally.
    pub fn external_inputs(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .consumer_count
            .keys()
            .filter(|name| !self.producer.contains_key(name.as_str()))
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }

    /// Names produced by some layer but consumed by none.
    ///
    /// These are the net's external outputs.
    pub fn external_outputs(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .producer
            .keys()
            .filter(|name| !self.consumer_count.contains_key(name.as_str()))
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }
}
