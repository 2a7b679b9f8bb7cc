//! Extension methods for Caffe protobuf types
//!
//! Provides convenient helper methods for working with Caffe protobuf types.

use super::caffe::*;

// ============================================================================
// NetParameter extensions
// ============================================================================

impl NetParameter {
    /// Check if the net declares any layers
    pub fn has_layers(&self) -> bool {
        !self.layer.is_empty()
    }

    /// Find a layer by name
    pub fn find_layer(&self, name: &str) -> Option<&LayerParameter> {
        self.layer.iter().find(|l| l.name() == name)
    }

    /// Iterate over layer names in declaration order
    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layer.iter().map(|l| l.name())
    }
}

// ============================================================================
// LayerParameter extensions
// ============================================================================

impl LayerParameter {
    /// Check if this layer has a specific type
    pub fn is_type(&self, layer_type: &str) -> bool {
        self.r#type() == layer_type
    }

    /// Check if this layer's type is in the given list
    pub fn is_type_in(&self, layer_types: &[&str]) -> bool {
        layer_types.contains(&self.r#type())
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Create a new LayerParameter
pub fn make_layer(layer_type: &str, bottoms: &[&str], tops: &[&str], name: &str) -> LayerParameter {
    LayerParameter {
        name: Some(name.to_string()),
        r#type: Some(layer_type.to_string()),
        bottom: bottoms.iter().map(|s| s.to_string()).collect(),
        top: tops.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

/// Create a net from a list of layers
pub fn make_net(name: &str, layers: Vec<LayerParameter>) -> NetParameter {
    NetParameter {
        name: Some(name.to_string()),
        layer: layers,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_layer() {
        let layer = make_layer("Convolution", &["data"], &["conv1"], "conv1");
        assert_eq!(layer.name(), "conv1");
        assert_eq!(layer.r#type(), "Convolution");
        assert_eq!(layer.bottom, vec!["data"]);
        assert_eq!(layer.top, vec!["conv1"]);
    }

    #[test]
    fn test_find_layer() {
        let net = make_net(
            "test",
            vec![
                make_layer("Input", &[], &["data"], "input"),
                make_layer("Convolution", &["data"], &["conv1"], "conv1"),
            ],
        );

        assert!(net.has_layers());
        assert_eq!(net.find_layer("conv1").unwrap().r#type(), "Convolution");
        assert!(net.find_layer("missing").is_none());
    }

    #[test]
    fn test_is_type() {
        let layer = make_layer("ReLU", &["conv1"], &["conv1"], "relu1");
        assert!(layer.is_type("ReLU"));
        assert!(layer.is_type_in(&["ReLU", "Sigmoid"]));
        assert!(!layer.is_type_in(&["Convolution"]));
    }
}
