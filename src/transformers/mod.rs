//! Net transformers module
//!
//! Transformers mutate a decoded [`NetParameter`](crate::proto::NetParameter)
//! in place and report what changed. The only transformer this crate ships
//! is the top-name normalization pass:
//!
//! - **NormalizeTopNames**: renames tops whose stem does not match their
//!   producing layer and rewrites every bottom reference accordingly
//!
//! # Example
//!
//! ```ignore
//! use caffe_normalizer::transformers::normalize_net;
//!
//! let result = normalize_net(&mut net);
//! if result.modified() {
//!     println!("renamed {} tops", result.tops_renamed);
//!     for event in &result.events {
//!         println!("{event}");
//!     }
//! }
//! ```

/// Common trait and result types
pub mod common;
/// Top-name normalization pass
pub mod normalize_names;

// Re-export common types
pub use common::{run_transformers, NetTransformer, RenameEvent, RenameKind, TransformResult};

// Re-export the normalization pass
pub use normalize_names::{analyze_layer, normalize_net, NormalizeTopNames, Rename};
