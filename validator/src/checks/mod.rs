//! Per-node checks, one module per concern.
//!
//! - [`types`]: asserted types resolve to declared classes
//! - [`properties`]: properties are declared, apply to the node and fit their range
//! - [`literals`]: literal datatypes are known and lexically valid
//! - [`lexical`]: lexical rules of the built-in XSD datatypes
//! - [`cardinality`]: restriction and functional-property counts

pub mod cardinality;
pub mod lexical;
pub mod literals;
pub mod properties;
pub mod types;
