//! Serializers for compiled ontologies and parsed documents.
//!
//! - [`artifact`]: version-stamped binary cache files

pub mod artifact;

pub use artifact::{
    is_artifact, load_artifact, read_header, save_artifact, write_artifact, Artifact,
    ArtifactHeader, ArtifactKind, MAGIC,
};
