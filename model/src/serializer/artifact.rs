//! Version-stamped binary artifacts.
//!
//! Layout:
//!
//! ```text
//! ONTOVAL\0 | header length (u32 LE) | bincode header | bincode payload
//! ```
//!
//! The header is decoded and its toolkit version checked before any payload
//! byte is touched.

use bincode::Options;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::DocumentGraph;
use crate::error::{ModelError, Result};
use crate::ontology::OntologyModel;
use crate::TOOLKIT_VERSION;

/// Magic bytes that open every artifact.
pub const MAGIC: &[u8; 8] = b"ONTOVAL\0";

/// Upper bound on a decoded header or payload.
const DECODE_LIMIT: u64 = 1 << 30;

const PRELUDE_LEN: usize = MAGIC.len() + 4;

/// What an artifact contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactKind {
    /// A compiled [`OntologyModel`].
    Ontology,
    /// A parsed [`DocumentGraph`].
    Document,
}

impl ArtifactKind {
    /// Lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Ontology => "ontology",
            ArtifactKind::Document => "document",
        }
    }
}

/// Metadata stored ahead of the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactHeader {
    /// Version of the toolkit that wrote the artifact.
    pub toolkit_version: String,
    /// Payload kind.
    pub kind: ArtifactKind,
    /// Free-form comment.
    pub comment: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl ArtifactHeader {
    /// A header stamped with the running toolkit version and the current time.
    #[must_use]
    pub fn new(kind: ArtifactKind, comment: Option<&str>) -> Self {
        Self {
            toolkit_version: TOOLKIT_VERSION.to_string(),
            kind,
            comment: comment.map(str::to_string),
            created_at: Utc::now(),
        }
    }
}

/// An artifact payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    /// A compiled ontology.
    Ontology(OntologyModel),
    /// A parsed document.
    Document(DocumentGraph),
}

impl Artifact {
    /// The kind matching this payload.
    #[must_use]
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Artifact::Ontology(_) => ArtifactKind::Ontology,
            Artifact::Document(_) => ArtifactKind::Document,
        }
    }

    /// The ontology, if this is one.
    #[must_use]
    pub fn into_ontology(self) -> Option<OntologyModel> {
        match self {
            Artifact::Ontology(model) => Some(model),
            Artifact::Document(_) => None,
        }
    }

    /// The document, if this is one.
    #[must_use]
    pub fn into_document(self) -> Option<DocumentGraph> {
        match self {
            Artifact::Document(graph) => Some(graph),
            Artifact::Ontology(_) => None,
        }
    }
}

fn options() -> impl Options {
    bincode::DefaultOptions::new().with_limit(DECODE_LIMIT)
}

/// Whether `bytes` start with the artifact magic.
#[must_use]
pub fn is_artifact(bytes: &[u8]) -> bool {
    bytes.starts_with(MAGIC)
}

/// Serializes `data` under a freshly stamped header.
///
/// # Errors
///
/// Returns [`ModelError::Format`] if `kind` does not match the payload, or
/// [`ModelError::Encode`] if encoding fails.
pub fn save_artifact(kind: ArtifactKind, data: &Artifact, comment: Option<&str>) -> Result<Vec<u8>> {
    if data.kind() != kind {
        return Err(ModelError::format(
            "artifact",
            format!(
                "payload is {}, expected {}",
                data.kind().as_str(),
                kind.as_str()
            ),
        ));
    }
    write_artifact(&ArtifactHeader::new(kind, comment), data)
}

/// Serializes `data` under an explicit header.
///
/// # Errors
///
/// Returns [`ModelError::Encode`] if encoding fails or the header is too
/// large to frame.
pub fn write_artifact(header: &ArtifactHeader, data: &Artifact) -> Result<Vec<u8>> {
    let header_bytes = options()
        .serialize(header)
        .map_err(|e| ModelError::Encode(e.to_string()))?;
    let payload = match data {
        Artifact::Ontology(model) => options().serialize(model),
        Artifact::Document(graph) => options().serialize(graph),
    }
    .map_err(|e| ModelError::Encode(e.to_string()))?;
    let header_len = u32::try_from(header_bytes.len())
        .map_err(|_| ModelError::Encode("artifact header too large".to_string()))?;

    let mut bytes = Vec::with_capacity(PRELUDE_LEN + header_bytes.len() + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&header_len.to_le_bytes());
    bytes.extend_from_slice(&header_bytes);
    bytes.extend_from_slice(&payload);
    debug!(
        kind = header.kind.as_str(),
        size = bytes.len(),
        "wrote artifact"
    );
    Ok(bytes)
}

/// Splits an artifact into its encoded header and its payload.
fn split_header(bytes: &[u8]) -> Result<(&[u8], &[u8])> {
    if !is_artifact(bytes) || bytes.len() < PRELUDE_LEN {
        return Err(ModelError::format("artifact", "not an ontoval artifact"));
    }
    let mut len_bytes = [0u8; 4];
    len_bytes.copy_from_slice(&bytes[MAGIC.len()..PRELUDE_LEN]);
    let header_len = u32::from_le_bytes(len_bytes) as usize;
    let rest = &bytes[PRELUDE_LEN..];
    if header_len > rest.len() {
        return Err(ModelError::format("artifact", "truncated artifact header"));
    }
    Ok(rest.split_at(header_len))
}

/// The toolkit version leads the header and is decoded alone, so a header
/// whose later fields changed still reports its version.
fn decode_version(header_bytes: &[u8]) -> Result<String> {
    options()
        .allow_trailing_bytes()
        .deserialize(header_bytes)
        .map_err(|e| ModelError::format("artifact", format!("corrupt header: {e}")))
}

fn decode_header(header_bytes: &[u8]) -> Result<ArtifactHeader> {
    options()
        .deserialize(header_bytes)
        .map_err(|e| ModelError::format("artifact", format!("corrupt header: {e}")))
}

/// Decodes only the header, without checking the toolkit version.
///
/// # Errors
///
/// Returns [`ModelError::Format`] if `bytes` are not an artifact.
pub fn read_header(bytes: &[u8]) -> Result<ArtifactHeader> {
    split_header(bytes).and_then(|(header_bytes, _)| decode_header(header_bytes))
}

/// Decodes an artifact written by this toolkit version.
///
/// # Errors
///
/// Returns [`ModelError::Format`] if `bytes` are not an artifact or the
/// payload is corrupt, and [`ModelError::VersionMismatch`] if the artifact
/// was written by another toolkit version.
pub fn load_artifact(bytes: &[u8]) -> Result<(ArtifactKind, Artifact, ArtifactHeader)> {
    let (header_bytes, payload) = split_header(bytes)?;
    let version = decode_version(header_bytes)?;
    if version != TOOLKIT_VERSION {
        return Err(ModelError::VersionMismatch {
            found: version,
            expected: TOOLKIT_VERSION.to_string(),
        });
    }
    let header = decode_header(header_bytes)?;
    let corrupt = |e: bincode::Error| ModelError::format("artifact", format!("corrupt payload: {e}"));
    let artifact = match header.kind {
        ArtifactKind::Ontology => Artifact::Ontology(options().deserialize(payload).map_err(corrupt)?),
        ArtifactKind::Document => Artifact::Document(options().deserialize(payload).map_err(corrupt)?),
    };
    debug!(kind = header.kind.as_str(), "loaded artifact");
    Ok((header.kind, artifact, header))
}
