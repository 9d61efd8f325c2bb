//! Prints the header and contents summary of an ontoval artifact.
//!
//! Run with: `cargo run --example inspect_artifact -p ontoval-model -- <artifact>`

use std::env;
use std::fs;
use std::process;

use ontoval_model::serializer::{is_artifact, load_artifact, read_header};
use ontoval_model::{Artifact, ModelError};

fn main() -> ontoval_model::Result<()> {
    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: inspect_artifact <artifact>");
        process::exit(2);
    };
    let bytes = fs::read(&path).map_err(|source| ModelError::io(&path, source))?;
    if !is_artifact(&bytes) {
        eprintln!("{path} is not an ontoval artifact");
        process::exit(1);
    }

    let header = read_header(&bytes)?;
    println!("ontoval artifact {path}");
    println!("  Kind:         {}", header.kind.as_str());
    println!("  Version:      {}", header.toolkit_version);
    println!("  Created:      {}", header.created_at.to_rfc3339());
    if let Some(comment) = &header.comment {
        println!("  Comment:      {comment}");
    }

    let (_, artifact, _) = load_artifact(&bytes)?;
    match artifact {
        Artifact::Ontology(model) => {
            println!("  Sources:      {}", model.sources.join(", "));
            println!("  Classes:      {}", model.class_count());
            println!("  Properties:   {}", model.property_count());
            println!("  Datatypes:    {}", model.datatype_count());
            println!();
            for namespace in model.namespaces.iter() {
                println!("  {:12} {}", namespace.prefix, namespace.iri);
            }
        }
        Artifact::Document(graph) => {
            println!("  Source:       {}", graph.source);
            println!("  Nodes:        {}", graph.node_count());
            println!("  Markers:      {}", graph.markers.len());
        }
    }
    Ok(())
}
