//! Runs the built binaries against files in a temporary directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const ONTOLOGY: &str = "@prefix ex: <http://example.org/> .\n\
                        @prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
                        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
                        ex:Dog a owl:Class .\n\
                        ex:Person a owl:Class .\n\
                        ex:owner a owl:ObjectProperty ; rdfs:domain ex:Dog ; rdfs:range ex:Person .\n";

const GOOD: &str = "@prefix ex: <http://example.org/> .\n\
                    _:d a ex:Dog ; ex:owner _:p .\n\
                    _:p a ex:Person .\n";

const BAD: &str = "@prefix ex: <http://example.org/> .\n\
                   _:d a ex:Cat .\n";

fn run(binary: &str, args: &[&Path], extra: &[&str]) -> Output {
    let mut command = Command::new(binary);
    command.args(args).args(extra).env("RUST_LOG", "off");
    match command.output() {
        Ok(output) => output,
        Err(error) => panic!("failed to run {binary}: {error}"),
    }
}

#[test]
fn validate_passes_and_fails_with_exit_code() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let ontology = dir.path().join("animals.ttl");
    let good = dir.path().join("good.ttl");
    let bad = dir.path().join("bad.ttl");
    fs::write(&ontology, ONTOLOGY)?;
    fs::write(&good, GOOD)?;
    fs::write(&bad, BAD)?;

    let binary = env!("CARGO_BIN_EXE_ontoval-validate");
    let output = run(binary, &[&ontology, &good], &[]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("[PASS]"));

    let output = run(binary, &[&ontology, &good, &bad], &["--format", "json"]);
    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["summary"]["errors"], 1);
    assert_eq!(report["documents"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[test]
fn serialized_ontology_validates_like_its_source() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let ontology = dir.path().join("animals.ttl");
    let artifact = dir.path().join("animals.ovo");
    let good = dir.path().join("good.ttl");
    fs::write(&ontology, ONTOLOGY)?;
    fs::write(&good, GOOD)?;

    let output = run(
        env!("CARGO_BIN_EXE_ontoval-serialize"),
        &[&ontology, Path::new("-o"), &artifact],
        &["--comment", "cli test"],
    );
    assert!(output.status.success());
    assert!(artifact.exists());

    let output = run(env!("CARGO_BIN_EXE_ontoval-validate"), &[&artifact, &good], &[]);
    assert!(output.status.success());
    Ok(())
}
