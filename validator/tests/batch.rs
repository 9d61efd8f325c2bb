//! Batch validation over files on disk.

mod fixtures;

use std::fs;
use std::path::PathBuf;

use fixtures::{animals, CONFORMANT, OWNED_BY_ROBOT, OWNED_DOG};
use ontoval_compiler::parse_document;
use ontoval_model::serializer::save_artifact;
use ontoval_model::{Artifact, ArtifactKind, DiagnosticKind, ModelError};
use ontoval_validator::{validate_batch, validate_path, ValidatorConfig};

fn write_documents(dir: &tempfile::TempDir) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for (name, text) in [
        ("conformant.ttl", CONFORMANT),
        ("broken.ttl", "@prefix ex: <http://example.org/> .\n_:d a .\n"),
        ("robot.ttl", OWNED_BY_ROBOT),
        ("dog.ttl", OWNED_DOG),
    ] {
        let path = dir.path().join(name);
        fs::write(&path, text)?;
        paths.push(path);
    }
    paths.push(dir.path().join("missing.ttl"));
    Ok(paths)
}

#[test]
fn failures_are_isolated_per_document() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let paths = write_documents(&dir)?;
    let report = validate_batch(&animals(), &paths, ValidatorConfig::sequential());

    assert_eq!(report.documents.len(), 5);
    assert!(!report.documents[0].is_failure());
    assert!(matches!(
        report.documents[1].outcome,
        Err(ModelError::Format { line: Some(2), .. })
    ));
    assert_eq!(report.documents[2].error_count(), 2);
    assert!(!report.documents[3].is_failure());
    assert!(matches!(report.documents[4].outcome, Err(ModelError::Io { .. })));

    assert_eq!(report.failed_documents(), 2);
    assert_eq!(report.error_count(), 2);
    assert!(!report.all_passed());
    Ok(())
}

#[test]
fn parallel_batch_keeps_input_order() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let paths = write_documents(&dir)?;
    let model = animals();
    let sequential = validate_batch(&model, &paths, ValidatorConfig::sequential());
    let parallel = validate_batch(&model, &paths, ValidatorConfig::parallel());

    let names = |report: &ontoval_validator::BatchReport| -> Vec<String> {
        report.documents.iter().map(|d| d.document.clone()).collect()
    };
    assert_eq!(names(&sequential), names(&parallel));
    for (a, b) in sequential.documents.iter().zip(&parallel.documents) {
        assert_eq!(a.diagnostics(), b.diagnostics());
        assert_eq!(a.outcome.is_err(), b.outcome.is_err());
    }
    Ok(())
}

#[test]
fn diagnostics_are_tagged_with_their_document() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let paths = write_documents(&dir)?;
    let report = validate_batch(&animals(), &paths, ValidatorConfig::default());
    let robot = &report.documents[2];
    assert!(robot
        .diagnostics()
        .iter()
        .all(|d| d.document.as_deref() == Some(robot.document.as_str())));
    Ok(())
}

#[test]
fn document_prefixes_do_not_leak_between_documents() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let binds = dir.path().join("binds.ttl");
    let borrows = dir.path().join("borrows.ttl");
    fs::write(
        &binds,
        "@prefix foo: <http://example.org/> .\n\
         _:d a foo:Dog ; foo:owner _:p .\n\
         _:p a foo:Person .\n",
    )?;
    fs::write(&borrows, "_:d a foo:Dog ; foo:owner _:p .\n_:p a foo:Person .\n")?;
    let paths = [binds.clone(), borrows, binds];
    let model = animals();

    for config in [ValidatorConfig::sequential(), ValidatorConfig::parallel()] {
        let report = validate_batch(&model, &paths, config);
        assert_eq!(report.documents[0].error_count(), 0, "{:?}", report.documents[0]);
        assert_eq!(report.documents[2].error_count(), 0, "{:?}", report.documents[2]);

        let borrowed = report.documents[1].diagnostics();
        let count = |kind: DiagnosticKind| borrowed.iter().filter(|d| d.kind == kind).count();
        assert_eq!(count(DiagnosticKind::UnresolvableNamespace), 2, "{borrowed:?}");
        assert_eq!(count(DiagnosticKind::UnknownProperty), 1, "{borrowed:?}");
    }
    Ok(())
}

#[test]
fn cached_document_reports_what_its_text_reports() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let text = dir.path().join("dog.ttl");
    fs::write(
        &text,
        "@prefix ex: <http://example.org/> .\n\
         @prefix ex: <http://elsewhere.example/> .\n\
         _:d a ex:Dog , \"Cat\" .\n",
    )?;
    let (graph, _) = parse_document(&text)?;
    let cached = dir.path().join("dog.ovd");
    fs::write(
        &cached,
        save_artifact(ArtifactKind::Document, &Artifact::Document(graph), None)?,
    )?;

    let model = animals();
    let from_text = validate_path(&model, &text);
    let from_cache = validate_path(&model, &cached);
    assert_eq!(from_text.diagnostics(), from_cache.diagnostics());
    let kinds: Vec<DiagnosticKind> = from_cache.diagnostics().iter().map(|d| d.kind).collect();
    assert!(kinds.contains(&DiagnosticKind::NamespaceConflict), "{kinds:?}");
    assert!(kinds.contains(&DiagnosticKind::UnknownClass), "{kinds:?}");
    assert_eq!(from_cache.error_count(), 2);
    Ok(())
}
