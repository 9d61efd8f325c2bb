//! Property tests: validation is deterministic and conformant documents
//! stay error free.

mod fixtures;

use fixtures::{animals, error_count};
use ontoval_compiler::parse_document_str;
use ontoval_model::serializer::{load_artifact, save_artifact};
use ontoval_model::{Artifact, ArtifactKind};
use ontoval_validator::validate;
use proptest::prelude::*;

const CLASSES: &[&str] = &["ex:Animal", "ex:Dog", "ex:Person", "ex:Robot"];
const PROPERTIES: &[&str] = &["ex:owner", "ex:name", "ex:age", "ex:coat", "ex:colour"];
const VALUES: &[&str] = &[
    "\"Rex\"",
    "\"4\"^^xsd:integer",
    "\"-1\"^^xsd:nonNegativeInteger",
    "\"brown\"^^ex:Colour",
    "_:n0",
    "_:n1",
    "_:ghost",
    "( 1 2 )",
];

fn document() -> impl Strategy<Value = String> {
    let node = (
        prop::option::of(prop::sample::select(CLASSES)),
        prop::collection::vec(
            (prop::sample::select(PROPERTIES), prop::sample::select(VALUES)),
            0..4,
        ),
    );
    prop::collection::vec(node, 1..6).prop_map(|nodes| {
        let mut text = String::from(
            "@prefix ex: <http://example.org/> .\n\
             @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .\n",
        );
        for (index, (class, assertions)) in nodes.iter().enumerate() {
            text.push_str(&format!("_:n{index} ex:seen true"));
            if let Some(class) = class {
                text.push_str(&format!(" ; a {class}"));
            }
            for (property, value) in assertions {
                text.push_str(&format!(" ;\n    {property} {value}"));
            }
            text.push_str(" .\n");
        }
        text
    })
}

fn conformant_document() -> impl Strategy<Value = String> {
    (1usize..5, prop::collection::vec(0u32..20, 1..5)).prop_map(|(dogs, ages)| {
        let mut text = String::from(
            "@prefix ex: <http://example.org/> .\n\
             @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .\n\
             _:owner a ex:Person ; ex:name \"Ann\" .\n",
        );
        for dog in 0..dogs {
            let age = ages[dog % ages.len()];
            text.push_str(&format!(
                "_:dog{dog} a ex:Dog ;\n    ex:owner _:owner ;\n    ex:age \"{age}\"^^xsd:nonNegativeInteger .\n"
            ));
        }
        text
    })
}

proptest! {
    #[test]
    fn validation_is_deterministic(text in document()) {
        let model = animals();
        let parsed = parse_document_str("gen.ttl", &text);
        prop_assert!(parsed.is_ok(), "generated document failed to parse: {text}");
        if let Ok((graph, _)) = parsed {
            let first = validate(&graph, &model);
            let second = validate(&graph, &model);
            prop_assert_eq!(&first, &second);
            prop_assert!(first.windows(2).all(|w| w[0].line <= w[1].line));
        }
    }

    #[test]
    fn cached_ontology_validates_identically(text in document()) {
        let model = animals();
        let bytes = save_artifact(ArtifactKind::Ontology, &Artifact::Ontology(model.clone()), None);
        prop_assert!(bytes.is_ok());
        let restored = bytes
            .and_then(|b| load_artifact(&b))
            .ok()
            .and_then(|(_, artifact, _)| artifact.into_ontology());
        prop_assert!(restored.is_some());
        if let (Some(restored), Ok((graph, _))) = (restored, parse_document_str("gen.ttl", &text)) {
            prop_assert_eq!(validate(&graph, &model), validate(&graph, &restored));
        }
    }

    #[test]
    fn conformant_documents_have_no_errors(text in conformant_document()) {
        let model = animals();
        let parsed = parse_document_str("ok.ttl", &text);
        prop_assert!(parsed.is_ok());
        if let Ok((graph, _)) = parsed {
            let diagnostics = validate(&graph, &model);
            prop_assert_eq!(error_count(&diagnostics), 0, "{:?}", diagnostics);
        }
    }
}
