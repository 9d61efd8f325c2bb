//! Standard IRI constants for the vocabularies the toolkit interprets.

/// OWL namespace.
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
/// RDF namespace.
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// RDFS namespace.
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
/// XSD namespace.
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
/// SHACL namespace.
pub const SH: &str = "http://www.w3.org/ns/shacl#";

/// Prefix bindings every namespace table starts with.
pub const STANDARD_PREFIXES: &[(&str, &str)] = &[
    ("rdf", RDF),
    ("rdfs", RDFS),
    ("xsd", XSD),
    ("owl", OWL),
    ("sh", SH),
];

// RDF
/// `rdf:type`.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
/// `rdf:Property`.
pub const RDF_PROPERTY: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property";
/// `rdf:List`.
pub const RDF_LIST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#List";
/// `rdf:first`.
pub const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
/// `rdf:rest`.
pub const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
/// `rdf:nil`.
pub const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
/// `rdf:langString`.
pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

// RDFS
/// `rdfs:Class`.
pub const RDFS_CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
/// `rdfs:Datatype`.
pub const RDFS_DATATYPE: &str = "http://www.w3.org/2000/01/rdf-schema#Datatype";
/// `rdfs:Literal`.
pub const RDFS_LITERAL: &str = "http://www.w3.org/2000/01/rdf-schema#Literal";
/// `rdfs:Resource`.
pub const RDFS_RESOURCE: &str = "http://www.w3.org/2000/01/rdf-schema#Resource";
/// `rdfs:subClassOf`.
pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
/// `rdfs:subPropertyOf`.
pub const RDFS_SUBPROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";
/// `rdfs:domain`.
pub const RDFS_DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
/// `rdfs:range`.
pub const RDFS_RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";

// OWL
/// `owl:Class`.
pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
/// `owl:Thing`.
pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";
/// `owl:NamedIndividual`.
pub const OWL_NAMED_INDIVIDUAL: &str = "http://www.w3.org/2002/07/owl#NamedIndividual";
/// `owl:Ontology`.
pub const OWL_ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
/// `owl:ObjectProperty`.
pub const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
/// `owl:DatatypeProperty`.
pub const OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
/// `owl:AnnotationProperty`.
pub const OWL_ANNOTATION_PROPERTY: &str = "http://www.w3.org/2002/07/owl#AnnotationProperty";
/// `owl:FunctionalProperty`.
pub const OWL_FUNCTIONAL_PROPERTY: &str = "http://www.w3.org/2002/07/owl#FunctionalProperty";
/// `owl:Restriction`.
pub const OWL_RESTRICTION: &str = "http://www.w3.org/2002/07/owl#Restriction";
/// `owl:onProperty`.
pub const OWL_ON_PROPERTY: &str = "http://www.w3.org/2002/07/owl#onProperty";
/// `owl:minCardinality`.
pub const OWL_MIN_CARDINALITY: &str = "http://www.w3.org/2002/07/owl#minCardinality";
/// `owl:maxCardinality`.
pub const OWL_MAX_CARDINALITY: &str = "http://www.w3.org/2002/07/owl#maxCardinality";
/// `owl:cardinality`.
pub const OWL_CARDINALITY: &str = "http://www.w3.org/2002/07/owl#cardinality";
/// `owl:minQualifiedCardinality`.
pub const OWL_MIN_QUALIFIED_CARDINALITY: &str =
    "http://www.w3.org/2002/07/owl#minQualifiedCardinality";
/// `owl:maxQualifiedCardinality`.
pub const OWL_MAX_QUALIFIED_CARDINALITY: &str =
    "http://www.w3.org/2002/07/owl#maxQualifiedCardinality";
/// `owl:qualifiedCardinality`.
pub const OWL_QUALIFIED_CARDINALITY: &str = "http://www.w3.org/2002/07/owl#qualifiedCardinality";
/// `owl:onClass`.
pub const OWL_ON_CLASS: &str = "http://www.w3.org/2002/07/owl#onClass";
/// `owl:onDataRange`.
pub const OWL_ON_DATA_RANGE: &str = "http://www.w3.org/2002/07/owl#onDataRange";
/// `owl:allValuesFrom`.
pub const OWL_ALL_VALUES_FROM: &str = "http://www.w3.org/2002/07/owl#allValuesFrom";
/// `owl:someValuesFrom`.
pub const OWL_SOME_VALUES_FROM: &str = "http://www.w3.org/2002/07/owl#someValuesFrom";
/// `owl:hasValue`.
pub const OWL_HAS_VALUE: &str = "http://www.w3.org/2002/07/owl#hasValue";
/// `owl:onDatatype`.
pub const OWL_ON_DATATYPE: &str = "http://www.w3.org/2002/07/owl#onDatatype";
/// `owl:withRestrictions`.
pub const OWL_WITH_RESTRICTIONS: &str = "http://www.w3.org/2002/07/owl#withRestrictions";
/// `owl:oneOf`.
pub const OWL_ONE_OF: &str = "http://www.w3.org/2002/07/owl#oneOf";
/// `owl:unionOf`.
pub const OWL_UNION_OF: &str = "http://www.w3.org/2002/07/owl#unionOf";
/// `owl:intersectionOf`.
pub const OWL_INTERSECTION_OF: &str = "http://www.w3.org/2002/07/owl#intersectionOf";
/// `owl:complementOf`.
pub const OWL_COMPLEMENT_OF: &str = "http://www.w3.org/2002/07/owl#complementOf";
/// `owl:equivalentClass`.
pub const OWL_EQUIVALENT_CLASS: &str = "http://www.w3.org/2002/07/owl#equivalentClass";
/// `owl:disjointUnionOf`.
pub const OWL_DISJOINT_UNION_OF: &str = "http://www.w3.org/2002/07/owl#disjointUnionOf";

// XSD datatypes
/// `xsd:string`.
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
/// `xsd:normalizedString`.
pub const XSD_NORMALIZED_STRING: &str = "http://www.w3.org/2001/XMLSchema#normalizedString";
/// `xsd:token`.
pub const XSD_TOKEN: &str = "http://www.w3.org/2001/XMLSchema#token";
/// `xsd:language`.
pub const XSD_LANGUAGE: &str = "http://www.w3.org/2001/XMLSchema#language";
/// `xsd:boolean`.
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
/// `xsd:decimal`.
pub const XSD_DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
/// `xsd:integer`.
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
/// `xsd:nonNegativeInteger`.
pub const XSD_NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
/// `xsd:positiveInteger`.
pub const XSD_POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";
/// `xsd:nonPositiveInteger`.
pub const XSD_NON_POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonPositiveInteger";
/// `xsd:negativeInteger`.
pub const XSD_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#negativeInteger";
/// `xsd:long`.
pub const XSD_LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
/// `xsd:int`.
pub const XSD_INT: &str = "http://www.w3.org/2001/XMLSchema#int";
/// `xsd:short`.
pub const XSD_SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";
/// `xsd:byte`.
pub const XSD_BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";
/// `xsd:unsignedLong`.
pub const XSD_UNSIGNED_LONG: &str = "http://www.w3.org/2001/XMLSchema#unsignedLong";
/// `xsd:unsignedInt`.
pub const XSD_UNSIGNED_INT: &str = "http://www.w3.org/2001/XMLSchema#unsignedInt";
/// `xsd:unsignedShort`.
pub const XSD_UNSIGNED_SHORT: &str = "http://www.w3.org/2001/XMLSchema#unsignedShort";
/// `xsd:unsignedByte`.
pub const XSD_UNSIGNED_BYTE: &str = "http://www.w3.org/2001/XMLSchema#unsignedByte";
/// `xsd:double`.
pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
/// `xsd:float`.
pub const XSD_FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
/// `xsd:date`.
pub const XSD_DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
/// `xsd:dateTime`.
pub const XSD_DATETIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
/// `xsd:dateTimeStamp`.
pub const XSD_DATETIME_STAMP: &str = "http://www.w3.org/2001/XMLSchema#dateTimeStamp";
/// `xsd:time`.
pub const XSD_TIME: &str = "http://www.w3.org/2001/XMLSchema#time";
/// `xsd:gYear`.
pub const XSD_GYEAR: &str = "http://www.w3.org/2001/XMLSchema#gYear";
/// `xsd:duration`.
pub const XSD_DURATION: &str = "http://www.w3.org/2001/XMLSchema#duration";
/// `xsd:anyURI`.
pub const XSD_ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
/// `xsd:hexBinary`.
pub const XSD_HEX_BINARY: &str = "http://www.w3.org/2001/XMLSchema#hexBinary";
/// `xsd:base64Binary`.
pub const XSD_BASE64_BINARY: &str = "http://www.w3.org/2001/XMLSchema#base64Binary";

/// Built-in datatypes and their direct bases in the XSD derivation lattice.
///
/// Roots hang off `rdfs:Literal`.
pub const BUILTIN_DATATYPES: &[(&str, &[&str])] = &[
    (RDFS_LITERAL, &[]),
    (RDF_LANG_STRING, &[RDFS_LITERAL]),
    (XSD_STRING, &[RDFS_LITERAL]),
    (XSD_NORMALIZED_STRING, &[XSD_STRING]),
    (XSD_TOKEN, &[XSD_NORMALIZED_STRING]),
    (XSD_LANGUAGE, &[XSD_TOKEN]),
    (XSD_BOOLEAN, &[RDFS_LITERAL]),
    (XSD_DECIMAL, &[RDFS_LITERAL]),
    (XSD_INTEGER, &[XSD_DECIMAL]),
    (XSD_NON_NEGATIVE_INTEGER, &[XSD_INTEGER]),
    (XSD_POSITIVE_INTEGER, &[XSD_NON_NEGATIVE_INTEGER]),
    (XSD_NON_POSITIVE_INTEGER, &[XSD_INTEGER]),
    (XSD_NEGATIVE_INTEGER, &[XSD_NON_POSITIVE_INTEGER]),
    (XSD_LONG, &[XSD_INTEGER]),
    (XSD_INT, &[XSD_LONG]),
    (XSD_SHORT, &[XSD_INT]),
    (XSD_BYTE, &[XSD_SHORT]),
    (XSD_UNSIGNED_LONG, &[XSD_NON_NEGATIVE_INTEGER]),
    (XSD_UNSIGNED_INT, &[XSD_UNSIGNED_LONG]),
    (XSD_UNSIGNED_SHORT, &[XSD_UNSIGNED_INT]),
    (XSD_UNSIGNED_BYTE, &[XSD_UNSIGNED_SHORT]),
    (XSD_DOUBLE, &[RDFS_LITERAL]),
    (XSD_FLOAT, &[RDFS_LITERAL]),
    (XSD_DATE, &[RDFS_LITERAL]),
    (XSD_DATETIME, &[RDFS_LITERAL]),
    (XSD_DATETIME_STAMP, &[XSD_DATETIME]),
    (XSD_TIME, &[RDFS_LITERAL]),
    (XSD_GYEAR, &[RDFS_LITERAL]),
    (XSD_DURATION, &[RDFS_LITERAL]),
    (XSD_ANY_URI, &[RDFS_LITERAL]),
    (XSD_HEX_BINARY, &[RDFS_LITERAL]),
    (XSD_BASE64_BINARY, &[RDFS_LITERAL]),
];

/// Types any instance may carry without the ontology declaring them.
pub const UNIVERSAL_TYPES: &[&str] = &[OWL_THING, OWL_NAMED_INDIVIDUAL, RDFS_RESOURCE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_bases_are_themselves_builtin() {
        for (_, bases) in BUILTIN_DATATYPES {
            for base in *bases {
                assert!(
                    BUILTIN_DATATYPES.iter().any(|(id, _)| id == base),
                    "base {base} is not seeded"
                );
            }
        }
    }

    #[test]
    fn xsd_constants_live_in_xsd_namespace() {
        for (id, _) in BUILTIN_DATATYPES {
            assert!(id.starts_with(XSD) || id.starts_with(RDF) || id.starts_with(RDFS));
        }
    }
}
