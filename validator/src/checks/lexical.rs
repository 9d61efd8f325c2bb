//! Lexical forms of the built-in XSD datatypes.
//!
//! Patterns are compiled once per process. Calendar values are checked a
//! second time with `chrono` so impossible dates such as `2023-02-30` are
//! rejected.

use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use ontoval_model::iris;
use ontoval_model::OntologyModel;
use regex::Regex;

const TIMEZONE: &str = r"(Z|[+-]\d{2}:\d{2})?";

fn pattern(cell: &'static OnceLock<Option<Regex>>, source: fn() -> String) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(&source()).ok()).as_ref()
}

macro_rules! lexical_pattern {
    ($name:ident, $source:expr) => {
        fn $name() -> Option<&'static Regex> {
            static CELL: OnceLock<Option<Regex>> = OnceLock::new();
            pattern(&CELL, || $source)
        }
    };
}

lexical_pattern!(language_re, r"^[a-zA-Z]{1,8}(-[a-zA-Z0-9]{1,8})*$".to_string());
lexical_pattern!(decimal_re, r"^[+-]?(\d+(\.\d*)?|\.\d+)$".to_string());
lexical_pattern!(integer_re, r"^[+-]?\d+$".to_string());
lexical_pattern!(
    double_re,
    r"^([+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?|[+-]?INF|NaN)$".to_string()
);
lexical_pattern!(date_re, format!(r"^(-?\d{{4,}}-\d{{2}}-\d{{2}}){TIMEZONE}$"));
lexical_pattern!(
    datetime_re,
    format!(r"^(-?\d{{4,}}-\d{{2}}-\d{{2}}T\d{{2}}:\d{{2}}:\d{{2}})(\.\d+)?{TIMEZONE}$")
);
lexical_pattern!(time_re, format!(r"^(\d{{2}}:\d{{2}}:\d{{2}})(\.\d+)?{TIMEZONE}$"));
lexical_pattern!(gyear_re, format!(r"^-?\d{{4,}}{TIMEZONE}$"));
lexical_pattern!(
    duration_re,
    r"^-?P(\d+Y)?(\d+M)?(\d+D)?(T(\d+H)?(\d+M)?(\d+(\.\d+)?S)?)?$".to_string()
);
lexical_pattern!(hex_re, r"^([0-9a-fA-F]{2})*$".to_string());
lexical_pattern!(base64_re, r"^[A-Za-z0-9+/]*={0,2}$".to_string());

fn conforms(re: Option<&Regex>, lexical: &str) -> bool {
    re.is_none_or(|re| re.is_match(lexical))
}

/// Sign of an integer lexical form: -1, 0 or 1.
fn integer_sign(lexical: &str) -> i8 {
    let (negative, digits) = match lexical.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, lexical.trim_start_matches('+')),
    };
    if digits.bytes().all(|b| b == b'0') {
        0
    } else if negative {
        -1
    } else {
        1
    }
}

fn fits<T: std::str::FromStr>(lexical: &str) -> bool {
    lexical.trim_start_matches('+').parse::<T>().is_ok()
}

/// Years outside chrono's four-digit range are accepted on pattern alone.
fn wide_year(lexical: &str) -> bool {
    lexical.starts_with('-') || lexical.split('-').next().is_some_and(|year| year.len() > 4)
}

fn calendar_date(lexical: &str) -> bool {
    wide_year(lexical)
        || NaiveDate::parse_from_str(lexical.get(..10).unwrap_or(lexical), "%Y-%m-%d").is_ok()
}

fn calendar_datetime(lexical: &str) -> bool {
    if wide_year(lexical) {
        return true;
    }
    let head = lexical.get(..19).unwrap_or(lexical);
    NaiveDateTime::parse_from_str(head, "%Y-%m-%dT%H:%M:%S").is_ok()
        || (lexical.get(11..19) == Some("24:00:00") && calendar_date(lexical))
}

/// Checks `lexical` against one built-in datatype. Returns the reason it is
/// invalid, or `None` when it is valid or `datatype` has no lexical rule.
#[must_use]
pub fn builtin_violation(datatype: &str, lexical: &str) -> Option<String> {
    let valid = match datatype {
        iris::XSD_NORMALIZED_STRING => !lexical.contains(['\n', '\r', '\t']),
        iris::XSD_TOKEN => {
            !lexical.contains(['\n', '\r', '\t'])
                && !lexical.starts_with(' ')
                && !lexical.ends_with(' ')
                && !lexical.contains("  ")
        }
        iris::XSD_LANGUAGE => conforms(language_re(), lexical),
        iris::XSD_BOOLEAN => matches!(lexical, "true" | "false" | "1" | "0"),
        iris::XSD_DECIMAL => conforms(decimal_re(), lexical),
        iris::XSD_INTEGER => conforms(integer_re(), lexical),
        iris::XSD_NON_NEGATIVE_INTEGER => integer_sign(lexical) >= 0,
        iris::XSD_POSITIVE_INTEGER => integer_sign(lexical) > 0,
        iris::XSD_NON_POSITIVE_INTEGER => integer_sign(lexical) <= 0,
        iris::XSD_NEGATIVE_INTEGER => integer_sign(lexical) < 0,
        iris::XSD_LONG => fits::<i64>(lexical),
        iris::XSD_INT => fits::<i32>(lexical),
        iris::XSD_SHORT => fits::<i16>(lexical),
        iris::XSD_BYTE => fits::<i8>(lexical),
        iris::XSD_UNSIGNED_LONG => fits::<u64>(lexical),
        iris::XSD_UNSIGNED_INT => fits::<u32>(lexical),
        iris::XSD_UNSIGNED_SHORT => fits::<u16>(lexical),
        iris::XSD_UNSIGNED_BYTE => fits::<u8>(lexical),
        iris::XSD_DOUBLE | iris::XSD_FLOAT => conforms(double_re(), lexical),
        iris::XSD_DATE => conforms(date_re(), lexical) && calendar_date(lexical),
        iris::XSD_DATETIME => conforms(datetime_re(), lexical) && calendar_datetime(lexical),
        iris::XSD_DATETIME_STAMP => {
            lexical.ends_with('Z') || lexical.rfind(['+', '-']).is_some_and(|i| i >= 19)
        }
        iris::XSD_TIME => {
            conforms(time_re(), lexical)
                && (NaiveTime::parse_from_str(lexical.get(..8).unwrap_or(lexical), "%H:%M:%S").is_ok()
                    || lexical.starts_with("24:00:00"))
        }
        iris::XSD_GYEAR => conforms(gyear_re(), lexical),
        iris::XSD_DURATION => {
            conforms(duration_re(), lexical)
                && lexical.bytes().any(|b| b.is_ascii_digit())
                && !lexical.ends_with('T')
        }
        iris::XSD_ANY_URI => !lexical.chars().any(char::is_whitespace),
        iris::XSD_HEX_BINARY => conforms(hex_re(), lexical),
        iris::XSD_BASE64_BINARY => {
            let compact: String = lexical.chars().filter(|c| !c.is_whitespace()).collect();
            compact.len() % 4 == 0 && conforms(base64_re(), &compact)
        }
        _ => true,
    };
    (!valid).then(|| format!("'{lexical}' is not a valid {}", local_name(datatype)))
}

fn local_name(iri: &str) -> &str {
    iri.rsplit(['#', '/']).next().unwrap_or(iri)
}

/// Checks `lexical` against `datatype` and every datatype it derives from:
/// built-in lexical rules and `owl:oneOf` vocabularies alike.
#[must_use]
pub fn violation(ontology: &OntologyModel, datatype: &str, lexical: &str) -> Option<String> {
    for ancestor in ontology.datatype_lineage(datatype) {
        if let Some(vocabulary) = &ancestor.vocabulary {
            if !vocabulary.contains(lexical) {
                let allowed: Vec<&str> = vocabulary.iter().map(String::as_str).collect();
                return Some(format!(
                    "'{lexical}' is not one of {} ({})",
                    ontology.namespaces.display(&ancestor.id),
                    allowed.join(", ")
                ));
            }
        }
        if ancestor.builtin {
            if let Some(reason) = builtin_violation(&ancestor.id, lexical) {
                return Some(reason);
            }
        }
    }
    None
}
