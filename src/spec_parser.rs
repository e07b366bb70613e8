//! Specification record parsing
//!
//! Derives a normalized variant label and a curb weight in tons from one
//! Canadian-vehicle-specifications record. Upstream embeds the model name
//! inside a combined "model + trim" string inconsistently; the variant
//! derivation strips the model on a best-effort basis and falls back to the
//! full field value whenever stripping would lose information.

use tracing::warn;

use crate::models::{SpecField, SpecRecord};
use crate::source::VariantWeight;

/// Kilograms to (short) tons
const KG_TO_TONS: f64 = 0.001102;

/// Index of the "Model" field in the upstream field ordering
const MODEL_FIELD_INDEX: usize = 1;
/// Index of the "CW" curb-weight field in the upstream field ordering
const CURB_WEIGHT_FIELD_INDEX: usize = 7;

/// Case-insensitive lookup of a field by name
fn field<'a>(specs: &'a [SpecField], name: &str) -> Option<&'a SpecField> {
    specs.iter().find(|f| f.name.eq_ignore_ascii_case(name))
}

/// Derive (variant, curb weight in tons) from one specification record.
///
/// Returns `None` only when the record is too short to hold the documented
/// field positions; that record is skipped, not the whole run. A record
/// with an unparsable weight is still emitted with the weight absent.
pub fn parse_record(record: &SpecRecord, model: &str) -> Option<VariantWeight> {
    let specs = &record.specs;
    if specs.len() <= CURB_WEIGHT_FIELD_INDEX.max(MODEL_FIELD_INDEX) {
        warn!(
            "Specification record for {} has {} fields, expected at least {}; skipping record",
            model,
            specs.len(),
            CURB_WEIGHT_FIELD_INDEX + 1
        );
        return None;
    }

    let variant = match field(specs, "model") {
        Some(f) => derive_variant(&f.value, model),
        None => String::new(),
    };

    let curb_weight_tons = match field(specs, "cw") {
        Some(f) if !f.value.is_empty() => parse_weight(&f.value),
        _ => None,
    };

    Some(VariantWeight {
        curb_weight_tons,
        variant,
    })
}

/// Isolate the trim suffix from a combined "model + trim" field value.
///
/// If the queried model (case-folded, trimmed) occurs in the folded value,
/// its first occurrence is removed and the non-empty remainder, upper-cased,
/// is the variant. An empty remainder or a missing match yields the trimmed
/// original value unchanged.
fn derive_variant(field_value: &str, model: &str) -> String {
    let original = field_value.trim();
    let model_key = model.trim().to_lowercase();
    let folded = original.to_lowercase();

    if model_key.is_empty() || !folded.contains(&model_key) {
        return original.to_string();
    }

    let remainder = folded.replacen(&model_key, "", 1);
    let remainder = remainder.trim();
    if remainder.is_empty() {
        original.to_string()
    } else {
        remainder.to_uppercase()
    }
}

/// Parse a curb weight in kilograms and convert to tons, one decimal place.
fn parse_weight(value: &str) -> Option<f64> {
    match value.trim().parse::<f64>() {
        Ok(kilograms) => Some((kilograms * KG_TO_TONS * 10.0).round() / 10.0),
        Err(_) => {
            warn!("Invalid curb weight value: {}", value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(model_value: &str, cw_value: &str) -> SpecRecord {
        // Upstream field ordering: Make, Model, MYR, OL, OW, OH, WB, CW
        let names = ["Make", "Model", "MYR", "OL", "OW", "OH", "WB", "CW"];
        let specs = names
            .iter()
            .map(|&name| SpecField {
                name: name.to_string(),
                value: match name {
                    "Model" => model_value.to_string(),
                    "CW" => cw_value.to_string(),
                    _ => String::new(),
                },
            })
            .collect();
        SpecRecord { specs }
    }

    #[test]
    fn test_variant_strips_model_prefix() {
        let parsed = parse_record(&record("Civic LX", "1500"), "Civic").unwrap();
        assert_eq!(parsed.variant, "LX");
    }

    #[test]
    fn test_variant_falls_back_when_nothing_remains() {
        let parsed = parse_record(&record("Civic", "1500"), "Civic").unwrap();
        assert_eq!(parsed.variant, "Civic");
    }

    #[test]
    fn test_variant_unchanged_without_substring_match() {
        let parsed = parse_record(&record("Accord EX", "1500"), "Civic").unwrap();
        assert_eq!(parsed.variant, "Accord EX");
    }

    #[test]
    fn test_variant_match_is_case_insensitive() {
        let parsed = parse_record(&record("CIVIC si", "1500"), "civic").unwrap();
        assert_eq!(parsed.variant, "SI");
    }

    #[test]
    fn test_weight_conversion_rounds_to_one_decimal() {
        let parsed = parse_record(&record("Civic LX", "1500"), "Civic").unwrap();
        assert_eq!(parsed.curb_weight_tons, Some(1.7));
    }

    #[test]
    fn test_non_numeric_weight_is_absent() {
        let parsed = parse_record(&record("Civic LX", "n/a"), "Civic").unwrap();
        assert_eq!(parsed.curb_weight_tons, None);
        assert_eq!(parsed.variant, "LX");
    }

    #[test]
    fn test_empty_weight_is_absent() {
        let parsed = parse_record(&record("Civic LX", ""), "Civic").unwrap();
        assert_eq!(parsed.curb_weight_tons, None);
    }

    #[test]
    fn test_short_record_is_skipped() {
        let record = SpecRecord {
            specs: vec![SpecField {
                name: "Make".to_string(),
                value: "HONDA".to_string(),
            }],
        };
        assert!(parse_record(&record, "Civic").is_none());
    }

    #[test]
    fn test_missing_model_field_yields_empty_variant() {
        let mut r = record("Civic LX", "1500");
        r.specs[1].name = "Something".to_string();
        let parsed = parse_record(&r, "Civic").unwrap();
        assert_eq!(parsed.variant, "");
        assert_eq!(parsed.curb_weight_tons, Some(1.7));
    }
}
