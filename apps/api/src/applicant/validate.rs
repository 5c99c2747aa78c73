//! Schema Validator — declarative, ordered rule tables over the raw JSON body.
//!
//! Rules are evaluated in declaration order and the FIRST violation wins:
//! the caller gets back exactly one `ValidationError` naming the field and
//! the rule it broke. Conditional payloads (children, employment fields,
//! spouse) are validated structurally when present, but their absence is
//! never an error — the toggles only matter to the prompt compiler later.
//!
//! The one cross-field rule enforced here: `croatian_ancestor.spouse` may
//! only be supplied when the ancestor's `married` flag is true.

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

use crate::applicant::models::ApplicantRecord;

#[derive(Debug, Clone, Error, PartialEq)]
#[error("{field} {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Primitive kinds a field rule can demand.
#[derive(Debug, Clone, Copy)]
enum Kind {
    /// Non-empty string after trimming.
    Text,
    /// Any string, empty included. Used for the child rows the intake form
    /// submits half-filled.
    AnyText,
    /// Any JSON number.
    Number,
    /// Non-negative integer (ages, years).
    Count,
    /// Non-negative integer or the empty string a blank form field submits.
    CountOrBlank,
    Boolean,
    /// String in `YYYY-MM-DD` form.
    Date,
    Email,
    /// `"male"` or `"female"`.
    Sex,
}

struct FieldRule {
    field: &'static str,
    kind: Kind,
    required: bool,
}

const fn required(field: &'static str, kind: Kind) -> FieldRule {
    FieldRule {
        field,
        kind,
        required: true,
    }
}

const fn optional(field: &'static str, kind: Kind) -> FieldRule {
    FieldRule {
        field,
        kind,
        required: false,
    }
}

/// Top-level scalar rules, in reporting order. Arrays and the ancestor
/// substructure are handled after these by dedicated sub-schemas.
const SCALAR_RULES: &[FieldRule] = &[
    required("creativity", Kind::Number),
    required("full_name", Kind::Text),
    required("birth_date", Kind::Date),
    required("birth_place", Kind::Text),
    required("age", Kind::Count),
    required("address", Kind::Text),
    required("country", Kind::Text),
    required("occupation", Kind::Text),
    required("marital_status", Kind::Text),
    required("phone", Kind::Text),
    required("email", Kind::Email),
    optional("no_children", Kind::Boolean),
    optional("unemployed", Kind::Boolean),
    optional("company", Kind::Text),
    optional("workplace", Kind::Text),
    optional("job_title", Kind::Text),
    optional("duties", Kind::Text),
    optional("work_achievements", Kind::Text),
    optional("contribution", Kind::Text),
];

const CHILD_RULES: &[FieldRule] = &[
    optional("name", Kind::AnyText),
    optional("sex", Kind::Sex),
    optional("age", Kind::CountOrBlank),
];

const ACADEMIC_RULES: &[FieldRule] = &[
    required("institution", Kind::Text),
    required("program", Kind::Text),
    required("start_date", Kind::Date),
    optional("end_date", Kind::Date),
    required("achievements", Kind::Text),
];

const RELATIVE_RULES: &[FieldRule] = &[
    required("full_name", Kind::Text),
    required("relationship", Kind::Text),
];

const ANCESTOR_RULES: &[FieldRule] = &[
    required("name", Kind::Text),
    required("relationship", Kind::Text),
    required("birth_date", Kind::Date),
    required("birth_place", Kind::Text),
    optional("father_name", Kind::Text),
    optional("mother_name", Kind::Text),
    required("death_date", Kind::Date),
    required("death_place", Kind::Text),
    required("emigration_year", Kind::Count),
    required("emigration_city", Kind::Text),
    required("emigration_country", Kind::Text),
    required("emigration_reason", Kind::Text),
    required("destination_occupation", Kind::Text),
    optional("married", Kind::Boolean),
];

const SPOUSE_RULES: &[FieldRule] = &[
    required("name", Kind::Text),
    required("marriage_year", Kind::Count),
];

/// Validates a raw request body and, on success, decodes it into the typed
/// `ApplicantRecord`. Returns the first violated constraint otherwise.
pub fn validate_applicant(body: &Value) -> Result<ApplicantRecord, ValidationError> {
    let obj = body
        .as_object()
        .ok_or_else(|| ValidationError::new("body", "must be a JSON object"))?;

    for rule in SCALAR_RULES {
        check_field(obj.get(rule.field), rule, "")?;
    }

    check_items(obj.get("children"), "children", CHILD_RULES)?;
    check_items(obj.get("academic"), "academic", ACADEMIC_RULES)?;
    check_items(
        obj.get("croatian_relatives"),
        "croatian_relatives",
        RELATIVE_RULES,
    )?;
    check_ancestor(obj.get("croatian_ancestor"))?;

    check_field(
        obj.get("citizenship_interest"),
        &required("citizenship_interest", Kind::Text),
        "",
    )?;

    serde_json::from_value(body.clone())
        .map_err(|e| ValidationError::new("body", format!("could not be decoded: {e}")))
}

fn check_field(
    value: Option<&Value>,
    rule: &FieldRule,
    prefix: &str,
) -> Result<(), ValidationError> {
    let path = format!("{prefix}{}", rule.field);
    match value {
        None | Some(Value::Null) => {
            if rule.required {
                Err(ValidationError::new(path, "is required"))
            } else {
                Ok(())
            }
        }
        Some(v) => check_kind(v, rule.kind).map_err(|msg| ValidationError::new(path, msg)),
    }
}

fn check_kind(value: &Value, kind: Kind) -> Result<(), &'static str> {
    match kind {
        Kind::Text => match value.as_str() {
            Some(s) if !s.trim().is_empty() => Ok(()),
            _ => Err("must be a non-empty string"),
        },
        Kind::AnyText => {
            if value.is_string() {
                Ok(())
            } else {
                Err("must be a string")
            }
        }
        Kind::Number => {
            if value.is_number() {
                Ok(())
            } else {
                Err("must be a number")
            }
        }
        Kind::Count => {
            if value.as_u64().is_some() {
                Ok(())
            } else {
                Err("must be a non-negative integer")
            }
        }
        Kind::CountOrBlank => match value {
            Value::String(s) if s.is_empty() => Ok(()),
            v if v.as_u64().is_some() => Ok(()),
            _ => Err("must be a non-negative integer or empty"),
        },
        Kind::Boolean => {
            if value.is_boolean() {
                Ok(())
            } else {
                Err("must be a boolean")
            }
        }
        Kind::Date => match value.as_str() {
            Some(s) if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() => Ok(()),
            _ => Err("must be a date in YYYY-MM-DD format"),
        },
        Kind::Email => match value.as_str() {
            Some(s) if is_email(s) => Ok(()),
            _ => Err("must be a valid email address"),
        },
        Kind::Sex => match value.as_str() {
            Some("male") | Some("female") => Ok(()),
            _ => Err("must be \"male\" or \"female\""),
        },
    }
}

fn check_items(
    value: Option<&Value>,
    field: &str,
    rules: &[FieldRule],
) -> Result<(), ValidationError> {
    let items = match value {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ValidationError::new(field, "must be an array")),
    };

    for (i, item) in items.iter().enumerate() {
        let prefix = format!("{field}[{i}].");
        let obj = item
            .as_object()
            .ok_or_else(|| ValidationError::new(format!("{field}[{i}]"), "must be an object"))?;
        for rule in rules {
            check_field(obj.get(rule.field), rule, &prefix)?;
        }
    }
    Ok(())
}

fn check_ancestor(value: Option<&Value>) -> Result<(), ValidationError> {
    let obj = match value {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Object(obj)) => obj,
        Some(_) => return Err(ValidationError::new("croatian_ancestor", "must be an object")),
    };

    for rule in ANCESTOR_RULES {
        check_field(obj.get(rule.field), rule, "croatian_ancestor.")?;
    }

    let married = obj.get("married").and_then(Value::as_bool).unwrap_or(false);
    match obj.get("spouse") {
        None | Some(Value::Null) => Ok(()),
        Some(_) if !married => Err(ValidationError::new(
            "croatian_ancestor.spouse",
            "is only allowed when married is true",
        )),
        Some(Value::Object(spouse)) => {
            for rule in SPOUSE_RULES {
                check_field(spouse.get(rule.field), rule, "croatian_ancestor.spouse.")?;
            }
            Ok(())
        }
        Some(_) => Err(ValidationError::new(
            "croatian_ancestor.spouse",
            "must be an object",
        )),
    }
}

fn is_email(s: &str) -> bool {
    let mut parts = s.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    !local.is_empty()
        && !domain.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_body() -> Value {
        json!({
            "creativity": 0.7,
            "full_name": "Ana Marić",
            "birth_date": "1990-04-12",
            "birth_place": "Santiago",
            "age": 35,
            "address": "Av. Providencia 1234",
            "country": "Chile",
            "occupation": "Civil engineer",
            "marital_status": "single",
            "phone": "+56 9 1234 5678",
            "email": "ana.maric@example.com",
            "citizenship_interest": "I want to reconnect with my Croatian roots."
        })
    }

    #[test]
    fn minimal_body_validates() {
        let record = validate_applicant(&minimal_body()).unwrap();
        assert_eq!(record.full_name, "Ana Marić");
        assert!(!record.no_children);
        assert!(record.children.is_empty());
        assert!(record.croatian_ancestor.is_none());
    }

    #[test]
    fn missing_required_scalar_reports_that_field() {
        let mut body = minimal_body();
        body.as_object_mut().unwrap().remove("birth_place");
        let err = validate_applicant(&body).unwrap_err();
        assert_eq!(err.field, "birth_place");
        assert_eq!(err.message, "is required");
    }

    #[test]
    fn first_violation_wins() {
        // Both full_name and email are broken; full_name is declared first.
        let mut body = minimal_body();
        body["full_name"] = json!("   ");
        body["email"] = json!("not-an-email");
        let err = validate_applicant(&body).unwrap_err();
        assert_eq!(err.field, "full_name");
    }

    #[test]
    fn whitespace_only_string_is_rejected() {
        let mut body = minimal_body();
        body["occupation"] = json!("  \t ");
        let err = validate_applicant(&body).unwrap_err();
        assert_eq!(err.field, "occupation");
        assert_eq!(err.message, "must be a non-empty string");
    }

    #[test]
    fn bad_email_is_rejected() {
        for bad in ["plain", "a@b", "@example.com", "ana@", "ana@domain."] {
            let mut body = minimal_body();
            body["email"] = json!(bad);
            let err = validate_applicant(&body).unwrap_err();
            assert_eq!(err.field, "email", "{bad} should be rejected");
        }
    }

    #[test]
    fn bad_date_is_rejected() {
        let mut body = minimal_body();
        body["birth_date"] = json!("12/04/1990");
        let err = validate_applicant(&body).unwrap_err();
        assert_eq!(err.field, "birth_date");
        assert_eq!(err.message, "must be a date in YYYY-MM-DD format");
    }

    #[test]
    fn empty_optional_arrays_are_accepted() {
        let mut body = minimal_body();
        body["children"] = json!([]);
        body["academic"] = json!([]);
        body["croatian_relatives"] = json!([]);
        assert!(validate_applicant(&body).is_ok());
    }

    #[test]
    fn academic_item_missing_institution_is_reported_with_index() {
        let mut body = minimal_body();
        body["academic"] = json!([{
            "program": "Law",
            "start_date": "2010-03-01",
            "achievements": "Graduated with honors"
        }]);
        let err = validate_applicant(&body).unwrap_err();
        assert_eq!(err.field, "academic[0].institution");
    }

    #[test]
    fn academic_item_without_end_date_is_accepted() {
        let mut body = minimal_body();
        body["academic"] = json!([{
            "institution": "Universidad de Chile",
            "program": "Law",
            "start_date": "2010-03-01",
            "achievements": "Graduated with honors"
        }]);
        let record = validate_applicant(&body).unwrap();
        assert!(record.academic[0].end_date.is_none());
    }

    #[test]
    fn child_with_empty_name_and_age_is_tolerated() {
        // The intake form submits blank child fields as empty strings.
        let mut body = minimal_body();
        body["children"] = json!([{ "name": "", "sex": "male", "age": "" }]);
        let record = validate_applicant(&body).unwrap();
        assert_eq!(record.children.len(), 1);
        assert_eq!(record.children[0].name.as_deref(), Some(""));
        assert!(record.children[0].age.is_none());
    }

    #[test]
    fn child_with_invalid_sex_is_rejected() {
        let mut body = minimal_body();
        body["children"] = json!([{ "name": "Luka", "sex": "other", "age": 4 }]);
        let err = validate_applicant(&body).unwrap_err();
        assert_eq!(err.field, "children[0].sex");
    }

    #[test]
    fn children_present_with_no_children_toggle_still_validates() {
        // Toggle/payload inconsistency is accepted; the compiler drops the
        // payload later.
        let mut body = minimal_body();
        body["no_children"] = json!(true);
        body["children"] = json!([{ "name": "Luka", "sex": "male", "age": 4 }]);
        let record = validate_applicant(&body).unwrap();
        assert!(record.no_children);
        assert_eq!(record.children.len(), 1);
    }

    fn ancestor_body() -> Value {
        json!({
            "name": "Ivan Marić",
            "relationship": "great-grandfather",
            "birth_date": "1895-06-01",
            "birth_place": "Split",
            "death_date": "1975-09-14",
            "death_place": "Punta Arenas",
            "emigration_year": 1920,
            "emigration_city": "Punta Arenas",
            "emigration_country": "Chile",
            "emigration_reason": "Economic hardship after the war",
            "destination_occupation": "Shipwright"
        })
    }

    #[test]
    fn absent_ancestor_is_accepted() {
        assert!(validate_applicant(&minimal_body()).is_ok());
    }

    #[test]
    fn ancestor_missing_required_field_is_reported() {
        let mut ancestor = ancestor_body();
        ancestor.as_object_mut().unwrap().remove("emigration_reason");
        let mut body = minimal_body();
        body["croatian_ancestor"] = ancestor;
        let err = validate_applicant(&body).unwrap_err();
        assert_eq!(err.field, "croatian_ancestor.emigration_reason");
    }

    #[test]
    fn spouse_without_married_flag_is_rejected() {
        let mut ancestor = ancestor_body();
        ancestor["spouse"] = json!({ "name": "Marija", "marriage_year": 1922 });
        let mut body = minimal_body();
        body["croatian_ancestor"] = ancestor;
        let err = validate_applicant(&body).unwrap_err();
        assert_eq!(err.field, "croatian_ancestor.spouse");
        assert_eq!(err.message, "is only allowed when married is true");
    }

    #[test]
    fn married_ancestor_with_spouse_validates() {
        let mut ancestor = ancestor_body();
        ancestor["married"] = json!(true);
        ancestor["spouse"] = json!({ "name": "Marija", "marriage_year": 1922 });
        let mut body = minimal_body();
        body["croatian_ancestor"] = ancestor;
        let record = validate_applicant(&body).unwrap();
        let spouse = record.croatian_ancestor.unwrap().spouse.unwrap();
        assert_eq!(spouse.marriage_year, 1922);
    }

    #[test]
    fn married_ancestor_without_spouse_is_accepted() {
        // Absence is never an error; the compiler simply omits the marriage line.
        let mut ancestor = ancestor_body();
        ancestor["married"] = json!(true);
        let mut body = minimal_body();
        body["croatian_ancestor"] = ancestor;
        assert!(validate_applicant(&body).is_ok());
    }

    #[test]
    fn non_object_body_is_rejected() {
        let err = validate_applicant(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.field, "body");
    }

    #[test]
    fn error_display_names_field_then_rule() {
        let err = ValidationError::new("email", "must be a valid email address");
        assert_eq!(err.to_string(), "email must be a valid email address");
    }
}
