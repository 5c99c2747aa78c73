use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A fully validated citizenship questionnaire submission.
///
/// Instances are only produced by `validate::validate_applicant` — handlers
/// never deserialize a request body into this type directly, so every field
/// here has already passed its schema rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantRecord {
    /// Sampling temperature requested by the form; carried verbatim into the
    /// compiled prompt.
    pub creativity: f32,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub birth_place: String,
    pub age: u32,
    pub address: String,
    pub country: String,
    pub occupation: String,
    pub marital_status: String,
    pub phone: String,
    pub email: String,
    /// Toggle: when true the children section is never rendered, even if
    /// `children` is non-empty. The toggle wins over the payload.
    #[serde(default)]
    pub no_children: bool,
    #[serde(default)]
    pub children: Vec<Child>,
    #[serde(default)]
    pub academic: Vec<AcademicEntry>,
    /// Toggle: when true the employment fields are ignored and the prompt
    /// carries an "unemployed" marker instead.
    #[serde(default)]
    pub unemployed: bool,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub workplace: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub duties: Option<String>,
    #[serde(default)]
    pub work_achievements: Option<String>,
    #[serde(default)]
    pub contribution: Option<String>,
    #[serde(default)]
    pub croatian_relatives: Vec<CroatianRelative>,
    #[serde(default)]
    pub croatian_ancestor: Option<CroatianAncestor>,
    pub citizenship_interest: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// One child of the applicant. The intake form allows partially filled rows,
/// so every field is optional at this level; a blank `age` may arrive as the
/// empty string and decodes to `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Child {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sex: Option<Sex>,
    #[serde(default, deserialize_with = "age_or_blank")]
    pub age: Option<u32>,
}

/// Accepts a number, `null`, or the empty string a blank form field submits.
fn age_or_blank<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| D::Error::custom("age out of range")),
        Some(other) => Err(D::Error::custom(format!(
            "invalid age value: {other}"
        ))),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcademicEntry {
    pub institution: String,
    pub program: String,
    pub start_date: NaiveDate,
    /// `None` means the program is still in progress; the compiler renders
    /// the literal "ongoing" sentinel instead of a date.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub achievements: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CroatianRelative {
    pub full_name: String,
    pub relationship: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CroatianAncestor {
    pub name: String,
    pub relationship: String,
    pub birth_date: NaiveDate,
    pub birth_place: String,
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub mother_name: Option<String>,
    pub death_date: NaiveDate,
    pub death_place: String,
    pub emigration_year: u32,
    pub emigration_city: String,
    pub emigration_country: String,
    pub emigration_reason: String,
    pub destination_occupation: String,
    #[serde(default)]
    pub married: bool,
    /// Only allowed when `married` is true; the validator enforces this.
    #[serde(default)]
    pub spouse: Option<Spouse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spouse {
    pub name: String,
    pub marriage_year: u32,
}
