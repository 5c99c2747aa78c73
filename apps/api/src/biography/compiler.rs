//! Prompt Compiler — deterministic rendering of a validated questionnaire
//! into the instruction document sent to the generator.
//!
//! The section order is a first-class ordered list (`SECTIONS`): each entry
//! is a renderer that either produces its block or opts out for this record.
//! Pure function of the record; no I/O.

use crate::applicant::models::{ApplicantRecord, Sex};
use crate::biography::prompts::{DOCUMENT_CONTRACT, PREAMBLE, SECTIONED_CONTRACT};

/// Which output contract the generator is asked to satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One complete styled HTML document.
    Document,
    /// Four fixed-key first-person text blocks as a JSON object.
    Sectioned,
}

/// An immutable compiled prompt: the instruction text plus the creativity
/// value carried through as the sampling temperature. Never mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct CompiledPrompt {
    text: String,
    creativity: f32,
}

impl CompiledPrompt {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn creativity(&self) -> f32 {
        self.creativity
    }
}

type SectionRenderer = fn(&ApplicantRecord) -> Option<String>;

/// The fixed section order. Changing this list changes the byte layout of
/// every compiled prompt, so tests pin the order.
const SECTIONS: &[SectionRenderer] = &[
    children_section,
    academic_section,
    employment_section,
    relatives_section,
    ancestor_section,
    interest_section,
];

/// Compiles one record into one prompt. Deterministic: identical input
/// yields byte-identical text.
pub fn compile_prompt(record: &ApplicantRecord, mode: OutputMode) -> CompiledPrompt {
    let mut text = String::from(PREAMBLE);
    text.push('\n');
    text.push_str(&identity_block(record));

    for render in SECTIONS {
        if let Some(section) = render(record) {
            text.push('\n');
            text.push_str(&section);
        }
    }

    text.push('\n');
    text.push_str(match mode {
        OutputMode::Document => DOCUMENT_CONTRACT,
        OutputMode::Sectioned => SECTIONED_CONTRACT,
    });

    CompiledPrompt {
        text,
        creativity: record.creativity,
    }
}

fn identity_block(record: &ApplicantRecord) -> String {
    format!(
        "    Full name: {}\n\
         \x20   Date of birth: {}\n\
         \x20   Place of birth: {}\n\
         \x20   Age: {}\n\
         \x20   Address: {}\n\
         \x20   Country: {}\n\
         \x20   Occupation/Profession: {}\n\
         \x20   Marital status: {}\n\
         \x20   Phone: {}\n\
         \x20   Email: {}\n",
        record.full_name,
        record.birth_date,
        record.birth_place,
        record.age,
        record.address,
        record.country,
        record.occupation,
        record.marital_status,
        record.phone,
        record.email,
    )
}

/// Rendered iff the no-children toggle is false. The toggle wins: a
/// populated `children` array under `no_children = true` is silently
/// dropped.
fn children_section(record: &ApplicantRecord) -> Option<String> {
    if record.no_children {
        return None;
    }
    let mut out = String::from("Children:\n");
    for child in &record.children {
        let sex = match child.sex {
            Some(Sex::Male) => "male",
            Some(Sex::Female) => "female",
            None => "unspecified",
        };
        let age = child
            .age
            .map(|a| a.to_string())
            .unwrap_or_else(|| "unspecified".to_string());
        out.push_str(&format!(
            "Name: {}, Sex: {}, Age: {}\n",
            child.name.as_deref().unwrap_or("unspecified"),
            sex,
            age,
        ));
    }
    Some(out)
}

/// Rendered iff at least one academic entry exists. A missing end date is
/// rendered as the literal "ongoing" sentinel.
fn academic_section(record: &ApplicantRecord) -> Option<String> {
    if record.academic.is_empty() {
        return None;
    }
    let mut out = String::from("Academic background:\n");
    for entry in &record.academic {
        let end = entry
            .end_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "ongoing".to_string());
        out.push_str(&format!(
            "Institution: {}, Program: {}, From: {}, Until: {}, Achievements: {}\n",
            entry.institution, entry.program, entry.start_date, end, entry.achievements,
        ));
    }
    Some(out)
}

/// Always rendered; the content branches on the unemployed toggle. The
/// marker and the full field set are mutually exclusive.
fn employment_section(record: &ApplicantRecord) -> Option<String> {
    if record.unemployed {
        return Some(String::from("Currently unemployed.\n"));
    }
    let field = |opt: &Option<String>| opt.as_deref().unwrap_or("unspecified").to_string();
    Some(format!(
        "Employment details:\n\
         \x20   Company: {}\n\
         \x20   Workplace: {}\n\
         \x20   Job title: {}\n\
         \x20   Duties: {}\n\
         \x20   Work achievements: {}\n\
         \x20   Contribution to Croatia: {}\n",
        field(&record.company),
        field(&record.workplace),
        field(&record.job_title),
        field(&record.duties),
        field(&record.work_achievements),
        field(&record.contribution),
    ))
}

fn relatives_section(record: &ApplicantRecord) -> Option<String> {
    if record.croatian_relatives.is_empty() {
        return None;
    }
    let mut out = String::from("Relatives with Croatian citizenship:\n");
    for relative in &record.croatian_relatives {
        out.push_str(&format!(
            "Full name: {}, Relationship: {}\n",
            relative.full_name, relative.relationship,
        ));
    }
    Some(out)
}

/// Parents' names appear only when at least one is given; marriage details
/// only when the married flag is set AND the spouse record is present.
fn ancestor_section(record: &ApplicantRecord) -> Option<String> {
    let ancestor = record.croatian_ancestor.as_ref()?;

    let mut out = String::from("Croatian ancestor:\n");
    out.push_str(&format!("Full name: {}\n", ancestor.name));
    out.push_str(&format!("Relationship: {}\n", ancestor.relationship));

    if ancestor.father_name.is_some() || ancestor.mother_name.is_some() {
        out.push_str(&format!(
            "Child of: {} and {}\n",
            ancestor.father_name.as_deref().unwrap_or("unknown"),
            ancestor.mother_name.as_deref().unwrap_or("unknown"),
        ));
    }
    if ancestor.married {
        if let Some(spouse) = &ancestor.spouse {
            out.push_str(&format!(
                "Married {} in {}\n",
                spouse.name, spouse.marriage_year,
            ));
        }
    }
    out.push_str(&format!(
        "Emigrated in {} to {}, {}\n",
        ancestor.emigration_year, ancestor.emigration_city, ancestor.emigration_country,
    ));
    out.push_str(&format!("Place of birth: {}\n", ancestor.birth_place));
    out.push_str(&format!("Date of birth: {}\n", ancestor.birth_date));
    out.push_str(&format!(
        "Reason for emigrating: {}\n",
        ancestor.emigration_reason,
    ));
    out.push_str(&format!(
        "In {} worked as: {}\n",
        ancestor.emigration_country, ancestor.destination_occupation,
    ));
    out.push_str(&format!(
        "Date of death: {} in {}\n",
        ancestor.death_date, ancestor.death_place,
    ));
    Some(out)
}

fn interest_section(record: &ApplicantRecord) -> Option<String> {
    Some(format!(
        "Interest in obtaining Croatian citizenship:\n{}\n",
        record.citizenship_interest,
    ))
}
