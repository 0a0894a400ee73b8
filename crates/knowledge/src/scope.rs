//! Scope detection: does a question belong to Latin America and the Caribbean?
//!
//! Matching is plain substring containment on normalized text, so a country
//! name inside a longer word still counts.

use crate::domain::{DomainTables, DEFAULT_LATAM_COUNTRIES, REGIONAL_MARKERS};
use crate::normalize::normalize;
use serde::Serialize;

/// Countries of the default table named in the question, deduplicated and
/// sorted ascending.
pub fn detect_countries(question: &str) -> Vec<String> {
    detect_countries_in(question, DEFAULT_LATAM_COUNTRIES)
}

/// Like [`detect_countries`], against a given list of normalized names.
pub fn detect_countries_in<S: AsRef<str>>(question: &str, countries: &[S]) -> Vec<String> {
    detect_in_normalized(&normalize(question), countries)
}

pub(crate) fn detect_in_normalized<S: AsRef<str>>(
    normalized: &str,
    countries: &[S],
) -> Vec<String> {
    let mut found: Vec<String> = countries
        .iter()
        .map(|country| country.as_ref())
        .filter(|country| normalized.contains(country))
        .map(|country| country.to_string())
        .collect();
    found.sort();
    found.dedup();
    found
}

/// True if the question names a country of the default table or a
/// regional marker.
pub fn is_in_scope(question: &str) -> bool {
    is_in_scope_with(question, DEFAULT_LATAM_COUNTRIES)
}

/// Like [`is_in_scope`], against a given list of normalized country names.
pub fn is_in_scope_with<S: AsRef<str>>(question: &str, countries: &[S]) -> bool {
    let normalized = normalize(question);
    if !detect_in_normalized(&normalized, countries).is_empty() {
        return true;
    }
    REGIONAL_MARKERS
        .iter()
        .any(|marker| normalized.contains(marker))
}

/// True if the lowercased question mentions any non-LATAM marker.
pub fn is_excluded_elsewhere<S: AsRef<str>>(question: &str, markers: &[S]) -> bool {
    let lowered = question.to_lowercase();
    markers
        .iter()
        .any(|marker| lowered.contains(marker.as_ref()))
}

/// The scope decision for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeAssessment {
    /// Output of [`detect_countries_in`]
    pub countries: Vec<String>,
    /// Output of [`is_in_scope_with`]
    pub in_region: bool,
    /// Output of [`is_excluded_elsewhere`]
    pub excluded: bool,
}

impl ScopeAssessment {
    /// In scope only if the region matches and no exclusion marker does.
    pub fn is_allowed(&self) -> bool {
        self.in_region && !self.excluded
    }
}

/// Run the full scope check against the given tables.
pub fn assess_scope(question: &str, tables: &DomainTables) -> ScopeAssessment {
    let assessment = ScopeAssessment {
        countries: detect_countries_in(question, &tables.countries),
        in_region: is_in_scope_with(question, &tables.countries),
        excluded: is_excluded_elsewhere(question, &tables.non_latam_markers),
    };
    tracing::debug!(
        countries = ?assessment.countries,
        in_region = assessment.in_region,
        excluded = assessment.excluded,
        "Scope assessed"
    );
    assessment
}
