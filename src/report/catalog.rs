// src/report/catalog.rs
//! The report slot catalog.
//!
//! One declarative table owns every field the analysis backend can fill: its
//! key, the page and section it renders on, its placeholder policy, and the
//! hint embedded into the prompt's schema block. The prompt builder and the
//! renderer both consume this table, so the two cannot drift apart.

/// Number of pages in the report template. Fixed, independent of data.
pub const PAGE_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderPolicy {
    /// Missing value renders as an empty string.
    EmptyString,
    /// Missing value renders as a bracketed uppercase token, e.g.
    /// `full_name` -> `[[FULL_NAME]]`, so gaps are visually obvious.
    BracketedKeyName,
}

#[derive(Debug, Clone, Copy)]
pub struct Slot {
    pub key: &'static str,
    pub page: usize,
    pub section: &'static str,
    pub policy: PlaceholderPolicy,
    /// Natural-language description of the expected content, embedded
    /// verbatim into the analysis prompt's schema block.
    pub schema_hint: &'static str,
}

const fn slot(key: &'static str, page: usize, section: &'static str, hint: &'static str) -> Slot {
    Slot {
        key,
        page,
        section,
        policy: PlaceholderPolicy::BracketedKeyName,
        schema_hint: hint,
    }
}

/// The full catalog, in page order. Adding or removing a key here updates the
/// prompt schema and the renderer's coverage check in lockstep.
pub const SLOTS: &[Slot] = &[
    // Page 1 - identity and fit summary
    slot("full_name", 0, "identity", "Candidate's full name from CV"),
    slot("headline_tagline", 0, "identity", "A compelling one-line summary of the candidate (e.g., 'Strategic Marketing Leader with 15+ Years Driving Growth')"),
    slot("company", 0, "identity", "Company name from job description"),
    slot("role_title", 0, "identity", "Job title from job description"),
    slot("success_level", 0, "fit_summary", "HIGH/MEDIUM/LOW with brief explanation"),
    slot("opening_narrative", 0, "fit_summary", "2-3 sentence narrative about how this candidate aligns with the role"),
    slot("success_factor_1", 0, "success_factors", "First key success factor"),
    slot("success_factor_2", 0, "success_factors", "Second key success factor"),
    slot("success_factor_3", 0, "success_factors", "Third key success factor"),
    slot("support_1", 0, "support_needs", "First support need/development area"),
    slot("support_2", 0, "support_needs", "Second support need/development area"),
    // Page 2 - candidate portrait
    slot("skill_1", 1, "signature_skills", "Signature skill/superpower 1"),
    slot("skill_2", 1, "signature_skills", "Signature skill/superpower 2"),
    slot("skill_3", 1, "signature_skills", "Signature skill/superpower 3"),
    slot("skill_4", 1, "signature_skills", "Signature skill/superpower 4"),
    slot("skill_5", 1, "signature_skills", "Signature skill/superpower 5"),
    slot("value_1", 1, "motivators_values", "Motivator/value 1"),
    slot("value_2", 1, "motivators_values", "Motivator/value 2"),
    slot("value_3", 1, "motivators_values", "Motivator/value 3"),
    slot("value_4", 1, "motivators_values", "Motivator/value 4"),
    slot("env_1", 1, "work_environment", "Ideal work environment characteristic 1"),
    slot("env_2", 1, "work_environment", "Ideal work environment characteristic 2"),
    slot("env_3", 1, "work_environment", "Ideal work environment characteristic 3"),
    // Page 3 - role alignment, culture, career
    slot("need_1", 2, "role_alignment", "Strategic need 1 from job"),
    slot("need_2", 2, "role_alignment", "Strategic need 2 from job"),
    slot("need_3", 2, "role_alignment", "Strategic need 3 from job"),
    slot("need_4", 2, "role_alignment", "Strategic need 4 from job"),
    slot("need_5", 2, "role_alignment", "Strategic need 5 from job"),
    slot("match_1", 2, "role_alignment", "How candidate matches need 1"),
    slot("match_2", 2, "role_alignment", "How candidate matches need 2"),
    slot("match_3", 2, "role_alignment", "How candidate matches need 3"),
    slot("match_4", 2, "role_alignment", "How candidate matches need 4"),
    slot("match_5", 2, "role_alignment", "How candidate matches need 5"),
    slot("overall_alignment_descriptor", 2, "culture_alignment", "Strong/Moderate/Developing"),
    slot("overall_alignment_summary", 2, "culture_alignment", "Brief summary of cultural alignment"),
    slot("mission_descriptor", 2, "culture_alignment", "Strong/Moderate/Developing"),
    slot("mission_note", 2, "culture_alignment", "How candidate aligns with company mission"),
    slot("vision_descriptor", 2, "culture_alignment", "Strong/Moderate/Developing"),
    slot("vision_note", 2, "culture_alignment", "How candidate aligns with company vision"),
    slot("values_descriptor", 2, "culture_alignment", "Strong/Moderate/Developing"),
    slot("values_note", 2, "culture_alignment", "How candidate aligns with company values"),
    slot("pillars_descriptor", 2, "culture_alignment", "Strong/Moderate/Developing"),
    slot("pillars_note", 2, "culture_alignment", "How candidate aligns with company pillars"),
    slot("career_1", 2, "career_highlights", "Career highlight 1"),
    slot("career_2", 2, "career_highlights", "Career highlight 2"),
    slot("career_3", 2, "career_highlights", "Career highlight 3"),
    slot("career_4", 2, "career_highlights", "Career highlight 4"),
    slot("career_5", 2, "career_highlights", "Career highlight 5"),
    // Page 4 - growth, public record, risk
    slot("growth_vector", 3, "growth_path", "Primary growth direction"),
    slot("growth_motivators", 3, "growth_path", "What motivates their growth"),
    slot("blind_spots", 3, "growth_path", "Potential blind spots to watch"),
    slot("practices", 3, "growth_path", "Integration practices recommendation"),
    slot("public_1", 3, "public_record", "Public record/online presence finding 1"),
    slot("public_2", 3, "public_record", "Public record/online presence finding 2"),
    slot("public_3", 3, "public_record", "Public record/online presence finding 3"),
    slot("public_4", 3, "public_record", "Public record/online presence finding 4"),
    slot("risk_reputation_text", 3, "risk_assessment", "Low Risk - Professional online presence"),
    slot("risk_tone_text", 3, "risk_assessment", "Assessment of professional tone"),
    slot("risk_content_text", 3, "risk_assessment", "Assessment of content risk"),
    slot("risk_background_text", 3, "risk_assessment", "Assessment of background flags"),
    // Page 5 - leadership, behavior, predicted assessments
    slot("leadership_archetype", 4, "leadership", "Leadership archetype (e.g., Visionary, Servant Leader, etc.)"),
    slot("leadership_style_sentence", 4, "leadership", "Description of leadership style"),
    slot("leadership_impact", 4, "leadership", "How their leadership creates impact"),
    slot("leadership_distinction", 4, "leadership", "What distinguishes their leadership"),
    slot("behavior_1", 4, "behavioral_insights", "Behavioral insight 1"),
    slot("behavior_2", 4, "behavioral_insights", "Behavioral insight 2"),
    slot("behavior_3", 4, "behavioral_insights", "Behavioral insight 3"),
    slot("behavior_4", 4, "behavioral_insights", "Behavioral insight 4"),
    slot("behavior_5", 4, "behavioral_insights", "Behavioral insight 5"),
    slot("disc", 4, "predicted_assessments", "Predicted DISC profile (e.g., DI, SC, etc.)"),
    slot("mbti", 4, "predicted_assessments", "Predicted MBTI type"),
    slot("enneagram", 4, "predicted_assessments", "Predicted Enneagram type"),
    slot("culture_talk", 4, "predicted_assessments", "Culture Talk color"),
    slot("culture_index", 4, "predicted_assessments", "Culture Index pattern"),
    slot("strengthsfinder", 4, "predicted_assessments", "Top 5 StrengthsFinder themes"),
];

/// Read-only view over the slot table, shared by all renders.
#[derive(Debug, Clone, Copy)]
pub struct SlotCatalog {
    slots: &'static [Slot],
}

impl SlotCatalog {
    pub fn standard() -> Self {
        Self { slots: SLOTS }
    }

    pub fn slots(&self) -> &[Slot] {
        self.slots
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots.iter().map(|s| s.key)
    }

    pub fn get(&self, key: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn page_count(&self) -> usize {
        PAGE_COUNT
    }
}

impl Default for SlotCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Bracketed uppercase stand-in shown when a slot has no value.
pub fn placeholder_token(key: &str) -> String {
    format!("[[{}]]", key.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_keys_are_unique() {
        let catalog = SlotCatalog::standard();
        let unique: HashSet<_> = catalog.keys().collect();
        assert_eq!(unique.len(), catalog.slots().len());
    }

    #[test]
    fn test_every_page_has_slots() {
        let catalog = SlotCatalog::standard();
        for page in 0..catalog.page_count() {
            assert!(
                catalog.slots().iter().any(|s| s.page == page),
                "page {} has no slots",
                page
            );
        }
        assert!(catalog.slots().iter().all(|s| s.page < PAGE_COUNT));
    }

    #[test]
    fn test_placeholder_token() {
        assert_eq!(placeholder_token("full_name"), "[[FULL_NAME]]");
        assert_eq!(placeholder_token("disc"), "[[DISC]]");
    }
}
