// src/report/render.rs
//! Materializes report values into the fixed five-page template.
//!
//! The page set and ordering are fixed by the catalog; every page is emitted
//! even when all of its slots are empty. Rendering is pure: the same values
//! always produce structurally identical pages.

use super::catalog::SlotCatalog;
use super::model::ReportValues;

pub const PRODUCT_NAME: &str = "Kinspire CoreHire\u{2122}";
const CONTACT_LINE: &str = "+1.520.488.7277  \u{00b7}  getkinspired@gmail.com";

const RISK_DISCLAIMER: &str = "This risk assessment is based on publicly available information \
and proprietary analysis. Kinspire recommends that employers conduct independent verification \
prior to any hiring decision. Kinspire is not liable for outcomes resulting from incomplete vetting.";

/// Structured markup vocabulary both exporters consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Page-level title (h1).
    Heading(String),
    /// Section title (h2).
    SectionTitle(String),
    /// Subsection title (h3).
    SubsectionTitle(String),
    /// Muted explanatory line under a title.
    Subtitle(String),
    Paragraph(String),
    /// Bolded label followed by a value on one line.
    LabelValue(String, String),
    Bullets(Vec<String>),
    /// Two-column table with a header row.
    Table {
        headers: [String; 2],
        rows: Vec<[String; 2]>,
    },
    /// Horizontal divider.
    Rule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub index: usize,
    pub blocks: Vec<Block>,
}

/// Render the full page sequence for the given values.
pub fn render(values: &ReportValues, catalog: &SlotCatalog) -> Vec<RenderedPage> {
    // Resolves a key through its slot's placeholder policy.
    let r = |key: &str| -> String {
        catalog
            .get(key)
            .map(|slot| values.resolve(slot))
            .unwrap_or_default()
    };

    vec![
        RenderedPage {
            index: 0,
            blocks: page_overview(&r),
        },
        RenderedPage {
            index: 1,
            blocks: page_portrait(&r),
        },
        RenderedPage {
            index: 2,
            blocks: page_alignment(&r),
        },
        RenderedPage {
            index: 3,
            blocks: page_growth_and_risk(&r),
        },
        RenderedPage {
            index: 4,
            blocks: page_leadership(&r),
        },
    ]
}

fn page_overview(r: &dyn Fn(&str) -> String) -> Vec<Block> {
    vec![
        Block::Heading(format!(
            "{} Candidate Profile: {}",
            PRODUCT_NAME,
            r("full_name")
        )),
        Block::Paragraph(r("headline_tagline")),
        Block::Rule,
        Block::Paragraph(format!(
            "This analysis uses Kinspire's proprietary CoreHire\u{2122} methodology to evaluate \
how {} aligns with the position of {} at {}. CoreHire\u{2122} goes beyond resumes to assess \
values, leadership style, and growth trajectory, offering a predictive view of role fit and \
long-term success.",
            r("full_name"),
            r("role_title"),
            r("company"),
        )),
        Block::LabelValue(
            "Job Position".to_string(),
            format!("{} \u{2013} {}", r("company"), r("role_title")),
        ),
        Block::LabelValue("Potential for Success".to_string(), r("success_level")),
        Block::Paragraph(r("opening_narrative")),
        Block::SectionTitle("Success Factors".to_string()),
        Block::Bullets(vec![
            r("success_factor_1"),
            r("success_factor_2"),
            r("success_factor_3"),
        ]),
        Block::SectionTitle("Support Needs".to_string()),
        Block::Bullets(vec![r("support_1"), r("support_2")]),
        Block::Rule,
        Block::SectionTitle(format!(
            "Candidate & Role Alignment \u{2013} {}, {}",
            r("role_title"),
            r("company")
        )),
        Block::Subtitle(
            "How the candidate's skills and style align with the role's key responsibilities \
and success factors."
                .to_string(),
        ),
    ]
}

fn page_portrait(r: &dyn Fn(&str) -> String) -> Vec<Block> {
    vec![
        Block::SectionTitle("CoreHire\u{2122} Candidate Portrait & Positioning".to_string()),
        Block::Subtitle(
            "The following provides a multidimensional snapshot of the candidate, highlighting \
not just skills and experience, but also motivations, leadership style, behavioral profile, \
and growth potential."
                .to_string(),
        ),
        Block::SubsectionTitle("Signature Skills & Superpowers".to_string()),
        Block::Subtitle("What makes the candidate stand out in leadership and impact.".to_string()),
        Block::Bullets(vec![
            r("skill_1"),
            r("skill_2"),
            r("skill_3"),
            r("skill_4"),
            r("skill_5"),
        ]),
        Block::SubsectionTitle("Motivators & Values".to_string()),
        Block::Subtitle(
            "What drives the candidate and underpins their long-term engagement.".to_string(),
        ),
        Block::Bullets(vec![
            r("value_1"),
            r("value_2"),
            r("value_3"),
            r("value_4"),
        ]),
        Block::SubsectionTitle("Ideal Work Environment".to_string()),
        Block::Subtitle(
            "Cultural and organizational conditions that bring out their best performance."
                .to_string(),
        ),
        Block::Bullets(vec![r("env_1"), r("env_2"), r("env_3")]),
    ]
}

fn page_alignment(r: &dyn Fn(&str) -> String) -> Vec<Block> {
    let rows = (1..=5)
        .map(|i| {
            [
                r(&format!("need_{}", i)),
                r(&format!("match_{}", i)),
            ]
        })
        .collect();

    vec![
        Block::Table {
            headers: ["Strategic Need".to_string(), "Matching Strengths".to_string()],
            rows,
        },
        Block::Rule,
        Block::SectionTitle("Corporate DNA Alignment (Overall Summary)".to_string()),
        Block::Subtitle(
            "How the candidate's natural strengths align with the company's culture.".to_string(),
        ),
        Block::LabelValue(
            "Overall Alignment".to_string(),
            format!(
                "{} \u{2014} {}",
                r("overall_alignment_descriptor"),
                r("overall_alignment_summary")
            ),
        ),
        Block::LabelValue(
            "Mission".to_string(),
            format!("{}: {}", r("mission_descriptor"), r("mission_note")),
        ),
        Block::LabelValue(
            "Vision".to_string(),
            format!("{}: {}", r("vision_descriptor"), r("vision_note")),
        ),
        Block::LabelValue(
            "Values".to_string(),
            format!("{}: {}", r("values_descriptor"), r("values_note")),
        ),
        Block::LabelValue(
            "Pillars".to_string(),
            format!("{}: {}", r("pillars_descriptor"), r("pillars_note")),
        ),
        Block::Rule,
        Block::SectionTitle("Career Highlights".to_string()),
        Block::Subtitle(
            "Key professional milestones and role achievements that illustrate the candidate's \
progression, impact, and leadership capacity."
                .to_string(),
        ),
        Block::Bullets(vec![
            r("career_1"),
            r("career_2"),
            r("career_3"),
            r("career_4"),
            r("career_5"),
        ]),
    ]
}

fn page_growth_and_risk(r: &dyn Fn(&str) -> String) -> Vec<Block> {
    vec![
        Block::SectionTitle("Growth & Integration Path".to_string()),
        Block::Subtitle(
            "The candidate's growth direction, what fuels them, blind spots to navigate, and \
practices that support alignment."
                .to_string(),
        ),
        Block::Bullets(vec![
            format!("Growth Vector: {}", r("growth_vector")),
            format!("Motivators: {}", r("growth_motivators")),
            format!("Potential Blind Spots: {}", r("blind_spots")),
            format!("Integration Practices: {}", r("practices")),
        ]),
        Block::Rule,
        Block::SectionTitle("Public Records & Online Footprint".to_string()),
        Block::Subtitle(
            "Summary of the candidate's professional presence and any publicly available \
records that may inform employer evaluation."
                .to_string(),
        ),
        Block::Bullets(vec![
            r("public_1"),
            r("public_2"),
            r("public_3"),
            r("public_4"),
        ]),
        Block::SectionTitle("Risk Assessment Summary".to_string()),
        Block::LabelValue("Reputation Risk".to_string(), r("risk_reputation_text")),
        Block::LabelValue("Professional Tone".to_string(), r("risk_tone_text")),
        Block::LabelValue("Content Risk".to_string(), r("risk_content_text")),
        Block::LabelValue("Background Red Flags".to_string(), r("risk_background_text")),
        Block::Subtitle(RISK_DISCLAIMER.to_string()),
    ]
}

fn page_leadership(r: &dyn Fn(&str) -> String) -> Vec<Block> {
    vec![
        Block::SectionTitle("Leadership Style that Fuels Success".to_string()),
        Block::Subtitle("How the candidate naturally leads and inspires others.".to_string()),
        Block::LabelValue("Leadership Archetype".to_string(), r("leadership_archetype")),
        Block::Bullets(vec![
            r("leadership_style_sentence"),
            r("leadership_impact"),
            r("leadership_distinction"),
        ]),
        Block::SectionTitle("Behavioral & Communication Insights".to_string()),
        Block::Subtitle(
            "How the candidate naturally connects, influences, and makes decisions.".to_string(),
        ),
        Block::Bullets(vec![
            r("behavior_1"),
            r("behavior_2"),
            r("behavior_3"),
            r("behavior_4"),
            r("behavior_5"),
        ]),
        Block::SectionTitle("Predicted Assessment Profile".to_string()),
        Block::Subtitle(
            "Based on observed behaviors, career trajectory, and leadership presence.".to_string(),
        ),
        Block::LabelValue("DISC".to_string(), r("disc")),
        Block::LabelValue("MBTI".to_string(), r("mbti")),
        Block::LabelValue("Enneagram".to_string(), r("enneagram")),
        Block::LabelValue("Culture Talk".to_string(), r("culture_talk")),
        Block::LabelValue("Culture Index".to_string(), r("culture_index")),
        Block::LabelValue("StrengthsFinder".to_string(), r("strengthsfinder")),
    ]
}

/// Flattened page text. Footer line included so both exporters carry it.
pub fn page_text(page: &RenderedPage) -> String {
    let mut out = String::new();
    for block in &page.blocks {
        match block {
            Block::Heading(t)
            | Block::SectionTitle(t)
            | Block::SubsectionTitle(t)
            | Block::Subtitle(t)
            | Block::Paragraph(t) => {
                out.push_str(t);
                out.push('\n');
            }
            Block::LabelValue(label, value) => {
                out.push_str(label);
                out.push_str(": ");
                out.push_str(value);
                out.push('\n');
            }
            Block::Bullets(items) => {
                for item in items {
                    out.push_str(item);
                    out.push('\n');
                }
            }
            Block::Table { headers, rows } => {
                out.push_str(&headers.join(" | "));
                out.push('\n');
                for row in rows {
                    out.push_str(&row.join(" | "));
                    out.push('\n');
                }
            }
            Block::Rule => {}
        }
    }
    out.push_str(CONTACT_LINE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::catalog::placeholder_token;

    #[test]
    fn test_render_emits_all_pages_in_order() {
        let catalog = SlotCatalog::standard();
        let pages = render(&ReportValues::new(), &catalog);
        assert_eq!(pages.len(), catalog.page_count());
        for (i, page) in pages.iter().enumerate() {
            assert_eq!(page.index, i);
            assert!(!page.blocks.is_empty());
        }
    }

    #[test]
    fn test_render_is_idempotent() {
        let catalog = SlotCatalog::standard();
        let mut values = ReportValues::new();
        values.set("full_name", "Jane Doe");
        values.set("skill_2", "Org design");

        assert_eq!(render(&values, &catalog), render(&values, &catalog));
    }

    #[test]
    fn test_empty_values_render_placeholder_on_owning_page() {
        let catalog = SlotCatalog::standard();
        let pages = render(&ReportValues::new(), &catalog);

        for slot in catalog.slots() {
            let token = placeholder_token(slot.key);
            let text = page_text(&pages[slot.page]);
            assert!(
                text.contains(&token),
                "page {} is missing {}",
                slot.page,
                token
            );
        }
    }

    #[test]
    fn test_populated_value_replaces_placeholder() {
        let catalog = SlotCatalog::standard();
        let mut values = ReportValues::new();
        values.set("full_name", "Jane Doe");

        let pages = render(&values, &catalog);
        let text = page_text(&pages[0]);
        assert!(text.contains("Jane Doe"));
        assert!(!text.contains("[[FULL_NAME]]"));
    }
}
