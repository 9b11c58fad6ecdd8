//! Depth profiles: how much input a summary gets and which sections it has

use concord_domain::{DocType, SummaryDepth};

/// Input limits for one summary depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthProfile {
    /// Resolved claims included in the prompt
    pub max_claims: usize,
    /// Conflicts included in the prompt
    pub max_conflicts: usize,
    /// Target length hint for the model, in words
    pub word_range: (usize, usize),
}

impl DepthProfile {
    /// Profile for a depth
    pub fn for_depth(depth: SummaryDepth) -> Self {
        match depth {
            SummaryDepth::Brief => Self {
                max_claims: 10,
                max_conflicts: 0,
                word_range: (80, 200),
            },
            SummaryDepth::Standard => Self {
                max_claims: 20,
                max_conflicts: 10,
                word_range: (200, 400),
            },
            SummaryDepth::Detailed => Self {
                max_claims: 30,
                max_conflicts: 15,
                word_range: (400, 700),
            },
            SummaryDepth::DeepResearch => Self {
                max_claims: 30,
                max_conflicts: 15,
                word_range: (600, 900),
            },
        }
    }
}

/// Section titles the model is asked to produce
///
/// Single-document jobs have no cross-document conflicts, so conflict
/// sections are left out for them.
pub fn section_plan(depth: SummaryDepth, doc_types: &[DocType], single_doc: bool) -> Vec<&'static str> {
    let research = doc_types.contains(&DocType::ResearchPaper);
    let legal = doc_types.contains(&DocType::LegalDocument);

    match depth {
        SummaryDepth::Brief => vec!["Key Findings", "Conclusion"],
        SummaryDepth::Standard if single_doc && legal => {
            vec!["Key Provisions", "Obligations & Rights", "Summary"]
        }
        SummaryDepth::Standard if single_doc && research => {
            vec!["Key Findings", "Methodology", "Analysis", "Conclusion"]
        }
        SummaryDepth::Standard if single_doc => vec!["Key Findings", "Analysis", "Conclusion"],
        SummaryDepth::Standard => {
            let mut plan = vec!["Key Findings", "Conflicts & Disagreements", "Conclusion"];
            if research {
                plan.push("Methodology");
            }
            plan
        }
        SummaryDepth::Detailed => {
            let mut plan = vec!["Key Findings", "Detailed Analysis"];
            if !single_doc {
                plan.push("Conflicts & Disagreements");
            }
            plan.extend(["Limitations & Caveats", "Implications", "Conclusion"]);
            if legal {
                plan.push("Key Clauses & Obligations");
            }
            plan
        }
        SummaryDepth::DeepResearch => {
            let mut plan = vec![
                "Executive Summary",
                "Research Problem & Objectives",
                "Methodology & Experimental Design",
                "Key Results & Statistical Highlights",
            ];
            if !single_doc {
                plan.push("Cross-Document Conflicts & Disagreements");
            }
            plan.extend([
                "Limitations & Threats to Validity",
                "Future Research Directions",
                "Conclusion",
            ]);
            plan
        }
    }
}
