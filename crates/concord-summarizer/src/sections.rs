//! Markdown section parsing and rendering

use concord_domain::SummarySection;

/// Split model output on `## ` headers into titled sections
///
/// Text before the first header is dropped when headers exist. Output with
/// no headers at all becomes one "Summary" section.
pub fn parse_sections(text: &str) -> Vec<SummarySection> {
    let mut sections = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in text.lines() {
        if let Some(title) = line.trim_start().strip_prefix("##") {
            let title = title.trim_start_matches('#').trim();
            if let Some((t, body)) = current.take() {
                sections.push(SummarySection::new(t, body.join("\n").trim()));
            }
            if !title.is_empty() {
                current = Some((title.to_string(), Vec::new()));
            }
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }
    if let Some((t, body)) = current {
        sections.push(SummarySection::new(t, body.join("\n").trim()));
    }

    if sections.is_empty() && !text.trim().is_empty() {
        sections.push(SummarySection::new("Summary", text.trim()));
    }
    sections
}

/// Render sections as `## Title` blocks
pub fn render_sections(sections: &[SummarySection]) -> String {
    sections
        .iter()
        .map(|s| format!("## {}\n{}", s.title, s.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headers() {
        let text = "Preamble\n## Key Findings\n- one\n- two\n\n## Conclusion\nDone.";
        let sections = parse_sections(text);
        assert_eq!(
            sections,
            vec![
                SummarySection::new("Key Findings", "- one\n- two"),
                SummarySection::new("Conclusion", "Done."),
            ]
        );
    }

    #[test]
    fn test_deeper_headers_are_titles_too() {
        let sections = parse_sections("### Executive Summary\nShort.");
        assert_eq!(sections[0].title, "Executive Summary");
    }

    #[test]
    fn test_no_headers() {
        let sections = parse_sections("Just prose.");
        assert_eq!(sections, vec![SummarySection::new("Summary", "Just prose.")]);
        assert!(parse_sections("  ").is_empty());
    }

    #[test]
    fn test_render_then_parse() {
        let sections = vec![
            SummarySection::new("A", "alpha"),
            SummarySection::new("B", "beta"),
        ];
        assert_eq!(parse_sections(&render_sections(&sections)), sections);
    }
}
