//! Per-section instructions sent to the completion service.

use bid_core::Section;

/// Instruction for `section` about `company`, or `None` for sections that
/// are never enriched.
pub fn prompt(section: Section, company: &str) -> Option<String> {
    let text = match section {
        Section::Overview => format!(
            "Provide a concise company profile for {company}: 1-2 sentence business description, \
             founding year, current ownership structure, approximate employee count, geographic \
             presence/markets served, and primary business model. Format as brief factual statements."
        ),
        Section::Ownership => format!(
            "Detail {company}'s ownership: current parent company/owner, acquisition date and \
             purchase price (if applicable), previous owner, and whether original management \
             remained post-acquisition. Keep each point to one sentence."
        ),
        Section::Leadership => format!(
            "List the top 5 executives at {company} with: full name, current title, and 1-sentence \
             background highlighting previous role or key qualification. Present as a structured list."
        ),
        Section::Governance => format!(
            "List the top 5 most important governing bodies at {company} (e.g., Board of Directors, \
             Executive Committee, Supervisory Board, Audit Committee). Provide only the names/types \
             of these bodies, one per line. If fewer than 5 exist, list only what exists. If no \
             governance information is publicly available, respond with \"Not available\". Do not \
             provide definitions or explanations."
        ),
        Section::Products => format!(
            "Categorize {company}'s product portfolio into 3-5 main categories, listing 2-3 flagship \
             products or product lines per category. Use format: Category: Product1, Product2, Product3."
        ),
        Section::Operations => format!(
            "List countries where {company} has significant operations, specifying facility types \
             (manufacturing plants, distribution centers, offices, R&D facilities) in each location. \
             One line per country."
        ),
        Section::Financials => format!(
            "Provide {company}'s financial metrics for the most recent 5 fiscal years in tabular \
             format: Year, Revenue (with currency), Operating Profit, Net Profit, Operating Margin (%), \
             Free Cash Flow, Total Debt. Use actual figures only. For each unavailable metric, write \
             \"N/A\" in that cell. If no financial data exists at all, respond with only \"Not \
             available\". Do not include any explanatory text, jurisdictional clarifications, or data \
             source notes."
        ),
        Section::Competitors => format!(
            "Identify {company}'s top 5-7 direct competitors, noting each competitor's primary \
             competitive focus or differentiation in one brief phrase (e.g., \"premium segment,\" \
             \"cost leadership,\" \"innovation focus\")."
        ),
        Section::Profitability => format!(
            "State {company}'s most recent annual profitability metrics: total revenue, operating \
             profit, net profit (all with currency), operating margin percentage, and net margin \
             percentage. Use latest fiscal year data."
        ),
        Section::Improvements => format!(
            "Identify specific operational improvement initiatives at {company} across: (1) Cost \
             reduction programs, (2) Portfolio optimization/divestments, (3) Pricing and revenue \
             strategies, (4) Innovation/R&D investments, (5) Post-acquisition integration efforts. \
             List 2-3 concrete initiatives per category."
        ),
        Section::CompanyName | Section::Date | Section::Analysis | Section::FollowUp => {
            return None
        }
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_enrichable_section_has_a_prompt() {
        for section in Section::ENRICHABLE {
            let text = prompt(section, "Valeo Foods").unwrap();
            assert!(text.contains("Valeo Foods"), "{:?}", section);
        }
    }

    #[test]
    fn test_meeting_sections_are_never_prompted() {
        assert!(prompt(Section::Analysis, "Valeo Foods").is_none());
        assert!(prompt(Section::FollowUp, "Valeo Foods").is_none());
    }

    #[test]
    fn test_line_continuations_keep_single_spaces() {
        let text = prompt(Section::Overview, "Acme").unwrap();
        assert!(!text.contains("  "));
        assert!(text.contains("business description, founding year"));
    }
}
