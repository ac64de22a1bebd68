//! Deck branding and layout settings.

/// Settings shared by the slide sequencer and the document renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckConfig {
    brand: String,
    footer_label: String,
    accent_color: String,
    header_fill: String,
    rows_per_page: usize,
    pending_placeholder: String,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            brand: "EFESO".to_string(),
            footer_label: "EFESO UK BID".to_string(),
            accent_color: "FF6B35".to_string(),
            header_fill: "F2F2F2".to_string(),
            rows_per_page: 12,
            pending_placeholder: "To be completed during the meeting".to_string(),
        }
    }
}

impl DeckConfig {
    /// Create the standard deck configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the brand shown in the footer and analysis headings.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Set the fixed label next to the footer bar.
    pub fn with_footer_label(mut self, label: impl Into<String>) -> Self {
        self.footer_label = label.into();
        self
    }

    /// Set the footer bar colour as six hex digits, e.g. `FF6B35`.
    pub fn with_accent_color(mut self, color: impl Into<String>) -> Self {
        self.accent_color = normalize_hex(color.into());
        self
    }

    /// Set the table header shading as six hex digits.
    pub fn with_header_fill(mut self, color: impl Into<String>) -> Self {
        self.header_fill = normalize_hex(color.into());
        self
    }

    /// Set how many data rows fit on one table page.
    pub fn with_rows_per_page(mut self, rows: usize) -> Self {
        self.rows_per_page = rows.max(1);
        self
    }

    /// Set the text shown for an empty during-meeting sequence.
    pub fn with_pending_placeholder(mut self, text: impl Into<String>) -> Self {
        self.pending_placeholder = text.into();
        self
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn footer_label(&self) -> &str {
        &self.footer_label
    }

    pub fn accent_color(&self) -> &str {
        &self.accent_color
    }

    pub fn header_fill(&self) -> &str {
        &self.header_fill
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn pending_placeholder(&self) -> &str {
        &self.pending_placeholder
    }

    /// Footer text for a numbered slide.
    pub fn footer_text(&self, company_name: &str, slide_number: usize) -> String {
        format!("{} © {} | {}", company_name, self.brand, slide_number)
    }
}

fn normalize_hex(color: String) -> String {
    color.trim().trim_start_matches('#').to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DeckConfig::new();
        assert_eq!(config.brand(), "EFESO");
        assert_eq!(config.footer_label(), "EFESO UK BID");
        assert_eq!(config.accent_color(), "FF6B35");
        assert_eq!(config.header_fill(), "F2F2F2");
    }

    #[test]
    fn test_builder_overrides() {
        let config = DeckConfig::new()
            .with_brand("Acme")
            .with_accent_color("#00aa11")
            .with_rows_per_page(0);

        assert_eq!(config.brand(), "Acme");
        assert_eq!(config.accent_color(), "00AA11");
        assert_eq!(config.rows_per_page(), 1);
    }

    #[test]
    fn test_footer_text() {
        let config = DeckConfig::new();
        assert_eq!(config.footer_text("Valeo Foods", 7), "Valeo Foods © EFESO | 7");
    }
}
