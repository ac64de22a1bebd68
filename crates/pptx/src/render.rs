//! Slide part rendering for one physical page.

use bid_core::slides::{Bullet, ColumnBlock, Table, TextBlock};
use bid_core::{DeckConfig, Result, SlideContent};

use crate::layout::Page;
use crate::xml::{emu, Align, Frame, Paragraph, ShapeTree, TableSpec, TextStyle};

const TEXT: &str = "363636";

const HEADING: TextStyle = TextStyle::new(28, TEXT);
const BODY: TextStyle = TextStyle::new(14, TEXT);
const SUBHEADING: TextStyle = TextStyle::new(18, TEXT);
const IMPROVEMENT: TextStyle = TextStyle::new(8, TEXT);
const FOOTER_LABEL: TextStyle = TextStyle::new(8, "4B5563");
const FOOTER_TEXT: TextStyle = TextStyle::new(8, "374151");

const TABLE_ROW_HEIGHT: f64 = 0.28;
const TABLE_BORDER: &str = "000000";

/// Render a page as a complete slide part.
pub fn render_page(page: &Page<'_>, config: &DeckConfig) -> Result<String> {
    let mut tree = ShapeTree::new();
    let slide = page.slide;

    match &slide.content {
        SlideContent::Title { subtitle, date } => {
            tree.text_box(
                Frame::inches(1.0, 1.5, 8.0, 1.0),
                &[Paragraph::new(TextStyle::new(48, TEXT)).bold(&slide.title)],
            )?;
            tree.text_box(
                Frame::inches(1.0, 3.0, 8.0, 0.6),
                &[Paragraph::new(TextStyle::new(28, "666666")).text(subtitle)],
            )?;
            tree.text_box(
                Frame::inches(1.0, 4.0, 8.0, 0.5),
                &[Paragraph::new(TextStyle::new(18, "999999")).text(date)],
            )?;
        }
        SlideContent::Closing { subtitle } => {
            tree.text_box(
                Frame::inches(2.0, 2.3, 6.0, 0.9),
                &[Paragraph::new(TextStyle::new(40, TEXT))
                    .bold(&slide.title)
                    .aligned(Align::Center)],
            )?;
            tree.text_box(
                Frame::inches(2.0, 3.3, 6.0, 0.6),
                &[Paragraph::new(TextStyle::new(24, TEXT))
                    .text(subtitle)
                    .aligned(Align::Center)],
            )?;
        }
        SlideContent::Bullets(blocks) => {
            heading(&mut tree, &page.title())?;
            tree.text_box(Frame::inches(0.5, 1.0, 9.0, 4.2), &text_blocks(blocks))?;
        }
        SlideContent::Table(table) => {
            heading(&mut tree, &page.title())?;
            table_page(&mut tree, table, page, config)?;
        }
        SlideContent::TwoColumn { left, right } => {
            heading(&mut tree, &page.title())?;
            // Improvements carry three dense lists per column.
            let style = if left.len() + right.len() > 2 {
                IMPROVEMENT
            } else {
                BODY
            };
            tree.text_box(Frame::inches(0.5, 1.0, 4.3, 4.2), &column(left, style))?;
            tree.text_box(Frame::inches(5.0, 1.0, 4.5, 4.2), &column(right, style))?;
        }
    }

    if let Some(text) = &slide.footer {
        footer(&mut tree, text, config)?;
    }

    Ok(tree.finish())
}

fn heading(tree: &mut ShapeTree, title: &str) -> Result<()> {
    tree.text_box(
        Frame::inches(0.5, 0.35, 9.0, 0.6),
        &[Paragraph::new(HEADING).bold(title)],
    )
}

fn bullet(b: &Bullet, style: TextStyle) -> Paragraph {
    let paragraph = Paragraph::new(style).bulleted();
    match &b.lead {
        Some(lead) if b.text.is_empty() => paragraph.bold(lead),
        Some(lead) => paragraph.bold(lead).text(format!(" {}", b.text)),
        None => paragraph.text(&b.text),
    }
}

fn text_blocks(blocks: &[TextBlock]) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    for (index, block) in blocks.iter().enumerate() {
        if index > 0 {
            paragraphs.push(Paragraph::blank(BODY));
        }
        if let Some(title) = &block.heading {
            paragraphs.push(Paragraph::new(SUBHEADING).bold(title));
        }
        if let Some(intro) = &block.intro {
            paragraphs.push(Paragraph::new(BODY).text(intro));
        }
        paragraphs.extend(block.bullets.iter().map(|b| bullet(b, BODY)));
    }
    paragraphs
}

fn column(blocks: &[ColumnBlock], style: TextStyle) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    for (index, block) in blocks.iter().enumerate() {
        if index > 0 {
            paragraphs.push(Paragraph::blank(style));
        }
        paragraphs.push(Paragraph::new(style).bold(&block.heading));
        match block.pending() {
            Some(text) => paragraphs.push(Paragraph::new(style).italic(text)),
            None => paragraphs.extend(
                block
                    .items
                    .iter()
                    .map(|item| Paragraph::new(style).text(item).bulleted()),
            ),
        }
    }
    paragraphs
}

fn table_page(tree: &mut ShapeTree, table: &Table, page: &Page<'_>, config: &DeckConfig) -> Result<()> {
    let mut top = 1.0;
    if let Some(intro) = &table.intro {
        if !page.is_continuation() {
            tree.text_box(
                Frame::inches(0.5, top, 9.0, 0.4),
                &[Paragraph::new(BODY).text(intro)],
            )?;
        }
        top += 0.5;
    }

    let rows = table.rows.get(page.rows.clone()).unwrap_or(&[]);
    let spec = TableSpec {
        headers: &table.headers,
        rows,
        font_size: if table.headers.len() > 4 { 10 } else { 12 },
        row_height: emu(TABLE_ROW_HEIGHT),
        header_fill: config.header_fill(),
        border_color: TABLE_BORDER,
    };
    tree.table(Frame::inches(0.5, top, 9.0, TABLE_ROW_HEIGHT), &spec)
}

fn footer(tree: &mut ShapeTree, text: &str, config: &DeckConfig) -> Result<()> {
    tree.rect(Frame::inches(0.5, 5.34, 0.25, 0.08), config.accent_color())?;
    tree.text_box(
        Frame::inches(0.8, 5.28, 1.6, 0.2),
        &[Paragraph::new(FOOTER_LABEL).bold(config.footer_label())],
    )?;
    tree.text_box(
        Frame::inches(2.0, 5.28, 7.5, 0.2),
        &[Paragraph::new(FOOTER_TEXT).bold(text).aligned(Align::Right)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::paginate;
    use bid_core::{sequence, CompanyRecord};

    fn render_all(record: &CompanyRecord, config: &DeckConfig) -> Vec<String> {
        let slides = sequence(record, config);
        paginate(&slides, config.rows_per_page())
            .iter()
            .map(|page| render_page(page, config).unwrap())
            .collect()
    }

    #[test]
    fn test_footer_only_on_inner_slides() {
        let config = DeckConfig::new();
        let parts = render_all(&CompanyRecord::example(), &config);

        assert!(!parts[0].contains("EFESO UK BID"));
        assert!(!parts[13].contains("EFESO UK BID"));
        assert!(parts[1].contains("EFESO UK BID"));
        assert!(parts[1].contains("Valeo Foods © EFESO | 2"));
        assert!(parts[1].contains(r#"<a:srgbClr val="FF6B35"/>"#));
        assert!(parts[1].contains(r#"algn="r""#));
    }

    #[test]
    fn test_operations_table_rows() {
        let parts = render_all(&CompanyRecord::example(), &DeckConfig::new());
        let operations = &parts[5];

        assert_eq!(operations.matches("<a:tr ").count(), 8);
        let ireland = operations.find("Ireland").unwrap();
        let canada = operations.find("Canada").unwrap();
        assert!(ireland < canada);
        assert!(operations.contains("has a strong manufacturing and distribution footprint:"));
    }

    #[test]
    fn test_placeholder_rendered_italic() {
        let mut record = CompanyRecord::example();
        record.analysis.during_meeting.dissatisfaction.clear();
        let config = DeckConfig::new();
        let parts = render_all(&record, &config);

        assert!(parts[11].contains(config.pending_placeholder()));
        assert!(parts[11].contains(r#"i="1""#));
        assert!(!parts[10].contains(config.pending_placeholder()));
    }

    #[test]
    fn test_improvements_columns() {
        let parts = render_all(&CompanyRecord::example(), &DeckConfig::new());
        let improvements = &parts[9];
        for heading in [
            "Cost Reduction",
            "Portfolio Optimization",
            "Pricing &amp; Revenue",
            "Innovation &amp; Brand Investment",
            "Integration Discipline",
        ] {
            assert!(improvements.contains(heading), "{}", heading);
        }
        assert!(improvements.contains(r#"sz="800""#));
    }

    #[test]
    fn test_continuation_repeats_header() {
        let mut record = CompanyRecord::example();
        record.competitors = record
            .competitors
            .iter()
            .cloned()
            .cycle()
            .take(record.competitors.len() * 3)
            .collect();
        let config = DeckConfig::new().with_rows_per_page(10);
        let parts = render_all(&record, &config);

        assert_eq!(parts.len(), 15);
        let first = &parts[7];
        let second = &parts[8];
        assert_eq!(first.matches("<a:tr ").count(), 11);
        assert_eq!(second.matches("<a:tr ").count(), 9);
        assert!(second.contains("Competitors (cont.)"));
        assert!(second.contains(">Competitor<"));
        assert!(second.contains("Valeo Foods © EFESO | 8"));
    }
}
