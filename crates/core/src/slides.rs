//! Slide sequencing.
//!
//! [`sequence`] turns a record into the fixed list of slide descriptors.
//! The interactive [`SlideViewer`] and the document renderer both consume
//! that list, so what is stepped through on screen is what gets exported.
//!
//! Missing data never removes a slide. Empty sequences become empty
//! sections, except the during-meeting columns which show a placeholder.

use crate::config::DeckConfig;
use crate::types::{CompanyRecord, Competitor, FinancialYear, FollowUpAction, Item, Operation};

/// Number of slides in every deck.
pub const TOTAL_SLIDES: usize = 14;

/// Subtitle of the title slide.
pub const DECK_SUBTITLE: &str = "Business Intelligence Deck (BID)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideKind {
    Title,
    Bullets,
    Table,
    TwoColumn,
    Closing,
}

/// A bulleted line with an optional emphasised lead, e.g. **Current Owner:** Bain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bullet {
    pub lead: Option<String>,
    pub text: String,
}

impl Bullet {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            lead: None,
            text: text.into(),
        }
    }

    pub fn led(lead: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            lead: Some(lead.into()),
            text: text.into(),
        }
    }

    /// The line without emphasis.
    pub fn to_plain(&self) -> String {
        match &self.lead {
            Some(lead) if self.text.is_empty() => lead.clone(),
            Some(lead) => format!("{} {}", lead, self.text),
            None => self.text.clone(),
        }
    }
}

/// A run of bullets with an optional heading and lead-in sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBlock {
    pub heading: Option<String>,
    pub intro: Option<String>,
    pub bullets: Vec<Bullet>,
}

/// Tabular content. Every row has one cell per header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub intro: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A heading followed by one bullet per item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnBlock {
    pub heading: String,
    pub items: Vec<String>,
    /// Shown instead of the items when there are none.
    pub placeholder: Option<String>,
}

impl ColumnBlock {
    fn new(heading: impl Into<String>, items: &[String]) -> Self {
        Self {
            heading: heading.into(),
            items: items.to_vec(),
            placeholder: None,
        }
    }

    fn with_placeholder(mut self, text: &str) -> Self {
        self.placeholder = Some(text.to_string());
        self
    }

    /// Placeholder text, if it replaces the items.
    pub fn pending(&self) -> Option<&str> {
        match &self.placeholder {
            Some(text) if self.items.is_empty() => Some(text.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideContent {
    Title { subtitle: String, date: String },
    Bullets(Vec<TextBlock>),
    Table(Table),
    TwoColumn {
        left: Vec<ColumnBlock>,
        right: Vec<ColumnBlock>,
    },
    Closing { subtitle: String },
}

/// One slide of the deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideDescriptor {
    /// 1-based position in the deck.
    pub number: usize,
    pub title: String,
    pub content: SlideContent,
    /// Running footer text; absent on the title and closing slides.
    pub footer: Option<String>,
}

impl SlideDescriptor {
    pub fn kind(&self) -> SlideKind {
        match self.content {
            SlideContent::Title { .. } => SlideKind::Title,
            SlideContent::Bullets(_) => SlideKind::Bullets,
            SlideContent::Table(_) => SlideKind::Table,
            SlideContent::TwoColumn { .. } => SlideKind::TwoColumn,
            SlideContent::Closing { .. } => SlideKind::Closing,
        }
    }

    /// Plain-text rendering of the slide, one line per visible line.
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = vec![self.title.clone()];
        match &self.content {
            SlideContent::Title { subtitle, date } => {
                lines.push(subtitle.clone());
                lines.push(date.clone());
            }
            SlideContent::Bullets(blocks) => {
                for block in blocks {
                    lines.extend(block.heading.clone());
                    lines.extend(block.intro.clone());
                    lines.extend(block.bullets.iter().map(|b| format!("• {}", b.to_plain())));
                }
            }
            SlideContent::Table(table) => {
                lines.extend(table.intro.clone());
                lines.push(table.headers.join(" | "));
                lines.extend(table.rows.iter().map(|row| row.join(" | ")));
            }
            SlideContent::TwoColumn { left, right } => {
                for block in left.iter().chain(right) {
                    lines.push(block.heading.clone());
                    match block.pending() {
                        Some(text) => lines.push(text.to_string()),
                        None => lines.extend(block.items.iter().map(|i| format!("• {}", i))),
                    }
                }
            }
            SlideContent::Closing { subtitle } => lines.push(subtitle.clone()),
        }
        lines.extend(self.footer.clone());
        lines
    }
}

fn labelled(label: &str, value: &str) -> Option<Bullet> {
    (!value.is_empty()).then(|| Bullet::led(format!("{}:", label), value))
}

fn field_labels<T: Item>() -> Vec<String> {
    T::FIELDS.iter().map(|f| f.label.to_string()).collect()
}

fn item_table<T: Item>(intro: Option<String>, headers: Vec<String>, items: &[T]) -> Table {
    Table {
        intro,
        headers,
        rows: items.iter().map(Item::cells).collect(),
    }
}

fn overview_slide(record: &CompanyRecord) -> (String, SlideContent) {
    let o = &record.overview;
    let mut bullets: Vec<Bullet> = Vec::new();
    if !o.description.is_empty() {
        bullets.push(Bullet::plain(&o.description));
    }
    bullets.extend(
        [
            ("Founded", &o.founded),
            ("Ownership", &o.ownership),
            ("Employees", &o.employees),
            ("Reach", &o.reach),
            ("Business Model", &o.business_model),
        ]
        .into_iter()
        .filter_map(|(label, value)| labelled(label, value)),
    );

    (
        format!("Who are {}?", record.company_name),
        SlideContent::Bullets(vec![TextBlock {
            bullets,
            ..Default::default()
        }]),
    )
}

fn ownership_slide(record: &CompanyRecord) -> (String, SlideContent) {
    let o = &record.ownership;
    let bullets = [
        ("Current Owner", &o.current_owner),
        ("Acquisition Details", &o.acquisition_details),
        ("Previous Owner", &o.previous_owner),
        ("Management Continuity", &o.management_continuity),
    ]
    .into_iter()
    .filter_map(|(label, value)| labelled(label, value))
    .collect();

    (
        format!("What is {} ownership?", record.company_name),
        SlideContent::Bullets(vec![TextBlock {
            bullets,
            ..Default::default()
        }]),
    )
}

fn structure_slide(record: &CompanyRecord) -> (String, SlideContent) {
    let leaders = record
        .leadership
        .iter()
        .map(|leader| {
            let role: Vec<&str> = [leader.title.as_str(), leader.background.as_str()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect();
            let text = if role.is_empty() {
                String::new()
            } else {
                format!("– {}", role.join(", "))
            };
            Bullet::led(&leader.name, text)
        })
        .collect();

    let leadership = TextBlock {
        heading: None,
        intro: Some(format!(
            "{} is led by a Group Executive Team composed of seasoned professionals from the food and beverage industry:",
            record.company_name
        )),
        bullets: leaders,
    };
    let governance = TextBlock {
        heading: Some("Governance Structure".to_string()),
        intro: None,
        bullets: record.governance.bodies.iter().map(Bullet::plain).collect(),
    };

    (
        format!("What are {} Corporate structure?", record.company_name),
        SlideContent::Bullets(vec![leadership, governance]),
    )
}

fn products_slide(record: &CompanyRecord) -> (String, SlideContent) {
    let bullets = record
        .products
        .iter()
        .map(|p| Bullet::led(format!("{}:", p.category), &p.items))
        .collect();

    (
        format!("What do {} Make?", record.company_name),
        SlideContent::Bullets(vec![TextBlock {
            heading: None,
            intro: Some(format!(
                "{} produces a wide range of branded food and beverage products, including:",
                record.company_name
            )),
            bullets,
        }]),
    )
}

fn operations_slide(record: &CompanyRecord) -> (String, SlideContent) {
    let intro = format!(
        "{} has a strong manufacturing and distribution footprint:",
        record.company_name
    );
    (
        format!("Where do {} operate?", record.company_name),
        SlideContent::Table(item_table::<Operation>(
            Some(intro),
            field_labels::<Operation>(),
            &record.operations,
        )),
    )
}

fn profitability_table(record: &CompanyRecord) -> Table {
    let p = &record.profitability;
    let rows = [
        ("Annual Revenue", &p.annual_revenue),
        ("Operating Profit", &p.operating_profit),
        ("Net Profit", &p.net_profit),
        ("Operating Margin", &p.operating_margin),
        ("Net Margin", &p.net_margin),
    ]
    .into_iter()
    .map(|(metric, value)| vec![metric.to_string(), value.clone()])
    .collect();

    Table {
        intro: None,
        headers: vec!["Metric".to_string(), "Value".to_string()],
        rows,
    }
}

fn improvements_content(record: &CompanyRecord) -> SlideContent {
    let i = &record.improvements;
    SlideContent::TwoColumn {
        left: vec![
            ColumnBlock::new("Cost Reduction", &i.cost_reduction),
            ColumnBlock::new("Portfolio Optimization", &i.portfolio_optimization),
            ColumnBlock::new("Pricing & Revenue", &i.pricing_revenue),
        ],
        right: vec![
            ColumnBlock::new("Innovation & Brand Investment", &i.innovation),
            ColumnBlock::new("Integration Discipline", &i.integration_discipline),
        ],
    }
}

fn analysis_content(
    dissatisfaction: &[String],
    levers: &[String],
    config: &DeckConfig,
    placeholder: Option<&str>,
) -> SlideContent {
    let mut left = ColumnBlock::new("Dissatisfaction Elements", dissatisfaction);
    let mut right = ColumnBlock::new(format!("{} Levers", config.brand()), levers);
    if let Some(text) = placeholder {
        left = left.with_placeholder(text);
        right = right.with_placeholder(text);
    }
    SlideContent::TwoColumn {
        left: vec![left],
        right: vec![right],
    }
}

/// Build the slide sequence for a record.
///
/// Always returns [`TOTAL_SLIDES`] descriptors numbered 1 to
/// [`TOTAL_SLIDES`]. The record is only read.
pub fn sequence(record: &CompanyRecord, config: &DeckConfig) -> Vec<SlideDescriptor> {
    let mut competitor_headers = field_labels::<Competitor>();
    if let Some(first) = competitor_headers.first_mut() {
        *first = "Competitor".to_string();
    }
    let analysis = &record.analysis;

    let slides: [(String, SlideContent); TOTAL_SLIDES] = [
        (
            record.company_name.clone(),
            SlideContent::Title {
                subtitle: DECK_SUBTITLE.to_string(),
                date: record.date.clone(),
            },
        ),
        overview_slide(record),
        ownership_slide(record),
        structure_slide(record),
        products_slide(record),
        operations_slide(record),
        (
            "Financial Performance".to_string(),
            SlideContent::Table(item_table::<FinancialYear>(
                None,
                field_labels::<FinancialYear>(),
                &record.financials,
            )),
        ),
        (
            "Competitors".to_string(),
            SlideContent::Table(item_table(None, competitor_headers, &record.competitors)),
        ),
        (
            "Profitability".to_string(),
            SlideContent::Table(profitability_table(record)),
        ),
        (
            "Improvement Opportunities".to_string(),
            improvements_content(record),
        ),
        (
            "Pre-Meeting Analysis".to_string(),
            analysis_content(
                &analysis.pre_meeting.dissatisfaction,
                &analysis.pre_meeting.levers,
                config,
                None,
            ),
        ),
        (
            "During Meeting Analysis".to_string(),
            analysis_content(
                &analysis.during_meeting.dissatisfaction,
                &analysis.during_meeting.levers,
                config,
                Some(config.pending_placeholder()),
            ),
        ),
        (
            "Follow-up Actions".to_string(),
            SlideContent::Table(item_table::<FollowUpAction>(
                None,
                field_labels::<FollowUpAction>(),
                &record.follow_up,
            )),
        ),
        (
            "Thank You".to_string(),
            SlideContent::Closing {
                subtitle: "Questions & Discussion".to_string(),
            },
        ),
    ];

    slides
        .into_iter()
        .enumerate()
        .map(|(index, (title, content))| {
            let number = index + 1;
            let footer = match content {
                SlideContent::Title { .. } | SlideContent::Closing { .. } => None,
                _ => Some(config.footer_text(&record.company_name, number)),
            };
            log::debug!("Sequenced slide {}: {}", number, title);
            SlideDescriptor {
                number,
                title,
                content,
                footer,
            }
        })
        .collect()
}

/// Step-through state over a slide sequence. Navigation wraps around.
#[derive(Debug, Clone)]
pub struct SlideViewer {
    slides: Vec<SlideDescriptor>,
    index: usize,
}

impl SlideViewer {
    pub fn new(slides: Vec<SlideDescriptor>) -> Self {
        Self { slides, index: 0 }
    }

    /// Viewer over the sequence for `record`.
    pub fn for_record(record: &CompanyRecord, config: &DeckConfig) -> Self {
        Self::new(sequence(record, config))
    }

    /// Zero-based index of the current slide.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current(&self) -> Option<&SlideDescriptor> {
        self.slides.get(self.index)
    }

    /// Advance one slide, wrapping from the last to the first.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&SlideDescriptor> {
        if !self.slides.is_empty() {
            self.index = (self.index + 1) % self.slides.len();
        }
        self.current()
    }

    /// Go back one slide, wrapping from the first to the last.
    pub fn previous(&mut self) -> Option<&SlideDescriptor> {
        if !self.slides.is_empty() {
            self.index = (self.index + self.slides.len() - 1) % self.slides.len();
        }
        self.current()
    }

    /// "Slide N of T" for the current position.
    pub fn position(&self) -> String {
        format!("Slide {} of {}", self.index + 1, self.slides.len())
    }
}
