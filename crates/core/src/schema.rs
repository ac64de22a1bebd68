//! Question schema: which record location each importable question fills,
//! and in what shape.
//!
//! Record locations are a closed enum ([`FieldPath`]) rather than dotted
//! strings, so every mapping resolves by construction. The dotted form is
//! kept only as display metadata and for JSON navigation.

use serde_json::{json, Map, Value};

use crate::types::{Competitor, FinancialYear, FollowUpAction, Item, Leader, Operation, ProductLine};

/// Prefix of every canonical question identifier.
pub const ID_PREFIX: char = 'Q';

/// Width of the zero-padded numeric part of a canonical identifier.
pub const ID_DIGITS: usize = 3;

/// One named sub-field of a list-of-object entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubField {
    /// JSON key of the sub-field.
    pub key: &'static str,
    /// Human-readable label.
    pub label: &'static str,
}

impl SubField {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// How a field's value is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A single string.
    Scalar,
    /// An ordered sequence of free-text strings.
    ListOfScalar,
    /// An ordered sequence of entries with these sub-fields, in order.
    ListOfObject(&'static [SubField]),
}

impl Shape {
    /// Short description used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Shape::Scalar => "a single text value",
            Shape::ListOfScalar => "a list of text values",
            Shape::ListOfObject(_) => "a list of entries",
        }
    }
}

/// Top-level fields of a [`crate::CompanyRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    CompanyName,
    Date,
    Overview,
    Ownership,
    Leadership,
    Governance,
    Products,
    Operations,
    Financials,
    Competitors,
    Profitability,
    Improvements,
    Analysis,
    FollowUp,
}

impl Section {
    /// All sections in record order.
    pub const ALL: [Section; 14] = [
        Section::CompanyName,
        Section::Date,
        Section::Overview,
        Section::Ownership,
        Section::Leadership,
        Section::Governance,
        Section::Products,
        Section::Operations,
        Section::Financials,
        Section::Competitors,
        Section::Profitability,
        Section::Improvements,
        Section::Analysis,
        Section::FollowUp,
    ];

    /// Sections populated by external enrichment. Analysis and follow-up
    /// are meeting notes and are never fetched.
    pub const ENRICHABLE: [Section; 10] = [
        Section::Overview,
        Section::Ownership,
        Section::Leadership,
        Section::Governance,
        Section::Products,
        Section::Operations,
        Section::Financials,
        Section::Competitors,
        Section::Profitability,
        Section::Improvements,
    ];

    /// JSON key of the section.
    pub fn key(&self) -> &'static str {
        match self {
            Section::CompanyName => "companyName",
            Section::Date => "date",
            Section::Overview => "overview",
            Section::Ownership => "ownership",
            Section::Leadership => "leadership",
            Section::Governance => "governance",
            Section::Products => "products",
            Section::Operations => "operations",
            Section::Financials => "financials",
            Section::Competitors => "competitors",
            Section::Profitability => "profitability",
            Section::Improvements => "improvements",
            Section::Analysis => "analysis",
            Section::FollowUp => "followUp",
        }
    }

    pub fn is_enrichable(&self) -> bool {
        Self::ENRICHABLE.contains(self)
    }

    /// Every leaf path inside this section, in canonical order.
    pub fn paths(self) -> impl Iterator<Item = FieldPath> {
        FieldPath::ALL.into_iter().filter(move |p| p.section() == self)
    }

    /// JSON schema describing the value of this section, used to
    /// constrain structured responses.
    pub fn response_schema(&self) -> Value {
        let paths: Vec<FieldPath> = self.paths().collect();
        match paths.as_slice() {
            [only] if only.segments().count() == 1 => leaf_schema(only.shape()),
            _ => {
                let entries = paths
                    .iter()
                    .map(|p| (p.segments().skip(1).collect::<Vec<_>>(), leaf_schema(p.shape())))
                    .collect();
                object_schema(entries)
            }
        }
    }
}

fn leaf_schema(shape: Shape) -> Value {
    match shape {
        Shape::Scalar => json!({ "type": "string" }),
        Shape::ListOfScalar => json!({ "type": "array", "items": { "type": "string" } }),
        Shape::ListOfObject(fields) => {
            let entries = fields
                .iter()
                .map(|f| (vec![f.key], json!({ "type": "string" })))
                .collect();
            json!({ "type": "array", "items": object_schema(entries) })
        }
    }
}

/// Build a nested object schema from (relative key path, leaf schema)
/// pairs, keeping first-seen key order in `required`.
fn object_schema(entries: Vec<(Vec<&str>, Value)>) -> Value {
    let mut order: Vec<&str> = Vec::new();
    let mut grouped: Vec<(Vec<&str>, Value)> = Vec::new();
    let mut properties = Map::new();

    for (segments, leaf) in entries {
        let Some((head, tail)) = segments.split_first() else {
            continue;
        };
        if !order.contains(head) {
            order.push(head);
        }
        if tail.is_empty() {
            properties.insert(head.to_string(), leaf);
        } else {
            let mut nested = vec![*head];
            nested.extend_from_slice(tail);
            grouped.push((nested, leaf));
        }
    }

    for head in &order {
        let children: Vec<(Vec<&str>, Value)> = grouped
            .iter()
            .filter(|(segments, _)| segments[0] == *head)
            .map(|(segments, leaf)| (segments[1..].to_vec(), leaf.clone()))
            .collect();
        if !children.is_empty() {
            properties.insert(head.to_string(), object_schema(children));
        }
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": order,
    })
}

/// Every importable location in a [`crate::CompanyRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    CompanyName,
    Date,
    OverviewDescription,
    OverviewFounded,
    OverviewOwnership,
    OverviewEmployees,
    OverviewReach,
    OverviewBusinessModel,
    OwnershipCurrentOwner,
    OwnershipAcquisitionDetails,
    OwnershipPreviousOwner,
    OwnershipManagementContinuity,
    Leadership,
    Products,
    Operations,
    Financials,
    Competitors,
    ProfitabilityAnnualRevenue,
    ProfitabilityOperatingProfit,
    ProfitabilityNetProfit,
    ProfitabilityOperatingMargin,
    ProfitabilityNetMargin,
    ImprovementsCostReduction,
    ImprovementsPortfolioOptimization,
    ImprovementsPricingRevenue,
    ImprovementsInnovation,
    ImprovementsIntegrationDiscipline,
    AnalysisPreMeetingDissatisfaction,
    AnalysisPreMeetingLevers,
    AnalysisDuringMeetingDissatisfaction,
    AnalysisDuringMeetingLevers,
    FollowUp,
    GovernanceBodies,
}

impl FieldPath {
    /// All paths in canonical order.
    pub const ALL: [FieldPath; 33] = [
        FieldPath::CompanyName,
        FieldPath::Date,
        FieldPath::OverviewDescription,
        FieldPath::OverviewFounded,
        FieldPath::OverviewOwnership,
        FieldPath::OverviewEmployees,
        FieldPath::OverviewReach,
        FieldPath::OverviewBusinessModel,
        FieldPath::OwnershipCurrentOwner,
        FieldPath::OwnershipAcquisitionDetails,
        FieldPath::OwnershipPreviousOwner,
        FieldPath::OwnershipManagementContinuity,
        FieldPath::Leadership,
        FieldPath::Products,
        FieldPath::Operations,
        FieldPath::Financials,
        FieldPath::Competitors,
        FieldPath::ProfitabilityAnnualRevenue,
        FieldPath::ProfitabilityOperatingProfit,
        FieldPath::ProfitabilityNetProfit,
        FieldPath::ProfitabilityOperatingMargin,
        FieldPath::ProfitabilityNetMargin,
        FieldPath::ImprovementsCostReduction,
        FieldPath::ImprovementsPortfolioOptimization,
        FieldPath::ImprovementsPricingRevenue,
        FieldPath::ImprovementsInnovation,
        FieldPath::ImprovementsIntegrationDiscipline,
        FieldPath::AnalysisPreMeetingDissatisfaction,
        FieldPath::AnalysisPreMeetingLevers,
        FieldPath::AnalysisDuringMeetingDissatisfaction,
        FieldPath::AnalysisDuringMeetingLevers,
        FieldPath::FollowUp,
        FieldPath::GovernanceBodies,
    ];

    /// Dot-separated location in the JSON form of the record.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldPath::CompanyName => "companyName",
            FieldPath::Date => "date",
            FieldPath::OverviewDescription => "overview.description",
            FieldPath::OverviewFounded => "overview.founded",
            FieldPath::OverviewOwnership => "overview.ownership",
            FieldPath::OverviewEmployees => "overview.employees",
            FieldPath::OverviewReach => "overview.reach",
            FieldPath::OverviewBusinessModel => "overview.businessModel",
            FieldPath::OwnershipCurrentOwner => "ownership.currentOwner",
            FieldPath::OwnershipAcquisitionDetails => "ownership.acquisitionDetails",
            FieldPath::OwnershipPreviousOwner => "ownership.previousOwner",
            FieldPath::OwnershipManagementContinuity => "ownership.managementContinuity",
            FieldPath::Leadership => "leadership",
            FieldPath::Products => "products",
            FieldPath::Operations => "operations",
            FieldPath::Financials => "financials",
            FieldPath::Competitors => "competitors",
            FieldPath::ProfitabilityAnnualRevenue => "profitability.annualRevenue",
            FieldPath::ProfitabilityOperatingProfit => "profitability.operatingProfit",
            FieldPath::ProfitabilityNetProfit => "profitability.netProfit",
            FieldPath::ProfitabilityOperatingMargin => "profitability.operatingMargin",
            FieldPath::ProfitabilityNetMargin => "profitability.netMargin",
            FieldPath::ImprovementsCostReduction => "improvements.costReduction",
            FieldPath::ImprovementsPortfolioOptimization => "improvements.portfolioOptimization",
            FieldPath::ImprovementsPricingRevenue => "improvements.pricingRevenue",
            FieldPath::ImprovementsInnovation => "improvements.innovation",
            FieldPath::ImprovementsIntegrationDiscipline => "improvements.integrationDiscipline",
            FieldPath::AnalysisPreMeetingDissatisfaction => "analysis.preMeeting.dissatisfaction",
            FieldPath::AnalysisPreMeetingLevers => "analysis.preMeeting.levers",
            FieldPath::AnalysisDuringMeetingDissatisfaction => {
                "analysis.duringMeeting.dissatisfaction"
            }
            FieldPath::AnalysisDuringMeetingLevers => "analysis.duringMeeting.levers",
            FieldPath::FollowUp => "followUp",
            FieldPath::GovernanceBodies => "governance.bodies",
        }
    }

    /// Path segments, starting with the section key.
    pub fn segments(&self) -> impl Iterator<Item = &'static str> {
        self.as_str().split('.')
    }

    pub fn section(&self) -> Section {
        match self {
            FieldPath::CompanyName => Section::CompanyName,
            FieldPath::Date => Section::Date,
            FieldPath::OverviewDescription
            | FieldPath::OverviewFounded
            | FieldPath::OverviewOwnership
            | FieldPath::OverviewEmployees
            | FieldPath::OverviewReach
            | FieldPath::OverviewBusinessModel => Section::Overview,
            FieldPath::OwnershipCurrentOwner
            | FieldPath::OwnershipAcquisitionDetails
            | FieldPath::OwnershipPreviousOwner
            | FieldPath::OwnershipManagementContinuity => Section::Ownership,
            FieldPath::Leadership => Section::Leadership,
            FieldPath::GovernanceBodies => Section::Governance,
            FieldPath::Products => Section::Products,
            FieldPath::Operations => Section::Operations,
            FieldPath::Financials => Section::Financials,
            FieldPath::Competitors => Section::Competitors,
            FieldPath::ProfitabilityAnnualRevenue
            | FieldPath::ProfitabilityOperatingProfit
            | FieldPath::ProfitabilityNetProfit
            | FieldPath::ProfitabilityOperatingMargin
            | FieldPath::ProfitabilityNetMargin => Section::Profitability,
            FieldPath::ImprovementsCostReduction
            | FieldPath::ImprovementsPortfolioOptimization
            | FieldPath::ImprovementsPricingRevenue
            | FieldPath::ImprovementsInnovation
            | FieldPath::ImprovementsIntegrationDiscipline => Section::Improvements,
            FieldPath::AnalysisPreMeetingDissatisfaction
            | FieldPath::AnalysisPreMeetingLevers
            | FieldPath::AnalysisDuringMeetingDissatisfaction
            | FieldPath::AnalysisDuringMeetingLevers => Section::Analysis,
            FieldPath::FollowUp => Section::FollowUp,
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            FieldPath::Leadership => Shape::ListOfObject(Leader::FIELDS),
            FieldPath::Products => Shape::ListOfObject(ProductLine::FIELDS),
            FieldPath::Operations => Shape::ListOfObject(Operation::FIELDS),
            FieldPath::Financials => Shape::ListOfObject(FinancialYear::FIELDS),
            FieldPath::Competitors => Shape::ListOfObject(Competitor::FIELDS),
            FieldPath::FollowUp => Shape::ListOfObject(FollowUpAction::FIELDS),
            FieldPath::ImprovementsCostReduction
            | FieldPath::ImprovementsPortfolioOptimization
            | FieldPath::ImprovementsPricingRevenue
            | FieldPath::ImprovementsInnovation
            | FieldPath::ImprovementsIntegrationDiscipline
            | FieldPath::AnalysisPreMeetingDissatisfaction
            | FieldPath::AnalysisPreMeetingLevers
            | FieldPath::AnalysisDuringMeetingDissatisfaction
            | FieldPath::AnalysisDuringMeetingLevers
            | FieldPath::GovernanceBodies => Shape::ListOfScalar,
            _ => Shape::Scalar,
        }
    }
}

/// Binding of a question identifier to a record location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    /// Canonical identifier, e.g. `Q013`.
    pub id: &'static str,
    /// Question text shown in templates.
    pub question: &'static str,
    pub path: FieldPath,
}

impl FieldMapping {
    const fn new(id: &'static str, question: &'static str, path: FieldPath) -> Self {
        Self { id, question, path }
    }

    pub fn shape(&self) -> Shape {
        self.path.shape()
    }

    /// Sub-field keys for list-of-object mappings, empty otherwise.
    pub fn sub_fields(&self) -> &'static [SubField] {
        match self.shape() {
            Shape::ListOfObject(fields) => fields,
            _ => &[],
        }
    }
}

/// All mappings in canonical template order.
static MAPPINGS: [FieldMapping; 33] = [
    FieldMapping::new("Q001", "What is the company name?", FieldPath::CompanyName),
    FieldMapping::new("Q002", "What is the current date (Month YYYY)?", FieldPath::Date),
    FieldMapping::new("Q003", "Provide a company description", FieldPath::OverviewDescription),
    FieldMapping::new("Q004", "When was the company founded?", FieldPath::OverviewFounded),
    FieldMapping::new("Q005", "What is the ownership structure?", FieldPath::OverviewOwnership),
    FieldMapping::new("Q006", "How many employees does the company have?", FieldPath::OverviewEmployees),
    FieldMapping::new("Q007", "What is the company's global reach?", FieldPath::OverviewReach),
    FieldMapping::new("Q008", "What is the business model?", FieldPath::OverviewBusinessModel),
    FieldMapping::new("Q009", "Who is the current owner?", FieldPath::OwnershipCurrentOwner),
    FieldMapping::new("Q010", "What are the acquisition details?", FieldPath::OwnershipAcquisitionDetails),
    FieldMapping::new("Q011", "Who was the previous owner?", FieldPath::OwnershipPreviousOwner),
    FieldMapping::new("Q012", "What is the management continuity status?", FieldPath::OwnershipManagementContinuity),
    FieldMapping::new("Q013", "List leadership team members (Name|Title|Background)", FieldPath::Leadership),
    FieldMapping::new("Q014", "List product categories and items (Category|Items)", FieldPath::Products),
    FieldMapping::new("Q015", "List countries and facilities (Country|Facilities)", FieldPath::Operations),
    FieldMapping::new(
        "Q016",
        "List financial data (Year|Revenue|Operating Profit|Net Profit|Operating Margin|Free Cash Flow|Debt)",
        FieldPath::Financials,
    ),
    FieldMapping::new("Q017", "List competitors (Name|Focus Areas)", FieldPath::Competitors),
    FieldMapping::new("Q018", "What is the annual revenue?", FieldPath::ProfitabilityAnnualRevenue),
    FieldMapping::new("Q019", "What is the operating profit?", FieldPath::ProfitabilityOperatingProfit),
    FieldMapping::new("Q020", "What is the net profit?", FieldPath::ProfitabilityNetProfit),
    FieldMapping::new("Q021", "What is the operating margin?", FieldPath::ProfitabilityOperatingMargin),
    FieldMapping::new("Q022", "What is the net margin?", FieldPath::ProfitabilityNetMargin),
    FieldMapping::new("Q023", "List cost reduction opportunities (separate by |)", FieldPath::ImprovementsCostReduction),
    FieldMapping::new(
        "Q024",
        "List portfolio optimization opportunities (separate by |)",
        FieldPath::ImprovementsPortfolioOptimization,
    ),
    FieldMapping::new("Q025", "List pricing & revenue opportunities (separate by |)", FieldPath::ImprovementsPricingRevenue),
    FieldMapping::new("Q026", "List innovation opportunities (separate by |)", FieldPath::ImprovementsInnovation),
    FieldMapping::new(
        "Q027",
        "List integration discipline opportunities (separate by |)",
        FieldPath::ImprovementsIntegrationDiscipline,
    ),
    FieldMapping::new(
        "Q028",
        "List pre-meeting dissatisfaction elements (separate by |)",
        FieldPath::AnalysisPreMeetingDissatisfaction,
    ),
    FieldMapping::new("Q029", "List pre-meeting EFESO levers (separate by |)", FieldPath::AnalysisPreMeetingLevers),
    FieldMapping::new(
        "Q030",
        "List during-meeting dissatisfaction elements (separate by |)",
        FieldPath::AnalysisDuringMeetingDissatisfaction,
    ),
    FieldMapping::new("Q031", "List during-meeting EFESO levers (separate by |)", FieldPath::AnalysisDuringMeetingLevers),
    FieldMapping::new("Q032", "List follow-up actions (Action|Who|When|Zoho)", FieldPath::FollowUp),
    FieldMapping::new("Q033", "List governing bodies (separate by |)", FieldPath::GovernanceBodies),
];

/// All mappings in canonical template order.
pub fn mappings() -> &'static [FieldMapping] {
    &MAPPINGS
}

/// Find the mapping for a canonical identifier.
pub fn lookup(id: &str) -> Option<&'static FieldMapping> {
    let found = MAPPINGS.iter().find(|m| m.id == id);
    if found.is_none() {
        log::debug!("No field mapping for identifier '{}'", id);
    }
    found
}

/// Canonicalise a raw question identifier.
///
/// Trims and uppercases; a numeric part (with or without the prefix) is
/// zero-padded, so `1`, `Q1`, `q001` and ` Q001 ` all become `Q001`.
/// Anything else is returned trimmed and uppercased.
pub fn canonical_id(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    let digits = upper.strip_prefix(ID_PREFIX).unwrap_or(&upper);

    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(number) = digits.parse::<u32>() {
            return format!("{}{:0width$}", ID_PREFIX, number, width = ID_DIGITS);
        }
    }

    upper
}
