//! Typed access to record fields and partially-filled records.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::schema::{FieldPath, Section, Shape};
use crate::types::{CompanyRecord, Item};

/// A decoded value for one [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    /// Entries as cells in declared sub-field order.
    Items(Vec<Vec<String>>),
}

impl FieldValue {
    /// The empty value for a shape.
    pub fn empty(shape: Shape) -> Self {
        match shape {
            Shape::Scalar => FieldValue::Text(String::new()),
            Shape::ListOfScalar => FieldValue::List(Vec::new()),
            Shape::ListOfObject(_) => FieldValue::Items(Vec::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Items(items) => items.is_empty(),
        }
    }

    fn fits(&self, shape: Shape) -> bool {
        matches!(
            (self, shape),
            (FieldValue::Text(_), Shape::Scalar)
                | (FieldValue::List(_), Shape::ListOfScalar)
                | (FieldValue::Items(_), Shape::ListOfObject(_))
        )
    }
}

fn items_to_cells<T: Item>(items: &[T]) -> Vec<Vec<String>> {
    items.iter().map(Item::cells).collect()
}

fn items_from_cells<T: Item>(rows: &[Vec<String>]) -> Vec<T> {
    rows.iter().map(|cells| T::from_cells(cells)).collect()
}

impl FieldPath {
    fn text_mut(self, record: &mut CompanyRecord) -> Option<&mut String> {
        let slot = match self {
            FieldPath::CompanyName => &mut record.company_name,
            FieldPath::Date => &mut record.date,
            FieldPath::OverviewDescription => &mut record.overview.description,
            FieldPath::OverviewFounded => &mut record.overview.founded,
            FieldPath::OverviewOwnership => &mut record.overview.ownership,
            FieldPath::OverviewEmployees => &mut record.overview.employees,
            FieldPath::OverviewReach => &mut record.overview.reach,
            FieldPath::OverviewBusinessModel => &mut record.overview.business_model,
            FieldPath::OwnershipCurrentOwner => &mut record.ownership.current_owner,
            FieldPath::OwnershipAcquisitionDetails => &mut record.ownership.acquisition_details,
            FieldPath::OwnershipPreviousOwner => &mut record.ownership.previous_owner,
            FieldPath::OwnershipManagementContinuity => &mut record.ownership.management_continuity,
            FieldPath::ProfitabilityAnnualRevenue => &mut record.profitability.annual_revenue,
            FieldPath::ProfitabilityOperatingProfit => &mut record.profitability.operating_profit,
            FieldPath::ProfitabilityNetProfit => &mut record.profitability.net_profit,
            FieldPath::ProfitabilityOperatingMargin => &mut record.profitability.operating_margin,
            FieldPath::ProfitabilityNetMargin => &mut record.profitability.net_margin,
            _ => return None,
        };
        Some(slot)
    }

    fn list_mut(self, record: &mut CompanyRecord) -> Option<&mut Vec<String>> {
        let slot = match self {
            FieldPath::GovernanceBodies => &mut record.governance.bodies,
            FieldPath::ImprovementsCostReduction => &mut record.improvements.cost_reduction,
            FieldPath::ImprovementsPortfolioOptimization => {
                &mut record.improvements.portfolio_optimization
            }
            FieldPath::ImprovementsPricingRevenue => &mut record.improvements.pricing_revenue,
            FieldPath::ImprovementsInnovation => &mut record.improvements.innovation,
            FieldPath::ImprovementsIntegrationDiscipline => {
                &mut record.improvements.integration_discipline
            }
            FieldPath::AnalysisPreMeetingDissatisfaction => {
                &mut record.analysis.pre_meeting.dissatisfaction
            }
            FieldPath::AnalysisPreMeetingLevers => &mut record.analysis.pre_meeting.levers,
            FieldPath::AnalysisDuringMeetingDissatisfaction => {
                &mut record.analysis.during_meeting.dissatisfaction
            }
            FieldPath::AnalysisDuringMeetingLevers => &mut record.analysis.during_meeting.levers,
            _ => return None,
        };
        Some(slot)
    }

    fn text(self, record: &CompanyRecord) -> Option<&str> {
        let text = match self {
            FieldPath::CompanyName => &record.company_name,
            FieldPath::Date => &record.date,
            FieldPath::OverviewDescription => &record.overview.description,
            FieldPath::OverviewFounded => &record.overview.founded,
            FieldPath::OverviewOwnership => &record.overview.ownership,
            FieldPath::OverviewEmployees => &record.overview.employees,
            FieldPath::OverviewReach => &record.overview.reach,
            FieldPath::OverviewBusinessModel => &record.overview.business_model,
            FieldPath::OwnershipCurrentOwner => &record.ownership.current_owner,
            FieldPath::OwnershipAcquisitionDetails => &record.ownership.acquisition_details,
            FieldPath::OwnershipPreviousOwner => &record.ownership.previous_owner,
            FieldPath::OwnershipManagementContinuity => &record.ownership.management_continuity,
            FieldPath::ProfitabilityAnnualRevenue => &record.profitability.annual_revenue,
            FieldPath::ProfitabilityOperatingProfit => &record.profitability.operating_profit,
            FieldPath::ProfitabilityNetProfit => &record.profitability.net_profit,
            FieldPath::ProfitabilityOperatingMargin => &record.profitability.operating_margin,
            FieldPath::ProfitabilityNetMargin => &record.profitability.net_margin,
            _ => return None,
        };
        Some(text.as_str())
    }

    fn list(self, record: &CompanyRecord) -> Option<&[String]> {
        let list = match self {
            FieldPath::GovernanceBodies => &record.governance.bodies,
            FieldPath::ImprovementsCostReduction => &record.improvements.cost_reduction,
            FieldPath::ImprovementsPortfolioOptimization => {
                &record.improvements.portfolio_optimization
            }
            FieldPath::ImprovementsPricingRevenue => &record.improvements.pricing_revenue,
            FieldPath::ImprovementsInnovation => &record.improvements.innovation,
            FieldPath::ImprovementsIntegrationDiscipline => {
                &record.improvements.integration_discipline
            }
            FieldPath::AnalysisPreMeetingDissatisfaction => {
                &record.analysis.pre_meeting.dissatisfaction
            }
            FieldPath::AnalysisPreMeetingLevers => &record.analysis.pre_meeting.levers,
            FieldPath::AnalysisDuringMeetingDissatisfaction => {
                &record.analysis.during_meeting.dissatisfaction
            }
            FieldPath::AnalysisDuringMeetingLevers => &record.analysis.during_meeting.levers,
            _ => return None,
        };
        Some(list.as_slice())
    }

    /// Current value at this path.
    pub fn read(self, record: &CompanyRecord) -> FieldValue {
        if let Some(text) = self.text(record) {
            return FieldValue::Text(text.to_string());
        }
        if let Some(list) = self.list(record) {
            return FieldValue::List(list.to_vec());
        }
        let rows = match self {
            FieldPath::Leadership => items_to_cells(&record.leadership),
            FieldPath::Products => items_to_cells(&record.products),
            FieldPath::Operations => items_to_cells(&record.operations),
            FieldPath::Financials => items_to_cells(&record.financials),
            FieldPath::Competitors => items_to_cells(&record.competitors),
            FieldPath::FollowUp => items_to_cells(&record.follow_up),
            _ => Vec::new(),
        };
        FieldValue::Items(rows)
    }

    /// Replace the value at this path.
    pub fn write(self, record: &mut CompanyRecord, value: FieldValue) -> Result<()> {
        let shape = self.shape();
        if !value.fits(shape) {
            return Err(Error::ShapeMismatch {
                path: self.as_str(),
                expected: shape.describe(),
            });
        }

        match value {
            FieldValue::Text(text) => {
                if let Some(slot) = self.text_mut(record) {
                    *slot = text;
                }
            }
            FieldValue::List(items) => {
                if let Some(slot) = self.list_mut(record) {
                    *slot = items;
                }
            }
            FieldValue::Items(rows) => match self {
                FieldPath::Leadership => record.leadership = items_from_cells(&rows),
                FieldPath::Products => record.products = items_from_cells(&rows),
                FieldPath::Operations => record.operations = items_from_cells(&rows),
                FieldPath::Financials => record.financials = items_from_cells(&rows),
                FieldPath::Competitors => record.competitors = items_from_cells(&rows),
                FieldPath::FollowUp => record.follow_up = items_from_cells(&rows),
                _ => {}
            },
        }
        Ok(())
    }
}

/// A record in which only some fields carry values.
///
/// Produced by row import and by enrichment; applying it to a record
/// overwrites exactly the fields it carries and leaves the rest intact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialRecord {
    values: BTreeMap<FieldPath, FieldValue>,
}

impl PartialRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any earlier value (last write wins).
    pub fn set(&mut self, path: FieldPath, value: FieldValue) -> Result<()> {
        if !value.fits(path.shape()) {
            return Err(Error::ShapeMismatch {
                path: path.as_str(),
                expected: path.shape().describe(),
            });
        }
        self.values.insert(path, value);
        Ok(())
    }

    pub fn get(&self, path: FieldPath) -> Option<&FieldValue> {
        self.values.get(&path)
    }

    pub fn contains(&self, path: FieldPath) -> bool {
        self.values.contains_key(&path)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Paths carried, in canonical order.
    pub fn paths(&self) -> impl Iterator<Item = FieldPath> + '_ {
        self.values.keys().copied()
    }

    /// Sections with at least one carried field.
    pub fn sections(&self) -> BTreeSet<Section> {
        self.values.keys().map(|p| p.section()).collect()
    }

    /// Absorb every field of `other`, which wins on overlap.
    pub fn extend(&mut self, other: PartialRecord) {
        self.values.extend(other.values);
    }

    /// Overwrite the carried fields of `record`.
    pub fn apply_to(&self, record: &mut CompanyRecord) {
        for (path, value) in &self.values {
            // Values are shape-checked on insertion.
            if let Err(e) = path.write(record, value.clone()) {
                log::warn!("Skipping {}: {}", path.as_str(), e);
            }
        }
    }

    /// A full record holding only the carried fields.
    pub fn to_record(&self) -> CompanyRecord {
        let mut record = CompanyRecord::default();
        self.apply_to(&mut record);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Leader;

    #[test]
    fn test_read_write_every_path() {
        let mut record = CompanyRecord::default();
        for path in FieldPath::ALL {
            let value = match path.shape() {
                Shape::Scalar => FieldValue::Text(path.as_str().to_string()),
                Shape::ListOfScalar => FieldValue::List(vec![path.as_str().to_string()]),
                Shape::ListOfObject(fields) => {
                    FieldValue::Items(vec![fields.iter().map(|f| f.key.to_string()).collect()])
                }
            };
            path.write(&mut record, value.clone()).unwrap();
            assert_eq!(path.read(&record), value, "path {}", path.as_str());
        }
    }

    #[test]
    fn test_write_rejects_wrong_shape() {
        let mut record = CompanyRecord::default();
        let result = FieldPath::Leadership.write(&mut record, FieldValue::Text("Ann".to_string()));
        assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
        assert!(record.leadership.is_empty());
    }

    #[test]
    fn test_partial_apply_leaves_other_fields() {
        let mut record = CompanyRecord {
            company_name: "Acme".to_string(),
            ..Default::default()
        };
        record.overview.founded = "1999".to_string();

        let mut partial = PartialRecord::new();
        partial
            .set(FieldPath::OverviewDescription, FieldValue::Text("Maker".to_string()))
            .unwrap();
        partial.apply_to(&mut record);

        assert_eq!(record.company_name, "Acme");
        assert_eq!(record.overview.founded, "1999");
        assert_eq!(record.overview.description, "Maker");
    }

    #[test]
    fn test_partial_last_write_wins() {
        let mut partial = PartialRecord::new();
        partial
            .set(FieldPath::CompanyName, FieldValue::Text("First".to_string()))
            .unwrap();
        partial
            .set(FieldPath::CompanyName, FieldValue::Text("Second".to_string()))
            .unwrap();

        assert_eq!(partial.len(), 1);
        assert_eq!(partial.to_record().company_name, "Second");
    }

    #[test]
    fn test_partial_to_record_items() {
        let mut partial = PartialRecord::new();
        partial
            .set(
                FieldPath::Leadership,
                FieldValue::Items(vec![vec!["Ann".to_string(), "CEO".to_string()]]),
            )
            .unwrap();

        let record = partial.to_record();
        assert_eq!(
            record.leadership,
            vec![Leader {
                name: "Ann".to_string(),
                title: "CEO".to_string(),
                background: String::new(),
            }]
        );
        assert_eq!(
            partial.sections().into_iter().collect::<Vec<_>>(),
            vec![Section::Leadership]
        );
    }
}
