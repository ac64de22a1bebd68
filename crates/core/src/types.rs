//! Domain types for the company profile behind a deck.

use serde::{Deserialize, Serialize};

use crate::schema::SubField;

/// The full nested company profile.
///
/// Every nested field defaults to empty, so a record loaded from partial
/// JSON renders empty sections instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyRecord {
    pub company_name: String,
    pub date: String,
    pub overview: Overview,
    pub ownership: Ownership,
    pub leadership: Vec<Leader>,
    pub governance: Governance,
    pub products: Vec<ProductLine>,
    pub operations: Vec<Operation>,
    pub financials: Vec<FinancialYear>,
    pub competitors: Vec<Competitor>,
    pub profitability: Profitability,
    pub improvements: Improvements,
    pub analysis: Analysis,
    pub follow_up: Vec<FollowUpAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Overview {
    pub description: String,
    pub founded: String,
    pub ownership: String,
    pub employees: String,
    pub reach: String,
    pub business_model: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ownership {
    pub current_owner: String,
    pub acquisition_details: String,
    pub previous_owner: String,
    pub management_continuity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Governance {
    pub bodies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profitability {
    pub annual_revenue: String,
    pub operating_profit: String,
    pub net_profit: String,
    pub operating_margin: String,
    pub net_margin: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Improvements {
    pub cost_reduction: Vec<String>,
    pub portfolio_optimization: Vec<String>,
    pub pricing_revenue: Vec<String>,
    pub innovation: Vec<String>,
    pub integration_discipline: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Analysis {
    pub pre_meeting: MeetingAnalysis,
    pub during_meeting: MeetingAnalysis,
}

/// Dissatisfaction elements and levers noted for one meeting phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeetingAnalysis {
    pub dissatisfaction: Vec<String>,
    pub levers: Vec<String>,
}

/// An entry of a list-of-object field with a fixed, ordered set of
/// string sub-fields.
///
/// Cell access is positional in `FIELDS` order, which is also the order
/// used by delimited import values and table columns.
pub trait Item: Default {
    /// Sub-fields in declared order.
    const FIELDS: &'static [SubField];

    /// Value of the sub-field at `index`, empty when out of range.
    fn cell(&self, index: usize) -> &str;

    /// Mutable slot for the sub-field at `index`.
    fn cell_mut(&mut self, index: usize) -> Option<&mut String>;

    /// Build an item from cells in declared order. Missing trailing cells
    /// stay empty.
    fn from_cells(cells: &[String]) -> Self {
        let mut item = Self::default();
        for (index, value) in cells.iter().enumerate() {
            if let Some(slot) = item.cell_mut(index) {
                slot.clone_from(value);
            }
        }
        item
    }

    /// All cells in declared order.
    fn cells(&self) -> Vec<String> {
        (0..Self::FIELDS.len())
            .map(|i| self.cell(i).to_string())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Leader {
    pub name: String,
    pub title: String,
    pub background: String,
}

impl Item for Leader {
    const FIELDS: &'static [SubField] = &[
        SubField::new("name", "Name"),
        SubField::new("title", "Title"),
        SubField::new("background", "Background"),
    ];

    fn cell(&self, index: usize) -> &str {
        match index {
            0 => &self.name,
            1 => &self.title,
            2 => &self.background,
            _ => "",
        }
    }

    fn cell_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.title),
            2 => Some(&mut self.background),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductLine {
    pub category: String,
    pub items: String,
}

impl Item for ProductLine {
    const FIELDS: &'static [SubField] = &[
        SubField::new("category", "Category"),
        SubField::new("items", "Items"),
    ];

    fn cell(&self, index: usize) -> &str {
        match index {
            0 => &self.category,
            1 => &self.items,
            _ => "",
        }
    }

    fn cell_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.category),
            1 => Some(&mut self.items),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Operation {
    pub country: String,
    pub facilities: String,
}

impl Item for Operation {
    const FIELDS: &'static [SubField] = &[
        SubField::new("country", "Country"),
        SubField::new("facilities", "Facilities"),
    ];

    fn cell(&self, index: usize) -> &str {
        match index {
            0 => &self.country,
            1 => &self.facilities,
            _ => "",
        }
    }

    fn cell_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.country),
            1 => Some(&mut self.facilities),
            _ => None,
        }
    }
}

/// One fiscal year of headline financials. Values are free text such as
/// `€1.39 billion` or `Not disclosed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialYear {
    pub year: String,
    pub revenue: String,
    pub operating_profit: String,
    pub net_profit: String,
    pub operating_margin: String,
    pub free_cash_flow: String,
    pub debt: String,
}

impl Item for FinancialYear {
    const FIELDS: &'static [SubField] = &[
        SubField::new("year", "Year"),
        SubField::new("revenue", "Revenue"),
        SubField::new("operatingProfit", "Operating Profit"),
        SubField::new("netProfit", "Net Profit"),
        SubField::new("operatingMargin", "Operating Margin"),
        SubField::new("freeCashFlow", "Free Cash Flow"),
        SubField::new("debt", "Debt"),
    ];

    fn cell(&self, index: usize) -> &str {
        match index {
            0 => &self.year,
            1 => &self.revenue,
            2 => &self.operating_profit,
            3 => &self.net_profit,
            4 => &self.operating_margin,
            5 => &self.free_cash_flow,
            6 => &self.debt,
            _ => "",
        }
    }

    fn cell_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.year),
            1 => Some(&mut self.revenue),
            2 => Some(&mut self.operating_profit),
            3 => Some(&mut self.net_profit),
            4 => Some(&mut self.operating_margin),
            5 => Some(&mut self.free_cash_flow),
            6 => Some(&mut self.debt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Competitor {
    pub name: String,
    pub focus_areas: String,
}

impl Item for Competitor {
    const FIELDS: &'static [SubField] = &[
        SubField::new("name", "Name"),
        SubField::new("focusAreas", "Focus Areas"),
    ];

    fn cell(&self, index: usize) -> &str {
        match index {
            0 => &self.name,
            1 => &self.focus_areas,
            _ => "",
        }
    }

    fn cell_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.focus_areas),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FollowUpAction {
    pub action: String,
    pub who: String,
    pub when: String,
    pub zoho: String,
}

impl Item for FollowUpAction {
    const FIELDS: &'static [SubField] = &[
        SubField::new("action", "Action"),
        SubField::new("who", "Who"),
        SubField::new("when", "When"),
        SubField::new("zoho", "Zoho"),
    ];

    fn cell(&self, index: usize) -> &str {
        match index {
            0 => &self.action,
            1 => &self.who,
            2 => &self.when,
            3 => &self.zoho,
            _ => "",
        }
    }

    fn cell_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.action),
            1 => Some(&mut self.who),
            2 => Some(&mut self.when),
            3 => Some(&mut self.zoho),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_partial_json() {
        let json = r#"{"companyName": "Acme", "overview": {"founded": "1999"}, "leadership": [{"name": "Ann"}]}"#;
        let record: CompanyRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.company_name, "Acme");
        assert_eq!(record.overview.founded, "1999");
        assert_eq!(record.overview.description, "");
        assert_eq!(record.leadership.len(), 1);
        assert_eq!(record.leadership[0].title, "");
        assert!(record.analysis.during_meeting.levers.is_empty());
    }

    #[test]
    fn test_record_json_uses_camel_case() {
        let mut record = CompanyRecord::default();
        record.follow_up.push(FollowUpAction {
            action: "Call".to_string(),
            ..Default::default()
        });

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("followUp").is_some());
        assert!(json["analysis"].get("duringMeeting").is_some());
        assert!(json["profitability"].get("annualRevenue").is_some());
    }

    #[test]
    fn test_item_cells_in_declared_order() {
        let year = FinancialYear::from_cells(&[
            "2023".to_string(),
            "€2.1B".to_string(),
            "€180M".to_string(),
        ]);

        assert_eq!(year.year, "2023");
        assert_eq!(year.revenue, "€2.1B");
        assert_eq!(year.operating_profit, "€180M");
        assert_eq!(year.debt, "");
        assert_eq!(year.cells().len(), FinancialYear::FIELDS.len());
    }

    #[test]
    fn test_item_ignores_extra_cells() {
        let op = Operation::from_cells(&[
            "Ireland".to_string(),
            "HQ".to_string(),
            "surplus".to_string(),
        ]);
        assert_eq!(op.cells(), vec!["Ireland", "HQ"]);
    }
}
