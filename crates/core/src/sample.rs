//! The example company profile a new session starts from.

use crate::types::{
    Analysis, CompanyRecord, Competitor, FinancialYear, FollowUpAction, Governance,
    Improvements, Item, Leader, MeetingAnalysis, Operation, Overview, Ownership,
    ProductLine, Profitability,
};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn items<T: Item>(rows: &[&[&str]]) -> Vec<T> {
    rows.iter().map(|cells| T::from_cells(&strings(cells))).collect()
}

impl CompanyRecord {
    /// A fully populated sample profile (Valeo Foods, August 2025).
    pub fn example() -> Self {
        CompanyRecord {
            company_name: "Valeo Foods".to_string(),
            date: "August 2025".to_string(),
            overview: Overview {
                description: "Valeo Foods is a major international food company headquartered in Dublin, Ireland".to_string(),
                founded: "2010, through the merger of Batchelors and Origin Foods".to_string(),
                ownership: "Acquired by Bain Capital in 2021".to_string(),
                employees: "Over 6,000 globally".to_string(),
                reach: "Products sold in over 100 countries".to_string(),
                business_model: "Focused on acquiring and growing heritage food brands across Europe".to_string(),
            },
            ownership: Ownership {
                current_owner: "Bain Capital Private Equity acquired Valeo Foods in May 2021 from CapVest Partners LLP for over €1.7 billion".to_string(),
                acquisition_details: "May 2021 acquisition for over €1.7 billion".to_string(),
                previous_owner: "CapVest, a private equity firm, had built Valeo Foods through strategic acquisitions and held ownership until the Bain Capital deal".to_string(),
                management_continuity: "Seamus Kearney, the Group CEO at the time of acquisition, continued to lead the business under Bain Capital's ownership".to_string(),
            },
            leadership: items::<Leader>(&[
                &["Ronald Kers", "Group Chief Executive", "with prior leadership roles at Müller Group and 2 Sisters Food Group"],
                &["Louis-François Gombert", "Chief Financial Officer", "formerly with Suntory Beverage & Food and HAVEA Group"],
                &["Eveline Paternotte", "Chief People Officer", "with HR leadership experience at PepsiCo and SABMiller"],
                &["Thibaut Eissautier", "Chief Procurement Officer", "previously at Diageo and Pladis"],
                &["Avanti Patel", "Group Head of M&A", "leading global acquisitions"],
                &["Jorg Brouwer", "Group Commercial Director", "with a background at Unilever and Nomad Foods"],
            ]),
            governance: Governance {
                bodies: strings(&[
                    "Corporate governance is overseen by:",
                    "A Board of Directors and an Executive Committee",
                    "These bodies support strategic direction and ensure transparent financial communication",
                ]),
            },
            products: items::<ProductLine>(&[
                &["Snacks & Confectionery", "Kettle Chips, Barratt sweets, Tangerine Confectionery"],
                &["Biscuits & Bakery", "Jacob's, Balconi, Melegatti (panettone, pandoro), Dolciaria Freddi"],
                &["Honey", "Rowse Honey (UK market leader)"],
                &["Canned Goods", "Batchelors (beans, peas, pulses)"],
                &["Baking Ingredients", "Odlums (flour), Shamrock (nuts, dried fruit, sugar)"],
                &["Condiments & Preserves", "Chef sauces, Fruitfield marmalade"],
                &["Mediterranean Foods", "Roma (pasta, rice, canned tomatoes)"],
                &["Hot Beverages", "Robert Roberts (coffee and tea), Lavazza (distribution partner)"],
                &["Healthy & Organic Foods", "Kelkin (cereal, snacks)"],
            ]),
            operations: items::<Operation>(&[
                &["Ireland", "HQ in Dublin, 4 manufacturing sites"],
                &["United Kingdom", "12 manufacturing & distribution sites"],
                &["Italy", "HQ in Milan, 3 manufacturing sites"],
                &["Germany", "3 manufacturing sites"],
                &["Czech Republic", "2 manufacturing sites"],
                &["Netherlands", "1 manufacturing site"],
                &["Canada", "1 manufacturing site"],
            ]),
            financials: items::<FinancialYear>(&[
                &["2023", "€1.39 billion", "€53 million (↓ from €90.6m)", "€34.4 million loss", "Not disclosed", "Not disclosed", "Not disclosed"],
                &["2024", "Not yet disclosed", "Recovery and profitability goals achieved", "Profitability restored", "Not disclosed", "€481 million after restructuring", "Net debt reduced to €3.81 billion"],
                &["2025 (H1)", "Not yet disclosed", "Operating margin: 4.5%", "Net income: €104 million", "4.5%", "€252 million after restructuring", "Net debt: €4.18 billion (currency impact)"],
            ]),
            competitors: items::<Competitor>(&[
                &["Nestlé", "Confectionery, dairy, beverages, cereals"],
                &["PepsiCo", "Snacks (Lay's, Doritos), beverages"],
                &["Danone", "Dairy, plant-based, nutrition"],
                &["Kraft Heinz", "Sauces, canned goods, snacks"],
                &["General Mills", "Cereals, baking, snacks"],
                &["Conagra Brands", "Packaged foods, frozen meals"],
            ]),
            profitability: Profitability {
                annual_revenue: "€1.39 billion (≈ $1.5 billion)".to_string(),
                operating_profit: "€31.13 million (↓ 57% YoY)".to_string(),
                net_profit: "Pre-tax loss of €41.28 million".to_string(),
                operating_margin: "~2.2%".to_string(),
                net_margin: "Negative".to_string(),
            },
            improvements: Improvements {
                cost_reduction: strings(&[
                    "Streamline manufacturing across its 27 factories to reduce duplication and overhead",
                    "Automate production and logistics where feasible",
                    "Cut administrative costs and optimize back-office functions",
                ]),
                portfolio_optimization: strings(&[
                    "Divest low-margin brands or underperforming business units",
                    "Focus on premium and high-growth categories like health snacks, plant-based foods, and gourmet products",
                    "Rationalize SKUs to reduce complexity and improve supply chain efficiency",
                ]),
                pricing_revenue: strings(&[
                    "Implement dynamic pricing strategies to respond to inflation and input cost volatility",
                    "Renegotiate supplier contracts and improve terms with retailers",
                    "Introduce value-added products that command higher margins",
                ]),
                innovation: strings(&[
                    "Invest in R&D for differentiated products with better profitability",
                    "Leverage iconic brands like Rowse Honey and Kettle Chips to expand into new markets",
                    "Enhance marketing to build pricing power and customer loyalty",
                ]),
                integration_discipline: strings(&[
                    "Ensure synergy realization from acquired companies",
                    "Avoid overpaying for targets and limit exceptional costs during integration",
                    "Focus on cultural and operational alignment to accelerate margin recovery",
                ]),
            },
            analysis: Analysis {
                pre_meeting: MeetingAnalysis {
                    dissatisfaction: strings(&["Current profitability challenges", "Integration complexity"]),
                    levers: strings(&["Portfolio optimization", "Operational efficiency"]),
                },
                during_meeting: MeetingAnalysis {
                    dissatisfaction: strings(&["To be discussed"]),
                    levers: strings(&["To be identified"]),
                },
            },
            follow_up: items::<FollowUpAction>(&[
                &["Finalize cost reduction strategy", "CFO", "End of Q3", "TBD"],
                &["Portfolio review completion", "Strategy Team", "Q4 2025", "TBD"],
            ]),
        }
    }
}
