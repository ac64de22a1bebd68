//! Concurrent enrichment of every enrichable section.

use std::time::Duration;

use bid_core::{
    clean_financials, decode_section_json, CompanyRecord, FieldPath, FieldValue, FinancialYear,
    Item, PartialRecord, Section,
};
use futures::future::join_all;
use tokio::sync::watch;
use tokio::time::timeout;

use crate::client::{CompletionClient, FieldRequest};
use crate::config::DEFAULT_TIMEOUT;
use crate::error::{FieldFailure, Result};
use crate::prompts::prompt;

/// Outcome of one enrichment run.
#[derive(Debug, Default)]
pub struct EnrichmentReport {
    /// Merged values of every section that succeeded.
    pub record: PartialRecord,
    /// One outcome per requested section, in request order.
    pub outcomes: Vec<(Section, Result<()>)>,
}

impl EnrichmentReport {
    pub fn succeeded(&self) -> impl Iterator<Item = Section> + '_ {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_ok())
            .map(|(section, _)| *section)
    }

    pub fn failed(&self) -> impl Iterator<Item = (Section, &FieldFailure)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|(section, outcome)| outcome.as_ref().err().map(|e| (*section, e)))
    }

    /// Replace each successfully enriched section of `record`. Sections
    /// that failed keep their current values.
    pub fn apply_to(&self, record: &mut CompanyRecord) {
        self.record.apply_to(record);
    }
}

/// Fans out one request per enrichable section and merges the answers.
pub struct Enricher<C> {
    client: C,
    timeout: Duration,
}

impl<C: CompletionClient> Enricher<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enrich every section, waiting for all of them to settle.
    pub async fn enrich(&self, company: &str) -> EnrichmentReport {
        // The sender stays alive for the whole run, so nothing is cancelled.
        let (_keep, cancel) = watch::channel(false);
        self.enrich_until(company, cancel).await
    }

    /// Enrich every section until `cancel` turns `true`. Sections still in
    /// flight at that point fail with [`FieldFailure::Cancelled`]; sections
    /// already answered are kept.
    pub async fn enrich_until(
        &self,
        company: &str,
        cancel: watch::Receiver<bool>,
    ) -> EnrichmentReport {
        let requests = Section::ENRICHABLE.iter().filter_map(|&section| {
            prompt(section, company).map(|prompt| FieldRequest {
                section,
                prompt,
                schema: section.response_schema(),
            })
        });

        let results = join_all(requests.map(|request| {
            let cancel = cancel.clone();
            async move {
                let section = request.section;
                (section, self.enrich_section(request, cancel).await)
            }
        }))
        .await;

        let mut report = EnrichmentReport::default();
        for (section, result) in results {
            match result {
                Ok(partial) => {
                    report.record.extend(partial);
                    report.outcomes.push((section, Ok(())));
                }
                Err(e) => {
                    log::warn!("Enrichment of '{}' failed: {}", section.key(), e);
                    report.outcomes.push((section, Err(e)));
                }
            }
        }

        log::info!(
            "Enriched {} of {} sections for '{}'",
            report.succeeded().count(),
            report.outcomes.len(),
            company
        );
        report
    }

    async fn enrich_section(
        &self,
        request: FieldRequest,
        cancel: watch::Receiver<bool>,
    ) -> Result<PartialRecord> {
        let value = tokio::select! {
            answer = timeout(self.timeout, self.client.complete(&request)) => {
                answer.map_err(|_| FieldFailure::Timeout(self.timeout))??
            }
            _ = cancelled(cancel) => return Err(FieldFailure::Cancelled),
        };

        let mut partial = decode_section_json(request.section, &value)?;
        if request.section == Section::Financials {
            clean_financial_rows(&mut partial)?;
        }
        log::debug!("Decoded '{}' ({} fields)", request.section.key(), partial.len());
        Ok(partial)
    }
}

/// Resolves once cancellation is requested. A dropped sender never cancels.
async fn cancelled(mut cancel: watch::Receiver<bool>) {
    if cancel.wait_for(|cancelled| *cancelled).await.is_err() {
        std::future::pending::<()>().await;
    }
}

fn clean_financial_rows(partial: &mut PartialRecord) -> bid_core::Result<()> {
    let Some(FieldValue::Items(rows)) = partial.get(FieldPath::Financials) else {
        return Ok(());
    };
    let mut years: Vec<FinancialYear> = rows.iter().map(|cells| FinancialYear::from_cells(cells)).collect();
    clean_financials(&mut years);
    partial.set(
        FieldPath::Financials,
        FieldValue::Items(years.iter().map(Item::cells).collect()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    /// Answers from a fixed table; sections without an answer fail.
    struct MockClient {
        answers: HashMap<Section, Value>,
        delay: HashMap<Section, Duration>,
    }

    impl MockClient {
        fn from_record(record: &CompanyRecord) -> Self {
            let value = serde_json::to_value(record).unwrap();
            let answers = Section::ENRICHABLE
                .iter()
                .map(|s| (*s, value[s.key()].clone()))
                .collect();
            Self {
                answers,
                delay: HashMap::new(),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for MockClient {
        async fn complete(&self, request: &FieldRequest) -> Result<Value> {
            if let Some(delay) = self.delay.get(&request.section) {
                tokio::time::sleep(*delay).await;
            }
            self.answers
                .get(&request.section)
                .cloned()
                .ok_or(FieldFailure::Status {
                    status: 500,
                    message: "unavailable".to_string(),
                })
        }
    }

    fn existing() -> CompanyRecord {
        let mut record = CompanyRecord::default();
        record.company_name = "Acme".to_string();
        record.overview.description = "Existing description".to_string();
        record.governance.bodies = vec!["Existing board".to_string()];
        record.products = vec![bid_core::ProductLine {
            category: "Existing".to_string(),
            items: "Widgets".to_string(),
        }];
        record.analysis.pre_meeting.levers = vec!["Keep me".to_string()];
        record
    }

    #[tokio::test]
    async fn test_all_sections_succeed() {
        let example = CompanyRecord::example();
        let enricher = Enricher::new(MockClient::from_record(&example));
        let report = enricher.enrich("Valeo Foods").await;

        assert_eq!(report.outcomes.len(), 10);
        assert_eq!(report.failed().count(), 0);

        let mut record = existing();
        report.apply_to(&mut record);
        let mut cleaned = example.financials.clone();
        clean_financials(&mut cleaned);
        assert_eq!(record.overview, example.overview);
        assert_eq!(record.financials, cleaned);
        assert_eq!(record.financials[2].debt, "€4.18 billion (currency impact)");
        assert_eq!(record.company_name, "Acme");
        assert_eq!(record.analysis.pre_meeting.levers, vec!["Keep me".to_string()]);
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_existing_data() {
        let example = CompanyRecord::example();
        let mut client = MockClient::from_record(&example);
        for section in [Section::Overview, Section::Governance, Section::Products] {
            client.answers.remove(&section);
        }
        let report = Enricher::new(client).enrich("Valeo Foods").await;

        assert_eq!(report.succeeded().count(), 7);
        let failed: Vec<Section> = report.failed().map(|(s, _)| s).collect();
        assert_eq!(
            failed,
            vec![Section::Overview, Section::Governance, Section::Products]
        );

        let mut record = existing();
        report.apply_to(&mut record);
        assert_eq!(record.overview.description, "Existing description");
        assert_eq!(record.governance.bodies, vec!["Existing board".to_string()]);
        assert_eq!(record.products[0].category, "Existing");
        assert_eq!(record.leadership, example.leadership);
        assert_eq!(record.operations, example.operations);
        assert_eq!(record.improvements, example.improvements);
    }

    #[tokio::test]
    async fn test_financials_are_cleaned() {
        let mut client = MockClient::from_record(&CompanyRecord::example());
        client.answers.insert(
            Section::Financials,
            json!([{
                "year": "2023; fiscal year ending March",
                "revenue": "Revenue: €1.2B; estimated",
                "operatingProfit": "Operating profit: €100M",
                "netProfit": "N/A",
                "operatingMargin": "8.3%",
                "freeCashFlow": "",
                "debt": "Total debt: €400M"
            }]),
        );
        let report = Enricher::new(client).enrich("Valeo Foods").await;

        let record = report.record.to_record();
        let year = &record.financials[0];
        assert_eq!(year.year, "2023");
        assert_eq!(year.revenue, "€1.2B");
        assert_eq!(year.operating_profit, "€100M");
        assert_eq!(year.net_profit, "N/A");
        assert_eq!(year.debt, "€400M");
    }

    #[tokio::test]
    async fn test_string_answers_decode_as_text() {
        let mut client = MockClient::from_record(&CompanyRecord::example());
        client
            .answers
            .insert(Section::Governance, json!({ "bodies": "Board of Directors | Audit Committee" }));
        let report = Enricher::new(client).enrich("Valeo Foods").await;

        let record = report.record.to_record();
        assert_eq!(
            record.governance.bodies,
            vec!["Board of Directors".to_string(), "Audit Committee".to_string()]
        );
    }

    #[tokio::test]
    async fn test_wrong_shape_answer_keeps_existing_data() {
        let example = CompanyRecord::example();
        let mut client = MockClient::from_record(&example);
        client
            .answers
            .insert(Section::Financials, json!({ "note": "Not available" }));
        client.answers.insert(Section::Overview, json!(["Not available"]));
        let report = Enricher::new(client).enrich("Valeo Foods").await;

        let failed: Vec<(Section, &FieldFailure)> = report.failed().collect();
        assert_eq!(failed.len(), 2);
        assert_eq!(failed[0].0, Section::Overview);
        assert_eq!(failed[1].0, Section::Financials);
        assert!(failed.iter().all(|(_, e)| matches!(e, FieldFailure::Record(_))));
        assert_eq!(report.succeeded().count(), 8);

        let mut record = example.clone();
        record.overview.description = "Existing description".to_string();
        report.apply_to(&mut record);
        assert_eq!(record.financials, example.financials);
        assert_eq!(record.financials.len(), 3);
        assert_eq!(record.overview.description, "Existing description");
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_section_times_out() {
        let mut client = MockClient::from_record(&CompanyRecord::example());
        client
            .delay
            .insert(Section::Competitors, Duration::from_secs(120));
        let report = Enricher::new(client)
            .with_timeout(Duration::from_secs(60))
            .enrich("Valeo Foods")
            .await;

        let failed: Vec<(Section, &FieldFailure)> = report.failed().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].0, Section::Competitors);
        assert!(matches!(failed[0].1, FieldFailure::Timeout(_)));
        assert_eq!(report.succeeded().count(), 9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_pending_sections() {
        let mut client = MockClient::from_record(&CompanyRecord::example());
        for section in [Section::Financials, Section::Competitors] {
            client.delay.insert(section, Duration::from_secs(30));
        }
        let enricher = Enricher::new(client);
        let (cancel_tx, cancel_rx) = watch::channel(false);

        let cancel = async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            cancel_tx.send(true).unwrap();
        };
        let (report, ()) = tokio::join!(enricher.enrich_until("Valeo Foods", cancel_rx), cancel);

        let cancelled: Vec<Section> = report
            .failed()
            .filter(|(_, e)| matches!(e, FieldFailure::Cancelled))
            .map(|(s, _)| s)
            .collect();
        assert_eq!(cancelled, vec![Section::Financials, Section::Competitors]);
        assert_eq!(report.succeeded().count(), 8);
        assert!(!report.record.sections().contains(&Section::Financials));
    }

    #[tokio::test]
    async fn test_meeting_sections_never_requested() {
        let report = Enricher::new(MockClient::from_record(&CompanyRecord::example()))
            .enrich("Valeo Foods")
            .await;
        let sections = report.record.sections();
        assert!(!sections.contains(&Section::Analysis));
        assert!(!sections.contains(&Section::FollowUp));
    }
}
