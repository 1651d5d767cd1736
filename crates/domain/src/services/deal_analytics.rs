//! Deal analytics - read-only summaries over a deal snapshot
//!
//! Every function takes the complete collection; results are recomputed on
//! each call and never cached.

use crate::entities::Deal;
use crate::value_objects::DealStage;
use crate::Amount;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Window used by recency views when the caller has no preference
pub const DEFAULT_RECENT_DAYS: u32 = 30;

/// Row count of leaderboards when the caller has no preference
pub const DEFAULT_TOP_LIMIT: usize = 5;

/// Label for contacts whose first deal names no company
pub const NO_COMPANY: &str = "No company";

/// Deal totals per person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPerformance {
    pub name: String,
    pub company: String,
    pub total_value: Amount,
    pub deal_count: usize,
}

/// Opportunity totals per organisation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPerformance {
    pub company: String,
    pub opportunity_count: usize,
    pub total_value: Amount,
}

/// Deals in exactly this stage, in source order; unset stages never match
pub fn filter_by_stage<'a>(deals: &'a [Deal], stage: &DealStage) -> Vec<&'a Deal> {
    deals
        .iter()
        .filter(|deal| deal.stage.as_ref() == Some(stage))
        .collect()
}

pub fn total_value(deals: &[Deal]) -> Amount {
    deals.iter().map(|deal| deal.value).sum()
}

pub fn value_by_stage(deals: &[Deal], stage: &DealStage) -> Amount {
    filter_by_stage(deals, stage)
        .into_iter()
        .map(|deal| deal.value)
        .sum()
}

/// Share of closed deals as a whole percentage, 0 for an empty snapshot
pub fn win_rate(deals: &[Deal]) -> u8 {
    if deals.is_empty() {
        return 0;
    }
    let closed = deals
        .iter()
        .filter(|deal| deal.stage == Some(DealStage::Closed))
        .count();
    // f64::round rounds half away from zero
    ((closed as f64 / deals.len() as f64) * 100.0).round() as u8
}

/// Deals whose effective date is on or after `now - days`
///
/// Deals with neither `createdAt` nor `stageUpdatedAt` never qualify.
pub fn recent_deals<'a>(deals: &'a [Deal], days: u32, now: DateTime<Utc>) -> Vec<&'a Deal> {
    let cutoff = now - Duration::days(i64::from(days));
    deals
        .iter()
        .filter(|deal| deal.effective_date().is_some_and(|date| date >= cutoff))
        .collect()
}

/// Deal count per canonical stage, in pipeline order
pub fn pipeline_counts(deals: &[Deal]) -> [usize; 5] {
    let mut counts = [0usize; 5];
    for deal in deals {
        if let Some(index) = deal.stage.as_ref().and_then(DealStage::pipeline_index) {
            counts[index] += 1;
        }
    }
    counts
}

/// People ranked by summed deal value
///
/// Ties keep the order in which the people first appear.
pub fn top_contacts_by_value(deals: &[Deal], limit: usize) -> Vec<ContactPerformance> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<ContactPerformance> = Vec::new();

    for deal in deals {
        let Some(name) = deal.contact_label() else {
            continue;
        };
        let slot = *index.entry(name).or_insert_with(|| {
            rows.push(ContactPerformance {
                name: name.to_string(),
                company: deal
                    .company_name
                    .clone()
                    .unwrap_or_else(|| NO_COMPANY.to_string()),
                total_value: 0.0,
                deal_count: 0,
            });
            rows.len() - 1
        });
        rows[slot].total_value += deal.value;
        rows[slot].deal_count += 1;
    }

    // sort_by is stable
    rows.sort_by(|a, b| b.total_value.total_cmp(&a.total_value));
    rows.truncate(limit);
    rows
}

/// Organisations ranked by number of deals
///
/// Ties keep the order in which the organisations first appear.
pub fn top_companies_by_opportunities(deals: &[Deal], limit: usize) -> Vec<CompanyPerformance> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<CompanyPerformance> = Vec::new();

    for deal in deals {
        let Some(company) = deal.company_name.as_deref() else {
            continue;
        };
        let slot = *index.entry(company).or_insert_with(|| {
            rows.push(CompanyPerformance {
                company: company.to_string(),
                opportunity_count: 0,
                total_value: 0.0,
            });
            rows.len() - 1
        });
        rows[slot].opportunity_count += 1;
        rows[slot].total_value += deal.value;
    }

    rows.sort_by(|a, b| b.opportunity_count.cmp(&a.opportunity_count));
    rows.truncate(limit);
    rows
}
