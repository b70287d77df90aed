//! Read-only projections over a [`WizardRecord`].
//!
//! Neither the review summary nor the wire payload is ever stored; both are
//! recomputed from the record on demand so the record stays the single
//! source of truth.

use super::catalog::Catalog;
use super::models::{ChecklistItem, ItemStatus, WizardRecord};
use serde::Serialize;

/// One line of the review screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry<'a> {
    pub item: &'static ChecklistItem,
    pub note: &'a str,
}

/// Record split into conforming and non-conforming items, in catalog order.
///
/// # Examples
///
/// ```
/// use ambucheck::domain::{Catalog, ItemStatus, ReviewSummary};
///
/// let catalog = Catalog::default();
/// let mut record = catalog.new_record();
/// record.set_status("tesoura", ItemStatus::NonConforming);
///
/// let summary = ReviewSummary::from_record(&catalog, &record);
/// assert_eq!(summary.non_conforming.len(), 1);
/// assert_eq!(summary.non_conforming[0].item.label, "Tesoura");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSummary<'a> {
    pub conforming: Vec<ReviewEntry<'a>>,
    pub non_conforming: Vec<ReviewEntry<'a>>,
}

impl<'a> ReviewSummary<'a> {
    pub fn from_record(catalog: &Catalog, record: &'a WizardRecord) -> Self {
        let mut conforming = Vec::new();
        let mut non_conforming = Vec::new();

        for item in catalog.items() {
            let Some(response) = record.response(item.id) else {
                continue;
            };
            let entry = ReviewEntry { item, note: response.note.as_str() };
            match response.status {
                ItemStatus::Conforming => conforming.push(entry),
                ItemStatus::NonConforming => non_conforming.push(entry),
            }
        }

        Self { conforming, non_conforming }
    }

    pub fn all_conforming(&self) -> bool {
        self.non_conforming.is_empty()
    }
}

/// JSON body posted to the spreadsheet endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    pub timestamp: String,
    #[serde(rename = "placa")]
    pub vehicle_plate: String,
    #[serde(rename = "responsavel")]
    pub operator_name: String,
    pub items: Vec<PayloadItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadItem {
    #[serde(rename = "nome")]
    pub label: String,
    #[serde(rename = "categoria")]
    pub category: String,
    pub status: ItemStatus,
    #[serde(rename = "obs")]
    pub note: String,
}

impl SubmissionPayload {
    /// Builds the payload with one item per catalog entry, in catalog order.
    pub fn build(catalog: &Catalog, record: &WizardRecord, timestamp: impl Into<String>) -> Self {
        let items = catalog
            .items()
            .iter()
            .filter_map(|item| {
                record.response(item.id).map(|response| PayloadItem {
                    label: item.label.to_string(),
                    category: item.category.to_string(),
                    status: response.status,
                    note: response.note.clone(),
                })
            })
            .collect();

        Self {
            timestamp: timestamp.into(),
            vehicle_plate: record.vehicle_plate.clone(),
            operator_name: record.operator_name.clone(),
            items,
        }
    }
}
