use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Symbolic icon attached to a category, mapped to a glyph by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    User,
    Package,
    Activity,
    Stethoscope,
    Bed,
    Check,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::User => "◉",
            Icon::Package => "▣",
            Icon::Activity => "✚",
            Icon::Stethoscope => "♥",
            Icon::Bed => "▭",
            Icon::Check => "✔",
        }
    }
}

/// Role a category plays in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    /// Plate and operator entry, always the first step
    Identification,
    /// A group of checklist items
    Equipment,
    /// Summary and submission, always the last step
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: Icon,
    pub kind: CategoryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: &'static str,
    pub label: &'static str,
    pub category: &'static str,
}

/// Readiness flag of a single item. Serialized as `"C"` / `"NC"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemStatus {
    #[default]
    #[serde(rename = "C")]
    Conforming,
    #[serde(rename = "NC")]
    NonConforming,
}

impl ItemStatus {
    pub fn code(self) -> &'static str {
        match self {
            ItemStatus::Conforming => "C",
            ItemStatus::NonConforming => "NC",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ItemStatus::Conforming => ItemStatus::NonConforming,
            ItemStatus::NonConforming => ItemStatus::Conforming,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemResponse {
    pub status: ItemStatus,
    pub note: String,
}

/// The data collected by one pass through the wizard.
///
/// `responses` holds exactly one entry per catalog item for the whole life of
/// the record. Setters addressed to an unknown id return `false` and leave the
/// map untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardRecord {
    pub vehicle_plate: String,
    pub operator_name: String,
    responses: HashMap<&'static str, ItemResponse>,
}

impl WizardRecord {
    /// Builds a record with every item conforming and an empty note.
    pub fn new<'a>(items: impl IntoIterator<Item = &'a ChecklistItem>) -> Self {
        Self {
            vehicle_plate: String::new(),
            operator_name: String::new(),
            responses: items
                .into_iter()
                .map(|item| (item.id, ItemResponse::default()))
                .collect(),
        }
    }

    /// Stores the plate upper-cased, the way it is shown on the vehicle.
    pub fn set_vehicle_plate(&mut self, plate: &str) {
        self.vehicle_plate = plate.to_uppercase();
    }

    pub fn set_operator_name(&mut self, name: &str) {
        self.operator_name = name.to_string();
    }

    pub fn has_identification(&self) -> bool {
        !self.vehicle_plate.is_empty() && !self.operator_name.is_empty()
    }

    pub fn response(&self, item_id: &str) -> Option<&ItemResponse> {
        self.responses.get(item_id)
    }

    pub fn responses(&self) -> &HashMap<&'static str, ItemResponse> {
        &self.responses
    }

    pub fn set_status(&mut self, item_id: &str, status: ItemStatus) -> bool {
        match self.responses.get_mut(item_id) {
            Some(response) => {
                response.status = status;
                true
            }
            None => false,
        }
    }

    pub fn set_note(&mut self, item_id: &str, note: &str) -> bool {
        match self.responses.get_mut(item_id) {
            Some(response) => {
                response.note = note.to_string();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEMS: [ChecklistItem; 2] = [
        ChecklistItem { id: "a", label: "Alpha", category: "X" },
        ChecklistItem { id: "b", label: "Beta", category: "X" },
    ];

    #[test]
    fn test_status_codes() {
        assert_eq!(ItemStatus::Conforming.code(), "C");
        assert_eq!(ItemStatus::NonConforming.code(), "NC");
        assert_eq!(serde_json::to_string(&ItemStatus::NonConforming).unwrap(), "\"NC\"");
        assert_eq!(ItemStatus::Conforming.toggled(), ItemStatus::NonConforming);
        assert_eq!(ItemStatus::NonConforming.toggled(), ItemStatus::Conforming);
    }

    #[test]
    fn test_new_record_defaults() {
        let record = WizardRecord::new(&ITEMS);
        assert!(record.vehicle_plate.is_empty());
        assert!(record.operator_name.is_empty());
        assert_eq!(record.responses().len(), 2);
        assert_eq!(record.response("a"), Some(&ItemResponse::default()));
    }

    #[test]
    fn test_plate_is_uppercased() {
        let mut record = WizardRecord::new(&ITEMS);
        record.set_vehicle_plate("abc-1234");
        assert_eq!(record.vehicle_plate, "ABC-1234");
    }

    #[test]
    fn test_unknown_item_is_never_inserted() {
        let mut record = WizardRecord::new(&ITEMS);
        assert!(!record.set_status("zzz", ItemStatus::NonConforming));
        assert!(!record.set_note("zzz", "missing"));
        assert_eq!(record.responses().len(), 2);
        assert!(record.response("zzz").is_none());
    }

    #[test]
    fn test_note_is_stored_verbatim() {
        let mut record = WizardRecord::new(&ITEMS);
        assert!(record.set_note("b", "  vencido em 03/2026  "));
        assert_eq!(record.response("b").unwrap().note, "  vencido em 03/2026  ");
        assert_eq!(record.response("b").unwrap().status, ItemStatus::Conforming);
    }

    #[test]
    fn test_identification_requires_both_fields() {
        let mut record = WizardRecord::new(&ITEMS);
        record.set_vehicle_plate("ABC");
        assert!(!record.has_identification());
        record.set_operator_name("Jane");
        assert!(record.has_identification());
    }
}
