//! The built-in ambulance checklist.
//!
//! Category order is wizard step order. The first and last categories are
//! the synthetic identification and review steps that bound the equipment
//! groups.

use super::models::{Category, CategoryKind, ChecklistItem, Icon, WizardRecord};

pub static CATEGORIES: &[Category] = &[
    Category { id: "info", label: "Início", icon: Icon::User, kind: CategoryKind::Identification },
    Category { id: "Insumos", label: "Insumos", icon: Icon::Package, kind: CategoryKind::Equipment },
    Category { id: "Imobilização", label: "Imobilização", icon: Icon::Activity, kind: CategoryKind::Equipment },
    Category { id: "Equipamentos", label: "Equipamentos", icon: Icon::Stethoscope, kind: CategoryKind::Equipment },
    Category { id: "Conforto", label: "Conforto", icon: Icon::Bed, kind: CategoryKind::Equipment },
    Category { id: "revisar", label: "Finalizar", icon: Icon::Check, kind: CategoryKind::Review },
];

pub static CHECKLIST_ITEMS: &[ChecklistItem] = &[
    ChecklistItem { id: "esparadrapo", label: "Esparadrapo", category: "Insumos" },
    ChecklistItem { id: "micropore", label: "Micropore", category: "Insumos" },
    ChecklistItem { id: "perfurocortante", label: "CX. Perfurocortante", category: "Insumos" },
    ChecklistItem { id: "colar_cervical", label: "Colar cervical (P/M/G)", category: "Imobilização" },
    ChecklistItem { id: "talas", label: "Talas imobilização", category: "Imobilização" },
    ChecklistItem { id: "maca_rigida", label: "Maca rígida", category: "Imobilização" },
    ChecklistItem { id: "cinto_aranha", label: "Cinto aranha", category: "Imobilização" },
    ChecklistItem { id: "cadeira_rodas", label: "Cadeira de rodas", category: "Imobilização" },
    ChecklistItem { id: "cilindro_o2", label: "Cilindro O2", category: "Equipamentos" },
    ChecklistItem { id: "fluxometro", label: "Fluxômetro", category: "Equipamentos" },
    ChecklistItem { id: "cateter_nasal", label: "Cateter nasal", category: "Equipamentos" },
    ChecklistItem { id: "extensor_o2", label: "Extensor O2", category: "Equipamentos" },
    ChecklistItem { id: "ambu_adulto", label: "AMBU adulto", category: "Equipamentos" },
    ChecklistItem { id: "oximetro", label: "Oxímetro", category: "Equipamentos" },
    ChecklistItem { id: "estetoscopio", label: "Estetoscópio", category: "Equipamentos" },
    ChecklistItem { id: "esfigmo", label: "Esfigmomanômetro", category: "Equipamentos" },
    ChecklistItem { id: "tesoura", label: "Tesoura", category: "Equipamentos" },
    ChecklistItem { id: "manta_termica", label: "Manta térmica", category: "Conforto" },
    ChecklistItem { id: "lencol", label: "Lençol", category: "Conforto" },
    ChecklistItem { id: "cobertor", label: "Cobertor", category: "Conforto" },
];

/// Read-only view over the categories and items that drive the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    categories: &'static [Category],
    items: &'static [ChecklistItem],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(CATEGORIES, CHECKLIST_ITEMS)
    }
}

impl Catalog {
    /// Creates a catalog from static tables.
    ///
    /// `categories` must not be empty.
    pub const fn new(categories: &'static [Category], items: &'static [ChecklistItem]) -> Self {
        Self { categories, items }
    }

    pub fn categories(&self) -> &'static [Category] {
        self.categories
    }

    pub fn items(&self) -> &'static [ChecklistItem] {
        self.items
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn category(&self, step: usize) -> Option<&'static Category> {
        self.categories.get(step)
    }

    pub fn item(&self, item_id: &str) -> Option<&'static ChecklistItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Items of one category, in catalog order.
    pub fn items_in(&self, category_id: &str) -> Vec<&'static ChecklistItem> {
        self.items.iter().filter(|item| item.category == category_id).collect()
    }

    pub fn new_record(&self) -> WizardRecord {
        WizardRecord::new(self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_shape() {
        let catalog = Catalog::default();
        assert_eq!(catalog.category_count(), 6);
        assert_eq!(catalog.items().len(), 20);
        assert_eq!(catalog.categories()[0].kind, CategoryKind::Identification);
        assert_eq!(catalog.categories()[5].kind, CategoryKind::Review);
    }

    #[test]
    fn test_item_ids_are_unique() {
        let ids: HashSet<_> = CHECKLIST_ITEMS.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), CHECKLIST_ITEMS.len());
    }

    #[test]
    fn test_every_item_belongs_to_an_equipment_category() {
        for item in CHECKLIST_ITEMS {
            let category = CATEGORIES.iter().find(|c| c.id == item.category);
            assert!(matches!(category, Some(c) if c.kind == CategoryKind::Equipment), "{}", item.id);
        }
    }

    #[test]
    fn test_items_in_follows_catalog_order() {
        let catalog = Catalog::default();
        let ids: Vec<_> = catalog.items_in("Insumos").iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["esparadrapo", "micropore", "perfurocortante"]);
        assert!(catalog.items_in("info").is_empty());
        assert!(catalog.items_in("revisar").is_empty());
    }

    #[test]
    fn test_new_record_covers_every_item() {
        let catalog = Catalog::default();
        let record = catalog.new_record();
        assert_eq!(record.responses().len(), 20);
        for item in catalog.items() {
            let response = record.response(item.id).unwrap();
            assert_eq!(response.status, crate::domain::ItemStatus::Conforming);
            assert!(response.note.is_empty());
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::default();
        assert_eq!(catalog.item("esparadrapo").map(|i| i.label), Some("Esparadrapo"));
        assert!(catalog.item("desfibrilador").is_none());
        assert!(catalog.category(6).is_none());
    }
}
