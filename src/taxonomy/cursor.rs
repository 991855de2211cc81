use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One entry of a taxonomy level as held in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TaxonomyItem {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxonomyLevel {
    Theme,
    Niche,
    SubNiche,
}

/// Dependent levels that must be refetched after a selection change.
/// Returned by the transition methods so the clear (synchronous, already
/// done) and the fetch (asynchronous, owner's job) stay distinct,
/// order-guaranteed steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefreshPlan {
    pub niches: bool,
    pub sub_niches: bool,
}

impl RefreshPlan {
    pub fn is_empty(&self) -> bool {
        !self.niches && !self.sub_niches
    }
}

/// Selection state over the three-level taxonomy.
///
/// Invariant: `niches` always holds exactly the niches of the selected
/// theme (empty when none is selected), and `sub_niches` the sub-niches of
/// the selected niche. Changing a parent selection clears every dependent
/// level before any fetch happens; fetch results for a superseded
/// selection are discarded on apply.
#[derive(Debug, Default)]
pub struct TaxonomyCursor {
    selected_theme: Option<String>,
    selected_niche: Option<String>,
    niches: Vec<TaxonomyItem>,
    sub_niches: Vec<TaxonomyItem>,
}

impl TaxonomyCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_theme(&self) -> Option<&str> {
        self.selected_theme.as_deref()
    }

    pub fn selected_niche(&self) -> Option<&str> {
        self.selected_niche.as_deref()
    }

    pub fn niches(&self) -> &[TaxonomyItem] {
        &self.niches
    }

    pub fn sub_niches(&self) -> &[TaxonomyItem] {
        &self.sub_niches
    }

    /// Change the theme selection. Dependent selections and lists are
    /// cleared immediately; the returned plan says whether a niche fetch
    /// is due (it never is when the selection was cleared or unchanged).
    pub fn select_theme(&mut self, theme_id: Option<String>) -> RefreshPlan {
        if self.selected_theme == theme_id {
            return RefreshPlan::default();
        }
        self.selected_theme = theme_id;
        self.selected_niche = None;
        self.niches.clear();
        self.sub_niches.clear();
        RefreshPlan {
            niches: self.selected_theme.is_some(),
            sub_niches: false,
        }
    }

    /// Change the niche selection; same contract one level down.
    pub fn select_niche(&mut self, niche_id: Option<String>) -> RefreshPlan {
        if self.selected_niche == niche_id {
            return RefreshPlan::default();
        }
        self.selected_niche = niche_id;
        self.sub_niches.clear();
        RefreshPlan {
            niches: false,
            sub_niches: self.selected_niche.is_some(),
        }
    }

    /// Install a fetched niche list, unless the selection moved on while
    /// the fetch was in flight.
    pub fn apply_niches(&mut self, for_theme: &str, items: Vec<TaxonomyItem>) -> bool {
        if self.selected_theme.as_deref() != Some(for_theme) {
            return false;
        }
        self.niches = items;
        true
    }

    pub fn apply_sub_niches(&mut self, for_niche: &str, items: Vec<TaxonomyItem>) -> bool {
        if self.selected_niche.as_deref() != Some(for_niche) {
            return false;
        }
        self.sub_niches = items;
        true
    }

    /// An item was removed at `level`. If it was the current selection at
    /// that level the selection is cleared, cascading per the transition
    /// rules; either way the item leaves the in-memory list.
    pub fn item_deleted(&mut self, level: TaxonomyLevel, id: &str) -> RefreshPlan {
        match level {
            TaxonomyLevel::Theme => {
                if self.selected_theme.as_deref() == Some(id) {
                    self.select_theme(None)
                } else {
                    RefreshPlan::default()
                }
            }
            TaxonomyLevel::Niche => {
                self.niches.retain(|item| item.id != id);
                if self.selected_niche.as_deref() == Some(id) {
                    self.select_niche(None)
                } else {
                    RefreshPlan::default()
                }
            }
            TaxonomyLevel::SubNiche => {
                self.sub_niches.retain(|item| item.id != id);
                RefreshPlan::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str) -> TaxonomyItem {
        TaxonomyItem {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn selecting_theme_clears_dependents_before_fetch() {
        let mut cursor = TaxonomyCursor::new();
        let plan = cursor.select_theme(Some("t1".to_string()));
        assert!(plan.niches);
        assert!(!plan.sub_niches);
        assert!(cursor.niches().is_empty());

        assert!(cursor.apply_niches("t1", vec![item("n1", "Stoïcisme")]));
        let _ = cursor.select_niche(Some("n1".to_string()));
        assert!(cursor.apply_sub_niches("n1", vec![item("s1", "Citations")]));

        // Switching themes clears niche selection and both dependent
        // lists synchronously, whatever was selected below.
        let plan = cursor.select_theme(Some("t2".to_string()));
        assert!(plan.niches);
        assert_eq!(cursor.selected_niche(), None);
        assert!(cursor.niches().is_empty());
        assert!(cursor.sub_niches().is_empty());

        assert!(cursor.apply_niches("t2", vec![item("n2", "Absurde")]));
        assert_eq!(cursor.niches().len(), 1);
        assert!(cursor.sub_niches().is_empty());
    }

    #[test]
    fn clearing_selection_needs_no_fetch() {
        let mut cursor = TaxonomyCursor::new();
        let _ = cursor.select_theme(Some("t1".to_string()));
        let plan = cursor.select_theme(None);
        assert!(plan.is_empty());
        assert_eq!(cursor.selected_theme(), None);
    }

    #[test]
    fn reselecting_same_theme_is_a_no_op() {
        let mut cursor = TaxonomyCursor::new();
        let _ = cursor.select_theme(Some("t1".to_string()));
        assert!(cursor.apply_niches("t1", vec![item("n1", "A")]));

        let plan = cursor.select_theme(Some("t1".to_string()));
        assert!(plan.is_empty());
        assert_eq!(cursor.niches().len(), 1);
    }

    #[test]
    fn stale_fetch_results_are_discarded() {
        let mut cursor = TaxonomyCursor::new();
        let _ = cursor.select_theme(Some("t1".to_string()));
        let _ = cursor.select_theme(Some("t2".to_string()));

        // The fetch for t1 resolves late; it must not land.
        assert!(!cursor.apply_niches("t1", vec![item("n1", "A")]));
        assert!(cursor.niches().is_empty());
    }

    #[test]
    fn deleting_selected_niche_cascades() {
        let mut cursor = TaxonomyCursor::new();
        let _ = cursor.select_theme(Some("t1".to_string()));
        assert!(cursor.apply_niches("t1", vec![item("n1", "A"), item("n2", "B")]));
        let _ = cursor.select_niche(Some("n1".to_string()));
        assert!(cursor.apply_sub_niches("n1", vec![item("s1", "X")]));

        let plan = cursor.item_deleted(TaxonomyLevel::Niche, "n1");
        assert!(plan.is_empty());
        assert_eq!(cursor.selected_niche(), None);
        assert!(cursor.sub_niches().is_empty());
        assert_eq!(cursor.niches().len(), 1);
        assert_eq!(cursor.selected_theme(), Some("t1"));
    }

    #[test]
    fn deleting_unselected_item_only_drops_it_from_the_list() {
        let mut cursor = TaxonomyCursor::new();
        let _ = cursor.select_theme(Some("t1".to_string()));
        assert!(cursor.apply_niches("t1", vec![item("n1", "A"), item("n2", "B")]));
        let _ = cursor.select_niche(Some("n1".to_string()));

        let plan = cursor.item_deleted(TaxonomyLevel::Niche, "n2");
        assert!(plan.is_empty());
        assert_eq!(cursor.selected_niche(), Some("n1"));
        assert_eq!(cursor.niches().len(), 1);
    }
}
