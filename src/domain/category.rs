//! Expense category reference data.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Category from the shared catalog. Ordering of the catalog is significant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseCategory {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
}

impl ExpenseCategory {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            name: name.into(),
            icon: String::new(),
            color: String::new(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>, color: impl Into<String>) -> Self {
        self.icon = icon.into();
        self.color = color.into();
        self
    }

    pub fn icon(&self) -> CategoryIcon {
        CategoryIcon {
            id: self.id,
            code: self.code.clone(),
            name: self.name.clone(),
            icon: self.icon.clone(),
            color: self.color.clone(),
        }
    }
}

impl Identifiable for ExpenseCategory {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for ExpenseCategory {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Display metadata carried on every budget row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryIcon {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub icon: String,
    pub color: String,
}

/// Categories the user has chosen to hide from totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HiddenCategories(BTreeSet<Uuid>);

impl HiddenCategories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.0.contains(&id)
    }

    pub fn hide(&mut self, id: Uuid) -> bool {
        self.0.insert(id)
    }

    pub fn show(&mut self, id: Uuid) -> bool {
        self.0.remove(&id)
    }

    /// Flips visibility and returns whether the category is now hidden.
    pub fn toggle(&mut self, id: Uuid) -> bool {
        if !self.0.remove(&id) {
            self.0.insert(id);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Uuid> for HiddenCategories {
    fn from_iter<T: IntoIterator<Item = Uuid>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
