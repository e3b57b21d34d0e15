//! View preferences model
//!
//! The persisted preferences tree: sidebar layout state plus per-table sort
//! and column-visibility settings for the admin screens. The tree is stored
//! as one JSON record; top-level sections this build does not model are
//! captured verbatim so an older build never destroys newer state.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::columns;

/// Complete view preferences tree, the sole persisted entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Sidebar layout state
    #[serde(default)]
    pub sidebar: SidebarPrefs,

    /// Per-table view settings for the admin screens
    #[serde(default)]
    pub admin_tables: AdminTablePrefs,

    /// Top-level sections unknown to this build, preserved across
    /// load/merge/store cycles.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sidebar layout state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarPrefs {
    /// Whether the navigation sidebar is collapsed
    #[serde(default)]
    pub collapsed: bool,
}

/// View settings for both admin tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminTablePrefs {
    /// Reflections table settings
    #[serde(default = "TablePrefs::reflections_default")]
    pub reflections: TablePrefs,

    /// Users table settings
    #[serde(default = "TablePrefs::users_default")]
    pub users: TablePrefs,
}

/// Sort and column-visibility settings for a single admin table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePrefs {
    /// Current sort column and direction
    pub sort_config: SortConfig,

    /// Columns currently shown, ordered as a subsequence of the table's
    /// canonical column order
    pub visible_columns: Vec<String>,
}

/// A table's current sort column and direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortConfig {
    /// Column name the table is sorted by
    pub key: String,

    /// Sort direction
    pub direction: SortDirection,
}

/// Sort direction for an admin table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Which admin table an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminTable {
    Reflections,
    Users,
}

/// Default view preference values
pub mod defaults {
    use super::SortDirection;

    /// Default sidebar collapsed state
    pub const SIDEBAR_COLLAPSED: bool = false;

    /// Default sort column for the reflections table
    pub const REFLECTIONS_SORT_KEY: &str = "Date";

    /// Default sort direction for the reflections table
    pub const REFLECTIONS_SORT_DIRECTION: SortDirection = SortDirection::Descending;

    /// Default sort column for the users table
    pub const USERS_SORT_KEY: &str = "Zoom Name";

    /// Default sort direction for the users table
    pub const USERS_SORT_DIRECTION: SortDirection = SortDirection::Ascending;
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            sidebar: SidebarPrefs::default(),
            admin_tables: AdminTablePrefs::default(),
            extra: Map::new(),
        }
    }
}

impl Default for SidebarPrefs {
    fn default() -> Self {
        Self {
            collapsed: defaults::SIDEBAR_COLLAPSED,
        }
    }
}

impl Default for AdminTablePrefs {
    fn default() -> Self {
        Self {
            reflections: TablePrefs::reflections_default(),
            users: TablePrefs::users_default(),
        }
    }
}

impl TablePrefs {
    /// Documented defaults for the reflections table.
    pub fn reflections_default() -> Self {
        Self {
            sort_config: SortConfig {
                key: defaults::REFLECTIONS_SORT_KEY.to_string(),
                direction: defaults::REFLECTIONS_SORT_DIRECTION,
            },
            visible_columns: all_columns(columns::REFLECTION_COLUMNS),
        }
    }

    /// Documented defaults for the users table.
    pub fn users_default() -> Self {
        Self {
            sort_config: SortConfig {
                key: defaults::USERS_SORT_KEY.to_string(),
                direction: defaults::USERS_SORT_DIRECTION,
            },
            visible_columns: all_columns(columns::USER_COLUMNS),
        }
    }
}

fn all_columns(canonical: &[&str]) -> Vec<String> {
    canonical.iter().map(|c| (*c).to_string()).collect()
}

impl SortConfig {
    /// Header-click rule: requesting the current sort key flips the
    /// direction, requesting a new key sorts that key ascending.
    #[must_use]
    pub fn toggled(&self, key: &str) -> Self {
        if self.key == key {
            Self {
                key: self.key.clone(),
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                key: key.to_string(),
                direction: SortDirection::Ascending,
            }
        }
    }
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl AdminTable {
    /// Canonical column order for this table.
    #[must_use]
    pub const fn canonical_columns(self) -> &'static [&'static str] {
        match self {
            Self::Reflections => columns::REFLECTION_COLUMNS,
            Self::Users => columns::USER_COLUMNS,
        }
    }
}

impl Preferences {
    /// Settings of the given admin table.
    #[must_use]
    pub const fn table(&self, table: AdminTable) -> &TablePrefs {
        match table {
            AdminTable::Reflections => &self.admin_tables.reflections,
            AdminTable::Users => &self.admin_tables.users,
        }
    }

    /// Mutable settings of the given admin table.
    pub const fn table_mut(&mut self, table: AdminTable) -> &mut TablePrefs {
        match table {
            AdminTable::Reflections => &mut self.admin_tables.reflections,
            AdminTable::Users => &mut self.admin_tables.users,
        }
    }
}

/// Shallow-merge `overrides` over `base`, top level only.
///
/// Override keys replace base keys wholesale; base keys absent from the
/// overrides are retained, including keys the model does not know about.
pub fn shallow_merge(
    base: &Preferences,
    overrides: Map<String, Value>,
) -> serde_json::Result<Preferences> {
    let Value::Object(mut merged) = serde_json::to_value(base)? else {
        return Err(serde_json::Error::custom(
            "preferences did not serialize to a JSON object",
        ));
    };
    for (key, value) in overrides {
        merged.insert(key, value);
    }
    serde_json::from_value(Value::Object(merged))
}

/// Shallow-merge a stored record over the documented defaults.
///
/// Sections missing from the stored record come out with their defaults, so
/// a record written before a new section existed still loads completely.
pub fn merge_over_defaults(stored: Value) -> serde_json::Result<Preferences> {
    let Value::Object(overrides) = stored else {
        return Err(serde_json::Error::custom(
            "stored preferences record is not a JSON object",
        ));
    };
    shallow_merge(&Preferences::default(), overrides)
}
