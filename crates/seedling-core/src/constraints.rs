use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Referential action applied to dependent rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferentialAction {
    Cascade,
    SetNull,
    Restrict,
}

impl ReferentialAction {
    /// Parse an action name, ignoring ASCII case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "CASCADE" => Some(ReferentialAction::Cascade),
            "SET NULL" => Some(ReferentialAction::SetNull),
            "RESTRICT" => Some(ReferentialAction::Restrict),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::Restrict => "RESTRICT",
        }
    }
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column-level foreign key reference.
///
/// Actions are kept as written so errors can echo the original casing; use
/// [`ForeignKey::on_delete_action`] and [`ForeignKey::on_update_action`] for
/// the typed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ForeignKey {
    /// Referenced table name.
    #[serde(default)]
    pub table: String,
    /// Referenced column name (not verified against the target table).
    #[serde(default)]
    pub column: String,
    #[serde(default)]
    pub on_delete: String,
    #[serde(default)]
    pub on_update: String,
}

impl ForeignKey {
    pub fn on_delete_action(&self) -> Option<ReferentialAction> {
        ReferentialAction::parse(&self.on_delete)
    }

    pub fn on_update_action(&self) -> Option<ReferentialAction> {
        ReferentialAction::parse(&self.on_update)
    }
}
