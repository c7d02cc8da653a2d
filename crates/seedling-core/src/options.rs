use serde::{Deserialize, Serialize};

/// How `generation_order` is checked against the declared tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderCheck {
    /// The order must list every table exactly once.
    #[default]
    Membership,
    /// Membership, plus every foreign-key target must be generated before the
    /// table referencing it and the foreign keys must not form a cycle.
    Dependencies,
}

/// Options that control how a schema description is validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    #[serde(default)]
    pub order_check: OrderCheck,
}

impl ParseOptions {
    pub fn with_order_check(order_check: OrderCheck) -> Self {
        Self { order_check }
    }
}
