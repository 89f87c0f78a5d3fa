//! Result types produced by availability conditions.
//!
//! A condition's outputs are pure data: the chain and the HTTP layer decide
//! what to do with them. Nothing in here is persisted; verdicts are produced
//! fresh on every evaluation.

use serde::{Deserialize, Serialize};

/// Which interstitial page, if any, a condition wants shown before the
/// booking completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrePageKind {
    None,
    /// Informational page ahead of the booking flow (e.g. a policy text)
    PreBook,
    /// The booking page itself (description plus the commit control)
    Book,
    /// Confirmation page after the booking step
    PostBook,
}

/// Which kind of call-to-action control the UI should render for a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonKind {
    /// Nothing actionable
    None,
    /// A real button that triggers or forwards an action
    Action,
    /// A status alert that may still carry a link
    Alert,
    /// A plain alert with no action attached
    AlertOnly,
}

/// One condition's answer for one (settings, user) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub condition_id: i32,
    pub available: bool,
    pub description: String,
    pub pre_page: PrePageKind,
    pub button: ButtonKind,
}

/// SQL fragments a condition contributes to bulk list queries, used to hide
/// rows entirely rather than merely block booking. Most conditions return
/// the empty default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SqlFragments {
    pub select: String,
    pub join: String,
    pub where_clause: String,
    pub params: Vec<serde_json::Value>,
    pub order: String,
}

impl SqlFragments {
    pub fn is_empty(&self) -> bool {
        self.select.is_empty()
            && self.join.is_empty()
            && self.where_clause.is_empty()
            && self.params.is_empty()
            && self.order.is_empty()
    }

    /// Append another contribution. WHERE clauses are AND-combined.
    pub fn merge(&mut self, other: SqlFragments) {
        if !other.select.is_empty() {
            if !self.select.is_empty() {
                self.select.push_str(", ");
            }
            self.select.push_str(&other.select);
        }
        if !other.join.is_empty() {
            if !self.join.is_empty() {
                self.join.push(' ');
            }
            self.join.push_str(&other.join);
        }
        if !other.where_clause.is_empty() {
            if !self.where_clause.is_empty() {
                self.where_clause.push_str(" AND ");
            }
            self.where_clause.push_str(&other.where_clause);
        }
        self.params.extend(other.params);
        if self.order.is_empty() {
            self.order = other.order;
        }
    }
}

/// Rendered call-to-action control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonPayload {
    pub label: String,
    pub style: String,
    pub url: Option<String>,
    pub fullwidth: bool,
}

/// Rendered interstitial page content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PagePayload {
    /// Template names the frontend stitches together
    pub templates: Vec<String>,
    /// One data object per template
    pub data: Vec<serde_json::Value>,
    /// Disable the continue control until the page is acted on
    pub continue_disabled: bool,
}

impl PagePayload {
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_fragments_merge() {
        let mut base = SqlFragments {
            where_clause: "a = 1".to_string(),
            ..Default::default()
        };
        base.merge(SqlFragments {
            join: "JOIN x ON x.id = y.id".to_string(),
            where_clause: "b = 2".to_string(),
            params: vec![serde_json::json!(2)],
            ..Default::default()
        });
        assert_eq!(base.where_clause, "a = 1 AND b = 2");
        assert_eq!(base.join, "JOIN x ON x.id = y.id");
        assert_eq!(base.params.len(), 1);
    }

    #[test]
    fn test_empty_fragments() {
        assert!(SqlFragments::default().is_empty());
        assert!(PagePayload::default().is_empty());
    }
}
