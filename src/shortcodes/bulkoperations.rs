//! The `bulkoperations` shortcode.
//!
//! Renders the admin table over every booking option so staff can run bulk
//! edits. Honors the site-wide shortcode kill switch and requires the
//! bulk-operations capability; by default only options whose course has not
//! started yet are listed, `all=1` lifts that filter.

use std::collections::HashMap;

use crate::constants::OPTION_BULK_OPERATIONS_TABLE_ID;
use crate::error::AppResult;
use crate::lang::get_string;
use crate::models::Capability;

use super::table::{OptionBulkOperationsTable, OptionFilter};
use super::{alert, ShortcodeEnv};

/// Render the bulk-operations table markup.
pub async fn render(
    args: &HashMap<String, String>,
    env: &ShortcodeEnv<'_>,
) -> AppResult<String> {
    if env.ctx.config.shortcodes_off {
        return Ok(alert(&get_string("shortcodes_off")));
    }
    if !env.ctx.has_capability(Capability::RunBulkOperations) {
        return Ok(alert(&get_string("shortcodes_no_permission")));
    }

    let filter = OptionFilter {
        all: args
            .get("all")
            .map(|v| v == "1" || v == "true")
            .unwrap_or(false),
    };

    let fragments = env.chain.sql_filters(env.ctx);
    let table = OptionBulkOperationsTable::new(OPTION_BULK_OPERATIONS_TABLE_ID, filter, fragments);
    table.render(env.cache, env.catalog).await
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::Duration;
    use uuid::Uuid;

    use crate::availability::{ConditionChain, EvalContext, SessionState, SessionUser};
    use crate::constants::roles;
    use crate::models::{capabilities_for_role, GlobalSettings};
    use crate::shortcodes::table::{OptionBulkOperationsTable, OptionTableRow};
    use crate::shortcodes::testing::{MemoryCache, MemoryCatalog};
    use crate::shortcodes::ShortcodeEnv;
    use crate::utils::time::now_utc;

    use super::*;

    /// The six standard option configurations used across the admin suite:
    /// plain, priced, disabled, wait-for-confirmation with and without
    /// price, and cohort-restricted.
    const STANDARD_OPTIONS: [&str; 6] = [
        "noprice",
        "withprice",
        "disabledoption",
        "waitforconfirmationnoprice",
        "waitforconfirmationwithprice",
        "enrolledincohorts",
    ];

    /// 2 courses x 2 booking instances x 6 options = 24 rows.
    fn seeded_catalog() -> MemoryCatalog {
        let mut rows = Vec::new();
        for course in ["course1", "course2"] {
            for instance in 1..=2 {
                for identifier in STANDARD_OPTIONS {
                    rows.push(OptionTableRow {
                        id: Uuid::new_v4(),
                        text: format!("Test Booking Option {identifier}"),
                        identifier: identifier.to_string(),
                        instance_name: format!("{course} booking {instance}"),
                        max_answers: 1,
                        course_start_time: Some(now_utc() - Duration::days(1)),
                    });
                }
            }
        }
        MemoryCatalog { rows }
    }

    fn admin_ctx(config: GlobalSettings) -> EvalContext {
        EvalContext::new(
            SessionState::Authenticated(SessionUser {
                id: Uuid::new_v4(),
                username: "admin".to_string(),
                role: roles::ADMIN.to_string(),
            }),
            config,
        )
        .with_capabilities(capabilities_for_role(roles::ADMIN))
    }

    fn args_all() -> HashMap<String, String> {
        HashMap::from([("all".to_string(), "1".to_string())])
    }

    #[tokio::test]
    async fn test_kill_switch_returns_message_and_no_table() {
        let catalog = seeded_catalog();
        let cache = MemoryCache::default();
        let chain = ConditionChain::default();
        let ctx = admin_ctx(GlobalSettings {
            shortcodes_off: true,
            ..Default::default()
        });
        let env = ShortcodeEnv {
            ctx: &ctx,
            chain: &chain,
            catalog: &catalog,
            cache: &cache,
        };

        let output = render(&args_all(), &env).await.unwrap();
        assert!(output.contains("shortcodes are turned off"));
        assert!(!output.contains("data-encodedtable"));
    }

    #[tokio::test]
    async fn test_table_reports_all_24_options() {
        let catalog = seeded_catalog();
        let cache = MemoryCache::default();
        let chain = ConditionChain::default();
        let ctx = admin_ctx(GlobalSettings::default());
        let env = ShortcodeEnv {
            ctx: &ctx,
            chain: &chain,
            catalog: &catalog,
            cache: &cache,
        };

        let output = render(&args_all(), &env).await.unwrap();
        assert!(output.contains(OPTION_BULK_OPERATIONS_TABLE_ID));

        // Re-instantiate the table from its cache hash, the way the lazy
        // frontend does, and count rows through it.
        let marker = "data-encodedtable=\"";
        let start = output.find(marker).expect("table carries its hash") + marker.len();
        let end = output[start..].find('"').unwrap() + start;
        let hash = &output[start..end];

        let table = OptionBulkOperationsTable::from_cache_hash(hash, &cache)
            .await
            .unwrap();
        assert_eq!(table.spec.id, OPTION_BULK_OPERATIONS_TABLE_ID);
        assert_eq!(table.total_rows(&catalog).await.unwrap(), 24);

        let page = table.rows(&catalog, 10, 0).await.unwrap();
        assert_eq!(page.len(), 10);
    }

    #[tokio::test]
    async fn test_started_courses_hidden_without_all_flag() {
        let catalog = seeded_catalog();
        let cache = MemoryCache::default();
        let chain = ConditionChain::default();
        let ctx = admin_ctx(GlobalSettings::default());
        let env = ShortcodeEnv {
            ctx: &ctx,
            chain: &chain,
            catalog: &catalog,
            cache: &cache,
        };

        // Every seeded option started yesterday, so the default filter
        // hides all of them.
        let output = render(&HashMap::new(), &env).await.unwrap();
        assert!(output.contains("data-totalrows=\"0\""));
    }

    #[tokio::test]
    async fn test_missing_capability_is_refused() {
        let catalog = seeded_catalog();
        let cache = MemoryCache::default();
        let chain = ConditionChain::default();
        let ctx = EvalContext::new(
            SessionState::Authenticated(SessionUser {
                id: Uuid::new_v4(),
                username: "student".to_string(),
                role: roles::STUDENT.to_string(),
            }),
            GlobalSettings::default(),
        );
        let env = ShortcodeEnv {
            ctx: &ctx,
            chain: &chain,
            catalog: &catalog,
            cache: &cache,
        };

        let output = render(&args_all(), &env).await.unwrap();
        assert!(output.contains("not allowed"));
        assert!(!output.contains("data-encodedtable"));
    }
}
