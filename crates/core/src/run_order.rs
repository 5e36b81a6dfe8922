//! Deterministic prompt ordering for a project configuration.
//!
//! The run order is never persisted; it is recomputed from the configuration
//! and the catalog contents on every invocation. For an unchanged
//! configuration and catalog the result is stable, because every scan step is
//! sorted and the steps themselves run in a fixed sequence.

use crate::catalog::{Catalog, CUSTOM_NAMESPACE, PROMPT_SUFFIX};
use crate::config::{Backend, Config, Framework, Frontend, Platform};

/// Categories always included first, in this order.
pub const CORE_CATEGORIES: [&str; 4] = ["security", "quality", "architecture", "process"];

/// Builds the ordered prompt sequence for `config`.
///
/// Order: core categories, then the platform-specific sections, then custom
/// prompts. Identifiers cannot repeat because every step scans a disjoint
/// part of the catalog. Fields absent from the configuration fall back to
/// the defaults (`web`/`nextjs`/`supabase`); the explicit `none` sentinel
/// disables a section.
#[must_use]
pub fn build_run_order(catalog: &dyn Catalog, config: &Config) -> Vec<String> {
    let mut order = Vec::new();

    for category in CORE_CATEGORIES {
        order.extend(catalog.list(&format!("core/{category}")));
    }

    match config.platform {
        Platform::Mobile => {
            order.extend(catalog.list_recursive("mobile/core"));

            if let Some(framework) = config.framework {
                if framework != Framework::None {
                    order.extend(
                        catalog.list_recursive(&format!("mobile/{}", framework.as_str())),
                    );
                }
            }
        }
        Platform::Web => {
            let frontend = config.frontend.unwrap_or(Frontend::Nextjs);
            if frontend != Frontend::None {
                order.extend(catalog.list(&format!("web/frontend/{}", frontend.as_str())));
                order.extend(catalog.list("web/interface"));
            }

            let backend = config.backend.unwrap_or(Backend::Supabase);
            if backend != Backend::None {
                order.extend(catalog.list(&format!("web/backend/{}", backend.as_str())));
            }

            order.extend(catalog.list("web/product"));
            order.extend(catalog.list("web/growth"));
        }
    }

    order.extend(catalog.list_recursive(CUSTOM_NAMESPACE));

    order
}

/// Display name for a prompt identifier (extension stripped).
#[must_use]
pub fn prompt_name(id: &str) -> &str {
    id.strip_suffix(PROMPT_SUFFIX).unwrap_or(id)
}

/// Category a prompt is grouped under for display and tag filtering.
///
/// `core/...` and `web/...` use the second path segment; `mobile/...` uses
/// the second segment unless the path has only two segments (then the
/// category is `mobile` itself); anything else, such as `custom/...`, uses
/// the first segment.
#[must_use]
pub fn prompt_category(id: &str) -> &str {
    let segments: Vec<&str> = id.split('/').collect();

    match segments.first().copied() {
        Some(first @ ("core" | "web")) => segments.get(1).copied().unwrap_or(first),
        Some(first @ "mobile") => {
            if segments.len() > 2 {
                segments[1]
            } else {
                first
            }
        }
        Some(first) => first,
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;

    fn web_catalog() -> MemoryCatalog {
        let mut catalog = MemoryCatalog::new();
        catalog.insert("core/security/a.txt", "");
        catalog.insert("core/security/b.txt", "");
        catalog.insert("core/quality/q.txt", "");
        catalog.insert("web/frontend/nextjs/x.txt", "");
        catalog.insert("web/frontend/react/r.txt", "");
        catalog.insert("web/interface/i.txt", "");
        catalog.insert("web/backend/supabase/s.txt", "");
        catalog.insert("web/product/p.txt", "");
        catalog.insert("web/growth/g.txt", "");
        catalog
    }

    fn web_config() -> Config {
        Config {
            platform: Platform::Web,
            frontend: Some(Frontend::Nextjs),
            backend: Some(Backend::Supabase),
            framework: None,
        }
    }

    #[test]
    fn test_web_order_matches_scan_sequence() {
        let order = build_run_order(&web_catalog(), &web_config());
        assert_eq!(
            order,
            vec![
                "core/security/a.txt",
                "core/security/b.txt",
                "core/quality/q.txt",
                "web/frontend/nextjs/x.txt",
                "web/interface/i.txt",
                "web/backend/supabase/s.txt",
                "web/product/p.txt",
                "web/growth/g.txt",
            ]
        );
    }

    #[test]
    fn test_none_sentinels_disable_sections() {
        let config = Config {
            platform: Platform::Web,
            frontend: Some(Frontend::None),
            backend: Some(Backend::None),
            framework: None,
        };

        let order = build_run_order(&web_catalog(), &config);
        assert!(order.iter().all(|id| !id.starts_with("web/frontend")));
        assert!(order.iter().all(|id| !id.starts_with("web/interface")));
        assert!(order.iter().all(|id| !id.starts_with("web/backend")));
        // Product and growth are unconditional for web.
        assert!(order.contains(&"web/product/p.txt".to_string()));
        assert!(order.contains(&"web/growth/g.txt".to_string()));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config = Config {
            platform: Platform::Web,
            frontend: None,
            backend: None,
            framework: None,
        };

        let order = build_run_order(&web_catalog(), &config);
        assert!(order.contains(&"web/frontend/nextjs/x.txt".to_string()));
        assert!(order.contains(&"web/backend/supabase/s.txt".to_string()));
        assert!(!order.contains(&"web/frontend/react/r.txt".to_string()));
    }

    #[test]
    fn test_mobile_order() {
        let mut catalog = MemoryCatalog::new();
        catalog.insert("core/security/a.txt", "");
        catalog.insert("mobile/core/state.txt", "");
        catalog.insert("mobile/core/perf/startup.txt", "");
        catalog.insert("mobile/core/workflow/steps.txt", "");
        catalog.insert("mobile/flutter/widgets.txt", "");
        catalog.insert("web/product/p.txt", "");

        let config = Config {
            platform: Platform::Mobile,
            frontend: None,
            backend: None,
            framework: Some(Framework::Flutter),
        };

        assert_eq!(
            build_run_order(&catalog, &config),
            vec![
                "core/security/a.txt",
                "mobile/core/perf/startup.txt",
                "mobile/core/state.txt",
                "mobile/flutter/widgets.txt",
            ]
        );
    }

    #[test]
    fn test_mobile_framework_none_is_skipped() {
        let mut catalog = MemoryCatalog::new();
        catalog.insert("mobile/core/state.txt", "");
        catalog.insert("mobile/flutter/widgets.txt", "");

        let config = Config {
            platform: Platform::Mobile,
            frontend: None,
            backend: None,
            framework: Some(Framework::None),
        };

        assert_eq!(
            build_run_order(&catalog, &config),
            vec!["mobile/core/state.txt"]
        );
    }

    #[test]
    fn test_custom_prompts_come_last() {
        let mut catalog = web_catalog();
        catalog.insert("custom/my-check.txt", "");
        catalog.insert("custom/deep/other.txt", "");
        catalog.insert("custom/workflow/hidden.txt", "");

        let order = build_run_order(&catalog, &web_config());
        let tail = &order[order.len() - 2..];
        assert_eq!(tail, ["custom/deep/other.txt", "custom/my-check.txt"]);
        assert!(!order.contains(&"custom/workflow/hidden.txt".to_string()));
    }

    #[test]
    fn test_no_duplicates() {
        let mut catalog = web_catalog();
        catalog.insert("custom/my-check.txt", "");

        let order = build_run_order(&catalog, &web_config());
        let mut deduped = order.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), order.len());
    }

    #[test]
    fn test_empty_catalog_is_empty_order() {
        let catalog = MemoryCatalog::new();
        assert!(build_run_order(&catalog, &web_config()).is_empty());
    }

    #[test]
    fn test_prompt_name_strips_extension() {
        assert_eq!(
            prompt_name("core/security/code-analysis.txt"),
            "core/security/code-analysis"
        );
        assert_eq!(prompt_name("core/security/test"), "core/security/test");
    }

    #[test]
    fn test_prompt_category_rules() {
        assert_eq!(prompt_category("core/security/code-analysis.txt"), "security");
        assert_eq!(prompt_category("web/frontend/nextjs/render.txt"), "frontend");
        assert_eq!(prompt_category("mobile/core/test.txt"), "core");
        assert_eq!(prompt_category("mobile/flutter/test.txt"), "flutter");
        assert_eq!(prompt_category("mobile/overview.txt"), "mobile");
        assert_eq!(prompt_category("custom/my-check.txt"), "custom");
    }
}
