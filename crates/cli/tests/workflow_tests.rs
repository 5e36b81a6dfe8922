#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use redpen_cli::commands::{missing_prompts, parse_categories, render_order, render_report};
    use redpen_core::catalog::{Catalog, FsCatalog};
    use redpen_core::config::Config;
    use redpen_core::progress::ProgressStore;
    use redpen_core::resolve::resolve_prompt;
    use redpen_core::run_order::build_run_order;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, format!("content of {rel}")).unwrap();
    }

    /// A small but representative catalog for a default web project.
    fn seeded_catalog() -> (TempDir, FsCatalog) {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "core/security/code-analysis.txt");
        touch(dir.path(), "core/security/data-integrity.txt");
        touch(dir.path(), "core/quality/error-handling.txt");
        touch(dir.path(), "web/frontend/nextjs/app-router.txt");
        touch(dir.path(), "web/interface/accessibility.txt");
        touch(dir.path(), "web/backend/supabase/rls-policies.txt");
        touch(dir.path(), "web/product/onboarding.txt");
        let catalog = FsCatalog::new(dir.path());
        (dir, catalog)
    }

    #[test]
    fn test_full_workflow_done_undo_check() {
        let (_catalog_dir, catalog) = seeded_catalog();
        let storage = TempDir::new().unwrap();

        let run_order = build_run_order(&catalog, &Config::default());
        assert_eq!(run_order[0], "core/security/code-analysis.txt");

        let store = ProgressStore::new(storage.path(), Some("main".to_string()));

        // Work through the first two prompts the way `run` does.
        let first = store.load().next_pending(&run_order).unwrap().to_string();
        store.mark_done(&first).unwrap();
        let second = store.load().next_pending(&run_order).unwrap().to_string();
        assert_ne!(first, second);
        store.mark_done(&second).unwrap();

        // The two security prompts are the first two entries, so completing
        // them clears the security category while the rest stays missing.
        let categories = parse_categories(Some("security"));
        assert!(missing_prompts(&run_order, &store.load(), &categories).is_empty());
        assert!(!missing_prompts(&run_order, &store.load(), &[]).is_empty());

        // Undo pops the most recent completion only.
        assert_eq!(store.undo_last().unwrap(), Some(second.clone()));
        assert_eq!(store.load().completed, vec![first.clone()]);
        assert!(!missing_prompts(&run_order, &store.load(), &categories).is_empty());
    }

    #[test]
    fn test_resolver_against_real_run_order() {
        let (_catalog_dir, catalog) = seeded_catalog();
        let run_order = build_run_order(&catalog, &Config::default());

        assert_eq!(
            resolve_prompt("1", &run_order),
            Some("core/security/code-analysis.txt")
        );
        assert_eq!(
            resolve_prompt("code-analysis", &run_order),
            Some("core/security/code-analysis.txt")
        );
        assert_eq!(
            resolve_prompt("rls", &run_order),
            Some("web/backend/supabase/rls-policies.txt")
        );
        assert_eq!(resolve_prompt("0", &run_order), None);
        assert_eq!(resolve_prompt("nope", &run_order), None);

        // Every identifier in the order resolves to itself and has content.
        for id in &run_order {
            assert_eq!(resolve_prompt(id, &run_order), Some(id.as_str()));
            assert!(catalog.read(id).is_some());
        }
    }

    #[test]
    fn test_custom_prompts_join_the_order() {
        let (_catalog_dir, catalog_without_custom) = seeded_catalog();
        let project = TempDir::new().unwrap();
        let custom = project.path().join(".redpen");
        touch(&custom, "team-checklist.txt");

        let catalog =
            FsCatalog::with_custom_dir(catalog_without_custom.root(), &custom);
        let run_order = build_run_order(&catalog, &Config::default());

        assert_eq!(run_order.last().unwrap(), "custom/team-checklist.txt");
        assert_eq!(
            catalog.read("custom/team-checklist.txt").unwrap(),
            "content of team-checklist.txt"
        );
    }

    #[test]
    fn test_branch_scoped_progress_is_invisible_across_branches() {
        let (_catalog_dir, catalog) = seeded_catalog();
        let storage = TempDir::new().unwrap();
        let run_order = build_run_order(&catalog, &Config::default());

        let main = ProgressStore::new(storage.path(), Some("main".to_string()));
        let feature = ProgressStore::new(storage.path(), Some("feature/audit".to_string()));

        main.mark_done(&run_order[0]).unwrap();

        assert!(feature.load().completed.is_empty());
        assert_eq!(
            feature.load().next_pending(&run_order),
            Some(run_order[0].as_str())
        );
    }

    #[test]
    fn test_order_and_report_rendering_agree() {
        let (_catalog_dir, catalog) = seeded_catalog();
        let storage = TempDir::new().unwrap();
        let run_order = build_run_order(&catalog, &Config::default());

        let store = ProgressStore::new(storage.path(), None);
        store.mark_done(&run_order[0]).unwrap();
        store.mark_skipped(&run_order[1]).unwrap();
        let progress = store.load();

        let listing = render_order(&run_order, &progress, None);
        assert!(listing.contains("SECURITY"));
        assert!(listing.contains("[x]"));

        let md = render_report(&Config::default(), &progress, &run_order, "now");
        assert!(md.contains("**Progress**: 1/7"));
        assert!(md.contains("- [x] core/security/code-analysis"));
        assert!(md.contains("## Skipped"));
        assert!(md.contains("- core/security/data-integrity"));
    }
}
