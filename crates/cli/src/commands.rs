//! One handler per subcommand, plus the render helpers they share.
//!
//! Handlers stay thin: they load state through the core stores, call the
//! engine, and print. Anything that produces output worth asserting on is a
//! separate function returning a `String`.

use std::path::PathBuf;
use std::process::ExitCode;

use crossterm::style::Stylize;
use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;

use redpen_core::catalog::{Catalog, FsCatalog};
use redpen_core::config::{
    detect_stack, Backend, Config, ConfigStore, Framework, Frontend, Platform,
};
use redpen_core::context::Context;
use redpen_core::error::{Error, Result};
use redpen_core::progress::{Progress, ProgressStore};
use redpen_core::resolve::resolve_prompt;
use redpen_core::run_order::{build_run_order, prompt_category, prompt_name};

use crate::cli_args::{Args, Command};
use crate::clipboard::{ClipboardWriter, SystemClipboard};
use crate::prompt_selection::{
    press_enter, prompt_for_prompt_choice, select_option, PromptChoice, SelectOption,
};

/// Entry point called by `main` after argument parsing.
///
/// # Errors
///
/// Returns an error for unresolvable prompt tokens, missing prompt files, and
/// storage write failures; `main` prints it and exits non-zero.
pub fn execute(args: Args) -> Result<ExitCode> {
    let catalog_override = args
        .prompts_dir
        .as_deref()
        .map(|path| PathBuf::from(shellexpand::tilde(path).to_string()));

    let context = Context::discover(catalog_override.as_deref())?;
    let catalog = FsCatalog::for_context(&context);
    debug!("Catalog root: `{}`", catalog.root().display());

    match args.command {
        Command::Init => init(&context, &catalog),
        Command::Run => run(&context, &catalog, &SystemClipboard),
        Command::Order { tag } => order(&context, &catalog, tag.as_deref()),
        Command::Next => next(&context, &catalog),
        Command::Status => status(&context, &catalog),
        Command::List => list(&context, &catalog),
        Command::Show { id } => show(&context, &catalog, id.as_deref()),
        Command::Copy { id } => copy(&context, &catalog, id.as_deref(), &SystemClipboard),
        Command::Done { id } => done(&context, &catalog, id.as_deref()),
        Command::Skip { id } => skip(&context, &catalog, id.as_deref()),
        Command::Undo => undo(&context),
        Command::Check { categories } => check(&context, &catalog, categories.as_deref()),
        Command::Report => report(&context, &catalog),
        Command::Doctor => doctor(&context, &catalog),
        Command::Reset => reset(&context),
        Command::Completion => {
            print!("{COMPLETION_SCRIPT}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// The stored configuration, or the documented defaults before `init` ran.
fn current_config(context: &Context) -> Config {
    ConfigStore::for_context(context).load().unwrap_or_default()
}

fn current_run_order(context: &Context, catalog: &FsCatalog) -> Vec<String> {
    build_run_order(catalog, &current_config(context))
}

/// Resolves a token, or opens the interactive picker when there is none.
///
/// `Ok(None)` means the user quit the picker; that is a clean exit, not an
/// error.
fn resolve_or_pick(
    token: Option<&str>,
    run_order: &[String],
    progress: &Progress,
) -> Result<Option<String>> {
    match token {
        Some(token) => match resolve_prompt(token, run_order) {
            Some(id) => Ok(Some(id.to_string())),
            None => Err(Error::PromptNotFound(token.to_string())),
        },
        None => match prompt_for_prompt_choice(run_order, progress)? {
            PromptChoice::Index(position) => Ok(Some(run_order[position].clone())),
            PromptChoice::Quit => Ok(None),
        },
    }
}

fn read_prompt(catalog: &FsCatalog, id: &str) -> Result<String> {
    catalog
        .read(id)
        .ok_or_else(|| Error::MissingPromptFile(id.to_string()))
}

/// `index/total  name` for the first pending prompt.
fn next_line(run_order: &[String], progress: &Progress) -> Option<String> {
    let next = progress.next_pending(run_order)?;
    let position = run_order.iter().position(|id| id == next)? + 1;
    Some(format!("{position}/{}  {}", run_order.len(), prompt_name(next)))
}

fn announce_done(store: &ProgressStore, run_order: &[String], id: &str) -> Result<()> {
    store.mark_done(id)?;
    println!("done: {}", prompt_name(id));

    if let Some(line) = next_line(run_order, &store.load()) {
        println!("next: {line}");
    }
    Ok(())
}

fn init(context: &Context, catalog: &FsCatalog) -> Result<ExitCode> {
    let detected = detect_stack(&context.project_root);
    println!("detected: {}", detected.platform);

    let platform_default = match detected.platform {
        Platform::Web => 0,
        Platform::Mobile => 1,
    };
    let platform = PLATFORM_VALUES[select_option("platform", &PLATFORM_OPTIONS, platform_default)?];

    let config = match platform {
        Platform::Web => {
            let frontend_default = detected
                .frontend
                .and_then(|frontend| FRONTEND_VALUES.iter().position(|v| *v == frontend))
                .unwrap_or(0);
            let frontend =
                FRONTEND_VALUES[select_option("frontend", &FRONTEND_OPTIONS, frontend_default)?];

            let backend_default = detected
                .backend
                .and_then(|backend| BACKEND_VALUES.iter().position(|v| *v == backend))
                .unwrap_or(0);
            let backend =
                BACKEND_VALUES[select_option("backend", &BACKEND_OPTIONS, backend_default)?];

            Config {
                platform,
                frontend: Some(frontend),
                backend: Some(backend),
                framework: None,
            }
        }
        Platform::Mobile => {
            let framework_default = detected
                .framework
                .and_then(|framework| FRAMEWORK_VALUES.iter().position(|v| *v == framework))
                .unwrap_or(0);
            let framework =
                FRAMEWORK_VALUES[select_option("framework", &FRAMEWORK_OPTIONS, framework_default)?];

            Config {
                platform,
                frontend: None,
                backend: None,
                framework: Some(framework),
            }
        }
    };

    ConfigStore::for_context(context).save(&config)?;

    let run_order = build_run_order(catalog, &config);
    println!("\n{} prompts", run_order.len());
    Ok(ExitCode::SUCCESS)
}

fn run(context: &Context, catalog: &FsCatalog, clipboard: &dyn ClipboardWriter) -> Result<ExitCode> {
    let run_order = current_run_order(context, catalog);
    let store = ProgressStore::for_context(context);
    let progress = store.load();

    let Some(next) = progress.next_pending(&run_order) else {
        println!("all prompts complete");
        return Ok(ExitCode::SUCCESS);
    };
    let next = next.to_string();

    let content = read_prompt(catalog, &next)?;
    let position = run_order.iter().position(|id| *id == next).unwrap_or(0) + 1;

    if clipboard.write_text(&content) {
        println!("\ncopied: {} ({}/{})", prompt_name(&next), position, run_order.len());
    } else {
        // No clipboard; show the prompt instead.
        println!("\n{content}");
        println!("({}/{})", position, run_order.len());
    }

    println!("\n→ Paste in your AI editor, run audit, fix issues");
    press_enter("→ Press Enter when complete...\n")?;

    announce_done(&store, &run_order, &next)?;
    Ok(ExitCode::SUCCESS)
}

fn order(context: &Context, catalog: &FsCatalog, tag: Option<&str>) -> Result<ExitCode> {
    let run_order = current_run_order(context, catalog);
    let progress = ProgressStore::for_context(context).load();
    print!("{}", render_order(&run_order, &progress, tag));
    Ok(ExitCode::SUCCESS)
}

fn next(context: &Context, catalog: &FsCatalog) -> Result<ExitCode> {
    let run_order = current_run_order(context, catalog);
    let progress = ProgressStore::for_context(context).load();

    match next_line(&run_order, &progress) {
        Some(line) => println!("{line}"),
        None => println!("done"),
    }
    Ok(ExitCode::SUCCESS)
}

fn status(context: &Context, catalog: &FsCatalog) -> Result<ExitCode> {
    let run_order = current_run_order(context, catalog);
    let progress = ProgressStore::for_context(context).load();

    println!("{}/{}", progress.completed.len(), run_order.len());
    if let Some(line) = next_line(&run_order, &progress) {
        println!("{line}");
    }
    Ok(ExitCode::SUCCESS)
}

fn list(context: &Context, catalog: &FsCatalog) -> Result<ExitCode> {
    let run_order = current_run_order(context, catalog);
    print!("{}", render_list(&run_order));
    Ok(ExitCode::SUCCESS)
}

fn show(context: &Context, catalog: &FsCatalog, token: Option<&str>) -> Result<ExitCode> {
    let run_order = current_run_order(context, catalog);
    let progress = ProgressStore::for_context(context).load();

    let Some(id) = resolve_or_pick(token, &run_order, &progress)? else {
        return Ok(ExitCode::SUCCESS);
    };

    println!("{}", read_prompt(catalog, &id)?);
    Ok(ExitCode::SUCCESS)
}

fn copy(
    context: &Context,
    catalog: &FsCatalog,
    token: Option<&str>,
    clipboard: &dyn ClipboardWriter,
) -> Result<ExitCode> {
    let run_order = current_run_order(context, catalog);
    let progress = ProgressStore::for_context(context).load();

    let Some(id) = resolve_or_pick(token, &run_order, &progress)? else {
        return Ok(ExitCode::SUCCESS);
    };

    let content = read_prompt(catalog, &id)?;
    if clipboard.write_text(&content) {
        println!("copied: {id}");
    } else {
        println!("{content}");
    }
    Ok(ExitCode::SUCCESS)
}

fn done(context: &Context, catalog: &FsCatalog, token: Option<&str>) -> Result<ExitCode> {
    let run_order = current_run_order(context, catalog);
    let store = ProgressStore::for_context(context);
    let progress = store.load();

    let Some(id) = resolve_or_pick(token, &run_order, &progress)? else {
        return Ok(ExitCode::SUCCESS);
    };

    announce_done(&store, &run_order, &id)?;
    Ok(ExitCode::SUCCESS)
}

fn skip(context: &Context, catalog: &FsCatalog, token: Option<&str>) -> Result<ExitCode> {
    let run_order = current_run_order(context, catalog);
    let store = ProgressStore::for_context(context);
    let progress = store.load();

    let Some(id) = resolve_or_pick(token, &run_order, &progress)? else {
        return Ok(ExitCode::SUCCESS);
    };

    store.mark_skipped(&id)?;
    println!("skipped: {}", prompt_name(&id));

    if let Some(line) = next_line(&run_order, &store.load()) {
        println!("{line}");
    }
    Ok(ExitCode::SUCCESS)
}

fn undo(context: &Context) -> Result<ExitCode> {
    let store = ProgressStore::for_context(context);

    match store.undo_last()? {
        Some(id) => println!("undone: {}", prompt_name(&id)),
        None => println!("nothing to undo"),
    }
    Ok(ExitCode::SUCCESS)
}

fn check(context: &Context, catalog: &FsCatalog, categories: Option<&str>) -> Result<ExitCode> {
    let run_order = current_run_order(context, catalog);
    let progress = ProgressStore::for_context(context).load();
    let categories = parse_categories(categories);

    let missing = missing_prompts(&run_order, &progress, &categories);
    if missing.is_empty() {
        println!("all required prompts complete");
        return Ok(ExitCode::SUCCESS);
    }

    println!("missing {} required prompt(s):", missing.len());
    for id in missing {
        println!("  {}", prompt_name(id));
    }
    Ok(ExitCode::FAILURE)
}

fn report(context: &Context, catalog: &FsCatalog) -> Result<ExitCode> {
    let run_order = current_run_order(context, catalog);
    let progress = ProgressStore::for_context(context).load();
    let config = current_config(context);
    let generated = chrono::Utc::now().to_rfc3339();

    print!("{}", render_report(&config, &progress, &run_order, &generated));
    Ok(ExitCode::SUCCESS)
}

fn doctor(context: &Context, catalog: &FsCatalog) -> Result<ExitCode> {
    let mut issues = 0;

    let config_store = ConfigStore::for_context(context);
    match config_store.load() {
        None => {
            println!(
                "⚠ no config found at {} (run: redpen init)",
                config_store.path().display()
            );
            issues += 1;
        }
        Some(config) => {
            println!("✓ config: platform={}", config.platform);
            println!("  location: {}", config_store.path().display());
        }
    }

    if context.catalog_root.is_dir() {
        let run_order = current_run_order(context, catalog);
        println!("✓ prompts: {} found", run_order.len());
    } else {
        println!("✗ prompts folder missing");
        issues += 1;
    }

    let progress = ProgressStore::for_context(context).load();
    println!("✓ progress: {} completed", progress.completed.len());

    if issues == 0 {
        println!("\nall checks passed");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("\n{issues} issue(s) found");
        Ok(ExitCode::FAILURE)
    }
}

fn reset(context: &Context) -> Result<ExitCode> {
    ProgressStore::for_context(context).reset()?;
    println!("reset");
    Ok(ExitCode::SUCCESS)
}

/// Groups run-order positions by category, preserving first-appearance order.
fn group_by_category(run_order: &[String]) -> IndexMap<&str, Vec<(usize, &String)>> {
    let mut groups: IndexMap<&str, Vec<(usize, &String)>> = IndexMap::new();
    for (index, id) in run_order.iter().enumerate() {
        groups.entry(prompt_category(id)).or_default().push((index, id));
    }
    groups
}

/// The `order` listing: grouped, numbered, with completion marks and colors.
#[must_use]
pub fn render_order(run_order: &[String], progress: &Progress, tag: Option<&str>) -> String {
    let next = progress.next_pending(run_order);
    let mut out = String::new();

    for (category, entries) in group_by_category(run_order) {
        if let Some(tag) = tag {
            if category != tag {
                continue;
            }
        }

        out.push_str(&format!("\n{}\n", category.to_uppercase()));
        for (index, id) in entries {
            let done = progress.is_completed(id);
            let mark = if done { "x" } else { " " };
            let line = format!("  [{mark}] {:>2}  {}", index + 1, prompt_name(id));

            let styled = if done {
                line.green()
            } else if next == Some(id.as_str()) {
                line.yellow()
            } else {
                line.dim()
            };
            out.push_str(&format!("{styled}\n"));
        }
    }

    out.push('\n');
    out
}

/// The `list` listing: grouped and numbered, no progress annotations.
#[must_use]
pub fn render_list(run_order: &[String]) -> String {
    let mut out = String::new();

    for (category, entries) in group_by_category(run_order) {
        out.push_str(&format!("\n{category}\n"));
        for (index, id) in entries {
            out.push_str(&format!("  {:>2}  {}\n", index + 1, prompt_name(id)));
        }
    }

    out.push('\n');
    out
}

/// Lowercased, trimmed category filters from a `check` argument.
#[must_use]
pub fn parse_categories(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(|category| category.trim().to_lowercase())
            .filter(|category| !category.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Incomplete prompts, optionally restricted to `categories`.
#[must_use]
pub fn missing_prompts<'a>(
    run_order: &'a [String],
    progress: &Progress,
    categories: &[String],
) -> Vec<&'a String> {
    run_order
        .iter()
        .filter(|id| !progress.is_completed(id))
        .filter(|id| {
            categories.is_empty() || categories.iter().any(|category| category == prompt_category(id))
        })
        .collect()
}

/// The `report` markdown document.
#[must_use]
pub fn render_report(
    config: &Config,
    progress: &Progress,
    run_order: &[String],
    generated: &str,
) -> String {
    let mut md = String::from("# Audit Report\n\n");
    md.push_str(&format!("**Platform**: {}\n", config.platform));
    md.push_str(&format!(
        "**Progress**: {}/{}\n",
        progress.completed.len(),
        run_order.len()
    ));
    md.push_str(&format!("**Generated**: {generated}\n\n"));

    md.push_str("## Completed\n\n");
    if progress.completed.is_empty() {
        md.push_str("_None_\n");
    } else {
        for id in &progress.completed {
            let version = progress
                .versions
                .get(id)
                .map(String::as_str)
                .unwrap_or("unknown");
            md.push_str(&format!("- [x] {} (v{version})\n", prompt_name(id)));
        }
    }

    md.push_str("\n## Pending\n\n");
    let pending: Vec<&String> = run_order
        .iter()
        .filter(|id| !progress.is_completed(id))
        .collect();
    if pending.is_empty() {
        md.push_str("_All complete_\n");
    } else {
        for id in pending {
            md.push_str(&format!("- [ ] {}\n", prompt_name(id)));
        }
    }

    if !progress.skipped.is_empty() {
        md.push_str("\n## Skipped\n\n");
        for id in progress.skipped.iter().sorted() {
            md.push_str(&format!("- {}\n", prompt_name(id)));
        }
    }

    md
}

const PLATFORM_VALUES: [Platform; 2] = [Platform::Web, Platform::Mobile];
const PLATFORM_OPTIONS: [SelectOption; 2] = [
    SelectOption {
        value: "web",
        description: "Next.js, React, Vue + Supabase, Firebase, Prisma",
    },
    SelectOption {
        value: "mobile",
        description: "Flutter, React Native, Native iOS/Android",
    },
];

const FRONTEND_VALUES: [Frontend; 4] = [
    Frontend::Nextjs,
    Frontend::React,
    Frontend::Vue,
    Frontend::None,
];
const FRONTEND_OPTIONS: [SelectOption; 4] = [
    SelectOption {
        value: "nextjs",
        description: "React framework with SSR, routing, API routes",
    },
    SelectOption {
        value: "react",
        description: "Client-side React SPA",
    },
    SelectOption {
        value: "vue",
        description: "Vue.js framework",
    },
    SelectOption {
        value: "none",
        description: "Backend only / API project",
    },
];

const BACKEND_VALUES: [Backend; 4] = [
    Backend::Supabase,
    Backend::Firebase,
    Backend::Prisma,
    Backend::None,
];
const BACKEND_OPTIONS: [SelectOption; 4] = [
    SelectOption {
        value: "supabase",
        description: "PostgreSQL, Auth, Realtime, Storage",
    },
    SelectOption {
        value: "firebase",
        description: "Firestore, Auth, Cloud Functions",
    },
    SelectOption {
        value: "prisma",
        description: "TypeScript ORM for any database",
    },
    SelectOption {
        value: "none",
        description: "Frontend only / static site",
    },
];

const FRAMEWORK_VALUES: [Framework; 4] = [
    Framework::Flutter,
    Framework::ReactNative,
    Framework::Native,
    Framework::None,
];
const FRAMEWORK_OPTIONS: [SelectOption; 4] = [
    SelectOption {
        value: "flutter",
        description: "Dart framework for iOS, Android, Web",
    },
    SelectOption {
        value: "react-native",
        description: "React for native iOS/Android",
    },
    SelectOption {
        value: "native",
        description: "Swift/Kotlin native development",
    },
    SelectOption {
        value: "none",
        description: "Cross-platform prompts only",
    },
];

const COMPLETION_SCRIPT: &str = r#"
# redpen shell completion
_redpen() {
    local commands="init run order next status list show copy done skip undo check report doctor completion reset help"
    local categories="security quality architecture process frontend interface product growth mobile"

    case "${COMP_WORDS[1]}" in
        order|check)
            COMPREPLY=( $(compgen -W "$categories" -- "${COMP_WORDS[2]}") )
            ;;
        *)
            COMPREPLY=( $(compgen -W "$commands" -- "${COMP_WORDS[1]}") )
            ;;
    esac
}
complete -F _redpen redpen

# For zsh, add: autoload -U compinit && compinit
"#;
