use super::render::{print_config, print_messages, print_page, print_pages, print_stats};
use super::setup::{Cli, Commands, FormatArg, ThemeArg};
use super::terminal::{confirm_import, TerminalFileAccess};
use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use quire::api::{CmdResult, ConfigAction, QuireApi};
use quire::codec::ExportFormat;
use quire::config::QuireConfig;
use quire::error::{QuireError, Result};
use quire::model::Theme;
use quire::session::{EditorSession, SharedApi};
use quire::store::fs::FsBackend;
use quire::surface::{BufferSurface, Captured, DetachedSurface, EditorSurface};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::LocalSet;
use tracing_subscriber::EnvFilter;

type Api<S> = QuireApi<FsBackend, TerminalFileAccess, S>;

struct AppContext {
    api: Api<DetachedSurface>,
    config: QuireConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let home = resolve_home(cli.home.as_deref())?;

    // These two don't go through a one-shot API context.
    match cli.command {
        Some(Commands::Config { key, value }) => return handle_config(&home, key, value),
        Some(Commands::Session { autosave }) => return handle_session(&home, autosave),
        _ => {}
    }

    let mut ctx = init_context(&home);

    match cli.command {
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::New { title, icon }) => handle_new(&mut ctx, title.join(" "), icon),
        Some(Commands::Select { index }) => handle_select(&mut ctx, index),
        Some(Commands::Show) => {
            print_page(ctx.api.store().active_page());
            Ok(())
        }
        Some(Commands::Rename { title }) => handle_rename(&mut ctx, title.join(" ")),
        Some(Commands::Write { content }) => handle_write(&mut ctx, content),
        Some(Commands::Delete) => handle_mutation(&mut ctx, |api| api.delete_page()),
        Some(Commands::Duplicate) => handle_mutation(&mut ctx, |api| api.duplicate_page()),
        Some(Commands::Search { term }) => handle_search(&mut ctx, term.join(" ")),
        Some(Commands::Stats) => handle_stats(&mut ctx),
        Some(Commands::Theme { mode }) => handle_theme(&mut ctx, mode),
        Some(Commands::Export { format, path }) => handle_export(&mut ctx, format, path),
        Some(Commands::Import { path, yes }) => handle_import(&mut ctx, path, yes),
        Some(Commands::Config { .. }) | Some(Commands::Session { .. }) => Ok(()),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "quire=debug" } else { "quire=warn" };
    let filter = EnvFilter::try_from_env("QUIRE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn resolve_home(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os("QUIRE_HOME") {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "quire", "quire")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| QuireError::Config("Could not determine data directory".to_string()))
}

fn load_config(home: &Path) -> QuireConfig {
    QuireConfig::load(home).unwrap_or_else(|e| {
        tracing::warn!("ignoring unreadable config: {}", e);
        QuireConfig::default()
    })
}

fn open_api<S: EditorSurface>(home: &Path, config: &QuireConfig, surface: S) -> Api<S> {
    let backend = FsBackend::new(home.to_path_buf()).with_file_name(&config.data_file);
    QuireApi::open(backend, TerminalFileAccess::new(), surface)
}

fn init_context(home: &Path) -> AppContext {
    let config = load_config(home);
    let api = open_api(home, &config, DetachedSurface);
    AppContext { api, config }
}

fn report_save<S: EditorSurface>(api: &Api<S>) {
    if let Some(report) = api.last_save() {
        if !report.success {
            eprintln!(
                "{} {}",
                "Warning: changes kept in memory but not saved:".yellow(),
                report.message.as_deref().unwrap_or_default()
            );
        }
    }
}

fn handle_mutation<F>(ctx: &mut AppContext, op: F) -> Result<()>
where
    F: FnOnce(&mut Api<DetachedSurface>) -> Result<CmdResult>,
{
    let result = op(&mut ctx.api)?;
    print_messages(&result.messages);
    report_save(&ctx.api);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_pages()?;
    print_pages(&result.listed_pages);
    print_messages(&result.messages);
    Ok(())
}

fn handle_new(ctx: &mut AppContext, title: String, icon: String) -> Result<()> {
    handle_mutation(ctx, |api| api.create_page(&title, &icon))
}

fn handle_select(ctx: &mut AppContext, index: usize) -> Result<()> {
    // `list` numbers from 1; 0 falls through as an out-of-range selection.
    let result = ctx
        .api
        .select_page(index.checked_sub(1).unwrap_or(usize::MAX))?;
    match result.affected_pages.first() {
        Some(page) => println!("{} {}", page.icon, page.title.bold()),
        None => println!("{}", format!("No page {}.", index).dimmed()),
    }
    report_save(&ctx.api);
    Ok(())
}

fn handle_rename(ctx: &mut AppContext, title: String) -> Result<()> {
    handle_mutation(ctx, |api| api.update_title(&title))
}

fn handle_write(ctx: &mut AppContext, content: Option<String>) -> Result<()> {
    let content = match content {
        Some(content) => content,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(QuireError::Io)?;
            buf
        }
    };
    handle_mutation(ctx, |api| api.write_content(content))
}

fn handle_search(ctx: &mut AppContext, term: String) -> Result<()> {
    let result = ctx.api.search(&term)?;
    print_pages(&result.listed_pages);
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.stats()?;
    if let Some(stats) = &result.stats {
        print_stats(stats);
    }
    Ok(())
}

fn handle_theme(ctx: &mut AppContext, mode: Option<ThemeArg>) -> Result<()> {
    match mode {
        None => {
            println!("{}", ctx.api.store().theme().as_str());
            Ok(())
        }
        Some(ThemeArg::Toggle) => handle_mutation(ctx, |api| api.toggle_theme()),
        Some(ThemeArg::Light) => handle_mutation(ctx, |api| api.set_theme(Theme::Light)),
        Some(ThemeArg::Dark) => handle_mutation(ctx, |api| api.set_theme(Theme::Dark)),
    }
}

fn handle_export(ctx: &mut AppContext, format: FormatArg, path: Option<PathBuf>) -> Result<()> {
    let format = match format {
        FormatArg::Json => ExportFormat::Json,
        FormatArg::Html => ExportFormat::Html,
    };
    let result = ctx.api.export(format, path)?;
    print_messages(&result.messages);
    if result.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

fn handle_import(ctx: &mut AppContext, path: Option<PathBuf>, yes: bool) -> Result<()> {
    let skip_confirm = yes || !ctx.config.confirm_import;
    let result = ctx
        .api
        .import(path, |preview| skip_confirm || confirm_import(preview))?;
    print_messages(&result.messages);
    report_save(&ctx.api);
    if result.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

fn handle_config(home: &Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let result = quire::commands::config::run(home, action)?;
    if let Some(config) = &result.config {
        if result.messages.is_empty() {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    if result.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

fn handle_session(home: &Path, autosave: Option<u64>) -> Result<()> {
    let config = load_config(home);
    let interval = match autosave {
        Some(secs) => (secs > 0).then(|| Duration::from_secs(secs)),
        None => config.autosave_interval(),
    };
    let api = open_api(home, &config, BufferSurface::new());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(QuireError::Io)?;
    let local = LocalSet::new();

    let report = local.block_on(&runtime, async move {
        let mut session = EditorSession::new(api, interval);
        session.start();
        let handle = session.handle();
        eprintln!(
            "{}",
            "Typing appends to the active page. :new TITLE, :select N, :list, :save, :quit"
                .dimmed()
        );

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if !session_line(&handle, &line) {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("stdin closed: {}", e);
                    break;
                }
            }
        }
        session.shutdown()
    });

    if report.success {
        println!("{}", "Saved.".green());
        Ok(())
    } else {
        Err(QuireError::StorageUnavailable(
            report.message.unwrap_or_default(),
        ))
    }
}

/// Handles one line of session input. Returns false to end the session.
fn session_line(handle: &SharedApi<FsBackend, TerminalFileAccess, BufferSurface>, line: &str) -> bool {
    let mut api = handle.borrow_mut();
    let trimmed = line.trim();

    let outcome = match trimmed {
        ":quit" | ":q" => return false,
        ":save" => {
            let report = api.save();
            if report.success {
                println!("{}", "Saved.".green());
            }
            report_save(&api);
            Ok(())
        }
        ":list" => api.list_pages().map(|r| print_pages(&r.listed_pages)),
        _ if trimmed.starts_with(":new") => api
            .create_page(trimmed.trim_start_matches(":new").trim(), "")
            .map(|r| print_messages(&r.messages)),
        _ if trimmed.starts_with(":select") => {
            match trimmed.trim_start_matches(":select").trim().parse::<usize>() {
                Ok(n) => api.select_page(n.checked_sub(1).unwrap_or(usize::MAX)).map(|r| {
                    if let Some(page) = r.affected_pages.first() {
                        println!("{} {}", page.icon, page.title.bold());
                    }
                }),
                Err(_) => {
                    eprintln!("{}", "Usage: :select N".yellow());
                    Ok(())
                }
            }
        }
        _ => {
            let active = api.store().active_page();
            let shown = api
                .surface()
                .capture()
                .unwrap_or_else(|| Captured::new(active.title.clone(), active.content.clone()));
            let content = format!("{}<p>{}</p>", shown.content, escape_text(line));
            api.surface_mut().edit(&shown.title, &content);
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("{} {}", "Error:".red(), e);
    }
    true
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
