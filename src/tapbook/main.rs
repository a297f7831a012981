use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::time::Duration;
use tapbook::api::{CmdMessage, MessageLevel, TapbookApi};
use tapbook::error::{Result, TapbookError};
use tapbook::model::Book;
use tapbook::playback::{MediaSink, PlaybackController, SinkError, TriggerOutcome};
use tapbook::resolver;
use tapbook::store::fs::FileStore;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands, PoolAction};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: TapbookApi<FileStore>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Init => handle_init(&mut ctx),
        Commands::Pages => handle_pages(&ctx),
        Commands::Show { page } => handle_show(&ctx, page),
        Commands::AddPage => print_result(ctx.api.add_page()),
        Commands::RemovePage { page } => print_result(ctx.api.remove_page(&page)),
        Commands::RenamePage { from, to } => print_result(ctx.api.rename_page(&from, &to)),
        Commands::AddButton { page, x, y } => print_result(ctx.api.add_button(&page, x, y)),
        Commands::DeleteButton { page, index } => {
            print_result(ctx.api.delete_button(&page, index))
        }
        Commands::MoveButton {
            page,
            index,
            direction,
        } => print_result(ctx.api.move_button(&page, index, direction.into())),
        Commands::PlaceButton { page, index, x, y } => {
            print_result(ctx.api.set_position(&page, index, x, y))
        }
        Commands::Override {
            page,
            index,
            value,
            clear,
        } => {
            let value = if clear { None } else { value };
            print_result(ctx.api.set_override(&page, index, value.as_deref()))
        }
        Commands::Sequence { page, entries } => {
            print_result(ctx.api.set_sequence(&page, &entries))
        }
        Commands::ClearButtons { page } => print_result(ctx.api.clear_buttons(&page)),
        Commands::Pool { action } => handle_pool(&mut ctx, action),
        Commands::Image {
            page,
            path,
            orientation,
        } => print_result(ctx.api.set_image(&page, path.as_deref(), orientation.map(Into::into))),
        Commands::Resolve { page, index } => handle_resolve(&ctx, &page, index),
        Commands::Plan { page } => handle_plan(&ctx, page),
        Commands::Play {
            page,
            button,
            delay_ms,
        } => handle_play(&ctx, page, button, delay_ms),
        Commands::Backup => handle_backup(&mut ctx),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let book_path = cli
        .book
        .clone()
        .unwrap_or_else(|| PathBuf::from("book.json"));

    // TAPBOOK_HOME redirects backups, mainly for tests and sandboxes.
    let backup_dir = match std::env::var_os("TAPBOOK_HOME") {
        Some(home) => PathBuf::from(home).join("backups"),
        None => ProjectDirs::from("com", "tapbook", "tapbook")
            .ok_or_else(|| TapbookError::Store("could not determine data dir".to_string()))?
            .data_dir()
            .join("backups"),
    };

    let store = FileStore::new(book_path, backup_dir);
    let api = TapbookApi::new(store)?;
    Ok(AppContext { api })
}

fn handle_init(ctx: &mut AppContext) -> Result<()> {
    // Loading already substituted the starter book if nothing was on disk;
    // init just makes it durable.
    ctx.api.save()?;
    println!(
        "{}",
        format!("Book ready ({} page)", ctx.api.book().pages.len()).green()
    );
    Ok(())
}

fn handle_pages(ctx: &AppContext) -> Result<()> {
    let book = ctx.api.book();
    if book.pages.is_empty() {
        println!("No pages.");
        return Ok(());
    }

    let id_col = book
        .pages
        .ids()
        .map(|id| id.width())
        .max()
        .unwrap_or(0)
        .max(4);

    for (id, page) in book.pages.iter() {
        let pad = " ".repeat(id_col.saturating_sub(id.width()));
        let image = if page.image.is_empty() {
            "-".dimmed().to_string()
        } else {
            page.image.clone()
        };
        println!(
            "{}{}  {:>2} button{}  seq {:?}  {}",
            id.bold(),
            pad,
            page.buttons.len(),
            if page.buttons.len() == 1 { " " } else { "s" },
            page.sequence,
            image
        );
    }
    Ok(())
}

fn handle_show(ctx: &AppContext, page: Option<String>) -> Result<()> {
    let book = ctx.api.book();
    let page_id = resolve_page_arg(book, page)?;
    let page = book.page(&page_id)?;

    println!("{}", page_id.bold());
    if !page.image.is_empty() {
        println!(
            "  image: {} ({})",
            page.image, page.image_settings.orientation
        );
    }
    println!("  sequence: {:?}", page.sequence);

    // Buttons are numbered across the whole book, the way authors label
    // their recording sheets.
    let offset = book.global_button_offset(&page_id);
    for (i, button) in page.buttons.iter().enumerate() {
        let media = resolver::resolve(book, &page_id, button)
            .map(|m| format!("{} ({})", m.url, m.kind))
            .unwrap_or_else(|_| "no audio".dimmed().to_string());
        println!(
            "  #{:<3} ({:.2}, {:.2}) pos {}  {}",
            offset + i + 1,
            button.x,
            button.y,
            button.pos,
            media
        );
    }
    Ok(())
}

fn handle_pool(ctx: &mut AppContext, action: PoolAction) -> Result<()> {
    match action {
        PoolAction::List => {
            let pool = &ctx.api.book().audio_pool;
            if pool.is_empty() {
                println!("Audio pool is empty.");
            }
            for (i, file) in pool.iter().enumerate() {
                println!("{:>3}  {}", i, file);
            }
            Ok(())
        }
        PoolAction::Set { files } => print_result(ctx.api.set_pool(&files)),
    }
}

fn handle_resolve(ctx: &AppContext, page: &str, index: usize) -> Result<()> {
    let media = ctx.api.resolve(page, index)?;
    println!("{} ({})", media.url, media.kind);
    Ok(())
}

fn handle_plan(ctx: &AppContext, page: Option<String>) -> Result<()> {
    let book = ctx.api.book();
    let page_id = resolve_page_arg(book, page)?;
    for media in ctx.api.preload_plan(&page_id)? {
        println!("{}", media.url);
    }
    Ok(())
}

fn handle_backup(ctx: &mut AppContext) -> Result<()> {
    let name = ctx.api.backup()?;
    println!("{}", format!("Backup written: {}", name).green());
    Ok(())
}

/// Terminal stand-in for a real media element: announces what would play.
struct CliSink {
    url: String,
}

impl MediaSink for CliSink {
    fn set_source(&mut self, url: &str) {
        self.url = url.to_string();
    }

    async fn play(&mut self) -> std::result::Result<(), SinkError> {
        println!("{} {}", "▶".green(), self.url);
        Ok(())
    }

    fn pause(&mut self) {}

    fn reset(&mut self) {
        self.url.clear();
    }
}

fn handle_play(
    ctx: &AppContext,
    page: Option<String>,
    button: Option<usize>,
    delay_ms: u64,
) -> Result<()> {
    let book = ctx.api.book();
    let page_id = resolve_page_arg(book, page)?;
    let mut controller =
        PlaybackController::new(|_kind| CliSink { url: String::new() });

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(TapbookError::Io)?;

    runtime.block_on(async {
        match button {
            Some(index) => {
                let outcome = controller.trigger(book, &page_id, index, None).await?;
                match outcome {
                    TriggerOutcome::NoAudioFound => {
                        println!("{}", "Button has no audio.".yellow())
                    }
                    TriggerOutcome::PlaybackFailed => {
                        println!("{}", "Playback failed.".yellow())
                    }
                    TriggerOutcome::Played | TriggerOutcome::Stopped => {}
                }
            }
            None => {
                let outcome = controller
                    .play_page_sequence(book, &page_id, Duration::from_millis(delay_ms), || true)
                    .await?;
                if let tapbook::playback::SequenceOutcome::Completed { played, skipped } = outcome
                {
                    let summary = format!("Played {} button(s), {} skipped", played, skipped);
                    println!("{}", summary.dimmed());
                }
            }
        }
        Ok::<(), TapbookError>(())
    })?;
    Ok(())
}

fn resolve_page_arg(book: &Book, page: Option<String>) -> Result<String> {
    match page {
        Some(id) => {
            book.page(&id)?;
            Ok(id)
        }
        None => book
            .pages
            .first_id()
            .map(str::to_string)
            .ok_or(TapbookError::NoPages),
    }
}

fn print_result(result: Result<tapbook::api::CmdResult>) -> Result<()> {
    print_messages(&result?.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}
