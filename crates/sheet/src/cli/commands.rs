//! Command handlers: parse, initialize, dispatch, print.
//!
//! Each handler calls exactly one family of `SheetApi` methods and prints the
//! result. Handlers never touch storage directly, and the clock is read here
//! so the library stays deterministic.

use super::logging::{init_logging, LogConfig};
use super::render::{
    print_messages, render_goals, render_notes, render_sheet, render_stats, render_tags,
    render_timer,
};
use super::setup::{
    Cli, Commands, CoreCommands, DataCommands, EditCommands, GoalCommands, MiscCommands,
    QuestionCommands, SubTopicCommands, TagCommands, TimerCommands, TopicCommands,
};
use chrono::Utc;
use clap::Parser;
use sheetapp::api::SheetApi;
use sheetapp::commands::{CmdMessage, CmdResult};
use sheetapp::config::{SheetConfig, CONFIG_KEYS};
use sheetapp::error::{Result, SheetError};
use sheetapp::index::{self, DisplayPath};
use sheetapp::init::initialize;
use sheetapp::loader::{fetch_source, read_source, transform};
use sheetapp::model::{NewQuestion, Question};
use sheetapp::store::fs::FileBlobStore;
use sheetapp::timer::TimerState;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::info;

struct AppContext {
    api: SheetApi<FileBlobStore>,
    config: SheetConfig,
    data_dir: PathBuf,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbosity(cli.verbose));
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Core(cmd)) => match cmd {
            CoreCommands::List {
                search,
                favorites,
                tag,
            } => handle_list(&mut ctx, search, favorites, tag),
            CoreCommands::Stats => handle_stats(&ctx),
            CoreCommands::Tags => {
                print!("{}", render_tags(&ctx.api.all_tags()));
                Ok(())
            }
            CoreCommands::Done { targets } => {
                for_each_target(&mut ctx, &targets, |api, t| api.toggle_complete(t), |q| {
                    if q.is_completed {
                        "Completed"
                    } else {
                        "Reopened"
                    }
                })
            }
            CoreCommands::Fav { targets } => {
                for_each_target(&mut ctx, &targets, |api, t| api.toggle_favorite(t), |q| {
                    if q.is_favorite {
                        "Favorited"
                    } else {
                        "Unfavorited"
                    }
                })
            }
        },
        Some(Commands::Edit(cmd)) => match cmd {
            EditCommands::Topic(cmd) => handle_topic(&mut ctx, cmd),
            EditCommands::Subtopic(cmd) => handle_sub_topic(&mut ctx, cmd),
            EditCommands::Question(cmd) => handle_question(&mut ctx, cmd),
            EditCommands::Tag(cmd) => handle_tag(&mut ctx, cmd),
            EditCommands::Timer(cmd) => handle_timer(&mut ctx, cmd),
        },
        Some(Commands::Data(cmd)) => match cmd {
            DataCommands::Fetch { url } => handle_fetch(&mut ctx, url),
            DataCommands::Seed { file } => handle_seed(&mut ctx, &file),
            DataCommands::Export { dir } => {
                let result = ctx.api.export_to(&dir, Utc::now())?;
                print_messages(&result.messages);
                Ok(())
            }
            DataCommands::Import { file } => handle_import(&mut ctx, &file),
            DataCommands::Reset { yes } => handle_reset(&mut ctx, yes),
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Collapse => {
                let result = ctx.api.set_all_collapsed(true)?;
                report(&result, "Collapsed all topics", "Everything was already collapsed");
                Ok(())
            }
            MiscCommands::Expand => {
                let result = ctx.api.set_all_collapsed(false)?;
                report(&result, "Expanded all topics", "Everything was already expanded");
                Ok(())
            }
            MiscCommands::Theme => {
                let result = ctx.api.toggle_dark_mode()?;
                print_messages(&result.messages);
                Ok(())
            }
            MiscCommands::Goal(cmd) => handle_goal(&mut ctx, cmd),
            MiscCommands::Config { key, value } => handle_config(&mut ctx, key, value),
        },
        None => handle_list(&mut ctx, None, false, None),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let ctx = initialize(cli.data_dir.clone())?;
    Ok(AppContext {
        api: ctx.api,
        config: ctx.config,
        data_dir: ctx.data_dir,
    })
}

/// Prints the library's messages, or a default line for what happened.
fn report(result: &CmdResult, done: &str, unchanged: &str) {
    if !result.messages.is_empty() {
        print_messages(&result.messages);
    } else if result.changed {
        print_messages(&[CmdMessage::success(done)]);
    } else {
        print_messages(&[CmdMessage::info(unchanged)]);
    }
}

fn joined(words: &[String]) -> String {
    words.join(" ")
}

/// Display path of a question id in the current sheet, for messages.
fn question_path(api: &SheetApi<FileBlobStore>, id: &str) -> Option<DisplayPath> {
    api.sheet()
        .topics
        .iter()
        .enumerate()
        .find_map(|(t, topic)| {
            topic.sub_topics.iter().enumerate().find_map(|(s, sub)| {
                sub.questions
                    .iter()
                    .position(|q| q.id == id)
                    .map(|i| DisplayPath::Question(t + 1, s + 1, i + 1))
            })
        })
}

fn lookup_question<'a>(api: &'a SheetApi<FileBlobStore>, target: &str) -> Result<&'a Question> {
    let r = index::resolve_question(api.sheet(), target)?;
    api.sheet()
        .question(&r)
        .ok_or_else(|| SheetError::NotFound(target.to_string()))
}

/// Applies a question toggle to several targets, reporting each new state.
fn for_each_target<F, L>(
    ctx: &mut AppContext,
    targets: &[String],
    mut op: F,
    label: L,
) -> Result<()>
where
    F: FnMut(&mut SheetApi<FileBlobStore>, &str) -> Result<CmdResult>,
    L: Fn(&Question) -> &'static str,
{
    for target in targets {
        op(&mut ctx.api, target)?;
        let q = lookup_question(&ctx.api, target)?;
        print_messages(&[CmdMessage::success(format!("{}: {}", label(q), q.title))]);
    }
    Ok(())
}

fn handle_list(
    ctx: &mut AppContext,
    search: Option<String>,
    favorites: bool,
    tag: Option<String>,
) -> Result<()> {
    ctx.api.set_search_query(search.unwrap_or_default());
    ctx.api.set_show_favorites_only(favorites);
    ctx.api.set_tag_filter(tag.map(|t| t.to_lowercase()).unwrap_or_default());

    let out = render_sheet(
        ctx.api.sheet(),
        &ctx.api.visible(),
        &ctx.api.visible_topic_progress(),
        &ctx.api.stats(),
        ctx.api.state().dark_mode,
        Utc::now(),
    );
    print!("{}", out);
    Ok(())
}

fn handle_stats(ctx: &AppContext) -> Result<()> {
    print!(
        "{}",
        render_stats(&ctx.api.stats(), ctx.api.state().dark_mode)
    );
    Ok(())
}

fn handle_topic(ctx: &mut AppContext, cmd: TopicCommands) -> Result<()> {
    match cmd {
        TopicCommands::Add { title } => {
            let title = joined(&title);
            ctx.api.add_topic(&title)?;
            let n = ctx.api.sheet().topics.len();
            print_messages(&[CmdMessage::success(format!(
                "Added topic {} {}",
                n,
                title.trim()
            ))]);
        }
        TopicCommands::Edit { target, title } => {
            let result = ctx.api.edit_topic(&target, &joined(&title))?;
            report(&result, "Topic renamed", "Title unchanged");
        }
        TopicCommands::Delete { target } => {
            let result = ctx.api.delete_topic(&target)?;
            report(&result, "Topic deleted", "Nothing deleted");
        }
        TopicCommands::Toggle { target } => {
            let result = ctx.api.toggle_topic(&target)?;
            report(&result, "Topic toggled", "Nothing toggled");
        }
        TopicCommands::Move { target, to } => {
            let result = ctx.api.move_topic(&target, to)?;
            report(&result, &format!("Topic moved to {}", to), "Already there");
        }
    }
    Ok(())
}

fn handle_sub_topic(ctx: &mut AppContext, cmd: SubTopicCommands) -> Result<()> {
    match cmd {
        SubTopicCommands::Add { topic, title } => {
            let result = ctx.api.add_sub_topic(&topic, &joined(&title))?;
            report(&result, "Subtopic added", "Topic not found");
        }
        SubTopicCommands::Edit { target, title } => {
            let result = ctx.api.edit_sub_topic(&target, &joined(&title))?;
            report(&result, "Subtopic renamed", "Title unchanged");
        }
        SubTopicCommands::Delete { target } => {
            let result = ctx.api.delete_sub_topic(&target)?;
            report(&result, "Subtopic deleted", "Nothing deleted");
        }
        SubTopicCommands::Toggle { target } => {
            let result = ctx.api.toggle_sub_topic(&target)?;
            report(&result, "Subtopic toggled", "Nothing toggled");
        }
        SubTopicCommands::Move { target, to } => {
            let result = ctx.api.move_sub_topic(&target, to)?;
            report(&result, &format!("Subtopic moved to {}", to), "Already there");
        }
    }
    Ok(())
}

fn handle_question(ctx: &mut AppContext, cmd: QuestionCommands) -> Result<()> {
    match cmd {
        QuestionCommands::Add {
            sub_topic,
            difficulty,
            tags,
            url,
            solution,
            title,
        } => {
            let mut data = NewQuestion::new(joined(&title), difficulty);
            if !tags.is_empty() {
                data = data.with_tags(tags);
            }
            if let Some(url) = url {
                data = data.with_platform_url(url);
            }
            data.solution_url = solution;

            let result = ctx.api.add_question(&sub_topic, data)?;
            match result
                .created_id
                .as_deref()
                .and_then(|id| question_path(&ctx.api, id))
            {
                Some(path) => print_messages(&[CmdMessage::success(format!(
                    "Added question {}",
                    path
                ))]),
                None => report(&result, "Question added", "Subtopic not found"),
            }
        }
        QuestionCommands::Edit { target, title } => {
            let result = ctx.api.edit_question(&target, &joined(&title))?;
            report(&result, "Question renamed", "Title unchanged");
        }
        QuestionCommands::Delete { target } => {
            let result = ctx.api.delete_question(&target)?;
            report(&result, "Question deleted", "Nothing deleted");
        }
        QuestionCommands::Move { target, to } => {
            let result = ctx.api.move_question(&target, to)?;
            report(&result, &format!("Question moved to {}", to), "Already there");
        }
        QuestionCommands::Notes {
            target,
            clear,
            text,
        } => {
            if clear || !text.is_empty() {
                let result = ctx.api.update_notes(&target, &joined(&text))?;
                report(&result, "Notes saved", "Notes unchanged");
            } else {
                print!("{}", render_notes(lookup_question(&ctx.api, &target)?));
            }
        }
        QuestionCommands::Open { target, solution } => {
            let q = lookup_question(&ctx.api, &target)?;
            let (kind, link) = if solution {
                ("solution", q.solution_url.as_deref())
            } else {
                ("problem", q.platform_url.as_deref())
            };
            let link = link
                .filter(|l| !l.trim().is_empty())
                .ok_or_else(|| SheetError::NotFound(format!("{} has no {} link", q.title, kind)))?;
            info!(url = link, "opening link");
            open::that(link)?;
            println!("{}", link);
        }
    }
    Ok(())
}

fn handle_tag(ctx: &mut AppContext, cmd: TagCommands) -> Result<()> {
    let (target, tags, adding) = match cmd {
        TagCommands::Add { target, tags } => (target, tags, true),
        TagCommands::Remove { target, tags } => (target, tags, false),
    };
    for tag in &tags {
        let result = if adding {
            ctx.api.add_tag(&target, tag)?
        } else {
            ctx.api.remove_tag(&target, tag)?
        };
        let tag = tag.trim().to_lowercase();
        if adding {
            report(&result, &format!("Tagged #{}", tag), "");
        } else {
            report(
                &result,
                &format!("Removed #{}", tag),
                &format!("Question has no tag #{}", tag),
            );
        }
    }
    Ok(())
}

fn handle_timer(ctx: &mut AppContext, cmd: TimerCommands) -> Result<()> {
    let now = Utc::now();
    let target = match cmd {
        TimerCommands::Start { target } => {
            ctx.api.start_timer(&target, now)?;
            target
        }
        TimerCommands::Stop { target } => {
            let was_running = TimerState::of(lookup_question(&ctx.api, &target)?).is_running();
            ctx.api.stop_timer(&target, now)?;
            if !was_running {
                print_messages(&[CmdMessage::info("Timer was not running")]);
            }
            target
        }
        TimerCommands::Reset { target } => {
            ctx.api.reset_timer(&target, now)?;
            target
        }
        TimerCommands::Show { target: Some(target) } => target,
        TimerCommands::Show { target: None } => {
            let mut any = false;
            for (t, topic) in ctx.api.sheet().topics.iter().enumerate() {
                for (s, sub) in topic.sub_topics.iter().enumerate() {
                    for (i, q) in sub.questions.iter().enumerate() {
                        if TimerState::of(q).is_running() {
                            let path = DisplayPath::Question(t + 1, s + 1, i + 1);
                            print!("{}", render_timer(&path.to_string(), q, now));
                            any = true;
                        }
                    }
                }
            }
            if !any {
                print_messages(&[CmdMessage::info("No timers running")]);
            }
            return Ok(());
        }
    };

    let q = lookup_question(&ctx.api, &target)?;
    let path = question_path(&ctx.api, &q.id)
        .map(|p| p.to_string())
        .unwrap_or(target);
    print!("{}", render_timer(&path, q, now));
    Ok(())
}

fn handle_fetch(ctx: &mut AppContext, url: Option<String>) -> Result<()> {
    let url = url.unwrap_or_else(|| ctx.config.source_url.clone());
    let doc = fetch_source(&url).map_err(|e| match e {
        SheetError::Network(msg) => SheetError::Network(format!(
            "{}. Check your connection and run `sheet fetch` again",
            msg
        )),
        other => other,
    })?;
    let result = ctx.api.seed(transform(&doc, ctx.config.tag_limit))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_seed(ctx: &mut AppContext, file: &Path) -> Result<()> {
    let doc = read_source(file)?;
    let result = ctx.api.seed(transform(&doc, ctx.config.tag_limit))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, file: &Path) -> Result<()> {
    let text = fs::read_to_string(file)?;
    let result = ctx.api.import_progress(&text)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_reset(ctx: &mut AppContext, yes: bool) -> Result<()> {
    if !yes {
        print_messages(&[CmdMessage::warning(format!(
            "This deletes all progress and goals in {}. Re-run with --yes to confirm.",
            ctx.data_dir.display()
        ))]);
        return Ok(());
    }
    let result = ctx.api.reset_all()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_goal(ctx: &mut AppContext, cmd: GoalCommands) -> Result<()> {
    match cmd {
        GoalCommands::Add { text } => {
            ctx.api.add_goal(&joined(&text), Utc::now())?;
            print_messages(&[CmdMessage::success("Goal added")]);
        }
        GoalCommands::List => {
            print!("{}", render_goals(&ctx.api.goals()?));
        }
        GoalCommands::Toggle { target } => {
            ctx.api.toggle_goal(&target)?;
            print!("{}", render_goals(&ctx.api.goals()?));
        }
        GoalCommands::Delete { target } => {
            let result = ctx.api.delete_goal(&target)?;
            report(&result, "Goal deleted", "Nothing deleted");
        }
        GoalCommands::Clear => {
            let result = ctx.api.clear_completed_goals()?;
            print_messages(&result.messages);
        }
    }
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            for key in CONFIG_KEYS {
                println!("{} = {}", key, ctx.config.get(key)?);
            }
            println!("data_dir = {}", ctx.data_dir.display());
        }
        (Some(key), None) => {
            println!("{}", ctx.config.get(&key)?);
        }
        (Some(key), Some(value)) => {
            ctx.config.set(&key, &value)?;
            ctx.config.save(&ctx.data_dir)?;
            print_messages(&[CmdMessage::success(format!(
                "{} = {}",
                key,
                ctx.config.get(&key)?
            ))]);
        }
    }
    Ok(())
}
