use anyhow::{Context, Result, bail};
use markdown_composer_config::Config;
use markdown_composer_engine::editing::{EditorSession, Operation, Selection, SessionOptions};
use markdown_composer_engine::{MessageLog, parse_markdown, render_html, serialize_to_markdown};
use std::path::{Path, PathBuf};
use std::{env, fs, io, process};

const USAGE: &str = "\
Usage:
  markdown-composer normalize [FILE]   print FILE in canonical Markdown
  markdown-composer html [FILE]        render FILE as HTML
  markdown-composer tree [FILE]        print the document tree of FILE
  markdown-composer format FILE OP...  apply toolbar operations to the whole document
  markdown-composer submit FILE        append FILE to the message log

FILE defaults to standard input. OP is one of:
  bold italic link link=URL underline strike code h1 h2 quote codeblock
  bullets numbers paragraph sink lift undo redo";

/// A toolbar operation and the URL given to the link button, as in
/// `link=https://example.com`.
#[derive(Debug, PartialEq)]
struct Step {
    op: Operation,
    url: Option<String>,
}

impl Step {
    fn parse(arg: &str) -> Result<Self> {
        let (name, url) = match arg.split_once('=') {
            Some((name, url)) => (name, Some(url.to_string())),
            None => (arg, None),
        };
        let op = name.parse::<Operation>()?;
        if url.is_some() && op != Operation::Link {
            bail!("{op} takes no URL");
        }
        Ok(Step { op, url })
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    Normalize(Option<PathBuf>),
    Html(Option<PathBuf>),
    Tree(Option<PathBuf>),
    Format(PathBuf, Vec<Step>),
    Submit(PathBuf),
}

impl Command {
    fn parse(args: &[String]) -> Result<Self> {
        let Some((name, rest)) = args.split_first() else {
            bail!("missing command");
        };
        let file = |i: usize| rest.get(i).map(PathBuf::from);
        let command = match name.as_str() {
            "normalize" => Command::Normalize(file(0)),
            "html" => Command::Html(file(0)),
            "tree" => Command::Tree(file(0)),
            "format" => {
                let Some(path) = file(0) else {
                    bail!("format needs a file");
                };
                let steps = rest[1..]
                    .iter()
                    .map(|arg| Step::parse(arg))
                    .collect::<Result<Vec<_>>>()?;
                Command::Format(path, steps)
            }
            "submit" => match file(0) {
                Some(path) => Command::Submit(path),
                None => bail!("submit needs a file"),
            },
            other => bail!("unknown command {other:?}"),
        };
        Ok(command)
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => io::read_to_string(io::stdin()).context("Failed to read standard input"),
    }
}

/// Applies `steps` in order, each to the whole document as it stands.
fn format(markdown: &str, steps: &[Step], options: &SessionOptions) -> Result<String> {
    let mut session = EditorSession::with_document(parse_markdown(markdown), options);
    for Step { op, url } in steps {
        let all = Selection::all(session.document());
        if !op.can_apply(&session, &all) {
            log::warn!("{op} is not available, skipping");
            continue;
        }
        let applied = match url {
            Some(url) => op.apply_with_url(&mut session, &all, url),
            None => op.apply(&mut session, &all),
        };
        applied.with_context(|| format!("Failed to apply {op}"))?;
    }
    Ok(session.to_markdown())
}

fn load_log(path: &Path) -> Result<MessageLog> {
    if !path.exists() {
        return Ok(MessageLog::new());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn save_log(log: &MessageLog, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(log)?)
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn submit(markdown: &str, config: &Config) -> Result<Option<String>> {
    let log_path = config.messages_path();
    let mut log = load_log(&log_path)?;
    let mut session = EditorSession::with_document(parse_markdown(markdown), &config.editor);
    let Some(id) = session.submit(&mut log) else {
        return Ok(None);
    };
    save_log(&log, &log_path)?;
    log::info!("appended message {id} to {}", log_path.display());
    Ok(Some(id.to_string()))
}

fn run(command: Command) -> Result<()> {
    let config_path = Config::config_path();
    log::debug!("Config path: {}", config_path.display());
    let config = Config::load_or_default(&config_path)?;

    match command {
        Command::Normalize(path) => {
            println!("{}", serialize_to_markdown(&parse_markdown(&read_input(path.as_deref())?)));
        }
        Command::Html(path) => {
            println!("{}", render_html(&parse_markdown(&read_input(path.as_deref())?)));
        }
        Command::Tree(path) => {
            println!("{}", parse_markdown(&read_input(path.as_deref())?));
        }
        Command::Format(path, steps) => {
            println!("{}", format(&read_input(Some(path.as_path()))?, &steps, &config.editor)?);
        }
        Command::Submit(path) => match submit(&read_input(Some(path.as_path()))?, &config)? {
            Some(id) => println!("{id}"),
            None => eprintln!("Nothing to submit"),
        },
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    if let Err(e) = run(command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
