mod script;

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use annotate::config::SessionConfig;
use annotate::doc::Annotation;
use annotate::engine::{Action, Session};
use annotate::error::AnnotateError;
use annotate::render;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid script event on line {line}: {source}")]
    Script { line: usize, source: serde_json::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("annotation error: {0}")]
    Annotate(#[from] AnnotateError),
}

#[derive(Parser, Debug)]
#[command(name = "annotate-cli", about = "Replay and render image annotations")]
struct Cli {
    /// Log gesture and store transitions.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drive a session from a JSON-lines event script and print the resulting annotations.
    Replay(ReplayArgs),
    /// Print draw commands for a JSON annotation list.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[arg(long, default_value = "-", help = "Script file path, or - for stdin")]
    input: String,

    #[arg(long, env = "ANNOTATE_IMAGE_URL", default_value = "stdin://image")]
    image_url: String,

    #[arg(long, env = "ANNOTATE_MAX_CONTENT", default_value_t = annotate::consts::DEFAULT_MAX_CONTENT_ANNOTATIONS)]
    max_content: usize,

    /// Size the image box before the script runs.
    #[arg(long, env = "ANNOTATE_WIDTH", requires = "height")]
    width: Option<f64>,

    #[arg(long, env = "ANNOTATE_HEIGHT", requires = "width")]
    height: Option<f64>,

    #[arg(long, help = "Restore this annotation list (JSON array) before replaying")]
    restore: Option<String>,

    #[arg(long, default_value_t = false, help = "Also print the final draw commands")]
    render: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[arg(long, default_value = "-", help = "Annotation list file path, or - for stdin")]
    input: String,

    #[arg(long, env = "ANNOTATE_WIDTH")]
    width: f64,

    #[arg(long, env = "ANNOTATE_HEIGHT")]
    height: f64,
}

#[derive(Serialize)]
struct ReplayOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<ImageSize>,
    annotations: &'a [Annotation],
    #[serde(skip_serializing_if = "Option::is_none")]
    draw: Option<Vec<render::DrawCommand>>,
}

#[derive(Serialize)]
struct ImageSize {
    width: u32,
    height: u32,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).with_writer(io::stderr).init();

    match cli.command {
        Command::Replay(args) => run_replay(args),
        Command::Render(args) => run_render(args),
    }
}

fn run_replay(args: ReplayArgs) -> Result<(), CliError> {
    let mut config = SessionConfig::new(args.image_url);
    config.max_content_annotations = args.max_content;
    let mut session = Session::new(config);

    if let Some(path) = &args.restore {
        let list: Vec<Annotation> = serde_json::from_reader(open_input(path)?)?;
        session.load_annotations(list)?;
    }
    if let (Some(width), Some(height)) = (args.width, args.height) {
        session.set_viewport(width, height);
    }

    let events = script::parse_script(open_input(&args.input)?)?;
    tracing::info!(events = events.len(), "replaying script");
    for event in &events {
        for action in script::apply(&mut session, event) {
            log_action(&action);
        }
    }

    let image = session.image_size().map(|(width, height)| ImageSize { width, height });
    let draw = args.render.then(|| session.render());
    print_json(&ReplayOutput { image, annotations: session.annotations(), draw })
}

fn run_render(args: RenderArgs) -> Result<(), CliError> {
    let list: Vec<Annotation> = serde_json::from_reader(open_input(&args.input)?)?;
    print_json(&render::draw(&list, args.width, args.height))
}

fn log_action(action: &Action) {
    match action {
        Action::AnnotationAdded(a) => tracing::info!(id = %a.id(), "added {a}"),
        Action::AnnotationRemoved { id } => tracing::info!(%id, "removed"),
        Action::DescriptionRequested { position } => {
            tracing::info!(x = position.x, y = position.y, "description requested");
        }
        Action::Notice(n) => tracing::warn!(code = n.code, "{}", n.message),
        Action::RenderNeeded => {}
    }
}

fn open_input(path: &str) -> Result<Box<dyn BufRead>, CliError> {
    if path == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    Ok(Box::new(BufReader::new(File::open(path)?)))
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
