//! Command-line interface for org-outline
//! This binary parses outline files, runs view queries over them and prints the result in
//! one of the registered formats.
//!
//! Usage:
//!   org parse `<path>` [--format `<format>`]           - Print every node of a document
//!   org query `<path>` [filters] [--format `<format>`] - Filter, sort and pick nodes
//!   org tags `<path>`                                - List the tags used in a document
//!   org formats                                      - List the available output formats

use clap::{Arg, ArgAction, ArgMatches, Command};
use org_outline::org::config::{Loader, OrgConfig};
use org_outline::org::error::OrgError;
use org_outline::org::loader::DocumentLoader;
use org_outline::org::query::OrgQuery;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn build_cli() -> Command {
    let path_arg = Arg::new("path")
        .help("Path to the outline file")
        .required(true)
        .index(1);
    let format_arg = Arg::new("format")
        .long("format")
        .short('f')
        .help("Output format (org, json, yaml, treeviz); defaults to the configured format");

    Command::new("org")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing and querying outline files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("keywords")
                .long("keywords")
                .global(true)
                .value_delimiter(',')
                .help("Comma separated TODO keywords replacing the configured ones"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log parser decisions to stderr"),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a file and print all of its nodes")
                .arg(path_arg.clone())
                .arg(format_arg.clone()),
        )
        .subcommand(
            Command::new("query")
                .about("Select nodes of a file")
                .arg(path_arg.clone())
                .arg(format_arg)
                .arg(
                    Arg::new("subtree")
                        .long("subtree")
                        .help("Restrict to the subtree below the first heading with this headline"),
                )
                .arg(
                    Arg::new("tag")
                        .long("tag")
                        .short('t')
                        .action(ArgAction::Append)
                        .help("Keep nodes carrying this tag (repeatable)"),
                )
                .arg(
                    Arg::new("reject-tag")
                        .long("reject-tag")
                        .action(ArgAction::Append)
                        .help("Drop nodes carrying this tag (repeatable)"),
                )
                .arg(
                    Arg::new("no-archived")
                        .long("no-archived")
                        .action(ArgAction::SetTrue)
                        .help("Drop archived nodes"),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .value_parser(["level", "headline", "todo", "priority", "scheduled"])
                        .help("Stable sort key"),
                )
                .arg(
                    Arg::new("first")
                        .long("first")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("random")
                        .help("Keep only the first selected node"),
                )
                .arg(
                    Arg::new("random")
                        .long("random")
                        .action(ArgAction::SetTrue)
                        .help("Keep one randomly chosen node"),
                ),
        )
        .subcommand(
            Command::new("tags")
                .about("List the tags used in a file")
                .arg(path_arg),
        )
        .subcommand(Command::new("formats").about("List available output formats"))
}

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {}", e);
        std::process::exit(1);
    });
    let loader = DocumentLoader::from_config(&config);

    let result = match matches.subcommand() {
        Some(("parse", sub)) => handle_parse_command(&loader, sub).await,
        Some(("query", sub)) => handle_query_command(&loader, sub).await,
        Some(("tags", sub)) => handle_tags_command(&loader, sub).await,
        Some(("formats", _)) => Ok(handle_formats_command(&loader)),
        _ => unreachable!(),
    };

    match result {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Warnings by default; `--verbose` or `RUST_LOG` raise the level
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("warn,org_outline=debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<OrgConfig, OrgError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(keywords) = matches.get_many::<String>("keywords") {
        let keywords: Vec<String> = keywords.cloned().collect();
        loader = loader.set_override("parser.todo_keywords", keywords)?;
    }
    Ok(loader.build()?)
}

fn path_of(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("path")
        .map(String::as_str)
        .expect("path is a required argument")
}

fn format_of<'a>(matches: &'a ArgMatches, loader: &'a DocumentLoader) -> &'a str {
    matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or_else(|| loader.default_format())
}

async fn load_view(loader: &DocumentLoader, path: &str) -> Result<OrgQuery, OrgError> {
    let doc = loader.load_and_parse_async(path).await?;
    debug!(path, nodes = doc.nodes.len(), "parsed document");
    Ok(doc.into_query())
}

/// Handle the parse command
async fn handle_parse_command(
    loader: &DocumentLoader,
    matches: &ArgMatches,
) -> Result<String, OrgError> {
    let view = load_view(loader, path_of(matches)).await?;
    loader.render(&view, format_of(matches, loader))
}

/// Handle the query command
async fn handle_query_command(
    loader: &DocumentLoader,
    matches: &ArgMatches,
) -> Result<String, OrgError> {
    let mut view = load_view(loader, path_of(matches)).await?;

    if let Some(headline) = matches.get_one::<String>("subtree") {
        let anchor = view.select(|node| node.headline() == headline.as_str());
        if anchor.is_empty() {
            eprintln!("Error: no heading named {:?}", headline);
            std::process::exit(2);
        }
        let anchor = OrgQuery::from_nodes(anchor.first().cloned());
        view = view.select_subtree(&anchor)?;
    }
    if let Some(tags) = matches.get_many::<String>("tag") {
        for tag in tags {
            view = view.select_tag(tag);
        }
    }
    if let Some(tags) = matches.get_many::<String>("reject-tag") {
        for tag in tags {
            view = view.reject_tag(tag);
        }
    }
    if matches.get_flag("no-archived") {
        view = view.reject_archived();
    }
    if let Some(key) = matches.get_one::<String>("sort") {
        view = sort_view(&view, key);
    }
    if matches.get_flag("first") {
        view = OrgQuery::from_nodes(view.first().cloned());
    } else if matches.get_flag("random") {
        view = OrgQuery::from_nodes(view.random().cloned());
    }

    loader.render(&view, format_of(matches, loader))
}

fn sort_view(view: &OrgQuery, key: &str) -> OrgQuery {
    match key {
        "level" => view.sort_by_key(|node| node.level()),
        "headline" => view.sort_by(|a, b| a.headline().cmp(b.headline())),
        "todo" => view.sort_by_key(|node| node.todo().map(str::to_string)),
        // Nodes without a value sort last
        "priority" => view.sort_by_key(|node| (node.priority().is_none(), node.priority())),
        "scheduled" => view.sort_by_key(|node| (node.scheduled().is_none(), node.scheduled())),
        _ => view.clone(),
    }
}

/// Handle the tags command
async fn handle_tags_command(
    loader: &DocumentLoader,
    matches: &ArgMatches,
) -> Result<String, OrgError> {
    let view = load_view(loader, path_of(matches)).await?;
    Ok(view
        .file_tags()
        .iter()
        .map(|tag| format!("{}\n", tag))
        .collect())
}

/// Handle the formats command
fn handle_formats_command(loader: &DocumentLoader) -> String {
    let formats = loader.formats();
    let mut out = String::from("Available formats:\n\n");
    for name in formats.list_formats() {
        out.push_str(&format!("  {}\n", name));
        if let Some(description) = formats.get(&name).map(|f| f.description()) {
            if !description.is_empty() {
                out.push_str(&format!("    {}\n", description));
            }
        }
    }
    out
}
