use clap::Parser;
use serde_json::json;

use lang_negotiation::{Flow, Method, NegotiationEngine, NegotiationOption, RequestView};

/// Negotiate a single synthetic request and print the decision as JSON.
#[derive(Parser)]
#[command(name = "negotiate-cli")]
#[command(about = "Dry-run language negotiation for one request", long_about = None)]
struct Cli {
    /// Supported languages, default first (comma separated).
    #[arg(short, long, value_delimiter = ',', required = true)]
    languages: Vec<String>,

    /// Enabled method: path_prefix, subdomain or header. Repeatable.
    #[arg(short, long = "method", default_value = "header")]
    methods: Vec<Method>,

    /// Enabled option, e.g. no_vary. Repeatable.
    #[arg(short, long = "option")]
    options: Vec<NegotiationOption>,

    /// Request path.
    #[arg(long, default_value = "/")]
    path: String,

    /// Request query string, without '?'.
    #[arg(long)]
    query: Option<String>,

    /// Request host.
    #[arg(long)]
    host: Option<String>,

    /// Request scheme.
    #[arg(long, default_value = "http")]
    scheme: String,

    /// Accept-Language header value.
    #[arg(short, long)]
    accept_language: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let engine = NegotiationEngine::build(
        cli.languages,
        cli.methods.into_iter().collect(),
        cli.options.into_iter().collect(),
    )?;

    let request = RequestView {
        path: &cli.path,
        query: cli.query.as_deref(),
        host: cli.host.as_deref(),
        scheme: &cli.scheme,
        accept_language: cli.accept_language.as_deref(),
    };
    let negotiation = engine.negotiate(&request);
    let instructions = &negotiation.instructions;

    let output = json!({
        "result": negotiation.result,
        "continue": negotiation.flow == Flow::Continue,
        "instructions": {
            "content_language": instructions.content_language,
            "vary_accept_language": instructions.vary_accept_language,
            "redirect": instructions.redirect.as_ref().map(|r| json!({
                "location": r.location,
                "status": r.status.as_u16(),
            })),
            "terminal_status": instructions.terminal_status.map(|s| s.as_u16()),
        },
        "router_pattern": engine.config().router_pattern(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
