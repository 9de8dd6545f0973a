use clap::{Parser, Subcommand};
use runic_codegen::{escape_html, HighlightConfig};
use runic_lexer::Lexer;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "runic")]
#[command(about = "Runic plain-text markup to HTML renderer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a Runic file to a standalone HTML page
    Build {
        /// Input Runic file
        path: String,

        /// Output file (defaults to `<stem>.html` next to the input)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Report invalid headings and tag names without generating output
    Check {
        /// Input Runic file
        path: String,
    },

    /// Print the parsed document tree as JSON
    Tree {
        /// Input Runic file
        path: String,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print the token stream, one JSON object per line
    Tokens {
        /// Input Runic file
        path: String,
    },

    /// Print editor highlight markup
    Highlight {
        /// Input Runic file
        path: String,

        /// Prefix for the generated span classes
        #[arg(long, default_value = "runic__")]
        class_prefix: String,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("cannot derive an output name from {0}")]
    InvalidPath(String),

    #[error("reading {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("writing {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("encoding JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Build { path, out } => cmd_build(&path, out),
        Command::Check { path } => cmd_check(&path),
        Command::Tree { path, pretty } => cmd_tree(&path, pretty),
        Command::Tokens { path } => cmd_tokens(&path),
        Command::Highlight { path, class_prefix } => cmd_highlight(&path, class_prefix),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn read_source(path: &str) -> Result<String, CliError> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(CliError::NotFound(path.to_string()));
    }
    log::debug!("reading {path}");
    std::fs::read_to_string(p).map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })
}

/// `--out` if given, otherwise `<stem>.html` next to the source.
fn output_path(path: &str, out: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(out) = out {
        return Ok(out);
    }
    let stem = Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| CliError::InvalidPath(path.to_string()))?;
    let dir = Path::new(path).parent().unwrap_or(Path::new("."));
    Ok(dir.join(format!("{stem}.html")))
}

fn standalone_html(title: &str, body: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n");
    html.push_str(&format!("  <title>{}</title>\n", escape_html(title)));
    html.push_str("</head>\n<body>\n");
    html.push_str(body);
    html.push_str("\n</body>\n</html>\n");
    html
}

fn cmd_build(path: &str, out: Option<PathBuf>) -> Result<ExitCode, CliError> {
    let source = read_source(path)?;
    let html_path = output_path(path, out)?;

    let title = Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("runic");
    let html = standalone_html(title, &runic_codegen::to_html(&source));

    std::fs::write(&html_path, html).map_err(|source| CliError::Write {
        path: html_path.display().to_string(),
        source,
    })?;

    eprintln!("Built: {}", html_path.display());
    Ok(ExitCode::SUCCESS)
}

/// One `path: message` line per markup error, in document order.
fn check_report(path: &str, source: &str) -> Vec<String> {
    runic_parser::Parser::parse(source)
        .errors()
        .into_iter()
        .map(|(error, literal)| format!("{path}: {error}: {literal}"))
        .collect()
}

fn cmd_check(path: &str) -> Result<ExitCode, CliError> {
    let source = read_source(path)?;
    let report = check_report(path, &source);

    if report.is_empty() {
        eprintln!("OK: {path}");
        return Ok(ExitCode::SUCCESS);
    }
    for line in &report {
        eprintln!("{line}");
    }
    eprintln!("{} error(s) in {path}", report.len());
    Ok(ExitCode::FAILURE)
}

fn cmd_tree(path: &str, pretty: bool) -> Result<ExitCode, CliError> {
    let source = read_source(path)?;
    let tree = runic_parser::Parser::parse(&source);
    let json = if pretty {
        serde_json::to_string_pretty(&tree)?
    } else {
        serde_json::to_string(&tree)?
    };
    println!("{json}");
    Ok(ExitCode::SUCCESS)
}

fn cmd_tokens(path: &str) -> Result<ExitCode, CliError> {
    let source = read_source(path)?;
    for token in Lexer::new(&source) {
        println!("{}", serde_json::to_string(&token)?);
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_highlight(path: &str, class_prefix: String) -> Result<ExitCode, CliError> {
    let source = read_source(path)?;
    let config = HighlightConfig {
        class_prefix,
        ..HighlightConfig::default()
    };
    println!("{}", runic_codegen::highlight::highlight(&source, &config));
    Ok(ExitCode::SUCCESS)
}
