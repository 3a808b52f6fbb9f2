use clap::Parser;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use zmarkup::{
    demo::{commands_page, index_page, not_found_page},
    enums::{DemoPage, Encoding, OutputForm, Profile},
    error::{IOError, MarkupError, Result},
    replay,
    utils::{read_file, write_file},
    Document,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File holding the code form (defaults to stdin)
    #[arg(value_name = "INPUT", conflicts_with = "demo")]
    input: Option<PathBuf>,

    /// Build one of the bundled pages instead of reading input
    #[arg(long, value_enum)]
    demo: Option<DemoPage>,

    /// Row of the commands page, as NAME=DESCRIPTION
    #[arg(long = "command", value_name = "NAME=DESCRIPTION", value_parser = parse_command)]
    commands: Vec<(String, String)>,

    /// Requested path shown on the not-found page
    #[arg(long, default_value = "/missing")]
    path: String,

    /// Text format of the rendering
    #[arg(short, long, value_enum, default_value_t = Profile::Dev)]
    profile: Profile,

    /// Render markup or construction code
    #[arg(short = 'f', long, value_enum, default_value_t = OutputForm::Text)]
    form: OutputForm,

    /// Byte encoding of the output
    #[arg(short, long, value_enum, default_value_t = Encoding::Utf8)]
    encoding: Encoding,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_command(value: &str) -> std::result::Result<(String, String), String> {
    value
        .split_once('=')
        .map(|(name, description)| (name.to_string(), description.to_string()))
        .ok_or_else(|| format!("expected NAME=DESCRIPTION, got `{}`", value))
}

fn main() {
    // Initialize the default subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| MarkupError::from(IOError::ReadError("stdin".to_string())).with_source(e))?;
    Ok(buffer)
}

fn build(args: &Args) -> Result<Document> {
    match (args.demo, &args.input) {
        (Some(DemoPage::Index), _) => index_page(args.encoding),
        (Some(DemoPage::Commands), _) => commands_page(&args.commands, args.encoding),
        (Some(DemoPage::NotFound), _) => not_found_page(&args.path, args.encoding),
        (None, Some(path)) => {
            info!("Reading file: {}", path.display());
            replay(&read_file(path)?)
        }
        (None, None) => {
            info!("Reading code from stdin");
            replay(&read_stdin()?)
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let doc = build(&args)?;

    let format = args.profile.format();
    let rendered = match args.form {
        OutputForm::Text => doc.render(&format)?,
        OutputForm::Code => doc.render_code(&format)?,
    };
    let bytes = args.encoding.encode(&rendered);

    // Write to file or print to stdout
    if let Some(output_path) = &args.output {
        info!("Writing {} bytes to {}", bytes.len(), output_path.display());
        write_file(output_path, &bytes)?;
    } else {
        let mut stdout = io::stdout();
        stdout
            .write_all(&bytes)
            .and_then(|()| stdout.flush())
            .map_err(|e| {
                MarkupError::from(IOError::WriteError("stdout".to_string())).with_source(e)
            })?;
    }

    Ok(())
}
