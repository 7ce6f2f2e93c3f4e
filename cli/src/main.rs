//! bijak CLI - quotation and invoice PDF generator

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::debug;

use bijak::{DEFAULT_COMPANY_NAME, DocumentError, DocumentKind, RenderOptions};

#[derive(Parser)]
#[command(name = "bijak")]
#[command(version)]
#[command(about = "Generate a quotation or invoice PDF from a JSON record", long_about = None)]
struct Cli {
    /// Document type: quotation or invoice
    #[arg(value_name = "TYPE")]
    doc_type: String,

    /// JSON record to render
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Where to write the PDF
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Company name printed in the header
    #[arg(long, env = "BIJAK_COMPANY_NAME", default_value = DEFAULT_COMPANY_NAME)]
    company_name: String,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> Result<(DocumentKind, PathBuf), DocumentError> {
    let kind: DocumentKind = cli.doc_type.parse()?;
    let options = RenderOptions::default().with_company_name(&cli.company_name);
    debug!("rendering {kind} for {}", options.company_name);
    let path = bijak::generate(kind.tag(), &cli.input, &cli.output, &options)?;
    Ok((kind, path))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&cli) {
        Ok((kind, path)) => {
            println!("{} PDF generated: {}", kind.display_name(), path.display());
            ExitCode::SUCCESS
        }
        Err(e @ DocumentError::UnknownDocumentType(_)) => {
            eprintln!("error: {e} (expected 'quotation' or 'invoice')");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
