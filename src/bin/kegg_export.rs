use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use kegg_pathway_export::app::App;
use kegg_pathway_export::domain::OrganismCode;
use kegg_pathway_export::error::ExportError;
use kegg_pathway_export::kegg::KeggHttpClient;
use kegg_pathway_export::output::{JsonOutput, OutputMode, TextProgress};

#[derive(Parser)]
#[command(name = "kegg-export")]
#[command(about = "Export per-pathway KEGG reaction and compound lists for an organism")]
#[command(version, author)]
struct Cli {
    organism: String,
    prefix: String,

    #[arg(long)]
    endpoint: Option<String>,

    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(export) = report.downcast_ref::<ExportError>() {
            return ExitCode::from(map_exit_code(export));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &ExportError) -> u8 {
    match error {
        ExportError::PathwayIdMismatch { .. }
        | ExportError::CompoundIdMismatch(_)
        | ExportError::ReactionIdMismatch(_) => 2,
        ExportError::KeggHttp(_) | ExportError::KeggStatus { .. } => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let Cli {
        organism,
        prefix,
        endpoint,
        json,
    } = parse_cli();
    let output_mode = if json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };

    // ExportError goes into the report unwrapped so main's downcast_ref can map exit codes.
    let organism: OrganismCode = organism.parse()?;
    let kegg = match endpoint {
        Some(url) => KeggHttpClient::with_base_url(url)?,
        None => KeggHttpClient::new()?,
    };
    let app = App::new(kegg);

    match output_mode {
        OutputMode::Text => {
            app.export(&organism, &prefix, &TextProgress)?;
        }
        OutputMode::Json => {
            let result = app.export(&organism, &prefix, &JsonOutput)?;
            JsonOutput::print_export(&result).into_diagnostic()?;
        }
    }

    Ok(())
}

// Usage errors land on stdout with status 1, not clap's stderr/2 default.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let rendered = err.render();
            let mut stdout = io::stdout();
            let _ = write!(stdout, "{rendered}");
            let _ = stdout.flush();
            let status = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(status);
        }
    }
}
