use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use core_types::{Metadata, WptDisplay};
use document::{DirDataFiles, Document};
use eyre::{Result, WrapErr};
use net::{HttpProbe, ProbeOptions};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Expands web-platform-tests annotations in standards documents and checks their links.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Expand a document and write the result
    Process {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write output even when fatal errors were reported
        #[arg(long)]
        force: bool,
    },
    /// Only request every external link of a document
    CheckLinks {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Input document
    input: PathBuf,

    /// Metadata file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding data files such as wpt-tests.txt (default: the input's directory)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[arg(long)]
    wpt_path_prefix: Option<String>,

    /// none, inline, open or closed
    #[arg(long)]
    wpt_display: Option<WptDisplay>,

    /// Request every external link and warn about broken ones
    #[arg(long)]
    check_links: bool,

    /// Validate TLS certificates while checking links
    #[arg(long)]
    verify_certificates: bool,

    /// Per-request timeout in seconds while checking links
    #[arg(long, value_name = "SECS")]
    link_timeout: Option<u64>,
}

impl InputArgs {
    fn metadata(&self) -> Result<Metadata> {
        let mut md = match &self.config {
            Some(path) => Metadata::load(path)?,
            None => Metadata::default(),
        };
        if let Some(prefix) = &self.wpt_path_prefix {
            md.wpt_path_prefix = Some(prefix.clone());
        }
        if let Some(display) = self.wpt_display {
            md.wpt_display = display;
        }
        md.complain_about.broken_links |= self.check_links;
        md.link_check.verify_certificates |= self.verify_certificates;
        if self.link_timeout.is_some() {
            md.link_check.timeout_secs = self.link_timeout;
        }
        Ok(md)
    }

    fn data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.clone(),
            None => self
                .input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        }
    }

    fn load(&self) -> Result<Document> {
        let md = self.metadata()?;
        let source = fs::read_to_string(&self.input)
            .wrap_err_with(|| format!("failed to read {}", self.input.display()))?;
        let files = DirDataFiles::new(self.data_dir());
        Ok(Document::parse(&source, md, Box::new(files)))
    }
}

fn probe_for(md: &Metadata) -> Result<HttpProbe> {
    let options = ProbeOptions {
        verify_certificates: md.link_check.verify_certificates,
        timeout: md.link_check.timeout_secs.map(Duration::from_secs),
    };
    Ok(HttpProbe::new(&options)?)
}

fn process(input: &InputArgs, output: Option<&Path>, force: bool) -> Result<()> {
    let mut doc = input.load()?;

    wpt::process_wpt_elements(&mut doc)?;
    if doc.md.complain_about.broken_links {
        let mut probe = probe_for(&doc.md)?;
        lint::broken_links(&mut doc, &mut probe);
    }
    doc.finish();

    for (key, nodes) in doc.other_metadata() {
        for node in nodes {
            log::info!("{key}: {}", node.text_content());
        }
    }
    log::info!(
        "{} warning(s), {} fatal error(s)",
        doc.messages.warning_count(),
        doc.messages.fatal_count()
    );
    doc.check_fatal(force)?;

    let html = doc.to_html();
    match output {
        Some(path) => fs::write(path, html).wrap_err_with(|| format!("failed to write {}", path.display()))?,
        None => print!("{html}"),
    }
    Ok(())
}

fn check_links(input: &InputArgs) -> Result<()> {
    let mut doc = input.load()?;
    let mut probe = probe_for(&doc.md)?;
    let report = lint::check_links(&mut doc, &mut probe);
    if report.is_clean() {
        log::info!("all {} links answered", report.requested);
    }
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Process {
            input,
            output,
            force,
        } => process(input, output.as_deref(), *force),
        Command::CheckLinks { input } => check_links(input),
    }
}
