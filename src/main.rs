use depgraph_navigator::adapters::outbound::console::StderrProgressReporter;
use depgraph_navigator::adapters::outbound::filesystem::{
    FileSystemReader, NodeModulesMetadataSource,
};
use depgraph_navigator::adapters::outbound::layout::LayeredLayout;
use depgraph_navigator::adapters::outbound::network::{CachingMetadataSource, NpmRegistryClient};
use depgraph_navigator::adapters::outbound::view::RecordingView;
use depgraph_navigator::application::dto::OutputFormat;
use depgraph_navigator::application::factories::{
    FormatterFactory, PresenterFactory, PresenterType,
};
use depgraph_navigator::application::use_cases::{ExploreGraphUseCase, ModelCoordinator};
use depgraph_navigator::cli::{Args, Command, RunOptions};
use depgraph_navigator::config::{discover_config, load_config_from_path};
use depgraph_navigator::graph_resolution::services::{GraphGenerator, GraphService};
use depgraph_navigator::ports::outbound::{MetadataSource, PackageSearch, SearchHit};
use depgraph_navigator::shared::error::ExitCode;
use depgraph_navigator::shared::Result;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    let exit_code = match run(args).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            ExitCode::ApplicationError
        }
    };
    process::exit(exit_code.as_i32());
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(Path::new("."))?,
    };
    let options = args.resolve(config.as_ref())?;

    let client = NpmRegistryClient::with_config(
        &options.registry_url,
        options.timeout,
        options.max_retries,
    )?;

    let as_json = args.format == Some(OutputFormat::Json);
    match args.command {
        Some(Command::Search { text, size }) => {
            run_search(&client, &options, &text, size, as_json).await
        }
        None => {
            let source = CachingMetadataSource::new(client);
            match options.node_modules.clone() {
                Some(dir) => explore(NodeModulesMetadataSource::new(dir, source), options).await,
                None => explore(source, options).await,
            }
        }
    }
}

async fn explore<M: MetadataSource>(source: M, options: RunOptions) -> Result<()> {
    let generator = GraphGenerator::with_website_url(source, options.website_url.clone());
    let coordinator = ModelCoordinator::new(
        GraphService::new(generator),
        LayeredLayout::new(),
        RecordingView::new(),
        StderrProgressReporter::new(),
    );
    let use_case = ExploreGraphUseCase::new(coordinator, FileSystemReader::new());

    let report = use_case.execute(options.request).await?;

    eprintln!("{}", FormatterFactory::progress_message(options.format));
    let formatted_output = FormatterFactory::create(options.format).format(&report)?;

    PresenterFactory::create(PresenterType::from_output(options.output)).present(&formatted_output)
}

async fn run_search<S: PackageSearch>(
    search: &S,
    options: &RunOptions,
    text: &str,
    size: usize,
    as_json: bool,
) -> Result<()> {
    let hits = search.search(text, size).await?;
    let output = if as_json {
        serde_json::to_string_pretty(&hits)?
    } else {
        format_hits(&hits)
    };
    PresenterFactory::create(PresenterType::from_output(options.output.clone())).present(&output)
}

fn format_hits(hits: &[SearchHit]) -> String {
    hits.iter()
        .map(|hit| {
            let name = match &hit.version {
                Some(version) => format!("{}@{}", hit.name, version),
                None => hit.name.clone(),
            };
            match &hit.description {
                Some(description) => format!("{} - {}\n", name, description),
                None => format!("{}\n", name),
            }
        })
        .collect()
}
