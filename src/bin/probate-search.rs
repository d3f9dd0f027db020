//! Probate search command line
//!
//! Searches one or more counties of the South Carolina probate index and writes
//! every record found to a CSV file.

use anyhow::{Context, bail};
use clap::Parser;
use probate_search::{BrowserSession, ConnectionOptions, DotProgress, LaunchOptions, ProbateSite, RecordType,
                     SchemaRegistry, SearchError, SearchOrchestrator, SiteConfig, TargetQuery, Wait, output,
                     search::{display_names, preflight}};
use std::{path::PathBuf, process::ExitCode, time::Duration};

#[derive(Parser)]
#[command(name = "probate-search")]
#[command(version)]
#[command(about = "Search South Carolina Probate Data Records. The results are output to a .csv file.", long_about = None)]
struct Cli {
    /// County to search; repeat for several (-c Aiken -c Charleston) or use ALL for every county
    #[arg(long, short = 'c', value_name = "COUNTY", required = true)]
    county: Vec<String>,

    /// Type of records to search: Estate or Marriage
    #[arg(long = "type", short = 't', default_value = "Estate")]
    record_type: String,

    /// Last or business name; "%" is a wildcard
    #[arg(long, short = 'l')]
    lastname: Option<String>,

    /// First name; "%" is a wildcard
    #[arg(long, short = 'f')]
    firstname: Option<String>,

    /// Middle name; "%" is a wildcard
    #[arg(long, short = 'm')]
    middlename: Option<String>,

    /// CSV file to write
    #[arg(long, short = 'o', default_value = "results.csv")]
    output: PathBuf,

    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    chrome_path: Option<PathBuf>,

    /// WebSocket endpoint of an already running browser
    #[arg(long, value_name = "URL")]
    ws_endpoint: Option<String>,

    /// Search page URL
    #[arg(long, value_name = "URL")]
    site_url: Option<String>,

    /// Pause after submitting and after each page change, in milliseconds
    #[arg(long, default_value = "5000")]
    settle_ms: u64,

    /// After the pause, also wait (up to 30s) for the results grid to appear
    #[arg(long)]
    wait_for_grid: bool,

    /// More log output (-v info, -vv debug)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn targets(&self, registry: &SchemaRegistry) -> anyhow::Result<Vec<TargetQuery>> {
        let record_type: RecordType = self.record_type.parse()?;

        let counties: Vec<String> = if self.county.iter().any(|c| c.eq_ignore_ascii_case("all")) {
            display_names(registry).map(str::to_string).collect()
        } else {
            self.county.clone()
        };

        Ok(counties
            .into_iter()
            .map(|county| TargetQuery {
                jurisdiction_id: county,
                last_name: self.lastname.clone(),
                first_name: self.firstname.clone(),
                middle_name: self.middlename.clone(),
                record_type,
            })
            .collect())
    }

    fn site_config(&self) -> SiteConfig {
        let settle = Duration::from_millis(self.settle_ms);
        let mut config = SiteConfig::new();

        if let Some(ref url) = self.site_url {
            config = config.url(url);
        }

        if self.wait_for_grid {
            config.wait_for_grid(settle, Duration::from_secs(30))
        } else {
            config.settle(Wait::Delay(settle))
        }
    }

    fn session(&self) -> anyhow::Result<BrowserSession> {
        if let Some(ref endpoint) = self.ws_endpoint {
            return BrowserSession::connect(ConnectionOptions::new(endpoint)).context("Failed to attach to browser");
        }

        let mut options = LaunchOptions::new().headless(!self.headed);
        if let Some(ref path) = self.chrome_path {
            options = options.chrome_path(path);
        }

        BrowserSession::launch(options).context("Failed to start browser")
    }
}

/// Exit status for browser failures (launch, connection, page interaction)
const EXIT_BROWSER: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            let browser_failure = err
                .downcast_ref::<SearchError>()
                .is_some_and(SearchError::is_browser_failure);
            if browser_failure {
                ExitCode::from(EXIT_BROWSER)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if cli.lastname.is_none() && cli.firstname.is_none() && cli.middlename.is_none() {
        bail!("Please specify at least one search criteria (see -h for help).");
    }

    let registry = SchemaRegistry::standard();
    let targets = cli.targets(&registry)?;
    preflight(&registry, &targets)?;

    let session = cli.session()?;
    let site = ProbateSite::new(&session, cli.site_config());

    let mut progress = DotProgress::stdout();
    let results = SearchOrchestrator::new(site, &registry)
        .with_progress(&mut progress)
        .run(&targets);
    progress.finish();
    let results = results?;

    if let Err(err) = session.close() {
        log::debug!("{}", err);
    }

    if results.is_empty() {
        println!("No Records Found.");
        return Ok(());
    }

    output::save_csv(&cli.output, &results)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    println!("{} Records Found.", results.count());

    Ok(())
}
