use driverpack_catalog::adapters::outbound::archive::CabExtractor;
use driverpack_catalog::adapters::outbound::console::StderrProgressReporter;
use driverpack_catalog::adapters::outbound::filesystem::{FileSystemWriter, LocalCatalogRepository};
use driverpack_catalog::adapters::outbound::network::{
    CatalogEndpoints, HttpCatalogRepository, HttpFetcher, HttpSettings,
};
use driverpack_catalog::application::dto::{
    CatalogRequest, OsCatalogRequest, OutputFormat, PublishResponse,
};
use driverpack_catalog::application::use_cases::{
    BuildDriverCatalogUseCase, BuildOsCatalogUseCase, PublishCatalogUseCase,
};
use driverpack_catalog::catalog_generation::domain::Manufacturer;
use driverpack_catalog::cli::{Args, Command, CommonArgs, DriversArgs, OsArgs};
use driverpack_catalog::config::{discover_config, load_config_from_path, ConfigFile};
use driverpack_catalog::ports::outbound::{OsCatalogRepository, VendorCatalogRepository};
use driverpack_catalog::shared::error::{CatalogError, ExitCode};
use driverpack_catalog::shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse_args();

    let exit_code = match run(args).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }
            eprintln!();

            e.downcast_ref::<CatalogError>()
                .map(CatalogError::exit_code)
                .unwrap_or(ExitCode::ApplicationError)
        }
    };

    process::exit(exit_code.as_i32());
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Drivers(drivers) => run_drivers(drivers).await,
        Command::Os(os) => run_os(os).await,
    }
}

/// Settings of one run after merging CLI flags, config file and defaults
#[derive(Debug)]
struct RunSettings {
    output_dir: PathBuf,
    input_dir: Option<PathBuf>,
    format: OutputFormat,
    http: HttpSettings,
    endpoints: CatalogEndpoints,
}

async fn run_drivers(args: DriversArgs) -> Result<()> {
    let config = load_config(&args.common)?;
    let settings = resolve_settings(&args.common, config.as_ref())?;

    let vendors = if !args.vendors.is_empty() {
        dedupe_vendors(args.vendors)
    } else {
        config
            .as_ref()
            .and_then(ConfigFile::manufacturers)
            .map(dedupe_vendors)
            .unwrap_or_else(|| Manufacturer::ALL.to_vec())
    };
    let request = CatalogRequest::new(
        vendors,
        args.common
            .min_items
            .or(config.as_ref().and_then(|c| c.min_items))
            .unwrap_or(0),
        args.min_winpe_items
            .or(config.as_ref().and_then(|c| c.min_winpe_items))
            .unwrap_or(0),
    );

    let extractor = CabExtractor::new();
    let published = match &settings.input_dir {
        Some(input_dir) => {
            let repository = LocalCatalogRepository::new(
                input_dir.clone(),
                extractor,
                settings.endpoints.clone(),
            );
            build_drivers(repository, request, &settings).await?
        }
        None => {
            let repository = HttpCatalogRepository::new(
                HttpFetcher::new(settings.http)?,
                extractor,
                settings.endpoints.clone(),
            );
            build_drivers(repository, request, &settings).await?
        }
    };

    print_written(&published);
    Ok(())
}

async fn run_os(args: OsArgs) -> Result<()> {
    let config = load_config(&args.common)?;
    let settings = resolve_settings(&args.common, config.as_ref())?;

    let request = OsCatalogRequest::new(
        args.common
            .min_items
            .or(config.as_ref().and_then(|c| c.min_os_items))
            .unwrap_or(0),
    );

    let extractor = CabExtractor::new();
    let published = match &settings.input_dir {
        Some(input_dir) => {
            let repository = LocalCatalogRepository::new(
                input_dir.clone(),
                extractor,
                settings.endpoints.clone(),
            );
            build_os(repository, request, &settings).await?
        }
        None => {
            let repository = HttpCatalogRepository::new(
                HttpFetcher::new(settings.http)?,
                extractor,
                settings.endpoints.clone(),
            );
            build_os(repository, request, &settings).await?
        }
    };

    print_written(&published);
    Ok(())
}

async fn build_drivers<R: VendorCatalogRepository>(
    repository: R,
    request: CatalogRequest,
    settings: &RunSettings,
) -> Result<PublishResponse> {
    let use_case = BuildDriverCatalogUseCase::new(repository, StderrProgressReporter::new());
    let response = use_case.execute(request).await?;

    let publisher = PublishCatalogUseCase::new(
        FileSystemWriter::new(settings.output_dir.clone()),
        StderrProgressReporter::new(),
        settings.format,
    );
    publisher.publish_drivers(&response)
}

async fn build_os<R: OsCatalogRepository>(
    repository: R,
    request: OsCatalogRequest,
    settings: &RunSettings,
) -> Result<PublishResponse> {
    let use_case = BuildOsCatalogUseCase::new(repository, StderrProgressReporter::new());
    let response = use_case.execute(request).await?;

    let publisher = PublishCatalogUseCase::new(
        FileSystemWriter::new(settings.output_dir.clone()),
        StderrProgressReporter::new(),
        settings.format,
    );
    publisher.publish_os(&response)
}

fn print_written(published: &PublishResponse) {
    for path in &published.written {
        eprintln!("   {}", path.display());
    }
}

/// Explicit `--config` must exist; otherwise the working directory is searched
fn load_config(common: &CommonArgs) -> Result<Option<ConfigFile>> {
    match &common.config {
        Some(path) => load_config_from_path(path).map(Some),
        None => discover_config(&std::env::current_dir()?),
    }
}

/// CLI flag > config file > built-in default
fn resolve_settings(common: &CommonArgs, config: Option<&ConfigFile>) -> Result<RunSettings> {
    let output_dir = common
        .output_dir
        .clone()
        .or_else(|| config.and_then(|c| c.output_dir.clone()))
        .unwrap_or_else(|| PathBuf::from("."));
    prepare_output_dir(&output_dir)?;

    if let Some(input_dir) = &common.input_dir {
        validate_input_dir(input_dir)?;
    }

    let format = common
        .format
        .or_else(|| config.and_then(ConfigFile::output_format))
        .unwrap_or(OutputFormat::All);

    let defaults = HttpSettings::default();
    let http_config = config.and_then(|c| c.http.as_ref());
    let http = HttpSettings {
        timeout: http_config
            .and_then(|h| h.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout),
        max_retries: http_config
            .and_then(|h| h.max_retries)
            .unwrap_or(defaults.max_retries),
        retry_delay: http_config
            .and_then(|h| h.retry_delay_secs)
            .map(Duration::from_secs)
            .unwrap_or(defaults.retry_delay),
    };

    let mut endpoints = CatalogEndpoints::default();
    if let Some(config) = config {
        config.apply_endpoints(&mut endpoints);
    }

    Ok(RunSettings {
        output_dir,
        input_dir: common.input_dir.clone(),
        format,
        http,
        endpoints,
    })
}

/// Keeps the first occurrence of each vendor
fn dedupe_vendors(vendors: Vec<Manufacturer>) -> Vec<Manufacturer> {
    let mut unique = Vec::with_capacity(vendors.len());
    for vendor in vendors {
        if !unique.contains(&vendor) {
            unique.push(vendor);
        }
    }
    unique
}

/// Creates the output directory when missing; symbolic links are rejected
fn prepare_output_dir(path: &Path) -> Result<()> {
    if let Ok(metadata) = std::fs::symlink_metadata(path) {
        if metadata.is_symlink() {
            return Err(CatalogError::FileWriteError {
                path: path.to_path_buf(),
                details: "Security: Output directory is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
            }
            .into());
        }
        if !metadata.is_dir() {
            return Err(CatalogError::FileWriteError {
                path: path.to_path_buf(),
                details: "Not a directory".to_string(),
            }
            .into());
        }
        return Ok(());
    }

    std::fs::create_dir_all(path).map_err(|e| {
        CatalogError::FileWriteError {
            path: path.to_path_buf(),
            details: format!("Failed to create output directory: {}", e),
        }
        .into()
    })
}

fn validate_input_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(CatalogError::FileReadError {
            path: path.to_path_buf(),
            details: "Input directory does not exist or is not a directory".to_string(),
        }
        .into());
    }
    Ok(())
}
