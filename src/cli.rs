use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dto::OutputFormat;
use crate::catalog_generation::domain::Manufacturer;

/// Build unified driver pack and Windows image catalogs from vendor feeds
#[derive(Parser, Debug)]
#[command(name = "driverpack-catalog")]
#[command(version)]
#[command(
    about = "Build unified driver pack and Windows image catalogs from vendor feeds",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the Win and WinPE driver pack catalogs
    Drivers(DriversArgs),
    /// Build the Windows ESD image catalog
    Os(OsArgs),
}

/// Options shared by every subcommand
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Directory the documents are written to (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to a config file (defaults to ./driverpack-catalog.config.yml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read previously downloaded feeds from this directory instead of the network
    #[arg(short, long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Document format: json, xml or all
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Fail when the catalog holds fewer items than this
    #[arg(long, value_name = "COUNT")]
    pub min_items: Option<usize>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct DriversArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Vendor to fetch: dell, hp, lenovo or microsoft (defaults to all)
    /// Can be specified multiple times: --vendor dell --vendor hp
    #[arg(long = "vendor", value_name = "VENDOR")]
    pub vendors: Vec<Manufacturer>,

    /// Fail when the WinPE catalog holds fewer items than this
    #[arg(long, value_name = "COUNT")]
    pub min_winpe_items: Option<usize>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct OsArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
