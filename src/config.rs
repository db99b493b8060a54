use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::source::{AnySource, CsvFileSource, GvizSource};

/// Spreadsheet the recipes live in
pub const DEFAULT_SPREADSHEET_ID: &str = "10E1tLkOrJvdyhMqo4uoqnDcODbPAcxCS";
/// Sheet (tab) id inside the spreadsheet
pub const DEFAULT_SHEET_GID: &str = "1142479739";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

pub const ENV_SPREADSHEET_ID: &str = "RECIPE_SPREADSHEET_ID";
pub const ENV_SHEET_GID: &str = "RECIPE_SHEET_GID";
pub const ENV_CSV: &str = "RECIPE_CSV";
pub const ENV_BIND: &str = "RECIPE_BIND";

/// Runtime configuration.
///
/// Resolved as defaults, then environment, then command-line flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub spreadsheet_id: String,
    pub sheet_gid: String,
    /// Read a local CSV export instead of the live sheet
    pub csv_path: Option<PathBuf>,
    pub bind: String,
    pub initial_fragment: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.to_string(),
            sheet_gid: DEFAULT_SHEET_GID.to_string(),
            csv_path: None,
            bind: DEFAULT_BIND.to_string(),
            initial_fragment: None,
        }
    }
}

/// Command-line overrides shared by the binaries
#[derive(Args, Clone, Debug, Default)]
pub struct ConfigArgs {
    /// Google Sheets spreadsheet id
    #[arg(long)]
    pub spreadsheet_id: Option<String>,

    /// Sheet gid within the spreadsheet
    #[arg(long)]
    pub gid: Option<String>,

    /// Load recipes from a CSV export instead of Google Sheets
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Address for the web server to listen on
    #[arg(long)]
    pub bind: Option<String>,

    /// Fragment to show once data is loaded (e.g. "category-Desserts")
    #[arg(long)]
    pub fragment: Option<String>,
}

impl Config {
    /// Defaults overlaid with the process environment and `args`.
    pub fn resolve(args: &ConfigArgs) -> Self {
        Config::default()
            .with_env(|key| std::env::var(key).ok())
            .with_args(args)
    }

    /// Overlay values found through `lookup`; empty values are ignored.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(id) = get(ENV_SPREADSHEET_ID) {
            self.spreadsheet_id = id;
        }
        if let Some(gid) = get(ENV_SHEET_GID) {
            self.sheet_gid = gid;
        }
        if let Some(csv) = get(ENV_CSV) {
            self.csv_path = Some(PathBuf::from(csv));
        }
        if let Some(bind) = get(ENV_BIND) {
            self.bind = bind;
        }
        self
    }

    pub fn with_args(mut self, args: &ConfigArgs) -> Self {
        if let Some(id) = &args.spreadsheet_id {
            self.spreadsheet_id = id.clone();
        }
        if let Some(gid) = &args.gid {
            self.sheet_gid = gid.clone();
        }
        if let Some(csv) = &args.csv {
            self.csv_path = Some(csv.clone());
        }
        if let Some(bind) = &args.bind {
            self.bind = bind.clone();
        }
        if let Some(fragment) = &args.fragment {
            self.initial_fragment = Some(fragment.clone());
        }
        self
    }

    /// The data source this configuration points at. A CSV path wins over
    /// the spreadsheet settings.
    pub fn source(&self) -> AnySource {
        match &self.csv_path {
            Some(path) => AnySource::Csv(CsvFileSource::new(path)),
            None => AnySource::Gviz(GvizSource::new(&self.spreadsheet_id, &self.sheet_gid)),
        }
    }
}
