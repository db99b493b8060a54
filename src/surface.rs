use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::render::{DisplayContent, Region};

/// Progress of the one-off data load, as shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadStatus {
    Loading,
    Loaded { count: usize },
    /// The source answered but had no recipes in it
    Empty,
    Failed { message: String },
}

impl LoadStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, LoadStatus::Empty | LoadStatus::Failed { .. })
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStatus::Loading => write!(f, "レシピデータを読み込み中..."),
            LoadStatus::Loaded { count } => write!(f, "読み込み完了: 合計{}件のレシピを読み込みました", count),
            LoadStatus::Empty => write!(f, "レシピデータの読み込みに失敗しました。"),
            LoadStatus::Failed { message } => write!(f, "エラーが発生しました。({})", message),
        }
    }
}

/// Whatever turns display content into visible UI.
pub trait DisplaySurface {
    fn show(&mut self, region: Region, content: &DisplayContent);

    fn status(&mut self, status: &LoadStatus);
}

impl<S: DisplaySurface + ?Sized> DisplaySurface for &mut S {
    fn show(&mut self, region: Region, content: &DisplayContent) {
        (**self).show(region, content)
    }

    fn status(&mut self, status: &LoadStatus) {
        (**self).status(status)
    }
}

/// Keeps the latest content of each region and every status it was given.
#[derive(Clone, Debug, Default)]
pub struct MemorySurface {
    regions: HashMap<Region, DisplayContent>,
    statuses: Vec<LoadStatus>,
    updates: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(&self, region: Region) -> Option<&DisplayContent> {
        self.regions.get(&region)
    }

    pub fn statuses(&self) -> &[LoadStatus] {
        &self.statuses
    }

    pub fn last_status(&self) -> Option<&LoadStatus> {
        self.statuses.last()
    }

    /// Number of `show` calls so far
    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl DisplaySurface for MemorySurface {
    fn show(&mut self, region: Region, content: &DisplayContent) {
        self.updates += 1;
        self.regions.insert(region, content.clone());
    }

    fn status(&mut self, status: &LoadStatus) {
        self.statuses.push(status.clone());
    }
}
