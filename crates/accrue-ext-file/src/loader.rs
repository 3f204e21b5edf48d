//! Loads fixings and forward curves into a market environment.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, info};

use accrue_core::{AccrueError, AccrueResult, Date, IndexId};
use accrue_market::{ForwardCurve, IndexFixing, IndexFixingStore, MarketEnvironment};

use crate::resources::{MarketDataResources, ResourceLocator};

/// Default subdirectory holding fixing CSV files.
pub(crate) const DEFAULT_FIXINGS_SUBDIRECTORY: &str = "fixings";

/// Default subdirectory holding curve JSON files.
pub(crate) const DEFAULT_CURVES_SUBDIRECTORY: &str = "curves";

#[derive(Debug, Deserialize)]
struct FixingRow {
    index: IndexId,
    date: Date,
    rate: f64,
}

#[derive(Debug, Deserialize)]
struct CurveFileEntry {
    index: IndexId,
    pillars: ForwardCurve,
}

/// Reads market data resources into a [`MarketEnvironment`].
///
/// Missing subdirectories load as empty; malformed files fail the whole load
/// with `AccrueError::Parse`.
#[derive(Debug, Clone)]
pub struct MarketDataLoader<R> {
    resources: R,
    fixings_subdirectory: String,
    curves_subdirectory: String,
}

impl<R: MarketDataResources> MarketDataLoader<R> {
    /// Creates a loader using the `fixings` and `curves` subdirectories.
    pub fn new(resources: R) -> Self {
        Self {
            resources,
            fixings_subdirectory: DEFAULT_FIXINGS_SUBDIRECTORY.to_string(),
            curves_subdirectory: DEFAULT_CURVES_SUBDIRECTORY.to_string(),
        }
    }

    /// Overrides the subdirectory names.
    #[must_use]
    pub fn with_subdirectories(
        mut self,
        fixings: impl Into<String>,
        curves: impl Into<String>,
    ) -> Self {
        self.fixings_subdirectory = fixings.into();
        self.curves_subdirectory = curves.into();
        self
    }

    /// Returns the underlying resources.
    pub fn resources(&self) -> &R {
        &self.resources
    }

    /// Loads every `*.csv` fixing file.
    ///
    /// A fixing repeated with the same rate is accepted once.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::Parse` if a file is malformed or two files
    /// publish different rates for the same index and date.
    #[allow(clippy::float_cmp)]
    pub fn load_fixings(&self) -> AccrueResult<IndexFixingStore> {
        let mut store = IndexFixingStore::new();
        for locator in self.resources_with_extension(&self.fixings_subdirectory, "csv")? {
            let content = locator.read_to_string()?;
            let fixings = parse_fixings(&content, &locator)?;
            debug!(resource = %locator, count = fixings.len(), "loaded fixings");
            for fixing in fixings {
                let existing = store
                    .get_fixing(&fixing.index, fixing.date)
                    .filter(|&rate| rate != fixing.rate);
                if let Some(existing) = existing {
                    return Err(AccrueError::parse(format!(
                        "{locator}: conflicting fixing for {} on {}: {existing} already loaded, found {}",
                        fixing.index, fixing.date, fixing.rate
                    )));
                }
                store.add(fixing);
            }
        }
        Ok(store)
    }

    /// Loads every `*.json` curve file.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::Parse` if a file is malformed or an index has
    /// more than one curve.
    pub fn load_curves(&self) -> AccrueResult<HashMap<IndexId, ForwardCurve>> {
        let mut curves = HashMap::new();
        for locator in self.resources_with_extension(&self.curves_subdirectory, "json")? {
            let content = locator.read_to_string()?;
            for entry in parse_curves(&content, &locator)? {
                debug!(resource = %locator, index = %entry.index, pillars = entry.pillars.pillars().len(), "loaded curve");
                if curves.contains_key(&entry.index) {
                    return Err(AccrueError::parse(format!(
                        "{locator}: duplicate forward curve for {}",
                        entry.index
                    )));
                }
                curves.insert(entry.index, entry.pillars);
            }
        }
        Ok(curves)
    }

    /// Loads fixings and curves into an environment for `valuation_date`.
    pub fn load_environment(&self, valuation_date: Date) -> AccrueResult<MarketEnvironment> {
        let fixings = self.load_fixings()?;
        let curves = self.load_curves()?;
        info!(
            valuation_date = %valuation_date,
            fixing_indices = fixings.indices().len(),
            curves = curves.len(),
            "market environment loaded"
        );

        let builder = MarketEnvironment::builder(valuation_date).fixings(fixings);
        let builder = curves
            .into_iter()
            .fold(builder, |builder, (index, curve)| builder.curve(&index, curve));
        Ok(builder.build())
    }

    fn resources_with_extension(
        &self,
        subdirectory: &str,
        extension: &str,
    ) -> AccrueResult<Vec<ResourceLocator>> {
        if !self.resources.subdirectory_exists(subdirectory) {
            debug!(subdirectory, "subdirectory absent, nothing to load");
            return Ok(Vec::new());
        }
        Ok(self
            .resources
            .all_resources(subdirectory)?
            .into_iter()
            .filter(|r| r.has_extension(extension))
            .collect())
    }
}

fn parse_fixings(content: &str, locator: &ResourceLocator) -> AccrueResult<Vec<IndexFixing>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(content.as_bytes());

    let mut fixings = Vec::new();
    for (line, row) in reader.deserialize::<FixingRow>().enumerate() {
        let row = row.map_err(|e| AccrueError::parse(format!("{locator} row {}: {e}", line + 1)))?;
        if !row.rate.is_finite() {
            return Err(AccrueError::parse(format!(
                "{locator} row {}: non-finite rate",
                line + 1
            )));
        }
        fixings.push(IndexFixing::new(row.index, row.date, row.rate));
    }
    Ok(fixings)
}

/// Accepts either a single curve object or an array of them.
fn parse_curves(content: &str, locator: &ResourceLocator) -> AccrueResult<Vec<CurveFileEntry>> {
    let parse_error = |e: serde_json::Error| AccrueError::parse(format!("{locator}: {e}"));
    let value: serde_json::Value = serde_json::from_str(content).map_err(parse_error)?;
    if value.is_array() {
        serde_json::from_value(value).map_err(parse_error)
    } else {
        serde_json::from_value(value)
            .map(|entry| vec![entry])
            .map_err(parse_error)
    }
}
