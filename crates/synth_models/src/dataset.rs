//! Multi-asset scenario datasets.
//!
//! A [`ScenarioDataset`] holds one observed price column per asset, all of the
//! same length N and sharing the row index `0..N`, plus an optional column of
//! consecutive calendar dates.
//!
//! Assembly is all-or-nothing. Labels and horizons are checked before any
//! asset is composed, then assets are composed in input order on the caller's
//! [`ScenarioRng`], so a seeded build always consumes the same draws in the
//! same order.
//!
//! # Examples
//!
//! ```rust
//! use synth_core::params::{Horizon, SimulationParameters};
//! use synth_core::types::Date;
//! use synth_models::dataset::ScenarioDataset;
//! use synth_models::rng::ScenarioRng;
//!
//! let horizon = Horizon::new(30, 10, 5).unwrap();
//! let asset = |f0: f64| {
//!     SimulationParameters::builder()
//!         .initial_price(f0)
//!         .volatility(0.01)
//!         .sensitivity(0.4)
//!         .shock_percent(1.0)
//!         .horizon(horizon)
//!         .build()
//!         .unwrap()
//! };
//!
//! let dataset = ScenarioDataset::builder()
//!     .asset(asset(100.0))
//!     .asset(asset(50.0))
//!     .start_date(Date::parse("2024-01-01").unwrap())
//!     .build(&mut ScenarioRng::from_seed(42))
//!     .unwrap();
//!
//! assert_eq!(dataset.labels(), vec!["Asset_1", "Asset_2"]);
//! assert_eq!(dataset.len(), 30);
//! assert_eq!(dataset.dates().unwrap().len(), 30);
//! ```

use std::collections::HashSet;
use std::io;

use synth_core::params::SimulationParameters;
use synth_core::types::{date_range, Date, ScenarioError};
use tracing::info;

use crate::composer::{ComposedSeries, PriceComposer};
use crate::paths::PathGenerator;
use crate::rng::ScenarioRng;
use crate::shock::ShockGenerator;

/// Header of the date column in CSV output.
pub const DATE_COLUMN: &str = "Date";

/// Label given to the `index`-th (0-based) asset when none is supplied.
pub fn default_label(index: usize) -> String {
    format!("Asset_{}", index + 1)
}

/// One asset column: its label and the full composed triple.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetColumn {
    label: String,
    params: SimulationParameters,
    series: ComposedSeries,
}

impl AssetColumn {
    /// Column label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Parameters the column was generated from.
    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Observed prices.
    pub fn observed(&self) -> &[f64] {
        self.series.observed()
    }

    /// Full composed triple (observed, ideal, shock).
    pub fn series(&self) -> &ComposedSeries {
        &self.series
    }
}

/// One row of a dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetRow {
    /// Row index, `0..N`.
    pub index: usize,
    /// Calendar date, when a date column is attached.
    pub date: Option<Date>,
    /// Observed price per asset, in column order.
    pub values: Vec<f64>,
}

/// Column-aligned observed prices for several assets.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioDataset {
    steps: usize,
    columns: Vec<AssetColumn>,
    dates: Option<Vec<Date>>,
}

impl ScenarioDataset {
    /// Starts a builder.
    pub fn builder() -> ScenarioDatasetBuilder {
        ScenarioDatasetBuilder::default()
    }

    /// Composes one column per parameter set, labelled `Asset_1`, `Asset_2`, ...
    ///
    /// # Errors
    /// - `EmptyScenario` if `assets` is empty
    /// - `HorizonMismatch` if the assets disagree on N (checked before any draw)
    /// - `LengthMismatch` if a generator misbehaves
    pub fn generate(
        assets: &[SimulationParameters],
        rng: &mut ScenarioRng,
    ) -> Result<Self, ScenarioError> {
        assets
            .iter()
            .fold(Self::builder(), |builder, params| builder.asset(*params))
            .build(rng)
    }

    /// Attaches a date column of N consecutive days starting at `start`.
    ///
    /// Replaces any existing date column.
    ///
    /// # Errors
    /// `DuplicateLabel("Date")` if an asset is labelled `Date`.
    pub fn with_dates(mut self, start: Date) -> Result<Self, ScenarioError> {
        check_date_column(self.labels())?;
        self.dates = Some(date_range(start, self.steps)?);
        Ok(self)
    }

    /// Removes the date column, if any.
    pub fn without_dates(mut self) -> Self {
        self.dates = None;
        self
    }

    /// Number of rows (N).
    pub fn len(&self) -> usize {
        self.steps
    }

    /// Returns `true` if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.steps == 0
    }

    /// Column labels in order.
    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(AssetColumn::label).collect()
    }

    /// All asset columns in order.
    pub fn columns(&self) -> &[AssetColumn] {
        &self.columns
    }

    /// Observed prices for `label`.
    pub fn column(&self, label: &str) -> Option<&[f64]> {
        self.find(label).map(AssetColumn::observed)
    }

    /// Full composed triple for `label`, for plotting or inspection.
    pub fn diagnostics(&self, label: &str) -> Option<&ComposedSeries> {
        self.find(label).map(AssetColumn::series)
    }

    /// The date column, if attached.
    pub fn dates(&self) -> Option<&[Date]> {
        self.dates.as_deref()
    }

    /// Iterates rows in index order.
    pub fn rows(&self) -> impl Iterator<Item = DatasetRow> + '_ {
        (0..self.steps).map(move |index| DatasetRow {
            index,
            date: self.dates.as_ref().map(|dates| dates[index]),
            values: self
                .columns
                .iter()
                .map(|column| column.observed()[index])
                .collect(),
        })
    }

    /// Writes the dataset as CSV.
    ///
    /// The header is `Date,<label>,...` with a date column, or `<label>,...`
    /// without. Dates are ISO 8601; prices use shortest round-trip formatting.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> csv::Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header: Vec<&str> = Vec::with_capacity(self.columns.len() + 1);
        if self.dates.is_some() {
            header.push(DATE_COLUMN);
        }
        header.extend(self.labels());
        csv_writer.write_record(&header)?;

        for row in self.rows() {
            let mut record: Vec<String> = Vec::with_capacity(row.values.len() + 1);
            if let Some(date) = row.date {
                record.push(date.to_string());
            }
            record.extend(row.values.iter().map(f64::to_string));
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    fn find(&self, label: &str) -> Option<&AssetColumn> {
        self.columns.iter().find(|column| column.label == label)
    }
}

/// Builder for [`ScenarioDataset`].
#[derive(Clone, Debug, Default)]
pub struct ScenarioDatasetBuilder {
    assets: Vec<(Option<String>, SimulationParameters)>,
    start_date: Option<Date>,
}

impl ScenarioDatasetBuilder {
    /// Adds an asset with the default label for its position.
    pub fn asset(mut self, params: SimulationParameters) -> Self {
        self.assets.push((None, params));
        self
    }

    /// Adds an asset with an explicit label.
    pub fn labelled_asset(mut self, label: impl Into<String>, params: SimulationParameters) -> Self {
        self.assets.push((Some(label.into()), params));
        self
    }

    /// Attaches a date column starting at `start`.
    pub fn start_date(mut self, start: Date) -> Self {
        self.start_date = Some(start);
        self
    }

    /// Builds with the standard generators.
    pub fn build(self, rng: &mut ScenarioRng) -> Result<ScenarioDataset, ScenarioError> {
        self.build_with(&PriceComposer::new(), rng)
    }

    /// Builds with a caller-supplied composer.
    pub fn build_with<P: PathGenerator, S: ShockGenerator>(
        self,
        composer: &PriceComposer<P, S>,
        rng: &mut ScenarioRng,
    ) -> Result<ScenarioDataset, ScenarioError> {
        let assets: Vec<(String, SimulationParameters)> = self
            .assets
            .into_iter()
            .enumerate()
            .map(|(i, (label, params))| (label.unwrap_or_else(|| default_label(i)), params))
            .collect();

        let steps = validate_alignment(&assets, self.start_date.is_some())?;

        let mut columns = Vec::with_capacity(assets.len());
        for (label, params) in assets {
            let series = composer.compose(&params, rng)?;
            columns.push(AssetColumn {
                label,
                params,
                series,
            });
        }

        let dataset = ScenarioDataset {
            steps,
            columns,
            dates: None,
        };
        let dataset = match self.start_date {
            Some(start) => dataset.with_dates(start)?,
            None => dataset,
        };

        info!(
            assets = dataset.columns.len(),
            steps,
            seed = ?rng.seed(),
            dated = dataset.dates.is_some(),
            "Scenario dataset assembled"
        );

        Ok(dataset)
    }
}

/// Rejects an asset labelled like the date column.
fn check_date_column(
    labels: impl IntoIterator<Item = impl AsRef<str>>,
) -> Result<(), ScenarioError> {
    match labels.into_iter().find(|label| label.as_ref() == DATE_COLUMN) {
        Some(_) => Err(ScenarioError::DuplicateLabel(DATE_COLUMN.to_string())),
        None => Ok(()),
    }
}

/// Checks labels and horizons, returning the shared step count.
///
/// `dated` reserves the `Date` label for the date column.
fn validate_alignment(
    assets: &[(String, SimulationParameters)],
    dated: bool,
) -> Result<usize, ScenarioError> {
    let (_, first) = assets.first().ok_or(ScenarioError::EmptyScenario)?;
    let expected = first.steps();

    if dated {
        check_date_column(assets.iter().map(|(label, _)| label))?;
    }

    let mut seen = HashSet::with_capacity(assets.len());
    for (index, (label, params)) in assets.iter().enumerate() {
        if !seen.insert(label.as_str()) {
            return Err(ScenarioError::DuplicateLabel(label.clone()));
        }
        if params.steps() != expected {
            return Err(ScenarioError::HorizonMismatch {
                asset: label.clone(),
                index,
                found: params.steps(),
                expected,
            });
        }
    }
    Ok(expected)
}
