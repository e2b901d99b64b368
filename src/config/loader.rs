//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the statutory
//! tables from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};

use super::types::{
    AgeScheduleConfig, BenefitRules, GradeTableConfig, RateConfig, SchemeMetadata,
    StatutoryTables,
};

const EMBEDDED_SCHEME: &str = include_str!("../../config/kr_iaci/scheme.yaml");
const EMBEDDED_BENEFITS: &str = include_str!("../../config/kr_iaci/benefits.yaml");
const EMBEDDED_GRADES: &str = include_str!("../../config/kr_iaci/disability_grades.yaml");
const EMBEDDED_AGE_SCHEDULE: &str = include_str!("../../config/kr_iaci/age_schedule.yaml");
const EMBEDDED_RATES: &[(&str, &str)] = &[(
    "rates/2025-01-01.yaml",
    include_str!("../../config/kr_iaci/rates/2025-01-01.yaml"),
)];

/// Loads and provides access to the statutory tables.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates every yearly rate file against the shared tables, and hands out
/// frozen [`StatutoryTables`] for a given date.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/kr_iaci/
/// ├── scheme.yaml             # Scheme metadata
/// ├── benefits.yaml           # Statutory ratios and multipliers
/// ├── disability_grades.yaml  # Disability grade table
/// ├── age_schedule.yaml       # Age degression bands
/// └── rates/
///     └── 2025-01-01.yaml     # Money amounts effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use sanjae_benefit_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/kr_iaci").unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
/// let tables = loader.tables_for(date).unwrap();
/// println!("Daily cap: {}", tables.temporary_disability_cap());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Validated tables, one per rate file, sorted oldest first.
    tables: Vec<StatutoryTables>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/kr_iaci")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any table violates its invariants
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sanjae_benefit_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/kr_iaci")?;
    /// # Ok::<(), sanjae_benefit_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let scheme = Self::load_yaml::<SchemeMetadata>(&path.join("scheme.yaml"))?;
        let rules = Self::load_yaml::<BenefitRules>(&path.join("benefits.yaml"))?;
        let grades = Self::load_yaml::<GradeTableConfig>(&path.join("disability_grades.yaml"))?;
        let age_schedule = Self::load_yaml::<AgeScheduleConfig>(&path.join("age_schedule.yaml"))?;
        let rates = Self::load_rates(&path.join("rates"))?;

        let loader = Self::assemble(scheme, rules, grades, age_schedule, rates)?;
        info!(
            path = %path.display(),
            rate_files = loader.tables.len(),
            "Loaded statutory tables"
        );
        Ok(loader)
    }

    /// Loads the configuration compiled into the crate.
    ///
    /// The embedded files are the same ones shipped under `config/kr_iaci`,
    /// so callers without access to that directory at runtime get identical
    /// tables.
    pub fn embedded() -> EngineResult<Self> {
        let scheme = Self::parse_yaml::<SchemeMetadata>("scheme.yaml", EMBEDDED_SCHEME)?;
        let rules = Self::parse_yaml::<BenefitRules>("benefits.yaml", EMBEDDED_BENEFITS)?;
        let grades =
            Self::parse_yaml::<GradeTableConfig>("disability_grades.yaml", EMBEDDED_GRADES)?;
        let age_schedule =
            Self::parse_yaml::<AgeScheduleConfig>("age_schedule.yaml", EMBEDDED_AGE_SCHEDULE)?;
        let rates = EMBEDDED_RATES
            .iter()
            .map(|(name, content)| Self::parse_yaml::<RateConfig>(name, content))
            .collect::<EngineResult<Vec<_>>>()?;

        let loader = Self::assemble(scheme, rules, grades, age_schedule, rates)?;
        debug!(rate_files = loader.tables.len(), "Loaded embedded statutory tables");
        Ok(loader)
    }

    /// Validates one set of tables per rate file, oldest first.
    fn assemble(
        scheme: SchemeMetadata,
        rules: BenefitRules,
        grades: GradeTableConfig,
        age_schedule: AgeScheduleConfig,
        mut rates: Vec<RateConfig>,
    ) -> EngineResult<Self> {
        if rates.is_empty() {
            return Err(EngineError::InvalidTable {
                table: "rates".to_string(),
                message: "at least one rate file is required".to_string(),
            });
        }
        rates.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));

        let tables = rates
            .into_iter()
            .map(|rate_config| {
                StatutoryTables::new(
                    scheme.clone(),
                    rules.clone(),
                    grades.clone(),
                    age_schedule.clone(),
                    rate_config,
                )
            })
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(Self { tables })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse_yaml(&path_str, &content)
    }

    /// Parses YAML content, attributing errors to `path`.
    fn parse_yaml<T: serde::de::DeserializeOwned>(path: &str, content: &str) -> EngineResult<T> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Loads all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RateConfig>> {
        let rates_dir_str = rates_dir.display().to_string();

        if !rates_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: rates_dir_str,
            });
        }

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                rates.push(Self::load_yaml::<RateConfig>(&path)?);
            }
        }

        if rates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    /// Returns the tables effective on a given date.
    ///
    /// The method picks the most recent rate file whose effective date is on
    /// or before `date`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sanjae_benefit_engine::config::ConfigLoader;
    /// use chrono::NaiveDate;
    ///
    /// let loader = ConfigLoader::load("./config/kr_iaci")?;
    /// let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
    /// let tables = loader.tables_for(date)?;
    /// println!("Daily floor: {}", tables.temporary_disability_floor());
    /// # Ok::<(), sanjae_benefit_engine::error::EngineError>(())
    /// ```
    pub fn tables_for(&self, date: NaiveDate) -> EngineResult<&StatutoryTables> {
        self.tables
            .iter()
            .rfind(|tables| tables.effective_date() <= date)
            .ok_or(EngineError::RatesNotFound { date })
    }

    /// Returns the most recent tables.
    pub fn latest_tables(&self) -> &StatutoryTables {
        // `assemble` only succeeds with at least one rate file.
        &self.tables[self.tables.len() - 1]
    }

    /// Returns every set of tables, oldest first.
    pub fn all_tables(&self) -> &[StatutoryTables] {
        &self.tables
    }
}
