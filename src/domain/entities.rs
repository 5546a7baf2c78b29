//! Domain entities: regions, carbon models, boxes, flows and model time.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};
use crate::meta_info::ObjectMetaInfo;

/// Top-level named grouping of the model; the unit a report selects on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Region {
    pub name: String,
    pub meta_info: Vec<ObjectMetaInfo<f64>>,
}

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meta_info: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn xml_name_static() -> &'static str {
        "region"
    }
}

/// Container of carbon boxes for one region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarbonModel;

impl CarbonModel {
    /// Tag name used for every carbon model, independent of the instance.
    pub fn xml_name_static() -> &'static str {
        "carbon-box-model"
    }
}

/// Per-period stock values. Periods never written read as zero.
///
/// Sparse, so a large period index costs one entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarbonStock {
    values: BTreeMap<usize, f64>,
}

impl CarbonStock {
    pub fn stock(&self, period: usize) -> f64 {
        self.values.get(&period).copied().unwrap_or(0.0)
    }

    pub fn set_stock(&mut self, period: usize, value: f64) {
        self.values.insert(period, value);
    }

    /// Number of periods with a stored value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Stored periods in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values.iter().map(|(&period, &value)| (period, value))
    }
}

/// Named carbon reservoir.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarbonBox {
    name: String,
    stock: CarbonStock,
}

impl CarbonBox {
    /// Create a box. The name becomes a tag name in reports, so it must be a valid XML name.
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        validate_xml_name(&name)?;
        Ok(Self {
            name,
            stock: CarbonStock::default(),
        })
    }

    pub fn with_stock(mut self, period: usize, value: f64) -> Self {
        self.stock.set_stock(period, value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stock(&self, period: usize) -> f64 {
        self.stock.stock(period)
    }

    pub fn stocks(&self) -> &CarbonStock {
        &self.stock
    }

    pub fn set_stock(&mut self, period: usize, value: f64) {
        self.stock.set_stock(period, value);
    }

    pub fn xml_name_static() -> &'static str {
        "carbon-box"
    }
}

/// Directed transfer from its owning box to `target_name`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarbonFlow {
    pub target_name: String,
    pub fraction: f64,
}

impl CarbonFlow {
    pub fn new(target_name: impl Into<String>, fraction: f64) -> Self {
        Self {
            target_name: target_name.into(),
            fraction,
        }
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn xml_name_static() -> &'static str {
        "carbon-flow"
    }
}

/// Calendar of the model: `periods` steps of `time_step` years from `start_year`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ModelTime {
    pub start_year: i32,
    pub time_step: u32,
    pub periods: usize,
}

impl Default for ModelTime {
    fn default() -> Self {
        Self {
            start_year: 1975,
            time_step: 15,
            periods: 9,
        }
    }
}

impl ModelTime {
    pub fn check_period(&self, period: usize) -> DomainResult<()> {
        if period < self.periods {
            Ok(())
        } else {
            Err(DomainError::PeriodOutOfRange {
                period,
                periods: self.periods,
            })
        }
    }

    pub fn year_for(&self, period: usize) -> DomainResult<i32> {
        self.check_period(period)?;
        let offset = i64::from(self.time_step) * period as i64;
        Ok((i64::from(self.start_year) + offset) as i32)
    }

    pub fn period_for(&self, year: i32) -> DomainResult<usize> {
        let offset = i64::from(year) - i64::from(self.start_year);
        let step = i64::from(self.time_step);
        if offset < 0 || step == 0 || offset % step != 0 {
            return Err(DomainError::YearNotInModel { year });
        }
        let period = (offset / step) as usize;
        self.check_period(period)
            .map_err(|_| DomainError::YearNotInModel { year })?;
        Ok(period)
    }
}

impl fmt::Display for ModelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} periods of {} years from {}",
            self.periods, self.time_step, self.start_year
        )
    }
}

static XML_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.-]*$").expect("xml name pattern"));

/// Reject names that cannot be used as an XML tag name.
pub fn validate_xml_name(name: &str) -> DomainResult<()> {
    if XML_NAME.is_match(name) {
        Ok(())
    } else {
        Err(DomainError::InvalidName {
            name: name.to_string(),
            reason: "not a valid XML tag name".to_string(),
        })
    }
}
