//! Tabular input: key/value scalars collected for one logging step.
//!
//! Producers call [`TabularInput::record`] for each metric, hand the input to
//! the logger, then [`TabularInput::clear`] it before the next step. Outputs
//! that persist a key call [`TabularRecord::mark`] so the producer can tell
//! which values were never written anywhere.

use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt;
use tl_common::Primitive;

use crate::notify::WarningChannel;

/// Capability an output needs from a tabular producer.
pub trait TabularRecord {
    /// Current scalar values, in insertion order.
    ///
    /// Structured values are excluded; only flat primitives are returned.
    fn primitive_snapshot(&self) -> IndexMap<String, Primitive>;

    /// Acknowledge that `key` has been persisted for this step.
    fn mark(&mut self, key: &str);
}

/// A value held by a [`TabularInput`].
#[derive(Debug, Clone, PartialEq)]
pub enum TabularValue {
    /// A flat value with a cell representation.
    Scalar(Primitive),
    /// Anything else (arrays, objects, null). Never reaches a tabular output.
    Structured(serde_json::Value),
}

impl TabularValue {
    /// Type name used in warnings.
    fn type_name(&self) -> &'static str {
        match self {
            TabularValue::Scalar(Primitive::Bool(_)) => "bool",
            TabularValue::Scalar(Primitive::Int(_)) => "int",
            TabularValue::Scalar(Primitive::Float(_)) => "float",
            TabularValue::Scalar(Primitive::Str(_)) => "str",
            TabularValue::Structured(serde_json::Value::Array(_)) => "array",
            TabularValue::Structured(serde_json::Value::Object(_)) => "object",
            TabularValue::Structured(_) => "null",
        }
    }
}

impl From<serde_json::Value> for TabularValue {
    fn from(value: serde_json::Value) -> Self {
        match Primitive::from_json(&value) {
            Some(p) => TabularValue::Scalar(p),
            None => TabularValue::Structured(value),
        }
    }
}

impl From<Vec<f64>> for TabularValue {
    fn from(values: Vec<f64>) -> Self {
        TabularValue::Structured(serde_json::Value::from(values))
    }
}

macro_rules! scalar_from {
    ($($t:ty),*) => {
        $(impl From<$t> for TabularValue {
            fn from(v: $t) -> Self {
                TabularValue::Scalar(Primitive::from(v))
            }
        })*
    };
}

scalar_from!(bool, i32, i64, u32, f32, f64, &str, String, Primitive);

impl fmt::Display for TabularValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabularValue::Scalar(p) => write!(f, "{p}"),
            TabularValue::Structured(v) => write!(f, "{v}"),
        }
    }
}

/// Where `record_misc_stat` puts the statistic name relative to the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// `Average` + key
    Front,
    /// key + `Average`
    #[default]
    Back,
}

/// Key/value store for one logging step.
#[derive(Debug)]
pub struct TabularInput {
    values: IndexMap<String, TabularValue>,
    marked: HashSet<String>,
    prefixes: Vec<String>,
    prefix_str: String,
    warnings: WarningChannel,
}

impl Default for TabularInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TabularInput {
    /// Create an empty input that reports warnings through `tracing`.
    pub fn new() -> Self {
        Self::with_warnings(WarningChannel::tracing())
    }

    /// Create an empty input with a custom warning channel.
    pub fn with_warnings(warnings: WarningChannel) -> Self {
        Self {
            values: IndexMap::new(),
            marked: HashSet::new(),
            prefixes: Vec::new(),
            prefix_str: String::new(),
            warnings,
        }
    }

    /// Record `value` under the current prefix plus `key`.
    ///
    /// Re-recording a key replaces its value but keeps its position.
    pub fn record(&mut self, key: &str, value: impl Into<TabularValue>) {
        let full_key = format!("{}{}", self.prefix_str, key);
        self.values.insert(full_key, value.into());
    }

    /// Record summary statistics of `values` under five derived keys.
    ///
    /// An empty slice records `NaN` for every statistic.
    pub fn record_misc_stat(&mut self, key: &str, values: &[f64], placement: Placement) {
        let stats = summarize(values);
        for (name, stat) in [
            ("Average", stats.mean),
            ("Std", stats.std),
            ("Median", stats.median),
            ("Min", stats.min),
            ("Max", stats.max),
        ] {
            let stat_key = match placement {
                Placement::Front => format!("{name}{key}"),
                Placement::Back => format!("{key}{name}"),
            };
            self.record(&stat_key, stat);
        }
    }

    /// Push a key prefix; applies to every subsequent `record`.
    pub fn push_prefix(&mut self, prefix: &str) {
        self.prefixes.push(prefix.to_string());
        self.prefix_str = self.prefixes.concat();
    }

    /// Pop the most recent prefix.
    pub fn pop_prefix(&mut self) {
        self.prefixes.pop();
        self.prefix_str = self.prefixes.concat();
    }

    /// Run `f` with `prefix` pushed, popping it afterwards.
    pub fn with_prefix<R>(&mut self, prefix: &str, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push_prefix(prefix);
        let result = f(self);
        self.pop_prefix();
        result
    }

    /// Mark every recorded key as persisted.
    pub fn mark_all(&mut self) {
        self.marked.extend(self.values.keys().cloned());
    }

    /// Keys recorded this step that no output has marked.
    pub fn unmarked_keys(&self) -> Vec<&str> {
        self.values
            .keys()
            .filter(|k| !self.marked.contains(*k))
            .map(String::as_str)
            .collect()
    }

    /// Clear values and marks, warning once about anything never persisted.
    pub fn clear(&mut self) {
        for (key, value) in &self.values {
            if !self.marked.contains(key) {
                self.warnings.warn(format!(
                    "TabularInput {{{}: type {}}} was not accepted by any output",
                    key,
                    value.type_name()
                ));
            }
        }
        self.values.clear();
        self.marked.clear();
    }

    /// Value recorded under a full (already prefixed) key.
    pub fn get(&self, key: &str) -> Option<&TabularValue> {
        self.values.get(key)
    }

    /// All recorded values, including structured ones.
    pub fn as_map(&self) -> &IndexMap<String, TabularValue> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Suppress warnings from this input.
    pub fn disable_warnings(&mut self) {
        self.warnings.disable();
    }
}

impl TabularRecord for TabularInput {
    fn primitive_snapshot(&self) -> IndexMap<String, Primitive> {
        self.values
            .iter()
            .filter_map(|(k, v)| match v {
                TabularValue::Scalar(p) => Some((k.clone(), p.clone())),
                TabularValue::Structured(_) => None,
            })
            .collect()
    }

    fn mark(&mut self, key: &str) {
        self.marked.insert(key.to_string());
    }
}

impl fmt::Display for TabularInput {
    /// Two-column key/value table of the scalar values, sorted by key.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rows: Vec<(String, String)> = self
            .primitive_snapshot()
            .into_iter()
            .map(|(k, v)| (k, v.to_cell()))
            .collect();
        rows.sort();

        let key_width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        let value_width = rows.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
        let rule = format!("{}  {}", "-".repeat(key_width), "-".repeat(value_width));

        writeln!(f, "{rule}")?;
        for (k, v) in &rows {
            writeln!(f, "{k:<key_width$}  {v:>value_width$}")?;
        }
        write!(f, "{rule}")
    }
}

struct Summary {
    mean: f64,
    std: f64,
    median: f64,
    min: f64,
    max: f64,
}

fn summarize(values: &[f64]) -> Summary {
    if values.is_empty() {
        return Summary {
            mean: f64::NAN,
            std: f64::NAN,
            median: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
        };
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    Summary {
        mean,
        std: variance.sqrt(),
        median,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
    }
}
