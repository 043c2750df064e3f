//! Common data types for drvstat

use std::fmt;

use serde::{Deserialize, Serialize};

/// Descriptive statistics of one discrete random variable.
///
/// Produced once per calculation and never mutated afterwards; every value is
/// derived from a single validated probability table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalSummary {
    /// Raw moment `v1 = E[X]` (the mean)
    pub mean: f64,
    /// Raw moment `v2 = E[X^2]`
    pub second_moment: f64,
    /// Raw moment `v3 = E[X^3]`
    pub third_moment: f64,
    /// Raw moment `v4 = E[X^4]`
    pub fourth_moment: f64,

    /// `D(X) = v2 - v1^2`, clamped at zero
    pub variance: f64,
    /// `sqrt(D(X))`
    pub standard_deviation: f64,

    /// Central moment `mu2` (equal to the variance)
    pub central_second_moment: f64,
    /// Central moment `mu3`
    pub central_third_moment: f64,
    /// Central moment `mu4`
    pub central_fourth_moment: f64,

    /// `mu3 / sigma^3`, zero for point masses
    pub skewness: f64,
    /// Excess kurtosis `mu4 / sigma^4 - 3`, zero for point masses
    pub kurtosis: f64,

    /// Most probable value (smallest on ties)
    pub mode: i64,
    /// Smallest value with `F(x) >= 0.5`
    pub median: i64,
    /// Smallest value with `F(x) >= 0.25`
    pub q1: i64,
    /// Smallest value with `F(x) >= 0.75`
    pub q3: i64,
    /// `q3 - q1`
    pub interquartile_range: f64,

    /// Smallest support value
    pub min: i64,
    /// Largest support value
    pub max: i64,
    /// `max - min`
    pub range: i64,

    /// `sigma / |mean|`, zero when the mean vanishes
    pub coefficient_of_variation: f64,
    /// Coefficient of variation in percent
    pub relative_std_dev_pct: f64,
}

/// A single summary field value, as exposed to report writers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SummaryValue {
    /// Real-valued statistic
    Real(f64),
    /// Support-valued statistic (mode, quantiles, bounds)
    Integer(i64),
}

impl SummaryValue {
    /// Value as `f64` regardless of kind.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Real(v) => v,
            Self::Integer(v) => v as f64,
        }
    }
}

impl fmt::Display for SummaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(v) => write!(f, "{:.8}", v),
            Self::Integer(v) => write!(f, "{}", v),
        }
    }
}

/// Report sections in display order: `(title, field names)`.
const SECTIONS: [(&str, &[&str]); 8] = [
    ("Raw moments", &["mean", "second_moment", "third_moment", "fourth_moment"]),
    ("Dispersion", &["variance", "standard_deviation"]),
    ("Central moments", &["central_second_moment", "central_third_moment", "central_fourth_moment"]),
    ("Shape", &["skewness", "kurtosis"]),
    ("Location", &["mode", "median"]),
    ("Quartiles", &["q1", "q3", "interquartile_range"]),
    ("Range", &["min", "max", "range"]),
    ("Variation", &["coefficient_of_variation", "relative_std_dev_pct"]),
];

impl StatisticalSummary {
    /// Every field by name, in report order.
    pub fn fields(&self) -> Vec<(&'static str, SummaryValue)> {
        use SummaryValue::{Integer, Real};
        vec![
            ("mean", Real(self.mean)),
            ("second_moment", Real(self.second_moment)),
            ("third_moment", Real(self.third_moment)),
            ("fourth_moment", Real(self.fourth_moment)),
            ("variance", Real(self.variance)),
            ("standard_deviation", Real(self.standard_deviation)),
            ("central_second_moment", Real(self.central_second_moment)),
            ("central_third_moment", Real(self.central_third_moment)),
            ("central_fourth_moment", Real(self.central_fourth_moment)),
            ("skewness", Real(self.skewness)),
            ("kurtosis", Real(self.kurtosis)),
            ("mode", Integer(self.mode)),
            ("median", Integer(self.median)),
            ("q1", Integer(self.q1)),
            ("q3", Integer(self.q3)),
            ("interquartile_range", Real(self.interquartile_range)),
            ("min", Integer(self.min)),
            ("max", Integer(self.max)),
            ("range", Integer(self.range)),
            ("coefficient_of_variation", Real(self.coefficient_of_variation)),
            ("relative_std_dev_pct", Real(self.relative_std_dev_pct)),
        ]
    }

    /// Look up one field by its name.
    pub fn field(&self, name: &str) -> Option<SummaryValue> {
        self.fields().into_iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }
}

impl fmt::Display for StatisticalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.fields();
        for (i, (title, names)) in SECTIONS.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "[{}]", title)?;
            for name in names.iter() {
                if let Some((_, value)) = fields.iter().find(|(n, _)| n == name) {
                    writeln!(f, "  {:<26} {:>18}", name, value.to_string())?;
                }
            }
        }
        Ok(())
    }
}
