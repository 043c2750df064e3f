//! Tabular rows and plot point sequences for export and charting layers.

use drv_core::Result;
use serde::Serialize;

use crate::variable::DiscreteRandomVariable;

/// Half-width of the jump drawn at each support value of the CDF.
pub const STEP_OFFSET: f64 = 0.001;

/// Padding before the first and after the last support value of the CDF.
pub const STEP_PADDING: f64 = 0.5;

/// One support value with its mass and running cumulative mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableRow {
    pub x: i64,
    pub pmf: f64,
    pub cdf: f64,
}

/// `(x, P(X=x), F(x))` rows in ascending order of `x`.
pub fn tabular_rows(rv: &DiscreteRandomVariable) -> Result<Vec<TableRow>> {
    rv.range()?;
    let mut cdf = 0.0;
    Ok(rv
        .distribution()
        .iter()
        .map(|(&x, &pmf)| {
            cdf += pmf;
            TableRow { x, pmf, cdf }
        })
        .collect())
}

/// Vertices of the distribution polygon: one `(x, P(X=x))` per support value.
pub fn pmf_polygon(rv: &DiscreteRandomVariable) -> Result<Vec<(i64, f64)>> {
    rv.range()?;
    Ok(rv.distribution().iter().map(|(&x, &p)| (x, p)).collect())
}

/// Step-function polyline of the CDF.
///
/// Starts at `(min - 0.5, 0)`, brackets every jump with a point just before
/// `x` at the previous level and one just after `x` at the new level, and ends
/// at `(max + 0.5, 1)`.
pub fn cdf_steps(rv: &DiscreteRandomVariable) -> Result<Vec<(f64, f64)>> {
    let (min, max) = rv.range()?;
    let mut points = Vec::with_capacity(2 * rv.support_size() + 2);
    points.push((min as f64 - STEP_PADDING, 0.0));

    let mut previous = 0.0;
    for (&x, &p) in rv.distribution() {
        let current = previous + p;
        points.push((x as f64 - STEP_OFFSET, previous));
        points.push((x as f64 + STEP_OFFSET, current));
        previous = current;
    }

    points.push((max as f64 + STEP_PADDING, 1.0));
    Ok(points)
}

/// CSV rendering of [`tabular_rows`] with an `X,P,F` header.
pub fn to_csv(rv: &DiscreteRandomVariable) -> Result<String> {
    let mut out = String::from("X,P,F\n");
    for row in tabular_rows(rv)? {
        out.push_str(&format!("{},{:.6e},{:.6e}\n", row.x, row.pmf, row.cdf));
    }
    Ok(out)
}
