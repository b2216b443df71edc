//! Scenario-array arithmetic.
//!
//! A scenario array is the ordered list of stress-test values an exchange
//! publishes for one contract. Index `i` denotes the same hypothetical market
//! move for every contract in a document, so arrays from one document can be
//! combined element-wise.
//!
//! Length mismatches never error:
//! - [`merge_by_max`] takes the maximum over the overlap and appends the
//!   later array's extra scenarios unchanged
//! - [`accumulate_scaled`] grows the running total to the longest
//!   contributor, and shorter contributors add `0` beyond their own length

/// Largest magnitude in a sequence of scenario values.
///
/// Returns `0.0` for an empty sequence.
///
/// # Examples
/// ```
/// use risk_core::scenario::worst_absolute;
///
/// assert_eq!(worst_absolute(&[10.0, -20.0, 5.0]), 20.0);
/// assert_eq!(worst_absolute(&[]), 0.0);
/// ```
pub fn worst_absolute(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |worst, v| worst.max(v.abs()))
}

/// Index and magnitude of the dominant scenario.
///
/// Ties keep the first (lowest-index) occurrence. Returns `None` for an
/// empty sequence.
///
/// # Examples
/// ```
/// use risk_core::scenario::worst_scenario;
///
/// assert_eq!(worst_scenario(&[3.0, -7.0, 7.0]), Some((1, 7.0)));
/// assert_eq!(worst_scenario(&[]), None);
/// ```
pub fn worst_scenario(values: &[f64]) -> Option<(usize, f64)> {
    let mut iter = values.iter().enumerate();
    let (_, first) = iter.next()?;
    let mut best = (0, first.abs());
    for (i, v) in iter {
        if v.abs() > best.1 {
            best = (i, v.abs());
        }
    }
    Some(best)
}

/// Scenario-wise maximum of an earlier and a later snapshot.
///
/// Over the overlap `merged[i] == max(earlier[i], later[i])`. Scenarios that
/// exist only in `later` are appended unchanged. Scenarios that exist only in
/// `earlier` are dropped, so the result always has the later array's length.
///
/// # Examples
/// ```
/// use risk_core::scenario::merge_by_max;
///
/// assert_eq!(merge_by_max(&[5.0, 5.0], &[3.0, 9.0, 1.0]), vec![5.0, 9.0, 1.0]);
/// assert_eq!(merge_by_max(&[5.0, 5.0, 5.0], &[3.0]), vec![5.0]);
/// ```
pub fn merge_by_max(earlier: &[f64], later: &[f64]) -> Vec<f64> {
    let overlap = earlier.len().min(later.len());
    let mut merged = Vec::with_capacity(later.len());
    merged.extend(
        earlier[..overlap]
            .iter()
            .zip(&later[..overlap])
            .map(|(a, b)| a.max(*b)),
    );
    merged.extend_from_slice(&later[overlap..]);
    merged
}

/// Add `values * factor` element-wise into `total`.
///
/// `total` is extended with zeros when `values` is longer.
///
/// # Examples
/// ```
/// use risk_core::scenario::accumulate_scaled;
///
/// let mut total = vec![1.0, 1.0];
/// accumulate_scaled(&mut total, &[1.0, 2.0, 3.0], -2.0);
/// assert_eq!(total, vec![-1.0, -3.0, -6.0]);
/// ```
pub fn accumulate_scaled(total: &mut Vec<f64>, values: &[f64], factor: f64) {
    if total.len() < values.len() {
        total.resize(values.len(), 0.0);
    }
    for (slot, v) in total.iter_mut().zip(values) {
        *slot += v * factor;
    }
}

/// Immutable scenario array with its worst-case magnitude.
///
/// The worst absolute value is computed once at construction. The array
/// cannot be mutated in place, so the cached value always matches the
/// values it was derived from.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<f64>", into = "Vec<f64>")
)]
pub struct ScenarioArray {
    values: Vec<f64>,
    worst: f64,
}

impl ScenarioArray {
    /// Create a scenario array from ordered values.
    pub fn new(values: Vec<f64>) -> Self {
        let worst = worst_absolute(&values);
        Self { values, worst }
    }

    /// The ordered scenario values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of scenarios.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the array holds no scenarios.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `max(|v|)` over all scenarios, `0.0` when empty.
    #[inline]
    pub fn worst_absolute(&self) -> f64 {
        self.worst
    }

    /// Value of scenario `index`, if present.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// A new array with every value multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.values.iter().map(|v| v * factor).collect())
    }

    /// Scenario-wise maximum against a later snapshot. See [`merge_by_max`].
    pub fn merged_with_later(&self, later: &ScenarioArray) -> Self {
        Self::new(merge_by_max(&self.values, &later.values))
    }
}

impl From<Vec<f64>> for ScenarioArray {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl From<ScenarioArray> for Vec<f64> {
    fn from(array: ScenarioArray) -> Self {
        array.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_worst_absolute_basic() {
        assert_eq!(worst_absolute(&[10.0, -20.0, 5.0]), 20.0);
        assert_eq!(worst_absolute(&[-0.5]), 0.5);
    }

    #[test]
    fn test_worst_absolute_empty_is_zero() {
        assert_eq!(worst_absolute(&[]), 0.0);
        assert_eq!(ScenarioArray::default().worst_absolute(), 0.0);
    }

    #[test]
    fn test_worst_scenario_ties_keep_first() {
        assert_eq!(worst_scenario(&[4.0, -4.0, 4.0]), Some((0, 4.0)));
        assert_eq!(worst_scenario(&[0.0, 0.0]), Some((0, 0.0)));
    }

    #[test]
    fn test_merge_by_max_later_longer() {
        assert_eq!(
            merge_by_max(&[5.0, 5.0], &[3.0, 9.0, 1.0]),
            vec![5.0, 9.0, 1.0]
        );
    }

    #[test]
    fn test_merge_by_max_earlier_longer_truncates() {
        assert_eq!(merge_by_max(&[1.0, 2.0, 3.0], &[0.0, 5.0]), vec![1.0, 5.0]);
    }

    #[test]
    fn test_merge_by_max_negative_values() {
        assert_eq!(merge_by_max(&[-5.0, -1.0], &[-3.0, -2.0]), vec![-3.0, -1.0]);
    }

    #[test]
    fn test_accumulate_scaled_grows_total() {
        let mut total = Vec::new();
        accumulate_scaled(&mut total, &[1.0, 2.0], 3.0);
        accumulate_scaled(&mut total, &[1.0, 1.0, 1.0], -1.0);
        assert_eq!(total, vec![2.0, 5.0, -1.0]);
    }

    #[test]
    fn test_scenario_array_caches_worst() {
        let array = ScenarioArray::new(vec![1.5, -3.25, 2.0]);
        assert_relative_eq!(array.worst_absolute(), 3.25);
        assert_eq!(array.len(), 3);
        assert_eq!(array.get(1), Some(-3.25));
        assert_eq!(array.get(3), None);
    }

    #[test]
    fn test_scenario_array_scaled_recomputes_worst() {
        let array = ScenarioArray::new(vec![1.0, -2.0]).scaled(-3.0);
        assert_eq!(array.values(), &[-3.0, 6.0]);
        assert_relative_eq!(array.worst_absolute(), 6.0);
    }

    #[test]
    fn test_scenario_array_merged_with_later() {
        let earlier = ScenarioArray::new(vec![5.0, 5.0]);
        let later = ScenarioArray::new(vec![3.0, 9.0, 1.0]);
        let merged = earlier.merged_with_later(&later);
        assert_eq!(merged.values(), &[5.0, 9.0, 1.0]);
        assert_relative_eq!(merged.worst_absolute(), 9.0);
    }

    fn scenario_strategy() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(-1.0e6..1.0e6_f64, 0..64)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn test_worst_absolute_sign_invariant(values in scenario_strategy()) {
            let negated: Vec<f64> = values.iter().map(|v| -v).collect();
            prop_assert_eq!(worst_absolute(&values), worst_absolute(&negated));
            prop_assert!(worst_absolute(&values) >= 0.0);
        }

        #[test]
        fn test_merge_by_max_laws(a in scenario_strategy(), b in scenario_strategy()) {
            let merged = merge_by_max(&a, &b);
            prop_assert_eq!(merged.len(), b.len());
            for i in 0..merged.len() {
                if i < a.len() {
                    prop_assert_eq!(merged[i], a[i].max(b[i]));
                } else {
                    prop_assert_eq!(merged[i], b[i]);
                }
            }
        }

        #[test]
        fn test_merge_with_self_is_identity(a in scenario_strategy()) {
            prop_assert_eq!(merge_by_max(&a, &a), a);
        }

        #[test]
        fn test_accumulate_is_linear(values in scenario_strategy(), lots in -50i64..50) {
            let mut unit = Vec::new();
            accumulate_scaled(&mut unit, &values, 1.0);
            let mut scaled = Vec::new();
            accumulate_scaled(&mut scaled, &values, lots as f64);
            for (u, s) in unit.iter().zip(&scaled) {
                prop_assert!((u * lots as f64 - s).abs() <= 1e-9 * s.abs().max(1.0));
            }
        }
    }
}
