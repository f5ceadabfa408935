use std::collections::BTreeMap;

use super::model::EmployeeTable;

// ---------------------------------------------------------------------------
// Aggregations behind the four chart panels. All functions are pure over
// (table, visible indices) and total over the empty selection.
// ---------------------------------------------------------------------------

/// Tally of the attrition outcome over a filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttritionCounts {
    pub stayed: usize,
    pub left: usize,
}

impl AttritionCounts {
    pub fn total(&self) -> usize {
        self.stayed + self.left
    }
}

/// Count stayed vs. left employees among `indices`.
pub fn attrition_counts(table: &EmployeeTable, indices: &[usize]) -> AttritionCounts {
    let mut counts = AttritionCounts::default();
    for &i in indices {
        if table.records[i].attrition {
            counts.left += 1;
        } else {
            counts.stayed += 1;
        }
    }
    counts
}

/// Mean attrition per department, sorted by rate descending (ties broken by
/// department name so the ordering is stable).
pub fn department_attrition_rates(table: &EmployeeTable, indices: &[usize]) -> Vec<(String, f64)> {
    let mut acc: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for &i in indices {
        let rec = &table.records[i];
        let entry = acc.entry(rec.department.as_str()).or_insert((0, 0));
        if rec.attrition {
            entry.0 += 1;
        }
        entry.1 += 1;
    }

    let mut rates: Vec<(String, f64)> = acc
        .into_iter()
        .map(|(dept, (left, total))| (dept.to_string(), left as f64 / total as f64))
        .collect();
    rates.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rates
}

// ---------------------------------------------------------------------------
// Pearson correlation
// ---------------------------------------------------------------------------

/// Symmetric matrix of pairwise Pearson correlations over the numeric columns.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major, `values[i][j]` = corr(columns[i], columns[j]). NaN where
    /// the correlation is undefined.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Compute the correlation matrix over the table's numeric columns,
/// restricted to `indices`.
pub fn correlation_matrix(table: &EmployeeTable, indices: &[usize]) -> CorrelationMatrix {
    let columns = table.numeric_columns();
    let series: Vec<Vec<f64>> = columns
        .iter()
        .map(|col| {
            indices
                .iter()
                .map(|&i| table.records[i].numeric_value(col).unwrap_or(f64::NAN))
                .collect()
        })
        .collect();

    let n = columns.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(&series[i], &series[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix { columns, values }
}

/// Pearson correlation coefficient. Non-finite pairs are skipped; returns NaN
/// for fewer than two usable pairs or a zero-variance series.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .collect();

    let n = pairs.len() as f64;
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}

// ---------------------------------------------------------------------------
// Scatter split
// ---------------------------------------------------------------------------

/// Satisfaction-vs-evaluation points, split by attrition outcome so each
/// series gets its own colour and legend entry.
#[derive(Debug, Clone, Default)]
pub struct ScatterSplit {
    pub stayed: Vec<[f64; 2]>,
    pub left: Vec<[f64; 2]>,
}

pub fn satisfaction_vs_evaluation(table: &EmployeeTable, indices: &[usize]) -> ScatterSplit {
    let mut split = ScatterSplit::default();
    for &i in indices {
        let rec = &table.records[i];
        let point = [rec.satisfaction_level, rec.last_evaluation];
        if rec.attrition {
            split.left.push(point);
        } else {
            split.stayed.push(point);
        }
    }
    split
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::model::{EmployeeRecord, SalaryLevel};

    fn rec(department: &str, attrition: bool, satisfaction: f64, evaluation: f64) -> EmployeeRecord {
        EmployeeRecord {
            department: department.to_string(),
            salary_level: SalaryLevel::Medium,
            attrition,
            satisfaction_level: satisfaction,
            last_evaluation: evaluation,
            metrics: BTreeMap::new(),
        }
    }

    /// Two departments of 10 rows each: Sales with 4 leavers, R&D with 1.
    fn sales_vs_rnd() -> EmployeeTable {
        let mut records = Vec::new();
        for i in 0..10 {
            records.push(rec("Sales", i < 4, 0.1 * i as f64, 0.5));
        }
        for i in 0..10 {
            records.push(rec("R&D", i < 1, 0.1 * i as f64, 0.6));
        }
        EmployeeTable::from_records(records)
    }

    fn all_indices(table: &EmployeeTable) -> Vec<usize> {
        (0..table.len()).collect()
    }

    #[test]
    fn counts_sum_to_view_size() {
        let table = sales_vs_rnd();
        let indices = all_indices(&table);
        let counts = attrition_counts(&table, &indices);
        assert_eq!(counts.total(), indices.len());
        assert_eq!(counts.left, 5);
        assert_eq!(counts.stayed, 15);
    }

    #[test]
    fn department_rates_match_known_fixture() {
        let table = sales_vs_rnd();
        let rates = department_attrition_rates(&table, &all_indices(&table));
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].0, "Sales");
        assert!((rates[0].1 - 0.4).abs() < 1e-12);
        assert_eq!(rates[1].0, "R&D");
        assert!((rates[1].1 - 0.1).abs() < 1e-12);
    }

    #[test]
    fn department_rates_stay_in_unit_interval() {
        let table = sales_vs_rnd();
        for (_, rate) in department_attrition_rates(&table, &all_indices(&table)) {
            assert!((0.0..=1.0).contains(&rate));
        }
    }

    #[test]
    fn pearson_of_linear_series_is_one() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.0, 6.0, 8.0];
        assert!((pearson(&xs, &ys) - 1.0).abs() < 1e-12);

        let neg = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson(&xs, &neg) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_is_undefined_for_degenerate_series() {
        assert!(pearson(&[1.0], &[2.0]).is_nan());
        assert!(pearson(&[1.0, 1.0, 1.0], &[2.0, 3.0, 4.0]).is_nan());
        assert!(pearson(&[f64::NAN, 1.0], &[2.0, 3.0]).is_nan());
    }

    #[test]
    fn correlation_matrix_is_symmetric_with_unit_diagonal() {
        let table = sales_vs_rnd();
        let matrix = correlation_matrix(&table, &all_indices(&table));
        let n = matrix.columns.len();
        assert_eq!(n, 3);
        for i in 0..n {
            for j in 0..n {
                let a = matrix.values[i][j];
                let b = matrix.values[j][i];
                assert!(a.is_nan() && b.is_nan() || (a - b).abs() < 1e-12);
            }
            if matrix.values[i][i].is_finite() {
                assert!((matrix.values[i][i] - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn aggregations_accept_empty_view() {
        let table = sales_vs_rnd();
        let empty: Vec<usize> = Vec::new();

        let counts = attrition_counts(&table, &empty);
        assert_eq!(counts.total(), 0);

        assert!(department_attrition_rates(&table, &empty).is_empty());

        let matrix = correlation_matrix(&table, &empty);
        assert!(!matrix.is_empty());
        assert!(matrix.values.iter().flatten().all(|v| v.is_nan()));

        let split = satisfaction_vs_evaluation(&table, &empty);
        assert!(split.stayed.is_empty() && split.left.is_empty());
    }

    #[test]
    fn scatter_split_partitions_by_attrition() {
        let table = sales_vs_rnd();
        let split = satisfaction_vs_evaluation(&table, &all_indices(&table));
        assert_eq!(split.left.len(), 5);
        assert_eq!(split.stayed.len(), 15);
        assert_eq!(split.left.len() + split.stayed.len(), table.len());
    }
}
