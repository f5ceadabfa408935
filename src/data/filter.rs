use std::collections::BTreeSet;

use super::model::{EmployeeTable, SalaryLevel};

// ---------------------------------------------------------------------------
// Filter predicate: which category values are selected per dimension
// ---------------------------------------------------------------------------

/// Selection state for the two filter dimensions. An empty set means
/// "nothing selected" and yields an empty view, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub departments: BTreeSet<String>,
    pub salary_levels: BTreeSet<SalaryLevel>,
}

/// Initialise a [`FilterState`] with every observed value selected
/// (i.e., show everything).
pub fn init_filter_state(table: &EmployeeTable) -> FilterState {
    FilterState {
        departments: table.departments.clone(),
        salary_levels: table.salary_levels.clone(),
    }
}

/// Return indices of records that pass both filters: the department must be
/// in the selected department set AND the salary level in the selected
/// salary set.
pub fn filtered_indices(table: &EmployeeTable, filters: &FilterState) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            filters.departments.contains(&rec.department)
                && filters.salary_levels.contains(&rec.salary_level)
        })
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::model::EmployeeRecord;

    fn rec(department: &str, salary: SalaryLevel) -> EmployeeRecord {
        EmployeeRecord {
            department: department.to_string(),
            salary_level: salary,
            attrition: false,
            satisfaction_level: 0.5,
            last_evaluation: 0.5,
            metrics: BTreeMap::new(),
        }
    }

    fn sample_table() -> EmployeeTable {
        EmployeeTable::from_records(vec![
            rec("Sales", SalaryLevel::Low),
            rec("Sales", SalaryLevel::High),
            rec("R&D", SalaryLevel::Low),
            rec("R&D", SalaryLevel::Medium),
            rec("Support", SalaryLevel::Medium),
        ])
    }

    #[test]
    fn default_filter_keeps_everything() {
        let table = sample_table();
        let filters = init_filter_state(&table);
        assert_eq!(filtered_indices(&table, &filters), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn filter_is_set_intersection() {
        let table = sample_table();
        let mut filters = init_filter_state(&table);
        filters.departments = BTreeSet::from(["Sales".to_string(), "R&D".to_string()]);
        filters.salary_levels = BTreeSet::from([SalaryLevel::Low]);

        let kept = filtered_indices(&table, &filters);
        assert_eq!(kept, vec![0, 2]);
        for &i in &kept {
            assert!(filters.departments.contains(&table.records[i].department));
            assert!(filters.salary_levels.contains(&table.records[i].salary_level));
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let table = sample_table();
        let mut filters = init_filter_state(&table);
        filters.salary_levels = BTreeSet::from([SalaryLevel::Medium]);

        let once = filtered_indices(&table, &filters);
        // Re-filter the already-filtered subset by the same predicate.
        let twice: Vec<usize> = once
            .iter()
            .copied()
            .filter(|&i| {
                let rec = &table.records[i];
                filters.departments.contains(&rec.department)
                    && filters.salary_levels.contains(&rec.salary_level)
            })
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_selection_yields_empty_view() {
        let table = sample_table();
        let mut filters = init_filter_state(&table);
        filters.departments.clear();
        assert!(filtered_indices(&table, &filters).is_empty());

        let mut filters = init_filter_state(&table);
        filters.salary_levels.clear();
        assert!(filtered_indices(&table, &filters).is_empty());
    }
}
