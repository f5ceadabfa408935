use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Column names of the source dataset
// ---------------------------------------------------------------------------

/// Required column headers. Anything else in the file is treated as an extra
/// numeric metric (or dropped if it fails to parse as one).
pub mod columns {
    pub const DEPARTMENT: &str = "Department";
    pub const SALARY_LEVEL: &str = "SalaryLevel";
    pub const ATTRITION: &str = "Attrition";
    pub const SATISFACTION_LEVEL: &str = "SatisfactionLevel";
    pub const LAST_EVALUATION: &str = "LastEvaluation";
}

// ---------------------------------------------------------------------------
// SalaryLevel – ordered compensation band
// ---------------------------------------------------------------------------

/// Ordered categorical salary band. Variant order gives the natural
/// `Low < Medium < High` ordering used by `BTreeSet` in filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SalaryLevel {
    Low,
    Medium,
    High,
}

impl SalaryLevel {
    /// Case-insensitive parse of the source vocabulary.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(SalaryLevel::Low),
            "medium" => Some(SalaryLevel::Medium),
            "high" => Some(SalaryLevel::High),
            _ => None,
        }
    }
}

impl fmt::Display for SalaryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SalaryLevel::Low => "low",
            SalaryLevel::Medium => "medium",
            SalaryLevel::High => "high",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// EmployeeRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single employee (one row of the source table). Never mutated after load.
#[derive(Debug, Clone)]
pub struct EmployeeRecord {
    pub department: String,
    pub salary_level: SalaryLevel,
    /// Attrition outcome: `true` means the employee left.
    pub attrition: bool,
    pub satisfaction_level: f64,
    pub last_evaluation: f64,
    /// Additional numeric columns: column_name → value (NaN for empty cells).
    pub metrics: BTreeMap<String, f64>,
}

impl EmployeeRecord {
    /// Uniform numeric view over the record, used by the correlation matrix.
    /// Attrition is exposed with its 0/1 integer encoding.
    pub fn numeric_value(&self, column: &str) -> Option<f64> {
        match column {
            columns::ATTRITION => Some(if self.attrition { 1.0 } else { 0.0 }),
            columns::SATISFACTION_LEVEL => Some(self.satisfaction_level),
            columns::LAST_EVALUATION => Some(self.last_evaluation),
            _ => self.metrics.get(column).copied(),
        }
    }
}

// ---------------------------------------------------------------------------
// EmployeeTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed unique values per filter column.
#[derive(Debug, Clone)]
pub struct EmployeeTable {
    /// All employees (rows).
    pub records: Vec<EmployeeRecord>,
    /// Distinct departments observed in the data.
    pub departments: BTreeSet<String>,
    /// Distinct salary bands observed in the data.
    pub salary_levels: BTreeSet<SalaryLevel>,
    /// Names of the extra numeric columns (union over all rows, sorted).
    pub metric_columns: Vec<String>,
}

impl EmployeeTable {
    /// Build the table indices from the loaded records.
    pub fn from_records(records: Vec<EmployeeRecord>) -> Self {
        let mut departments = BTreeSet::new();
        let mut salary_levels = BTreeSet::new();
        let mut metric_names: BTreeSet<String> = BTreeSet::new();

        for rec in &records {
            departments.insert(rec.department.clone());
            salary_levels.insert(rec.salary_level);
            for name in rec.metrics.keys() {
                metric_names.insert(name.clone());
            }
        }

        EmployeeTable {
            records,
            departments,
            salary_levels,
            metric_columns: metric_names.into_iter().collect(),
        }
    }

    /// Columns that participate in the correlation matrix, core first.
    pub fn numeric_columns(&self) -> Vec<String> {
        let mut cols = vec![
            columns::ATTRITION.to_string(),
            columns::SATISFACTION_LEVEL.to_string(),
            columns::LAST_EVALUATION.to_string(),
        ];
        cols.extend(self.metric_columns.iter().cloned());
        cols
    }

    /// Number of employees.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_levels_are_ordered() {
        assert!(SalaryLevel::Low < SalaryLevel::Medium);
        assert!(SalaryLevel::Medium < SalaryLevel::High);
    }

    #[test]
    fn salary_parse_is_case_insensitive() {
        assert_eq!(SalaryLevel::parse("LOW"), Some(SalaryLevel::Low));
        assert_eq!(SalaryLevel::parse(" Medium "), Some(SalaryLevel::Medium));
        assert_eq!(SalaryLevel::parse("high"), Some(SalaryLevel::High));
        assert_eq!(SalaryLevel::parse("executive"), None);
    }

    #[test]
    fn numeric_view_encodes_attrition_as_binary() {
        let rec = EmployeeRecord {
            department: "Sales".into(),
            salary_level: SalaryLevel::Low,
            attrition: true,
            satisfaction_level: 0.35,
            last_evaluation: 0.9,
            metrics: BTreeMap::from([("TenureYears".to_string(), 4.0)]),
        };
        assert_eq!(rec.numeric_value(columns::ATTRITION), Some(1.0));
        assert_eq!(rec.numeric_value(columns::SATISFACTION_LEVEL), Some(0.35));
        assert_eq!(rec.numeric_value("TenureYears"), Some(4.0));
        assert_eq!(rec.numeric_value("Department"), None);
    }

    #[test]
    fn table_indexes_unique_values() {
        let recs = vec![
            EmployeeRecord {
                department: "Sales".into(),
                salary_level: SalaryLevel::Low,
                attrition: false,
                satisfaction_level: 0.7,
                last_evaluation: 0.6,
                metrics: BTreeMap::new(),
            },
            EmployeeRecord {
                department: "R&D".into(),
                salary_level: SalaryLevel::High,
                attrition: true,
                satisfaction_level: 0.4,
                last_evaluation: 0.8,
                metrics: BTreeMap::from([("NumProjects".to_string(), 5.0)]),
            },
        ];
        let table = EmployeeTable::from_records(recs);
        assert_eq!(table.len(), 2);
        assert!(table.departments.contains("Sales"));
        assert!(table.departments.contains("R&D"));
        assert_eq!(table.salary_levels.len(), 2);
        assert_eq!(table.metric_columns, vec!["NumProjects".to_string()]);
        assert_eq!(
            table.numeric_columns(),
            vec![
                "Attrition".to_string(),
                "SatisfactionLevel".to_string(),
                "LastEvaluation".to_string(),
                "NumProjects".to_string(),
            ]
        );
    }
}
