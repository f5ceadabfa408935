/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → EmployeeTable (memoized for the default path)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ EmployeeTable │  Vec<EmployeeRecord>, unique-value indices
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Department ∧ SalaryLevel predicate → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  counts, grouped means, Pearson matrix, scatter split
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
