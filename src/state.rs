use crate::color::CategoryColors;
use crate::data::filter::{filtered_indices, init_filter_state, FilterState};
use crate::data::model::{EmployeeTable, SalaryLevel};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a load succeeds).
    pub table: Option<EmployeeTable>,

    /// Current Department / SalaryLevel selections.
    pub filters: FilterState,

    /// Indices of employees passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// One colour per department, shared by bars and filter swatches.
    pub dept_colors: Option<CategoryColors>,

    /// Whether the raw-data table is shown above the charts.
    pub show_raw_data: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            dept_colors: None,
            show_raw_data: false,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table, initialise filters and colours.
    pub fn set_table(&mut self, table: EmployeeTable) {
        self.filters = init_filter_state(&table);
        self.visible_indices = (0..table.len()).collect();
        self.dept_colors = Some(CategoryColors::new(&table.departments));
        self.table = Some(table);
        self.status_message = None;
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            self.visible_indices = filtered_indices(table, &self.filters);
        }
    }

    /// Select every observed department.
    pub fn select_all_departments(&mut self) {
        if let Some(table) = &self.table {
            self.filters.departments = table.departments.clone();
            self.refilter();
        }
    }

    /// Deselect every department (empty filtered view).
    pub fn select_no_departments(&mut self) {
        self.filters.departments.clear();
        self.refilter();
    }

    /// Select every observed salary level.
    pub fn select_all_salary_levels(&mut self) {
        if let Some(table) = &self.table {
            self.filters.salary_levels = table.salary_levels.clone();
            self.refilter();
        }
    }

    /// Deselect every salary level (empty filtered view).
    pub fn select_no_salary_levels(&mut self) {
        self.filters.salary_levels.clear();
        self.refilter();
    }

    /// Toggle one department in the filter.
    pub fn toggle_department(&mut self, department: &str) {
        if !self.filters.departments.remove(department) {
            self.filters.departments.insert(department.to_string());
        }
        self.refilter();
    }

    /// Toggle one salary level in the filter.
    pub fn toggle_salary_level(&mut self, level: SalaryLevel) {
        if !self.filters.salary_levels.remove(&level) {
            self.filters.salary_levels.insert(level);
        }
        self.refilter();
    }
}
