//! Filter/aggregate pipeline
//!
//! Narrows a [`RecordTable`] through the fixed sidebar filter chain
//! (department, role set, CPF, status: conjunctive, in that order), then
//! derives the summary count, frequency tables, and monthly hiring and
//! termination trends. Sidebar option lists are computed at the same
//! pipeline positions the controls populate from: departments from the
//! full table, roles after the department filter, statuses after the CPF
//! filter.

pub mod charts;

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::table::RecordTable;
use crate::types::{AppError, AppResult};

pub const COL_DEPARTMENT: &str = "Departamento";
pub const COL_ROLE: &str = "Cargo";
pub const COL_CPF: &str = "CPF";
pub const COL_STATUS: &str = "Status";
pub const COL_HIRE_DATE: &str = "Data de Contratação";
pub const COL_TERMINATION_DATE: &str = "Data de Demissão";

/// Sentinel option for the single-selects.
pub const ALL: &str = "Todos";

pub const EMPTY_ROLE_WARNING: &str = "Selecione pelo menos um Cargo para continuar.";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterSelection {
    /// `None` or `"Todos"` passes every department through.
    pub department: Option<String>,
    /// `None` defaults to every distinct role; an explicit empty list is
    /// the user clearing the multi-select and short-circuits the pipeline.
    pub roles: Option<Vec<String>>,
    /// Exact CPF match, applied only when non-empty.
    pub cpf: Option<String>,
    /// `None` or `"Todos"` passes every status through.
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SidebarOptions {
    pub departments: Vec<String>,
    pub roles: Vec<String>,
    /// Absent when the pipeline halted before the status stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    /// Calendar month, `YYYY-MM`.
    pub month: String,
    pub count: usize,
}

#[derive(Debug)]
pub struct AnalysisReport {
    pub options: SidebarOptions,
    /// The filtered record set all output below is computed from.
    pub table: RecordTable,
    pub total: usize,
    pub role_counts: Vec<(String, usize)>,
    pub status_counts: Vec<(String, usize)>,
    pub hiring_trend: Option<Vec<MonthBucket>>,
    pub termination_trend: Option<Vec<MonthBucket>>,
}

#[derive(Debug)]
pub enum AnalysisOutcome {
    /// The role multi-select was emptied: warn and produce nothing else.
    Halted {
        options: SidebarOptions,
        warning: String,
    },
    Report(AnalysisReport),
}

/// Run the full filter chain over a freshly extracted table.
pub fn run_analysis(
    table: &RecordTable,
    filters: &FilterSelection,
) -> AppResult<AnalysisOutcome> {
    let mut df = table.clone();

    let dept_idx = df.require_column(COL_DEPARTMENT)?;
    let departments = df.distinct(dept_idx);
    if let Some(dept) = filters.department.as_deref() {
        if dept != ALL {
            df.retain(|row| row[dept_idx] == dept);
        }
    }

    let role_idx = df.require_column(COL_ROLE)?;
    let role_options = df.distinct(role_idx);
    let selected_roles = match &filters.roles {
        Some(selection) => selection.clone(),
        None => role_options.clone(),
    };
    if selected_roles.is_empty() {
        return Ok(AnalysisOutcome::Halted {
            options: SidebarOptions {
                departments,
                roles: role_options,
                statuses: None,
            },
            warning: EMPTY_ROLE_WARNING.to_string(),
        });
    }
    df.retain(|row| selected_roles.iter().any(|role| *role == row[role_idx]));

    if let Some(cpf) = filters.cpf.as_deref() {
        if !cpf.is_empty() {
            let cpf_idx = df.require_column(COL_CPF)?;
            df.retain(|row| row[cpf_idx] == cpf);
        }
    }

    let status_idx = df.require_column(COL_STATUS)?;
    let statuses = df.distinct(status_idx);
    if let Some(status) = filters.status.as_deref() {
        if status != ALL {
            df.retain(|row| row[status_idx] == status);
        }
    }

    let role_counts = df.value_counts(role_idx);
    let status_counts = df.value_counts(status_idx);

    // Trends require both date columns together; one alone renders none.
    let (hiring_trend, termination_trend) = match (
        df.column_index(COL_HIRE_DATE),
        df.column_index(COL_TERMINATION_DATE),
    ) {
        (Some(hire_idx), Some(term_idx)) => (
            Some(monthly_counts(&df, hire_idx, COL_HIRE_DATE)?),
            Some(monthly_counts(&df, term_idx, COL_TERMINATION_DATE)?),
        ),
        _ => (None, None),
    };

    let total = df.len();
    Ok(AnalysisOutcome::Report(AnalysisReport {
        options: SidebarOptions {
            departments,
            roles: role_options,
            statuses: Some(statuses),
        },
        total,
        role_counts,
        status_counts,
        hiring_trend,
        termination_trend,
        table: df,
    }))
}

/// Resample one date column to monthly bucket counts, zero-filling every
/// month between the earliest and latest parsed date. Empty cells are
/// skipped; a non-empty cell no format accepts is fatal for the pass.
pub fn monthly_counts(
    table: &RecordTable,
    idx: usize,
    column: &str,
) -> AppResult<Vec<MonthBucket>> {
    let mut dates = Vec::new();
    for row in &table.rows {
        let raw = row[idx].trim();
        if raw.is_empty() {
            continue;
        }
        match parse_date(raw) {
            Some(date) => dates.push(date),
            None => {
                return Err(AppError::DateParse {
                    column: column.to_string(),
                    value: raw.to_string(),
                })
            }
        }
    }

    let (first, last) = match (dates.iter().min(), dates.iter().max()) {
        (Some(min), Some(max)) => (*min, *max),
        _ => return Ok(Vec::new()),
    };

    let mut buckets: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    let (mut year, mut month) = (first.year(), first.month());
    loop {
        buckets.insert((year, month), 0);
        if (year, month) == (last.year(), last.month()) {
            break;
        }
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    for date in &dates {
        if let Some(count) = buckets.get_mut(&(date.year(), date.month())) {
            *count += 1;
        }
    }

    Ok(buckets
        .into_iter()
        .map(|((y, m), count)| MonthBucket {
            month: format!("{y:04}-{m:02}"),
            count,
        })
        .collect())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    for format in ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    None
}
