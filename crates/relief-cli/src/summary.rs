use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use relief_cli::types::ImportResult;
use relief_report::{ErrorCategory, ErrorReport};

/// Issue lines shown on the terminal; the report file always has all of them.
const MAX_ISSUE_LINES: usize = 200;

pub fn print_summary(result: &ImportResult) {
    let run = &result.run;
    let outcome = &run.outcome;
    println!("Entity: {}", run.entity.label());
    if let Some(path) = &result.records_path {
        println!("Records: {}", path.display());
    }
    if let Some(path) = &result.report_path {
        println!("Error report: {}", path.display());
    }
    if let Some(path) = &result.guardians_path {
        println!("Updated guardians: {}", path.display());
    }
    if !run.headers.missing_required.is_empty() {
        println!(
            "Missing required columns: {}",
            run.headers.missing_required.join(", ")
        );
    }
    if !run.headers.unknown.is_empty() {
        println!("Ignored columns: {}", run.headers.unknown.join(", "));
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Accepted"),
        header_cell("Rejected"),
        header_cell("Errors"),
        header_cell("Date"),
        header_cell("Reference"),
        header_cell("Allowed values"),
        header_cell("Other"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..8 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let report = &result.report;
    table.add_row(vec![
        Cell::new(outcome.total_rows).add_attribute(Attribute::Bold),
        count_cell(Some(outcome.accepted_count()), Color::Green),
        count_cell(Some(outcome.rejected_count()), Color::Red),
        count_cell(Some(report.total()), Color::Red),
        count_cell(Some(report.count(ErrorCategory::Date)), Color::Yellow),
        count_cell(Some(report.count(ErrorCategory::Reference)), Color::Yellow),
        count_cell(Some(report.count(ErrorCategory::Choice)), Color::Yellow),
        count_cell(Some(report.count(ErrorCategory::Generic)), Color::Yellow),
    ]);
    println!("{table}");

    if run.batch_duplicates > 0 {
        println!(
            "{} row(s) repeat an earlier row of the same file",
            run.batch_duplicates
        );
    }
    if !run.updates.is_empty() {
        println!("{} guardian update(s) owed after commit", run.updates.len());
    }

    print_issue_table(report);
    print_common_fixes(report);
}

fn print_issue_table(report: &ErrorReport) {
    if report.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Category"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    for line in report.lines.iter().take(MAX_ISSUE_LINES) {
        table.add_row(vec![
            dim_cell(line.number),
            Cell::new(line.row),
            Cell::new(&line.field).fg(Color::Blue),
            category_cell(line.category),
            Cell::new(&line.message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
    if report.total() > MAX_ISSUE_LINES {
        println!(
            "... {} more; see the error report for the full list",
            report.total() - MAX_ISSUE_LINES
        );
    }
}

fn print_common_fixes(report: &ErrorReport) {
    if report.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Category"), header_cell("Common fix")]);
    apply_table_style(&mut table);
    for fix in ErrorReport::common_fixes() {
        table.add_row(vec![category_cell(fix.category), Cell::new(fix.advice)]);
    }
    println!();
    println!("Common fixes:");
    println!("{table}");
}

fn category_cell(category: ErrorCategory) -> Cell {
    let color = match category {
        ErrorCategory::Date => Color::Magenta,
        ErrorCategory::Reference => Color::Red,
        ErrorCategory::Choice => Color::Yellow,
        ErrorCategory::Generic => Color::DarkGrey,
    };
    Cell::new(category.label()).fg(color)
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Fixed(24)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Percentage(70)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
