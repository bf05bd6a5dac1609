use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use relief_ingest::load_guardians;
use relief_model::{EntityKind, FieldKind, RecordSpec, ReferenceSet};
use relief_report::{ErrorReport, write_report};
use relief_validate::{ReferenceIndex, all_specs, spec_for};
use serde::Serialize;
use tracing::{info, info_span, warn};

use relief_cli::logging::redact_value;
use relief_cli::pipeline::{ImportRequest, run_import_pipeline};
use relief_cli::types::ImportResult;

use crate::cli::{ImportArgs, SuggestArgs, TemplateArgs};
use crate::summary::{apply_table_style, header_cell};

pub fn run_import(args: &ImportArgs) -> Result<ImportResult> {
    let entity = EntityKind::from(args.entity);
    let span = info_span!("import_command", entity = %entity);
    let _guard = span.enter();

    let as_of = args
        .as_of
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let request = ImportRequest {
        entity,
        rows: &args.rows,
        guardians: args.guardians.as_deref(),
        martyrs: args.martyrs.as_deref(),
        existing: args.existing.as_deref(),
        as_of,
        check_batch_duplicates: args.check_batch_duplicates,
    };
    let run = run_import_pipeline(&request)?;
    let report = ErrorReport::build(&run.outcome.errors);

    if let Some(path) = &args.output {
        write_json_file(path, &run.outcome.committable)
            .with_context(|| format!("write records to {}", path.display()))?;
        info!(
            path = %path.display(),
            records = run.outcome.accepted_count(),
            "records written"
        );
    }
    if let Some(path) = &args.report {
        write_report(&report, path, args.report_format.into())
            .with_context(|| format!("write error report to {}", path.display()))?;
        info!(path = %path.display(), errors = report.total(), "error report written");
    }
    let mut guardians_path = None;
    if let Some(path) = &args.updated_guardians {
        match &run.updated_guardians {
            Some(guardians) => {
                write_json_file(path, guardians)
                    .with_context(|| format!("write guardians to {}", path.display()))?;
                guardians_path = Some(path.clone());
            }
            None => warn!("--updated-guardians needs --guardians; nothing written"),
        }
    }

    Ok(ImportResult {
        run,
        report,
        records_path: args.output.clone(),
        report_path: args.report.clone(),
        guardians_path,
    })
}

pub fn run_template(args: &TemplateArgs) -> Result<()> {
    let spec = spec_for(args.entity.into());
    match &args.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            write_template(&spec, file)?;
            println!("Template written to {}", path.display());
        }
        None => write_template(&spec, io::stdout().lock())?,
    }
    Ok(())
}

/// Header row of column labels followed by one example row.
pub fn write_template<W: Write>(spec: &RecordSpec, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(spec.labels())?;
    csv_writer.write_record(spec.fields.iter().map(|field| example_value(&field.kind)))?;
    csv_writer.flush()?;
    Ok(())
}

fn example_value(kind: &FieldKind) -> &str {
    match kind {
        FieldKind::Text => "",
        FieldKind::NationalId | FieldKind::Reference(_) => "123456789",
        FieldKind::Date => "15/03/2015",
        FieldKind::Count => "0",
        FieldKind::Choice { options } => options.first().map_or("", String::as_str),
    }
}

pub fn run_entities() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Entity"),
        header_cell("Columns"),
        header_cell("Required"),
        header_cell("References"),
    ]);
    apply_table_style(&mut table);
    for spec in all_specs() {
        let references: Vec<&str> = spec
            .reference_sets()
            .iter()
            .map(ReferenceSet::as_str)
            .collect();
        table.add_row(vec![
            Cell::new(format!("{} ({})", spec.entity.label(), spec.entity.as_str())),
            Cell::new(spec.labels().collect::<Vec<_>>().join(", ")),
            Cell::new(spec.required_labels().collect::<Vec<_>>().join(", ")),
            Cell::new(references.join(", ")),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_suggest(args: &SuggestArgs) -> Result<()> {
    let guardians = load_guardians(&args.guardians)
        .with_context(|| format!("load guardians from {}", args.guardians.display()))?;
    let index = ReferenceIndex::from_guardians(guardians);
    let matches = index.suggest_by_name(&args.query, args.limit);
    info!(
        query = redact_value(&args.query),
        matches = matches.len(),
        "guardian search"
    );
    if matches.is_empty() {
        println!("No guardian name contains '{}'", args.query);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("National ID"),
        header_cell("Name"),
        header_cell("Children"),
        header_cell("Marital status"),
    ]);
    apply_table_style(&mut table);
    for entity in matches {
        let Some(guardian) = entity.as_guardian() else {
            continue;
        };
        table.add_row(vec![
            Cell::new(&guardian.national_id),
            Cell::new(&guardian.name),
            Cell::new(guardian.children_count),
            Cell::new(guardian.marital_status),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
