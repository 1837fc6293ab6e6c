//! FILENAME: core/render-xlsx/src/writer.rs

use report_engine::{CellKind, CellValue, ReportOutput, SheetView};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};
use std::path::Path;

use crate::RenderError;

/// Renders the report and saves it to `path`.
pub fn save_report(report: &ReportOutput, path: &Path) -> Result<(), RenderError> {
    let mut workbook = build_workbook(report)?;
    workbook.save(path)?;
    Ok(())
}

/// Renders the report into an in-memory .xlsx byte buffer.
pub fn report_to_buffer(report: &ReportOutput) -> Result<Vec<u8>, RenderError> {
    let mut workbook = build_workbook(report)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_workbook(report: &ReportOutput) -> Result<Workbook, RenderError> {
    let mut workbook = Workbook::new();
    for sheet in &report.sheets {
        write_sheet(&mut workbook, &sheet.view)?;
    }
    Ok(workbook)
}

fn write_sheet(workbook: &mut Workbook, view: &SheetView) -> Result<(), RenderError> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&view.name)?;

    for (col, width) in view.column_widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    let header = header_format();
    let subtotal = subtotal_format();
    let data = data_format();

    // Merges go in first; the anchor content lands in the cell pass
    // below. Covered cells are empty in the view, so nothing else
    // touches the merged area.
    for merge in &view.merges {
        let format = if merge.start_row <= view.header_row_count {
            &header
        } else {
            &data
        };
        worksheet.merge_range(
            merge.start_row - 1,
            (merge.start_col - 1) as u16,
            merge.end_row - 1,
            (merge.end_col - 1) as u16,
            "",
            format,
        )?;
    }

    for (row, cells) in view.rows.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let format = match cell.kind {
                CellKind::Header => &header,
                CellKind::Subtotal => &subtotal,
                CellKind::Data => &data,
            };
            let row = row as u32;
            let col = col as u16;

            match &cell.value {
                CellValue::Empty => {}
                CellValue::Text(s) => {
                    worksheet.write_string_with_format(row, col, s, format)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number_with_format(row, col, *n, format)?;
                }
                CellValue::Formula(formula) => {
                    let clean = formula.strip_prefix('=').unwrap_or(formula);
                    worksheet.write_formula_with_format(row, col, clean, format)?;
                }
            }
        }
    }

    // Keep the header band and subtotal row visible while scrolling.
    worksheet.set_freeze_panes(view.first_data_row.saturating_sub(1), 0)?;

    Ok(())
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_background_color(Color::RGB(0xD9D9D9))
        .set_border(FormatBorder::Thin)
}

fn subtotal_format() -> Format {
    Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_background_color(Color::RGB(0xF2F2F2))
        .set_border(FormatBorder::Thin)
}

fn data_format() -> Format {
    Format::new().set_border(FormatBorder::Thin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use report_engine::{
        compose_report, CanonicalOrder, Entity, Observation, SheetDefinition, SheetSource,
        SourceError,
    };

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn sample_report() -> ReportOutput {
        let entities = vec![
            Entity::new("e1", "North", "Harbor", "Gunwi Bridge"),
            Entity::new("e2", "North", "Harbor", "Daegu Tunnel"),
        ];
        let order = CanonicalOrder::new(vec!["North"]);
        let observations = vec![Observation::new("e1", d(2), d(2).and_hms_opt(9, 0, 0).unwrap())
            .with_person("Kim")
            .with_worker_count(9)];
        let sources = vec![
            SheetSource::new(SheetDefinition::inspections(), Ok(observations.clone())),
            SheetSource::new(SheetDefinition::work_logs(), Ok(observations)),
        ];
        compose_report(d(1), d(3), &entities, &order, sources).unwrap()
    }

    #[test]
    fn test_save_report_writes_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let report = sample_report();
        let path = dir.path().join(format!("{}.xlsx", report.file_stem));

        save_report(&report, &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_buffer_is_a_zip_container() {
        let report = sample_report();
        let buffer = report_to_buffer(&report).unwrap();
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_degraded_sheet_still_renders() {
        let entities = vec![Entity::new("e1", "North", "Harbor", "Gunwi Bridge")];
        let order = CanonicalOrder::new(vec!["North"]);
        let sources = vec![SheetSource::new(
            SheetDefinition::inspections(),
            Err(SourceError("timeout".to_string())),
        )];
        let report = compose_report(d(1), d(3), &entities, &order, sources).unwrap();

        let buffer = report_to_buffer(&report).unwrap();
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_both_sheets_present_in_workbook() {
        let report = sample_report();
        assert_eq!(report.sheets.len(), 2);
        // Rendering must accept every view the composer produces.
        report_to_buffer(&report).unwrap();
    }
}
