use std::borrow::Cow;

use chrono::FixedOffset;
use rust_xlsxwriter::*;
use serde::Serialize;

use crate::error::Result;
use crate::models::{submission::SubmissionRecord, test::TestContext};
use crate::utils::csv::{escape_csv_field, join_record};
use crate::utils::time::{elapsed_time, format_locale_datetime, utc_offset};

/// Excel refuses cells longer than this many characters.
const XLSX_CELL_LIMIT: usize = 32_767;
const XLSX_TRUNCATED_MARK: &str = "\n[truncated]";

pub const REPORT_COLUMNS: [&str; 6] = ["User", "Question", "Marks", "Submitted At", "Time Taken", "Code"];

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub utc_offset: FixedOffset,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { utc_offset: utc_offset(0) }
    }
}

impl ReportOptions {
    pub fn with_offset_minutes(minutes: i32) -> Self {
        Self { utc_offset: utc_offset(minutes) }
    }
}

/// One submission with its derived columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub user: Option<String>,
    pub question: Option<String>,
    pub marks: Option<String>,
    pub submitted_at: Option<String>,
    pub time_taken: String,
    pub code: Option<String>,
}

impl ReportRow {
    pub fn from_record(
        record: &SubmissionRecord,
        test_context: Option<&TestContext>,
        options: &ReportOptions,
    ) -> Self {
        let submitted_at = record.submitted_at_time(options.utc_offset);
        let start = test_context.and_then(|t| t.start_time(options.utc_offset));

        Self {
            user: record.user_label().map(str::to_string),
            question: record.question_label().map(str::to_string),
            marks: record.marks.as_ref().map(|m| m.to_string()),
            submitted_at: submitted_at.map(|dt| format_locale_datetime(dt, options.utc_offset)),
            time_taken: elapsed_time(record.time_taken, start, submitted_at),
            code: record.code.clone(),
        }
    }

    fn to_csv_line(&self) -> String {
        join_record([
            escape_csv_field(self.user.as_deref()),
            escape_csv_field(self.question.as_deref()),
            escape_csv_field(self.marks.as_deref()),
            escape_csv_field(self.submitted_at.as_deref()),
            escape_csv_field(Some(self.time_taken.as_str())),
            escape_csv_field(self.code.as_deref()),
        ])
    }
}

/// Cuts `text` so it fits one workbook cell, marking the cut. The CSV export
/// is never cut.
fn fit_xlsx_cell(text: &str) -> Cow<'_, str> {
    if text.chars().count() <= XLSX_CELL_LIMIT {
        return Cow::Borrowed(text);
    }
    let keep = XLSX_CELL_LIMIT - XLSX_TRUNCATED_MARK.chars().count();
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str(XLSX_TRUNCATED_MARK);
    Cow::Owned(cut)
}

pub struct ReportService;

impl ReportService {
    pub fn rows(
        records: &[SubmissionRecord],
        test_context: Option<&TestContext>,
        options: &ReportOptions,
    ) -> Vec<ReportRow> {
        records
            .iter()
            .map(|record| ReportRow::from_record(record, test_context, options))
            .collect()
    }

    /// Header line plus one line per record, in input order, joined with `\n`.
    pub fn build_csv(
        records: &[SubmissionRecord],
        test_context: Option<&TestContext>,
        options: &ReportOptions,
    ) -> String {
        let mut lines = Vec::with_capacity(records.len() + 1);
        lines.push(REPORT_COLUMNS.join(","));
        lines.extend(
            records
                .iter()
                .map(|record| ReportRow::from_record(record, test_context, options).to_csv_line()),
        );
        lines.join("\n")
    }

    /// Same columns as [`ReportService::build_csv`], as a styled workbook.
    pub fn build_xlsx(
        records: &[SubmissionRecord],
        test_context: Option<&TestContext>,
        options: &ReportOptions,
        test_id: &str,
    ) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Test Results")?;

        let primary_color = Color::RGB(0x1E293B);
        let header_bg = Color::RGB(0x0F172A);
        let header_text = Color::White;
        let alt_row_1 = Color::RGB(0xF8FAFC);
        let alt_row_2 = Color::White;
        let border_color = Color::RGB(0xE2E8F0);

        let widths = [28.0, 32.0, 10.0, 24.0, 14.0, 80.0];
        for (i, width) in widths.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }

        let title_format = Format::new()
            .set_font_size(16)
            .set_bold()
            .set_font_color(header_text)
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);

        let last_col = (REPORT_COLUMNS.len() - 1) as u16;
        worksheet.set_row_height(0, 36)?;
        worksheet.merge_range(0, 0, 0, last_col, &fit_xlsx_cell(&format!("Test Results: {}", test_id)), &title_format)?;

        let header_format = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(header_text)
            .set_background_color(header_bg)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);

        let header_row = 1;
        worksheet.set_row_height(header_row, 24)?;
        for (i, name) in REPORT_COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(header_row, i as u16, *name, &header_format)?;
        }

        let data_start_row = 2;
        for (idx, row) in Self::rows(records, test_context, options).iter().enumerate() {
            let sheet_row = data_start_row + idx as u32;
            let bg = if idx % 2 == 0 { alt_row_1 } else { alt_row_2 };

            let base_fmt = Format::new()
                .set_font_size(10)
                .set_background_color(bg)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            let center_fmt = base_fmt.clone().set_align(FormatAlign::Center);
            let code_fmt = base_fmt.clone().set_text_wrap().set_font_name("Consolas");

            worksheet.write_string_with_format(sheet_row, 0, fit_xlsx_cell(row.user.as_deref().unwrap_or("")), &base_fmt)?;
            worksheet.write_string_with_format(sheet_row, 1, fit_xlsx_cell(row.question.as_deref().unwrap_or("")), &base_fmt)?;

            match records[idx].marks.as_ref().map(|m| m.to_string()).and_then(|m| m.parse::<f64>().ok()) {
                Some(marks) => worksheet.write_number_with_format(sheet_row, 2, marks, &center_fmt)?,
                None => worksheet.write_string_with_format(sheet_row, 2, fit_xlsx_cell(row.marks.as_deref().unwrap_or("")), &center_fmt)?,
            };

            worksheet.write_string_with_format(sheet_row, 3, row.submitted_at.as_deref().unwrap_or(""), &center_fmt)?;
            worksheet.write_string_with_format(sheet_row, 4, &row.time_taken, &center_fmt)?;
            worksheet.write_string_with_format(sheet_row, 5, fit_xlsx_cell(row.code.as_deref().unwrap_or("")), &code_fmt)?;
        }

        worksheet.set_freeze_panes(2, 0)?;
        let last_row = (data_start_row + records.len() as u32).saturating_sub(1).max(header_row);
        worksheet.autofilter(header_row, 0, last_row, last_col)?;

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submission::Marks;

    const HEADER: &str = "User,Question,Marks,Submitted At,Time Taken,Code";

    fn alice() -> SubmissionRecord {
        SubmissionRecord {
            user_name: Some("Alice".into()),
            question_title: Some("Two Sum".into()),
            marks: Some(Marks::from(90)),
            submitted_at: Some("2024-01-01T10:05:00Z".into()),
            time_taken: Some(125_000),
            code: Some("print(\"hi\")".into()),
            ..SubmissionRecord::default()
        }
    }

    fn csv(records: &[SubmissionRecord], ctx: Option<&TestContext>) -> String {
        ReportService::build_csv(records, ctx, &ReportOptions::default())
    }

    #[test]
    fn empty_input_is_header_only() {
        assert_eq!(csv(&[], None), HEADER);
    }

    #[test]
    fn full_record_row() {
        let out = csv(&[alice()], None);
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            "\"Alice\",\"Two Sum\",\"90\",\"1/1/2024, 10:05:00 AM\",\"2m 5s\",\"print(\"\"hi\"\")\""
        );
    }

    #[test]
    fn time_taken_from_test_start() {
        let record = SubmissionRecord {
            user_id: Some("u-1".into()),
            submitted_at: Some("2024-01-01T10:03:30Z".into()),
            ..SubmissionRecord::default()
        };
        let ctx = TestContext::with_start("2024-01-01T10:00:00Z");
        let row = ReportRow::from_record(&record, Some(&ctx), &ReportOptions::default());
        assert_eq!(row.time_taken, "3m 30s");
        assert_eq!(row.user.as_deref(), Some("u-1"));
    }

    #[test]
    fn explicit_time_beats_test_start() {
        let ctx = TestContext::with_start("2024-01-01T09:00:00Z");
        let row = ReportRow::from_record(&alice(), Some(&ctx), &ReportOptions::default());
        assert_eq!(row.time_taken, "2m 5s");
    }

    #[test]
    fn no_duration_source_is_quoted_empty() {
        let record = SubmissionRecord {
            user_name: Some("Bob".into()),
            ..SubmissionRecord::default()
        };
        let out = csv(&[record], None);
        assert_eq!(out.lines().nth(1), Some("\"Bob\",,,,\"\","));
    }

    #[test]
    fn line_count_tracks_records_and_order_is_kept() {
        let mut second = alice();
        second.user_name = Some("Zed".into());
        let records = vec![second, alice(), alice()];
        let out = csv(&records, None);

        // Records here carry no embedded newlines.
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines.len(), records.len() + 1);
        assert!(lines[1].starts_with("\"Zed\""));
        assert!(lines[2].starts_with("\"Alice\""));
        assert!(!out.ends_with('\n'));
    }

    #[test]
    fn multiline_code_stays_in_one_quoted_field() {
        let mut record = alice();
        record.code = Some("a,b\nc".into());
        let out = csv(&[record], None);
        assert!(out.ends_with(",\"a,b\nc\""));
    }

    #[test]
    fn build_is_idempotent_and_does_not_touch_input() {
        let records = vec![alice()];
        let snapshot = format!("{:?}", records);
        let first = csv(&records, None);
        let second = csv(&records, None);
        assert_eq!(first, second);
        assert_eq!(format!("{:?}", records), snapshot);
    }

    #[test]
    fn offset_applies_to_submitted_at() {
        let out = ReportService::build_csv(&[alice()], None, &ReportOptions::with_offset_minutes(-300));
        assert!(out.contains("\"1/1/2024, 5:05:00 AM\""));
    }

    #[test]
    fn xlsx_export_produces_a_zip_container() {
        let bytes = ReportService::build_xlsx(&[alice()], None, &ReportOptions::default(), "t-1").unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn xlsx_export_handles_empty_input() {
        let bytes = ReportService::build_xlsx(&[], None, &ReportOptions::default(), "t-1").unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn oversized_code_is_cut_for_xlsx_only() {
        let mut record = alice();
        record.code = Some("x".repeat(40_000));

        let bytes = ReportService::build_xlsx(&[record.clone()], None, &ReportOptions::default(), "t-1").unwrap();
        assert!(bytes.starts_with(b"PK"));

        let out = csv(&[record], None);
        assert!(out.ends_with(&format!("\"{}\"", "x".repeat(40_000))));
    }

    #[test]
    fn cell_fitting_respects_the_limit() {
        let short = "print(1)";
        assert!(matches!(fit_xlsx_cell(short), Cow::Borrowed(_)));

        let fitted = fit_xlsx_cell(&"é".repeat(XLSX_CELL_LIMIT + 1)).into_owned();
        assert_eq!(fitted.chars().count(), XLSX_CELL_LIMIT);
        assert!(fitted.ends_with("[truncated]"));
    }

    #[test]
    fn record_with_bad_test_block_keeps_its_row() {
        let record = SubmissionRecord::from_json_lenient(serde_json::json!({
            "userName": "Alice",
            "marks": 90.0,
            "timeTaken": 125000,
            "code": "x",
            "test": { "startDateTime": 1704103200000u64 }
        }));
        let out = csv(&[record], None);
        assert_eq!(out.lines().nth(1), Some("\"Alice\",,\"90\",,\"2m 5s\",\"x\""));
    }

    #[test]
    fn naive_submission_time_is_shown_as_sent() {
        let mut record = alice();
        record.submitted_at = Some("2024-01-01T10:05:00".into());
        let out = ReportService::build_csv(&[record], None, &ReportOptions::with_offset_minutes(330));
        assert!(out.contains("\"1/1/2024, 10:05:00 AM\""));
    }
}
