//! 検査表テンプレートExcelの生成
//!
//! checklist::load_template が読む固定レイアウト
//! （タイトル・基本情報・ヘッダー行5、項目行6〜11、総合判定行13）
//! でテンプレートを書き出す。

use crate::checklist::{default_checklist, ChecklistItem};
use crate::error::{KensaError, Result};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};
use std::path::Path;

const HEADER_BLUE: u32 = 0x4472C4;
const INFO_BLUE: u32 = 0xD9E2F3;

/// デフォルト6項目入りのテンプレートを生成する
pub fn generate_template(output_path: &Path) -> Result<()> {
    generate_template_with_items(output_path, &default_checklist())
}

/// 指定した検査項目でテンプレートを生成する
pub fn generate_template_with_items(output_path: &Path, items: &[ChecklistItem]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("検査表テンプレート")
        .map_err(|e| KensaError::ExcelGeneration(format!("シート名設定エラー: {}", e)))?;

    let title_format = Format::new()
        .set_bold()
        .set_font_size(16.0)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    let info_label_format = Format::new()
        .set_bold()
        .set_font_size(12.0)
        .set_background_color(Color::RGB(INFO_BLUE));

    let header_format = Format::new()
        .set_bold()
        .set_font_size(12.0)
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_BLUE))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);

    let cell_format = Format::new().set_border(FormatBorder::Thin);

    let centered_cell_format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);

    let overall_label_format = Format::new()
        .set_bold()
        .set_font_size(12.0)
        .set_background_color(Color::RGB(INFO_BLUE))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);

    let excel = |e: rust_xlsxwriter::XlsxError| KensaError::ExcelGeneration(e.to_string());

    // タイトル行（A1:F1）
    worksheet
        .merge_range(0, 0, 0, 5, "部品検査表", &title_format)
        .map_err(excel)?;

    // 基本情報ヘッダー（3行目）
    for (col, label) in [(0, "検査日"), (2, "検査者"), (4, "部品ID")] {
        worksheet
            .write_string_with_format(2, col, label, &info_label_format)
            .map_err(excel)?;
        worksheet.write_string(2, col + 1, "").map_err(excel)?;
    }

    // 検査項目テーブルヘッダー（5行目）
    let headers = ["No.", "検査項目", "判定基準", "測定値/結果", "判定", "備考"];
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(4, col as u16, *header, &header_format)
            .map_err(excel)?;
    }

    // 検査項目（6行目から）
    for (offset, item) in items.iter().enumerate() {
        let row = 5 + offset as u32;
        worksheet
            .write_number_with_format(row, 0, item.no as f64, &centered_cell_format)
            .map_err(excel)?;
        worksheet
            .write_string_with_format(row, 1, &item.item, &cell_format)
            .map_err(excel)?;
        worksheet
            .write_string_with_format(row, 2, &item.criteria, &cell_format)
            .map_err(excel)?;
        worksheet
            .write_string_with_format(row, 3, "", &cell_format)
            .map_err(excel)?;
        worksheet
            .write_string_with_format(row, 4, "", &centered_cell_format)
            .map_err(excel)?;
        worksheet
            .write_string_with_format(row, 5, "", &cell_format)
            .map_err(excel)?;
    }

    // 総合判定（13行目、A:Bマージ + C:Fマージ）
    worksheet
        .merge_range(12, 0, 12, 1, "総合判定", &overall_label_format)
        .map_err(excel)?;
    worksheet
        .merge_range(12, 2, 12, 5, "", &cell_format)
        .map_err(excel)?;

    // 列幅調整
    for (col, width) in [(0, 8.0), (1, 20.0), (2, 25.0), (3, 15.0), (4, 10.0), (5, 20.0)] {
        worksheet.set_column_width(col, width).map_err(excel)?;
    }

    workbook
        .save(output_path)
        .map_err(|e| KensaError::ExcelGeneration(format!("Excel保存エラー: {}", e)))?;

    Ok(())
}
