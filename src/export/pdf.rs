//! 検査表PDFの生成
//!
//! A4縦に基本情報ブロック・検査項目テーブル・総合判定セルを
//! 罫線セルで並べる。日本語フォント（TTF）があれば埋め込み、
//! なければHelvetica＋英語ラベルにフォールバックする。

use crate::catalog::Part;
use crate::error::{KensaError, Result};
use crate::inspection::InspectionRecord;
use crate::judge::Verdict;
use printpdf::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const A4_WIDTH_MM: f64 = 210.0;
const A4_HEIGHT_MM: f64 = 297.0;
const MARGIN_MM: f64 = 10.0;

const ROW_HEIGHT_MM: f64 = 8.0;
const OVERALL_ROW_HEIGHT_MM: f64 = 10.0;

/// 検査項目テーブルの列幅（No./項目/基準/測定値/判定/備考）
const TABLE_WIDTHS_MM: [f64; 6] = [10.0, 40.0, 45.0, 35.0, 20.0, 40.0];

/// セル内テキストの文字数上限（レイアウト崩れ防止）
const ITEM_CHAR_BUDGET: usize = 15;
const CRITERIA_CHAR_BUDGET: usize = 18;
const NOTE_CHAR_BUDGET: usize = 15;

/// フォントに応じたラベルセット
struct Labels {
    title: &'static str,
    date: &'static str,
    inspector: &'static str,
    part_id: &'static str,
    part_name: &'static str,
    headers: [&'static str; 6],
    overall: &'static str,
    japanese: bool,
}

impl Labels {
    fn japanese() -> Self {
        Self {
            title: "部品検査表",
            date: "検査日:",
            inspector: "検査者:",
            part_id: "部品ID:",
            part_name: "部品名:",
            headers: ["No.", "検査項目", "判定基準", "測定値/結果", "判定", "備考"],
            overall: "総合判定:",
            japanese: true,
        }
    }

    fn latin() -> Self {
        Self {
            title: "Inspection Report",
            date: "Date:",
            inspector: "Inspector:",
            part_id: "Part ID:",
            part_name: "Part Name:",
            headers: ["No.", "Item", "Criteria", "Result", "Judge", "Note"],
            overall: "Overall:",
            japanese: false,
        }
    }

    fn verdict(&self, verdict: Verdict) -> &'static str {
        if self.japanese {
            verdict.label()
        } else {
            verdict.label_latin()
        }
    }
}

fn truncate_chars(text: &str, budget: usize) -> String {
    text.chars().take(budget).collect()
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(
        r as f64 / 255.0,
        g as f64 / 255.0,
        b as f64 / 255.0,
        None,
    ))
}

/// 1ページ分の描画カーソル
struct Page<'a> {
    layer: &'a PdfLayerReference,
    font: &'a IndirectFontRef,
    /// 上端からの現在位置（mm）
    y: f64,
    /// 現在行の左端からの位置（mm）
    x: f64,
    row_height: f64,
}

impl<'a> Page<'a> {
    fn new(layer: &'a PdfLayerReference, font: &'a IndirectFontRef) -> Self {
        Self {
            layer,
            font,
            y: MARGIN_MM,
            x: MARGIN_MM,
            row_height: ROW_HEIGHT_MM,
        }
    }

    /// 上端基準のy座標をPDF座標（下端基準）に変換
    fn to_pdf_y(&self, y_from_top: f64) -> f64 {
        A4_HEIGHT_MM - y_from_top
    }

    fn line_break(&mut self) {
        self.x = MARGIN_MM;
        self.y += self.row_height;
    }

    fn space(&mut self, mm: f64) {
        self.y += mm;
    }

    /// 罫線セルを1つ描画してカーソルを右へ進める
    fn cell(&mut self, width: f64, text: &str, font_size: f64, fill: Option<Color>, text_color: Color) {
        let top = self.to_pdf_y(self.y);
        let bottom = self.to_pdf_y(self.y + self.row_height);
        let left = self.x;
        let right = self.x + width;

        let rect = Line {
            points: vec![
                (Point::new(Mm(left), Mm(bottom)), false),
                (Point::new(Mm(right), Mm(bottom)), false),
                (Point::new(Mm(right), Mm(top)), false),
                (Point::new(Mm(left), Mm(top)), false),
            ],
            is_closed: true,
            has_fill: fill.is_some(),
            has_stroke: true,
            is_clipping_path: false,
        };

        if let Some(fill_color) = fill {
            self.layer.set_fill_color(fill_color);
        }
        self.layer.set_outline_color(rgb(0, 0, 0));
        self.layer.set_outline_thickness(0.5);
        self.layer.add_shape(rect);

        if !text.is_empty() {
            // テキストの塗り色はfill colorを使う
            self.layer.set_fill_color(text_color);
            self.layer.use_text(
                text,
                font_size,
                Mm(left + 2.0),
                Mm(bottom + self.row_height * 0.3),
                self.font,
            );
        }

        self.x = right;
    }
}

/// 検査記録と部品情報から検査表PDFを出力する
pub fn generate_report(
    record: &InspectionRecord,
    part: &Part,
    font_file: &Path,
    output_path: &Path,
) -> Result<()> {
    let (doc, page1, layer1) = PdfDocument::new(
        "部品検査表",
        Mm(A4_WIDTH_MM),
        Mm(A4_HEIGHT_MM),
        "Layer 1",
    );
    let layer = doc.get_page(page1).get_layer(layer1);

    // 日本語フォントがあれば埋め込み、なければHelvetica＋英語ラベル
    let (font, labels) = if font_file.exists() {
        let reader = File::open(font_file)?;
        let font = doc
            .add_external_font(reader)
            .map_err(|e| KensaError::PdfGeneration(format!("フォント読み込みエラー: {:?}", e)))?;
        (font, Labels::japanese())
    } else {
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| KensaError::PdfGeneration(format!("フォント追加エラー: {:?}", e)))?;
        (font, Labels::latin())
    };

    let mut page = Page::new(&layer, &font);
    let black = rgb(0, 0, 0);
    let white = rgb(255, 255, 255);

    // タイトル
    page.space(5.0);
    layer.set_fill_color(black.clone());
    layer.use_text(
        labels.title,
        16.0,
        Mm(A4_WIDTH_MM / 2.0 - 20.0),
        Mm(page.to_pdf_y(page.y + 6.0)),
        &font,
    );
    page.space(16.0);

    // 基本情報ブロック
    page.cell(30.0, labels.date, 10.0, None, black.clone());
    page.cell(50.0, &record.date, 10.0, None, black.clone());
    page.cell(30.0, labels.inspector, 10.0, None, black.clone());
    page.cell(50.0, &record.inspector, 10.0, None, black.clone());
    page.line_break();

    page.cell(30.0, labels.part_id, 10.0, None, black.clone());
    page.cell(50.0, &part.id, 10.0, None, black.clone());
    page.cell(30.0, labels.part_name, 10.0, None, black.clone());
    page.cell(50.0, &part.name, 10.0, None, black.clone());
    page.line_break();
    page.space(5.0);

    // 検査項目テーブルヘッダー
    let header_fill = rgb(68, 114, 196);
    for (label, width) in labels.headers.iter().zip(TABLE_WIDTHS_MM) {
        page.cell(width, label, 10.0, Some(header_fill.clone()), white.clone());
    }
    page.line_break();

    // 検査項目データ
    for item in &record.items {
        page.cell(TABLE_WIDTHS_MM[0], &item.no.to_string(), 10.0, None, black.clone());
        page.cell(
            TABLE_WIDTHS_MM[1],
            &truncate_chars(&item.item, ITEM_CHAR_BUDGET),
            10.0,
            None,
            black.clone(),
        );
        page.cell(
            TABLE_WIDTHS_MM[2],
            &truncate_chars(&item.criteria, CRITERIA_CHAR_BUDGET),
            10.0,
            None,
            black.clone(),
        );
        page.cell(TABLE_WIDTHS_MM[3], &item.result, 10.0, None, black.clone());
        page.cell(
            TABLE_WIDTHS_MM[4],
            labels.verdict(item.judgment),
            10.0,
            None,
            black.clone(),
        );
        page.cell(
            TABLE_WIDTHS_MM[5],
            &truncate_chars(&item.note, NOTE_CHAR_BUDGET),
            10.0,
            None,
            black.clone(),
        );
        page.line_break();
    }

    // 総合判定（合格は緑、不合格は赤）
    page.space(5.0);
    page.row_height = OVERALL_ROW_HEIGHT_MM;
    let overall_fill = rgb(217, 226, 243);
    let overall_color = match record.overall {
        Verdict::Pass => rgb(0, 128, 0),
        Verdict::Fail => rgb(255, 0, 0),
        Verdict::Indeterminate => black.clone(),
    };
    page.cell(40.0, labels.overall, 10.0, Some(overall_fill), black.clone());
    page.cell(
        60.0,
        labels.verdict(record.overall),
        10.0,
        None,
        overall_color,
    );

    // 保存
    let file = File::create(output_path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| KensaError::PdfGeneration(format!("PDF保存エラー: {:?}", e)))?;

    Ok(())
}
