//! PDF/Excelテンプレート出力の統合テスト

use parts_kensa_rust::checklist;
use parts_kensa_rust::export::{pdf, template};
use parts_kensa_rust::inspection::{InspectionRecord, ItemResult};
use parts_kensa_rust::{Part, Verdict};
use std::path::Path;
use tempfile::tempdir;

fn sample_part() -> Part {
    Part::new(
        "BLT-001".to_string(),
        "六角ボルト M12".to_string(),
        "締結部品".to_string(),
        "A棟-1F-棚番号A-15".to_string(),
        vec!["ねじ山の損傷確認".to_string(), "頭部の変形確認".to_string()],
        vec!["トルク管理が重要".to_string()],
        "ボルト頭部・ねじ山部の検査ポイント".to_string(),
    )
}

fn passing_record() -> InspectionRecord {
    let items = checklist::default_checklist()
        .into_iter()
        .map(|item| {
            let result = match item.no {
                1 | 6 => "OK".to_string(),
                2 => "100.1".to_string(),
                3 => "50.0".to_string(),
                4 => "10.05".to_string(),
                _ => "60".to_string(),
            };
            let judgment = parts_kensa_rust::judge(item.no, &result, &item.criteria);
            ItemResult {
                no: item.no,
                item: item.item,
                criteria: item.criteria,
                result,
                judgment,
                note: String::new(),
            }
        })
        .collect();
    InspectionRecord::new("2026-08-29".to_string(), "山田太郎".to_string(), items)
}

#[test]
fn test_pdf_generation_with_fallback_font() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("inspection.pdf");

    let record = passing_record();
    assert_eq!(record.overall, Verdict::Pass);

    // 存在しないフォントパス → Helvetica + 英語ラベルで出力される
    let result = pdf::generate_report(
        &record,
        &sample_part(),
        Path::new("no/such/font.ttf"),
        &output_path,
    );

    assert!(result.is_ok(), "PDF生成に失敗: {:?}", result.err());
    assert!(output_path.exists(), "PDFファイルが作成されていない");

    let metadata = std::fs::metadata(&output_path).expect("ファイルメタデータ取得失敗");
    assert!(metadata.len() > 0, "PDFファイルが空");
}

#[test]
fn test_pdf_generation_with_long_texts_truncated() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("long.pdf");

    let mut record = passing_record();
    for item in &mut record.items {
        item.item = "とても長い検査項目名がレイアウトを壊さないこと".repeat(3);
        item.note = "x".repeat(200);
    }

    let result = pdf::generate_report(
        &record,
        &sample_part(),
        Path::new("no/such/font.ttf"),
        &output_path,
    );

    assert!(result.is_ok(), "PDF生成に失敗: {:?}", result.err());
}

#[test]
fn test_export_gate_blocks_failed_record() {
    let mut record = passing_record();
    record.items[2].judgment = Verdict::Fail;
    let record = InspectionRecord::new(record.date, record.inspector, record.items);

    let part = sample_part();
    let err = record.export_ready(Some(&part)).unwrap_err();
    assert!(err.to_string().contains("不合格"));
}

#[test]
fn test_template_generation() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("inspection_template.xlsx");

    let result = template::generate_template(&output_path);

    assert!(result.is_ok(), "テンプレート生成に失敗: {:?}", result.err());
    assert!(output_path.exists(), "Excelファイルが作成されていない");

    let metadata = std::fs::metadata(&output_path).expect("ファイルメタデータ取得失敗");
    assert!(metadata.len() > 0, "Excelファイルが空");
}

#[test]
fn test_template_roundtrip() {
    // 生成したテンプレートを読み戻すとデフォルト6項目と一致する
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("inspection_template.xlsx");

    template::generate_template(&output_path).expect("テンプレート生成失敗");
    let items = checklist::load_template(&output_path).expect("テンプレート読み込み失敗");

    assert_eq!(items, checklist::default_checklist());
}
