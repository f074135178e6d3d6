//! 部品表CSVの取り込み
//!
//! 部品表（BOMエクスポート）の半構造化CSVから部品レコードを
//! 復元し、既存カタログへマージする。行は上から順に処理し、
//! 「現在の製品カテゴリ」を1つだけ状態として持ち回る。
//! 形の合わない行は黙ってスキップする（エラーにしない）。

use crate::catalog::{Catalog, Part, RequiredProduct};
use crate::error::{KensaError, Result};
use std::path::Path;

/// 図番先頭の改訂マーカー
const REVISION_MARKER: &str = "【R】";
/// 取り込んだ部品のカテゴリプレースホルダ
pub const IMPORT_CATEGORY_PLACEHOLDER: &str = "未設定";

/// マージ結果レポート
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// 取り込んだ件数
    pub success: usize,
    /// 重複でスキップした件数
    pub skipped: usize,
    /// エラー件数（現状の設計では常に0）
    pub errors: usize,
    /// 重複していた部品ID
    pub duplicates: Vec<String>,
}

/// CSVファイルを読み込んで行列に展開する
///
/// UTF-8 BOM付きを許容。読めないファイルはその操作全体の
/// エラーとして返す（部分的な取り込みはしない）。
pub fn read_csv(path: &Path) -> Result<Vec<Vec<String>>> {
    let bytes = std::fs::read(path)
        .map_err(|e| KensaError::CsvRead(format!("{}: {}", path.display(), e)))?;
    let content = String::from_utf8(bytes)
        .map_err(|e| KensaError::CsvRead(format!("{}: {}", path.display(), e)))?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    Ok(content
        .lines()
        .map(|line| parse_csv_line(line.trim_end_matches('\r')))
        .collect())
}

/// CSV行をパース（ダブルクォート対応）
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);

    fields.into_iter().map(|f| f.trim().to_string()).collect()
}

fn field(row: &[String], index: usize) -> &str {
    row.get(index).map(|s| s.as_str()).unwrap_or("")
}

/// 図番から改訂マーカーと前後の空白を除去して部品IDにする
fn clean_drawing_number(drawing_number: &str) -> String {
    drawing_number
        .trim()
        .trim_start_matches(REVISION_MARKER)
        .trim()
        .to_string()
}

/// 図番の最初のハイフンより前を製品IDとして取り出す
fn product_id_of(drawing_number: &str) -> &str {
    drawing_number
        .split_once('-')
        .map(|(head, _)| head)
        .unwrap_or(drawing_number)
}

/// 部品表の行列から部品ドラフトを組み立てる
///
/// 先頭行はヘッダーとして読み飛ばす。論理フィールドは固定列
/// （品目区分=2列目、図番=3列目、品名=4列目）で読む。
/// 品目区分だけが入った行はカテゴリマーカー、3つとも入った行が
/// 部品行。それ以外の形の行は黙ってスキップ。
pub fn parse_catalog_export(rows: &[Vec<String>]) -> Vec<Part> {
    let mut drafts = Vec::new();
    let mut current_category: Option<String> = None;

    for row in rows.iter().skip(1) {
        let item_type = field(row, 1);
        let drawing_number = field(row, 2);
        let part_name = field(row, 3);

        // カテゴリマーカー行: 品目区分のみ
        if !item_type.is_empty() && drawing_number.is_empty() && part_name.is_empty() {
            current_category = Some(item_type.to_string());
            continue;
        }

        // 部品行: 3フィールドすべて非空
        if item_type.is_empty() || drawing_number.is_empty() || part_name.is_empty() {
            continue;
        }

        let id = clean_drawing_number(drawing_number);
        let product_id = product_id_of(&id).to_string();

        let required_products = match (&current_category, product_id.is_empty()) {
            (Some(category), false) => vec![RequiredProduct {
                product_id,
                product_name: category.clone(),
                notes: String::new(),
            }],
            _ => Vec::new(),
        };

        let mut part = Part::new(
            id,
            part_name.to_string(),
            IMPORT_CATEGORY_PLACEHOLDER.to_string(),
            "未設定".to_string(),
            vec!["外観確認".to_string()],
            Vec::new(),
            String::new(),
        );
        part.item_type = item_type.to_string();
        part.required_products = required_products;
        drafts.push(part);
    }

    drafts
}

/// ドラフトを既存カタログへマージする
///
/// `overwrite` が偽のとき重複IDのドラフトは破棄する。真のとき
/// 重複は既存レコードをIDキーで丸ごと置換してから新規分を追加する。
/// 取り込み対象外の既存レコードは常に残る。
pub fn merge_import(drafts: Vec<Part>, catalog: &mut Catalog, overwrite: bool) -> ImportReport {
    let (duplicates, unique): (Vec<Part>, Vec<Part>) = drafts
        .into_iter()
        .partition(|draft| catalog.contains(&draft.id));

    let duplicate_ids: Vec<String> = duplicates.iter().map(|d| d.id.clone()).collect();

    let report = if overwrite {
        ImportReport {
            success: duplicates.len() + unique.len(),
            skipped: 0,
            errors: 0,
            duplicates: duplicate_ids,
        }
    } else {
        ImportReport {
            success: unique.len(),
            skipped: duplicates.len(),
            errors: 0,
            duplicates: duplicate_ids,
        }
    };

    if overwrite {
        for draft in duplicates {
            catalog.upsert(draft);
        }
    }
    for draft in unique {
        catalog.upsert(draft);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    /// ヘッダー + カテゴリマーカー/部品行のサンプル
    fn sample_rows() -> Vec<Vec<String>> {
        vec![
            row(&["No", "品目区分", "図番", "品名", "備考"]),
            row(&["", "製品A", "", "", ""]),
            row(&["1", "2", "D1-01", "部品A", ""]),
            row(&["2", "2", "【R】 D2-02", "部品B", ""]),
            row(&["", "製品B", "", "", ""]),
            row(&["3", "2", "D3-03", "部品C", ""]),
        ]
    }

    #[test]
    fn test_parse_catalog_export_basic() {
        let drafts = parse_catalog_export(&sample_rows());
        assert_eq!(drafts.len(), 3);

        assert_eq!(drafts[0].id, "D1-01");
        assert_eq!(drafts[0].name, "部品A");
        assert_eq!(drafts[0].category, IMPORT_CATEGORY_PLACEHOLDER);
        assert_eq!(drafts[0].item_type, "2");
        assert_eq!(drafts[0].required_products.len(), 1);
        assert_eq!(drafts[0].required_products[0].product_id, "D1");
        assert_eq!(drafts[0].required_products[0].product_name, "製品A");

        // 改訂マーカーは除去される
        assert_eq!(drafts[1].id, "D2-02");
        assert_eq!(drafts[1].required_products[0].product_id, "D2");
        assert_eq!(drafts[1].required_products[0].product_name, "製品A");

        // カテゴリマーカーを跨ぐと製品が切り替わる
        assert_eq!(drafts[2].id, "D3-03");
        assert_eq!(drafts[2].required_products[0].product_id, "D3");
        assert_eq!(drafts[2].required_products[0].product_name, "製品B");
    }

    #[test]
    fn test_parse_without_category_marker() {
        // カテゴリマーカーより前の部品行はrequired_productsが空
        let rows = vec![
            row(&["No", "品目区分", "図番", "品名"]),
            row(&["1", "2", "D9-01", "部品X"]),
        ];
        let drafts = parse_catalog_export(&rows);
        assert_eq!(drafts.len(), 1);
        assert!(drafts[0].required_products.is_empty());
    }

    #[test]
    fn test_product_id_without_hyphen() {
        let rows = vec![
            row(&["No", "品目区分", "図番", "品名"]),
            row(&["", "製品A", "", ""]),
            row(&["1", "2", "D900", "部品X"]),
        ];
        let drafts = parse_catalog_export(&rows);
        assert_eq!(drafts[0].id, "D900");
        // ハイフンがなければ図番全体が製品ID
        assert_eq!(drafts[0].required_products[0].product_id, "D900");
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let rows = vec![
            row(&["No", "品目区分", "図番", "品名"]),
            row(&["1", "", "D1-01", "部品A"]),  // 品目区分なし
            row(&["2", "2", "", "部品B"]),      // 図番なし
            row(&["3", "2", "D3-03", ""]),      // 品名なし
            row(&[]),                            // 空行
            row(&["4", "2", "D4-04", "部品D"]),
        ];
        let drafts = parse_catalog_export(&rows);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].id, "D4-04");
    }

    #[test]
    fn test_parse_csv_line_quotes() {
        assert_eq!(
            parse_csv_line(r#""a,b",c, d "#),
            vec!["a,b".to_string(), "c".to_string(), "d".to_string()]
        );
        assert_eq!(parse_csv_line(""), vec!["".to_string()]);
    }

    #[test]
    fn test_read_csv_with_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.csv");
        std::fs::write(&path, "\u{feff}No,品目区分,図番,品名\r\n1,2,D1-01,部品A\r\n").unwrap();

        let rows = read_csv(&path).unwrap();
        assert_eq!(rows[0][0], "No");
        assert_eq!(rows[1], vec!["1", "2", "D1-01", "部品A"]);
    }

    #[test]
    fn test_read_csv_missing_file() {
        let err = read_csv(Path::new("no/such/file.csv")).unwrap_err();
        assert!(matches!(err, crate::error::KensaError::CsvRead(_)));
    }

    #[test]
    fn test_merge_without_overwrite_skips_duplicates() {
        let mut catalog = Catalog::default();
        let drafts = parse_catalog_export(&sample_rows());
        let report = merge_import(drafts.clone(), &mut catalog, false);
        assert_eq!(report.success, 3);
        assert_eq!(report.skipped, 0);
        assert_eq!(catalog.len(), 3);

        // 同じドラフトをもう一度: 全件スキップ、内容は不変
        let before = catalog.find("D1-01").cloned().unwrap();
        let report = merge_import(drafts, &mut catalog, false);
        assert_eq!(report.success, 0);
        assert_eq!(report.skipped, 3);
        assert_eq!(report.errors, 0);
        assert_eq!(report.duplicates, vec!["D1-01", "D2-02", "D3-03"]);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.find("D1-01").unwrap(), &before);
    }

    #[test]
    fn test_merge_with_overwrite_replaces() {
        let mut catalog = Catalog::default();
        let mut existing = Part::new(
            "D1-01".into(),
            "旧名称".into(),
            "旧カテゴリ".into(),
            "旧保管場所".into(),
            vec!["旧検査項目".into()],
            Vec::new(),
            String::new(),
        );
        existing.image_file = Some("D1-01.png".into());
        catalog.upsert(existing);
        catalog.upsert(Part::new(
            "KEEP-01".into(),
            "取り込み対象外".into(),
            "その他".into(),
            "B棟".into(),
            vec!["外観確認".into()],
            Vec::new(),
            String::new(),
        ));

        let drafts = parse_catalog_export(&sample_rows());
        let report = merge_import(drafts, &mut catalog, true);

        assert_eq!(report.success, 3);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.duplicates, vec!["D1-01"]);

        // 重複はフィールドごと置換される
        let replaced = catalog.find("D1-01").unwrap();
        assert_eq!(replaced.name, "部品A");
        assert_eq!(replaced.category, IMPORT_CATEGORY_PLACEHOLDER);
        assert!(replaced.image_file.is_none());

        // 取り込みに含まれない既存レコードは消えない
        assert!(catalog.contains("KEEP-01"));
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_error_count_stays_zero_even_with_skipped_rows() {
        // 不正行はドラフトにならないだけで、エラー件数には数えない
        // （元システムの報告仕様をそのまま維持している）
        let rows = vec![
            row(&["No", "品目区分", "図番", "品名"]),
            row(&["1", "", "D1-01", "部品A"]),
        ];
        let drafts = parse_catalog_export(&rows);
        assert!(drafts.is_empty());

        let mut catalog = Catalog::default();
        let report = merge_import(drafts, &mut catalog, false);
        assert_eq!(report.errors, 0);
    }
}
