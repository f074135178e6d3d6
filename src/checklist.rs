//! 検査表テンプレートの読み込み
//!
//! Excelテンプレートの固定レイアウト（6行目〜11行目、A〜C列）から
//! 6項目の検査項目を読み込む。ファイルがなければ組み込みの
//! デフォルト6項目にフォールバックする。

use crate::error::{KensaError, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;

/// テンプレート上の検査項目データ行（0始まり、6〜11行目）
const ITEM_ROW_RANGE: std::ops::RangeInclusive<u32> = 5..=10;

/// 検査項目（テンプレート定義、1セッションあたり固定6項目）
#[derive(Debug, Clone, PartialEq)]
pub struct ChecklistItem {
    /// 1始まりの項目番号（判定ルールを決める）
    pub no: u32,
    /// 検査項目名
    pub item: String,
    /// 判定基準（空・OK/NGチェック・±公差・数値範囲のいずれか）
    pub criteria: String,
}

/// 組み込みのデフォルト検査項目
pub fn default_checklist() -> Vec<ChecklistItem> {
    let items = [
        (1, "外観検査", "傷・変形・錆なきこと"),
        (2, "寸法検査（長さ）", "100±0.5mm"),
        (3, "寸法検査（幅）", "50±0.3mm"),
        (4, "寸法検査（厚さ）", "10±0.1mm"),
        (5, "硬度検査", "HRC 58-62"),
        (6, "動作確認", "スムーズに動作すること"),
    ];
    items
        .iter()
        .map(|(no, item, criteria)| ChecklistItem {
            no: *no,
            item: item.to_string(),
            criteria: criteria.to_string(),
        })
        .collect()
}

/// Excelテンプレートから検査項目を読み込む
///
/// ファイルがなければデフォルト項目を返す。No.または項目名が
/// 空の行はスキップする（判定基準は空でもよい）。
pub fn load_template(path: &Path) -> Result<Vec<ChecklistItem>> {
    if !path.exists() {
        return Ok(default_checklist());
    }

    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| KensaError::TemplateRead(format!("{}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| KensaError::TemplateRead("シートがありません".into()))?
        .map_err(|e| KensaError::TemplateRead(format!("{}: {}", path.display(), e)))?;

    let mut items = Vec::new();
    for row in ITEM_ROW_RANGE {
        let no = cell_as_u32(range.get_value((row, 0)));
        let item = cell_as_string(range.get_value((row, 1)));
        let criteria = cell_as_string(range.get_value((row, 2)));

        if let Some(no) = no {
            if !item.is_empty() {
                items.push(ChecklistItem { no, item, criteria });
            }
        }
    }

    Ok(items)
}

fn cell_as_string(cell: Option<&Data>) -> String {
    match cell {
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Float(f)) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Some(Data::Int(i)) => i.to_string(),
        _ => String::new(),
    }
}

fn cell_as_u32(cell: Option<&Data>) -> Option<u32> {
    match cell {
        Some(Data::Float(f)) if *f >= 0.0 => Some(*f as u32),
        Some(Data::Int(i)) if *i >= 0 => Some(*i as u32),
        Some(Data::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}
