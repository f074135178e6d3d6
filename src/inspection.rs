//! 検査セッション
//!
//! 6項目の検査表への入力と総合判定、PDF出力の可否判定。
//! 検査記録はPDF出力のためだけに組み立てる一時データで、
//! ファイルには保存しない。

use crate::catalog::Part;
use crate::checklist::ChecklistItem;
use crate::error::{KensaError, Result};
use crate::judge::{judge, overall_judgment, Verdict};
use dialoguer::Input;

/// 検査表の1行分の結果
#[derive(Debug, Clone)]
pub struct ItemResult {
    pub no: u32,
    pub item: String,
    pub criteria: String,
    pub result: String,
    pub judgment: Verdict,
    pub note: String,
}

/// 1回の検査の記録（PDF出力単位）
#[derive(Debug, Clone)]
pub struct InspectionRecord {
    pub date: String,
    pub inspector: String,
    pub items: Vec<ItemResult>,
    pub overall: Verdict,
}

impl InspectionRecord {
    pub fn new(date: String, inspector: String, items: Vec<ItemResult>) -> Self {
        let verdicts: Vec<Verdict> = items.iter().map(|i| i.judgment).collect();
        let overall = overall_judgment(&verdicts);
        Self {
            date,
            inspector,
            items,
            overall,
        }
    }

    /// PDF出力の可否判定
    ///
    /// 全項目判定済み・総合合格・検査者名あり・対象部品ありのとき
    /// のみ出力できる。不合格の検査表は出力しない。
    pub fn export_ready(&self, part: Option<&Part>) -> Result<()> {
        if self
            .items
            .iter()
            .any(|i| i.judgment == Verdict::Indeterminate)
        {
            return Err(KensaError::Validation(
                "未判定の検査項目があります。全ての項目を入力してください".into(),
            ));
        }
        if self.overall == Verdict::Fail {
            return Err(KensaError::Validation(
                "不合格項目があるためPDF出力できません。全ての項目を合格にしてください".into(),
            ));
        }
        if self.inspector.trim().is_empty() {
            return Err(KensaError::Validation("検査者名を入力してください".into()));
        }
        if part.is_none() {
            return Err(KensaError::Validation("対象部品を選択してください".into()));
        }
        if self.items.is_empty() {
            return Err(KensaError::Validation("検査項目がありません".into()));
        }
        Ok(())
    }
}

/// 対話式で検査表を入力して記録を組み立てる
pub fn run_interactive_inspection(
    checklist: &[ChecklistItem],
    date: String,
    inspector: String,
) -> Result<InspectionRecord> {
    println!("操作: 項目1,6は OK/NG、項目2-5は数値を入力すると自動判定されます\n");

    let mut items = Vec::new();

    for item in checklist {
        println!("{}. {}", item.no, item.item);
        println!("  判定基準: {}", item.criteria);

        let result: String = Input::new()
            .with_prompt("  測定値/結果")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| KensaError::CliExecution(e.to_string()))?;

        let mut judgment = judge(item.no, &result, &item.criteria);

        match judgment {
            Verdict::Indeterminate => {
                // 自動判定できないときだけ手動判定を受け付ける
                judgment = prompt_manual_judgment()?;
            }
            v => println!("  → 判定: {}", v.label()),
        }

        let note: String = Input::new()
            .with_prompt("  備考（任意）")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| KensaError::CliExecution(e.to_string()))?;

        items.push(ItemResult {
            no: item.no,
            item: item.item.clone(),
            criteria: item.criteria.clone(),
            result: result.trim().to_string(),
            judgment,
            note: note.trim().to_string(),
        });
        println!();
    }

    Ok(InspectionRecord::new(date, inspector, items))
}

/// 手動判定プロンプト
fn prompt_manual_judgment() -> Result<Verdict> {
    let input: String = Input::new()
        .with_prompt("  判定 (g:合格 n:不合格 Enter:未判定)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| KensaError::CliExecution(e.to_string()))?;

    Ok(match input.trim() {
        "g" | "G" | "合格" => Verdict::Pass,
        "n" | "N" | "不合格" => Verdict::Fail,
        _ => Verdict::Indeterminate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(no: u32, judgment: Verdict) -> ItemResult {
        ItemResult {
            no,
            item: format!("検査{}", no),
            criteria: String::new(),
            result: "OK".into(),
            judgment,
            note: String::new(),
        }
    }

    fn record_with(verdicts: [Verdict; 6]) -> InspectionRecord {
        let items = verdicts
            .iter()
            .enumerate()
            .map(|(i, v)| item(i as u32 + 1, *v))
            .collect();
        InspectionRecord::new("2026-08-29".into(), "山田太郎".into(), items)
    }

    fn sample_part() -> Part {
        Part::new(
            "BLT-001".into(),
            "六角ボルト".into(),
            "締結部品".into(),
            "A棟".into(),
            vec!["外観確認".into()],
            Vec::new(),
            String::new(),
        )
    }

    #[test]
    fn test_overall_computed_on_construction() {
        use Verdict::*;
        assert_eq!(record_with([Pass; 6]).overall, Pass);
        assert_eq!(
            record_with([Pass, Fail, Pass, Pass, Pass, Pass]).overall,
            Fail
        );
        assert_eq!(
            record_with([Pass, Indeterminate, Pass, Pass, Pass, Pass]).overall,
            Indeterminate
        );
    }

    #[test]
    fn test_export_ready_all_pass() {
        let record = record_with([Verdict::Pass; 6]);
        let part = sample_part();
        assert!(record.export_ready(Some(&part)).is_ok());
    }

    #[test]
    fn test_export_blocked_by_failure() {
        use Verdict::*;
        let record = record_with([Pass, Pass, Fail, Pass, Pass, Pass]);
        let part = sample_part();
        let err = record.export_ready(Some(&part)).unwrap_err();
        assert!(err.to_string().contains("不合格"));
    }

    #[test]
    fn test_export_blocked_by_indeterminate() {
        use Verdict::*;
        let record = record_with([Pass, Indeterminate, Pass, Pass, Pass, Pass]);
        let part = sample_part();
        let err = record.export_ready(Some(&part)).unwrap_err();
        assert!(err.to_string().contains("未判定"));
    }

    #[test]
    fn test_export_blocked_without_inspector() {
        let mut record = record_with([Verdict::Pass; 6]);
        record.inspector = "  ".into();
        let part = sample_part();
        let err = record.export_ready(Some(&part)).unwrap_err();
        assert!(err.to_string().contains("検査者"));
    }

    #[test]
    fn test_export_blocked_without_part() {
        let record = record_with([Verdict::Pass; 6]);
        let err = record.export_ready(None).unwrap_err();
        assert!(err.to_string().contains("対象部品"));
    }

    #[test]
    fn test_export_blocked_with_empty_checklist() {
        let record = InspectionRecord::new("2026-08-29".into(), "山田太郎".into(), vec![]);
        let part = sample_part();
        // 項目が空のときは総合判定が未確定なので未判定エラーになる
        assert!(record.export_ready(Some(&part)).is_err());
    }
}
