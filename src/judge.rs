//! 測定値の自動判定
//!
//! 判定基準文字列（"100±0.5mm", "HRC 58-62" など）と入力された
//! 測定値/結果から合格・不合格を判定する。
//! パース失敗は常に「判定不能」扱いで、エラーにはしない。

use lazy_static::lazy_static;
use regex::Regex;

/// 判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// 合格
    Pass,
    /// 不合格
    Fail,
    /// 判定不能（未入力・パース不能・基準なし）
    Indeterminate,
}

impl Verdict {
    /// 帳票に出力するラベル（判定不能は空欄）
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Pass => "合格",
            Verdict::Fail => "不合格",
            Verdict::Indeterminate => "",
        }
    }

    /// 日本語フォントが使えない環境向けのラベル
    pub fn label_latin(&self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
            Verdict::Indeterminate => "",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

lazy_static! {
    // 公差パターン（例: "100±0.5mm"）
    static ref TOLERANCE_RE: Regex = Regex::new(r"([\d.]+)±([\d.]+)").unwrap();
    // 範囲パターン（例: "HRC 58-62"）
    static ref RANGE_RE: Regex = Regex::new(r"([\d.]+)-([\d.]+)").unwrap();
}

/// 公差基準をパース（base, tolerance）
pub fn parse_tolerance(criteria: &str) -> Option<(f64, f64)> {
    let cap = TOLERANCE_RE.captures(criteria)?;
    let base: f64 = cap[1].parse().ok()?;
    let tolerance: f64 = cap[2].parse().ok()?;
    Some((base, tolerance))
}

/// 範囲基準をパース（min, max）
pub fn parse_range(criteria: &str) -> Option<(f64, f64)> {
    let cap = RANGE_RE.captures(criteria)?;
    let min: f64 = cap[1].parse().ok()?;
    let max: f64 = cap[2].parse().ok()?;
    Some((min, max))
}

/// 測定値をパース（小数点のカンマ入力を許容）
pub fn parse_measured(result: &str) -> Option<f64> {
    result.trim().replace(',', ".").parse().ok()
}

/// 測定値から自動判定を行う
///
/// 項目1, 6は OK/NG の定性チェック、項目2-5は数値判定。
pub fn judge(no: u32, result: &str, criteria: &str) -> Verdict {
    let result = result.trim();
    if result.is_empty() {
        return Verdict::Indeterminate;
    }

    // 項目1, 6は「OK」で合格、「NG」で不合格
    if no == 1 || no == 6 {
        return match result.to_uppercase().as_str() {
            "OK" => Verdict::Pass,
            "NG" => Verdict::Fail,
            _ => Verdict::Indeterminate,
        };
    }

    // 項目2-5は数値判定（範囲チェック）
    let value = match parse_measured(result) {
        Some(v) => v,
        None => return Verdict::Indeterminate,
    };

    // ±形式を範囲形式より先に試す
    if criteria.contains('±') {
        if let Some((base, tolerance)) = parse_tolerance(criteria) {
            return if base - tolerance <= value && value <= base + tolerance {
                Verdict::Pass
            } else {
                Verdict::Fail
            };
        }
    }

    if criteria.contains('-') {
        if let Some((min, max)) = parse_range(criteria) {
            return if min <= value && value <= max {
                Verdict::Pass
            } else {
                Verdict::Fail
            };
        }
    }

    Verdict::Indeterminate
}

/// 総合判定
///
/// 全項目が判定済みのとき、1件でも不合格なら不合格、全合格なら合格。
/// 未判定が残っている間（または項目が空のとき）は判定不能。
pub fn overall_judgment(verdicts: &[Verdict]) -> Verdict {
    if verdicts.is_empty() || verdicts.iter().any(|v| *v == Verdict::Indeterminate) {
        return Verdict::Indeterminate;
    }
    if verdicts.iter().any(|v| *v == Verdict::Fail) {
        Verdict::Fail
    } else {
        Verdict::Pass
    }
}
