pub mod pdf;
pub mod template;

/// 検査表PDFのデフォルトファイル名（inspection_<部品ID>_<YYYYMMDD>.pdf）
pub fn default_report_filename(part_id: &str, date: &str) -> String {
    let compact: String = date.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("inspection_{}_{}.pdf", part_id, compact)
}
