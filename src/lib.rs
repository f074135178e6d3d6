//! 部品検査箇所表示・検査表PDF生成ツール
//!
//! 部品カタログ（JSON）の閲覧・登録・編集、部品表CSVの一括取り込み、
//! 6項目の検査表入力と自動判定、検査表PDF出力、Excelテンプレート生成。

pub mod catalog;
pub mod checklist;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod images;
pub mod importer;
pub mod inspection;
pub mod judge;

pub use catalog::{Catalog, Part, RequiredProduct};
pub use checklist::{default_checklist, load_template, ChecklistItem};
pub use error::{KensaError, Result};
pub use importer::{merge_import, parse_catalog_export, ImportReport};
pub use inspection::{InspectionRecord, ItemResult};
pub use judge::{judge, overall_judgment, Verdict};
