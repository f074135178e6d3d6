use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "parts-kensa")]
#[command(about = "部品検査箇所表示・検査表PDF生成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 部品一覧を表示（検索・カテゴリ絞り込み）
    List {
        /// 部品名・IDで検索
        #[arg(short, long)]
        search: Option<String>,

        /// カテゴリで絞り込み
        #[arg(short, long)]
        category: Option<String>,
    },

    /// 部品の詳細（検査項目・注意点・保管場所）を表示
    Show {
        /// 部品ID
        #[arg(required = true)]
        id: String,
    },

    /// 新規部品を登録
    Add {
        /// 部品ID（例: BLT-002）
        #[arg(long)]
        id: String,

        /// 部品名（例: 六角ボルト M12）
        #[arg(long)]
        name: String,

        /// カテゴリ（例: 締結部品）
        #[arg(long)]
        category: String,

        /// 保管場所（例: A棟-1F-棚番号A-15）
        #[arg(long)]
        storage: String,

        /// 検査項目（繰り返し指定、1つ以上必須）
        #[arg(long = "inspection")]
        inspection_items: Vec<String>,

        /// 注意点（繰り返し指定、省略時は「特になし」）
        #[arg(long = "caution")]
        cautions: Vec<String>,

        /// 検査箇所イメージの説明
        #[arg(long, default_value = "")]
        image_description: String,

        /// 検査箇所の画像ファイル（png/jpg/jpeg）
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// 既存部品を編集（IDは変更不可）
    Edit {
        /// 部品ID
        #[arg(required = true)]
        id: String,

        /// 部品名
        #[arg(long)]
        name: Option<String>,

        /// カテゴリ
        #[arg(long)]
        category: Option<String>,

        /// 保管場所
        #[arg(long)]
        storage: Option<String>,

        /// 検査項目（指定すると全置換）
        #[arg(long = "inspection")]
        inspection_items: Vec<String>,

        /// 注意点（指定すると全置換）
        #[arg(long = "caution")]
        cautions: Vec<String>,

        /// 検査箇所イメージの説明
        #[arg(long)]
        image_description: Option<String>,

        /// 新しい画像ファイル（指定時のみ差し替え）
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// 部品表CSVからカタログへ一括取り込み
    Import {
        /// 部品表CSVファイル
        #[arg(required = true)]
        file: PathBuf,

        /// 重複IDを上書きする（省略時はスキップ）
        #[arg(long)]
        overwrite: bool,
    },

    /// 検査表を入力してPDFを出力
    Inspect {
        /// 対象部品のID
        #[arg(short, long)]
        part: String,

        /// 検査者名
        #[arg(short, long)]
        inspector: String,

        /// 検査日（YYYY-MM-DD、省略時は本日）
        #[arg(short, long)]
        date: Option<String>,

        /// 出力PDFパス（省略時: inspection_<部品ID>_<日付>.pdf）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 検査表テンプレート（省略時は設定のパス）
        #[arg(short, long)]
        template: Option<PathBuf>,
    },

    /// 検査表テンプレートExcelを生成
    Template {
        /// 出力先（例: templates/inspection_template.xlsx）
        #[arg(required = true)]
        output: PathBuf,
    },
}
