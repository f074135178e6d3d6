use thiserror::Error;

#[derive(Error, Debug)]
pub enum KensaError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("部品が見つかりません: {0}")]
    PartNotFound(String),

    #[error("部品ID '{0}' は既に存在します")]
    DuplicateId(String),

    #[error("入力エラー: {0}")]
    Validation(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("CSV読み込みエラー: {0}")]
    CsvRead(String),

    #[error("テンプレート読み込みエラー: {0}")]
    TemplateRead(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF生成エラー: {0}")]
    PdfGeneration(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),
}

pub type Result<T> = std::result::Result<T, KensaError>;
