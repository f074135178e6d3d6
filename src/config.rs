use crate::error::{KensaError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// カタログJSONファイル
    pub data_file: PathBuf,
    /// 部品画像の保存先ディレクトリ
    pub images_dir: PathBuf,
    /// 検査表テンプレート（Excel）
    pub template_file: PathBuf,
    /// PDF用日本語フォント（なければHelveticaで英語ラベル出力）
    pub font_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data.json"),
            images_dir: PathBuf::from("images"),
            template_file: PathBuf::from("templates/inspection_template.xlsx"),
            font_file: PathBuf::from("fonts/NotoSansJP-Regular.ttf"),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| KensaError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("parts-kensa").join("config.json"))
    }

    /// 画像ディレクトリを作成（なければ）
    pub fn ensure_images_dir(&self) -> Result<()> {
        if !self.images_dir.exists() {
            std::fs::create_dir_all(&self.images_dir)?;
        }
        Ok(())
    }
}
