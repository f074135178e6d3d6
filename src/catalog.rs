//! 部品カタログの型定義と永続化
//!
//! カタログ全体を1つのJSONドキュメント（{"parts": [...]}）として
//! 読み書きする。保存は一時ファイル書き込み＋renameで行い、
//! 書きかけのファイルが残らないようにする（ロックは持たない・
//! 単一オペレータ前提）。

use crate::error::{KensaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 注意点が未入力のときに入れるプレースホルダ
pub const DEFAULT_CAUTION: &str = "特になし";
/// 画像説明が未入力のときに入れるプレースホルダ
pub const DEFAULT_IMAGE_DESCRIPTION: &str = "検査箇所";

/// この部品を使用する最終製品
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RequiredProduct {
    pub product_id: String,
    pub product_name: String,
    #[serde(default)]
    pub notes: String,
}

/// カタログの1エントリ
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Part {
    /// 部品ID（作成時に採番、以後不変）
    pub id: String,
    pub name: String,
    pub category: String,
    pub storage: String,
    pub inspection_items: Vec<String>,
    pub cautions: Vec<String>,
    pub image_description: String,
    #[serde(default)]
    pub image_file: Option<String>,
    #[serde(default)]
    pub item_type: String,
    #[serde(default)]
    pub required_products: Vec<RequiredProduct>,
}

impl Part {
    /// 必須デフォルトを適用して部品を作る
    ///
    /// 注意点・画像説明が空のときはプレースホルダを入れる
    /// （表示時に補うのではなく生成時に確定させる）。
    pub fn new(
        id: String,
        name: String,
        category: String,
        storage: String,
        inspection_items: Vec<String>,
        cautions: Vec<String>,
        image_description: String,
    ) -> Self {
        let cautions = if cautions.is_empty() {
            vec![DEFAULT_CAUTION.to_string()]
        } else {
            cautions
        };
        let image_description = if image_description.trim().is_empty() {
            DEFAULT_IMAGE_DESCRIPTION.to_string()
        } else {
            image_description
        };
        Self {
            id,
            name,
            category,
            storage,
            inspection_items,
            cautions,
            image_description,
            image_file: None,
            item_type: String::new(),
            required_products: Vec::new(),
        }
    }
}

/// JSONドキュメントのルート
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogFile {
    parts: Vec<Part>,
}

/// 部品カタログ
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    parts: Vec<Part>,
}

impl Catalog {
    /// JSONファイルから読み込み（ファイルがなければ空のカタログ）
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let file: CatalogFile = serde_json::from_str(&content)?;
        Ok(Self { parts: file.parts })
    }

    /// JSONファイルへ保存（一時ファイル＋rename）
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = CatalogFile {
            parts: self.parts.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp_path = std::path::PathBuf::from(tmp);
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Part> {
        self.parts.iter_mut().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// 新規追加（IDが重複していればエラー）
    pub fn add(&mut self, part: Part) -> Result<()> {
        if self.contains(&part.id) {
            return Err(KensaError::DuplicateId(part.id));
        }
        self.parts.push(part);
        Ok(())
    }

    /// IDをキーに置換、なければ末尾に追加
    pub fn upsert(&mut self, part: Part) {
        match self.find_mut(&part.id) {
            Some(existing) => *existing = part,
            None => self.parts.push(part),
        }
    }

    /// カテゴリ一覧（重複除去・ソート済み）
    pub fn categories(&self) -> Vec<String> {
        let mut cats: Vec<String> = self.parts.iter().map(|p| p.category.clone()).collect();
        cats.sort();
        cats.dedup();
        cats
    }

    /// 部品名・IDの部分一致検索とカテゴリ絞り込み
    pub fn filter(&self, query: Option<&str>, category: Option<&str>) -> Vec<&Part> {
        self.parts
            .iter()
            .filter(|p| match query {
                Some(q) => {
                    let q = q.to_lowercase();
                    p.name.to_lowercase().contains(&q) || p.id.to_lowercase().contains(&q)
                }
                None => true,
            })
            .filter(|p| match category {
                Some(c) => p.category == c,
                None => true,
            })
            .collect()
    }
}
