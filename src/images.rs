//! 部品画像の保存と参照
//!
//! 画像は `<images_dir>/<部品ID><元の拡張子>` で保存し、
//! 部品レコードからはファイル名のみで参照する。

use crate::catalog::Part;
use crate::error::{KensaError, Result};
use std::path::{Path, PathBuf};

const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// 画像を画像ディレクトリへコピーし、保存したファイル名を返す
///
/// 拡張子チェックに加えてデコードできることを確認してから保存する。
pub fn store_image(images_dir: &Path, part_id: &str, source: &Path) -> Result<String> {
    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| {
            KensaError::ImageLoad(format!("拡張子が不明です: {}", source.display()))
        })?;

    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(KensaError::ImageLoad(format!(
            "対応していない画像形式です（png/jpg/jpegのみ）: {}",
            source.display()
        )));
    }

    image::open(source)
        .map_err(|e| KensaError::ImageLoad(format!("{}: {}", source.display(), e)))?;

    std::fs::create_dir_all(images_dir)?;
    let file_name = format!("{}.{}", part_id, ext);
    std::fs::copy(source, images_dir.join(&file_name))?;
    Ok(file_name)
}

/// 部品の画像パスを取得（登録済みかつ実在する場合のみ）
pub fn image_path(images_dir: &Path, part: &Part) -> Option<PathBuf> {
    let file_name = part.image_file.as_deref()?;
    let path = images_dir.join(file_name);
    if path.exists() {
        Some(path)
    } else {
        None
    }
}
