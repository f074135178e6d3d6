use clap::Parser;
use parts_kensa_rust::{catalog, checklist, cli, config, error, export, images, importer, inspection};

use catalog::{Catalog, Part};
use cli::{Cli, Commands};
use config::Config;
use error::{KensaError, Result};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::List { search, category } => {
            let catalog = Catalog::load(&config.data_file)?;
            let parts = catalog.filter(search.as_deref(), category.as_deref());

            if parts.is_empty() {
                println!("該当する部品が見つかりません。検索条件を変更してください。");
            } else {
                for part in &parts {
                    println!("{}  {}  [{}]", part.id, part.name, part.category);
                }
            }
            println!("\n該当部品: {} 件", parts.len());

            if cli.verbose {
                let categories = catalog.categories();
                println!("カテゴリ: {}", categories.join(", "));
            }
        }

        Commands::Show { id } => {
            let catalog = Catalog::load(&config.data_file)?;
            let part = catalog
                .find(&id)
                .ok_or_else(|| KensaError::PartNotFound(id.clone()))?;

            println!("{}", part.name);
            println!("部品番号: {}", part.id);
            println!("カテゴリ: {}", part.category);
            println!("保管場所: {}", part.storage);

            println!("\n検査項目:");
            for item in &part.inspection_items {
                println!("  - {}", item);
            }

            println!("\n注意点:");
            for caution in &part.cautions {
                println!("  ! {}", caution);
            }

            match images::image_path(&config.images_dir, part) {
                Some(path) => println!("\n検査箇所イメージ: {}", path.display()),
                None => println!("\n検査箇所イメージ: {}（画像未登録）", part.image_description),
            }

            if !part.required_products.is_empty() {
                println!("\n使用製品:");
                for rp in &part.required_products {
                    println!("  {} {}", rp.product_id, rp.product_name);
                }
            }
        }

        Commands::Add {
            id,
            name,
            category,
            storage,
            inspection_items,
            cautions,
            image_description,
            image,
        } => {
            // バリデーション: 必須項目・検査項目1つ以上
            for (value, label) in [
                (&id, "部品ID"),
                (&name, "部品名"),
                (&category, "カテゴリ"),
                (&storage, "保管場所"),
            ] {
                if value.trim().is_empty() {
                    return Err(KensaError::Validation(format!(
                        "{}を入力してください",
                        label
                    )));
                }
            }
            if inspection_items.iter().all(|i| i.trim().is_empty()) {
                return Err(KensaError::Validation(
                    "検査項目を1つ以上入力してください".into(),
                ));
            }

            let mut catalog = Catalog::load(&config.data_file)?;
            let mut part = Part::new(
                id.clone(),
                name.clone(),
                category,
                storage,
                inspection_items
                    .iter()
                    .map(|i| i.trim().to_string())
                    .filter(|i| !i.is_empty())
                    .collect(),
                cautions
                    .iter()
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect(),
                image_description,
            );

            if let Some(image_source) = image {
                config.ensure_images_dir()?;
                let file_name = images::store_image(&config.images_dir, &id, &image_source)?;
                part.image_file = Some(file_name);
            }

            catalog.add(part)?;
            catalog.save(&config.data_file)?;
            println!("✔ 部品 '{}' を登録しました", name);
        }

        Commands::Edit {
            id,
            name,
            category,
            storage,
            inspection_items,
            cautions,
            image_description,
            image,
        } => {
            let mut catalog = Catalog::load(&config.data_file)?;

            // 画像は新しいファイルが指定されたときだけ差し替える
            let new_image_file = match image {
                Some(image_source) => {
                    if !catalog.contains(&id) {
                        return Err(KensaError::PartNotFound(id));
                    }
                    config.ensure_images_dir()?;
                    Some(images::store_image(&config.images_dir, &id, &image_source)?)
                }
                None => None,
            };

            let part = catalog
                .find_mut(&id)
                .ok_or_else(|| KensaError::PartNotFound(id.clone()))?;

            if let Some(name) = name {
                part.name = name;
            }
            if let Some(category) = category {
                part.category = category;
            }
            if let Some(storage) = storage {
                part.storage = storage;
            }
            if !inspection_items.is_empty() {
                part.inspection_items = inspection_items;
            }
            if !cautions.is_empty() {
                part.cautions = cautions;
            }
            if let Some(desc) = image_description {
                part.image_description = desc;
            }
            if let Some(file_name) = new_image_file {
                part.image_file = Some(file_name);
            }

            catalog.save(&config.data_file)?;
            println!("✔ 部品 '{}' を更新しました", id);
        }

        Commands::Import { file, overwrite } => {
            println!("📦 部品表を取り込み中: {}\n", file.display());

            let rows = importer::read_csv(&file)?;
            let drafts = importer::parse_catalog_export(&rows);
            println!("✔ {}件の部品行を検出", drafts.len());

            let mut catalog = Catalog::load(&config.data_file)?;
            let report = importer::merge_import(drafts, &mut catalog, overwrite);
            catalog.save(&config.data_file)?;

            println!("\n取り込み結果:");
            println!("  成功: {} 件", report.success);
            println!("  スキップ: {} 件", report.skipped);
            println!("  エラー: {} 件", report.errors);
            if !report.duplicates.is_empty() {
                let action = if overwrite { "上書き" } else { "スキップ" };
                println!("  重複ID（{}）: {}", action, report.duplicates.join(", "));
            }

            println!("\n✅ 取り込み完了");
        }

        Commands::Inspect {
            part,
            inspector,
            date,
            output,
            template,
        } => {
            println!("📋 検査表入力\n");

            let catalog = Catalog::load(&config.data_file)?;
            let target = catalog
                .find(&part)
                .ok_or_else(|| KensaError::PartNotFound(part.clone()))?;

            // 部品情報を表示してから入力に入る
            println!("対象部品: {} - {}", target.id, target.name);
            println!("保管場所: {}", target.storage);
            println!("検査項目:");
            for item in &target.inspection_items {
                println!("  - {}", item);
            }
            println!("注意点:");
            for caution in &target.cautions {
                println!("  ! {}", caution);
            }
            println!();

            let template_path = template.unwrap_or_else(|| config.template_file.clone());
            let items = checklist::load_template(&template_path)?;
            if items.is_empty() {
                return Err(KensaError::Validation(
                    "検査項目が空です。テンプレートを確認してください".into(),
                ));
            }

            let date = date.unwrap_or_else(|| {
                chrono::Local::now().format("%Y-%m-%d").to_string()
            });

            let record =
                inspection::run_interactive_inspection(&items, date, inspector)?;

            println!("総合判定: {}", match record.overall {
                parts_kensa_rust::Verdict::Pass => "合格（全項目合格）",
                parts_kensa_rust::Verdict::Fail => "不合格（不合格項目があります）",
                parts_kensa_rust::Verdict::Indeterminate => "未確定（未入力の項目があります）",
            });

            // 出力ゲート: 全項目判定済み・全合格のときだけPDFを出す
            record.export_ready(Some(target))?;

            let output_path = output.unwrap_or_else(|| {
                std::path::PathBuf::from(export::default_report_filename(
                    &target.id,
                    &record.date,
                ))
            });

            println!("\n- PDFを生成中...");
            export::pdf::generate_report(&record, target, &config.font_file, &output_path)?;
            println!("✔ PDF出力: {}", output_path.display());
        }

        Commands::Template { output } => {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            export::template::generate_template(&output)?;
            println!("✔ テンプレートを作成しました: {}", output.display());
        }
    }

    Ok(())
}
