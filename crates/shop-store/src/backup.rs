//! 備份匯入/匯出
//!
//! 格式：`{ orders, products, materials, settings }`，四個鍵缺一不可。

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shop_core::{
    AppSettings, MaterialLedger, OrderLedger, ProductCatalog, ShopError, ShopSnapshot,
};

/// 備份必須包含的頂層鍵
pub const REQUIRED_KEYS: [&str; 4] = ["orders", "products", "materials", "settings"];

/// 完整備份內容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    pub orders: OrderLedger,
    pub products: ProductCatalog,
    pub materials: MaterialLedger,
    pub settings: AppSettings,
}

impl Backup {
    /// 從目前狀態建立備份
    pub fn from_state(snapshot: &ShopSnapshot, settings: &AppSettings) -> Self {
        Self {
            orders: snapshot.orders.clone(),
            products: snapshot.products.clone(),
            materials: snapshot.materials.clone(),
            settings: settings.clone(),
        }
    }

    /// 解析並驗證備份 JSON
    ///
    /// 無法解析、不是物件、缺少任何必要鍵（或其值為 null）時失敗。
    pub fn parse(json: &str) -> shop_core::Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ShopError::MalformedImport(e.to_string()))?;

        let object = value
            .as_object()
            .ok_or_else(|| ShopError::MalformedImport("頂層必須是物件".to_string()))?;

        let missing: Vec<&str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| object.get(*key).map_or(true, |v| v.is_null()))
            .collect();
        if !missing.is_empty() {
            return Err(ShopError::MalformedImport(format!("缺少必要鍵: {}", missing.join(", "))));
        }

        serde_json::from_value(value).map_err(|e| ShopError::MalformedImport(e.to_string()))
    }

    /// 輸出為縮排的 JSON
    pub fn to_pretty_json(&self) -> shop_core::Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ShopError::Export(e.to_string()))
    }

    /// 拆成快照與設定
    pub fn into_parts(self) -> (ShopSnapshot, AppSettings) {
        (
            ShopSnapshot::new(self.orders, self.products, self.materials),
            self.settings,
        )
    }
}

/// 匯出的備份檔
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFile {
    pub file_name: String,
    pub contents: String,
}

impl BackupFile {
    /// 依日期產生檔名 `backup-YYYY-MM-DD.json`
    pub fn file_name_for(date: NaiveDate) -> String {
        format!("backup-{}.json", date.format("%Y-%m-%d"))
    }

    /// 建立備份檔
    pub fn new(backup: &Backup, date: NaiveDate) -> shop_core::Result<Self> {
        Ok(Self {
            file_name: Self::file_name_for(date),
            contents: backup.to_pretty_json()?,
        })
    }

    /// 寫入指定目錄；回傳完整路徑
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> shop_core::Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.contents)?;
        tracing::info!("備份已寫入 {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const MINIMAL: &str = r#"{"orders": [], "products": [], "materials": [], "settings": {}}"#;

    #[test]
    fn test_parse_minimal_backup() {
        let backup = Backup::parse(MINIMAL).unwrap();

        assert!(backup.orders.is_empty());
        assert_eq!(backup.settings, AppSettings::default());
    }

    #[rstest]
    #[case(r#"{"orders": [], "products": [], "settings": {}}"#)]
    #[case(r#"{"orders": [], "products": [], "materials": null, "settings": {}}"#)]
    #[case(r#"[1, 2, 3]"#)]
    #[case(r#"{"orders": "#)]
    #[case(r#"{"orders": [{"id": 1}], "products": [], "materials": [], "settings": {}}"#)]
    fn test_parse_rejects_malformed(#[case] json: &str) {
        assert!(matches!(Backup::parse(json), Err(ShopError::MalformedImport(_))));
    }

    #[test]
    fn test_missing_key_is_reported() {
        let err = Backup::parse(r#"{"orders": [], "products": []}"#).unwrap_err();
        assert!(err.to_string().contains("materials, settings"));
    }

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(BackupFile::file_name_for(date), "backup-2025-03-07.json");
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let backup = Backup::parse(MINIMAL).unwrap();
        let file = BackupFile::new(&backup, NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()).unwrap();

        let path = file.write_to_dir(dir.path()).unwrap();

        assert_eq!(path, dir.path().join("backup-2025-03-07.json"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(Backup::parse(&written).unwrap(), backup);
    }

    #[test]
    fn test_write_to_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let backup = Backup::parse(MINIMAL).unwrap();
        let file = BackupFile::new(&backup, NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()).unwrap();

        let result = file.write_to_dir(dir.path().join("missing"));

        assert!(matches!(result, Err(ShopError::Io(_))));
    }

    #[test]
    fn test_export_is_pretty_and_complete() {
        let backup = Backup::parse(MINIMAL).unwrap();
        let file = BackupFile::new(&backup, NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()).unwrap();

        assert!(file.contents.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&file.contents).unwrap();
        for key in REQUIRED_KEYS {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
    }
}
