//! 應用設定模型

use serde::{Deserialize, Serialize};

/// 應用設定
///
/// 所有欄位都有預設值，舊版儲存的設定缺少的群組或欄位在載入時自動補上。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    pub company: CompanyInfo,
    pub notifications: NotificationSettings,
    pub appearance: AppearanceSettings,
}

/// 公司資料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyInfo {
    pub name: String,
    pub slogan: String,
    /// 統一編號（CNPJ）
    pub cnpj: String,
    pub contact: String,
    pub logo: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        Self {
            name: "MARCENARIA BRUTAL".to_string(),
            slogan: "Painel de Controle".to_string(),
            cnpj: String::new(),
            contact: String::new(),
            logo: String::new(),
        }
    }
}

/// 通知開關
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationSettings {
    pub low_stock: bool,
    pub deadlines: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            low_stock: true,
            deadlines: true,
        }
    }
}

/// 外觀設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppearanceSettings {
    pub theme: String,
    pub density: String,
    pub layout_mode: String,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            theme: "Escuro".to_string(),
            density: "COMPACTO".to_string(),
            layout_mode: "FLUIDO".to_string(),
        }
    }
}

/// 部分更新：只有提供的欄位會覆寫
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsPatch {
    pub company: Option<CompanyPatch>,
    pub notifications: Option<NotificationPatch>,
    pub appearance: Option<AppearancePatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub slogan: Option<String>,
    pub cnpj: Option<String>,
    pub contact: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationPatch {
    pub low_stock: Option<bool>,
    pub deadlines: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppearancePatch {
    pub theme: Option<String>,
    pub density: Option<String>,
    pub layout_mode: Option<String>,
}

fn merge<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

impl AppSettings {
    /// 從儲存的 JSON 載入，缺漏欄位以預設值補齊
    pub fn from_saved_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| crate::ShopError::MalformedImport(e.to_string()))
    }

    /// 套用部分更新（逐群組、逐欄位合併）
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(company) = patch.company {
            merge(&mut self.company.name, company.name);
            merge(&mut self.company.slogan, company.slogan);
            merge(&mut self.company.cnpj, company.cnpj);
            merge(&mut self.company.contact, company.contact);
            merge(&mut self.company.logo, company.logo);
        }

        if let Some(notifications) = patch.notifications {
            merge(&mut self.notifications.low_stock, notifications.low_stock);
            merge(&mut self.notifications.deadlines, notifications.deadlines);
        }

        if let Some(appearance) = patch.appearance {
            merge(&mut self.appearance.theme, appearance.theme);
            merge(&mut self.appearance.density, appearance.density);
            merge(&mut self.appearance.layout_mode, appearance.layout_mode);
        }
    }
}
