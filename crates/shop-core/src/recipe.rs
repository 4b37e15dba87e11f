//! 配方（物料清單）模型
//!
//! 配方項目可用兩種方式指向原料：
//! - 舊式文字 `"名稱片段: 用量"`，在消耗時以名稱片段模糊比對
//! - 綁定式 `{ materialId, quantityPerUnit }`，在編寫配方時即解析為原料ID
//!
//! 匯入時兩種格式都接受；匯出時各自保持原格式。

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Result, ShopError};

/// 原料參照
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MaterialRef {
    /// 精確的原料ID
    Id(String),
    /// 名稱片段（不分大小寫的子字串比對，取第一個符合者）
    Fragment(String),
}

impl fmt::Display for MaterialRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialRef::Id(id) => write!(f, "#{}", id),
            MaterialRef::Fragment(fragment) => write!(f, "\"{}\"", fragment),
        }
    }
}

/// 配方項目：每生產一單位產品所需的原料用量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecipeLineRepr", into = "RecipeLineRepr")]
pub struct RecipeLine {
    /// 原料參照
    pub material: MaterialRef,

    /// 單位用量
    pub quantity_per_unit: Decimal,
}

impl RecipeLine {
    /// 創建以名稱片段參照的配方項目
    pub fn fragment(fragment: impl Into<String>, quantity_per_unit: Decimal) -> Self {
        Self {
            material: MaterialRef::Fragment(fragment.into().trim().to_string()),
            quantity_per_unit,
        }
    }

    /// 創建已綁定原料ID的配方項目
    pub fn bound(material_id: impl Into<String>, quantity_per_unit: Decimal) -> Self {
        Self {
            material: MaterialRef::Id(material_id.into()),
            quantity_per_unit,
        }
    }

    /// 嚴格解析 `"名稱片段: 用量"`
    pub fn parse(text: &str) -> Result<Self> {
        let (name, qty) = text
            .split_once(':')
            .ok_or_else(|| ShopError::InvalidRecipeLine(format!("缺少冒號: {}", text)))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(ShopError::InvalidRecipeLine(format!("缺少原料名稱: {}", text)));
        }

        let quantity = Decimal::from_str(qty.trim())
            .map_err(|_| ShopError::InvalidRecipeLine(format!("用量不是數字: {}", text)))?;

        Ok(Self::fragment(name, quantity))
    }

    /// 寬鬆解析舊式文字
    ///
    /// 只取第一與第二個冒號之間的內容作為用量，並讀取其開頭的數字部分；
    /// 無法解析時用量為 0。
    pub fn parse_lenient(text: &str) -> Self {
        let mut parts = text.split(':');
        let name = parts.next().unwrap_or_default();
        let quantity = parts
            .next()
            .and_then(leading_number)
            .unwrap_or(Decimal::ZERO);

        if quantity.is_zero() {
            tracing::debug!("配方項目用量無法解析或為零: {:?}", text);
        }

        Self::fragment(name, quantity)
    }

    /// 計算生產指定數量產品所需的原料量
    pub fn required_for(&self, product_quantity: Decimal) -> Result<Decimal> {
        self.quantity_per_unit
            .checked_mul(product_quantity)
            .ok_or_else(|| {
                ShopError::Overflow(format!(
                    "配方項目 {} 用量 {} × 數量 {}",
                    self.material, self.quantity_per_unit, product_quantity
                ))
            })
    }

    /// 是否已綁定原料ID
    pub fn is_bound(&self) -> bool {
        matches!(self.material, MaterialRef::Id(_))
    }
}

impl fmt::Display for RecipeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.material {
            MaterialRef::Fragment(fragment) => {
                write!(f, "{}: {}", fragment, self.quantity_per_unit.normalize())
            }
            MaterialRef::Id(id) => write!(f, "#{}: {}", id, self.quantity_per_unit.normalize()),
        }
    }
}

impl FromStr for RecipeLine {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// 讀取字串開頭的十進位數字（忽略前導空白與其後的文字）
fn leading_number(text: &str) -> Option<Decimal> {
    let trimmed = text.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (idx, ch) in trimmed.char_indices() {
        match ch {
            '+' | '-' if idx == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = idx + ch.len_utf8();
    }

    if !seen_digit {
        return None;
    }

    Decimal::from_str(trimmed[..end].trim_end_matches('.')).ok()
}

/// 配方項目的 JSON 表示
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RecipeLineRepr {
    Legacy(String),
    Bound {
        #[serde(rename = "materialId")]
        material_id: String,
        #[serde(rename = "quantityPerUnit")]
        quantity_per_unit: Decimal,
    },
}

impl From<RecipeLineRepr> for RecipeLine {
    fn from(repr: RecipeLineRepr) -> Self {
        match repr {
            RecipeLineRepr::Legacy(text) => RecipeLine::parse_lenient(&text),
            RecipeLineRepr::Bound {
                material_id,
                quantity_per_unit,
            } => RecipeLine::bound(material_id, quantity_per_unit),
        }
    }
}

impl From<RecipeLine> for RecipeLineRepr {
    fn from(line: RecipeLine) -> Self {
        match line.material {
            MaterialRef::Fragment(_) => RecipeLineRepr::Legacy(line.to_string()),
            MaterialRef::Id(material_id) => RecipeLineRepr::Bound {
                material_id,
                quantity_per_unit: line.quantity_per_unit,
            },
        }
    }
}
