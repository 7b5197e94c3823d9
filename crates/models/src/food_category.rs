use std::{fmt, str::FromStr};

use sea_orm::entity::prelude::*;
use sea_orm::Iterable;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Kind of food a store sells or a menu item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FoodCategory {
    #[sea_orm(string_value = "KOREAN")]
    Korean,
    #[sea_orm(string_value = "CHINESE")]
    Chinese,
    #[sea_orm(string_value = "JAPANESE")]
    Japanese,
    #[sea_orm(string_value = "WESTERN")]
    Western,
    #[sea_orm(string_value = "SNACK")]
    Snack,
    #[sea_orm(string_value = "CHICKEN")]
    Chicken,
    #[sea_orm(string_value = "PIZZA")]
    Pizza,
    #[sea_orm(string_value = "FAST_FOOD")]
    FastFood,
    #[sea_orm(string_value = "CAFE")]
    Cafe,
    #[sea_orm(string_value = "DESSERT")]
    Dessert,
    #[sea_orm(string_value = "ETC")]
    Etc,
}

/// Category as shown in store/menu forms.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryOption {
    pub code: FoodCategory,
    pub label: &'static str,
}

impl FoodCategory {
    pub fn code(self) -> &'static str {
        match self {
            FoodCategory::Korean => "KOREAN",
            FoodCategory::Chinese => "CHINESE",
            FoodCategory::Japanese => "JAPANESE",
            FoodCategory::Western => "WESTERN",
            FoodCategory::Snack => "SNACK",
            FoodCategory::Chicken => "CHICKEN",
            FoodCategory::Pizza => "PIZZA",
            FoodCategory::FastFood => "FAST_FOOD",
            FoodCategory::Cafe => "CAFE",
            FoodCategory::Dessert => "DESSERT",
            FoodCategory::Etc => "ETC",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FoodCategory::Korean => "한식",
            FoodCategory::Chinese => "중식",
            FoodCategory::Japanese => "일식",
            FoodCategory::Western => "양식",
            FoodCategory::Snack => "분식",
            FoodCategory::Chicken => "치킨",
            FoodCategory::Pizza => "피자",
            FoodCategory::FastFood => "패스트푸드",
            FoodCategory::Cafe => "카페",
            FoodCategory::Dessert => "디저트",
            FoodCategory::Etc => "기타",
        }
    }

    /// Every category in declaration order.
    pub fn options() -> Vec<CategoryOption> {
        Self::iter().map(|c| CategoryOption { code: c, label: c.label() }).collect()
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for FoodCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::iter()
            .find(|c| c.code() == wanted)
            .ok_or_else(|| ModelError::Validation(format!("unknown food category: {s}")))
    }
}
