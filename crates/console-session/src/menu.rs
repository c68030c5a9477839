//! Menu descriptors delivered by the backend after login.

use serde::{Deserialize, Serialize};

/// One entry of the navigation menu tree.
///
/// Mirrors the backend's menu rows; `children` is filled in by the backend
/// when it returns the tree for the current role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    #[serde(default)]
    pub parent_id: Option<i64>,
    pub menu_name: String,
    pub path: String,
    #[serde(default)]
    pub component: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub order_num: Option<i32>,
    #[serde(default)]
    pub children: Vec<MenuItem>,
}
