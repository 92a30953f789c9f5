//! The inbound description of one requested document.
//!
//! Field names on the wire follow the JSON contract of the storefront client
//! (`id_user`, `logo_square`, `kursive`, ...). Every member is optional on input and
//! falls back to its empty value, so a request is always structurally complete.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentRequest {
    #[serde(rename = "id_user")]
    pub user_id: i64,
    #[serde(rename = "id_cart")]
    pub cart_id: i64,
    #[serde(rename = "id_publication")]
    pub publication_id: i64,
    pub logo: Logo,
    pub executor_parameters: ExecutorParameters,
    pub presentation_parameters: PresentationParameters,
    pub style_template: StyleTemplate,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Logo {
    /// Base64 (optionally data-URI) raster for square placements. Empty when absent.
    #[serde(rename = "logo_square")]
    pub square: String,
    #[serde(rename = "logo_rectangle")]
    pub rectangle: String,
    #[serde(rename = "logo_text")]
    pub text: LogoText,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoText {
    pub value: String,
    #[serde(rename = "name_font")]
    pub font: String,
    pub bold: bool,
    #[serde(rename = "kursive")]
    pub italic: bool,
    #[serde(rename = "under")]
    pub underline: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorParam {
    pub show_logo: bool,
    pub show_name: String,
    pub show_contacts: String,
}

/// Executor display settings for the first, the intermediate and the last page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorParameters {
    pub first: ExecutorParam,
    pub all: ExecutorParam,
    pub last: ExecutorParam,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationParameters {
    pub list: bool,
    pub one_by_one: bool,
    pub sum: bool,
    pub price: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleTemplate {
    #[serde(rename = "id_template")]
    pub template_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub color: String,
}
