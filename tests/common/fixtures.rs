use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use kpdf::types::DocumentRequest;
use serde_json::json;
use std::io::Cursor;

/// The storefront scenario: bold "Acme" logo text and a navy title color
pub fn acme_request() -> DocumentRequest {
    serde_json::from_value(json!({
        "id_user": 1,
        "id_cart": 2,
        "id_publication": 3,
        "count": 5,
        "logo": {
            "logo_text": { "value": "Acme", "name_font": "Arial", "bold": true }
        },
        "executor_parameters": {
            "first": { "show_logo": true, "show_name": "full", "show_contacts": "phone" }
        },
        "presentation_parameters": { "list": true, "price": true },
        "style_template": { "id_template": "classic", "color": "#112233" }
    }))
    .expect("fixture request is valid")
}

/// The same storefront scenario for a Russian shop: Cyrillic logo text and template id
#[allow(dead_code)]
pub fn cyrillic_request() -> DocumentRequest {
    serde_json::from_value(json!({
        "id_user": 7,
        "id_cart": 8,
        "id_publication": 9,
        "count": 1,
        "logo": {
            "logo_text": { "value": "ООО Ромашка", "name_font": "Arial", "bold": true }
        },
        "executor_parameters": {
            "first": { "show_logo": true, "show_name": "полное", "show_contacts": "телефон" }
        },
        "style_template": { "id_template": "классический", "color": "#112233" }
    }))
    .expect("fixture request is valid")
}

/// A solid-color PNG as a data URI
#[allow(dead_code)]
pub fn png_data_uri(width: u32, height: u32) -> String {
    let image = RgbaImage::from_pixel(width, height, Rgba([200, 30, 30, 128]));
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Png)
        .expect("encode png");
    format!("data:image/png;base64,{}", STANDARD.encode(bytes.into_inner()))
}

/// A solid-color JPEG as bare base64
#[allow(dead_code)]
pub fn jpeg_base64(width: u32, height: u32) -> String {
    let image = RgbImage::from_pixel(width, height, Rgb([20, 120, 220]));
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Jpeg)
        .expect("encode jpeg");
    STANDARD.encode(bytes.into_inner())
}
