//! WASM bindings for text-component.
//!
//! This module provides JavaScript-friendly APIs for use in the browser.
//! Dialects are selected by Minecraft version strings such as `"1.21.5"`.

use crate::{BitmapFontMetrics, Dialect, LayoutConfig, TextLayouter};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();
}

fn dialect(version: &str) -> Result<Dialect, JsError> {
    Dialect::from_version(version).map_err(|e| JsError::new(&e.to_string()))
}

/// Load a resource pack from bytes and return a handle.
#[wasm_bindgen]
pub struct ResourcePackHandle {
    inner: crate::ResourcePack,
}

#[wasm_bindgen]
impl ResourcePackHandle {
    /// Load a resource pack from a ZIP file's bytes.
    #[wasm_bindgen(constructor)]
    pub fn new(data: &[u8]) -> Result<ResourcePackHandle, JsError> {
        let pack = crate::load_resource_pack_from_bytes(data)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(ResourcePackHandle { inner: pack })
    }

    /// Get the number of font definitions in the pack.
    #[wasm_bindgen(getter)]
    pub fn font_count(&self) -> usize {
        self.inner.font_count()
    }

    /// Get the number of decoded font textures in the pack.
    #[wasm_bindgen(getter)]
    pub fn texture_count(&self) -> usize {
        self.inner.texture_count()
    }

    /// Font ids as `namespace:path` strings.
    pub fn font_ids(&self) -> js_sys::Array {
        self.inner
            .font_ids()
            .into_iter()
            .map(JsValue::from)
            .collect()
    }
}

/// Outcome of [`validate`].
#[wasm_bindgen]
pub struct ValidationResult {
    valid: bool,
    kind: Option<String>,
    message: Option<String>,
    line: usize,
    column: usize,
    pointer: Option<String>,
}

#[wasm_bindgen]
impl ValidationResult {
    #[wasm_bindgen(getter)]
    pub fn valid(&self) -> bool {
        self.valid
    }

    /// `"syntax"`, `"semantic"` or `"version"` for invalid input.
    #[wasm_bindgen(getter)]
    pub fn kind(&self) -> Option<String> {
        self.kind.clone()
    }

    /// Full error text including the context chain and caret line.
    #[wasm_bindgen(getter)]
    pub fn message(&self) -> Option<String> {
        self.message.clone()
    }

    /// 1-based line of the error, 0 when valid.
    #[wasm_bindgen(getter)]
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the error, 0 when valid.
    #[wasm_bindgen(getter)]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Source line followed by a caret under the error column.
    #[wasm_bindgen(getter)]
    pub fn pointer(&self) -> Option<String> {
        self.pointer.clone()
    }
}

/// Check a component without producing output.
#[wasm_bindgen]
pub fn validate(source: &str, version: &str) -> Result<ValidationResult, JsError> {
    let dialect = dialect(version)?;

    Ok(match crate::parse(source, dialect) {
        Ok(_) => ValidationResult {
            valid: true,
            kind: None,
            message: None,
            line: 0,
            column: 0,
            pointer: None,
        },
        Err(e) => {
            let kind = match e.kind() {
                crate::ParseErrorKind::Syntax => "syntax",
                crate::ParseErrorKind::Semantic => "semantic",
                crate::ParseErrorKind::VersionUnsupported => "version",
            };
            ValidationResult {
                valid: false,
                kind: Some(kind.to_string()),
                message: Some(e.to_string()),
                line: e.line(),
                column: e.column(),
                pointer: Some(e.pointer()),
            }
        }
    })
}

/// Parse a component and write it back in canonical form.
#[wasm_bindgen]
pub fn format(source: &str, version: &str) -> Result<String, JsError> {
    let dialect = dialect(version)?;
    crate::convert(source, dialect, dialect).map_err(|e| JsError::new(&e.to_string()))
}

/// Parse a component written for `from_version` and write it for `to_version`.
#[wasm_bindgen]
pub fn convert(source: &str, from_version: &str, to_version: &str) -> Result<String, JsError> {
    let from = dialect(from_version)?;
    let to = dialect(to_version)?;
    crate::convert(source, from, to).map_err(|e| JsError::new(&e.to_string()))
}

/// Line wrapper bound to the fonts of one resource pack.
#[wasm_bindgen]
pub struct TextLayoutHandle {
    inner: TextLayouter<BitmapFontMetrics>,
}

#[wasm_bindgen]
impl TextLayoutHandle {
    /// Build font metrics from a loaded pack.
    #[wasm_bindgen(constructor)]
    pub fn new(pack: &ResourcePackHandle, line_width: Option<u32>) -> TextLayoutHandle {
        let metrics = BitmapFontMetrics::from_resource_pack(&pack.inner);
        let mut config = LayoutConfig::default();
        if let Some(width) = line_width {
            config = config.with_line_width(width);
        }
        TextLayoutHandle {
            inner: TextLayouter::with_config(metrics, config),
        }
    }

    /// Maximum line width in pixels.
    #[wasm_bindgen(getter)]
    pub fn line_width(&self) -> u32 {
        self.inner.config().line_width
    }

    /// Wrap a component and return `{ lines, background_width }` as a JS object.
    pub fn wrap(&self, source: &str, version: &str) -> Result<JsValue, JsError> {
        let dialect = dialect(version)?;
        let wrapped = self
            .inner
            .layout_str(source, dialect)
            .map_err(|e| JsError::new(&e.to_string()))?;

        let json = serde_json::to_string(&wrapped)
            .map_err(|e| JsError::new(&format!("Failed to serialize layout: {}", e)))?;
        js_sys::JSON::parse(&json).map_err(|_| JsError::new("Failed to build layout object"))
    }
}
