//! 配置 - 从 JSON 读取窗口、字体和配色

use crate::color::parse_color;
use crate::error::{GuiError, Result};
use crate::text::{BlockFace, FontFace, Typeface};
use crate::Color;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// gui.json 配置结构
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuiConfig {
    #[serde(default)]
    pub window: WindowConfig,
    /// 字体文件路径；不设置时使用内置方块字体
    #[serde(default)]
    pub font_path: Option<String>,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default)]
    pub theme: ThemeConfig,
    /// 图片资源根目录
    #[serde(default = "default_asset_dir")]
    pub asset_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    #[serde(default = "default_clear")]
    pub clear_color: String,
    #[serde(default = "default_panel")]
    pub panel_color: String,
    #[serde(default = "default_text")]
    pub text_color: String,
    #[serde(default = "default_accent")]
    pub accent_color: String,
}

fn default_font_size() -> f32 { 20.0 }
fn default_asset_dir() -> String { "assets".to_string() }
fn default_title() -> String { "Mini GUI".to_string() }
fn default_width() -> u32 { 800 }
fn default_height() -> u32 { 600 }
fn default_clear() -> String { "#0000FF".to_string() }
fn default_panel() -> String { "#FFFFFF".to_string() }
fn default_text() -> String { "#000000".to_string() }
fn default_accent() -> String { "#FF4500".to_string() }

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            clear_color: default_clear(),
            panel_color: default_panel(),
            text_color: default_text(),
            accent_color: default_accent(),
        }
    }
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            font_path: None,
            font_size: default_font_size(),
            theme: ThemeConfig::default(),
            asset_dir: default_asset_dir(),
        }
    }
}

impl GuiConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GuiError::config(format!("gui config: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| GuiError::config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// 加载配置的字体；失败时退回内置字体
    pub fn typeface(&self) -> Arc<dyn Typeface> {
        if let Some(path) = &self.font_path {
            match FontFace::from_file(Path::new(path)) {
                Ok(face) => return Arc::new(face),
                Err(e) => tracing::warn!(path = %path, error = %e, "font load failed, using block font"),
            }
        }
        Arc::new(BlockFace)
    }

    pub fn color(value: &str) -> Result<Color> {
        parse_color(value).ok_or_else(|| GuiError::config(format!("invalid color {:?}", value)))
    }
}
