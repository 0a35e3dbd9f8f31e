//! 图片资源引用

use crate::error::{GuiError, Result};
use crate::Canvas;
use std::path::PathBuf;

/// 图片来源：已加载的位图、单个路径字符串或按段拼接的路径
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Canvas(Canvas),
    Path(PathBuf),
    Segments(Vec<String>),
}

impl ImageSource {
    /// 解析为文件路径；已加载的位图返回 None
    pub fn path(&self) -> Option<PathBuf> {
        match self {
            ImageSource::Canvas(_) => None,
            ImageSource::Path(p) => Some(p.clone()),
            ImageSource::Segments(parts) => Some(parts.iter().collect()),
        }
    }

    /// 加载位图。`alpha` 为 false 时去掉透明通道
    pub fn load(&self, alpha: bool) -> Result<Canvas> {
        let mut canvas = match self {
            ImageSource::Canvas(c) => c.clone(),
            _ => {
                let path = self.path().unwrap_or_default();
                if path.as_os_str().is_empty() {
                    return Err(GuiError::Asset {
                        path: String::new(),
                        reason: "empty image path".to_string(),
                    });
                }
                let canvas = Canvas::load(&path)?;
                tracing::debug!(path = %path.display(), w = canvas.width(), h = canvas.height(), "image loaded");
                canvas
            }
        };
        if !alpha {
            canvas.make_opaque();
        }
        Ok(canvas)
    }
}

impl From<Canvas> for ImageSource {
    fn from(c: Canvas) -> Self {
        ImageSource::Canvas(c)
    }
}

impl From<&str> for ImageSource {
    fn from(s: &str) -> Self {
        ImageSource::Path(PathBuf::from(s))
    }
}

impl From<String> for ImageSource {
    fn from(s: String) -> Self {
        ImageSource::Path(PathBuf::from(s))
    }
}

impl From<PathBuf> for ImageSource {
    fn from(p: PathBuf) -> Self {
        ImageSource::Path(p)
    }
}

impl From<&[&str]> for ImageSource {
    fn from(parts: &[&str]) -> Self {
        ImageSource::Segments(parts.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Vec<String>> for ImageSource {
    fn from(parts: Vec<String>) -> Self {
        ImageSource::Segments(parts)
    }
}
