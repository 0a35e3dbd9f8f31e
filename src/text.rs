//! 文本渲染模块 - 字体测量、自动缩放所需的尺寸计算和字形绘制

use crate::{Canvas, Color, Rect, Size};
use fontdue::{Font as FontdueFont, FontSettings, Metrics};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// 单个字形的光栅化结果
#[derive(Debug, Clone)]
pub struct Glyph {
    pub width: usize,
    pub height: usize,
    /// 相对笔位置的水平偏移
    pub xmin: i32,
    /// 字形底部相对基线的偏移（向上为正）
    pub ymin: i32,
    pub advance: f32,
    /// 每个像素的覆盖率 0..=255
    pub coverage: Vec<u8>,
}

/// 字体外观：测量与光栅化
pub trait Typeface: Send + Sync {
    /// 字符前进宽度
    fn advance(&self, ch: char, size: f32) -> f32;

    /// (ascent, descent)，都为正数
    fn line_metrics(&self, size: f32) -> (f32, f32);

    fn rasterize(&self, ch: char, size: f32) -> Glyph;

    fn name(&self) -> &str;
}

/// 内置方块字体
///
/// 不依赖字体文件，每个字符画成一个实心块，度量固定：
/// advance = 3/5 size，ascent = 4/5 size，descent = 1/5 size。
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockFace;

impl Typeface for BlockFace {
    fn advance(&self, _ch: char, size: f32) -> f32 {
        size * 3.0 / 5.0
    }

    fn line_metrics(&self, size: f32) -> (f32, f32) {
        (size * 4.0 / 5.0, size / 5.0)
    }

    fn rasterize(&self, ch: char, size: f32) -> Glyph {
        let advance = self.advance(ch, size);
        if ch.is_whitespace() {
            return Glyph { width: 0, height: 0, xmin: 0, ymin: 0, advance, coverage: Vec::new() };
        }
        // 左右各留 1px，高度取 ascent 去掉顶部 2px
        let width = (advance - 2.0).max(1.0) as usize;
        let height = (self.line_metrics(size).0 - 2.0).max(1.0) as usize;
        Glyph {
            width,
            height,
            xmin: 1,
            ymin: 0,
            advance,
            coverage: vec![255; width * height],
        }
    }

    fn name(&self) -> &str {
        "block"
    }
}

/// 基于 fontdue 的字体，带字形缓存
pub struct FontFace {
    name: String,
    font: FontdueFont,
    /// (char, size_key) -> (Metrics, Bitmap)
    cache: Mutex<HashMap<(char, u32), (Metrics, Vec<u8>)>>,
}

impl FontFace {
    /// 从字体数据创建
    pub fn from_bytes(name: &str, font_data: &[u8]) -> Result<Self, String> {
        let settings = FontSettings {
            scale: 40.0,
            ..Default::default()
        };
        let font = FontdueFont::from_bytes(font_data, settings)
            .map_err(|e| e.to_string())?;
        Ok(Self {
            name: name.to_string(),
            font,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// 从文件路径加载字体
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let font_data = std::fs::read(path)
            .map_err(|e| format!("Failed to read font file: {}", e))?;
        Self::from_bytes(&path.display().to_string(), &font_data)
    }
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFace").field("name", &self.name).finish()
    }
}

impl Typeface for FontFace {
    fn advance(&self, ch: char, size: f32) -> f32 {
        self.font.metrics(ch, size).advance_width
    }

    fn line_metrics(&self, size: f32) -> (f32, f32) {
        match self.font.horizontal_line_metrics(size) {
            Some(m) => (m.ascent, -m.descent),
            None => (size * 0.8, size * 0.2),
        }
    }

    fn rasterize(&self, ch: char, size: f32) -> Glyph {
        // 保留 1 位小数精度作为缓存 key
        let size_key = (size * 10.0) as u32;
        let cached = self
            .cache
            .lock()
            .ok()
            .and_then(|cache| cache.get(&(ch, size_key)).cloned());

        let (metrics, bitmap) = match cached {
            Some(data) => data,
            None => {
                let (metrics, bitmap) = self.font.rasterize(ch, size);
                if let Ok(mut cache) = self.cache.lock() {
                    cache.insert((ch, size_key), (metrics, bitmap.clone()));
                }
                (metrics, bitmap)
            }
        };

        Glyph {
            width: metrics.width,
            height: metrics.height,
            xmin: metrics.xmin,
            ymin: metrics.ymin,
            advance: metrics.advance_width,
            coverage: bitmap,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// 向上取整到像素，忽略浮点累加误差
fn round_up(v: f32) -> u32 {
    (v - 1e-3).ceil().max(0.0) as u32
}

/// 字体：外观 + 字号 + 样式 + 前景色
#[derive(Clone)]
pub struct Font {
    face: Arc<dyn Typeface>,
    pub size: f32,
    pub bold: bool,
    pub underline: bool,
    pub color: Color,
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("face", &self.face.name())
            .field("size", &self.size)
            .field("bold", &self.bold)
            .field("underline", &self.underline)
            .field("color", &self.color)
            .finish()
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(Arc::new(BlockFace), 20.0)
    }
}

impl Font {
    pub fn new(face: Arc<dyn Typeface>, size: f32) -> Self {
        Self {
            face,
            size,
            bold: false,
            underline: false,
            color: Color::BLACK,
        }
    }

    pub fn face(&self) -> &Arc<dyn Typeface> {
        &self.face
    }

    /// 更换字体外观，保留字号和样式
    pub fn set_face(&mut self, face: Arc<dyn Typeface>) {
        self.face = face;
    }

    /// 文本包围盒尺寸
    pub fn get_rect(&self, text: &str) -> Size {
        let width: f32 = text.chars().map(|ch| self.face.advance(ch, self.size)).sum();
        let (ascent, descent) = self.face.line_metrics(self.size);
        let mut width = round_up(width);
        // 软件加粗向右多画 1px
        if self.bold && width > 0 {
            width += 1;
        }
        Size::new(width, round_up(ascent + descent))
    }

    /// 以 (x, y) 为左上角绘制文本，绘制范围限定在文本包围盒内
    pub fn render_to(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str) {
        let bounds = Rect::from_size(self.get_rect(text)).translate(x, y);
        let Some(clip) = bounds.intersection(&canvas.rect()) else { return };

        let (ascent, _) = self.face.line_metrics(self.size);
        let baseline = y as f32 + ascent;
        let mut cursor_x = x as f32;

        for ch in text.chars() {
            let glyph = self.face.rasterize(ch, self.size);
            let glyph_x = cursor_x + glyph.xmin as f32;
            let glyph_y = baseline - glyph.height as f32 - glyph.ymin as f32;

            for gy in 0..glyph.height {
                for gx in 0..glyph.width {
                    let coverage = glyph.coverage[gy * glyph.width + gx];
                    if coverage == 0 {
                        continue;
                    }
                    let alpha = (self.color.a as u32 * coverage as u32 / 255) as u8;
                    let color = Color::new(self.color.r, self.color.g, self.color.b, alpha);
                    let px = (glyph_x + gx as f32).round() as i32;
                    let py = (glyph_y + gy as f32).round() as i32;
                    self.plot(canvas, &clip, px, py, color);
                    if self.bold {
                        self.plot(canvas, &clip, px + 1, py, color);
                    }
                }
            }
            cursor_x += glyph.advance;
        }

        if self.underline {
            let uy = (baseline.round() as i32 + 1).min(bounds.bottom() - 1);
            for ux in bounds.left()..bounds.right() {
                self.plot(canvas, &clip, ux, uy, self.color);
            }
        }
    }

    #[inline]
    fn plot(&self, canvas: &mut Canvas, clip: &Rect, x: i32, y: i32, color: Color) {
        if x >= clip.left() && x < clip.right() && y >= clip.top() && y < clip.bottom() {
            canvas.set_pixel(x, y, color);
        }
    }
}
