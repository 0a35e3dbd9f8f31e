//! Label 组件 - 在背景上居中绘制一行文本

use super::base::{Widget, WidgetBase};
use crate::asset::ImageSource;
use crate::error::{GuiError, Result};
use crate::text::{Font, Typeface};
use crate::{Canvas, Color, Rect, Size};
use std::any::Any;
use std::sync::Arc;

/// 小于这个字号时认为文本无法绘制
const MIN_FONT_SIZE: f32 = 0.01;
/// 字号大于 1 时逐步缩小的步长，更小时按比例缩小
const FONT_STEP: f32 = 0.5;
const FONT_SHRINK: f32 = 0.9;

/// 文本类组件的构造参数
#[derive(Debug, Clone)]
pub struct LabelStyle {
    /// 背景色，与 `background` 互斥
    pub bg_color: Option<Color>,
    /// 背景图，会被缩放到组件尺寸
    pub background: Option<ImageSource>,
    /// 没有背景时是否使用透明背景
    pub alpha: bool,
    /// 字体模板：外观、字号、粗体、下划线、前景色
    pub font: Font,
    /// 自动适配时四周保留的边距 (x, y)
    pub offset: Option<(u32, u32)>,
    /// 文本较小时也放大字号填满可用区域
    pub enlarge: bool,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            bg_color: None,
            background: None,
            alpha: false,
            font: Font::default(),
            offset: None,
            enlarge: false,
        }
    }
}

impl LabelStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bg_color(mut self, color: Color) -> Self {
        self.bg_color = Some(color);
        self
    }

    pub fn with_background(mut self, image: impl Into<ImageSource>) -> Self {
        self.background = Some(image.into());
        self
    }

    pub fn with_alpha(mut self, alpha: bool) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_fg_color(mut self, color: Color) -> Self {
        self.font.color = color;
        self
    }

    pub fn with_face(mut self, face: Arc<dyn Typeface>) -> Self {
        self.font.set_face(face);
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font.size = size;
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    pub fn with_underline(mut self, underline: bool) -> Self {
        self.font.underline = underline;
        self
    }

    pub fn with_offset(mut self, x: u32, y: u32) -> Self {
        self.offset = Some((x, y));
        self
    }

    pub fn with_enlarge(mut self, enlarge: bool) -> Self {
        self.enlarge = enlarge;
        self
    }

    /// 构造背景位图
    fn build_background(&self, width: u32, height: u32) -> Result<Canvas> {
        match (&self.bg_color, &self.background) {
            (Some(_), Some(_)) => Err(GuiError::config("can't set both a background image and a bg color")),
            (Some(color), None) => Ok(Canvas::filled(width, height, *color)),
            (None, Some(image)) => Ok(image.load(self.alpha)?.scaled(width, height)),
            (None, None) if self.alpha => Ok(Canvas::filled(width, height, Color::ALPHA)),
            (None, None) => Err(GuiError::config("a background, bg color or alpha must be set")),
        }
    }
}

/// 文本渲染能力：背景 + 文本 + 字体，负责增量重绘
#[derive(Debug, Clone)]
pub struct TextSurface {
    width: u32,
    height: u32,
    text: String,
    font: Font,
    background: Canvas,
    surface: Canvas,
    /// 上一次绘制文本覆盖的区域
    glyph_area: Rect,
}

impl TextSurface {
    pub fn new(width: u32, height: u32, text: &str, style: &LabelStyle) -> Result<Self> {
        let background = style.build_background(width, height)?;

        let (ox, oy) = style.offset.unwrap_or((0, 0));
        let inset = Size::new(
            width.saturating_sub(ox.saturating_mul(2)),
            height.saturating_sub(oy.saturating_mul(2)),
        );
        // 边距只缩小可用区域，边距吃掉整个组件时忽略它
        let fit_box = if inset.width == 0 || inset.height == 0 {
            Size::new(width, height)
        } else {
            inset
        };
        let mut font = style.font.clone();
        fit_font(&mut font, text, fit_box, style.enlarge)?;
        if font.size != style.font.size {
            tracing::trace!(from = style.font.size, to = font.size, text, "label font resized to fit");
        }

        let mut this = Self {
            width,
            height,
            text: text.to_string(),
            font,
            surface: background.clone(),
            background,
            glyph_area: Rect::default(),
        };
        this.draw_text();
        Ok(this)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn surface(&self) -> &Canvas {
        &self.surface
    }

    pub fn background(&self) -> &Canvas {
        &self.background
    }

    /// 文本在当前字号下居中后的区域
    pub fn text_rect(&self, text: &str) -> Rect {
        let size = self.font.get_rect(text);
        let x = (self.width as i32 - size.width as i32) / 2;
        let y = (self.height as i32 - size.height as i32) / 2;
        Rect::new(x, y, size.width, size.height)
    }

    /// 检查文本在当前字号下能否放下
    pub fn check_fits(&self, text: &str) -> Result<()> {
        let size = self.font.get_rect(text);
        if size.width > self.width || size.height > self.height {
            return Err(GuiError::Validation {
                text: text.to_string(),
                width: size.width,
                height: size.height,
                max_width: self.width,
                max_height: self.height,
            });
        }
        Ok(())
    }

    /// 修改文本，不重新缩放字号
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        self.check_fits(text)?;

        let old = self.font.get_rect(&self.text);
        let new = self.font.get_rect(text);
        if old.width > new.width || old.height > new.height {
            self.surface = self.background.clone();
        } else {
            self.surface.copy_region(&self.background, &self.glyph_area);
        }

        self.text = text.to_string();
        self.draw_text();
        Ok(())
    }

    /// 修改前景色并整体重绘
    pub fn set_color(&mut self, color: Color) {
        if self.font.color == color {
            return;
        }
        self.font.color = color;
        self.repaint();
    }

    pub fn repaint(&mut self) {
        self.surface = self.background.clone();
        self.draw_text();
    }

    fn draw_text(&mut self) {
        let area = self.text_rect(&self.text);
        self.font.render_to(&mut self.surface, area.x, area.y, &self.text);
        self.glyph_area = area;
    }
}

/// 调整字号让文本放进 fit_box；`enlarge` 时也允许放大
///
/// 任何正字号都放不下时返回 Validation 错误。
fn fit_font(font: &mut Font, text: &str, fit_box: Size, enlarge: bool) -> Result<()> {
    let measured = font.get_rect(text);
    let too_big = !measured.fits_in(&fit_box);

    if (too_big || enlarge) && measured.height > 0 {
        let rw = if measured.width > 0 {
            fit_box.width as f32 / measured.width as f32
        } else {
            f32::INFINITY
        };
        let rh = fit_box.height as f32 / measured.height as f32;
        let scale = rw.min(rh);
        if scale.is_finite() {
            font.size *= scale;
        }
    }

    // 向上取整的误差可能让缩放后仍略大
    while font.size >= MIN_FONT_SIZE && !font.get_rect(text).fits_in(&fit_box) {
        font.size = if font.size > 1.0 + FONT_STEP {
            font.size - FONT_STEP
        } else {
            font.size * FONT_SHRINK
        };
    }

    if font.size < MIN_FONT_SIZE {
        let size = font.get_rect(text);
        return Err(GuiError::Validation {
            text: text.to_string(),
            width: size.width,
            height: size.height,
            max_width: fit_box.width,
            max_height: fit_box.height,
        });
    }
    Ok(())
}

/// Label - 文本标签
#[derive(Debug, Clone)]
pub struct Label {
    base: WidgetBase,
    render: TextSurface,
}

impl Label {
    /// 构造时会缩小字号让文本放进组件
    pub fn new(width: u32, height: u32, text: &str, style: LabelStyle) -> Result<Self> {
        Ok(Self {
            base: WidgetBase::new(width, height),
            render: TextSurface::new(width, height, text, &style)?,
        })
    }

    /// 尺寸取自背景图
    pub fn from_background(image: impl Into<ImageSource>, text: &str, style: LabelStyle) -> Result<Self> {
        if style.bg_color.is_some() {
            return Err(GuiError::config("can't set both a background image and a bg color"));
        }
        let canvas = image.into().load(style.alpha)?;
        let (w, h) = (canvas.width(), canvas.height());
        Self::new(w, h, text, style.with_background(canvas))
    }

    pub fn text(&self) -> &str {
        self.render.text()
    }

    /// 修改文本；新文本放不下时返回 Validation 错误，原内容不变
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        self.render.set_text(text)?;
        self.base.changed = true;
        Ok(())
    }

    pub fn font(&self) -> &Font {
        self.render.font()
    }

    pub fn font_size(&self) -> f32 {
        self.render.font().size
    }

    pub fn text_rect(&self, text: &str) -> Rect {
        self.render.text_rect(text)
    }

    pub fn set_color(&mut self, color: Color) {
        self.render.set_color(color);
        self.base.changed = true;
    }
}

impl Widget for Label {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn surface(&self) -> &Canvas {
        self.render.surface()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "Label"
    }
}
