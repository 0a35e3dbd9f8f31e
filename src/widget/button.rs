//! 按钮组件 - 位图按钮、文本按钮、图片按钮

use super::base::{Widget, WidgetBase};
use super::label::{LabelStyle, TextSurface};
use super::sprite::resolve_surface;
use crate::asset::ImageSource;
use crate::context::Context;
use crate::error::Result;
use crate::event::EventType;
use crate::{Canvas, Color};
use std::any::Any;
use std::fmt;

/// 文本按钮默认的高亮压暗比例
const HIGHLIGHT_DARKEN: f32 = 0.3;

/// 按钮激活能力：回调 + 锁定状态
pub struct Activation {
    action: Box<dyn FnMut()>,
    locked: bool,
}

impl fmt::Debug for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Activation").field("locked", &self.locked).finish()
    }
}

impl Activation {
    pub fn new<F>(action: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Self { action: Box::new(action), locked: false }
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    /// 悬停且未锁定时，本帧只要有登记的事件就触发一次回调
    pub fn poll(&mut self, base: &WidgetBase, ctx: &Context) -> bool {
        if !base.hovered || self.locked {
            return false;
        }
        if ctx.dispatcher().events_for(base.id()).is_empty() {
            return false;
        }
        tracing::debug!(widget = ?base.id(), frame = ctx.frame(), "button action");
        (self.action)();
        true
    }
}

fn button_base(width: u32, height: u32) -> WidgetBase {
    WidgetBase::new(width, height)
        .with_hover(true)
        .with_events(vec![EventType::PointerRelease])
}

/// Button - 显示固定位图的按钮
#[derive(Debug)]
pub struct Button {
    base: WidgetBase,
    activation: Activation,
    surface: Canvas,
}

impl Button {
    /// `surface` 与 `image` 必须二选一
    pub fn new<F>(
        width: u32,
        height: u32,
        surface: Option<Canvas>,
        image: Option<ImageSource>,
        alpha: bool,
        action: F,
    ) -> Result<Self>
    where
        F: FnMut() + 'static,
    {
        Ok(Self {
            base: button_base(width, height),
            activation: Activation::new(action),
            surface: resolve_surface(width, height, surface, image, alpha)?,
        })
    }

    pub fn from_surface<F>(surface: Canvas, action: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Self {
            base: button_base(surface.width(), surface.height()),
            activation: Activation::new(action),
            surface,
        }
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.activation.locked = locked;
        self
    }

    pub fn is_locked(&self) -> bool {
        self.activation.locked()
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.activation.locked = locked;
    }
}

impl Widget for Button {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn surface(&self) -> &Canvas {
        &self.surface
    }

    fn update(&mut self, ctx: &mut Context) -> Result<()> {
        self.activation.poll(&self.base, ctx);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "Button"
    }
}

/// TextButton - 带文本的按钮，悬停时换成高亮色
#[derive(Debug)]
pub struct TextButton {
    base: WidgetBase,
    activation: Activation,
    render: TextSurface,
    fg_color: Color,
    highlight_color: Color,
    lock_color: Color,
    highlighted: bool,
}

impl TextButton {
    pub fn new<F>(width: u32, height: u32, text: &str, style: LabelStyle, action: F) -> Result<Self>
    where
        F: FnMut() + 'static,
    {
        let fg_color = style.font.color;
        Ok(Self {
            base: button_base(width, height),
            activation: Activation::new(action),
            render: TextSurface::new(width, height, text, &style)?,
            fg_color,
            highlight_color: fg_color.darken(HIGHLIGHT_DARKEN),
            lock_color: Color::LIGHT_GREY,
            highlighted: false,
        })
    }

    /// 尺寸取自背景图
    pub fn from_background<F>(image: impl Into<ImageSource>, text: &str, style: LabelStyle, action: F) -> Result<Self>
    where
        F: FnMut() + 'static,
    {
        let canvas = image.into().load(style.alpha)?;
        let (w, h) = (canvas.width(), canvas.height());
        Self::new(w, h, text, style.with_background(canvas), action)
    }

    pub fn with_highlight_color(mut self, color: Color) -> Self {
        self.highlight_color = color;
        self
    }

    pub fn with_lock_color(mut self, color: Color) -> Self {
        self.lock_color = color;
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.set_locked(locked);
        self
    }

    pub fn text(&self) -> &str {
        self.render.text()
    }

    pub fn set_text(&mut self, text: &str) -> Result<()> {
        self.render.set_text(text)?;
        self.base.changed = true;
        Ok(())
    }

    pub fn font_color(&self) -> Color {
        self.render.font().color
    }

    pub fn highlight_color(&self) -> Color {
        self.highlight_color
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn is_locked(&self) -> bool {
        self.activation.locked()
    }

    /// 锁定时换成锁定色，解锁恢复前景色；状态不变时什么也不做
    pub fn set_locked(&mut self, locked: bool) {
        if self.activation.locked == locked {
            return;
        }
        self.activation.locked = locked;
        self.highlighted = false;
        let color = if locked { self.lock_color } else { self.fg_color };
        self.render.set_color(color);
        self.base.changed = true;
    }
}

impl Widget for TextButton {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn surface(&self) -> &Canvas {
        self.render.surface()
    }

    fn update(&mut self, ctx: &mut Context) -> Result<()> {
        self.activation.poll(&self.base, ctx);
        if self.activation.locked() {
            return Ok(());
        }

        // 只在悬停状态切换时重绘一次
        if self.base.hovered && !self.highlighted {
            self.highlighted = true;
            self.render.set_color(self.highlight_color);
            self.base.changed = true;
        } else if !self.base.hovered && self.highlighted {
            self.highlighted = false;
            self.render.set_color(self.fg_color);
            self.base.changed = true;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "TextButton"
    }
}

/// ImageButton - 悬停时切换到高亮图片的按钮
#[derive(Debug)]
pub struct ImageButton {
    base: WidgetBase,
    activation: Activation,
    image: Canvas,
    highlight_image: Canvas,
    showing_highlight: bool,
}

impl ImageButton {
    /// 图片会缩放到 (width, height)；没有高亮图时使用原图的拷贝
    pub fn new<F>(
        width: u32,
        height: u32,
        image: impl Into<ImageSource>,
        highlight: Option<ImageSource>,
        action: F,
    ) -> Result<Self>
    where
        F: FnMut() + 'static,
    {
        let image = image.into().load(true)?.scaled(width, height);
        let highlight_image = match highlight {
            Some(src) => src.load(true)?.scaled(width, height),
            None => image.clone(),
        };
        Ok(Self {
            base: button_base(width, height),
            activation: Activation::new(action),
            image,
            highlight_image,
            showing_highlight: false,
        })
    }

    /// 尺寸取自图片本身
    pub fn from_image<F>(image: impl Into<ImageSource>, highlight: Option<ImageSource>, action: F) -> Result<Self>
    where
        F: FnMut() + 'static,
    {
        let image = image.into().load(true)?;
        let (w, h) = (image.width(), image.height());
        Self::new(w, h, image, highlight, action)
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.activation.locked = locked;
        self
    }

    pub fn is_locked(&self) -> bool {
        self.activation.locked()
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.activation.locked = locked;
    }

    pub fn is_showing_highlight(&self) -> bool {
        self.showing_highlight
    }
}

impl Widget for ImageButton {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn surface(&self) -> &Canvas {
        if self.showing_highlight {
            &self.highlight_image
        } else {
            &self.image
        }
    }

    fn update(&mut self, ctx: &mut Context) -> Result<()> {
        self.activation.poll(&self.base, ctx);
        let want_highlight = self.base.hovered && !self.activation.locked();
        if want_highlight != self.showing_highlight {
            self.showing_highlight = want_highlight;
            self.base.changed = true;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "ImageButton"
    }
}
