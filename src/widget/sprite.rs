//! Sprite - 只显示一张位图的基础组件

use super::base::{Widget, WidgetBase};
use crate::asset::ImageSource;
use crate::error::{GuiError, Result};
use crate::event::EventType;
use crate::Canvas;
use std::any::Any;

/// 从位图或图片二选一得到组件位图，并缩放到 (width, height)
pub(crate) fn resolve_surface(
    width: u32,
    height: u32,
    surface: Option<Canvas>,
    image: Option<ImageSource>,
    alpha: bool,
) -> Result<Canvas> {
    let surface = match (surface, image) {
        (Some(_), Some(_)) => {
            return Err(GuiError::config("both a surface and an image were provided"));
        }
        (None, None) => {
            return Err(GuiError::config("a surface or an image must be provided"));
        }
        (Some(mut s), None) => {
            if !alpha {
                s.make_opaque();
            }
            s
        }
        (None, Some(img)) => img.load(alpha)?,
    };
    Ok(surface.scaled(width, height))
}

/// 由现成位图或图片路径构造的静态组件
#[derive(Debug, Clone)]
pub struct Sprite {
    base: WidgetBase,
    surface: Canvas,
}

impl Sprite {
    /// `surface` 与 `image` 必须二选一；位图尺寸不同于 (width, height) 时会被缩放
    pub fn new(
        width: u32,
        height: u32,
        surface: Option<Canvas>,
        image: Option<ImageSource>,
        alpha: bool,
    ) -> Result<Self> {
        let surface = resolve_surface(width, height, surface, image, alpha)?;
        Ok(Self {
            base: WidgetBase::new(width, height),
            surface,
        })
    }

    /// 尺寸取自位图本身
    pub fn from_surface(surface: Canvas) -> Self {
        Self {
            base: WidgetBase::new(surface.width(), surface.height()),
            surface,
        }
    }

    /// 尺寸取自图片本身
    pub fn from_image(image: impl Into<ImageSource>, alpha: bool) -> Result<Self> {
        Ok(Self::from_surface(image.into().load(alpha)?))
    }

    pub fn with_hover(mut self, hover: bool) -> Self {
        self.base.hover_eligible = hover;
        self
    }

    pub fn with_events(mut self, events: Vec<EventType>) -> Self {
        self.base.events = Some(events);
        self
    }

    /// 替换位图并标记 changed
    pub fn set_surface(&mut self, surface: Canvas) {
        self.surface = surface.scaled(self.base.width(), self.base.height());
        self.base.changed = true;
    }
}

impl Widget for Sprite {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn surface(&self) -> &Canvas {
        &self.surface
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "Sprite"
    }
}
