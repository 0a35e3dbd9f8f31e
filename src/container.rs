//! Container - 持有子组件、负责摆放、悬停检测和按需合成

use crate::asset::ImageSource;
use crate::context::Context;
use crate::error::{GuiError, Result};
use crate::event::EventType;
use crate::widget::{Widget, WidgetId};
use crate::{Canvas, Color, Point, Rect, Size};

/// 子组件的摆放参数
///
/// `x`、`y` 是 0..=100 的百分比，表示在剩余空间中的位置：
/// 0 贴左/上，100 贴右/下。尺寸优先级：像素 > 容器百分比 > 组件自身尺寸。
#[derive(Debug, Clone, Default)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub width_pct: Option<f32>,
    pub height_pct: Option<f32>,
    /// 允许与已有子组件重叠
    pub overlap: bool,
    /// 覆盖组件自身声明的事件类型
    pub events: Option<Vec<EventType>>,
}

impl Placement {
    pub fn at(x: f32, y: f32) -> Self {
        Self { x, y, ..Self::default() }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// 按容器尺寸的百分比设置宽高
    pub fn with_percent_size(mut self, width_pct: f32, height_pct: f32) -> Self {
        self.width_pct = Some(width_pct);
        self.height_pct = Some(height_pct);
        self
    }

    pub fn allow_overlap(mut self) -> Self {
        self.overlap = true;
        self
    }

    pub fn with_events(mut self, events: Vec<EventType>) -> Self {
        self.events = Some(events);
        self
    }
}

/// 容器里每个子组件的记录
pub struct ChildSlot {
    widget: Box<dyn Widget>,
    /// 需要缩放时保存缩放后的位图；否则直接使用组件自己的位图
    cached: Option<Canvas>,
    /// 容器内坐标
    rect: Rect,
    needs_resize: bool,
    hover: bool,
}

impl ChildSlot {
    pub fn widget(&self) -> &dyn Widget {
        self.widget.as_ref()
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn needs_resize(&self) -> bool {
        self.needs_resize
    }

    pub fn hover(&self) -> bool {
        self.hover
    }

    /// 当前用于合成的位图
    pub fn cached_surface(&self) -> &Canvas {
        self.cached.as_ref().unwrap_or_else(|| self.widget.surface())
    }
}

/// 绘制位置
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DrawTarget {
    /// 使用容器自己的 (x, y)
    #[default]
    Origin,
    At(i32, i32),
    /// 尺寸不同于容器时先缩放
    Rect(Rect),
}

/// 容器
pub struct Container {
    pub x: i32,
    pub y: i32,
    width: u32,
    height: u32,
    background: Canvas,
    bg_color: Option<Color>,
    surface: Canvas,
    visible: bool,
    children: Vec<ChildSlot>,
    hoverable: Vec<WidgetId>,
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("rect", &self.get_rect())
            .field("visible", &self.visible)
            .field("widgets", &self.children.len())
            .finish()
    }
}

impl Container {
    /// `bg_color` 与 `background` 互斥；都不给时背景透明
    pub fn new(
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        bg_color: Option<Color>,
        background: Option<ImageSource>,
    ) -> Result<Self> {
        let background = match (bg_color, background) {
            (Some(_), Some(_)) => {
                return Err(GuiError::config("can't set a background color and a background image"));
            }
            (Some(color), None) => Canvas::filled(width, height, color),
            (None, Some(image)) => image.load(false)?.scaled(width, height),
            (None, None) => Canvas::filled(width, height, Color::ALPHA),
        };
        Ok(Self {
            x,
            y,
            width,
            height,
            surface: background.clone(),
            background,
            bg_color,
            visible: true,
            children: Vec::new(),
            hoverable: Vec::new(),
        })
    }

    /// 纯色背景
    pub fn with_color(x: i32, y: i32, width: u32, height: u32, color: Color) -> Self {
        let background = Canvas::filled(width, height, color);
        Self {
            x,
            y,
            width,
            height,
            surface: background.clone(),
            background,
            bg_color: Some(color),
            visible: true,
            children: Vec::new(),
            hoverable: Vec::new(),
        }
    }

    /// 尺寸取自背景图
    pub fn from_background(x: i32, y: i32, background: impl Into<ImageSource>) -> Result<Self> {
        let canvas = background.into().load(false)?;
        let (w, h) = (canvas.width(), canvas.height());
        Self::new(x, y, w, h, None, Some(ImageSource::Canvas(canvas)))
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn bg_color(&self) -> Option<Color> {
        self.bg_color
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// 屏幕坐标下的区域
    pub fn get_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> impl Iterator<Item = &ChildSlot> {
        self.children.iter()
    }

    pub fn ids(&self) -> Vec<WidgetId> {
        self.children.iter().map(|c| c.widget.id()).collect()
    }

    pub fn hoverable(&self) -> &[WidgetId] {
        &self.hoverable
    }

    fn slot(&self, id: WidgetId) -> Option<&ChildSlot> {
        self.children.iter().find(|c| c.widget.id() == id)
    }

    pub fn child(&self, id: WidgetId) -> Option<&ChildSlot> {
        self.slot(id)
    }

    pub fn placement_of(&self, id: WidgetId) -> Option<Rect> {
        self.slot(id).map(|c| c.rect)
    }

    pub fn get(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.slot(id).map(|c| c.widget.as_ref())
    }

    /// 按具体类型取子组件
    pub fn widget<T: Widget + 'static>(&self, id: WidgetId) -> Option<&T> {
        self.slot(id)?.widget.as_any().downcast_ref::<T>()
    }

    pub fn widget_mut<T: Widget + 'static>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.children
            .iter_mut()
            .find(|c| c.widget.id() == id)?
            .widget
            .as_any_mut()
            .downcast_mut::<T>()
    }

    /// 计算摆放区域，不修改容器
    pub fn resolve(&self, native: Size, placement: &Placement) -> Result<Rect> {
        for pct in [placement.x, placement.y] {
            if !(0.0..=100.0).contains(&pct) {
                return Err(GuiError::config(format!(
                    "can't place at {}% of the container's dimensions",
                    pct
                )));
            }
        }

        let width = placement
            .width
            .or_else(|| placement.width_pct.map(|p| (p / 100.0 * self.width as f32) as u32))
            .unwrap_or(native.width);
        let height = placement
            .height
            .or_else(|| placement.height_pct.map(|p| (p / 100.0 * self.height as f32) as u32))
            .unwrap_or(native.height);

        if width > self.width || height > self.height {
            return Err(GuiError::Size {
                width,
                height,
                max_width: self.width,
                max_height: self.height,
            });
        }

        let x = ((self.width - width) as f32 * placement.x / 100.0) as i32;
        let y = ((self.height - height) as f32 * placement.y / 100.0) as i32;
        Ok(Rect::new(x, y, width, height))
    }

    /// 添加子组件，返回容器内的摆放区域
    ///
    /// 失败时容器和分发器都保持不变。
    pub fn add<W: Widget + 'static>(
        &mut self,
        ctx: &mut Context,
        widget: W,
        placement: Placement,
    ) -> Result<Rect> {
        if self.slot(widget.id()).is_some() {
            return Err(GuiError::config(format!("widget {:?} is already in this container", widget.id())));
        }

        let rect = self.resolve(widget.size(), &placement)?;

        if !placement.overlap {
            if let Some(existing) = self.children.iter().find(|c| rect.intersects(&c.rect)) {
                return Err(GuiError::Overlap { placement: rect, existing: existing.rect });
            }
        }

        let needs_resize = widget.surface().size() != rect.size();
        let cached = needs_resize.then(|| widget.surface().scaled(rect.width, rect.height));

        let events = placement
            .events
            .or_else(|| widget.declared_events().map(<[EventType]>::to_vec));
        if let Some(events) = events {
            ctx.dispatcher_mut().register(widget.id(), events);
        }

        let hover = widget.hover_eligible();
        if hover {
            self.hoverable.push(widget.id());
        }
        tracing::debug!(
            widget = ?widget.id(),
            kind = widget.type_name(),
            ?rect,
            needs_resize,
            hover,
            "container: widget added"
        );
        self.children.push(ChildSlot {
            widget: Box::new(widget),
            cached,
            rect,
            needs_resize,
            hover,
        });
        Ok(rect)
    }

    /// 移除子组件，取消其悬停资格和事件登记，并把背景恢复到原区域
    pub fn remove(&mut self, ctx: &mut Context, id: WidgetId) -> Option<Box<dyn Widget>> {
        let index = self.children.iter().position(|c| c.widget.id() == id)?;
        let slot = self.children.remove(index);
        self.hoverable.retain(|h| *h != id);
        ctx.dispatcher_mut().unregister(id);
        if ctx.is_selected(id) {
            ctx.clear_selection();
        }
        self.surface.copy_region(&self.background, &slot.rect);
        // 与被移除区域重叠的其他子组件需要重画
        for other in self.children.iter_mut().filter(|c| c.rect.intersects(&slot.rect)) {
            other.widget.mark_changed();
        }
        tracing::debug!(widget = ?id, "container: widget removed");
        Some(slot.widget)
    }

    /// 移除所有子组件并取消它们的事件登记，丢弃容器前调用
    pub fn clear(&mut self, ctx: &mut Context) -> Vec<Box<dyn Widget>> {
        self.hoverable.clear();
        self.surface = self.background.clone();
        let removed: Vec<Box<dyn Widget>> = self.children.drain(..).map(|slot| slot.widget).collect();
        for widget in &removed {
            ctx.dispatcher_mut().unregister(widget.id());
            if ctx.is_selected(widget.id()) {
                ctx.clear_selection();
            }
        }
        tracing::debug!(count = removed.len(), "container: cleared");
        removed
    }

    /// 重新计算悬停状态并更新所有子组件
    pub fn update(&mut self, ctx: &mut Context) -> Result<()> {
        if !self.visible {
            return Ok(());
        }

        for slot in self.children.iter_mut().filter(|c| c.hover) {
            slot.widget.set_hovered(false);
        }

        let pointer = ctx.pointer();
        if self.get_rect().contains(&pointer) {
            // 按加入顺序取第一个命中的
            let (ox, oy) = (self.x, self.y);
            let hit = self
                .children
                .iter_mut()
                .filter(|c| c.hover)
                .find(|c| c.rect.translate(ox, oy).contains(&pointer));
            if let Some(slot) = hit {
                slot.widget.set_hovered(true);
            }
        }

        for slot in &mut self.children {
            slot.widget.update(ctx)?;
        }
        Ok(())
    }

    /// 等待合成的子组件数量
    pub fn pending_changes(&self) -> usize {
        self.children.iter().filter(|c| c.widget.is_changed()).count()
    }

    /// 把有变化的子组件合成到容器位图上
    pub fn make_surface(&mut self) -> &Canvas {
        let mut dirty = Vec::new();
        for slot in &mut self.children {
            if !slot.widget.take_changed() {
                continue;
            }
            let rect = slot.rect;
            let src = slot.widget.surface();
            slot.needs_resize = src.size() != rect.size();
            slot.cached = slot.needs_resize.then(|| src.scaled(rect.width, rect.height));
            dirty.push(rect);
        }

        // 恢复背景后按添加顺序重绘该区域内的所有子组件，重叠的兄弟组件不会被擦掉
        for rect in &dirty {
            self.surface.copy_region(&self.background, rect);
            for slot in &self.children {
                let Some(area) = slot.rect.intersection(rect) else { continue };
                let local = area.translate(-slot.rect.x, -slot.rect.y);
                self.surface.blit_region(slot.cached_surface(), &local, Point::new(area.x, area.y));
            }
        }
        &self.surface
    }

    /// 合成后返回位图的拷贝
    pub fn get_surface(&mut self) -> Canvas {
        self.make_surface().clone()
    }

    /// 绘制到容器自己的位置
    pub fn draw(&mut self, dest: &mut Canvas) {
        self.draw_to(dest, DrawTarget::Origin);
    }

    pub fn draw_to(&mut self, dest: &mut Canvas, target: DrawTarget) {
        if !self.visible {
            return;
        }
        let (x, y) = (self.x, self.y);
        let surface = self.make_surface();
        match target {
            DrawTarget::Origin => dest.blit(surface, x, y),
            DrawTarget::At(x, y) => dest.blit(surface, x, y),
            DrawTarget::Rect(rect) => {
                if rect.size() == surface.size() {
                    dest.blit(surface, rect.x, rect.y);
                } else {
                    let scaled = surface.scaled(rect.width, rect.height);
                    dest.blit(&scaled, rect.x, rect.y);
                }
            }
        }
    }

    /// 屏幕坐标是否落在容器内
    pub fn contains(&self, point: &Point) -> bool {
        self.get_rect().contains(point)
    }
}
