//! 组件基础定义

use crate::context::Context;
use crate::error::Result;
use crate::event::EventType;
use crate::{Canvas, Size};
use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};

static WIDGET_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// 组件 ID，容器和分发器用它索引组件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u64);

impl WidgetId {
    pub fn new() -> Self {
        Self(WIDGET_ID_COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for WidgetId {
    fn default() -> Self {
        Self::new()
    }
}

/// 所有组件共有的状态
///
/// id 和尺寸在构造后不再改变，容器靠它们查找和摆放子组件。
#[derive(Debug, Clone)]
pub struct WidgetBase {
    id: WidgetId,
    width: u32,
    height: u32,
    /// 是否参与鼠标悬停检测
    pub(crate) hover_eligible: bool,
    /// 由所属容器每帧重新计算
    pub(crate) hovered: bool,
    /// 位图自上次被容器合成后是否改变
    pub(crate) changed: bool,
    /// 放入容器时向分发器登记的事件类型
    pub(crate) events: Option<Vec<EventType>>,
}

impl WidgetBase {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            id: WidgetId::new(),
            width,
            height,
            hover_eligible: false,
            hovered: false,
            changed: true,
            events: None,
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn with_hover(mut self, hover: bool) -> Self {
        self.hover_eligible = hover;
        self
    }

    pub fn with_events(mut self, events: Vec<EventType>) -> Self {
        self.events = Some(events);
        self
    }
}

/// 组件 trait
pub trait Widget {
    fn base(&self) -> &WidgetBase;
    fn base_mut(&mut self) -> &mut WidgetBase;

    /// 当前位图
    fn surface(&self) -> &Canvas;

    /// 每帧由容器调用；默认什么也不做
    fn update(&mut self, ctx: &mut Context) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// 组件类型名
    fn type_name(&self) -> &'static str {
        "Widget"
    }

    fn id(&self) -> WidgetId {
        self.base().id()
    }

    fn size(&self) -> Size {
        Size::new(self.base().width(), self.base().height())
    }

    fn hover_eligible(&self) -> bool {
        self.base().hover_eligible
    }

    fn is_hovered(&self) -> bool {
        self.base().hovered
    }

    fn set_hovered(&mut self, hovered: bool) {
        self.base_mut().hovered = hovered;
    }

    fn is_changed(&self) -> bool {
        self.base().changed
    }

    fn mark_changed(&mut self) {
        self.base_mut().changed = true;
    }

    /// 读取并清除 changed 标记
    fn take_changed(&mut self) -> bool {
        std::mem::replace(&mut self.base_mut().changed, false)
    }

    fn declared_events(&self) -> Option<&[EventType]> {
        self.base().events.as_deref()
    }
}
