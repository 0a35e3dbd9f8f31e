//! 事件分发器 - 保存当前帧的事件批次，按组件登记的类型过滤

use crate::event::{Event, EventType};
use crate::widget::WidgetId;
use std::collections::HashMap;

/// 事件分发器
///
/// 每帧 `process` 一次，替换掉上一帧的事件；不跨帧缓存。
#[derive(Debug, Default)]
pub struct Dispatcher {
    widgets: HashMap<WidgetId, Vec<EventType>>,
    events: Vec<Event>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记（或替换）组件关心的事件类型
    pub fn register(&mut self, widget: WidgetId, events: Vec<EventType>) {
        self.widgets.insert(widget, events);
    }

    pub fn unregister(&mut self, widget: WidgetId) -> bool {
        self.widgets.remove(&widget).is_some()
    }

    pub fn is_registered(&self, widget: WidgetId) -> bool {
        self.widgets.contains_key(&widget)
    }

    pub fn filter(&self, widget: WidgetId) -> Option<&[EventType]> {
        self.widgets.get(&widget).map(Vec::as_slice)
    }

    /// 替换当前帧事件
    pub fn process(&mut self, events: Vec<Event>) {
        tracing::trace!(count = events.len(), "dispatcher: new frame events");
        self.events = events;
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// 当前帧中该组件关心的事件，保持原始顺序；未登记返回空
    pub fn events_for(&self, widget: WidgetId) -> Vec<&Event> {
        match self.widgets.get(&widget) {
            Some(filter) => self
                .events
                .iter()
                .filter(|e| filter.contains(&e.event_type()))
                .collect(),
            None => Vec::new(),
        }
    }
}
