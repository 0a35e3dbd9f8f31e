//! 每帧传给 `update()` 的上下文

use crate::dispatcher::Dispatcher;
use crate::event::{Event, Key};
use crate::widget::WidgetId;
use crate::Point;

/// 应用上下文
///
/// 持有当前帧的事件、当前选中的输入框、指针位置和按住的按键。
#[derive(Debug, Default)]
pub struct Context {
    dispatcher: Dispatcher,
    selected: Option<WidgetId>,
    pointer: Point,
    held_keys: Vec<Key>,
    frame: u64,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始新的一帧：替换事件批次，并用最后一个带坐标的事件刷新指针位置
    pub fn process(&mut self, events: Vec<Event>) {
        if let Some(pos) = events.iter().rev().find_map(Event::position) {
            self.pointer = pos;
        }
        self.frame += 1;
        self.dispatcher.process(events);
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    /// 当前帧中该组件关心的事件（拷贝）
    pub fn events_for(&self, widget: WidgetId) -> Vec<Event> {
        self.dispatcher.events_for(widget).into_iter().cloned().collect()
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn set_pointer(&mut self, pos: Point) {
        self.pointer = pos;
    }

    pub fn held_keys(&self) -> &[Key] {
        &self.held_keys
    }

    pub fn set_held_keys(&mut self, keys: Vec<Key>) {
        self.held_keys = keys;
    }

    pub fn is_held(&self, key: &Key) -> bool {
        self.held_keys.contains(key)
    }

    pub fn selected(&self) -> Option<WidgetId> {
        self.selected
    }

    /// 选中输入框，之前选中的自动取消
    pub fn select(&mut self, widget: WidgetId) {
        if self.selected != Some(widget) {
            tracing::debug!(?widget, previous = ?self.selected, "input selected");
            self.selected = Some(widget);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn is_selected(&self, widget: WidgetId) -> bool {
        self.selected == Some(widget)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}
