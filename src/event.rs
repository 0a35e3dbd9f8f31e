//! 事件系统 - 每帧由宿主程序收集的输入事件

use crate::Point;

/// 事件类型标签，组件按标签声明关心的事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    PointerPress,
    PointerRelease,
    PointerMotion,
    KeyPress,
    Quit,
}

/// 鼠标按键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// 按键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Backspace,
    Escape,
    Enter,
    /// 产生字符的按键
    Char(char),
    /// 其他不产生字符的按键（方向键、修饰键等）
    Named(String),
}

/// 输入事件
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    PointerPress { pos: Point, button: MouseButton },
    PointerRelease { pos: Point, button: MouseButton },
    PointerMotion { pos: Point },
    KeyPress { key: Key },
    Quit,
}

impl Event {
    pub fn event_type(&self) -> EventType {
        match self {
            Event::PointerPress { .. } => EventType::PointerPress,
            Event::PointerRelease { .. } => EventType::PointerRelease,
            Event::PointerMotion { .. } => EventType::PointerMotion,
            Event::KeyPress { .. } => EventType::KeyPress,
            Event::Quit => EventType::Quit,
        }
    }

    /// 带坐标的事件返回指针位置
    pub fn position(&self) -> Option<Point> {
        match self {
            Event::PointerPress { pos, .. }
            | Event::PointerRelease { pos, .. }
            | Event::PointerMotion { pos } => Some(*pos),
            _ => None,
        }
    }

    pub fn click(x: i32, y: i32) -> Self {
        Event::PointerPress { pos: Point::new(x, y), button: MouseButton::Left }
    }

    pub fn release(x: i32, y: i32) -> Self {
        Event::PointerRelease { pos: Point::new(x, y), button: MouseButton::Left }
    }

    pub fn key(ch: char) -> Self {
        Event::KeyPress { key: Key::Char(ch) }
    }

    pub fn backspace() -> Self {
        Event::KeyPress { key: Key::Backspace }
    }
}
