//! 宿主窗口胶水层 - winit 事件转换和 softbuffer 输出

use crate::event::{Event, Key, MouseButton};
use crate::{Canvas, Color, Point};
use winit::event::{ElementState, MouseButton as WinitButton, WindowEvent};
use winit::keyboard::{Key as WinitKey, NamedKey};

/// 把 winit 窗口事件转换成组件事件
///
/// `pointer` 保存最后已知的鼠标位置，鼠标按键事件本身不带坐标。
pub fn translate_window_event(event: &WindowEvent, pointer: &mut Point, scale_factor: f64) -> Option<Event> {
    match event {
        WindowEvent::CloseRequested => Some(Event::Quit),
        WindowEvent::CursorMoved { position, .. } => {
            *pointer = Point::new(
                (position.x / scale_factor) as i32,
                (position.y / scale_factor) as i32,
            );
            Some(Event::PointerMotion { pos: *pointer })
        }
        WindowEvent::MouseInput { state, button, .. } => {
            let button = match button {
                WinitButton::Left => MouseButton::Left,
                WinitButton::Right => MouseButton::Right,
                WinitButton::Middle => MouseButton::Middle,
                WinitButton::Back => MouseButton::Other(4),
                WinitButton::Forward => MouseButton::Other(5),
                WinitButton::Other(n) => MouseButton::Other(*n),
            };
            let pos = *pointer;
            Some(match state {
                ElementState::Pressed => Event::PointerPress { pos, button },
                ElementState::Released => Event::PointerRelease { pos, button },
            })
        }
        WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
            Some(Event::KeyPress { key: translate_key(&event.logical_key) })
        }
        _ => None,
    }
}

/// 按下和松开时都用 logical_key 转换，保证两次得到同一个 Key
fn translate_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(NamedKey::Backspace) => Key::Backspace,
        WinitKey::Named(NamedKey::Escape) => Key::Escape,
        WinitKey::Named(NamedKey::Enter) => Key::Enter,
        WinitKey::Named(NamedKey::Space) => Key::Char(' '),
        WinitKey::Named(named) => Key::Named(format!("{:?}", named)),
        WinitKey::Character(s) => match s.chars().find(|c| !c.is_control()) {
            Some(ch) => Key::Char(ch),
            None => Key::Named(format!("{:?}", key)),
        },
        _ => Key::Named(format!("{:?}", key)),
    }
}

/// 当前按住的按键，每帧作为快照交给 `Context::set_held_keys`
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    keys: Vec<Key>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录窗口键盘事件；失去焦点时清空，收不到的松开事件不会让按键一直按住
    pub fn observe(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let key = translate_key(&event.logical_key);
                match event.state {
                    ElementState::Pressed => self.press(key),
                    ElementState::Released => self.release(&key),
                }
            }
            WindowEvent::Focused(false) => self.clear(),
            _ => {}
        }
    }

    /// 自动重复的按下只记一次
    pub fn press(&mut self, key: Key) {
        if !self.keys.contains(&key) {
            self.keys.push(key);
        }
    }

    pub fn release(&mut self, key: &Key) {
        self.keys.retain(|k| k != key);
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_held(&self, key: &Key) -> bool {
        self.keys.contains(key)
    }

    pub fn snapshot(&self) -> Vec<Key> {
        self.keys.clone()
    }
}

/// 把画布写入 softbuffer 的 0RGB 缓冲，透明像素与 clear 色混合
pub fn present_to_buffer(buffer: &mut [u32], buffer_width: u32, buffer_height: u32, canvas: &Canvas, clear: Color) {
    let width = buffer_width.min(canvas.width());
    let height = buffer_height.min(canvas.height());
    for y in 0..height {
        for x in 0..width {
            let dst_idx = (y * buffer_width + x) as usize;
            if dst_idx >= buffer.len() {
                continue;
            }
            let p = canvas.get_pixel(x, y).blend(&clear);
            buffer[dst_idx] = ((p.r as u32) << 16) | ((p.g as u32) << 8) | p.b as u32;
        }
    }
}
