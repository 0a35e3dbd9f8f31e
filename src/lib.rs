//! Mini GUI - 软件渲染的保留模式小组件库
//! 标签、按钮、输入框和容器组成组件树，由外部游戏循环每帧更新并重绘

mod canvas;
mod color;
mod geometry;
pub mod text;
pub mod asset;
pub mod error;

pub use canvas::Canvas;
pub use color::{parse_color, Color};
pub use geometry::{Point, Rect, Size};
pub use asset::ImageSource;
pub use error::{GuiError, Result};
pub use text::{BlockFace, Font, FontFace, Typeface};

// 事件与分发
pub mod event;
pub mod dispatcher;
pub mod context;

pub use event::{Event, EventType, Key, MouseButton};
pub use dispatcher::Dispatcher;
pub use context::Context;

// 组件与容器
pub mod widget;
pub mod container;

pub use widget::{
    Button, ImageButton, InputField, InputStyle, Label, LabelStyle, Sprite, TextButton, Widget,
    WidgetId,
};
pub use container::{Container, DrawTarget, Placement};

// 配置
pub mod config;

// 窗口胶水层
pub mod host;

// 单元测试
#[cfg(test)]
mod tests;
