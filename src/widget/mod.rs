//! 组件系统

mod base;
mod sprite;
pub mod label;
pub mod button;
pub mod input;

pub use base::{Widget, WidgetBase, WidgetId};
pub use sprite::Sprite;
pub use label::{Label, LabelStyle, TextSurface};
pub use button::{Activation, Button, ImageButton, TextButton};
pub use input::{InputField, InputStyle, DEFAULT_HINT};
