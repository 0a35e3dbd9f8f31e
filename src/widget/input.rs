//! InputField - 可输入文本的输入框

use super::base::{Widget, WidgetBase};
use super::label::{Label, LabelStyle};
use crate::context::Context;
use crate::error::{GuiError, Result};
use crate::event::{Event, EventType, Key};
use crate::Canvas;
use std::any::Any;

pub const DEFAULT_HINT: &str = "Type here...";

/// 输入框参数
#[derive(Debug, Clone)]
pub struct InputStyle {
    pub hint_text: String,
    /// 显示用标签的样式
    pub label: LabelStyle,
    /// 只显示末尾的这么多字符
    pub max_chars: Option<usize>,
    /// 显示文本的最大像素宽度，默认为输入框宽度
    pub max_width: Option<u32>,
}

impl Default for InputStyle {
    fn default() -> Self {
        Self {
            hint_text: DEFAULT_HINT.to_string(),
            label: LabelStyle::default(),
            max_chars: None,
            max_width: None,
        }
    }
}

impl InputStyle {
    pub fn new(label: LabelStyle) -> Self {
        Self { label, ..Self::default() }
    }

    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint_text = hint.to_string();
        self
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = Some(max_chars);
        self
    }

    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = Some(max_width);
        self
    }
}

/// 输入框
///
/// 被鼠标按下选中后接收键盘输入；同一时间只有一个输入框被选中，
/// 选中状态保存在 `Context` 里。
#[derive(Debug)]
pub struct InputField {
    base: WidgetBase,
    displayer: Label,
    hint_text: String,
    text: String,
    max_chars: Option<usize>,
    max_width: u32,
}

impl InputField {
    pub fn new(width: u32, height: u32, style: InputStyle) -> Result<Self> {
        let hint_text = if style.hint_text.is_empty() {
            " ".to_string()
        } else {
            style.hint_text
        };
        if let Some(max) = style.max_chars {
            let len = hint_text.chars().count();
            if len > max {
                return Err(GuiError::config(format!(
                    "hint text ({} chars) is longer than max_chars ({} chars)",
                    len, max
                )));
            }
        }

        let displayer = Label::new(width, height, &hint_text, style.label)?;
        Ok(Self {
            base: WidgetBase::new(width, height)
                .with_hover(true)
                .with_events(vec![EventType::KeyPress, EventType::PointerPress]),
            displayer,
            text: hint_text.clone(),
            hint_text,
            max_chars: style.max_chars,
            max_width: style.max_width.unwrap_or(width),
        })
    }

    /// 输入缓冲内容（未输入时等于提示文本）
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn hint_text(&self) -> &str {
        &self.hint_text
    }

    pub fn is_hint(&self) -> bool {
        self.text == self.hint_text
    }

    /// 当前显示在标签上的文本
    pub fn displayed_text(&self) -> &str {
        self.displayer.text()
    }

    /// 计算应显示的末尾子串
    pub fn shown_text(&self) -> String {
        self.tail_of(&self.text)
    }

    /// 放得进显示区域的末尾子串：先按 max_chars 截断，再按像素宽度截断
    fn tail_of(&self, text: &str) -> String {
        let mut chars: Vec<char> = text.chars().collect();
        if let Some(max) = self.max_chars {
            let start = chars.len().saturating_sub(max);
            chars.drain(..start);
        }

        // 超过输入框本身宽度的文本标签放不下
        let max_width = self.max_width.min(self.base.width());
        let font = self.displayer.font();
        let tail = |n: usize| -> String { chars[chars.len() - n..].iter().collect() };
        let full_w = font.get_rect(&tail(chars.len())).width;
        if full_w <= max_width || chars.is_empty() {
            return tail(chars.len());
        }

        // 先按平均字符宽度估算，再逐个减少直到放得下
        let approx_char = full_w as f32 / chars.len() as f32;
        let mut shown = ((max_width as f32 / approx_char) as usize + 1).min(chars.len());
        while shown > 0 && font.get_rect(&tail(shown)).width > max_width {
            shown -= 1;
        }
        tail(shown)
    }

    /// 按一次键；显示更新失败时输入缓冲保持不变
    pub fn apply_key(&mut self, key: &Key) -> Result<()> {
        let next = match key {
            Key::Backspace => {
                if self.text.chars().count() <= 1 || self.is_hint() {
                    self.hint_text.clone()
                } else {
                    let mut next = self.text.clone();
                    next.pop();
                    next
                }
            }
            Key::Char(ch) if self.is_hint() => ch.to_string(),
            Key::Char(ch) => {
                let mut next = self.text.clone();
                next.push(*ch);
                next
            }
            // 不产生字符的按键
            _ => return Ok(()),
        };

        // 提示文本构造时已经放得下，完整显示
        let shown = if next == self.hint_text { next.clone() } else { self.tail_of(&next) };
        self.displayer.set_text(&shown)?;
        self.text = next;
        self.base.changed = true;
        tracing::trace!(widget = ?self.base.id(), text = %self.text, shown = %shown, "input edited");
        Ok(())
    }
}

impl Widget for InputField {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn surface(&self) -> &Canvas {
        self.displayer.surface()
    }

    fn update(&mut self, ctx: &mut Context) -> Result<()> {
        let events = ctx.events_for(self.base.id());

        if self.base.hovered
            && events.iter().any(|e| e.event_type() == EventType::PointerPress)
        {
            ctx.select(self.base.id());
        }

        if ctx.is_selected(self.base.id()) {
            for event in &events {
                if let Event::KeyPress { key } = event {
                    self.apply_key(key)?;
                }
            }
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
        "InputField"
    }
}
