//! 颜色模块

/// RGBA 颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
            a: 255,
        }
    }

    /// 按比例压暗，alpha 不变（factor = 0.3 即每个通道减去 30%）
    pub fn darken(&self, factor: f32) -> Self {
        let keep = (1.0 - factor).clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * keep) as u8,
            g: (self.g as f32 * keep) as u8,
            b: (self.b as f32 * keep) as u8,
            a: self.a,
        }
    }

    /// 去掉透明度
    pub const fn opaque(&self) -> Self {
        Self::rgb(self.r, self.g, self.b)
    }

    /// source-over 混合，self 画在 dst 上面
    #[inline]
    pub fn blend(&self, dst: &Color) -> Color {
        match self.a {
            0 => return *dst,
            255 => return *self,
            _ => {}
        }
        let src_a = self.a as u32;
        // dst 在混合结果中的权重
        let dst_w = dst.a as u32 * (255 - src_a) / 255;
        let out_a = src_a + dst_w;
        if out_a == 0 {
            return Color::TRANSPARENT;
        }
        let mix = |s: u8, d: u8| ((s as u32 * src_a + d as u32 * dst_w) / out_a) as u8;
        Color::new(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b), out_a as u8)
    }

    // 预定义颜色
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const LIGHT_GREY: Color = Color::rgb(211, 211, 211);
    pub const ORANGE_RED: Color = Color::rgb(255, 69, 0);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);
    /// 没有背景时使用的透明填充
    pub const ALPHA: Color = Color::TRANSPARENT;
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// 解析颜色字符串：`#RRGGBB`、`#RRGGBBAA`、`#RGB`、`rgb(r, g, b)`
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            6 | 8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = if hex.len() == 8 {
                    u8::from_str_radix(&hex[6..8], 16).ok()?
                } else {
                    255
                };
                return Some(Color::new(r, g, b, a));
            }
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                return Some(Color::rgb(r, g, b));
            }
            _ => return None,
        }
    }
    if s.starts_with("rgb") {
        let nums: Vec<u8> = s.chars()
            .filter(|c| c.is_ascii_digit() || *c == ',')
            .collect::<String>()
            .split(',')
            .filter_map(|n| n.trim().parse().ok())
            .collect();
        if nums.len() >= 3 {
            return Some(Color::rgb(nums[0], nums[1], nums[2]));
        }
    }
    match s {
        "transparent" => Some(Color::TRANSPARENT),
        "white" => Some(Color::WHITE),
        "black" => Some(Color::BLACK),
        _ => None,
    }
}
