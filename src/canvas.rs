//! Canvas 画布模块 - 组件和容器使用的像素位图

use crate::error::{GuiError, Result};
use crate::{Color, Point, Rect, Size};
use std::path::Path;

/// 画布 - RGBA 像素缓冲
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Canvas {
    /// 创建全透明画布
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    /// 创建纯色画布
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width * height) as usize],
        }
    }

    /// 从 RGBA 字节数据创建，数据不足时返回 None
    pub fn from_rgba(data: &[u8], width: u32, height: u32) -> Option<Self> {
        let expected = (width * height * 4) as usize;
        if data.len() < expected {
            return None;
        }
        let pixels = data[..expected]
            .chunks_exact(4)
            .map(|c| Color::new(c[0], c[1], c[2], c[3]))
            .collect();
        Some(Self { width, height, pixels })
    }

    /// 从图片文件加载
    pub fn load(path: &Path) -> Result<Self> {
        let asset_err = |reason: String| GuiError::Asset { path: path.display().to_string(), reason };
        let rgba = image::open(path).map_err(|e| asset_err(e.to_string()))?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(rgba.as_raw(), width, height)
            .ok_or_else(|| asset_err("truncated pixel data".to_string()))
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_size(self.size())
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// 整张画布填充同一颜色
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// 去掉所有像素的透明度
    pub fn make_opaque(&mut self) {
        for p in &mut self.pixels {
            *p = p.opaque();
        }
    }

    /// 坐标越界时返回 None
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    /// 越界返回透明色
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        i32::try_from(x)
            .ok()
            .zip(i32::try_from(y).ok())
            .and_then(|(x, y)| self.index(x, y))
            .map_or(Color::TRANSPARENT, |idx| self.pixels[idx])
    }

    /// 按 alpha 混合写入像素
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color.blend(&self.pixels[idx]);
        }
    }

    /// 直接写入像素，不做混合
    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color;
        }
    }

    /// 用纯色填充矩形（会裁剪到画布内）
    pub fn fill_rect(&mut self, rect: &Rect, color: Color) {
        let Some(area) = rect.intersection(&self.rect()) else { return };
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// 把 src 混合绘制到 (x, y)
    pub fn blit(&mut self, src: &Canvas, x: i32, y: i32) {
        self.blit_region(src, &src.rect(), Point::new(x, y));
    }

    /// 把 src 的一部分混合绘制到 dest 位置
    pub fn blit_region(&mut self, src: &Canvas, area: &Rect, dest: Point) {
        let Some(area) = area.intersection(&src.rect()) else { return };
        for sy in area.top()..area.bottom() {
            let dy = dest.y + (sy - area.y);
            if dy < 0 || dy >= self.height as i32 {
                continue;
            }
            for sx in area.left()..area.right() {
                let dx = dest.x + (sx - area.x);
                self.set_pixel(dx, dy, src.get_pixel(sx as u32, sy as u32));
            }
        }
    }

    /// 用 src 同位置的像素覆盖 rect 区域（不混合），用于恢复背景
    pub fn copy_region(&mut self, src: &Canvas, rect: &Rect) {
        let Some(area) = rect.intersection(&self.rect()) else { return };
        let Some(area) = area.intersection(&src.rect()) else { return };
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                self.put_pixel(x, y, src.get_pixel(x as u32, y as u32));
            }
        }
    }

    /// 最近邻缩放，返回新画布
    pub fn scaled(&self, width: u32, height: u32) -> Canvas {
        if width == self.width && height == self.height {
            return self.clone();
        }
        let mut out = Canvas::new(width, height);
        if self.width == 0 || self.height == 0 {
            return out;
        }
        for y in 0..height {
            let sy = ((y as u64 * self.height as u64) / height as u64) as u32;
            for x in 0..width {
                let sx = ((x as u64 * self.width as u64) / width as u64) as u32;
                out.pixels[(y * width + x) as usize] = self.get_pixel(sx, sy);
            }
        }
        out
    }

    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| [p.r, p.g, p.b, p.a]).collect()
    }

    /// 按扩展名推断格式保存，一般用 .png
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let asset_err = |reason: String| GuiError::Asset { path: path.display().to_string(), reason };
        let img = image::RgbaImage::from_raw(self.width, self.height, self.to_rgba())
            .ok_or_else(|| asset_err("pixel buffer size mismatch".to_string()))?;
        img.save(path).map_err(|e| asset_err(e.to_string()))
    }
}
