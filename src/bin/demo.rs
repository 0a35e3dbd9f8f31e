//! 组件库演示程序
//!
//! 用法：mini-gui-demo [gui.json]

use mini_gui::config::GuiConfig;
use mini_gui::host::{present_to_buffer, translate_window_event, HeldKeys};
use mini_gui::{
    Canvas, Color, Container, Context, Event, ImageButton, ImageSource, InputField, InputStyle, Key, Label,
    LabelStyle, Placement, Point, TextButton,
};
use std::num::NonZeroU32;
use std::path::Path;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

struct DemoWindow {
    config: GuiConfig,
    window: Option<Arc<Window>>,
    surface: Option<softbuffer::Surface<Arc<Window>, Arc<Window>>>,
    screen: Canvas,
    clear: Color,
    ctx: Context,
    entities: Vec<Container>,
    pending: Vec<Event>,
    held: HeldKeys,
    pointer: Point,
    scale_factor: f64,
}

/// 生成一个简单的图标位图
fn icon(size: u32, fill: Color, border: Color) -> Canvas {
    let mut canvas = Canvas::filled(size, size, border);
    canvas.fill_rect(&mini_gui::Rect::new(3, 3, size - 6, size - 6), fill);
    canvas
}

/// 优先使用资源目录下的图片，不存在时用生成的图标
fn asset_or(config: &GuiConfig, name: &str, fallback: Canvas) -> ImageSource {
    let src = ImageSource::Segments(vec![config.asset_dir.clone(), "button".to_string(), name.to_string()]);
    match src.load(true) {
        Ok(canvas) => ImageSource::Canvas(canvas),
        Err(e) => {
            tracing::debug!(error = %e, "using generated icon");
            ImageSource::Canvas(fallback)
        }
    }
}

fn build_scene(config: &GuiConfig, ctx: &mut Context) -> mini_gui::Result<Vec<Container>> {
    let face = config.typeface();
    let theme = &config.theme;
    let panel = GuiConfig::color(&theme.panel_color)?;
    let text = GuiConfig::color(&theme.text_color)?;
    let accent = GuiConfig::color(&theme.accent_color)?;

    let base_style = LabelStyle::new()
        .with_face(face)
        .with_font_size(config.font_size)
        .with_fg_color(text);

    let mut c = Container::with_color(50, 0, 500, 400, panel);

    let title = Label::new(
        200,
        50,
        "Hello World!",
        base_style.clone().with_bg_color(panel.darken(0.1)).with_offset(25, 0),
    )?;
    c.add(ctx, title, Placement::at(50.0, 16.0))?;

    let button = TextButton::new(
        100,
        50,
        "World",
        base_style.clone().with_alpha(true).with_fg_color(accent),
        || println!("Hello"),
    )?;
    c.add(ctx, button, Placement::at(80.0, 80.0))?;

    let like = ImageButton::from_image(
        asset_or(config, "like.png", icon(48, Color::from_hex(0x3B5998), Color::WHITE)),
        Some(asset_or(config, "like_hover.png", icon(48, Color::from_hex(0x8B9DC3), Color::WHITE))),
        || println!("Like"),
    )?;
    c.add(ctx, like, Placement::at(0.0, 100.0))?;

    let input = InputField::new(
        220,
        40,
        InputStyle::new(base_style.with_bg_color(Color::WHITE)).with_max_width(210),
    )?;
    c.add(ctx, input, Placement::at(50.0, 45.0))?;

    Ok(vec![c])
}

impl DemoWindow {
    fn new(config: GuiConfig) -> mini_gui::Result<Self> {
        let mut ctx = Context::new();
        let entities = build_scene(&config, &mut ctx)?;
        let clear = GuiConfig::color(&config.theme.clear_color)?;
        let screen = Canvas::filled(config.window.width, config.window.height, clear);
        Ok(Self {
            config,
            window: None,
            surface: None,
            screen,
            clear,
            ctx,
            entities,
            pending: Vec::new(),
            held: HeldKeys::new(),
            pointer: Point::default(),
            scale_factor: 1.0,
        })
    }

    /// 退出前清空容器，取消所有登记
    fn shutdown(&mut self) {
        for entity in &mut self.entities {
            entity.clear(&mut self.ctx);
        }
        self.entities.clear();
    }

    /// 一帧：分发事件 -> 更新 -> 绘制。返回 false 表示退出
    fn frame(&mut self) -> bool {
        let events = std::mem::take(&mut self.pending);
        let quit = events.iter().any(|e| *e == Event::Quit || *e == Event::KeyPress { key: Key::Escape });
        self.ctx.set_pointer(self.pointer);
        self.ctx.set_held_keys(self.held.snapshot());
        self.ctx.process(events);
        if quit {
            self.shutdown();
            return false;
        }

        for entity in &mut self.entities {
            if let Err(e) = entity.update(&mut self.ctx) {
                tracing::error!(error = %e, "update failed, frame aborted");
                return true;
            }
        }

        self.screen.fill(self.clear);
        for entity in &mut self.entities {
            entity.draw(&mut self.screen);
        }
        self.present();
        true
    }

    fn present(&mut self) {
        if let (Some(window), Some(surface)) = (&self.window, &mut self.surface) {
            let size = window.inner_size();
            if let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
                surface.resize(w, h).ok();
                if let Ok(mut buffer) = surface.buffer_mut() {
                    let scaled;
                    let canvas = if size.width != self.screen.width() || size.height != self.screen.height() {
                        scaled = self.screen.scaled(size.width, size.height);
                        &scaled
                    } else {
                        &self.screen
                    };
                    present_to_buffer(&mut buffer, size.width, size.height, canvas, self.clear);
                    buffer.present().ok();
                }
            }
        }
    }
}

impl ApplicationHandler for DemoWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(self.config.window.width, self.config.window.height))
            .with_resizable(false);

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!(error = %e, "failed to create window");
                event_loop.exit();
                return;
            }
        };
        self.scale_factor = window.scale_factor();

        let surface = softbuffer::Context::new(window.clone())
            .and_then(|context| softbuffer::Surface::new(&context, window.clone()));
        match surface {
            Ok(surface) => self.surface = Some(surface),
            Err(e) => {
                tracing::error!(error = %e, "failed to create softbuffer surface");
                event_loop.exit();
                return;
            }
        }
        self.window = Some(window);
        tracing::info!("demo ready");
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let WindowEvent::RedrawRequested = event {
            if !self.frame() {
                event_loop.exit();
            }
            return;
        }
        self.held.observe(&event);
        if let Some(e) = translate_window_event(&event, &mut self.pointer, self.scale_factor) {
            self.pending.push(e);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => GuiConfig::load(Path::new(&path))?,
        None => GuiConfig::default(),
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = DemoWindow::new(config)?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
