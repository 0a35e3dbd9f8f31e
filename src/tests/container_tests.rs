//! 容器测试：摆放、重叠检查、悬停、合成与绘制

use crate::container::DrawTarget;
use crate::{
    Canvas, Color, Container, Context, EventType, GuiError, ImageSource, Placement, Point, Rect,
    Size, Sprite, TextButton, LabelStyle, Widget,
};

fn sprite(w: u32, h: u32, color: Color) -> Sprite {
    Sprite::from_surface(Canvas::filled(w, h, color))
}

fn hover_sprite(w: u32, h: u32) -> Sprite {
    sprite(w, h, Color::RED).with_hover(true)
}

fn update_at(ctx: &mut Context, c: &mut Container, pointer: Point) {
    ctx.set_pointer(pointer);
    ctx.process(Vec::new());
    c.update(ctx).unwrap();
}

/// 测试任意合法百分比的摆放都落在容器内
#[test]
fn test_placement_stays_inside() {
    let c = Container::with_color(0, 0, 200, 100, Color::WHITE);
    let steps = [0.0, 12.5, 25.0, 50.0, 75.0, 99.0, 100.0];
    for &x in &steps {
        for &y in &steps {
            let rect = c.resolve(Size::new(30, 20), &Placement::at(x, y)).unwrap();
            assert!(Rect::new(0, 0, 200, 100).contains_rect(&rect), "{:?} at {}%,{}%", rect, x, y);

            let pct = Placement::at(x, y).with_percent_size(x.max(1.0), y.max(1.0));
            let rect = c.resolve(Size::new(30, 20), &pct).unwrap();
            assert!(Rect::new(0, 0, 200, 100).contains_rect(&rect));
        }
    }
}

/// 测试按剩余空间计算坐标
#[test]
fn test_placement_resolution() {
    let c = Container::with_color(50, 0, 500, 400, Color::WHITE);
    let native = Size::new(100, 50);
    assert_eq!(c.resolve(native, &Placement::at(0.0, 0.0)).unwrap(), Rect::new(0, 0, 100, 50));
    assert_eq!(c.resolve(native, &Placement::at(80.0, 80.0)).unwrap(), Rect::new(320, 280, 100, 50));
    assert_eq!(c.resolve(native, &Placement::at(100.0, 100.0)).unwrap(), Rect::new(400, 350, 100, 50));
    assert_eq!(c.resolve(native, &Placement::at(50.0, 50.0)).unwrap(), Rect::new(200, 175, 100, 50));
}

/// 测试尺寸优先级：像素 > 百分比 > 自身尺寸
#[test]
fn test_placement_size_priority() {
    let c = Container::with_color(0, 0, 500, 400, Color::WHITE);
    let native = Size::new(100, 50);

    let p = Placement::at(0.0, 0.0).with_width(40).with_percent_size(50.0, 50.0);
    assert_eq!(c.resolve(native, &p).unwrap().size(), Size::new(40, 200));

    let p = Placement::at(0.0, 0.0).with_percent_size(10.0, 10.0);
    assert_eq!(c.resolve(native, &p).unwrap().size(), Size::new(50, 40));

    let p = Placement::at(0.0, 0.0).with_height(7);
    assert_eq!(c.resolve(native, &p).unwrap().size(), Size::new(100, 7));
}

/// 测试组件比容器大
#[test]
fn test_add_too_big() {
    let mut ctx = Context::new();
    let mut c = Container::with_color(0, 0, 100, 100, Color::WHITE);
    let err = c.add(&mut ctx, sprite(101, 10, Color::RED), Placement::at(0.0, 0.0)).unwrap_err();
    assert_eq!(err, GuiError::Size { width: 101, height: 10, max_width: 100, max_height: 100 });

    let err = c
        .add(&mut ctx, sprite(10, 10, Color::RED), Placement::at(0.0, 0.0).with_size(10, 200))
        .unwrap_err();
    assert!(matches!(err, GuiError::Size { .. }));
    assert!(c.is_empty());
}

/// 测试百分比超出 0..=100
#[test]
fn test_add_percent_out_of_range() {
    let mut ctx = Context::new();
    let mut c = Container::with_color(0, 0, 100, 100, Color::WHITE);
    for p in [Placement::at(101.0, 0.0), Placement::at(0.0, -1.0)] {
        let err = c.add(&mut ctx, sprite(10, 10, Color::RED), p).unwrap_err();
        assert!(matches!(err, GuiError::Configuration(_)));
    }
}

/// 测试重叠检查，失败时容器和分发器都不变
#[test]
fn test_add_overlap() {
    let mut ctx = Context::new();
    let mut c = Container::with_color(0, 0, 100, 50, Color::WHITE);
    c.add(&mut ctx, sprite(50, 50, Color::RED), Placement::at(0.0, 0.0)).unwrap();

    let clash = sprite(50, 50, Color::BLUE).with_events(vec![EventType::PointerPress]);
    let clash_id = clash.id();
    let err = c.add(&mut ctx, clash, Placement::at(10.0, 0.0)).unwrap_err();
    assert_eq!(
        err,
        GuiError::Overlap { placement: Rect::new(5, 0, 50, 50), existing: Rect::new(0, 0, 50, 50) }
    );
    assert_eq!(c.len(), 1);
    assert!(!ctx.dispatcher().is_registered(clash_id));

    // 共享边界不算重叠
    c.add(&mut ctx, sprite(50, 50, Color::GREEN), Placement::at(100.0, 0.0)).unwrap();

    // 显式允许重叠
    c.add(&mut ctx, sprite(20, 20, Color::BLUE), Placement::at(50.0, 50.0).allow_overlap()).unwrap();
    assert_eq!(c.len(), 3);
}

/// 测试同一组件不能加入两次
#[test]
fn test_add_duplicate_id() {
    let mut ctx = Context::new();
    let mut c = Container::with_color(0, 0, 100, 100, Color::WHITE);
    let s = sprite(10, 10, Color::RED);
    c.add(&mut ctx, s.clone(), Placement::at(0.0, 0.0)).unwrap();
    let err = c.add(&mut ctx, s, Placement::at(100.0, 100.0)).unwrap_err();
    assert!(matches!(err, GuiError::Configuration(_)));
}

/// 测试组件 id 和尺寸只读，放入容器后仍可按 id 找到
#[test]
fn test_widget_identity_is_stable() {
    let mut ctx = Context::new();
    let mut c = Container::with_color(0, 0, 100, 100, Color::WHITE);
    let s = sprite(12, 8, Color::RED).with_hover(true);
    let id = s.id();
    assert_eq!(s.base().id(), id);
    assert_eq!((s.base().width(), s.base().height()), (12, 8));
    c.add(&mut ctx, s, Placement::at(0.0, 0.0)).unwrap();

    // 通过可变引用只能改外观，不能改 id 和尺寸
    let child = c.widget_mut::<Sprite>(id).unwrap();
    child.set_surface(Canvas::filled(30, 30, Color::BLUE));
    assert_eq!(child.size(), Size::new(12, 8));
    assert_eq!(child.surface().size(), Size::new(12, 8));
    assert_eq!(c.ids(), vec![id]);
    assert!(c.get(id).is_some());
}

/// 测试尺寸不同时缓存缩放后的位图
#[test]
fn test_add_caches_resized_surface() {
    let mut ctx = Context::new();
    let mut c = Container::with_color(0, 0, 100, 100, Color::WHITE);
    let small = sprite(10, 10, Color::RED);
    let small_id = small.id();
    let exact = sprite(10, 10, Color::BLUE);
    let exact_id = exact.id();
    c.add(&mut ctx, small, Placement::at(0.0, 0.0).with_size(20, 20)).unwrap();
    c.add(&mut ctx, exact, Placement::at(100.0, 100.0)).unwrap();

    let slot = c.child(small_id).unwrap();
    assert!(slot.needs_resize());
    assert_eq!(slot.cached_surface().size(), Size::new(20, 20));

    let slot = c.child(exact_id).unwrap();
    assert!(!slot.needs_resize());
    assert_eq!(slot.cached_surface().size(), Size::new(10, 10));
    assert_eq!(c.placement_of(exact_id), Some(Rect::new(90, 90, 10, 10)));
}

/// 测试合成结果和重复合成
#[test]
fn test_make_surface_composes_children() {
    let mut ctx = Context::new();
    let mut c = Container::with_color(0, 0, 100, 100, Color::WHITE);
    let s = sprite(10, 10, Color::RED);
    let id = s.id();
    c.add(&mut ctx, s, Placement::at(50.0, 50.0)).unwrap();
    assert_eq!(c.pending_changes(), 1);

    let first = c.make_surface().clone();
    assert_eq!(first.get_pixel(45, 45), Color::RED);
    assert_eq!(first.get_pixel(54, 54), Color::RED);
    assert_eq!(first.get_pixel(44, 45), Color::WHITE);
    assert_eq!(first.get_pixel(55, 55), Color::WHITE);
    assert_eq!(c.pending_changes(), 0);

    // 没有变化时结果不变
    assert_eq!(c.make_surface(), &first);
    assert_eq!(c.get_surface(), first);

    c.widget_mut::<Sprite>(id).unwrap().set_surface(Canvas::filled(10, 10, Color::BLUE));
    assert_eq!(c.pending_changes(), 1);
    assert_eq!(c.make_surface().get_pixel(45, 45), Color::BLUE);
}

/// 测试换成半透明位图时不残留旧像素
#[test]
fn test_make_surface_restores_background() {
    let mut ctx = Context::new();
    let mut c = Container::with_color(0, 0, 40, 40, Color::WHITE);
    let s = sprite(10, 10, Color::RED);
    let id = s.id();
    c.add(&mut ctx, s, Placement::at(0.0, 0.0)).unwrap();
    c.make_surface();

    let mut hole = Canvas::filled(10, 10, Color::GREEN);
    hole.put_pixel(0, 0, Color::TRANSPARENT);
    c.widget_mut::<Sprite>(id).unwrap().set_surface(hole);
    let surface = c.make_surface();
    assert_eq!(surface.get_pixel(0, 0), Color::WHITE);
    assert_eq!(surface.get_pixel(1, 0), Color::GREEN);
}

/// 测试同一时间最多一个组件悬停，重叠时取先加入的
#[test]
fn test_hover_exclusive() {
    let mut ctx = Context::new();
    let mut c = Container::with_color(10, 10, 100, 100, Color::WHITE);
    let a = hover_sprite(50, 50);
    let b = hover_sprite(50, 50);
    let plain = sprite(20, 20, Color::BLUE);
    let (a_id, b_id, plain_id) = (a.id(), b.id(), plain.id());
    c.add(&mut ctx, a, Placement::at(0.0, 0.0)).unwrap();
    c.add(&mut ctx, b, Placement::at(40.0, 40.0).allow_overlap()).unwrap();
    c.add(&mut ctx, plain, Placement::at(100.0, 100.0)).unwrap();
    assert_eq!(c.hoverable(), &[a_id, b_id]);

    let hovered = |c: &Container| -> Vec<bool> {
        [a_id, b_id, plain_id].iter().map(|id| c.get(*id).unwrap().is_hovered()).collect()
    };

    // b 在容器内 (20,20)..(70,70)，与 a 重叠于 (20,20)..(50,50)
    update_at(&mut ctx, &mut c, Point::new(40, 40));
    assert_eq!(hovered(&c), vec![true, false, false]);

    update_at(&mut ctx, &mut c, Point::new(75, 75));
    assert_eq!(hovered(&c), vec![false, true, false]);

    // 不参与悬停的组件
    update_at(&mut ctx, &mut c, Point::new(105, 105));
    assert_eq!(hovered(&c), vec![false, false, false]);

    // 容器外
    update_at(&mut ctx, &mut c, Point::new(5, 5));
    assert_eq!(hovered(&c), vec![false, false, false]);
}

/// 测试隐藏的容器不更新也不绘制
#[test]
fn test_invisible_container() {
    let mut ctx = Context::new();
    let mut c = Container::with_color(0, 0, 50, 50, Color::RED);
    let s = hover_sprite(10, 10);
    let id = s.id();
    c.add(&mut ctx, s, Placement::at(0.0, 0.0)).unwrap();
    c.set_visible(false);

    update_at(&mut ctx, &mut c, Point::new(5, 5));
    assert!(!c.get(id).unwrap().is_hovered());

    let mut screen = Canvas::filled(60, 60, Color::WHITE);
    c.draw(&mut screen);
    assert_eq!(screen.get_pixel(20, 20), Color::WHITE);
}

/// 测试绘制到目标位置和缩放
#[test]
fn test_draw_targets() {
    let mut c = Container::with_color(10, 10, 20, 20, Color::RED);

    let mut screen = Canvas::filled(50, 50, Color::WHITE);
    c.draw(&mut screen);
    assert_eq!(screen.get_pixel(10, 10), Color::RED);
    assert_eq!(screen.get_pixel(29, 29), Color::RED);
    assert_eq!(screen.get_pixel(30, 30), Color::WHITE);

    let mut screen = Canvas::filled(50, 50, Color::WHITE);
    c.draw_to(&mut screen, DrawTarget::At(0, 0));
    assert_eq!(screen.get_pixel(0, 0), Color::RED);
    assert_eq!(screen.get_pixel(20, 20), Color::WHITE);

    let mut screen = Canvas::filled(50, 50, Color::WHITE);
    c.draw_to(&mut screen, DrawTarget::Rect(Rect::new(5, 5, 40, 40)));
    assert_eq!(screen.get_pixel(44, 44), Color::RED);
    assert_eq!(screen.get_pixel(45, 45), Color::WHITE);
    assert_eq!(screen.get_pixel(4, 4), Color::WHITE);

    assert!(c.contains(&Point::new(10, 10)));
    assert!(!c.contains(&Point::new(30, 30)));
}

/// 测试事件登记：放置参数覆盖组件声明
#[test]
fn test_add_registers_events() {
    let mut ctx = Context::new();
    let mut c = Container::with_color(0, 0, 300, 100, Color::WHITE);

    let plain = sprite(10, 10, Color::RED);
    let plain_id = plain.id();
    c.add(&mut ctx, plain, Placement::at(0.0, 0.0)).unwrap();
    assert!(!ctx.dispatcher().is_registered(plain_id));

    let button = TextButton::new(100, 50, "Ok", LabelStyle::new().with_alpha(true), || {}).unwrap();
    let button_id = button.id();
    c.add(&mut ctx, button, Placement::at(50.0, 0.0)).unwrap();
    assert_eq!(ctx.dispatcher().filter(button_id), Some(&[EventType::PointerRelease][..]));

    let custom = sprite(10, 10, Color::RED);
    let custom_id = custom.id();
    c.add(&mut ctx, custom, Placement::at(100.0, 100.0).with_events(vec![EventType::KeyPress]))
        .unwrap();
    assert_eq!(ctx.dispatcher().filter(custom_id), Some(&[EventType::KeyPress][..]));
}

/// 测试移除子组件
#[test]
fn test_remove_widget() {
    let mut ctx = Context::new();
    let mut c = Container::with_color(0, 0, 100, 100, Color::WHITE);
    let s = hover_sprite(10, 10).with_events(vec![EventType::PointerPress]);
    let id = s.id();
    c.add(&mut ctx, s, Placement::at(0.0, 0.0)).unwrap();
    assert_eq!(c.make_surface().get_pixel(0, 0), Color::RED);
    ctx.select(id);

    let removed = c.remove(&mut ctx, id).unwrap();
    assert_eq!(removed.id(), id);
    assert!(c.is_empty());
    assert!(c.hoverable().is_empty());
    assert!(!ctx.dispatcher().is_registered(id));
    assert_eq!(ctx.selected(), None);
    assert_eq!(c.make_surface().get_pixel(0, 0), Color::WHITE);
    assert!(c.remove(&mut ctx, id).is_none());
}

/// 测试容器背景参数
#[test]
fn test_container_backgrounds() {
    let both = Container::new(
        0,
        0,
        10,
        10,
        Some(Color::WHITE),
        Some(ImageSource::from(Canvas::new(2, 2))),
    );
    assert!(matches!(both, Err(GuiError::Configuration(_))));

    let mut clear = Container::new(0, 0, 10, 10, None, None).unwrap();
    assert_eq!(clear.bg_color(), None);
    assert_eq!(clear.make_surface().get_pixel(0, 0), Color::ALPHA);

    let from_image = Container::from_background(5, 6, Canvas::filled(30, 20, Color::GREEN)).unwrap();
    assert_eq!(from_image.get_rect(), Rect::new(5, 6, 30, 20));
}

/// 测试清空容器时取消所有事件登记
#[test]
fn test_clear_unregisters_children() {
    let mut ctx = Context::new();
    let mut c = Container::with_color(0, 0, 100, 100, Color::WHITE);
    let a = hover_sprite(10, 10).with_events(vec![EventType::PointerPress]);
    let b = sprite(10, 10, Color::BLUE).with_events(vec![EventType::KeyPress]);
    let (a_id, b_id) = (a.id(), b.id());
    c.add(&mut ctx, a, Placement::at(0.0, 0.0)).unwrap();
    c.add(&mut ctx, b, Placement::at(100.0, 100.0)).unwrap();
    c.make_surface();
    ctx.select(b_id);

    let removed = c.clear(&mut ctx);
    assert_eq!(removed.len(), 2);
    assert!(c.is_empty());
    assert!(c.hoverable().is_empty());
    assert!(!ctx.dispatcher().is_registered(a_id));
    assert!(!ctx.dispatcher().is_registered(b_id));
    assert_eq!(ctx.selected(), None);
    assert_eq!(c.make_surface().get_pixel(0, 0), Color::WHITE);
    assert_eq!(c.make_surface().get_pixel(95, 95), Color::WHITE);
}

/// 测试重叠的子组件更新时不擦掉兄弟组件，并保持绘制顺序
#[test]
fn test_make_surface_keeps_overlapping_siblings() {
    let mut ctx = Context::new();
    let mut c = Container::with_color(0, 0, 40, 40, Color::WHITE);
    let a = sprite(20, 20, Color::RED);
    let b = sprite(20, 20, Color::BLUE);
    let (a_id, b_id) = (a.id(), b.id());
    c.add(&mut ctx, a, Placement::at(0.0, 0.0)).unwrap();
    c.add(&mut ctx, b, Placement::at(50.0, 50.0).allow_overlap()).unwrap();
    let surface = c.make_surface();
    assert_eq!(surface.get_pixel(5, 5), Color::RED);
    assert_eq!(surface.get_pixel(15, 15), Color::BLUE);

    // 下层组件变透明，上层组件的重叠部分保留
    c.widget_mut::<Sprite>(a_id).unwrap().set_surface(Canvas::filled(20, 20, Color::TRANSPARENT));
    let surface = c.make_surface();
    assert_eq!(surface.get_pixel(5, 5), Color::WHITE);
    assert_eq!(surface.get_pixel(15, 15), Color::BLUE);
    assert_eq!(surface.get_pixel(25, 25), Color::BLUE);

    // 上层组件变透明，下层组件重新露出
    c.widget_mut::<Sprite>(a_id).unwrap().set_surface(Canvas::filled(20, 20, Color::GREEN));
    c.widget_mut::<Sprite>(b_id).unwrap().set_surface(Canvas::filled(20, 20, Color::TRANSPARENT));
    let surface = c.make_surface();
    assert_eq!(surface.get_pixel(15, 15), Color::GREEN);
    assert_eq!(surface.get_pixel(25, 25), Color::WHITE);
}
