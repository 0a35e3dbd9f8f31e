//! 事件分发器与上下文测试

use crate::{Context, Dispatcher, Event, EventType, Key, Point, WidgetId};

/// 测试按登记类型过滤并保持顺序
#[test]
fn test_events_for_filters_in_order() {
    let mut dispatcher = Dispatcher::new();
    let button = WidgetId::new();
    let input = WidgetId::new();
    dispatcher.register(button, vec![EventType::PointerRelease]);
    dispatcher.register(input, vec![EventType::KeyPress, EventType::PointerPress]);

    dispatcher.process(vec![
        Event::key('a'),
        Event::click(1, 1),
        Event::release(2, 2),
        Event::key('b'),
        Event::Quit,
    ]);

    let for_button = dispatcher.events_for(button);
    assert_eq!(for_button, vec![&Event::release(2, 2)]);

    let for_input: Vec<Event> = dispatcher.events_for(input).into_iter().cloned().collect();
    assert_eq!(for_input, vec![Event::key('a'), Event::click(1, 1), Event::key('b')]);
}

/// 测试未登记的组件拿到空列表
#[test]
fn test_unregistered_widget_gets_nothing() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.process(vec![Event::release(0, 0)]);
    assert!(dispatcher.events_for(WidgetId::new()).is_empty());

    let id = WidgetId::new();
    dispatcher.register(id, vec![EventType::PointerRelease]);
    assert!(dispatcher.unregister(id));
    assert!(!dispatcher.is_registered(id));
    assert!(dispatcher.events_for(id).is_empty());
}

/// 测试每帧替换事件，不跨帧保留
#[test]
fn test_process_replaces_batch() {
    let mut dispatcher = Dispatcher::new();
    let id = WidgetId::new();
    dispatcher.register(id, vec![EventType::KeyPress]);

    dispatcher.process(vec![Event::key('x')]);
    assert_eq!(dispatcher.events_for(id).len(), 1);

    dispatcher.process(Vec::new());
    assert!(dispatcher.events_for(id).is_empty());
    assert!(dispatcher.events().is_empty());
}

/// 测试上下文从事件中刷新指针位置
#[test]
fn test_context_tracks_pointer() {
    let mut ctx = Context::new();
    ctx.set_pointer(Point::new(5, 5));
    ctx.process(vec![Event::PointerMotion { pos: Point::new(10, 20) }, Event::release(30, 40), Event::key('k')]);
    assert_eq!(ctx.pointer(), Point::new(30, 40));
    assert_eq!(ctx.frame(), 1);

    // 没有带坐标的事件时保持不变
    ctx.process(vec![Event::key('k')]);
    assert_eq!(ctx.pointer(), Point::new(30, 40));
    assert_eq!(ctx.frame(), 2);
}

/// 测试同一时间只有一个选中组件
#[test]
fn test_context_single_selection() {
    let mut ctx = Context::new();
    let a = WidgetId::new();
    let b = WidgetId::new();
    ctx.select(a);
    assert!(ctx.is_selected(a));
    ctx.select(b);
    assert!(!ctx.is_selected(a));
    assert_eq!(ctx.selected(), Some(b));
    ctx.clear_selection();
    assert_eq!(ctx.selected(), None);
}

/// 测试按住按键快照
#[test]
fn test_context_held_keys() {
    let mut ctx = Context::new();
    ctx.set_held_keys(vec![Key::Escape]);
    assert!(ctx.is_held(&Key::Escape));
    assert!(!ctx.is_held(&Key::Enter));
}

/// 测试按住按键的记录：重复按下只记一次，松开移除，快照交给上下文
#[test]
fn test_held_keys_snapshot_feeds_context() {
    use crate::host::HeldKeys;

    let mut held = HeldKeys::new();
    held.press(Key::Char('w'));
    held.press(Key::Char('w'));
    held.press(Key::Escape);
    assert_eq!(held.snapshot(), vec![Key::Char('w'), Key::Escape]);

    let mut ctx = Context::new();
    ctx.set_held_keys(held.snapshot());
    assert!(ctx.is_held(&Key::Char('w')));

    held.release(&Key::Char('w'));
    assert!(!held.is_held(&Key::Char('w')));
    ctx.set_held_keys(held.snapshot());
    assert_eq!(ctx.held_keys(), &[Key::Escape]);

    held.clear();
    assert!(held.snapshot().is_empty());
}
