use eframe::egui::{Event, InputState, Key, Rect, Vec2};

use super::interaction::{InputEvent, KeyCode};
use super::render_utils::screen_to_surface;

/// Translates this frame's egui input into surface events.
///
/// Ctrl has no key event of its own in egui, so it is reported on
/// modifier transitions tracked in `ctrl_down`.
pub(super) fn collect_input_events(
    input: &InputState,
    surface: Rect,
    ctrl_down: &mut bool,
) -> Vec<InputEvent> {
    let mut events = Vec::new();

    if input.modifiers.ctrl != *ctrl_down {
        *ctrl_down = input.modifiers.ctrl;
        events.push(if *ctrl_down {
            InputEvent::KeyDown(KeyCode::Control)
        } else {
            InputEvent::KeyUp(KeyCode::Control)
        });
    }

    for event in &input.events {
        let Event::Key {
            key,
            pressed,
            repeat,
            ..
        } = event
        else {
            continue;
        };
        let code = match key {
            Key::Delete => KeyCode::Delete,
            Key::Backspace => KeyCode::Backspace,
            _ => continue,
        };
        if *repeat {
            continue;
        }
        events.push(if *pressed {
            InputEvent::KeyDown(code)
        } else {
            InputEvent::KeyUp(code)
        });
    }

    let pointer = input.pointer.interact_pos();
    if input.pointer.primary_pressed() {
        if let Some(position) = pointer.filter(|position| surface.contains(*position)) {
            events.push(InputEvent::PointerDown {
                position: screen_to_surface(surface, position),
                ctrl: input.modifiers.ctrl,
            });
        }
    } else if input.pointer.primary_down() && input.pointer.delta() != Vec2::ZERO {
        if let Some(position) = pointer {
            events.push(InputEvent::PointerMove {
                position: screen_to_surface(surface, position),
            });
        }
    }

    if input.pointer.primary_released() {
        events.push(InputEvent::PointerUp);
    }

    events
}

#[cfg(test)]
mod tests {
    use eframe::egui::{Context, Modifiers, PointerButton, Pos2, RawInput, pos2, vec2};

    use super::*;

    fn surface() -> Rect {
        Rect::from_min_size(pos2(50.0, 50.0), vec2(300.0, 300.0))
    }

    fn frame(ctx: &Context, raw: RawInput, ctrl_down: &mut bool) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let _ = ctx.run(raw, |ctx| {
            events.extend(ctx.input(|input| collect_input_events(input, surface(), ctrl_down)));
        });
        events
    }

    fn with_events(events: Vec<Event>) -> RawInput {
        RawInput {
            events,
            ..RawInput::default()
        }
    }

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::default(),
        }
    }

    fn key(key: Key, pressed: bool, repeat: bool) -> Event {
        Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat,
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn test_ctrl_reported_on_modifier_transitions() {
        let ctx = Context::default();
        let mut ctrl_down = false;
        let held = |ctrl| RawInput {
            modifiers: Modifiers {
                ctrl,
                ..Modifiers::default()
            },
            ..RawInput::default()
        };

        assert_eq!(frame(&ctx, held(true), &mut ctrl_down), vec![InputEvent::KeyDown(
            KeyCode::Control
        )]);
        assert!(ctrl_down);
        assert!(frame(&ctx, held(true), &mut ctrl_down).is_empty());
        assert_eq!(frame(&ctx, held(false), &mut ctrl_down), vec![InputEvent::KeyUp(
            KeyCode::Control
        )]);
        assert!(!ctrl_down);
    }

    #[test]
    fn test_repeats_and_unmapped_keys_are_dropped() {
        let ctx = Context::default();
        let mut ctrl_down = false;

        let first = frame(
            &ctx,
            with_events(vec![key(Key::Delete, true, false)]),
            &mut ctrl_down,
        );
        assert_eq!(first, vec![InputEvent::KeyDown(KeyCode::Delete)]);

        let held = frame(
            &ctx,
            with_events(vec![
                key(Key::Delete, true, true),
                key(Key::Enter, true, false),
                key(Key::Backspace, true, false),
            ]),
            &mut ctrl_down,
        );
        assert_eq!(held, vec![InputEvent::KeyDown(KeyCode::Backspace)]);

        let released = frame(
            &ctx,
            with_events(vec![key(Key::Delete, false, false)]),
            &mut ctrl_down,
        );
        assert_eq!(released, vec![InputEvent::KeyUp(KeyCode::Delete)]);
    }

    #[test]
    fn test_press_drag_release_in_surface_coordinates() {
        let ctx = Context::default();
        let mut ctrl_down = false;

        let pressed = frame(
            &ctx,
            with_events(vec![
                Event::PointerMoved(pos2(60.0, 70.0)),
                button(pos2(60.0, 70.0), true),
            ]),
            &mut ctrl_down,
        );
        assert_eq!(pressed, vec![InputEvent::PointerDown {
            position: vec2(10.0, 20.0),
            ctrl: false,
        }]);

        let moved = frame(
            &ctx,
            with_events(vec![Event::PointerMoved(pos2(100.0, 120.0))]),
            &mut ctrl_down,
        );
        assert_eq!(moved, vec![InputEvent::PointerMove {
            position: vec2(50.0, 70.0),
        }]);

        let released = frame(
            &ctx,
            with_events(vec![button(pos2(100.0, 120.0), false)]),
            &mut ctrl_down,
        );
        assert_eq!(released, vec![InputEvent::PointerUp]);
    }

    #[test]
    fn test_press_outside_surface_is_dropped() {
        let ctx = Context::default();
        let mut ctrl_down = false;

        let pressed = frame(
            &ctx,
            with_events(vec![
                Event::PointerMoved(pos2(400.0, 400.0)),
                button(pos2(400.0, 400.0), true),
            ]),
            &mut ctrl_down,
        );
        assert!(pressed.is_empty());
    }

    #[test]
    fn test_hover_move_without_button_is_ignored() {
        let ctx = Context::default();
        let mut ctrl_down = false;

        frame(
            &ctx,
            with_events(vec![Event::PointerMoved(pos2(60.0, 60.0))]),
            &mut ctrl_down,
        );
        let moved = frame(
            &ctx,
            with_events(vec![Event::PointerMoved(pos2(120.0, 140.0))]),
            &mut ctrl_down,
        );
        assert!(moved.is_empty());
    }
}
