use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

/// Two primary presses closer than this form a double click
pub const DOUBLE_CLICK_SECONDS: f32 = 0.3;
/// Maximum pointer travel between the two presses of a double click
pub const DOUBLE_CLICK_DISTANCE: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Gesture produced from raw window input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// Primary drag, pixels
    Rotate { dx: f32, dy: f32 },
    /// Secondary drag, pixels
    Pan { dx: f32, dy: f32 },
    /// Wheel; negative moves toward the target
    Dolly(f32),
    DoubleClick,
}

/// Adapter that turns winit window events into orbit gestures
#[derive(Debug, Clone, Default)]
pub struct WinitInput {
    cursor: Option<(f32, f32)>,
    primary_down: bool,
    secondary_down: bool,
    /// Time and place of the last primary press that could start a double click
    last_press: Option<(f32, (f32, f32))>,
}

impl WinitInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process an event at `now` seconds; events egui consumed must not be passed in
    pub fn process_event(&mut self, event: &WindowEvent, now: f32) -> Option<InputAction> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_moved(position.x as f32, position.y as f32)
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                None
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    MouseButton::Left => PointerButton::Primary,
                    MouseButton::Right => PointerButton::Secondary,
                    _ => return None,
                };
                self.pointer_button(button, *state == ElementState::Pressed, now)
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                self.wheel(y)
            }
            WindowEvent::Focused(false) => {
                self.primary_down = false;
                self.secondary_down = false;
                None
            }
            _ => None,
        }
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) -> Option<InputAction> {
        let previous = self.cursor.replace((x, y));
        let (px, py) = previous?;
        let (dx, dy) = (x - px, y - py);
        if self.primary_down {
            Some(InputAction::Rotate { dx, dy })
        } else if self.secondary_down {
            Some(InputAction::Pan { dx, dy })
        } else {
            None
        }
    }

    pub fn pointer_button(
        &mut self,
        button: PointerButton,
        pressed: bool,
        now: f32,
    ) -> Option<InputAction> {
        match button {
            PointerButton::Secondary => {
                self.secondary_down = pressed;
                None
            }
            PointerButton::Primary => {
                self.primary_down = pressed;
                if !pressed {
                    return None;
                }
                let here = self.cursor.unwrap_or((0.0, 0.0));
                match self.last_press.take() {
                    Some((at, (x, y)))
                        if now - at <= DOUBLE_CLICK_SECONDS
                            && (here.0 - x).hypot(here.1 - y) <= DOUBLE_CLICK_DISTANCE =>
                    {
                        Some(InputAction::DoubleClick)
                    }
                    _ => {
                        self.last_press = Some((now, here));
                        None
                    }
                }
            }
        }
    }

    /// Wheel lines or pixels; positive scrolls away from the user
    pub fn wheel(&mut self, y: f32) -> Option<InputAction> {
        (y != 0.0).then_some(InputAction::Dolly(-y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_drag_rotates() {
        let mut input = WinitInput::new();
        assert_eq!(input.pointer_moved(10.0, 10.0), None);
        input.pointer_button(PointerButton::Primary, true, 0.0);
        assert_eq!(
            input.pointer_moved(15.0, 8.0),
            Some(InputAction::Rotate { dx: 5.0, dy: -2.0 })
        );
        input.pointer_button(PointerButton::Primary, false, 0.1);
        assert_eq!(input.pointer_moved(20.0, 8.0), None);
    }

    #[test]
    fn test_secondary_drag_pans() {
        let mut input = WinitInput::new();
        input.pointer_moved(0.0, 0.0);
        input.pointer_button(PointerButton::Secondary, true, 0.0);
        assert_eq!(input.pointer_moved(3.0, 4.0), Some(InputAction::Pan { dx: 3.0, dy: 4.0 }));
    }

    #[test]
    fn test_wheel_up_dollies_in() {
        let mut input = WinitInput::new();
        assert_eq!(input.wheel(1.0), Some(InputAction::Dolly(-1.0)));
        assert_eq!(input.wheel(0.0), None);
    }

    #[test]
    fn test_double_click() {
        let mut input = WinitInput::new();
        input.pointer_moved(100.0, 100.0);
        assert_eq!(input.pointer_button(PointerButton::Primary, true, 1.0), None);
        input.pointer_button(PointerButton::Primary, false, 1.05);
        input.pointer_moved(102.0, 101.0);
        assert_eq!(
            input.pointer_button(PointerButton::Primary, true, 1.2),
            Some(InputAction::DoubleClick)
        );
        // A third press starts a new pair
        input.pointer_button(PointerButton::Primary, false, 1.25);
        assert_eq!(input.pointer_button(PointerButton::Primary, true, 1.3), None);
    }

    #[test]
    fn test_slow_or_distant_presses_are_not_double_clicks() {
        let mut input = WinitInput::new();
        input.pointer_moved(0.0, 0.0);
        input.pointer_button(PointerButton::Primary, true, 0.0);
        input.pointer_button(PointerButton::Primary, false, 0.1);
        assert_eq!(input.pointer_button(PointerButton::Primary, true, 0.5), None);

        input.pointer_button(PointerButton::Primary, false, 0.55);
        input.pointer_moved(10.0, 0.0);
        assert_eq!(input.pointer_button(PointerButton::Primary, true, 0.6), None);
    }
}
