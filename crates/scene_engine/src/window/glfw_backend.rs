//! GLFW-backed window manager

use super::{WindowError, WindowEvent, WindowManager};
use crate::input::InputCode;

/// Window manager over a GLFW window
///
/// Created with no client API bound; a GPU backend attaches its own
/// surface to the native handle.
pub struct GlfwWindowManager {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    receiver: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    pending: Vec<WindowEvent>,
}

impl GlfwWindowManager {
    /// Create a window with the given title and client-area size
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, WindowError> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|_| WindowError::InitializationFailed)?;

        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        glfw.window_hint(glfw::WindowHint::Resizable(true));

        let (mut window, receiver) = glfw
            .create_window(width, height, title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed)?;

        window.set_key_polling(true);
        window.set_mouse_button_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_close_polling(true);
        window.set_framebuffer_size_polling(true);

        Ok(Self {
            glfw,
            window,
            receiver,
            pending: Vec::new(),
        })
    }

    fn translate(event: glfw::WindowEvent) -> Option<WindowEvent> {
        match event {
            glfw::WindowEvent::Close => Some(WindowEvent::CloseRequested),
            glfw::WindowEvent::FramebufferSize(w, h) => {
                Some(WindowEvent::FramebufferResize(w.max(0) as u32, h.max(0) as u32))
            }
            glfw::WindowEvent::CursorPos(x, y) => Some(WindowEvent::MousePos(x, y)),
            glfw::WindowEvent::Key(key, _, action, _) => {
                let code = key_code(key)?;
                let pressed = match action {
                    glfw::Action::Press => true,
                    glfw::Action::Release => false,
                    glfw::Action::Repeat => return None,
                };
                Some(WindowEvent::Input { code, pressed })
            }
            glfw::WindowEvent::MouseButton(button, action, _) => {
                let code = mouse_code(button)?;
                let pressed = matches!(action, glfw::Action::Press);
                Some(WindowEvent::Input { code, pressed })
            }
            _ => None,
        }
    }
}

fn key_code(key: glfw::Key) -> Option<InputCode> {
    match key {
        glfw::Key::W => Some(InputCode::W),
        glfw::Key::A => Some(InputCode::A),
        glfw::Key::S => Some(InputCode::S),
        glfw::Key::D => Some(InputCode::D),
        glfw::Key::Space => Some(InputCode::Space),
        glfw::Key::Enter => Some(InputCode::Enter),
        glfw::Key::Escape => Some(InputCode::Escape),
        glfw::Key::Up => Some(InputCode::Up),
        glfw::Key::Down => Some(InputCode::Down),
        glfw::Key::Left => Some(InputCode::Left),
        glfw::Key::Right => Some(InputCode::Right),
        _ => None,
    }
}

fn mouse_code(button: glfw::MouseButton) -> Option<InputCode> {
    match button {
        glfw::MouseButton::Button1 => Some(InputCode::MouseLeft),
        glfw::MouseButton::Button2 => Some(InputCode::MouseRight),
        glfw::MouseButton::Button3 => Some(InputCode::MouseMiddle),
        _ => None,
    }
}

impl WindowManager for GlfwWindowManager {
    fn framebuffer_size(&self) -> (u32, u32) {
        let (w, h) = self.window.get_framebuffer_size();
        (w.max(0) as u32, h.max(0) as u32)
    }

    fn update(&mut self) -> bool {
        self.glfw.poll_events();
        for (_, event) in glfw::flush_messages(&self.receiver) {
            if let Some(translated) = Self::translate(event) {
                self.pending.push(translated);
            }
        }
        self.window.should_close()
    }

    fn drain_events(&mut self) -> Vec<WindowEvent> {
        std::mem::take(&mut self.pending)
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }
}
