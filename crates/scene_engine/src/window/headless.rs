//! Headless window for tests, CI, and offscreen runs

use super::{WindowEvent, WindowManager};

/// A window that exists only as a framebuffer size and a scripted event
/// queue
///
/// `close_after` bounds the frame loop so tests can run it to completion.
#[derive(Debug)]
pub struct HeadlessWindow {
    width: u32,
    height: u32,
    queued: Vec<WindowEvent>,
    pending: Vec<WindowEvent>,
    remaining_frames: Option<u32>,
}

impl HeadlessWindow {
    /// Create a headless window with the given framebuffer size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            queued: Vec::new(),
            pending: Vec::new(),
            remaining_frames: None,
        }
    }

    /// Queue an event to be delivered on the next `update`
    pub fn queue_event(&mut self, event: WindowEvent) {
        self.queued.push(event);
    }

    /// Signal close after the given number of `update` calls
    pub fn close_after(&mut self, frames: u32) {
        self.remaining_frames = Some(frames);
    }
}

impl WindowManager for HeadlessWindow {
    fn framebuffer_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn update(&mut self) -> bool {
        self.pending.append(&mut self.queued);
        for event in &self.pending {
            if let WindowEvent::FramebufferResize(w, h) = event {
                self.width = *w;
                self.height = *h;
            }
        }
        match &mut self.remaining_frames {
            Some(0) => true,
            Some(n) => {
                *n -= 1;
                false
            }
            None => false,
        }
    }

    fn drain_events(&mut self) -> Vec<WindowEvent> {
        std::mem::take(&mut self.pending)
    }

    fn set_title(&mut self, _title: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_after_counts_updates() {
        let mut window = HeadlessWindow::new(640, 480);
        window.close_after(2);

        assert!(!window.update());
        assert!(!window.update());
        assert!(window.update());
    }

    #[test]
    fn test_queued_events_are_drained_once() {
        let mut window = HeadlessWindow::new(640, 480);
        window.queue_event(WindowEvent::MousePos(10.0, 20.0));

        window.update();
        let events = window.drain_events();
        assert_eq!(events, vec![WindowEvent::MousePos(10.0, 20.0)]);
        assert!(window.drain_events().is_empty());
    }

    #[test]
    fn test_resize_event_updates_framebuffer() {
        let mut window = HeadlessWindow::new(640, 480);
        window.queue_event(WindowEvent::FramebufferResize(800, 600));
        window.update();
        assert_eq!(window.framebuffer_size(), (800, 600));
    }
}
