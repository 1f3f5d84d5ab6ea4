//! Presenting color buffers
//!
//! The renderer itself never opens a window. Anything that can show or record a
//! finished color buffer implements `Window`, and `run_frames` drives the usual
//! poll, render, present loop against it.

use tracing::trace;

use crate::error::{RenderError, RenderResult};
use crate::geometry::{Dimensions, HasDimensions};
use crate::pixels::ColorBuffer;

pub trait Window: HasDimensions {
    /// Process pending input and window system events
    fn poll_events(&mut self);

    /// Present a finished frame.
    ///
    /// Fails with `DimensionMismatch` if the buffer is not the size of the window.
    fn swap_buffers(&mut self, color: &ColorBuffer) -> RenderResult<()>;

    fn should_close(&self) -> bool;
}

/// Window that keeps the last presented frame in memory.
///
/// Asks to be closed once `frame_limit` frames have been presented, if set.
#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    dimensions: Dimensions,
    frame: Option<ColorBuffer>,
    frames_presented: usize,
    frame_limit: Option<usize>,
}

impl HeadlessWindow {
    pub fn new(width: u32, height: u32) -> HeadlessWindow {
        HeadlessWindow {
            dimensions: Dimensions::new(width, height),
            frame: None,
            frames_presented: 0,
            frame_limit: None,
        }
    }

    #[must_use]
    pub fn with_frame_limit(mut self, limit: usize) -> HeadlessWindow {
        self.frame_limit = Some(limit);
        self
    }

    /// The most recently presented frame, if any
    #[inline]
    pub fn last_frame(&self) -> Option<&ColorBuffer> { self.frame.as_ref() }

    #[inline]
    pub fn frames_presented(&self) -> usize { self.frames_presented }
}

impl HasDimensions for HeadlessWindow {
    #[inline]
    fn dimensions(&self) -> Dimensions { self.dimensions }
}

impl Window for HeadlessWindow {
    fn poll_events(&mut self) {}

    fn swap_buffers(&mut self, color: &ColorBuffer) -> RenderResult<()> {
        let Dimensions { width, height } = self.dimensions;

        if color.width() != width || color.height() != height {
            return Err(RenderError::DimensionMismatch(width, height, color.width(), color.height()));
        }

        match self.frame {
            Some(ref mut frame) => frame.clone_from(color),
            None => self.frame = Some(color.clone()),
        }

        self.frames_presented += 1;

        Ok(())
    }

    fn should_close(&self) -> bool {
        self.frame_limit.map_or(false, |limit| self.frames_presented >= limit)
    }
}

/// Poll, render and present frames until the window asks to close.
///
/// `render` receives the frame number and the color buffer to draw into.
/// Returns the number of frames presented.
pub fn run_frames<W, F>(window: &mut W, color: &mut ColorBuffer, mut render: F) -> RenderResult<usize>
    where W: Window,
          F: FnMut(usize, &mut ColorBuffer) -> RenderResult<()> {
    let mut frame = 0;

    while !window.should_close() {
        window.poll_events();

        render(frame, color)?;

        window.swap_buffers(color)?;

        trace!(frame, "presented frame");

        frame += 1;
    }

    Ok(frame)
}

#[cfg(test)]
mod test {
    use crate::color::ColorRgba;

    use super::*;

    #[test]
    fn test_headless_keeps_last_frame() {
        let mut window = HeadlessWindow::new(2, 2).with_frame_limit(3);
        let mut color = ColorBuffer::new_with(2, 2, ColorRgba::BLACK);

        let frames = run_frames(&mut window, &mut color, |frame, color| {
            color.clear(ColorRgba::new(frame as u8, 0, 0, 255));
            Ok(())
        }).unwrap();

        assert_eq!(frames, 3);
        assert!(window.should_close());
        assert_eq!(window.frames_presented(), 3);
        assert_eq!(window.last_frame().unwrap().at(1, 1).unwrap().r, 2);
    }

    #[test]
    fn test_swap_size_mismatch() {
        let mut window = HeadlessWindow::new(2, 2);
        let color = ColorBuffer::new_with(3, 2, ColorRgba::BLACK);

        assert_eq!(window.swap_buffers(&color).unwrap_err(), RenderError::DimensionMismatch(2, 2, 3, 2));
        assert!(window.last_frame().is_none());
        assert!(!window.should_close());
    }

    #[test]
    fn test_render_error_stops_loop() {
        let mut window = HeadlessWindow::new(1, 1);
        let mut color = ColorBuffer::new_with(1, 1, ColorRgba::BLACK);

        let result = run_frames(&mut window, &mut color, |_, _| Err(RenderError::ZeroW));

        assert_eq!(result.unwrap_err(), RenderError::ZeroW);
        assert_eq!(window.frames_presented(), 0);
    }
}
