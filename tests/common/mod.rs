#![allow(dead_code)]

use std::io;

use crossterm::style::Color;

use bullet_hell::display::{Canvas, FontSize, Label};
use bullet_hell::entities::{InputEvent, Rect};
use bullet_hell::game::{InputSource, Pacer};

/// Pretend font: every glyph is 6×8 logical pixels.
pub const GLYPH_WIDTH: i32 = 6;
pub const GLYPH_HEIGHT: i32 = 8;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear(Color),
    Fill(Rect, Color),
    Text(Label),
}

/// Canvas that remembers the draw calls of the frame being built and keeps
/// every presented frame.
#[derive(Default)]
pub struct RecordingCanvas {
    pub pending: Vec<DrawOp>,
    pub frames: Vec<Vec<DrawOp>>,
}

impl RecordingCanvas {
    pub fn last_frame(&self) -> &[DrawOp] {
        self.frames.last().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn texts(frame: &[DrawOp]) -> Vec<&Label> {
        frame
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(label) => Some(label),
                _ => None,
            })
            .collect()
    }

    pub fn fills(frame: &[DrawOp]) -> Vec<(Rect, Color)> {
        frame
            .iter()
            .filter_map(|op| match op {
                DrawOp::Fill(rect, color) => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, color: Color) {
        self.pending.clear();
        self.pending.push(DrawOp::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.pending.push(DrawOp::Fill(rect, color));
    }

    fn render_text(&self, text: &str, color: Color, size: FontSize) -> Label {
        Label {
            text: text.to_string(),
            color,
            size,
            rect: Rect::new(0, 0, text.chars().count() as i32 * GLYPH_WIDTH, GLYPH_HEIGHT),
        }
    }

    fn blit_text(&mut self, label: &Label) {
        self.pending.push(DrawOp::Text(label.clone()));
    }

    fn present(&mut self) -> io::Result<()> {
        self.frames.push(std::mem::take(&mut self.pending));
        Ok(())
    }
}

/// Hands out one batch of events per frame, then `Close` forever.
pub struct ScriptedInput {
    frames: std::vec::IntoIter<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new(frames: Vec<Vec<InputEvent>>) -> Self {
        ScriptedInput {
            frames: frames.into_iter(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.frames.next().unwrap_or_else(|| vec![InputEvent::Close])
    }
}

/// Records requested frame rates instead of sleeping.
#[derive(Default)]
pub struct RecordingPacer {
    pub waits: Vec<u32>,
}

impl Pacer for RecordingPacer {
    fn wait(&mut self, fps: u32) {
        self.waits.push(fps);
    }
}
