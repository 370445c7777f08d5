//! Recording drawing backend
//!
//! Captures draw calls as data. Used by tests and by hosts that want to
//! replay or diff frames instead of painting directly.

use glam::Vec2;

use super::{Color, DrawingSurface, TextStyle};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ClearRect { x: f32, y: f32, width: f32, height: f32 },
    Save,
    Restore,
    Translate { x: f32, y: f32 },
    FillCircle { center: Vec2, radius: f32, color: Color },
    StrokeCircle { center: Vec2, radius: f32, color: Color, line_width: f32 },
    FillText { text: String, at: Vec2, style: TextStyle },
}

/// Surface that records every call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
    depth: i32,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Current save/restore nesting (0 when balanced)
    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// Commands since the most recent full clear
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::ClearRect { .. }))
            .unwrap_or(0);
        &self.commands[start..]
    }

    /// Every text drawn, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl DrawingSurface for CommandBuffer {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::ClearRect { x, y, width, height });
    }

    fn save(&mut self) {
        self.depth += 1;
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.depth -= 1;
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Translate { x, y });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, line_width: f32) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color,
            line_width,
        });
    }

    fn fill_text(&mut self, text: &str, at: Vec2, style: TextStyle) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            at,
            style,
        });
    }
}
