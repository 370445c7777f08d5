//! HTML canvas backend for the seat map renderer

use glam::Vec2;
use std::f64::consts::TAU;
use web_sys::CanvasRenderingContext2d;

use crate::renderer::{Color, DrawingSurface, TextStyle};

impl DrawingSurface for CanvasRenderingContext2d {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        CanvasRenderingContext2d::clear_rect(self, x as f64, y as f64, width as f64, height as f64);
    }

    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn translate(&mut self, x: f32, y: f32) {
        if let Err(e) = CanvasRenderingContext2d::translate(self, x as f64, y as f64) {
            log::warn!("Canvas translate failed: {e:?}");
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.begin_path();
        if let Err(e) = self.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU) {
            log::warn!("Canvas arc failed: {e:?}");
        }
        self.set_fill_style_str(&color.to_css());
        self.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, line_width: f32) {
        self.begin_path();
        if let Err(e) = self.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU) {
            log::warn!("Canvas arc failed: {e:?}");
        }
        self.set_stroke_style_str(&color.to_css());
        self.set_line_width(line_width as f64);
        self.stroke();
    }

    fn fill_text(&mut self, text: &str, at: Vec2, style: TextStyle) {
        self.set_fill_style_str(&style.color.to_css());
        self.set_font(style.font);
        self.set_text_align(style.align.as_str());
        self.set_text_baseline("middle");
        if let Err(e) = CanvasRenderingContext2d::fill_text(self, text, at.x as f64, at.y as f64) {
            log::warn!("Canvas fill_text failed: {e:?}");
        }
    }
}
