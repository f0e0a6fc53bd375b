use eframe::egui;
use schema_tree::{Canvas, Point};

const BACKGROUND_COLOR: egui::Color32 = egui::Color32::WHITE;
const LINE_COLOR: egui::Color32 = egui::Color32::BLACK;
const LINE_WIDTH: f32 = 1.0;
const LABEL_COLOR: egui::Color32 = egui::Color32::BLACK;

/// Paints scene primitives onto an egui painter. Scene coordinates are
/// relative to `origin`, the top-left corner of the allocated area.
pub struct EguiCanvas<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
    font: egui::FontId,
}

impl<'a> EguiCanvas<'a> {
    pub fn new(
        painter: &'a egui::Painter,
        origin: egui::Pos2,
        font_size: f32,
    ) -> Self {
        Self {
            painter,
            origin,
            font: egui::FontId::proportional(font_size),
        }
    }

    fn to_screen(&self, point: Point) -> egui::Pos2 {
        to_screen(self.origin, point)
    }
}

impl Canvas for EguiCanvas<'_> {
    fn clear(&mut self) {
        self.painter.rect_filled(
            self.painter.clip_rect(),
            0.0,
            BACKGROUND_COLOR,
        );
    }

    fn line(&mut self, from: Point, to: Point) {
        self.painter.line_segment(
            [self.to_screen(from), self.to_screen(to)],
            egui::Stroke::new(LINE_WIDTH, LINE_COLOR),
        );
    }

    /// Text sits on the point like a baseline, growing rightwards.
    fn label(&mut self, at: Point, text: &str) {
        self.painter.text(
            self.to_screen(at),
            egui::Align2::LEFT_BOTTOM,
            text,
            self.font.clone(),
            LABEL_COLOR,
        );
    }
}

pub fn to_screen(origin: egui::Pos2, point: Point) -> egui::Pos2 {
    egui::pos2(origin.x + point.x, origin.y + point.y)
}

pub fn to_canvas(origin: egui::Pos2, pos: egui::Pos2) -> Point {
    Point::new(pos.x - origin.x, pos.y - origin.y)
}
