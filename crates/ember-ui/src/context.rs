use ember_engine::coords::{Rect, Vec2, Viewport};
use ember_engine::paint::Color;
use ember_engine::scene::{DrawList, Layer};

use crate::font::Font;
use crate::id::UiId;
use crate::input::UiInput;

/// Background colors for the three button states.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ButtonColors {
    pub normal: Color,
    pub hover: Color,
    pub pressed: Color,
}

impl ButtonColors {
    #[inline]
    pub const fn new(normal: Color, hover: Color, pressed: Color) -> Self {
        Self { normal, hover, pressed }
    }
}

impl Default for ButtonColors {
    fn default() -> Self {
        Self::new(Color::grey(0.8), Color::WHITE, Color::grey(0.6))
    }
}

/// Label color of [`Ui::text_button`].
const TEXT_BUTTON_LABEL: Color = Color::grey(0.2);

/// Layer distance between a text button's label and its background.
const TEXT_BUTTON_BACKGROUND_OFFSET: f32 = 0.01;

/// Immediate-mode UI context.
///
/// Holds the hot (hovered) and active (pressed) widget ids across frames,
/// the input snapshot of the current frame, and the draw list every call
/// records into. Widgets have no retained state: each call evaluates its
/// interaction from scratch against the snapshot.
///
/// At most one widget is hot and one is active at any time.
#[derive(Debug)]
pub struct Ui {
    hot: UiId,
    active: UiId,
    input: UiInput,
    draw_list: DrawList,
}

impl Ui {
    pub fn new() -> Self {
        Self {
            hot: UiId::INVALID,
            active: UiId::INVALID,
            input: UiInput::default(),
            draw_list: DrawList::new(),
        }
    }

    /// Starts a frame: stores the input snapshot and clears the draw list.
    ///
    /// Hot and active ids carry over from the previous frame.
    pub fn begin_frame(&mut self, input: UiInput) {
        self.input = input;
        self.draw_list.clear();
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.input.viewport
    }

    #[inline]
    pub fn pointer(&self) -> Option<Vec2> {
        self.input.pointer
    }

    #[inline]
    pub fn hot(&self) -> UiId {
        self.hot
    }

    #[inline]
    pub fn active(&self) -> UiId {
        self.active
    }

    /// Everything recorded since [`begin_frame`](Self::begin_frame).
    #[inline]
    pub fn draw_list(&mut self) -> &mut DrawList {
        &mut self.draw_list
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn rect(&mut self, rect: Rect, color: Color, layer: impl Into<Layer>) {
        self.draw_list.push_rect(layer, rect, color);
    }

    /// Draws `text` with the top edge of its first line at `top_left`.
    ///
    /// Unusable fonts and characters outside the baked range draw nothing.
    pub fn text(
        &mut self,
        text: &str,
        font: &Font,
        color: Color,
        top_left: Vec2,
        layer: impl Into<Layer>,
    ) {
        let Some(texture) = font.texture() else {
            return;
        };
        let quads = font.baked().layout(text, top_left);
        self.draw_list.push_text(layer, texture, color, quads);
    }

    /// Bounding size of `text` in reference units.
    #[inline]
    pub fn measure_text(&self, text: &str, font: &Font) -> Vec2 {
        font.baked().measure(text)
    }

    // ── widgets ───────────────────────────────────────────────────────────

    /// Rectangular button. Returns `true` on the frame the primary button
    /// goes down over it; holding it does not repeat.
    pub fn button(
        &mut self,
        id: UiId,
        rect: Rect,
        colors: ButtonColors,
        layer: impl Into<Layer>,
    ) -> bool {
        let mut clicked = false;
        let mut color = colors.normal;

        let inside = self.input.pointer.is_some_and(|p| rect.contains(p));
        if inside {
            self.hot = id;
            if self.input.primary_down {
                clicked = self.active != id;
                self.active = id;
                color = colors.pressed;
            } else {
                self.active = UiId::INVALID;
                color = colors.hover;
            }
        } else if self.hot == id {
            self.hot = UiId::INVALID;
        }

        self.rect(rect, color, layer);
        clicked
    }

    /// Button sized to its label plus `padding` on every side.
    ///
    /// The background sits just behind `layer`; the label is drawn on it.
    pub fn text_button(
        &mut self,
        id: UiId,
        text: &str,
        font: &Font,
        padding: Vec2,
        top_left: Vec2,
        layer: impl Into<Layer>,
    ) -> bool {
        let layer = layer.into();
        let size = self.measure_text(text, font) + padding * 2.0;
        let rect = Rect::from_top_left_size(top_left, size);

        let clicked = self.button(
            id,
            rect,
            ButtonColors::default(),
            layer.offset(TEXT_BUTTON_BACKGROUND_OFFSET),
        );
        self.text(text, font, TEXT_BUTTON_LABEL, top_left + padding, layer);
        clicked
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_engine::render::FontHandle;
    use ember_engine::scene::DrawCmd;
    use ember_engine::text::{BakedFont, BakedGlyph};

    const VIEWPORT: Viewport = Viewport::new(400.0, 400.0);

    fn input(x: f32, y: f32, down: bool) -> UiInput {
        UiInput { viewport: VIEWPORT, pointer: Some(Vec2::new(x, y)), primary_down: down }
    }

    fn frame(ui: &mut Ui, x: f32, y: f32, down: bool) {
        ui.begin_frame(input(x, y, down));
    }

    fn area() -> Rect {
        Rect::new(10.0, 10.0, 100.0, 40.0)
    }

    /// Every printable char advances 10 units; 8x12 cells, top 9 above baseline.
    fn mono_font(height: f32) -> Font {
        let glyphs = (b' '..=b'~').map(|c| {
            (c as char, BakedGlyph { x0: 1, y0: 1, x1: 9, y1: 13, xoff: 0.0, yoff: -9.0, xadvance: 10.0 })
        });
        Font::from_parts(BakedFont::from_glyphs(height, glyphs), FontHandle::from_index(0))
    }

    fn rect_colors(ui: &mut Ui) -> Vec<Color> {
        ui.draw_list()
            .items()
            .iter()
            .filter_map(|item| match &item.cmd {
                DrawCmd::Rect(r) => Some(r.color),
                _ => None,
            })
            .collect()
    }

    // ── button activation ─────────────────────────────────────────────────

    #[test]
    fn press_triggers_once_while_held() {
        let mut ui = Ui::new();
        let id = UiId::new(1, 0);
        let mut hits = 0;
        for _ in 0..5 {
            frame(&mut ui, 20.0, 20.0, true);
            if ui.button(id, area(), ButtonColors::default(), 0.0) {
                hits += 1;
            }
        }
        assert_eq!(hits, 1);
        assert_eq!(ui.active(), id);
    }

    #[test]
    fn release_then_press_triggers_again() {
        let mut ui = Ui::new();
        let id = UiId::new(1, 0);

        frame(&mut ui, 20.0, 20.0, true);
        assert!(ui.button(id, area(), ButtonColors::default(), 0.0));

        frame(&mut ui, 20.0, 20.0, false);
        assert!(!ui.button(id, area(), ButtonColors::default(), 0.0));
        assert_eq!(ui.active(), UiId::INVALID);

        frame(&mut ui, 20.0, 20.0, true);
        assert!(ui.button(id, area(), ButtonColors::default(), 0.0));
    }

    #[test]
    fn press_outside_does_nothing() {
        let mut ui = Ui::new();
        frame(&mut ui, 300.0, 300.0, true);
        assert!(!ui.button(UiId::new(1, 0), area(), ButtonColors::default(), 0.0));
        assert_eq!(ui.active(), UiId::INVALID);
        assert_eq!(ui.hot(), UiId::INVALID);
    }

    #[test]
    fn edges_are_inside() {
        let mut ui = Ui::new();
        frame(&mut ui, 110.0, 50.0, true);
        assert!(ui.button(UiId::new(1, 0), area(), ButtonColors::default(), 0.0));
    }

    #[test]
    fn no_pointer_is_outside() {
        let mut ui = Ui::new();
        ui.begin_frame(UiInput { viewport: VIEWPORT, pointer: None, primary_down: true });
        assert!(!ui.button(UiId::new(1, 0), area(), ButtonColors::default(), 0.0));
    }

    #[test]
    fn moving_between_buttons_while_held_triggers_new_one() {
        let mut ui = Ui::new();
        let a = UiId::new(1, 0);
        let b = UiId::new(1, 1);
        let rect_b = Rect::new(200.0, 10.0, 100.0, 40.0);

        frame(&mut ui, 20.0, 20.0, true);
        assert!(ui.button(a, area(), ButtonColors::default(), 0.0));
        assert!(!ui.button(b, rect_b, ButtonColors::default(), 0.0));

        frame(&mut ui, 220.0, 20.0, true);
        assert!(!ui.button(a, area(), ButtonColors::default(), 0.0));
        assert!(ui.button(b, rect_b, ButtonColors::default(), 0.0));
        assert_eq!(ui.active(), b);
    }

    // ── hot tracking ──────────────────────────────────────────────────────

    #[test]
    fn hover_sets_and_leaving_clears_hot() {
        let mut ui = Ui::new();
        let id = UiId::new(7, 0);

        frame(&mut ui, 20.0, 20.0, false);
        ui.button(id, area(), ButtonColors::default(), 0.0);
        assert_eq!(ui.hot(), id);

        frame(&mut ui, 300.0, 300.0, false);
        ui.button(id, area(), ButtonColors::default(), 0.0);
        assert_eq!(ui.hot(), UiId::INVALID);
    }

    #[test]
    fn leaving_does_not_clear_another_widgets_hot() {
        let mut ui = Ui::new();
        let a = UiId::new(1, 0);
        let b = UiId::new(2, 0);

        frame(&mut ui, 20.0, 20.0, false);
        ui.button(a, area(), ButtonColors::default(), 0.0);
        ui.button(b, Rect::new(200.0, 200.0, 10.0, 10.0), ButtonColors::default(), 0.0);
        assert_eq!(ui.hot(), a);
    }

    // ── colors ────────────────────────────────────────────────────────────

    #[test]
    fn state_selects_background_color() {
        let colors = ButtonColors::default();
        let mut ui = Ui::new();
        let id = UiId::new(1, 0);

        frame(&mut ui, 300.0, 300.0, false);
        ui.button(id, area(), colors, 0.0);
        assert_eq!(rect_colors(&mut ui), vec![colors.normal]);

        frame(&mut ui, 20.0, 20.0, false);
        ui.button(id, area(), colors, 0.0);
        assert_eq!(rect_colors(&mut ui), vec![colors.hover]);

        frame(&mut ui, 20.0, 20.0, true);
        ui.button(id, area(), colors, 0.0);
        assert_eq!(rect_colors(&mut ui), vec![colors.pressed]);
    }

    // ── text ──────────────────────────────────────────────────────────────

    #[test]
    fn text_button_size_is_label_plus_padding() {
        let font = mono_font(20.0);
        let mut ui = Ui::new();
        frame(&mut ui, 0.0, 0.0, false);

        ui.text_button(UiId::new(1, 0), "Reset", &font, Vec2::new(10.0, 5.0), Vec2::new(50.0, 60.0), 0.0);

        let rect = ui
            .draw_list()
            .items()
            .iter()
            .find_map(|item| match &item.cmd {
                DrawCmd::Rect(r) => Some(r.rect),
                _ => None,
            })
            .unwrap();
        assert_eq!(rect, Rect::new(50.0, 60.0, 70.0, 30.0));
    }

    #[test]
    fn text_button_label_paints_over_background() {
        let font = mono_font(20.0);
        let mut ui = Ui::new();
        frame(&mut ui, 0.0, 0.0, false);
        ui.text_button(UiId::new(1, 0), "Menu", &font, Vec2::new(10.0, 5.0), Vec2::ZERO, -0.06);

        let order: Vec<&'static str> = ui
            .draw_list()
            .iter_in_paint_order()
            .map(|item| match item.cmd {
                DrawCmd::Rect(_) => "rect",
                DrawCmd::Text(_) => "text",
                DrawCmd::Sprite(_) => "sprite",
            })
            .collect();
        assert_eq!(order, vec!["rect", "text"]);
    }

    #[test]
    fn text_button_is_clickable() {
        let font = mono_font(20.0);
        let mut ui = Ui::new();
        frame(&mut ui, 55.0, 65.0, true);
        assert!(ui.text_button(UiId::new(1, 0), "Go", &font, Vec2::new(10.0, 5.0), Vec2::new(50.0, 60.0), 0.0));
    }

    #[test]
    fn unusable_font_draws_nothing() {
        let font = Font::unusable(24.0);
        let mut ui = Ui::new();
        frame(&mut ui, 0.0, 0.0, false);
        ui.text("Game Paused...", &font, Color::WHITE, Vec2::ZERO, 0.0);
        assert!(ui.draw_list().is_empty());
        assert_eq!(ui.measure_text("abc", &font), Vec2::new(0.0, 24.0));
    }

    #[test]
    fn begin_frame_clears_recorded_items() {
        let mut ui = Ui::new();
        frame(&mut ui, 0.0, 0.0, false);
        ui.rect(area(), Color::BLACK, 0.0);
        assert_eq!(ui.draw_list().len(), 1);
        frame(&mut ui, 0.0, 0.0, false);
        assert!(ui.draw_list().is_empty());
    }
}
