use ember_engine::core::{App, AppControl, FrameCtx};
use ember_engine::input::Key;
use ember_engine::math::{Mat4, Vec3, Vec4};
use ember_engine::render::{AtlasHandle, Sprite, SpriteHandle};
use ember_ui::prelude::*;

use crate::assets;
use crate::game::{Cell, Game, PAUSE_TEXT};

const CLEAR: Color = Color::BLACK;
const WHITE: Color = Color::WHITE;

/// Mark colors, indexed by player.
const MARK: [Color; 2] = [
    Color::from_premul(1.0, 0.4, 0.5, 1.0),
    Color::from_premul(0.5, 0.4, 1.0, 1.0),
];
/// Hover highlight and mark-count colors, indexed by player.
const HIGHLIGHT: [Color; 2] = [
    Color::from_premul(1.0, 0.7, 0.7, 1.0),
    Color::from_premul(0.7, 0.7, 1.0, 1.0),
];

const BUTTON_PADDING: Vec2 = Vec2::new(10.0, 5.0);
const BOARD_MARGIN: f32 = 50.0;
/// Fraction of a cell covered by its mark.
const SPRITE_FILL: f32 = 0.8;

const SPRITE_LAYER: f32 = -0.01;
const OVERLAY_LAYER: f32 = -0.02;
const OVERLAY_TEXT_LAYER: f32 = -0.03;
const OVERLAY_BUTTON_LAYER: f32 = -0.06;

/// GPU resources created in `init`.
struct Marks {
    atlas: AtlasHandle,
    cross: SpriteHandle,
    circle: SpriteHandle,
}

/// Board geometry in reference units for the current frame.
#[derive(Debug, Copy, Clone)]
struct Layout {
    viewport: Viewport,
    board: f32,
    cell: f32,
}

impl Layout {
    fn new(viewport: Viewport) -> Self {
        let board = viewport.height - 2.0 * BOARD_MARGIN;
        Self { viewport, board, cell: board / 3.0 }
    }

    fn left(&self) -> f32 {
        (self.viewport.width - self.board) / 2.0
    }

    /// Cell `index` (row-major, row 0 at the bottom).
    fn cell_rect(&self, index: usize) -> Rect {
        let (row, col) = ((index / 3) as f32, (index % 3) as f32);
        let y = self.viewport.height - (row + 1.0) * self.cell - BOARD_MARGIN;
        Rect::new(col * self.cell + self.left(), y, self.cell, self.cell)
    }

    fn board_rect(&self) -> Rect {
        Rect::new(
            self.left(),
            self.viewport.height - self.board - BOARD_MARGIN,
            self.board,
            self.board,
        )
    }

    /// NDC transform for the mark in cell `index`. The board is centered,
    /// so the middle cell sits at the origin.
    fn mark_transform(&self, index: usize) -> Mat4 {
        let vp = self.viewport;
        let (row, col) = ((index / 3) as f32, (index % 3) as f32);
        let x = 2.0 * (col - 1.0) * self.cell / vp.width;
        let y = 2.0 * (row - 1.0) * self.cell / vp.height;

        let sy = 2.0 * self.cell / vp.height * SPRITE_FILL;
        let sx = sy * vp.height / vp.width;

        let mut m = Mat4::scaling(Vec3::new(sx, sy, 1.0));
        m.translate(Vec3::new(x, y, 0.0));
        m
    }
}

pub struct TicTacToe {
    game: Game,
    ui: Ui,
    font: Font,
    marks: Option<Marks>,
}

impl TicTacToe {
    pub fn new() -> Self {
        Self {
            game: Game::new(),
            ui: Ui::new(),
            font: Font::unusable(assets::FONT_HEIGHT),
            marks: None,
        }
    }

    fn draw_menu(&mut self) {
        let vp = self.ui.viewport();

        let title = "Tic Tac Toe";
        let size = self.ui.measure_text(title, &self.font);
        let pos = Vec2::new((vp.width - size.x) / 2.0, 10.0);
        self.ui.text(title, &self.font, WHITE, pos, 0.0);

        let label = "Play";
        let size = self.ui.measure_text(label, &self.font);
        let pos = Vec2::new(
            (vp.width - size.x - 2.0 * BUTTON_PADDING.x) / 2.0,
            (vp.height - size.y) / 2.0 - BUTTON_PADDING.y,
        );
        if self.ui.text_button(ui_id!(), label, &self.font, BUTTON_PADDING, pos, 0.0) {
            self.game.start();
        }
    }

    fn draw_board(&mut self, layout: Layout) {
        self.ui.text("Tic Tac Toe", &self.font, WHITE, Vec2::new(layout.left(), 10.0), 0.0);

        let player = self.game.player();
        let colors = ButtonColors::new(WHITE, HIGHLIGHT[player], MARK[player]);

        for index in 0..9 {
            let rect = layout.cell_rect(index);
            let open = !self.game.is_paused() && self.game.board()[index] == Cell::Empty;

            if open {
                if self.ui.button(ui_id!(index), rect, colors, 0.0) {
                    self.game.place(index);
                }
            } else {
                self.ui.rect(rect, WHITE, 0.0);
            }
        }

        if let Some(marks) = &self.marks {
            for (index, cell) in self.game.board().iter().enumerate() {
                let sprite = match cell {
                    Cell::Cross => marks.cross,
                    Cell::Circle => marks.circle,
                    Cell::Empty => continue,
                };
                self.ui.draw_list().push_sprite(
                    SPRITE_LAYER,
                    marks.atlas,
                    sprite,
                    layout.mark_transform(index),
                );
            }
        }
    }

    /// Per-player mark counts, right-aligned with the board edge.
    fn draw_counts(&mut self, layout: Layout) {
        let mut right = (layout.viewport.width + layout.board) / 2.0;
        let counts = self.game.mark_counts();

        for player in (0..counts.len()).rev() {
            let text = counts[player].to_string();
            let width = self.ui.measure_text(&text, &self.font).x;
            let top_left = Vec2::new(right - width, 10.0);
            self.ui.text(&text, &self.font, HIGHLIGHT[player], top_left, 0.0);
            right = top_left.x - 10.0;
        }
    }

    fn draw_bottom_bar(&mut self, layout: Layout) {
        let vp = layout.viewport;
        let reset = "Reset";
        let menu = "Menu";
        let reset_size = self.ui.measure_text(reset, &self.font) + BUTTON_PADDING * 2.0;
        let menu_size = self.ui.measure_text(menu, &self.font) + BUTTON_PADDING * 2.0;
        let left = (vp.width - (reset_size.x + menu_size.x + 10.0)) / 2.0;
        let base_y = vp.height - BOARD_MARGIN;

        let pos = Vec2::new(left, base_y + reset_size.y / 2.0);
        if self.ui.text_button(ui_id!(), reset, &self.font, BUTTON_PADDING, pos, 0.0) {
            self.game.reset();
        }

        let pos = Vec2::new(left + reset_size.x + 10.0, base_y + menu_size.y / 2.0);
        if self.ui.text_button(ui_id!(), menu, &self.font, BUTTON_PADDING, pos, 0.0) {
            self.game.open_menu();
        }
    }

    fn draw_pause_overlay(&mut self, layout: Layout) {
        let rect = layout.board_rect();
        let board = layout.board;
        self.ui.rect(rect, Color::from_straight(0.0, 0.0, 0.0, 0.7), OVERLAY_LAYER);

        let size = self.ui.measure_text(PAUSE_TEXT, &self.font);
        let pos = rect.top_left + Vec2::new((board - size.x) / 2.0, (board - size.y) / 2.0);
        self.ui.text(PAUSE_TEXT, &self.font, WHITE, pos, OVERLAY_TEXT_LAYER);

        let label = "Continue";
        let size = self.ui.measure_text(label, &self.font);
        let pos = rect.top_left
            + Vec2::new(
                (board - size.x - 2.0 * BUTTON_PADDING.x) / 2.0,
                board - (size.y + 2.0 * BUTTON_PADDING.y + self.font.height()),
            );
        if self
            .ui
            .text_button(ui_id!(), label, &self.font, BUTTON_PADDING, pos, OVERLAY_BUTTON_LAYER)
        {
            self.game.set_paused(false);
        }
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl App for TicTacToe {
    fn init(&mut self, ctx: &mut FrameCtx<'_, '_>) -> anyhow::Result<()> {
        self.font = assets::load_font(ctx);

        if let Some(source) = assets::load_sprite_shader() {
            ctx.renderer.set_sprite_shader(source);
        }

        let atlas = assets::load_atlas()?;
        let cell = Layout::new(ctx.viewport()).cell;
        let cell_size = Vec2::new(cell, cell);

        self.marks = Some(Marks {
            atlas: ctx.upload_atlas(&atlas),
            cross: ctx.upload_sprite(&Sprite::new(cell_size, Vec4::new(0.0, 0.0, 0.5, 1.0))),
            circle: ctx.upload_sprite(&Sprite::new(cell_size, Vec4::new(0.5, 0.0, 1.0, 1.0))),
        });
        Ok(())
    }

    fn update(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.key_pressed(Key::Escape) && !self.game.in_menu() {
            self.game.set_paused(!self.game.is_paused());
        }
        AppControl::Continue
    }

    fn render(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.ui.begin_frame(UiInput::from_frame(ctx));

        if self.game.in_menu() {
            self.draw_menu();
        } else {
            let layout = Layout::new(self.ui.viewport());
            self.draw_board(layout);
            self.draw_counts(layout);
            self.draw_bottom_bar(layout);
            if self.game.is_paused() {
                self.draw_pause_overlay(layout);
            }
        }

        ctx.render(CLEAR, self.ui.draw_list())
    }
}
