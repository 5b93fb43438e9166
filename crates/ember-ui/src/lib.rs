//! Ember UI: immediate-mode widgets on top of `ember-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use ember_ui::prelude::*;
//!
//! // In App::init:
//! let font = Font::load(ctx, "assets/fonts/DejaVuSansMono.ttf", 24.0)?;
//!
//! // In App::render:
//! ui.begin_frame(UiInput::from_frame(ctx));
//! ui.text("Tic Tac Toe", &font, Color::WHITE, Vec2::new(10.0, 10.0), 0.0);
//! if ui.text_button(ui_id!(), "Reset", &font, Vec2::new(10.0, 5.0), Vec2::new(10.0, 360.0), 0.0) {
//!     board.reset();
//! }
//! ctx.render(Color::BLACK, ui.draw_list());
//! ```
//!
//! Widgets hold no state between frames. Identity comes from [`UiId`],
//! usually built with [`ui_id!`] so each call site gets its own id.

pub mod context;
pub mod font;
pub mod id;
pub mod input;

pub use context::{ButtonColors, Ui};
pub use font::Font;
pub use id::UiId;
pub use input::UiInput;

/// Everything needed to build UI in an app module.
pub mod prelude {
    pub use crate::context::{ButtonColors, Ui};
    pub use crate::font::Font;
    pub use crate::id::UiId;
    pub use crate::input::UiInput;
    pub use crate::ui_id;

    // Re-export the engine primitives everyone needs.
    pub use ember_engine::coords::{Rect, Vec2, Viewport};
    pub use ember_engine::paint::Color;
    pub use ember_engine::scene::Layer;
}
