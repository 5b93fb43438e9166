//! Draw passes, one per scene command kind.

mod common;

pub(crate) mod rect;
pub(crate) mod sprite;
pub(crate) mod text;

pub(crate) use common::texture_bind_group_layout;
