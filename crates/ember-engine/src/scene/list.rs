use super::{DrawCmd, Layer, SortKey};

/// A single draw item: sort key + command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for a frame.
///
/// Every immediate-mode call (`Ui::text`, `Ui::button`, sprite draws) appends
/// here; the renderer flushes the whole list once per frame.
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer; no per-frame allocation once warmed
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    /// Pushes a draw command on the given layer.
    #[inline]
    pub fn push(&mut self, layer: impl Into<Layer>, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(layer.into(), order),
            cmd,
        });

        self.sorted_dirty = true;
    }

    /// Iterates items in paint order without cloning draw commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // Stable ordering is ensured by SortKey including insertion order.
        self.sorted_indices
            .sort_by(|&a, &b| self.items[a].key.cmp(&self.items[b].key));

        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::paint::Color;

    fn rect_on(list: &mut DrawList, layer: f32, x: f32) {
        list.push_rect(layer, Rect::new(x, 0.0, 1.0, 1.0), Color::WHITE);
    }

    fn painted_xs(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::Rect(r) => r.rect.top_left.x,
                other => panic!("unexpected command {other:?}"),
            })
            .collect()
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn far_layers_paint_first() {
        let mut list = DrawList::new();
        rect_on(&mut list, -0.02, 1.0); // overlay
        rect_on(&mut list, 0.0, 2.0); // board
        rect_on(&mut list, 0.01, 3.0); // button background
        assert_eq!(painted_xs(&mut list), vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn equal_layers_keep_insertion_order() {
        let mut list = DrawList::new();
        for x in 0..5 {
            rect_on(&mut list, 0.0, x as f32);
        }
        assert_eq!(painted_xs(&mut list), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn text_lands_in_front_of_its_button_background() {
        let mut list = DrawList::new();
        // text_button draws the background at layer + 0.01 after the label.
        rect_on(&mut list, -0.06, 1.0);
        rect_on(&mut list, -0.05, 2.0);
        assert_eq!(painted_xs(&mut list), vec![2.0, 1.0]);
    }

    #[test]
    fn pushing_after_iteration_resorts() {
        let mut list = DrawList::new();
        rect_on(&mut list, 0.0, 1.0);
        assert_eq!(painted_xs(&mut list), vec![1.0]);
        rect_on(&mut list, 0.5, 2.0);
        assert_eq!(painted_xs(&mut list), vec![2.0, 1.0]);
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn clear_resets_items_and_order() {
        let mut list = DrawList::new();
        rect_on(&mut list, 0.0, 1.0);
        rect_on(&mut list, 0.0, 2.0);
        list.clear();
        assert!(list.is_empty());
        assert!(list.iter_in_paint_order().next().is_none());

        rect_on(&mut list, 0.0, 3.0);
        assert_eq!(list.items()[0].key.order, 0);
        assert_eq!(list.len(), 1);
    }
}
