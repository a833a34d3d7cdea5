//! Builders for horizontal and vertical boxes, plus the construction macros
//! used throughout the atom layouts.

use super::{BoxAlign, BoxKind, BoxNode, HorzBox, VertBox};

pub struct HBox {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    children: Vec<BoxNode>,
    alignment: BoxAlign,
}

impl Default for HBox {
    fn default() -> Self {
        HBox {
            width: 0.0,
            height: 0.0,
            depth: 0.0,
            children: Vec::new(),
            alignment: BoxAlign::Left,
        }
    }
}

impl HBox {
    pub fn new() -> HBox {
        HBox::default()
    }

    pub fn add_node(&mut self, node: BoxNode) {
        self.width += node.width;
        self.height = self.height.max(node.height - node.shift);
        self.depth = self.depth.max(node.depth + node.shift);
        self.children.push(node);
    }

    pub fn insert_node(&mut self, idx: usize, node: BoxNode) {
        self.width += node.width;
        self.height = self.height.max(node.height - node.shift);
        self.depth = self.depth.max(node.depth + node.shift);
        self.children.insert(idx, node);
    }

    pub fn set_alignment(&mut self, alignment: BoxAlign) {
        self.alignment = alignment;
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn build(self) -> BoxNode {
        BoxNode {
            width: self.width,
            height: self.height,
            depth: self.depth,
            shift: 0.0,
            kind: BoxKind::HBox(HorzBox { children: self.children, alignment: self.alignment }),
        }
    }
}

pub struct VBox {
    pub width: f32,
    children: Vec<BoxNode>,
    extent: f32,
    offset: f32,
}

impl Default for VBox {
    fn default() -> Self {
        VBox { width: 0.0, children: Vec::new(), extent: 0.0, offset: 0.0 }
    }
}

impl VBox {
    pub fn new() -> VBox {
        VBox::default()
    }

    pub fn add_node(&mut self, node: BoxNode) {
        self.width = self.width.max(node.width + node.shift);
        self.extent += node.vlen();
        self.children.push(node);
    }

    pub fn insert_node(&mut self, idx: usize, node: BoxNode) {
        self.width = self.width.max(node.width + node.shift);
        self.extent += node.vlen();
        self.children.insert(idx, node);
    }

    /// Raise the box baseline by `offset` above the last child's baseline.
    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The box baseline defaults to the last child's baseline.
    pub fn build(self) -> BoxNode {
        let last_depth = self.children.last().map(|node| node.depth).unwrap_or(0.0);
        let depth = last_depth + self.offset;
        BoxNode {
            width: self.width,
            height: self.extent - depth,
            depth,
            shift: 0.0,
            kind: BoxKind::VBox(VertBox { children: self.children }),
        }
    }
}

macro_rules! hbox {
    (align: $align:expr; width: $width:expr; $($node:expr),* $(,)?) => ({
        let mut _hbox = $crate::boxes::builders::HBox::new();
        let align = $align;
        let width = $width;
        $( _hbox.add_node($node); )*
        _hbox.set_alignment(align);
        _hbox.set_width(width);
        _hbox.build()
    });

    ( $($node:expr),* $(,)? ) => ({
        let mut _hbox = $crate::boxes::builders::HBox::new();
        $( _hbox.add_node($node); )*
        _hbox.build()
    });
}

macro_rules! vbox {
    (offset: $offset:expr; $($node:expr),* $(,)?) => ({
        let mut _vbox = $crate::boxes::builders::VBox::new();
        $( _vbox.add_node($node); )*
        _vbox.set_offset($offset);
        _vbox.build()
    });

    ( $($node:expr),* $(,)? ) => ({
        let mut _vbox = $crate::boxes::builders::VBox::new();
        $( _vbox.add_node($node); )*
        _vbox.build()
    });
}

macro_rules! kern {
    (horz: $width:expr) => {
        $crate::boxes::BoxNode::hkern($width)
    };
    (vert: $height:expr) => {
        $crate::boxes::BoxNode::vkern($height)
    };
}

macro_rules! rule {
    (width: $width:expr, height: $height:expr) => {
        $crate::boxes::BoxNode::rule($width, $height, 0.0)
    };
    (width: $width:expr, height: $height:expr, depth: $depth:expr) => {
        $crate::boxes::BoxNode::rule($width, $height, $depth)
    };
}

#[cfg(test)]
mod tests {
    use crate::boxes::BoxNode;

    #[test]
    fn hbox_accumulates() {
        let node = hbox![
            BoxNode::strut(10.0, 4.0, 1.0),
            BoxNode::strut(5.0, 6.0, 3.0),
            kern![horz: 2.0]
        ];
        assert_close!(node.width, 17.0, 1e-6);
        assert_close!(node.height, 6.0, 1e-6);
        assert_close!(node.depth, 3.0, 1e-6);
    }

    #[test]
    fn hbox_respects_shift() {
        let mut low = BoxNode::strut(4.0, 4.0, 0.0);
        low.shift = 3.0;
        let node = hbox![low];
        assert_close!(node.height, 1.0, 1e-6);
        assert_close!(node.depth, 3.0, 1e-6);
    }

    #[test]
    fn vbox_baseline_is_last_child() {
        let node = vbox![
            BoxNode::strut(4.0, 5.0, 1.0),
            kern![vert: 2.0],
            BoxNode::strut(6.0, 3.0, 2.0)
        ];
        assert_close!(node.width, 6.0, 1e-6);
        assert_close!(node.depth, 2.0, 1e-6);
        // extent = 6 + 2 + 5 ; height = extent - depth
        assert_close!(node.height, 11.0, 1e-6);
    }

    #[test]
    fn vbox_offset_moves_baseline() {
        let node = vbox![offset: 1.5;
            BoxNode::strut(4.0, 5.0, 1.0),
            BoxNode::strut(4.0, 3.0, 2.0)
        ];
        assert_close!(node.depth, 3.5, 1e-6);
        assert_close!(node.height, 7.5, 1e-6);
    }
}
