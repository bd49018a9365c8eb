//! Pixel-space shapes and the id → shape index.
//!
//! A shape knows only the id of the hotspot it stands for. Action, target
//! and credentials are always read from the store.

use std::collections::HashMap;

use super::geometry::{Point, PixelRect};

/// Visual emphasis of a shape, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Emphasis {
    Normal,
    Hovered,
    Focused,
    Selected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub hotspot_id: String,
    pub rect: PixelRect,
    pub hovered: bool,
    pub focused: bool,
    pub selected: bool,
}

impl Shape {
    pub fn new(hotspot_id: impl Into<String>, rect: PixelRect) -> Self {
        Self {
            hotspot_id: hotspot_id.into(),
            rect,
            hovered: false,
            focused: false,
            selected: false,
        }
    }

    pub fn emphasis(&self) -> Emphasis {
        if self.selected {
            Emphasis::Selected
        } else if self.focused {
            Emphasis::Focused
        } else if self.hovered {
            Emphasis::Hovered
        } else {
            Emphasis::Normal
        }
    }
}

/// Ordered shapes plus a lookup by hotspot id. Later shapes sit on top.
#[derive(Debug, Clone, Default)]
pub struct ShapeLayer {
    shapes: Vec<Shape>,
    index: HashMap<String, usize>,
}

impl ShapeLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every shape.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.index.clear();
    }

    pub fn push(&mut self, shape: Shape) {
        self.index.insert(shape.hotspot_id.clone(), self.shapes.len());
        self.shapes.push(shape);
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn get(&self, hotspot_id: &str) -> Option<&Shape> {
        self.index.get(hotspot_id).map(|&i| &self.shapes[i])
    }

    pub fn get_mut(&mut self, hotspot_id: &str) -> Option<&mut Shape> {
        let i = *self.index.get(hotspot_id)?;
        self.shapes.get_mut(i)
    }

    pub fn position(&self, hotspot_id: &str) -> Option<usize> {
        self.index.get(hotspot_id).copied()
    }

    pub fn at(&self, position: usize) -> Option<&Shape> {
        self.shapes.get(position)
    }

    /// Topmost shape containing `point`.
    pub fn hit(&self, point: Point) -> Option<&Shape> {
        self.shapes.iter().rev().find(|s| s.rect.contains(point))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Shape> {
        self.shapes.iter_mut()
    }
}
