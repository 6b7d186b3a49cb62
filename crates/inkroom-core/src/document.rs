//! The shared document: background color, layers and their paint order.

use crate::layers::{Color, Layer, LayerId, LayerUpdate};
use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Durable document state shared by every collaborator.
///
/// `layers` and `layer_ids` always describe the same set of ids; every mutator
/// below keeps them in sync. `layer_ids` is the paint order (back to front).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Canvas background.
    pub background_color: Color,
    /// All layers, keyed by id. Sorted so serialization is deterministic.
    layers: BTreeMap<LayerId, Layer>,
    /// Z-order of layers (back to front).
    layer_ids: Vec<LayerId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Color::new(30, 30, 30))
    }
}

impl Document {
    /// Create an empty document.
    pub fn new(background_color: Color) -> Self {
        Self {
            background_color,
            layers: BTreeMap::new(),
            layer_ids: Vec::new(),
        }
    }

    /// Assemble a document from caller-provided parts without validation.
    pub fn from_parts(
        background_color: Color,
        layers: BTreeMap<LayerId, Layer>,
        layer_ids: Vec<LayerId>,
    ) -> Self {
        Self {
            background_color,
            layers,
            layer_ids,
        }
    }

    pub fn layers(&self) -> &BTreeMap<LayerId, Layer> {
        &self.layers
    }

    pub fn layer_ids(&self) -> &[LayerId] {
        &self.layer_ids
    }

    /// Get a layer by id.
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.get(id)
    }

    /// Get a mutable reference to a layer by id.
    ///
    /// Edit the layer's fields through it; assigning a different variant
    /// breaks the fixed-kind rule that [`Document::insert_layer`] enforces.
    pub fn layer_mut(&mut self, id: &str) -> Option<&mut Layer> {
        self.layers.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.layers.contains_key(id)
    }

    /// Add a layer on top of the paint order.
    ///
    /// Re-inserting an existing id replaces the layer and keeps its position,
    /// but only when the kind matches; a layer's kind is fixed at creation.
    /// Returns `false` when the layer was rejected for that reason.
    pub fn insert_layer(&mut self, id: impl Into<LayerId>, layer: Layer) -> bool {
        let id = id.into();
        match self.layers.get_mut(&id) {
            Some(existing) if existing.kind() != layer.kind() => {
                log::warn!(
                    "insert skipped, layer {} is a {:?} and cannot become a {:?}",
                    id,
                    existing.kind(),
                    layer.kind()
                );
                false
            }
            Some(existing) => {
                *existing = layer;
                true
            }
            None => {
                self.layers.insert(id.clone(), layer);
                self.layer_ids.push(id);
                true
            }
        }
    }

    /// Remove a layer. Absent ids are ignored.
    pub fn remove_layer(&mut self, id: &str) -> Option<Layer> {
        let removed = self.layers.remove(id)?;
        self.layer_ids.retain(|layer_id| layer_id != id);
        Some(removed)
    }

    /// Remove several layers, returning how many existed.
    pub fn remove_layers<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        ids.iter()
            .filter(|id| self.remove_layer(id.as_ref()).is_some())
            .count()
    }

    /// Remove all layers.
    pub fn clear(&mut self) {
        self.layers.clear();
        self.layer_ids.clear();
    }

    /// Apply a property patch. Returns `false` when the layer does not exist.
    pub fn update_layer(&mut self, id: &str, update: &LayerUpdate) -> bool {
        match self.layers.get_mut(id) {
            Some(layer) => {
                update.apply_to(layer);
                true
            }
            None => {
                log::debug!("update skipped, layer {} no longer exists", id);
                false
            }
        }
    }

    /// Move the given layers by `delta`; absent ids are skipped.
    pub fn translate_layers<S: AsRef<str>>(&mut self, ids: &[S], delta: Vec2) {
        for id in ids {
            if let Some(layer) = self.layers.get_mut(id.as_ref()) {
                layer.translate(delta);
            }
        }
    }

    /// Layers in paint order (back to front).
    pub fn layers_ordered(&self) -> impl Iterator<Item = (&LayerId, &Layer)> {
        self.layer_ids
            .iter()
            .filter_map(|id| self.layers.get(id).map(|layer| (id, layer)))
    }

    /// Bring a layer to the front (topmost).
    pub fn bring_to_front(&mut self, id: &str) {
        if let Some(pos) = self.position(id) {
            let id = self.layer_ids.remove(pos);
            self.layer_ids.push(id);
        }
    }

    /// Send a layer to the back (bottommost).
    pub fn send_to_back(&mut self, id: &str) {
        if let Some(pos) = self.position(id) {
            let id = self.layer_ids.remove(pos);
            self.layer_ids.insert(0, id);
        }
    }

    /// Move a layer one step towards the front.
    /// Returns true if the layer was moved, false if already at front.
    pub fn bring_forward(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(pos) if pos + 1 < self.layer_ids.len() => {
                self.layer_ids.swap(pos, pos + 1);
                true
            }
            _ => false,
        }
    }

    /// Move a layer one step towards the back.
    /// Returns true if the layer was moved, false if already at back.
    pub fn send_backward(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(pos) if pos > 0 => {
                self.layer_ids.swap(pos, pos - 1);
                true
            }
            _ => false,
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.layer_ids.iter().position(|layer_id| layer_id == id)
    }

    /// Bounding box of all layers.
    pub fn bounds(&self) -> Option<Rect> {
        self.layers
            .values()
            .map(Layer::bounds)
            .reduce(|acc, bounds| acc.union(bounds))
    }

    /// Check that `layers` and `layer_ids` describe the same ids, once each.
    pub fn is_consistent(&self) -> bool {
        if self.layer_ids.len() != self.layers.len() {
            return false;
        }
        let mut seen = std::collections::BTreeSet::new();
        self.layer_ids
            .iter()
            .all(|id| self.layers.contains_key(id) && seen.insert(id))
    }

    /// Whether every layer holds only finite numbers.
    pub fn is_finite(&self) -> bool {
        self.layers.values().all(Layer::is_finite)
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Get the number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }
}
