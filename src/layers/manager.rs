use crate::layers::base::LayerTrait;
use crate::prelude::{HashMap, HashSet};
use crate::{MapError, Result};

/// Manages layers for the map, handling ordering and lookup
#[derive(Debug, Default)]
pub struct LayerManager {
    /// All layers indexed by ID
    layers: HashMap<String, Box<dyn LayerTrait>>,
    /// Top-level layer IDs in draw order, bottom first
    render_order: Vec<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layer on top of the existing ones.
    ///
    /// Ids are unique across the whole tree: the new layer, its children
    /// and every layer already held.
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        let mut ids = Vec::new();
        collect_ids(layer.as_ref(), &mut ids);

        let mut seen = HashSet::default();
        for id in &ids {
            if !seen.insert(*id) || self.contains(id) {
                return Err(MapError::Layer(format!("duplicate layer id '{}'", id)));
            }
        }

        let layer_id = layer.id().to_string();
        self.layers.insert(layer_id.clone(), layer);
        self.render_order.push(layer_id);
        Ok(())
    }

    /// Removes a layer from the manager
    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>> {
        self.render_order.retain(|id| id != layer_id);
        self.layers.remove(layer_id)
    }

    /// Whether `layer_id` names a layer or a child of a group layer
    pub fn contains(&self, layer_id: &str) -> bool {
        self.find(layer_id).is_some()
    }

    /// Gets a reference to a top-level layer by ID
    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get(layer_id).map(|l| l.as_ref())
    }

    /// Finds a layer by ID, searching group children too
    pub fn find(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.find_with_visibility(layer_id).map(|(layer, _)| layer)
    }

    /// Finds a layer like [`find`](Self::find), paired with whether it and
    /// every group above it are visible.
    pub fn find_with_visibility(&self, layer_id: &str) -> Option<(&dyn LayerTrait, bool)> {
        self.layers()
            .into_iter()
            .find_map(|layer| find_in(layer, layer_id, true))
    }

    /// Applies a function to a specific top-level layer mutably
    pub fn with_layer_mut<F, R>(&mut self, layer_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn LayerTrait) -> R,
    {
        self.layers.get_mut(layer_id).map(|layer| f(layer.as_mut()))
    }

    /// Lists layer IDs in render order
    pub fn list_layers(&self) -> Vec<String> {
        self.render_order.clone()
    }

    /// Gets all layers in render order
    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.render_order
            .iter()
            .filter_map(|id| self.layers.get(id).map(|l| l.as_ref()))
            .collect()
    }

    /// Gets the number of top-level layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

fn collect_ids<'a>(layer: &'a dyn LayerTrait, ids: &mut Vec<&'a str>) {
    ids.push(layer.id());
    for child in layer.children() {
        collect_ids(child, ids);
    }
}

fn find_in<'a>(
    layer: &'a dyn LayerTrait,
    layer_id: &str,
    ancestors_visible: bool,
) -> Option<(&'a dyn LayerTrait, bool)> {
    let visible = ancestors_visible && layer.is_visible();
    if layer.id() == layer_id {
        return Some((layer, visible));
    }
    layer
        .children()
        .into_iter()
        .find_map(|child| find_in(child, layer_id, visible))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{feature::FeatureLayer, group::GroupLayer};

    #[test]
    fn test_insertion_order_is_draw_order() {
        let mut manager = LayerManager::new();
        manager
            .add_layer(Box::new(FeatureLayer::new("continents", "Continents")))
            .unwrap();
        manager
            .add_layer(Box::new(FeatureLayer::new("cities", "Cities")))
            .unwrap();

        assert_eq!(manager.list_layers(), vec!["continents", "cities"]);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut manager = LayerManager::new();
        manager
            .add_layer(Box::new(FeatureLayer::new("cities", "Cities")))
            .unwrap();
        assert!(manager
            .add_layer(Box::new(FeatureLayer::new("cities", "Cities again")))
            .is_err());

        let group = GroupLayer::new("world", "World").with_layer(FeatureLayer::new("cities", "Cities"));
        assert!(manager.add_layer(Box::new(group)).is_err());
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_ids_repeated_within_a_group_are_rejected() {
        let mut manager = LayerManager::new();
        let twins = GroupLayer::new("world", "World")
            .with_layer(FeatureLayer::new("cities", "Cities"))
            .with_layer(FeatureLayer::new("cities", "Cities again"));
        assert!(matches!(manager.add_layer(Box::new(twins)), Err(MapError::Layer(_))));

        let shadowing = GroupLayer::new("cities", "Cities").with_layer(FeatureLayer::new("cities", "Cities"));
        assert!(matches!(manager.add_layer(Box::new(shadowing)), Err(MapError::Layer(_))));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_find_with_visibility_follows_groups() {
        let mut manager = LayerManager::new();
        let group = GroupLayer::new("world", "World").with_layer(FeatureLayer::new("cities", "Cities"));
        manager.add_layer(Box::new(group)).unwrap();
        assert_eq!(manager.find_with_visibility("cities").map(|(_, v)| v), Some(true));

        manager.with_layer_mut("world", |l| l.set_visible(false));
        let (layer, visible) = manager.find_with_visibility("cities").unwrap();
        assert_eq!(layer.id(), "cities");
        assert!(layer.is_visible());
        assert!(!visible);
        assert!(manager.find_with_visibility("rivers").is_none());
    }

    #[test]
    fn test_find_searches_groups() {
        let mut manager = LayerManager::new();
        let group = GroupLayer::new("world", "World").with_layer(FeatureLayer::new("cities", "Cities"));
        manager.add_layer(Box::new(group)).unwrap();

        assert!(manager.get_layer("cities").is_none());
        assert_eq!(manager.find("cities").map(|l| l.title()), Some("Cities"));
        assert!(manager.remove_layer("world").is_some());
        assert!(manager.is_empty());
    }
}
