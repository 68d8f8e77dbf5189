//! Offset-lane assignment.
//!
//! Within a level, a component is pushed one lane further left for every
//! step of its precedence chain: required targets, preceding components, and
//! children. A component reached along several paths keeps the deepest one.

use std::collections::{HashMap, HashSet};

use serde_json::json;

use super::types::LevelLayout;
use crate::error::{DiagnosticKind, Diagnostics};
use crate::extract::PathwayData;
use crate::progression::ProgressionModel;
use crate::syntax::ComponentId;

type Edge = (ComponentId, ComponentId);

/// Assign `offset` to every component in a placed level and size each
/// level's lane list. The destination component always sits in lane 0.
pub fn assign_offsets(
    data: &mut PathwayData,
    model: &ProgressionModel,
    layout: &mut LevelLayout,
    diags: &mut Diagnostics,
) {
    let mut offsets: HashMap<ComponentId, usize> = HashMap::new();
    let mut reported: HashSet<Vec<ComponentId>> = HashSet::new();

    for &level in &layout.order {
        let level_id = model.all_levels[level].id.as_str();
        let level_components: Vec<ComponentId> = data
            .members
            .iter()
            .copied()
            .filter(|&m| data.component(m).primary_level() == Some(level_id))
            .collect();

        let mut tracer = LaneTracer {
            data: &*data,
            level_components: &level_components,
            offsets: &mut offsets,
            expanded_at: HashMap::new(),
            reported: &mut reported,
            max_offset: 0,
            diags: &mut *diags,
        };
        for &seed in &level_components {
            let mut path = Vec::new();
            tracer.trace(seed, 0, &mut path);
        }
        layout.levels[level].lane_count = tracer.max_offset + 1;
    }

    for (id, offset) in offsets {
        data.component_mut(id).offset = Some(offset);
    }
    let destination = data.destination;
    data.component_mut(destination).offset = Some(0);
}

struct LaneTracer<'a> {
    data: &'a PathwayData,
    level_components: &'a [ComponentId],
    offsets: &'a mut HashMap<ComponentId, usize>,
    /// Deepest offset each component has been expanded from in this level.
    expanded_at: HashMap<ComponentId, usize>,
    reported: &'a mut HashSet<Vec<ComponentId>>,
    max_offset: usize,
    diags: &'a mut Diagnostics,
}

impl LaneTracer<'_> {
    fn trace(&mut self, component: ComponentId, offset: usize, path: &mut Vec<Edge>) {
        self.max_offset = self.max_offset.max(offset);
        let current = self.offsets.entry(component).or_insert(offset);
        *current = (*current).max(offset);
        self.expanded_at
            .entry(component)
            .and_modify(|d| *d = (*d).max(offset))
            .or_insert(offset);

        let previous: Vec<ComponentId> = self
            .data
            .predecessors(component)
            .into_iter()
            .filter(|p| self.level_components.contains(p))
            .collect();

        for prev in previous {
            let edge = (component, prev);
            if let Some(start) = path.iter().position(|e| *e == edge) {
                self.report_cycle(&path[start..], edge);
                continue;
            }
            if self.expanded_at.get(&prev).is_some_and(|&d| d >= offset + 1) {
                continue;
            }
            path.push(edge);
            self.trace(prev, offset + 1, path);
            path.pop();
        }
    }

    /// One diagnostic per distinct set of components forming a cycle.
    fn report_cycle(&mut self, cycle: &[Edge], edge: Edge) {
        let mut key: Vec<ComponentId> = cycle.iter().map(|(from, _)| *from).collect();
        key.sort();
        key.dedup();
        if !self.reported.insert(key) {
            return;
        }
        let (from, to) = edge;
        self.diags.push(
            DiagnosticKind::PrecedenceCycle,
            "Possible circular reference detected in Component precededBy/hasChild/precedes/isChildOf path",
            json!({
                "component": self.data.component(from).id,
                "previousComponent": self.data.component(to).id,
            }),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_lanes.rs"]
mod tests;
