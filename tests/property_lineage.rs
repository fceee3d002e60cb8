use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use sketchdag::dag::{SketchNode, build};
use sketchdag::layout::{LayoutOptions, layout};
use sketchdag::types::{NodeId, Operation};

fn name(i: usize) -> String {
    format!("s{:03}", i)
}

// Strategy to generate a valid lineage table.
// Acyclicity is guaranteed by only letting sketch N derive from sketches 0..N-1.
fn lineage_strategy(max_nodes: usize) -> impl Strategy<Value = BTreeMap<NodeId, SketchNode>> {
    (1..=max_nodes).prop_flat_map(|num_nodes| {
        let specs = proptest::collection::vec(
            (0..5u8, proptest::collection::vec(any::<usize>(), 1..4)),
            num_nodes,
        );

        specs.prop_map(|raw| {
            let mut nodes = BTreeMap::new();
            for (i, (op, picks)) in raw.into_iter().enumerate() {
                let operation = if i == 0 {
                    Operation::Create
                } else {
                    match op {
                        0 => Operation::Create,
                        1 => Operation::Expand,
                        2 => Operation::Shrink,
                        3 => Operation::Merge,
                        _ => Operation::Split,
                    }
                };

                let mut node = SketchNode::new(operation);
                match operation {
                    Operation::Create => {}
                    Operation::Merge => {
                        let parents: BTreeSet<usize> = picks.iter().map(|p| p % i).collect();
                        node.sources = parents.into_iter().map(name).collect();
                    }
                    _ => node.source = Some(name(picks[0] % i)),
                }
                nodes.insert(name(i), node);
            }
            nodes
        })
    })
}

proptest! {
    #[test]
    fn create_nodes_are_roots_and_others_are_not(nodes in lineage_strategy(12)) {
        let model = build(&nodes).unwrap();

        for (id, node) in nodes.iter() {
            let incoming = model.edges.iter().filter(|e| &e.target == id).count();
            if node.operation == Operation::Create {
                prop_assert_eq!(incoming, 0);
            } else {
                prop_assert!(incoming >= 1);
            }
            prop_assert!(model.family_of(id).is_some());
        }
    }

    #[test]
    fn families_follow_lineage_rules(nodes in lineage_strategy(12)) {
        let model = build(&nodes).unwrap();

        for (id, node) in nodes.iter() {
            match node.operation {
                Operation::Expand | Operation::Shrink => {
                    let parent = node.primary_source().unwrap();
                    prop_assert_eq!(model.family_of(id), model.family_of(parent));
                }
                Operation::Merge => {
                    let incoming: Vec<_> = model.edges.iter().filter(|e| &e.target == id).collect();
                    prop_assert_eq!(incoming.len(), node.sources.len());
                }
                Operation::Create | Operation::Split => {}
            }
        }
    }

    #[test]
    fn layering_is_a_topological_order(nodes in lineage_strategy(12)) {
        let model = build(&nodes).unwrap();
        let result = layout(&nodes, &model.edges, &LayoutOptions::default()).unwrap();

        prop_assert_eq!(result.positions().len(), nodes.len());
        for edge in model.edges.iter() {
            let u = result.layer_of(&edge.source).unwrap();
            let v = result.layer_of(&edge.target).unwrap();
            prop_assert!(u < v);
        }
    }

    #[test]
    fn every_layer_is_centred(nodes in lineage_strategy(12)) {
        let model = build(&nodes).unwrap();
        let options = LayoutOptions::default();
        let result = layout(&nodes, &model.edges, &options).unwrap();

        for (idx, layer) in result.layers().iter().enumerate() {
            let n = layer.len() as f64;
            for (i, id) in layer.iter().enumerate() {
                let pos = result.position(id).unwrap();
                let expected = i as f64 * options.y_spacing - (n - 1.0) * options.y_spacing / 2.0;
                prop_assert!((pos.y - expected).abs() < 1e-9);
                prop_assert!((pos.x - idx as f64 * options.x_spacing).abs() < 1e-9);
            }
        }
    }
}
