//! Property-based tests for scriptgraph using proptest.
//!
//! Random acyclic graphs are registered in random orders and batch splits;
//! closures must match a reference transitive closure and every resolution
//! must put dependencies first.
//!
//! Run with: cargo test --features proptest --package scriptgraph property_tests

#![cfg(feature = "proptest")]

use std::collections::BTreeSet;

use proptest::prelude::*;

use super::shared;
use crate::{FetchMode, ResourceId, ScriptGraph, ScriptResourceDescriptor};

/// Node `i` may only depend on nodes `< i`, which keeps the graph acyclic.
fn dag_strategy() -> impl Strategy<Value = Vec<Vec<usize>>> {
    (1usize..=12).prop_flat_map(|size| {
        (0..size)
            .map(|i| prop::collection::vec(0..i.max(1), 0..=i.min(3)).prop_map(move |deps| {
                deps.into_iter().filter(|d| *d < i).collect::<Vec<_>>()
            }))
            .collect::<Vec<_>>()
    })
}

fn name(i: usize) -> String {
    format!("n{i}")
}

fn descriptors(dag: &[Vec<usize>]) -> Vec<ScriptResourceDescriptor> {
    dag.iter()
        .enumerate()
        .map(|(i, deps)| {
            deps.iter().fold(
                ScriptResourceDescriptor::immediate(shared(&name(i))),
                |desc, d| desc.depends_on(shared(&name(*d))),
            )
        })
        .collect()
}

fn reference_closure(dag: &[Vec<usize>], node: usize) -> BTreeSet<ResourceId> {
    let mut seen = BTreeSet::new();
    let mut stack = dag[node].clone();
    while let Some(next) = stack.pop() {
        if seen.insert(shared(&name(next))) {
            stack.extend(dag[next].iter().copied());
        }
    }
    seen
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: closures do not depend on declaration order or batching.
    #[test]
    fn prop_closure_is_order_independent(
        dag in dag_strategy(),
        seed in any::<u64>(),
        batch_size in 1usize..=4,
    ) {
        let mut descs = descriptors(&dag);
        // Deterministic shuffle driven by the seed.
        let len = descs.len();
        for i in (1..len).rev() {
            let j = (seed.wrapping_mul(i as u64 + 31) % (i as u64 + 1)) as usize;
            descs.swap(i, j);
        }

        let mut graph = ScriptGraph::empty();
        for batch in descs.chunks(batch_size) {
            graph = graph.add("/app", batch).unwrap();
        }

        for node in 0..dag.len() {
            let resource = graph.resource(&shared(&name(node))).unwrap();
            let closure: BTreeSet<ResourceId> = resource.closure().iter().cloned().collect();
            prop_assert_eq!(closure, reference_closure(&dag, node));
        }
    }

    /// Property: resolution never emits a dependent before its dependency.
    #[test]
    fn prop_resolution_is_dependency_safe(
        dag in dag_strategy(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..6),
    ) {
        let graph = ScriptGraph::empty().add("/app", &descriptors(&dag)).unwrap();
        let request: Vec<(ResourceId, Option<FetchMode>)> = picks
            .iter()
            .map(|pick| (shared(&name(pick.index(dag.len()))), None))
            .collect();

        let resolution = graph.resolve(request);
        let order: Vec<_> = resolution.keys().collect();
        for (i, earlier) in order.iter().enumerate() {
            for later in &order[i + 1..] {
                prop_assert!(!earlier.closure().contains(later.id()));
            }
            for member in earlier.closure() {
                prop_assert!(resolution.keys().any(|r| r.id() == member));
            }
        }
    }

    /// Property: a cycle-closing edge is always rejected and the receiver is untouched.
    #[test]
    fn prop_back_edge_is_rejected(dag in dag_strategy()) {
        let graph = ScriptGraph::empty().add("/app", &descriptors(&dag)).unwrap();
        for node in 0..dag.len() {
            if let Some(dependency) = reference_closure(&dag, node).into_iter().next() {
                let back = ScriptResourceDescriptor::immediate(shared("extra"))
                    .depends_on(shared(&name(node)));
                // A new dependent on top is always fine.
                let accepted = graph.add("/other", &[back]);
                prop_assert!(accepted.is_ok());

                // The dependency itself cannot be re-declared to close the loop.
                let cycle = graph.remove("/app", &[ScriptResourceDescriptor::immediate(dependency.clone())])
                    .add("/app", &[ScriptResourceDescriptor::immediate(dependency).depends_on(shared(&name(node)))]);
                prop_assert!(cycle.is_err());
                prop_assert_eq!(graph.len(), dag.len());
            }
        }
    }
}
