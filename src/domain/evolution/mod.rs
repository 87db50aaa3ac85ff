//! Evolution chains
//!
//! Upstream data is a nested tree; only the first listed next stage of each
//! node is kept, so the domain shape is a plain linked list.
//! Walks are iterative and bounded by `MAX_EVOLUTION_HOPS`, since the data is
//! only nominally acyclic.

use serde::{Deserialize, Serialize};

use crate::domain::creature::id_from_resource_url;

/// Upper bound on stages visited in a single walk
pub const MAX_EVOLUTION_HOPS: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionChain {
    pub root: EvolutionNode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionNode {
    pub name: String,
    pub species_url: String,
    pub next: Option<Box<EvolutionNode>>,
}

/// One stage of a walked chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionStep {
    pub name: String,
    pub id: Option<u32>,
}

impl EvolutionChain {
    /// Build a chain from stages ordered root first.
    /// Returns `None` for an empty stage list.
    pub fn from_stages(stages: Vec<(String, String)>) -> Option<Self> {
        let mut next: Option<Box<EvolutionNode>> = None;
        for (name, species_url) in stages.into_iter().rev() {
            next = Some(Box::new(EvolutionNode {
                name,
                species_url,
                next,
            }));
        }
        next.map(|root| Self { root: *root })
    }
}

/// Walk the chain from its root, producing `{name, id}` per stage.
///
/// Pure function of its input; calling it repeatedly yields the same sequence.
/// A chain that repeats a species, or runs past `MAX_EVOLUTION_HOPS`, is cut
/// at that point.
pub fn evolution_sequence(chain: Option<&EvolutionChain>) -> Vec<EvolutionStep> {
    let mut steps: Vec<EvolutionStep> = Vec::new();
    let mut current = chain.map(|c| &c.root);

    while let Some(node) = current {
        if steps.len() >= MAX_EVOLUTION_HOPS || steps.iter().any(|s| s.name == node.name) {
            log::warn!(
                "Evolution chain walk stopped at '{}' after {} stages",
                node.name,
                steps.len()
            );
            break;
        }

        steps.push(EvolutionStep {
            name: node.name.clone(),
            id: id_from_resource_url(&node.species_url),
        });
        current = node.next.as_deref();
    }

    steps
}
