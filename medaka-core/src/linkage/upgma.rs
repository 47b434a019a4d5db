//! The UPGMA build loop.

use tracing::{info, instrument};

use crate::{
    linkage::{AgeTree, AverageLinkageMatrix, Dendrogram, LinkageError, LinkageMatrix, MergeEngine},
    points::PointSet,
};

/// One merge performed by [`build_dendrogram`].
#[derive(Debug, Clone, PartialEq)]
pub struct MergeRecord {
    /// Id of the internal node the merge created.
    pub node: usize,
    /// Age assigned to the new node (half the merged pair's distance).
    pub age: f64,
    /// Original leaf ids absorbed by the new node, in merge order.
    pub members: Vec<usize>,
}

/// Result of a completed hierarchical build.
#[derive(Debug, Clone, PartialEq)]
pub struct UpgmaOutcome {
    /// Id of the final remaining node.
    pub root: usize,
    /// Every merge in execution order.
    pub merges: Vec<MergeRecord>,
}

/// Repeatedly joins the closest pair of live nodes until one remains,
/// recording the hierarchy in `tree`.
///
/// Each merge creates a parent at half the pair's distance and attaches a
/// path to each child whose length is the age difference, which is
/// non-negative because linkage distances never decrease up the tree. After
/// every merge the new node's full membership list is emitted (1-indexed) as
/// a tracing event.
///
/// # Errors
/// Propagates [`LinkageError`] values from the matrix and tree; also fails
/// when the engine starts empty.
#[instrument(name = "core.upgma", err, skip(engine, tree), fields(leaves = engine.len()))]
pub fn build_dendrogram<M: LinkageMatrix, T: Dendrogram>(
    engine: &mut MergeEngine<M>,
    tree: &mut T,
) -> Result<UpgmaOutcome, LinkageError> {
    if engine.is_empty() {
        return Err(LinkageError::InsufficientNodes { live: 0 });
    }
    for id in engine.live_nodes().collect::<Vec<_>>() {
        tree.add_node(id, 0.0)?;
    }

    let mut merges = Vec::new();
    let mut root = engine
        .live_nodes()
        .next()
        .ok_or(LinkageError::InsufficientNodes { live: 0 })?;
    while engine.len() > 1 {
        let pair = engine.closest_pair()?;
        let age = pair.distance / 2.0;
        let node = engine.merge(pair.left, pair.right)?;
        tree.add_node(node, age)?;
        tree.add_path(node, pair.left, age - tree.age(pair.left)?)?;
        tree.add_path(node, pair.right, age - tree.age(pair.right)?)?;

        let members = engine.members(node)?.to_vec();
        let one_indexed: Vec<usize> = members.iter().map(|leaf| leaf + 1).collect();
        info!(node, age, members = ?one_indexed, "merged closest pair");

        merges.push(MergeRecord { node, age, members });
        root = node;
    }
    Ok(UpgmaOutcome { root, merges })
}

/// Convenience entry point: builds the average-linkage hierarchy of a point
/// set from its pairwise Euclidean distances.
///
/// # Errors
/// Propagates [`LinkageError`] values from the build.
pub fn upgma_from_points(points: &PointSet) -> Result<(AgeTree, UpgmaOutcome), LinkageError> {
    let matrix = AverageLinkageMatrix::from_points(points)?;
    let mut engine = MergeEngine::new(matrix);
    let mut tree = AgeTree::new();
    let outcome = build_dendrogram(&mut engine, &mut tree)?;
    Ok((tree, outcome))
}
