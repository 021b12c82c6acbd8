use std::iter::FusedIterator;

use fxhash::FxHashMap;
use itertools::Itertools;

use super::*;

/// Connected, weakly and strongly connected components, the condensation and derived predicates.
///
/// All methods check the kind of the graph first (failing with `NotImplementedForKind`), then
/// whether the question is well-posed (predicates on the null graph fail with
/// `PointlessConcept`), and only then traverse.
pub trait Connectivity: EdgeList + Sized {
    /// Components of an undirected graph, each in BFS order, ordered by their first node
    ///
    /// # Examples
    /// ```
    /// use lgraphs::{prelude::*, algo::*};
    ///
    /// let mut g = AdjGraph::graph();
    /// g.add_edges_from([(1, 2), (3, 4)]);
    /// g.add_node(5);
    ///
    /// assert_eq!(g.connected_components().unwrap(), vec![vec![&1, &2], vec![&3, &4], vec![&5]]);
    /// ```
    fn connected_components(&self) -> Result<Vec<Vec<&Self::NodeId>>> {
        self.require_undirected("connected_components")?;
        Ok(ConnectedComponents::new(self)
            .map(|cc| ids_of(self, cc))
            .collect())
    }

    fn number_connected_components(&self) -> Result<usize> {
        self.require_undirected("number_connected_components")?;
        Ok(ConnectedComponents::new(self).count())
    }

    fn is_connected(&self) -> Result<bool> {
        self.require_undirected("is_connected")?;
        require_nonempty(self, "connectivity")?;
        Ok(spans_graph(self))
    }

    /// The component containing `node`
    fn node_connected_component(&self, node: &Self::NodeId) -> Result<Vec<&Self::NodeId>> {
        self.require_undirected("node_connected_component")?;
        let u = self.try_index_of(node)?;
        Ok(ids_of(self, self.bfs_from(u)))
    }

    /// Components of the undirected view of a directed graph
    fn weakly_connected_components(&self) -> Result<Vec<Vec<&Self::NodeId>>> {
        self.require_directed("weakly_connected_components")?;
        let view = self.undirected_view();
        Ok(ConnectedComponents::new(&view)
            .map(|cc| ids_of(self, cc))
            .collect())
    }

    fn number_weakly_connected_components(&self) -> Result<usize> {
        self.require_directed("number_weakly_connected_components")?;
        Ok(ConnectedComponents::new(&self.undirected_view()).count())
    }

    fn is_weakly_connected(&self) -> Result<bool> {
        self.require_directed("is_weakly_connected")?;
        require_nonempty(self, "weak connectivity")?;
        Ok(spans_graph(&self.undirected_view()))
    }

    /// Strongly connected components by Tarjan's algorithm, in reverse topological order of the
    /// condensation
    fn strongly_connected_components(&self) -> Result<Vec<Vec<&Self::NodeId>>> {
        self.require_directed("strongly_connected_components")?;
        Ok(StronglyConnectedComponents::new(self)
            .map(|scc| ids_of(self, scc))
            .collect())
    }

    /// Strongly connected components by Kosaraju's two-pass algorithm: the postorder of a DFS on
    /// the reversed graph orders the roots of a DFS on the graph itself, every tree of which is
    /// one component.
    fn kosaraju_strongly_connected_components(&self) -> Result<Vec<Vec<&Self::NodeId>>> {
        self.require_directed("kosaraju_strongly_connected_components")?;

        let reversed = ReverseView::new(self);
        let mut roots = DfsLabeledEdges::new(&reversed, reversed.vertices())
            .filter_map(|(_, v, event)| (event == DfsEvent::Reverse).then_some(v))
            .collect_vec();
        roots.reverse();

        let mut components: Vec<Vec<&Self::NodeId>> = Vec::new();
        for (u, v, event) in DfsLabeledEdges::new(self, roots) {
            if event != DfsEvent::Forward {
                continue;
            }
            if u == v {
                components.push(Vec::new());
            }
            if let Some(component) = components.last_mut() {
                component.push(self.node_id(v));
            }
        }
        Ok(components)
    }

    fn number_strongly_connected_components(&self) -> Result<usize> {
        self.require_directed("number_strongly_connected_components")?;
        Ok(StronglyConnectedComponents::new(self).count())
    }

    fn is_strongly_connected(&self) -> Result<bool> {
        self.require_directed("is_strongly_connected")?;
        require_nonempty(self, "strong connectivity")?;
        Ok(StronglyConnectedComponents::new(self)
            .next()
            .is_some_and(|scc| scc.len() == self.len()))
    }

    /// Contracts each strongly connected component into a single node.
    ///
    /// `scc` defaults to [`Connectivity::strongly_connected_components`]; a given partition must
    /// cover every node exactly once.
    fn condensation(&self, scc: Option<&[Vec<Self::NodeId>]>) -> Result<Condensation<Self::NodeId>> {
        self.require_directed("condensation")?;

        let members: Vec<Vec<Self::NodeId>> = match scc {
            Some(scc) => scc.to_vec(),
            None => StronglyConnectedComponents::new(self)
                .map(|c| c.into_iter().map(|u| self.node_id(u).clone()).collect())
                .collect(),
        };
        Condensation::new(self, members)
    }

    /// Strongly connected components without arcs leaving them
    fn attracting_components(&self) -> Result<Vec<Vec<&Self::NodeId>>> {
        self.require_directed("attracting_components")?;
        let sccs = StronglyConnectedComponents::new(self).collect_vec();

        let mut component_of = vec![0; self.node_bound() as usize];
        for (i, scc) in sccs.iter().enumerate() {
            for &u in scc {
                component_of[u as usize] = i;
            }
        }

        Ok(sccs
            .into_iter()
            .enumerate()
            .filter(|(i, scc)| {
                scc.iter()
                    .all(|&u| self.neighbors_of(u).all(|v| component_of[v as usize] == *i))
            })
            .map(|(_, scc)| ids_of(self, scc))
            .collect())
    }

    fn number_attracting_components(&self) -> Result<usize> {
        Ok(self.attracting_components()?.len())
    }

    /// Returns *true* if the graph itself is a single attracting component
    fn is_attracting_component(&self) -> Result<bool> {
        let components = self.attracting_components()?;
        Ok(components.len() == 1 && components[0].len() == self.len())
    }

    /// Returns *true* if for every pair of nodes one is reachable from the other
    fn is_semiconnected(&self) -> Result<bool> {
        self.require_directed("is_semiconnected")?;
        require_nonempty(self, "semiconnectivity")?;

        if !self.is_weakly_connected()? {
            return Ok(false);
        }

        let condensed = self.condensation(None)?.graph;
        let order = condensed.topological_sort()?;
        Ok(order
            .into_iter()
            .tuple_windows()
            .all(|(u, v)| condensed.has_edge(u, v)))
    }
}

impl<G> Connectivity for G where G: EdgeList + Sized {}

/// Fails with `PointlessConcept` on the null graph
pub(super) fn require_nonempty<G: GraphNodeOrder>(graph: &G, concept: &str) -> Result<()> {
    if graph.is_empty() {
        Err(GraphError::pointless(format!(
            "{concept} is undefined for the null graph"
        )))
    } else {
        Ok(())
    }
}

pub(super) fn ids_of<G, I>(graph: &G, nodes: I) -> Vec<&G::NodeId>
where
    G: GraphNodeOrder,
    I: IntoIterator<Item = NodeIndex>,
{
    nodes.into_iter().map(|u| graph.node_id(u)).collect()
}

/// Returns *true* if a BFS from any node reaches every node
fn spans_graph<G: AdjacencyList>(graph: &G) -> bool {
    graph
        .vertices()
        .next()
        .is_some_and(|u| graph.bfs_from(u).count() == graph.len())
}

/// Index-level iterator over the connected components of a graph, found by BFS restarts in
/// insertion order. On directed graphs it follows arcs forward only; use an
/// [`UndirectedView`] for weak components.
pub struct ConnectedComponents<'a, G>
where
    G: AdjacencyList,
{
    bfs: Option<BFS<'a, G>>,
}

impl<'a, G> ConnectedComponents<'a, G>
where
    G: AdjacencyList,
{
    pub fn new(graph: &'a G) -> Self {
        Self {
            bfs: graph.vertices().next().map(|u| graph.bfs_from(u)),
        }
    }
}

impl<G> Iterator for ConnectedComponents<'_, G>
where
    G: AdjacencyList,
{
    type Item = Vec<NodeIndex>;

    fn next(&mut self) -> Option<Self::Item> {
        let bfs = self.bfs.as_mut()?;
        loop {
            let cc = bfs.by_ref().collect_vec();
            if !cc.is_empty() {
                return Some(cc);
            }

            if !bfs.try_restart_at_unvisited() {
                self.bfs = None;
                return None;
            }
        }
    }
}

impl<G> FusedIterator for ConnectedComponents<'_, G> where G: AdjacencyList {}

/// Implementation of Tarjan's Algorithm for Strongly Connected Components.
/// It is designed as an iterator that emits the nodes of one strongly connected component at a
/// time. The order of nodes within a component is the order in which the search discovered
/// them; the components themselves are emitted in reverse topological order of the SCCs (i.e. if
/// each SCC were contracted into a single node).
pub struct StronglyConnectedComponents<'a, G>
where
    G: DirectedAdjacencyList,
{
    graph: &'a G,
    idx: NodeIndex,

    states: Vec<NodeState>,
    potentially_unvisited: NodeIndex,

    include_singletons: bool,

    path_stack: Vec<NodeIndex>,

    call_stack: Vec<StackFrame<'a, G>>,
}

impl<'a, G> StronglyConnectedComponents<'a, G>
where
    G: DirectedAdjacencyList,
{
    /// Construct the iterator for some graph
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            idx: 0,
            states: vec![Default::default(); graph.node_bound() as usize],
            potentially_unvisited: 0,

            include_singletons: true,

            path_stack: Vec::with_capacity(32),
            call_stack: Vec::with_capacity(32),
        }
    }

    /// Each node that is not part of a cycle is returned as its own SCC.
    /// By setting `include = false`, those nodes are not returned.
    pub fn set_include_singletons(&mut self, include: bool) {
        self.include_singletons = include;
    }

    pub fn include_singletons(mut self, include: bool) -> Self {
        self.set_include_singletons(include);
        self
    }

    /// Just like in a classic DFS where we want to compute a spanning-forest, we will need to
    /// visit each node at least once. We start with the first node, and cover all nodes reachable
    /// from there in `search`. Then, we search for an untouched node here, and start over.
    fn next_unvisited_node(&mut self) -> Option<NodeIndex> {
        while self.potentially_unvisited < self.graph.node_bound() {
            let v = self.potentially_unvisited;
            if self.graph.contains_vertex(v) && !self.states[v as usize].visited {
                self.push_node(v, None);
                return Some(v);
            }

            self.potentially_unvisited += 1;
        }
        None
    }

    /// Put a pristine stack frame on the call stack. Roughly speaking, this is the first step
    /// to a recursive call of search.
    fn push_node(&mut self, node: NodeIndex, parent: Option<NodeIndex>) {
        self.call_stack.push(StackFrame {
            node,
            parent: parent.unwrap_or(node),
            initial_stack_len: 0,
            first_call: true,
            has_loop: false,
            neighbors: self.graph.neighbors_of(node),
        });
    }

    fn search(&mut self) -> Option<Vec<NodeIndex>> {
        // The recursion of Tarjan's algorithm is simulated by `self.call_stack`, which also keeps
        // the partially consumed neighbor iterators. Hence we can return a component and resume
        // the search on the next call.
        'recurse: while let Some(frame) = self.call_stack.last_mut() {
            let v = frame.node;

            if frame.first_call {
                frame.first_call = false;
                frame.initial_stack_len = self.path_stack.len() as NodeIndex;

                self.states[v as usize].visit(self.idx);
                self.idx += 1;

                self.path_stack.push(v);
            }

            for w in frame.neighbors.by_ref() {
                let w_state = self.states[w as usize];
                frame.has_loop |= w == v;

                if !w_state.visited {
                    self.push_node(w, Some(v));
                    continue 'recurse;
                } else if w_state.on_stack {
                    self.states[v as usize].try_lower_link(w_state.index);
                }
            }

            let Some(frame) = self.call_stack.pop() else {
                break;
            };
            let state = self.states[v as usize];

            self.states[frame.parent as usize].try_lower_link(state.low_link);

            if state.is_root() {
                if !self.include_singletons
                    && self.path_stack.last() == Some(&v)
                    && !frame.has_loop
                {
                    // singleton without loop: only undo the stack
                    self.states[v as usize].on_stack = false;
                    self.path_stack.pop();
                } else {
                    let component = self
                        .path_stack
                        .split_off(frame.initial_stack_len as usize);

                    for &w in &component {
                        self.states[w as usize].on_stack = false;
                    }

                    debug_assert_eq!(component.first(), Some(&v));

                    return Some(component);
                }
            }
        }

        None
    }
}

impl<G> Iterator for StronglyConnectedComponents<'_, G>
where
    G: DirectedAdjacencyList,
{
    type Item = Vec<NodeIndex>;

    /// Returns the nodes of the next SCC or None if no further SCC exists
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(x) = self.search() {
                return Some(x);
            }

            self.next_unvisited_node()?;
        }
    }
}

impl<G> FusedIterator for StronglyConnectedComponents<'_, G> where G: DirectedAdjacencyList {}

struct StackFrame<'a, T>
where
    T: DirectedAdjacencyList + 'a,
{
    node: NodeIndex,
    parent: NodeIndex,
    initial_stack_len: NodeIndex,
    first_call: bool,
    has_loop: bool,
    neighbors: T::NeighborIter<'a>,
}

#[derive(Debug, Clone, Copy, Default)]
struct NodeState {
    visited: bool,
    on_stack: bool,
    index: NodeIndex,
    low_link: NodeIndex,
}

impl NodeState {
    fn visit(&mut self, u: NodeIndex) {
        debug_assert!(!self.visited);
        self.index = u;
        self.low_link = u;
        self.visited = true;
        self.on_stack = true;
    }

    fn try_lower_link(&mut self, l: NodeIndex) {
        self.low_link = self.low_link.min(l);
    }

    fn is_root(&self) -> bool {
        self.index == self.low_link
    }
}

/// The graph of strongly connected components: node `i` of `graph` stands for `members[i]` and
/// there is an arc `i -> j` iff some arc leads from `members[i]` to `members[j]`.
#[derive(Debug, Clone)]
pub struct Condensation<N: NodeId> {
    pub graph: AdjGraph<usize>,
    pub members: Vec<Vec<N>>,
    pub mapping: FxHashMap<N, usize>,
}

impl<N: NodeId> Condensation<N> {
    fn new<G>(graph: &G, members: Vec<Vec<N>>) -> Result<Self>
    where
        G: EdgeList<NodeId = N>,
    {
        let mut mapping = FxHashMap::default();
        for (i, component) in members.iter().enumerate() {
            for id in component {
                graph.try_index_of(id)?;
                if mapping.insert(id.clone(), i).is_some() {
                    return Err(GraphError::Algorithm(format!(
                        "node {id:?} is in more than one component"
                    )));
                }
            }
        }
        if mapping.len() != graph.len() {
            return Err(GraphError::Algorithm(
                "components do not cover every node".to_string(),
            ));
        }

        let mut condensed = AdjGraph::digraph();
        condensed.add_nodes_from(0..members.len());
        for (u, v) in graph.edges() {
            let (cu, cv) = (mapping[u], mapping[v]);
            if cu != cv {
                condensed.add_edge(cu, cv);
            }
        }

        Ok(Self {
            graph: condensed,
            members,
            mapping,
        })
    }

    /// The component containing `node`
    pub fn component_of(&self, node: &N) -> Option<usize> {
        self.mapping.get(node).copied()
    }
}
