/*!
# Graph Algorithms

This module provides the **graph algorithms** built on top of the graph operations of [`crate::ops`].
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use lgraphs::algo::*;
```
and gain access to node and edge traversals, connectivity, biconnected components, bridges and maximum flows.
If possible, algorithms are provided as **iterators**, making it easy to consume results lazily.
Every algorithm runs on graphs and views alike.
*/

mod biconnected;
mod bridges;
mod connectivity;
mod dfs;
mod edge_traversal;
mod max_flow;
pub mod residual;
mod traversal;

use itertools::Itertools;

use crate::{prelude::*, utils::*};

pub use biconnected::*;
pub use bridges::*;
pub use connectivity::*;
pub use dfs::*;
pub use edge_traversal::*;
pub use max_flow::*;
pub use residual::*;
pub use traversal::*;
