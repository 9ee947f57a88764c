//! Decision policies for computer-controlled seats.

mod policy;

pub use policy::{DecisionPolicy, FirstCardPolicy, RandomPolicy};
