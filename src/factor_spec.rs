//! The factor-graph input contract of spec §6: what the (external, out-of-scope)
//! graph-construction layer hands to `Fgr::compile`. A `VarRef` is a symbolic
//! `(variable group name, index within group)` pair — the dense `VarId` a variable
//! resolves to is an FGR compilation detail (spec §4.1), not something the caller
//! assigns, so factor specs are built before any ids exist.

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VarRef {
    pub group: String,
    pub index: usize,
}

impl VarRef {
    pub fn new(group: impl Into<String>, index: usize) -> Self {
        Self {
            group: group.into(),
            index,
        }
    }
}

/// One row of an enumerated factor's explicit `(configuration, log_value)` table
/// (spec §3 Factor/Enumerated). `configuration` is aligned to the factor's `scope`
/// order; entries not listed default to `-inf`.
#[derive(Clone, Debug)]
pub struct EnumeratedRow {
    pub configuration: Vec<usize>,
    pub log_value: f64,
}

#[derive(Clone, Debug)]
pub struct EnumeratedFactor {
    pub scope: Vec<VarRef>,
    pub rows: Vec<EnumeratedRow>,
}

#[derive(Clone, Debug)]
pub struct EnumeratedFactorGroup {
    pub name: String,
    pub factors: Vec<EnumeratedFactor>,
}

/// A pairwise factor's dense `k1 x k2` log-potential matrix, row-major over
/// `(scope.0, scope.1)`. Every factor in a `PairwiseFactorGroup` shares the group's
/// declared `dims` (spec §3: "both variables must be the same shape across a group
/// for vectorization").
#[derive(Clone, Debug)]
pub struct PairwiseFactor {
    pub scope: (VarRef, VarRef),
    pub log_potentials: Vec<f64>,
}

#[derive(Clone, Debug)]
pub struct PairwiseFactorGroup {
    pub name: String,
    pub dims: (usize, usize),
    pub factors: Vec<PairwiseFactor>,
}

/// One logical factor: `n` binary parents and one binary child. Shared shape between
/// OR and AND groups (spec §3) — only the kernel semantics differ.
#[derive(Clone, Debug)]
pub struct LogicalFactor {
    pub parents: Vec<VarRef>,
    pub child: VarRef,
}

#[derive(Clone, Debug)]
pub struct ORFactorGroup {
    pub name: String,
    pub factors: Vec<LogicalFactor>,
}

#[derive(Clone, Debug)]
pub struct ANDFactorGroup {
    pub name: String,
    pub factors: Vec<LogicalFactor>,
}

#[derive(Clone, Debug)]
pub enum FactorGroupSpec {
    Enumerated(EnumeratedFactorGroup),
    Pairwise(PairwiseFactorGroup),
    Or(ORFactorGroup),
    And(ANDFactorGroup),
}

impl FactorGroupSpec {
    pub fn name(&self) -> &str {
        match self {
            Self::Enumerated(g) => &g.name,
            Self::Pairwise(g) => &g.name,
            Self::Or(g) => &g.name,
            Self::And(g) => &g.name,
        }
    }
}
