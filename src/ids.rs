//! Dense integer ids for the flat graph representation. Newtyped so that edge tables
//! and CSR offsets index unambiguously, following the teacher's `VarId(u32)` pattern.

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FactorId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(pub u32);

/// Position of one edge's message pair (`f2v`/`v2f`) within the arena's flat arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub u32);

impl From<usize> for VarId {
    fn from(v: usize) -> Self {
        VarId(v as u32)
    }
}

impl From<VarId> for usize {
    fn from(v: VarId) -> Self {
        v.0 as usize
    }
}

impl From<usize> for FactorId {
    fn from(v: usize) -> Self {
        FactorId(v as u32)
    }
}

impl From<FactorId> for usize {
    fn from(v: FactorId) -> Self {
        v.0 as usize
    }
}

impl From<usize> for GroupId {
    fn from(v: usize) -> Self {
        GroupId(v as u32)
    }
}

impl From<GroupId> for usize {
    fn from(v: GroupId) -> Self {
        v.0 as usize
    }
}

impl From<usize> for EdgeId {
    fn from(v: usize) -> Self {
        EdgeId(v as u32)
    }
}

impl From<EdgeId> for usize {
    fn from(v: EdgeId) -> Self {
        v.0 as usize
    }
}
