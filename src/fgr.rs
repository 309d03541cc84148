//! Flat Graph Representation (spec §4.1): compiles named variable groups and factor
//! group specs (spec §6) into a single immutable, array-indexed graph. Mirrors the
//! teacher's `DiscreteFactor` flat stride-indexed log-tables
//! (`radiate-pgm/src/factor/discrete.rs`), generalized from one factor to a whole
//! graph's worth of CSR-style edge tables.
//!
//! Execution order is fixed at compile time: group id ascending, then factor id
//! ascending within a group, then slot ascending within a factor (spec §4.1
//! determinism requirement). Every table below is built in that order and nothing
//! downstream is allowed to reorder it.

use std::collections::HashMap;
use std::ops::Range;

use crate::error::{FactorFlowError, Result};
use crate::factor_spec::{FactorGroupSpec, VarRef};
use crate::ids::{EdgeId, FactorId, GroupId, VarId};
use crate::variable::VariableGroup;

/// What kind of kernel a compiled factor group dispatches to (spec §4.3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FactorKind {
    Enumerated,
    Pairwise,
    Or,
    And,
}

/// One edge: a `(group, factor, slot)` triple pointing at the variable it connects to.
/// `EdgeId` is this struct's index in `Fgr::edges`.
#[derive(Clone, Copy, Debug)]
pub struct EdgeRef {
    pub group: GroupId,
    pub factor: FactorId,
    pub slot: usize,
    pub var: VarId,
}

/// Dense log-potential table for one enumerated or pairwise factor, row-major over
/// its scope's Cartesian product (teacher: `DiscreteFactor::logp`).
#[derive(Clone, Debug)]
pub struct DenseTable {
    pub dims: Vec<usize>,
    pub strides: Vec<usize>,
    pub log_potentials: Vec<f64>,
}

impl DenseTable {
    fn new(dims: Vec<usize>) -> Self {
        let mut strides = vec![0usize; dims.len()];
        let mut acc = 1usize;
        for i in (0..dims.len()).rev() {
            strides[i] = acc;
            acc = acc.saturating_mul(dims[i]);
        }
        let total = crate::numerics::prod_usize(&dims);
        Self {
            dims,
            strides,
            log_potentials: vec![f64::NEG_INFINITY; total],
        }
    }

    fn flat_index(&self, configuration: &[usize]) -> Option<usize> {
        if configuration.len() != self.dims.len() {
            return None;
        }
        let mut idx = 0usize;
        for (c, (&dim, &stride)) in configuration
            .iter()
            .zip(self.dims.iter().zip(self.strides.iter()))
        {
            if *c >= dim {
                return None;
            }
            idx += c * stride;
        }
        Some(idx)
    }
}

/// One compiled factor group. Scopes and edge ids are stored per factor, in slot
/// order; potentials are `Dense` for enumerated/pairwise groups and absent (`None`)
/// for the logical OR/AND groups, whose semantics are purely structural (spec §4.3).
pub struct CompiledFactorGroup {
    pub name: String,
    pub kind: FactorKind,
    pub scopes: Vec<Vec<VarId>>,
    pub edge_ids: Vec<Vec<EdgeId>>,
    pub tables: Vec<Option<DenseTable>>,
}

impl CompiledFactorGroup {
    pub fn num_factors(&self) -> usize {
        self.scopes.len()
    }

    pub fn table(&self, factor: usize) -> &DenseTable {
        self.tables[factor]
            .as_ref()
            .expect("table() called on a logical (OR/AND) factor group")
    }
}

/// The compiled, immutable flat graph.
pub struct Fgr {
    pub(crate) var_num_states: Vec<usize>,
    /// Cumulative offsets into any flat per-variable-state array (evidence, beliefs):
    /// variable `v`'s slice is `var_state_offsets[v]..var_state_offsets[v + 1]`.
    pub(crate) var_state_offsets: Vec<usize>,
    var_group_ranges: HashMap<String, Range<usize>>,
    pub(crate) groups: Vec<CompiledFactorGroup>,
    pub(crate) edges: Vec<EdgeRef>,
    /// Offset into the flat `f2v`/`v2f` message arrays for each edge; length
    /// `edges.len() + 1`. Edge `e`'s message occupies
    /// `edge_msg_offsets[e]..edge_msg_offsets[e + 1]`, a slice of length
    /// `var_num_states[edges[e].var]`.
    pub(crate) edge_msg_offsets: Vec<usize>,
    /// Reverse (variable -> incident edges) CSR map, used by variable-side updates
    /// and by `decode_map_states`/`get_marginals`.
    pub(crate) var_edge_offsets: Vec<usize>,
    pub(crate) var_edges: Vec<EdgeId>,
    /// Per-group, per-factor range into the flat log-potentials-override array
    /// (spec §4.2); `None` for logical (OR/AND) factors, which have no table.
    pub(crate) group_table_ranges: Vec<Vec<Option<Range<usize>>>>,
    pub(crate) total_table_len: usize,
}

impl Fgr {
    pub fn num_vars(&self) -> usize {
        self.var_num_states.len()
    }

    pub fn num_states(&self, var: VarId) -> usize {
        self.var_num_states[usize::from(var)]
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn total_message_len(&self) -> usize {
        *self.edge_msg_offsets.last().unwrap_or(&0)
    }

    pub fn edge(&self, e: EdgeId) -> EdgeRef {
        self.edges[usize::from(e)]
    }

    pub fn edge_range(&self, e: EdgeId) -> Range<usize> {
        let i = usize::from(e);
        self.edge_msg_offsets[i]..self.edge_msg_offsets[i + 1]
    }

    pub fn var_range(&self, group_name: &str) -> Option<Range<usize>> {
        self.var_group_ranges.get(group_name).cloned()
    }

    pub fn var_state_range(&self, var: VarId) -> Range<usize> {
        let v = usize::from(var);
        self.var_state_offsets[v]..self.var_state_offsets[v + 1]
    }

    pub fn total_var_state_len(&self) -> usize {
        *self.var_state_offsets.last().unwrap_or(&0)
    }

    pub fn edges_of_var(&self, var: VarId) -> &[EdgeId] {
        let v = usize::from(var);
        &self.var_edges[self.var_edge_offsets[v]..self.var_edge_offsets[v + 1]]
    }

    pub fn group(&self, g: GroupId) -> &CompiledFactorGroup {
        &self.groups[usize::from(g)]
    }

    pub fn group_by_name(&self, name: &str) -> Option<(GroupId, &CompiledFactorGroup)> {
        self.groups
            .iter()
            .enumerate()
            .find(|(_, g)| g.name == name)
            .map(|(i, g)| (GroupId::from(i), g))
    }

    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &CompiledFactorGroup)> {
        self.groups
            .iter()
            .enumerate()
            .map(|(i, g)| (GroupId::from(i), g))
    }

    /// The range into the flat log-potentials-override array for one factor's table,
    /// or `None` for a logical (OR/AND) factor (spec §4.2).
    pub fn table_range(&self, group: GroupId, factor: usize) -> Option<Range<usize>> {
        self.group_table_ranges[usize::from(group)][factor].clone()
    }

    pub fn total_table_len(&self) -> usize {
        self.total_table_len
    }

    /// The combined range spanning every factor's table in a named group, in factor
    /// order (used to validate a whole-group log-potentials override). The outer
    /// `Option` is `None` when `group_name` is unknown; the inner `Option` is `None`
    /// when the group has no tables at all (a logical OR/AND group).
    pub fn group_table_range(&self, group_name: &str) -> Option<Option<Range<usize>>> {
        let (gid, _) = self.group_by_name(group_name)?;
        let ranges = &self.group_table_ranges[usize::from(gid)];
        let start = ranges.iter().flatten().map(|r| r.start).min();
        let end = ranges.iter().flatten().map(|r| r.end).max();
        match (start, end) {
            (Some(s), Some(e)) => Some(Some(s..e)),
            _ => Some(None),
        }
    }

    /// Flattens every factor's compiled table into the graph's baseline
    /// log-potentials array, in the same layout `group_table_ranges` indexes into —
    /// the initial value of `ArenaState::log_potentials_override` (spec §4.2).
    pub fn baseline_log_potentials(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.total_table_len];
        for (gi, group) in self.groups.iter().enumerate() {
            for (fi, table) in group.tables.iter().enumerate() {
                if let (Some(table), Some(range)) = (table, self.group_table_ranges[gi][fi].clone()) {
                    out[range].copy_from_slice(&table.log_potentials);
                }
            }
        }
        out
    }

    /// Compiles variable groups and factor group specs into an `Fgr`.
    ///
    /// Variable ids are assigned densely in the order `var_groups` is given
    /// (group 0's variables first, then group 1's, ...). Factor specs reference
    /// variables symbolically via `VarRef { group, index }`, resolved here.
    pub fn compile(var_groups: &[VariableGroup], factor_groups: Vec<FactorGroupSpec>) -> Result<Self> {
        let mut var_num_states = Vec::new();
        let mut var_group_ranges = HashMap::new();
        for vg in var_groups {
            if var_group_ranges.contains_key(&vg.name) {
                return Err(FactorFlowError::shape(format!(
                    "duplicate variable group name: {}",
                    vg.name
                )));
            }
            let start = var_num_states.len();
            for v in &vg.variables {
                var_num_states.push(v.num_states);
            }
            var_group_ranges.insert(vg.name.clone(), start..var_num_states.len());
        }

        let resolve = |r: &VarRef| -> Result<VarId> {
            let range = var_group_ranges
                .get(&r.group)
                .ok_or_else(|| FactorFlowError::unknown_variable_group(r.group.clone()))?;
            if r.index >= range.len() {
                return Err(FactorFlowError::shape(format!(
                    "index {} out of range for variable group '{}' of length {}",
                    r.index,
                    r.group,
                    range.len()
                )));
            }
            Ok(VarId::from(range.start + r.index))
        };

        let mut groups = Vec::with_capacity(factor_groups.len());
        let mut seen_group_names = std::collections::HashSet::new();
        for spec in factor_groups {
            if !seen_group_names.insert(spec.name().to_string()) {
                return Err(FactorFlowError::shape(format!(
                    "duplicate factor group name: {}",
                    spec.name()
                )));
            }
            groups.push(compile_group(spec, &resolve, &var_num_states)?);
        }

        // Global edge table, in (group, factor, slot) order.
        let mut edges = Vec::new();
        let mut edge_ids: Vec<Vec<Vec<EdgeId>>> = Vec::with_capacity(groups.len());
        for (gi, group) in groups.iter().enumerate() {
            let gid = GroupId::from(gi);
            let mut per_factor = Vec::with_capacity(group.scopes.len());
            for (fi, scope) in group.scopes.iter().enumerate() {
                let fid = FactorId::from(fi);
                let mut slots = Vec::with_capacity(scope.len());
                for (slot, &var) in scope.iter().enumerate() {
                    let eid = EdgeId::from(edges.len());
                    edges.push(EdgeRef {
                        group: gid,
                        factor: fid,
                        slot,
                        var,
                    });
                    slots.push(eid);
                }
                per_factor.push(slots);
            }
            edge_ids.push(per_factor);
        }
        for (group, per_factor) in groups.iter_mut().zip(edge_ids.into_iter()) {
            group.edge_ids = per_factor;
        }

        let mut edge_msg_offsets = Vec::with_capacity(edges.len() + 1);
        let mut acc = 0usize;
        edge_msg_offsets.push(0);
        for e in &edges {
            acc += var_num_states[usize::from(e.var)];
            edge_msg_offsets.push(acc);
        }

        let num_vars = var_num_states.len();
        let mut var_edge_counts = vec![0usize; num_vars];
        for e in &edges {
            var_edge_counts[usize::from(e.var)] += 1;
        }
        let mut var_edge_offsets = Vec::with_capacity(num_vars + 1);
        var_edge_offsets.push(0);
        for c in &var_edge_counts {
            let last = *var_edge_offsets.last().unwrap();
            var_edge_offsets.push(last + c);
        }
        let mut cursor = var_edge_offsets[..num_vars].to_vec();
        let mut var_edges = vec![EdgeId::from(0usize); edges.len()];
        for (ei, e) in edges.iter().enumerate() {
            let v = usize::from(e.var);
            var_edges[cursor[v]] = EdgeId::from(ei);
            cursor[v] += 1;
        }

        let mut var_state_offsets = Vec::with_capacity(num_vars + 1);
        let mut state_acc = 0usize;
        var_state_offsets.push(0);
        for &k in &var_num_states {
            state_acc += k;
            var_state_offsets.push(state_acc);
        }

        let mut group_table_ranges = Vec::with_capacity(groups.len());
        let mut table_acc = 0usize;
        for group in &groups {
            let mut ranges = Vec::with_capacity(group.tables.len());
            for table in &group.tables {
                match table {
                    Some(table) => {
                        let start = table_acc;
                        table_acc += table.log_potentials.len();
                        ranges.push(Some(start..table_acc));
                    }
                    None => ranges.push(None),
                }
            }
            group_table_ranges.push(ranges);
        }
        let total_table_len = table_acc;

        Ok(Fgr {
            var_num_states,
            var_state_offsets,
            var_group_ranges,
            groups,
            edges,
            edge_msg_offsets,
            var_edge_offsets,
            var_edges,
            group_table_ranges,
            total_table_len,
        })
    }
}

fn compile_group(
    spec: FactorGroupSpec,
    resolve: &impl Fn(&VarRef) -> Result<VarId>,
    var_num_states: &[usize],
) -> Result<CompiledFactorGroup> {
    match spec {
        FactorGroupSpec::Enumerated(g) => {
            let mut scopes = Vec::with_capacity(g.factors.len());
            let mut tables = Vec::with_capacity(g.factors.len());
            for factor in g.factors {
                let scope = resolve_scope(&factor.scope, resolve)?;
                require_distinct(&scope, &g.name)?;
                let dims: Vec<usize> = scope.iter().map(|&v| var_num_states[usize::from(v)]).collect();
                let mut table = DenseTable::new(dims);
                for row in &factor.rows {
                    let idx = table.flat_index(&row.configuration).ok_or_else(|| {
                        FactorFlowError::shape(format!(
                            "enumerated factor in group '{}': row configuration {:?} does not match scope shape {:?}",
                            g.name, row.configuration, table.dims
                        ))
                    })?;
                    table.log_potentials[idx] = row.log_value;
                }
                scopes.push(scope);
                tables.push(Some(table));
            }
            Ok(CompiledFactorGroup {
                name: g.name,
                kind: FactorKind::Enumerated,
                scopes,
                edge_ids: Vec::new(),
                tables,
            })
        }
        FactorGroupSpec::Pairwise(g) => {
            let mut scopes = Vec::with_capacity(g.factors.len());
            let mut tables = Vec::with_capacity(g.factors.len());
            let (k1, k2) = g.dims;
            let expected_len = k1 * k2;
            for factor in g.factors {
                let v0 = resolve(&factor.scope.0)?;
                let v1 = resolve(&factor.scope.1)?;
                require_distinct(&[v0, v1], &g.name)?;
                if var_num_states[usize::from(v0)] != k1 || var_num_states[usize::from(v1)] != k2 {
                    return Err(FactorFlowError::shape(format!(
                        "pairwise factor in group '{}': scope cardinalities do not match declared dims {:?}",
                        g.name, g.dims
                    )));
                }
                if factor.log_potentials.len() != expected_len {
                    return Err(FactorFlowError::shape(format!(
                        "pairwise factor in group '{}': expected {} log-potential entries, got {}",
                        g.name,
                        expected_len,
                        factor.log_potentials.len()
                    )));
                }
                let table = DenseTable {
                    dims: vec![k1, k2],
                    strides: vec![k2, 1],
                    log_potentials: factor.log_potentials,
                };
                scopes.push(vec![v0, v1]);
                tables.push(Some(table));
            }
            Ok(CompiledFactorGroup {
                name: g.name,
                kind: FactorKind::Pairwise,
                scopes,
                edge_ids: Vec::new(),
                tables,
            })
        }
        FactorGroupSpec::Or(g) => compile_logical(g.name, g.factors, FactorKind::Or, resolve, var_num_states),
        FactorGroupSpec::And(g) => compile_logical(g.name, g.factors, FactorKind::And, resolve, var_num_states),
    }
}

fn compile_logical(
    name: String,
    factors: Vec<crate::factor_spec::LogicalFactor>,
    kind: FactorKind,
    resolve: &impl Fn(&VarRef) -> Result<VarId>,
    var_num_states: &[usize],
) -> Result<CompiledFactorGroup> {
    let mut scopes = Vec::with_capacity(factors.len());
    for factor in &factors {
        if factor.parents.is_empty() {
            return Err(FactorFlowError::shape(format!(
                "logical factor in group '{}' must have at least one parent",
                name
            )));
        }
        let mut scope = Vec::with_capacity(factor.parents.len() + 1);
        for p in &factor.parents {
            scope.push(resolve(p)?);
        }
        scope.push(resolve(&factor.child)?);
        require_distinct(&scope, &name)?;
        for &v in &scope {
            if var_num_states[usize::from(v)] != 2 {
                return Err(FactorFlowError::shape(format!(
                    "logical factor in group '{}': all variables must be binary (k=2)",
                    name
                )));
            }
        }
        scopes.push(scope);
    }
    let tables = vec![None; scopes.len()];
    Ok(CompiledFactorGroup {
        name,
        kind,
        scopes,
        edge_ids: Vec::new(),
        tables,
    })
}

fn require_distinct(scope: &[VarId], group_name: &str) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for &v in scope {
        if !seen.insert(v) {
            return Err(FactorFlowError::shape(format!(
                "factor in group '{}' references the same variable twice in its scope",
                group_name
            )));
        }
    }
    Ok(())
}

fn resolve_scope(refs: &[VarRef], resolve: &impl Fn(&VarRef) -> Result<VarId>) -> Result<Vec<VarId>> {
    refs.iter().map(resolve).collect()
}
