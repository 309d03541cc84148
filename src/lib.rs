//! Flat, vectorized loopy belief propagation and smooth dual LP-MAP inference over
//! discrete factor graphs.
//!
//! The pipeline is: describe variables and factors (`variable`, `factor_spec`),
//! compile them into a flat, immutable graph (`fgr`), allocate the mutable per-run
//! state (`arena`), and hand both to a driver through the facade (`facade`):
//!
//! ```no_run
//! use factorflow::config::BpConfig;
//! use factorflow::facade::{build_inferer, Backend};
//! use factorflow::factor_spec::{FactorGroupSpec, PairwiseFactor, PairwiseFactorGroup, VarRef};
//! use factorflow::fgr::Fgr;
//! use factorflow::variable::VariableGroup;
//!
//! let vars = vec![VariableGroup::uniform("x", 2, 2)?];
//! let groups = vec![FactorGroupSpec::Pairwise(PairwiseFactorGroup {
//!     name: "edge".into(),
//!     dims: (2, 2),
//!     factors: vec![PairwiseFactor {
//!         scope: (VarRef::new("x", 0), VarRef::new("x", 1)),
//!         log_potentials: vec![1.0, 0.0, 0.0, 1.0],
//!     }],
//! })];
//! let fgr = Fgr::compile(&vars, groups)?;
//!
//! let mut inferer = build_inferer(fgr, Backend::Bp(BpConfig::new()));
//! inferer.run(20, 1.0, 0.0)?;
//! let states = inferer.decode_map_states();
//! # Ok::<(), factorflow::error::FactorFlowError>(())
//! ```

pub mod arena;
pub mod bp;
pub mod config;
pub mod decode;
pub mod error;
pub mod executor;
pub mod facade;
pub mod factor_spec;
pub mod fgr;
pub mod ids;
pub mod kernel;
pub mod message_pass;
pub mod numerics;
pub mod sdlp;
pub mod variable;

pub use error::{FactorFlowError, Result};
pub use facade::{build_inferer, Backend, Inferer};
pub use fgr::Fgr;
