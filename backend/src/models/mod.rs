//! Domain types
//!
//! Plain-data shapes shared by the strategies, the rule pipeline, and the
//! API boundary. Everything here derives Serialize/Deserialize; the wire
//! format is camelCase field names with snake_case enum tags, matching the
//! JSON the surrounding HTTP layer speaks.
//!
//! CRITICAL: All money values are i64 (minor units)

pub mod allocation;
pub mod context;
pub mod envelope;
pub mod rule;

pub use allocation::{AllocationItem, PreviousAllocation, RuleAllocation};
pub use context::AllocationContext;
pub use envelope::{EnvelopeTarget, Frequency, BILLS_CATEGORY};
pub use rule::{Condition, ConditionKind, Rule, RuleConfig, RuleKind, SourceKind};
