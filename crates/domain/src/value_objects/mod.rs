//! Value Objects - Closed vocabularies of the CRM domain
//!
//! Immutable, compared by value, serialized as the plain strings the store uses.

mod activity_type;
mod deal_stage;
mod industry;
mod record_kind;

pub use activity_type::{ActivityType, EntityType};
pub use deal_stage::DealStage;
pub use industry::Industry;
pub use record_kind::RecordKind;
