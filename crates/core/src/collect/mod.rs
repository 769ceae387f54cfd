//! The collection engine: dispatcher, completion coordinator, sink and
//! collector.

mod service;

pub use service::{collect, CollectionJob, CollectionPlan, MATERIALITY_FLOOR, SINK_CAPACITY};
