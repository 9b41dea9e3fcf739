pub mod builder;
pub mod schedule_dag;

pub use builder::GraphBuilder;
pub use schedule_dag::ScheduleDag;
