//! Application use cases (business logic orchestration).

mod scenario_executor;

pub use scenario_executor::ScenarioExecutor;
