//! 仿真核心模块
//!
//! 事件驱动仿真的核心组件：仿真时间、事件、事件队列、世界与仿真器，
//! 以及场景描述（scenario JSON）。

// 子模块声明
mod event;
mod scenario;
mod scheduled_event;
mod simulator;
mod time;
mod world;

// 重新导出公共接口
pub use event::Event;
pub use scenario::{
    BurstSpec, HostSpec, QdiscSpec, ScenarioDefaults, ScenarioError, ScenarioSpec,
    SCENARIO_SCHEMA_VERSION,
};
pub use scheduled_event::ScheduledEvent;
pub use simulator::Simulator;
pub use time::SimTime;
pub use world::World;
