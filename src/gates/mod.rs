pub mod evaluator;

pub use evaluator::{
    is_blocked, GateEvaluator, GateResult, LunarOverride, TaskClass, TaskDescriptor, WaitUntil,
};
