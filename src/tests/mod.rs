//! 单元测试模块
//! 覆盖画布、文本、分发器、各类组件和容器合成

pub mod dispatcher_tests;
pub mod container_tests;
