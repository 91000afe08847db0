//! 阅读成就规则引擎
//!
//! 根据用户累计的阅读活动（书目、阅读会话、心情记录）判定哪些成就
//! 应当解锁，提供：
//! - 固定有序的成就目录，按 code 查询和初始状态构造
//! - 带阈值的规则标签联合，穷举匹配评估
//! - 连续阅读天数、周末/夜读时段等本地日历判定
//! - 幂等且单调的状态合并，一旦解锁绝不回退
//!
//! 持久化、通知和界面展示都是宿主的职责，引擎只做纯计算。

pub mod catalog;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod models;
pub mod rules;

pub use catalog::AchievementCatalog;
pub use engine::AchievementsEngine;
pub use error::{CatalogError, Result};
pub use evaluator::RuleEvaluator;
pub use models::{
    Achievement, AchievementDefinition, ActivitySnapshot, Book, EvaluationOutcome, MoodKind,
    ReadingMood, ReadingSession,
};
pub use rules::AchievementRule;
