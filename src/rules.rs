//! 成就规则定义

use crate::models::MoodKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 成就规则（带阈值的标签联合）
///
/// 评估器对所有变体穷举匹配，新增变体漏写谓词分支是编译错误，
/// 不走运行时默认分支。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AchievementRule {
    /// 累计会话数达到阈值
    TotalSessions { min: u32 },
    /// 累计阅读分钟数达到阈值（负数按 0 截断后累加）
    TotalMinutes { min: u32 },
    /// 累计阅读页数达到阈值（负数按 0 截断后累加）
    TotalPages { min: u32 },
    /// 最长连续阅读天数达到阈值
    StreakDays { min: u32 },
    /// 书库中的书目数达到阈值
    BooksAdded { min: u32 },
    /// 存在单次会话时长达到阈值（按原始值比较，不截断）
    SessionMinutesAtLeast { min: i32 },
    /// 周六/周日（本地日历）的会话数达到阈值
    WeekendSessions { min: u32 },
    /// 夜读窗口内开始的会话数达到阈值，窗口可跨午夜
    NightSessions {
        min: u32,
        start_hour: u32,
        end_hour: u32,
    },
    /// 最早记录的心情等于指定种类
    FirstMood { kind: MoodKind },
    /// 出现过的不同心情种类数达到阈值
    DistinctMoods { min: u32 },
}

impl fmt::Display for AchievementRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::TotalSessions { .. } => "total_sessions",
            Self::TotalMinutes { .. } => "total_minutes",
            Self::TotalPages { .. } => "total_pages",
            Self::StreakDays { .. } => "streak_days",
            Self::BooksAdded { .. } => "books_added",
            Self::SessionMinutesAtLeast { .. } => "session_minutes_at_least",
            Self::WeekendSessions { .. } => "weekend_sessions",
            Self::NightSessions { .. } => "night_sessions",
            Self::FirstMood { .. } => "first_mood",
            Self::DistinctMoods { .. } => "distinct_moods",
        };
        write!(f, "{}", s)
    }
}
