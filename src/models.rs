//! 成就系统领域模型

use crate::rules::AchievementRule;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 阅读心情种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodKind {
    Calm,
    Focused,
    Excited,
    Tired,
    Curious,
}

impl fmt::Display for MoodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Calm => "calm",
            Self::Focused => "focused",
            Self::Excited => "excited",
            Self::Tired => "tired",
            Self::Curious => "curious",
        };
        write!(f, "{}", s)
    }
}

/// 成就定义（目录持有，不可变）
///
/// 查询身份是 `code`，不使用代理 id。`title` 和 `detail` 是展示文案，
/// 与评估逻辑无关，但必须原样往返序列化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementDefinition {
    pub code: String,
    pub title: String,
    pub detail: String,
    pub rule: AchievementRule,
    /// 展示图标引用，宿主自行解释
    pub icon: String,
    #[serde(default = "default_points")]
    pub points: u32,
}

fn default_points() -> u32 {
    10
}

impl AchievementDefinition {
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        detail: impl Into<String>,
        rule: AchievementRule,
        icon: impl Into<String>,
        points: u32,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            detail: detail.into(),
            rule,
            icon: icon.into(),
            points,
        }
    }
}

/// 成就状态记录（目录中每个 code 对应一条）
///
/// 值语义：解锁通过 [`Achievement::unlock`] 产生替换用的新记录，
/// 不做原地修改。`is_unlocked` 单调，一旦为 true 引擎绝不重置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub code: String,
    pub title: String,
    pub description: String,
    pub is_unlocked: bool,
    /// 仅在 false -> true 转换时盖一次
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Achievement {
    /// 从定义合成一条锁定状态的记录
    pub fn locked(def: &AchievementDefinition) -> Self {
        Self {
            code: def.code.clone(),
            title: def.title.clone(),
            description: def.detail.clone(),
            is_unlocked: false,
            unlocked_at: None,
        }
    }

    /// 解锁并盖时间戳，返回新记录
    ///
    /// 对已解锁的记录无效果，时间戳保持首次解锁时刻。
    pub fn unlock(self, at: DateTime<Utc>) -> Self {
        if self.is_unlocked {
            return self;
        }
        Self {
            is_unlocked: true,
            unlocked_at: Some(at),
            ..self
        }
    }
}

/// 书目记录 - 评估只关心数量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub added_at: DateTime<Utc>,
}

impl Book {
    pub fn new(title: impl Into<String>, added_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            added_at,
        }
    }
}

/// 阅读会话记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingSession {
    pub id: Uuid,
    pub start: DateTime<Utc>,
    /// 坏输入可能为负，累计类规则累加前按 0 截断
    pub minutes: i32,
    /// 同上
    pub pages: i32,
}

impl ReadingSession {
    pub fn new(start: DateTime<Utc>, minutes: i32, pages: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            minutes,
            pages,
        }
    }
}

/// 阅读心情记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingMood {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub mood: MoodKind,
}

impl ReadingMood {
    pub fn new(date: DateTime<Utc>, mood: MoodKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            mood,
        }
    }
}

/// 活动快照 - 提供给规则评估的数据
///
/// 三类活动集合的只读借用，评估期间不发生复制。
#[derive(Debug, Clone, Copy)]
pub struct ActivitySnapshot<'a> {
    pub books: &'a [Book],
    pub sessions: &'a [ReadingSession],
    pub moods: &'a [ReadingMood],
}

impl<'a> ActivitySnapshot<'a> {
    pub fn new(books: &'a [Book], sessions: &'a [ReadingSession], moods: &'a [ReadingMood]) -> Self {
        Self {
            books,
            sessions,
            moods,
        }
    }
}

/// 评估结果
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationOutcome {
    /// 更新后的完整状态，与目录同序同码
    pub updated: Vec<Achievement>,
    /// 本次评估新解锁的子集，保持目录顺序
    pub newly_unlocked: Vec<Achievement>,
}
