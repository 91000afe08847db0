//! 规则谓词评估
//!
//! 对活动快照逐条评估规则谓词，包含连续阅读天数算法和本地日历辅助。
//! 评估不产生错误：空集合按未达标处理，坏数据按规则各自的截断语义处理。

use crate::models::{ActivitySnapshot, MoodKind, ReadingSession};
use crate::rules::AchievementRule;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike, Utc, Weekday};
use std::collections::{BTreeSet, HashSet};

/// 规则评估器
///
/// 所有依赖本地日历的判定（周末、时段、按天归并）使用显式时区偏移，
/// 不读环境默认时区，结果可跨环境复现。
#[derive(Debug, Clone, Copy)]
pub struct RuleEvaluator {
    timezone: FixedOffset,
}

impl RuleEvaluator {
    pub fn new(timezone: FixedOffset) -> Self {
        Self { timezone }
    }

    /// 评估单条规则谓词
    pub fn matches(&self, rule: &AchievementRule, snapshot: &ActivitySnapshot<'_>) -> bool {
        match *rule {
            AchievementRule::TotalSessions { min } => snapshot.sessions.len() >= min as usize,

            AchievementRule::TotalMinutes { min } => {
                // 负数分钟按 0 截断后累加
                let total: i64 = snapshot
                    .sessions
                    .iter()
                    .map(|s| i64::from(s.minutes.max(0)))
                    .sum();
                total >= i64::from(min)
            }

            AchievementRule::TotalPages { min } => {
                let total: i64 = snapshot
                    .sessions
                    .iter()
                    .map(|s| i64::from(s.pages.max(0)))
                    .sum();
                total >= i64::from(min)
            }

            AchievementRule::StreakDays { min } => {
                self.longest_reading_streak(snapshot.sessions) >= min as usize
            }

            AchievementRule::BooksAdded { min } => snapshot.books.len() >= min as usize,

            AchievementRule::SessionMinutesAtLeast { min } => {
                // 按原始值比较，不截断
                snapshot.sessions.iter().any(|s| s.minutes >= min)
            }

            AchievementRule::WeekendSessions { min } => {
                let count = snapshot
                    .sessions
                    .iter()
                    .filter(|s| self.is_weekend(s.start))
                    .count();
                count >= min as usize
            }

            AchievementRule::NightSessions {
                min,
                start_hour,
                end_hour,
            } => {
                let count = snapshot
                    .sessions
                    .iter()
                    .filter(|s| is_night_hour(self.local_hour(s.start), start_hour, end_hour))
                    .count();
                count >= min as usize
            }

            AchievementRule::FirstMood { kind } => {
                // min_by_key 在并列最小时返回第一条，平局处理确定且稳定
                snapshot
                    .moods
                    .iter()
                    .min_by_key(|m| m.date)
                    .is_some_and(|m| m.mood == kind)
            }

            AchievementRule::DistinctMoods { min } => {
                let kinds: HashSet<MoodKind> = snapshot.moods.iter().map(|m| m.mood).collect();
                kinds.len() >= min as usize
            }
        }
    }

    /// 最长连续阅读天数
    ///
    /// 会话起始时间按本地日历归并到天，同一天多次会话只算一天。
    /// 去重后的日期升序遍历一轮：恰好是前一天的次日则延长连续段，
    /// 否则从 1 重新计数，返回途中见过的最大连续段长度。
    pub fn longest_reading_streak(&self, sessions: &[ReadingSession]) -> usize {
        let days: BTreeSet<NaiveDate> = sessions.iter().map(|s| self.local_day(s.start)).collect();

        let mut longest = 0;
        let mut current = 0;
        let mut prev: Option<NaiveDate> = None;

        for day in days {
            if prev.and_then(|p| p.succ_opt()) == Some(day) {
                current += 1;
            } else {
                current = 1;
            }
            longest = longest.max(current);
            prev = Some(day);
        }

        longest
    }

    fn local_day(&self, ts: DateTime<Utc>) -> NaiveDate {
        ts.with_timezone(&self.timezone).date_naive()
    }

    fn local_hour(&self, ts: DateTime<Utc>) -> u32 {
        ts.with_timezone(&self.timezone).hour()
    }

    fn is_weekend(&self, ts: DateTime<Utc>) -> bool {
        matches!(
            ts.with_timezone(&self.timezone).weekday(),
            Weekday::Sat | Weekday::Sun
        )
    }
}

/// 判断小时是否落在夜读窗口内
///
/// start_hour <= end_hour 时窗口为当天 [start_hour, end_hour)；
/// start_hour > end_hour 时窗口跨午夜，hour >= start_hour 或 hour < end_hour 均算。
fn is_night_hour(hour: u32, start_hour: u32, end_hour: u32) -> bool {
    if start_hour <= end_hour {
        hour >= start_hour && hour < end_hour
    } else {
        hour >= start_hour || hour < end_hour
    }
}
