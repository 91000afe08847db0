//! 成就评估引擎
//!
//! 按目录顺序逐条评估规则，与既有解锁状态合并，产出更新后的完整状态
//! 和本次新解锁的子集。每次调用对全量活动数据重算，不做增量维护。

use crate::catalog::AchievementCatalog;
use crate::evaluator::RuleEvaluator;
use crate::models::{Achievement, ActivitySnapshot, EvaluationOutcome};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// 成就评估引擎
///
/// 引擎自身没有内部可变状态，`evaluate` 可从任意线程并发调用，
/// 不同快照上的调用互不干扰。把返回的 `updated` 写回共享存储时的
/// 串行化由调用方负责。
#[derive(Debug, Clone)]
pub struct AchievementsEngine {
    catalog: Arc<AchievementCatalog>,
    evaluator: RuleEvaluator,
}

impl AchievementsEngine {
    /// 创建引擎，本地日历默认 UTC
    pub fn new(catalog: Arc<AchievementCatalog>) -> Self {
        Self {
            catalog,
            evaluator: RuleEvaluator::new(Utc.fix()),
        }
    }

    /// 覆盖本地日历的时区偏移
    pub fn with_timezone(mut self, timezone: FixedOffset) -> Self {
        self.evaluator = RuleEvaluator::new(timezone);
        self
    }

    pub fn catalog(&self) -> &AchievementCatalog {
        &self.catalog
    }

    /// 评估全部规则，新解锁用当前时间盖戳
    pub fn evaluate(
        &self,
        snapshot: &ActivitySnapshot<'_>,
        current: &[Achievement],
    ) -> EvaluationOutcome {
        self.evaluate_at(snapshot, current, Utc::now())
    }

    /// 评估全部规则，解锁时间由调用方给定
    ///
    /// # Arguments
    /// * `snapshot` - 三类活动数据的只读快照
    /// * `current` - 既有成就状态，可为空、含重复或目录之外的 code
    /// * `now` - 新解锁记录的时间戳
    ///
    /// # Returns
    /// 更新后的完整状态（与目录同码同序）和本次新解锁的子集
    #[instrument(skip_all, fields(
        books = snapshot.books.len(),
        sessions = snapshot.sessions.len(),
        moods = snapshot.moods.len(),
        current = current.len()
    ))]
    pub fn evaluate_at(
        &self,
        snapshot: &ActivitySnapshot<'_>,
        current: &[Achievement],
        now: DateTime<Utc>,
    ) -> EvaluationOutcome {
        // 1. 按 code 索引既有状态，重复 code 后者覆盖前者
        let mut state_by_code: HashMap<String, Achievement> = current
            .iter()
            .map(|a| (a.code.clone(), a.clone()))
            .collect();

        let mut newly_unlocked = Vec::new();

        // 2. 按目录顺序逐条评估并合并
        for def in self.catalog.iter() {
            let satisfied = self.evaluator.matches(&def.rule, snapshot);

            // 输入中缺失的 code 合成一条锁定记录
            let existing = state_by_code
                .remove(&def.code)
                .unwrap_or_else(|| Achievement::locked(def));

            if satisfied && !existing.is_unlocked {
                let unlocked = existing.unlock(now);
                info!(code = %def.code, rule = %def.rule, points = def.points, "成就解锁");
                newly_unlocked.push(unlocked.clone());
                state_by_code.insert(def.code.clone(), unlocked);
            } else {
                // 谓词不满足或已解锁：原样保留，绝不回锁
                state_by_code.insert(def.code.clone(), existing);
            }
        }

        // 3. 按目录顺序读出，目录之外的孤儿 code 就此丢弃
        let updated: Vec<Achievement> = self
            .catalog
            .iter()
            .filter_map(|def| state_by_code.remove(&def.code))
            .collect();

        debug!(
            total = updated.len(),
            newly = newly_unlocked.len(),
            "评估完成"
        );

        EvaluationOutcome {
            updated,
            newly_unlocked,
        }
    }
}
