//! 成就目录
//!
//! 固定有序的成就定义表，进程启动时构建一次，之后只读。
//! 目录顺序决定所有状态集合的迭代和输出顺序。
//! 不提供全局单例：目录作为引擎的显式输入传入，测试可以替换成小目录。

use crate::error::{CatalogError, Result};
use crate::models::{Achievement, AchievementDefinition, MoodKind};
use crate::rules::AchievementRule;
use std::collections::HashMap;

/// 成就目录
#[derive(Debug, Clone)]
pub struct AchievementCatalog {
    definitions: Vec<AchievementDefinition>,
    /// code -> definitions 下标
    index: HashMap<String, usize>,
}

impl AchievementCatalog {
    /// 从定义列表构建目录
    ///
    /// 构建时校验：code 非空且唯一，夜读时段的小时在 0..=23 内。
    pub fn new(definitions: Vec<AchievementDefinition>) -> Result<Self> {
        let mut index = HashMap::with_capacity(definitions.len());

        for (i, def) in definitions.iter().enumerate() {
            if def.code.is_empty() {
                return Err(CatalogError::EmptyCode);
            }

            if let AchievementRule::NightSessions {
                start_hour,
                end_hour,
                ..
            } = def.rule
            {
                if start_hour > 23 || end_hour > 23 {
                    return Err(CatalogError::InvalidNightWindow {
                        start_hour,
                        end_hour,
                    });
                }
            }

            if index.insert(def.code.clone(), i).is_some() {
                return Err(CatalogError::DuplicateCode(def.code.clone()));
            }
        }

        Ok(Self { definitions, index })
    }

    /// 从 JSON 定义列表加载目录
    pub fn from_json(json: &str) -> Result<Self> {
        let definitions: Vec<AchievementDefinition> = serde_json::from_str(json)?;
        Self::new(definitions)
    }

    /// 内置目录（15 条）
    pub fn builtin() -> Self {
        let definitions = builtin_definitions();
        // 内置表的 code 已知合法且唯一，直接建索引
        let index = definitions
            .iter()
            .enumerate()
            .map(|(i, def)| (def.code.clone(), i))
            .collect();

        Self { definitions, index }
    }

    /// 按 code 查询定义，未知 code 返回 None 而非错误
    pub fn definition(&self, code: &str) -> Option<&AchievementDefinition> {
        self.index.get(code).map(|&i| &self.definitions[i])
    }

    /// 生成初始状态：每条定义一条锁定记录，保持目录顺序
    ///
    /// 用户没有历史成就状态时调用一次。
    pub fn initial_state(&self) -> Vec<Achievement> {
        self.definitions.iter().map(Achievement::locked).collect()
    }

    /// 按目录顺序迭代定义
    pub fn iter(&self) -> impl Iterator<Item = &AchievementDefinition> {
        self.definitions.iter()
    }

    /// 定义列表的只读视图
    pub fn definitions(&self) -> &[AchievementDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for AchievementCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// 内置成就定义表
fn builtin_definitions() -> Vec<AchievementDefinition> {
    vec![
        AchievementDefinition::new(
            "first_steps",
            "First Steps",
            "Log your first reading session.",
            AchievementRule::TotalSessions { min: 1 },
            "footsteps",
            10,
        ),
        AchievementDefinition::new(
            "tiny_habit",
            "Tiny Habit",
            "Read 3 days in a row.",
            AchievementRule::StreakDays { min: 3 },
            "leaf",
            15,
        ),
        AchievementDefinition::new(
            "weekly_flow",
            "Weekly Flow",
            "Read 7 days in a row.",
            AchievementRule::StreakDays { min: 7 },
            "calendar-check",
            25,
        ),
        AchievementDefinition::new(
            "page_turner_100",
            "Page Turner",
            "Read 100 pages in total.",
            AchievementRule::TotalPages { min: 100 },
            "book-pages",
            15,
        ),
        AchievementDefinition::new(
            "deep_diver_500",
            "Deep Diver",
            "Read 500 pages in total.",
            AchievementRule::TotalPages { min: 500 },
            "book-stack",
            30,
        ),
        AchievementDefinition::new(
            "time_keeper_300",
            "Time Keeper",
            "Read for 300 minutes in total.",
            AchievementRule::TotalMinutes { min: 300 },
            "clock-check",
            20,
        ),
        AchievementDefinition::new(
            "marathon_reader_1200",
            "Marathon Reader",
            "Read for 1200 minutes in total.",
            AchievementRule::TotalMinutes { min: 1200 },
            "stopwatch",
            40,
        ),
        AchievementDefinition::new(
            "library_starter",
            "Library Starter",
            "Add 3 books to your library.",
            AchievementRule::BooksAdded { min: 3 },
            "library",
            15,
        ),
        AchievementDefinition::new(
            "library_builder",
            "Library Builder",
            "Add 10 books to your library.",
            AchievementRule::BooksAdded { min: 10 },
            "library-plus",
            30,
        ),
        AchievementDefinition::new(
            "focus_burst",
            "Focus Burst",
            "Complete a single session of 30 minutes or longer.",
            AchievementRule::SessionMinutesAtLeast { min: 30 },
            "timer",
            20,
        ),
        AchievementDefinition::new(
            "night_owl",
            "Night Owl",
            "Complete 3 sessions between 23:00 and 05:00.",
            AchievementRule::NightSessions {
                min: 3,
                start_hour: 23,
                end_hour: 5,
            },
            "moon-stars",
            20,
        ),
        AchievementDefinition::new(
            "weekend_reader",
            "Weekend Reader",
            "Complete 4 sessions on Saturday or Sunday.",
            AchievementRule::WeekendSessions { min: 4 },
            "sun-lounge",
            15,
        ),
        AchievementDefinition::new(
            "mood_explorer",
            "Mood Explorer",
            "Log 4 distinct reading moods.",
            AchievementRule::DistinctMoods { min: 4 },
            "smiley",
            20,
        ),
        AchievementDefinition::new(
            "zen_chapter",
            "Zen Chapter",
            "First logged mood is Calm.",
            AchievementRule::FirstMood {
                kind: MoodKind::Calm,
            },
            "waves",
            10,
        ),
        AchievementDefinition::new(
            "laser_focus",
            "Laser Focus",
            "First logged mood is Focused.",
            AchievementRule::FirstMood {
                kind: MoodKind::Focused,
            },
            "target",
            10,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_def(code: &str) -> AchievementDefinition {
        AchievementDefinition::new(
            code,
            "Sample",
            "Sample detail.",
            AchievementRule::TotalSessions { min: 1 },
            "icon",
            10,
        )
    }

    #[test]
    fn test_builtin_catalog_size_and_order() {
        let catalog = AchievementCatalog::builtin();
        assert_eq!(catalog.len(), 15);

        // 目录顺序固定
        let codes: Vec<&str> = catalog.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes[0], "first_steps");
        assert_eq!(codes[14], "laser_focus");
    }

    #[test]
    fn test_definition_lookup() {
        let catalog = AchievementCatalog::builtin();

        let def = catalog.definition("night_owl").unwrap();
        assert_eq!(def.title, "Night Owl");
        assert_eq!(
            def.rule,
            AchievementRule::NightSessions {
                min: 3,
                start_hour: 23,
                end_hour: 5
            }
        );

        assert!(catalog.definition("nonexistent").is_none());
    }

    #[test]
    fn test_initial_state_all_locked() {
        let catalog = AchievementCatalog::builtin();
        let state = catalog.initial_state();

        assert_eq!(state.len(), catalog.len());
        for (achievement, def) in state.iter().zip(catalog.iter()) {
            assert_eq!(achievement.code, def.code);
            assert_eq!(achievement.description, def.detail);
            assert!(!achievement.is_unlocked);
            assert!(achievement.unlocked_at.is_none());
        }
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let result = AchievementCatalog::new(vec![sample_def("dup"), sample_def("dup")]);
        assert!(matches!(result, Err(CatalogError::DuplicateCode(code)) if code == "dup"));
    }

    #[test]
    fn test_empty_code_rejected() {
        let result = AchievementCatalog::new(vec![sample_def("")]);
        assert!(matches!(result, Err(CatalogError::EmptyCode)));
    }

    #[test]
    fn test_invalid_night_window_rejected() {
        let def = AchievementDefinition::new(
            "bad_window",
            "Bad Window",
            "Hour out of range.",
            AchievementRule::NightSessions {
                min: 1,
                start_hour: 24,
                end_hour: 5,
            },
            "icon",
            10,
        );

        let result = AchievementCatalog::new(vec![def]);
        assert!(matches!(
            result,
            Err(CatalogError::InvalidNightWindow {
                start_hour: 24,
                end_hour: 5
            })
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let catalog = AchievementCatalog::builtin();

        let json = serde_json::to_string(catalog.definitions()).unwrap();
        let reloaded = AchievementCatalog::from_json(&json).unwrap();

        assert_eq!(reloaded.definitions(), catalog.definitions());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            AchievementCatalog::from_json("not json"),
            Err(CatalogError::JsonError(_))
        ));
    }
}
