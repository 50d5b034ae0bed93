//! 翻页策略
//!
//! `Running(page_no, empty_streak)` → `Done(reason)`，不做任何 IO

use std::fmt;

use crate::config::Config;

/// 结束原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// 连续空页达到阈值
    EmptyStreak { pages: u32 },
    /// 达到最大页数
    PageCap { max_pages: u32 },
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::EmptyStreak { pages } => write!(f, "连续 {} 页无题目", pages),
            StopReason::PageCap { max_pages } => write!(f, "已达到最大页数 {}", max_pages),
        }
    }
}

/// 下一步动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// 继续抓取该页
    Next(u32),
    Done(StopReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running { page_no: u32, empty_streak: u32 },
    Done { page_no: u32, reason: StopReason },
}

/// 翻页状态机
#[derive(Debug, Clone)]
pub struct PaginationState {
    state: State,
    empty_threshold: u32,
    max_pages: u32,
}

impl PaginationState {
    pub fn new(empty_threshold: u32, max_pages: u32) -> Self {
        Self {
            state: State::Running {
                page_no: 1,
                empty_streak: 0,
            },
            empty_threshold: empty_threshold.max(1),
            max_pages: max_pages.max(1),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.empty_page_threshold, config.max_pages)
    }

    /// 当前页码
    pub fn page_no(&self) -> u32 {
        match self.state {
            State::Running { page_no, .. } | State::Done { page_no, .. } => page_no,
        }
    }

    pub fn empty_streak(&self) -> u32 {
        match self.state {
            State::Running { empty_streak, .. } => empty_streak,
            State::Done { .. } => 0,
        }
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        match self.state {
            State::Running { .. } => None,
            State::Done { reason, .. } => Some(reason),
        }
    }

    /// 记录当前页的题目数并决定下一步
    pub fn record_page(&mut self, row_count: usize) -> Step {
        let (page_no, empty_streak) = match self.state {
            State::Running {
                page_no,
                empty_streak,
            } => (page_no, empty_streak),
            State::Done { reason, .. } => return Step::Done(reason),
        };

        let empty_streak = if row_count == 0 { empty_streak + 1 } else { 0 };

        let reason = if empty_streak >= self.empty_threshold {
            Some(StopReason::EmptyStreak {
                pages: empty_streak,
            })
        } else if page_no >= self.max_pages {
            Some(StopReason::PageCap {
                max_pages: self.max_pages,
            })
        } else {
            None
        };

        match reason {
            Some(reason) => {
                self.state = State::Done { page_no, reason };
                Step::Done(reason)
            }
            None => {
                self.state = State::Running {
                    page_no: page_no + 1,
                    empty_streak,
                };
                Step::Next(page_no + 1)
            }
        }
    }
}
