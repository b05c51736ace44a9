//! 文章处理上下文
//!
//! 封装"我正在处理第几篇文章、是否需要先等待"这一信息

use std::fmt::Display;

/// 文章处理上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleCtx {
    /// 文章在本次运行中的序号（从1开始）
    pub index: usize,

    /// 远程调用前是否需要等待（第一篇之后的每一篇都需要）
    pub pace_before_call: bool,
}

impl ArticleCtx {
    /// 创建新的文章上下文
    pub fn new(index: usize) -> Self {
        Self {
            index,
            pace_before_call: index > 1,
        }
    }
}

impl Display for ArticleCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[文章 #{}]", self.index)
    }
}
