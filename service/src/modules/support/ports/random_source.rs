/// 随机源端口
///
/// 回复和资源的均匀随机选择都经由此端口，测试时可注入固定种子
pub trait RandomSource: Send + Sync {
    /// 返回 `[0, len)` 内均匀分布的下标，`len` 必须大于 0
    fn pick_index(&self, len: usize) -> usize;
}

/// 从切片中均匀随机选一个元素，空切片返回 None
pub fn choose<'a, T>(random: &dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(random.pick_index(items.len()))
}
