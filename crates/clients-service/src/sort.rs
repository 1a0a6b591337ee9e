//! 字符串排序与去重

/// 按字节序升序排序，可选去除重复项
///
/// 排序后重复项必然相邻，相邻去重即可去除全部重复；空列表直接返回空。
pub fn sort_unique(mut items: Vec<String>, remove_duplicates: bool) -> Vec<String> {
    items.sort_unstable();
    if remove_duplicates {
        items.dedup();
    }
    items
}
