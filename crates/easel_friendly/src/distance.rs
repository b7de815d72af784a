//! Edit Distance
//!
//! 大小写不敏感替换代价的 Levenshtein 距离。
//!
//! 只有"替换"忽略大小写：`Color` 与 `color` 的距离为 0，
//! 但长度差异仍按插入/删除计数。

/// 两个字符忽略大小写后是否相同
fn same_letter(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// 计算编辑距离
///
/// 动态规划只保留两行，行长取较短的字符串，内存为 O(min(|a|, |b|))。
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // 行沿较短的字符串展开
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return long.len();
    }

    let mut prev_row: Vec<usize> = (0..=short.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; short.len() + 1];

    for (i, &lc) in long.iter().enumerate() {
        curr_row[0] = i + 1;

        for (j, &sc) in short.iter().enumerate() {
            let cost = usize::from(!same_letter(lc, sc));

            curr_row[j + 1] = (prev_row[j + 1] + 1) // 删除
                .min(curr_row[j] + 1) // 插入
                .min(prev_row[j] + cost); // 替换
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[short.len()]
}
